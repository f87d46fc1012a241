//! Headless state behind [`QuestionInput`](super::question_input::QuestionInput).
//!
//! Everything the question box decides (what the text field holds, whether a
//! send is allowed, what gets sent, which image upload wins) lives here so it
//! can be exercised without a DOM. The component keeps one `Composer` in a
//! signal and forwards DOM events to it.

use copilot_types::{ImageUrl, MessageContent};

/// Issued per image upload. Only the most recently issued token may stage
/// its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageToken(u64);

/// What happened to a finished image upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOutcome {
    Staged,
    /// A newer upload was started after this one; the result was dropped.
    Stale,
    Failed,
}

/// Which send control the view renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendAffordance {
    Active,
    Disabled,
}

/// The parts of a keyboard event the question box cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress<'a> {
    pub key: &'a str,
    pub shift: bool,
    /// An input method editor composition is in progress.
    pub composing: bool,
}

impl<'a> KeyPress<'a> {
    pub fn new(key: &'a str, shift: bool, composing: bool) -> Self {
        Self {
            key,
            shift,
            composing,
        }
    }

    /// Enter in the text field sends; Shift+Enter is a newline and keys
    /// pressed mid-composition belong to the IME.
    pub fn submits_question(&self) -> bool {
        self.key == "Enter" && !self.shift && !self.composing
    }

    /// Enter or Space on the focused send control.
    pub fn activates_send_control(&self) -> bool {
        self.key == "Enter" || self.key == " "
    }
}

#[derive(Debug, Clone, Default)]
pub struct Composer {
    question: String,
    staged_image: Option<ImageUrl>,
    edited_since_prompt: bool,
    last_prompt: Option<String>,
    issued_image_tokens: u64,
}

impl Composer {
    /// Start from the prompt the parent already selected, if any.
    pub fn with_prompt(prompt: Option<&str>) -> Self {
        let mut composer = Self::default();
        composer.apply_selected_prompt(prompt);
        composer
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn staged_image(&self) -> Option<&ImageUrl> {
        self.staged_image.as_ref()
    }

    /// The user typed since the last prompt was applied (or since the last
    /// clearing send).
    pub fn edited_since_prompt(&self) -> bool {
        self.edited_since_prompt
    }

    /// Sync the text field with the parent's selected prompt.
    ///
    /// A non-empty prompt that differs from the previously supplied one
    /// overwrites the question, typed text included. Returns whether the
    /// question changed.
    pub fn apply_selected_prompt(&mut self, prompt: Option<&str>) -> bool {
        let prompt = prompt.filter(|p| !p.is_empty());
        if self.last_prompt.as_deref() == prompt {
            return false;
        }
        self.last_prompt = prompt.map(str::to_owned);

        let Some(prompt) = prompt else {
            return false;
        };
        if self.edited_since_prompt && !self.question.is_empty() {
            tracing::debug!("Selected prompt replaces manually edited question");
        }
        tracing::debug!("Updating question from selected prompt: {}", prompt);
        self.question = prompt.to_owned();
        self.edited_since_prompt = false;
        true
    }

    /// Text field input event.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.question = text.into();
        self.edited_since_prompt = true;
    }

    /// Register a new image upload. Any upload still in flight becomes stale.
    pub fn begin_image_upload(&mut self) -> ImageToken {
        self.issued_image_tokens += 1;
        ImageToken(self.issued_image_tokens)
    }

    /// Apply the result of the upload identified by `token`.
    pub fn finish_image_upload(
        &mut self,
        token: ImageToken,
        result: copilot_types::Result<String>,
    ) -> ImageOutcome {
        if token.0 != self.issued_image_tokens {
            tracing::warn!(
                token = token.0,
                latest = self.issued_image_tokens,
                "Discarding result of superseded image upload"
            );
            return ImageOutcome::Stale;
        }

        match result {
            Ok(url) => {
                self.staged_image = Some(ImageUrl::new(url));
                ImageOutcome::Staged
            }
            Err(e) => {
                tracing::error!("Failed to prepare image attachment: {}", e);
                ImageOutcome::Failed
            }
        }
    }

    pub fn can_send(&self, disabled: bool) -> bool {
        !disabled && !self.question.trim().is_empty()
    }

    pub fn send_affordance(&self, disabled: bool) -> SendAffordance {
        if self.can_send(disabled) {
            SendAffordance::Active
        } else {
            SendAffordance::Disabled
        }
    }

    /// Take the message to hand to the parent, or `None` when sending is not
    /// allowed. The staged image is always consumed; the question is cleared
    /// only with `clear_on_send`.
    pub fn send(&mut self, disabled: bool, clear_on_send: bool) -> Option<MessageContent> {
        if !self.can_send(disabled) {
            return None;
        }

        let content = MessageContent::new(self.question.clone(), self.staged_image.take());
        if clear_on_send {
            self.question.clear();
            self.edited_since_prompt = false;
        }
        Some(content)
    }
}
