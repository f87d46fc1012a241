use leptos::prelude::*;

/// Example prompts offered above the question box.
pub const EXAMPLE_PROMPTS: [&str; 4] = [
    "Give me an overview about TechSphere",
    "Which applications currently have the highest amount of tech debt?",
    "How can I transform this application to meet my business standards?",
    "What needs to change to meet my company's naming conventions?",
];

/// Which example prompt was clicked last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromptSelection {
    selected: Option<&'static str>,
}

impl PromptSelection {
    /// Record a click and return the text to hand to the parent.
    pub fn click(&mut self, prompt: &'static str) -> String {
        self.selected = Some(prompt);
        prompt.to_owned()
    }

    pub fn selected(&self) -> Option<&'static str> {
        self.selected
    }

    pub fn is_active(&self, prompt: &str) -> bool {
        self.selected == Some(prompt)
    }

    pub fn button_class(&self, prompt: &str) -> &'static str {
        if self.is_active(prompt) {
            "prompt-button active-prompt"
        } else {
            "prompt-button"
        }
    }
}

/// Click handler behind every prompt button: highlight `prompt`, then report
/// its text. Nothing is reported once the selection has been disposed.
pub fn click_prompt(
    selection: RwSignal<PromptSelection>,
    prompt: &'static str,
    on_prompt_click: impl Fn(String),
) {
    if let Some(prompt) = selection.try_update(|s| s.click(prompt)) {
        tracing::info!("Example prompt clicked: {}", prompt);
        on_prompt_click(prompt);
    }
}

/// Clickable list of example prompts.
///
/// ## Props
/// - `on_prompt_click`: Called with the prompt text on every click
#[component]
pub fn PromptSuggestions<F>(on_prompt_click: F) -> impl IntoView
where
    F: Fn(String) + Copy + Send + Sync + 'static,
{
    let selection = RwSignal::new(PromptSelection::default());

    let handle_click =
        move |prompt: &'static str| click_prompt(selection, prompt, on_prompt_click);

    view! {
        <div class="prompt-container">
            <h3 class="prompt-title">"Example Prompts"</h3>
            <div class="prompt-list">
                {EXAMPLE_PROMPTS
                    .into_iter()
                    .map(|prompt| {
                        view! {
                            <button
                                class=move || selection.with(|s| s.button_class(prompt))
                                on:click=move |_| handle_click(prompt)
                            >
                                {prompt}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::reactive::owner::Owner;
    use std::cell::RefCell;

    #[test]
    fn nothing_is_highlighted_initially() {
        let selection = PromptSelection::default();
        assert_eq!(selection.selected(), None);
        for prompt in EXAMPLE_PROMPTS {
            assert_eq!(selection.button_class(prompt), "prompt-button");
        }
    }

    #[test]
    fn click_returns_the_prompt_text_and_highlights_only_it() {
        for prompt in EXAMPLE_PROMPTS {
            let mut selection = PromptSelection::default();
            assert_eq!(selection.click(prompt), prompt);
            for other in EXAMPLE_PROMPTS {
                assert_eq!(selection.is_active(other), other == prompt);
            }
            assert_eq!(selection.button_class(prompt), "prompt-button active-prompt");
        }
    }

    #[test]
    fn click_handler_reports_each_prompt_exactly_once() {
        Owner::new_root(None).with(|| {
            let selection = RwSignal::new(PromptSelection::default());
            let received = RefCell::new(Vec::new());
            let on_prompt_click = |text: String| received.borrow_mut().push(text);

            for prompt in EXAMPLE_PROMPTS {
                click_prompt(selection, prompt, on_prompt_click);

                assert_eq!(received.borrow().last().map(String::as_str), Some(prompt));
                selection.with_untracked(|s| {
                    for other in EXAMPLE_PROMPTS {
                        assert_eq!(s.is_active(other), other == prompt);
                    }
                });
            }

            assert_eq!(received.into_inner(), EXAMPLE_PROMPTS.map(str::to_owned).to_vec());
        });
    }

    #[test]
    fn clicking_the_same_prompt_twice_is_idempotent() {
        let mut once = PromptSelection::default();
        once.click(EXAMPLE_PROMPTS[1]);
        let mut twice = once;
        twice.click(EXAMPLE_PROMPTS[1]);
        assert_eq!(once, twice);
    }

    #[test]
    fn later_click_moves_the_highlight() {
        let mut selection = PromptSelection::default();
        selection.click(EXAMPLE_PROMPTS[0]);
        selection.click(EXAMPLE_PROMPTS[3]);
        assert!(!selection.is_active(EXAMPLE_PROMPTS[0]));
        assert_eq!(selection.selected(), Some(EXAMPLE_PROMPTS[3]));
    }
}
