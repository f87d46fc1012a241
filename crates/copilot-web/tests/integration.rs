//! End-to-end tests for the chat input flow.
//!
//! Each test walks the path a user takes: pick an example prompt -> the
//! question box picks it up -> edit / attach -> send -> inspect what the
//! parent receives.

use std::cell::RefCell;

use copilot_types::{ConversationId, ImageUrl, MessageContent};
use copilot_web::components::composer::{Composer, ImageOutcome, KeyPress};
use copilot_web::components::prompt_suggestions::PromptSelection;
use copilot_web::components::EXAMPLE_PROMPTS;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Stands in for the parent component: records every `on_send` call.
#[derive(Default)]
struct Parent {
    sent: RefCell<Vec<(MessageContent, Option<ConversationId>)>>,
}

impl Parent {
    fn on_send(&self, content: MessageContent, id: Option<ConversationId>) {
        self.sent.borrow_mut().push((content, id));
    }

    fn sent(self) -> Vec<(MessageContent, Option<ConversationId>)> {
        self.sent.into_inner()
    }
}

/// The question box's send path: guard, build, hand to the parent.
fn send(
    composer: &mut Composer,
    parent: &Parent,
    disabled: bool,
    clear_on_send: bool,
    id: Option<&ConversationId>,
) {
    if let Some(content) = composer.send(disabled, clear_on_send) {
        parent.on_send(content, id.cloned());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn clicked_prompt_is_sent_verbatim() {
    let conversation = ConversationId::from("conv-42");
    let parent = Parent::default();
    let mut selection = PromptSelection::default();
    let mut composer = Composer::default();

    let prompt = selection.click(EXAMPLE_PROMPTS[0]);
    assert!(composer.apply_selected_prompt(Some(&prompt)));
    assert_eq!(composer.question(), "Give me an overview about TechSphere");

    send(&mut composer, &parent, false, true, Some(&conversation));

    assert_eq!(
        parent.sent(),
        vec![(
            MessageContent::TextOnly("Give me an overview about TechSphere".into()),
            Some(conversation)
        )]
    );
    assert_eq!(composer.question(), "");
}

#[test]
fn edited_prompt_with_image_sends_two_parts_then_text_only() {
    let parent = Parent::default();
    let mut composer = Composer::default();

    composer.apply_selected_prompt(Some(EXAMPLE_PROMPTS[1]));
    composer.edit("Which applications have the most tech debt in finance?");

    let token = composer.begin_image_upload();
    assert_eq!(
        composer.finish_image_upload(token, Ok("data:image/png;base64,AAAA".into())),
        ImageOutcome::Staged
    );

    send(&mut composer, &parent, false, false, None);
    send(&mut composer, &parent, false, false, None);

    let sent = parent.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(
        sent[0].0,
        MessageContent::TextWithImage {
            text: "Which applications have the most tech debt in finance?".into(),
            image: ImageUrl::new("data:image/png;base64,AAAA"),
        }
    );
    assert_eq!(
        sent[1].0,
        MessageContent::TextOnly("Which applications have the most tech debt in finance?".into())
    );
    assert!(sent.iter().all(|(_, id)| id.is_none()));
}

#[test]
fn disabled_input_swallows_enter_and_clicks() {
    let parent = Parent::default();
    let mut composer = Composer::with_prompt(Some(EXAMPLE_PROMPTS[2]));

    if KeyPress::new("Enter", false, false).submits_question() {
        send(&mut composer, &parent, true, true, None);
    }
    send(&mut composer, &parent, true, true, None);

    assert!(parent.sent().is_empty());
    assert_eq!(composer.question(), EXAMPLE_PROMPTS[2]);
}

#[test]
fn shift_enter_and_ime_enter_do_not_send() {
    let parent = Parent::default();
    let mut composer = Composer::default();
    composer.edit("hello");

    for press in [
        KeyPress::new("Enter", true, false),
        KeyPress::new("Enter", false, true),
    ] {
        if press.submits_question() {
            send(&mut composer, &parent, false, true, None);
        }
    }

    assert!(parent.sent().is_empty());
}

#[test]
fn switching_prompts_keeps_only_the_latest() {
    let mut selection = PromptSelection::default();
    let mut composer = Composer::default();

    for prompt in EXAMPLE_PROMPTS {
        let text = selection.click(prompt);
        composer.apply_selected_prompt(Some(&text));
    }

    assert_eq!(selection.selected(), Some(EXAMPLE_PROMPTS[3]));
    assert_eq!(composer.question(), EXAMPLE_PROMPTS[3]);
}
