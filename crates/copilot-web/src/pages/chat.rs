use leptos::prelude::*;

use copilot_types::{ChatMessage, ConversationId, FrontendSettings, MessageContent};

use crate::components::{PromptSuggestions, QuestionInput};
use crate::server::settings::get_frontend_settings;

#[component]
pub fn ChatPage() -> impl IntoView {
    let settings = Resource::new(|| (), |_| get_frontend_settings());

    view! {
        <Suspense fallback=|| view! { <p>"Loading..."</p> }>
            {move || settings.get().map(|result| {
                let settings = result.unwrap_or_else(|e| {
                    tracing::error!("Failed to load frontend settings: {}", e);
                    FrontendSettings::default()
                });
                view! { <Chat settings=settings/> }
            })}
        </Suspense>
    }
}

/// One conversation: example prompts, the sent questions, and the question box.
#[component]
fn Chat(settings: FrontendSettings) -> impl IntoView {
    let conversation_id = ConversationId::generate();
    let messages = RwSignal::new(Vec::<ChatMessage>::new());
    let (selected_prompt, set_selected_prompt) = signal(Option::<String>::None);

    let on_prompt_click = move |prompt: String| set_selected_prompt.set(Some(prompt));

    let on_send = move |content: MessageContent, id: Option<ConversationId>| {
        tracing::info!(
            conversation_id = id.as_ref().map(ConversationId::as_str),
            "Question submitted"
        );
        messages.update(|m| m.push(ChatMessage::user(content)));
    };

    view! {
        <div class="chat-container">
            <header class="chat-header">
                <h1 class="chat-title">{settings.ui.title}</h1>
            </header>
            {move || {
                if messages.with(Vec::is_empty) {
                    view! {
                        <div class="chat-empty-state">
                            <h2 class="chat-empty-state-title">{settings.ui.chat_title.clone()}</h2>
                            <p class="chat-empty-state-subtitle">{settings.ui.chat_description.clone()}</p>
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <div class="chat-message-stream">
                            <For
                                each=move || messages.get()
                                key=|message| message.id
                                children=|message: ChatMessage| view! { <UserMessage message=message/> }
                            />
                        </div>
                    }.into_any()
                }
            }}
            <PromptSuggestions on_prompt_click=on_prompt_click/>
            <QuestionInput
                on_send=on_send
                disabled=|| false
                placeholder="Type a new question..."
                clear_on_send=true
                conversation_id=conversation_id
                selected_prompt=selected_prompt
                oyd_enabled=settings.oyd_enabled
            />
        </div>
    }
}

#[component]
fn UserMessage(message: ChatMessage) -> impl IntoView {
    let image = message.content.image().cloned();

    view! {
        <div class="chat-message-user">
            <div class="chat-message-user-text">{message.content.text().to_owned()}</div>
            {image.map(|image| view! {
                <img class="chat-message-user-image" src=image.url alt="Attached image"/>
            })}
            <span class="chat-message-date">{message.date.format("%H:%M").to_string()}</span>
        </div>
    }
}
