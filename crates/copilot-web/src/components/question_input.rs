use leptos::prelude::*;
use leptos::web_sys;

use copilot_types::{ConversationId, MessageContent};

use crate::components::composer::{Composer, KeyPress, SendAffordance};

/// Multi-modal question box: text field, optional image upload, send control.
///
/// ## Props
/// - `on_send`: Called with the message content and `conversation_id`
/// - `disabled`: While true nothing is sent
/// - `placeholder`: Text field placeholder
/// - `clear_on_send`: Empty the text field after each send
/// - `conversation_id`: Passed through to `on_send`
/// - `selected_prompt`: Overwrites the text field whenever it changes to a non-empty value
/// - `oyd_enabled`: "On your data" mode; hides the image upload control
#[component]
pub fn QuestionInput<F>(
    on_send: F,
    disabled: impl Fn() -> bool + Send + Sync + Copy + 'static,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional)] clear_on_send: bool,
    #[prop(optional, into)] conversation_id: MaybeProp<ConversationId>,
    #[prop(optional, into)] selected_prompt: MaybeProp<String>,
    #[prop(optional)] oyd_enabled: bool,
) -> impl IntoView
where
    F: Fn(MessageContent, Option<ConversationId>) + Copy + Send + Sync + 'static,
{
    let composer = RwSignal::new(Composer::with_prompt(
        selected_prompt.get_untracked().as_deref(),
    ));

    Effect::new(move |_| {
        let prompt = selected_prompt.get();
        composer.maybe_update(|c| c.apply_selected_prompt(prompt.as_deref()));
    });

    let send_question = move || {
        if !composer.with_untracked(|c| c.can_send(disabled())) {
            return;
        }
        if let Some(content) = composer
            .try_update(|c| c.send(disabled(), clear_on_send))
            .flatten()
        {
            tracing::info!(with_image = content.image().is_some(), "Sending question");
            on_send(content, conversation_id.get_untracked());
        }
    };

    let on_question_keydown = move |ev: web_sys::KeyboardEvent| {
        let key = ev.key();
        if KeyPress::new(&key, ev.shift_key(), ev.is_composing()).submits_question() {
            ev.prevent_default();
            send_question();
        }
    };

    let on_send_control_keydown = move |ev: web_sys::KeyboardEvent| {
        let key = ev.key();
        if KeyPress::new(&key, ev.shift_key(), ev.is_composing()).activates_send_control() {
            send_question();
        }
    };

    let on_image_change = move |ev: web_sys::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let Some(file) = ev
                .target()
                .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0))
            else {
                return;
            };
            let Some(token) = composer.try_update(|c| c.begin_image_upload()) else {
                return;
            };

            leptos::task::spawn_local(async move {
                let result = read_and_resize(file).await;
                if composer
                    .try_update(|c| c.finish_image_upload(token, result))
                    .is_none()
                {
                    tracing::debug!("Question input unmounted before image upload finished");
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    view! {
        <div class="question-input-container">
            <textarea
                class="question-input-text-area"
                placeholder=placeholder
                prop:value=move || composer.with(|c| c.question().to_owned())
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    composer.update(|c| c.edit(text));
                }
                on:keydown=on_question_keydown
            />
            {(!oyd_enabled).then(|| view! {
                <div class="file-input-container">
                    <input
                        type="file"
                        id="fileInput"
                        class="file-input"
                        accept="image/*"
                        on:change=on_image_change
                    />
                    <label for="fileInput" class="file-label" aria-label="Upload Image">
                        <span class="file-icon" aria-label="Upload Image"></span>
                    </label>
                </div>
            })}
            {move || composer.with(|c| c.staged_image().cloned()).map(|image| view! {
                <img class="uploaded-image" src=image.url alt="Uploaded Preview"/>
            })}
            <div
                class="question-input-send-button-container"
                role="button"
                tabindex="0"
                aria-label="Ask question button"
                on:click=move |_| send_question()
                on:keydown=on_send_control_keydown
            >
                {move || match composer.with(|c| c.send_affordance(disabled())) {
                    SendAffordance::Active => view! {
                        <span class="question-input-send-button" title="Send Button"></span>
                    }.into_any(),
                    SendAffordance::Disabled => view! {
                        <span class="question-input-send-button-disabled"></span>
                    }.into_any(),
                }}
            </div>
            <div class="question-input-bottom-border"></div>
        </div>
    }
}

/// Scale the picked file to fit the attachment bounds and export it as a
/// `data:` URL.
///
/// Decoding runs in `createImageBitmap`, off the main thread; scaling and
/// export use a detached canvas.
#[cfg(feature = "hydrate")]
async fn read_and_resize(file: web_sys::File) -> copilot_types::Result<String> {
    use copilot_image::{canvas_output_type, fit_within, MAX_IMAGE_HEIGHT, MAX_IMAGE_WIDTH};
    use copilot_types::CopilotError;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let js_error = |e: wasm_bindgen::JsValue| format!("{:?}", e);
    let read_error = |message: String| CopilotError::FileRead {
        name: file.name(),
        message,
    };

    if file.size() == 0.0 {
        return Err(CopilotError::EmptyImage);
    }
    let window = web_sys::window().ok_or_else(|| read_error("no window".into()))?;

    let promise = window
        .create_image_bitmap_with_blob(&file)
        .map_err(|e| read_error(js_error(e)))?;
    let bitmap: web_sys::ImageBitmap = JsFuture::from(promise)
        .await
        .map_err(|e| CopilotError::ImageDecode(js_error(e)))?
        .unchecked_into();

    let (width, height) = fit_within(
        bitmap.width(),
        bitmap.height(),
        MAX_IMAGE_WIDTH,
        MAX_IMAGE_HEIGHT,
    );
    let mime_type = canvas_output_type(&file.type_());
    let encode_error = |message: String| CopilotError::ImageEncode {
        format: mime_type.to_owned(),
        message,
    };

    let canvas: web_sys::HtmlCanvasElement = window
        .document()
        .ok_or_else(|| encode_error("no document".into()))?
        .create_element("canvas")
        .map_err(|e| encode_error(js_error(e)))?
        .unchecked_into();
    canvas.set_width(width);
    canvas.set_height(height);

    let context: web_sys::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| encode_error(js_error(e)))?
        .ok_or_else(|| encode_error("2d context unavailable".into()))?
        .unchecked_into();
    let drawn = context.draw_image_with_image_bitmap_and_dw_and_dh(
        &bitmap,
        0.0,
        0.0,
        f64::from(width),
        f64::from(height),
    );
    bitmap.close();
    drawn.map_err(|e| encode_error(js_error(e)))?;

    tracing::debug!(width, height, mime_type, "Scaled image attachment");
    canvas
        .to_data_url_with_type(mime_type)
        .map_err(|e| encode_error(js_error(e)))
}
