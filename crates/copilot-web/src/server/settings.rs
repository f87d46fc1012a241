//! Frontend settings served to the browser.
//!
//! Values come from environment variables on the server:
//! - `OYD_ENABLED` — "on your data" mode, hides image upload (`true`/`1`/`yes`)
//! - `UI_TITLE`, `UI_CHAT_TITLE`, `UI_CHAT_DESCRIPTION` — header copy
//!
//! Anything unset keeps its default.

use leptos::prelude::*;

use copilot_types::FrontendSettings;

/// Build settings from a key lookup. Unset or empty keys keep the default.
pub fn settings_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> FrontendSettings {
    let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let mut settings = FrontendSettings::default();
    if let Some(value) = var("OYD_ENABLED") {
        settings.oyd_enabled = parse_flag(&value);
    }
    if let Some(title) = var("UI_TITLE") {
        settings.ui.title = title;
    }
    if let Some(chat_title) = var("UI_CHAT_TITLE") {
        settings.ui.chat_title = chat_title;
    }
    if let Some(chat_description) = var("UI_CHAT_DESCRIPTION") {
        settings.ui.chat_description = chat_description;
    }
    settings
}

#[cfg(feature = "ssr")]
pub fn settings_from_env() -> FrontendSettings {
    settings_from_lookup(|key| std::env::var(key).ok())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

#[server]
pub async fn get_frontend_settings() -> Result<FrontendSettings, ServerFnError> {
    Ok(settings_from_env())
}
