//! Internationalization: operator-facing reply text.
//!
//! Templates come from the state document's `localization` table. Lookup
//! falls back to the default locale, then to built-in English text, so an
//! incomplete catalog never produces an empty reply for a known key.


use hubctl_core::config::{AppState, DEFAULT_LOCALE};
use tracing::warn;

/// Placeholder replaced with the operator's display name.
pub const NAME_PLACEHOLDER: &str = "%s";

/// Built-in English text for the keys the dispatcher renders.
fn builtin(key: &str) -> Option<&'static str> {
    let text = match key {
        "welcome" => "Welcome %s! Send /help to see the available services.",
        "malformed" => "Commands start with '/'. Send /help for the list.",
        "unauthorized" => "Sorry %s, only the administrator can do that.",
        "unimplemented" => "That service is not configured.",
        "failure" => "Something went wrong, the service did not respond as expected.",
        "success" => "Done.",
        _ => return None,
    };
    Some(text)
}

/// Resolve the template for `key` in `locale`.
///
/// Order: the operator's locale, the default locale, built-in English.
/// Unknown keys resolve to an empty string.
pub fn resolve<'a>(state: &'a AppState, locale: &str, key: &str) -> &'a str {
    if let Some(text) = state.template(locale, key) {
        return text;
    }
    if locale != DEFAULT_LOCALE {
        if let Some(text) = state.template(DEFAULT_LOCALE, key) {
            return text;
        }
    }
    match builtin(key) {
        Some(text) => text,
        None => {
            warn!("no template for '{key}' in any locale");
            ""
        }
    }
}

/// Substitute the operator's display name into a template.
pub fn render(template: &str, name: &str) -> String {
    template.replace(NAME_PLACEHOLDER, name)
}

/// Resolve and render `key` for an operator, using their current locale.
///
/// Unknown operators get the default locale and an empty name.
pub fn localize(state: &AppState, chat_id: i64, key: &str) -> String {
    let locale = state
        .operator(chat_id)
        .map(|op| op.locale.as_str())
        .unwrap_or(DEFAULT_LOCALE);
    localize_in(state, chat_id, locale, key)
}

/// Resolve and render `key` in an explicit locale, with the operator's name.
pub fn localize_in(state: &AppState, chat_id: i64, locale: &str, key: &str) -> String {
    let name = state
        .operator(chat_id)
        .map(|op| op.username.as_str())
        .unwrap_or("");
    render(resolve(state, locale, key), name)
}
