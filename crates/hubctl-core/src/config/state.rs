//! The persisted state document: operators, message catalog, and services.

use crate::error::HubError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Locale used when an operator's own locale can not render a message.
pub const DEFAULT_LOCALE: &str = "en";

/// Message keys the dispatcher renders.
pub const MESSAGE_KEYS: &[&str] = &[
    "welcome",
    "malformed",
    "unauthorized",
    "unimplemented",
    "failure",
    "success",
];

/// Everything the bot knows, loaded once and rewritten on every locale change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// Operator allowed to stop services. Zero means nobody.
    #[serde(rename = "adminTelegramId", default)]
    pub admin_id: i64,
    /// Allow-list keyed by conversation id.
    #[serde(default)]
    pub whitelist: BTreeMap<i64, Operator>,
    /// Locale -> message key -> template.
    #[serde(default)]
    pub localization: BTreeMap<String, BTreeMap<String, Template>>,
    /// Service name -> script location.
    #[serde(default)]
    pub hub: BTreeMap<String, Service>,
}

/// An authorized operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    /// Display name substituted into message templates.
    #[serde(default)]
    pub username: String,
    #[serde(default = "default_locale")]
    pub locale: String,
}

/// A localized message template. `%s` is replaced with the operator's name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub text: String,
}

/// A controllable service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Prefix that `start.sh` / `stop.sh` are appended to verbatim.
    #[serde(default)]
    pub path: String,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

impl AppState {
    /// Parse a state document.
    pub fn from_json(bytes: &[u8]) -> Result<Self, HubError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Serialize with four-space indentation.
    pub fn to_json(&self) -> Result<Vec<u8>, HubError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        Ok(buf)
    }

    pub fn operator(&self, chat_id: i64) -> Option<&Operator> {
        self.whitelist.get(&chat_id)
    }

    pub fn is_authorized(&self, chat_id: i64) -> bool {
        self.whitelist.contains_key(&chat_id)
    }

    pub fn is_admin(&self, chat_id: i64) -> bool {
        self.admin_id != 0 && self.admin_id == chat_id
    }

    pub fn service(&self, name: &str) -> Option<&Service> {
        self.hub.get(name)
    }

    /// Registered service names as slash commands, e.g. `/db /web`.
    pub fn service_list(&self) -> String {
        self.hub
            .keys()
            .map(|name| format!("/{name}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Look up a raw template.
    pub fn template(&self, locale: &str, key: &str) -> Option<&str> {
        self.localization
            .get(locale)
            .and_then(|messages| messages.get(key))
            .map(|t| t.text.as_str())
    }

    /// Consistency problems worth reporting. None of them stop the bot.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.admin_id != 0 && !self.whitelist.contains_key(&self.admin_id) {
            warnings.push(format!(
                "admin {} is not in the whitelist and will be ignored",
                self.admin_id
            ));
        }
        if self.whitelist.is_empty() {
            warnings.push("whitelist is empty; every update will be dropped".to_string());
        }
        if !self.localization.contains_key(DEFAULT_LOCALE) {
            warnings.push(format!("no '{DEFAULT_LOCALE}' localization to fall back on"));
        }
        for (locale, messages) in &self.localization {
            for key in MESSAGE_KEYS {
                if !messages.contains_key(*key) {
                    warnings.push(format!("localization '{locale}' is missing '{key}'"));
                }
            }
        }
        for (id, op) in &self.whitelist {
            if !self.localization.contains_key(&op.locale) {
                warnings.push(format!(
                    "operator {id} uses locale '{}' which has no messages",
                    op.locale
                ));
            }
        }
        for (name, service) in &self.hub {
            if name.chars().any(char::is_uppercase) {
                warnings.push(format!(
                    "service '{name}' has uppercase letters and can never match a command"
                ));
            }
            if name.contains(char::is_whitespace) || name.is_empty() {
                warnings.push(format!("service '{name}' is not a usable command name"));
            }
            if service.path.is_empty() {
                warnings.push(format!("service '{name}' has no script path"));
            }
        }

        warnings
    }
}

/// Load the state document from disk.
///
/// Unlike process settings, a missing document is fatal: there is nobody to
/// authorize without it.
pub fn load(path: &Path) -> Result<AppState, HubError> {
    let bytes = std::fs::read(path)
        .map_err(|e| HubError::Config(format!("failed to read {}: {e}", path.display())))?;
    let state = AppState::from_json(&bytes)
        .map_err(|e| HubError::Config(format!("failed to parse {}: {e}", path.display())))?;
    info!(
        "loaded {} operators, {} locales, {} services from {}",
        state.whitelist.len(),
        state.localization.len(),
        state.hub.len(),
        path.display()
    );
    Ok(state)
}
