//! Command Dispatcher: authorizes and routes a single inbound event.

use super::notify::PICKER_CAPTION;
use super::Gateway;
use crate::commands::{Command, ServiceAction};
use hubctl_core::message::{EventKind, InboundEvent};
use tracing::{debug, info, warn};

/// Payload that selects Italian. Anything else selects English.
const ITALIAN: &str = "it";
const ENGLISH: &str = "en";

impl Gateway {
    /// Handle one event. Results are only observable as replies or state
    /// changes.
    pub(super) async fn handle_event(&self, event: InboundEvent) {
        let Some(chat_id) = event.chat_id() else {
            debug!("skipping update {} with nothing to handle", event.sequence);
            return;
        };

        if !self.store.is_authorized(chat_id).await {
            warn!("unauthorized telegram id {chat_id} tried to access the bot");
            return;
        }

        match event.kind {
            EventKind::Callback {
                callback_id, data, ..
            } => {
                if let Err(e) = self.transport.answer_callback(&callback_id).await {
                    debug!("could not acknowledge callback {callback_id}: {e}");
                }
                self.handle_locale_selection(chat_id, &data).await;
            }
            EventKind::Message { text, .. } => self.handle_input(chat_id, &text).await,
            EventKind::Other => {}
        }
    }

    async fn handle_locale_selection(&self, chat_id: i64, payload: &str) {
        let locale = match payload {
            ITALIAN => ITALIAN,
            _ => ENGLISH,
        };
        self.store.set_locale(chat_id, locale).await;
        self.reply_in(chat_id, locale, "welcome").await;
    }

    async fn handle_input(&self, chat_id: i64, text: &str) {
        let Some(cmd) = Command::parse(text) else {
            self.reply(chat_id, "malformed").await;
            return;
        };

        match cmd {
            Command::Start => self.send_locale_buttons(chat_id, PICKER_CAPTION).await,
            Command::Help => self.send_service_list(chat_id).await,
            Command::Stop(name) => {
                if !self.store.is_admin(chat_id).await {
                    info!("operator {chat_id} tried to stop a service without admin rights");
                    self.reply(chat_id, "unauthorized").await;
                    return;
                }
                match name {
                    Some(name) => {
                        self.run_service(chat_id, &name, ServiceAction::Stop)
                            .await
                    }
                    None => self.reply(chat_id, "malformed").await,
                }
            }
            Command::Launch(name) => {
                self.run_service(chat_id, &name, ServiceAction::Start)
                    .await
            }
        }
    }

    async fn send_service_list(&self, chat_id: i64) {
        let list = self.store.read().await.service_list();
        if list.is_empty() {
            self.reply(chat_id, "unimplemented").await;
        } else {
            self.send_text(chat_id, &list).await;
        }
    }

    /// Look up `name` and run its start or stop script.
    async fn run_service(&self, chat_id: i64, name: &str, action: ServiceAction) {
        let Some(path) = self.store.service_path(name).await else {
            debug!("operator {chat_id} asked for unknown service '{name}'");
            self.reply(chat_id, "unimplemented").await;
            return;
        };

        info!("operator {chat_id} requested {action:?} of '{name}'");
        match self.executor.run(&path, action.script()).await {
            Ok(()) => self.reply(chat_id, "success").await,
            Err(e) => {
                warn!("{action:?} of '{name}' failed: {e}");
                self.reply(chat_id, "failure").await;
            }
        }
    }
}
