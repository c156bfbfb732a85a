use super::send::split_message;
use super::types::*;
use super::TelegramTransport;
use hubctl_core::{
    error::HubError,
    message::{Button, EventKind},
    traits::Transport,
};

#[test]
fn test_split_short_message() {
    let chunks = split_message("hello", 4096);
    assert_eq!(chunks, vec!["hello"]);
}

#[test]
fn test_split_long_message() {
    let text = "a\n".repeat(3000);
    let chunks = split_message(&text, 4096);
    assert!(chunks.len() >= 2);
    for chunk in &chunks {
        assert!(chunk.len() <= 4096);
    }
    assert_eq!(chunks.concat(), text);
}

#[test]
fn test_split_respects_char_boundaries() {
    let text = "é".repeat(10);
    let chunks = split_message(&text, 5);
    for chunk in &chunks {
        assert!(chunk.len() <= 5);
    }
    assert_eq!(chunks.concat(), text);
}

#[test]
fn test_text_message_becomes_message_event() {
    let json = r#"{
        "update_id": 10,
        "message": {
            "message_id": 1,
            "from": {"id": 200, "first_name": "Bruno"},
            "chat": {"id": 200, "type": "private"},
            "text": "/help"
        }
    }"#;
    let update: TgUpdate = serde_json::from_str(json).unwrap();
    let event = update.into_event();
    assert_eq!(event.sequence, 10);
    assert_eq!(
        event.kind,
        EventKind::Message {
            sender_id: 200,
            chat_id: 200,
            text: "/help".into(),
        }
    );
}

#[test]
fn test_callback_uses_originating_chat() {
    let json = r#"{
        "update_id": 11,
        "callback_query": {
            "id": "cb-1",
            "from": {"id": 555, "first_name": "Bruno"},
            "message": {
                "message_id": 9,
                "chat": {"id": 200, "type": "private"},
                "text": "pick one"
            },
            "data": "it"
        }
    }"#;
    let update: TgUpdate = serde_json::from_str(json).unwrap();
    let event = update.into_event();
    assert_eq!(event.sequence, 11);
    assert_eq!(
        event.kind,
        EventKind::Callback {
            callback_id: "cb-1".into(),
            chat_id: 200,
            data: "it".into(),
        }
    );
}

#[test]
fn test_unusable_updates_become_other() {
    let sticker = r#"{
        "update_id": 12,
        "message": {"message_id": 2, "chat": {"id": 200}}
    }"#;
    let update: TgUpdate = serde_json::from_str(sticker).unwrap();
    assert_eq!(update.into_event().kind, EventKind::Other);

    let empty_callback = r#"{
        "update_id": 13,
        "callback_query": {"id": "cb-2", "data": "it"}
    }"#;
    let update: TgUpdate = serde_json::from_str(empty_callback).unwrap();
    let event = update.into_event();
    assert_eq!(event.sequence, 13);
    assert_eq!(event.kind, EventKind::Other);

    let edited = r#"{ "update_id": 14, "edited_message": {} }"#;
    let update: TgUpdate = serde_json::from_str(edited).unwrap();
    assert_eq!(update.into_event().kind, EventKind::Other);
}

#[test]
fn test_get_updates_response_parses() {
    let json = r#"{"ok": true, "result": [
        {"update_id": 1, "message": {"message_id": 1, "chat": {"id": 5}, "text": "hi"}},
        {"update_id": 2, "message": {"message_id": 2, "chat": {"id": 5}, "text": "/start"}}
    ]}"#;
    let resp: TgResponse<Vec<TgUpdate>> = serde_json::from_str(json).unwrap();
    assert!(resp.ok);
    assert_eq!(resp.result.unwrap().len(), 2);

    let err = r#"{"ok": false, "description": "Unauthorized"}"#;
    let resp: TgResponse<Vec<TgUpdate>> = serde_json::from_str(err).unwrap();
    assert!(!resp.ok);
    assert!(resp.result.is_none());
    assert_eq!(resp.description.as_deref(), Some("Unauthorized"));
}

#[test]
fn test_reply_markup_serializes_inline_keyboard() {
    let keyboard = vec![vec![Button::new("🇮🇹", "it"), Button::new("🇬🇧", "en")]];
    let markup = TgReplyMarkup::from_keyboard(&keyboard);
    let value = serde_json::to_value(&markup).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "inline_keyboard": [[
                {"text": "🇮🇹", "callback_data": "it"},
                {"text": "🇬🇧", "callback_data": "en"}
            ]]
        })
    );
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let transport = TelegramTransport::with_base_url("http://127.0.0.1:9/botTEST");
    let err = transport.fetch_updates(0).await.unwrap_err();
    assert!(matches!(err, HubError::Transport(_)));

    let err = transport.send_text(1, "hello").await.unwrap_err();
    assert!(matches!(err, HubError::Transport(_)));
}
