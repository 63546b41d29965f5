//! Types for messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wire::null_default;

/// A message received in a group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub is_read: bool,
    pub is_favorite: bool,
    /// Whether the sender chose to disclose their identity
    pub is_revealed: bool,
    #[serde(rename = "senderID", skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of a group's messages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageList {
    #[serde(deserialize_with = "null_default")]
    pub messages: Vec<Message>,
}

/// Partial update of a message's flags. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

/// Payload of an anonymous message sent through a group's public link
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reveal_name: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_decodes_api_shape() {
        let message: Message = serde_json::from_value(json!({
            "id": "m1",
            "content": "You run great meetings",
            "isRead": false,
            "isFavorite": true,
            "isRevealed": true,
            "senderID": "Bruno",
            "createdAt": "2024-05-02T08:30:00Z"
        }))
        .unwrap();

        assert_eq!(message.sender_id.as_deref(), Some("Bruno"));
        assert!(message.is_favorite);
        assert!(message.is_revealed);
        assert!(!message.is_read);
    }

    #[test]
    fn anonymous_message_has_no_sender() {
        let message: Message = serde_json::from_value(json!({
            "id": "m2",
            "content": "hi",
            "senderID": null
        }))
        .unwrap();
        assert_eq!(message.sender_id, None);

        let list: MessageList = serde_json::from_value(json!({ "messages": null })).unwrap();
        assert!(list.messages.is_empty());
    }

    #[test]
    fn update_request_omits_unset_flags() {
        let request = UpdateMessageRequest {
            is_favorite: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "isFavorite": false })
        );
    }

    #[test]
    fn send_request_wire_names() {
        let request = SendMessageRequest {
            content: "hello".to_string(),
            sender_id: Some("Carla".to_string()),
            reveal_name: Some(true),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "content": "hello", "senderId": "Carla", "revealName": true })
        );
    }
}
