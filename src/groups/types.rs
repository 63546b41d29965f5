//! Types for message groups and shared access grants

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::wire::{lenient, lenient_strings, millis_timestamp, null_default};

/// Per-group settings.
///
/// Keys this client doesn't model are kept in `extra` and round-trip unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupSettings {
    /// Suggested prompts shown to senders
    #[serde(deserialize_with = "lenient_strings")]
    pub icebreakers: Vec<String>,

    /// Words rejected by content moderation
    #[serde(deserialize_with = "lenient_strings")]
    pub banned_words: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named inbox with a public sharing slug
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageGroup {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub is_public: bool,
    pub is_archived: bool,
    #[serde(deserialize_with = "lenient")]
    pub settings: GroupSettings,
    pub created_at: Option<DateTime<Utc>>,
}

/// Response of the group listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupList {
    #[serde(deserialize_with = "null_default")]
    pub groups: Vec<MessageGroup>,
}

/// Payload for creating or updating a group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: String,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<GroupSettings>,
}

/// A delegated, optionally time-limited grant to a group's shared view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SharedAccess {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub email: String,
    pub token: String,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl SharedAccess {
    /// Whether the grant's expiry has passed at `now`. Grants without expiry never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now > expires_at,
            None => false,
        }
    }

    /// Whether the grant is active and not expired at `now`
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired(now)
    }
}

/// Response of the shared access listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SharedAccessList {
    #[serde(deserialize_with = "null_default")]
    pub shared_access: Vec<SharedAccess>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateSharedAccessRequest<'a> {
    pub email: &'a str,
    #[serde(
        serialize_with = "millis_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    #[test]
    fn group_decodes_with_null_settings() {
        let group: MessageGroup = serde_json::from_value(json!({
            "id": "g1",
            "name": "Work",
            "slug": "work-a1b2",
            "description": "",
            "isPublic": true,
            "isArchived": false,
            "settings": null,
            "createdAt": "2024-03-01T10:00:00.123456Z"
        }))
        .unwrap();

        assert_eq!(group.slug, "work-a1b2");
        assert!(group.is_public);
        assert_eq!(group.settings, GroupSettings::default());
    }

    #[test]
    fn group_survives_odd_settings() {
        let group: MessageGroup = serde_json::from_value(json!({
            "id": "g1",
            "name": "Work",
            "slug": "work-a1b2",
            "settings": { "icebreakers": "say hi", "bannedWords": [1, "spam", {"x": 1}] }
        }))
        .unwrap();

        assert_eq!(group.id, "g1");
        assert_eq!(group.name, "Work");
        assert_eq!(group.settings.icebreakers, vec!["say hi".to_string()]);
        assert_eq!(
            group.settings.banned_words,
            vec!["1".to_string(), "spam".to_string()]
        );

        let group: MessageGroup =
            serde_json::from_value(json!({ "id": "g2", "settings": "broken" })).unwrap();
        assert_eq!(group.id, "g2");
        assert_eq!(group.settings, GroupSettings::default());
    }

    #[test]
    fn settings_keep_extension_fields() {
        let raw = json!({
            "icebreakers": ["What do you think of me?"],
            "bannedWords": [],
            "theme": "sunset"
        });
        let settings: GroupSettings = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(settings.icebreakers.len(), 1);
        assert_eq!(settings.extra.get("theme"), Some(&json!("sunset")));
        assert_eq!(serde_json::to_value(&settings).unwrap(), raw);
    }

    #[test]
    fn null_group_list_is_empty() {
        let list: GroupList = serde_json::from_value(json!({ "groups": null })).unwrap();
        assert!(list.groups.is_empty());

        let list: SharedAccessList =
            serde_json::from_value(json!({ "sharedAccess": null })).unwrap();
        assert!(list.shared_access.is_empty());
    }

    #[test]
    fn share_request_omits_missing_expiry() {
        let request = CreateSharedAccessRequest {
            email: "friend@example.com",
            expires_at: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "email": "friend@example.com" })
        );
    }

    #[test]
    fn share_request_uses_millisecond_timestamps() {
        let request = CreateSharedAccessRequest {
            email: "friend@example.com",
            expires_at: Some(Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 0).unwrap()),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "email": "friend@example.com", "expiresAt": "2025-01-31T23:59:00.000Z" })
        );
    }

    #[test]
    fn grant_validity() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut grant = SharedAccess {
            is_active: true,
            ..Default::default()
        };
        assert!(grant.is_valid(now));

        grant.expires_at = Some(now - Duration::hours(1));
        assert!(grant.is_expired(now));
        assert!(!grant.is_valid(now));

        grant.expires_at = Some(now + Duration::hours(1));
        grant.is_active = false;
        assert!(!grant.is_expired(now));
        assert!(!grant.is_valid(now));
    }
}
