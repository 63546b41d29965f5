//! Types for authentication and user management

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Groups a free account may keep active
pub const FREE_GROUP_LIMIT: u32 = 3;

/// Messages a free account may receive per month
pub const FREE_MONTHLY_MESSAGE_LIMIT: u32 = 50;

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Subscription plan of an account
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Plan {
    #[default]
    Free,
    Premium,
    /// A plan this client does not know about
    Other(String),
}

impl Plan {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Free => "free",
            Self::Premium => "premium",
            Self::Other(name) => name,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }

    /// Maximum number of active groups, `None` when unlimited
    pub fn group_limit(&self) -> Option<u32> {
        match self {
            Self::Free => Some(FREE_GROUP_LIMIT),
            _ => None,
        }
    }

    /// Maximum number of messages per month, `None` when unlimited
    pub fn message_limit(&self) -> Option<u32> {
        match self {
            Self::Free => Some(FREE_MONTHLY_MESSAGE_LIMIT),
            _ => None,
        }
    }
}

impl From<&str> for Plan {
    fn from(value: &str) -> Self {
        match value {
            "free" => Self::Free,
            "premium" => Self::Premium,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Plan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Plan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Plan::from).unwrap_or_default())
    }
}

/// Profile of the signed-in user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(rename = "avatarURL", skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub is_verified: bool,
    pub plan: Plan,
    pub message_count: u64,
    pub active_groups: u64,
    pub created_at: Option<DateTime<Utc>>,
}

/// Registration response: the created account, and a token when the server issues one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(flatten)]
    pub user: UserProfile,
}

/// Login and refresh response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenResponse {
    pub token: Option<String>,
}

/// Profile update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    #[serde(rename = "avatarURL", skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Password change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Notification preferences.
///
/// Settings this client doesn't model are carried in `extra` and sent back as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    /// Email on every new message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_on_message: Option<bool>,

    /// Periodic email digest
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_digest: Option<bool>,

    /// Push notification on every new message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_on_message: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub token: &'a str,
}
