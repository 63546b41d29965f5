//! Message group management and share links
//!
//! Every call is a direct pass-through to the API; input validation (slug
//! uniqueness, email format, plan quotas) happens server-side.

mod types;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::fetch::{segment, ApiResponse, Fetch, StatusMessage};

pub use types::*;

/// Client for group operations
#[derive(Clone)]
pub struct Groups {
    fetch: Arc<Fetch>,
}

impl Groups {
    pub(crate) fn new(fetch: Arc<Fetch>) -> Self {
        Self { fetch }
    }

    /// List the user's groups. Archived groups are only included on request.
    pub async fn get_groups(&self, include_archived: bool) -> ApiResponse<GroupList> {
        let endpoint = format!("/groups?includeArchived={}", include_archived);
        self.fetch.get(&endpoint, true).await
    }

    /// Create a new group
    pub async fn create_group(&self, request: &CreateGroupRequest) -> ApiResponse<MessageGroup> {
        self.fetch.post("/groups", request, true).await
    }

    /// Get a group by ID
    pub async fn get_group(&self, id: &str) -> ApiResponse<MessageGroup> {
        let endpoint = format!("/groups/{}", segment(id));
        self.fetch.get(&endpoint, true).await
    }

    /// Replace a group's name, description, visibility and settings
    pub async fn update_group(
        &self,
        id: &str,
        request: &CreateGroupRequest,
    ) -> ApiResponse<StatusMessage> {
        let endpoint = format!("/groups/{}", segment(id));
        self.fetch.put(&endpoint, request, true).await
    }

    /// Archive a group. The group stays restorable through [`Groups::unarchive_group`].
    pub async fn archive_group(&self, id: &str) -> ApiResponse<StatusMessage> {
        let endpoint = format!("/groups/{}", segment(id));
        self.fetch.delete(&endpoint, true).await
    }

    /// Restore an archived group
    pub async fn unarchive_group(&self, id: &str) -> ApiResponse<StatusMessage> {
        let endpoint = format!("/groups/{}/unarchive", segment(id));
        self.fetch
            .post(&endpoint, &serde_json::json!({}), true)
            .await
    }

    /// Grant `email` access to the group's shared view, optionally until `expires_at`
    pub async fn create_shared_access(
        &self,
        group_id: &str,
        email: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> ApiResponse<SharedAccess> {
        let endpoint = format!("/groups/{}/share", segment(group_id));
        let request = CreateSharedAccessRequest { email, expires_at };
        self.fetch.post(&endpoint, &request, true).await
    }

    /// List the grants issued for a group
    pub async fn get_shared_access(&self, group_id: &str) -> ApiResponse<SharedAccessList> {
        let endpoint = format!("/groups/{}/shared", segment(group_id));
        self.fetch.get(&endpoint, true).await
    }

    /// Revoke a grant
    pub async fn revoke_shared_access(
        &self,
        group_id: &str,
        share_id: &str,
    ) -> ApiResponse<StatusMessage> {
        let endpoint = format!(
            "/groups/{}/share/{}",
            segment(group_id),
            segment(share_id)
        );
        self.fetch.delete(&endpoint, true).await
    }
}
