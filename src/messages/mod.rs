//! Reading, flagging and sending messages

mod types;

use std::sync::Arc;

use crate::fetch::{segment, ApiResponse, Fetch, StatusMessage};

pub use types::*;

/// Page requested when none is given
pub const DEFAULT_PAGE: u32 = 1;

/// Page size requested when none is given
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Client for message operations
#[derive(Clone)]
pub struct Messages {
    fetch: Arc<Fetch>,
}

impl Messages {
    pub(crate) fn new(fetch: Arc<Fetch>) -> Self {
        Self { fetch }
    }

    /// Get one page of a group's messages
    ///
    /// # Arguments
    ///
    /// * `group_id` - The group to read
    /// * `page` - Page number, 1-based (optional, defaults to 1)
    /// * `page_size` - Messages per page (optional, defaults to 20)
    pub async fn get_messages(
        &self,
        group_id: &str,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> ApiResponse<MessageList> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        let endpoint = format!(
            "/groups/{}/messages?page={}&pageSize={}",
            segment(group_id),
            page,
            page_size
        );
        self.fetch.get(&endpoint, true).await
    }

    /// Update a message's read and favorite flags
    pub async fn update_message(
        &self,
        message_id: &str,
        request: &UpdateMessageRequest,
    ) -> ApiResponse<StatusMessage> {
        let endpoint = format!("/messages/{}", segment(message_id));
        self.fetch.put(&endpoint, request, true).await
    }

    /// Mark a message as read
    pub async fn mark_as_read(&self, message_id: &str) -> ApiResponse<StatusMessage> {
        let request = UpdateMessageRequest {
            is_read: Some(true),
            is_favorite: None,
        };
        self.update_message(message_id, &request).await
    }

    /// Set a message's favorite flag
    pub async fn toggle_favorite(
        &self,
        message_id: &str,
        is_favorite: bool,
    ) -> ApiResponse<StatusMessage> {
        let request = UpdateMessageRequest {
            is_read: None,
            is_favorite: Some(is_favorite),
        };
        self.update_message(message_id, &request).await
    }

    /// Permanently delete a message
    pub async fn delete_message(&self, message_id: &str) -> ApiResponse<StatusMessage> {
        let endpoint = format!("/messages/{}", segment(message_id));
        self.fetch.delete(&endpoint, true).await
    }

    /// Send an anonymous message to the group behind `slug`.
    ///
    /// Public endpoint: the session credential is never attached, even when one is held.
    pub async fn send_anonymous_message(
        &self,
        slug: &str,
        request: &SendMessageRequest,
    ) -> ApiResponse<StatusMessage> {
        let endpoint = format!("/public/send/{}", segment(slug));
        self.fetch.post(&endpoint, request, false).await
    }
}
