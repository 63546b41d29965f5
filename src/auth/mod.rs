//! Authentication and user management
//!
//! Owns the session credential lifecycle: a successful [`Auth::login`]
//! stores the token, [`Auth::logout`] drops it, and every other call here
//! simply rides on whatever credential the store holds.

mod types;

use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::fetch::{ApiResponse, Fetch, StatusMessage};
use crate::session::TokenClaims;

pub use types::*;

/// Client for account and profile operations
#[derive(Clone)]
pub struct Auth {
    fetch: Arc<Fetch>,
}

impl Auth {
    /// Create a new Auth client
    pub(crate) fn new(fetch: Arc<Fetch>) -> Self {
        Self { fetch }
    }

    /// Register a new account
    pub async fn register(&self, request: &RegisterRequest) -> ApiResponse<AuthResponse> {
        self.fetch.post("/auth/register", request, false).await
    }

    /// Sign in with email and password.
    ///
    /// When the server returns a token it is stored before this returns, so
    /// [`Auth::is_authenticated`] is true immediately afterwards. A failed
    /// login leaves the store untouched.
    pub async fn login(&self, request: &LoginRequest) -> ApiResponse<TokenResponse> {
        let response: ApiResponse<TokenResponse> =
            self.fetch.post("/auth/login", request, false).await;

        if let Some(token) = response
            .data
            .as_ref()
            .and_then(|data| data.token.as_deref())
            .filter(|token| !token.is_empty())
        {
            self.fetch.session().set(token);
            info!("Session credential stored");
        }

        response
    }

    /// Exchange the held credential for a fresh one
    pub async fn refresh_token(&self) -> ApiResponse<TokenResponse> {
        let Some(current) = self.fetch.session().get() else {
            return ApiResponse::transport("no session credential to refresh");
        };

        let response: ApiResponse<TokenResponse> = self
            .fetch
            .post("/auth/refresh", &RefreshRequest { token: &current }, false)
            .await;

        if let Some(token) = response
            .data
            .as_ref()
            .and_then(|data| data.token.as_deref())
            .filter(|token| !token.is_empty())
        {
            self.fetch.session().set(token);
            info!("Session credential refreshed");
        }

        response
    }

    /// Get the profile of the signed-in user
    pub async fn get_profile(&self) -> ApiResponse<UserProfile> {
        self.fetch.get("/user/profile", true).await
    }

    /// Update name and avatar
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> ApiResponse<StatusMessage> {
        self.fetch.put("/user/profile", request, true).await
    }

    /// Change the account password
    pub async fn update_password(&self, request: &UpdatePasswordRequest) -> ApiResponse<StatusMessage> {
        self.fetch.put("/user/password", request, true).await
    }

    /// Replace the notification preferences
    pub async fn update_notifications(
        &self,
        settings: &NotificationSettings,
    ) -> ApiResponse<StatusMessage> {
        self.fetch.put("/user/notifications", settings, true).await
    }

    /// Drop the session credential. No server call is made.
    pub fn logout(&self) {
        self.fetch.session().clear();
        info!("Session credential cleared");
    }

    /// Whether a session credential is held.
    ///
    /// This is a local check: an expired or revoked credential still counts.
    pub fn is_authenticated(&self) -> bool {
        self.fetch.session().get().is_some()
    }

    /// Decoded claims of the held credential, if any
    pub fn token_claims(&self) -> Result<Option<TokenClaims>> {
        self.fetch
            .session()
            .get()
            .map(|token| TokenClaims::decode(&token))
            .transpose()
    }
}
