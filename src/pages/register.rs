//! Registration screen

use tracing::info;

use super::{Navigator, Route};
use crate::auth::{AuthResponse, RegisterRequest};
use crate::fetch::ApiResponse;
use crate::PapoReto;

pub struct RegisterPage {
    client: PapoReto,
}

impl RegisterPage {
    pub fn new(client: PapoReto) -> Self {
        Self { client }
    }

    /// Submit the registration form.
    ///
    /// On success the navigator is sent to the login screen; on failure the
    /// envelope's error is left for the form to display.
    pub async fn submit(
        &self,
        request: &RegisterRequest,
        navigator: &dyn Navigator,
    ) -> ApiResponse<AuthResponse> {
        let response = self.client.auth().register(request).await;
        if response.is_success() {
            info!("Account registered");
            navigator.push(Route::Login);
        }
        response
    }
}
