//! Landing screen

use super::Route;
use crate::PapoReto;

pub struct LandingPage {
    client: PapoReto,
}

impl LandingPage {
    pub fn new(client: PapoReto) -> Self {
        Self { client }
    }

    /// Call-to-action targets for the current session
    pub fn actions(&self) -> Vec<Route> {
        Self::actions_for(self.client.auth().is_authenticated())
    }

    /// Call-to-action targets: the dashboard for signed-in visitors, sign-up
    /// and the about page for everyone else.
    pub fn actions_for(is_authenticated: bool) -> Vec<Route> {
        if is_authenticated {
            vec![Route::Dashboard]
        } else {
            vec![Route::Register, Route::About]
        }
    }
}
