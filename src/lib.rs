//! Papo Reto Rust Client Library
//!
//! A Rust client for the Papo Reto anonymous messaging API: account and
//! session management, message groups with shareable access grants, the
//! message inbox, and the controllers behind the client's screens.

pub mod auth;
pub mod config;
pub mod error;
pub mod fetch;
pub mod groups;
pub mod messages;
pub mod pages;
pub mod session;

mod wire;

use std::sync::Arc;

use reqwest::Client;

use crate::auth::Auth;
use crate::config::ClientOptions;
use crate::error::Result;
use crate::fetch::Fetch;
use crate::groups::Groups;
use crate::messages::Messages;
use crate::session::{MemorySessionStore, SessionStore};

/// The main entry point for the Papo Reto client
///
/// Cloning is cheap: every clone shares the same request executor and
/// session store.
#[derive(Clone)]
pub struct PapoReto {
    fetch: Arc<Fetch>,
    auth: Auth,
    groups: Groups,
    messages: Messages,
}

impl PapoReto {
    /// Create a new client holding its session in memory
    ///
    /// # Arguments
    ///
    /// * `base_url` - The API root, including the version prefix
    ///
    /// # Example
    ///
    /// ```
    /// use papo_reto::PapoReto;
    ///
    /// let client = PapoReto::new("http://localhost:8080/api/v1").unwrap();
    /// assert!(!client.auth().is_authenticated());
    /// ```
    pub fn new(base_url: &str) -> Result<Self> {
        let options = ClientOptions::default().with_base_url(base_url)?;
        Self::new_with_options(options, Arc::new(MemorySessionStore::new()))
    }

    /// Create a new client with custom options and session storage
    ///
    /// # Arguments
    ///
    /// * `options` - Custom client options
    /// * `session` - Where the session credential is kept
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    /// use papo_reto::{PapoReto, config::ClientOptions, session::MemorySessionStore};
    ///
    /// let options = ClientOptions::default()
    ///     .with_request_timeout(Some(Duration::from_secs(10)));
    /// let client = PapoReto::new_with_options(options, Arc::new(MemorySessionStore::new())).unwrap();
    /// ```
    pub fn new_with_options(options: ClientOptions, session: Arc<dyn SessionStore>) -> Result<Self> {
        let http_client = Client::builder().build()?;
        let fetch = Arc::new(Fetch::new(http_client, options, session));

        Ok(Self {
            auth: Auth::new(fetch.clone()),
            groups: Groups::new(fetch.clone()),
            messages: Messages::new(fetch.clone()),
            fetch,
        })
    }

    /// Create a new client configured from `PAPO_RETO_*` environment variables
    pub fn from_env(session: Arc<dyn SessionStore>) -> Result<Self> {
        Self::new_with_options(ClientOptions::from_env()?, session)
    }

    /// Get a reference to the auth client for account and session management
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Get a reference to the groups client
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn run() -> papo_reto::error::Result<()> {
    /// use papo_reto::PapoReto;
    ///
    /// let client = PapoReto::new("http://localhost:8080/api/v1")?;
    /// let response = client.groups().get_groups(false).await;
    /// for group in response.data.map(|list| list.groups).unwrap_or_default() {
    ///     println!("{} ({})", group.name, group.slug);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    /// Get a reference to the messages client
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// The session store shared by every service
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        self.fetch.session()
    }

    /// The underlying request executor, for endpoints without a typed wrapper
    pub fn fetch(&self) -> &Arc<Fetch> {
        &self.fetch
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::fetch::ApiResponse;
    pub use crate::pages::{Navigator, Route};
    pub use crate::session::{FileSessionStore, MemorySessionStore, SessionStore};
    pub use crate::PapoReto;
}
