//! Screen composition
//!
//! Framework-agnostic controllers for the client's screens. A host UI (or the
//! CLI) owns rendering and routing; these types decide what to fetch, when to
//! redirect and what to display.

mod dashboard;
mod landing;
mod register;

use std::fmt;
use std::future::Future;

use tokio_util::sync::CancellationToken;

pub use dashboard::*;
pub use landing::*;
pub use register::*;

/// Screens the client can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Register,
    About,
    Dashboard,
    Groups,
    Messages,
    Settings,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::About => "/about",
            Self::Dashboard => "/dashboard",
            Self::Groups => "/dashboard/groups",
            Self::Messages => "/dashboard/messages",
            Self::Settings => "/dashboard/settings",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Router abstraction the host provides
pub trait Navigator: Send + Sync {
    /// Navigate to `route`
    fn push(&self, route: Route);
}

/// The lifetime of a mounted component.
///
/// Work started through [`Lifecycle::guard`] resolves to `None` once the
/// component is unmounted, so a late response is never committed.
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    token: CancellationToken,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `future` unless the component is unmounted first
    pub async fn guard<F: Future>(&self, future: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            output = future => Some(output),
        }
    }

    /// Tear the component down, abandoning in-flight work
    pub fn unmount(&self) {
        self.token.cancel();
    }

    pub fn is_mounted(&self) -> bool {
        !self.token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn guard_passes_output_through_while_mounted() {
        let lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.guard(async { 42 }).await, Some(42));
        assert!(lifecycle.is_mounted());
    }

    #[tokio::test]
    async fn guard_drops_work_after_unmount() {
        let lifecycle = Lifecycle::new();
        let clone = lifecycle.clone();

        let slow = lifecycle.guard(async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            "late"
        });
        let teardown = async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            clone.unmount();
        };

        let (result, _) = tokio::join!(slow, teardown);
        assert_eq!(result, None);
        assert!(!lifecycle.is_mounted());
    }

    #[test]
    fn route_paths() {
        assert_eq!(Route::Landing.path(), "/");
        assert_eq!(Route::Login.to_string(), "/login");
        assert_eq!(Route::Groups.path(), "/dashboard/groups");
    }
}
