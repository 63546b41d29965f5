//! Dashboard layout and home screen

use tracing::warn;

use super::{Lifecycle, Navigator, Route};
use crate::auth::{Plan, UserProfile};
use crate::fetch::ApiResponse;
use crate::groups::GroupList;
use crate::PapoReto;

/// Outcome of mounting the dashboard layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellState {
    /// No credential was held; the navigator was sent to the login screen
    Redirected,
    /// Protected content may render. `user_name` is empty if the profile could not be loaded.
    Ready { user_name: String },
    /// Unmounted before the profile arrived
    Unmounted,
}

/// A sidebar entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub route: Route,
    pub label: &'static str,
    pub active: bool,
}

const NAV_ENTRIES: [(Route, &str); 4] = [
    (Route::Dashboard, "Dashboard"),
    (Route::Groups, "Groups"),
    (Route::Messages, "Messages"),
    (Route::Settings, "Settings"),
];

/// The protected layout wrapping every dashboard screen
pub struct DashboardShell {
    client: PapoReto,
    lifecycle: Lifecycle,
}

impl DashboardShell {
    pub fn new(client: PapoReto) -> Self {
        Self {
            client,
            lifecycle: Lifecycle::new(),
        }
    }

    /// Run the authentication gate, then load the greeting.
    ///
    /// Without a credential this redirects to the login screen and issues no
    /// request. The profile fetch only feeds the greeting; its failure does
    /// not close the gate.
    pub async fn mount(&self, navigator: &dyn Navigator) -> ShellState {
        if !self.client.auth().is_authenticated() {
            navigator.push(Route::Login);
            return ShellState::Redirected;
        }

        let Some(response) = self.lifecycle.guard(self.client.auth().get_profile()).await else {
            return ShellState::Unmounted;
        };

        if let Some(error) = &response.error {
            warn!("Failed to load profile: {}", error);
        }

        ShellState::Ready {
            user_name: response.data.map(|profile| profile.name).unwrap_or_default(),
        }
    }

    /// Sign out and return to the login screen
    pub fn logout(&self, navigator: &dyn Navigator) {
        self.client.auth().logout();
        navigator.push(Route::Login);
    }

    /// Sidebar entries, with the one matching `pathname` marked active
    pub fn nav_items(pathname: &str) -> Vec<NavItem> {
        NAV_ENTRIES
            .iter()
            .map(|&(route, label)| {
                let active = match route {
                    Route::Dashboard => pathname == route.path(),
                    _ => pathname.starts_with(route.path()),
                };
                NavItem {
                    route,
                    label,
                    active,
                }
            })
            .collect()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn unmount(&self) {
        self.lifecycle.unmount();
    }
}

/// Figures shown on the dashboard home screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub active_groups: usize,
    pub total_messages: u64,
    // no endpoint reports unread counts yet
    pub unread_messages: u64,
    pub plan: Plan,
}

impl DashboardSummary {
    /// Combine the profile and group listing. Failed fetches count as zero.
    pub fn from_responses(
        profile: ApiResponse<UserProfile>,
        groups: ApiResponse<GroupList>,
    ) -> Self {
        if let Some(error) = &profile.error {
            warn!("Failed to load dashboard profile: {}", error);
        }
        if let Some(error) = &groups.error {
            warn!("Failed to load dashboard groups: {}", error);
        }

        let profile = profile.data.unwrap_or_default();
        let active_groups = groups.data.map(|list| list.groups.len()).unwrap_or(0);

        Self {
            active_groups,
            total_messages: profile.message_count,
            unread_messages: 0,
            plan: profile.plan,
        }
    }

    pub fn group_limit_label(&self) -> String {
        match self.plan.group_limit() {
            Some(limit) => format!("Limit: {} groups", limit),
            None => "Unlimited".to_string(),
        }
    }

    pub fn message_limit_label(&self) -> String {
        match self.plan.message_limit() {
            Some(limit) => format!("Limit: {} per month", limit),
            None => "Unlimited".to_string(),
        }
    }

    /// Whether to offer the premium upgrade
    pub fn show_upgrade_prompt(&self) -> bool {
        self.plan.is_free()
    }
}

/// The dashboard home screen
pub struct DashboardHome {
    client: PapoReto,
    lifecycle: Lifecycle,
}

impl DashboardHome {
    pub fn new(client: PapoReto) -> Self {
        Self {
            client,
            lifecycle: Lifecycle::new(),
        }
    }

    /// Fetch the profile and active groups concurrently and summarize them.
    ///
    /// Nothing is computed until both fetches settle. Returns `None` if the
    /// screen is unmounted first.
    pub async fn load(&self) -> Option<DashboardSummary> {
        let auth = self.client.auth();
        let group_client = self.client.groups();

        let (profile, groups) = self
            .lifecycle
            .guard(async { tokio::join!(auth.get_profile(), group_client.get_groups(false)) })
            .await?;

        Some(DashboardSummary::from_responses(profile, groups))
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn unmount(&self) {
        self.lifecycle.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::MessageGroup;

    #[test]
    fn nav_marks_dashboard_only_on_exact_match() {
        let items = DashboardShell::nav_items("/dashboard");
        let active: Vec<_> = items.iter().filter(|i| i.active).map(|i| i.route).collect();
        assert_eq!(active, vec![Route::Dashboard]);

        let items = DashboardShell::nav_items("/dashboard/groups/g1");
        let active: Vec<_> = items.iter().filter(|i| i.active).map(|i| i.route).collect();
        assert_eq!(active, vec![Route::Groups]);
    }

    #[test]
    fn summary_from_successful_fetches() {
        let profile = UserProfile {
            name: "Ana".to_string(),
            plan: Plan::Premium,
            message_count: 9,
            ..Default::default()
        };
        let groups = GroupList {
            groups: vec![MessageGroup::default(), MessageGroup::default()],
        };

        let summary = DashboardSummary::from_responses(
            ApiResponse::success(200, Some(profile)),
            ApiResponse::success(200, Some(groups)),
        );

        assert_eq!(summary.active_groups, 2);
        assert_eq!(summary.total_messages, 9);
        assert_eq!(summary.unread_messages, 0);
        assert_eq!(summary.group_limit_label(), "Unlimited");
        assert_eq!(summary.message_limit_label(), "Unlimited");
        assert!(!summary.show_upgrade_prompt());
    }

    #[test]
    fn summary_falls_back_to_defaults_on_failure() {
        let summary = DashboardSummary::from_responses(
            ApiResponse::failure(401, "unauthorized"),
            ApiResponse::transport("connection refused"),
        );

        assert_eq!(summary, DashboardSummary::default());
        assert_eq!(summary.group_limit_label(), "Limit: 3 groups");
        assert_eq!(summary.message_limit_label(), "Limit: 50 per month");
        assert!(summary.show_upgrade_prompt());
    }
}
