use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use papo_reto::auth::{LoginRequest, RegisterRequest, UpdatePasswordRequest, UpdateProfileRequest};
use papo_reto::config::ClientOptions;
use papo_reto::error::Result;
use papo_reto::fetch::ApiResponse;
use papo_reto::groups::CreateGroupRequest;
use papo_reto::messages::SendMessageRequest;
use papo_reto::pages::{
    DashboardHome, DashboardShell, LandingPage, Navigator, RegisterPage, Route, ShellState,
};
use papo_reto::session::FileSessionStore;
use papo_reto::PapoReto;

#[derive(Parser, Debug)]
#[command(name = "papo-reto", version, about = "Papo Reto command-line client")]
struct Cli {
    /// API root, including the version prefix
    #[arg(long, env = "PAPO_RETO_API_URL", global = true)]
    api_url: Option<String>,

    /// File the session credential is kept in
    #[arg(
        long,
        env = "PAPO_RETO_SESSION_FILE",
        default_value = ".papo-reto-session.json",
        global = true
    )]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in and store the session credential
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Drop the stored session credential
    Logout,
    /// Show whether a credential is held and what it claims
    Status,
    /// Show the signed-in user's profile
    Profile,
    /// Change display name and avatar
    UpdateProfile {
        #[arg(long)]
        name: String,
        #[arg(long)]
        avatar_url: Option<String>,
    },
    /// Change the account password
    UpdatePassword {
        #[arg(long)]
        current: String,
        #[arg(long = "new")]
        new_password: String,
    },
    /// Exchange the stored credential for a fresh one
    Refresh,
    /// Group management
    Groups {
        #[command(subcommand)]
        action: GroupsAction,
    },
    /// Inbox management
    Messages {
        #[command(subcommand)]
        action: MessagesAction,
    },
    /// Send an anonymous message to a group
    Send {
        /// Public slug of the target group
        slug: String,
        content: String,
        #[arg(long)]
        sender_id: Option<String>,
        #[arg(long)]
        reveal_name: bool,
    },
    /// Show the dashboard summary
    Dashboard,
}

#[derive(Subcommand, Debug)]
enum GroupsAction {
    /// List groups
    List {
        /// Include archived groups
        #[arg(long)]
        archived: bool,
    },
    /// Create a group
    Create {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        public: bool,
    },
    /// Show one group
    Show { id: String },
    /// Archive a group
    Archive { id: String },
    /// Restore an archived group
    Unarchive { id: String },
    /// Grant read access to an email address
    Share {
        id: String,
        email: String,
        /// RFC 3339 expiry, e.g. 2030-01-01T00:00:00Z
        #[arg(long)]
        expires_at: Option<DateTime<Utc>>,
    },
    /// List access grants of a group
    Shared { id: String },
    /// Revoke an access grant
    Revoke { id: String, access_id: String },
}

#[derive(Subcommand, Debug)]
enum MessagesAction {
    /// List a page of messages
    List {
        group_id: String,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Mark a message as read
    Read { id: String },
    /// Mark a message as favorite
    Favorite { id: String },
    /// Remove the favorite mark
    Unfavorite { id: String },
    /// Delete a message
    Delete { id: String },
}

/// Prints redirects instead of following them
struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn push(&self, route: Route) {
        info!(route = route.path(), "navigate");
        eprintln!("-> {}", route);
    }
}

/// Print an envelope as JSON; true when it carries no error
fn emit<T: Serialize>(response: &ApiResponse<T>) -> bool {
    match serde_json::to_string_pretty(response) {
        Ok(text) => println!("{}", text),
        Err(err) => eprintln!("failed to render response: {}", err),
    }
    response.is_success()
}

async fn run(cli: Cli) -> Result<bool> {
    let mut options = ClientOptions::from_env()?;
    if let Some(url) = &cli.api_url {
        options = options.with_base_url(url)?;
    }

    let store = FileSessionStore::new(&cli.session_file, &options.session_key);
    let client = PapoReto::new_with_options(options, Arc::new(store))?;

    let ok = match cli.command {
        Commands::Register {
            email,
            name,
            password,
        } => {
            let page = RegisterPage::new(client.clone());
            let request = RegisterRequest {
                email,
                password,
                name,
            };
            emit(&page.submit(&request, &ConsoleNavigator).await)
        }
        Commands::Login { email, password } => {
            emit(&client.auth().login(&LoginRequest { email, password }).await)
        }
        Commands::Logout => {
            client.auth().logout();
            true
        }
        Commands::Status => {
            let actions: Vec<&str> = LandingPage::new(client.clone())
                .actions()
                .iter()
                .map(|route| route.path())
                .collect();
            let status = json!({
                "authenticated": client.auth().is_authenticated(),
                "claims": client.auth().token_claims()?,
                "actions": actions,
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
            true
        }
        Commands::Profile => emit(&client.auth().get_profile().await),
        Commands::UpdateProfile { name, avatar_url } => {
            let request = UpdateProfileRequest { name, avatar_url };
            emit(&client.auth().update_profile(&request).await)
        }
        Commands::UpdatePassword {
            current,
            new_password,
        } => {
            let request = UpdatePasswordRequest {
                current_password: current,
                new_password,
            };
            emit(&client.auth().update_password(&request).await)
        }
        Commands::Refresh => emit(&client.auth().refresh_token().await),
        Commands::Groups { action } => run_groups(&client, action).await,
        Commands::Messages { action } => run_messages(&client, action).await,
        Commands::Send {
            slug,
            content,
            sender_id,
            reveal_name,
        } => {
            let request = SendMessageRequest {
                content,
                sender_id,
                reveal_name: Some(reveal_name),
            };
            emit(&client.messages().send_anonymous_message(&slug, &request).await)
        }
        Commands::Dashboard => run_dashboard(&client).await,
    };

    Ok(ok)
}

async fn run_groups(client: &PapoReto, action: GroupsAction) -> bool {
    let groups = client.groups();
    match action {
        GroupsAction::List { archived } => emit(&groups.get_groups(archived).await),
        GroupsAction::Create {
            name,
            description,
            public,
        } => {
            let request = CreateGroupRequest {
                name,
                description,
                is_public: public,
                settings: None,
            };
            emit(&groups.create_group(&request).await)
        }
        GroupsAction::Show { id } => emit(&groups.get_group(&id).await),
        GroupsAction::Archive { id } => emit(&groups.archive_group(&id).await),
        GroupsAction::Unarchive { id } => emit(&groups.unarchive_group(&id).await),
        GroupsAction::Share {
            id,
            email,
            expires_at,
        } => emit(&groups.create_shared_access(&id, &email, expires_at).await),
        GroupsAction::Shared { id } => emit(&groups.get_shared_access(&id).await),
        GroupsAction::Revoke { id, access_id } => {
            emit(&groups.revoke_shared_access(&id, &access_id).await)
        }
    }
}

async fn run_messages(client: &PapoReto, action: MessagesAction) -> bool {
    let messages = client.messages();
    match action {
        MessagesAction::List {
            group_id,
            page,
            page_size,
        } => emit(&messages.get_messages(&group_id, page, page_size).await),
        MessagesAction::Read { id } => emit(&messages.mark_as_read(&id).await),
        MessagesAction::Favorite { id } => emit(&messages.toggle_favorite(&id, true).await),
        MessagesAction::Unfavorite { id } => emit(&messages.toggle_favorite(&id, false).await),
        MessagesAction::Delete { id } => emit(&messages.delete_message(&id).await),
    }
}

async fn run_dashboard(client: &PapoReto) -> bool {
    let shell = DashboardShell::new(client.clone());
    let user_name = match shell.mount(&ConsoleNavigator).await {
        ShellState::Ready { user_name } => user_name,
        ShellState::Redirected | ShellState::Unmounted => return false,
    };

    if user_name.is_empty() {
        println!("Welcome back");
    } else {
        println!("Welcome back, {}", user_name);
    }

    for item in DashboardShell::nav_items(Route::Dashboard.path()) {
        let marker = if item.active { "*" } else { " " };
        println!("{} {:<10} {}", marker, item.label, item.route);
    }

    let Some(summary) = DashboardHome::new(client.clone()).load().await else {
        return false;
    };

    println!();
    println!("Active groups:  {} ({})", summary.active_groups, summary.group_limit_label());
    println!("Messages:       {} ({})", summary.total_messages, summary.message_limit_label());
    println!("Unread:         {}", summary.unread_messages);
    println!("Plan:           {}", summary.plan);
    if summary.show_upgrade_prompt() {
        println!();
        println!("Upgrade to premium for unlimited groups and messages.");
    }

    true
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
