mod store;
mod transport;

#[cfg(test)]
mod test_server;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::PathBuf;

use campus::config::{BASE_URL_ENV, DEFAULT_BASE_URL};
use campus::notifications::{acknowledge_read, unread_count};
use campus::{
    ApiError, AuthOutcome, ClientConfig, ConfigError, Event, Notification, ProfileUpdate, ReadOverlay, RegisterRequest,
    Role, Session, SharedAuth, User,
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::store::FileStore;
use crate::transport::ReqwestTransport;

type CliSession = Session<ReqwestTransport, FileStore, SharedAuth>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not signed in; run `campus login` first")]
    NotSignedIn,
    #[error("no config directory on this platform; pass --state-file or set CAMPUS_STATE_FILE")]
    NoStateDir,
    #[error("{0}")]
    Auth(String),
}

#[derive(Parser, Debug)]
#[command(name = "campus", about = "Campus events terminal client")]
struct Cli {
    #[arg(long, global = true, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Where the session token and read notifications are kept.
    #[arg(long, global = true, env = "CAMPUS_STATE_FILE")]
    state_file: Option<PathBuf>,

    /// Print raw JSON instead of text.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "CAMPUS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "CAMPUS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    Whoami,
    /// Every event on the platform.
    Events,
    /// Events you are registered for.
    Registered,
    Notifications {
        #[arg(long, default_value_t = false)]
        unread: bool,
    },
    /// Mark a notification read.
    Read { id: String },
    Profile(ProfileCommand),
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    Show,
    Update(ProfileArgs),
}

/// Profile fields to change; omitted flags keep their current value.
#[derive(Args, Debug, Default)]
struct ProfileArgs {
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    student_id: Option<String>,
    #[arg(long)]
    phone_number: Option<String>,
}

impl ProfileArgs {
    fn apply(self, update: &mut ProfileUpdate) {
        let fields = [
            (self.full_name, &mut update.full_name),
            (self.email, &mut update.email),
            (self.department, &mut update.department),
            (self.year, &mut update.year),
            (self.student_id, &mut update.student_id),
            (self.phone_number, &mut update.phone_number),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

struct CliContext {
    session: CliSession,
    overlay: ReadOverlay<FileStore>,
    json: bool,
}

impl CliContext {
    fn new(cli: &Cli) -> Result<Self, CliError> {
        let config = ClientConfig::new(&cli.base_url)?;
        let path = match &cli.state_file {
            Some(path) => path.clone(),
            None => FileStore::default_path().ok_or(CliError::NoStateDir)?,
        };
        let store = FileStore::new(path);
        tracing::debug!(base_url = config.base_url(), state = %store.path().display(), "cli context");
        let session = Session::new(config, ReqwestTransport::default(), store.clone(), SharedAuth::new());
        Ok(Self { session, overlay: ReadOverlay::new(store), json: cli.json })
    }

    /// Validate the stored token and return the signed-in user.
    async fn require_user(&self) -> Result<User, CliError> {
        self.session.check_auth().await;
        self.session.user().ok_or(CliError::NotSignedIn)
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse()).await
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = CliContext::new(&cli)?;

    match cli.command {
        Command::Login { email, password } => {
            let outcome = ctx.session.login(&email, &password).await;
            finish_auth(&ctx, outcome)
        }
        Command::Register { full_name, email, password } => {
            let request = RegisterRequest { full_name: full_name.trim().to_owned(), email, password };
            let outcome = ctx.session.register(&request).await;
            finish_auth(&ctx, outcome)
        }
        Command::Logout => {
            ctx.session.logout();
            eprintln!("signed out");
            Ok(())
        }
        Command::Whoami => {
            let user = ctx.require_user().await?;
            output(&ctx, &user, user_summary)
        }
        Command::Events => {
            ctx.require_user().await?;
            let events = ctx.session.api().events().await?;
            output(&ctx, &events, |events| event_lines(events))
        }
        Command::Registered => {
            ctx.require_user().await?;
            let events = ctx.session.api().registered_events().await?;
            output(&ctx, &events, |events| event_lines(events))
        }
        Command::Notifications { unread } => {
            ctx.require_user().await?;
            let mut notifications = ctx.overlay.apply(ctx.session.api().notifications().await?);
            if unread {
                notifications.retain(|n| !n.read);
            }
            output(&ctx, &notifications, |list| notification_lines(list))
        }
        Command::Read { id } => {
            ctx.require_user().await?;
            if !ctx.overlay.mark(&id) {
                tracing::debug!(%id, "notification already read locally");
            }
            acknowledge_read(ctx.session.api(), &id).await;
            eprintln!("marked {id} read");
            Ok(())
        }
        Command::Profile(profile) => run_profile(&ctx, profile).await,
    }
}

async fn run_profile(ctx: &CliContext, profile: ProfileCommand) -> Result<(), CliError> {
    let user = ctx.require_user().await?;
    match profile.command {
        ProfileSubcommand::Show => output(ctx, &user, user_summary),
        ProfileSubcommand::Update(args) => {
            let mut update = ProfileUpdate::from_user(&user);
            args.apply(&mut update);
            let updated = ctx.session.api().update_profile(&update).await?;
            ctx.session.update_user(updated.clone());
            eprintln!("profile updated");
            output(ctx, &updated, user_summary)
        }
    }
}

fn finish_auth(ctx: &CliContext, outcome: AuthOutcome) -> Result<(), CliError> {
    match outcome {
        AuthOutcome::Success { user } => {
            eprintln!("signed in as {}", user.display_name("user"));
            output(ctx, &user, user_summary)
        }
        AuthOutcome::Failure { message } => Err(CliError::Auth(message)),
    }
}

fn output<T: Serialize + ?Sized>(ctx: &CliContext, value: &T, render: impl Fn(&T) -> String) -> Result<(), CliError> {
    if ctx.json {
        print_json(value)
    } else {
        let rendered = render(value);
        if !rendered.is_empty() {
            println!("{rendered}");
        }
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "admin",
        Role::Student => "student",
        Role::Unknown => "unknown",
    }
}

fn user_summary(user: &User) -> String {
    let mut lines = vec![format!("{} ({})", user.display_name("unnamed"), role_label(user.role))];
    let details = [
        ("email", &user.email),
        ("department", &user.department),
        ("year", &user.year),
        ("student id", &user.student_id),
        ("phone", &user.phone_number),
    ];
    for (label, value) in details {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            lines.push(format!("  {label}: {value}"));
        }
    }
    lines.join("\n")
}

fn event_line(event: &Event) -> String {
    let when = [event.date.as_deref(), event.time.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    let mut line = format!("{}\t{}", event.id, event.title_or_untitled());
    if !when.is_empty() {
        line.push_str(&format!("\t{when}"));
    }
    if let Some(venue) = &event.venue {
        line.push_str(&format!("\t@ {venue}"));
    }
    line
}

fn event_lines(events: &[Event]) -> String {
    if events.is_empty() {
        return "no events".to_owned();
    }
    events.iter().map(event_line).collect::<Vec<_>>().join("\n")
}

fn notification_line(notification: &Notification) -> String {
    let mark = if notification.read { "x" } else { " " };
    match &notification.title {
        Some(title) => format!("[{mark}] {}\t{title}: {}", notification.id, notification.message),
        None => format!("[{mark}] {}\t{}", notification.id, notification.message),
    }
}

fn notification_lines(notifications: &[Notification]) -> String {
    if notifications.is_empty() {
        return "no notifications".to_owned();
    }
    let mut lines: Vec<String> = notifications.iter().map(notification_line).collect();
    lines.push(format!("{} unread", unread_count(notifications)));
    lines.join("\n")
}
