mod http;
mod storage;

use std::time::Duration;

use access::guard::{GuardDecision, RouteRequirement, decide};
use access::routes::NOT_FOUND_PATH;
use access::service::Registration;
use access::{
    AuthContext, AuthError, AuthState, Role, RouteAccess, SessionStore, User, dashboard_path, menu_for, route_access,
};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::http::ReqwestAuthService;
use crate::storage::FileStorage;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http client setup failed: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("session file {path}: {source}")]
    SessionFile { path: String, source: std::io::Error },
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("not signed in; run `workhub-cli login` first")]
    NotSignedIn,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "workhub-cli", about = "WorkHub session and access CLI")]
struct Cli {
    /// REST API base, e.g. `http://127.0.0.1:3000/api`.
    #[arg(long, env = "WORKHUB_BASE_URL", default_value = "http://127.0.0.1:3000/api")]
    base_url: String,

    #[arg(long, env = "WORKHUB_SESSION_FILE", default_value = ".workhub-session.json")]
    session_file: String,

    #[arg(long, env = "WORKHUB_TIMEOUT_SECS", default_value_t = 15)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session.
    Login(LoginArgs),
    /// Create an account and sign in.
    Register(RegisterArgs),
    /// Revalidate the stored session and print the user.
    Whoami,
    /// Forget the stored session.
    Logout,
    /// Show what the route guard decides for a path.
    Check { path: String },
    /// Print the side navigation for the signed-in role.
    Menu,
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,
    #[arg(long, env = "WORKHUB_PASSWORD", hide_env_values = true)]
    password: String,
    /// Path to land on after sign-in when the role permits it.
    #[arg(long)]
    from: Option<String>,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "WORKHUB_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long)]
    role: Role,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    contact_number: Option<String>,
    #[arg(long, default_value_t = false)]
    agree_terms: bool,
}

type CliAuth = AuthContext<ReqwestAuthService, FileStorage, fn(&str)>;

fn log_navigation(path: &str) {
    tracing::debug!(%path, "navigate");
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let service = ReqwestAuthService::new(&cli.base_url, Duration::from_secs(cli.timeout_secs.max(1)))?;
    let storage = FileStorage::open(&cli.session_file)
        .map_err(|source| CliError::SessionFile { path: cli.session_file.clone(), source })?;
    let auth: CliAuth = AuthContext::new(service, SessionStore::new(storage), log_navigation as fn(&str));

    match cli.command {
        Command::Login(args) => run_login(&auth, args).await,
        Command::Register(args) => run_register(&auth, args).await,
        Command::Whoami => run_whoami(&auth).await,
        Command::Logout => {
            auth.logout();
            println!("signed out");
            Ok(())
        }
        Command::Check { path } => run_check(&auth, &path).await,
        Command::Menu => run_menu(&auth).await,
    }
}

async fn run_login(auth: &CliAuth, args: LoginArgs) -> Result<(), CliError> {
    let user = auth.login_with_return(&args.email, &args.password, args.from.as_deref()).await?;
    print_signed_in(&user);
    Ok(())
}

async fn run_register(auth: &CliAuth, args: RegisterArgs) -> Result<(), CliError> {
    let mut registration = Registration::new(args.name, args.email, args.password, args.role);
    if let Some(company) = args.company {
        registration = registration.with_field("company", company);
    }
    if let Some(contact_number) = args.contact_number {
        registration = registration.with_field("contactNumber", contact_number);
    }
    let user = auth.register(&registration, args.agree_terms).await?;
    print_signed_in(&user);
    Ok(())
}

async fn run_whoami(auth: &CliAuth) -> Result<(), CliError> {
    let user = signed_in_user(auth).await?;
    println!("{}", serde_json::to_string_pretty(&user)?);
    Ok(())
}

async fn run_check(auth: &CliAuth, path: &str) -> Result<(), CliError> {
    auth.initialize().await;
    let state = auth.state();
    println!("{}", describe_check(&state, path));
    Ok(())
}

async fn run_menu(auth: &CliAuth) -> Result<(), CliError> {
    let user = signed_in_user(auth).await?;
    for item in menu_for(user.role) {
        println!("{:<12} {}", item.label, item.path);
    }
    Ok(())
}

/// Revalidate the stored session and return its user.
async fn signed_in_user(auth: &CliAuth) -> Result<User, CliError> {
    auth.initialize().await;
    auth.state().user().cloned().ok_or(CliError::NotSignedIn)
}

fn print_signed_in(user: &User) {
    println!("signed in as {} <{}> ({})", user.name, user.email, user.role.label());
    println!("dashboard: {}", dashboard_path(user.role));
}

/// One-line guard verdict for `path`.
fn describe_check(state: &AuthState, path: &str) -> String {
    if route_access(path) == RouteAccess::NotFound {
        return format!("{path}: redirect {NOT_FOUND_PATH}");
    }
    let Some(requirement) = RouteRequirement::for_location(path) else {
        return format!("{path}: public");
    };
    match decide(state, &requirement, path) {
        GuardDecision::Render => format!("{path}: allowed"),
        GuardDecision::Loading => format!("{path}: pending"),
        GuardDecision::Unauthorized(notice) => format!("{path}: denied ({})", notice.message),
        decision @ (GuardDecision::RedirectToAuth { .. } | GuardDecision::RedirectToDashboard { .. }) => {
            format!("{path}: redirect {}", decision.redirect_target().unwrap_or_default())
        }
    }
}
