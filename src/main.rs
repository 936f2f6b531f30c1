use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use portal::auth::AuthSession;
use portal::config::{self, ConfigError, PortalConfig};
use portal::net::types::{LoginParams, RegisterParams, ResetPasswordParams};
use portal::net::{ApiError, HttpGateway, UserApi};
use portal::notify::TracingNotifier;
use portal::routing::{Navigation, NavigationError, RouteTable, Router};
use portal::session::{FileSessionStore, SessionStore};
use portal::validate::{self, ValidationError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("navigation failed: {0}")]
    Navigation(#[from] NavigationError),
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "portal", about = "Account portal client")]
struct Cli {
    /// Overrides `PORTAL_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    /// Overrides `PORTAL_SESSION_FILE`.
    #[arg(long)]
    session_file: Option<PathBuf>,

    /// Overrides `PORTAL_TIMEOUT_MS`.
    #[arg(long)]
    timeout_ms: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Email a verification code.
    Code {
        #[arg(long)]
        email: String,
    },
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        email: String,
        #[arg(long, value_parser = ["M", "F"])]
        sex: String,
        #[arg(long)]
        code: String,
    },
    /// Log in, then continue to the page the login screen was guarding.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        /// Page to continue to once signed in; defaults to home.
        #[arg(long)]
        redirect: Option<String>,
    },
    Logout,
    ResetPassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        code: String,
        #[arg(long)]
        new_password: String,
    },
    /// Run the navigation guard for a path and print where it lands.
    Navigate { path: String },
    /// Show whether a session is stored.
    Status,
}

struct Client {
    session: Rc<dyn SessionStore>,
    router: Rc<Router>,
    auth: AuthSession,
}

impl Client {
    fn new(config: &PortalConfig) -> Result<Self, CliError> {
        let session: Rc<dyn SessionStore> = Rc::new(FileSessionStore::open(&config.session_file));
        let router = Rc::new(Router::new(RouteTable::default(), session.clone(), config.app_title.clone()));
        let gateway = HttpGateway::new(config, session.clone(), Rc::new(TracingNotifier), router.clone())?;
        let auth = AuthSession::new(UserApi::new(Rc::new(gateway)), session.clone());
        Ok(Self { session, router, auth })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = PortalConfig::from_env()?;
    if let Some(raw) = &cli.base_url {
        config.base_url = config::parse_base_url(raw)?;
    }
    if let Some(raw) = &cli.timeout_ms {
        config.timeout = config::parse_timeout_ms(raw)?;
    }
    if let Some(path) = cli.session_file {
        config.session_file = path;
    }

    let client = Client::new(&config)?;
    tracing::debug!(base_url = %config.base_url, session_file = %config.session_file.display(), "client ready");
    run(&client, cli.command).await
}

async fn run(client: &Client, command: Command) -> Result<(), CliError> {
    let api = client.auth.api();
    match command {
        Command::Code { email } => {
            validate::email(&email)?;
            api.send_verification_code(&email).await?;
            println!("verification code sent to {email}");
        }
        Command::Register { username, password, email, sex, code } => {
            let params = RegisterParams { username, password, email, sex, verification_code: code };
            validate::register(&params)?;
            api.register(&params).await?;
            println!("registered {}", params.username);
        }
        Command::Login { username, password, redirect } => {
            let params = LoginParams { username, password };
            validate::login(&params)?;
            let login = client.router.login_location(redirect.as_deref())?;
            client.router.navigate(&login.full_path())?;
            let user = client.auth.login(&params).await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
            let target = client.router.current().post_login_target();
            print_navigation(client, &client.router.navigate(&target)?);
        }
        Command::Logout => {
            client.auth.logout().await?;
            println!("logged out");
        }
        Command::ResetPassword { email, code, new_password } => {
            let params = ResetPasswordParams { email, verification_code: code, new_password };
            validate::reset_password(&params)?;
            api.reset_password(&params).await?;
            println!("password reset for {}", params.email);
        }
        Command::Navigate { path } => {
            let nav = client.router.navigate(&path)?;
            print_navigation(client, &nav);
        }
        Command::Status => {
            let state = if client.session.is_present() { "signed in" } else { "signed out" };
            println!("{state}");
        }
    }
    Ok(())
}

fn print_navigation(client: &Client, nav: &Navigation) {
    match &nav.redirected_from {
        Some(from) => println!("{} (redirected from {from})", nav.location),
        None => println!("{}", nav.location),
    }
    println!("title: {}", client.router.document_title());
}
