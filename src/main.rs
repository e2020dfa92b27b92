use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tourdesk::api::{AgencyApi, HttpApi};
use tourdesk::config::Config;
use tourdesk::constants::ERROR_NO_SESSION;
use tourdesk::logger::Logger;
use tourdesk::models::RegisterRequest;
use tourdesk::session::{Role, SessionStore};
use tourdesk::ui;

#[derive(Parser)]
#[command(name = "tourdesk")]
#[command(version, about = "Terminal back office for tour agencies", long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the usual locations
    #[arg(short = 'C', long, global = true)]
    config: Option<PathBuf>,

    /// Write a default configuration file (to PATH or the user config directory) and exit
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    generate_config: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Login { username: String, password: String },

    /// Create an account, then sign in
    Register {
        username: String,
        password: String,
        /// TourManager, ClientManager or InsuranceManager
        role: Role,
    },

    /// Forget the saved session
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.generate_config {
        let path = match path {
            Some(path) => path,
            None => Config::get_default_config_path()?,
        };
        return Config::generate_default_config(&path);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };

    let logger = Logger::from_config(config.logging.enabled)?;
    logger.install(config.logging.level_filter())?;

    let store = SessionStore::new(config.session_path()?);
    let api: Arc<dyn AgencyApi> = Arc::new(HttpApi::new(&config.api));

    let result = match cli.command {
        Some(Commands::Login { username, password }) => login(api.as_ref(), &store, &username, &password).await,
        Some(Commands::Register {
            username,
            password,
            role,
        }) => {
            let request = RegisterRequest {
                username: username.clone(),
                password: password.clone(),
                role_name: role.as_str().to_string(),
            };
            api.register(&request)
                .await
                .with_context(|| format!("Failed to register {}", username))?;
            println!("✅ Registered {} as {}", username, role);
            login(api.as_ref(), &store, &username, &password).await
        }
        Some(Commands::Logout) => {
            store.clear()?;
            println!("✅ Logged out");
            Ok(())
        }
        None => match store.load()? {
            Some(session) => ui::run_app(&config, session, store, api, logger.clone()).await,
            None => {
                eprintln!("{}", ERROR_NO_SESSION);
                eprintln!("\n💡 To use this app:");
                eprintln!("1. Sign in: tourdesk login <username> <password>");
                eprintln!("2. Or create an account: tourdesk register <username> <password> <role>");
                eprintln!("3. Run tourdesk again to open the back office");
                Ok(())
            }
        },
    };

    logger.flush();
    result
}

async fn login(api: &dyn AgencyApi, store: &SessionStore, username: &str, password: &str) -> Result<()> {
    let session = api
        .login(username, password)
        .await
        .with_context(|| format!("Failed to sign in as {}", username))?;
    store.save(&session)?;
    println!("✅ Signed in as {} ({})", session.username, session.role);
    Ok(())
}
