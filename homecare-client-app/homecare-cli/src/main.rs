mod commands;
mod credentials;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use homecare_infrastructure::{FileSessionStorage, MemoryTenantStore, StoreOptions};
use homecare_shared::config::AppConfig;
use homecare_shared::constants::DEFAULT_STORE_FILE;
use homecare_shared::telemetry::init_telemetry;

use commands::App;
use credentials::LoginProvider;

#[derive(Parser)]
#[command(name = "homecare")]
#[command(about = "Care coordination for home care agencies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Single-user login: any password opens the namespace derived from it
    #[arg(long, global = true, env = "HOMECARE_LEGACY_LOGIN")]
    legacy: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(short, long, env = "HOMECARE_USERNAME")]
        username: String,
        #[arg(short, long, env = "HOMECARE_PASSWORD")]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user and tenant
    Whoami,
    /// Manage clients
    Clients {
        #[command(subcommand)]
        action: commands::ClientCommand,
    },
    /// Log and browse care actions
    Actions {
        #[command(subcommand)]
        action: commands::ActionCommand,
    },
    /// Plan and complete scheduled tasks
    Schedule {
        #[command(subcommand)]
        action: commands::ScheduleCommand,
    },
    /// Manage employees
    Employees {
        #[command(subcommand)]
        action: commands::EmployeeCommand,
    },
    /// Show the care task catalog
    Catalog {
        /// Only commonly used tasks
        #[arg(long)]
        common: bool,
        /// Filter by category label, e.g. "Medical Care"
        #[arg(long)]
        category: Option<String>,
    },
    /// Dashboard counts
    Stats {
        /// Day counted as today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let _guard = init_telemetry(&config.log)?;

    let cli = Cli::parse();
    info!("{} starting ({})", config.app.name, config.app.env);

    let mut options = StoreOptions::from(&config.store);
    if options.snapshot_path.is_none() {
        options.snapshot_path = Some(PathBuf::from(DEFAULT_STORE_FILE));
    }
    let store = Arc::new(MemoryTenantStore::open(options)?);
    let app: App = homecare_core::services::HomeCareApp::new(
        store,
        Arc::new(LoginProvider::select(cli.legacy)),
        Arc::new(FileSessionStorage::new(&config.session.storage_path)),
    );

    let result = match cli.command {
        Commands::Login { username, password } => commands::login(&app, &username, &password).await,
        Commands::Logout => commands::logout(&app).await,
        Commands::Whoami => commands::whoami(&app).await,
        Commands::Clients { action } => commands::clients(&app, action).await,
        Commands::Actions { action } => commands::actions(&app, action).await,
        Commands::Schedule { action } => commands::schedule(&app, action).await,
        Commands::Employees { action } => commands::employees(&app, action).await,
        Commands::Catalog { common, category } => commands::catalog(&app, common, category.as_deref()).await,
        Commands::Stats { date } => commands::stats(&app, date.as_deref()).await,
    };

    if let Err(e) = &result {
        error!("Command failed: {:#}", e);
    }
    result
}
