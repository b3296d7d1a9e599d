use consult_registry::{
    config::settings::{Settings, load_app_settings},
    core::{ConfigRegistry, ConsoleTab, SeaOrmConfigStore, bootstrap_script},
    errors::{Error, Result},
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// What the binary was asked to do.
enum Command {
    /// Print the bootstrap script; needs no store
    BootstrapSql,
    /// Anything that goes through the registry
    Store(StoreCommand),
}

/// Commands that run against an open store.
enum StoreCommand {
    /// Print redacted configs, optionally for one tab
    List(Option<ConsoleTab>),
    /// Apply seeds and report counts
    Serve,
}

impl Command {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        match args.next().as_deref() {
            None => Ok(Self::Store(StoreCommand::Serve)),
            Some("bootstrap-sql") => Ok(Self::BootstrapSql),
            Some("list") => {
                let tab = args.next().map(|t| t.parse()).transpose()?;
                Ok(Self::Store(StoreCommand::List(tab)))
            }
            Some(other) => Err(Error::Config {
                message: format!(
                    "Unknown command '{other}'. Use: bootstrap-sql | list [payments|databases|apis]"
                ),
            }),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    let command = match Command::parse(std::env::args().skip(1))? {
        Command::BootstrapSql => {
            println!("{}", bootstrap_script());
            return Ok(());
        }
        Command::Store(command) => command,
    };

    // 3. Settings, then the one store instance for the whole process
    let settings = load_app_settings().inspect_err(|e| error!("Failed to load settings: {}", e))?;
    let store = SeaOrmConfigStore::open(&settings.database.url)
        .await
        .inspect_err(|e| error!("Failed to open config store: {}", e))?;
    let registry = ConfigRegistry::new(store, settings.redaction_policy());

    let outcome = run(&registry, &settings, command).await;

    // 4. Close the store even when the command failed
    registry.into_store().close().await?;
    outcome
}

async fn run(
    registry: &ConfigRegistry<SeaOrmConfigStore>,
    settings: &Settings,
    command: StoreCommand,
) -> Result<()> {
    match command {
        StoreCommand::Serve => {
            let created = registry.seed(&settings.seed).await?;
            let total = registry.list_all().await?.len();
            info!("Registry ready: {} configs ({} seeded)", total, created);
        }
        StoreCommand::List(tab) => {
            let configs = match tab {
                Some(tab) => {
                    println!("{}", tab.title());
                    registry.list_or_empty(|category| tab.includes(category)).await
                }
                None => registry.list_or_empty(|_| true).await,
            };
            if configs.is_empty() {
                println!("No configurations found for this section.");
            }
            for config in registry.redact_all(&configs) {
                let status = if config.is_active { "active" } else { "inactive" };
                let badge = config
                    .category
                    .badge()
                    .map(|b| format!(" [{b}]"))
                    .unwrap_or_default();
                println!(
                    "{:<8} {}{} = {} | {}",
                    status,
                    config.key,
                    badge,
                    config.value,
                    config.description.as_deref().unwrap_or("")
                );
            }
        }
    }
    Ok(())
}
