use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use fleetdesk_db::{ConnectOpts, DbHandle};
use lifecycle::contract::EntityKind;
use lifecycle::{Lifecycle, LifecycleConfig};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use search_core::{SearchQuery, SortDir};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;
use uuid::Uuid;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const MEMORY_DSN: &str = "sqlite::memory:";

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case(MEMORY_DSN) || dsn.eq_ignore_ascii_case("sqlite://:memory:") {
        return Ok(MEMORY_DSN.to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// Fleetdesk - vehicle sales back office core
#[derive(Parser)]
#[command(name = "fleetdesk-server")]
#[command(about = "Fleetdesk - entity lifecycle and search tooling")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check configuration
    Check,
    /// Apply migrations and seed the state catalog
    Migrate,
    /// Print the state catalog
    States,
    /// Search one entity type and print a JSON page
    Search {
        /// Entity type, e.g. `province` or `agent-products`
        entity: EntityKind,
        /// Case-insensitive substring; empty matches everything
        #[arg(long, default_value = "")]
        term: String,
        /// Restrict to one state id
        #[arg(long)]
        state: Option<i64>,
        /// Zero-based page number
        #[arg(long, default_value_t = 0)]
        page: u64,
        /// Page size (defaults to the configured size)
        #[arg(long)]
        size: Option<u64>,
        /// Sort field
        #[arg(long)]
        sort: Option<String>,
        /// Sort direction for `--sort`: asc (default) or desc
        #[arg(long, requires = "sort")]
        dir: Option<String>,
    },
    /// Delete an entity (soft delete for stateful types)
    Delete {
        entity: EntityKind,
        id: Uuid,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Fleetdesk starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let lifecycle_cfg: LifecycleConfig = config.module_config("lifecycle")?;
    lifecycle_cfg
        .validate()
        .context("Invalid configuration for module 'lifecycle'")?;

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => check_config(&config),
        Commands::Migrate => {
            let db = connect(&config, &args).await?;
            Lifecycle::migrate(db.seaorm()).await?;
            println!("Migrations applied");
            db.close().await;
            Ok(())
        }
        Commands::States => {
            let lifecycle = open_lifecycle(&config, &args, lifecycle_cfg).await?;
            let states = lifecycle.client().states().await?;
            println!("{}", serde_json::to_string_pretty(&states)?);
            Ok(())
        }
        Commands::Search {
            entity,
            term,
            state,
            page,
            size,
            sort,
            dir,
        } => {
            let dir = match dir {
                Some(raw) => raw.parse()?,
                None => SortDir::Asc,
            };
            let query = SearchQuery {
                term,
                page,
                page_size: size,
                sort: sort.map(|field| search_core::SortKey::new(field, dir)),
            };
            let lifecycle = open_lifecycle(&config, &args, lifecycle_cfg).await?;
            let result = lifecycle.client().search(entity, state, query).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Commands::Delete { entity, id } => {
            let lifecycle = open_lifecycle(&config, &args, lifecycle_cfg).await?;
            lifecycle.client().delete(entity, id).await?;
            println!("Deleted {entity} {id}");
            Ok(())
        }
    }
}

/// Detect DB backend from URL scheme (sqlite/postgres).
fn detect_from_dsn(cfg: &DatabaseConfig) -> Result<&'static str> {
    let raw = cfg.url.trim().to_owned();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let url = Url::parse(&raw).map_err(|e| anyhow!("Invalid database DSN '{}': {}", raw, e))?;

    match url.scheme() {
        "sqlite" => Ok("sqlite"),
        "postgres" | "postgresql" => Ok("postgres"),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

async fn connect(config: &AppConfig, args: &CliArgs) -> Result<DbHandle> {
    let db_config = config
        .database
        .clone()
        .ok_or_else(|| anyhow!("No database configuration found"))?;
    let backend = detect_from_dsn(&db_config)?;
    let base_dir = PathBuf::from(&config.server.home_dir);

    // Override with in-memory SQLite when --mock is set
    let mut final_dsn = if args.mock {
        MEMORY_DSN.to_string()
    } else {
        db_config.url.trim().to_owned()
    };
    if final_dsn.starts_with("sqlite:") {
        final_dsn = absolutize_sqlite_dsn(&final_dsn, &base_dir, true)?;
    }

    let in_memory = final_dsn == MEMORY_DSN;
    let connect_opts = ConnectOpts {
        // Each pooled connection to `:memory:` would see its own database.
        max_conns: if in_memory { Some(1) } else { db_config.max_conns },
        min_conns: in_memory.then_some(1),
        acquire_timeout: Some(Duration::from_secs(5)),
        sqlite_busy_timeout: db_config
            .busy_timeout_ms
            .map(|ms| Duration::from_millis(u64::from(ms))),
        create_sqlite_dirs: true,
        ..Default::default()
    };

    tracing::info!(backend, dsn = %final_dsn, "Connecting to database");
    let db = DbHandle::connect(&final_dsn, connect_opts).await?;
    tracing::info!("Connected DB backend: {:?}", db.engine());
    Ok(db)
}

/// Connect, bring the schema up to date and wire the lifecycle module.
async fn open_lifecycle(
    config: &AppConfig,
    args: &CliArgs,
    cfg: LifecycleConfig,
) -> Result<Lifecycle> {
    let db = connect(config, args).await?;
    Lifecycle::migrate(db.seaorm()).await?;
    Lifecycle::init(db.sea(), cfg).await
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    if let Some(db) = &config.database {
        detect_from_dsn(db)?;
    }

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
