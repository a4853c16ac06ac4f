use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use cookbook_db::DbHandle;
use recipes::{config::RecipesConfig, search::SearchRequest, Recipes};
use runtime::{AppConfig, CliArgs};
use std::io::Read;
use std::path::PathBuf;

/// Cookbook - recipe catalog with structured search
#[derive(Parser)]
#[command(name = "cookbook-server")]
#[command(about = "Cookbook - recipe catalog with structured search")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database URL (overrides config)
    #[arg(long)]
    database_url: Option<String>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,
    /// Check configuration and database connectivity
    Check,
    /// Run a search request and print the resulting page as JSON
    Search {
        /// JSON search request file, or "-" for stdin
        #[arg(short, long, default_value = "-")]
        request: String,
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: u64,
        /// Page size (defaults to modules.recipes.default_page_size)
        #[arg(long)]
        size: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        database_url: cli.database_url.clone(),
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::init_logging_from_config(&logging_config, &config.home_dir());
    tracing::info!(home_dir = %config.server.home_dir, "Cookbook starting");

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Migrate => migrate(&config).await,
        Commands::Check => check(&config).await,
        Commands::Search {
            request,
            page,
            size,
        } => search(&config, &request, page, size).await,
    }
}

async fn connect(config: &AppConfig) -> Result<DbHandle> {
    let db_config = config
        .database
        .as_ref()
        .ok_or_else(|| anyhow!("Database is not configured"))?;

    let url = db_config.resolved_url(&config.home_dir());
    let mut opts = db_config.connect_opts();
    opts.create_sqlite_dirs = true;

    let db = DbHandle::connect(&url, opts)
        .await
        .with_context(|| format!("Failed to connect to {}", cookbook_db::redact_credentials_in_dsn(&url)))?;
    tracing::info!(dsn = %db.dsn(), engine = ?db.engine(), "Connected to database");
    Ok(db)
}

async fn migrate(config: &AppConfig) -> Result<()> {
    let db = connect(config).await?;
    Recipes::migrate(&db).await?;
    db.close().await;
    println!("Migrations applied");
    Ok(())
}

async fn check(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    let _: RecipesConfig = config.module_config("recipes")?;
    let db = connect(config).await?;
    db.ping().await?;
    db.close().await;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    Ok(())
}

fn read_request(source: &str) -> Result<SearchRequest> {
    let raw = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read search request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read search request file {source}"))?
    };
    serde_json::from_str(&raw).context("Invalid search request")
}

async fn search(config: &AppConfig, source: &str, page: u64, size: Option<u64>) -> Result<()> {
    let request = read_request(source)?;
    let module_cfg: RecipesConfig = config.module_config("recipes")?;

    let db = connect(config).await?;
    let api = Recipes::from_handle(&db, module_cfg).client();
    let result = api.search(request, page, size).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
