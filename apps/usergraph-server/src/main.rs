use anyhow::Result;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use api_ingress::{ApiIngress, ApiIngressConfig};
use users_info::{UsersInfo, UsersInfoConfig};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// UserGraph Server - GraphQL API over an in-memory user directory
#[derive(Parser)]
#[command(name = "usergraph-server")]
#[command(about = "UserGraph Server - GraphQL API over an in-memory user directory")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,

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
    /// Start the server
    Run,
    /// Check configuration
    Check,
    /// Print the GraphQL schema (SDL) and exit
    PrintSchema,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep stdout clean for piping the SDL
    if matches!(cli.command, Some(Commands::PrintSchema)) {
        print!("{}", users_info::api::graphql::schema_sdl());
        return Ok(());
    }

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity)
    config.apply_cli_overrides(&args);

    if args.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let logging_config = config
        .logging
        .clone()
        .unwrap_or_else(runtime::default_logging_config);
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "UserGraph Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
        Commands::PrintSchema => Ok(()),
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");

    let users_cfg: UsersInfoConfig = config.module_config("users_info");
    let ingress_cfg: ApiIngressConfig = config.module_config("api_ingress");

    let users = Arc::new(UsersInfo::new(users_cfg));
    let ingress = ApiIngress::new(config.server.clone(), ingress_cfg).with_module(users);

    tracing::info!(
        "GraphQL endpoint: http://{}/graphql",
        config.server.bind_addr()
    );

    let cancel = runtime::shutdown::cancel_on_shutdown();
    ingress.serve(cancel).await?;

    tracing::info!("UserGraph Server stopped");
    Ok(())
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    // Module sections must parse into their typed configs
    config.try_module_config::<UsersInfoConfig>("users_info")?;
    config.try_module_config::<ApiIngressConfig>("api_ingress")?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);

    Ok(())
}
