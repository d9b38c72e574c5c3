//! Health probe service entry point.

use std::net::SocketAddr;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use health_probe::api::{create_router, AppState};
use health_probe::config::{Config, VERBOSE_LOG_DIRECTIVE};
use health_probe::probe::TcpProber;
use health_probe::readiness::check_readiness;
use health_probe::utils::shutdown_signal;

/// Liveness and database readiness endpoints.
#[derive(Parser, Debug)]
#[command(name = "health-probe")]
#[command(about = "Serves /liveness and /readiness for a database-backed service")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the health endpoints (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Run one readiness check and exit non-zero if not ready.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration once; logging settings come from it when it loads
    let loaded = Config::load();

    // Initialize logging
    let directive = match &loaded {
        _ if args.verbose => VERBOSE_LOG_DIRECTIVE,
        Ok(config) => config.log_directive(),
        Err(_) => "info",
    };
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    if args.json_logs {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(loaded),
        Some(Command::Check) => cmd_check(loaded).await,
        Some(Command::Serve { port }) => cmd_serve(loaded, port.or(args.port)).await,
        None => cmd_serve(loaded, args.port).await,
    }
}

/// Validate loaded configuration, logging the failure.
fn load_config(loaded: health_probe::Result<Config>) -> anyhow::Result<Config> {
    let config = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config(loaded: health_probe::Result<Config>) -> anyhow::Result<ExitCode> {
    println!("======================================================================");
    println!("HEALTH PROBE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match loaded {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    match config.db_endpoint() {
        Some(raw) => println!("  DB Endpoint: {}", raw),
        None => println!("  WARNING: DB_ENDPOINT is not set, /readiness will report 503"),
    }
    println!("  Default DB Port: {}", config.default_db_port);
    println!("  Probe Timeout: {:?}", config.probe_timeout());
    println!("  Version File: {}", config.version_file);
    println!("  Timezone: {} ({})", config.timezone, config.timezone_label);
    println!("  Port: {}", config.port);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(ExitCode::SUCCESS)
}

/// Run a single readiness check from the command line.
async fn cmd_check(loaded: health_probe::Result<Config>) -> anyhow::Result<ExitCode> {
    let config = load_config(loaded)?;
    let prober = TcpProber::new(config.probe_timeout());

    let verdict = check_readiness(config.db_endpoint(), config.default_db_port, &prober).await;
    println!("{}", verdict.message());

    Ok(if verdict.is_ready() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Serve the health endpoints until shutdown.
async fn cmd_serve(
    loaded: health_probe::Result<Config>,
    port_override: Option<u16>,
) -> anyhow::Result<ExitCode> {
    let mut config = load_config(loaded)?;

    if let Some(port) = port_override {
        config.port = port;
    }

    info!("Configuration loaded successfully");
    match config.db_endpoint() {
        Some(raw) => info!("DB endpoint: {}", raw),
        None => info!("DB endpoint not set, readiness will report 503"),
    }
    info!("Probe timeout: {:?}", config.probe_timeout());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app_state = AppState::new(config)?;

    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(ExitCode::SUCCESS)
}
