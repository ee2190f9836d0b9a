//! Switch Off AI status service entry point.

use std::net::IpAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use switch_off_ai::api::{create_router, AppState};
use switch_off_ai::config::{Config, VERBOSE_LOG_FILTER};
use switch_off_ai::metrics;
use switch_off_ai::utils::shutdown_signal;

/// Switch Off AI status service.
#[derive(Parser, Debug)]
#[command(name = "switch-off-ai")]
#[command(about = "Status service with a simulated, confirmation-gated shutdown switch")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// HTTP server port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Interface to listen on (overrides HOST).
    #[arg(long, global = true)]
    host: Option<IpAddr>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration (.env included) first, it drives the log filter
    let config = load_config(&args);

    // Initialize logging
    let directives = match &config {
        Ok(config) => config.log_filter(),
        Err(_) if args.verbose => VERBOSE_LOG_FILTER,
        Err(_) => "info",
    };
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(config).await,
        Some(Command::Serve) | None => cmd_serve(config).await,
    }
}

/// Load configuration and apply CLI overrides.
fn load_config(args: &Args) -> switch_off_ai::Result<Config> {
    let mut config = Config::load()?;

    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    config.verbose |= args.verbose;

    Ok(config)
}

/// Check configuration validity.
async fn cmd_check_config(config: switch_off_ai::Result<Config>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("SWITCH OFF AI - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match config {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(e.into());
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(e.into());
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}", config.socket_addr());
    println!("  Allowed Origin: {}", config.allowed_origin);
    println!("  Log Filter: {}", config.log_filter());
    println!("  Verbose: {}", config.verbose);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP service until a termination signal arrives.
async fn cmd_serve(config: switch_off_ai::Result<Config>) -> anyhow::Result<()> {
    let config = config.inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    config
        .validate()
        .inspect_err(|e| error!("Invalid configuration: {}", e))?;
    let origin = config.origin_header()?;
    info!("Configuration loaded (log filter: {})", config.log_filter());

    let mut app_state = AppState::new();
    match metrics::init_metrics() {
        Ok(handle) => app_state = app_state.with_metrics(handle),
        Err(e) => warn!("Prometheus exporter unavailable, /metrics disabled: {}", e),
    }

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    info!("Allowing cross-origin requests from {}", config.allowed_origin);

    let router = create_router(app_state, origin);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
