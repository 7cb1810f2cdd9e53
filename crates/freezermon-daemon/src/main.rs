//! Freezermon
//!
//! Prometheus exporter that keeps an eye on a freezer through a DS18B20
//! sensor on the 1-Wire bus. Requires the `w1-gpio` and `w1-therm` kernel
//! drivers.
//!
//! To test: `curl localhost:8080/metrics`

mod config;
mod daemon;
mod metrics;
mod sampler;
mod web;

use anyhow::{Context, Result};
use clap::Parser;
use freezermon_w1::DeviceRegistry;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use metrics::Metrics;
use sampler::{MetricsSink, Sampler};

#[derive(Parser)]
#[command(name = "freezermon")]
#[command(about = "Freezer Monitor")]
#[command(version)]
struct Cli {
    /// Enable verbose debug messages
    #[arg(short, long)]
    verbose: bool,

    /// Run as a daemon
    #[arg(short = 'D', long)]
    daemon: bool,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_ansi(!cli.daemon)
        .init();

    let config = Config::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    // Fork before the runtime spawns its worker threads
    let _pid_file = if cli.daemon {
        Some(daemon::daemonize(&config)?)
    } else {
        None
    };

    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    runtime.block_on(run(config, cli.verbose))
}

async fn run(config: Config, verbose: bool) -> Result<()> {
    let registry = DeviceRegistry::discover(&config.device_dir)
        .context("Error initializing DS18B20")?;
    info!(
        "Found {} device(s) in {}",
        registry.device_count(),
        config.device_dir.display()
    );

    // Perform an initial reading; if it fails, fail fast
    let celsius = registry
        .measure_first()
        .context("Error measuring initial temperature")?;
    info!("Initial temperature: {:.2}°C", celsius);

    let metrics = Arc::new(Metrics::new()?);
    metrics.set_temperature(celsius);
    metrics.set_up(true);

    // Start sampling loop
    let sampler = Sampler::new(registry, metrics.clone(), verbose);
    tokio::spawn(sampler.run());

    // Setup Unix signal handlers
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    let mut sigint = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;

    let app = web::create_router(metrics.clone());
    let addr: SocketAddr = config.listen.parse().context("Invalid listen address")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Serving metrics on http://{}{}", addr, web::METRICS_PATH);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result.context("Error running HTTP server")?;
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
    }

    info!(
        "Last published temperature: {:.2}°C (up = {})",
        metrics.temperature(),
        metrics.up()
    );
    Ok(())
}
