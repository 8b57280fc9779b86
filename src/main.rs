//! AccessTime guard server.
//!
//! Loads configuration, connects to the chain and serves the protected API
//! until SIGINT/SIGTERM.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

use accesstime_guard::blockchain::ChainHealthMonitor;
use accesstime_guard::config::load_config_or_default;
use accesstime_guard::lifecycle::{signals, startup, Shutdown};
use accesstime_guard::observability::{logging, metrics};
use accesstime_guard::HttpServer;

#[derive(Parser)]
#[command(name = "accesstime-guard")]
#[command(about = "Wallet-signature access time guard", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "accesstime.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match load_config_or_default(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration from {:?}: {}", args.config, e);
            return Err(e.into());
        }
    };

    logging::init(&config.observability.log_level);
    tracing::info!("accesstime-guard v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        chain_id = config.chain.id,
        min_remaining_time = config.access_time.min_remaining_time,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let client = startup::connect_chain(&config).await?;
    let authorizer = startup::build_authorizer(&config, client.clone())?;

    let shutdown = Shutdown::new();
    let monitor_task = tokio::spawn(ChainHealthMonitor::new(client).run(shutdown.subscribe()));
    let server_shutdown = shutdown.subscribe();
    let tls = config.listener.tls.clone();
    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config, authorizer);

    let mut server_task = tokio::spawn(async move {
        match tls {
            Some(tls) => {
                let addr: SocketAddr = bind_address
                    .parse()
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
                server.run_tls(addr, &tls, server_shutdown).await
            }
            None => {
                let listener = TcpListener::bind(&bind_address).await?;
                server.run(listener, server_shutdown).await
            }
        }
    });

    tokio::select! {
        _ = signals::wait_for_signal() => shutdown.trigger(),
        result = &mut server_task => {
            result??;
            return Ok(());
        }
    }

    server_task.await??;
    let _ = monitor_task.await;
    tracing::info!("Shutdown complete");
    Ok(())
}
