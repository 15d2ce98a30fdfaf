// # mikrotik-cf-ddns - DDNS bridge daemon
//
// Thin integration layer: parse the CLI, load the configuration, wire the
// Cloudflare client into the HTTP router, serve. All update logic lives in
// ddns-bridge-core / ddns-bridge-http / ddns-bridge-cloudflare.
//
// A MikroTik router (or anything that can POST an address literal) keeps a
// DNS record current by posting its address to the configured path:
//
// ```bash
// mikrotik-cf-ddns --conf /etc/mikrotik-cf-ddns.conf
// curl -d 203.0.113.7 http://gateway:28275/update
// ```

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ddns_bridge_cloudflare::CloudflareClient;
use ddns_bridge_core::BridgeConfig;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum BridgeExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<BridgeExitCode> for ExitCode {
    fn from(code: BridgeExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Parser, Debug)]
#[command(name = "mikrotik-cf-ddns", version, about = "HTTP-to-Cloudflare dynamic DNS update bridge")]
struct Cli {
    /// Configuration file path
    #[arg(
        short = 'c',
        long = "conf",
        value_name = "PATH",
        default_value = "/etc/mikrotik-cf-ddns.conf"
    )]
    conf: std::path::PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing before anything that can fail, so failures log
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        return BridgeExitCode::ConfigError.into();
    }

    // An unknown option or missing token/zone aborts here, before serving
    let config = match BridgeConfig::load(&cli.conf) {
        Ok(config) => config,
        Err(e) => {
            error!(path = %cli.conf.display(), "configuration error: {e}");
            return BridgeExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {e}");
            return BridgeExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        if let Err(e) = run_server(config).await {
            error!("Server error: {e:#}");
            BridgeExitCode::RuntimeError
        } else {
            BridgeExitCode::CleanShutdown
        }
    })
    .into()
}

/// Bind the listener and serve until a shutdown signal arrives
async fn run_server(config: BridgeConfig) -> Result<()> {
    let updater = CloudflareClient::new(config.token.clone())
        .context("cannot construct Cloudflare client")?;

    let addr = listen_addr(&config.http_addr);
    let config = Arc::new(config);
    let app = ddns_bridge_http::router(config.clone(), Arc::new(updater));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot listen on {addr}"))?;

    info!(addr = %config.http_addr, path = %config.http_path, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Shutting down");
    Ok(())
}

/// Expand a Go-style `":port"` listen address to all interfaces
///
/// `[::]` binds dual-stack on Linux, so both IPv4 and IPv6 clients reach
/// the default listener.
fn listen_addr(http_addr: &str) -> String {
    match http_addr.strip_prefix(':') {
        Some(port) => format!("[::]:{port}"),
        None => http_addr.to_string(),
    }
}

/// Wait for SIGTERM or SIGINT
#[cfg(unix)]
async fn shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to setup SIGTERM handler: {e}");
            return std::future::pending::<()>().await;
        }
    };
    let mut sigint = match signal(SignalKind::interrupt()) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to setup SIGINT handler: {e}");
            return std::future::pending::<()>().await;
        }
    };

    let name = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };
    info!("Received shutdown signal: {name}");
}

/// Wait for CTRL-C (non-Unix fallback)
#[cfg(not(unix))]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to wait for CTRL-C: {e}");
        return std::future::pending::<()>().await;
    }
    info!("Received shutdown signal: SIGINT");
}
