use std::net::Ipv4Addr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, RwLock,
};

use clap::Parser;

use dlnacat::cds::{didl::DidlContext, ContentDirectory};
use dlnacat::soap::Dispatcher;
use dlnacat::ssdp::{socket, Announcer, AnnouncerConfig};
use dlnacat::{cli, config, http, media};

/// Set to true once the first Ctrl+C is received. Second Ctrl+C force-exits.
static SHUTTING_DOWN: AtomicBool = AtomicBool::new(false);

async fn wait_for_shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    if SHUTTING_DOWN.swap(true, Ordering::SeqCst) {
        eprintln!("\ndlnacat: forced exit");
        std::process::exit(1);
    }
}

/// Stable UUID v5 from hostname + server name: same machine and name, same UUID.
fn build_server_uuid(hostname: &str, server_name: &str) -> String {
    let seed = format!("{}\x00{}", hostname, server_name);
    uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_DNS, seed.as_bytes()).to_string()
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = cli::Args::parse();

    let file_config = config::find_config_file(args.config.as_deref()).and_then(|path| {
        match config::load_config(&path) {
            Ok(cfg) => {
                tracing::debug!("Loaded config from {}", path.display());
                Some(cfg)
            }
            Err(e) => {
                tracing::warn!("Failed to parse config file: {}", e);
                None
            }
        }
    });
    let config = config::Config::resolve(file_config, &args);

    for path in &config.paths {
        if !path.is_dir() {
            eprintln!("error: not a directory: {}", path.display());
            std::process::exit(1);
        }
    }

    let hostname = config::local_hostname().unwrap_or_else(|| "dlnacat".to_string());
    let server_uuid = build_server_uuid(&hostname, &config.name);
    let host_ip = if config.localhost {
        Ipv4Addr::LOCALHOST
    } else {
        config.host.unwrap_or_else(socket::resolve_host_ip)
    };
    tracing::info!(
        "dlnacat \"{}\" (uuid: {}) on http://{}:{}",
        config.name,
        server_uuid,
        host_ip,
        config.port
    );

    // Blocking scan before the server starts.
    let library = media::scanner::scan(&config.paths);
    if library.files.is_empty() {
        tracing::warn!("No media files found; serving an empty catalog");
    }

    let didl = DidlContext::new(format!("http://{}:{}", host_ip, config.port));
    let catalog = Arc::new(RwLock::new(library.catalog));
    let state = http::state::AppState {
        dispatcher: Dispatcher::new(ContentDirectory::new(catalog, didl)),
        media: Arc::new(library.files),
        server_uuid: server_uuid.clone(),
        server_name: config.name.clone(),
    };
    let app = http::build_router(state);

    let bind_ip = if config.localhost {
        Ipv4Addr::LOCALHOST
    } else {
        Ipv4Addr::UNSPECIFIED
    };
    let addr = (bind_ip, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap_or_else(|e| {
        eprintln!("error: failed to bind {}:{}: {}", bind_ip, config.port, e);
        std::process::exit(1);
    });

    // Announce only once the description URL is reachable.
    let mut announcer = if config.localhost {
        None
    } else {
        let ssdp_config = AnnouncerConfig::new(server_uuid, host_ip, config.port)
            .with_interval(config.announce_interval);
        match Announcer::multicast(ssdp_config, Some(host_ip).filter(|ip| !ip.is_loopback())) {
            Ok(mut announcer) => {
                announcer.start();
                Some(announcer)
            }
            Err(e) => {
                tracing::warn!("SSDP disabled, could not create multicast socket: {}", e);
                None
            }
        }
    };

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = (&mut shutdown_rx).await;
            })
            .await
            .unwrap_or_else(|e| tracing::error!("HTTP server error: {}", e));
    });

    wait_for_shutdown().await;
    tracing::info!("Shutting down...");

    if let Some(announcer) = announcer.as_mut() {
        announcer.stop().await;
    }
    let _ = shutdown_tx.send(());
    let _ = tokio::time::timeout(std::time::Duration::from_secs(1), server).await;

    tracing::info!("Goodbye.");
}
