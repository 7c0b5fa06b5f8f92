use mimalloc::MiMalloc;
use std::net::SocketAddr;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = &jamboree::config::CONFIG;
    let basic = &cfg.basic;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %basic.database_url,
        loglevel = %basic.loglevel,
        listen_addr = %basic.listen_addr,
        listen_port = basic.listen_port,
        admins = basic.admin_emails.len(),
        static_dir = %basic.static_dir.display(),
        ack_window_ms = cfg.cards.ack_window_ms,
        "configuration loaded"
    );

    let db = jamboree::db::spawn(&basic.database_url).await;

    if let Some(seed_path) = basic.seed_file.clone() {
        let db = db.clone();
        tokio::spawn(async move {
            if let Err(e) = jamboree::seed::seed_gigs(&db, &seed_path).await {
                warn!(
                    path = %seed_path.display(),
                    error = %e,
                    "Background task: failed to seed gigs."
                );
            }
        });
    }

    let config = jamboree::config::Config::clone(cfg);
    let state = jamboree::server::router::JamboreeState::new(db, config);
    let app = jamboree::server::router::jamboree_router(state);

    let addr = SocketAddr::from((basic.listen_addr, basic.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server has shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
