use coin_toss::coin::{OutcomeSource, RandomCoin, SeededCoin};
use coin_toss::runner::Pacing;
use coin_toss::{AppState, Config, FileStore, MemoryStore, Store, router};
use std::{net::SocketAddr, sync::Arc};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();

    let store: Arc<dyn Store> = match FileStore::open(&config.data_dir).await {
        Ok(store) => {
            info!("progress stored under {}", store.dir().display());
            Arc::new(store)
        }
        Err(err) => {
            warn!(
                "cannot use data directory {}: {err}; keeping progress in memory only",
                config.data_dir.display()
            );
            Arc::new(MemoryStore::new())
        }
    };

    let coin: Arc<dyn OutcomeSource> = match config.coin_seed {
        Some(seed) => {
            info!(seed, "using seeded coin");
            Arc::new(SeededCoin::new(seed))
        }
        None => Arc::new(RandomCoin),
    };

    let pacing = if config.animate {
        Pacing::animated()
    } else {
        Pacing::off()
    };

    let state = AppState::load(store, coin, pacing).await;
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
}
