mod config;

use std::sync::Arc;

use issuethread::{
    FileIdentityCache, MemoryNavigation, MemoryTarget, RenderKind, ThreadBuilder, ThreadError,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!(
        "Syncing thread for {} in {}/{}",
        config.page.url,
        config.thread.owner,
        config.thread.repo
    );

    let cache = FileIdentityCache::open(&config.identity.cache_path)?;
    let navigation = MemoryNavigation::parse(&config.page.url)?.with_title(config.page.title.clone());

    let thread = ThreadBuilder::new()
        .options(config.thread.clone())
        .navigation(Arc::new(navigation))
        .identity_cache(Arc::new(cache))
        .transport_config(config.transport.clone())
        .build()?;

    let target = Arc::new(MemoryTarget::new());
    thread.bind(RenderKind::Root, target.clone());

    match thread.spawn_start().await? {
        Ok(()) => tracing::info!("Thread synchronized"),
        Err(ThreadError::NotInitialized) => {
            tracing::warn!("No backing issue yet; an admin must initialize this thread");
        }
        Err(e) => tracing::error!("Synchronization failed: {}", e),
    }

    if !thread.is_logged_in() {
        match thread.login_link() {
            Ok(link) => tracing::info!("Login link: {}", link),
            Err(e) => tracing::debug!("Login unavailable: {}", e),
        }
    }

    println!("{}", target.markup());
    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
