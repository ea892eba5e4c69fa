//! netimg demo - Main Entry Point
//!
//! Loads each URL with the uncached and the cached loader and prints what a
//! view would render.

mod compare;
mod config;

use anyhow::Result;
use netimg_loader::{HttpImageFetcher, shared_cache};
use tracing_subscriber::EnvFilter;

use crate::compare::compare;
use crate::config::DemoConfig;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = DemoConfig::from_env()?;
    tracing::info!("loading {} image(s) as {}", config.urls.len(), config.client.user_agent);

    let fetcher = HttpImageFetcher::new(config.client.clone());
    let rows = smol::block_on(compare(&config.urls, fetcher, shared_cache()));

    for row in &rows {
        println!("{}", row);
    }

    let stats = shared_cache()
        .lock()
        .map_err(|_| anyhow::anyhow!("image cache lock poisoned"))?
        .stats();
    println!(
        "cache: {}/{} entries{}, {} hits, {} misses ({:.0}% hit rate), {} bytes",
        stats.entry_count,
        stats.capacity,
        if stats.is_full() { " (full)" } else { "" },
        stats.hits,
        stats.misses,
        stats.hit_rate() * 100.0,
        stats.memory_bytes
    );

    Ok(())
}
