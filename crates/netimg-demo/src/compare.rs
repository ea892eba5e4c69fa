//! Side-by-side run of the uncached and cached loaders

use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use netimg_loader::{
    CachedNetworkImage, ImageFetcher, LoadOutcome, NetworkImage, SimpleImageCache,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approach {
    /// Fetch on every load
    Native,
    /// Consult the cache first
    Cached,
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Approach::Native => "native",
            Approach::Cached => "cached",
        })
    }
}

/// One load as seen by a freshly created view
#[derive(Debug, Clone)]
pub struct Row {
    pub approach: Approach,
    pub url: String,
    pub pass: u32,
    pub from_cache: bool,
    pub outcome: LoadOutcome,
    pub elapsed: Duration,
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<7} pass {} {:<16} {:>6}ms{} {}",
            self.approach,
            self.pass,
            self.outcome.to_string(),
            self.elapsed.as_millis(),
            if self.from_cache { " (cache)" } else { "" },
            self.url
        )
    }
}

/// Load every URL once uncached, then twice through the cache
pub async fn compare<F>(
    urls: &[String],
    fetcher: F,
    cache: &Mutex<SimpleImageCache>,
) -> Vec<Row>
where
    F: ImageFetcher + Clone + 'static,
{
    let mut rows = Vec::with_capacity(urls.len() * 3);

    for url in urls {
        let started = Instant::now();
        let mut native = NetworkImage::new(url.as_str(), fetcher.clone());
        let outcome = native.load().await.clone();
        rows.push(Row {
            approach: Approach::Native,
            url: url.clone(),
            pass: 1,
            from_cache: false,
            outcome,
            elapsed: started.elapsed(),
        });

        for pass in 1..=2 {
            let started = Instant::now();
            let mut cached =
                CachedNetworkImage::with_cache(url.as_str(), fetcher.clone(), cache);
            let from_cache = cached.outcome().is_success();
            let outcome = cached.load().await.clone();
            rows.push(Row {
                approach: Approach::Cached,
                url: url.clone(),
                pass,
                from_cache,
                outcome,
                elapsed: started.elapsed(),
            });
        }
    }

    rows
}
