//! Network image views
//!
//! A view observes one URL and owns the `LoadOutcome` rendered for it.
//! Each observation loads at most once: Loading -> Success | Error. The
//! only way back to Loading is observing a different URL. A load that
//! finishes after its observation was replaced is discarded by the view,
//! but a cached view has already written its bitmap to the cache by then.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use netimg_image::{Bitmap, SimpleImageCache, shared_cache};

use crate::fetch::{ImageFetcher, load_with};
use crate::outcome::LoadOutcome;

fn lock(cache: &Mutex<SimpleImageCache>) -> MutexGuard<'_, SimpleImageCache> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Result of a finished load
#[derive(Debug)]
pub struct Completed {
    url: String,
    generation: u64,
    bitmap: Option<Bitmap>,
}

impl Completed {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn outcome(&self) -> LoadOutcome {
        LoadOutcome::from(self.bitmap.clone())
    }
}

/// A started load, detached from the view that began it
pub struct LoadTask<'c, F: ?Sized> {
    url: String,
    generation: u64,
    fetcher: Arc<F>,
    cache: Option<&'c Mutex<SimpleImageCache>>,
}

impl<'c, F: ImageFetcher + ?Sized + 'static> LoadTask<'c, F> {
    /// Fetch on the blocking pool, store successes in the cache (if any)
    pub async fn run(self) -> Completed {
        let bitmap = load_with(self.fetcher, &self.url).await;

        if let (Some(cache), Some(bitmap)) = (self.cache, &bitmap) {
            lock(cache).put(&self.url, Arc::clone(bitmap));
        }

        Completed {
            url: self.url,
            generation: self.generation,
            bitmap,
        }
    }
}

/// One observation of a URL
#[derive(Debug)]
struct Observed {
    url: String,
    generation: u64,
    started: bool,
    outcome: LoadOutcome,
}

impl Observed {
    fn new(url: String, outcome: LoadOutcome) -> Self {
        Self {
            url,
            generation: 0,
            started: false,
            outcome,
        }
    }

    /// Switch to a new URL. Returns false if it is the current one.
    fn observe(&mut self, url: String, outcome: LoadOutcome) -> bool {
        if url == self.url {
            return false;
        }
        self.url = url;
        self.generation += 1;
        self.started = false;
        self.outcome = outcome;
        true
    }

    /// Mark the load as started; false if this observation already ran
    /// or has already left Loading
    fn start(&mut self) -> bool {
        if self.started || !self.outcome.is_loading() {
            return false;
        }
        self.started = true;
        true
    }

    fn task<'c, F: ?Sized>(
        &self,
        fetcher: &Arc<F>,
        cache: Option<&'c Mutex<SimpleImageCache>>,
    ) -> LoadTask<'c, F> {
        LoadTask {
            url: self.url.clone(),
            generation: self.generation,
            fetcher: Arc::clone(fetcher),
            cache,
        }
    }

    fn apply(&mut self, done: Completed) -> bool {
        if done.generation != self.generation || done.url != self.url {
            tracing::debug!("discarding superseded load of {}", done.url);
            return false;
        }
        self.outcome = LoadOutcome::from(done.bitmap);
        true
    }
}

/// Uncached network image
pub struct NetworkImage<F> {
    observed: Observed,
    fetcher: Arc<F>,
}

impl<F: ImageFetcher + 'static> NetworkImage<F> {
    pub fn new(url: impl Into<String>, fetcher: F) -> Self {
        Self {
            observed: Observed::new(url.into(), LoadOutcome::Loading),
            fetcher: Arc::new(fetcher),
        }
    }

    pub fn url(&self) -> &str {
        &self.observed.url
    }

    pub fn outcome(&self) -> &LoadOutcome {
        &self.observed.outcome
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Observe a new URL. Returns false if it is the current one.
    pub fn set_url(&mut self, url: impl Into<String>) -> bool {
        self.observed.observe(url.into(), LoadOutcome::Loading)
    }

    /// Start the fetch for the current URL. `None` once it has started.
    pub fn begin_load(&mut self) -> Option<LoadTask<'static, F>> {
        if !self.observed.start() {
            return None;
        }
        Some(self.observed.task(&self.fetcher, None))
    }

    /// Apply a finished load; ignored if the view has moved on
    pub fn apply(&mut self, done: Completed) -> bool {
        self.observed.apply(done)
    }

    pub async fn load(&mut self) -> &LoadOutcome {
        if let Some(task) = self.begin_load() {
            let done = task.run().await;
            self.apply(done);
        }
        self.outcome()
    }
}

/// Network image backed by a `SimpleImageCache`
pub struct CachedNetworkImage<'c, F> {
    observed: Observed,
    fetcher: Arc<F>,
    cache: &'c Mutex<SimpleImageCache>,
}

impl<F: ImageFetcher + 'static> CachedNetworkImage<'static, F> {
    /// View over the process-wide cache
    pub fn new(url: impl Into<String>, fetcher: F) -> Self {
        Self::with_cache(url, fetcher, shared_cache())
    }
}

impl<'c, F: ImageFetcher + 'static> CachedNetworkImage<'c, F> {
    pub fn with_cache(
        url: impl Into<String>,
        fetcher: F,
        cache: &'c Mutex<SimpleImageCache>,
    ) -> Self {
        let url = url.into();
        let outcome = Self::seed(cache, &url);
        Self {
            observed: Observed::new(url, outcome),
            fetcher: Arc::new(fetcher),
            cache,
        }
    }

    fn seed(cache: &Mutex<SimpleImageCache>, url: &str) -> LoadOutcome {
        match lock(cache).get(url) {
            Some(bitmap) => LoadOutcome::Success(bitmap),
            None => LoadOutcome::Loading,
        }
    }

    pub fn url(&self) -> &str {
        &self.observed.url
    }

    pub fn outcome(&self) -> &LoadOutcome {
        &self.observed.outcome
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn cache(&self) -> &'c Mutex<SimpleImageCache> {
        self.cache
    }

    /// Observe a new URL, seeding the state from the cache.
    /// Returns false if it is the current one.
    pub fn set_url(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if url == self.observed.url {
            return false;
        }
        let outcome = Self::seed(self.cache, &url);
        self.observed.observe(url, outcome)
    }

    /// Resolve from the cache, or start a fetch. `None` means there is
    /// nothing to fetch: the cache answered, or this URL already loaded.
    pub fn begin_load(&mut self) -> Option<LoadTask<'c, F>> {
        if !self.observed.start() {
            return None;
        }

        if let Some(bitmap) = lock(self.cache).get(&self.observed.url) {
            tracing::debug!("image cache hit for {}", self.observed.url);
            self.observed.outcome = LoadOutcome::Success(bitmap);
            return None;
        }

        tracing::debug!("image cache miss for {}", self.observed.url);
        Some(self.observed.task(&self.fetcher, Some(self.cache)))
    }

    /// Apply a finished load; ignored if the view has moved on
    pub fn apply(&mut self, done: Completed) -> bool {
        self.observed.apply(done)
    }

    pub async fn load(&mut self) -> &LoadOutcome {
        if let Some(task) = self.begin_load() {
            let done = task.run().await;
            self.apply(done);
        }
        self.outcome()
    }
}
