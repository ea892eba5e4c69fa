//! Fetch routine
//!
//! GET a URL and decode the body into a bitmap. The blocking work runs on
//! smol's blocking pool; every failure kind collapses into `None`.

use std::error::Error;
use std::sync::Arc;

use netimg_image::{Bitmap, DecodedImage, ImageDecoder, ImageError, ImageFormat};
use netimg_net::{ClientConfig, NetError, Request, ResourceLoader};

/// Why a load failed. Only ever logged; callers see `None`.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Net(#[from] NetError),

    #[error(transparent)]
    Decode(#[from] ImageError),
}

impl LoadError {
    /// The error and all of its sources, joined with ": "
    pub fn report(&self) -> String {
        let mut out = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            out.push_str(": ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }
        out
    }
}

/// Source of decoded bitmaps, called off the async executor
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Option<DecodedImage>;
}

impl<F> ImageFetcher for F
where
    F: Fn(&str) -> Option<DecodedImage> + Send + Sync,
{
    fn fetch(&self, url: &str) -> Option<DecodedImage> {
        self(url)
    }
}

/// Fetcher that does one HTTP GET per call
#[derive(Debug, Clone, Default)]
pub struct HttpImageFetcher {
    config: ClientConfig,
}

impl HttpImageFetcher {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, url: &str) -> Option<DecodedImage> {
        match try_load_image(&self.config, url) {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!("image load failed for {}: {}", url, e.report());
                None
            }
        }
    }
}

/// Blocking GET + decode with the typed error kept
pub fn try_load_image(config: &ClientConfig, url: &str) -> Result<DecodedImage, LoadError> {
    let req = Request::get(url).with_header("Accept", "image/*");
    let resp = ResourceLoader::with_config(config.clone())
        .request(req)?
        .error_for_status()?;

    let hint = resp
        .content_type()
        .map(ImageFormat::from_mime)
        .unwrap_or(ImageFormat::Unknown);

    let image = ImageDecoder::decode_with_hint(&resp.body, hint)?;
    tracing::debug!(
        "decoded {}x{} {:?} from {}",
        image.width,
        image.height,
        image.format,
        url
    );
    Ok(image)
}

/// Load a bitmap from a URL with the default client settings
pub async fn load_image_from_url(url: &str) -> Option<Bitmap> {
    load_with(Arc::new(HttpImageFetcher::default()), url).await
}

/// Run any fetcher on the blocking pool
pub async fn load_with<F>(fetcher: Arc<F>, url: &str) -> Option<Bitmap>
where
    F: ImageFetcher + ?Sized + 'static,
{
    let url = url.to_string();
    smol::unblock(move || fetcher.fetch(&url)).await.map(Arc::new)
}
