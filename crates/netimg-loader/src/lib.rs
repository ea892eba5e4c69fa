//! netimg Loader
//!
//! Fetches remote images off the async executor and tracks the
//! Loading / Success / Error state for a view observing a URL.

pub mod fetch;
pub mod outcome;
pub mod view;

pub use fetch::{
    HttpImageFetcher, ImageFetcher, LoadError, load_image_from_url, load_with, try_load_image,
};
pub use outcome::LoadOutcome;
pub use view::{CachedNetworkImage, Completed, LoadTask, NetworkImage};

pub use netimg_image::{Bitmap, DecodedImage, SimpleImageCache, shared_cache};
pub use netimg_net::ClientConfig;
