//! Load outcome

use std::fmt;

use netimg_image::Bitmap;

/// Render state of a network image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadOutcome {
    #[default]
    Loading,
    Success(Bitmap),
    Error,
}

impl LoadOutcome {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    pub fn bitmap(&self) -> Option<&Bitmap> {
        match self {
            Self::Success(bitmap) => Some(bitmap),
            _ => None,
        }
    }
}

impl From<Option<Bitmap>> for LoadOutcome {
    fn from(result: Option<Bitmap>) -> Self {
        match result {
            Some(bitmap) => Self::Success(bitmap),
            None => Self::Error,
        }
    }
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Success(bitmap) => write!(f, "loaded {}x{}", bitmap.width, bitmap.height),
            Self::Error => write!(f, "failed to load"),
        }
    }
}
