//! Extraction options.
//!
//! [`ExtractOptions`] is a builder that threads the progress callback, JPEG
//! quality and the re-encoded copy switch through [`FrameExtractor`](crate::FrameExtractor).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use framedump::{ExtractOptions, ProgressCallback, ProgressInfo};
//!
//! struct LogProgress;
//! impl ProgressCallback for LogProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{} frames written", info.current);
//!     }
//! }
//!
//! let options = ExtractOptions::new()
//!     .with_progress(Arc::new(LogProgress))
//!     .with_batch_size(25)
//!     .with_jpeg_quality(85)
//!     .with_imported_copy(false);
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::image_format::DEFAULT_JPEG_QUALITY;
use crate::progress::{NoOpProgress, ProgressCallback};

/// Options for one extraction run.
///
/// A default-constructed value writes every frame, reports no progress, uses
/// JPEG quality 95 and creates the `_imported` copy.
#[derive(Clone)]
pub struct ExtractOptions {
    pub(crate) progress: Arc<dyn ProgressCallback>,
    pub(crate) batch_size: u64,
    pub(crate) jpeg_quality: u8,
    pub(crate) imported_copy: bool,
}

impl Debug for ExtractOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ExtractOptions")
            .field("batch_size", &self.batch_size)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("imported_copy", &self.imported_copy)
            .finish_non_exhaustive()
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self {
            progress: Arc::new(NoOpProgress),
            batch_size: 1,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            imported_copy: true,
        }
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Fire the progress callback every `size` frames. Clamped to at least 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// JPEG quality, clamped to `1..=100`. Ignored for PNG output.
    #[must_use]
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Whether to create the zero-frame `<name>_imported<ext>` container
    /// next to the frames. Defaults to `true`.
    #[must_use]
    pub fn with_imported_copy(mut self, enabled: bool) -> Self {
        self.imported_copy = enabled;
        self
    }

    /// Configured JPEG quality.
    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    /// Configured progress batch size.
    pub fn batch_size(&self) -> u64 {
        self.batch_size
    }

    /// Whether the re-encoded copy will be created.
    pub fn imported_copy(&self) -> bool {
        self.imported_copy
    }
}
