//! # framedump
//!
//! Dump every frame of a video file as a numbered still image.
//!
//! `framedump` opens a video with FFmpeg (via
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next)), decodes its frames
//! in order and writes each one as a JPEG or PNG file named
//! `<video_name>_<index>.<format>`. Alongside the frames it leaves an empty
//! MPEG-4 copy of the video named `<video_name>_imported<ext>`.
//!
//! ## Quick Start
//!
//! ```no_run
//! let frames = framedump::extract("clip.mp4", "out", "jpg")?;
//! // out/clip_0.jpg, out/clip_1.jpg, ..., out/clip_imported.mp4
//! println!("{frames} frames written");
//! # Ok::<(), framedump::FramedumpError>(())
//! ```
//!
//! ### With options
//!
//! ```no_run
//! use framedump::{ExtractOptions, FrameExtractor};
//!
//! let options = ExtractOptions::new()
//!     .with_jpeg_quality(85)
//!     .with_imported_copy(false);
//! let report = FrameExtractor::new(options).extract("clip.mp4", "out", "jpg")?;
//! println!("{} of ~{} frames", report.frames_written, report.metadata.frame_count);
//! # Ok::<(), framedump::FramedumpError>(())
//! ```
//!
//! ### Decoding without writing
//!
//! ```no_run
//! use framedump::VideoSource;
//!
//! let mut source = VideoSource::open("clip.mp4")?;
//! let first = source.frames()?.next().transpose()?;
//! # Ok::<(), framedump::FramedumpError>(())
//! ```
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod configuration;
mod conversion;
pub mod error;
pub mod extractor;
pub mod ffmpeg;
pub mod image_format;
pub mod iterator;
pub mod metadata;
pub mod progress;
pub mod sink;
pub mod source;

pub use configuration::ExtractOptions;
pub use error::FramedumpError;
pub use extractor::{ExtractionReport, FrameExtractor, extract};
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use image_format::{DEFAULT_JPEG_QUALITY, ImageFormat, frame_file_name};
pub use iterator::FrameIterator;
pub use metadata::VideoMetadata;
pub use progress::{OperationType, ProgressCallback, ProgressInfo};
pub use sink::ImportedVideoSink;
pub use source::{SourceName, VideoSource};
