//! Whole-video frame extraction.
//!
//! [`FrameExtractor`] decodes every frame of a video in order and writes it
//! to the output folder as `<video_name>_<index>.<format>`, starting at index
//! 0. It also leaves the zero-frame `<video_name>_imported<ext>` copy beside
//! the frames (see [`sink`](crate::sink)).
//!
//! The run stops at the end of the stream or at the first frame that fails
//! to decode; both count as normal completion. Frames already written are
//! never removed, even when a later write fails.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    configuration::ExtractOptions,
    error::FramedumpError,
    image_format::{ImageFormat, frame_file_name},
    metadata::VideoMetadata,
    progress::{OperationType, ProgressTracker},
    sink::ImportedVideoSink,
    source::{SourceName, VideoSource},
};

/// Outcome of a successful extraction.
#[derive(Debug, Clone)]
#[must_use]
pub struct ExtractionReport {
    /// Number of image files written.
    pub frames_written: u64,
    /// Folder the frames were written to.
    pub output_dir: PathBuf,
    /// Path of the re-encoded copy, if it was created.
    pub imported_copy: Option<PathBuf>,
    /// Metadata of the source video.
    pub metadata: VideoMetadata,
}

/// Extracts all frames of a video as image files.
///
/// # Example
///
/// ```no_run
/// use framedump::{ExtractOptions, FrameExtractor, FramedumpError};
///
/// let report = FrameExtractor::new(ExtractOptions::new().with_jpeg_quality(90))
///     .extract("clip.mp4", "frames", "jpg")?;
/// println!("wrote {} frames", report.frames_written);
/// # Ok::<(), FramedumpError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FrameExtractor {
    options: ExtractOptions,
}

impl FrameExtractor {
    /// Create an extractor with the given options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Options this extractor runs with.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract every frame of `input` into `output_dir`.
    ///
    /// `output_dir` is created with its parents if missing. `format` must be
    /// `jpg` or `png` (see [`ImageFormat::parse`]); it is checked when the
    /// first frame is about to be written, so an invalid format still leaves
    /// the folder and the `_imported` copy behind.
    ///
    /// The source and the `_imported` copy are released before returning, on
    /// success and on error.
    ///
    /// # Errors
    ///
    /// - [`FramedumpError::IoError`] if the folder or a frame file cannot be
    ///   written.
    /// - [`FramedumpError::FileOpen`] if `input` is not a readable video.
    /// - [`FramedumpError::InvalidFormat`] if at least one frame decodes and
    ///   `format` is not supported.
    /// - [`FramedumpError::ImageError`] if the image encoder fails.
    pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output_dir: Q,
        format: &str,
    ) -> Result<ExtractionReport, FramedumpError> {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)?;

        let mut source = VideoSource::open(input)?;
        let metadata = source.metadata().clone();
        let name = source.name().clone();

        let sink = if self.options.imported_copy {
            self.create_sink(output_dir, &name, &metadata)
        } else {
            None
        };

        let outcome = self.write_frames(&mut source, output_dir, &name, format);

        drop(source);
        let imported_copy = sink.and_then(|sink| match sink.finish() {
            Ok(path) => Some(path),
            Err(error) => {
                log::warn!("Failed to close imported copy: {error}");
                None
            }
        });

        let frames_written = outcome?;
        log::info!(
            "Extracted {frames_written} frame(s) from {} to {}",
            name.video_name,
            output_dir.display(),
        );

        Ok(ExtractionReport {
            frames_written,
            output_dir: output_dir.to_path_buf(),
            imported_copy,
            metadata,
        })
    }

    /// A sink that cannot be created is skipped, not fatal.
    fn create_sink(
        &self,
        output_dir: &Path,
        name: &SourceName,
        metadata: &VideoMetadata,
    ) -> Option<ImportedVideoSink> {
        let path = output_dir.join(name.imported_file_name());
        match ImportedVideoSink::create(&path, metadata) {
            Ok(sink) => Some(sink),
            Err(error) => {
                log::warn!("Skipping imported copy {}: {error}", path.display());
                None
            }
        }
    }

    fn write_frames(
        &self,
        source: &mut VideoSource,
        output_dir: &Path,
        name: &SourceName,
        format: &str,
    ) -> Result<u64, FramedumpError> {
        let image_format = ImageFormat::parse(format);
        let mut progress = ProgressTracker::new(
            self.options.progress.clone(),
            OperationType::FrameExtraction,
            Some(source.metadata().frame_count),
            self.options.batch_size,
        );

        let mut frame_index: u64 = 0;
        for frame in source.frames()? {
            let frame = match frame {
                Ok(frame) => frame,
                Err(error) => {
                    log::warn!("Stopping after {frame_index} frame(s): {error}");
                    break;
                }
            };

            let image_format =
                image_format.ok_or_else(|| FramedumpError::InvalidFormat(format.to_string()))?;
            let path = output_dir.join(frame_file_name(&name.video_name, frame_index, image_format));
            image_format.write(&frame, &path, self.options.jpeg_quality)?;
            log::trace!("Wrote frame {frame_index} to {}", path.display());

            progress.advance(frame_index);
            frame_index += 1;
        }

        progress.finish();
        Ok(frame_index)
    }
}

/// Extract every frame of `input` into `output_dir` with default options and
/// return the number of frames written.
///
/// See [`FrameExtractor::extract`] for details and errors.
///
/// # Example
///
/// ```no_run
/// let count = framedump::extract("clip.mp4", "frames", "png")?;
/// println!("{count} frames");
/// # Ok::<(), framedump::FramedumpError>(())
/// ```
pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output_dir: Q,
    format: &str,
) -> Result<u64, FramedumpError> {
    FrameExtractor::default()
        .extract(input, output_dir, format)
        .map(|report| report.frames_written)
}
