//! Opened video input.
//!
//! [`VideoSource`] owns the FFmpeg demuxer for one input file together with
//! the metadata of its best video stream. It is released when dropped.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
};

use ffmpeg_next::{codec::context::Context as CodecContext, format::context::Input, media::Type};

use crate::{
    conversion::{estimate_frame_count, rate_to_frames_per_second},
    error::FramedumpError,
    iterator::FrameIterator,
    metadata::VideoMetadata,
};

/// Base name and extension of an input file.
///
/// Frame files and the re-encoded copy are named after these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceName {
    /// File name without its final extension (`clip` for `dir/clip.mp4`).
    pub video_name: String,
    /// Final extension including the dot (`.mp4`), or empty if there is none.
    pub video_extension: String,
}

impl SourceName {
    /// Split `path` into base name and extension.
    pub fn from_path(path: &Path) -> Self {
        let video_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let video_extension = path
            .extension()
            .map(|extension| format!(".{}", extension.to_string_lossy()))
            .unwrap_or_default();
        Self {
            video_name,
            video_extension,
        }
    }

    /// File name of the re-encoded copy: `<video_name>_imported<video_extension>`.
    pub fn imported_file_name(&self) -> String {
        format!("{}_imported{}", self.video_name, self.video_extension)
    }
}

/// An opened video file.
///
/// Created via [`VideoSource::open`]. Use [`frames`](VideoSource::frames) to
/// decode frames sequentially.
///
/// # Example
///
/// ```no_run
/// use framedump::{FramedumpError, VideoSource};
///
/// let mut source = VideoSource::open("clip.mp4")?;
/// println!("{}x{}", source.metadata().width, source.metadata().height);
/// for frame in source.frames()? {
///     let frame = frame?;
///     println!("decoded {}x{}", frame.width(), frame.height());
/// }
/// # Ok::<(), FramedumpError>(())
/// ```
pub struct VideoSource {
    pub(crate) input_context: Input,
    pub(crate) metadata: VideoMetadata,
    pub(crate) video_stream_index: usize,
    pub(crate) name: SourceName,
    pub(crate) file_path: PathBuf,
}

impl Debug for VideoSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoSource")
            .field("metadata", &self.metadata)
            .field("video_stream_index", &self.video_stream_index)
            .field("name", &self.name)
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl VideoSource {
    /// Open a video file.
    ///
    /// Initializes FFmpeg (idempotent), opens the container, picks the best
    /// video stream and reads its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`FramedumpError::FileOpen`] if the file is missing or
    /// unreadable, is not a recognised container, has no video stream, or its
    /// video codec has no decoder.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FramedumpError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();
        let open_error = |reason: String| FramedumpError::FileOpen {
            path: file_path.clone(),
            reason,
        };

        log::debug!("Opening video file: {}", file_path.display());

        ffmpeg_next::init()
            .map_err(|error| open_error(format!("FFmpeg initialisation failed: {error}")))?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| open_error(error.to_string()))?;

        let stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or_else(|| open_error("no video stream found".to_string()))?;
        let video_stream_index = stream.index();

        let decoder_context = CodecContext::from_parameters(stream.parameters())
            .map_err(|error| open_error(format!("unreadable video codec parameters: {error}")))?;
        let decoder = decoder_context
            .decoder()
            .video()
            .map_err(|error| open_error(format!("no decoder for video stream: {error}")))?;

        let frames_per_second = rate_to_frames_per_second(stream.avg_frame_rate())
            .or_else(|| rate_to_frames_per_second(stream.rate()))
            .unwrap_or(0.0);

        // Prefer the container's own count; fall back to duration × rate.
        let frame_count = match stream.frames() {
            frames if frames > 0 => frames as u64,
            _ => estimate_frame_count(input_context.duration(), frames_per_second),
        };

        let codec = decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let metadata = VideoMetadata {
            width: decoder.width(),
            height: decoder.height(),
            frames_per_second,
            frame_count,
            codec,
        };

        log::info!(
            "Opened video file: {} (format={}, {}x{}, {:.2} fps, ~{} frames, codec={})",
            file_path.display(),
            input_context.format().name(),
            metadata.width,
            metadata.height,
            metadata.frames_per_second,
            metadata.frame_count,
            metadata.codec,
        );

        Ok(Self {
            input_context,
            metadata,
            video_stream_index,
            name: SourceName::from_path(path),
            file_path,
        })
    }

    /// Metadata of the video stream, read at open time.
    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    /// Base name and extension of the input file.
    pub fn name(&self) -> &SourceName {
        &self.name
    }

    /// Path the source was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Decode frames in order, from the current position to the end of the
    /// stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the decoder or the RGB converter cannot be created.
    pub fn frames(&mut self) -> Result<FrameIterator<'_>, FramedumpError> {
        FrameIterator::new(self)
    }
}
