//! The `_imported` copy of the input video.
//!
//! Every extraction leaves `<name>_imported<ext>` next to the frames: a
//! container set up for MPEG-4 Part 2 (XVID) at the source frame rate and
//! dimensions. No frames are ever written to it, so on disk it is a valid but
//! empty video. The container format is guessed from the extension.

use std::path::{Path, PathBuf};

use ffmpeg_next::{
    Rational,
    codec::{Id, context::Context as CodecContext},
    format::{Flags as FormatFlags, Pixel, context::Output},
};

use crate::{error::FramedumpError, metadata::VideoMetadata};

/// An open, header-written video container that receives no frames.
///
/// Call [`finish`](ImportedVideoSink::finish) to write the trailer and close
/// the file. Dropping it without `finish` closes the file without a trailer.
pub struct ImportedVideoSink {
    output: Output,
    path: PathBuf,
}

impl ImportedVideoSink {
    /// Create the container at `path` and write its header.
    ///
    /// # Errors
    ///
    /// Returns [`FramedumpError::VideoEncodeError`] if the extension maps to
    /// no known container, the MPEG-4 encoder is unavailable, or the encoder
    /// rejects the source dimensions or frame rate.
    pub fn create(path: &Path, metadata: &VideoMetadata) -> Result<Self, FramedumpError> {
        let frames_per_second = metadata.whole_frames_per_second();
        log::debug!(
            "Creating imported copy {} ({}x{}, {} fps, mpeg4)",
            path.display(),
            metadata.width,
            metadata.height,
            frames_per_second,
        );

        let mut output = ffmpeg_next::format::output(&path)
            .map_err(|e| FramedumpError::VideoEncodeError(format!("cannot open output: {e}")))?;

        let needs_global_header = output.format().flags().contains(FormatFlags::GLOBAL_HEADER);

        let codec = ffmpeg_next::encoder::find(Id::MPEG4).ok_or_else(|| {
            FramedumpError::VideoEncodeError("codec MPEG4 not available".to_string())
        })?;

        let mut stream = output
            .add_stream(codec)
            .map_err(|e| FramedumpError::VideoEncodeError(format!("cannot add stream: {e}")))?;

        let mut encoder = CodecContext::from_parameters(stream.parameters())
            .and_then(|context| context.encoder().video())
            .map_err(|e| {
                FramedumpError::VideoEncodeError(format!("cannot create codec context: {e}"))
            })?;

        let time_base = Rational::new(1, frames_per_second);
        encoder.set_width(metadata.width);
        encoder.set_height(metadata.height);
        encoder.set_format(Pixel::YUV420P);
        encoder.set_time_base(time_base);
        encoder.set_frame_rate(Some(Rational::new(frames_per_second, 1)));

        if needs_global_header {
            unsafe {
                (*encoder.as_mut_ptr()).flags |=
                    ffmpeg_sys_next::AV_CODEC_FLAG_GLOBAL_HEADER as i32;
            }
        }

        let opened_encoder = encoder
            .open_as(codec)
            .map_err(|e| FramedumpError::VideoEncodeError(format!("cannot open encoder: {e}")))?;

        stream.set_parameters(&opened_encoder);
        stream.set_time_base(time_base);

        output
            .write_header()
            .map_err(|e| FramedumpError::VideoEncodeError(format!("cannot write header: {e}")))?;

        Ok(Self {
            output,
            path: path.to_path_buf(),
        })
    }

    /// Path of the container file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the trailer and close the file.
    pub fn finish(mut self) -> Result<PathBuf, FramedumpError> {
        self.output
            .write_trailer()
            .map_err(|e| FramedumpError::VideoEncodeError(format!("cannot write trailer: {e}")))?;
        log::debug!("Closed imported copy {}", self.path.display());
        Ok(self.path)
    }
}
