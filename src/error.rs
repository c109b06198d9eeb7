//! Error types for the `framedump` crate.
//!
//! [`FramedumpError`] is returned by every fallible operation. Variants carry
//! the path or the offending value so the binary can print them as-is.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `framedump` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FramedumpError {
    /// The input could not be opened as a video.
    ///
    /// Covers missing files, unreadable files, unrecognised containers and
    /// containers without a video stream.
    #[error("Failed to open video file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::VideoSource::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The requested image format is not `jpg` or `png`.
    #[error("Invalid output format '{0}'. Only 'jpg' and 'png' are supported.")]
    InvalidFormat(String),

    /// A video frame could not be decoded or converted to RGB.
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// The re-encoded copy of the video could not be set up or finalised.
    #[error("Video encoding error: {0}")]
    VideoEncodeError(String),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while creating the output folder or writing a frame.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// The image encoder rejected a frame.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}

impl From<FfmpegError> for FramedumpError {
    fn from(error: FfmpegError) -> Self {
        FramedumpError::FfmpegError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;

    use super::*;

    #[test]
    fn invalid_format_message_names_supported_formats() {
        let message = FramedumpError::InvalidFormat("gif".to_string()).to_string();
        assert!(message.contains("'gif'"));
        assert!(message.contains("'jpg'") && message.contains("'png'"));
    }

    #[test]
    fn io_errors_convert() {
        let error: FramedumpError = IoError::new(ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(error, FramedumpError::IoError(_)));
    }

    #[test]
    fn ffmpeg_errors_convert() {
        let error: FramedumpError = FfmpegError::Eof.into();
        assert!(matches!(error, FramedumpError::FfmpegError(_)));
    }
}
