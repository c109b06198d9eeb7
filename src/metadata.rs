//! Video stream metadata.
//!
//! Read once when a [`VideoSource`](crate::VideoSource) is opened and cached
//! for the lifetime of the handle.

/// Metadata for the decoded video stream.
///
/// `frame_count` is only a hint: some containers report it exactly, for the
/// rest it is estimated from duration and frame rate. The number of frames
/// actually decoded may be larger or smaller.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second (approximate for variable-frame-rate content).
    pub frames_per_second: f64,
    /// Reported or estimated total number of frames.
    pub frame_count: u64,
    /// Codec name (e.g. `"h264"`, `"mpeg4"`).
    pub codec: String,
}

impl VideoMetadata {
    /// Frame rate truncated to a whole number, never below 1.
    ///
    /// Used as the time base of the re-encoded copy, so 29.97 fps becomes 29.
    pub fn whole_frames_per_second(&self) -> i32 {
        let whole = self.frames_per_second.trunc();
        if whole.is_finite() && whole >= 1.0 {
            whole.min(i32::MAX as f64) as i32
        } else {
            1
        }
    }
}
