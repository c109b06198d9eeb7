//! Internal conversion helpers.

use ffmpeg_next::{Rational, frame::Video as VideoFrame};

/// Copy the first plane of a packed RGB24 frame into a tightly-packed buffer.
///
/// FFmpeg pads rows to its own alignment, so the stride is often larger than
/// `width * 3`. The padding is dropped so the result can be handed to
/// [`image::RgbImage::from_raw`].
pub(crate) fn frame_to_rgb_buffer(video_frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let row_len = (width as usize) * 3;
    let data = video_frame.data(0);

    if stride == row_len {
        data[..row_len * (height as usize)].to_vec()
    } else {
        let mut buffer = Vec::with_capacity(row_len * (height as usize));
        for row in data.chunks(stride).take(height as usize) {
            buffer.extend_from_slice(&row[..row_len]);
        }
        buffer
    }
}

/// Convert a frame-rate rational to frames per second.
///
/// Returns `None` for a zero denominator or a non-positive rate, which is how
/// FFmpeg reports an unknown rate.
pub(crate) fn rate_to_frames_per_second(rate: Rational) -> Option<f64> {
    if rate.denominator() == 0 || rate.numerator() <= 0 {
        return None;
    }
    Some(rate.numerator() as f64 / rate.denominator() as f64)
}

/// Estimate the frame count from a duration in microseconds.
pub(crate) fn estimate_frame_count(duration_microseconds: i64, frames_per_second: f64) -> u64 {
    if duration_microseconds <= 0 || frames_per_second <= 0.0 {
        return 0;
    }
    (duration_microseconds as f64 / 1_000_000.0 * frames_per_second).round() as u64
}
