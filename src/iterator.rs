//! Lazy, pull-based sequential frame decoding.
//!
//! [`FrameIterator`] reads and decodes just enough packets to produce the next
//! frame on each call to [`next()`](Iterator::next). Frames come out in decode
//! order as RGB8 [`DynamicImage`]s, each at the resolution of its own frame.
//!
//! Created via [`VideoSource::frames`](crate::VideoSource::frames).

use ffmpeg_next::{
    Error as FfmpegError, Packet,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::Pixel,
    frame::Video as VideoFrame,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::{DynamicImage, RgbImage};

use crate::{error::FramedumpError, source::VideoSource};

/// A lazy iterator over decoded video frames.
///
/// Borrows the [`VideoSource`] mutably for its whole lifetime. After the
/// first error it yields `None`.
pub struct FrameIterator<'a> {
    source: &'a mut VideoSource,
    decoder: VideoDecoder,
    scaler: ScalingContext,
    decoded_frame: VideoFrame,
    rgb_frame: VideoFrame,
    eof_sent: bool,
    done: bool,
}

impl<'a> FrameIterator<'a> {
    pub(crate) fn new(source: &'a mut VideoSource) -> Result<Self, FramedumpError> {
        let stream = source
            .input_context
            .stream(source.video_stream_index)
            .ok_or_else(|| {
                FramedumpError::VideoDecodeError("video stream disappeared".to_string())
            })?;
        let decoder_context = CodecContext::from_parameters(stream.parameters())?;
        let decoder = decoder_context.decoder().video()?;

        let scaler = rgb_scaler(decoder.format(), decoder.width(), decoder.height())?;

        Ok(Self {
            source,
            decoder,
            scaler,
            decoded_frame: VideoFrame::empty(),
            rgb_frame: VideoFrame::empty(),
            eof_sent: false,
            done: false,
        })
    }

    fn convert_current_frame(&mut self) -> Result<DynamicImage, FramedumpError> {
        convert_to_rgb(&mut self.scaler, &self.decoded_frame, &mut self.rgb_frame)
    }

    fn fail(
        &mut self,
        error: impl Into<FramedumpError>,
    ) -> Option<Result<DynamicImage, FramedumpError>> {
        self.done = true;
        Some(Err(error.into()))
    }
}

fn rgb_scaler(format: Pixel, width: u32, height: u32) -> Result<ScalingContext, FramedumpError> {
    Ok(ScalingContext::get(
        format,
        width,
        height,
        Pixel::RGB24,
        width,
        height,
        ScalingFlags::BILINEAR,
    )?)
}

/// Convert a decoded frame to RGB8 at its own resolution.
///
/// Streams may change resolution or pixel format mid-way; the scaler is
/// rebuilt whenever the frame no longer matches its input definition.
fn convert_to_rgb(
    scaler: &mut ScalingContext,
    decoded_frame: &VideoFrame,
    rgb_frame: &mut VideoFrame,
) -> Result<DynamicImage, FramedumpError> {
    let (format, width, height) = (
        decoded_frame.format(),
        decoded_frame.width(),
        decoded_frame.height(),
    );
    let input = scaler.input();
    if input.format != format || input.width != width || input.height != height {
        log::debug!("Frame definition changed to {width}x{height} {format:?}, rebuilding scaler");
        *scaler = rgb_scaler(format, width, height)?;
        *rgb_frame = VideoFrame::empty();
    }

    scaler.run(decoded_frame, rgb_frame)?;

    let buffer = crate::conversion::frame_to_rgb_buffer(rgb_frame, width, height);
    let image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
        FramedumpError::VideoDecodeError(
            "Failed to construct RGB image from decoded frame data".to_string(),
        )
    })?;
    Ok(DynamicImage::ImageRgb8(image))
}

impl Iterator for FrameIterator<'_> {
    type Item = Result<DynamicImage, FramedumpError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            if self.decoder.receive_frame(&mut self.decoded_frame).is_ok() {
                return match self.convert_current_frame() {
                    Ok(image) => Some(Ok(image)),
                    Err(error) => self.fail(error),
                };
            }

            if self.eof_sent {
                self.done = true;
                return None;
            }

            let mut packet = Packet::empty();
            match packet.read(&mut self.source.input_context) {
                Ok(()) => {
                    if packet.stream() == self.source.video_stream_index {
                        if let Err(error) = self.decoder.send_packet(&packet) {
                            return self.fail(error);
                        }
                    }
                }
                Err(FfmpegError::Eof) => {
                    if let Err(error) = self.decoder.send_eof() {
                        return self.fail(error);
                    }
                    self.eof_sent = true;
                }
                Err(error) => return self.fail(error),
            }
        }
    }
}
