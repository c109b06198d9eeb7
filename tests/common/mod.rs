//! Fixture generation shared by the integration tests.
//!
//! Videos are encoded on the fly with FFmpeg's MPEG-4 encoder into AVI, so no
//! binary fixtures are checked in. When the encoder is missing the helpers
//! return `None` and the calling test skips.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use ffmpeg_next::{
    Error as FfmpegError, Packet, Rational,
    codec::{Id, context::Context as CodecContext},
    format::Pixel,
    frame::Video as VideoFrame,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};

pub const FRAMES_PER_SECOND: i32 = 25;

/// Write a `frame_count`-frame, `width`×`height` AVI named `file_name` into
/// `directory`. Each frame is a different flat colour.
pub fn write_clip(
    directory: &Path,
    file_name: &str,
    frame_count: u32,
    width: u32,
    height: u32,
) -> Option<PathBuf> {
    let path = directory.join(file_name);
    match encode_clip(&path, frame_count, width, height) {
        Ok(()) => Some(path),
        Err(error) => {
            eprintln!("Skipping: cannot generate fixture video ({error})");
            None
        }
    }
}

/// The 3-frame 10×10 `clip.avi` most tests use.
pub fn three_frame_clip(directory: &Path) -> Option<PathBuf> {
    write_clip(directory, "clip.avi", 3, 10, 10)
}

/// Sorted file names directly inside `directory`.
pub fn file_names(directory: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(directory)
        .expect("read output dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn encode_clip(path: &Path, frame_count: u32, width: u32, height: u32) -> Result<(), FfmpegError> {
    ffmpeg_next::init()?;

    let encoder_time_base = Rational::new(1, FRAMES_PER_SECOND);
    let mut output = ffmpeg_next::format::output(&path)?;
    let codec = ffmpeg_next::encoder::find(Id::MPEG4).ok_or(FfmpegError::EncoderNotFound)?;

    let mut stream = output.add_stream(codec)?;
    let stream_index = stream.index();

    let mut encoder = CodecContext::from_parameters(stream.parameters())?
        .encoder()
        .video()?;
    encoder.set_width(width);
    encoder.set_height(height);
    encoder.set_format(Pixel::YUV420P);
    encoder.set_time_base(encoder_time_base);
    encoder.set_frame_rate(Some(Rational::new(FRAMES_PER_SECOND, 1)));

    let mut encoder = encoder.open_as(codec)?;
    stream.set_parameters(&encoder);
    stream.set_time_base(encoder_time_base);

    output.write_header()?;
    let stream_time_base = output
        .stream(stream_index)
        .map(|stream| stream.time_base())
        .unwrap_or(encoder_time_base);

    let mut scaler = ScalingContext::get(
        Pixel::RGB24,
        width,
        height,
        Pixel::YUV420P,
        width,
        height,
        ScalingFlags::BILINEAR,
    )?;

    let mut packet = Packet::empty();
    for index in 0..frame_count {
        let mut rgb_frame = VideoFrame::new(Pixel::RGB24, width, height);
        let stride = rgb_frame.stride(0);
        let shade = (index * 80 % 256) as u8;
        let data = rgb_frame.data_mut(0);
        for row in 0..height as usize {
            for pixel in data[row * stride..row * stride + width as usize * 3].chunks_mut(3) {
                pixel.copy_from_slice(&[shade, 255 - shade, 128]);
            }
        }

        let mut yuv_frame = VideoFrame::empty();
        scaler.run(&rgb_frame, &mut yuv_frame)?;
        yuv_frame.set_pts(Some(index as i64));
        encoder.send_frame(&yuv_frame)?;

        while encoder.receive_packet(&mut packet).is_ok() {
            packet.set_stream(stream_index);
            packet.rescale_ts(encoder_time_base, stream_time_base);
            packet.write_interleaved(&mut output)?;
        }
    }

    encoder.send_eof()?;
    while encoder.receive_packet(&mut packet).is_ok() {
        packet.set_stream(stream_index);
        packet.rescale_ts(encoder_time_base, stream_time_base);
        packet.write_interleaved(&mut output)?;
    }

    output.write_trailer()?;
    Ok(())
}
