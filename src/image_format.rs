//! Output image formats for extracted frames.
//!
//! Frames are written either as JPEG (lossy) or PNG (lossless). The set is
//! closed; anything else is rejected with
//! [`FramedumpError::InvalidFormat`](crate::FramedumpError::InvalidFormat).

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    str::FromStr,
};

use image::{
    DynamicImage,
    codecs::{
        jpeg::JpegEncoder,
        png::{CompressionType, FilterType, PngEncoder},
    },
};

use crate::error::FramedumpError;

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Image format of the extracted frame files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// JPEG, lossy. Written with the `.jpg` extension.
    Jpg,
    /// PNG, lossless.
    Png,
}

impl ImageFormat {
    /// Parse a user-supplied format name.
    ///
    /// Case-insensitive; a leading dot is ignored and `jpeg` is accepted for
    /// `jpg`. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    /// File extension used for frames in this format, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpg => "jpg",
            ImageFormat::Png => "png",
        }
    }

    /// Encode `image` in this format and write it to `path`, replacing any
    /// existing file.
    ///
    /// `jpeg_quality` is ignored for PNG.
    pub fn write(
        self,
        image: &DynamicImage,
        path: &Path,
        jpeg_quality: u8,
    ) -> Result<(), FramedumpError> {
        let mut writer = BufWriter::new(File::create(path)?);
        match self {
            ImageFormat::Jpg => {
                let encoder = JpegEncoder::new_with_quality(&mut writer, jpeg_quality);
                image.write_with_encoder(encoder)?;
            }
            ImageFormat::Png => {
                let encoder = PngEncoder::new_with_quality(
                    &mut writer,
                    CompressionType::Fast,
                    FilterType::Adaptive,
                );
                image.write_with_encoder(encoder)?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = FramedumpError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ImageFormat::parse(value).ok_or_else(|| FramedumpError::InvalidFormat(value.to_string()))
    }
}

/// Name of the file holding frame `frame_index` of `video_name`.
///
/// `clip` + `7` + [`ImageFormat::Png`] gives `clip_7.png`.
pub fn frame_file_name(video_name: &str, frame_index: u64, format: ImageFormat) -> String {
    format!("{video_name}_{frame_index}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use image::{ImageReader, Rgb, RgbImage};

    use super::*;

    #[test]
    fn parse_format_aliases() {
        assert_eq!(ImageFormat::parse("jpg"), Some(ImageFormat::Jpg));
        assert_eq!(ImageFormat::parse("JPEG"), Some(ImageFormat::Jpg));
        assert_eq!(ImageFormat::parse(".png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::parse("gif"), None);
        assert_eq!(ImageFormat::parse(""), None);
    }

    #[test]
    fn from_str_reports_the_rejected_value() {
        let error = "bmp".parse::<ImageFormat>().unwrap_err();
        assert!(matches!(error, FramedumpError::InvalidFormat(ref value) if value == "bmp"));
    }

    #[test]
    fn frame_names_are_zero_based_and_unpadded() {
        assert_eq!(frame_file_name("clip", 0, ImageFormat::Jpg), "clip_0.jpg");
        assert_eq!(frame_file_name("clip", 12, ImageFormat::Png), "clip_12.png");
        assert_eq!(frame_file_name("my.clip", 1, ImageFormat::Png), "my.clip_1.png");
    }

    #[test]
    fn png_is_lossless() {
        let directory = tempfile::tempdir().expect("temp dir");
        let path = directory.path().join("frame.png");
        let source = DynamicImage::ImageRgb8(RgbImage::from_fn(4, 4, |x, y| {
            Rgb([(x * 60) as u8, (y * 60) as u8, 7])
        }));

        ImageFormat::Png.write(&source, &path, DEFAULT_JPEG_QUALITY).unwrap();

        let decoded = ImageReader::open(&path).unwrap().decode().unwrap();
        assert_eq!(decoded.to_rgb8(), source.to_rgb8());
    }

    #[test]
    fn jpg_writes_jpeg_data() {
        let directory = tempfile::tempdir().expect("temp dir");
        let path = directory.path().join("frame.jpg");
        let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([200, 10, 10])));

        ImageFormat::Jpg.write(&source, &path, 80).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
    }

    #[test]
    fn write_into_missing_directory_is_an_io_error() {
        let directory = tempfile::tempdir().expect("temp dir");
        let path = directory.path().join("missing").join("frame.png");
        let source = DynamicImage::ImageRgb8(RgbImage::new(2, 2));

        let error = ImageFormat::Png.write(&source, &path, DEFAULT_JPEG_QUALITY).unwrap_err();
        assert!(matches!(error, FramedumpError::IoError(_)));
    }
}
