//! Image assets: decoded pixel data plus the encode step used when an asset
//! leaves the composer (downloads, print pipeline input).

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use thiserror::Error;

pub type AssetResult<T> = std::result::Result<T, AssetError>;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("image decode failed: {0}")]
    Decode(#[source] image::ImageError),
    #[error("image encode failed: {0}")]
    Encode(#[source] image::ImageError),
}

/// Output encoding for exported assets. The crop pipeline itself is
/// format-agnostic; this is a pass-through configuration choice. PNG is the
/// default because it preserves crop boundaries losslessly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpeg" | "jpg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub format: ExportFormat,
    pub jpeg_quality: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png,
            jpeg_quality: 90,
        }
    }
}

/// One uploaded or cropped photograph. Pixels are immutable once created;
/// cropping produces a new asset rather than mutating the original.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    id: u64,
    pixels: RgbaImage,
}

impl ImageAsset {
    pub fn new(id: u64, pixels: RgbaImage) -> Self {
        Self { id, pixels }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn native_width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn native_height(&self) -> u32 {
        self.pixels.height()
    }

    /// Encodes the asset as an independent byte blob in the requested
    /// format, suitable for handing to external consumers.
    pub fn encode(&self, options: EncodeOptions) -> AssetResult<Vec<u8>> {
        let mut bytes = Vec::new();
        match options.format {
            ExportFormat::Png => self
                .pixels
                .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
                .map_err(AssetError::Encode)?,
            ExportFormat::Jpeg => {
                // JPEG carries no alpha channel.
                let rgb = DynamicImage::ImageRgba8(self.pixels.clone()).into_rgb8();
                let encoder =
                    JpegEncoder::new_with_quality(&mut bytes, options.jpeg_quality.clamp(1, 100));
                rgb.write_with_encoder(encoder).map_err(AssetError::Encode)?;
            }
        }
        Ok(bytes)
    }
}

/// Decodes uploaded bytes (any format the `image` crate recognizes) into the
/// RGBA pixel form the editor works on.
pub fn decode(bytes: &[u8]) -> AssetResult<RgbaImage> {
    image::load_from_memory(bytes)
        .map(DynamicImage::into_rgba8)
        .map_err(AssetError::Decode)
}
