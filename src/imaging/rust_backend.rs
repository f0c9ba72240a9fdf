//! Pure Rust codec backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Bounds probe | `image::ImageReader::into_dimensions` (header only) |
//! | Sampled decode (JPEG) | `jpeg-decoder` scaled IDCT (1/2, 1/4, 1/8) |
//! | Sampled decode (other) | `image` full decode + `resize_exact` (Triangle) |
//! | Orientation tag | `kamadak-exif` (`exif::Reader::read_from_container`) |
//! | Save | `image::codecs::png::PngEncoder` |
//!
//! JPEG is the format photos arrive in, and the only one whose decoder can
//! skip the full-resolution raster. Everything else is decoded at full size
//! and reduced immediately, so the full raster lives only inside
//! [`decode_full`].

use super::backend::{BackendError, ImageBackend};
use super::buffer::PixelBuffer;
use super::calculations::sampled_dimensions;
use super::params::{Dimensions, Quality, SampleFactor};
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, ImageFormat, ImageReader, RgbImage};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::LazyLock;

/// Extensions whose decoders are compiled in.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
    ("gif", ImageFormat::Gif),
    ("bmp", ImageFormat::Bmp),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn open_reader(path: &Path) -> Result<ImageReader<BufReader<File>>, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)
}

fn decode_error(path: &Path, e: impl std::fmt::Display) -> BackendError {
    BackendError::Decode(format!("Failed to decode {}: {}", path.display(), e))
}

/// Decode a JPEG straight to the sampled size with the scaled IDCT.
///
/// Returns `Ok(None)` when the pixel format has no direct mapping (CMYK,
/// 16-bit grey) so the caller can fall back to the generic path.
fn decode_jpeg_scaled(
    path: &Path,
    factor: SampleFactor,
) -> Result<Option<DynamicImage>, BackendError> {
    let file = File::open(path).map_err(BackendError::Io)?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
    decoder.read_info().map_err(|e| decode_error(path, e))?;
    let info = decoder
        .info()
        .ok_or_else(|| decode_error(path, "missing JPEG header"))?;

    let full = Dimensions::new(u32::from(info.width), u32::from(info.height));
    let target = sampled_dimensions(full, factor);
    // target <= full, and JPEG sides fit in u16
    let requested_w = u16::try_from(target.width).unwrap_or(u16::MAX);
    let requested_h = u16::try_from(target.height).unwrap_or(u16::MAX);
    let (out_w, out_h) = decoder
        .scale(requested_w, requested_h)
        .map_err(|e| decode_error(path, e))?;

    let pixels = decoder.decode().map_err(|e| decode_error(path, e))?;
    let info = decoder
        .info()
        .ok_or_else(|| decode_error(path, "missing JPEG output info"))?;
    let (w, h) = (u32::from(out_w), u32::from(out_h));

    let img = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => RgbImage::from_raw(w, h, pixels)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(|| decode_error(path, "JPEG RGB buffer size mismatch"))?,
        jpeg_decoder::PixelFormat::L8 => GrayImage::from_raw(w, h, pixels)
            .map(DynamicImage::ImageLuma8)
            .ok_or_else(|| decode_error(path, "JPEG L8 buffer size mismatch"))?,
        other => {
            log::debug!(
                "{}: scaled decode does not handle {:?}, using full decode",
                path.display(),
                other
            );
            return Ok(None);
        }
    };

    log::debug!(
        "{}: scaled JPEG decode {} → {}x{} (factor {})",
        path.display(),
        full,
        w,
        h,
        factor
    );

    // The IDCT stops at 1/8; anything beyond is finished with a resample.
    if (w, h) != (target.width, target.height) {
        return Ok(Some(img.resize_exact(
            target.width,
            target.height,
            FilterType::Triangle,
        )));
    }
    Ok(Some(img))
}

/// Decode at full resolution, then reduce to the sampled size.
fn decode_full(path: &Path, factor: SampleFactor) -> Result<DynamicImage, BackendError> {
    let img = open_reader(path)?
        .decode()
        .map_err(|e| decode_error(path, e))?;
    if factor == SampleFactor::ONE {
        return Ok(img);
    }
    let full = Dimensions::new(img.width(), img.height());
    let target = sampled_dimensions(full, factor);
    log::debug!(
        "{}: full decode {} reduced to {} (factor {})",
        path.display(),
        full,
        target,
        factor
    );
    Ok(img.resize_exact(target.width, target.height, FilterType::Triangle))
}

/// Float rasters have no PNG representation; narrow them to 16-bit.
fn png_compatible(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            DynamicImage::ImageRgba16(img.to_rgba16())
        }
        other => other,
    }
}

impl ImageBackend for RustBackend {
    fn probe_bounds(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = open_reader(path)?.into_dimensions().map_err(|e| {
            BackendError::Decode(format!(
                "Failed to read dimensions of {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Dimensions { width, height })
    }

    fn decode_sampled(
        &self,
        path: &Path,
        factor: SampleFactor,
    ) -> Result<PixelBuffer, BackendError> {
        if open_reader(path)?.format() == Some(ImageFormat::Jpeg) {
            if let Some(img) = decode_jpeg_scaled(path, factor)? {
                return Ok(PixelBuffer::new(img));
            }
        }
        decode_full(path, factor).map(PixelBuffer::new)
    }

    fn read_orientation_tag(&self, path: &Path) -> Result<Option<u32>, BackendError> {
        let file = File::open(path).map_err(BackendError::Io)?;
        let mut reader = BufReader::new(file);
        let exif = match exif::Reader::new().read_from_container(&mut reader) {
            Ok(exif) => exif,
            Err(exif::Error::NotFound(_)) => return Ok(None),
            Err(e) => {
                return Err(BackendError::Metadata(format!(
                    "{}: {}",
                    path.display(),
                    e
                )));
            }
        };
        Ok(exif
            .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|field| field.value.get_uint(0)))
    }

    fn save(&self, buffer: PixelBuffer, path: &Path, quality: Quality) -> Result<(), BackendError> {
        log::debug!(
            "Writing {}x{} PNG to {} (quality {} has no effect on lossless output)",
            buffer.width(),
            buffer.height(),
            path.display(),
            quality.value()
        );
        let img = png_compatible(buffer.into_image());

        let file = File::create(path).map_err(BackendError::Io)?;
        let mut writer = BufWriter::new(file);
        let encoder =
            PngEncoder::new_with_quality(&mut writer, CompressionType::Default, PngFilter::Adaptive);
        img.write_with_encoder(encoder)
            .map_err(|e| BackendError::Encode(format!("PNG encode failed: {}", e)))?;
        writer.flush().map_err(BackendError::Io)
    }
}
