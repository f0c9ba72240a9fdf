//! Shared test utilities for the sampled-thumbs test suite.
//!
//! Fixture images are generated on the fly into a temp directory rather than
//! checked in, so every test states the exact size and orientation it needs.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let photo = write_jpeg_with_orientation(tmp.path(), "portrait.jpg", 64, 32, 6);
//! ```

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgb, RgbImage};
use std::path::{Path, PathBuf};

// =========================================================================
// Pixel content
// =========================================================================

/// A gradient that differs along both axes, so rotations are observable.
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    })
}

// =========================================================================
// Fixture writers
// =========================================================================

/// Write a gradient PNG and return its path.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    DynamicImage::ImageRgb8(gradient(width, height))
        .save_with_format(&path, image::ImageFormat::Png)
        .unwrap();
    path
}

/// Write a gradient JPEG without EXIF and return its path.
pub fn write_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, encode_jpeg(width, height)).unwrap();
    path
}

/// Write a gradient JPEG carrying an EXIF orientation tag and return its path.
pub fn write_jpeg_with_orientation(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    orientation: u16,
) -> PathBuf {
    let segment = app1_segment(&exif_orientation_payload(orientation));
    write_jpeg_with_segment(dir, name, width, height, &segment)
}

/// Write a gradient JPEG whose EXIF block has a broken TIFF header.
pub fn write_jpeg_with_corrupt_exif(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let segment = app1_segment(b"Exif\0\0ZZ\0\x2a\xde\xad\xbe\xef");
    write_jpeg_with_segment(dir, name, width, height, &segment)
}

fn write_jpeg_with_segment(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    segment: &[u8],
) -> PathBuf {
    let jpeg = encode_jpeg(width, height);
    let mut bytes = Vec::with_capacity(jpeg.len() + segment.len());
    // SOI, then the extra segment, then the rest of the encoder output
    bytes.extend_from_slice(&jpeg[..2]);
    bytes.extend_from_slice(segment);
    bytes.extend_from_slice(&jpeg[2..]);

    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn encode_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, 95);
    DynamicImage::ImageRgb8(gradient(width, height))
        .write_with_encoder(encoder)
        .unwrap();
    bytes
}

/// EXIF payload: big-endian TIFF header and a one-entry IFD0.
fn exif_orientation_payload(orientation: u16) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(b"Exif\0\0");
    payload.extend_from_slice(b"MM\0\x2a");
    payload.extend_from_slice(&8u32.to_be_bytes()); // IFD0 offset
    payload.extend_from_slice(&1u16.to_be_bytes()); // entry count
    payload.extend_from_slice(&0x0112u16.to_be_bytes()); // Orientation
    payload.extend_from_slice(&3u16.to_be_bytes()); // SHORT
    payload.extend_from_slice(&1u32.to_be_bytes()); // count
    payload.extend_from_slice(&orientation.to_be_bytes());
    payload.extend_from_slice(&[0, 0]);
    payload.extend_from_slice(&0u32.to_be_bytes()); // no IFD1
    payload
}

fn app1_segment(payload: &[u8]) -> Vec<u8> {
    let mut segment = vec![0xFF, 0xE1];
    segment.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    segment.extend_from_slice(payload);
    segment
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn exif_segment_length_field_matches() {
        let seg = app1_segment(&exif_orientation_payload(6));
        let declared = u16::from_be_bytes([seg[2], seg[3]]) as usize;
        assert_eq!(declared + 2, seg.len());
    }

    #[test]
    fn oriented_jpeg_still_decodes() {
        let tmp = TempDir::new().unwrap();
        let path = write_jpeg_with_orientation(tmp.path(), "x.jpg", 20, 10, 8);
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (20, 10));
    }
}
