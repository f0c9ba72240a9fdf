//! Codec backend trait and shared error type.
//!
//! The [`ImageBackend`] trait is the seam between the thumbnail pipeline and
//! the pixel codecs. Every backend supplies four capabilities: a bounds-only
//! probe, a decode at a given sample factor, a raw EXIF orientation read,
//! and a lossless save.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`,
//! `jpeg-decoder` and `kamadak-exif` crates.

use super::buffer::PixelBuffer;
use super::params::{Dimensions, Quality, SampleFactor};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Metadata read failed: {0}")]
    Metadata(String),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Trait for codec backends.
///
/// Implementations hold no per-call state; the pipeline in
/// [`operations`](super::operations) owns sequencing and buffer lifetimes.
pub trait ImageBackend: Sync {
    /// Read image dimensions without decoding pixel data.
    fn probe_bounds(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode at `1 / factor` linear resolution.
    fn decode_sampled(&self, path: &Path, factor: SampleFactor)
    -> Result<PixelBuffer, BackendError>;

    /// Raw EXIF orientation tag value, `None` when the file carries none.
    fn read_orientation_tag(&self, path: &Path) -> Result<Option<u32>, BackendError>;

    /// Encode `buffer` losslessly to `path`. Takes ownership; the buffer is
    /// freed when the call returns.
    fn save(&self, buffer: PixelBuffer, path: &Path, quality: Quality)
    -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::calculations::sampled_dimensions;
    use image::{DynamicImage, Rgb, RgbImage};
    use std::sync::Mutex;

    /// Mock backend that records operations and fabricates pixel data.
    ///
    /// Decoding produces a gradient at the sampled size so rotation and
    /// save steps see real buffers. Uses Mutex (not RefCell) so it is Sync.
    #[derive(Default)]
    pub struct MockBackend {
        pub dimensions: Option<Dimensions>,
        pub orientation: Mutex<Option<Result<Option<u32>, BackendError>>>,
        pub fail_decode: bool,
        pub fail_save: bool,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        ProbeBounds(String),
        DecodeSampled {
            source: String,
            factor: u32,
        },
        ReadOrientation(String),
        Save {
            output: String,
            width: u32,
            height: u32,
            quality: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
            self.dimensions = Some(Dimensions::new(width, height));
            self
        }

        pub fn with_orientation(self, result: Result<Option<u32>, BackendError>) -> Self {
            *self.orientation.lock().unwrap() = Some(result);
            self
        }

        pub fn failing_decode(mut self) -> Self {
            self.fail_decode = true;
            self
        }

        pub fn failing_save(mut self) -> Self {
            self.fail_save = true;
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        fn record(&self, op: RecordedOp) {
            self.operations.lock().unwrap().push(op);
        }
    }

    impl ImageBackend for MockBackend {
        fn probe_bounds(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.record(RecordedOp::ProbeBounds(path.to_string_lossy().to_string()));
            self.dimensions
                .ok_or_else(|| BackendError::Decode("No mock dimensions".to_string()))
        }

        fn decode_sampled(
            &self,
            path: &Path,
            factor: SampleFactor,
        ) -> Result<PixelBuffer, BackendError> {
            self.record(RecordedOp::DecodeSampled {
                source: path.to_string_lossy().to_string(),
                factor: factor.value(),
            });
            if self.fail_decode {
                return Err(BackendError::Decode("mock decode failure".to_string()));
            }
            let dims = self
                .dimensions
                .map(|d| sampled_dimensions(d, factor))
                .ok_or_else(|| BackendError::Decode("No mock dimensions".to_string()))?;
            let img = RgbImage::from_fn(dims.width, dims.height, |x, y| {
                Rgb([(x % 256) as u8, (y % 256) as u8, 0])
            });
            Ok(PixelBuffer::new(DynamicImage::ImageRgb8(img)))
        }

        fn read_orientation_tag(&self, path: &Path) -> Result<Option<u32>, BackendError> {
            self.record(RecordedOp::ReadOrientation(
                path.to_string_lossy().to_string(),
            ));
            self.orientation.lock().unwrap().take().unwrap_or(Ok(None))
        }

        fn save(
            &self,
            buffer: PixelBuffer,
            path: &Path,
            quality: Quality,
        ) -> Result<(), BackendError> {
            self.record(RecordedOp::Save {
                output: path.to_string_lossy().to_string(),
                width: buffer.width(),
                height: buffer.height(),
                quality: quality.value(),
            });
            if self.fail_save {
                return Err(BackendError::Encode("disk full".to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn mock_records_probe() {
        let backend = MockBackend::new().with_dimensions(800, 600);

        let dims = backend.probe_bounds(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(dims, Dimensions::new(800, 600));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::ProbeBounds(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_decode_produces_sampled_buffer() {
        let backend = MockBackend::new().with_dimensions(400, 300);

        let buffer = backend
            .decode_sampled(Path::new("/source.jpg"), SampleFactor::new(4).unwrap())
            .unwrap();
        assert_eq!(buffer.dimensions(), Dimensions::new(100, 75));

        assert!(matches!(
            &backend.get_operations()[0],
            RecordedOp::DecodeSampled { factor: 4, .. }
        ));
    }

    #[test]
    fn mock_probe_without_dimensions_fails() {
        let backend = MockBackend::new();
        assert!(matches!(
            backend.probe_bounds(Path::new("/x.jpg")),
            Err(BackendError::Decode(_))
        ));
    }

    #[test]
    fn mock_records_save() {
        let backend = MockBackend::new().with_dimensions(10, 20);
        let buffer = backend
            .decode_sampled(Path::new("/s.jpg"), SampleFactor::ONE)
            .unwrap();

        backend
            .save(buffer, Path::new("/out.png"), Quality::new(80))
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(
            ops[1],
            RecordedOp::Save {
                output: "/out.png".to_string(),
                width: 10,
                height: 20,
                quality: 80,
            }
        );
    }

    #[test]
    fn backend_error_display() {
        let err = BackendError::Decode("bad huffman table".to_string());
        assert_eq!(err.to_string(), "Decode failed: bad huffman table");
    }
}
