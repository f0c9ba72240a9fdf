//! Thumbnail imaging in pure Rust, with no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Probe** | `image::ImageReader::into_dimensions` |
//! | **Orientation** | `kamadak-exif`, reduced to four rotations |
//! | **Sampled decode** | `jpeg-decoder` scaled IDCT, else `image` + resample |
//! | **Rotate** | `image::DynamicImage::rotate90/180/270` |
//! | **Save** | PNG via `image::codecs::png` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for sample factor and size math (unit testable)
//! - **Parameters**: Data structures describing a thumbnail request
//! - **Orientation / Buffer / Rotate**: The in-memory half of the pipeline
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions sequencing the backend and owning buffers

pub mod backend;
mod buffer;
mod calculations;
pub mod operations;
mod orientation;
mod params;
mod rotate;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use buffer::PixelBuffer;
pub use calculations::{calculate_sample_size, oriented_dimensions, sampled_dimensions};
pub use operations::{
    ThumbnailError, ThumbnailOutcome, ThumbnailPlan, create_thumbnail, decode_sampled_image,
    plan_thumbnail, probe_dimensions, save_image, try_save_image,
};
pub use orientation::{Orientation, read_rotation};
pub use params::{Dimensions, Quality, RequestedBounds, SampleFactor, SaveMode, ThumbnailRequest};
pub use rotate::rotate;
pub use rust_backend::{RustBackend, supported_input_extensions};
