//! High-level thumbnail operations.
//!
//! These functions combine the pure calculations with backend execution and
//! own every [`PixelBuffer`] from decode to save. Buffers move from the
//! decoder to the rotator to the encoder; whichever step fails, the buffer
//! in hand is dropped on the way out and nothing is left allocated.

use super::backend::{BackendError, ImageBackend};
use super::buffer::PixelBuffer;
use super::calculations::{calculate_sample_size, oriented_dimensions, sampled_dimensions};
use super::orientation::{Orientation, read_rotation};
use super::params::{
    Dimensions, Quality, RequestedBounds, SampleFactor, SaveMode, ThumbnailRequest,
};
use super::rotate::rotate;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error("Failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
}

/// Result type for thumbnail operations.
pub type Result<T> = std::result::Result<T, ThumbnailError>;

/// What a completed [`create_thumbnail`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailOutcome {
    pub source: Dimensions,
    pub factor: SampleFactor,
    pub orientation: Orientation,
    /// Size of the buffer handed to the encoder.
    pub output: Dimensions,
    /// False only in [`SaveMode::Lenient`] when the write failed.
    pub saved: bool,
}

/// Sizing decisions for a source, computed without decoding pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailPlan {
    pub source: Dimensions,
    pub orientation: Orientation,
    pub factor: SampleFactor,
    pub decoded: Dimensions,
    pub output: Dimensions,
}

/// Read image dimensions through the backend's bounds-only probe.
pub fn probe_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<Dimensions> {
    backend
        .probe_bounds(path)
        .map_err(|source| ThumbnailError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// A decoded buffer together with how it was sized.
struct SampledDecode {
    buffer: PixelBuffer,
    source: Dimensions,
    factor: SampleFactor,
}

fn decode_sampled(
    backend: &impl ImageBackend,
    path: &Path,
    bounds: RequestedBounds,
) -> Result<SampledDecode> {
    let source = probe_dimensions(backend, path)?;
    let factor = calculate_sample_size(source, bounds);
    log::debug!(
        "{}: {} into {}x{} → decode at {}",
        path.display(),
        source,
        bounds.max_width,
        bounds.max_height,
        factor
    );

    let buffer = backend
        .decode_sampled(path, factor)
        .map_err(|source| ThumbnailError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(SampledDecode {
        buffer,
        source,
        factor,
    })
}

/// Decode `path` at the smallest power-of-two reduction that still covers `bounds`.
///
/// Probes the dimensions first (no pixel allocation), computes the sample
/// factor, then decodes once at that factor. Probe and decode failures are
/// both reported as [`ThumbnailError::Decode`].
pub fn decode_sampled_image(
    backend: &impl ImageBackend,
    path: &Path,
    bounds: RequestedBounds,
) -> Result<PixelBuffer> {
    decode_sampled(backend, path, bounds).map(|decoded| decoded.buffer)
}

/// Encode `buffer` to `destination`, returning any failure.
pub fn try_save_image(
    backend: &impl ImageBackend,
    buffer: PixelBuffer,
    destination: &Path,
    quality: Quality,
) -> Result<()> {
    backend
        .save(buffer, destination, quality)
        .map_err(|source| ThumbnailError::Save {
            path: destination.to_path_buf(),
            source,
        })
}

/// Encode `buffer` to `destination`, logging and discarding any failure.
///
/// Callers cannot tell a failed write from a successful one; use
/// [`try_save_image`] when the file has to exist afterwards.
pub fn save_image(
    backend: &impl ImageBackend,
    buffer: PixelBuffer,
    destination: &Path,
    quality: Quality,
) {
    save_logging_failure(backend, buffer, destination, quality);
}

fn save_logging_failure(
    backend: &impl ImageBackend,
    buffer: PixelBuffer,
    destination: &Path,
    quality: Quality,
) -> bool {
    match try_save_image(backend, buffer, destination, quality) {
        Ok(()) => true,
        Err(e) => {
            log::error!("{}", e);
            false
        }
    }
}

/// Produce one thumbnail: read rotation, sampled decode, rotate, save.
///
/// Orientation problems never fail the call. Decode failures always do.
/// Save failures follow `request.save_mode`.
pub fn create_thumbnail(
    backend: &impl ImageBackend,
    request: &ThumbnailRequest,
) -> Result<ThumbnailOutcome> {
    let orientation = read_rotation(backend, &request.source);
    let SampledDecode {
        buffer,
        source,
        factor,
    } = decode_sampled(backend, &request.source, request.bounds)?;

    let rotated = rotate(buffer, orientation);
    let output = rotated.dimensions();

    let saved = match request.save_mode {
        SaveMode::Strict => {
            try_save_image(backend, rotated, &request.destination, request.quality)?;
            true
        }
        SaveMode::Lenient => {
            save_logging_failure(backend, rotated, &request.destination, request.quality)
        }
    };

    if saved {
        log::info!(
            "{} → {} ({} at {}, rotated {})",
            request.source.display(),
            request.destination.display(),
            output,
            factor,
            orientation
        );
    }

    Ok(ThumbnailOutcome {
        source,
        factor,
        orientation,
        output,
        saved,
    })
}

/// Plan a thumbnail without decoding pixels.
///
/// Useful for previews and for testing parameter generation.
pub fn plan_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    bounds: RequestedBounds,
) -> Result<ThumbnailPlan> {
    let orientation = read_rotation(backend, source);
    let dimensions = probe_dimensions(backend, source)?;
    let factor = calculate_sample_size(dimensions, bounds);
    let decoded = sampled_dimensions(dimensions, factor);

    Ok(ThumbnailPlan {
        source: dimensions,
        orientation,
        factor,
        decoded,
        output: oriented_dimensions(decoded, orientation),
    })
}
