//! Parameter types for thumbnail operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which sequences probe, decode, rotate and save) and the
//! [`backend`](super::backend) (which does the actual codec work). The split
//! lets tests swap in a mock backend without touching the orchestration.
//!
//! ## Types
//!
//! - [`Dimensions`]: Width and height of a source image, as reported by a bounds probe.
//! - [`RequestedBounds`]: The caller's bounding box for the thumbnail.
//! - [`SampleFactor`]: Power-of-two decode divisor. Cannot hold anything else.
//! - [`Quality`]: Encoder quality (1–100). PNG is lossless, so it is carried but ignored.
//! - [`SaveMode`]: Whether a failed save fails the call or is only logged.
//! - [`ThumbnailRequest`]: Everything needed for one thumbnail: source, bounds, destination.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Bounding box the thumbnail must cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedBounds {
    pub max_width: u32,
    pub max_height: u32,
}

impl RequestedBounds {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }
}

/// Decode at `1 / factor` of the linear resolution.
///
/// Always a power of two, never below 1. The only ways to obtain one are
/// [`SampleFactor::ONE`], [`SampleFactor::doubled`] and the checked
/// [`SampleFactor::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SampleFactor(u32);

impl SampleFactor {
    pub const ONE: SampleFactor = SampleFactor(1);

    /// Returns `None` unless `value` is a power of two.
    pub fn new(value: u32) -> Option<Self> {
        value.is_power_of_two().then_some(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Next power of two. Saturates at the largest `u32` power of two.
    pub fn doubled(self) -> Self {
        Self(self.0.checked_mul(2).unwrap_or(self.0))
    }
}

impl Default for SampleFactor {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for SampleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1/{}", self.0)
    }
}

/// Quality setting handed to the encoder (1-100).
///
/// Output is always PNG, which is lossless, so the value has no effect on
/// the written pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(100)
    }
}

/// What to do when writing the thumbnail fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveMode {
    /// Save failures are returned to the caller.
    #[default]
    Strict,
    /// Save failures are logged and the call still reports success.
    Lenient,
}

/// One thumbnail to produce.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailRequest {
    pub source: PathBuf,
    pub bounds: RequestedBounds,
    pub destination: PathBuf,
    pub quality: Quality,
    pub save_mode: SaveMode,
}

impl ThumbnailRequest {
    /// Request with default quality and strict saving.
    pub fn new(
        source: impl Into<PathBuf>,
        bounds: RequestedBounds,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source: source.into(),
            bounds,
            destination: destination.into(),
            quality: Quality::default(),
            save_mode: SaveMode::default(),
        }
    }

    pub fn with_save_mode(mut self, save_mode: SaveMode) -> Self {
        self.save_mode = save_mode;
        self
    }
}
