//! # sampled-thumbs
//!
//! Bounded-memory thumbnail generation. A source photo is never decoded at
//! a larger resolution than the requested box calls for, the EXIF rotation
//! is applied, and the result is written as PNG.
//!
//! # Pipeline
//!
//! ```text
//! source ─┬─ read orientation tag ───────────────┐
//!         └─ probe bounds → sample factor         │
//!                        → decode at 1/factor ─→ rotate ─→ save PNG
//! ```
//!
//! The bounds probe reads only the header. The sample factor is the largest
//! power of two that keeps both sides of the decoded image above the box
//! (see [`imaging::calculate_sample_size`]). JPEG sources are decoded
//! directly at that reduction; other formats are reduced right after decode.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Sample-size math, orientation, rotation, codec backend, and the thumbnail pipeline |
//! | [`config`] | `sampled-thumbs.toml` loading, validation, merging over stock defaults |
//! | [`output`] | CLI output formatting for `probe` and `thumbnail` |
//!
//! # Design Decisions
//!
//! ## Buffers Have One Owner
//!
//! A decoded [`imaging::PixelBuffer`] moves from the decoder to the rotator to
//! the encoder. No step keeps a reference, so whichever step fails, the
//! buffer is dropped on the way out.
//!
//! ## Orientation Never Fails a Thumbnail
//!
//! A missing, unreadable or corrupt EXIF block logs a warning and is treated
//! as no rotation. Decode failures, by contrast, always fail the call.
//!
//! ## Strict Saves by Default
//!
//! A failed write is an error unless [`imaging::SaveMode::Lenient`] is
//! selected, in which case it is logged and the call still succeeds.

pub mod config;
pub mod imaging;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
