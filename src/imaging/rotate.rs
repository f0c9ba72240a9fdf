//! Axis-aligned rotation of decoded buffers.

use super::buffer::PixelBuffer;
use super::orientation::Orientation;

/// Rotate `buffer` clockwise by `orientation`.
///
/// `Normal` hands the same buffer back without touching its pixels. Any
/// other rotation allocates the rotated raster and drops the source before
/// returning, so only one full buffer outlives the call.
pub fn rotate(buffer: PixelBuffer, orientation: Orientation) -> PixelBuffer {
    let source = buffer.into_image();
    let rotated = match orientation {
        Orientation::Normal => return PixelBuffer::new(source),
        Orientation::Rotate90 => source.rotate90(),
        Orientation::Rotate180 => source.rotate180(),
        Orientation::Rotate270 => source.rotate270(),
    };
    drop(source);
    log::debug!(
        "Rotated {} to {}x{}",
        orientation,
        rotated.width(),
        rotated.height()
    );
    PixelBuffer::new(rotated)
}
