//! EXIF orientation, reduced to the four axis-aligned rotations.
//!
//! The EXIF `Orientation` tag (0x0112) has eight values. Only the pure
//! rotations are honoured here; the mirrored variants and anything out of
//! range fall back to [`Orientation::Normal`].
//!
//! | Tag | Meaning | Orientation |
//! |---|---|---|
//! | 1 | top-left | `Normal` |
//! | 3 | bottom-right | `Rotate180` |
//! | 6 | right-top | `Rotate90` (clockwise) |
//! | 8 | left-bottom | `Rotate270` (clockwise) |
//! | 2, 4, 5, 7, other | mirrored / invalid | `Normal` |

use super::backend::ImageBackend;
use std::fmt;
use std::path::Path;

/// Clockwise rotation needed to display the stored pixels upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Normal,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Orientation {
    /// Map a raw EXIF orientation tag value.
    pub fn from_exif(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            3 => Orientation::Rotate180,
            6 => Orientation::Rotate90,
            8 => Orientation::Rotate270,
            // Mirrored variants and junk are not rotations we apply.
            _ => Orientation::Normal,
        }
    }

    /// Map a rotation in degrees. Anything but 90/180/270 is `Normal`.
    pub fn from_degrees(degrees: u32) -> Self {
        match degrees {
            90 => Orientation::Rotate90,
            180 => Orientation::Rotate180,
            270 => Orientation::Rotate270,
            _ => Orientation::Normal,
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Orientation::Normal => 0,
            Orientation::Rotate90 => 90,
            Orientation::Rotate180 => 180,
            Orientation::Rotate270 => 270,
        }
    }

    /// True for quarter turns, which exchange width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Orientation::Rotate90 | Orientation::Rotate270)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Read the rotation recorded in the file at `path`.
///
/// Never fails: a missing file, an unreadable container or a corrupt EXIF
/// block is logged as a warning and treated as [`Orientation::Normal`].
pub fn read_rotation(backend: &impl ImageBackend, path: &Path) -> Orientation {
    match backend.read_orientation_tag(path) {
        Ok(Some(tag)) => {
            let orientation = Orientation::from_exif(tag);
            log::debug!(
                "{}: orientation tag {} → {}",
                path.display(),
                tag,
                orientation
            );
            orientation
        }
        Ok(None) => Orientation::Normal,
        Err(e) => {
            log::warn!(
                "Failed to read rotation from {}: {}; assuming no rotation",
                path.display(),
                e
            );
            Orientation::Normal
        }
    }
}
