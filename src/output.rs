//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Probe
//!
//! ```text
//! photos/IMG_0042.jpg
//!     Source: 4000x3000
//!     Orientation: 90°
//!     Sample factor: 1/4
//!     Decoded: 1000x750
//!     Output: 750x1000
//! ```
//!
//! ## Thumbnail
//!
//! ```text
//! photos/IMG_0042.jpg → thumbs/IMG_0042.png
//!     1000x750 at 1/4, rotated 90° → 750x1000
//! ```
//!
//! A lenient save that failed ends with `(not saved)` instead.
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::imaging::{ThumbnailOutcome, ThumbnailPlan};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format the sizing plan for one source file.
pub fn format_probe_output(source: &Path, plan: &ThumbnailPlan) -> Vec<String> {
    vec![
        source.display().to_string(),
        format!("{}Source: {}", indent(1), plan.source),
        format!("{}Orientation: {}", indent(1), plan.orientation),
        format!("{}Sample factor: {}", indent(1), plan.factor),
        format!("{}Decoded: {}", indent(1), plan.decoded),
        format!("{}Output: {}", indent(1), plan.output),
    ]
}

/// Print probe output to stdout.
pub fn print_probe_output(source: &Path, plan: &ThumbnailPlan) {
    for line in format_probe_output(source, plan) {
        println!("{}", line);
    }
}

/// Format the result of a thumbnail run.
pub fn format_thumbnail_output(
    source: &Path,
    destination: &Path,
    outcome: &ThumbnailOutcome,
) -> Vec<String> {
    let mut detail = format!(
        "{}{} at {}, rotated {} \u{2192} {}",
        indent(1),
        crate::imaging::sampled_dimensions(outcome.source, outcome.factor),
        outcome.factor,
        outcome.orientation,
        outcome.output
    );
    if !outcome.saved {
        detail.push_str(" (not saved)");
    }
    vec![
        format!("{} \u{2192} {}", source.display(), destination.display()),
        detail,
    ]
}

/// Print thumbnail output to stdout.
pub fn print_thumbnail_output(source: &Path, destination: &Path, outcome: &ThumbnailOutcome) {
    for line in format_thumbnail_output(source, destination, outcome) {
        println!("{}", line);
    }
}
