//! Integer rectangles in pixel-buffer coordinates

use crate::io::configuration::MIN_SELECTION_SIZE;
use std::fmt;

/// Axis-aligned rectangle; the origin may lie outside the buffer
///
/// Host selections can start left of or above the image, so the origin is
/// signed. Extents are never negative. Use [`Rectangle::clamp_to`] before
/// touching pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rectangle {
    /// Left edge (inclusive)
    pub x: i64,
    /// Top edge (inclusive)
    pub y: i64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rectangle {
    /// Create a rectangle from origin and extents
    pub const fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive)
    pub const fn right(&self) -> i64 {
        self.x + self.width as i64
    }

    /// Bottom edge (exclusive)
    pub const fn bottom(&self) -> i64 {
        self.y + self.height as i64
    }

    /// True when the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when a manual selection is large enough to be extracted
    pub const fn is_selectable(&self) -> bool {
        self.width > MIN_SELECTION_SIZE && self.height > MIN_SELECTION_SIZE
    }

    /// Test whether `(x, y)` lies inside
    pub const fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Restrict to `[0, width) x [0, height)`
    ///
    /// The result may be empty when the rectangle lies entirely outside.
    #[must_use]
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let (w, h) = (i64::from(width), i64::from(height));
        let left = self.x.clamp(0, w);
        let top = self.y.clamp(0, h);
        let right = self.right().clamp(0, w);
        let bottom = self.bottom().clamp(0, h);

        Self {
            x: left,
            y: top,
            width: u32::try_from(right - left).unwrap_or(0),
            height: u32::try_from(bottom - top).unwrap_or(0),
        }
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.width, self.height, self.x, self.y
        )
    }
}
