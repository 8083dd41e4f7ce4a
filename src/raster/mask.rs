//! Foreground masks backed by a packed bitset

use crate::io::error::{Result, invalid_input};
use crate::raster::buffer::{CHANNELS, PixelBuffer};
use bitvec::prelude::*;
use std::fmt;

/// Per-pixel foreground flags for a `width x height` image
///
/// Bits are stored row-major, one per pixel, so membership tests and
/// inserts are O(1) and the whole mask costs `width * height / 8` bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Mask {
    bits: BitVec,
    width: u32,
    height: u32,
}

impl Mask {
    /// Create a mask with no foreground pixels
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            bits: bitvec![0; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Mask width
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Mask height
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Row-major index of `(x, y)`
    pub const fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Mark the pixel at a row-major index as foreground; out-of-range
    /// indices are ignored
    pub fn insert_index(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    /// Test whether `(x, y)` is foreground
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.index_of(x, y)
            .is_some_and(|index| self.contains_index(index))
    }

    /// Test whether the pixel at a row-major index is foreground
    pub fn contains_index(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Number of foreground pixels
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// True when no pixel is foreground
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// True when every pixel is foreground
    pub fn is_full(&self) -> bool {
        self.bits.all()
    }

    /// Copy `image` with alpha zeroed on every background pixel
    ///
    /// RGB channels are left untouched so the caller can still inspect what
    /// was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the image and mask dimensions differ
    pub fn apply_to(&self, image: &PixelBuffer) -> Result<PixelBuffer> {
        if image.dimensions() != (self.width, self.height) {
            return Err(invalid_input(&format!(
                "mask is {}x{} but image is {}x{}",
                self.width,
                self.height,
                image.width(),
                image.height()
            )));
        }

        let mut output = image.clone();
        for (index, px) in output.as_raw_mut().chunks_exact_mut(CHANNELS).enumerate() {
            if !self.contains_index(index) && let Some(alpha) = px.get_mut(3) {
                *alpha = 0;
            }
        }

        Ok(output)
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mask({}x{}, {} foreground)",
            self.width,
            self.height,
            self.count()
        )
    }
}
