//! Per-pixel brightness maps derived from RGBA buffers

use crate::raster::buffer::{CHANNELS, PixelBuffer};
use ndarray::Array2;

/// Unweighted brightness estimate `(R + G + B) / 3`; alpha is ignored
pub fn brightness(r: u8, g: u8, b: u8) -> f64 {
    (f64::from(r) + f64::from(g) + f64::from(b)) / 3.0
}

/// Real-valued brightness samples indexed as `(row, col)`
///
/// Recomputed for every call that needs it and never cached.
#[derive(Debug, Clone)]
pub struct GrayscaleMap {
    values: Array2<f64>,
}

impl GrayscaleMap {
    /// Compute the brightness of every pixel in `buffer`
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        let mut values = Array2::zeros((buffer.height() as usize, buffer.width() as usize));

        for (mut row, src) in values.rows_mut().into_iter().zip(buffer.rows()) {
            for (value, px) in row.iter_mut().zip(src.chunks_exact(CHANNELS)) {
                if let &[r, g, b, _] = px {
                    *value = brightness(r, g, b);
                }
            }
        }

        Self { values }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.values.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.values.nrows()
    }

    /// Brightness at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        self.values.get((y, x)).copied()
    }

    /// Underlying `(height, width)` array
    pub const fn as_array(&self) -> &Array2<f64> {
        &self.values
    }
}
