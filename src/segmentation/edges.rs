//! Sobel gradient magnitude over a brightness map
//!
//! Only interior pixels get a gradient. The one-pixel border keeps a
//! magnitude of 0, so images narrower or shorter than 3 pixels produce an
//! all-zero map.

use crate::raster::GrayscaleMap;
use ndarray::{Array2, Axis};
use rayon::prelude::*;

/// Horizontal Sobel kernel, indexed `[row][col]`
pub const SOBEL_X: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];

/// Vertical Sobel kernel, indexed `[row][col]`
pub const SOBEL_Y: [[f64; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Horizontal and vertical responses centred on interior pixel `(x, y)`
pub fn sobel_at(gray: &Array2<f64>, x: usize, y: usize) -> (f64, f64) {
    let mut gx = 0.0;
    let mut gy = 0.0;

    for (ky, (row_x, row_y)) in SOBEL_X.iter().zip(SOBEL_Y.iter()).enumerate() {
        for (kx, (weight_x, weight_y)) in row_x.iter().zip(row_y).enumerate() {
            let sample = gray
                .get(((y + ky).wrapping_sub(1), (x + kx).wrapping_sub(1)))
                .copied()
                .unwrap_or(0.0);
            gx += weight_x * sample;
            gy += weight_y * sample;
        }
    }

    (gx, gy)
}

/// Edge strength `sqrt(gx² + gy²)` for every pixel, shaped `(height, width)`
///
/// Rows are processed in parallel; each row only reads the shared
/// brightness map and writes its own output slice.
#[allow(clippy::imprecise_flops, clippy::suboptimal_flops)]
pub fn gradient_magnitude(gray: &GrayscaleMap) -> Array2<f64> {
    let (width, height) = (gray.width(), gray.height());
    let mut magnitudes = Array2::zeros((height, width));

    if width < 3 || height < 3 {
        return magnitudes;
    }

    let source = gray.as_array();
    magnitudes
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .filter(|(y, _)| *y > 0 && *y < height - 1)
        .for_each(|(y, mut row)| {
            for x in 1..width - 1 {
                let (gx, gy) = sobel_at(source, x, y);
                if let Some(magnitude) = row.get_mut(x) {
                    *magnitude = (gx * gx + gy * gy).sqrt();
                }
            }
        });

    magnitudes
}
