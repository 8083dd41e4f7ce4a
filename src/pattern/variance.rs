//! Block-variance texture scoring
//!
//! The image is cut into non-overlapping square blocks; partial blocks on
//! the right and bottom edges are dropped. Each block is scored by the
//! population variance of its brightness values.

use crate::raster::{GrayscaleMap, Rectangle};
use ndarray::{Axis, Slice};
use rayon::prelude::*;

/// Texture score of one block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockScore {
    /// Left edge of the block
    pub x: u32,
    /// Top edge of the block
    pub y: u32,
    /// Brightness variance inside the block
    pub variance: f64,
}

impl BlockScore {
    /// Pixel rectangle covered by the block
    pub const fn region(&self, block_size: u32) -> Rectangle {
        Rectangle::new(self.x as i64, self.y as i64, block_size, block_size)
    }
}

/// Mean squared deviation of brightness inside a square block
///
/// The block is clipped to the map; an empty block scores 0. Samples are
/// summed in row-major order in two passes (mean, then deviations) so equal
/// blocks always score bit-identically.
pub fn block_variance(gray: &GrayscaleMap, x: usize, y: usize, size: usize) -> f64 {
    let x_end = (x + size).min(gray.width());
    let y_end = (y + size).min(gray.height());
    if x >= x_end || y >= y_end {
        return 0.0;
    }

    let rows = gray
        .as_array()
        .slice_axis(Axis(0), Slice::from(y..y_end));
    let block = rows.slice_axis(Axis(1), Slice::from(x..x_end));
    let count = block.len() as f64;
    let mean = block.iter().sum::<f64>() / count;

    block
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / count
}

/// Score every whole block, in row-major order
///
/// Block rows are scored in parallel; the ordered collect keeps the output
/// sequence identical to a sequential scan.
pub fn score_blocks(gray: &GrayscaleMap, block_size: u32) -> Vec<BlockScore> {
    let size = block_size as usize;
    if size == 0 {
        return Vec::new();
    }

    let block_rows = gray.height() / size;
    let block_cols = gray.width() / size;

    (0..block_rows)
        .into_par_iter()
        .flat_map_iter(|by| {
            (0..block_cols).map(move |bx| BlockScore {
                x: (bx * size) as u32,
                y: (by * size) as u32,
                variance: block_variance(gray, bx * size, by * size, size),
            })
        })
        .collect()
}

/// Highest-variance block; the first in scan order wins ties
pub fn richest(scores: &[BlockScore]) -> Option<BlockScore> {
    scores.iter().copied().fold(None, |best, candidate| match best {
        Some(current) if current.variance >= candidate.variance => Some(current),
        _ => Some(candidate),
    })
}
