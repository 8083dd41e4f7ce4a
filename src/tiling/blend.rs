//! Cross-fade of opposite tile edges
//!
//! Within a band of `floor(side / 10)` pixels, each left-edge column is mixed
//! with its partner column on the right edge and the mix is written to both.
//! Column `x` of the band uses weight `x / band`, so the outermost column
//! keeps the left-edge colour and the weight ramps toward the right-edge
//! colour. Rows are then treated the same way on the already blended data.
//! Only RGB is touched; alpha stays as resampled.

use crate::io::configuration::BLEND_BAND_DIVISOR;
use crate::raster::PixelBuffer;
use crate::raster::buffer::CHANNELS;
use crate::raster::ops::blend_channel;

const COLOR_CHANNELS: usize = 3;

/// Width of the cross-fade band for a tile side
pub const fn band_width(side: u32) -> u32 {
    side / BLEND_BAND_DIVISOR
}

// Mix two pixels' RGB channels and store the result in both
fn blend_pair(first: &mut [u8], second: &mut [u8], weight: f64) {
    for (a, b) in first
        .iter_mut()
        .zip(second.iter_mut())
        .take(COLOR_CHANNELS)
    {
        let mixed = blend_channel(*a, *b, weight);
        *a = mixed;
        *b = mixed;
    }
}

/// Cross-fade the left and right bands of every row
pub fn blend_horizontal(tile: &mut PixelBuffer) {
    let width = tile.width() as usize;
    let band = band_width(tile.width()) as usize;
    if band == 0 {
        return;
    }

    for row in tile.rows_mut() {
        let (head, tail) = row.split_at_mut((width - band) * CHANNELS);
        for x in 0..band {
            let weight = x as f64 / band as f64;
            let left = head.get_mut(x * CHANNELS..(x + 1) * CHANNELS);
            let right = tail.get_mut(x * CHANNELS..(x + 1) * CHANNELS);
            if let (Some(left), Some(right)) = (left, right) {
                blend_pair(left, right, weight);
            }
        }
    }
}

/// Cross-fade the top and bottom bands of every column
pub fn blend_vertical(tile: &mut PixelBuffer) {
    let height = tile.height() as usize;
    let band = band_width(tile.height()) as usize;
    if band == 0 {
        return;
    }

    let row_len = tile.row_len();
    let data = tile.as_raw_mut();

    for y in 0..band {
        let weight = y as f64 / band as f64;
        let top_start = y * row_len;
        let bottom_start = (height - band + y) * row_len;

        let Some((head, tail)) = data.split_at_mut_checked(bottom_start) else {
            continue;
        };
        let (Some(top), Some(bottom)) = (
            head.get_mut(top_start..top_start + row_len),
            tail.get_mut(..row_len),
        ) else {
            continue;
        };

        for (upper, lower) in top
            .chunks_exact_mut(CHANNELS)
            .zip(bottom.chunks_exact_mut(CHANNELS))
        {
            blend_pair(upper, lower, weight);
        }
    }
}

/// Cross-fade both axes in place, horizontal pass first
///
/// The pass order decides the corner pixels, so it is fixed.
pub fn blend_edges(tile: &mut PixelBuffer) {
    blend_horizontal(tile);
    blend_vertical(tile);
}
