//! Breadth-first region growing over an edge map

use crate::raster::Mask;
use bitvec::prelude::*;
use ndarray::Array2;

/// Grow a foreground region outward from `seed`
///
/// A pixel joins the region when its edge magnitude is strictly below
/// `threshold`; only members spread to their 4-connected neighbours. Every
/// pixel is queued at most once, so the worklist never outgrows the image
/// and the whole fill is O(width * height).
///
/// A seed outside the map, or one sitting on a strong edge, yields an empty
/// mask.
pub fn grow_region(edges: &Array2<f64>, seed: (u32, u32), threshold: f64) -> Mask {
    let (height, width) = edges.dim();
    let mut mask = Mask::new(width as u32, height as u32);

    let (seed_x, seed_y) = (seed.0 as usize, seed.1 as usize);
    if seed_x >= width || seed_y >= height {
        return mask;
    }

    let total = width * height;
    let mut queued = bitvec![0; total];
    let mut worklist: Vec<usize> = Vec::with_capacity(total);

    let seed_index = seed_y * width + seed_x;
    queued.set(seed_index, true);
    worklist.push(seed_index);

    let mut cursor = 0;
    while let Some(&index) = worklist.get(cursor) {
        cursor += 1;

        let (x, y) = (index % width, index / width);
        let magnitude = edges.get((y, x)).copied().unwrap_or(f64::INFINITY);
        if magnitude >= threshold {
            continue;
        }

        mask.insert_index(index);

        let neighbours = [
            (x + 1 < width).then(|| index + 1),
            x.checked_sub(1).map(|_| index - 1),
            (y + 1 < height).then(|| index + width),
            y.checked_sub(1).map(|_| index - width),
        ];

        for neighbour in neighbours.into_iter().flatten() {
            if queued.get(neighbour).as_deref() == Some(&false) {
                queued.set(neighbour, true);
                worklist.push(neighbour);
            }
        }
    }

    mask
}
