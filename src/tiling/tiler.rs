//! Seamless tile construction and repeated-grid rendering

use crate::io::configuration::{
    DEFAULT_PREVIEW_SIZE, DEFAULT_TILE_SIZE, DEFAULT_TILES_X, DEFAULT_TILES_Y,
    MAX_OUTPUT_DIMENSION,
};
use crate::io::error::{Result, invalid_input, invalid_parameter};
use crate::raster::PixelBuffer;
use crate::raster::ops::{paste, resize};
use crate::tiling::blend::blend_edges;
use rayon::prelude::*;
use tracing::debug;

/// Tile size, grid shape and edge blending for a tiling render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileConfig {
    /// Side length of one square tile in pixels
    pub tile_size: u32,
    /// Number of tile columns
    pub tiles_x: u32,
    /// Number of tile rows
    pub tiles_y: u32,
    /// Cross-fade opposite edges before repeating
    pub blend_edges: bool,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            tiles_x: DEFAULT_TILES_X,
            tiles_y: DEFAULT_TILES_Y,
            blend_edges: true,
        }
    }
}

// Multiply a tile side by a grid count, bounded by the output limit
fn grid_extent(side: u32, count: u32) -> Result<u32> {
    side.checked_mul(count)
        .filter(|extent| *extent <= MAX_OUTPUT_DIMENSION)
        .ok_or_else(|| {
            invalid_input(&format!(
                "{count} tiles of {side} px exceed the {MAX_OUTPUT_DIMENSION} px output limit"
            ))
        })
}

impl TileConfig {
    /// Check that every field is non-zero and the output fits the size limit
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending parameter, or an
    /// invalid-input error when the grid would exceed the output limit
    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 || self.tile_size > MAX_OUTPUT_DIMENSION {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &format!("must be between 1 and {MAX_OUTPUT_DIMENSION}"),
            ));
        }
        if self.tiles_x == 0 {
            return Err(invalid_parameter("tiles_x", &self.tiles_x, &"must be at least 1"));
        }
        if self.tiles_y == 0 {
            return Err(invalid_parameter("tiles_y", &self.tiles_y, &"must be at least 1"));
        }
        self.output_dimensions().map(|_| ())
    }

    /// Size of the rendered grid
    ///
    /// # Errors
    ///
    /// Returns an error if either side exceeds the output limit
    pub fn output_dimensions(&self) -> Result<(u32, u32)> {
        Ok((
            grid_extent(self.tile_size, self.tiles_x)?,
            grid_extent(self.tile_size, self.tiles_y)?,
        ))
    }
}

/// Resize a pattern to a square tile and optionally blend its edges
///
/// # Errors
///
/// Returns an error if `size` is zero or above the output limit
pub fn make_seamless_tile(pattern: &PixelBuffer, size: u32, blend: bool) -> Result<PixelBuffer> {
    if size == 0 || size > MAX_OUTPUT_DIMENSION {
        return Err(invalid_parameter(
            "tile_size",
            &size,
            &format!("must be between 1 and {MAX_OUTPUT_DIMENSION}"),
        ));
    }

    let mut tile = resize(pattern, size, size)?;
    if blend {
        blend_edges(&mut tile);
    }
    Ok(tile)
}

/// Repeat a tile `tiles_x` by `tiles_y` times without gaps or overlap
///
/// One strip of tiles is assembled first, then copied into every strip of
/// the output in parallel.
///
/// # Errors
///
/// Returns an error if a count is zero or the output exceeds the size limit
pub fn repeat_tile(tile: &PixelBuffer, tiles_x: u32, tiles_y: u32) -> Result<PixelBuffer> {
    if tiles_x == 0 || tiles_y == 0 {
        return Err(invalid_parameter(
            "tiles",
            &format!("{tiles_x}x{tiles_y}"),
            &"grid must have at least one tile",
        ));
    }
    let width = grid_extent(tile.width(), tiles_x)?;
    let height = grid_extent(tile.height(), tiles_y)?;

    let mut strip = PixelBuffer::new(width, tile.height())?;
    for column in 0..tiles_x {
        paste(&mut strip, tile, i64::from(column * tile.width()), 0);
    }

    let mut output = PixelBuffer::new(width, height)?;
    let strip_bytes = strip.as_raw();
    output
        .as_raw_mut()
        .par_chunks_mut(strip_bytes.len())
        .for_each(|chunk| {
            if let Some(source) = strip_bytes.get(..chunk.len()) {
                chunk.copy_from_slice(source);
            }
        });

    Ok(output)
}

/// Build the seamless tile and repeat it over the configured grid
///
/// The result is exactly `tile_size * tiles_x` by `tile_size * tiles_y`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid
pub fn render_tiling(pattern: &PixelBuffer, config: &TileConfig) -> Result<PixelBuffer> {
    config.validate()?;
    let tile = make_seamless_tile(pattern, config.tile_size, config.blend_edges)?;
    debug!(
        tile_size = config.tile_size,
        tiles_x = config.tiles_x,
        tiles_y = config.tiles_y,
        blend = config.blend_edges,
        "rendering tiling"
    );
    repeat_tile(&tile, config.tiles_x, config.tiles_y)
}

/// Quick 2x2 look at how the pattern repeats
///
/// Uses a blended tile of half the preview side, so odd sizes lose one
/// pixel per axis.
///
/// # Errors
///
/// Returns an error if `preview_size` is below 2 or above the output limit
pub fn render_preview(pattern: &PixelBuffer, preview_size: u32) -> Result<PixelBuffer> {
    if preview_size < 2 {
        return Err(invalid_parameter(
            "preview_size",
            &preview_size,
            &format!("must be at least 2 (default {DEFAULT_PREVIEW_SIZE})"),
        ));
    }

    let tile = make_seamless_tile(pattern, preview_size / 2, true)?;
    repeat_tile(&tile, 2, 2)
}
