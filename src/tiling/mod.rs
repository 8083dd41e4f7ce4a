//! Seamless tile generation and grid rendering

/// Edge cross-fading
pub mod blend;
/// Tile construction, repetition and previews
pub mod tiler;

pub use tiler::{TileConfig, make_seamless_tile, render_preview, render_tiling};
