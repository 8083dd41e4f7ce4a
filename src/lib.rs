//! Textile print extraction from product photos
//!
//! A photo is segmented to drop its background, the most textured region of
//! the foreground is located by block variance, and that region is turned
//! into a seamless tile that can be repeated over an arbitrary grid.

#![forbid(unsafe_code)]

/// Input/output operations, configuration and error handling
pub mod io;
/// Pattern location by texture scoring
pub mod pattern;
/// End-to-end stage orchestration
pub mod pipeline;
/// Pixel buffers, masks, rectangles and raster primitives
pub mod raster;
/// Edge-based foreground segmentation
pub mod segmentation;
/// Seamless tile generation and grid rendering
pub mod tiling;

pub use io::error::{Result, SeamprintError};
