//! Raster data model and pixel-buffer primitives
//!
//! This module contains the types every stage exchanges:
//! - RGBA pixel buffers and rectangles
//! - Brightness maps and foreground masks
//! - Crop, resize, paste and per-channel blending

/// Owned RGBA pixel buffers
pub mod buffer;
/// Brightness maps derived from pixel buffers
pub mod grayscale;
/// Bitset-backed foreground masks
pub mod mask;
/// Crop, resize, paste and channel blending
pub mod ops;
/// Integer rectangles with bounds clamping
pub mod rectangle;

pub use buffer::{PixelBuffer, Rgba};
pub use grayscale::GrayscaleMap;
pub use mask::Mask;
pub use rectangle::Rectangle;
