//! Foreground segmentation without a trained model

/// Sobel gradient magnitude computation
pub mod edges;
/// Breadth-first region growing
pub mod region;
/// Segmenter configuration and entry points
pub mod segmenter;

pub use segmenter::{Segmenter, SegmenterConfig};
