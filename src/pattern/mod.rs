//! Pattern location by block-variance texture scoring

/// Automatic and manual region selection
pub mod locator;
/// Block partitioning and variance scoring
pub mod variance;

pub use locator::{LocatorConfig, PatternLocator};
pub use variance::BlockScore;
