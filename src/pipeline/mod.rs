//! End-to-end extraction: segmentation, pattern location and tiling

/// Stage orchestration and run outputs
pub mod runner;

pub use runner::{LocateMode, Pipeline, PipelineConfig, PipelineOutput};
