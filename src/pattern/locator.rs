//! Selection of the sub-region most likely to contain a repeating motif

use crate::io::configuration::{
    DEFAULT_BLOCK_SIZE, DEFAULT_VARIANCE_THRESHOLD, EXPANSION_BLOCKS, EXPANSION_CAP_MULTIPLIER,
    FALLBACK_EXTENT_PERCENT, FALLBACK_MARGIN_PERCENT,
};
use crate::io::error::{Result, invalid_parameter};
use crate::pattern::variance::{BlockScore, richest, score_blocks};
use crate::raster::ops::crop;
use crate::raster::{GrayscaleMap, PixelBuffer, Rectangle};
use tracing::debug;

/// Tunable block-scoring parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocatorConfig {
    /// Side length of the scored blocks
    pub block_size: u32,
    /// Variance the richest block must exceed to be used
    pub variance_threshold: f64,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            variance_threshold: DEFAULT_VARIANCE_THRESHOLD,
        }
    }
}

impl LocatorConfig {
    /// Check that the block size and threshold are usable
    ///
    /// # Errors
    ///
    /// Returns an error if the block size is zero or the threshold is
    /// negative or not finite
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(invalid_parameter(
                "block_size",
                &self.block_size,
                &"must be at least 1 pixel",
            ));
        }
        if !self.variance_threshold.is_finite() || self.variance_threshold < 0.0 {
            return Err(invalid_parameter(
                "variance_threshold",
                &self.variance_threshold,
                &"must be a finite, non-negative variance",
            ));
        }
        Ok(())
    }
}

/// Centred rectangle used when no block is textured enough
///
/// Offset 20% from each edge and covering 60% of each side, never smaller
/// than one pixel.
pub fn fallback_region(width: u32, height: u32) -> Rectangle {
    let scale = |side: u32, percent: u32| (u64::from(side) * u64::from(percent) / 100) as u32;

    Rectangle::new(
        i64::from(scale(width, FALLBACK_MARGIN_PERCENT)),
        i64::from(scale(height, FALLBACK_MARGIN_PERCENT)),
        scale(width, FALLBACK_EXTENT_PERCENT).max(1),
        scale(height, FALLBACK_EXTENT_PERCENT).max(1),
    )
    .clamp_to(width, height)
}

/// Grow a block into a selection with surrounding context
///
/// The origin moves back by two block sizes (stopping at 0) and each extent
/// is `min(side - block_origin + 2 * block_size, 6 * block_size)` before
/// clamping to the image.
pub fn expand_block(block: &BlockScore, block_size: u32, width: u32, height: u32) -> Rectangle {
    let reach = i64::from(EXPANSION_BLOCKS) * i64::from(block_size);
    let cap = i64::from(EXPANSION_CAP_MULTIPLIER) * reach;
    let (bx, by) = (i64::from(block.x), i64::from(block.y));

    let extent = |side: u32, origin: i64| {
        u32::try_from((i64::from(side) - origin + reach).clamp(0, cap)).unwrap_or(u32::MAX)
    };

    Rectangle::new(
        (bx - reach).max(0),
        (by - reach).max(0),
        extent(width, bx),
        extent(height, by),
    )
    .clamp_to(width, height)
}

/// Finds and crops the pattern-rich part of an image
#[derive(Debug, Clone, Default)]
pub struct PatternLocator {
    config: LocatorConfig,
}

impl PatternLocator {
    /// Create a locator
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: LocatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub const fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Highest-variance whole block, or `None` when the image is smaller
    /// than one block
    pub fn richest_block(&self, image: &PixelBuffer) -> Option<BlockScore> {
        let gray = GrayscaleMap::from_buffer(image);
        richest(&score_blocks(&gray, self.config.block_size))
    }

    /// Rectangle the automatic mode would crop
    pub fn select_region(&self, image: &PixelBuffer) -> Rectangle {
        let (width, height) = image.dimensions();

        match self.richest_block(image) {
            Some(block) if block.variance > self.config.variance_threshold => {
                let region = expand_block(&block, self.config.block_size, width, height);
                debug!(
                    block_x = block.x,
                    block_y = block.y,
                    variance = block.variance,
                    %region,
                    "selected textured block"
                );
                region
            }
            best => {
                let region = fallback_region(width, height);
                debug!(
                    best_variance = best.map(|block| block.variance),
                    threshold = self.config.variance_threshold,
                    %region,
                    "no block above variance threshold, using centred fallback"
                );
                region
            }
        }
    }

    /// Crop the automatically selected region
    ///
    /// # Errors
    ///
    /// Returns an error only if the selected region is empty, which cannot
    /// happen for a non-empty buffer
    pub fn locate_auto(&self, image: &PixelBuffer) -> Result<PixelBuffer> {
        crop(image, self.select_region(image))
    }

    /// Crop a caller-chosen region, clamped to the image
    ///
    /// Size limits on interactive selections are enforced by the host
    /// (see [`Rectangle::is_selectable`]), not here.
    ///
    /// # Errors
    ///
    /// Returns an error if the region has no pixels left after clamping
    #[allow(clippy::unused_self)]
    pub fn locate_manual(&self, image: &PixelBuffer, region: Rectangle) -> Result<PixelBuffer> {
        debug!(%region, "cropping manual selection");
        crop(image, region)
    }
}
