//! Segment, locate and tile in one call

use crate::io::configuration::DEFAULT_PREVIEW_SIZE;
use crate::io::error::{Result, invalid_parameter};
use crate::pattern::{LocatorConfig, PatternLocator};
use crate::raster::{PixelBuffer, Rectangle};
use crate::segmentation::{Segmenter, SegmenterConfig};
use crate::tiling::TileConfig;
use crate::tiling::tiler::{make_seamless_tile, render_preview, repeat_tile};
use tracing::info;

/// How the pattern region is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocateMode {
    /// Pick the richest textured block automatically
    #[default]
    Auto,
    /// Crop a caller-chosen rectangle
    Manual(Rectangle),
}

/// Settings for every pipeline stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Background removal settings
    pub segmenter: SegmenterConfig,
    /// Block-variance settings
    pub locator: LocatorConfig,
    /// Tile size, grid shape and blending
    pub tiles: TileConfig,
    /// Side length of the 2x2 preview
    pub preview_size: u32,
    /// Feed the source image to the locator unchanged
    pub skip_segmentation: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            segmenter: SegmenterConfig::default(),
            locator: LocatorConfig::default(),
            tiles: TileConfig::default(),
            preview_size: DEFAULT_PREVIEW_SIZE,
            skip_segmentation: false,
        }
    }
}

impl PipelineConfig {
    /// Validate every stage configuration
    ///
    /// # Errors
    ///
    /// Returns the first validation error found
    pub fn validate(&self) -> Result<()> {
        self.segmenter.validate()?;
        self.locator.validate()?;
        self.tiles.validate()?;
        if self.preview_size < 2 {
            return Err(invalid_parameter(
                "preview_size",
                &self.preview_size,
                &"must be at least 2",
            ));
        }
        Ok(())
    }
}

/// Every intermediate and final image of one run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Source with the background made transparent, or the source itself
    /// when segmentation is skipped
    pub segmented: PixelBuffer,
    /// Rectangle the pattern was cropped from
    pub region: Rectangle,
    /// Extracted pattern crop
    pub pattern: PixelBuffer,
    /// Seamless tile before repetition
    pub tile: PixelBuffer,
    /// Full repeated render
    pub tiling: PixelBuffer,
    /// 2x2 preview
    pub preview: PixelBuffer,
}

/// Runs the three stages in order with a validated configuration
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    segmenter: Segmenter,
    locator: PatternLocator,
}

impl Pipeline {
    /// Build a pipeline
    ///
    /// # Errors
    ///
    /// Returns an error if any stage configuration is invalid
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            segmenter: Segmenter::initialize(config.segmenter)?,
            locator: PatternLocator::new(config.locator)?,
        })
    }

    /// Active configuration
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run segmentation, location and tiling on `image`
    ///
    /// # Errors
    ///
    /// Returns an error if a configured seed lies outside the image, a manual
    /// region is empty after clamping, or an output exceeds the size limit
    pub fn run(&self, image: &PixelBuffer, mode: LocateMode) -> Result<PipelineOutput> {
        let segmented = if self.config.skip_segmentation {
            image.clone()
        } else {
            self.segmenter.segment(image)?
        };
        info!(
            width = segmented.width(),
            height = segmented.height(),
            skipped = self.config.skip_segmentation,
            "segmentation complete"
        );

        let requested = match mode {
            LocateMode::Auto => self.locator.select_region(&segmented),
            LocateMode::Manual(region) => region,
        };
        let pattern = self.locator.locate_manual(&segmented, requested)?;
        let region = requested.clamp_to(segmented.width(), segmented.height());
        info!(
            %region,
            auto = matches!(mode, LocateMode::Auto),
            "pattern located"
        );

        let tiles = &self.config.tiles;
        let tile = make_seamless_tile(&pattern, tiles.tile_size, tiles.blend_edges)?;
        let tiling = repeat_tile(&tile, tiles.tiles_x, tiles.tiles_y)?;
        let preview = render_preview(&pattern, self.config.preview_size)?;
        info!(
            width = tiling.width(),
            height = tiling.height(),
            preview = preview.width(),
            "tiling rendered"
        );

        Ok(PipelineOutput {
            segmented,
            region,
            pattern,
            tile,
            tiling,
            preview,
        })
    }
}
