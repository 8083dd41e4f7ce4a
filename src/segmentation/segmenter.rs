//! Background removal by edge detection and region growing

use crate::io::configuration::DEFAULT_EDGE_THRESHOLD;
use crate::io::error::{Result, invalid_input, invalid_parameter};
use crate::raster::{GrayscaleMap, Mask, PixelBuffer};
use crate::segmentation::edges::gradient_magnitude;
use crate::segmentation::region::grow_region;
use ndarray::Array2;
use tracing::debug;

/// Tunable segmentation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmenterConfig {
    /// Pixels with an edge magnitude below this join the foreground
    pub edge_threshold: f64,
    /// Flood-fill start point; `None` uses the geometric centre
    pub seed: Option<(u32, u32)>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            seed: None,
        }
    }
}

impl SegmenterConfig {
    /// Check that the threshold is usable
    ///
    /// # Errors
    ///
    /// Returns an error if the edge threshold is negative or not finite
    pub fn validate(&self) -> Result<()> {
        if !self.edge_threshold.is_finite() || self.edge_threshold < 0.0 {
            return Err(invalid_parameter(
                "edge_threshold",
                &self.edge_threshold,
                &"must be a finite, non-negative magnitude",
            ));
        }
        Ok(())
    }
}

/// Separates a central foreground region from its background
///
/// The segmenter is stateless: every call recomputes brightness, edges and
/// the mask from scratch, so one instance can serve any number of images.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    /// Prepare a segmenter for use
    ///
    /// Edge-based segmentation has no model weights to load, so this only
    /// validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn initialize(config: SegmenterConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            edge_threshold = config.edge_threshold,
            "edge-based segmenter ready"
        );
        Ok(Self { config })
    }

    /// Active configuration
    pub const fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Flood-fill start point for `image`
    ///
    /// # Errors
    ///
    /// Returns an error if a configured seed lies outside the image
    pub fn seed_for(&self, image: &PixelBuffer) -> Result<(u32, u32)> {
        match self.config.seed {
            Some((x, y)) if x >= image.width() || y >= image.height() => {
                Err(invalid_input(&format!(
                    "seed ({x}, {y}) lies outside the {}x{} image",
                    image.width(),
                    image.height()
                )))
            }
            Some(seed) => Ok(seed),
            None => Ok((image.width() / 2, image.height() / 2)),
        }
    }

    /// Edge magnitude map of `image`, shaped `(height, width)`
    pub fn edge_map(image: &PixelBuffer) -> Array2<f64> {
        gradient_magnitude(&GrayscaleMap::from_buffer(image))
    }

    /// Foreground mask of `image`
    ///
    /// # Errors
    ///
    /// Returns an error if a configured seed lies outside the image
    pub fn mask(&self, image: &PixelBuffer) -> Result<Mask> {
        let seed = self.seed_for(image)?;
        let edges = Self::edge_map(image);
        let mask = grow_region(&edges, seed, self.config.edge_threshold);

        if mask.is_empty() {
            debug!(
                seed_x = seed.0,
                seed_y = seed.1,
                "seed pixel sits on an edge, foreground is empty"
            );
        } else if mask.is_full() {
            debug!(
                width = image.width(),
                height = image.height(),
                "no edge encloses the seed, whole image kept"
            );
        } else {
            debug!(
                width = image.width(),
                height = image.height(),
                foreground = mask.count(),
                "foreground region grown"
            );
        }

        Ok(mask)
    }

    /// Copy of `image` with every background pixel made fully transparent
    ///
    /// An empty mask is a valid outcome and produces a fully transparent
    /// image of the same size.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured seed lies outside the image
    pub fn segment(&self, image: &PixelBuffer) -> Result<PixelBuffer> {
        self.mask(image)?.apply_to(image)
    }
}
