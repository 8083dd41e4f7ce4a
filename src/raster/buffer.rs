//! Owned RGBA pixel storage shared by every pipeline stage
//!
//! A `PixelBuffer` is always non-empty and always holds exactly
//! `width * height * 4` bytes in row-major order with a top-left origin.
//! Conversions to and from `image::RgbaImage` happen only at the I/O edge.

use crate::io::error::{Result, invalid_input};
use image::RgbaImage;
use std::fmt;

/// Number of interleaved channels per pixel (R, G, B, A)
pub const CHANNELS: usize = 4;

/// A single RGBA sample
pub type Rgba = [u8; 4];

/// Row-major RGBA image with validated, non-zero dimensions
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

// Byte length for the given dimensions, rejecting zero and overflowing sizes
fn byte_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(invalid_input(&format!(
            "pixel buffer dimensions must be non-zero, got {width}x{height}"
        )));
    }

    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(CHANNELS))
        .ok_or_else(|| invalid_input(&format!("pixel buffer {width}x{height} is too large")))
}

impl PixelBuffer {
    /// Create a fully transparent black buffer
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the byte size overflows
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Create a buffer where every pixel has the same color
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the byte size overflows
    pub fn filled(width: u32, height: u32, color: Rgba) -> Result<Self> {
        let len = byte_len(width, height)?;
        let data = color.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap raw interleaved RGBA bytes
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or `data` is not exactly
    /// `width * height * 4` bytes long
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(invalid_input(&format!(
                "raw data holds {} bytes but {width}x{height} RGBA needs {expected}",
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel in row-major order
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the byte size overflows
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgba) -> Result<Self> {
        let len = byte_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as `(width, height)`
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of bytes in a single row
    pub const fn row_len(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Borrow the interleaved RGBA bytes
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Mutably borrow the interleaved RGBA bytes
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return its bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    /// Read the pixel at `(x, y)`, or `None` when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let start = self.offset(x, y)?;
        let px = self.data.get(start..start + CHANNELS)?;
        Rgba::try_from(px).ok()
    }

    /// Borrow row `y`
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        let start = self.offset(0, y)?;
        self.data.get(start..start + self.row_len())
    }

    /// Iterate over rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.row_len())
    }

    /// Iterate mutably over rows top to bottom
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        let row_len = self.row_len();
        self.data.chunks_exact_mut(row_len)
    }

    /// Iterate over pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|px| Rgba::try_from(px).unwrap_or_default())
    }

    /// Copy into an `image::RgbaImage`
    ///
    /// # Errors
    ///
    /// Returns an error if the image crate rejects the buffer layout
    pub fn to_rgba_image(&self) -> Result<RgbaImage> {
        self.clone().into_rgba_image()
    }

    /// Convert into an `image::RgbaImage` without copying
    ///
    /// # Errors
    ///
    /// Returns an error if the image crate rejects the buffer layout
    pub fn into_rgba_image(self) -> Result<RgbaImage> {
        let (width, height) = self.dimensions();
        RgbaImage::from_raw(width, height, self.data).ok_or_else(|| {
            invalid_input(&format!(
                "buffer does not describe a {width}x{height} RGBA image"
            ))
        })
    }
}

impl TryFrom<RgbaImage> for PixelBuffer {
    type Error = crate::io::error::SeamprintError;

    fn try_from(img: RgbaImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        Self::from_raw(width, height, img.into_raw())
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}
