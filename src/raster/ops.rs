//! Pixel-buffer primitives: crop, resize, paste and channel blending

use crate::io::error::{Result, invalid_input};
use crate::raster::buffer::{CHANNELS, PixelBuffer};
use crate::raster::rectangle::Rectangle;
use image::imageops::{self, FilterType};

/// Copy the pixels under `region` into a new buffer
///
/// The region is clamped to the buffer first. Pixels are copied verbatim;
/// there is no resampling on this path.
///
/// # Errors
///
/// Returns an error if the clamped region is empty
pub fn crop(buffer: &PixelBuffer, region: Rectangle) -> Result<PixelBuffer> {
    let clamped = region.clamp_to(buffer.width(), buffer.height());
    if clamped.is_empty() {
        return Err(invalid_input(&format!(
            "region {region} is empty inside a {}x{} image",
            buffer.width(),
            buffer.height()
        )));
    }

    let start = clamped.x as usize * CHANNELS;
    let span = clamped.width as usize * CHANNELS;
    let mut data = Vec::with_capacity(span * clamped.height as usize);

    for row in buffer
        .rows()
        .skip(clamped.y as usize)
        .take(clamped.height as usize)
    {
        if let Some(pixels) = row.get(start..start + span) {
            data.extend_from_slice(pixels);
        }
    }

    PixelBuffer::from_raw(clamped.width, clamped.height, data)
}

/// Stretch `buffer` to exactly `width x height` with bilinear filtering
///
/// Aspect ratio is not preserved. A buffer that already has the requested
/// size is returned unchanged.
///
/// # Errors
///
/// Returns an error if either target dimension is zero
pub fn resize(buffer: &PixelBuffer, width: u32, height: u32) -> Result<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(invalid_input(&format!(
            "cannot resize to {width}x{height}"
        )));
    }
    if buffer.dimensions() == (width, height) {
        return Ok(buffer.clone());
    }

    let source = buffer.to_rgba_image()?;
    let resized = imageops::resize(&source, width, height, FilterType::Triangle);
    PixelBuffer::try_from(resized)
}

/// Copy `src` into `dest` with its top-left corner at `(x, y)`
///
/// Parts of `src` that fall outside `dest` are clipped.
pub fn paste(dest: &mut PixelBuffer, src: &PixelBuffer, x: i64, y: i64) {
    let target = Rectangle::new(x, y, src.width(), src.height()).clamp_to(dest.width(), dest.height());
    if target.is_empty() {
        return;
    }

    let src_start = (target.x - x) as usize * CHANNELS;
    let dest_start = target.x as usize * CHANNELS;
    let span = target.width as usize * CHANNELS;
    let first_src_row = (target.y - y) as usize;

    let dest_rows = dest
        .rows_mut()
        .skip(target.y as usize)
        .take(target.height as usize);
    let src_rows = src.rows().skip(first_src_row);

    for (dest_row, src_row) in dest_rows.zip(src_rows) {
        if let (Some(to), Some(from)) = (
            dest_row.get_mut(dest_start..dest_start + span),
            src_row.get(src_start..src_start + span),
        ) {
            to.copy_from_slice(from);
        }
    }
}

/// Linear interpolation between two channel values
///
/// `weight` 0 yields `a`, 1 yields `b`. The result is rounded to the nearest
/// integer with ties going to the even value, then clamped to `0..=255`.
// Unfused on purpose: mul_add changes the last bit often enough to flip ties
#[allow(clippy::suboptimal_flops)]
pub fn blend_channel(a: u8, b: u8, weight: f64) -> u8 {
    let mixed = f64::from(a) * (1.0 - weight) + f64::from(b) * weight;
    num_traits::clamp(mixed.round_ties_even(), 0.0, 255.0) as u8
}
