//! Image decoding, PNG export and pattern set archiving at the host boundary

use crate::io::configuration::{PATTERN_SET_FULL_SUFFIX, PATTERN_SET_SIZES};
use crate::io::error::{Result, SeamprintError};
use crate::raster::PixelBuffer;
use crate::raster::ops::resize;
use image::ImageFormat;
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Decode any format the `image` crate supports into an RGBA buffer
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, or decodes to an
/// image with a zero dimension
pub fn load_pixel_buffer(path: &Path) -> Result<PixelBuffer> {
    let decoded = image::open(path).map_err(|e| SeamprintError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    let buffer = PixelBuffer::try_from(decoded.into_rgba8())?;
    debug!(
        path = %path.display(),
        width = buffer.width(),
        height = buffer.height(),
        "decoded source image"
    );
    Ok(buffer)
}

// Create the directory an output file will land in
fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| SeamprintError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}

/// Encode a buffer as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_pixel_buffer(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    ensure_parent(path)?;

    buffer
        .to_rgba_image()?
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| SeamprintError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })?;

    debug!(path = %path.display(), "wrote png");
    Ok(())
}

// Encode a buffer as PNG bytes; `target` names the file in errors
fn encode_png(buffer: &PixelBuffer, target: &Path) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    buffer
        .to_rgba_image()?
        .write_to(&mut bytes, ImageFormat::Png)
        .map_err(|e| SeamprintError::ImageExport {
            path: target.to_path_buf(),
            source: e,
        })?;
    Ok(bytes.into_inner())
}

// Store one PNG in the archive; entries are not recompressed
fn add_entry(writer: &mut ZipWriter<File>, name: &str, png: &[u8], archive: &Path) -> Result<()> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    writer
        .start_file(name, options)
        .map_err(|e| SeamprintError::Archive {
            path: archive.to_path_buf(),
            source: e,
        })?;
    writer
        .write_all(png)
        .map_err(|e| SeamprintError::FileSystem {
            path: archive.to_path_buf(),
            operation: "write archive entry",
            source: e,
        })
}

/// Bundle a tiling at full size plus the square resolution set into a ZIP
///
/// The archive holds `<base>_full.png` and `<base>_<n>x<n>.png` for every
/// size in [`PATTERN_SET_SIZES`]. The square versions are stretched, not
/// cropped. Returns the entry names, full size first.
///
/// # Errors
///
/// Returns an error if the archive cannot be created or any entry fails to
/// encode or write
pub fn export_pattern_set(tiling: &PixelBuffer, archive: &Path, base: &str) -> Result<Vec<String>> {
    ensure_parent(archive)?;
    let file = File::create(archive).map_err(|e| SeamprintError::FileSystem {
        path: archive.to_path_buf(),
        operation: "create archive",
        source: e,
    })?;
    let mut writer = ZipWriter::new(file);

    let full_name = format!("{base}{PATTERN_SET_FULL_SUFFIX}.png");
    add_entry(&mut writer, &full_name, &encode_png(tiling, archive)?, archive)?;

    let mut entries = vec![full_name];
    for size in PATTERN_SET_SIZES {
        let name = format!("{base}_{size}x{size}.png");
        let png = encode_png(&resize(tiling, size, size)?, archive)?;
        add_entry(&mut writer, &name, &png, archive)?;
        entries.push(name);
    }

    writer.finish().map_err(|e| SeamprintError::Archive {
        path: archive.to_path_buf(),
        source: e,
    })?;

    debug!(path = %archive.display(), entries = entries.len(), "wrote pattern set");
    Ok(entries)
}
