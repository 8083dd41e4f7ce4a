//! Command-line interface for batch pattern extraction

use crate::io::configuration::{
    DEFAULT_BLOCK_SIZE, DEFAULT_EDGE_THRESHOLD, DEFAULT_PREVIEW_SIZE, DEFAULT_TILE_SIZE,
    DEFAULT_TILES_X, DEFAULT_TILES_Y, DEFAULT_VARIANCE_THRESHOLD, MAX_CLI_TILE_COUNT,
    MAX_CLI_TILE_SIZE, MAX_OUTPUT_DIMENSION, MIN_CLI_TILE_COUNT, MIN_CLI_TILE_SIZE,
    MIN_SELECTION_SIZE, OUTPUT_SUFFIXES, PATTERN_SET_SUFFIX, PATTERN_SUFFIX, PREVIEW_SUFFIX, SEGMENTED_SUFFIX,
    SUPPORTED_EXTENSIONS, TILED_SUFFIX,
};
use crate::io::error::{Result, SeamprintError, invalid_input};
use crate::io::image::{export_pattern_set, load_pixel_buffer, save_pixel_buffer};
use crate::io::progress::{ProgressManager, Stage};
use crate::pattern::LocatorConfig;
use crate::pipeline::{LocateMode, Pipeline, PipelineConfig};
use crate::raster::Rectangle;
use crate::segmentation::SegmenterConfig;
use crate::tiling::TileConfig;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Parse a manual selection given as `X,Y,W,H`
///
/// # Errors
///
/// Returns a message if the value does not have four integer fields or the
/// selection is not larger than the minimum on both sides
pub fn parse_region(value: &str) -> std::result::Result<Rectangle, String> {
    let fields: Vec<&str> = value.split(',').map(str::trim).collect();
    let &[x, y, width, height] = fields.as_slice() else {
        return Err(format!("expected X,Y,W,H, got '{value}'"));
    };

    let position = |field: &str| {
        field
            .parse::<i64>()
            .map_err(|e| format!("invalid coordinate '{field}': {e}"))
    };
    let extent = |field: &str| {
        field
            .parse::<u32>()
            .map_err(|e| format!("invalid extent '{field}': {e}"))
    };

    let region = Rectangle::new(position(x)?, position(y)?, extent(width)?, extent(height)?);
    if region.is_selectable() {
        Ok(region)
    } else {
        Err(format!(
            "selection {region} must be larger than {MIN_SELECTION_SIZE} px on both sides"
        ))
    }
}

#[derive(Parser)]
#[command(name = "seamprint")]
#[command(
    author,
    version,
    about = "Extract a repeating textile print from a photo and render it as seamless tiles"
)]
/// Command-line arguments for the extraction tool
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory for outputs (defaults to next to each input)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Side length of one tile in pixels
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_TILE_SIZE,
        value_parser = clap::value_parser!(u32)
            .range(i64::from(MIN_CLI_TILE_SIZE)..=i64::from(MAX_CLI_TILE_SIZE))
    )]
    pub tile_size: u32,

    /// Number of tile columns
    #[arg(
        short = 'x',
        long,
        default_value_t = DEFAULT_TILES_X,
        value_parser = clap::value_parser!(u32)
            .range(i64::from(MIN_CLI_TILE_COUNT)..=i64::from(MAX_CLI_TILE_COUNT))
    )]
    pub tiles_x: u32,

    /// Number of tile rows
    #[arg(
        short = 'y',
        long,
        default_value_t = DEFAULT_TILES_Y,
        value_parser = clap::value_parser!(u32)
            .range(i64::from(MIN_CLI_TILE_COUNT)..=i64::from(MAX_CLI_TILE_COUNT))
    )]
    pub tiles_y: u32,

    /// Repeat the tile without cross-fading its edges
    #[arg(long)]
    pub no_blend: bool,

    /// Side length of the 2x2 preview
    #[arg(
        long,
        default_value_t = DEFAULT_PREVIEW_SIZE,
        value_parser = clap::value_parser!(u32).range(2..=i64::from(MAX_OUTPUT_DIMENSION))
    )]
    pub preview_size: u32,

    /// Gradient magnitude below which a pixel joins the foreground
    #[arg(short, long, default_value_t = DEFAULT_EDGE_THRESHOLD)]
    pub edge_threshold: f64,

    /// Side length of the blocks scored for texture
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_BLOCK_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub block_size: u32,

    /// Variance a block must exceed to be used as the pattern
    #[arg(long, default_value_t = DEFAULT_VARIANCE_THRESHOLD)]
    pub variance_threshold: f64,

    /// Manual pattern selection as X,Y,W,H instead of automatic location
    #[arg(short, long, value_name = "X,Y,W,H", value_parser = parse_region)]
    pub region: Option<Rectangle>,

    /// Locate the pattern on the unsegmented source
    #[arg(short, long)]
    pub skip_segmentation: bool,

    /// Also bundle the tiling at full size, 512, 256 and 128 px into a ZIP
    #[arg(short, long)]
    pub pattern_set: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log stage decisions at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Default log filter when `RUST_LOG` is unset
    pub const fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }

    /// Pipeline settings assembled from the arguments
    pub const fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            segmenter: SegmenterConfig {
                edge_threshold: self.edge_threshold,
                seed: None,
            },
            locator: LocatorConfig {
                block_size: self.block_size,
                variance_threshold: self.variance_threshold,
            },
            tiles: TileConfig {
                tile_size: self.tile_size,
                tiles_x: self.tiles_x,
                tiles_y: self.tiles_y,
                blend_edges: !self.no_blend,
            },
            preview_size: self.preview_size,
            skip_segmentation: self.skip_segmentation,
        }
    }

    /// Manual selection if one was given, otherwise automatic location
    pub const fn locate_mode(&self) -> LocateMode {
        match self.region {
            Some(region) => LocateMode::Manual(region),
            None => LocateMode::Auto,
        }
    }
}

// Image extensions the batch mode picks up, compared case-insensitively
fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

// PNGs this tool wrote next to an input, recognised by their stem suffix
fn is_generated_output(path: &Path) -> bool {
    let is_png = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    is_png
        && OUTPUT_SUFFIXES
            .iter()
            .any(|suffix| file_stem(path).ends_with(suffix))
}

/// Orchestrates batch processing of image files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// Returns the number of files processed.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments form an invalid pipeline, the
    /// target cannot be read, or any file fails to process
    pub fn process(&mut self) -> Result<usize> {
        let pipeline = Pipeline::new(self.cli.pipeline_config())?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(0);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            self.process_file(&pipeline, file)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(files.len())
    }

    /// Input files the target resolves to, sorted, with already processed
    /// files removed unless skipping is disabled
    ///
    /// Directory scans never pick up outputs of an earlier run, even with
    /// `--no-skip`.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a supported image nor a
    /// readable directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;

        if target.is_file() {
            if !is_supported_image(target) {
                return Err(invalid_input(&format!(
                    "target file must be one of: {}",
                    SUPPORTED_EXTENSIONS.join(", ")
                )));
            }
            return Ok(self
                .should_process_file(target)
                .then(|| target.clone())
                .into_iter()
                .collect());
        }

        if !target.is_dir() {
            return Err(invalid_input(&format!(
                "target '{}' must be an image file or directory",
                target.display()
            )));
        }

        let read_error = |e: std::io::Error| SeamprintError::FileSystem {
            path: target.clone(),
            operation: "read directory",
            source: e,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(target).map_err(read_error)? {
            let path = entry.map_err(read_error)?.path();
            if path.is_file()
                && is_supported_image(&path)
                && !is_generated_output(&path)
                && self.should_process_file(&path)
            {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path(input_path, TILED_SUFFIX);
        if output_path.exists() {
            // Allow print for user feedback for skipped files
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, pipeline: &Pipeline, input_path: &Path) -> Result<()> {
        let start_time = Instant::now();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(input_path);
            pm.set_stage(Stage::Loading);
        }
        let image = load_pixel_buffer(input_path)?;

        if let Some(ref pm) = self.progress_manager {
            pm.set_stage(Stage::Extracting);
        }
        let output = pipeline.run(&image, self.cli.locate_mode())?;

        if let Some(ref pm) = self.progress_manager {
            pm.set_stage(Stage::Writing);
        }
        for (buffer, suffix) in [
            (&output.segmented, SEGMENTED_SUFFIX),
            (&output.pattern, PATTERN_SUFFIX),
            (&output.tiling, TILED_SUFFIX),
            (&output.preview, PREVIEW_SUFFIX),
        ] {
            save_pixel_buffer(buffer, &self.output_path(input_path, suffix))?;
        }

        if self.cli.pattern_set {
            let stem = file_stem(input_path);
            let archive =
                self.output_location(&format!("{stem}{PATTERN_SET_SUFFIX}.zip"), input_path);
            export_pattern_set(&output.tiling, &archive, &stem)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file();
        }

        info!(
            input = %input_path.display(),
            region = %output.region,
            elapsed_ms = start_time.elapsed().as_millis(),
            "processed file"
        );
        Ok(())
    }

    /// PNG path for one output of `input_path`: `<stem><suffix>.png` in the
    /// output directory, or next to the input when none is set
    pub fn output_path(&self, input_path: &Path, suffix: &str) -> PathBuf {
        self.output_location(&format!("{}{suffix}.png", file_stem(input_path)), input_path)
    }

    fn output_location(&self, name: &str, input_path: &Path) -> PathBuf {
        match (&self.cli.output_dir, input_path.parent()) {
            (Some(dir), _) => dir.join(name),
            (None, Some(parent)) => parent.join(name),
            (None, None) => PathBuf::from(name),
        }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
