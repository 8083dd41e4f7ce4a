//! Stage defaults and runtime configuration constants

// Segmentation
/// Gradient magnitude below which a pixel may join the foreground
pub const DEFAULT_EDGE_THRESHOLD: f64 = 50.0;

// Pattern location
/// Side length of the square blocks scored for texture variance
pub const DEFAULT_BLOCK_SIZE: u32 = 20;
/// Brightness variance a block must exceed to be treated as patterned
pub const DEFAULT_VARIANCE_THRESHOLD: f64 = 30.0;
/// Blocks of context added on each side of the richest block
pub const EXPANSION_BLOCKS: u32 = 2;
/// Cap on the expanded selection, in multiples of the expansion distance
pub const EXPANSION_CAP_MULTIPLIER: u32 = 3;
/// Offset of the fallback rectangle from each edge, in percent of the image side
pub const FALLBACK_MARGIN_PERCENT: u32 = 20;
/// Extent of the fallback rectangle, in percent of the image side
pub const FALLBACK_EXTENT_PERCENT: u32 = 60;
/// Manual selections must be strictly larger than this on both sides
pub const MIN_SELECTION_SIZE: u32 = 10;

// Tiling
/// Side length of a single rendered tile
pub const DEFAULT_TILE_SIZE: u32 = 256;
/// Horizontal tile count for the full render
pub const DEFAULT_TILES_X: u32 = 4;
/// Vertical tile count for the full render
pub const DEFAULT_TILES_Y: u32 = 4;
/// The cross-fade band is `floor(tile side / BLEND_BAND_DIVISOR)` pixels wide
pub const BLEND_BAND_DIVISOR: u32 = 10;
/// Side length of the 2x2 preview
pub const DEFAULT_PREVIEW_SIZE: u32 = 512;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output dimension in pixels
pub const MAX_OUTPUT_DIMENSION: u32 = 16_384;

// Host limits mirroring the interactive controls
/// Smallest tile size accepted by the command-line host
pub const MIN_CLI_TILE_SIZE: u32 = 64;
/// Largest tile size accepted by the command-line host
pub const MAX_CLI_TILE_SIZE: u32 = 512;
/// Smallest tile count accepted by the command-line host
pub const MIN_CLI_TILE_COUNT: u32 = 2;
/// Largest tile count accepted by the command-line host
pub const MAX_CLI_TILE_COUNT: u32 = 8;

// Output settings
/// Square resolutions written alongside the full render in a pattern set
pub const PATTERN_SET_SIZES: [u32; 3] = [512, 256, 128];
/// Suffix for the segmented output
pub const SEGMENTED_SUFFIX: &str = "_segmented";
/// Suffix for the extracted pattern crop
pub const PATTERN_SUFFIX: &str = "_pattern";
/// Suffix for the full tiled render
pub const TILED_SUFFIX: &str = "_tiled";
/// Suffix for the 2x2 preview
pub const PREVIEW_SUFFIX: &str = "_preview";
/// Every per-image PNG suffix; directory scans skip files ending in one
pub const OUTPUT_SUFFIXES: [&str; 4] = [
    SEGMENTED_SUFFIX,
    PATTERN_SUFFIX,
    TILED_SUFFIX,
    PREVIEW_SUFFIX,
];
/// Suffix for the ZIP archive holding an exported pattern set
pub const PATTERN_SET_SUFFIX: &str = "_set";
/// Entry suffix for the full-size render inside a pattern set
pub const PATTERN_SET_FULL_SUFFIX: &str = "_full";
/// File extensions picked up when the target is a directory
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
