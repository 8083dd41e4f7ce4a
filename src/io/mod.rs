/// Command-line argument parsing and batch file processing
pub mod cli;
/// Stage defaults and host limits
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Image decoding, PNG export and pattern set archives
pub mod image;
/// Batch progress display
pub mod progress;
