//! Tests for command-line interface parsing and file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use seamprint::io::cli::{Cli, FileProcessor, parse_region};
    use seamprint::io::configuration::{
        DEFAULT_BLOCK_SIZE, DEFAULT_PREVIEW_SIZE, DEFAULT_TILE_SIZE, DEFAULT_TILES_X,
        DEFAULT_TILES_Y, PREVIEW_SUFFIX, TILED_SUFFIX,
    };
    use seamprint::io::image::{load_pixel_buffer, save_pixel_buffer};
    use seamprint::pipeline::LocateMode;
    use seamprint::raster::{PixelBuffer, Rectangle};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn create_test_cli(target: &str) -> Cli {
        Cli::parse_from(["program", target, "--quiet"])
    }

    fn small_run_cli(target: &Path, extra: &[&str]) -> Cli {
        let mut args = vec![
            "program".to_string(),
            target.to_string_lossy().to_string(),
            "--quiet".to_string(),
            "--tile-size".to_string(),
            "64".to_string(),
            "--tiles-x".to_string(),
            "2".to_string(),
            "--tiles-y".to_string(),
            "3".to_string(),
            "--preview-size".to_string(),
            "32".to_string(),
        ];
        args.extend(extra.iter().map(ToString::to_string));
        Cli::parse_from(args)
    }

    fn write_checker_png(path: &Path) {
        let image = PixelBuffer::from_fn(48, 48, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                [230, 40, 40, 255]
            } else {
                [20, 20, 160, 255]
            }
        })
        .unwrap();
        save_pixel_buffer(&image, path).unwrap();
    }

    // Tests CLI parsing with only required target file argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "test.png"]);

        assert_eq!(cli.target, PathBuf::from("test.png"));
        assert_eq!(cli.tile_size, DEFAULT_TILE_SIZE);
        assert_eq!((cli.tiles_x, cli.tiles_y), (DEFAULT_TILES_X, DEFAULT_TILES_Y));
        assert_eq!(cli.block_size, DEFAULT_BLOCK_SIZE);
        assert_eq!(cli.preview_size, DEFAULT_PREVIEW_SIZE);
        assert!(cli.region.is_none());
        assert!(!cli.quiet);
        assert!(!cli.no_blend);
    }

    // Tests CLI parsing with all available arguments
    // Verified by modifying custom parsers to ensure they're invoked
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "input.png",
            "--output-dir",
            "out",
            "--tile-size",
            "128",
            "--tiles-x",
            "3",
            "--tiles-y",
            "5",
            "--no-blend",
            "--preview-size",
            "256",
            "--edge-threshold",
            "42.5",
            "--block-size",
            "16",
            "--variance-threshold",
            "12",
            "--region",
            "5,6,40,50",
            "--skip-segmentation",
            "--pattern-set",
            "--no-skip",
            "--quiet",
            "--verbose",
        ]);

        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.tile_size, 128);
        assert_eq!((cli.tiles_x, cli.tiles_y), (3, 5));
        assert!(cli.no_blend);
        assert_eq!(cli.preview_size, 256);
        assert_eq!(cli.block_size, 16);
        assert_eq!(cli.region, Some(Rectangle::new(5, 6, 40, 50)));
        assert!(cli.skip_segmentation && cli.pattern_set && cli.verbose);
        assert!(!cli.skip_existing());
        assert!(!cli.should_show_progress());
    }

    // Tests short flag parsing
    // Verified by changing short flag definitions
    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["program", "test.png", "-t", "96", "-x", "2", "-y", "8", "-q"]);

        assert_eq!(cli.tile_size, 96);
        assert_eq!((cli.tiles_x, cli.tiles_y), (2, 8));
        assert!(cli.quiet);
    }

    // Tests tile size and count ranges are enforced at parse time
    // Verified by removing the value_parser ranges
    #[test]
    fn test_cli_rejects_out_of_range_values() {
        assert!(Cli::try_parse_from(["program", "a.png", "--tile-size", "32"]).is_err());
        assert!(Cli::try_parse_from(["program", "a.png", "--tile-size", "1024"]).is_err());
        assert!(Cli::try_parse_from(["program", "a.png", "--tiles-x", "1"]).is_err());
        assert!(Cli::try_parse_from(["program", "a.png", "--tiles-y", "9"]).is_err());
        assert!(Cli::try_parse_from(["program", "a.png", "--block-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["program", "a.png", "--region", "0,0,10,40"]).is_err());
    }

    // Tests region parsing accepts four integers with a selectable extent
    // Verified by swapping width and height fields
    #[test]
    fn test_parse_region() {
        assert_eq!(
            parse_region("5, 6, 20, 30"),
            Ok(Rectangle::new(5, 6, 20, 30))
        );
        assert_eq!(
            parse_region("-5,-8,40,40"),
            Ok(Rectangle::new(-5, -8, 40, 40))
        );
        assert!(parse_region("1,2,30").is_err());
        assert!(parse_region("1,2,30,40,50").is_err());
        assert!(parse_region("a,2,30,40").is_err());
        assert!(parse_region("1,2,-30,40").is_err());
        assert!(parse_region("0,0,11,10").is_err());
        assert!(parse_region("0,0,11,11").is_ok());
    }

    // Tests arguments map onto the pipeline configuration
    // Verified by ignoring the --no-blend flag
    #[test]
    fn test_pipeline_config_from_args() {
        let cli = Cli::parse_from([
            "program",
            "a.png",
            "--no-blend",
            "--skip-segmentation",
            "--tile-size",
            "80",
            "--edge-threshold",
            "12",
        ]);
        let config = cli.pipeline_config();

        assert!(!config.tiles.blend_edges);
        assert!(config.skip_segmentation);
        assert_eq!(config.tiles.tile_size, 80);
        assert!((config.segmenter.edge_threshold - 12.0).abs() < f64::EPSILON);
        assert!(config.segmenter.seed.is_none());
        assert!(config.validate().is_ok());
    }

    // Tests locate mode follows the --region flag
    // Verified by always returning automatic mode
    #[test]
    fn test_locate_mode() {
        let auto = Cli::parse_from(["program", "a.png"]);
        assert_eq!(auto.locate_mode(), LocateMode::Auto);

        let manual = Cli::parse_from(["program", "a.png", "--region", "1,2,30,40"]);
        assert_eq!(
            manual.locate_mode(),
            LocateMode::Manual(Rectangle::new(1, 2, 30, 40))
        );
    }

    // Tests default log filter follows --verbose
    // Verified by inverting the verbose check
    #[test]
    fn test_log_filter() {
        assert_eq!(Cli::parse_from(["program", "a.png"]).log_filter(), "warn");
        assert_eq!(
            Cli::parse_from(["program", "a.png", "--verbose"]).log_filter(),
            "debug"
        );
    }

    // Tests error handling for missing files
    // Verified by removing error return for nonexistent files
    #[test]
    fn test_process_nonexistent_file() {
        let mut processor = FileProcessor::new(create_test_cli("nonexistent.png"));
        assert!(processor.process().is_err());
    }

    // Tests error handling for unsupported files
    // Verified by removing file type validation
    #[test]
    fn test_process_invalid_file_type() {
        let temp_dir = TempDir::new().unwrap();
        let txt_file = temp_dir.path().join("test.txt");
        fs::write(&txt_file, "not an image").unwrap();

        let mut processor = FileProcessor::new(create_test_cli(txt_file.to_str().unwrap()));
        assert!(processor.process().is_err());
    }

    // Tests processing empty directories
    // Verified by adding error for empty directories
    #[test]
    fn test_process_empty_directory() {
        let temp_dir = TempDir::new().unwrap();

        let mut processor =
            FileProcessor::new(create_test_cli(temp_dir.path().to_str().unwrap()));
        assert_eq!(processor.process().unwrap(), 0);
    }

    // Tests a full run writes every output with the requested sizes
    // Verified by skipping the preview export
    #[test]
    fn test_process_single_file_writes_outputs() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("fabric.png");
        write_checker_png(&input);

        let mut processor = FileProcessor::new(small_run_cli(&input, &[]));
        assert_eq!(processor.process().unwrap(), 1);

        let dir = temp_dir.path();
        let segmented = load_pixel_buffer(&dir.join("fabric_segmented.png")).unwrap();
        assert_eq!(segmented.dimensions(), (48, 48));
        assert!(dir.join("fabric_pattern.png").exists());

        let tiled = load_pixel_buffer(&dir.join("fabric_tiled.png")).unwrap();
        assert_eq!(tiled.dimensions(), (128, 192));

        let preview = load_pixel_buffer(&dir.join("fabric_preview.png")).unwrap();
        assert_eq!(preview.dimensions(), (32, 32));
    }

    // Tests skip logic when the tiled output already exists
    // Verified by removing skip check
    #[test]
    fn test_skip_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("fabric.png");
        write_checker_png(&input);
        fs::write(temp_dir.path().join("fabric_tiled.png"), "existing").unwrap();

        let mut skipping = FileProcessor::new(small_run_cli(&input, &[]));
        assert_eq!(skipping.process().unwrap(), 0);
        assert!(!temp_dir.path().join("fabric_preview.png").exists());

        let mut forced = FileProcessor::new(small_run_cli(&input, &["--no-skip"]));
        assert_eq!(forced.process().unwrap(), 1);
        assert!(temp_dir.path().join("fabric_preview.png").exists());
    }

    // Tests directory targets pick up only supported images, sorted
    // Verified by matching extensions case-sensitively
    #[test]
    fn test_collect_files_from_directory() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["b.PNG", "a.jpg", "c.png"] {
            fs::write(temp_dir.path().join(name), "placeholder").unwrap();
        }
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let processor = FileProcessor::new(create_test_cli(temp_dir.path().to_str().unwrap()));
        let files = processor.collect_files().unwrap();

        let names: Vec<_> = files
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.PNG", "c.png"]);
    }

    // Tests outputs and the pattern set land in --output-dir
    // Verified by writing next to the input regardless of the flag
    #[test]
    fn test_output_dir_and_pattern_set() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("fabric.png");
        write_checker_png(&input);
        let out = temp_dir.path().join("out");
        let out_arg = out.to_string_lossy().to_string();

        let mut processor = FileProcessor::new(small_run_cli(
            &input,
            &["--output-dir", &out_arg, "--pattern-set"],
        ));
        assert_eq!(processor.process().unwrap(), 1);

        assert!(out.join("fabric_tiled.png").exists());
        assert!(!temp_dir.path().join("fabric_tiled.png").exists());
        let archive = fs::File::open(out.join("fabric_set.zip")).unwrap();
        let archive = zip::ZipArchive::new(archive).unwrap();
        let mut names: Vec<_> = archive.file_names().collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![
                "fabric_128x128.png",
                "fabric_256x256.png",
                "fabric_512x512.png",
                "fabric_full.png"
            ]
        );
    }

    // Tests a second run over a directory ignores the outputs of the first
    // Verified by dropping the generated-output filter from collect_files
    #[test]
    fn test_rerun_on_directory_ignores_outputs() {
        let temp_dir = TempDir::new().unwrap();
        write_checker_png(&temp_dir.path().join("shirt.png"));

        let mut first = FileProcessor::new(small_run_cli(temp_dir.path(), &[]));
        assert_eq!(first.process().unwrap(), 1);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 5);

        let mut second = FileProcessor::new(small_run_cli(temp_dir.path(), &[]));
        assert_eq!(second.process().unwrap(), 0);

        let mut forced = FileProcessor::new(small_run_cli(temp_dir.path(), &["--no-skip"]));
        assert_eq!(forced.process().unwrap(), 1);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 5);
    }

    // Tests only PNGs carrying an output suffix count as earlier outputs
    // Verified by matching the suffix anywhere in the stem
    #[test]
    fn test_collect_files_skips_generated_outputs() {
        let temp_dir = TempDir::new().unwrap();
        for name in [
            "look.png",
            "look_segmented.png",
            "look_pattern.png",
            "look_preview.PNG",
            "look_tiled_tiled.png",
            "pattern_look.png",
            "look_tiled.jpg",
        ] {
            fs::write(temp_dir.path().join(name), "placeholder").unwrap();
        }

        let cli = Cli::parse_from(["program", temp_dir.path().to_str().unwrap(), "-q", "-n"]);
        let names: Vec<_> = FileProcessor::new(cli)
            .collect_files()
            .unwrap()
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["look.png", "look_tiled.jpg", "pattern_look.png"]);
    }

    // Tests output names keep dotted stems intact
    // Verified by replacing the extension instead of appending the suffix
    #[test]
    fn test_output_path_generation() {
        let processor = FileProcessor::new(create_test_cli("photos/look.book.jpg"));

        assert_eq!(
            processor.output_path(Path::new("photos/look.book.jpg"), TILED_SUFFIX),
            PathBuf::from("photos/look.book_tiled.png")
        );
        assert_eq!(
            processor.output_path(Path::new("photos/look.book.jpg"), PREVIEW_SUFFIX),
            PathBuf::from("photos/look.book_preview.png")
        );
    }
}
