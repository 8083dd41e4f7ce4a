//! Checks that the test tree keeps pace with the source tree
//!
//! Every source module needs a unit test file at the same relative path,
//! every unit test file must be declared so it actually compiles, and every
//! processing stage needs at least one end-to-end scenario.

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::{Path, PathBuf};

    const SRC: &str = "src";
    const UNIT: &str = "tests/unit";
    const SCENARIOS: &str = "tests/pipeline.rs";

    // Host plumbing rather than an image processing stage
    const NON_STAGE_MODULES: [&str; 1] = ["io"];

    // Relative paths of every `.rs` file below `root`
    fn rust_files(root: &Path) -> BTreeSet<PathBuf> {
        let mut found = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    found.insert(path.strip_prefix(root).unwrap().to_path_buf());
                }
            }
        }

        found
    }

    // Crate roots and module declaration files carry no logic of their own
    fn is_wiring(path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name == "lib.rs" || name == "main.rs" || name == "mod.rs")
    }

    // Top-level module directories under `src/`
    fn module_dirs() -> Vec<String> {
        let mut dirs: Vec<String> = fs::read_dir(SRC)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.is_dir())
            .filter_map(|path| path.file_name().map(|name| name.to_string_lossy().to_string()))
            .collect();
        dirs.sort();
        dirs
    }

    fn report(title: &str, entries: &[String]) -> String {
        format!("{title}:\n  - {}", entries.join("\n  - "))
    }

    // Tests each source file has a unit test file at the mirrored path
    // Verified by deleting tests/unit/tiling/blend.rs
    #[test]
    fn test_source_files_have_unit_tests() {
        let tests = rust_files(Path::new(UNIT));
        let missing: Vec<String> = rust_files(Path::new(SRC))
            .into_iter()
            .filter(|path| !is_wiring(path) && !tests.contains(path))
            .map(|path| path.display().to_string())
            .collect();

        assert!(
            missing.is_empty(),
            "{}",
            report("source files without tests/unit counterparts", &missing)
        );
    }

    // Tests unit test files do not outlive their source module
    // Verified by adding tests/unit/raster/stale.rs
    #[test]
    fn test_unit_tests_have_source_files() {
        let sources = rust_files(Path::new(SRC));
        let orphaned: Vec<String> = rust_files(Path::new(UNIT))
            .into_iter()
            .filter(|path| !is_wiring(path) && !sources.contains(path))
            .map(|path| path.display().to_string())
            .collect();

        assert!(
            orphaned.is_empty(),
            "{}",
            report("unit test files without a source file", &orphaned)
        );
    }

    // Tests every unit test file is reachable from the harness root
    // Verified by removing `pub mod locator;` from tests/unit/pattern/mod.rs
    #[test]
    fn test_unit_tests_are_declared() {
        let root = fs::read_to_string(Path::new(UNIT).join("main.rs")).unwrap();
        let mut undeclared = Vec::new();

        for module in module_dirs() {
            if !root.contains(&format!("mod {module};")) {
                undeclared.push(format!("{UNIT}/main.rs: mod {module};"));
            }

            let dir = Path::new(UNIT).join(&module);
            let declarations = fs::read_to_string(dir.join("mod.rs")).unwrap_or_default();
            for file in rust_files(&dir) {
                if is_wiring(&file) {
                    continue;
                }
                let stem = file.with_extension("");
                let name = stem.to_string_lossy();
                if !declarations.contains(&format!("pub mod {name};")) {
                    undeclared.push(format!("{}: pub mod {name};", dir.join("mod.rs").display()));
                }
            }
        }

        assert!(
            undeclared.is_empty(),
            "{}",
            report("missing module declarations", &undeclared)
        );
    }

    // Tests every stage module is exercised by an end-to-end scenario
    // Verified by dropping the segmentation import from tests/pipeline.rs
    #[test]
    fn test_stages_have_scenarios() {
        let scenarios = fs::read_to_string(SCENARIOS).unwrap();
        let uncovered: Vec<String> = module_dirs()
            .into_iter()
            .filter(|module| !NON_STAGE_MODULES.contains(&module.as_str()))
            .filter(|module| !scenarios.contains(&format!("seamprint::{module}")))
            .collect();

        assert!(
            uncovered.is_empty(),
            "{}",
            report("stage modules missing from tests/pipeline.rs", &uncovered)
        );
    }

    // Tests each non-wiring test file contains at least one test
    // Verified by stripping #[test] from tests/unit/io/error.rs
    #[test]
    fn test_test_files_contain_tests() {
        let tests_dir = Path::new("tests");
        let empty: Vec<String> = rust_files(tests_dir)
            .into_iter()
            .filter(|path| !is_wiring(path))
            .filter(|path| {
                !fs::read_to_string(tests_dir.join(path))
                    .unwrap()
                    .contains("#[test]")
            })
            .map(|path| path.display().to_string())
            .collect();

        assert!(
            empty.is_empty(),
            "{}",
            report("test files without any #[test]", &empty)
        );
    }
}
