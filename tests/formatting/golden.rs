#[cfg(test)]
mod examples {
    use std::fs;
    use std::path::Path;

    use markup::config::Config;
    use markup::formatting::*;
    use markup::matching::Matchers;
    use markup::parsing;

    /// Round trip test for writing trees back out as source.
    ///
    /// Each sample document is parsed, written back out with to_source(),
    /// and the result parsed again; the two trees must be identical in
    /// canonical form. The written text need not match the original
    /// byte for byte (blank lines are normalized, redundant escapes dropped)
    /// but writing it a second time must reproduce it exactly.

    /// Simple diff function to show line-by-line differences
    fn show_diff(original: &str, written: &str, file_path: &Path) {
        let original_lines: Vec<&str> = original
            .lines()
            .collect();
        let written_lines: Vec<&str> = written
            .lines()
            .collect();

        println!("\nDifferences in {:?}:", file_path);
        let max = original_lines
            .len()
            .max(written_lines.len());
        for i in 0..max {
            let a = original_lines
                .get(i)
                .copied()
                .unwrap_or("");
            let b = written_lines
                .get(i)
                .copied()
                .unwrap_or("");
            if a != b {
                println!("{:4} - {}", i + 1, a);
                println!("{:4} + {}", i + 1, b);
            }
        }
    }

    #[test]
    fn samples_round_trip() {
        let dir = Path::new("tests/samples/");
        let config = Config::load(&dir.join("config.json")).expect("Failed to load sample configuration");
        let elements = config
            .validate(&Matchers::standard())
            .expect("Sample configuration should be valid");

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).expect("Failed to read samples directory") {
            let path = entry
                .expect("Failed to read directory entry")
                .path();
            if path
                .extension()
                .and_then(|s| s.to_str())
                == Some("txt")
            {
                files.push(path);
            }
        }
        assert!(!files.is_empty(), "No .txt files found in samples directory");

        let mut failures = 0;

        for file in &files {
            let content = fs::read_to_string(file).expect("Failed to read sample");

            let tree = parsing::parse_str(&elements, &content);
            let written = to_source(&tree, &elements);
            let again = parsing::parse_str(&elements, &written);

            if canonical(&tree) != canonical(&again) {
                show_diff(&canonical(&tree), &canonical(&again), file);
                failures += 1;
                continue;
            }

            let rewritten = to_source(&again, &elements);
            if rewritten != written {
                show_diff(&written, &rewritten, file);
                failures += 1;
            }
        }

        if failures > 0 {
            panic!("{} sample files did not survive being written back out", failures);
        }
    }
}
