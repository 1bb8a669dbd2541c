#[cfg(test)]
mod samples {
    use std::fs;
    use std::path::Path;

    use markup::config::Config;
    use markup::matching::Matchers;
    use markup::parsing;

    #[test]
    fn ensure_samples_parse() {
        let dir = Path::new("tests/samples/");

        assert!(dir.exists(), "samples directory missing");

        let config = Config::load(&dir.join("config.json")).expect("Failed to load sample configuration");
        let elements = config
            .validate(&Matchers::standard())
            .expect("Sample configuration should be valid");
        let pipeline = config
            .pipeline()
            .expect("Sample pipeline should build");

        let entries = fs::read_dir(dir).expect("Failed to read samples directory");

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();

            if path
                .extension()
                .and_then(|s| s.to_str())
                == Some("txt")
            {
                files.push(path);
            }
        }

        assert!(!files.is_empty(), "No .txt files found in samples directory");

        let mut failures = Vec::new();

        for file in &files {
            let content = parsing::load(&file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            let mut document = parsing::parse(&elements, &content);
            if !document
                .diagnostics
                .is_empty()
            {
                println!("File {:?} had diagnostics: {:?}", file, document.diagnostics);
                failures.push(file.clone());
                continue;
            }
            if document
                .tree
                .is_empty()
            {
                println!("File {:?} parsed to an empty tree", file);
                failures.push(file.clone());
                continue;
            }

            pipeline.run(&mut document.tree);
        }

        if !failures.is_empty() {
            panic!(
                "Sample files should parse cleanly, but {} files failed",
                failures.len()
            );
        }
    }
}
