#[cfg(test)]
mod verify {
    use markup::config::{Config, ConfigError};
    use markup::formatting::canonical;
    use markup::language::*;
    use markup::matching::Matchers;
    use markup::parsing::{self, Elements};
    use markup::scanning::Diagnostic;

    fn elements() -> Elements {
        Elements::new(
            vec![
                Element::new("Paragraph", NodeType::Leaf, ""),
                Element::new("Strong", NodeType::Uniform, "**"),
            ],
            &Matchers::standard(),
        )
        .unwrap()
    }

    #[test]
    fn encoding_problems_are_repaired() {
        let document = parsing::parse(&elements(), b"a\x00b **c\xFF** \xEF\xBB\xBFd");

        assert_eq!(document.source, "a\u{FFFD}b **c** d");
        assert_eq!(
            document.diagnostics,
            vec![
                Diagnostic::IllegalNul(1),
                Diagnostic::InvalidEncoding(7),
                Diagnostic::IllegalByteOrderMark(11),
            ]
        );
        assert_eq!(
            canonical(&document.tree),
            "Container()(\n  Leaf(Paragraph)(\n    Text()(a\u{FFFD}b ),\n    Uniform(Strong)(\n      Text()(c)\n    ),\n    Text()( d)\n  )\n)"
        );
    }

    #[test]
    fn empty_input() {
        let document = parsing::parse(&elements(), b"");
        assert!(document
            .tree
            .is_empty());
        assert!(document
            .diagnostics
            .is_empty());
    }

    #[test]
    fn missing_file() {
        let result = parsing::load(std::path::Path::new("tests/samples/nonexistent.txt"));
        assert!(matches!(result, Err(LoadingError { ref problem, .. }) if problem == "File not found"));
    }

    #[test]
    fn configuration_errors_surface_before_parsing() {
        let config = Config::from_str(
            r#"{
                "elements": [
                    { "name": "Paragraph", "type": "Leaf" },
                    { "name": "Url", "type": "Prefixed", "delimiter": "https://", "matcher": "nothing" }
                ]
            }"#,
        )
        .unwrap();

        let result = config.validate(&Matchers::standard());
        assert!(matches!(
            result,
            Err(ConfigError::UnknownMatcher { ref matcher, .. }) if matcher == "nothing"
        ));

        let result = Config::load(std::path::Path::new("tests/samples/missing.json"));
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
