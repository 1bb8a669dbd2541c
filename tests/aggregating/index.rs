#[cfg(test)]
mod verify {
    use std::collections::BTreeMap;
    use std::path::Path;

    use markup::aggregating::{aggregate, regroup, Entry, Item};
    use markup::config::Config;
    use markup::matching::Matchers;
    use markup::parsing;

    fn index(file: &str) -> BTreeMap<String, Vec<Item>> {
        let dir = Path::new("tests/samples/");
        let config = Config::load(&dir.join("config.json")).expect("Failed to load sample configuration");
        let elements = config
            .validate(&Matchers::standard())
            .unwrap();

        let content = parsing::load(&dir.join(file)).unwrap();
        let mut document = parsing::parse(&elements, &content);
        config
            .pipeline()
            .unwrap()
            .run(&mut document.tree);

        aggregate(&config.aggregates, &document.tree)
    }

    fn labels(entries: &[Entry]) -> Vec<String> {
        entries
            .iter()
            .map(|entry| match entry {
                Entry::Item(item) => item
                    .label
                    .clone()
                    .unwrap_or_default(),
                Entry::Nested(inner) => format!("[{}]", labels(inner).join(" ")),
            })
            .collect()
    }

    #[test]
    fn contents_in_document_order() {
        let result = index("guide.txt");

        let contents = &result["contents"];
        let texts: Vec<&str> = contents
            .iter()
            .map(|item| item.text.as_str())
            .collect();
        assert_eq!(texts, vec!["Introduction", "Background", "Details", "Summary"]);

        let found: Vec<Option<&str>> = contents
            .iter()
            .map(|item| item.label.as_deref())
            .collect();
        assert_eq!(found, vec![Some("1"), Some("1.1"), Some("1.2"), Some("2")]);
    }

    #[test]
    fn contents_regroup_into_outline() {
        let result = index("guide.txt");

        let outline = regroup(result["contents"].clone());
        assert_eq!(labels(&outline), vec!["1", "[1.1 1.2]", "2"]);
    }

    #[test]
    fn outline_starting_deep() {
        let result = index("notes.txt");

        let outline = regroup(result["contents"].clone());
        assert_eq!(labels(&outline), vec!["[0.1 [0.1.1]]", "1"]);
    }

    #[test]
    fn figures_through_sticky_containers() {
        let result = index("guide.txt");

        let figures = &result["figures"];
        assert_eq!(figures.len(), 1);
        assert_eq!(figures[0].element, "Figure");
        assert_eq!(figures[0].text, "diagram.png");
        assert_eq!(figures[0].label, None);

        assert!(index("notes.txt")["figures"].is_empty());
    }

    #[test]
    fn items_serialize_without_absent_numbers() {
        let result = index("guide.txt");

        let json = serde_json::to_value(&result["figures"]).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "element": "Figure", "text": "diagram.png" }])
        );

        let outline = regroup(result["contents"].clone());
        let json = serde_json::to_value(&outline).unwrap();
        assert_eq!(json[1][0]["label"], "1.1");
        assert_eq!(json[1][1]["numbers"], serde_json::json!([1, 2]));
    }
}
