#[cfg(test)]
mod verify {
    use std::path::Path;

    use markup::config::Config;
    use markup::language::{label, Body, NodeId, Position, Tree};
    use markup::matching::Matchers;
    use markup::parsing;

    fn transformed(file: &str) -> Tree {
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
        document.tree
    }

    fn find(tree: &Tree, element: &str) -> Vec<NodeId> {
        tree.descendants(tree.root())
            .into_iter()
            .filter(|id| tree.node(*id).element == element)
            .collect()
    }

    fn elements_of(tree: &Tree, id: NodeId) -> Vec<String> {
        tree.children(id)
            .iter()
            .map(|child| {
                tree.effective_element(*child)
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn items_are_grouped() {
        let tree = transformed("guide.txt");

        let lists = find(&tree, "List");
        assert_eq!(lists.len(), 1);
        assert_eq!(elements_of(&tree, lists[0]), vec!["Item", "Item"]);
        assert!(matches!(
            tree.node(lists[0])
                .body,
            Body::Group(_)
        ));
    }

    #[test]
    fn nested_items_group_separately() {
        let tree = transformed("notes.txt");

        let lists = find(&tree, "List");
        assert_eq!(lists.len(), 2);

        // pre-order: the outer list comes first
        let outer = lists[0];
        let inner = lists[1];
        assert_eq!(elements_of(&tree, outer), vec!["Item"]);
        assert_eq!(elements_of(&tree, inner), vec!["Item", "Item"]);

        let item = tree.children(outer)[0];
        assert_eq!(elements_of(&tree, item), vec!["Paragraph", "List"]);
    }

    #[test]
    fn stickies_bind_to_their_targets() {
        let tree = transformed("guide.txt");

        let labelled = find(&tree, "Labelled");
        assert_eq!(labelled.len(), 1);
        assert_eq!(elements_of(&tree, labelled[0]), vec!["Label", "Table"]);
        assert!(matches!(
            tree.node(labelled[0])
                .body,
            Body::Sticky {
                position: Position::Before,
                ..
            }
        ));

        let captioned = find(&tree, "Captioned");
        assert_eq!(captioned.len(), 1);
        assert_eq!(elements_of(&tree, captioned[0]), vec!["Figure", "Caption"]);
        assert!(matches!(
            tree.node(captioned[0])
                .body,
            Body::Sticky {
                position: Position::After,
                ..
            }
        ));
    }

    #[test]
    fn headings_are_numbered() {
        let tree = transformed("guide.txt");

        let labels: Vec<String> = tree
            .descendants(tree.root())
            .into_iter()
            .filter_map(|id| {
                tree.node(id)
                    .numbers()
                    .map(label)
            })
            .collect();
        assert_eq!(labels, vec!["1", "1.1", "1.2", "2"]);

        for id in tree.descendants(tree.root()) {
            if let Body::Sequence { wrapped, .. } = tree
                .node(id)
                .body
            {
                assert_eq!(tree.node(wrapped).element, "Heading");
            }
        }
    }

    #[test]
    fn levels_above_the_first_heading_count_zero() {
        let tree = transformed("notes.txt");

        let labels: Vec<String> = tree
            .descendants(tree.root())
            .into_iter()
            .filter_map(|id| {
                tree.node(id)
                    .numbers()
                    .map(label)
            })
            .collect();
        assert_eq!(labels, vec!["0.1", "0.1.1", "1"]);
    }

    #[test]
    fn link_parts_are_paired() {
        let tree = transformed("guide.txt");

        let links = find(&tree, "Link");
        assert_eq!(links.len(), 1);
        assert_eq!(elements_of(&tree, links[0]), vec!["LinkText", "LinkTarget"]);

        // the bare address outside the link is left where it was
        let urls = find(&tree, "Url");
        assert_eq!(urls.len(), 2);
        let bare = urls[1];
        let parent = tree
            .parent(bare)
            .unwrap();
        assert_eq!(tree.node(parent).element, "Paragraph");
    }
}
