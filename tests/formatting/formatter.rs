#[cfg(test)]
mod verify {
    use markup::formatting::{canonical, canonical_from, to_source};
    use markup::language::*;
    use markup::matching::Matchers;
    use markup::parsing::{self, Elements};

    fn trim(s: &str) -> &str {
        s.strip_prefix('\n')
            .unwrap_or(s)
    }

    fn elements() -> Elements {
        Elements::new(
            vec![
                Element::new("Paragraph", NodeType::Leaf, ""),
                Element::new("Heading", NodeType::RankedHanging, "="),
                Element::new("Note", NodeType::Walled, "::"),
                Element::new("Grid", NodeType::Walled, "+").with_separator(';'),
                Element::new("Code", NodeType::Fenced, "~~~"),
                Element::new("Strong", NodeType::Uniform, "**"),
                Element::new("Literal", NodeType::Escaped, "{{"),
                Element::new("Tag", NodeType::Prefixed, "#"),
            ],
            &Matchers::standard(),
        )
        .unwrap()
    }

    #[test]
    fn canonical_form() {
        let tree = parsing::parse_str(
            &elements(),
            trim(
                r#"
== Title
:: a \ b
+ x ; {{y;z}}
~~~ head
body
~~~
"#,
            ),
        );

        assert_eq!(
            canonical(&tree),
            trim(
                r#"
Container()(
  RankedHanging(Heading)[2](
    Leaf(Paragraph)(
      Text()(Title)
    )
  ),
  Walled(Note)(
    Leaf(Paragraph)(
      Text()(a \\ b)
    )
  ),
  Walled(Grid)(
    Container(row)(
      Container(cell)(
        Text()(x)
      ),
      Container(cell)(
        Escaped(Literal)(y;z)
      )
    )
  ),
  Fenced(Code)[head](body)
)"#
            )
        );

        let note = tree.children(tree.root())[1];
        assert_eq!(
            canonical_from(&tree, note),
            "Walled(Note)(\n  Leaf(Paragraph)(\n    Text()(a \\\\ b)\n  )\n)"
        );
    }

    #[test]
    fn written_source() {
        let elements = elements();
        let tree = parsing::parse_str(&elements, "== Title\n\n:: one **two**\n::\n:: #tag and \\# hash\n");

        assert_eq!(
            to_source(&tree, &elements),
            trim(
                r#"
== Title

:: one **two**
::
:: #tag and \# hash
"#
            )
        );
    }

    #[test]
    fn delimiter_text_is_escaped() {
        let elements = elements();
        let tree = parsing::parse_str(&elements, r"\*\* \{{ \= x");

        assert_eq!(to_source(&tree, &elements), "\\*\\* \\{\\{ = x\n");
    }
}
