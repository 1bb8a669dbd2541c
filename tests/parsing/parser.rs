#[cfg(test)]
mod verify {
    use markup::formatting::canonical;
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
                Element::new("Heading", NodeType::RankedHanging, "#"),
                Element::new("Item", NodeType::Hanging, "-"),
                Element::new("Strong", NodeType::Uniform, "**"),
                Element::new("Emphasis", NodeType::Uniform, "__"),
                Element::new("Literal", NodeType::Escaped, "``"),
                Element::new("Link", NodeType::Uniform, "[["),
                Element::new("Url", NodeType::Prefixed, "https://").with_matcher("autolink"),
            ],
            &Matchers::standard(),
        )
        .unwrap()
    }

    fn parse(source: &str) -> String {
        canonical(&parsing::parse_str(&elements(), source))
    }

    #[test]
    fn innermost_delimiter_closes_first() {
        assert_eq!(
            parse("A**B__C__D**E"),
            trim(
                r#"
Container()(
  Leaf(Paragraph)(
    Text()(A),
    Uniform(Strong)(
      Text()(B),
      Uniform(Emphasis)(
        Text()(C)
      ),
      Text()(D)
    ),
    Text()(E)
  )
)"#
            )
        );
    }

    #[test]
    fn outer_close_closes_inner() {
        assert_eq!(
            parse("**a__b**c"),
            trim(
                r#"
Container()(
  Leaf(Paragraph)(
    Uniform(Strong)(
      Text()(a),
      Uniform(Emphasis)(
        Text()(b)
      )
    ),
    Text()(c)
  )
)"#
            )
        );
    }

    #[test]
    fn unterminated_delimiter() {
        assert_eq!(
            parse("**A"),
            trim(
                r#"
Container()(
  Leaf(Paragraph)(
    Uniform(Strong)(
      Text()(A)
    )
  )
)"#
            )
        );

        // closed by the end of the line, not carried onto the next
        assert_eq!(
            parse("**A\nB"),
            trim(
                r#"
Container()(
  Leaf(Paragraph)(
    Uniform(Strong)(
      Text()(A)
    ),
    Text()(\nB)
  )
)"#
            )
        );
    }

    #[test]
    fn mirrored_closing() {
        assert_eq!(
            parse("[[a **b** c]]"),
            trim(
                r#"
Container()(
  Leaf(Paragraph)(
    Uniform(Link)(
      Text()(a ),
      Uniform(Strong)(
        Text()(b)
      ),
      Text()( c)
    )
  )
)"#
            )
        );
    }

    #[test]
    fn escapes() {
        assert_eq!(
            parse(r"\*\*not strong\*\* \https://plain \q"),
            trim(
                r#"
Container()(
  Leaf(Paragraph)(
    Text()(**not strong** https://plain \\q)
  )
)"#
            )
        );
    }

    #[test]
    fn escaped_spans_are_verbatim() {
        assert_eq!(
            parse("x ``**a** \\`` b`` y"),
            trim(
                r#"
Container()(
  Leaf(Paragraph)(
    Text()(x ),
    Escaped(Literal)(**a** `` b),
    Text()( y)
  )
)"#
            )
        );
    }

    #[test]
    fn prefixed_with_matcher() {
        assert_eq!(
            parse("see https://example.com/a_(b)), then"),
            trim(
                r#"
Container()(
  Leaf(Paragraph)(
    Text()(see ),
    Prefixed(Url)(example.com/a_(b)),
    Text()(), then)
  )
)"#
            )
        );

        // nothing acceptable follows the prefix
        assert_eq!(
            parse("https:// x"),
            trim(
                r#"
Container()(
  Leaf(Paragraph)(
    Prefixed(Url)(),
    Text()( x)
  )
)"#
            )
        );
    }

    #[test]
    fn nested_blocks() {
        assert_eq!(
            parse(trim(
                r#"
# Title
  continued

- one
  - two
"#
            )),
            trim(
                r#"
Container()(
  RankedHanging(Heading)[1](
    Leaf(Paragraph)(
      Text()(Title\ncontinued)
    )
  ),
  Hanging(Item)(
    Leaf(Paragraph)(
      Text()(one)
    ),
    Hanging(Item)(
      Leaf(Paragraph)(
        Text()(two)
      )
    )
  )
)"#
            )
        );
    }

    #[test]
    fn spans() {
        let source = "ab **cd**";
        let tree = parsing::parse_str(&elements(), source);

        let paragraph = tree.children(tree.root())[0];
        let strong = tree.children(paragraph)[1];
        let span = tree
            .node(strong)
            .span;
        assert_eq!(&source[span.start..span.end], "**cd**");
    }
}
