//! Block recognizer. Works a line at a time; nested structure is found by
//! stripping the enclosing prefix (a wall delimiter, or a hanging element's
//! indentation) off the lines and recursing.

use crate::language::{Body, Node, NodeId, NodeType, Span, Tree};

use super::elements::{Elements, Opening};
use super::inline::{read_inline, OffsetMap};
use super::table::read_table;

/// One physical line, or what remains of it once enclosing prefixes have
/// been stripped, and where that remainder starts in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'i> {
    pub(crate) text: &'i str,
    pub(crate) offset: usize,
}

impl<'i> Line<'i> {
    pub(crate) fn is_blank(&self) -> bool {
        self.text
            .trim()
            .is_empty()
    }

    pub(crate) fn indent(&self) -> usize {
        self.text
            .len()
            - self
                .text
                .trim_start_matches([' ', '\t'])
                .len()
    }

    /// Drop the first `width` bytes, or fewer if that would split a
    /// character.
    pub(crate) fn advance(&self, width: usize) -> Line<'i> {
        let mut width = width.min(
            self.text
                .len(),
        );
        while !self
            .text
            .is_char_boundary(width)
        {
            width -= 1;
        }
        Line {
            text: &self.text[width..],
            offset: self.offset + width,
        }
    }

    pub(crate) fn end(&self) -> usize {
        self.offset
            + self
                .text
                .len()
    }
}

pub(crate) fn split_lines(source: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut offset = 0;

    for text in source.split('\n') {
        let stripped = text
            .strip_suffix('\r')
            .unwrap_or(text);
        lines.push(Line {
            text: stripped,
            offset,
        });
        offset += text.len() + 1;
    }

    lines
}

/// Strip a single space (or tab) following a delimiter, if there is one.
fn skip_space<'i>(line: Line<'i>) -> Line<'i> {
    if line
        .text
        .starts_with([' ', '\t'])
    {
        line.advance(1)
    } else {
        line
    }
}

#[derive(Debug)]
pub struct Parser<'e> {
    elements: &'e Elements,
    tree: Tree,
}

impl<'e> Parser<'e> {
    pub fn new(elements: &'e Elements) -> Parser<'e> {
        Parser {
            elements,
            tree: Tree::new(),
        }
    }

    /// Recognize a whole document. There is no failure path: anything not
    /// recognized as an element ends up as text.
    pub fn parse(mut self, source: &str) -> Tree {
        let lines = split_lines(source);
        let root = self
            .tree
            .root();

        self.read_blocks(root, &lines);

        self.tree
            .node_mut(root)
            .span = Span::new(0, source.len());
        self.tree
    }

    fn attach(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self
            .tree
            .add(node);
        self.tree
            .append(parent, id);
        id
    }

    fn read_blocks(&mut self, parent: NodeId, lines: &[Line]) {
        let elements = self.elements;
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];
            if line.is_blank() {
                i += 1;
                continue;
            }

            let start = line.advance(line.indent());
            i = match elements.block_at(start.text) {
                Some(opening) => self.read_block(parent, opening, lines, i),
                None => self.read_paragraph(parent, lines, i),
            };
        }
    }

    /// Returns the index of the first line following the block.
    fn read_block(
        &mut self,
        parent: NodeId,
        opening: Opening<'e>,
        lines: &[Line],
        i: usize,
    ) -> usize {
        let element = opening.element;
        let line = lines[i];
        let start = line.advance(line.indent());
        let after = start.advance(opening.width);

        match element.kind {
            NodeType::Walled | NodeType::VerbatimWalled => self.read_walled(parent, opening, lines, i),
            NodeType::Hanging | NodeType::RankedHanging => self.read_hanging(parent, opening, lines, i),
            NodeType::Fenced => self.read_fenced(parent, opening, lines, i),
            NodeType::VerbatimLine => {
                let content = skip_space(after);
                self.attach(
                    parent,
                    Node::new(
                        element.kind,
                        &element.name,
                        Body::Text(
                            content
                                .text
                                .to_string(),
                        ),
                        Span::new(start.offset, line.end()),
                    ),
                );
                i + 1
            }
            NodeType::Leaf => {
                let content = skip_space(after);
                let id = self.attach(
                    parent,
                    Node::new(
                        element.kind,
                        &element.name,
                        Body::Children(Vec::new()),
                        Span::new(start.offset, line.end()),
                    ),
                );
                read_inline(
                    &mut self.tree,
                    self.elements,
                    id,
                    content.text,
                    &OffsetMap::single(content.offset),
                );
                i + 1
            }
            // the element table only indexes block types by delimiter
            NodeType::Uniform
            | NodeType::Escaped
            | NodeType::Prefixed
            | NodeType::Text
            | NodeType::Container
            | NodeType::Error => self.read_paragraph(parent, lines, i),
        }
    }

    fn read_walled(&mut self, parent: NodeId, opening: Opening<'e>, lines: &[Line], i: usize) -> usize {
        let element = opening.element;
        let delimiter = element
            .delimiter
            .as_str();

        let mut stripped = Vec::new();
        let mut j = i;
        while j < lines.len() {
            let line = lines[j];
            let start = line.advance(line.indent());
            if !start
                .text
                .starts_with(delimiter)
            {
                break;
            }
            stripped.push(skip_space(start.advance(delimiter.len())));
            j += 1;
        }

        let first = lines[i];
        let span = Span::new(first.offset + first.indent(), lines[j - 1].end());

        match element.kind {
            NodeType::VerbatimWalled => {
                let content = stripped
                    .iter()
                    .map(|line| line.text)
                    .collect::<Vec<_>>()
                    .join("\n");
                self.attach(
                    parent,
                    Node::new(element.kind, &element.name, Body::Text(content), span),
                );
            }
            _ => {
                let id = self.attach(
                    parent,
                    Node::new(element.kind, &element.name, Body::Children(Vec::new()), span),
                );
                match element.separator {
                    Some(separator) => {
                        read_table(&mut self.tree, self.elements, id, separator, &stripped)
                    }
                    None => self.read_blocks(id, &stripped),
                }
            }
        }

        j
    }

    /// The delimiter once (or repeated, for ranked elements), then content
    /// that continues on following lines for as long as they are indented
    /// at least to the column the first line's content started at.
    fn read_hanging(&mut self, parent: NodeId, opening: Opening<'e>, lines: &[Line], i: usize) -> usize {
        let element = opening.element;
        let line = lines[i];
        let indent = line.indent();
        let start = line.advance(indent);
        let first = skip_space(start.advance(opening.width));
        let column = indent + opening.width + 1;

        let mut content = vec![first];
        let mut end = line.end();
        let mut j = i + 1;

        while j < lines.len() {
            let next = lines[j];

            if next.is_blank() {
                // blank lines belong to this element only if more indented
                // content follows them
                let resumes = (j..lines.len()).find(|k| !lines[*k].is_blank());
                match resumes {
                    Some(k) if lines[k].indent() >= column => {
                        for blank in &lines[j..k] {
                            content.push(Line {
                                text: "",
                                offset: blank.end(),
                            });
                        }
                        j = k;
                        continue;
                    }
                    _ => break,
                }
            }

            if next.indent() < column {
                break;
            }
            content.push(next.advance(column));
            end = next.end();
            j += 1;
        }

        let mut node = Node::new(
            element.kind,
            &element.name,
            Body::Children(Vec::new()),
            Span::new(start.offset, end),
        );
        node.rank = opening.rank;
        let id = self.attach(parent, node);

        self.read_blocks(id, &content);

        j
    }

    fn read_fenced(&mut self, parent: NodeId, opening: Opening<'e>, lines: &[Line], i: usize) -> usize {
        let element = opening.element;
        let delimiter = element
            .delimiter
            .as_str();
        let line = lines[i];
        let start = line.advance(line.indent());
        let head = start
            .advance(opening.width)
            .text
            .trim()
            .to_string();

        let mut body: Vec<&str> = Vec::new();
        let mut end = line.end();
        let mut closed = false;
        let mut j = i + 1;

        while j < lines.len() {
            let next = lines[j];
            j += 1;
            end = next.end();
            if next
                .text
                .trim()
                == delimiter
            {
                closed = true;
                break;
            }
            body.push(next.text);
        }

        // an unterminated fence runs to the end of input, less any trailing
        // blank lines
        if !closed {
            while let Some(last) = body.last() {
                if !last
                    .trim()
                    .is_empty()
                {
                    break;
                }
                body.pop();
            }
        }

        self.attach(
            parent,
            Node::new(
                element.kind,
                &element.name,
                Body::HeadBody {
                    head,
                    body: body.join("\n"),
                },
                Span::new(start.offset, end),
            ),
        );

        j
    }

    /// Consecutive lines that don't begin any other block.
    fn read_paragraph(&mut self, parent: NodeId, lines: &[Line], i: usize) -> usize {
        let elements = self.elements;
        let paragraph = elements.paragraph();

        let mut text = String::new();
        let mut map = OffsetMap::new();
        let mut j = i;

        while j < lines.len() {
            let line = lines[j];
            if line.is_blank() {
                break;
            }
            let start = line.advance(line.indent());
            if j > i
                && elements
                    .block_at(start.text)
                    .is_some()
            {
                break;
            }
            if j > i {
                text.push('\n');
            }
            map.push(text.len(), start.offset);
            text.push_str(start.text);
            j += 1;
        }

        let first = lines[i];
        let span = Span::new(first.offset + first.indent(), lines[j - 1].end());
        let id = self.attach(
            parent,
            Node::new(
                paragraph.kind,
                &paragraph.name,
                Body::Children(Vec::new()),
                span,
            ),
        );

        read_inline(&mut self.tree, elements, id, &text, &map);

        j
    }
}

#[cfg(test)]
mod check {
    use super::*;
    use crate::formatting::canonical;
    use crate::language::Element;
    use crate::matching::Matchers;

    fn elements() -> Elements {
        Elements::new(
            vec![
                Element::new("Paragraph", NodeType::Leaf, ""),
                Element::new("Heading", NodeType::RankedHanging, "#"),
                Element::new("Item", NodeType::Hanging, "-"),
                Element::new("Quote", NodeType::Walled, ">"),
                Element::new("Poem", NodeType::VerbatimWalled, "|"),
                Element::new("Code", NodeType::Fenced, "```"),
                Element::new("Comment", NodeType::VerbatimLine, "%"),
                Element::new("Term", NodeType::Leaf, ":"),
                Element::new("Strong", NodeType::Uniform, "**"),
            ],
            &Matchers::standard(),
        )
        .unwrap()
    }

    fn trim(s: &str) -> &str {
        s.strip_prefix('\n')
            .unwrap_or(s)
    }

    #[test]
    fn line_splitting() {
        let lines = split_lines("a\r\nbc\n\nd");
        assert_eq!(
            lines,
            vec![
                Line {
                    text: "a",
                    offset: 0
                },
                Line {
                    text: "bc",
                    offset: 3
                },
                Line {
                    text: "",
                    offset: 6
                },
                Line {
                    text: "d",
                    offset: 7
                },
            ]
        );

        let line = Line {
            text: "   - x",
            offset: 10,
        };
        assert_eq!(line.indent(), 3);
        assert_eq!(line.advance(3).offset, 13);
        assert_eq!(line.end(), 16);
    }

    #[test]
    fn paragraphs() {
        let elements = elements();
        let tree = Parser::new(&elements).parse("one\ntwo\n\nthree");
        assert_eq!(
            canonical(&tree),
            trim(
                r#"
Container()(
  Leaf(Paragraph)(
    Text()(one\ntwo)
  ),
  Leaf(Paragraph)(
    Text()(three)
  )
)"#
            )
        );
    }

    #[test]
    fn headings_and_items() {
        let elements = elements();
        let tree = Parser::new(&elements).parse(trim(
            r#"
## Title
- first
  continued

  second paragraph
- next
"#,
        ));
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
  Hanging(Item)(
    Leaf(Paragraph)(
      Text()(first\ncontinued)
    ),
    Leaf(Paragraph)(
      Text()(second paragraph)
    )
  ),
  Hanging(Item)(
    Leaf(Paragraph)(
      Text()(next)
    )
  )
)"#
            )
        );
    }

    #[test]
    fn wide_whitespace_in_hanging_content() {
        let elements = elements();
        let tree = Parser::new(&elements).parse("- a\n\u{3000}\n  b");
        assert_eq!(
            canonical(&tree),
            trim(
                r#"
Container()(
  Hanging(Item)(
    Leaf(Paragraph)(
      Text()(a)
    ),
    Leaf(Paragraph)(
      Text()(b)
    )
  )
)"#
            )
        );

        let line = Line {
            text: "\u{3000}x",
            offset: 0,
        };
        assert_eq!(line.advance(2).text, "\u{3000}x");
        assert_eq!(line.advance(3).text, "x");
    }

    #[test]
    fn walls_and_verbatim() {
        let elements = elements();
        let tree = Parser::new(&elements).parse(trim(
            r#"
> quoted
> > nested
| keep **this**
|   as is
% a comment
: a **term**
"#,
        ));
        assert_eq!(
            canonical(&tree),
            trim(
                r#"
Container()(
  Walled(Quote)(
    Leaf(Paragraph)(
      Text()(quoted)
    ),
    Walled(Quote)(
      Leaf(Paragraph)(
        Text()(nested)
      )
    )
  ),
  VerbatimWalled(Poem)(keep **this**\n  as is),
  VerbatimLine(Comment)(a comment),
  Leaf(Term)(
    Text()(a ),
    Uniform(Strong)(
      Text()(term)
    )
  )
)"#
            )
        );
    }

    #[test]
    fn fenced_blocks() {
        let elements = elements();
        let tree = Parser::new(&elements).parse("```rust\nfn main() {}\n\n# not a heading\n```\nafter");
        assert_eq!(
            canonical(&tree),
            trim(
                r#"
Container()(
  Fenced(Code)[rust](fn main() {}\n\n# not a heading),
  Leaf(Paragraph)(
    Text()(after)
  )
)"#
            )
        );

        // unterminated runs to the end
        let tree = Parser::new(&elements).parse("```\nabc\n\n");
        assert_eq!(
            canonical(&tree),
            trim(
                r#"
Container()(
  Fenced(Code)[](abc)
)"#
            )
        );
    }

    #[test]
    fn spans_map_to_source() {
        let elements = elements();
        let source = "- one\n  two";
        let tree = Parser::new(&elements).parse(source);

        let item = tree.children(tree.root())[0];
        assert_eq!(tree.node(item).span, Span::new(0, 11));

        let paragraph = tree.children(item)[0];
        let text = tree.children(paragraph)[0];
        let span = tree
            .node(text)
            .span;
        assert_eq!(&source[span.start..span.end], "one\n  two");
    }
}
