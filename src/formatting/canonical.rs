//! The canonical form: `Type(Element)(...)`, where the parenthesis hold
//! either the node's payload or its children, one per line, indented.
//! Annotations (rank, sequence label, sticky position, fence head) go in
//! square brackets between the element and the body.

use crate::language::{label, Body, NodeId, NodeType, Tree};

/// Canonical form of a whole tree.
pub fn canonical(tree: &Tree) -> String {
    canonical_from(tree, tree.root())
}

/// Canonical form of the subtree rooted at the given node.
pub fn canonical_from(tree: &Tree, id: NodeId) -> String {
    let mut output = Formatter::new(tree);
    output.format_node(id);
    output.buffer
}

fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    result
}

struct Formatter<'t> {
    tree: &'t Tree,
    buffer: String,
    nesting: usize,
}

impl<'t> Formatter<'t> {
    fn new(tree: &'t Tree) -> Formatter<'t> {
        Formatter {
            tree,
            buffer: String::new(),
            nesting: 0,
        }
    }

    fn append_str(&mut self, text: &str) {
        self.buffer
            .push_str(text);
    }

    fn append_char(&mut self, c: char) {
        self.buffer
            .push(c);
    }

    fn indent(&mut self) {
        for _ in 0..self.nesting {
            self.buffer
                .push_str("  ");
        }
    }

    fn append_annotation(&mut self, annotation: &str) {
        self.append_char('[');
        self.append_str(annotation);
        self.append_char(']');
    }

    fn append_payload(&mut self, payload: &str) {
        self.append_char('(');
        self.append_str(&escape(payload));
        self.append_char(')');
    }

    fn format_node(&mut self, id: NodeId) {
        let tree = self.tree;
        let node = tree.node(id);

        self.indent();
        self.append_str(
            node.ty
                .name(),
        );
        self.append_char('(');
        self.append_str(&node.element);
        self.append_char(')');

        if node.ty == NodeType::RankedHanging {
            self.append_annotation(
                &node
                    .rank
                    .to_string(),
            );
        }

        match &node.body {
            Body::Empty => self.append_str("()"),
            Body::Text(text) => self.append_payload(text),
            Body::HeadBody { head, body } => {
                self.append_annotation(&escape(head));
                self.append_payload(body);
            }
            Body::Sequence { numbers, .. } => {
                self.append_annotation(&label(numbers));
                self.format_children(id);
            }
            Body::Sticky { position, .. } => {
                self.append_annotation(position.name());
                self.format_children(id);
            }
            Body::Children(_) | Body::Group(_) | Body::Composite { .. } => {
                self.format_children(id);
            }
        }
    }

    fn format_children(&mut self, id: NodeId) {
        let tree = self.tree;
        let children = tree.children(id);

        if children.is_empty() {
            self.append_str("()");
            return;
        }

        self.append_str("(\n");
        self.nesting += 1;
        for (i, child) in children
            .iter()
            .enumerate()
        {
            if i > 0 {
                self.append_str(",\n");
            }
            self.format_node(*child);
        }
        self.nesting -= 1;
        self.append_char('\n');
        self.indent();
        self.append_char(')');
    }
}

#[cfg(test)]
mod check {
    use super::*;
    use crate::language::{Node, Position, Span};

    fn trim(s: &str) -> &str {
        s.strip_prefix('\n')
            .unwrap_or(s)
    }

    #[test]
    fn synthetic_annotations() {
        let mut tree = Tree::new();
        let root = tree.root();

        let mut heading = Node::new(
            NodeType::RankedHanging,
            "Heading",
            Body::Children(Vec::new()),
            Span::default(),
        );
        heading.rank = 2;
        let heading = tree.add(heading);
        let caption = tree.add(Node::new(
            NodeType::VerbatimLine,
            "Caption",
            Body::Text("a\\b\nc".to_string()),
            Span::default(),
        ));

        let sequence = tree.wrap_sequence(vec![1, 3], heading);
        let sticky = tree.wrap_sticky("Figure", Position::After, [sequence, caption]);
        tree.append(root, sticky);

        assert_eq!(
            canonical(&tree),
            trim(
                r#"
Container()(
  Container(Figure)[after](
    Container()[1.3](
      RankedHanging(Heading)[2]()
    ),
    VerbatimLine(Caption)(a\\b\nc)
  )
)"#
            )
        );
    }

    #[test]
    fn empty_tree() {
        assert_eq!(canonical(&Tree::new()), "Container()()");
    }
}
