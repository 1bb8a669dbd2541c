//! Recognizer for the inline content of a leaf: one character at a time
//! with a character of lookahead, keeping a stack of the elements currently
//! open.

use crate::language::{Body, Element, Node, NodeId, NodeType, Span, Tree};
use crate::matching::Matcher;

use super::elements::Elements;
use super::scope::{counterpart, Layer, Scope};

/// Maps offsets in text that was assembled from several source lines back to
/// offsets in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct OffsetMap {
    segments: Vec<(usize, usize)>,
}

impl OffsetMap {
    pub(crate) fn new() -> OffsetMap {
        OffsetMap {
            segments: Vec::new(),
        }
    }

    /// Text taken contiguously from the source starting at the given offset.
    pub(crate) fn single(source: usize) -> OffsetMap {
        OffsetMap {
            segments: vec![(0, source)],
        }
    }

    /// Record that text from `at` onwards came from `source`.
    pub(crate) fn push(&mut self, at: usize, source: usize) {
        self.segments
            .push((at, source));
    }

    pub(crate) fn translate(&self, at: usize) -> usize {
        let i = self
            .segments
            .partition_point(|(start, _)| *start <= at);
        match i {
            0 => at,
            _ => {
                let (start, source) = self.segments[i - 1];
                source + (at - start)
            }
        }
    }
}

/// The closing form of a doubled delimiter character.
pub(crate) fn closing_delimiter(c: char) -> String {
    let close = counterpart(c);
    [close, close]
        .iter()
        .collect()
}

/// Scan the raw body of an Escaped span starting at `start`, up to its
/// closing delimiter or the end of the line. A backslash before the closing
/// delimiter makes it literal. Returns the content and the offset just past
/// whatever was consumed.
pub(crate) fn scan_escaped(text: &str, start: usize, close: &str) -> (String, usize) {
    let mut content = String::new();
    let mut j = start;

    loop {
        let rest = &text[j..];
        if rest.is_empty() || rest.starts_with('\n') {
            break;
        }
        if rest.starts_with('\\') && rest[1..].starts_with(close) {
            content.push_str(close);
            j += 1 + close.len();
            continue;
        }
        if rest.starts_with(close) {
            j += close.len();
            break;
        }
        match rest
            .chars()
            .next()
        {
            Some(c) => {
                content.push(c);
                j += c.len_utf8();
            }
            None => break,
        }
    }

    (content, j)
}

struct Inline<'a, 'e> {
    elements: &'e Elements,
    tree: &'a mut Tree,
    map: &'a OffsetMap,
    leaf: NodeId,
    scope: Scope,
    buffer: String,
    start: Option<usize>,
}

/// Recognize `text` as the inline children of `leaf`.
pub(crate) fn read_inline(
    tree: &mut Tree,
    elements: &Elements,
    leaf: NodeId,
    text: &str,
    map: &OffsetMap,
) {
    let mut inline = Inline {
        elements,
        tree,
        map,
        leaf,
        scope: Scope::new(),
        buffer: String::new(),
        start: None,
    };
    inline.read(text);
}

impl<'a, 'e> Inline<'a, 'e> {
    fn current(&self) -> NodeId {
        self.scope
            .current()
            .unwrap_or(self.leaf)
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span::new(
            self.map
                .translate(start),
            self.map
                .translate(end),
        )
    }

    fn push_text(&mut self, at: usize, text: &str) {
        if self
            .start
            .is_none()
        {
            self.start = Some(at);
        }
        self.buffer
            .push_str(text);
    }

    /// Emit whatever text has accumulated as a Text node in the innermost
    /// open element.
    fn flush(&mut self, at: usize) {
        if let Some(start) = self
            .start
            .take()
        {
            let text = std::mem::take(&mut self.buffer);
            let span = self.span(start, at);
            let id = self
                .tree
                .add(Node::new(NodeType::Text, "", Body::Text(text), span));
            let parent = self.current();
            self.tree
                .append(parent, id);
        }
    }

    fn attach(&mut self, node: Node) -> NodeId {
        let id = self
            .tree
            .add(node);
        let parent = self.current();
        self.tree
            .append(parent, id);
        id
    }

    fn open(&mut self, element: &Element, delimiter: char, at: usize) {
        let span = self.span(at, at);
        let id = self.attach(Node::new(
            element.kind,
            &element.name,
            Body::Children(Vec::new()),
            span,
        ));
        self.scope
            .push(delimiter, id);
    }

    fn close(&mut self, layers: Vec<Layer>, at: usize) {
        let end = self
            .map
            .translate(at);
        for layer in layers {
            self.tree
                .node_mut(layer.node)
                .span
                .end = end;
        }
    }

    fn read(&mut self, text: &str) {
        let elements = self.elements;
        let mut i = 0;

        while i < text.len() {
            let rest = &text[i..];
            let c = match rest
                .chars()
                .next()
            {
                Some(c) => c,
                None => break,
            };
            let width = c.len_utf8();

            if c == '\\' {
                match elements.escape_length(&rest[1..]) {
                    Some(length) => {
                        self.push_text(i, &rest[1..1 + length]);
                        i += 1 + length;
                    }
                    None => {
                        self.push_text(i, "\\");
                        i += 1;
                    }
                }
                continue;
            }

            // anything still open is closed by the end of the line
            if c == '\n' {
                if !self
                    .scope
                    .is_empty()
                {
                    self.flush(i);
                    let closed = self
                        .scope
                        .reset();
                    self.close(closed, i);
                }
                self.push_text(i, "\n");
                i += 1;
                continue;
            }

            if rest[width..].starts_with(c) {
                if let Some(depth) = self
                    .scope
                    .closing(c)
                {
                    self.flush(i);
                    let closed = self
                        .scope
                        .close(depth);
                    self.close(closed, i + 2 * width);
                    i += 2 * width;
                    continue;
                }

                if let Some(element) = elements.inline_for(c) {
                    self.flush(i);
                    i = match element.kind {
                        NodeType::Escaped => self.read_escaped(element, c, text, i),
                        _ => {
                            self.open(element, c, i);
                            i + 2 * width
                        }
                    };
                    continue;
                }
            }

            if let Some((element, matcher)) = elements.prefixed_at(rest) {
                self.flush(i);
                i = self.read_prefixed(element, matcher, text, i);
                continue;
            }

            self.push_text(i, &rest[..width]);
            i += width;
        }

        self.flush(text.len());
        let closed = self
            .scope
            .reset();
        self.close(closed, text.len());
    }

    /// Verbatim inline span: no delimiters are interpreted inside it.
    fn read_escaped(&mut self, element: &Element, c: char, text: &str, i: usize) -> usize {
        let close = closing_delimiter(c);
        let (content, end) = scan_escaped(text, i + 2 * c.len_utf8(), &close);

        let span = self.span(i, end);
        self.attach(Node::new(
            element.kind,
            &element.name,
            Body::Text(content),
            span,
        ));
        end
    }

    /// The prefix, then however much of the rest of the line the element's
    /// matcher claims.
    fn read_prefixed(
        &mut self,
        element: &Element,
        matcher: Option<Matcher>,
        text: &str,
        i: usize,
    ) -> usize {
        let after = i + element
            .delimiter
            .len();
        let end_of_line = text[after..]
            .find('\n')
            .map(|n| after + n)
            .unwrap_or(text.len());
        let available = &text[after..end_of_line];

        let mut length = match matcher {
            Some(matcher) => matcher(available.as_bytes()),
            None => 0,
        }
        .min(available.len());
        while !available.is_char_boundary(length) {
            length -= 1;
        }

        let span = self.span(i, after + length);
        self.attach(Node::new(
            element.kind,
            &element.name,
            Body::Text(available[..length].to_string()),
            span,
        ));
        after + length
    }
}
