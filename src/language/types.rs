//! Types representing the node tree shared by the recognizer, the
//! transformation passes, and the aggregator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed taxonomy of node shapes. Every configured Element declares one
/// of these; the synthetic nodes introduced by transformation passes are all
/// Container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Error,
    Container,

    // block categories
    Walled,
    VerbatimWalled,
    Hanging,
    RankedHanging,
    Fenced,
    VerbatimLine,
    Leaf,

    // inline categories
    Uniform,
    Escaped,
    Prefixed,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Block,
    Inline,
}

impl NodeType {
    pub fn is_block(&self) -> bool {
        match self {
            NodeType::Walled
            | NodeType::VerbatimWalled
            | NodeType::Hanging
            | NodeType::RankedHanging
            | NodeType::Fenced
            | NodeType::VerbatimLine
            | NodeType::Leaf => true,
            NodeType::Uniform
            | NodeType::Escaped
            | NodeType::Prefixed
            | NodeType::Text
            | NodeType::Error
            | NodeType::Container => false,
        }
    }

    pub fn is_inline(&self) -> bool {
        match self {
            NodeType::Uniform | NodeType::Escaped | NodeType::Prefixed | NodeType::Text => true,
            NodeType::Walled
            | NodeType::VerbatimWalled
            | NodeType::Hanging
            | NodeType::RankedHanging
            | NodeType::Fenced
            | NodeType::VerbatimLine
            | NodeType::Leaf
            | NodeType::Error
            | NodeType::Container => false,
        }
    }

    /// Container and Error are the only types without a delimiter of their
    /// own. Text carries none either, but is produced from whatever isn't a
    /// delimiter rather than recognized by one.
    pub fn has_delimiter(&self) -> bool {
        !matches!(self, NodeType::Container | NodeType::Error | NodeType::Text)
    }

    /// Block or Inline, or None for the special types whose category depends
    /// on what they hold.
    pub fn category(&self) -> Option<Category> {
        if self.is_block() {
            Some(Category::Block)
        } else if self.is_inline() {
            Some(Category::Inline)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeType::Error => "Error",
            NodeType::Container => "Container",
            NodeType::Walled => "Walled",
            NodeType::VerbatimWalled => "VerbatimWalled",
            NodeType::Hanging => "Hanging",
            NodeType::RankedHanging => "RankedHanging",
            NodeType::Fenced => "Fenced",
            NodeType::VerbatimLine => "VerbatimLine",
            NodeType::Leaf => "Leaf",
            NodeType::Uniform => "Uniform",
            NodeType::Escaped => "Escaped",
            NodeType::Prefixed => "Prefixed",
            NodeType::Text => "Text",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which side of its anchor a sticky element sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Before,
    After,
}

impl Position {
    pub fn name(&self) -> &'static str {
        match self {
            Position::Before => "before",
            Position::After => "after",
        }
    }
}

/// Byte range into the decoded source a node was recognized from. Synthetic
/// containers cover the union of what they wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Span {
        Span { start, end }
    }

    pub fn union(self, other: Span) -> Span {
        Span {
            start: self
                .start
                .min(other.start),
            end: self
                .end
                .max(other.end),
        }
    }
}

/// A configured element: the unit the Recognizer looks up by delimiter and
/// the passes look up by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeType,
    #[serde(default)]
    pub delimiter: String,
    #[serde(default)]
    pub matcher: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    /// Cell separator; only meaningful on Walled elements, which are then
    /// recognized as tables.
    #[serde(default)]
    pub separator: Option<char>,
}

impl Element {
    pub fn new(name: &str, kind: NodeType, delimiter: &str) -> Element {
        Element {
            name: name.to_string(),
            kind,
            delimiter: delimiter.to_string(),
            matcher: None,
            template: None,
            separator: None,
        }
    }

    pub fn with_matcher(mut self, matcher: &str) -> Element {
        self.matcher = Some(matcher.to_string());
        self
    }

    pub fn with_template(mut self, template: &str) -> Element {
        self.template = Some(template.to_string());
        self
    }

    pub fn with_separator(mut self, separator: char) -> Element {
        self.separator = Some(separator);
        self
    }

    /// The default paragraph is the one Leaf element with no delimiter.
    pub fn is_paragraph(&self) -> bool {
        self.kind == NodeType::Leaf
            && self
                .delimiter
                .is_empty()
    }
}

/// Opaque, stable index of a node within its Tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a node holds. Payload and children are mutually exclusive by
/// construction; the synthetic pass outputs get their own variants rather
/// than being recognized by element name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Empty,
    Children(Vec<NodeId>),
    Text(String),
    HeadBody { head: String, body: String },
    Group(Vec<NodeId>),
    Sticky { position: Position, pair: [NodeId; 2] },
    Sequence { numbers: Vec<u32>, wrapped: NodeId },
    Composite { pair: [NodeId; 2] },
}

impl Body {
    pub fn children(&self) -> &[NodeId] {
        match self {
            Body::Children(children) | Body::Group(children) => children,
            Body::Sticky { pair, .. } | Body::Composite { pair } => pair,
            Body::Sequence { wrapped, .. } => std::slice::from_ref(wrapped),
            Body::Empty | Body::Text(_) | Body::HeadBody { .. } => &[],
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(
            self,
            Body::Group(_) | Body::Sticky { .. } | Body::Sequence { .. } | Body::Composite { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub ty: NodeType,
    pub element: String,
    pub rank: u32,
    pub body: Body,
    pub parent: Option<NodeId>,
    pub span: Span,
}

impl Node {
    pub fn new(ty: NodeType, element: &str, body: Body, span: Span) -> Node {
        Node {
            ty,
            element: element.to_string(),
            rank: 0,
            body,
            parent: None,
            span,
        }
    }

    /// Raw text content, for Text and the verbatim shapes.
    pub fn content(&self) -> Option<&str> {
        match &self.body {
            Body::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Head and body of a two-part verbatim node (a Fenced block).
    pub fn head_body(&self) -> Option<(&str, &str)> {
        match &self.body {
            Body::HeadBody { head, body } => Some((head, body)),
            _ => None,
        }
    }

    pub fn rank(&self) -> Option<u32> {
        match self.ty {
            NodeType::RankedHanging => Some(self.rank),
            _ => None,
        }
    }

    /// The sequence numbers carried by a Sequence container.
    pub fn numbers(&self) -> Option<&[u32]> {
        match &self.body {
            Body::Sequence { numbers, .. } => Some(numbers),
            _ => None,
        }
    }
}

/// Render a sequence-number vector as its dotted label, "1.2.1".
pub fn label(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(".")
}
