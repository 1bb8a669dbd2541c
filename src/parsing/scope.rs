use crate::language::NodeId;

/// Bracket-like delimiters close with their mirror image; everything else
/// closes with itself.
pub(crate) fn counterpart(c: char) -> char {
    match c {
        '{' => '}',
        '}' => '{',
        '[' => ']',
        ']' => '[',
        '(' => ')',
        ')' => '(',
        '<' => '>',
        '>' => '<',
        _ => c,
    }
}

/// An inline element currently open, and the delimiter character that
/// opened it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Layer {
    pub(crate) delimiter: char,
    pub(crate) node: NodeId,
}

/// The stack of open inline elements while recognizing one leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Scope {
    stack: Vec<Layer>,
}

impl Scope {
    pub(crate) fn new() -> Scope {
        Scope { stack: vec![] }
    }

    /// The innermost open node, or None if only the leaf itself is open.
    pub(crate) fn current(&self) -> Option<NodeId> {
        self.stack
            .last()
            .map(|layer| layer.node)
    }

    pub(crate) fn push(&mut self, delimiter: char, node: NodeId) {
        self.stack
            .push(Layer { delimiter, node });
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.stack
            .is_empty()
    }

    /// Search innermost to outermost for an open element that the given
    /// character closes, returning its depth in the stack.
    pub(crate) fn closing(&self, c: char) -> Option<usize> {
        self.stack
            .iter()
            .rposition(|layer| counterpart(layer.delimiter) == c)
    }

    /// Close everything from the given depth inwards, returning the closed
    /// layers innermost first.
    pub(crate) fn close(&mut self, depth: usize) -> Vec<Layer> {
        let mut closed = self
            .stack
            .split_off(depth);
        closed.reverse();
        closed
    }

    /// Close everything, as happens at the end of a line.
    pub(crate) fn reset(&mut self) -> Vec<Layer> {
        self.close(0)
    }
}
