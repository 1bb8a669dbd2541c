//! Writing a tree back out as source text. Parsing the output with the same
//! element table yields the same tree; synthetic containers introduced by
//! the passes have no syntax of their own and are written as whatever they
//! wrap.

use crate::language::{Category, NodeId, NodeType, Tree};
use crate::parsing::table::{CELL, ROW};
use crate::parsing::Elements;

/// Source text for a tree.
pub fn to_source(tree: &Tree, elements: &Elements) -> String {
    let writer = Writer { tree, elements };
    let mut lines = writer.blocks(tree.root());
    if lines.is_empty() {
        return String::new();
    }
    lines.push(String::new());
    lines.join("\n")
}

struct Writer<'a> {
    tree: &'a Tree,
    elements: &'a Elements,
}

/// Prefix every line, using the bare (right-trimmed) prefix on empty ones.
fn prefixed(lines: Vec<String>, first: &str, rest: &str) -> Vec<String> {
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let prefix = if i == 0 { first } else { rest };
            if line.is_empty() {
                prefix
                    .trim_end()
                    .to_string()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect()
}

impl<'a> Writer<'a> {
    /// The block children of a node, one after another with a blank line
    /// between each.
    fn blocks(&self, id: NodeId) -> Vec<String> {
        let mut lines = Vec::new();
        for child in self
            .tree
            .children(id)
        {
            let block = self.block(*child);
            if block.is_empty() {
                continue;
            }
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.extend(block);
        }
        lines
    }

    fn block(&self, id: NodeId) -> Vec<String> {
        let node = self
            .tree
            .node(id);

        if node
            .body
            .is_synthetic()
        {
            return self.blocks(id);
        }

        let delimiter = match self
            .elements
            .get(&node.element)
        {
            Some(element) => element
                .delimiter
                .as_str(),
            None => "",
        };

        match node.ty {
            NodeType::Leaf => {
                let text = self.inlines(id, None);
                let mut lines = self.guard(&text);
                if !delimiter.is_empty() {
                    lines = prefixed(lines, &format!("{} ", delimiter), "");
                    if lines.is_empty() {
                        lines.push(delimiter.to_string());
                    }
                }
                lines
            }
            NodeType::VerbatimLine => {
                let content = node
                    .content()
                    .unwrap_or_default();
                prefixed(vec![content.to_string()], &format!("{} ", delimiter), "")
            }
            NodeType::VerbatimWalled => {
                let content = node
                    .content()
                    .unwrap_or_default();
                let wall = format!("{} ", delimiter);
                prefixed(
                    content
                        .split('\n')
                        .map(str::to_string)
                        .collect(),
                    &wall,
                    &wall,
                )
            }
            NodeType::Walled => {
                let inner = match self
                    .elements
                    .get(&node.element)
                    .and_then(|element| element.separator)
                {
                    Some(separator) => self.rows(id, separator),
                    None => self.blocks(id),
                };
                if inner.is_empty() {
                    return vec![delimiter.to_string()];
                }
                let wall = format!("{} ", delimiter);
                prefixed(inner, &wall, &wall)
            }
            NodeType::Hanging | NodeType::RankedHanging => {
                let marker = match node.ty {
                    NodeType::RankedHanging => delimiter.repeat(
                        node.rank
                            .max(1) as usize,
                    ),
                    _ => delimiter.to_string(),
                };
                let inner = self.blocks(id);
                if inner.is_empty() {
                    return vec![marker];
                }
                let first = format!("{} ", marker);
                let rest = " ".repeat(first.len());
                prefixed(inner, &first, &rest)
            }
            NodeType::Fenced => {
                let (head, body) = node
                    .head_body()
                    .unwrap_or_default();
                let mut lines = vec![format!("{}{}", delimiter, head)];
                if !body.is_empty() {
                    lines.extend(
                        body.split('\n')
                            .map(str::to_string),
                    );
                }
                lines.push(delimiter.to_string());
                lines
            }
            NodeType::Container => self.blocks(id),
            NodeType::Uniform
            | NodeType::Escaped
            | NodeType::Prefixed
            | NodeType::Text
            | NodeType::Error => self.guard(&self.inline(id, None)),
        }
    }

    /// Split inline text into lines, escaping any line that would otherwise
    /// be read as the start of a block.
    fn guard(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        text.split('\n')
            .map(|line| {
                let starts_block = self
                    .elements
                    .block_at(line)
                    .is_some();
                let punctuation = line
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_punctuation());
                if starts_block && punctuation {
                    format!("\\{}", line)
                } else {
                    line.to_string()
                }
            })
            .collect()
    }

    /// One line per row, cells framed and separated by the separator.
    fn rows(&self, table: NodeId, separator: char) -> Vec<String> {
        let mut lines = Vec::new();
        for row in self
            .tree
            .children(table)
        {
            if self
                .tree
                .node(*row)
                .element
                != ROW
            {
                continue;
            }
            let cells: Vec<String> = self
                .tree
                .children(*row)
                .iter()
                .filter(|cell| {
                    self.tree
                        .node(**cell)
                        .element
                        == CELL
                })
                .map(|cell| self.inlines(*cell, Some(separator)))
                .collect();
            let inner = cells.join(&format!(" {} ", separator));
            let last = self
                .tree
                .children(*row)
                .last()
                .is_some_and(|cell| self.open_ended(*cell));
            if last {
                lines.push(format!("{} {}", separator, inner));
            } else {
                lines.push(format!("{} {} {}", separator, inner, separator));
            }
        }
        lines
    }

    /// Whether this inline ends in a verbatim span whose content ends in a
    /// backslash. Such a span can't be closed, since the backslash would
    /// escape the closing delimiter; it (and anything enclosing it) is
    /// written open and left to close at the end of the line, which is
    /// where the parser found it.
    fn open_ended(&self, id: NodeId) -> bool {
        let node = self
            .tree
            .node(id);
        match node.ty {
            NodeType::Escaped => node
                .content()
                .is_some_and(|content| content.ends_with('\\')),
            NodeType::Uniform | NodeType::Container => self
                .tree
                .children(id)
                .last()
                .is_some_and(|child| self.open_ended(*child)),
            _ => false,
        }
    }

    fn inlines(&self, id: NodeId, separator: Option<char>) -> String {
        let mut result = String::new();
        for child in self
            .tree
            .children(id)
        {
            result.push_str(&self.inline(*child, separator));
        }
        result
    }

    fn inline(&self, id: NodeId, separator: Option<char>) -> String {
        let node = self
            .tree
            .node(id);

        if node
            .body
            .is_synthetic()
            || self
                .tree
                .category(id)
                == Category::Block
        {
            return self.inlines(id, separator);
        }

        let delimiter = match self
            .elements
            .get(&node.element)
        {
            Some(element) => element
                .delimiter
                .as_str(),
            None => "",
        };

        match node.ty {
            NodeType::Text => self.escape(
                node.content()
                    .unwrap_or_default(),
                separator,
            ),
            NodeType::Uniform => {
                let close = if self.open_ended(id) {
                    String::new()
                } else {
                    closing(delimiter)
                };
                format!("{}{}{}", delimiter, self.inlines(id, separator), close)
            }
            NodeType::Escaped => {
                let close = closing(delimiter);
                let content = node
                    .content()
                    .unwrap_or_default()
                    .replace(&close, &format!("\\{}", close));
                if self.open_ended(id) {
                    format!("{}{}", delimiter, content)
                } else {
                    format!("{}{}{}", delimiter, content, close)
                }
            }
            NodeType::Prefixed => {
                format!(
                    "{}{}",
                    delimiter,
                    node.content()
                        .unwrap_or_default()
                )
            }
            _ => self.inlines(id, separator),
        }
    }

    /// Escape whatever in plain text would otherwise be read as syntax.
    fn escape(&self, text: &str, separator: Option<char>) -> String {
        let mut result = String::with_capacity(text.len());
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

            if c == '\\'
                || Some(c) == separator
                || self
                    .elements
                    .is_inline_delimiter(c)
            {
                result.push('\\');
                result.push(c);
                i += c.len_utf8();
                continue;
            }

            if let Some(delimiter) = self
                .elements
                .prefixed_delimiters()
                .find(|d| rest.starts_with(d))
            {
                result.push('\\');
                if c.is_ascii_punctuation() {
                    result.push(c);
                    i += c.len_utf8();
                } else {
                    result.push_str(delimiter);
                    i += delimiter.len();
                }
                continue;
            }

            result.push(c);
            i += c.len_utf8();
        }

        result
    }
}

fn closing(delimiter: &str) -> String {
    match delimiter
        .chars()
        .next()
    {
        Some(c) => crate::parsing::closing_delimiter(c),
        None => String::new(),
    }
}
