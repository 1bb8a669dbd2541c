//! Tables are Walled blocks whose element declares a cell separator. Each
//! physical line becomes a row; the line is cut at every separator that
//! isn't escaped or inside a verbatim span, and each cell is then
//! recognized as inline content of its own.

use crate::language::{Body, Node, NodeId, NodeType, Span, Tree};

use super::elements::Elements;
use super::inline::{closing_delimiter, read_inline, scan_escaped, OffsetMap};
use super::parser::Line;

/// Element name given to the synthesized row containers.
pub const ROW: &str = "row";

/// Element name given to the synthesized cell containers.
pub const CELL: &str = "cell";

/// Byte offsets of the separators in a line that actually separate cells.
pub(crate) fn separators(elements: &Elements, text: &str, separator: char) -> Vec<usize> {
    let mut result = Vec::new();
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
            i += 1 + elements
                .escape_length(&rest[1..])
                .unwrap_or(0);
            continue;
        }

        if c == separator {
            result.push(i);
            i += width;
            continue;
        }

        if rest[width..].starts_with(c) {
            if let Some(element) = elements.inline_for(c) {
                if element.kind == NodeType::Escaped {
                    let close = closing_delimiter(c);
                    let (_, end) = scan_escaped(text, i + 2 * width, &close);
                    i = end;
                    continue;
                }
            }
        }

        i += width;
    }

    result
}

/// Cut a line into cell ranges. A separator at the very start or end of the
/// line frames the row rather than delimiting an empty cell.
pub(crate) fn cells(elements: &Elements, text: &str, separator: char) -> Vec<(usize, usize)> {
    let positions = separators(elements, text, separator);

    let mut ranges = Vec::new();
    let mut start = 0;
    for position in &positions {
        ranges.push((start, *position));
        start = position + separator.len_utf8();
    }
    ranges.push((start, text.len()));

    if !positions.is_empty() {
        if let Some((s, e)) = ranges.first() {
            if text[*s..*e]
                .trim()
                .is_empty()
            {
                ranges.remove(0);
            }
        }
        if let Some((s, e)) = ranges.last() {
            if text[*s..*e]
                .trim()
                .is_empty()
            {
                ranges.pop();
            }
        }
    }

    ranges
}

pub(crate) fn read_table(
    tree: &mut Tree,
    elements: &Elements,
    table: NodeId,
    separator: char,
    lines: &[Line],
) {
    for line in lines {
        if line.is_blank() {
            continue;
        }

        let row = tree.add(Node::new(
            NodeType::Container,
            ROW,
            Body::Children(Vec::new()),
            Span::new(line.offset, line.end()),
        ));
        tree.append(table, row);

        for (start, end) in cells(elements, line.text, separator) {
            let raw = &line.text[start..end];
            let lead = raw.len()
                - raw
                    .trim_start()
                    .len();
            let content = raw.trim();
            let offset = line.offset + start + lead;

            let cell = tree.add(Node::new(
                NodeType::Container,
                CELL,
                Body::Children(Vec::new()),
                Span::new(offset, offset + content.len()),
            ));
            tree.append(row, cell);

            read_inline(tree, elements, cell, content, &OffsetMap::single(offset));
        }
    }
}
