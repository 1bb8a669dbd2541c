use std::iter::Peekable;

use serde::Serialize;

use super::Item;

/// A level of a nested outline: either an item at this level or a run of
/// deeper items regrouped beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Entry {
    Item(Item),
    Nested(Vec<Entry>),
}

/// Turn a flat, numbered list into a nested outline using only the depth of
/// each item's label. The shallowest depth present is the top level.
pub fn regroup(items: Vec<Item>) -> Vec<Entry> {
    let base = items
        .iter()
        .map(Item::depth)
        .min()
        .unwrap_or(1);
    let mut items = items
        .into_iter()
        .peekable();
    collect(&mut items, base)
}

fn collect<I>(items: &mut Peekable<I>, base: usize) -> Vec<Entry>
where
    I: Iterator<Item = Item>,
{
    let mut result = Vec::new();

    while let Some(depth) = items
        .peek()
        .map(Item::depth)
    {
        if depth < base {
            break;
        }
        if depth > base {
            result.push(Entry::Nested(collect(items, base + 1)));
            continue;
        }
        if let Some(item) = items.next() {
            result.push(Entry::Item(item));
        }
    }

    result
}
