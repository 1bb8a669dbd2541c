//! Collecting the nodes of chosen elements, in document order, into named
//! lists: headings for a table of contents, figures for a list of figures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::language::{label, Body, Category, NodeId, Tree};

mod outline;

pub use outline::{regroup, Entry};

/// A named collection and the element names it gathers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Aggregate {
    pub name: String,
    pub elements: Vec<String>,
}

/// One collected node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub element: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbers: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Item {
    /// Nesting depth implied by the sequence label; unnumbered items sit at
    /// the top.
    pub fn depth(&self) -> usize {
        match &self.numbers {
            Some(numbers) if !numbers.is_empty() => numbers.len(),
            _ => 1,
        }
    }
}

/// Plain text of a node: payloads as they are, the texts of block children
/// one per line, inline children run together.
pub fn extract_text(tree: &Tree, id: NodeId) -> String {
    match &tree
        .node(id)
        .body
    {
        Body::Text(text) => text.clone(),
        Body::HeadBody { body, .. } => body.clone(),
        Body::Empty => String::new(),
        Body::Children(_)
        | Body::Group(_)
        | Body::Sticky { .. }
        | Body::Sequence { .. }
        | Body::Composite { .. } => {
            let mut result = String::new();
            for child in tree.children(id) {
                let text = extract_text(tree, *child);
                match tree.category(*child) {
                    Category::Inline => result.push_str(&text),
                    Category::Block => {
                        if text.is_empty() {
                            continue;
                        }
                        if !result.is_empty() {
                            result.push('\n');
                        }
                        result.push_str(&text);
                    }
                }
            }
            result
        }
    }
}

/// Walk the tree in document order and collect an Item for every node whose
/// element one of the aggregates names. Every aggregate has an entry in the
/// result, empty if nothing matched.
pub fn aggregate(aggregates: &[Aggregate], tree: &Tree) -> BTreeMap<String, Vec<Item>> {
    let mut result: BTreeMap<String, Vec<Item>> = aggregates
        .iter()
        .map(|aggregate| (aggregate.name.clone(), Vec::new()))
        .collect();

    for id in tree.descendants(tree.root()) {
        let node = tree.node(id);
        let wanted: Vec<&Aggregate> = aggregates
            .iter()
            .filter(|aggregate| {
                aggregate
                    .elements
                    .contains(&node.element)
            })
            .collect();
        if wanted.is_empty() {
            continue;
        }

        let numbers = tree
            .parent(id)
            .and_then(|parent| {
                tree.node(parent)
                    .numbers()
            })
            .map(<[u32]>::to_vec);

        let item = Item {
            element: node
                .element
                .clone(),
            text: extract_text(tree, id),
            label: numbers
                .as_deref()
                .map(label),
            numbers,
        };

        for aggregate in wanted {
            if let Some(items) = result.get_mut(&aggregate.name) {
                items.push(item.clone());
            }
        }
    }

    let count: usize = result
        .values()
        .map(Vec::len)
        .sum();
    debug!("Aggregated {} item{}", count, if count == 1 { "" } else { "s" });

    result
}
