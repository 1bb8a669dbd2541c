use std::collections::HashMap;

use tracing::trace;

use crate::language::{label, Body, NodeId, NodeType, Tree};

use super::Pass;

/// Numbers ranked elements in document order, wrapping each in a Sequence
/// container carrying its number vector: one component per rank from the
/// element's minimum rank down to its own.
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    numbered: HashMap<String, u32>,
}

/// Counter state for one run over a tree, keyed by element and rank.
type Counters = HashMap<(String, u32), u32>;

impl Sequence {
    /// Takes a map from element name to the lowest rank that gets numbered.
    pub fn new(numbered: HashMap<String, u32>) -> Sequence {
        Sequence { numbered }
    }

    /// The number vector for this node, advancing the counters, if it is
    /// numbered at all.
    fn number(&self, tree: &Tree, id: NodeId, counters: &mut Counters) -> Option<Vec<u32>> {
        let node = tree.node(id);
        if node.ty != NodeType::RankedHanging {
            return None;
        }
        let minimum = *self
            .numbered
            .get(&node.element)?;
        let rank = node.rank;
        if rank < minimum {
            return None;
        }

        let element = &node.element;
        *counters
            .entry((element.clone(), rank))
            .or_insert(0) += 1;

        // entering this rank starts every deeper level afresh
        for ((name, level), count) in counters.iter_mut() {
            if name == element && *level > rank {
                *count = 0;
            }
        }

        Some(
            (minimum..=rank)
                .map(|level| {
                    counters
                        .get(&(element.clone(), level))
                        .copied()
                        .unwrap_or(0)
                })
                .collect(),
        )
    }

    fn visit(&self, tree: &mut Tree, id: NodeId, counters: &mut Counters) {
        let wrapped = matches!(
            tree.node(id)
                .body,
            Body::Sequence { .. }
        );
        let children = tree
            .children(id)
            .to_vec();

        for child in children {
            if !wrapped {
                if let Some(numbers) = self.number(tree, child, counters) {
                    trace!("Numbering {} as {}", tree.node(child).element, label(&numbers));
                    let sequence = tree.wrap_sequence(numbers, child);
                    tree.replace_child(id, child, sequence);
                }
            }
            self.visit(tree, child, counters);
        }
    }
}

impl Pass for Sequence {
    fn name(&self) -> &'static str {
        "sequence"
    }

    fn transform(&self, tree: &mut Tree) {
        let mut counters = Counters::new();
        let root = tree.root();
        self.visit(tree, root, &mut counters);
    }
}
