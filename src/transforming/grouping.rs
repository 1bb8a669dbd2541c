use std::collections::HashMap;

use tracing::trace;

use crate::language::{Body, NodeId, Tree};

use super::Pass;

/// Wraps each maximal run of adjacent siblings whose elements map to the same
/// group name in one Group container named after the group.
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    groups: HashMap<String, String>,
}

impl Grouping {
    /// Takes a map from element name to group name.
    pub fn new(groups: HashMap<String, String>) -> Grouping {
        Grouping { groups }
    }

    fn group_of(&self, tree: &Tree, id: NodeId) -> Option<&str> {
        self.groups
            .get(tree.effective_element(id))
            .map(String::as_str)
    }

    fn visit(&self, tree: &mut Tree, id: NodeId) {
        let children = tree
            .children(id)
            .to_vec();

        for child in &children {
            self.visit(tree, *child);
        }

        // the members of an existing group are already grouped
        if !matches!(
            tree.node(id)
                .body,
            Body::Children(_)
        ) {
            return;
        }

        let mut result = Vec::with_capacity(children.len());
        let mut run: Vec<NodeId> = Vec::new();
        let mut current: Option<String> = None;

        for child in children {
            let name = self
                .group_of(tree, child)
                .map(str::to_string);

            if name.is_some() && name == current {
                run.push(child);
                continue;
            }

            if let Some(group) = current.take() {
                result.push(self.wrap(tree, &group, std::mem::take(&mut run)));
            }

            match name {
                Some(group) => {
                    current = Some(group);
                    run.push(child);
                }
                None => result.push(child),
            }
        }

        if let Some(group) = current.take() {
            result.push(self.wrap(tree, &group, run));
        }

        tree.set_children(id, result);
    }

    fn wrap(&self, tree: &mut Tree, group: &str, run: Vec<NodeId>) -> NodeId {
        trace!("Grouping {} node{} as {}", run.len(), if run.len() == 1 { "" } else { "s" }, group);
        tree.wrap_group(group, run)
    }
}

impl Pass for Grouping {
    fn name(&self) -> &'static str {
        "group"
    }

    fn transform(&self, tree: &mut Tree) {
        let root = tree.root();
        self.visit(tree, root);
    }
}
