use serde::Deserialize;
use tracing::trace;

use crate::language::{Category, NodeId, Tree};

use super::Pass;

/// Two inline elements that mean something together when one immediately
/// follows the other, such as a link text followed by its target.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompositeRule {
    /// Element name of the container wrapping the pair.
    pub name: String,
    pub primary: String,
    pub secondary: String,
}

#[derive(Debug, Clone, Default)]
pub struct Composite {
    rules: Vec<CompositeRule>,
}

impl Composite {
    pub fn new(rules: Vec<CompositeRule>) -> Composite {
        Composite { rules }
    }

    fn rule_for(&self, tree: &Tree, primary: NodeId, secondary: NodeId) -> Option<&CompositeRule> {
        if tree.category(primary) != Category::Inline || tree.category(secondary) != Category::Inline {
            return None;
        }
        let first = tree.effective_element(primary);
        let second = tree.effective_element(secondary);
        self.rules
            .iter()
            .find(|rule| rule.primary == first && rule.secondary == second)
    }

    fn visit(&self, tree: &mut Tree, id: NodeId) {
        let children = tree
            .children(id)
            .to_vec();

        for child in &children {
            self.visit(tree, *child);
        }

        if tree
            .siblings(id)
            .is_none()
        {
            return;
        }

        let mut result = Vec::with_capacity(children.len());
        let mut i = 0;

        while i < children.len() {
            let primary = children[i];
            if let Some(secondary) = children
                .get(i + 1)
                .copied()
            {
                if let Some(rule) = self.rule_for(tree, primary, secondary) {
                    trace!("Pairing {} with {} as {}", rule.primary, rule.secondary, rule.name);
                    let name = rule
                        .name
                        .clone();
                    result.push(tree.wrap_composite(&name, [primary, secondary]));
                    i += 2;
                    continue;
                }
            }
            result.push(primary);
            i += 1;
        }

        tree.set_children(id, result);
    }
}

impl Pass for Composite {
    fn name(&self) -> &'static str {
        "composite"
    }

    fn transform(&self, tree: &mut Tree) {
        let root = tree.root();
        self.visit(tree, root);
    }
}
