use serde::Deserialize;
use tracing::trace;

use crate::language::{Body, Category, NodeId, Position, Tree};

use super::Pass;

/// An element that attaches itself to the block next to it: a caption
/// following a figure, a label preceding a table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StickyRule {
    /// Element name of the container binding the pair.
    pub name: String,
    /// The sticky element.
    pub element: String,
    /// Anchor element it attaches to; any block when absent.
    #[serde(default)]
    pub target: Option<String>,
    pub position: Position,
}

/// Binds sticky elements to the adjacent block they belong to. Only the
/// candidate nearest an anchor binds, and each side of an anchor binds once;
/// a sticky before and a sticky after the same anchor nest, the after
/// binding outermost.
#[derive(Debug, Clone, Default)]
pub struct Sticky {
    rules: Vec<StickyRule>,
}

/// The node a (possibly already bound) sticky container is anchored on.
fn anchor_of(tree: &Tree, id: NodeId) -> NodeId {
    match &tree
        .node(id)
        .body
    {
        Body::Sticky {
            position: Position::Before,
            pair,
        } => anchor_of(tree, pair[1]),
        Body::Sticky {
            position: Position::After,
            pair,
        } => anchor_of(tree, pair[0]),
        _ => id,
    }
}

/// Whether something is already bound on the given side of this node.
fn is_bound(tree: &Tree, id: NodeId, side: Position) -> bool {
    match &tree
        .node(id)
        .body
    {
        Body::Sticky { position, pair } => {
            if *position == side {
                return true;
            }
            let inner = match position {
                Position::Before => pair[1],
                Position::After => pair[0],
            };
            is_bound(tree, inner, side)
        }
        _ => false,
    }
}

impl Sticky {
    pub fn new(rules: Vec<StickyRule>) -> Sticky {
        Sticky { rules }
    }

    fn rule_for(&self, tree: &Tree, id: NodeId, position: Position) -> Option<&StickyRule> {
        let element = tree.effective_element(id);
        self.rules
            .iter()
            .find(|rule| rule.position == position && rule.element == element)
    }

    fn binds(&self, tree: &Tree, rule: &StickyRule, sticky: NodeId, anchor: NodeId) -> bool {
        if tree.category(sticky) != Category::Block || tree.category(anchor) != Category::Block {
            return false;
        }

        if let Some(target) = &rule.target {
            let inner = anchor_of(tree, anchor);
            if tree.effective_element(inner) != target {
                return false;
            }
        }

        // a competing candidate nearer the anchor wins
        self.rule_for(tree, anchor, rule.position)
            .is_none()
            && !is_bound(tree, anchor, rule.position)
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

        let bound = self.bind_before(tree, children);
        let bound = self.bind_after(tree, bound);
        tree.set_children(id, bound);
    }

    fn bind_before(&self, tree: &mut Tree, children: Vec<NodeId>) -> Vec<NodeId> {
        let mut result = Vec::with_capacity(children.len());
        let mut i = 0;

        while i < children.len() {
            let sticky = children[i];
            if let (Some(rule), Some(anchor)) = (
                self.rule_for(tree, sticky, Position::Before),
                children
                    .get(i + 1)
                    .copied(),
            ) {
                if self.binds(tree, rule, sticky, anchor) {
                    trace!("Binding {} before {}", rule.element, tree.effective_element(anchor));
                    let name = rule
                        .name
                        .clone();
                    result.push(tree.wrap_sticky(&name, Position::Before, [sticky, anchor]));
                    i += 2;
                    continue;
                }
            }
            result.push(sticky);
            i += 1;
        }

        result
    }

    fn bind_after(&self, tree: &mut Tree, children: Vec<NodeId>) -> Vec<NodeId> {
        let mut result: Vec<NodeId> = Vec::with_capacity(children.len());

        for sticky in children {
            if let (Some(rule), Some(anchor)) = (
                self.rule_for(tree, sticky, Position::After),
                result
                    .last()
                    .copied(),
            ) {
                if self.binds(tree, rule, sticky, anchor) {
                    trace!("Binding {} after {}", rule.element, tree.effective_element(anchor));
                    let name = rule
                        .name
                        .clone();
                    result.pop();
                    result.push(tree.wrap_sticky(&name, Position::After, [anchor, sticky]));
                    continue;
                }
            }
            result.push(sticky);
        }

        result
    }
}

impl Pass for Sticky {
    fn name(&self) -> &'static str {
        "sticky"
    }

    fn transform(&self, tree: &mut Tree) {
        let root = tree.root();
        self.visit(tree, root);
    }
}
