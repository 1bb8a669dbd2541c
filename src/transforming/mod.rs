//! Transformation passes over a parsed tree. Each pass rewrites the tree in
//! place by building replacement sibling lists and swapping them in; the
//! Pipeline runs a caller-chosen sequence of them.

use tracing::debug;

use crate::language::Tree;

mod composite;
mod grouping;
mod sequence;
mod sticky;

pub use composite::{Composite, CompositeRule};
pub use grouping::Grouping;
pub use sequence::Sequence;
pub use sticky::{Sticky, StickyRule};

/// One rewriting of a tree. Passes assume exclusive access to the tree for
/// the duration of the call.
pub trait Pass {
    /// Name the pass is selected by in configuration.
    fn name(&self) -> &'static str;

    fn transform(&self, tree: &mut Tree);
}

/// An ordered list of passes.
#[derive(Default)]
pub struct Pipeline {
    passes: Vec<Box<dyn Pass>>,
}

impl Pipeline {
    pub fn new() -> Pipeline {
        Pipeline { passes: Vec::new() }
    }

    pub fn push(&mut self, pass: Box<dyn Pass>) {
        self.passes
            .push(pass);
    }

    pub fn with(mut self, pass: impl Pass + 'static) -> Pipeline {
        self.push(Box::new(pass));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.passes
            .iter()
            .map(|pass| pass.name())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.passes
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes
            .is_empty()
    }

    /// Apply every pass in order.
    pub fn run(&self, tree: &mut Tree) {
        for pass in &self.passes {
            let before = tree.len();
            pass.transform(tree);
            debug!(
                "Pass {} added {} node{}",
                pass.name(),
                tree.len() - before,
                if tree.len() - before == 1 { "" } else { "s" }
            );
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.names())
            .finish()
    }
}

#[cfg(test)]
mod check {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn passes_run_in_given_order() {
        let pipeline = Pipeline::new()
            .with(Sequence::new(HashMap::new()))
            .with(Grouping::new(HashMap::new()));

        assert_eq!(pipeline.names(), vec!["sequence", "group"]);
        assert_eq!(pipeline.len(), 2);
        assert_eq!(format!("{:?}", pipeline), r#"["sequence", "group"]"#);

        let mut tree = Tree::new();
        pipeline.run(&mut tree);
        assert!(tree.is_empty());
    }
}
