//! Content matchers for Prefixed elements. A matcher looks at the bytes
//! following an element's prefix and says how many of them belong to the
//! element; zero means none do.

use std::collections::HashMap;

mod autolink;

pub use autolink::autolink;

/// Pure function from the remaining input to the matched length, which is
/// never more than the length of the input.
pub type Matcher = fn(&[u8]) -> usize;

/// Matchers registered by name, for Elements to refer to.
#[derive(Debug, Clone)]
pub struct Matchers {
    table: HashMap<String, Matcher>,
}

impl Default for Matchers {
    fn default() -> Self {
        Matchers::standard()
    }
}

impl Matchers {
    /// An empty registry.
    pub fn new() -> Matchers {
        Matchers {
            table: HashMap::new(),
        }
    }

    /// The registry holding the matchers that ship with this crate.
    pub fn standard() -> Matchers {
        let mut matchers = Matchers::new();
        matchers.register("autolink", autolink);
        matchers
    }

    pub fn register(&mut self, name: &str, matcher: Matcher) {
        self.table
            .insert(name.to_string(), matcher);
    }

    pub fn get(&self, name: &str) -> Option<Matcher> {
        self.table
            .get(name)
            .copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table
            .contains_key(name)
    }
}
