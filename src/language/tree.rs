//! Arena holding the nodes of one document. Relationships are indices into
//! the arena, so reparenting a run of siblings under a new container is just
//! index reassignment.

use super::types::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
    /// Index of each node within its parent's child list.
    slots: Vec<usize>,
    root: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

impl Tree {
    /// A tree holding only an empty root Container.
    pub fn new() -> Tree {
        let root = Node::new(
            NodeType::Container,
            "",
            Body::Children(Vec::new()),
            Span::default(),
        );
        Tree {
            nodes: vec![root],
            slots: vec![0],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.children(self.root)
            .is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Put a node into the arena, detached. It becomes part of the tree once
    /// appended to (or wrapped by) something reachable from the root.
    pub fn add(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes
            .push(node);
        self.slots
            .push(0);
        id
    }

    /// Append a child to a structural node. Appending to a node that holds a
    /// payload would make it both leaf and container, which no caller in
    /// this crate ever does.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(child)
            .parent = Some(parent);
        self.slots[child.index()] = self
            .children(parent)
            .len();

        let node = self.node_mut(parent);
        match &mut node.body {
            Body::Children(children) | Body::Group(children) => children.push(child),
            Body::Empty => node.body = Body::Children(vec![child]),
            body => panic!("cannot append a child to {:?}", body),
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id)
            .body
            .children()
    }

    /// The children of nodes whose child list is an open-ended sibling run
    /// (as opposed to the fixed arity of Sticky, Sequence, and Composite).
    pub fn siblings(&self, id: NodeId) -> Option<&[NodeId]> {
        match &self
            .node(id)
            .body
        {
            Body::Children(children) | Body::Group(children) => Some(children),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)
            .parent
    }

    fn position(&self, id: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.parent(id)?;
        Some((parent, self.slots[id.index()]))
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let (parent, i) = self.position(id)?;
        self.children(parent)
            .get(i + 1)
            .copied()
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let (parent, i) = self.position(id)?;
        if i == 0 {
            return None;
        }
        self.children(parent)
            .get(i - 1)
            .copied()
    }

    /// Swap in a freshly built sibling list for a Children or Group node.
    pub fn set_children(&mut self, parent: NodeId, children: Vec<NodeId>) {
        self.adopt(parent, &children);

        let node = self.node_mut(parent);
        match &mut node.body {
            Body::Children(existing) | Body::Group(existing) => *existing = children,
            Body::Empty => node.body = Body::Children(children),
            body => panic!("cannot replace the sibling list of {:?}", body),
        }
    }

    /// Substitute one child for another in place, whatever shape the parent
    /// has.
    pub fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        self.node_mut(new)
            .parent = Some(parent);
        self.slots[new.index()] = self.slots[old.index()];

        let node = self.node_mut(parent);
        match &mut node.body {
            Body::Children(children) | Body::Group(children) => {
                for child in children.iter_mut() {
                    if *child == old {
                        *child = new;
                    }
                }
            }
            Body::Sticky { pair, .. } | Body::Composite { pair } => {
                for child in pair.iter_mut() {
                    if *child == old {
                        *child = new;
                    }
                }
            }
            Body::Sequence { wrapped, .. } => {
                if *wrapped == old {
                    *wrapped = new;
                }
            }
            Body::Empty | Body::Text(_) | Body::HeadBody { .. } => {}
        }
    }

    fn span_of(&self, ids: &[NodeId]) -> Span {
        let mut spans = ids
            .iter()
            .map(|id| self.node(*id).span);
        match spans.next() {
            Some(first) => spans.fold(first, Span::union),
            None => Span::default(),
        }
    }

    fn adopt(&mut self, container: NodeId, children: &[NodeId]) {
        for (i, child) in children
            .iter()
            .enumerate()
        {
            self.node_mut(*child)
                .parent = Some(container);
            self.slots[child.index()] = i;
        }
    }

    pub fn wrap_group(&mut self, element: &str, run: Vec<NodeId>) -> NodeId {
        let span = self.span_of(&run);
        let id = self.add(Node::new(NodeType::Container, element, Body::Group(run.clone()), span));
        self.adopt(id, &run);
        id
    }

    pub fn wrap_sticky(&mut self, element: &str, position: Position, pair: [NodeId; 2]) -> NodeId {
        let span = self.span_of(&pair);
        let id = self.add(Node::new(
            NodeType::Container,
            element,
            Body::Sticky { position, pair },
            span,
        ));
        self.adopt(id, &pair);
        id
    }

    pub fn wrap_sequence(&mut self, numbers: Vec<u32>, wrapped: NodeId) -> NodeId {
        let span = self
            .node(wrapped)
            .span;
        let id = self.add(Node::new(
            NodeType::Container,
            "",
            Body::Sequence { numbers, wrapped },
            span,
        ));
        self.adopt(id, &[wrapped]);
        id
    }

    pub fn wrap_composite(&mut self, element: &str, pair: [NodeId; 2]) -> NodeId {
        let span = self.span_of(&pair);
        let id = self.add(Node::new(NodeType::Container, element, Body::Composite { pair }, span));
        self.adopt(id, &pair);
        id
    }

    /// Depth-first pre-order walk starting at (and including) the given node.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            result.push(current);
            for child in self
                .children(current)
                .iter()
                .rev()
            {
                stack.push(*child);
            }
        }

        result
    }

    /// Block or Inline. Containers take the category of what they hold; an
    /// empty container counts as Block.
    pub fn category(&self, id: NodeId) -> Category {
        let node = self.node(id);
        match node
            .ty
            .category()
        {
            Some(category) => category,
            None => match self
                .children(id)
                .first()
            {
                Some(first) => self.category(*first),
                None => Category::Block,
            },
        }
    }

    /// The element name a node answers to, looking through Sequence wrappers
    /// so a numbered heading still counts as a heading.
    pub fn effective_element(&self, id: NodeId) -> &str {
        let node = self.node(id);
        match &node.body {
            Body::Sequence { wrapped, .. } => self.effective_element(*wrapped),
            _ => &node.element,
        }
    }

    /// The node a Sequence container numbers, or the node itself.
    pub fn unwrap_sequence(&self, id: NodeId) -> NodeId {
        match &self
            .node(id)
            .body
        {
            Body::Sequence { wrapped, .. } => self.unwrap_sequence(*wrapped),
            _ => id,
        }
    }

    /// Block children of a node, in order.
    pub fn block_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.category(*c) == Category::Block)
            .collect()
    }

    /// Inline children of a node, in order.
    pub fn inline_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.category(*c) == Category::Inline)
            .collect()
    }
}
