use crate::open_end::{EdgeEnd, GlobalOpenEnd};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

/// Stable index of a node in the tree.
///
/// Ids are dense, start at 0 for the root and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(u32::try_from(index).expect("node arena exceeds u32 ids"))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node of the suffix tree.
///
/// The edge from the parent is stored on the child as a slice
/// `[start, end)` of the concatenated text, so there is no separate edge type.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub parent: Option<NodeId>,
    /// Outgoing transitions keyed by the first character of the child's edge.
    pub children: BTreeMap<char, NodeId>,
    pub start: usize,
    pub end: EdgeEnd,
    /// Only meaningful during construction.
    pub suffix_link: Option<NodeId>,
    /// Length of the root-to-node string. Leaves get theirs when frozen.
    pub path_length: usize,
    /// Leaves only: documents whose suffix ends here, in insertion order.
    pub documents: Vec<u32>,
    /// Filled by aggregation: this node's slice of the tree's occurrence table.
    pub occurrences: Range<usize>,
}

impl Node {
    fn new(parent: Option<NodeId>, start: usize, end: EdgeEnd, path_length: usize) -> Self {
        Self {
            parent,
            children: BTreeMap::new(),
            start,
            end,
            suffix_link: None,
            path_length,
            documents: Vec::new(),
            occurrences: 0..0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Flat storage for all nodes, plus the open end shared by unfinished leaves.
#[derive(Debug, Clone)]
pub(crate) struct NodeArena {
    nodes: Vec<Node>,
    open_end: GlobalOpenEnd,
}

impl NodeArena {
    /// Creates an arena holding only the root.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node::new(None, 0, EdgeEnd::Fixed(0), 0));
        Self {
            nodes,
            open_end: GlobalOpenEnd::default(),
        }
    }

    /// Appends a node and returns its id. The caller links it with
    /// [`set_child`](Self::set_child).
    pub fn create_node(&mut self, start: usize, end: EdgeEnd, path_length: usize) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node::new(None, start, end, path_length));
        id
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn child(&self, id: NodeId, c: char) -> Option<NodeId> {
        self.nodes[id.index()].children.get(&c).copied()
    }

    /// Points the transition `c` of `id` at `child` and reparents `child`.
    pub fn set_child(&mut self, id: NodeId, c: char, child: NodeId) {
        self.nodes[id.index()].children.insert(c, child);
        self.nodes[child.index()].parent = Some(id);
    }

    #[inline]
    pub fn edge_end(&self, id: NodeId) -> usize {
        self.nodes[id.index()].end.resolve(self.open_end)
    }

    #[inline]
    pub fn edge_length(&self, id: NodeId) -> usize {
        self.edge_end(id) - self.nodes[id.index()].start
    }

    /// The label of the edge leading into `id`.
    pub fn edge_string(&self, id: NodeId, text: &[char]) -> String {
        let node = &self.nodes[id.index()];
        text[node.start..self.edge_end(id)].iter().collect()
    }

    pub fn open_end_mut(&mut self) -> &mut GlobalOpenEnd {
        &mut self.open_end
    }

    /// Replaces an open leaf end with the current open-end value.
    pub fn freeze(&mut self, id: NodeId) {
        let end = self.edge_end(id);
        let parent_path = self.nodes[id.index()]
            .parent
            .map_or(0, |p| self.nodes[p.index()].path_length);
        let node = &mut self.nodes[id.index()];
        node.end = EdgeEnd::Fixed(end);
        node.path_length = parent_path + end - node.start;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn iter_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId::from_index)
    }

    /// Drops construction-only state once the tree is complete.
    pub fn clear_suffix_links(&mut self) {
        for node in &mut self.nodes {
            node.suffix_link = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_arena_has_root() {
        let arena = NodeArena::with_capacity(4);
        assert_eq!(arena.len(), 1);
        assert!(arena.node(NodeId::ROOT).is_leaf());
        assert_eq!(arena.node(NodeId::ROOT).parent, None);
        assert_eq!(arena.edge_length(NodeId::ROOT), 0);
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut arena = NodeArena::with_capacity(4);
        let a = arena.create_node(0, EdgeEnd::Fixed(1), 1);
        let b = arena.create_node(1, EdgeEnd::Fixed(2), 1);
        assert_eq!(a.index(), 1);
        assert_eq!(b.index(), 2);
        assert_eq!(arena.iter_ids().count(), 3);
    }

    #[test]
    fn test_set_child_and_lookup() {
        let text: Vec<char> = "abc$".chars().collect();
        let mut arena = NodeArena::with_capacity(4);
        let leaf = arena.create_node(1, EdgeEnd::Fixed(4), 3);
        arena.set_child(NodeId::ROOT, 'b', leaf);

        assert_eq!(arena.child(NodeId::ROOT, 'b'), Some(leaf));
        assert_eq!(arena.child(NodeId::ROOT, 'a'), None);
        assert_eq!(arena.node(leaf).parent, Some(NodeId::ROOT));
        assert_eq!(arena.edge_length(leaf), 3);
        assert_eq!(arena.edge_string(leaf, &text), "bc$");
    }

    #[test]
    fn test_open_leaf_grows_then_freezes() {
        let text: Vec<char> = "abab$".chars().collect();
        let mut arena = NodeArena::with_capacity(4);
        let leaf = arena.create_node(0, EdgeEnd::Open, 0);
        arena.set_child(NodeId::ROOT, 'a', leaf);

        arena.open_end_mut().advance_to(2);
        assert_eq!(arena.edge_string(leaf, &text), "ab");
        arena.open_end_mut().advance_to(5);
        assert_eq!(arena.edge_length(leaf), 5);

        arena.freeze(leaf);
        assert_eq!(arena.node(leaf).end, EdgeEnd::Fixed(5));
        assert_eq!(arena.node(leaf).path_length, 5);

        // Later growth of the counter no longer affects the frozen leaf.
        arena.open_end_mut().advance_to(9);
        assert_eq!(arena.edge_length(leaf), 5);
    }
}
