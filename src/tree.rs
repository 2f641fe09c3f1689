use crate::aggregate::Occurrence;
use crate::arena::{NodeArena, NodeId};
use crate::builder::Builder;
use crate::corpus::Corpus;
use crate::error::Result;

/// An immutable generalized suffix tree with aggregated occurrences.
///
/// Once built the tree is never mutated, so it can be shared across threads
/// and walked concurrently.
///
/// # Example
///
/// ```
/// use gst_index::SuffixTree;
///
/// let tree = SuffixTree::from_documents(["banana", "New York"]).unwrap();
/// assert!(tree.find_pattern("nana"));
/// assert!(tree.find_pattern("New York"));
/// assert!(!tree.find_pattern("bananas"));
///
/// let root = tree.node(tree.root());
/// assert_eq!(root.frequency(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct SuffixTree {
    corpus: Corpus,
    arena: NodeArena,
    occurrences: Vec<Occurrence>,
}

impl SuffixTree {
    /// Builds a tree over `corpus`.
    pub fn build(corpus: Corpus) -> Result<Self> {
        Builder::new(corpus).build()
    }

    /// Assembles `documents` with the default configuration and builds a tree.
    pub fn from_documents<I, S>(documents: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build(Corpus::new(documents)?)
    }

    pub(crate) fn from_parts(
        corpus: Corpus,
        arena: NodeArena,
        occurrences: Vec<Occurrence>,
    ) -> Self {
        Self {
            corpus,
            arena,
            occurrences,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Read-only view of node `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> NodeView<'_> {
        assert!(id.index() < self.arena.len(), "node {} out of range", id);
        NodeView { tree: self, id }
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// All node ids in creation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        self.arena.iter_ids()
    }

    /// The concatenated text, terminators included.
    pub fn text(&self) -> &[char] {
        self.corpus.text()
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn type_context_count(&self) -> usize {
        self.corpus.type_context_count()
    }

    /// Number of indexed documents.
    pub fn unit_count(&self) -> usize {
        self.corpus.document_count()
    }

    /// Occurrences of `id` counted per type context.
    pub fn context_frequencies(&self, id: NodeId) -> Vec<usize> {
        let mut counts = vec![0; self.type_context_count()];
        for occ in self.node(id).occurrences() {
            counts[occ.type_context] += 1;
        }
        counts
    }

    pub(crate) fn arena(&self) -> &NodeArena {
        &self.arena
    }
}

/// A borrowed handle on one node of a [`SuffixTree`].
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'t> {
    tree: &'t SuffixTree,
    id: NodeId,
}

impl<'t> NodeView<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Dense node number, equal to `id().index()`.
    pub fn number(&self) -> usize {
        self.id.index()
    }

    pub fn is_root(&self) -> bool {
        self.id == NodeId::ROOT
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_root() && self.tree.arena.node(self.id).is_leaf()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.tree.arena.node(self.id).parent
    }

    /// Label of the incoming edge; empty for the root.
    pub fn edge_string(&self) -> String {
        self.tree.arena.edge_string(self.id, self.tree.text())
    }

    pub fn edge_length(&self) -> usize {
        self.tree.arena.edge_length(self.id)
    }

    /// `[start, end)` of the incoming edge in the concatenated text.
    pub fn edge_range(&self) -> std::ops::Range<usize> {
        self.tree.arena.node(self.id).start..self.tree.arena.edge_end(self.id)
    }

    /// Length of the string spelled from the root to this node.
    pub fn path_length(&self) -> usize {
        self.tree.arena.node(self.id).path_length
    }

    /// The string spelled from the root to this node.
    pub fn path_label(&self) -> String {
        let mut labels = Vec::new();
        let mut current = Some(self.id);
        while let Some(id) = current {
            labels.push(self.tree.arena.edge_string(id, self.tree.text()));
            current = self.tree.arena.node(id).parent;
        }
        labels.iter().rev().map(String::as_str).collect()
    }

    /// First characters of the outgoing edges, in ascending order.
    pub fn child_chars(&self) -> impl Iterator<Item = char> + 't {
        self.tree.arena.node(self.id).children.keys().copied()
    }

    /// Children in ascending order of their first character.
    pub fn children(&self) -> impl Iterator<Item = NodeId> + 't {
        self.tree.arena.node(self.id).children.values().copied()
    }

    pub fn child(&self, c: char) -> Option<NodeId> {
        self.tree.arena.child(self.id, c)
    }

    /// Every document suffix passing through this node.
    pub fn occurrences(&self) -> &'t [Occurrence] {
        let range = self.tree.arena.node(self.id).occurrences.clone();
        &self.tree.occurrences[range]
    }

    /// Number of leaf occurrences beneath this node.
    pub fn frequency(&self) -> usize {
        self.tree.arena.node(self.id).occurrences.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_view() {
        let tree = SuffixTree::from_documents(["abc"]).unwrap();
        let root = tree.node(tree.root());
        assert!(root.is_root());
        assert!(!root.is_leaf());
        assert_eq!(root.parent(), None);
        assert_eq!(root.edge_string(), "");
        assert_eq!(root.path_length(), 0);
        assert_eq!(root.child_chars().collect::<String>(), "$abc");
        assert_eq!(root.frequency(), 4);
    }

    #[test]
    fn test_leaf_view() {
        let tree = SuffixTree::from_documents(["abc"]).unwrap();
        let root = tree.node(tree.root());
        let leaf = tree.node(root.child('b').unwrap());
        assert!(leaf.is_leaf());
        assert_eq!(leaf.edge_string(), "bc$");
        assert_eq!(leaf.edge_range(), 1..4);
        assert_eq!(leaf.path_label(), "bc$");
        assert_eq!(leaf.frequency(), 1);
        assert_eq!(
            leaf.occurrences(),
            &[Occurrence { document: 0, type_context: 0, start: 1 }]
        );
    }

    #[test]
    fn test_path_label_through_internal_nodes() {
        let tree = SuffixTree::from_documents(["mississippi"]).unwrap();
        for id in tree.node_ids() {
            let view = tree.node(id);
            assert_eq!(view.path_label().chars().count(), view.path_length());
        }
        let i = tree.node(tree.root()).child('i').unwrap();
        let i = tree.node(i);
        assert_eq!(i.edge_string(), "i");
        assert_eq!(i.frequency(), 4);
    }

    #[test]
    fn test_context_frequencies() {
        let corpus = Corpus::with_type_contexts(["ab", "b", "cb"], &[1, 3]).unwrap();
        let tree = SuffixTree::build(corpus).unwrap();
        let b = tree.node(tree.root()).child('b').unwrap();
        assert_eq!(tree.context_frequencies(b), vec![1, 2]);
        assert_eq!(tree.type_context_count(), 2);
        assert_eq!(tree.unit_count(), 3);
    }

    #[test]
    fn test_tree_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SuffixTree>();
    }
}
