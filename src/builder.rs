use crate::aggregate;
use crate::arena::{NodeArena, NodeId};
use crate::cancel::CancelFlag;
use crate::corpus::{Corpus, DocumentSpan};
use crate::error::{GstError, Result};
use crate::open_end::EdgeEnd;
use crate::tree::SuffixTree;
use tracing::{debug, trace};

/// Builds a [`SuffixTree`] from an assembled [`Corpus`].
///
/// Construction is online and linear in the text length: each document is
/// consumed one character per phase, and every leaf opened in the current
/// document grows through the shared open end. When a terminator is
/// consumed, the document's open leaves are frozen so later documents cannot
/// extend them.
///
/// # Example
///
/// ```
/// use gst_index::{Builder, CancelFlag, Corpus};
///
/// let corpus = Corpus::new(["mississippi"]).unwrap();
/// let tree = Builder::new(corpus)
///     .with_cancel(CancelFlag::new())
///     .build()
///     .unwrap();
/// assert_eq!(tree.node_count(), 19);
/// ```
pub struct Builder {
    corpus: Corpus,
    cancel: Option<CancelFlag>,
}

impl Builder {
    pub fn new(corpus: Corpus) -> Self {
        Self {
            corpus,
            cancel: None,
        }
    }

    /// Makes the build stop with [`GstError::Cancelled`] once `flag` is set.
    pub fn with_cancel(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Constructs the tree and aggregates its occurrences.
    pub fn build(self) -> Result<SuffixTree> {
        let mut arena = construct(&self.corpus, self.cancel.as_ref())?;
        let occurrences = aggregate::aggregate(&mut arena, &self.corpus);
        Ok(SuffixTree::from_parts(self.corpus, arena, occurrences))
    }
}

/// Construction-time insertion point: `length` characters along the edge of
/// `node` that starts with `text[edge]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActivePoint {
    node: NodeId,
    edge: usize,
    length: usize,
}

impl ActivePoint {
    const fn root() -> Self {
        Self {
            node: NodeId::ROOT,
            edge: 0,
            length: 0,
        }
    }
}

/// Mutable state of one construction run. Nothing here outlives the build.
struct Construction<'c> {
    text: &'c [char],
    arena: NodeArena,
    active: ActivePoint,
    /// Suffixes of the current document still waiting to be made explicit.
    remainder: usize,
    /// Internal node created in this phase whose suffix link is unresolved.
    pending_link: Option<NodeId>,
    /// Leaves whose end follows the open end.
    open_leaves: Vec<NodeId>,
    document: u32,
}

/// Runs the construction phases over every document of `corpus`.
pub(crate) fn construct(corpus: &Corpus, cancel: Option<&CancelFlag>) -> Result<NodeArena> {
    debug!(
        length = corpus.len(),
        documents = corpus.document_count(),
        "building suffix tree"
    );

    let mut state = Construction {
        text: corpus.text(),
        arena: NodeArena::with_capacity(2 * corpus.len()),
        active: ActivePoint::root(),
        remainder: 0,
        pending_link: None,
        open_leaves: Vec::new(),
        document: 0,
    };

    for (doc, span) in corpus.documents().iter().enumerate() {
        state.document = doc as u32;
        state.start_document();
        for i in span.start..=span.terminator {
            if cancel.is_some_and(CancelFlag::is_cancelled) {
                debug!(phase = i, "suffix tree build cancelled");
                return Err(GstError::Cancelled);
            }
            state.phase(i);
        }
        state.finish_document(*span);
    }

    let mut arena = state.arena;
    assert!(
        arena.iter_ids().all(|id| !arena.node(id).end.is_open()),
        "open leaf survived construction"
    );
    arena.clear_suffix_links();

    debug!(nodes = arena.len(), "suffix tree built");
    Ok(arena)
}

impl<'c> Construction<'c> {
    fn start_document(&mut self) {
        self.active = ActivePoint::root();
        self.remainder = 0;
        self.pending_link = None;
    }

    /// Extends the tree with `text[i]`.
    fn phase(&mut self, i: usize) {
        // Rule 1 for every open leaf at once.
        self.arena.open_end_mut().advance_to(i + 1);
        self.remainder += 1;
        self.pending_link = None;
        let c = self.text[i];

        while self.remainder > 0 {
            if self.active.length == 0 {
                self.active.edge = i;
            }
            let edge_char = self.text[self.active.edge];

            match self.arena.child(self.active.node, edge_char) {
                None => {
                    // Rule 2a
                    self.add_leaf(self.active.node, i);
                    self.resolve_pending_link(self.active.node);
                }
                Some(next) => {
                    if self.walk_down(next) {
                        continue;
                    }
                    let next_start = self.arena.node(next).start;
                    if self.text[next_start + self.active.length] == c {
                        // Rule 3
                        self.resolve_pending_link(self.active.node);
                        self.active.length += 1;
                        return;
                    }
                    // Rule 2b
                    let split = self.split_edge(edge_char, next);
                    self.add_leaf(split, i);
                    self.resolve_pending_link(split);
                    self.pending_link = Some(split);
                }
            }

            self.remainder -= 1;
            self.advance_active(i);
        }
    }

    /// Moves the active point to the next shorter suffix.
    fn advance_active(&mut self, i: usize) {
        if self.active.node == NodeId::ROOT {
            if self.active.length > 0 {
                self.active.length -= 1;
                self.active.edge = i + 1 - self.remainder;
            }
        } else {
            self.active.node = self
                .arena
                .node(self.active.node)
                .suffix_link
                .unwrap_or(NodeId::ROOT);
        }
    }

    /// Skips over `next` when the active length covers its whole edge.
    fn walk_down(&mut self, next: NodeId) -> bool {
        let len = self.arena.edge_length(next);
        if self.active.length >= len {
            self.active.node = next;
            self.active.edge += len;
            self.active.length -= len;
            true
        } else {
            false
        }
    }

    fn add_leaf(&mut self, parent: NodeId, i: usize) -> NodeId {
        let c = self.text[i];
        assert!(
            self.arena.child(parent, c).is_none(),
            "transition {:?} from node {} already exists",
            c,
            parent
        );
        let leaf = self.arena.create_node(i, EdgeEnd::Open, 0);
        self.arena.set_child(parent, c, leaf);
        self.arena.node_mut(leaf).documents.push(self.document);
        self.open_leaves.push(leaf);
        leaf
    }

    /// Splits the edge into `next` at the active point and returns the new
    /// internal node.
    fn split_edge(&mut self, edge_char: char, next: NodeId) -> NodeId {
        let next_start = self.arena.node(next).start;
        let split_at = next_start + self.active.length;
        debug_assert!(split_at < self.arena.edge_end(next));
        let depth = self.arena.node(self.active.node).path_length + self.active.length;

        let split = self
            .arena
            .create_node(next_start, EdgeEnd::Fixed(split_at), depth);
        self.arena.set_child(self.active.node, edge_char, split);
        self.arena.node_mut(next).start = split_at;
        self.arena.set_child(split, self.text[split_at], next);
        split
    }

    fn resolve_pending_link(&mut self, target: NodeId) {
        if let Some(pending) = self.pending_link.take() {
            self.arena.node_mut(pending).suffix_link = Some(target);
        }
    }

    /// Freezes the document's open leaves and records the document on leaves
    /// for suffixes that were already present when its terminator arrived.
    fn finish_document(&mut self, span: DocumentSpan) {
        let frozen = self.open_leaves.len();
        for leaf in self.open_leaves.drain(..) {
            self.arena.freeze(leaf);
        }

        let implicit = self.remainder;
        while self.remainder > 0 {
            let leaf = self.descend_to_leaf();
            let documents = &mut self.arena.node_mut(leaf).documents;
            debug_assert!(!documents.contains(&self.document));
            documents.push(self.document);
            self.remainder -= 1;
            self.advance_active(span.terminator);
        }

        trace!(
            document = self.document,
            frozen,
            implicit,
            "document finished"
        );
    }

    /// Follows the active point down to the leaf whose path it spells.
    fn descend_to_leaf(&mut self) -> NodeId {
        loop {
            let c = self.text[self.active.edge];
            let next = self
                .arena
                .child(self.active.node, c)
                .expect("implicit terminal suffix must be present in the tree");
            let len = self.arena.edge_length(next);
            if self.arena.node(next).is_leaf() {
                assert_eq!(
                    self.active.length, len,
                    "implicit terminal suffix must end at a leaf boundary"
                );
                return next;
            }
            assert!(self.active.length > len, "suffix cannot end at an internal node");
            self.active.node = next;
            self.active.edge += len;
            self.active.length -= len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CorpusConfig, DEFAULT_DISTINCT_BASE};

    fn build(docs: &[&str]) -> NodeArena {
        construct(&Corpus::new(docs.iter().copied()).unwrap(), None).unwrap()
    }

    fn leaf_count(arena: &NodeArena) -> usize {
        arena
            .iter_ids()
            .filter(|&id| id != NodeId::ROOT && arena.node(id).is_leaf())
            .count()
    }

    #[test]
    fn test_mississippi_node_count() {
        let arena = build(&["mississippi"]);
        assert_eq!(arena.len(), 19);
        assert_eq!(leaf_count(&arena), 12);
    }

    #[test]
    fn test_shared_terminal_leaf() {
        // "$" is a suffix of both documents and ends in one leaf.
        let arena = build(&["aa", "bb"]);
        assert_eq!(arena.len(), 8);

        let dollar = arena.child(NodeId::ROOT, '$').unwrap();
        assert!(arena.node(dollar).is_leaf());
        assert_eq!(arena.node(dollar).documents, vec![0, 1]);
    }

    #[test]
    fn test_distinct_terminators_never_share_leaves() {
        let corpus = Corpus::assemble(
            ["aa", "bb"],
            None,
            CorpusConfig::distinct(DEFAULT_DISTINCT_BASE),
        )
        .unwrap();
        let arena = construct(&corpus, None).unwrap();
        assert_eq!(arena.len(), 9);
        for id in arena.iter_ids().skip(1) {
            if arena.node(id).is_leaf() {
                assert_eq!(arena.node(id).documents.len(), 1);
            }
        }
    }

    #[test]
    fn test_identical_documents() {
        let arena = build(&["abc", "abc"]);
        // One leaf per distinct suffix, each owned by both documents.
        assert_eq!(leaf_count(&arena), 4);
        for id in arena.iter_ids().skip(1) {
            assert_eq!(arena.node(id).documents, vec![0, 1]);
        }
    }

    #[test]
    fn test_no_open_leaves_remain() {
        let arena = build(&["abab", "babab", "ab"]);
        assert!(arena.iter_ids().all(|id| !arena.node(id).end.is_open()));
    }

    #[test]
    fn test_path_lengths_consistent() {
        let arena = build(&["abracadabra", "cadabra", "abba"]);
        for id in arena.iter_ids().skip(1) {
            let node = arena.node(id);
            let parent = node.parent.unwrap();
            assert_eq!(
                node.path_length,
                arena.node(parent).path_length + arena.edge_length(id)
            );
        }
    }

    #[test]
    fn test_sibling_edges_distinct() {
        let corpus = Corpus::new(["xabxac", "abxa"]).unwrap();
        let arena = construct(&corpus, None).unwrap();
        for id in arena.iter_ids() {
            for (&c, &child) in &arena.node(id).children {
                assert_eq!(corpus.text()[arena.node(child).start], c);
            }
        }
    }

    #[test]
    fn test_suffix_links_cleared() {
        let arena = build(&["banana"]);
        assert!(arena.iter_ids().all(|id| arena.node(id).suffix_link.is_none()));
    }

    #[test]
    fn test_cancelled_build() {
        let flag = CancelFlag::new();
        flag.cancel();
        let corpus = Corpus::new(["banana"]).unwrap();
        let result = Builder::new(corpus).with_cancel(flag).build();
        assert!(matches!(result, Err(GstError::Cancelled)));
    }

    #[test]
    fn test_repeated_character_run() {
        let long = "a".repeat(500);
        let arena = build(&[long.as_str()]);
        // A chain of 500 internal nodes ("a", "aa", ...) except the deepest,
        // plus 501 leaves and the root.
        assert_eq!(leaf_count(&arena), 501);
        assert_eq!(arena.len(), 1 + 501 + 499);
    }
}
