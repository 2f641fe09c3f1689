use crate::arena::{NodeArena, NodeId};
use crate::corpus::Corpus;
use tracing::debug;

/// One document suffix passing through a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Occurrence {
    pub document: usize,
    pub type_context: usize,
    /// Character offset of the suffix inside its document.
    pub start: usize,
}

/// Attaches occurrences to every node in a single post-order pass.
///
/// Leaves are visited in depth-first order with children sorted by their
/// first character, so the occurrences beneath any node form one contiguous
/// run of the returned table. Each node stores the bounds of its run; the
/// union of a node's children is therefore just the span from its first
/// child's start to its last child's end, and nothing is copied.
pub(crate) fn aggregate(arena: &mut NodeArena, corpus: &Corpus) -> Vec<Occurrence> {
    let mut occurrences = Vec::with_capacity(corpus.len());
    let mut stack = vec![(NodeId::ROOT, false)];
    // Start of the run for each node currently on the path from the root.
    let mut run_starts = Vec::new();

    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            let start = run_starts.pop().expect("run start pushed on entry");
            arena.node_mut(id).occurrences = start..occurrences.len();
            continue;
        }

        let node = arena.node(id);
        if node.is_leaf() && id != NodeId::ROOT {
            let start = occurrences.len();
            for &doc in &node.documents {
                let doc = doc as usize;
                occurrences.push(Occurrence {
                    document: doc,
                    type_context: corpus.type_context_of(doc),
                    start: corpus.document(doc).len() - node.path_length,
                });
            }
            arena.node_mut(id).occurrences = start..occurrences.len();
            continue;
        }

        run_starts.push(occurrences.len());
        stack.push((id, true));
        // Reverse so the smallest first character is visited first.
        stack.extend(node.children.values().rev().map(|&child| (child, false)));
    }

    debug!(occurrences = occurrences.len(), "occurrences aggregated");
    occurrences
}
