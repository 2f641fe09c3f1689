//! Depth-first traversal driving pluggable listeners.
//!
//! A walk reports every node twice: once on entry (pre-order) and once on
//! exit (post-order), with children visited in ascending order of their first
//! character. Listeners only ever see a shared reference to the tree, so any
//! number of walks can run concurrently.

use crate::arena::NodeId;
use crate::cancel::CancelFlag;
use crate::error::{GstError, Result};
use crate::tree::SuffixTree;
use tracing::debug;

/// A single traversal event. `level` is the depth below the walk's start node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitEvent {
    Enter { node: NodeId, level: usize },
    Exit { node: NodeId, level: usize },
}

/// Receives the events of a walk.
pub trait TreeListener {
    fn entry(&mut self, tree: &SuffixTree, node: NodeId, level: usize);

    fn exit(&mut self, tree: &SuffixTree, node: NodeId, level: usize) {
        let _ = (tree, node, level);
    }
}

/// Adapts a closure over [`VisitEvent`]s into a [`TreeListener`].
pub struct FnListener<F>(pub F);

/// Wraps `f` so it can be passed wherever a [`TreeListener`] is expected.
///
/// ```
/// use gst_index::{walk, SuffixTree, VisitEvent};
///
/// let tree = SuffixTree::from_documents(["aa", "bb"]).unwrap();
/// let mut leaves = 0;
/// tree.walk(tree.root(), &mut walk::from_fn(|tree, event| {
///     if let VisitEvent::Enter { node, .. } = event {
///         if tree.node(node).is_leaf() {
///             leaves += 1;
///         }
///     }
/// }));
/// assert_eq!(leaves, 5);
/// ```
pub fn from_fn<F>(f: F) -> FnListener<F>
where
    F: FnMut(&SuffixTree, VisitEvent),
{
    FnListener(f)
}

impl<F: FnMut(&SuffixTree, VisitEvent)> TreeListener for FnListener<F> {
    fn entry(&mut self, tree: &SuffixTree, node: NodeId, level: usize) {
        (self.0)(tree, VisitEvent::Enter { node, level })
    }

    fn exit(&mut self, tree: &SuffixTree, node: NodeId, level: usize) {
        (self.0)(tree, VisitEvent::Exit { node, level })
    }
}

impl<L: TreeListener + ?Sized> TreeListener for &mut L {
    fn entry(&mut self, tree: &SuffixTree, node: NodeId, level: usize) {
        (**self).entry(tree, node, level)
    }

    fn exit(&mut self, tree: &SuffixTree, node: NodeId, level: usize) {
        (**self).exit(tree, node, level)
    }
}

enum Frame {
    Enter(NodeId, usize),
    Exit(NodeId, usize),
}

impl SuffixTree {
    /// Walks the subtree below `from`, reporting events to `listener`.
    pub fn walk<L: TreeListener>(&self, from: NodeId, listener: &mut L) {
        // Without a flag the walk cannot be cancelled.
        let _ = self.walk_frames(from, listener, None);
    }

    /// Like [`walk`](Self::walk), but stops with [`GstError::Cancelled`] once
    /// `cancel` is set. Whatever the listener gathered up to that point is
    /// incomplete; the tree itself is untouched.
    pub fn walk_with_cancel<L: TreeListener>(
        &self,
        from: NodeId,
        listener: &mut L,
        cancel: &CancelFlag,
    ) -> Result<()> {
        self.walk_frames(from, listener, Some(cancel))
    }

    /// Explicit-stack traversal, so degenerate inputs cannot exhaust the
    /// native stack.
    fn walk_frames<L: TreeListener>(
        &self,
        from: NodeId,
        listener: &mut L,
        cancel: Option<&CancelFlag>,
    ) -> Result<()> {
        let mut stack = vec![Frame::Enter(from, 0)];
        let mut visited = 0usize;

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(node, level) => {
                    if cancel.is_some_and(CancelFlag::is_cancelled) {
                        debug!(visited, "walk cancelled");
                        return Err(GstError::Cancelled);
                    }
                    visited += 1;
                    listener.entry(self, node, level);
                    stack.push(Frame::Exit(node, level));
                    let children = &self.arena().node(node).children;
                    stack.extend(
                        children
                            .values()
                            .rev()
                            .map(|&child| Frame::Enter(child, level + 1)),
                    );
                }
                Frame::Exit(node, level) => listener.exit(self, node, level),
            }
        }
        Ok(())
    }

    /// Recursive reference traversal used to check the explicit-stack walker.
    #[cfg(test)]
    pub(crate) fn walk_recursive<L: TreeListener>(
        &self,
        node: NodeId,
        level: usize,
        listener: &mut L,
    ) {
        listener.entry(self, node, level);
        for child in self.node(node).children() {
            self.walk_recursive(child, level + 1, listener);
        }
        listener.exit(self, node, level);
    }
}
