use crate::aggregate::Occurrence;
use crate::arena::NodeId;
use crate::tree::SuffixTree;

/// Where a successful match ends: `edge_offset` characters into the edge
/// leading to `node`. The match lands exactly on `node` when `edge_offset`
/// equals that edge's length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPoint {
    pub node: NodeId,
    pub edge_offset: usize,
}

impl SuffixTree {
    /// Checks whether `query` occurs in any indexed document.
    ///
    /// The empty query always matches. Queries containing a terminator never
    /// match, since no document contains one.
    pub fn find_pattern(&self, query: &str) -> bool {
        self.find_pattern_from(query, self.root())
    }

    /// Like [`find_pattern`](Self::find_pattern), reading `query` downwards
    /// from `from` instead of the root.
    pub fn find_pattern_from(&self, query: &str, from: NodeId) -> bool {
        self.locate_from(query, from).is_some()
    }

    /// Finds where `query` ends when read from the root.
    pub fn locate(&self, query: &str) -> Option<MatchPoint> {
        self.locate_from(query, self.root())
    }

    pub fn locate_from(&self, query: &str, from: NodeId) -> Option<MatchPoint> {
        let query: Vec<char> = query.chars().collect();
        if query.iter().any(|&c| self.corpus().is_terminator(c)) {
            return None;
        }

        let text = self.text();
        let mut point = MatchPoint {
            node: from,
            edge_offset: self.node(from).edge_length(),
        };
        let mut matched = 0;

        while matched < query.len() {
            let child = self.node(point.node).child(query[matched])?;
            let edge = self.node(child).edge_range();
            // Compare only what is left of the query when it ends mid-edge.
            let take = edge.len().min(query.len() - matched);
            if text[edge.start..edge.start + take] != query[matched..matched + take] {
                return None;
            }
            matched += take;
            point = MatchPoint {
                node: child,
                edge_offset: take,
            };
        }
        Some(point)
    }

    /// Every document suffix that starts with `query`, or `None` if `query`
    /// does not occur.
    pub fn occurrences(&self, query: &str) -> Option<&[Occurrence]> {
        self.locate(query)
            .map(|point| self.node(point.node).occurrences())
    }

    /// Number of occurrences of `query` across all documents.
    pub fn count(&self, query: &str) -> usize {
        self.occurrences(query).map_or(0, <[Occurrence]>::len)
    }
}
