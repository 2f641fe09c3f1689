/// The end offset shared by every leaf opened in the current document.
///
/// Leaves hold [`EdgeEnd::Open`] instead of a number while their document is
/// being processed; advancing this counter extends all of them at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct GlobalOpenEnd(usize);

impl GlobalOpenEnd {
    pub(crate) fn get(self) -> usize {
        self.0
    }

    /// Moves the end forward to `end` (exclusive text offset).
    pub(crate) fn advance_to(&mut self, end: usize) {
        debug_assert!(end >= self.0, "open end cannot move backwards");
        self.0 = end;
    }
}

/// Exclusive end offset of a node's incoming edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeEnd {
    Fixed(usize),
    /// Follows the [`GlobalOpenEnd`] until the leaf is frozen.
    Open,
}

impl EdgeEnd {
    #[inline]
    pub(crate) fn resolve(self, open: GlobalOpenEnd) -> usize {
        match self {
            EdgeEnd::Fixed(end) => end,
            EdgeEnd::Open => open.get(),
        }
    }

    pub(crate) fn is_open(self) -> bool {
        matches!(self, EdgeEnd::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_edges_follow_counter() {
        let mut open = GlobalOpenEnd::default();
        let leaf = EdgeEnd::Open;
        let fixed = EdgeEnd::Fixed(3);

        open.advance_to(4);
        assert_eq!(leaf.resolve(open), 4);
        open.advance_to(9);
        assert_eq!(leaf.resolve(open), 9);
        assert_eq!(fixed.resolve(open), 3);
        assert!(leaf.is_open());
        assert!(!fixed.is_open());
    }
}
