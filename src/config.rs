use crate::error::{GstError, Result};

/// First Private Use Area code point, the default base for distinct terminators.
pub const DEFAULT_DISTINCT_BASE: char = '\u{E000}';

/// How documents are terminated inside the concatenated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// Every document ends with the same character.
    ///
    /// Identical suffixes of different documents end in one shared leaf that
    /// carries an occurrence for each document.
    Shared(char),

    /// Document `i` ends with the character `base + i`.
    ///
    /// Every leaf belongs to exactly one document suffix.
    Distinct { base: char },
}

impl Terminator {
    /// Returns the terminator of the document at `index`.
    pub(crate) fn for_document(&self, index: usize) -> Result<char> {
        match *self {
            Terminator::Shared(c) => Ok(c),
            Terminator::Distinct { base } => u32::try_from(index)
                .ok()
                .and_then(|i| (base as u32).checked_add(i))
                .and_then(char::from_u32)
                .ok_or_else(|| {
                    GstError::InvalidConfig(format!(
                        "no terminator for document {} from base {:?}",
                        index, base
                    ))
                }),
        }
    }

    /// Checks whether `c` is a terminator for a corpus of `documents` documents.
    pub(crate) fn contains(&self, c: char, documents: usize) -> bool {
        match *self {
            Terminator::Shared(t) => c == t,
            Terminator::Distinct { base } => {
                let (c, base) = (c as u32, base as u32);
                c >= base && ((c - base) as usize) < documents
            }
        }
    }
}

/// Settings for assembling a corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusConfig {
    pub terminator: Terminator,
}

impl CorpusConfig {
    /// Uses one shared terminator character for every document.
    pub fn shared(terminator: char) -> Self {
        Self {
            terminator: Terminator::Shared(terminator),
        }
    }

    /// Gives every document its own terminator, counting up from `base`.
    pub fn distinct(base: char) -> Self {
        Self {
            terminator: Terminator::Distinct { base },
        }
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self::shared('$')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_shared_dollar() {
        assert_eq!(CorpusConfig::default().terminator, Terminator::Shared('$'));
    }

    #[test]
    fn test_distinct_terminators() {
        let t = Terminator::Distinct { base: DEFAULT_DISTINCT_BASE };
        assert_eq!(t.for_document(0), Ok('\u{E000}'));
        assert_eq!(t.for_document(3), Ok('\u{E003}'));
        assert!(t.contains('\u{E002}', 3));
        assert!(!t.contains('\u{E003}', 3));
        assert!(!t.contains('a', 3));
    }

    #[test]
    fn test_distinct_overflow() {
        // Crosses into the surrogate range.
        let t = Terminator::Distinct { base: '\u{D7FF}' };
        assert!(t.for_document(0).is_ok());
        assert!(matches!(t.for_document(1), Err(GstError::InvalidConfig(_))));
    }
}
