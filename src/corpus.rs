use crate::config::CorpusConfig;
use crate::error::{GstError, Result};
use tracing::debug;

/// Position of one document inside the concatenated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentSpan {
    /// Offset of the document's first character.
    pub start: usize,
    /// Offset of the document's terminator.
    pub terminator: usize,
}

impl DocumentSpan {
    /// Number of characters including the terminator.
    pub fn len(&self) -> usize {
        self.terminator - self.start + 1
    }

    /// Returns true if the document has no content besides its terminator.
    pub fn is_empty(&self) -> bool {
        self.start == self.terminator
    }

    /// Offset one past the terminator.
    pub fn end(&self) -> usize {
        self.terminator + 1
    }
}

/// The assembled, read-only input of a suffix tree.
///
/// All documents are concatenated, each followed by its terminator. Documents
/// are grouped into type contexts; by default each document is its own
/// context.
///
/// # Example
///
/// ```
/// use gst_index::Corpus;
///
/// let corpus = Corpus::new(["aa", "bb"]).unwrap();
/// assert_eq!(corpus.text_string(), "aa$bb$");
/// assert_eq!(corpus.document_at(4), 1);
/// assert_eq!(corpus.type_context_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Corpus {
    text: Vec<char>,
    documents: Vec<DocumentSpan>,
    /// Document id of every text offset.
    document_lookup: Vec<u32>,
    /// Text offsets one past the last terminator of each type context.
    type_context_ends: Vec<usize>,
    /// Type context id of every document.
    document_contexts: Vec<usize>,
    config: CorpusConfig,
}

impl Corpus {
    /// Assembles documents with the default configuration, one type context
    /// per document.
    pub fn new<I, S>(documents: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::assemble(documents, None, CorpusConfig::default())
    }

    /// Assembles documents grouped into type contexts.
    ///
    /// `boundaries` holds cumulative document counts: `[1, 3]` puts the first
    /// document into context 0 and the next two into context 1.
    pub fn with_type_contexts<I, S>(documents: I, boundaries: &[usize]) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::assemble(documents, Some(boundaries), CorpusConfig::default())
    }

    /// Validates the input and builds the concatenated text.
    ///
    /// Fails if there are no documents, if a document contains a terminator
    /// character, or if the boundary counts are not strictly increasing and
    /// ending at the document count.
    pub fn assemble<I, S>(
        documents: I,
        boundaries: Option<&[usize]>,
        config: CorpusConfig,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let documents: Vec<S> = documents.into_iter().collect();
        if documents.is_empty() {
            return Err(GstError::EmptyCorpus);
        }
        let count = documents.len();
        let boundaries = match boundaries {
            Some(b) => validate_boundaries(b, count)?,
            None => (1..=count).collect(),
        };

        let mut text = Vec::new();
        let mut spans = Vec::with_capacity(count);
        let mut document_lookup = Vec::new();

        for (doc, content) in documents.iter().enumerate() {
            let terminator = config.terminator.for_document(doc)?;
            let start = text.len();
            for (offset, c) in content.as_ref().chars().enumerate() {
                if config.terminator.contains(c, count) {
                    return Err(GstError::TerminatorInContent {
                        document: doc,
                        offset,
                        terminator: c,
                    });
                }
                text.push(c);
            }
            spans.push(DocumentSpan {
                start,
                terminator: text.len(),
            });
            text.push(terminator);
            document_lookup.resize(text.len(), doc as u32);
        }

        // Node ids are u32 and a tree has at most 2n nodes.
        if text.len() > (u32::MAX / 2) as usize {
            return Err(GstError::InvalidConfig(format!(
                "corpus of {} characters is too large to index",
                text.len()
            )));
        }

        let mut document_contexts = Vec::with_capacity(count);
        let mut type_context_ends = Vec::with_capacity(boundaries.len());
        let mut first = 0;
        for (context, &last) in boundaries.iter().enumerate() {
            document_contexts.extend(std::iter::repeat(context).take(last - first));
            type_context_ends.push(spans[last - 1].end());
            first = last;
        }

        debug!(
            documents = count,
            type_contexts = type_context_ends.len(),
            length = text.len(),
            "assembled corpus"
        );

        Ok(Self {
            text,
            documents: spans,
            document_lookup,
            type_context_ends,
            document_contexts,
            config,
        })
    }

    /// The concatenated text, terminators included.
    pub fn text(&self) -> &[char] {
        &self.text
    }

    /// The concatenated text as a `String`.
    pub fn text_string(&self) -> String {
        self.text.iter().collect()
    }

    /// Length of the concatenated text in characters.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false: a corpus holds at least one terminator.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn documents(&self) -> &[DocumentSpan] {
        &self.documents
    }

    /// Span of document `doc`.
    ///
    /// # Panics
    ///
    /// Panics if `doc` is out of range.
    pub fn document(&self, doc: usize) -> DocumentSpan {
        self.documents[doc]
    }

    /// Document content without its terminator.
    pub fn document_text(&self, doc: usize) -> String {
        let span = self.documents[doc];
        self.text[span.start..span.terminator].iter().collect()
    }

    /// Document id owning the character at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is outside the text.
    pub fn document_at(&self, offset: usize) -> usize {
        self.document_lookup[offset] as usize
    }

    pub fn type_context_count(&self) -> usize {
        self.type_context_ends.len()
    }

    /// Strictly increasing text offsets where each type context ends; the
    /// last one equals [`len`](Self::len).
    pub fn type_context_ends(&self) -> &[usize] {
        &self.type_context_ends
    }

    /// Type context id of document `doc`.
    pub fn type_context_of(&self, doc: usize) -> usize {
        self.document_contexts[doc]
    }

    /// Checks whether `c` is one of this corpus's terminators.
    pub fn is_terminator(&self, c: char) -> bool {
        self.config.terminator.contains(c, self.documents.len())
    }

    /// Terminator character of document `doc`.
    pub fn terminator_of(&self, doc: usize) -> char {
        self.text[self.documents[doc].terminator]
    }
}

fn validate_boundaries(boundaries: &[usize], count: usize) -> Result<Vec<usize>> {
    if boundaries.is_empty() {
        return Err(GstError::InvalidTypeContexts(
            "at least one boundary is required".into(),
        ));
    }
    let mut previous = 0;
    for &b in boundaries {
        if b <= previous {
            return Err(GstError::InvalidTypeContexts(format!(
                "boundaries must be strictly increasing and positive, got {:?}",
                boundaries
            )));
        }
        previous = b;
    }
    if previous != count {
        return Err(GstError::InvalidTypeContexts(format!(
            "last boundary {} does not match document count {}",
            previous, count
        )));
    }
    Ok(boundaries.to_vec())
}
