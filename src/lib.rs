//! # gst-index - Generalized Suffix Tree over a Document Corpus
//!
//! Indexes a collection of texts for substring search and frequency analysis
//! by building one generalized suffix tree over all of them.
//!
//! Documents are concatenated with terminators and consumed online, one
//! character per phase (Ukkonen's algorithm). Leaves opened while a document
//! is read share a single open end and grow together; they are frozen when
//! the document's terminator arrives. A single post-order pass then attaches
//! to every node the occurrences of the document suffixes below it.
//!
//! ## Example
//!
//! ```
//! use gst_index::{Corpus, SuffixTree};
//!
//! let corpus = Corpus::with_type_contexts(["the cat", "a cat", "cats"], &[1, 3]).unwrap();
//! let tree = SuffixTree::build(corpus).unwrap();
//!
//! assert!(tree.find_pattern("cat"));
//! assert!(!tree.find_pattern("dog"));
//! assert_eq!(tree.count("cat"), 3);
//!
//! let cat = tree.locate("cat").unwrap().node;
//! assert_eq!(tree.context_frequencies(cat), vec![1, 2]);
//! ```
//!
//! ## Traversal
//!
//! [`SuffixTree::walk`] drives a [`TreeListener`] through a depth-first walk
//! with pre- and post-order callbacks. The [`collectors`] module holds
//! listeners that gather what label lists, frequency tables and
//! transition-network views need.
//!
//! ## Performance
//!
//! - O(n) construction for a corpus of n characters
//! - O(n) occurrence aggregation; every node's occurrences are a slice of one
//!   shared table
//! - Iterative traversal, safe on degenerate inputs

mod aggregate;
mod arena;
mod builder;
mod cancel;
pub mod collectors;
mod config;
mod corpus;
mod error;
mod matcher;
mod open_end;
mod tree;
pub mod walk;


pub use aggregate::Occurrence;
pub use arena::NodeId;
pub use builder::Builder;
pub use cancel::CancelFlag;
pub use config::{CorpusConfig, Terminator, DEFAULT_DISTINCT_BASE};
pub use corpus::{Corpus, DocumentSpan};
pub use error::{GstError, Result};
pub use matcher::MatchPoint;
pub use tree::{NodeView, SuffixTree};
pub use walk::{FnListener, TreeListener, VisitEvent};
