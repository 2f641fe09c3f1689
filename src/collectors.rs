//! Listeners gathering the node fields downstream serializers read.
//!
//! None of these pick a wire format; they only collect the data a JSON, XML,
//! CSV or transition-network writer would need.

use crate::arena::NodeId;
use crate::tree::SuffixTree;
use crate::walk::TreeListener;
use ahash::{AHashMap as HashMap, AHashSet as HashSet};

/// Where one occurrence of a node's string starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternInfo {
    pub type_nr: usize,
    pub pattern_nr: usize,
    pub start_pos: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub number: usize,
    pub label: String,
    pub frequency: usize,
    pub pattern_infos: Vec<PatternInfo>,
}

/// Every node with its label, frequency and occurrences, in pre-order.
#[derive(Debug, Clone, Default)]
pub struct NodeRecords {
    pub unit_count: usize,
    pub node_count: usize,
    pub nodes: Vec<NodeRecord>,
}

impl NodeRecords {
    pub fn collect(tree: &SuffixTree) -> Self {
        let mut records = Self::default();
        tree.walk(tree.root(), &mut records);
        records
    }
}

impl TreeListener for NodeRecords {
    fn entry(&mut self, tree: &SuffixTree, node: NodeId, _level: usize) {
        let view = tree.node(node);
        if view.is_root() {
            self.unit_count = tree.unit_count();
            self.node_count = tree.node_count();
        }
        self.nodes.push(NodeRecord {
            number: view.number(),
            label: view.edge_string(),
            frequency: view.frequency(),
            pattern_infos: view
                .occurrences()
                .iter()
                .map(|occ| PatternInfo {
                    type_nr: occ.type_context,
                    pattern_nr: occ.document,
                    start_pos: occ.start,
                })
                .collect(),
        });
    }
}

/// Distinct edge labels in the order they are first met.
#[derive(Debug, Clone, Default)]
pub struct LabelList {
    seen: HashSet<String>,
    pub labels: Vec<String>,
}

impl LabelList {
    pub fn collect(tree: &SuffixTree) -> Self {
        let mut list = Self::default();
        tree.walk(tree.root(), &mut list);
        list
    }
}

impl TreeListener for LabelList {
    fn entry(&mut self, tree: &SuffixTree, node: NodeId, _level: usize) {
        if node == tree.root() {
            return;
        }
        let label = tree.node(node).edge_string();
        if self.seen.insert(label.clone()) {
            self.labels.push(label);
        }
    }
}

/// Edge label mapped to the frequencies of every node carrying it.
#[derive(Debug, Clone, Default)]
pub struct LabelFrequencies {
    pub frequencies: HashMap<String, Vec<usize>>,
}

impl LabelFrequencies {
    pub fn collect(tree: &SuffixTree) -> Self {
        let mut map = Self::default();
        tree.walk(tree.root(), &mut map);
        map
    }

    pub fn get(&self, label: &str) -> Option<&[usize]> {
        self.frequencies.get(label).map(Vec::as_slice)
    }
}

impl TreeListener for LabelFrequencies {
    fn entry(&mut self, tree: &SuffixTree, node: NodeId, _level: usize) {
        if node == tree.root() {
            return;
        }
        let view = tree.node(node);
        self.frequencies
            .entry(view.edge_string())
            .or_default()
            .push(view.frequency());
    }
}

/// One table row per non-root node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDataRow {
    pub label: String,
    pub frequency: usize,
    pub context_frequencies: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct LabelData {
    pub rows: Vec<LabelDataRow>,
}

impl LabelData {
    pub fn collect(tree: &SuffixTree) -> Self {
        let mut data = Self::default();
        tree.walk(tree.root(), &mut data);
        data
    }
}

impl TreeListener for LabelData {
    fn entry(&mut self, tree: &SuffixTree, node: NodeId, _level: usize) {
        if node == tree.root() {
            return;
        }
        let view = tree.node(node);
        self.rows.push(LabelDataRow {
            label: view.edge_string(),
            frequency: view.frequency(),
            context_frequencies: tree.context_frequencies(node),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: NodeId,
    pub to: NodeId,
    pub label: String,
}

/// The tree seen as a transition network: nodes are states, edges are
/// labelled transitions, leaves are final states.
#[derive(Debug, Clone, Default)]
pub struct TransitionNetwork {
    pub transitions: Vec<Transition>,
    pub final_states: Vec<NodeId>,
}

impl TransitionNetwork {
    pub fn collect(tree: &SuffixTree) -> Self {
        let mut network = Self::default();
        tree.walk(tree.root(), &mut network);
        network
    }
}

impl TreeListener for TransitionNetwork {
    fn entry(&mut self, tree: &SuffixTree, node: NodeId, _level: usize) {
        let view = tree.node(node);
        if let Some(parent) = view.parent() {
            self.transitions.push(Transition {
                from: parent,
                to: node,
                label: view.edge_string(),
            });
        }
        if view.is_leaf() {
            self.final_states.push(node);
        }
    }
}

/// Root-to-leaf edge labels of every suffix, grouped per document.
///
/// `segments[doc][start]` holds the labels spelling the suffix of `doc` that
/// begins at character `start`.
#[derive(Debug, Clone, Default)]
pub struct DocumentSegments {
    path: Vec<String>,
    pub segments: Vec<Vec<Vec<String>>>,
}

impl DocumentSegments {
    pub fn collect(tree: &SuffixTree) -> Self {
        let mut segments = Self {
            path: Vec::new(),
            segments: tree
                .corpus()
                .documents()
                .iter()
                .map(|span| vec![Vec::new(); span.len()])
                .collect(),
        };
        tree.walk(tree.root(), &mut segments);
        segments
    }

    /// Segments of the whole document (its longest suffix).
    pub fn document(&self, doc: usize) -> &[String] {
        &self.segments[doc][0]
    }
}

impl TreeListener for DocumentSegments {
    fn entry(&mut self, tree: &SuffixTree, node: NodeId, _level: usize) {
        let view = tree.node(node);
        if view.is_root() {
            return;
        }
        self.path.push(view.edge_string());
        if view.is_leaf() {
            for occ in view.occurrences() {
                self.segments[occ.document][occ.start] = self.path.clone();
            }
        }
    }

    fn exit(&mut self, tree: &SuffixTree, node: NodeId, _level: usize) {
        if node != tree.root() {
            self.path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;

    #[test]
    fn test_node_records() {
        let tree = SuffixTree::from_documents(["aa", "bb"]).unwrap();
        let records = NodeRecords::collect(&tree);
        assert_eq!(records.unit_count, 2);
        assert_eq!(records.node_count, 8);
        assert_eq!(records.nodes.len(), 8);
        assert_eq!(records.nodes[0].number, 0);
        assert_eq!(records.nodes[0].frequency, 6);

        let dollar = records
            .nodes
            .iter()
            .find(|r| r.label == "$" && r.frequency == 2)
            .unwrap();
        assert_eq!(
            dollar.pattern_infos,
            vec![
                PatternInfo { type_nr: 0, pattern_nr: 0, start_pos: 2 },
                PatternInfo { type_nr: 1, pattern_nr: 1, start_pos: 2 },
            ]
        );
    }

    #[test]
    fn test_label_list_is_distinct() {
        let tree = SuffixTree::from_documents(["aa", "bb"]).unwrap();
        let list = LabelList::collect(&tree);
        assert_eq!(list.labels, vec!["$", "a", "a$", "b", "b$"]);
    }

    #[test]
    fn test_label_frequencies() {
        let tree = SuffixTree::from_documents(["aa", "bb"]).unwrap();
        let map = LabelFrequencies::collect(&tree);
        // Root "$" leaf is shared by both documents; the two "$" below "a"
        // and "b" are single occurrences.
        assert_eq!(map.get("$"), Some(&[2, 1, 1][..]));
        assert_eq!(map.get("a"), Some(&[2][..]));
        assert_eq!(map.get("c"), None);
    }

    #[test]
    fn test_label_data_rows() {
        let corpus = Corpus::with_type_contexts(["xy", "y", "zy"], &[1, 3]).unwrap();
        let tree = SuffixTree::build(corpus).unwrap();
        let data = LabelData::collect(&tree);
        assert_eq!(data.rows.len(), tree.node_count() - 1);
        let y = data.rows.iter().find(|r| r.label == "y$").unwrap();
        assert_eq!(y.frequency, 3);
        assert_eq!(y.context_frequencies, vec![1, 2]);
    }

    #[test]
    fn test_transition_network() {
        let tree = SuffixTree::from_documents(["aa", "bb"]).unwrap();
        let network = TransitionNetwork::collect(&tree);
        assert_eq!(network.transitions.len(), tree.node_count() - 1);
        assert_eq!(network.final_states.len(), 5);
        for t in &network.transitions {
            assert_eq!(tree.node(t.to).parent(), Some(t.from));
        }
    }

    #[test]
    fn test_document_segments() {
        let tree = SuffixTree::from_documents(["aa", "bb"]).unwrap();
        let segments = DocumentSegments::collect(&tree);
        assert_eq!(segments.document(0), &["a", "a$"]);
        assert_eq!(segments.segments[0][1], vec!["a", "$"]);
        assert_eq!(segments.segments[0][2], vec!["$"]);
        assert_eq!(segments.document(1), &["b", "b$"]);
        assert_eq!(segments.segments[1][2], vec!["$"]);
    }
}
