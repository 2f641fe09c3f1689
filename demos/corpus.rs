use gst_index::collectors::{LabelFrequencies, NodeRecords};
use gst_index::{Corpus, SuffixTree};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Three short texts, the last two forming one type context
    let documents = [
        "The new AI model shows impressive results",
        "The new AI technology demonstrates strong results",
        "Researchers released the new AI system",
    ];
    let corpus = Corpus::with_type_contexts(documents, &[1, 3]).expect("valid corpus");
    let tree = SuffixTree::build(corpus).expect("tree builds");

    println!("=== Index ===");
    println!("Documents: {}", tree.unit_count());
    println!("Type contexts: {}", tree.type_context_count());
    println!("Text length: {} characters", tree.text().len());
    println!("Nodes: {}\n", tree.node_count());

    println!("=== Queries ===");
    for query in ["new AI", "results", "model", "old AI"] {
        match tree.locate(query) {
            Some(point) => println!(
                "{:?}: {} occurrences, per context {:?}",
                query,
                tree.count(query),
                tree.context_frequencies(point.node)
            ),
            None => println!("{:?}: not found", query),
        }
    }

    println!("\n=== Frequent labels ===");
    let frequencies = LabelFrequencies::collect(&tree);
    let mut labels: Vec<(&String, usize)> = frequencies
        .frequencies
        .iter()
        .filter(|(label, _)| label.chars().count() > 3)
        .map(|(label, freqs)| (label, freqs.iter().sum()))
        .collect();
    labels.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    for (label, total) in labels.iter().take(5) {
        println!("{:?}: {}", label, total);
    }

    println!("\n=== Node records ===");
    let records = NodeRecords::collect(&tree);
    println!(
        "unitCount={} nodeCount={} records={}",
        records.unit_count,
        records.node_count,
        records.nodes.len()
    );
}
