use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::{BTreeSet, HashMap};

/// Two neighbors of an ego word that pull it towards different senses.
///
/// Stored in lexicographic order so `(a, b)` and `(b, a)` are the same pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiscriminativePair {
    first: String,
    second: String,
}

impl DiscriminativePair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn contains(&self, word: &str) -> bool {
        self.first == word || self.second == word
    }
}

/// Discriminative pairs of one ego word, iterated in canonical order
pub type PairSet = BTreeSet<DiscriminativePair>;

/// Candidate sense indicator
#[derive(Debug, Clone, PartialEq)]
pub struct SenseNode {
    pub word: String,

    /// Number of discriminative pairs the word occurs in
    pub size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SenseEdge {
    /// Cosine similarity of the two words
    pub weight: f32,
}

/// Undirected weighted graph of sense indicators around one ego word.
///
/// Built fresh for every ego and dropped after clustering.
pub struct EgoNetwork {
    ego: String,

    pub graph: UnGraph<SenseNode, SenseEdge>,

    /// Word -> NodeIndex mapping for fast lookup
    word_index: HashMap<String, NodeIndex>,
}

impl EgoNetwork {
    pub fn new(ego: impl Into<String>) -> Self {
        Self {
            ego: ego.into(),
            graph: UnGraph::new_undirected(),
            word_index: HashMap::new(),
        }
    }

    pub fn ego(&self) -> &str {
        &self.ego
    }

    /// Count one more pair occurrence of `word`, adding the node on first sight.
    /// Node indices follow first-occurrence order.
    pub fn add_occurrence(&mut self, word: &str) -> NodeIndex {
        if let Some(&idx) = self.word_index.get(word) {
            self.graph[idx].size += 1;
            return idx;
        }

        let idx = self.graph.add_node(SenseNode {
            word: word.to_string(),
            size: 1,
        });
        self.word_index.insert(word.to_string(), idx);
        idx
    }

    /// Connect two nodes. Self-loops are ignored; an existing edge keeps the larger
    /// of the two weights.
    pub fn add_edge(&mut self, a: NodeIndex, b: NodeIndex, weight: f32) {
        if a == b {
            return;
        }
        match self.graph.find_edge(a, b) {
            Some(edge) => {
                let existing = &mut self.graph[edge];
                existing.weight = existing.weight.max(weight);
            }
            None => {
                self.graph.add_edge(a, b, SenseEdge { weight });
            }
        }
    }

    /// Find node by word
    pub fn find_node(&self, word: &str) -> Option<NodeIndex> {
        self.word_index.get(word).copied()
    }

    pub fn get_node(&self, idx: NodeIndex) -> Option<&SenseNode> {
        self.graph.node_weight(idx)
    }

    /// Get all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &SenseNode)> {
        self.graph
            .node_indices()
            .filter_map(move |idx| self.graph.node_weight(idx).map(|node| (idx, node)))
    }

    /// Neighbors of `idx` with the weight of the connecting edge
    pub fn weighted_neighbors(
        &self,
        idx: NodeIndex,
    ) -> impl Iterator<Item = (NodeIndex, f32)> + '_ {
        self.graph.edges(idx).map(move |edge| {
            let other = if edge.source() == idx {
                edge.target()
            } else {
                edge.source()
            };
            (other, edge.weight().weight)
        })
    }

    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges(idx).count()
    }

    /// Whether the two words are both nodes and directly connected
    pub fn connected(&self, a: &str, b: &str) -> bool {
        match (self.find_node(a), self.find_node(b)) {
            (Some(a), Some(b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
