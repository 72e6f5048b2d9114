use crate::types::EgoNetwork;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default number of label propagation passes
pub const DEFAULT_ITERATIONS: usize = 20;

/// How a neighbor's edge weight counts towards its label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weighting {
    /// Raw edge weight
    #[default]
    Top,

    /// Edge weight divided by the neighbor's degree
    Lin,

    /// Edge weight divided by `ln(1 + degree)` of the neighbor
    Log,
}

/// Group of nodes sharing a label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub label: usize,

    /// Members in node insertion order
    pub members: Vec<NodeIndex>,
}

/// Chinese Whispers label propagation.
///
/// Every node starts in its own class. On each pass every node adopts the label with
/// the largest total (weighted) edge weight among its neighbors; ties go to the label
/// with the heaviest single edge, then to the smaller label. Two neighbors that would
/// trade labels with each other both take the smaller of the two instead, otherwise
/// they would swap forever.
///
/// A pass reads the labels of the previous pass only and replaces them all at once, so
/// the result does not depend on the order nodes are visited in. The pass count is an
/// upper bound, not a convergence guarantee; propagation stops early once a pass
/// changes nothing.
#[derive(Debug, Clone, Copy)]
pub struct ChineseWhispers {
    iterations: usize,
    weighting: Weighting,
}

impl Default for ChineseWhispers {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS, Weighting::Top)
    }
}

impl ChineseWhispers {
    pub fn new(iterations: usize, weighting: Weighting) -> Self {
        Self {
            iterations,
            weighting,
        }
    }

    /// Final label of every node, indexed by `NodeIndex::index()`
    pub fn label(&self, network: &EgoNetwork) -> Vec<usize> {
        let mut labels: Vec<usize> = (0..network.node_count()).collect();

        for pass in 0..self.iterations {
            let proposed: Vec<usize> = network
                .graph
                .node_indices()
                .map(|node| self.vote(network, node, &labels))
                .collect();
            let next: Vec<usize> = network
                .graph
                .node_indices()
                .map(|node| settle_swap(network, node, &labels, &proposed))
                .collect();

            let changed = next
                .iter()
                .zip(&labels)
                .filter(|(new, old)| new != old)
                .count();
            labels = next;

            if changed == 0 {
                log::trace!("{}: labels stable after {} passes", network.ego(), pass + 1);
                break;
            }
        }

        labels
    }

    /// Partition the network; clusters are ordered by label
    pub fn cluster(&self, network: &EgoNetwork) -> Vec<Cluster> {
        let labels = self.label(network);

        let mut groups: BTreeMap<usize, Vec<NodeIndex>> = BTreeMap::new();
        for node in network.graph.node_indices() {
            groups.entry(labels[node.index()]).or_default().push(node);
        }

        groups
            .into_iter()
            .map(|(label, members)| Cluster { label, members })
            .collect()
    }

    fn vote(&self, network: &EgoNetwork, node: NodeIndex, labels: &[usize]) -> usize {
        // label -> (total weight, heaviest single edge)
        let mut scores: BTreeMap<usize, (f32, f32)> = BTreeMap::new();

        for (other, weight) in network.weighted_neighbors(node) {
            let weight = self.scale(network, other, weight);
            let score = scores.entry(labels[other.index()]).or_insert((0.0, 0.0));
            score.0 += weight;
            score.1 = score.1.max(weight);
        }

        scores
            .into_iter()
            .max_by(|(label_a, a), (label_b, b)| {
                a.0.total_cmp(&b.0)
                    .then(a.1.total_cmp(&b.1))
                    .then(label_b.cmp(label_a))
            })
            .map_or(labels[node.index()], |(label, _)| label)
    }

    fn scale(&self, network: &EgoNetwork, neighbor: NodeIndex, weight: f32) -> f32 {
        match self.weighting {
            Weighting::Top => weight,
            Weighting::Lin => weight / network.degree(neighbor).max(1) as f32,
            Weighting::Log => weight / (1.0 + network.degree(neighbor) as f32).ln(),
        }
    }
}

/// Label of `node` after a pass: its proposal, unless it and a neighbor proposed each
/// other's labels, in which case both keep the smaller one
fn settle_swap(
    network: &EgoNetwork,
    node: NodeIndex,
    labels: &[usize],
    proposed: &[usize],
) -> usize {
    let own = labels[node.index()];
    let wanted = proposed[node.index()];
    if wanted == own {
        return own;
    }

    let swapped = network.weighted_neighbors(node).any(|(other, _)| {
        labels[other.index()] == wanted && proposed[other.index()] == own
    });
    if swapped {
        own.min(wanted)
    } else {
        wanted
    }
}
