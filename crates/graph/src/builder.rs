use crate::error::Result;
use crate::types::{DiscriminativePair, EgoNetwork, PairSet};
use petgraph::graph::NodeIndex;
use sense_vector_store::NeighborIndex;

/// Builds an [`EgoNetwork`] from discriminative pairs.
///
/// Nodes are the words of all pairs. Each node is linked to those of its own top
/// neighbors that are also nodes, except for its discriminative partners: pair members
/// stand for different senses and must stay disconnected.
pub struct EgoNetworkBuilder<'a, N> {
    index: &'a N,
    neighbors_number: usize,
}

impl<'a, N: NeighborIndex> EgoNetworkBuilder<'a, N> {
    pub fn new(index: &'a N, neighbors_number: usize) -> Self {
        Self {
            index,
            neighbors_number,
        }
    }

    pub fn build(&self, ego: &str, pairs: &PairSet) -> Result<EgoNetwork> {
        let mut network = EgoNetwork::new(ego);

        // Phase 1: nodes, sized by pair count, inserted in canonical pair order
        for pair in pairs {
            network.add_occurrence(pair.first());
            network.add_occurrence(pair.second());
        }

        // Phase 2: similarity edges among nodes
        let nodes: Vec<(NodeIndex, String)> = network
            .nodes()
            .map(|(idx, node)| (idx, node.word.clone()))
            .collect();

        for (idx, word) in &nodes {
            let related = self.index.neighbors(word, self.neighbors_number)?;
            for neighbor in related {
                let Some(other) = network.find_node(&neighbor.word) else {
                    continue;
                };
                if pairs.contains(&DiscriminativePair::new(word.as_str(), neighbor.word.as_str())) {
                    log::trace!("{}: keeping '{}' and '{}' apart", ego, word, neighbor.word);
                    continue;
                }
                network.add_edge(*idx, other, neighbor.similarity);
            }
        }

        log::debug!(
            "Built ego network for '{}': {} nodes, {} edges",
            ego,
            network.node_count(),
            network.edge_count()
        );

        Ok(network)
    }
}
