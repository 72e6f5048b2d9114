use crate::sense::SenseRecord;
use sense_graph::{Cluster, EgoNetwork, SenseNode};
use std::cmp::{Ordering, Reverse};

/// Turn the clusters of an ego network into sense records.
///
/// The keyword of a cluster is its member with the largest pair count, ties going to
/// the alphabetically first word so rebuilt inventories are identical. Records are
/// ordered largest cluster first, then by label.
pub fn compile(network: &EgoNetwork, clusters: &[Cluster]) -> Vec<SenseRecord> {
    let mut ordered: Vec<&Cluster> = clusters
        .iter()
        .filter(|cluster| !cluster.members.is_empty())
        .collect();
    ordered.sort_by_key(|cluster| (Reverse(cluster.members.len()), cluster.label));

    ordered
        .into_iter()
        .filter_map(|cluster| {
            let members: Vec<&SenseNode> = cluster
                .members
                .iter()
                .filter_map(|idx| network.get_node(*idx))
                .collect();
            let keyword = members.iter().copied().max_by(by_weight)?;

            Some(SenseRecord {
                word: network.ego().to_string(),
                sense_id: cluster.label,
                keyword: keyword.word.clone(),
                cluster: members.iter().map(|node| node.word.clone()).collect(),
            })
        })
        .collect()
}

fn by_weight(a: &&SenseNode, b: &&SenseNode) -> Ordering {
    a.size.cmp(&b.size).then_with(|| b.word.cmp(&a.word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sense_graph::ChineseWhispers;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_keyword_and_order() {
        let mut network = EgoNetwork::new("bank");
        // sizes: money 2, deposit 1, loan 1, river 1, shore 1
        for word in ["money", "money", "deposit", "loan", "shore", "river"] {
            network.add_occurrence(word);
        }
        let idx = |w: &str| network.find_node(w).unwrap();
        let clusters = vec![
            Cluster {
                label: 3,
                members: vec![idx("shore"), idx("river")],
            },
            Cluster {
                label: 0,
                members: vec![idx("money"), idx("deposit"), idx("loan")],
            },
        ];

        let records = compile(&network, &clusters);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].sense_id, 0);
        assert_eq!(records[0].keyword, "money");
        assert_eq!(records[0].cluster, strings(&["money", "deposit", "loan"]));

        // equal sizes: alphabetical tie-break
        assert_eq!(records[1].sense_id, 3);
        assert_eq!(records[1].keyword, "river");
        assert_eq!(records[1].word, "bank");
    }

    #[test]
    fn test_empty_network_compiles_to_nothing() {
        let network = EgoNetwork::new("void");
        let clusters = ChineseWhispers::default().cluster(&network);
        assert!(compile(&network, &clusters).is_empty());
    }
}
