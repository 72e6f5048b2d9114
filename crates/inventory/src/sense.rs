use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Word and keyword of the sentinel sense returned for words without known senses
pub const UNKNOWN: &str = "UNKNOWN";

/// One meaning of a word: a keyword and the cluster of words it was induced from.
///
/// Equality and hashing are structural over `(word, keyword, cluster as a set)`, so
/// the same sense read through different spellings or row orders collapses to one
/// map key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sense {
    pub word: String,
    pub keyword: String,
    pub cluster: Vec<String>,
}

impl Sense {
    pub fn new(word: impl Into<String>, keyword: impl Into<String>, cluster: Vec<String>) -> Self {
        Self {
            word: word.into(),
            keyword: keyword.into(),
            cluster,
        }
    }

    /// Sentinel for words the inventory knows nothing about
    pub fn unknown() -> Self {
        Self::new(UNKNOWN, UNKNOWN, Vec::new())
    }

    pub fn is_unknown(&self) -> bool {
        self.word == UNKNOWN && self.keyword == UNKNOWN && self.cluster.is_empty()
    }

    fn sorted_cluster(&self) -> Vec<&str> {
        let mut members: Vec<&str> = self.cluster.iter().map(String::as_str).collect();
        members.sort_unstable();
        members.dedup();
        members
    }
}

impl PartialEq for Sense {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
            && self.keyword == other.keyword
            && self.sorted_cluster() == other.sorted_cluster()
    }
}

impl Eq for Sense {}

impl Hash for Sense {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word.hash(state);
        self.keyword.hash(state);
        self.sorted_cluster().hash(state);
    }
}

/// Persisted inventory row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenseRecord {
    pub word: String,

    /// Label of the cluster the sense came from; unique per word
    pub sense_id: usize,

    pub keyword: String,

    /// Cluster members in the order their nodes entered the ego network, which is
    /// the order of the first pair (canonical pair order) each one appears in
    pub cluster: Vec<String>,
}

impl SenseRecord {
    pub fn sense(&self) -> Sense {
        Sense::new(self.word.clone(), self.keyword.clone(), self.cluster.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn cluster(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_equality_ignores_member_order() {
        let a = Sense::new("bank", "money", cluster(&["money", "deposit"]));
        let b = Sense::new("bank", "money", cluster(&["deposit", "money"]));
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }

    #[test]
    fn test_equality_checks_every_field() {
        let base = Sense::new("bank", "money", cluster(&["money", "deposit"]));
        assert_ne!(base, Sense::new("Bank", "money", cluster(&["money", "deposit"])));
        assert_ne!(base, Sense::new("bank", "deposit", cluster(&["money", "deposit"])));
        assert_ne!(base, Sense::new("bank", "money", cluster(&["money"])));
    }

    #[test]
    fn test_unknown_sentinel() {
        let unknown = Sense::unknown();
        assert!(unknown.is_unknown());
        assert_eq!(unknown.word, UNKNOWN);
        assert!(!Sense::new("bank", UNKNOWN, cluster(&["x"])).is_unknown());
    }
}
