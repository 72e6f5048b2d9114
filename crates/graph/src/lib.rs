//! # Sense Graph
//!
//! Word sense induction through ego-network clustering.
//!
//! ## Features
//!
//! - **Contrast discovery** - neighbor pairs that pull a word towards different senses
//! - **Ego networks** - similarity graphs with gaps at the contrast boundaries
//! - **Chinese Whispers** - parameter-free clustering into an unknown number of senses
//!
//! ## Architecture
//!
//! ```text
//! ego word
//!     │
//!     ├──> ContrastFinder
//!     │      ├─ top-k neighbors N of the ego
//!     │      └─ (a, nearest(ego - a)) pairs inside N
//!     │
//!     ├──> EgoNetworkBuilder (petgraph)
//!     │      ├─ Nodes: pair members, sized by pair count
//!     │      └─ Edges: neighbor similarity, never between pair members
//!     │
//!     └──> ChineseWhispers
//!            └─ label propagation → sense clusters
//! ```

mod builder;
mod contrast;
mod error;
mod types;
mod whispers;

pub use builder::EgoNetworkBuilder;
pub use contrast::ContrastFinder;
pub use error::{GraphError, Result};
pub use types::{DiscriminativePair, EgoNetwork, PairSet, SenseEdge, SenseNode};
pub use whispers::{ChineseWhispers, Cluster, Weighting, DEFAULT_ITERATIONS};
