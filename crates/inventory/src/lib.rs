//! # Sense Inventory
//!
//! Induced word senses: how they are produced in batch and how they are stored.
//!
//! ## Architecture
//!
//! ```text
//! vocabulary
//!     │
//!     ├──> SenseInducer (rayon, per word)
//!     │      ├─ ContrastFinder → EgoNetworkBuilder → ChineseWhispers
//!     │      └─ compile → SenseRecord[] (keyword = heaviest member)
//!     │
//!     ├──> InventoryWriter
//!     │      └─ word \t cid \t keyword \t cluster, flushed per word
//!     │
//!     └──> SenseInventory
//!            └─ word → senses, with case-folded lookup
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use sense_graph::ChineseWhispers;
//! use sense_inventory::{InventoryWriter, SenseInducer};
//! use sense_vector_store::{FlatIndex, WordVectors};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let vectors = WordVectors::load("cc.en.300.vec.gz", Some(100_000))?;
//!     let index = FlatIndex::new(&vectors);
//!     let inducer = SenseInducer::new(&vectors, &index, 50, ChineseWhispers::default());
//!
//!     let mut writer = InventoryWriter::create("en.top50.inventory.tsv")?;
//!     let report = inducer.induce_all(&["bank", "ruby"], true, |_, records| {
//!         writer.write_records(records)
//!     })?;
//!     println!("{} senses", report.senses);
//!     Ok(())
//! }
//! ```

mod casing;
mod compiler;
mod config;
mod error;
mod induction;
mod sense;
mod store;

pub use casing::CaseFolding;
pub use compiler::compile;
pub use config::InductionConfig;
pub use error::{InventoryError, Result};
pub use induction::{is_punctuation, InductionReport, SenseInducer};
pub use sense::{Sense, SenseRecord, UNKNOWN};
pub use store::{InventoryWriter, SenseInventory, TSV_HEADER};
