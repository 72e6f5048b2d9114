//! # Sense Disambiguator
//!
//! Picks the sense of a word that fits its context, using an induced sense inventory
//! and the word vectors it was induced from.
//!
//! ## Algorithm
//!
//! ```text
//! target, context tokens
//!     │
//!     ├──> senses of target (case-folded lookup, deduplicated)
//!     │      └─ none → UNKNOWN, 1.0
//!     │
//!     ├──> context vectors (distinct tokens, target forms removed)
//!     │      └─ score = max - min similarity to the sense keywords
//!     │
//!     ├──> mean of the top-M scored context vectors
//!     │      └─ none usable → uniform tie (or UNKNOWN)
//!     │
//!     └──> senses ranked by keyword · context
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use sense_disambiguator::{DisambiguatorConfig, LanguageModel};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let model =
//!         LanguageModel::load("cc.en.300.vec.gz", "en.top50.inventory.tsv", Some(100_000))?;
//!     let wsd = model.disambiguator(DisambiguatorConfig::default())?;
//!
//!     let context = ["I", "withdrew", "cash", "from", "the", "bank"];
//!     for ranked in wsd.disambiguate(&context, "bank")? {
//!         println!("{} {:.3}", ranked.sense.keyword, ranked.confidence);
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod disambiguator;
mod error;
mod registry;

pub use config::{DisambiguatorConfig, NoContextPolicy, MOST_SIGNIFICANT_NUM};
pub use disambiguator::{is_target, Disambiguator, RankedSense, TokenSense};
pub use error::{DisambiguatorError, Result};
pub use registry::{LanguageModel, ModelRegistry, ModelSource};
