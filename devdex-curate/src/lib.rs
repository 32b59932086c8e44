//! Curation logic for the tool directory: duplicate merging, filtering,
//! and category correction.
//!
//! This crate owns every transformation over the record list. Each step is
//! a [`CurationPass`]: a pure `Vec<ItemRecord> -> Vec<ItemRecord>` function
//! with counters, chained by [`pipeline::run`]. Nothing here touches the
//! filesystem or the network; `devdex-catalog` handles persistence and
//! `devdex-probe` handles reachability.

pub mod correct;
pub mod dedupe;
pub mod filter;
pub mod flags;
pub mod insert;
pub mod merge;
pub mod pass;
pub mod pipeline;

pub use correct::{ClassifyCategories, CorrectCategories};
pub use dedupe::{Dedupe, KeyPolicy};
pub use filter::{DEFAULT_JUNK_NAMES, JunkFilter, ValidityFilter};
pub use flags::FlagPopular;
pub use insert::InsertCandidates;
pub use merge::merge;
pub use pass::{CurationPass, PassOutcome, PassReport, PassStats};
