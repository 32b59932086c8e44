//! Curation pass abstraction and per-pass accounting.

use devdex_catalog::types::ItemRecord;

/// Counters for what a single pass did to the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    pub inserted: usize,
    pub merged: usize,
    pub corrected: usize,
    pub dropped: usize,
}

/// A pass's transformed list plus its counters.
#[derive(Debug)]
pub struct PassOutcome {
    pub records: Vec<ItemRecord>,
    pub stats: PassStats,
}

/// One transformation step over the whole record list.
///
/// Passes are pure over the list they are given: no I/O, no hidden shared
/// state. That keeps them unit-testable and freely reorderable.
pub trait CurationPass {
    /// Short identifier used in reports and backup labels.
    fn name(&self) -> &str;

    /// Transform the list, consuming it.
    fn run(&self, records: Vec<ItemRecord>) -> PassOutcome;
}

/// Before/after accounting for one pipeline step.
#[derive(Debug, Clone)]
pub struct PassReport {
    pub pass: String,
    pub before: usize,
    pub after: usize,
    pub stats: PassStats,
}

impl PassReport {
    /// Whether the pass had any visible effect.
    pub fn changed_anything(&self) -> bool {
        self.before != self.after
            || self.stats.inserted > 0
            || self.stats.merged > 0
            || self.stats.corrected > 0
            || self.stats.dropped > 0
    }
}
