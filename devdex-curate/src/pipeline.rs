//! The batch pipeline: thread the record list through an ordered sequence
//! of passes and account for each step.
//!
//! The pipeline takes an input list and returns an output list; no global
//! store persists across pass invocations. Loading and saving are the
//! caller's job (`devdex_catalog::store`), which keeps every pass a plain
//! function call with no I/O in the hot path.

use devdex_catalog::types::ItemRecord;

use crate::pass::{CurationPass, PassReport};

/// Run `passes` in order over `records`.
///
/// Each pass receives the previous pass's output. Returns the final list
/// together with one [`PassReport`] per pass so the operator can
/// sanity-check the effect before trusting the output.
pub fn run(
    records: Vec<ItemRecord>,
    passes: &[&dyn CurationPass],
) -> (Vec<ItemRecord>, Vec<PassReport>) {
    let mut current = records;
    let mut reports = Vec::with_capacity(passes.len());

    for pass in passes {
        let before = current.len();
        let outcome = pass.run(current);
        current = outcome.records;

        log::debug!(
            "pipeline: {} {} -> {} (inserted {}, merged {}, corrected {}, dropped {})",
            pass.name(),
            before,
            current.len(),
            outcome.stats.inserted,
            outcome.stats.merged,
            outcome.stats.corrected,
            outcome.stats.dropped,
        );

        reports.push(PassReport {
            pass: pass.name().to_string(),
            before,
            after: current.len(),
            stats: outcome.stats,
        });
    }

    (current, reports)
}
