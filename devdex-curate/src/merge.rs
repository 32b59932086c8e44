//! Field-level merge of two records that share an identity key.
//!
//! The merge is deterministic and never fails: every field has an explicit
//! winner rule, and anything not covered keeps the existing record's value.
//! `category` and the flag fields are deliberately untouched here; they are
//! resolved by dedicated passes after deduplication, since correct values
//! need domain judgment rather than field-presence logic.

use devdex_catalog::normalize::is_generic_reference;
use devdex_catalog::types::ItemRecord;

/// Combine `candidate` into `existing`, producing the single survivor.
///
/// Rules, applied field by field:
/// - `url`: candidate wins when the existing URL is empty, or when it is a
///   generic reference placeholder (encyclopedia mirror) and the candidate
///   URL is a real one.
/// - `description`, `sector`, `country`, `owner`, `year`: first non-empty
///   value wins; never overwritten once set.
/// - `name`: the longer spelling wins, as a proxy for the more canonical
///   one ("Microsoft Excel" over "Excel"); ties keep the existing name.
///
/// Idempotent: merging an already-absorbed candidate changes nothing.
pub fn merge(existing: &ItemRecord, candidate: &ItemRecord) -> ItemRecord {
    let mut out = existing.clone();

    if out.url.is_empty()
        || (is_generic_reference(&out.url)
            && !candidate.url.is_empty()
            && !is_generic_reference(&candidate.url))
    {
        out.url = candidate.url.clone();
    }

    fill_if_empty(&mut out.description, &candidate.description);
    fill_if_empty(&mut out.sector, &candidate.sector);
    fill_if_empty(&mut out.country, &candidate.country);
    fill_if_empty(&mut out.owner, &candidate.owner);
    if out.year.is_none() {
        out.year = candidate.year;
    }

    if candidate.name.len() > out.name.len() {
        out.name = candidate.name.clone();
    }

    out
}

fn fill_if_empty(target: &mut String, value: &str) {
    if target.trim().is_empty() && !value.trim().is_empty() {
        *target = value.to_string();
    }
}
