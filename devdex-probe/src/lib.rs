//! Bulk URL reachability checking.
//!
//! Probes every record's URL with a bounded number of in-flight requests
//! and buckets the outcomes: reachable, redirected off-domain, HTTP error,
//! timeout, connection failure. Hosts known to block automated clients are
//! skipped up front instead of producing noise.

pub mod check;
pub mod report;

pub use check::{ProbeError, ProbeOptions, probe_all};
pub use report::{ProbeReport, ProbeResult, ProbeStatus};
