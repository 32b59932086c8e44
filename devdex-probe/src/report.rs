//! Probe outcomes and the aggregated report.

use devdex_catalog::types::ItemRecord;
use serde::Serialize;

/// What happened when a single URL was probed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeStatus {
    /// Responded with a success status on its own domain.
    Ok,
    /// Responded, but the redirect chain ended on a different host.
    RedirectedOffDomain { final_host: String },
    /// Responded with a 4xx/5xx status.
    HttpError { code: u16 },
    /// No response within the configured timeout.
    Timeout,
    /// Could not connect at all (DNS, TLS, refused, malformed URL).
    ConnectFailed { reason: String },
    /// Host is on the skip list; never contacted.
    Skipped,
    /// The record has no URL to probe.
    MissingUrl,
}

impl ProbeStatus {
    /// True for outcomes an operator should look at.
    pub fn is_failure(&self) -> bool {
        !matches!(self, ProbeStatus::Ok | ProbeStatus::Skipped)
    }
}

/// One record's probe outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(flatten)]
    pub status: ProbeStatus,
}

impl ProbeResult {
    pub fn new(record: &ItemRecord, status: ProbeStatus) -> Self {
        Self {
            name: record.name.clone(),
            url: record.url.clone(),
            category: record.category.clone(),
            status,
        }
    }
}

/// Aggregated probe run: bucket counts plus the per-record results.
#[derive(Debug, Serialize)]
pub struct ProbeReport {
    pub checked_at: String,
    pub total: usize,
    pub ok: usize,
    pub redirected: usize,
    pub http_errors: usize,
    pub timeouts: usize,
    pub connect_failures: usize,
    pub skipped: usize,
    pub missing_url: usize,
    pub results: Vec<ProbeResult>,
}

impl ProbeReport {
    pub fn new(results: Vec<ProbeResult>) -> Self {
        let mut report = Self {
            checked_at: chrono::Utc::now().to_rfc3339(),
            total: results.len(),
            ok: 0,
            redirected: 0,
            http_errors: 0,
            timeouts: 0,
            connect_failures: 0,
            skipped: 0,
            missing_url: 0,
            results,
        };
        for result in &report.results {
            match result.status {
                ProbeStatus::Ok => report.ok += 1,
                ProbeStatus::RedirectedOffDomain { .. } => report.redirected += 1,
                ProbeStatus::HttpError { .. } => report.http_errors += 1,
                ProbeStatus::Timeout => report.timeouts += 1,
                ProbeStatus::ConnectFailed { .. } => report.connect_failures += 1,
                ProbeStatus::Skipped => report.skipped += 1,
                ProbeStatus::MissingUrl => report.missing_url += 1,
            }
        }
        report
    }

    /// Results worth surfacing, in completion order.
    pub fn failures(&self) -> impl Iterator<Item = &ProbeResult> {
        self.results.iter().filter(|r| r.status.is_failure())
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}
