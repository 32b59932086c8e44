//! The probe itself: bounded fan-out over a shared HTTP client.

use std::time::Duration;

use devdex_catalog::types::ItemRecord;
use futures::StreamExt;
use reqwest::Url;

use crate::report::{ProbeReport, ProbeResult, ProbeStatus};

/// Defaults match what the data set tolerates in practice: twenty in-flight
/// requests and a ten second cap keep a few-hundred-record run under a
/// minute without tripping rate limits.
const DEFAULT_CONCURRENCY: usize = 20;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Hosts that answer automated clients with challenges or 999s. Probing
/// them reports failures for pages that load fine in a browser.
const DEFAULT_SKIP_HOSTS: &[&str] = &["linkedin.com", "facebook.com", "twitter.com", "x.com"];

/// A desktop browser identity; several sites refuse default library agents.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Tuning knobs for a probe run.
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// Maximum in-flight requests.
    pub concurrency: usize,
    /// Per-request timeout, connection included.
    pub timeout: Duration,
    /// Hosts (and their subdomains) to skip without contacting.
    pub skip_hosts: Vec<String>,
    pub user_agent: String,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            skip_hosts: DEFAULT_SKIP_HOSTS.iter().map(|s| s.to_string()).collect(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Probe every record once. Results arrive in completion order; each URL
/// gets a single GET with no retries and the body is never read.
pub async fn probe_all(
    records: &[ItemRecord],
    options: &ProbeOptions,
) -> Result<ProbeReport, ProbeError> {
    let client = reqwest::Client::builder()
        .timeout(options.timeout)
        .user_agent(&options.user_agent)
        .build()?;

    let results = futures::stream::iter(
        records
            .iter()
            .map(|record| probe_one(&client, options, record)),
    )
    .buffer_unordered(options.concurrency.max(1))
    .collect::<Vec<_>>()
    .await;

    Ok(ProbeReport::new(results))
}

async fn probe_one(
    client: &reqwest::Client,
    options: &ProbeOptions,
    record: &ItemRecord,
) -> ProbeResult {
    let status = classify(client, options, &record.url).await;
    log::debug!("probe: {} [{}] -> {:?}", record.name, record.url, status);
    ProbeResult::new(record, status)
}

async fn classify(client: &reqwest::Client, options: &ProbeOptions, url: &str) -> ProbeStatus {
    if url.trim().is_empty() {
        return ProbeStatus::MissingUrl;
    }

    let origin = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            return ProbeStatus::ConnectFailed {
                reason: format!("invalid URL: {e}"),
            };
        }
    };
    let Some(origin_host) = origin.host_str().map(str::to_string) else {
        return ProbeStatus::ConnectFailed {
            reason: "URL has no host".to_string(),
        };
    };

    if host_is_skipped(&origin_host, &options.skip_hosts) {
        return ProbeStatus::Skipped;
    }

    match client.get(origin).send().await {
        Ok(response) => {
            let code = response.status().as_u16();
            if code >= 400 {
                return ProbeStatus::HttpError { code };
            }
            // Scheme changes and www additions are routine; only a host
            // change counts as a real move
            if let Some(final_host) = response.url().host_str() {
                if off_domain(&origin_host, final_host) {
                    return ProbeStatus::RedirectedOffDomain {
                        final_host: final_host.to_string(),
                    };
                }
            }
            ProbeStatus::Ok
        }
        Err(e) if e.is_timeout() => ProbeStatus::Timeout,
        Err(e) => ProbeStatus::ConnectFailed {
            reason: e.to_string(),
        },
    }
}

fn host_is_skipped(host: &str, skip_hosts: &[String]) -> bool {
    let host = host.to_ascii_lowercase();
    skip_hosts
        .iter()
        .any(|skip| host == *skip || host.ends_with(&format!(".{skip}")))
}

fn off_domain(origin_host: &str, final_host: &str) -> bool {
    !bare_host(origin_host).eq_ignore_ascii_case(bare_host(final_host))
}

fn bare_host(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skip_list() -> Vec<String> {
        DEFAULT_SKIP_HOSTS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn skip_matches_host_and_subdomains() {
        let skip = skip_list();
        assert!(host_is_skipped("x.com", &skip));
        assert!(host_is_skipped("www.linkedin.com", &skip));
        assert!(host_is_skipped("about.twitter.com", &skip));
    }

    #[test]
    fn skip_needs_a_dot_boundary() {
        let skip = skip_list();
        // "felix.com" merely ends with "x.com"
        assert!(!host_is_skipped("felix.com", &skip));
        assert!(!host_is_skipped("notfacebook.com", &skip));
        assert!(!host_is_skipped("example.org", &skip));
    }

    #[test]
    fn www_and_case_do_not_count_as_a_move() {
        assert!(!off_domain("example.com", "www.example.com"));
        assert!(!off_domain("www.example.com", "example.com"));
        assert!(!off_domain("Example.COM", "example.com"));
        assert!(off_domain("example.com", "parked.example.net"));
        assert!(off_domain("old.example.com", "example.com"));
    }

    #[test]
    fn default_options() {
        let options = ProbeOptions::default();
        assert_eq!(options.concurrency, 20);
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.skip_hosts.len(), 4);
    }
}
