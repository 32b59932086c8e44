//! Identity-key normalization for duplicate detection.
//!
//! Two records represent the same logical item when either their name keys
//! or their URL keys collide. Normalization is pure and total: it never
//! fails, and malformed URLs degrade to a best-effort lowercase/trim of the
//! raw string instead of erroring.

/// Characters kept in name keys beyond `[0-9a-z ]`. Needed so "C++", "C#",
/// and ".NET" don't all collapse onto "c" / "net".
const NAME_KEY_EXTRA: &[char] = &['+', '#', '.'];

/// Hosts that serve generic reference material rather than a product
/// homepage. URLs on these hosts lose to dedicated homepages during merge.
const GENERIC_REFERENCE_HOSTS: &[&str] = &[
    "wikipedia.org",
    "wikidata.org",
    "wiktionary.org",
    "wikiversity.org",
    "wikia.com",
    "fandom.com",
];

/// Derive the normalized name key for a display name.
///
/// Lowercases, strips everything outside `[0-9a-z ]` and [`NAME_KEY_EXTRA`],
/// collapses internal whitespace, and trims. Idempotent: applying it to its
/// own output is a no-op.
///
/// Known limitation: punctuation variants that drop characters still
/// diverge ("Node.js" vs "NodeJS"); the character-class policy is a
/// deliberate choice, not an accident.
pub fn name_key(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() || NAME_KEY_EXTRA.contains(&ch) {
            out.push(ch);
        } else if ch.is_whitespace() && !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Derive the normalized URL key for a homepage URL.
///
/// Strips the scheme, drops fragment and query, lowercases the host,
/// removes a leading `www.`, and trims trailing slashes from the path.
/// `http://www.Example.com/a/` and `https://example.com/a?x=1` share a key.
///
/// Input without a recognizable host degrades to lowercase/trim of the raw
/// string; empty input yields an empty key (which never matches anything).
pub fn url_key(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let no_fragment = trimmed.split('#').next().unwrap_or(trimmed);
    let no_query = no_fragment.split('?').next().unwrap_or(no_fragment);
    let rest = match no_query.find("://") {
        Some(i) => &no_query[i + 3..],
        None => no_query,
    };

    let (host, path) = match rest.find('/') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, ""),
    };

    if host.is_empty() || !host.contains('.') {
        // Not URL-shaped; best-effort fallback
        return trimmed.to_lowercase();
    }

    let host = host.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let path = path.trim_end_matches('/');
    format!("{host}{path}")
}

/// Whether a URL points at a generic reference source (encyclopedia
/// mirrors and similar) rather than a dedicated product homepage.
pub fn is_generic_reference(url: &str) -> bool {
    let key = url_key(url);
    let host = key.split('/').next().unwrap_or("");
    GENERIC_REFERENCE_HOSTS
        .iter()
        .any(|h| host_matches(host, h))
}

/// Exact host match or subdomain match (`en.wikipedia.org` matches
/// `wikipedia.org`, but `notwikipedia.org` does not).
fn host_matches(host: &str, reference: &str) -> bool {
    host == reference
        || (host.len() > reference.len()
            && host.ends_with(reference)
            && host.as_bytes()[host.len() - reference.len() - 1] == b'.')
}
