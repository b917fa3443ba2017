//! Signal Extraction
//!
//! URLs, domains and keyword hits pulled from the raw message.
//! Never fails: an unparseable URL yields an empty domain.

use std::net::Ipv6Addr;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use super::types::SignalSet;
use super::vocabulary::Vocabulary;

/// Scheme followed by a run of non-whitespace
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://[^\s]+").expect("URL pattern is a valid regex")
});

/// IPvFuture literal inside brackets
static FUTURE_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^v[a-fA-F0-9]+\..+$").expect("future literal pattern is a valid regex")
});

/// All HTTP(S) URLs in order of appearance, duplicates kept
pub fn extract_urls(text: &str) -> Vec<String> {
    URL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Lower-cased network location with any leading "www." removed.
/// Returns an empty string when the URL cannot be parsed.
pub fn domain_of(url: &str) -> String {
    match network_location(url) {
        Some(netloc) => {
            let lowered = netloc.to_lowercase();
            match lowered.strip_prefix("www.") {
                Some(rest) => rest.to_string(),
                None => lowered,
            }
        }
        None => String::new(),
    }
}

/// Text between "//" and the first path, query or fragment delimiter
fn network_location(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let netloc = &rest[..end];

    if netloc.contains('[') != netloc.contains(']') {
        return None;
    }
    if netloc.contains('[') && !bracketed_host_is_valid(netloc) {
        return None;
    }
    if !normalizes_cleanly(netloc) {
        return None;
    }
    Some(netloc)
}

/// The first `[...]` must hold an IPv6 address (optionally scoped)
/// or a `v<hex>.<text>` literal
fn bracketed_host_is_valid(netloc: &str) -> bool {
    let after_open = netloc.split_once('[').map_or("", |(_, rest)| rest);
    let host = after_open.split_once(']').map_or(after_open, |(host, _)| host);

    if host.starts_with('v') {
        return FUTURE_LITERAL.is_match(host);
    }
    let address = match host.split_once('%') {
        Some((address, zone)) if !zone.is_empty() && !zone.contains('%') => address,
        Some(_) => return false,
        None => host,
    };
    address.parse::<Ipv6Addr>().is_ok()
}

/// Non-ASCII hosts must not gain a delimiter under NFKC ("／" → "/", "＠" → "@")
fn normalizes_cleanly(netloc: &str) -> bool {
    if netloc.is_ascii() {
        return true;
    }
    let stripped: String = netloc
        .chars()
        .filter(|c| !matches!(c, '@' | ':' | '#' | '?'))
        .collect();
    let normalized: String = stripped.nfkc().collect();
    normalized == stripped || !normalized.contains(['/', '?', '#', '@', ':'])
}

/// Vocabulary entries contained in `lowered`, in vocabulary order
pub fn match_keywords(lowered: &str, vocabulary: &[String]) -> Vec<String> {
    vocabulary
        .iter()
        .filter(|phrase| lowered.contains(phrase.as_str()))
        .cloned()
        .collect()
}

/// Run every extractor over the text
pub fn extract_signals(text: &str, vocabulary: &Vocabulary) -> SignalSet {
    let urls = extract_urls(text);
    let domains: Vec<String> = urls.iter().map(|url| domain_of(url)).collect();

    let blacklisted_domains = domains
        .iter()
        .filter(|d| vocabulary.is_blacklisted(d))
        .cloned()
        .collect();
    let trusted_domains = domains
        .iter()
        .filter(|d| vocabulary.is_trusted(d))
        .cloned()
        .collect();

    let lowered = text.to_lowercase();
    let trigger_keywords = match_keywords(&lowered, &vocabulary.trigger_keywords);
    let safe_keywords = match_keywords(&lowered, &vocabulary.safe_keywords);

    SignalSet {
        urls,
        domains,
        blacklisted_domains,
        trusted_domains,
        trigger_keywords,
        safe_keywords,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_urls_keeps_order_and_duplicates() {
        let text = "see https://a.com/x then http://b.org and https://a.com/x again";
        assert_eq!(
            extract_urls(text),
            vec!["https://a.com/x", "http://b.org", "https://a.com/x"]
        );
    }

    #[test]
    fn test_extract_urls_runs_to_whitespace() {
        let urls = extract_urls("go to http://phishy-site.xyz, now");
        assert_eq!(urls, vec!["http://phishy-site.xyz,"]);
    }

    #[test]
    fn test_extract_urls_scheme_is_case_sensitive() {
        assert!(extract_urls("HTTP://LOUD.COM").is_empty());
        assert!(extract_urls("ftp://files.example.com").is_empty());
    }

    #[test]
    fn test_domain_of_strips_www_and_lowercases() {
        assert_eq!(domain_of("https://WWW.PayPal.com/login"), "paypal.com");
        assert_eq!(domain_of("http://phishy-site.xyz"), "phishy-site.xyz");
        assert_eq!(domain_of("http://mail.google.com?q=1"), "mail.google.com");
        assert_eq!(domain_of("http://google.com#top"), "google.com");
    }

    #[test]
    fn test_domain_of_keeps_port_and_userinfo() {
        assert_eq!(domain_of("http://example.com:8080/x"), "example.com:8080");
        assert_eq!(domain_of("http://user@example.com/"), "user@example.com");
    }

    #[test]
    fn test_domain_of_parse_failure_is_empty() {
        assert_eq!(domain_of("http://[::1/path"), "");
        assert_eq!(domain_of("http://example]com"), "");
        assert_eq!(domain_of("http://[not-an-address]/"), "");
        assert_eq!(domain_of("http://[::1]:443/"), "[::1]:443");
    }

    #[test]
    fn test_domain_of_bracketed_hosts() {
        assert_eq!(domain_of("http://[fe80::1%eth0]/"), "[fe80::1%eth0]");
        assert_eq!(domain_of("http://[v1.x]/"), "[v1.x]");
        assert_eq!(domain_of("http://user@[::1]:8080/"), "user@[::1]:8080");

        assert_eq!(domain_of("http://[V1.x]/"), "");
        assert_eq!(domain_of("http://[vz]/"), "");
        assert_eq!(domain_of("http://[fe80::1%]/"), "");
        assert_eq!(domain_of("http://[1.2.3.4]/"), "");
    }

    #[test]
    fn test_domain_of_rejects_compatibility_delimiters() {
        assert_eq!(domain_of("http://evil.com／login/"), "");
        assert_eq!(domain_of("http://user＠evil.com/"), "");
        // non-ASCII that normalizes without delimiters is kept
        assert_eq!(domain_of("http://bücher.example/"), "bücher.example");
    }

    #[test]
    fn test_match_keywords_is_substring_in_vocabulary_order() {
        let vocab = vec!["verify".to_string(), "urgent".to_string(), "login".to_string()];
        let found = match_keywords("urgent: please re-verify", &vocab);
        assert_eq!(found, vec!["verify", "urgent"]);

        // Substring, not token match
        assert!(match_keywords("please log in", &vocab).is_empty());
        assert_eq!(match_keywords("relogin now", &vocab), vec!["login"]);
    }

    #[test]
    fn test_extract_signals_classifies_domains() {
        let vocab = Vocabulary::default();
        let signals = extract_signals(
            "Check http://www.google.com and http://phishy-site.xyz/verify",
            &vocab,
        );
        assert_eq!(signals.domains, vec!["google.com", "phishy-site.xyz"]);
        assert_eq!(signals.trusted_domains, vec!["google.com"]);
        assert_eq!(signals.blacklisted_domains, vec!["phishy-site.xyz"]);
        assert_eq!(signals.trigger_keywords, vec!["verify", "phishy-site.xyz"]);
        assert_eq!(signals.safe_keywords, vec!["google.com"]);
    }

    #[test]
    fn test_extract_signals_without_urls() {
        let signals = extract_signals("Thank you for your purchase from Amazon.com", &Vocabulary::default());
        assert!(signals.urls.is_empty());
        assert!(signals.domains.is_empty());
        assert_eq!(signals.safe_keywords, vec!["amazon.com", "thank you for your purchase"]);
    }
}
