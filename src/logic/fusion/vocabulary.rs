//! Vocabulary
//!
//! Domain lists and keyword lists used by the fuser.
//! Immutable once built; can be loaded from a JSON file or use the built-in lists.

use std::path::Path;

use serde::{Deserialize, Serialize};

// ============================================================================
// BUILT-IN LISTS
// ============================================================================

pub const DEFAULT_TRUSTED_DOMAINS: &[&str] = &[
    "amazon.com",
    "dropbox.com",
    "bankofamerica.com",
    "chase.com",
    "google.com",
    "paypal.com",
    "microsoft.com",
    "apple.com",
    "linkedin.com",
];

pub const DEFAULT_BLACKLISTED_DOMAINS: &[&str] = &[
    "fake-paypal-security-check.com",
    "phishy-site.xyz",
    "malicious-link.net",
];

pub const DEFAULT_TRIGGER_KEYWORDS: &[&str] = &[
    "urgent",
    "verify",
    "login",
    "password",
    "account suspended",
    "click here",
    "send us",
    "avoid suspension",
    "your bank account",
    "compromised",
    "update information",
    "within 24 hours",
    "reactivate",
    "limited access",
    "security alert",
    "unauthorized",
    "confirm your identity",
    "reset your password",
    "account locked",
    "billing information",
    "unusual activity",
    "action required",
    "suspended account",
    "verify your account",
    "confirm your account",
    "security breach",
    "account verification",
    "password expired",
    "immediate action",
    "account update",
    "phishy-site.xyz",
];

pub const DEFAULT_SAFE_KEYWORDS: &[&str] = &[
    "amazon.com",
    "dropbox.com",
    "bankofamerica.com",
    "chase.com",
    "no action required",
    "official statement",
    "dashboard",
    "account overview",
    "paypal.com",
    "microsoft.com",
    "google.com",
    "apple.com",
    "linkedin.com",
    "no action needed",
    "transaction receipt",
    "your package has shipped",
    "thank you for your purchase",
];

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid vocabulary file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("vocabulary list '{0}' contains an empty entry")]
    EmptyEntry(&'static str),
}

// ============================================================================
// VOCABULARY
// ============================================================================

/// Lists the fuser matches against. Entries are stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub trusted_domains: Vec<String>,
    pub blacklisted_domains: Vec<String>,
    pub trigger_keywords: Vec<String>,
    pub safe_keywords: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            trusted_domains: to_owned_list(DEFAULT_TRUSTED_DOMAINS),
            blacklisted_domains: to_owned_list(DEFAULT_BLACKLISTED_DOMAINS),
            trigger_keywords: to_owned_list(DEFAULT_TRIGGER_KEYWORDS),
            safe_keywords: to_owned_list(DEFAULT_SAFE_KEYWORDS),
        }
    }
}

/// An entry that sits in a domain list and a keyword list at the same time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyOverlap {
    pub entry: String,
    pub domain_list: &'static str,
    pub keyword_list: &'static str,
}

impl Vocabulary {
    /// Build from arbitrary lists, normalizing entries to lower case
    pub fn new(
        trusted_domains: Vec<String>,
        blacklisted_domains: Vec<String>,
        trigger_keywords: Vec<String>,
        safe_keywords: Vec<String>,
    ) -> Result<Self, VocabularyError> {
        Self {
            trusted_domains,
            blacklisted_domains,
            trigger_keywords,
            safe_keywords,
        }
        .normalized()
    }

    /// Load from a JSON file with the four lists as fields
    pub fn from_file(path: &Path) -> Result<Self, VocabularyError> {
        let content = std::fs::read_to_string(path)?;
        let raw: Vocabulary = serde_json::from_str(&content)?;
        raw.normalized()
    }

    fn normalized(self) -> Result<Self, VocabularyError> {
        Ok(Self {
            trusted_domains: normalize_list(self.trusted_domains, "trusted_domains")?,
            blacklisted_domains: normalize_list(self.blacklisted_domains, "blacklisted_domains")?,
            trigger_keywords: normalize_list(self.trigger_keywords, "trigger_keywords")?,
            safe_keywords: normalize_list(self.safe_keywords, "safe_keywords")?,
        })
    }

    pub fn is_trusted(&self, domain: &str) -> bool {
        self.trusted_domains.iter().any(|d| d == domain)
    }

    pub fn is_blacklisted(&self, domain: &str) -> bool {
        self.blacklisted_domains.iter().any(|d| d == domain)
    }

    /// Domain entries that also act as substring keywords.
    ///
    /// "amazon.com" in both the trusted list and the safe keywords means any
    /// message mentioning it gets the safe-keyword downgrade, URL or not.
    /// Matching keeps that behavior; this only surfaces it.
    pub fn overlaps(&self) -> Vec<VocabularyOverlap> {
        let pairs: [(&'static str, &Vec<String>, &'static str, &Vec<String>); 4] = [
            ("trusted_domains", &self.trusted_domains, "safe_keywords", &self.safe_keywords),
            ("trusted_domains", &self.trusted_domains, "trigger_keywords", &self.trigger_keywords),
            ("blacklisted_domains", &self.blacklisted_domains, "trigger_keywords", &self.trigger_keywords),
            ("blacklisted_domains", &self.blacklisted_domains, "safe_keywords", &self.safe_keywords),
        ];

        let mut overlaps = Vec::new();
        for (domain_list, domains, keyword_list, keywords) in pairs {
            for domain in domains {
                if keywords.contains(domain) {
                    overlaps.push(VocabularyOverlap {
                        entry: domain.clone(),
                        domain_list,
                        keyword_list,
                    });
                }
            }
        }
        overlaps
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Lower-case, drop duplicates (first occurrence wins), reject blanks
fn normalize_list(items: Vec<String>, name: &'static str) -> Result<Vec<String>, VocabularyError> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let entry = item.trim().to_lowercase();
        if entry.is_empty() {
            return Err(VocabularyError::EmptyEntry(name));
        }
        if !out.contains(&entry) {
            out.push(entry);
        }
    }
    Ok(out)
}

// ============================================================================
// TESTS
// ============================================================================
