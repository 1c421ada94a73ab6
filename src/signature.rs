//! Payload signature matching.
//!
//! The rule set is an explicit ordered table evaluated first-match-wins:
//! a payload containing both `--` and `nmap` is SQL injection, not a
//! scanner, because the SQL rule sits higher in the table. Priority is a
//! property of the data structure, not of control flow.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Verdict attached to every captured payload unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreatLabel {
    #[serde(rename = "SQL INJECTION")]
    SqlInjection,
    #[serde(rename = "XSS ATTACK")]
    Xss,
    #[serde(rename = "DIRECTORY TRAVERSAL")]
    DirectoryTraversal,
    #[serde(rename = "BRUTE FORCE ATTEMPT")]
    BruteForce,
    #[serde(rename = "SCANNER DETECTED")]
    Scanner,
    #[serde(rename = "RCE ATTEMPT")]
    RceAttempt,
    #[serde(rename = "SAFE TRAFFIC")]
    Safe,
}

impl ThreatLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLabel::SqlInjection => "SQL INJECTION",
            ThreatLabel::Xss => "XSS ATTACK",
            ThreatLabel::DirectoryTraversal => "DIRECTORY TRAVERSAL",
            ThreatLabel::BruteForce => "BRUTE FORCE ATTEMPT",
            ThreatLabel::Scanner => "SCANNER DETECTED",
            ThreatLabel::RceAttempt => "RCE ATTEMPT",
            ThreatLabel::Safe => "SAFE TRAFFIC",
        }
    }

    pub fn is_safe(&self) -> bool {
        matches!(self, ThreatLabel::Safe)
    }
}

/// Signature table in priority order. Earlier rows win when a payload
/// matches several.
const RULES: &[(&str, ThreatLabel)] = &[
    (r"(?i)UNION SELECT|DROP TABLE|OR 1=1|--", ThreatLabel::SqlInjection),
    (r"(?i)<script>|javascript:|onerror=", ThreatLabel::Xss),
    (r"(?i)\.\./|\.\.\\|etc/passwd", ThreatLabel::DirectoryTraversal),
    (r"(?i)USER root|USER admin|PASS 123456", ThreatLabel::BruteForce),
    (r"(?i)sqlmap|nmap|nikto|curl", ThreatLabel::Scanner),
    (r"(?i); ls|\| cat|cmd\.exe|powershell", ThreatLabel::RceAttempt),
];

/// Compiled signature set. Compile once at startup, share read-only.
pub struct SignatureEngine {
    rules: Vec<(Regex, ThreatLabel)>,
}

impl SignatureEngine {
    pub fn new() -> Result<Self, regex::Error> {
        let mut rules = Vec::with_capacity(RULES.len());
        for (pattern, label) in RULES {
            rules.push((Regex::new(pattern)?, *label));
        }
        Ok(Self { rules })
    }

    /// Classify one payload unit.
    ///
    /// Pure and total: the verdict depends on the payload text alone, never
    /// on protocol or source, and unmatched input is always safe.
    pub fn classify(&self, payload: &str) -> ThreatLabel {
        self.rules
            .iter()
            .find(|(pattern, _)| pattern.is_match(payload))
            .map(|(_, label)| *label)
            .unwrap_or(ThreatLabel::Safe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SignatureEngine {
        SignatureEngine::new().expect("signature table compiles")
    }

    #[test]
    fn test_each_rule_family() {
        let engine = engine();

        assert_eq!(engine.classify("id=1 OR 1=1"), ThreatLabel::SqlInjection);
        assert_eq!(engine.classify("<script>alert(1)</script>"), ThreatLabel::Xss);
        assert_eq!(engine.classify("../../etc/passwd"), ThreatLabel::DirectoryTraversal);
        assert_eq!(engine.classify("USER root"), ThreatLabel::BruteForce);
        assert_eq!(engine.classify("Mozilla/5.0 nikto/2.1"), ThreatLabel::Scanner);
        assert_eq!(engine.classify("a; ls -la"), ThreatLabel::RceAttempt);
    }

    #[test]
    fn test_first_match_wins() {
        let engine = engine();

        // SQL marker (priority 1) beats the scanner name (priority 5)
        assert_eq!(
            engine.classify("nmap probe: UNION SELECT version()"),
            ThreatLabel::SqlInjection
        );
        // Bare comment marker alone is enough for the SQL rule
        assert_eq!(engine.classify("nmap -- -sV"), ThreatLabel::SqlInjection);
    }

    #[test]
    fn test_case_insensitive() {
        let engine = engine();

        assert_eq!(
            engine.classify("union select * from users"),
            ThreatLabel::SqlInjection
        );
        assert_eq!(
            engine.classify("UNION SELECT * FROM USERS"),
            ThreatLabel::SqlInjection
        );
        assert_eq!(engine.classify("PoWeRsHeLl -enc"), ThreatLabel::RceAttempt);
    }

    #[test]
    fn test_unmatched_input_is_safe() {
        let engine = engine();

        assert_eq!(engine.classify(""), ThreatLabel::Safe);
        assert_eq!(engine.classify("GET /index.html"), ThreatLabel::Safe);
        assert_eq!(engine.classify("\u{fffd}\u{fffd}\u{0}garbage"), ThreatLabel::Safe);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let engine = engine();

        let payload = "/login?q=UNION SELECT * FROM users--";
        let first = engine.classify(payload);
        for _ in 0..10 {
            assert_eq!(engine.classify(payload), first);
        }
    }
}
