//! Fixed extraction rules

use regex::Regex;
use std::sync::LazyLock;

/// Phrase captures at or below this many characters are discarded
pub const MIN_PHRASE_CHARS: usize = 10;

/// Kind of clinical statement a rule looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Value, unit and reference range or bound
    Measurement,
    /// Text after "shows", "reveals", "findings", ...
    Observation,
    /// Text after "diagnosis" or "impression"
    Diagnosis,
    /// Text after "abnormal", "elevated", ...
    Status,
}

/// A compiled rule
pub struct Rule {
    pub kind: RuleKind,
    pub pattern: &'static LazyLock<Regex>,
}

impl Rule {
    /// Whether the rule keeps its whole match or a captured phrase
    pub fn captures_phrase(&self) -> bool {
        self.kind != RuleKind::Measurement
    }
}

static MEASUREMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?P<prefix>(?:[a-z][a-z0-9\-]*\s+){0,3}?)[a-z][a-z0-9\-]*\s*[:=]?\s*",
        r"\d+(?:\.\d+)?\s*(?:%|[a-zµμ]+(?:/[a-z0-9µμ]+)?)\s*",
        r"[\(\[]?\s*(?:(?:reference|ref|normal)(?:\s+range)?\s*[:=]?\s*)?",
        r"(?:[<>]\s*\d+(?:\.\d+)?|\d+(?:\.\d+)?\s*-\s*\d+(?:\.\d+)?)\s*[\)\]]?",
    ))
    .expect("measurement pattern is valid")
});

/// Words that join two clauses inside a measurement's name prefix
static CONNECTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:and|or|with|but|plus|while|whereas)\s+")
        .expect("connector pattern is valid")
});

/// Bytes of a measurement's name prefix that belong to an earlier clause
///
/// `blood count and ` gives the length up to and including `and `, so the
/// surfaced measurement starts at the analyte name.
pub fn leading_clause_len(prefix: &str) -> usize {
    CONNECTOR.find_iter(prefix).last().map_or(0, |m| m.end())
}

static OBSERVATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:findings?|results?|shows?|reveals?|indicates?|demonstrates?)[:\s]+([^.!?]+)")
        .expect("observation pattern is valid")
});

static DIAGNOSIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:diagnosis|impression)[:\s]+([^.!?]+)")
        .expect("diagnosis pattern is valid")
});

static STATUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:abnormal|normal|positive|negative|elevated|reduced)[:\s]+([^.!?]+)")
        .expect("status pattern is valid")
});

/// Rules in priority order
pub static RULES: [Rule; 4] = [
    Rule {
        kind: RuleKind::Measurement,
        pattern: &MEASUREMENT,
    },
    Rule {
        kind: RuleKind::Observation,
        pattern: &OBSERVATION,
    },
    Rule {
        kind: RuleKind::Diagnosis,
        pattern: &DIAGNOSIS,
    },
    Rule {
        kind: RuleKind::Status,
        pattern: &STATUS,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_clause_len() {
        assert_eq!(leading_clause_len(""), 0);
        assert_eq!(leading_clause_len("LDL "), 0);
        assert_eq!(leading_clause_len("blood count and "), 16);
        assert_eq!(leading_clause_len("dL with "), 8);
        assert_eq!(leading_clause_len("band "), 0);
    }
}
