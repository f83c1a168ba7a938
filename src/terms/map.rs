//! The medical term table
//!
//! A [`TermMap`] is built once at startup and never changes afterwards. Keys
//! are stored lowercase and must be unique; table order is preserved because
//! it breaks ties between equal-length matches.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::table::BUILTIN_TERMS;
use crate::errors::{MedliteError, Result};

/// One jargon entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    /// Medical phrase, lowercase
    pub term: String,
    /// Patient-friendly replacement
    pub plain: String,
}

/// On-disk glossary format
#[derive(Debug, Default, Deserialize)]
struct GlossaryFile {
    #[serde(default)]
    entry: Vec<TermEntry>,
}

/// Ordered, immutable jargon lookup table
#[derive(Debug, Clone, Default)]
pub struct TermMap {
    entries: Vec<TermEntry>,
    index: HashMap<String, usize>,
}

impl TermMap {
    /// The embedded table
    pub fn builtin() -> Result<Self> {
        Self::from_pairs(BUILTIN_TERMS.iter().copied())
    }

    /// Build from `(term, plain)` pairs in table order
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut map = Self::default();
        for (term, plain) in pairs {
            map.push(term.as_ref(), plain.as_ref())?;
        }
        Ok(map)
    }

    /// Append the entries of a TOML glossary file
    ///
    /// ```toml
    /// [[entry]]
    /// term = "hyperlipidemia"
    /// plain = "high cholesterol"
    /// ```
    pub fn with_glossary_file(self, path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            MedliteError::TermMap(format!(
                "Failed to read glossary {}: {}",
                path.display(),
                e
            ))
        })?;
        self.with_glossary_str(&contents)
    }

    /// Append the entries of a TOML glossary document
    pub fn with_glossary_str(mut self, contents: &str) -> Result<Self> {
        let glossary: GlossaryFile = toml::from_str(contents)
            .map_err(|e| MedliteError::TermMap(format!("Failed to parse glossary: {}", e)))?;

        for entry in glossary.entry {
            self.push(&entry.term, &entry.plain)?;
        }
        Ok(self)
    }

    fn push(&mut self, term: &str, plain: &str) -> Result<()> {
        let key = normalize_key(term);
        if key.is_empty() {
            return Err(MedliteError::TermMap("term keys cannot be empty".to_string()));
        }
        if self.index.contains_key(&key) {
            return Err(MedliteError::TermMap(format!("duplicate term '{}'", key)));
        }

        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(TermEntry {
            term: key,
            plain: plain.trim().to_string(),
        });
        Ok(())
    }

    /// Case-insensitive lookup
    pub fn get(&self, term: &str) -> Option<&str> {
        self.index
            .get(&normalize_key(term))
            .map(|&i| self.entries[i].plain.as_str())
    }

    /// Entries in table order
    pub fn entries(&self) -> &[TermEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose replacement contains another key as a whole phrase
    ///
    /// Returns `(term, nested key)` pairs. Translating twice is only a fixed
    /// point when this list is empty.
    pub fn keys_that_are_values(&self) -> Vec<(String, String)> {
        let mut nested = Vec::new();
        for entry in &self.entries {
            let padded_plain = format!(" {} ", phrase_words(&entry.plain));
            for other in &self.entries {
                let padded_key = format!(" {} ", phrase_words(&other.term));
                if padded_plain.contains(&padded_key) {
                    nested.push((entry.term.clone(), other.term.clone()));
                }
            }
        }
        nested
    }
}

fn normalize_key(term: &str) -> String {
    term.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn phrase_words(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '\'' { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
