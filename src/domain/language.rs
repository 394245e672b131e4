// ============================================================
// Layer 3 — Language Configuration
// ============================================================
// Aspect terms are (almost always) nouns, so the tag decoder
// only lets a token through the attention threshold when its
// POS tag belongs to the language's noun category set.
//
// Different tagsets name their noun categories differently:
//   - English (Penn Treebank): NN, NNP, NNS, NNPS
//   - Finnish (Universal Dependencies): NOUN, PROPN
//
// The table is an explicit, enumerated configuration injected
// at startup. Looking up a language that has no entry is a
// configuration error and fails immediately — proceeding with
// an empty set would silently tag every token O and corrupt
// the aggregate score.

use anyhow::{bail, Result};
use std::collections::{BTreeMap, HashSet};

/// Per-language noun-category filter sets, keyed by language name.
///
/// BTreeMap keeps `languages()` output in a stable order for
/// display and tests.
pub struct NounTagTable {
    sets: BTreeMap<String, HashSet<String>>,
}

impl NounTagTable {
    /// Start from an empty table. Use `insert` to register
    /// languages, or `default()` for the built-in ones.
    pub fn new() -> Self {
        Self { sets: BTreeMap::new() }
    }

    /// Register (or replace) the noun-tag set for a language.
    pub fn insert(&mut self, language: &str, tags: &[&str]) {
        self.sets.insert(
            language.to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
        );
    }

    /// Required-key lookup — fails loudly on an unknown language
    /// instead of handing the decoder an absent set.
    pub fn noun_tags(&self, language: &str) -> Result<&HashSet<String>> {
        match self.sets.get(language) {
            Some(set) => Ok(set),
            None => bail!(
                "no noun-tag set configured for language '{}' (configured: {})",
                language,
                self.sets.keys().cloned().collect::<Vec<_>>().join(", "),
            ),
        }
    }

    /// All configured languages with their tag sets, in name order.
    pub fn languages(&self) -> impl Iterator<Item = (&str, &HashSet<String>)> {
        self.sets.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Default for NounTagTable {
    /// The built-in table: the two languages the datasets ship in.
    fn default() -> Self {
        let mut table = Self::new();
        table.insert("english", &["NN", "NNP", "NNS", "NNPS"]);
        table.insert("finnish", &["NOUN", "PROPN"]);
        table
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_noun_tags() {
        let table = NounTagTable::default();
        let tags  = table.noun_tags("english").unwrap();
        assert!(tags.contains("NN"));
        assert!(tags.contains("NNPS"));
        assert_eq!(tags.len(), 4);
    }

    #[test]
    fn test_finnish_noun_tags() {
        let table = NounTagTable::default();
        let tags  = table.noun_tags("finnish").unwrap();
        assert!(tags.contains("NOUN"));
        assert!(tags.contains("PROPN"));
    }

    #[test]
    fn test_unknown_language_fails_loudly() {
        // An unconfigured language must be a hard error,
        // never an empty or absent set
        let table = NounTagTable::default();
        let err   = table.noun_tags("klingon").unwrap_err();
        assert!(err.to_string().contains("klingon"));
    }

    #[test]
    fn test_table_is_extensible() {
        let mut table = NounTagTable::default();
        table.insert("german", &["NN", "NE"]);
        assert!(table.noun_tags("german").unwrap().contains("NE"));
    }
}
