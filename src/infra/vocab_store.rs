// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// The preparation step stores two JSON maps per language:
//
//   word_idx_{language}.json — {"the": 2, "food": 3, ...}
//   pos_idx_{language}.json  — {"NN": 3, "DT": 4, ...}
//
// Both map display form → index, which is the direction the
// encoder needed. The evaluation pipeline needs the opposite
// direction (index → display form) to write the trace, so the
// maps are inverted once at load time and kept read-only.
//
// The word map does not store an entry for padding — the pad
// index 0 is reserved by convention — so `<pad>` → 0 is
// injected before inversion, matching the preparation step.
//
// An index with no entry is a hard lookup error: a display
// form cannot be invented, and a missing index means the
// dataset and vocabulary files are from different runs.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::tokens::PAD_TOKEN;

/// A read-only index → display-form mapping.
pub struct Vocab {
    /// What the entries are ("word" or "POS tag") — only used
    /// to make lookup errors self-explanatory
    kind:     &'static str,
    by_index: HashMap<u32, String>,
}

impl Vocab {
    /// Invert a display-form→index map loaded from JSON.
    pub fn from_index_map(kind: &'static str, map: HashMap<String, u32>) -> Self {
        let by_index = map.into_iter().map(|(form, idx)| (idx, form)).collect();
        Self { kind, by_index }
    }

    /// Look up the display form for an index. Fatal on a miss —
    /// the run must not continue with a fabricated form.
    pub fn display(&self, index: u32) -> Result<&str> {
        match self.by_index.get(&index) {
            Some(form) => Ok(form.as_str()),
            None => bail!("{} index {} not present in vocabulary", self.kind, index),
        }
    }

    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }
}

/// Loads both vocabularies for one language from the prepared
/// data directory.
pub struct VocabStore {
    prepared_dir: PathBuf,
    language:     String,
}

impl VocabStore {
    pub fn new(prepared_dir: &Path, language: &str) -> Self {
        Self {
            prepared_dir: prepared_dir.to_path_buf(),
            language:     language.to_string(),
        }
    }

    /// Load the index→word vocabulary, injecting the reserved
    /// `<pad>` entry at index 0.
    pub fn load_words(&self) -> Result<Vocab> {
        let mut map = self.load_map(&format!("word_idx_{}.json", self.language))?;
        map.insert("<pad>".to_string(), PAD_TOKEN);
        let vocab = Vocab::from_index_map("word", map);
        tracing::info!("Loaded word vocabulary ({} entries)", vocab.len());
        Ok(vocab)
    }

    /// Load the index→POS-name vocabulary.
    pub fn load_pos_tags(&self) -> Result<Vocab> {
        let map   = self.load_map(&format!("pos_idx_{}.json", self.language))?;
        let vocab = Vocab::from_index_map("POS tag", map);
        tracing::info!("Loaded POS vocabulary ({} entries)", vocab.len());
        Ok(vocab)
    }

    fn load_map(&self, file_name: &str) -> Result<HashMap<String, u32>> {
        let path = self.prepared_dir.join(file_name);
        let raw  = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read vocabulary '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid vocabulary '{}'", path.display()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn word_vocab() -> Vocab {
        let mut map = HashMap::new();
        map.insert("<pad>".to_string(), 0);
        map.insert("food".to_string(), 5);
        map.insert("great".to_string(), 7);
        Vocab::from_index_map("word", map)
    }

    #[test]
    fn test_inverted_lookup() {
        let vocab = word_vocab();
        assert_eq!(vocab.display(5).unwrap(), "food");
        assert_eq!(vocab.display(0).unwrap(), "<pad>");
    }

    #[test]
    fn test_missing_index_is_fatal() {
        let err = word_vocab().display(99).unwrap_err();
        // The error names the kind and the offending index
        assert!(err.to_string().contains("word"));
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn test_len_counts_entries() {
        assert_eq!(word_vocab().len(), 3);
    }
}
