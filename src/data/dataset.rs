// ============================================================
// Layer 4 — Evaluation Dataset
// ============================================================
// Loads the annotated, prepared dataset for one language:
//
//   {
//     "maxlen": 6,
//     "sentences": [
//       { "tokens": [5, 7, 1, 9, 0, 0],
//         "pos":    [3, 4, 8, 3, 0, 0],
//         "gold":   [0, 2, 2, 2] },
//       ...
//     ]
//   }
//
// tokens and pos are fixed-width rows (padded to maxlen with
// zeros on the right); gold holds one tag code per *content*
// token of the original sentence, so its length equals the
// non-pad prefix of the token row.
//
// All rows are materialized once per run and read-only after
// loading — validation happens here so the pipeline can rely
// on well-formed rows downstream.
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::tokens::strip_pad;

/// One annotated sentence as stored in the prepared file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceRecord {
    /// Fixed-width token-index row (trailing zeros = pad)
    pub tokens: Vec<u32>,
    /// Fixed-width POS-index row, aligned 1:1 with `tokens`
    pub pos:    Vec<u32>,
    /// Gold tag codes, one per content token (unpadded)
    pub gold:   Vec<u8>,
}

/// The full annotated batch for one evaluation run.
#[derive(Debug, Clone, Deserialize)]
pub struct EvalDataset {
    maxlen:    usize,
    sentences: Vec<SentenceRecord>,
}

impl EvalDataset {
    /// Read and validate the prepared dataset file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read dataset '{}'", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("invalid dataset '{}'", path.display()))
    }

    /// Parse from a JSON string and check every row invariant up
    /// front, so downstream code never has to defend against
    /// ragged or misaligned rows.
    pub fn from_json(raw: &str) -> Result<Self> {
        let dataset: EvalDataset = serde_json::from_str(raw)?;

        for (idx, rec) in dataset.sentences.iter().enumerate() {
            // Both index rows must be exactly maxlen wide
            if rec.tokens.len() != dataset.maxlen {
                bail!(
                    "sentence {}: token row has width {} (expected {})",
                    idx, rec.tokens.len(), dataset.maxlen,
                );
            }
            if rec.pos.len() != dataset.maxlen {
                bail!(
                    "sentence {}: POS row has width {} (expected {})",
                    idx, rec.pos.len(), dataset.maxlen,
                );
            }
            // Gold covers the content tokens exactly — a mismatch
            // here would silently corrupt the aggregate score
            let content_len = strip_pad(&rec.tokens).len();
            if rec.gold.len() != content_len {
                bail!(
                    "sentence {}: {} gold tags for {} content tokens",
                    idx, rec.gold.len(), content_len,
                );
            }
        }

        tracing::info!(
            "Loaded {} annotated sentences (maxlen={})",
            dataset.sentences.len(), dataset.maxlen,
        );
        Ok(dataset)
    }

    pub fn maxlen(&self) -> usize {
        self.maxlen
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn sentences(&self) -> &[SentenceRecord] {
        &self.sentences
    }
}
