// ============================================================
// Layer 4 — Sequence Reconstructor
// ============================================================
// Undoes the compaction step after inference. The model worked
// on the marker-free row and returned one attention weight per
// token it actually saw, so both the tokens AND the weights
// have to be stretched back to the original sentence length:
//
//   compacted tokens: [5, 7, 9, 0]    positions = [2]
//   model weights:    [0.9, 0.05, 0.7]
//         │
//         ▼
//   tokens:  [5, 7, 1, 9]
//   weights: [0.9, 0.05, 0.0, 0.7]
//
// A reinserted marker always gets weight 0.0 — the model never
// attended to it, so it can never clear the aspect threshold.
//
// Ordering is load-bearing: positions index the ORIGINAL row,
// so they must be applied in ascending order against the
// growing sequence. Inserting at position 5 is only meaningful
// once positions 0..5 already exist. The sort below makes that
// dependency explicit instead of relying on callers to pass
// positions pre-sorted.

use anyhow::{bail, Result};

use crate::domain::tokens::{strip_pad, MARKER_TOKEN};

/// A sentence restored to its original order and length, with
/// an attention weight aligned to every token.
#[derive(Debug, Clone)]
pub struct ReconstructedSentence {
    pub tokens:  Vec<u32>,
    pub weights: Vec<f32>,
}

impl ReconstructedSentence {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Rebuild the original sentence from the compacted row, the
/// recorded marker positions, and the model's weight vector.
///
/// The weight vector must cover every content token of the
/// compacted row; a fixed-width (pad-extended) vector is fine,
/// the pad-aligned tail is discarded.
pub fn reconstruct(
    compacted:        &[u32],
    marker_positions: &[usize],
    weights:          &[f32],
) -> Result<ReconstructedSentence> {
    let content = strip_pad(compacted);

    // One weight per token the model saw — anything shorter
    // means model output and dataset rows are out of step,
    // and no safe reconstruction exists
    if weights.len() < content.len() {
        bail!(
            "attention vector has {} weights for {} compacted tokens",
            weights.len(), content.len(),
        );
    }

    let mut tokens:  Vec<u32> = content.to_vec();
    let mut aligned: Vec<f32> = weights[..content.len()].to_vec();

    // Explicit ascending apply order (see module comment)
    let mut positions = marker_positions.to_vec();
    positions.sort_unstable();

    for pos in positions {
        if pos > tokens.len() {
            bail!(
                "marker position {} outside sentence of length {}",
                pos, tokens.len(),
            );
        }
        tokens.insert(pos, MARKER_TOKEN);
        aligned.insert(pos, 0.0);
    }

    Ok(ReconstructedSentence { tokens, weights: aligned })
}
