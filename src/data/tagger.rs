// ============================================================
// Layer 4 — Tagger (raw decode)
// ============================================================
// Turns continuous attention weights into a raw tag-symbol
// stream. A token is tentatively Inside an aspect span when
// BOTH conditions hold:
//
//   1. the model attended to it strongly enough
//      (weight > min_aspect_weight), and
//   2. its POS tag is in the language's noun-category set
//      (aspect terms are nouns — "food", "service", ...)
//
// Everything else is Outside. The output is deliberately raw:
// a span-initial I is structurally invalid in BIO and is fixed
// by the repairer, the next pipeline step.
//
// Raising the threshold can only flip I → O, never O → I —
// the decode is monotone in min_aspect_weight.

use anyhow::{bail, Result};
use std::collections::HashSet;

use crate::domain::tags::TagSymbol;

/// Decodes one sentence's weights + POS names into raw symbols.
pub struct Tagger<'a> {
    noun_tags:         &'a HashSet<String>,
    min_aspect_weight: f32,
}

impl<'a> Tagger<'a> {
    pub fn new(noun_tags: &'a HashSet<String>, min_aspect_weight: f32) -> Self {
        Self { noun_tags, min_aspect_weight }
    }

    /// Emit one raw symbol per token position.
    ///
    /// `weights` and `pos_names` must be aligned 1:1 with the
    /// reconstructed sentence; a length disagreement means the
    /// rows drifted apart upstream and decoding must not guess.
    pub fn tag(&self, weights: &[f32], pos_names: &[String]) -> Result<Vec<TagSymbol>> {
        if weights.len() != pos_names.len() {
            bail!(
                "{} attention weights for {} POS tags",
                weights.len(), pos_names.len(),
            );
        }

        let tags = weights
            .iter()
            .zip(pos_names)
            .map(|(&weight, pos)| {
                if weight > self.min_aspect_weight && self.noun_tags.contains(pos) {
                    TagSymbol::I
                } else {
                    TagSymbol::O
                }
            })
            .collect();

        Ok(tags)
    }
}
