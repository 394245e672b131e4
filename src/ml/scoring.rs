// ============================================================
// Layer 5 — Span Scoring
// ============================================================
// Aggregate tagging quality over the whole batch, measured at
// the SPAN level (the unit users care about — whole aspect
// mentions, not individual tokens):
//
//   precision = matched spans / predicted spans
//   recall    = matched spans / gold spans
//   f1        = harmonic mean of the two
//
// A predicted span counts as matched only when a gold span in
// the SAME sentence has exactly the same start and end — the
// strict exact-match convention of seqeval-style evaluation.
//
// Input contract: one code row per sentence in each collection,
// same sentence count, row i of each with equal length. Any
// disagreement is a hard error; scoring misaligned rows would
// silently corrupt the report.

use anyhow::{bail, Result};

use crate::domain::tags::TagSymbol;
use crate::domain::traits::{ScoreReport, SpanScorer};

/// Exact-match span-level precision/recall/F1.
pub struct SpanF1Scorer;

/// Extract aspect spans as half-open `(start, end)` token
/// ranges from one code row.
///
/// A span opens on B and extends over following I tokens. Gold
/// annotations are not guaranteed to be repaired, so a bare I
/// with no open span is read leniently as opening a new span
/// rather than rejected.
fn extract_spans(codes: &[u8]) -> Result<Vec<(usize, usize)>> {
    let mut spans = Vec::new();
    let mut open: Option<usize> = None;

    for (pos, &code) in codes.iter().enumerate() {
        match TagSymbol::from_code(code)? {
            TagSymbol::B => {
                if let Some(start) = open.take() {
                    spans.push((start, pos));
                }
                open = Some(pos);
            }
            TagSymbol::I => {
                if open.is_none() {
                    open = Some(pos);
                }
            }
            TagSymbol::O => {
                if let Some(start) = open.take() {
                    spans.push((start, pos));
                }
            }
        }
    }
    if let Some(start) = open {
        spans.push((start, codes.len()));
    }

    Ok(spans)
}

/// Guard division by zero: an empty denominator scores 0.0,
/// never NaN.
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

impl SpanScorer for SpanF1Scorer {
    fn evaluate(&self, gold: &[Vec<u8>], predictions: &[Vec<u8>]) -> Result<ScoreReport> {
        if gold.len() != predictions.len() {
            bail!(
                "{} gold rows but {} prediction rows",
                gold.len(), predictions.len(),
            );
        }

        let mut gold_spans      = 0usize;
        let mut predicted_spans = 0usize;
        let mut matched_spans   = 0usize;

        for (idx, (g, p)) in gold.iter().zip(predictions).enumerate() {
            if g.len() != p.len() {
                bail!(
                    "sentence {}: gold has {} tags, prediction has {}",
                    idx, g.len(), p.len(),
                );
            }

            let g_spans = extract_spans(g)?;
            let p_spans = extract_spans(p)?;

            matched_spans   += p_spans.iter().filter(|s| g_spans.contains(s)).count();
            gold_spans      += g_spans.len();
            predicted_spans += p_spans.len();
        }

        let precision = ratio(matched_spans, predicted_spans);
        let recall    = ratio(matched_spans, gold_spans);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        Ok(ScoreReport {
            precision,
            recall,
            f1,
            gold_spans,
            predicted_spans,
            matched_spans,
        })
    }
}
