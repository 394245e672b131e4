// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The two external collaborators of the pipeline are modelled
// as traits, so the application layer never depends on where
// model output comes from or how scores are computed:
//
//   AttentionModel — the trained model's inference call.
//     Implementations:
//       - PrecomputedInferencer → serves the arrays the
//         training repo exported to disk
//       - (tests) stubs returning hand-written weights
//
//   SpanScorer — the aggregate scoring routine.
//     Implementations:
//       - SpanF1Scorer → span-level precision/recall/F1
//       - (future) token-level accuracy scorer
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Whether the model runs with stochastic regularization
/// (dropout etc.) active. Evaluation always uses `Inference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Train,
    Inference,
}

/// The full-batch output of one model inference call:
/// one attention-weight vector and one aspect-probability
/// vector per input row, in row order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelOutput {
    /// Per-row attention weights — one score per non-marker token
    pub att_weights:  Vec<Vec<f32>>,
    /// Per-row aspect-cluster probabilities
    pub aspect_probs: Vec<Vec<f32>>,
}

// ─── AttentionModel ───────────────────────────────────────────────────────────
/// The opaque model-inference interface: a batch of fixed-width
/// compacted token rows in, full-batch weight and probability
/// arrays out. Invoked exactly once per evaluation run.
pub trait AttentionModel {
    fn infer(&self, batch: &[Vec<u32>], phase: Phase) -> Result<ModelOutput>;
}

// ─── SpanScorer ───────────────────────────────────────────────────────────────
/// Aggregate tagging-quality report over all sentences.
/// Persisted as a hand-formatted CSV row by the metrics logger,
/// so it carries no serde derives of its own.
#[derive(Debug, Clone)]
pub struct ScoreReport {
    pub precision: f64,
    pub recall:    f64,
    pub f1:        f64,
    /// Number of aspect spans in the gold annotations
    pub gold_spans:      usize,
    /// Number of aspect spans in the predictions
    pub predicted_spans: usize,
    /// Spans where prediction and gold agree exactly (start and end)
    pub matched_spans:   usize,
}

impl std::fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "precision={:.4} recall={:.4} f1={:.4} (gold={}, predicted={}, matched={})",
            self.precision, self.recall, self.f1,
            self.gold_spans, self.predicted_spans, self.matched_spans,
        )
    }
}

/// Any component that can score aligned prediction/gold tag-code
/// collections. Both arguments hold one code row per sentence;
/// row `i` of each must have equal length.
pub trait SpanScorer {
    fn evaluate(&self, gold: &[Vec<u8>], predictions: &[Vec<u8>]) -> Result<ScoreReport>;
}
