// ============================================================
// Layer 5 — Model & Metrics Layer
// ============================================================
// Everything that faces the trained model or computes scores
// over its output lives here. The network itself — its
// architecture, optimizer, and training loop — belongs to the
// training repository and is out of scope; this layer only
// consumes what that repository exports.
//
// What's in this layer:
//
//   inferencer.rs — Serves the model's exported attention
//                   weights and aspect probabilities through
//                   the AttentionModel trait, validating that
//                   they line up with the evaluation batch.
//
//   scoring.rs    — Span-level precision / recall / F1 over
//                   aligned prediction and gold tag-code rows,
//                   behind the SpanScorer trait.
//
// Why isolate this here?
//   - The application layer depends only on the domain traits,
//     so tests can stub the model with hand-written weights
//   - Swapping the precomputed source for a live inference
//     backend later touches only this layer
//
// Reference: He et al. (2017) An Unsupervised Neural Attention
//            Model for Aspect Extraction

/// Serves exported model output through the AttentionModel trait
pub mod inferencer;

/// Span-level precision/recall/F1 scoring
pub mod scoring;
