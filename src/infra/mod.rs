// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles all cross-cutting concerns that don't belong in
// any specific business layer:
//
//   vocab_store.rs — Vocabulary persistence
//                    Loads the word→index and POS-name→index
//                    JSON maps written at preparation time and
//                    inverts them, so the pipeline can turn
//                    token indices back into display forms.
//
//   trace.rs       — Diagnostic trace file
//                    Writes the human-readable per-sentence
//                    trace: words, attention weights, POS tags,
//                    predicted and gold BIO tags. This is the
//                    file you read to understand WHY a score
//                    came out the way it did.
//
//   metrics.rs     — Run metrics logging
//                    Appends one CSV row per evaluation run
//                    (precision, recall, F1) for later analysis
//                    and comparison across thresholds.
//
// Why is this a separate layer?
//   These concerns are used by multiple other layers but
//   don't belong to any one of them. Keeping them here:
//   - Prevents duplication across layers
//   - Makes it easy to swap implementations
//   - Keeps other layers focused on their core logic
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Word and POS-name vocabulary loading and inversion
pub mod vocab_store;

/// Per-sentence diagnostic trace writer
pub mod trace;

/// Evaluation-run metrics CSV logger
pub mod metrics;
