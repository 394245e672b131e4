// ============================================================
// Layer 4 — Decode Pipeline
// ============================================================
// This layer handles everything from the prepared dataset rows
// all the way to repaired tag-code sequences, one step per
// module:
//
//   prepared JSON rows
//       │
//       ▼
//   EvalDataset       → fixed-width token/POS rows + gold tags
//       │
//       ▼
//   Compactor         → removes marker tokens, records where
//       │               they were (the model never sees them)
//       ▼
//   (model inference — Layer 5, opaque)
//       │
//       ▼
//   Reconstructor     → reinserts the markers, restoring the
//       │               original token order with weight 0.0
//       ▼
//   Tagger            → attention threshold + noun-POS filter
//       │               → raw I/O symbol stream
//       ▼
//   Repairer          → turns span-initial I into B and maps
//                       symbols to integer codes
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Loads and validates the prepared sentence rows
pub mod dataset;

/// Removes marker tokens from rows, recording their positions
pub mod compactor;

/// Reinserts markers into model output, restoring sentence order
pub mod reconstructor;

/// Thresholds attention weights into raw I/O symbols
pub mod tagger;

/// Repairs raw symbol streams into a valid BIO tagging
pub mod repairer;
