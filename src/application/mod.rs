// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// one goal: evaluating a trained aspect-extraction model.
//
// Rules for this layer:
//   - No decoding math here (that's Layer 4)
//   - No UI or printing here (that's Layer 1)
//   - No direct knowledge of file formats (Layers 4 and 6)
//   - Only workflow coordination
//
// Think of this layer as the "director" — it tells other
// layers what to do but doesn't do the work itself.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The evaluation workflow
pub mod evaluate_use_case;
