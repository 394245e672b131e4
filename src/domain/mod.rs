// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// This is the heart of the application — pure Rust structs,
// enums, constants and traits that define the core concepts
// of the evaluation pipeline.
//
// Rules for this layer:
//   - NO file I/O or network calls
//   - NO model-specific code
//   - Only plain Rust structs, enums, constants and traits
//
// Why keep this layer pure?
//   - Easy to unit test (no files or model output needed)
//   - Easy to understand (no framework noise)
//   - Easy to swap implementations (just implement the trait)
//
// Think of this layer as the "dictionary" of the system —
// it defines what things ARE, not how they work.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Reserved token codes (pad, marker) and pad stripping
pub mod tokens;

// BIO tag symbols and their fixed integer-code bijection
pub mod tags;

// Language-keyed noun-tag filter sets with fail-fast lookup
pub mod language;

// Core abstractions (traits) that other layers implement
pub mod traits;
