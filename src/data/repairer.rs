// ============================================================
// Layer 4 — Repairer
// ============================================================
// The tagger emits only I and O, so its output can violate the
// BIO scheme: a span must BEGIN with B, never I. This pass
// scans left to right with one symbol of lookbehind and
// rewrites every span-initial I:
//
//   raw:      I  O  I  I  O
//   repaired: B  O  B  I  O
//
// The lookbehind tracks the previously EMITTED symbol (not the
// raw one), starting from an implicit O before the sentence —
// so a leading I always becomes B, and an I after the rewritten
// B correctly stays I.
//
// Guarantee: the output never starts with I and never contains
// O immediately followed by I.

use crate::domain::tags::TagSymbol;

/// Rewrite a raw symbol stream into a valid BIO tagging.
pub fn repair(raw: &[TagSymbol]) -> Vec<TagSymbol> {
    let mut last = TagSymbol::O;
    let mut fixed = Vec::with_capacity(raw.len());

    for &tag in raw {
        let emitted = if tag == TagSymbol::I && last == TagSymbol::O {
            TagSymbol::B
        } else {
            tag
        };
        fixed.push(emitted);
        last = emitted;
    }

    fixed
}

/// Repair and convert straight to integer codes — the form the
/// scorer and the gold rows use.
pub fn repair_to_codes(raw: &[TagSymbol]) -> Vec<u8> {
    repair(raw).into_iter().map(TagSymbol::code).collect()
}
