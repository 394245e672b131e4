// ============================================================
// Layer 3 — Reserved Token Codes
// ============================================================
// The prepared dataset overloads two token indices as sentinels:
//
//   0 — trailing padding: every row is stored at a fixed width
//       (maxlen), and sentences shorter than that are filled
//       with zeros on the right. Pad carries no content and is
//       stripped before words are looked up.
//
//   1 — the marker token: a reserved code (e.g. an out-of-vocab
//       or boundary marker) that the model's encoder removes
//       from each row *before* inference. It is NOT padding —
//       its positions are recorded so the original sentence
//       can be rebuilt afterwards.
//
// Naming them here keeps magic integers out of the pipeline
// and makes the collision risk with real vocabulary indices
// explicit: a vocabulary must never assign these codes to
// actual words.

/// Trailing padding — fills fixed-width rows to the right.
pub const PAD_TOKEN: u32 = 0;

/// Reserved marker token removed by the encoder before inference.
/// Distinct from padding; tracked per-row so it can be reinserted.
pub const MARKER_TOKEN: u32 = 1;

/// Strip the trailing pad run from a fixed-width row.
///
/// Rows are left-packed by construction, so the first pad value
/// marks the start of the padding and everything after it is pad
/// too. Returns the content prefix as a slice (no copy).
pub fn strip_pad(row: &[u32]) -> &[u32] {
    match row.iter().position(|&t| t == PAD_TOKEN) {
        Some(first_pad) => &row[..first_pad],
        None            => row,
    }
}
