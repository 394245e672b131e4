// ============================================================
// Layer 4 — Compactor
// ============================================================
// The trained model never sees marker tokens: its encoder
// expects them removed before inference. This module performs
// that removal on each fixed-width row:
//
//   original:  [5, 7, 1, 9, 0]      (1 = marker, 0 = pad)
//   compacted: [5, 7, 9, 0, 0]      positions = [2]
//
// The recorded positions are indices into the ORIGINAL row,
// in ascending order. They are exactly what the reconstructor
// needs to reinsert the markers after inference — applying
// them in ascending order against the growing sequence puts
// every marker back where it came from.

use crate::domain::tokens::{MARKER_TOKEN, PAD_TOKEN};

/// A row with its markers removed, plus the record of where
/// they were.
#[derive(Debug, Clone)]
pub struct CompactedSentence {
    /// Same width as the input row: content left-packed,
    /// trailing pad extended to cover the removed markers
    pub tokens: Vec<u32>,
    /// Ascending positions (in the original row) of the
    /// removed marker tokens
    pub marker_positions: Vec<usize>,
}

/// Remove every marker token from a fixed-width row, left-pack
/// the remainder, and pad back to the original width.
///
/// A forward scan visits positions in increasing order, so the
/// recorded positions come out ascending without sorting.
pub fn compact(row: &[u32]) -> CompactedSentence {
    let mut tokens = Vec::with_capacity(row.len());
    let mut marker_positions = Vec::new();

    for (pos, &token) in row.iter().enumerate() {
        if token == MARKER_TOKEN {
            marker_positions.push(pos);
        } else {
            tokens.push(token);
        }
    }

    // Restore the fixed width the model expects
    tokens.resize(row.len(), PAD_TOKEN);

    CompactedSentence { tokens, marker_positions }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_marker_and_left_packs() {
        // Scenario from the original pipeline:
        // [5, 7, 1, 9] → [5, 7, 9, 0] with position 2 recorded
        let c = compact(&[5, 7, 1, 9]);
        assert_eq!(c.tokens, vec![5, 7, 9, 0]);
        assert_eq!(c.marker_positions, vec![2]);
    }

    #[test]
    fn test_no_markers_is_identity() {
        let c = compact(&[5, 7, 9, 0]);
        assert_eq!(c.tokens, vec![5, 7, 9, 0]);
        assert!(c.marker_positions.is_empty());
    }

    #[test]
    fn test_multiple_markers_recorded_ascending() {
        let c = compact(&[1, 5, 1, 7, 0]);
        assert_eq!(c.tokens, vec![5, 7, 0, 0, 0]);
        assert_eq!(c.marker_positions, vec![0, 2]);
    }

    #[test]
    fn test_width_is_preserved() {
        let row = [5, 1, 1, 9, 0, 0];
        let c   = compact(&row);
        assert_eq!(c.tokens.len(), row.len());
    }
}
