// ============================================================
// Layer 6 — Diagnostic Trace
// ============================================================
// A plain-text UTF-8 file with one block per sentence, in
// sentence order, so a human can line the model's attention up
// against the gold annotation:
//
//   ----------------------------------------
//   0
//   the food was great
//   the 0.010 DT O O
//   food 0.900 NN B B
//   was 0.050 VBD O O
//   great 0.120 JJ O O
//
// Block structure: a 40-dash separator, the sentence index,
// the space-joined words, then one line per token with
//   word  weight(3dp)  POS  predicted_tag  gold_tag
//
// Formatting is split from file I/O so the format itself is
// unit-testable without touching the filesystem.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::domain::tags::TagSymbol;

const SEPARATOR_WIDTH: usize = 40;

/// Render one sentence's trace block (including the trailing
/// newline of the last token line).
pub fn format_sentence(
    index:      usize,
    words:      &[String],
    weights:    &[f32],
    pos_names:  &[String],
    prediction: &[u8],
    gold:       &[u8],
) -> Result<String> {
    // Every column must cover every token — a ragged block
    // would be unreadable and hide an upstream misalignment
    let len = words.len();
    if [weights.len(), pos_names.len(), prediction.len(), gold.len()]
        .iter()
        .any(|&l| l != len)
    {
        bail!(
            "sentence {}: misaligned trace columns ({} words, {} weights, {} POS, {} predicted, {} gold)",
            index, len, weights.len(), pos_names.len(), prediction.len(), gold.len(),
        );
    }

    let mut block = String::new();
    block.push_str(&"-".repeat(SEPARATOR_WIDTH));
    block.push('\n');
    block.push_str(&index.to_string());
    block.push('\n');
    block.push_str(&words.join(" "));
    block.push('\n');

    for j in 0..len {
        let pred_name = TagSymbol::from_code(prediction[j])?.name();
        let gold_name = TagSymbol::from_code(gold[j])?.name();
        block.push_str(&format!(
            "{} {:.3} {} {} {}\n",
            words[j], weights[j], pos_names[j], pred_name, gold_name,
        ));
    }

    Ok(block)
}

/// Appends sentence blocks to the trace file in order.
pub struct TraceWriter {
    path: PathBuf,
    out:  BufWriter<fs::File>,
}

impl TraceWriter {
    /// Create (truncate) the trace file, creating parent
    /// directories as needed.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create '{}'", parent.display()))?;
        }
        let file = fs::File::create(path)
            .with_context(|| format!("cannot create trace file '{}'", path.display()))?;
        tracing::debug!("Writing diagnostic trace to '{}'", path.display());
        Ok(Self { path: path.to_path_buf(), out: BufWriter::new(file) })
    }

    pub fn write_sentence(
        &mut self,
        index:      usize,
        words:      &[String],
        weights:    &[f32],
        pos_names:  &[String],
        prediction: &[u8],
        gold:       &[u8],
    ) -> Result<()> {
        let block = format_sentence(index, words, weights, pos_names, prediction, gold)?;
        self.out
            .write_all(block.as_bytes())
            .with_context(|| format!("cannot write trace '{}'", self.path.display()))?;
        Ok(())
    }

    /// Flush buffered blocks out to disk.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.out.flush()?;
        Ok(self.path)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_block_layout() {
        // B=0, O=2 in the fixed code mapping
        let block = format_sentence(
            3,
            &strings(&["the", "food"]),
            &[0.01, 0.9],
            &strings(&["DT", "NN"]),
            &[2, 0],
            &[2, 0],
        )
        .unwrap();

        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines[0], "-".repeat(40));
        assert_eq!(lines[1], "3");
        assert_eq!(lines[2], "the food");
        assert_eq!(lines[3], "the 0.010 DT O O");
        assert_eq!(lines[4], "food 0.900 NN B B");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_weights_rounded_to_three_decimals() {
        let block = format_sentence(
            0,
            &strings(&["food"]),
            &[0.12345],
            &strings(&["NN"]),
            &[0],
            &[0],
        )
        .unwrap();
        assert!(block.contains("food 0.123 NN B B"));
    }

    #[test]
    fn test_misaligned_columns_are_fatal() {
        // Two words, one weight
        let res = format_sentence(
            0,
            &strings(&["the", "food"]),
            &[0.5],
            &strings(&["DT", "NN"]),
            &[2, 2],
            &[2, 2],
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_unknown_tag_code_is_fatal() {
        let res = format_sentence(
            0,
            &strings(&["food"]),
            &[0.5],
            &strings(&["NN"]),
            &[9],
            &[0],
        );
        assert!(res.is_err());
    }
}
