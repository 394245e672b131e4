// ============================================================
// Layer 3 — BIO Tag Symbols
// ============================================================
// The pipeline's output alphabet. Every token in a sentence is
// tagged with one of three symbols:
//
//   B — Begins an aspect-term span
//   I — Inside a span (continues the B before it)
//   O — Outside any span
//
// A span is a maximal run of one B followed by zero or more I
// tokens, e.g.  O B I I O B O  contains two spans.
//
// The gold annotations and the scoring routine both work with
// integer codes rather than symbols, so a fixed bijection is
// defined here. The same mapping MUST be used for predictions
// and gold rows — otherwise the aggregate score is meaningless.
//
// Reference: Ramshaw & Marcus (1995), Text Chunking using
//            Transformation-Based Learning (the IOB scheme)

use anyhow::{bail, Result};

/// One BIO tag. Copy-cheap, compared by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSymbol {
    /// Begin — first token of an aspect-term span
    B,
    /// Inside — continuation token of a span
    I,
    /// Outside — token not part of any span
    O,
}

impl TagSymbol {
    /// The fixed symbol → integer code mapping.
    /// B=0, I=1, O=2 — shared by predictions and gold rows.
    pub const fn code(self) -> u8 {
        match self {
            TagSymbol::B => 0,
            TagSymbol::I => 1,
            TagSymbol::O => 2,
        }
    }

    /// The inverse mapping, code → symbol.
    /// Any code outside the scheme is a hard error — a gold row
    /// carrying an unknown code means the dataset and this
    /// binary disagree about the tagging scheme.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(TagSymbol::B),
            1 => Ok(TagSymbol::I),
            2 => Ok(TagSymbol::O),
            other => bail!("unknown tag code {other} (scheme is B=0, I=1, O=2)"),
        }
    }

    /// Display name used in the diagnostic trace.
    pub const fn name(self) -> &'static str {
        match self {
            TagSymbol::B => "B",
            TagSymbol::I => "I",
            TagSymbol::O => "O",
        }
    }
}
