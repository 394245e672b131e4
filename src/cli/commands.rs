// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `evaluate` and `languages`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → f32, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::evaluate_use_case::EvalConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode the model's attention weights into BIO tags and
    /// score them against the gold annotations
    Evaluate(EvaluateArgs),

    /// List the configured languages and their noun-tag sets
    Languages,
}

/// All arguments for the `evaluate` command.
/// Each field becomes a --flag on the command line, mirroring
/// the settings the model was trained with.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Language — selects the data folder and the noun-tag
    /// filter set used by the decoder
    #[arg(long, default_value = "english")]
    pub language: String,

    /// The minimum attention weight for a word to be tagged as
    /// part of an aspect term
    #[arg(long, default_value_t = 0.2)]
    pub min_aspect_weight: f32,

    /// A name attached to the stored model output and trace
    /// (same name used at training time)
    #[arg(long, default_value = "")]
    pub model_name: String,

    /// Root directory of the prepared data and model outputs
    #[arg(long, default_value = "data")]
    pub data_dir: String,
}

/// Convert CLI EvaluateArgs into the application-layer
/// EvalConfig. This is the boundary between Layer 1 and
/// Layer 2 — the application layer never sees clap types.
impl From<EvaluateArgs> for EvalConfig {
    fn from(a: EvaluateArgs) -> Self {
        EvalConfig {
            language:          a.language,
            min_aspect_weight: a.min_aspect_weight,
            model_name:        a.model_name,
            data_dir:          a.data_dir,
        }
    }
}
