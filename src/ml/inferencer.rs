// ============================================================
// Layer 5 — Precomputed Inferencer
// ============================================================
// The training repository runs the network over the evaluation
// batch and exports its two output heads to a JSON file:
//
//   {
//     "att_weights":  [[0.9, 0.05, 0.7], ...],
//     "aspect_probs": [[0.1, 0.02, ...], ...]
//   }
//
// one row per sentence, in dataset order. This inferencer loads
// that file once and serves it through the AttentionModel trait,
// so the rest of the pipeline is unaware the model ran offline.
//
// From the pipeline's perspective the call is a single atomic
// unit of work: compacted batch in, full-batch arrays out.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use crate::domain::traits::{AttentionModel, ModelOutput, Phase};

/// An AttentionModel backed by arrays exported at training time.
pub struct PrecomputedInferencer {
    output: ModelOutput,
}

impl PrecomputedInferencer {
    /// Load the exported model output from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read model output '{}'", path.display()))?;
        let output: ModelOutput = serde_json::from_str(&raw)
            .with_context(|| format!("invalid model output '{}'", path.display()))?;

        if output.att_weights.len() != output.aspect_probs.len() {
            bail!(
                "model output has {} weight rows but {} probability rows",
                output.att_weights.len(), output.aspect_probs.len(),
            );
        }

        tracing::info!(
            "Loaded model output for {} sentences from '{}'",
            output.att_weights.len(), path.display(),
        );
        Ok(Self { output })
    }

    /// Path convention: `model_output{model_name}.json` inside
    /// the model's output directory.
    pub fn output_path(out_dir: &Path, model_name: &str) -> PathBuf {
        out_dir.join(format!("model_output{model_name}.json"))
    }
}

impl AttentionModel for PrecomputedInferencer {
    fn infer(&self, batch: &[Vec<u32>], phase: Phase) -> Result<ModelOutput> {
        // The arrays were produced with regularization off;
        // serving them as training-phase output would be a lie
        if phase != Phase::Inference {
            bail!("precomputed model output is only available in inference phase");
        }

        // Row counts must line up or sentence i would be scored
        // against sentence j's attention
        if batch.len() != self.output.att_weights.len() {
            bail!(
                "batch has {} sentences but model output has {} rows",
                batch.len(), self.output.att_weights.len(),
            );
        }

        Ok(self.output.clone())
    }
}
