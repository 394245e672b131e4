// ============================================================
// Layer 2 — Evaluate Use Case
// ============================================================
// The full evaluation workflow, once per run over the fixed
// annotated batch:
//
//   1. Resolve the language's noun-tag set (fail fast — before
//      any file is opened)
//   2. Load vocabularies, dataset, and the exported model output
//   3. Compact every row and invoke the model interface once,
//      in inference phase
//   4. Per sentence, in order:
//        reconstruct → look up display forms → decode → repair
//        → append to the diagnostic trace → accumulate codes
//   5. Score the accumulated prediction/gold collections and
//      append the result to the metrics CSV
//
// Every sentence is independent; the only shared state is the
// append-only trace and the two accumulating collections, both
// kept in sentence order so the trace stays human-readable.
// Any length disagreement or failed lookup aborts the run —
// a partially decoded batch would silently corrupt the score.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::data::compactor::{compact, CompactedSentence};
use crate::data::dataset::{EvalDataset, SentenceRecord};
use crate::data::reconstructor::reconstruct;
use crate::data::repairer::repair_to_codes;
use crate::data::tagger::Tagger;
use crate::domain::language::NounTagTable;
use crate::domain::tokens::strip_pad;
use crate::domain::traits::{AttentionModel, Phase, ScoreReport, SpanScorer};
use crate::infra::metrics::MetricsLogger;
use crate::infra::trace::TraceWriter;
use crate::infra::vocab_store::{Vocab, VocabStore};
use crate::ml::inferencer::PrecomputedInferencer;
use crate::ml::scoring::SpanF1Scorer;

/// Everything the workflow needs, assembled by Layer 1.
/// Mirrors the training run's settings: the data layout is
/// keyed by language, and the model output directory by the
/// model name used at training time.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    pub language:          String,
    pub min_aspect_weight: f32,
    pub model_name:        String,
    pub data_dir:          String,
}

impl EvalConfig {
    /// `{data_dir}/{language}/prepared`
    pub fn prepared_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
            .join(&self.language)
            .join("prepared")
    }

    /// `{data_dir}/{language}/models[/{model_name}]`
    pub fn out_dir(&self) -> PathBuf {
        let mut dir = PathBuf::from(&self.data_dir)
            .join(&self.language)
            .join("models");
        if !self.model_name.is_empty() {
            dir.push(&self.model_name);
        }
        dir
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.prepared_dir()
            .join(format!("dataset_{}.json", self.language))
    }

    pub fn trace_path(&self) -> PathBuf {
        self.out_dir().join(format!("trace{}.txt", self.model_name))
    }
}

/// One sentence after the full decode: display forms aligned
/// with reconstructed weights and the repaired prediction.
pub struct DecodedSentence {
    pub words:      Vec<String>,
    pub pos_names:  Vec<String>,
    pub weights:    Vec<f32>,
    pub prediction: Vec<u8>,
}

/// Run the per-sentence part of the pipeline: reconstruction,
/// display lookup, raw decode, repair. Pure with respect to the
/// filesystem, so it is directly testable with in-memory stubs.
pub fn decode_sentence(
    record:     &SentenceRecord,
    compacted:  &CompactedSentence,
    weights:    &[f32],
    word_vocab: &Vocab,
    pos_vocab:  &Vocab,
    tagger:     &Tagger,
) -> Result<DecodedSentence> {
    let recon = reconstruct(&compacted.tokens, &compacted.marker_positions, weights)?;

    let words = recon
        .tokens
        .iter()
        .map(|&t| word_vocab.display(t).map(str::to_string))
        .collect::<Result<Vec<_>>>()?;

    let pos_names = strip_pad(&record.pos)
        .iter()
        .map(|&t| pos_vocab.display(t).map(str::to_string))
        .collect::<Result<Vec<_>>>()?;

    // The length invariant: tokens, weights, POS and gold rows
    // must all describe the same sentence. Disagreement here
    // means the prepared files drifted apart — never truncate
    // or pad our way past it.
    if pos_names.len() != recon.len() {
        bail!(
            "{} POS tags for {} reconstructed tokens",
            pos_names.len(), recon.len(),
        );
    }
    if record.gold.len() != recon.len() {
        bail!(
            "{} gold tags for {} reconstructed tokens",
            record.gold.len(), recon.len(),
        );
    }

    let raw        = tagger.tag(&recon.weights, &pos_names)?;
    let prediction = repair_to_codes(&raw);

    Ok(DecodedSentence {
        words,
        pos_names,
        weights: recon.weights,
        prediction,
    })
}

pub struct EvaluateUseCase {
    cfg: EvalConfig,
}

impl EvaluateUseCase {
    pub fn new(cfg: EvalConfig) -> Self {
        Self { cfg }
    }

    /// Load every collaborator from disk and run the pipeline.
    pub fn execute(&self) -> Result<ScoreReport> {
        // Unknown language is a configuration error; catch it
        // before any heavy I/O happens
        let table     = NounTagTable::default();
        let noun_tags = table.noun_tags(&self.cfg.language)?;

        let store      = VocabStore::new(&self.cfg.prepared_dir(), &self.cfg.language);
        let word_vocab = store.load_words()?;
        let pos_vocab  = store.load_pos_tags()?;

        let dataset = EvalDataset::load(&self.cfg.dataset_path())?;
        let model   = PrecomputedInferencer::load(&PrecomputedInferencer::output_path(
            &self.cfg.out_dir(),
            &self.cfg.model_name,
        ))?;

        let tagger = Tagger::new(noun_tags, self.cfg.min_aspect_weight);
        self.run(&dataset, &word_vocab, &pos_vocab, &tagger, &model)
    }

    /// The workflow proper, with every collaborator injected —
    /// tests drive this with stub models and in-memory data.
    pub fn run<M: AttentionModel>(
        &self,
        dataset:    &EvalDataset,
        word_vocab: &Vocab,
        pos_vocab:  &Vocab,
        tagger:     &Tagger,
        model:      &M,
    ) -> Result<ScoreReport> {
        // One compaction pass, then a single opaque model call
        // over the whole batch
        let compacted: Vec<CompactedSentence> = dataset
            .sentences()
            .iter()
            .map(|rec| compact(&rec.tokens))
            .collect();
        let batch: Vec<Vec<u32>> = compacted.iter().map(|c| c.tokens.clone()).collect();

        let output = model.infer(&batch, Phase::Inference)?;
        if output.att_weights.len() != dataset.len() {
            bail!(
                "model returned {} weight rows for {} sentences",
                output.att_weights.len(), dataset.len(),
            );
        }

        tracing::info!("Saving attention trace for {} sentences...", dataset.len());
        let mut trace = TraceWriter::create(&self.cfg.trace_path())?;

        let mut all_gold: Vec<Vec<u8>> = Vec::with_capacity(dataset.len());
        let mut all_pred: Vec<Vec<u8>> = Vec::with_capacity(dataset.len());

        for (idx, (record, comp)) in dataset.sentences().iter().zip(&compacted).enumerate() {
            let decoded = decode_sentence(
                record, comp, &output.att_weights[idx],
                word_vocab, pos_vocab, tagger,
            )
            .with_context(|| format!("sentence {idx}"))?;

            trace.write_sentence(
                idx,
                &decoded.words,
                &decoded.weights,
                &decoded.pos_names,
                &decoded.prediction,
                &record.gold,
            )?;

            all_pred.push(decoded.prediction);
            all_gold.push(record.gold.clone());
        }

        let trace_path = trace.finish()?;
        tracing::info!("Diagnostic trace written to '{}'", trace_path.display());

        let report = SpanF1Scorer.evaluate(&all_gold, &all_pred)?;

        MetricsLogger::new(&self.cfg.out_dir())?.log(
            &self.cfg.language,
            &self.cfg.model_name,
            self.cfg.min_aspect_weight,
            &report,
        )?;
        tracing::info!("Aggregate score: {report}");

        Ok(report)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn word_vocab() -> Vocab {
        let mut map = HashMap::new();
        map.insert("<pad>".to_string(), 0);
        map.insert("<unk>".to_string(), 1);
        map.insert("food".to_string(), 5);
        map.insert("great".to_string(), 7);
        map.insert("service".to_string(), 9);
        Vocab::from_index_map("word", map)
    }

    fn pos_vocab() -> Vocab {
        let mut map = HashMap::new();
        map.insert("NN".to_string(), 3);
        map.insert("JJ".to_string(), 4);
        map.insert("X".to_string(), 8);
        Vocab::from_index_map("POS tag", map)
    }

    fn record(tokens: Vec<u32>, pos: Vec<u32>, gold: Vec<u8>) -> SentenceRecord {
        SentenceRecord { tokens, pos, gold }
    }

    #[test]
    fn test_decode_sentence_end_to_end() {
        // Original row [5, 7, 1, 9]: "food great <unk> service".
        // The marker at position 2 was removed before inference;
        // weights cover the three tokens the model saw.
        // B=0, I=1, O=2.
        let rec  = record(vec![5, 7, 1, 9, 0], vec![3, 4, 8, 3, 0], vec![0, 2, 2, 0]);
        let comp = compact(&rec.tokens);

        let table  = NounTagTable::default();
        let nouns  = table.noun_tags("english").unwrap();
        let tagger = Tagger::new(nouns, 0.2);

        let decoded = decode_sentence(
            &rec, &comp, &[0.9, 0.05, 0.7],
            &word_vocab(), &pos_vocab(), &tagger,
        )
        .unwrap();

        assert_eq!(decoded.words, vec!["food", "great", "<unk>", "service"]);
        assert_eq!(decoded.weights, vec![0.9, 0.05, 0.0, 0.7]);
        // food (NN, 0.9) → B; great (JJ) → O; marker (X, 0.0) → O;
        // service (NN, 0.7) → B after repair
        assert_eq!(decoded.prediction, vec![0, 2, 2, 0]);
    }

    #[test]
    fn test_decode_matches_gold_lengths() {
        let rec  = record(vec![5, 7, 0], vec![3, 4, 0], vec![0, 2]);
        let comp = compact(&rec.tokens);

        let table  = NounTagTable::default();
        let tagger = Tagger::new(table.noun_tags("english").unwrap(), 0.2);

        let decoded = decode_sentence(
            &rec, &comp, &[0.9, 0.05],
            &word_vocab(), &pos_vocab(), &tagger,
        )
        .unwrap();
        assert_eq!(decoded.prediction.len(), rec.gold.len());
    }

    #[test]
    fn test_gold_length_mismatch_is_fatal() {
        // Three content tokens, two gold tags — must abort
        let rec  = record(vec![5, 7, 9, 0], vec![3, 4, 3, 0], vec![0, 2]);
        let comp = compact(&rec.tokens);

        let table  = NounTagTable::default();
        let tagger = Tagger::new(table.noun_tags("english").unwrap(), 0.2);

        let res = decode_sentence(
            &rec, &comp, &[0.9, 0.05, 0.7],
            &word_vocab(), &pos_vocab(), &tagger,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_unknown_word_index_is_fatal() {
        // Token 42 has no vocabulary entry
        let rec  = record(vec![42, 0], vec![3, 0], vec![2]);
        let comp = compact(&rec.tokens);

        let table  = NounTagTable::default();
        let tagger = Tagger::new(table.noun_tags("english").unwrap(), 0.2);

        let res = decode_sentence(
            &rec, &comp, &[0.9],
            &word_vocab(), &pos_vocab(), &tagger,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_config_paths() {
        let cfg = EvalConfig {
            language:          "english".to_string(),
            min_aspect_weight: 0.2,
            model_name:        "run1".to_string(),
            data_dir:          "data".to_string(),
        };
        assert_eq!(
            cfg.dataset_path(),
            PathBuf::from("data/english/prepared/dataset_english.json"),
        );
        assert_eq!(
            cfg.trace_path(),
            PathBuf::from("data/english/models/run1/tracerun1.txt"),
        );
    }

    /// An AttentionModel with hand-written weights, so the full
    /// workflow runs without any exported model file.
    struct StubModel {
        output: crate::domain::traits::ModelOutput,
    }

    impl AttentionModel for StubModel {
        fn infer(&self, _batch: &[Vec<u32>], _phase: Phase) -> Result<crate::domain::traits::ModelOutput> {
            Ok(self.output.clone())
        }
    }

    #[test]
    fn test_run_end_to_end_with_stub_model() {
        use crate::domain::traits::ModelOutput;

        // Two sentences, one with a marker token. Weights are
        // chosen so the predictions reproduce the gold exactly.
        let dataset = EvalDataset::from_json(
            r#"{
                "maxlen": 5,
                "sentences": [
                    { "tokens": [5, 7, 1, 9, 0], "pos": [3, 4, 8, 3, 0], "gold": [0, 2, 2, 0] },
                    { "tokens": [5, 9, 0, 0, 0], "pos": [3, 3, 0, 0, 0], "gold": [2, 0] }
                ]
            }"#,
        )
        .unwrap();

        let model = StubModel {
            output: ModelOutput {
                att_weights:  vec![vec![0.9, 0.05, 0.7], vec![0.1, 0.8]],
                aspect_probs: vec![vec![0.5], vec![0.5]],
            },
        };

        // Unique scratch directory so parallel tests never collide
        let scratch = std::env::temp_dir()
            .join(format!("aspect-eval-run-{}", std::process::id()));
        let cfg = EvalConfig {
            language:          "english".to_string(),
            min_aspect_weight: 0.2,
            model_name:        "stub".to_string(),
            data_dir:          scratch.display().to_string(),
        };

        let table  = NounTagTable::default();
        let tagger = Tagger::new(table.noun_tags("english").unwrap(), 0.2);

        let report = EvaluateUseCase::new(cfg.clone())
            .run(&dataset, &word_vocab(), &pos_vocab(), &tagger, &model)
            .unwrap();

        // 3 gold spans, all found with exact boundaries
        assert_eq!(report.gold_spans, 3);
        assert_eq!(report.predicted_spans, 3);
        assert_eq!(report.matched_spans, 3);
        assert!((report.f1 - 1.0).abs() < 1e-9);

        // One trace block per sentence, in order, with the
        // reconstructed marker at weight 0.0
        let trace = std::fs::read_to_string(cfg.trace_path()).unwrap();
        assert_eq!(trace.matches(&"-".repeat(40)).count(), 2);
        let first_block = trace.find("food great <unk> service").unwrap();
        let second_block = trace.find("food service").unwrap();
        assert!(first_block < second_block);
        assert!(trace.contains("food 0.900 NN B B"));
        assert!(trace.contains("<unk> 0.000 X O O"));

        // One metrics row appended under the run's output dir
        let csv = std::fs::read_to_string(cfg.out_dir().join("metrics.csv")).unwrap();
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[1].starts_with("english,stub,0.2,1.000000"));

        std::fs::remove_dir_all(&scratch).ok();
    }

    #[test]
    fn test_run_rejects_row_count_mismatch() {
        use crate::domain::traits::ModelOutput;

        // One sentence, but the model hands back two weight rows
        let dataset = EvalDataset::from_json(
            r#"{
                "maxlen": 3,
                "sentences": [
                    { "tokens": [5, 7, 0], "pos": [3, 4, 0], "gold": [0, 2] }
                ]
            }"#,
        )
        .unwrap();

        let model = StubModel {
            output: ModelOutput {
                att_weights:  vec![vec![0.9, 0.05], vec![0.1]],
                aspect_probs: vec![vec![0.5], vec![0.5]],
            },
        };

        let scratch = std::env::temp_dir()
            .join(format!("aspect-eval-mismatch-{}", std::process::id()));
        let cfg = EvalConfig {
            language:          "english".to_string(),
            min_aspect_weight: 0.2,
            model_name:        "stub".to_string(),
            data_dir:          scratch.display().to_string(),
        };

        let table  = NounTagTable::default();
        let tagger = Tagger::new(table.noun_tags("english").unwrap(), 0.2);

        let res = EvaluateUseCase::new(cfg)
            .run(&dataset, &word_vocab(), &pos_vocab(), &tagger, &model);
        assert!(res.is_err());

        std::fs::remove_dir_all(&scratch).ok();
    }

    #[test]
    fn test_empty_model_name_has_no_subdirectory() {
        let cfg = EvalConfig {
            language:          "english".to_string(),
            min_aspect_weight: 0.2,
            model_name:        String::new(),
            data_dir:          "data".to_string(),
        };
        assert_eq!(cfg.out_dir(), PathBuf::from("data/english/models"));
    }
}
