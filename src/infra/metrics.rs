// ============================================================
// Layer 6 — Run Metrics Logger
// ============================================================
// Records the aggregate score of each evaluation run to a CSV
// file next to the trace.
//
// Why log metrics to CSV?
//   - Easy to open in Excel or Google Sheets
//   - Runs with different thresholds or models land in the
//     same file, so sweeps can be compared at a glance
//   - Provides a permanent record of each run
//
// Columns recorded per run:
//   language, model_name, min_aspect_weight,
//   precision, recall, f1
//
// Output file: {out_dir}/metrics.csv
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::traits::ScoreReport;

const HEADER: &str = "language,model_name,min_aspect_weight,precision,recall,f1";

/// Render one CSV row for a run. Pure so the format is testable
/// without a filesystem.
pub fn csv_row(
    language:          &str,
    model_name:        &str,
    min_aspect_weight: f32,
    report:            &ScoreReport,
) -> String {
    format!(
        "{},{},{},{:.6},{:.6},{:.6}",
        language, model_name, min_aspect_weight,
        report.precision, report.recall, report.f1,
    )
}

/// Appends run metrics to a CSV file, writing the header once.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let csv_path = dir.join("metrics.csv");

        // Write CSV header only if file is new.
        // This allows appending to an existing log across runs.
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one run's score as a new row in the CSV.
    pub fn log(
        &self,
        language:          &str,
        model_name:        &str,
        min_aspect_weight: f32,
        report:            &ScoreReport,
    ) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(f, "{}", csv_row(language, model_name, min_aspect_weight, report))?;
        tracing::debug!(
            "Logged run metrics: precision={:.4}, recall={:.4}, f1={:.4}",
            report.precision, report.recall, report.f1,
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}
