// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `evaluate`  — runs the decode-and-score pipeline
//   2. `languages` — lists the configured noun-tag sets
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EvaluateArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "aspect-eval",
    version = "0.1.0",
    about = "Decode attention weights from an aspect-extraction model into BIO tags and score them."
)]
pub struct Cli {
    /// The subcommand to run (evaluate or languages)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    ///
    /// The handlers are associated functions: dispatching moves the
    /// subcommand's args out of `self`, so no handler may borrow
    /// `self` afterwards (and none needs to — the Cli struct holds
    /// no state beyond the subcommand).
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Evaluate(args) => Self::run_evaluate(args),
            Commands::Languages      => Self::run_languages(),
        }
    }

    /// Handles the `evaluate` subcommand.
    /// Converts CLI args into an EvalConfig and hands off to Layer 2.
    fn run_evaluate(args: EvaluateArgs) -> Result<()> {
        use crate::application::evaluate_use_case::EvaluateUseCase;

        tracing::info!(
            "Evaluating language '{}' with min_aspect_weight={}",
            args.language, args.min_aspect_weight,
        );

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = EvaluateUseCase::new(args.into());
        let report   = use_case.execute()?;

        println!("{report}");
        Ok(())
    }

    /// Handles the `languages` subcommand.
    /// Prints every configured language with its noun-tag set.
    fn run_languages() -> Result<()> {
        use crate::domain::language::NounTagTable;

        let table = NounTagTable::default();
        for (language, tags) in table.languages() {
            let mut names: Vec<&str> = tags.iter().map(String::as_str).collect();
            names.sort_unstable();
            println!("{language}: {}", names.join(" "));
        }
        Ok(())
    }
}
