//! consistency-judge CLI: label each narrative as consistent (1) or contradictory (0)
//! with its character's backstory.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};

use consistency_core::ingest::{
    discover_corpus_dir, discover_input, read_records, write_evidence_file, write_results_file,
};
use consistency_core::{Corpus, JudgeConfig, TensionPolicy};
use rule_book::MatchMode;

#[derive(Parser)]
#[command(
    name = "consistency-judge",
    version,
    about = "Judge whether narratives are causally consistent with their backstories"
)]
struct Cli {
    /// Input table (id, caption/backstory, content columns). Searched in well-known
    /// locations when omitted.
    #[arg(long = "test-csv", visible_alias = "input")]
    test_csv: Option<PathBuf>,

    /// Directory of plain-text novels searched alongside each narrative.
    #[arg(long)]
    novels: Option<PathBuf>,

    /// Results table to write.
    #[arg(long, default_value = "results.csv")]
    output: PathBuf,

    /// TOML file with [engine] settings and [rules] tables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Whether trait tension counts as a contradiction.
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Only match rule terms on word boundaries.
    #[arg(long)]
    word_boundary: bool,

    /// Also write every verdict with its evidence as JSON lines.
    #[arg(long)]
    evidence: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Fatal,
    Advisory,
}

impl From<PolicyArg> for TensionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Fatal => TensionPolicy::Fatal,
            PolicyArg::Advisory => TensionPolicy::Advisory,
        }
    }
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let base = std::env::current_dir().into_diagnostic()?;

    let mut config = match &cli.config {
        Some(path) => JudgeConfig::load(path)?,
        None => JudgeConfig::default(),
    };
    if let Some(policy) = cli.policy {
        config.engine.tension_policy = policy.into();
    }
    if cli.word_boundary {
        config.engine.match_mode = MatchMode::WordBoundary;
    }

    // Resolve every input before judging anything.
    let input = discover_input(&base, cli.test_csv.as_deref())?;
    let records = read_records(&input)?;

    let corpus = match discover_corpus_dir(&base, cli.novels.as_deref())? {
        Some(dir) if config.engine.scan_corpus => Some(Corpus::load_dir(&dir)?),
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "corpus scanning disabled, ignoring corpus");
            None
        }
        None => None,
    };

    let engine = config.build_engine()?;
    let verdicts = engine.judge_all(&records, corpus.as_ref());

    write_results_file(&cli.output, &verdicts)?;
    if let Some(path) = &cli.evidence {
        write_evidence_file(path, &verdicts)?;
    }

    println!("{} generated successfully.", cli.output.display());
    Ok(())
}
