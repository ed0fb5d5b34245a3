mod config;
mod corpus;
mod errors;
mod generation;
mod llm_client;
mod memory;
mod models;
mod repl;
mod scoring;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::errors::AppError;
use crate::generation::compiled::CompiledWriter;
use crate::generation::generator::PostGenerator;
use crate::generation::optimizer::PersonaOptimizer;
use crate::generation::writer::FewShotWriter;
use crate::llm_client::{LanguageModel, LlmClient};
use crate::memory::MemoryStore;
use crate::scoring::MetricKind;

/// Persona-based LinkedIn writing agent.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Metric that scores candidate demo sets
    #[arg(long, value_enum, default_value_t = MetricKind::Binary)]
    metric: MetricKind,

    /// Reuse the last compiled writer instead of searching again
    #[arg(long)]
    reuse_compiled: bool,

    /// Training corpus (default: $DATA_DIR/training.json)
    #[arg(long, value_name = "FILE")]
    training: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configuration first: a missing API key stops everything else
    let config = Config::from_env()?;

    // Logs go to stderr so they don't interleave with the console prompts
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting persona writer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Persona: {}, {} at {} ({})",
        config.persona.name, config.persona.title, config.persona.company, config.persona.company_profile
    );

    let model: Arc<dyn LanguageModel> = Arc::new(LlmClient::new(
        config.gemini_api_key.clone(),
        &config.model_name,
        config.llm_max_retries,
    )?);
    info!("LLM client initialized (model: {})", model.model_name());

    let writer = match cli.reuse_compiled.then(|| load_compiled(&config, &cli, model.clone())) {
        Some(Some(writer)) => writer,
        _ => compile_writer(&config, &cli, model.clone()).await?,
    };

    let generator = PostGenerator::new(
        Arc::new(writer),
        config.persona.clone(),
        MemoryStore::new(config.memory_path()),
    )?;
    info!("Post generator ready");

    let mut input = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    repl::run(&generator, &mut input, &mut out).await?;

    Ok(())
}

/// Loads the cached writer; `None` (with a warning) when it cannot be used.
fn load_compiled(config: &Config, cli: &Cli, model: Arc<dyn LanguageModel>) -> Option<FewShotWriter> {
    let path = config.compiled_path();
    match CompiledWriter::load(&path) {
        Ok(compiled) => {
            if compiled.metric != cli.metric {
                warn!(
                    "Compiled writer was tuned with {:?}, not {:?}; using it anyway",
                    compiled.metric, cli.metric
                );
            }
            info!(
                "Reusing compiled writer from {} ({} demos, score {:.1}, compiled {})",
                path.display(),
                compiled.demos.len(),
                compiled.score,
                compiled.compiled_at
            );
            Some(compiled.into_writer(model))
        }
        Err(e) => {
            warn!("Cannot reuse {}: {e}; running a fresh search", path.display());
            None
        }
    }
}

/// Loads and checks the corpus, runs the demo search, caches the winner.
async fn compile_writer(
    config: &Config,
    cli: &Cli,
    model: Arc<dyn LanguageModel>,
) -> Result<FewShotWriter, AppError> {
    let training_path = cli.training.clone().unwrap_or_else(|| config.training_path());
    let examples = corpus::load(&training_path)?;

    let report = corpus::verify(&examples);
    let trainset: Vec<_> = if report.passed() {
        examples
    } else {
        let complete: Vec<_> = examples.into_iter().filter(|e| e.is_complete()).collect();
        warn!(
            "Dropping {} incomplete posts; training on {}",
            report.total - complete.len(),
            complete.len()
        );
        complete
    };

    let optimizer = PersonaOptimizer::new(model, cli.metric.build(), config.optimizer);
    let optimized = optimizer.compile(&trainset).await?;

    if let Err(e) =
        CompiledWriter::from_optimized(&optimized, cli.metric).save(&config.compiled_path())
    {
        warn!(code = e.code(), "Could not cache compiled writer: {e}");
    }

    Ok(optimized.writer)
}
