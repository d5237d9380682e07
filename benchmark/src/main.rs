//! @ai:module:intent CLI for the Fern evaluation engine
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fern_eval::{
    config::{EvalConfig, DEFAULT_CONFIG_FILE},
    evaluator::{EvaluationMode, Evaluator},
    metrics::EvaluationResult,
    report::ReportGenerator,
    runner::{BatchEvaluationResult, ModelOutput},
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "fern-eval")]
#[command(about = "Compare AI-generated code against a golden reference and rank models")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one generated file or application against the golden standard
    Evaluate {
        /// Golden file or application directory
        #[arg(long)]
        golden: PathBuf,

        /// Generated file or application directory
        #[arg(long)]
        generated: PathBuf,

        /// Evaluation mode: file, app or auto
        #[arg(short, long, default_value = "auto")]
        mode: EvaluationMode,

        /// Output directory for reports (defaults to report.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the full result as JSON instead of a summary table
        #[arg(long)]
        json: bool,
    },

    /// Evaluate several model outputs against one golden standard and rank them
    Batch {
        /// Golden file or application directory
        #[arg(long)]
        golden: PathBuf,

        /// Model output as name=path (repeatable)
        #[arg(long = "model", required = true)]
        models: Vec<ModelOutput>,

        /// Evaluation mode: file, app or auto
        #[arg(short, long, default_value = "auto")]
        mode: EvaluationMode,

        /// Evaluate models concurrently
        #[arg(long)]
        concurrent: bool,

        /// Output directory for reports (defaults to report.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate reports from a saved result file
    Report {
        /// Path to result.json or batch.json
        #[arg(short, long)]
        results: PathBuf,

        /// Output directory for reports
        #[arg(short, long, default_value = "reports")]
        output: PathBuf,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "fern_eval=debug"
    } else {
        "fern_eval=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .init();

    match cli.command {
        Commands::Evaluate {
            golden,
            generated,
            mode,
            output,
            config,
            json,
        } => evaluate(&golden, &generated, mode, output, config, json),
        Commands::Batch {
            golden,
            models,
            mode,
            concurrent,
            output,
            config,
        } => run_batch(&golden, &models, mode, concurrent, output, config).await,
        Commands::Report { results, output } => generate_reports(&results, &output),
        Commands::Init { output } => init_config(&output),
    }
}

/// @ai:intent Create a timestamped run directory under the configured output root
/// @ai:effects fs:write
fn create_run_dir(output: Option<PathBuf>, config: &EvalConfig) -> Result<PathBuf> {
    let root = output.unwrap_or_else(|| config.report.output_dir.clone());
    let timestamp = chrono::Utc::now().format("%Y-%m-%d_%H-%M-%S");
    let run_dir = root.join(timestamp.to_string());

    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("Failed to create output directory {}", run_dir.display()))?;
    tracing::info!("Output directory: {}", run_dir.display());

    Ok(run_dir)
}

/// @ai:intent Evaluate a single golden/generated pair and write its reports
/// @ai:effects fs:read, fs:write, io
fn evaluate(
    golden: &Path,
    generated: &Path,
    mode: EvaluationMode,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = EvalConfig::load_or_default(config_path.as_deref())?;
    let evaluator = Evaluator::new(&config);

    let result = evaluator
        .evaluate(golden, generated, mode)
        .with_context(|| {
            format!(
                "Evaluation of {} against {} failed",
                generated.display(),
                golden.display()
            )
        })?;

    let run_dir = create_run_dir(output, &config)?;
    ReportGenerator::with_charts(config.report.charts).generate_evaluation(&result, &run_dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_evaluation_summary(&result);
        println!("Reports written to {}", run_dir.display());
    }

    Ok(())
}

/// @ai:intent Evaluate every model output, rank them and write the batch reports
/// @ai:effects fs:read, fs:write, io
async fn run_batch(
    golden: &Path,
    models: &[ModelOutput],
    mode: EvaluationMode,
    concurrent: bool,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = EvalConfig::load_or_default(config_path.as_deref())?;
    let evaluator = Arc::new(Evaluator::new(&config));

    let result = if concurrent || config.batch.concurrent {
        evaluator
            .evaluate_batch_concurrent(golden, models, mode)
            .await
    } else {
        evaluator.evaluate_batch(golden, models, mode)
    };

    let run_dir = create_run_dir(output, &config)?;
    ReportGenerator::with_charts(config.report.charts).generate_batch(&result, &run_dir)?;

    print_batch_summary(&result);
    println!("Reports written to {}", run_dir.display());

    Ok(())
}

/// @ai:intent Generate reports from a saved result file
/// @ai:effects fs:read, fs:write
fn generate_reports(results_path: &Path, output_dir: &Path) -> Result<()> {
    ReportGenerator::new().regenerate(results_path, output_dir)?;

    println!("Reports generated in {}", output_dir.display());
    Ok(())
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: &Path) -> Result<()> {
    let config = EvalConfig::default();
    config.save(output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Print the score table of one evaluation
/// @ai:effects io
fn print_evaluation_summary(result: &EvaluationResult) {
    let scores = result.scores();

    println!();
    println!("Evaluation Results");
    println!("==================");
    println!();

    if let Some(kind) = result.metadata_str("evaluation_type") {
        println!("{:<25} {}", "Evaluation type:", kind);
    }
    if let Some(Value::Number(n)) = result.metadata.get("total_files_matched") {
        println!("{:<25} {}", "Files matched:", n);
    }
    if let Some(error) = result.metadata_str("error") {
        println!("{:<25} {}", "Error:", error);
    }
    println!();

    println!("{:<25} {:>10}", "Dimension", "Score");
    println!("{}", "-".repeat(36));
    for (name, value) in scores.bounded_fields() {
        println!("{:<25} {:>9.1}%", name, value * 100.0);
    }
    println!("{:<25} {:>+10.2}", "complexity_delta", scores.complexity_delta);
    println!();

    if let Some(Value::Bool(false)) = result.metadata.get("application_level_reliable") {
        println!("Warning: few confident file matches, the application score may be unreliable");
        println!();
    }

    let recommendations: Vec<&str> = result
        .detailed_analysis
        .get("recommendations")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    if !recommendations.is_empty() {
        println!("Recommendations:");
        for recommendation in recommendations {
            println!("  - {}", recommendation);
        }
        println!();
    }
}

/// @ai:intent Print the ranking table of a batch
/// @ai:effects io
fn print_batch_summary(result: &BatchEvaluationResult) {
    println!();
    println!("Batch Evaluation Results");
    println!("========================");
    println!();

    println!("{:<6} {:<30} {:>10}", "Rank", "Model", "Score");
    println!("{}", "-".repeat(48));
    for (i, ranked) in result.rankings.iter().enumerate() {
        println!(
            "{:<6} {:<30} {:>9.1}%",
            i + 1,
            ranked.model,
            ranked.score * 100.0
        );
    }
    println!();

    let stats = &result.summary_statistics;
    println!(
        "Mean {:.3}  Median {:.3}  Std Dev {:.3}  Range {:.3}",
        stats.mean, stats.median, stats.std_dev, stats.range
    );

    if !result.excluded_models.is_empty() {
        println!();
        println!("Excluded (evaluation failed): {}", result.excluded_models.join(", "));
    }
    println!();
}
