//! gwas-adjust - GWAS multiple-testing correction CLI
//!
//! Command-line interface for splitting association results by trait and
//! correcting, ranking and summarizing per-trait p-values.

use clap::{Parser, Subcommand};
use gwas_adjust::data::RunParameters;
use gwas_adjust::error::Result;
use gwas_adjust::logging::init_tracing;
use gwas_adjust::partition::split_traits;
use gwas_adjust::pipeline::{
    run_adjust, select_stages, AdjustOptions, Pipeline, PipelineConfig, Stage,
};
use std::path::PathBuf;

/// GWAS post-association correction and reporting
#[derive(Parser)]
#[command(name = "gwas-adjust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Correct per-trait p-values and write full, top-N and summary tables
    Adjust {
        /// Directory containing per-trait tables
        input_dir: PathBuf,

        /// Regular expression matching per-trait file names
        /// (first capture group, if any, names the trait)
        pattern: String,

        /// Directory for adj_p_<trait>.csv and top_<N>_<trait>.csv
        output_dir: PathBuf,

        /// Path of the cross-trait significance summary
        summary_file: PathBuf,

        /// Total number of markers tested (Bonferroni denominator)
        n_tests: usize,

        /// Rows kept per trait in the ranked export
        top_n: usize,

        /// Write a JSON run report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Split a tab-delimited association export into one CSV per trait
    Split {
        /// Tab-delimited table with a 'Trait' column
        input: PathBuf,

        /// Directory receiving the per-trait tables
        output_dir: PathBuf,

        /// File name prefix for per-trait tables
        #[arg(long, default_value = "mlm_stats_")]
        prefix: String,
    },

    /// Run the stages configured in a YAML file
    Run {
        /// Path to pipeline configuration YAML
        #[arg(short, long)]
        config: PathBuf,

        /// List the stages that would run without executing them
        #[arg(long)]
        dry_run: bool,

        /// Run only these stages (trait_split, trait_adjust; comma-separated or repeated)
        #[arg(long, num_args = 1.., value_delimiter = ',')]
        steps: Option<Vec<String>>,

        /// List available and configured stages, then exit
        #[arg(long)]
        list_steps: bool,
    },

    /// Generate an example pipeline configuration
    Example {
        /// Output path for the example YAML
        #[arg(short, long, default_value = "pipeline.yaml")]
        output: PathBuf,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Adjust {
            input_dir,
            pattern,
            output_dir,
            summary_file,
            n_tests,
            top_n,
            report,
        } => cmd_adjust(
            input_dir,
            &pattern,
            output_dir,
            summary_file,
            n_tests,
            top_n,
            report,
        ),

        Commands::Split {
            input,
            output_dir,
            prefix,
        } => cmd_split(&input, &output_dir, &prefix),

        Commands::Run {
            config,
            dry_run,
            steps,
            list_steps,
        } => cmd_run(&config, dry_run, steps.as_deref(), list_steps),

        Commands::Example { output } => cmd_example(&output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Correct every matching trait table
fn cmd_adjust(
    input_dir: PathBuf,
    pattern: &str,
    output_dir: PathBuf,
    summary_file: PathBuf,
    n_tests: usize,
    top_n: usize,
    report: Option<PathBuf>,
) -> Result<()> {
    let params = RunParameters::new(n_tests, top_n)?;
    let mut options = AdjustOptions::new(input_dir, output_dir, summary_file, params).pattern(pattern);
    if let Some(path) = report {
        options = options.report(path);
    }

    let outcome = run_adjust(&options)?;
    print!("{}", outcome.report);
    Ok(())
}

/// Split a combined table by trait
fn cmd_split(input: &PathBuf, output_dir: &PathBuf, prefix: &str) -> Result<()> {
    let written = split_traits(input, output_dir, prefix)?;
    for w in &written {
        println!("{}\t{}\t{}", w.trait_name, w.n_rows, w.path.display());
    }
    Ok(())
}

/// Run a pipeline from configuration
fn cmd_run(
    config_path: &PathBuf,
    dry_run: bool,
    steps: Option<&[String]>,
    list_steps: bool,
) -> Result<()> {
    let config = PipelineConfig::from_file(config_path)?;
    let pipeline = Pipeline::from_config(config);

    if list_steps {
        let available: Vec<_> = Stage::ALL.iter().map(|s| s.name()).collect();
        let configured: Vec<_> = pipeline
            .configured_stages()
            .iter()
            .map(|s| s.name())
            .collect();
        println!("Available steps: {}", available.join(", "));
        println!("Configured steps: {}", configured.join(", "));
        return Ok(());
    }

    let selection = steps.map(select_stages).transpose()?;
    if dry_run {
        let stages = selection
            .clone()
            .unwrap_or_else(|| pipeline.configured_stages());
        for stage in stages {
            println!("{}", stage.name());
        }
    }

    let outcome = pipeline.run(selection.as_deref(), dry_run)?;
    if let Some(split) = &outcome.split {
        println!("Split {} traits", split.len());
    }
    if let Some(adjust) = &outcome.adjust {
        print!("{}", adjust.report);
    }
    Ok(())
}

/// Write an example pipeline configuration
fn cmd_example(output_path: &PathBuf) -> Result<()> {
    let yaml = PipelineConfig::example().to_yaml()?;
    std::fs::write(output_path, &yaml)?;

    eprintln!("Wrote example pipeline to {:?}", output_path);
    eprintln!();
    eprintln!("Contents:");
    println!("{}", yaml);

    Ok(())
}
