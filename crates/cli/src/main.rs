//! CLI tool for computing change chunks between text files.
//!
//! `compare` diffs two files and prints their chunks; `batch` diffs two
//! directory trees file by file and writes one JSON line per changed file.

mod pipeline;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

use linediff_core::{
    chunk_text, compare_strings, flatten_position_changes, position_changes, translate_position,
    CompareConfig,
};

use crate::pipeline::{compare_trees, write_jsonl_output};

/// Compute minimal change chunks between texts.
#[derive(Parser, Debug)]
#[command(name = "linediff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare two files
    Compare {
        /// Original file
        old: PathBuf,

        /// Changed file
        new: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Old-text positions to translate into new-text positions
        #[arg(long)]
        translate: Vec<usize>,

        #[command(flatten)]
        options: CompareOptions,
    },

    /// Compare two directory trees file by file
    Batch {
        /// Root directory of the original files
        #[arg(long)]
        old_root: PathBuf,

        /// Root directory of the changed files
        #[arg(long)]
        new_root: PathBuf,

        /// JSONL output file
        #[arg(long)]
        output: PathBuf,

        #[command(flatten)]
        options: CompareOptions,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Chunks and position changes as JSON
    Json,
    /// Flat (start, end_old, end_new) triples, one per line
    Triples,
    /// Human-readable changed texts
    Summary,
}

#[derive(Args, Debug)]
struct CompareOptions {
    /// JSON file with comparison settings; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Changed line regions shorter than this are re-diffed per character
    #[arg(long)]
    chunk_len_limit: Option<usize>,

    /// Largest diff table (in cells) a single pass may allocate
    #[arg(long)]
    max_table_cells: Option<usize>,

    /// Run nested per-character diffs in parallel
    #[arg(long)]
    parallel: bool,
}

impl CompareOptions {
    fn to_config(&self) -> Result<CompareConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            None => CompareConfig::default(),
        };
        if let Some(limit) = self.chunk_len_limit {
            config.chunk_len_limit = limit;
        }
        if let Some(cells) = self.max_table_cells {
            config.max_table_cells = cells;
        }
        config.parallel |= self.parallel;
        Ok(config)
    }
}

fn run_compare(
    old_path: &Path,
    new_path: &Path,
    format: OutputFormat,
    translate: &[usize],
    config: &CompareConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let old = std::fs::read_to_string(old_path)?;
    let new = std::fs::read_to_string(new_path)?;

    let chunks = compare_strings(&old, &new, config)?;
    let changes = position_changes(&chunks);
    tracing::info!(chunks = chunks.len(), "compared {:?} and {:?}", old_path, new_path);

    match format {
        OutputFormat::Json => {
            let translated: Vec<_> = translate
                .iter()
                .map(|&position| {
                    serde_json::json!({
                        "position": position,
                        "translated": translate_position(&changes, position),
                    })
                })
                .collect();
            let output = serde_json::json!({
                "old": old_path.to_string_lossy(),
                "new": new_path.to_string_lossy(),
                "config": config,
                "chunks": chunks,
                "position_changes": flatten_position_changes(&changes),
                "translated": translated,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Triples => {
            for change in &changes {
                println!("{} {} {}", change.change_start, change.change_end_old, change.change_end_new);
            }
            for &position in translate {
                println!("# {} -> {}", position, translate_position(&changes, position));
            }
        }
        OutputFormat::Summary => {
            for chunk in &chunks {
                println!(
                    "@@ -{},{} +{},{} @@",
                    chunk.a_start, chunk.a_len, chunk.b_start, chunk.b_len
                );
                if chunk.a_len > 0 {
                    println!("- {:?}", chunk_text(&old, chunk.a_start, chunk.a_len));
                }
                if chunk.b_len > 0 {
                    println!("+ {:?}", chunk_text(&new, chunk.b_start, chunk.b_len));
                }
            }
            println!("\n[summary]");
            println!("  Chunks: {}", chunks.len());
            for &position in translate {
                println!("  Position {} -> {}", position, translate_position(&changes, position));
            }
        }
    }

    Ok(())
}

fn run_batch(
    old_root: &Path,
    new_root: &Path,
    output: &Path,
    config: &CompareConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Comparing {:?} against {:?}...", old_root, new_root);
    let (results, summary) = compare_trees(old_root, new_root, config);

    println!("Writing output to {:?}...", output);
    let written = write_jsonl_output(&results, output)?;

    let metadata_path = output.with_extension("metadata.json");
    let metadata = serde_json::json!({
        "config": config,
        "roots": {
            "old": old_root.to_string_lossy(),
            "new": new_root.to_string_lossy(),
        },
        "counts": summary,
        "output": output.to_string_lossy(),
    });
    std::fs::write(&metadata_path, serde_json::to_string_pretty(&metadata)?)?;

    println!("\n[summary]");
    println!("  Files: {}", summary.total_files);
    println!("  Added: {}", summary.added);
    println!("  Removed: {}", summary.removed);
    println!("  Modified: {}", summary.modified);
    println!("  Unchanged: {}", summary.unchanged);
    println!("  Failed: {}", summary.failed);
    println!("  Chunks: {}", summary.total_chunks);
    println!("  Records written: {}", written);
    println!("  Metadata: {:?}", metadata_path);

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only results
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    match &cli.command {
        Command::Compare {
            old,
            new,
            format,
            translate,
            options,
        } => run_compare(old, new, *format, translate, &options.to_config()?),
        Command::Batch {
            old_root,
            new_root,
            output,
            options,
        } => run_batch(old_root, new_root, output, &options.to_config()?),
    }
}
