//! # logmerge CLI
//!
//! Command-line interface for the logmerge library.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use logmerge::LogMergeError;
use logmerge::cli::Args;
use logmerge::config::Config;
use logmerge::core::{merge_lines, write_lines};
use logmerge::input::{LineSource, discover_inputs, remove_inputs};

fn main() {
    let args = <Args as ClapParser>::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), LogMergeError> {
    let total_start = Instant::now();
    let config = Config::load(&args.config)?;
    tracing::debug!(path = %args.config.display(), modes = config.modes.len(), "loaded configuration");

    if args.list_modes {
        println!("Available modes:");
        for name in config.mode_names() {
            println!("   {}", name);
        }
        return Ok(());
    }

    // clap enforces MODE unless --list-modes
    let mode_name = args.mode.as_deref().unwrap_or_default();
    let mode = config.mode(mode_name)?;
    let pattern = mode.timestamp_pattern()?;
    let output_path = args.output.clone().unwrap_or_else(|| mode.export_file());

    // Print header
    println!("📦 logmerge v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("🏷️  Mode:    {}", mode.name);
    println!("🕒 Format:  {}", mode.date_format);
    println!("💾 Output:  {}", output_path.display());
    println!();

    // Step 1: Collect inputs
    let inputs: Vec<PathBuf> = if args.inputs.is_empty() {
        println!(
            "🔎 Looking for '<n>-{}' in {}...",
            mode.file_pattern,
            mode.export_path.display()
        );
        discover_inputs(&mode.export_path, &mode.file_pattern)?
    } else {
        args.inputs.clone()
    };

    println!("📖 Reading {} files...", inputs.len());
    let read_start = Instant::now();
    let source = LineSource::from_files(&inputs)?;
    println!(
        "   Read {} lines ({:.2}s)",
        source.lines().len(),
        read_start.elapsed().as_secs_f64()
    );

    // Step 2: Chunk and merge
    println!("🔀 Merging records...");
    let merge_start = Instant::now();
    let (merged, stats) = match merge_lines(source.lines(), &pattern, &args.merge_config()) {
        Ok(result) => result,
        Err(e) => return Err(report_location(e, &source)),
    };
    println!(
        "   {} records in chronological order ({:.2}s)",
        stats.records,
        merge_start.elapsed().as_secs_f64()
    );

    // Step 3: Write output
    println!("💾 Writing output...");
    let write_start = Instant::now();
    let output = write_lines(&output_path, &merged)?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    if args.remove_inputs {
        remove_inputs(&inputs)?;
        println!("🧹 Removed {} input files", inputs.len());
    }

    println!();
    println!("✅ Done! Output saved to {}", output_path.display());

    // Summary
    println!();
    println!("📊 Summary:");
    println!("   Files:     {}", inputs.len());
    println!("   Records:   {}", stats.records);
    println!("   Lines:     {} lines saved", output.lines);
    println!("   Size:      {:.2} MiB", output.megabytes());

    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

/// Prints the file and line a malformed record came from before handing the
/// error back.
fn report_location(err: LogMergeError, source: &LineSource) -> LogMergeError {
    if let Some(location) = err.line_index().and_then(|i| source.locate(i)) {
        eprintln!(
            "📍 At {}:{}",
            location.path.display(),
            location.line
        );
    }
    err
}
