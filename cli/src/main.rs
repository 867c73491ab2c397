//! pdfoutline CLI - recover a heading outline from a PDF

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::{
    outline_files_with, render, JsonFormat, LopdfBackend, Outline, Outliner, PageSelection, Rank,
    SizeRankMap, SizeStatistics,
};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Build a title/h1/h2/h3 outline from PDF font sizes", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output JSON file (default: output/<name>.json)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    opts: OutlineArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Flags shared by every command that reads a PDF.
#[derive(Args, Clone, Default)]
struct OutlineArgs {
    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long, global = true)]
    pages: Option<String>,

    /// Skip unreadable pages instead of failing
    #[arg(long, global = true)]
    lenient: bool,

    /// Keep headings and text that have no parent section
    #[arg(long, global = true)]
    attach_orphans: bool,
}

impl OutlineArgs {
    fn outliner(&self) -> Result<Outliner, Box<dyn std::error::Error>> {
        let mut outliner = Outliner::new();
        if let Some(pages) = &self.pages {
            outliner = outliner.with_pages(PageSelection::parse(pages)?);
        }
        if self.lenient {
            outliner = outliner.lenient();
        }
        if self.attach_orphans {
            outliner = outliner.attach_orphans();
        }
        Ok(outliner)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write the outline as JSON
    Json {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Write the outline as Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Dump the extracted text runs as JSON
    Runs {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show the font size histogram and heading tiers
    Sizes {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Outline many PDFs into a directory
    Batch {
        /// Input PDF files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "output")]
        output: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let opts = cli.opts;

    let result = match cli.command {
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact, &opts),
        Some(Commands::Markdown { input, output }) => {
            cmd_markdown(&input, output.as_deref(), &opts)
        }
        Some(Commands::Runs { input, output }) => cmd_runs(&input, output.as_deref(), &opts),
        Some(Commands::Sizes { input }) => cmd_sizes(&input, &opts),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Batch {
            inputs,
            output,
            compact,
        }) => cmd_batch(&inputs, &output, compact, &opts),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: outline if input is provided
            if let Some(input) = cli.input {
                cmd_outline(&input, cli.output.as_deref(), &opts)
            } else {
                println!("{}", "Usage: pdfoutline <FILE> [OUTPUT]".yellow());
                println!("       pdfoutline --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn default_output(input: &Path, dir: &Path, extension: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    dir.join(format!("{}.{}", stem, extension))
}

/// Output paths for a batch, one per input, in input order.
///
/// Inputs that share a file stem get `-2`, `-3`, ... suffixes so no output
/// overwrites another.
fn batch_targets(inputs: &[PathBuf], dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut used = HashSet::new();
    inputs
        .iter()
        .map(|input| {
            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            let mut name = stem.to_string();
            let mut n = 1;
            while !used.insert(name.clone()) {
                n += 1;
                name = format!("{}-{}", stem, n);
            }
            dir.join(format!("{}.{}", name, extension))
        })
        .collect()
}

fn write_output(path: &Path, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn emit(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        write_output(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    opts: &OutlineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let outliner = opts.outliner()?;
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(input, Path::new("output"), "json"));

    log::debug!("outline {} -> {}", input.display(), output.display());

    println!("{} {}", "Reading".cyan(), input.display());
    let runs = outliner.extract_runs_file(input)?;
    println!("  {} {} text runs", "├─".dimmed(), runs.len());

    println!("{}", "Analyzing font sizes...".cyan());
    let ranks = pdfoutline::outline::classify_sizes(&runs);
    for (size, rank) in ranks.iter() {
        println!("  {} {:<6} {:.1}pt", "├─".dimmed(), rank, size);
    }

    println!("{}", "Building outline...".cyan());
    let outline = pdfoutline::outline::build_outline_with_options(
        &runs,
        &ranks,
        outliner.outline_options(),
    );
    print_summary(&outline);

    println!("{}", "Saving JSON...".cyan());
    let json = render::to_json(&outline, JsonFormat::Pretty)?;
    write_output(&output, &json)?;
    log::debug!("wrote {} bytes to {}", json.len(), output.display());

    println!("{} {}", "Done! Saved to".green().bold(), output.display());
    Ok(())
}

fn print_summary(outline: &Outline) {
    let [h1, h2, h3] = outline.section_counts();
    let title = if outline.title.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        outline.title.clone()
    };
    println!("  {} {}: {}", "├─".dimmed(), "Title".bold(), title);
    println!(
        "  {} {} h1, {} h2, {} h3, {} bullets",
        "└─".dimmed(),
        h1,
        h2,
        h3,
        outline.bullet_count()
    );
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    opts: &OutlineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = opts.outliner()?.outline_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&outline, format)?;
    emit(output, &json)
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    opts: &OutlineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = opts.outliner()?.outline_file(input)?;
    let markdown = render::to_markdown(&outline);
    emit(output, &markdown)
}

fn cmd_runs(
    input: &Path,
    output: Option<&Path>,
    opts: &OutlineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let runs = opts.outliner()?.extract_runs_file(input)?;
    let json = serde_json::to_string_pretty(&runs)?;
    emit(output, &json)
}

fn cmd_sizes(input: &Path, opts: &OutlineArgs) -> Result<(), Box<dyn std::error::Error>> {
    let runs = opts.outliner()?.extract_runs_file(input)?;
    let stats = SizeStatistics::from_runs(&runs);
    let ranks = SizeRankMap::from_runs(&runs);

    println!("{}", "Font Sizes".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let widest = stats.iter().map(|(_, count)| count).max().unwrap_or(0);
    for (size, count) in stats.iter() {
        let rank = ranks.get(size);
        let bar_len = if widest == 0 { 0 } else { count * 24 / widest };
        let label = format!("{:<6}", rank);
        let label = match rank {
            Rank::Body => label.dimmed(),
            _ => label.green().bold(),
        };
        println!(
            "{:>6.1}pt {} {:>6} {}",
            size,
            label,
            count,
            "█".repeat(bar_len.max(1)).blue()
        );
    }

    println!();
    println!("{}: {}", "Runs".bold(), runs.len());
    println!("{}: {}", "Distinct sizes".bold(), stats.distinct_sizes());
    if let Some(size) = stats.most_common() {
        println!("{}: {:.1}pt", "Most common".bold(), size);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let backend = LopdfBackend::load_file(input)?;
    let info = backend.info();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), info.pdf_version);
    println!("{}: {}", "Pages".bold(), info.page_count);
    println!(
        "{}: {}",
        "Encrypted".bold(),
        if info.encrypted { "Yes" } else { "No" }
    );

    if let Some(ref title) = info.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = info.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref creator) = info.creator {
        println!("{}: {}", "Creator".bold(), creator);
    }
    if let Some(ref producer) = info.producer {
        println!("{}: {}", "Producer".bold(), producer);
    }
    if let Some(ref created) = info.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = info.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    compact: bool,
    opts: &OutlineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let outliner = opts.outliner()?;
    fs::create_dir_all(output_dir)?;
    log::debug!("batch of {} files into {}", inputs.len(), output_dir.display());

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Outlining...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let targets = batch_targets(inputs, output_dir, "json");
    let results = outline_files_with(inputs, &outliner, |path, result| {
        if let Err(e) = result {
            log::debug!("{} failed: {}", path.display(), e);
        }
        pb.inc(1);
    });

    let mut failed = 0;
    for ((path, result), target) in results.into_iter().zip(&targets) {
        match result.and_then(|outline| render::to_json(&outline, format)) {
            Ok(json) => {
                fs::write(target, json)?;
                log::debug!("{} -> {}", path.display(), target.display());
            }
            Err(e) => {
                failed += 1;
                pb.println(format!("{} {}: {}", "Failed".red(), path.display(), e));
            }
        }
    }

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} of {} files written to {}",
        "Done!".green().bold(),
        inputs.len() - failed,
        inputs.len(),
        output_dir.display()
    );

    if failed > 0 {
        return Err(format!("{} file(s) failed", failed).into());
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF heading outline tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_uses_stem() {
        let path = default_output(Path::new("docs/report.pdf"), Path::new("output"), "json");
        assert_eq!(path, PathBuf::from("output/report.json"));
    }

    #[test]
    fn test_batch_targets_unique_for_shared_stems() {
        let inputs = vec![
            PathBuf::from("a/report.pdf"),
            PathBuf::from("b/report.pdf"),
            PathBuf::from("notes.pdf"),
            PathBuf::from("c/report.PDF"),
        ];
        let targets = batch_targets(&inputs, Path::new("out"), "json");
        assert_eq!(
            targets,
            vec![
                PathBuf::from("out/report.json"),
                PathBuf::from("out/report-2.json"),
                PathBuf::from("out/notes.json"),
                PathBuf::from("out/report-3.json"),
            ]
        );
    }

    #[test]
    fn test_batch_targets_skip_existing_suffix() {
        let inputs = vec![
            PathBuf::from("report-2.pdf"),
            PathBuf::from("x/report.pdf"),
            PathBuf::from("y/report.pdf"),
        ];
        let targets = batch_targets(&inputs, Path::new("out"), "json");
        assert_eq!(
            targets,
            vec![
                PathBuf::from("out/report-2.json"),
                PathBuf::from("out/report.json"),
                PathBuf::from("out/report-3.json"),
            ]
        );
        let distinct: HashSet<_> = targets.iter().collect();
        assert_eq!(distinct.len(), inputs.len());
    }
}
