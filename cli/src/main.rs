//! paramd CLI - paragraph-referenced Markdown from Word documents
//!
//! A command-line tool that turns DOCX body paragraphs into Markdown rows
//! with reconstructed list numbering.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use paramd::render::{JsonFormat, RenderOptions, DEFAULT_MAX_HEADER_WORDS, DEFAULT_START_INDEX};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Output path meaning "write to stdout".
const STDOUT_MARKER: &str = "-";

/// DOCX paragraphs to Markdown rows with list labels
#[derive(Parser)]
#[command(
    name = "paramd",
    author = "iyulab",
    version,
    about = "Extract DOCX paragraphs as referenced Markdown rows",
    long_about = "paramd - DOCX paragraph extraction with reconstructed list numbering.\n\n\
                  Every body paragraph becomes a Markdown table row carrying a sequential id,\n\
                  the header it falls under and the list label Word would display."
)]
struct Cli {
    /// Log progress at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document to the paragraph row table
    #[command(visible_alias = "md")]
    Markdown {
        /// Input file path
        input: PathBuf,

        /// Output file path, "-" for stdout (default: <input>_output.md)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// para_id of the first row
        #[arg(long, default_value_t = DEFAULT_START_INDEX)]
        start_index: u64,

        /// Paragraphs with at most this many words are read as headers
        #[arg(long, default_value_t = DEFAULT_MAX_HEADER_WORDS)]
        max_header_words: usize,

        /// Omit the label column
        #[arg(long)]
        no_labels: bool,

        /// Skip the structured pass and write plain text
        #[arg(long)]
        plain: bool,
    },

    /// Convert a document to plain text
    Text {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the paragraph rows as JSON
    Json {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// para_id of the first row
        #[arg(long, default_value_t = DEFAULT_START_INDEX)]
        start_index: u64,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Print the list label of every paragraph
    Labels {
        /// Input file path
        input: PathBuf,
    },

    /// Show paragraph, list and table counts
    Info {
        /// Input file path
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Markdown {
            input,
            output,
            start_index,
            max_header_words,
            no_labels,
            plain,
        } => {
            let output = output.unwrap_or_else(|| default_output_path(&input));
            log::debug!("converting {} to {}", input.display(), output.display());
            let pb = create_spinner("Converting document...");

            let content = if plain {
                paramd::extract_text(&input)?
            } else {
                let options = RenderOptions::new()
                    .with_start_index(start_index)
                    .with_max_header_words(max_header_words)
                    .with_labels(!no_labels);
                paramd::convert_file(&input, &options)?
            };

            pb.finish_and_clear();
            let target = file_target(&output);
            write_output(target, &content)?;

            if let Some(path) = target {
                println!(
                    "{} Markdown file generated: {}",
                    "✓".green().bold(),
                    path.display()
                );
            }
        }

        Commands::Text { input, output } => {
            let pb = create_spinner("Extracting text...");
            let text = paramd::extract_text(&input)?;

            pb.finish_and_clear();
            write_output(output.as_deref(), &text)?;

            if let Some(path) = output {
                println!("{} Converted to text: {}", "✓".green().bold(), path.display());
            }
        }

        Commands::Json {
            input,
            output,
            start_index,
            compact,
        } => {
            let pb = create_spinner("Parsing document...");

            let doc = paramd::parse_file(&input)?;
            pb.set_message("Rendering rows...");

            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            let options = RenderOptions::new().with_start_index(start_index);
            let json = paramd::render::rows_to_json(&doc, &options, format)?;

            pb.finish_and_clear();
            write_output(output.as_deref(), &json)?;

            if let Some(path) = output {
                println!("{} Converted to JSON: {}", "✓".green().bold(), path.display());
            }
        }

        Commands::Labels { input } => {
            let doc = paramd::parse_file(&input)?;
            let stdout = io::stdout();
            let mut handle = stdout.lock();

            for (label, text) in paramd::label_paragraphs(&doc) {
                if label.is_empty() {
                    writeln!(handle, "{:>10}  {}", "", text)?;
                } else {
                    writeln!(handle, "{:>10}  {}", label.cyan(), text)?;
                }
            }
        }

        Commands::Info { input } => {
            let pb = create_spinner("Analyzing document...");
            let doc = paramd::parse_file(&input)?;
            pb.finish_and_clear();

            let paragraphs = doc.paragraphs().filter(|p| !p.is_empty()).count();
            let numbered = doc
                .paragraphs()
                .filter(|p| !p.is_empty() && p.numbering.is_numbered())
                .count();

            println!("{}", "Document Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            println!("{}: {}", "Paragraphs".bold(), paragraphs);
            println!("{}: {}", "List paragraphs".bold(), numbered);
            println!("{}: {}", "Tables".bold(), doc.tables().count());
            println!("{}: {}", "Numbering definitions".bold(), doc.numbering.len());
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_version() {
    println!("{} {}", "paramd".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("DOCX paragraphs to Markdown rows with reconstructed list numbering");
    println!();
    println!("Supported formats: DOCX");
    println!("Repository: https://github.com/iyulab/paramd");
}

/// `<input stem>_output.md` next to the input.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{}_output.md", stem))
}

/// `None` when the output goes to stdout.
fn file_target(output: &Path) -> Option<&Path> {
    if output.as_os_str() == STDOUT_MARKER {
        None
    } else {
        Some(output)
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
