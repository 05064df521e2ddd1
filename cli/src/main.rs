//! unvsdx CLI - Visio diagram conversion tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use colored::Colorize;

use unvsdx::{JsonFormat, Unvsdx, UnvsdxResult};

#[derive(Parser)]
#[command(name = "unvsdx")]
#[command(author = "iyulab")]
#[command(version)]
#[command(
    about = "Convert Visio (.vsdx) files to Markdown with Mermaid diagrams",
    long_about = None
)]
#[command(after_help = "Examples:
  unvsdx diagram.vsdx
  unvsdx diagram.vsdx --output diagram.md
  unvsdx diagram.vsdx --format json --output diagram.json
  unvsdx diagram.vsdx --format both --output diagram
  unvsdx diagram.vsdx -v")]
struct Cli {
    /// Path to the Visio (.vsdx) file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output file path (default: print to stdout)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "markdown")]
    format: Format,

    /// How deep nested shapes are followed
    #[arg(long, value_name = "N", default_value_t = unvsdx::extract::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Markdown report with Mermaid diagrams
    Markdown,
    /// Structured JSON record
    Json,
    /// Markdown and JSON
    Both,
}

const BANNER_WIDTH: usize = 80;

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let result = Unvsdx::new()
        .with_max_depth(cli.max_depth)
        .with_json_format(JsonFormat::Pretty)
        .parse(&cli.input)?;

    if result.has_warnings() {
        log::debug!("{} problems recovered during extraction", result.warnings.len());
    }

    match &cli.output {
        Some(path) => write_outputs(&result, cli.format, path),
        None => {
            print_outputs(&result, cli.format)?;
            Ok(())
        }
    }
}

fn write_outputs(
    result: &UnvsdxResult,
    format: Format,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        Format::Markdown => {
            fs::write(output, result.to_markdown())?;
            println!("{} {}", "Markdown saved to:".green(), output.display());
        }
        Format::Json => {
            fs::write(output, result.to_json()?)?;
            println!("{} {}", "JSON saved to:".green(), output.display());
        }
        Format::Both => {
            let (md_path, json_path) = sibling_paths(output);
            fs::write(&md_path, result.to_markdown())?;
            println!("{} {}", "Markdown saved to:".green(), md_path.display());
            fs::write(&json_path, result.to_json()?)?;
            println!("{} {}", "JSON saved to:".green(), json_path.display());
        }
    }
    Ok(())
}

fn print_outputs(result: &UnvsdxResult, format: Format) -> unvsdx::Result<()> {
    match format {
        Format::Markdown => println!("{}", result.to_markdown()),
        Format::Json => println!("{}", result.to_json()?),
        Format::Both => {
            println!("{}", result.to_markdown());
            println!("{}", json_banner());
            println!("{}", result.to_json()?);
        }
    }
    Ok(())
}

/// `.md` and `.json` paths next to the requested output path.
fn sibling_paths(output: &Path) -> (PathBuf, PathBuf) {
    (output.with_extension("md"), output.with_extension("json"))
}

fn json_banner() -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!("\n{}\nJSON Output:\n{}\n", rule, rule)
}
