//! layout2txt - Lay out raw page dumps as plain text
//!
//! A command line tool that reads the raw per-character JSON dump of one or
//! more documents ("rawjson": blocks, lines, spans, characters) and writes
//! the page text with the original columns and indentation kept as
//! whitespace.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use gridtext_core::high_level::{ExtractOptions, extract_text_to_fp};
use gridtext_core::layout::LayoutParams;
use gridtext_core::model::RawDocument;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// A command line tool that lays out raw page dumps as plain text.
#[derive(Parser, Debug)]
#[command(name = "layout2txt")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Args {
    /// One or more paths to raw JSON page dumps
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: (),

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    // === Page selection ===
    /// A space-separated list of page numbers to lay out (1-indexed)
    #[arg(long = "page-numbers")]
    page_numbers: Option<String>,

    /// A comma-separated list of page numbers to lay out (1-indexed, legacy)
    #[arg(short = 'p', long = "pagenos")]
    pagenos: Option<String>,

    /// The maximum number of pages to lay out (0 = no limit)
    #[arg(short = 'm', long, default_value = "0")]
    maxpages: usize,

    // === Layout options ===
    /// Baselines closer than this many units share a row
    #[arg(short = 'G', long, default_value = "2")]
    grid: i64,

    /// Spans with a font size at or below this are ignored
    #[arg(long = "min-font-size", default_value = "3.0")]
    min_font_size: f64,

    /// Output line height relative to the average row pitch
    #[arg(short = 'L', long = "line-spacing", default_value = "1.2")]
    line_spacing: f64,

    // === Output options ===
    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Write a "Page N" header before each page
    #[arg(long = "show-pageno", action = ArgAction::SetTrue)]
    show_pageno: bool,
}

/// Build LayoutParams from command line arguments.
fn build_params(args: &Args) -> Result<LayoutParams> {
    let defaults = LayoutParams::default();
    let params = LayoutParams::new(
        args.grid,
        args.min_font_size,
        args.line_spacing,
        defaults.overprint_ratio,
        defaults.space_overlap_ratio,
        defaults.epsilon,
    )?;
    Ok(params)
}

/// Parse page numbers from either --page-numbers or -p option.
fn parse_page_numbers(args: &Args) -> Option<Vec<usize>> {
    const SPACE_SEPARATORS: &[char] = &[' ', ',', '\t'];
    const COMMA_SEPARATORS: &[char] = &[','];
    // --page-numbers takes precedence
    let (list, separators) = match (&args.page_numbers, &args.pagenos) {
        (Some(nums), _) => (nums.as_str(), SPACE_SEPARATORS),
        (None, Some(pagenos)) => (pagenos.as_str(), COMMA_SEPARATORS),
        (None, None) => return None,
    };
    let nums: Vec<usize> = list
        .split(separators)
        .filter_map(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .map(|n| n - 1)
        .collect();
    (!nums.is_empty()).then_some(nums)
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Lay out a single dump file.
fn process_file<W: Write>(path: &Path, writer: &mut W, options: &ExtractOptions) -> Result<()> {
    let data = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let doc = RawDocument::from_slice(&data)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let pages = extract_text_to_fp(&doc, writer, Some(options.clone()))
        .with_context(|| format!("failed to lay out {}", path.display()))?;
    info!(file = %path.display(), pages, total = doc.len(), "laid out");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let options = ExtractOptions {
        page_numbers: parse_page_numbers(&args),
        maxpages: args.maxpages,
        params: Some(build_params(&args)?),
        showpageno: args.show_pageno,
    };

    // Open output file or use stdout
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("failed to create output file {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };

    for path in &args.files {
        process_file(path, &mut output, &options)?;
    }

    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["layout2txt"];
        argv.extend_from_slice(extra);
        argv.push("doc.json");
        Args::parse_from(argv)
    }

    #[test]
    fn test_page_numbers_take_precedence() {
        let a = args(&["--page-numbers", "3 1", "-p", "2"]);
        assert_eq!(parse_page_numbers(&a), Some(vec![2, 0]));
    }

    #[test]
    fn test_legacy_pagenos() {
        let a = args(&["-p", "1,4"]);
        assert_eq!(parse_page_numbers(&a), Some(vec![0, 3]));
        assert_eq!(parse_page_numbers(&args(&[])), None);
    }

    #[test]
    fn test_params_from_flags() {
        let a = args(&["--grid", "3", "--line-spacing", "1.5"]);
        let params = build_params(&a).unwrap();
        assert_eq!(params.grid, 3);
        assert_eq!(params.line_spacing, 1.5);
        assert!(build_params(&args(&["--grid", "0"])).is_err());
    }
}
