//! tablexlsx CLI - HTML table to XLSX conversion tool
//!
//! A command-line tool for turning the first table of an HTML document into a
//! spreadsheet, or inspecting how that table lays out.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tablexlsx::render::JsonFormat;
use tablexlsx::ConvertOptions;

/// HTML table to XLSX conversion
#[derive(Parser)]
#[command(
    name = "tablexlsx",
    author = "iyulab",
    version,
    about = "Convert HTML tables into XLSX spreadsheets",
    long_about = "tablexlsx - Convert styled HTML tables into XLSX spreadsheets.\n\n\
                  Honors colspan/rowspan, <colgroup> widths, row heights and inline\n\
                  border, alignment and bold styling."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an HTML table to an XLSX workbook
    Convert {
        /// Input HTML file path
        input: PathBuf,

        /// Output file path (default: input with .xlsx extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Default inline CSS applied beneath every cell's own style
        #[arg(short, long)]
        style: Option<String>,

        /// Worksheet title
        #[arg(long)]
        sheet_title: Option<String>,

        /// Ignore <colgroup> column widths
        #[arg(long)]
        no_column_widths: bool,
    },

    /// Dump the converted worksheet as JSON
    Json {
        /// Input HTML file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Default inline CSS applied beneath every cell's own style
        #[arg(short, long)]
        style: Option<String>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Show the layout summary of the converted table
    Info {
        /// Input HTML file path
        input: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the converted grid as tab-separated text
    Preview {
        /// Input HTML file path
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
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Convert {
            input,
            output,
            style,
            sheet_title,
            no_column_widths,
        } => {
            let pb = create_spinner("Parsing HTML...");

            let mut options = build_options(style.as_deref()).with_column_widths(!no_column_widths);
            if let Some(title) = sheet_title {
                options = options.with_sheet_title(title);
            }

            let workbook = tablexlsx::convert_file(&input, &options)?;
            pb.set_message("Writing workbook...");

            let output = output.unwrap_or_else(|| input.with_extension("xlsx"));
            workbook.save(&output)?;

            pb.finish_and_clear();
            let sheet = workbook.active();
            println!(
                "{} Converted {} rows x {} columns: {}",
                "✓".green().bold(),
                sheet.max_row(),
                sheet.max_column(),
                output.display()
            );
        }

        Commands::Json {
            input,
            output,
            style,
            compact,
        } => {
            let pb = create_spinner("Parsing HTML...");

            let workbook = tablexlsx::convert_file(&input, &build_options(style.as_deref()))?;
            pb.set_message("Rendering to JSON...");

            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            let json = tablexlsx::render::to_json(&workbook, format)?;

            pb.finish_and_clear();
            write_output(output.as_deref(), &json)?;

            if let Some(path) = output {
                println!("{} Converted to JSON: {}", "✓".green().bold(), path.display());
            }
        }

        Commands::Info { input, json } => {
            let pb = create_spinner("Analyzing table...");
            let workbook = tablexlsx::convert_file(&input, &ConvertOptions::default())?;
            pb.finish_and_clear();

            let sheet = workbook.active();
            let styled = sheet.cells.values().filter(|c| !c.style.is_empty()).count();
            let filled = sheet.cells.values().filter(|c| c.value.is_some()).count();

            if json {
                let summary = serde_json::json!({
                    "file": file_name(&input),
                    "sheet": sheet.title,
                    "rows": sheet.max_row(),
                    "columns": sheet.max_column(),
                    "cells_with_values": filled,
                    "styled_cells": styled,
                    "merges": sheet.merges.iter().map(|m| m.to_a1()).collect::<Vec<_>>(),
                    "column_widths": sheet.column_widths,
                    "row_heights": sheet.row_heights,
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }

            println!("{}", "Table Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "File".bold(), file_name(&input));
            println!("{}: {}", "Sheet".bold(), sheet.title);
            println!("{}: {}", "Rows".bold(), sheet.max_row());
            println!("{}: {}", "Columns".bold(), sheet.max_column());
            println!("{}: {}", "Cells with values".bold(), filled);
            println!("{}: {}", "Styled cells".bold(), styled);

            if !sheet.merges.is_empty() {
                println!("\n{}", "Merged Ranges".cyan().bold());
                println!("{}", "─".repeat(40));
                for range in &sheet.merges {
                    println!("  {}", range);
                }
            }

            if !sheet.column_widths.is_empty() {
                println!("\n{}", "Column Widths".cyan().bold());
                println!("{}", "─".repeat(40));
                for (col, width) in &sheet.column_widths {
                    println!("  {}: {:.2}", tablexlsx::model::column_letters(*col), width);
                }
            }
        }

        Commands::Preview { input } => {
            let workbook = tablexlsx::convert_file(&input, &ConvertOptions::default())?;
            let text = tablexlsx::render::to_text(workbook.active());
            write_output(None, &text)?;
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn build_options(style: Option<&str>) -> ConvertOptions {
    match style {
        Some(css) => ConvertOptions::new().with_default_css(css),
        None => ConvertOptions::new(),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

fn print_version() {
    println!("{} {}", "tablexlsx".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("HTML table to XLSX conversion");
    println!();
    println!("Supported input: the first <table> of an HTML document");
    println!("Repository: https://github.com/iyulab/tablexlsx");
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_args() {
        let cli = Cli::try_parse_from([
            "tablexlsx",
            "-v",
            "convert",
            "in.html",
            "--style",
            "border: 1px solid black",
            "--no-column-widths",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Convert {
                input,
                output,
                style,
                no_column_widths,
                ..
            } => {
                assert_eq!(input, PathBuf::from("in.html"));
                assert!(output.is_none());
                assert_eq!(style.as_deref(), Some("border: 1px solid black"));
                assert!(no_column_widths);
            }
            _ => panic!("expected convert"),
        }
    }
}
