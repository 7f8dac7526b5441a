//! mecgen CLI - Convert localization sheets to MEC CoreMetadata XML
//!
//! # Commands
//!
//! ```bash
//! mecgen convert titles.csv -o MEC_Metadata.xml   # CSV -> MEC XML
//! mecgen check MEC_Metadata.xml                    # Well-formedness check
//! mecgen precheck titles.csv                       # Summary length / art checks
//! mecgen parse titles.csv                          # Dump the loaded table as JSON
//! ```

use clap::{Parser, Subcommand};
use mecgen::pipeline::{parse_art_list, parse_delimiter};
use mecgen::{convert_csv, highlight, parse_bytes, precheck, ConvertOptions, Rendered};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mecgen")]
#[command(about = "Convert localization sheets to MEC CoreMetadata XML", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a CSV file to MEC XML
    Convert {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// CSV delimiter (auto-detect if not specified; "tab" for tabs)
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Comma-separated art kinds every language row must carry
        #[arg(long)]
        require_art: Option<String>,

        /// Write the document even when pre-checks report issues
        #[arg(long)]
        force: bool,
    },

    /// Check that an XML file is well-formed
    Check {
        /// Input XML file
        input: PathBuf,
    },

    /// Run pre-checks on a CSV file without building
    Precheck {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified; "tab" for tabs)
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Comma-separated art kinds every language row must carry
        #[arg(long)]
        require_art: Option<String>,
    },

    /// Parse a CSV file and output the table as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified; "tab" for tabs)
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            delimiter,
            require_art,
            force,
        } => {
            let options = options_from(delimiter.as_deref(), require_art.as_deref());
            cmd_convert(&input, output.as_deref(), &options, force)
        }

        Commands::Check { input } => cmd_check(&input),

        Commands::Precheck {
            input,
            delimiter,
            require_art,
        } => {
            let options = options_from(delimiter.as_deref(), require_art.as_deref());
            cmd_precheck(&input, &options)
        }

        Commands::Parse {
            input,
            delimiter,
            output,
        } => cmd_parse(&input, delimiter.as_deref().and_then(parse_delimiter), output.as_deref()),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Environment defaults overridden by command-line flags.
fn options_from(delimiter: Option<&str>, require_art: Option<&str>) -> ConvertOptions {
    let mut options = ConvertOptions::from_env();
    if let Some(d) = delimiter.and_then(parse_delimiter) {
        options.delimiter = Some(d);
    }
    if let Some(list) = require_art {
        options.required_art = parse_art_list(list);
    }
    options
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    options: &ConvertOptions,
    force: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    eprintln!("📄 Converting: {}", input.display());

    // Progress and warnings are emitted through tracing by the conversion log
    let result = convert_csv(input, options)?;

    match &result.rendered {
        Rendered::Malformed(diagnostic) => {
            eprintln!("\n❌ Generated XML is not well-formed:\n");
            eprintln!("{}", diagnostic.preview);
            Ok(false)
        }
        Rendered::WellFormed(xml) => {
            if !result.is_deliverable(!force) {
                eprintln!(
                    "\n❌ {} pre-check issue(s); nothing written (use --force to write anyway)",
                    result.issues.len()
                );
                return Ok(false);
            }
            write_output(xml, output)?;
            eprintln!("✅ XML structure is well-formed");
            Ok(true)
        }
    }
}

fn cmd_check(input: &Path) -> Result<bool, Box<dyn std::error::Error>> {
    eprintln!("✔️  Checking: {}", input.display());

    let content = fs::read_to_string(input)?;
    match highlight(content) {
        Rendered::WellFormed(_) => {
            eprintln!("✅ Well-formed");
            Ok(true)
        }
        Rendered::Malformed(diagnostic) => {
            eprintln!("{}", diagnostic.preview);
            Ok(false)
        }
    }
}

fn cmd_precheck(input: &Path, options: &ConvertOptions) -> Result<bool, Box<dyn std::error::Error>> {
    eprintln!("🔍 Pre-checking: {}", input.display());

    let bytes = fs::read(input)?;
    let parsed = parse_bytes(&bytes, options.delimiter)?;
    let issues = precheck(&parsed.table, &options.required_art);

    if issues.is_empty() {
        eprintln!("✅ No issues in {} rows", parsed.table.len());
        return Ok(true);
    }

    for issue in &issues {
        println!("{}", issue);
    }
    eprintln!("\n📊 {} issue(s) in {} rows", issues.len(), parsed.table.len());
    Ok(false)
}

fn cmd_parse(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<bool, Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let bytes = fs::read(input)?;
    let result = parse_bytes(&bytes, delimiter)?;

    eprintln!("   Encoding: {}", result.encoding);
    eprintln!(
        "   Delimiter: '{}'{}",
        format_delimiter(result.delimiter),
        if delimiter.is_none() { " (auto-detected)" } else { "" }
    );
    eprintln!("   Columns: {}", result.table.columns().join(", "));
    eprintln!("✅ Parsed {} rows", result.table.len());

    let json = serde_json::to_string_pretty(&result.table)?;
    write_output(&json, output)?;

    Ok(true)
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
