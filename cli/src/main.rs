//! vulnreport CLI - vulnerability-scan report restyling tool

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use vulnreport::{
    classify_table, detect_format_from_path, open_document, BlockSummary, Config, DocumentKind,
    Restyler,
};

/// Exit status when positional parameters are missing.
const EXIT_MISSING_PARAMS: i32 = 127;

#[derive(Parser)]
#[command(name = "vulnreport")]
#[command(version)]
#[command(about = "Restyle vulnerability-scan reports for customers", long_about = None)]
struct Cli {
    /// Source report (.docx)
    #[arg(value_name = "SOURCE")]
    source: Option<PathBuf>,

    /// Destination directory
    #[arg(value_name = "DESTINATION")]
    destination: Option<PathBuf>,

    /// Report type: "sum" (executive summary) or "vul" (vulnerability detail)
    #[arg(value_name = "TYPE")]
    kind: Option<String>,

    /// Configuration file (default: config.yaml beside the executable, then
    /// in the working directory)
    #[arg(short, long, value_name = "FILE", env = "VULNREPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Hide the progress spinner
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the block and table outline of a report
    Inspect {
        /// Report file (.docx)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Report type used to classify tables ("sum" or "vul")
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        kind: Option<String>,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("Running on {}", std::env::consts::OS);

    let result = match cli.command {
        Some(Commands::Inspect { input, kind, json }) => cmd_inspect(&input, kind.as_deref(), json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match (cli.source, cli.destination, cli.kind) {
            (Some(source), Some(destination), Some(kind)) => cmd_restyle(
                &source,
                &destination,
                &kind,
                cli.config.as_deref(),
                cli.quiet,
            ),
            _ => {
                println!("Incorrect run params.");
                std::process::exit(EXIT_MISSING_PARAMS);
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_restyle(
    source: &Path,
    destination: &Path,
    kind: &str,
    config: Option<&Path>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let kind: DocumentKind = kind.parse()?;
    let config = Config::load(config)?;
    let restyler = Restyler::new(kind, &config);

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Loading {}...", source.display()));

    let output = restyler.process_file_with_progress(source, destination, |stage| {
        pb.set_message(format!("{}...", stage));
    });
    let output = match output {
        Ok(path) => path,
        Err(e) => {
            pb.abandon_with_message("Failed");
            return Err(e.into());
        }
    };
    pb.finish_with_message("Done!");

    println!(
        "{} {} report written to {}",
        "✓".green().bold(),
        kind,
        output.display().to_string().cyan()
    );
    Ok(())
}

fn cmd_inspect(
    input: &Path,
    kind: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let kind = kind.map(str::parse::<DocumentKind>).transpose()?;
    let format = detect_format_from_path(input)?;
    let doc = open_document(input)?;
    let outline = doc.outline();

    if json {
        println!("{}", serde_json::to_string_pretty(&outline)?);
        return Ok(());
    }

    println!("{}", "Document Information".green().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".cyan(), input.display());
    println!("{}: {}", "Format".cyan(), format);
    println!("{}: {}", "Paragraphs".cyan(), outline.paragraph_count);
    println!("{}: {}", "Tables".cyan(), outline.table_count);
    println!("{}: {}", "Styles".cyan(), doc.styles.iter().count());
    println!();

    for block in &outline.blocks {
        match block {
            BlockSummary::Paragraph {
                style,
                font_size,
                text,
            } => {
                if text.is_empty() {
                    continue;
                }
                let size = font_size
                    .map(|s| format!("{}pt", s))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "  {} {} {}",
                    format!("[{}]", style.as_deref().unwrap_or("default")).dimmed(),
                    size.yellow(),
                    text
                );
            }
            BlockSummary::Table {
                index,
                rows,
                columns,
                header,
                right_to_left,
            } => {
                let mut line = format!(
                    "  {} {}x{}",
                    format!("Table {}", index).blue().bold(),
                    rows,
                    columns
                );
                if let (Some(kind), Some(table)) = (kind, doc.table(*index)) {
                    line.push_str(&format!(" ({})", classify_table(table, kind)));
                }
                if *right_to_left {
                    line.push_str(" rtl");
                }
                println!("{}", line);
                println!("    {}", header.join(" | ").dimmed());
            }
            BlockSummary::Other { name } => {
                println!("  {}", format!("<{}>", name).dimmed());
            }
        }
    }

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "vulnreport".green().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Vulnerability-scan report restyling tool");
}
