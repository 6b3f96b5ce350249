//! endclean CLI - lesson text cleanup tool
//!
//! A command-line tool for repairing PDF-extracted chess endgame lessons.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::*;
use endclean::{cleanup, detect_problems_with, CleanReport, CleanupOptions, LessonDocument};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Chess endgame lesson text cleanup
#[derive(Parser)]
#[command(
    name = "endclean",
    author = "iyulab",
    version,
    about = "Repair PDF-extracted chess endgame lesson text",
    long_about = "endclean - Repairs solutionText fields of chess endgame lessons.\n\n\
                  Removes diagram coordinate noise, rejoins wrapped and split words,\n\
                  strips trailing junk and reports lessons that still look malformed.\n\n\
                  Usage:\n  \
                  endclean clean --in-json <IN> --out-json <OUT> --report <REPORT>\n  \
                  endclean check --in-json <IN>\n  \
                  endclean text [FILE]"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a lesson document and write a report
    Clean {
        /// Input lessons JSON
        #[arg(long)]
        in_json: PathBuf,

        /// Output cleaned JSON
        #[arg(long)]
        out_json: PathBuf,

        /// Output report JSON
        #[arg(long)]
        report: PathBuf,

        /// Cleanup preset
        #[arg(long, default_value = "standard")]
        preset: Preset,

        /// Process lessons one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Report suspicious lessons without writing a cleaned document
    Check {
        /// Input lessons JSON
        #[arg(long)]
        in_json: PathBuf,

        /// Output report JSON
        #[arg(long)]
        report: Option<PathBuf>,

        /// Cleanup preset
        #[arg(long, default_value = "standard")]
        preset: Preset,
    },

    /// Clean a single text from a file or stdin
    Text {
        /// Input text file (default: stdin)
        input: Option<PathBuf>,

        /// Cleanup preset
        #[arg(long, default_value = "standard")]
        preset: Preset,
    },

    /// Show version information
    Version,
}

/// Cleanup preset
#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// Normalization and whitespace only
    Minimal,
    /// All passes with default heuristics
    Standard,
    /// More join passes, strip every trailing digit
    Aggressive,
}

impl From<Preset> for CleanupOptions {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Minimal => CleanupOptions::minimal(),
            Preset::Standard => CleanupOptions::default(),
            Preset::Aggressive => CleanupOptions::aggressive(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Clean {
            in_json,
            out_json,
            report,
            preset,
            sequential,
        } => {
            let mut options = CleanupOptions::from(preset);
            if sequential {
                options = options.sequential();
            }
            run_clean(&in_json, &out_json, &report, &options)?;
        }

        Commands::Check {
            in_json,
            report,
            preset,
        } => {
            run_check(&in_json, report.as_deref(), &preset.into())?;
        }

        Commands::Text { input, preset } => {
            let raw = match input {
                Some(path) => fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            let options = CleanupOptions::from(preset);
            let cleaned = cleanup(&raw, &options);

            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", cleaned)?;

            for problem in detect_problems_with(&cleaned, &options.thresholds) {
                eprintln!("{} {}", "!".yellow().bold(), problem);
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

/// Clean a document and write both the cleaned lessons and the report
fn run_clean(
    input: &Path,
    output: &Path,
    report_path: &Path,
    options: &CleanupOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner("Loading lessons...");

    let mut doc = LessonDocument::open(input)?;
    tracing::info!(path = %input.display(), lessons = doc.len(), "loaded lessons");

    pb.set_message("Cleaning lessons...");
    let report = doc.clean(options);

    pb.set_message("Writing output...");
    doc.save(output)?;
    let report = report.with_paths(input, Some(output));
    report.save(report_path)?;

    pb.finish_and_clear();

    println!("{}: {}", "Wrote cleaned JSON".bold(), output.display());
    println!("{}: {}", "Wrote report JSON ".bold(), report_path.display());
    print_summary(&report);

    Ok(())
}

/// Clean in memory only and list suspicious lessons
fn run_check(
    input: &Path,
    report_path: Option<&Path>,
    options: &CleanupOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner("Checking lessons...");

    let mut doc = LessonDocument::open(input)?;
    let report = doc.clean(options).with_paths(input, None);

    pb.finish_and_clear();

    for entry in &report.suspicious {
        let problems: Vec<&str> = entry.problems.iter().map(|p| p.as_str()).collect();
        println!(
            "{} {} {}: {}",
            "!".yellow().bold(),
            display_value(&entry.id).cyan(),
            display_value(&entry.title),
            problems.join(", ")
        );
    }

    if let Some(path) = report_path {
        report.save(path)?;
        println!("{}: {}", "Wrote report JSON".bold(), path.display());
    }

    print_summary(&report);

    Ok(())
}

fn print_summary(report: &CleanReport) {
    println!("\n{}", "Summary".cyan().bold());
    println!("{}", "─".repeat(40));
    println!(
        "{}: {} / {}",
        "Changed lessons".bold(),
        report.lessons_changed,
        report.total_lessons
    );
    println!(
        "{}: {}",
        "Suspicious lessons".bold(),
        report.suspicious_count
    );
    if report.lessons_skipped > 0 {
        println!(
            "{} {} lessons without a text field were left as is",
            "!".yellow().bold(),
            report.lessons_skipped
        );
    }
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

fn print_version() {
    println!("{} {}", "endclean".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Chess endgame lesson text cleanup");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
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
    fn test_clean_args() {
        let cli = Cli::try_parse_from([
            "endclean",
            "clean",
            "--in-json",
            "in.json",
            "--out-json",
            "out.json",
            "--report",
            "report.json",
            "--preset",
            "aggressive",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Clean {
                in_json, preset, ..
            }) => {
                assert_eq!(in_json, PathBuf::from("in.json"));
                assert_eq!(CleanupOptions::from(preset).max_join_passes, 8);
            }
            _ => panic!("expected clean command"),
        }
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&serde_json::json!("Opposition")), "Opposition");
        assert_eq!(display_value(&serde_json::json!(12)), "12");
        assert_eq!(display_value(&serde_json::Value::Null), "-");
    }
}
