use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::{info, warn};

mod advice;
mod alerts;
mod loader;
mod models;
mod report;
mod sample;
mod score;
mod session;
mod stats;

use loader::InputFormat;
use session::Session;

#[derive(Parser)]
#[command(name = "health-monitor")]
#[command(about = "Personal vital-sign analyzer with alerts, scoring and reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Inputs {
    /// Delimited file with a header line (repeatable)
    #[arg(long)]
    csv: Vec<PathBuf>,
    /// Labeled-block text file (repeatable)
    #[arg(long)]
    txt: Vec<PathBuf>,
    /// Input file, format picked from its extension (repeatable)
    #[arg(long)]
    file: Vec<PathBuf>,
    /// Manual entry: date,hr,systolic,diastolic,sugar,temp,oxygen,steps
    #[arg(long)]
    record: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the analysis report
    Analyze {
        #[command(flatten)]
        inputs: Inputs,
        /// Emit statistics, alerts and score as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the most recent records as a table
    Trends {
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Print recommendations derived from the alerts
    Advice {
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Write the analysis report to a file
    Export {
        #[command(flatten)]
        inputs: Inputs,
        #[arg(long, default_value = "health_report.txt")]
        out: PathBuf,
    },
    /// Write a week of sample data
    Sample {
        #[arg(long, value_enum, default_value_t = InputFormat::Csv)]
        format: InputFormat,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { inputs, json } => {
            let session = build_session(&inputs);
            let Some(analysis) = session.analyze() else {
                println!("[WARNING] No data loaded. Please load data first.");
                return Ok(());
            };
            if json {
                let body = serde_json::to_string_pretty(&analysis)
                    .context("failed to serialize analysis")?;
                println!("{body}");
            } else {
                print!(
                    "{}",
                    report::render_console(&analysis.stats, &analysis.alerts, analysis.score)
                );
            }
        }
        Commands::Trends { inputs } => {
            let session = build_session(&inputs);
            if session.is_empty() {
                println!("[WARNING] No data loaded. Please load data first.");
                return Ok(());
            }
            print!("{}", report::render_trends(session.records()));
        }
        Commands::Advice { inputs } => {
            let session = build_session(&inputs);
            let Some(analysis) = session.analyze() else {
                println!("[WARNING] No data loaded. Please load data first.");
                return Ok(());
            };
            print!("{}", advice::generate(&analysis.alerts));
        }
        Commands::Export { inputs, out } => {
            let session = build_session(&inputs);
            let Some(analysis) = session.analyze() else {
                println!("[WARNING] No data to export.");
                return Ok(());
            };
            report::export(&out, &analysis.stats, &analysis.alerts, analysis.score)?;
            println!("Report written to {}.", out.display());
        }
        Commands::Sample { format, out } => {
            let out = out.unwrap_or_else(|| PathBuf::from(sample::default_path(format)));
            let written = sample::write_sample(&out, format)?;
            println!("Wrote {written} days of sample data to {}.", out.display());
        }
    }

    Ok(())
}

/// Loads every input into one session. A failed input is reported and
/// skipped; the remaining inputs still load.
fn build_session(inputs: &Inputs) -> Session {
    let mut session = Session::new();

    for path in &inputs.csv {
        absorb(&mut session, path, loader::load_csv(path));
    }
    for path in &inputs.txt {
        absorb(&mut session, path, loader::load_txt(path));
    }
    for path in &inputs.file {
        absorb(&mut session, path, loader::load(path, InputFormat::from_path(path)));
    }

    for line in &inputs.record {
        match loader::parse_manual(line) {
            Some(record) => {
                if let Err(err) = session.add(record) {
                    eprintln!("[ERROR] {err}");
                }
            }
            None => warn!("ignoring manual record with missing fields: {line}"),
        }
    }

    info!("session holds {} records", session.len());
    session
}

fn absorb(
    session: &mut Session,
    path: &Path,
    loaded: Result<Vec<models::HealthRecord>, loader::LoadError>,
) {
    match loaded {
        Ok(records) => {
            let accepted = session.extend(records);
            println!("Loaded {accepted} records from {}.", path.display());
        }
        Err(err) => eprintln!("[ERROR] {err}"),
    }
}
