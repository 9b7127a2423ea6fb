use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use emc_recommender::access::AccessGate;
use emc_recommender::client::WorkflowClient;
use emc_recommender::patient::{AgeBand, PatientInput, Sex};
use emc_recommender::render::{render_guidelines, render_systems};
use emc_recommender::settings::Settings;
use emc_recommender::{parse, workflow, Systems};

#[derive(Parser)]
#[command(
    name = "emc_recommender",
    about = "Doctor-facing recommendations from the EMC workflow service"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse saved recommendation text into systems and services
    Parse {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Print the JSON mapping instead of the text report
        #[arg(long)]
        json: bool,
        /// Show risk category banners in the text report
        #[arg(long)]
        risk_headers: bool,
    },
    /// Request recommendations for a patient and print the report
    Run {
        #[arg(long, value_enum)]
        sex: Sex,
        #[arg(long, value_enum)]
        age: AgeBand,
        /// Risks / complaints, free text
        #[arg(long, default_value = "")]
        risk: String,
        /// Comma-separated МКБ-10 codes
        #[arg(long, default_value = "")]
        mkb: String,
        /// Access code
        #[arg(long)]
        code: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            files,
            json,
            risk_headers,
        } => parse_files(&files, json, risk_headers),
        Commands::Run {
            sex,
            age,
            risk,
            mkb,
            code,
        } => {
            let patient = PatientInput { sex, age, risk, mkb };
            run(&patient, &code).await
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn parse_files(files: &[PathBuf], json: bool, risk_headers: bool) -> anyhow::Result<()> {
    let parsed: Vec<(PathBuf, Systems)> = files
        .par_iter()
        .map(|path| -> anyhow::Result<(PathBuf, Systems)> {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok((path.clone(), parse(text.as_str())))
        })
        .collect::<anyhow::Result<_>>()?;

    if json {
        let value = if let [(_, systems)] = parsed.as_slice() {
            serde_json::to_value(systems)?
        } else {
            let mut by_file = serde_json::Map::new();
            for (path, systems) in &parsed {
                by_file.insert(path.display().to_string(), serde_json::to_value(systems)?);
            }
            serde_json::Value::Object(by_file)
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for (path, systems) in &parsed {
        let title = path.display().to_string();
        println!("{}", render_systems(&title, systems, risk_headers));
    }
    Ok(())
}

async fn run(patient: &PatientInput, code: &str) -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;
    AccessGate::new(&settings.access_codes).check(code)?;
    let client = WorkflowClient::new(&settings)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Получаем рекомендации…");
    pb.enable_steady_tick(Duration::from_millis(120));

    let recs = workflow::fetch(&client, &settings, patient).await;
    pb.finish_and_clear();
    let recs = recs?;

    if let Some(guidelines) = &recs.guidelines {
        println!("{}", render_guidelines(guidelines));
    }
    println!(
        "{}",
        render_systems("Рекомендации по рискам", &recs.risks, true)
    );
    println!(
        "{}",
        render_systems("Общие рекомендации по здоровью", &recs.general, false)
    );
    Ok(())
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
