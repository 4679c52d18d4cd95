//! pdfrank CLI - persona-driven PDF section ranking

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfrank::{GeminiClient, Pipeline, PipelineConfig};

#[derive(Parser)]
#[command(name = "pdfrank")]
#[command(author = "iyulab")]
#[command(version)]
#[command(
    about = "Rank PDF sections by relevance to a persona and task",
    long_about = "Reads inputs.json and a PDFs/ directory from the input folder, extracts\n\
                  heading-delimited sections from each document, asks the model service to\n\
                  rank them for the manifest's persona and task, and writes a consolidated\n\
                  JSON report. Requires GOOGLE_API_KEY in the environment or a .env file."
)]
struct Cli {
    /// Folder containing inputs.json and PDFs/
    #[arg(value_name = "INPUT_FOLDER")]
    input_folder: PathBuf,

    /// Path to save the final output JSON
    #[arg(short, long, value_name = "FILE", default_value = "output.json")]
    output: PathBuf,

    /// Model identifier for the relevance service
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,

    /// Number of top sections in the final report
    #[arg(long, value_name = "N")]
    top_n: Option<usize>,
}

fn main() {
    // Credentials may live in a .env file next to the invocation.
    let _ = dotenvy::dotenv();
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = PipelineConfig::new();
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }
    if let Some(n) = cli.top_n {
        config = config.with_top_n(n);
    }

    // Fatal before any document is touched.
    let client = GeminiClient::from_env(&config)?;
    let pipeline = Pipeline::new(client, config);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );

    let report = pipeline.process_with_progress(&cli.input_folder, |filename| {
        pb.set_message(format!("Processing {filename}..."));
        pb.tick();
    })?;
    pb.finish_and_clear();

    pdfrank::write_report(&report, &cli.output)?;

    println!(
        "{} {} ranked sections from {} documents",
        "Done!".green().bold(),
        report.extracted_sections.len(),
        report.metadata.input_documents.len()
    );
    println!("{} {}", "Saved to".green(), cli.output.display());

    Ok(())
}
