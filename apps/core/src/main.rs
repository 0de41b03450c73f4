// Research Chat command-line driver
// Runs the report heuristics locally or against the research backend

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use research_chat_core::brain::ReportAnalyzer;
use research_chat_core::client::{HttpResearchClient, ResearchBackend};
use research_chat_core::config::ClientConfig;
use research_chat_core::logging::{init_tracing, json_requested};
use research_chat_core::models::ImageSource;
use research_chat_core::report_source::load_report;
use serde::Serialize;
use tracing::{info, warn};

/// Research Chat - research reports, charts and follow-up questions
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Pin the follow-up question shuffle (overrides FOLLOW_UP_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a research query
    Query { query: String },

    /// Analyze a saved report (.md, .markdown, .txt or a saved .json response)
    Report {
        path: PathBuf,
        /// Topic the report was written for
        #[arg(short, long)]
        topic: String,
    },

    /// Request a new report from the backend and analyze it
    Research {
        topic: String,
        /// Ask for a shorter research pass
        #[arg(long)]
        fast: bool,
        /// Also write the raw backend response here
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Ask a follow-up question about a saved report
    Ask {
        question: String,
        #[arg(short, long)]
        topic: String,
        #[arg(short, long)]
        report: PathBuf,
    },

    /// Generate an image, or only refine its prompt
    Image {
        prompt: String,
        #[arg(long)]
        refine: bool,
        /// Print the refined prompt without generating
        #[arg(long)]
        refine_only: bool,
        /// Where to write an inline image
        #[arg(short, long, default_value = "image.png")]
        out: PathBuf,
    },
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(json_requested());
    let args = Args::parse();

    let config = ClientConfig::load().context("Failed to load configuration")?;
    let seed = args.seed.or(config.follow_up_seed);
    let analyzer = ReportAnalyzer::with_seed(seed);

    match args.command {
        Command::Query { query } => {
            print_json(&analyzer.analyze_query(&query), args.pretty)?;
        }
        Command::Report { path, topic } => {
            let report = load_report(&path)
                .with_context(|| format!("Failed to load report {}", path.display()))?;
            print_json(&analyzer.analyze(&topic, &report), args.pretty)?;
        }
        Command::Research { topic, fast, save } => {
            let client = HttpResearchClient::new(&config)?;
            info!("Requesting research on '{}' from {}", topic, client.base_url());

            let response = client
                .research(&topic, fast.then_some(true))
                .await
                .inspect_err(|e| {
                    if e.is_transient() {
                        warn!("The backend may be busy; retrying later could succeed");
                    }
                })
                .context("Research request failed")?;

            if let Some(path) = save {
                std::fs::write(&path, serde_json::to_vec_pretty(&response)?)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }

            print_json(&analyzer.analyze(&topic, response.report_text()), args.pretty)?;
        }
        Command::Ask {
            question,
            topic,
            report,
        } => {
            let client = HttpResearchClient::new(&config)?;
            let report_text = load_report(&report)
                .with_context(|| format!("Failed to load report {}", report.display()))?;
            let answer = client
                .follow_up(&question, &topic, &report_text)
                .await
                .context("Follow-up request failed")?;
            println!("{}", answer);
        }
        Command::Image {
            prompt,
            refine,
            refine_only,
            out,
        } => {
            let client = HttpResearchClient::new(&config)?;
            if refine_only {
                let refinement = client
                    .refine_prompt(&prompt)
                    .await
                    .context("Prompt refinement failed")?;
                print_json(&refinement, args.pretty)?;
                return Ok(());
            }

            let image = client
                .generate_image(&prompt, refine)
                .await
                .context("Image generation failed")?;
            if let Some(refined) = &image.refined_prompt {
                info!("Refined prompt: {}", refined);
            }
            match image.source()? {
                ImageSource::Url(url) => println!("{}", url),
                ImageSource::Inline(bytes) => {
                    std::fs::write(&out, &bytes)
                        .with_context(|| format!("Failed to write {}", out.display()))?;
                    println!("{}", out.display());
                }
            }
        }
    }

    Ok(())
}
