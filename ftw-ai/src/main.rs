use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ftw_ai::models::JobRequest;
use ftw_ai::FtwAi;

#[derive(Parser)]
#[command(name = "ftw-ai")]
#[command(about = "AI layer smoke-test CLI for the FTW marketplace")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a job description
    Classify { description: String },
    /// Generate a scope of work
    Scope {
        description: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value_t = 0)]
        photos: usize,
        #[arg(long)]
        multi_trade: bool,
        #[arg(long)]
        major: bool,
    },
    /// Rank contractors for a job
    MatchContractors {
        description: String,
        #[arg(long)]
        zip: Option<String>,
        #[arg(long, default_value = "")]
        title: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ftw_ai=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let ai = FtwAi::from_env();

    match args.command {
        Command::Classify { description } => {
            let outcome = ai.classifier().classify(&description).await?;
            if let Some(reason) = outcome.reason() {
                tracing::info!(reason = reason, "Classified via fallback");
            }
            println!("{}", serde_json::to_string_pretty(outcome.value())?);
        }
        Command::Scope {
            description,
            title,
            photos,
            multi_trade,
            major,
        } => {
            let job = JobRequest {
                title,
                description,
                photo_count: photos,
                multi_trade,
                is_major_project: major,
                ..Default::default()
            };
            let scope = ai.scope_generator().job_scope(&job).await?;
            println!("{}", serde_json::to_string_pretty(&scope)?);
        }
        Command::MatchContractors {
            description,
            zip,
            title,
        } => {
            let job = JobRequest {
                title,
                description,
                zip,
                ..Default::default()
            };
            let matches = ai.matcher().find_best(&job).await?;
            println!("{}", serde_json::to_string_pretty(&matches)?);
        }
    }

    Ok(())
}
