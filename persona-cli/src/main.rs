//! reddit-persona - generate a user persona from a Reddit profile URL

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use persona_agent::{OpenAiBackend, PersonaService};
use persona_cli::{exit_status, Args, PersonaWriter, Pipeline};
use reddit_source::RedditClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing/logging (stderr; stdout carries only the outcome)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Validate configuration
    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        println!("Error: {}", e);
        return Ok(ExitCode::FAILURE);
    }

    info!("Model: {} ({})", args.model, args.openai_base_url);
    info!("Fetch limit: {} per category", args.fetch_limit);
    info!("Output: {}", args.output_dir.display());

    let reddit = RedditClient::new(args.reddit_config())?;
    let backend = OpenAiBackend::new(
        args.openai_base_url.clone(),
        args.model.clone(),
        args.openai_api_key.clone(),
        args.request_timeout(),
    )?;

    let pipeline = Pipeline::new(
        Arc::new(reddit),
        PersonaService::new(Arc::new(backend)),
        PersonaWriter::new(args.output_dir.clone()),
    )
    .with_fetch_limit(args.fetch_limit);

    let result = pipeline.run(&args.url).await;
    match &result {
        Ok(outcome) => println!("{}", outcome.message()),
        Err(e) => {
            error!(error = %e, "Persona run failed");
            println!("Error: {}", e);
        }
    }

    Ok(ExitCode::from(exit_status(&result)))
}
