//! Ask a vision model about an image; the answer streams to the terminal.

use clap::Parser;
use groq_voice::{
    load_credential, ImageReference, ProviderClient, ProviderConfig, RustylinePrompter,
    SamplingConfig, Telemetry, TelemetryConfig, VisionPipeline,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "groq-vision")]
#[command(about = "Ask a Groq-hosted vision model about an image", long_about = None)]
struct Cli {
    /// Model id (defaults to llama-3.2-90b-vision-preview)
    #[arg(short, long)]
    model: Option<String>,

    /// Base URL for an OpenAI-compatible endpoint
    #[arg(long)]
    base_url: Option<String>,

    /// Directory for JSON log files
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry_config = TelemetryConfig::default()
        .with_verbose(cli.verbose)
        .with_log_dir(cli.log_dir.clone());
    let _telemetry = Telemetry::init(&telemetry_config, "groq-vision.log")
        .map_err(|e| eprintln!("Logging disabled: {}", e))
        .ok();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "Run failed");
            println!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> groq_voice::Result<()> {
    let mut provider = ProviderConfig::groq();
    if let Some(base_url) = cli.base_url {
        provider = provider.with_base_url(base_url);
    }

    let credential = load_credential(&provider.api_key_env)?;
    let client = ProviderClient::new(provider, credential)?;

    let pipeline = VisionPipeline {
        requester: &client,
        sampling: SamplingConfig::vision().with_model(cli.model),
    };

    let mut prompter = RustylinePrompter::new()?;
    let mut stdout = std::io::stdout();
    let image = pipeline.run(&mut prompter, &mut stdout).await?;
    tracing::debug!(
        inline = matches!(image, ImageReference::InlineEncoded(_)),
        "Vision run complete"
    );
    Ok(())
}
