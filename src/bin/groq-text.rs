//! Ask a text model a question, print the answer, then speak it.

use clap::Parser;
use groq_voice::{
    load_credential, AudioPlayer, Error, GoogleTts, NoPlayback, ProviderClient, ProviderConfig,
    RustylinePrompter, SamplingConfig, SpeechOptions, SystemPlayer, Telemetry, TelemetryConfig,
    TextPipeline,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "groq-text")]
#[command(about = "Ask a Groq-hosted model a question and hear the answer", long_about = None)]
struct Cli {
    /// Model id (defaults to deepseek-r1-distill-llama-70b)
    #[arg(short, long)]
    model: Option<String>,

    /// Base URL for an OpenAI-compatible endpoint
    #[arg(long)]
    base_url: Option<String>,

    /// Where to write the synthesized audio
    #[arg(long, default_value = "response.mp3")]
    audio_file: PathBuf,

    /// Write the audio file but don't play it
    #[arg(long)]
    no_playback: bool,

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
    let _telemetry = Telemetry::init(&telemetry_config, "groq-text.log")
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
    let tts = GoogleTts::new().map_err(|e| Error::Configuration(e.to_string()))?;
    let player: Box<dyn AudioPlayer> = if cli.no_playback {
        Box::new(NoPlayback)
    } else {
        Box::new(SystemPlayer::detect())
    };

    let pipeline = TextPipeline {
        requester: &client,
        synthesizer: &tts,
        player: player.as_ref(),
        sampling: SamplingConfig::text().with_model(cli.model),
        speech: SpeechOptions::default().with_output_path(cli.audio_file),
    };

    let mut prompter = RustylinePrompter::new()?;
    let mut stdout = std::io::stdout();
    pipeline.run(&mut prompter, &mut stdout).await?;
    Ok(())
}
