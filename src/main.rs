use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use valise::config::Config;
use valise::conversation::{Responder, VisualService};
use valise::game::{GameService, TurnEvaluator};
use valise::gateway::{self, AppState};
use valise::oracle::AzureOpenAi;
use valise::speech::{AzureSpeech, ElevenLabs};
use valise::vision::AzureVision;

#[derive(Parser)]
#[command(name = "valise", about = "Voice-driven 'packing my suitcase' game service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP gateway
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Evaluate one game turn from the terminal (debugging aid)
    Turn {
        /// Current suitcase contents, comma-separated
        #[arg(long, default_value = "")]
        items: String,
        /// The player's phrase for this turn
        utterance: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();
    let mut config = Config::load_or_init()?;

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.gateway.host = host;
            }
            if let Some(port) = port {
                config.gateway.port = port;
            }
            config.validate_for_serve()?;
            let state = wire(&config);
            gateway::serve(state, &config.gateway).await?;
        }
        Commands::Turn { items, utterance } => {
            config.validate_for_serve()?;
            let evaluator = TurnEvaluator::new(oracle_from(&config));
            let items: Vec<String> = items
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect();
            let outcome = evaluator.evaluate(&items, &utterance).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }
    Ok(())
}

fn oracle_from(config: &Config) -> Arc<AzureOpenAi> {
    Arc::new(AzureOpenAi::new(
        &config.azure_openai.endpoint,
        &config.azure_openai.deployment,
        config.azure_openai.api_key.as_deref(),
    ))
}

/// Build the gateway state from real provider adapters.
fn wire(config: &Config) -> AppState {
    let oracle = oracle_from(config);
    let transcriber = Arc::new(AzureSpeech::new(
        &config.azure_speech.region,
        config.azure_speech.api_key.as_deref().unwrap_or_default(),
    ));
    let synthesizer = Arc::new(ElevenLabs::new(
        config.elevenlabs.api_key.as_deref(),
        &config.elevenlabs.voice_id,
    ));
    let captioner = Arc::new(AzureVision::new(
        config.vision_endpoint(),
        config.vision_api_key().unwrap_or_default(),
    ));

    let evaluator = Arc::new(TurnEvaluator::new(oracle.clone()));
    let game = Arc::new(GameService::new(
        transcriber.clone(),
        synthesizer.clone(),
        evaluator.clone(),
    ));
    let visual = Arc::new(VisualService::new(
        captioner,
        transcriber,
        synthesizer,
        Responder::new(oracle),
    ));

    AppState {
        evaluator,
        game,
        visual,
    }
}
