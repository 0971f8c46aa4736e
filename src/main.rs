use clap::Parser;
use domain::gateway::anthropic::AnthropicClient;
use domain::meeting_upload::{self, UploadOptions};
use domain::RawUpload;
use log::{error, info};
use meeting_ai::traits::analysis::Provider;
use service::{config::Config, logging::Logger};
use std::path::PathBuf;

/// Normalize a meeting transcript and extract a summary, action items, decisions,
/// dates and tags from it. Prints the processed record as JSON.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Transcript file to process (.txt, .vtt, .docx, .doc or .pdf)
    file: PathBuf,

    /// Meeting title; defaults to the file name without its extension
    #[arg(long)]
    title: Option<String>,

    /// Tags as a JSON array of strings, e.g. '["sales","q3"]'
    #[arg(long)]
    tags: Option<String>,

    #[command(flatten)]
    config: Config,
}

#[tokio::main]
async fn main() {
    service::config::load_dotenv();
    let cli = Cli::parse();

    if let Err(e) = Logger::init_logger(&cli.config) {
        eprintln!("Failed to initialize logger: {e}");
    }

    info!(
        "Starting meeting_insights [{}] with model {}",
        cli.config.runtime_env(),
        cli.config.anthropic_model()
    );

    let bytes = match std::fs::read(&cli.file) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to read {}: {e}", cli.file.display());
            std::process::exit(1);
        }
    };
    let filename = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.to_string_lossy().into_owned());

    let client = match AnthropicClient::from_config(&cli.config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to configure the Anthropic client: {e}");
            std::process::exit(1);
        }
    };

    let options = UploadOptions {
        title: cli.title,
        tags: cli.tags,
    };
    let provider = client.as_ref().map(|c| c as &dyn Provider);

    match meeting_upload::process_upload(RawUpload::new(bytes, filename), options, provider).await
    {
        Ok(processed) => match serde_json::to_string_pretty(&processed) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Failed to serialize the processed upload: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            match e.input_error() {
                Some(input) => error!("{input}"),
                None => error!("Failed to process {}: {e}", cli.file.display()),
            }
            std::process::exit(1);
        }
    }
}
