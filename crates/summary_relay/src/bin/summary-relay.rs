use std::{num::NonZeroUsize, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use summary_mailer::{Mailer, SmtpConfig, SmtpMailer};
use summary_relay::{
    chunker::ChunkingConfig,
    huggingface::HuggingFaceClient,
    server::{run_server_with_shutdown, AppState, DEFAULT_PORT},
    tracing::init_tracing_subscriber,
    SummaryPipeline, SummaryPipelineBuilder,
};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "summary-relay", about = "Meeting transcript summary relay")]
struct Cli {
    /// Hugging Face inference API token
    #[arg(long, env = "HF_API_KEY", hide_env_values = true)]
    hf_api_key: String,

    /// Hosted summarization model
    #[arg(long, env = "HF_MODEL")]
    hf_model: Option<String>,

    /// Inference API base URL
    #[arg(long, env = "HF_BASE_URL", default_value = HuggingFaceClient::DEFAULT_BASE_URL)]
    hf_base_url: String,

    /// Maximum chunk length in characters
    #[arg(long, env = "CHUNK_MAX_LENGTH", default_value_t = ChunkingConfig::DEFAULT_MAX_LENGTH)]
    chunk_max_length: usize,

    /// Characters repeated between consecutive chunks
    #[arg(long, env = "CHUNK_OVERLAP", default_value_t = ChunkingConfig::DEFAULT_OVERLAP)]
    chunk_overlap: usize,

    /// Maximum summarization calls in flight per transcript
    #[arg(long, env = "MAX_CONCURRENCY", default_value = "1")]
    max_concurrency: NonZeroUsize,

    /// SMTP host, e.g. smtp.gmail.com
    #[arg(long, env = "EMAIL_HOST")]
    email_host: Option<String>,

    /// SMTP port; 465 uses implicit TLS, anything else STARTTLS
    #[arg(long, env = "EMAIL_PORT", default_value = "587")]
    email_port: u16,

    /// SMTP user, also used as the sender address
    #[arg(long, env = "EMAIL_USER")]
    email_user: Option<String>,

    /// SMTP password
    #[arg(long, env = "EMAIL_PASS", hide_env_values = true)]
    email_pass: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP relay
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Summarize a transcript file once and print the bullet summary
    Summarize {
        /// Plain-text transcript
        file: PathBuf,

        /// Also email the summary to this address
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Clone)]
struct Config {
    hf_api_key: String,
    hf_model: Option<String>,
    hf_base_url: String,
    chunking: ChunkingConfig,
    max_concurrency: NonZeroUsize,
    smtp: Option<SmtpConfig>,
}

impl Config {
    fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let chunking = ChunkingConfig::new(cli.chunk_max_length, cli.chunk_overlap)
            .context("Invalid CHUNK_MAX_LENGTH / CHUNK_OVERLAP")?;

        let smtp = match (&cli.email_host, &cli.email_user, &cli.email_pass) {
            (Some(host), Some(username), Some(password)) => Some(SmtpConfig {
                host: host.clone(),
                port: cli.email_port,
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        };

        Ok(Config {
            hf_api_key: cli.hf_api_key.clone(),
            hf_model: cli.hf_model.clone(),
            hf_base_url: cli.hf_base_url.clone(),
            chunking,
            max_concurrency: cli.max_concurrency,
            smtp,
        })
    }

    fn mailer(&self) -> anyhow::Result<SmtpMailer> {
        let smtp = self
            .smtp
            .clone()
            .context("EMAIL_HOST, EMAIL_USER and EMAIL_PASS must be set")?;
        SmtpMailer::init(smtp)
    }
}

fn build_pipeline(config: &Config) -> SummaryPipeline<HuggingFaceClient> {
    let mut client =
        HuggingFaceClient::new(&config.hf_api_key).with_base_url(&config.hf_base_url);
    if let Some(model) = &config.hf_model {
        client = client.with_model(model);
    }

    SummaryPipelineBuilder::new()
        .summarizer(client)
        .chunking(config.chunking)
        .max_concurrency(config.max_concurrency)
        .build()
}

async fn serve(config: &Config, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(build_pipeline(config), config.mailer()?);

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        tracing::info!("Shutdown signal received");
        trigger.cancel();
    });

    run_server_with_shutdown(state, port, shutdown.cancelled_owned()).await
}

async fn summarize_file(
    config: &Config,
    file: PathBuf,
    email: Option<String>,
) -> anyhow::Result<()> {
    // fail on mail misconfiguration before spending inference calls
    let mailer = email.as_ref().map(|_| config.mailer()).transpose()?;

    let transcript = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("Failed to read transcript {}", file.display()))?;

    let summary = build_pipeline(config)
        .run(&transcript)
        .await
        .context("Failed to summarize transcript")?;

    println!("{summary}");

    if let (Some(mailer), Some(to)) = (mailer, email) {
        mailer.send_summary(&summary, &to).await?;
        tracing::info!(%to, "Summary emailed");
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some("production".into()),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let config = Config::from_cli(&cli)?;

    match cli.command {
        Command::Serve { port } => {
            tracing::info!(
                port,
                max_length = config.chunking.max_length(),
                overlap = config.chunking.overlap(),
                max_concurrency = config.max_concurrency.get(),
                "Starting summary relay..."
            );
            serve(&config, port).await?;
        }
        Command::Summarize { file, email } => {
            summarize_file(&config, file, email).await?;
        }
    }

    Ok(())
}
