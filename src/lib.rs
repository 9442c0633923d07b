pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

pub use crate::domain::error::{AppError, ImportError};
pub use crate::domain::import::{NormalizedTable, RawImport, ReportType};
pub use crate::infrastructure::import::{classify, TabularImportResolver};

use crate::infrastructure::config::ConfigService;
use crate::infrastructure::llm_clients::OpenAIClient;
use crate::interfaces::cli::{self, Cli, Commands};

pub async fn run() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init();

    let args = Cli::parse();

    match execute(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Command failed");
            eprintln!("❌ {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn execute(args: Cli) -> Result<(), AppError> {
    ConfigService::load_dotenv();
    let config = ConfigService::new(args.config.as_deref())?.load()?;
    let mut stdout = std::io::stdout().lock();

    match args.command {
        Commands::Inspect { file, rows, json } => {
            cli::inspect(&config, &file, rows, json, &mut stdout)
        }
        Commands::Summarize {
            file,
            business,
            save,
        } => {
            cli::summarize(
                &config,
                Arc::new(OpenAIClient::new()),
                &file,
                &business,
                save.as_deref(),
                &mut stdout,
            )
            .await
        }
    }
}
