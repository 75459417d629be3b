mod cache;
mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use crate::cmd::changelog as changelog_cmd;
use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::document::UpdatePolicy;
use crate::domain::history::HistoryMode;
use crate::error::{AppError, AppResult};
use crate::infra::git::GitCli;
use crate::infra::llm::GeminiClient;
use crate::services::LanguageModelService;
use crate::workflow::changelog::ChangelogOutcome;

#[derive(Parser)]
#[command(name = "relog", author, version, about = "AI-assisted README changelog updater")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate the README changelog section for the current release tag.
    Update(UpdateArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct UpdateArgs {
    /// History granularity to summarize: "subjects" or "patch".
    #[arg(long)]
    history: Option<String>,
    /// What to do with the existing changelog section: "discard" or "accumulate".
    #[arg(long)]
    policy: Option<String>,
    /// Override the configured Gemini model.
    #[arg(short, long)]
    model: Option<String>,
    /// Override the README location, relative to the working directory.
    #[arg(long)]
    readme: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => {
            config_cmd::run(args.command)?;
            Ok(())
        }
        Commands::Update(args) => run_update(args).await,
    }
}

async fn run_update(args: UpdateArgs) -> AppResult<()> {
    let cwd = std::env::current_dir()?;
    let mut config = AppConfig::load(&cwd)?;

    if let Some(value) = args.history {
        config.history_mode = HistoryMode::from_str(&value)
            .ok_or_else(|| AppError::Configuration(format!("invalid history mode '{value}'")))?;
    }
    if let Some(value) = args.policy {
        config.update_policy = UpdatePolicy::from_str(&value)
            .ok_or_else(|| AppError::Configuration(format!("invalid update policy '{value}'")))?;
    }
    if let Some(model) = args.model {
        config.gemini_model = model;
    }
    if let Some(readme) = args.readme {
        config.readme_path = cwd.join(readme);
    }

    if config.gemini_api_key.is_none() {
        eprintln!("Warning: Gemini API key not configured; changelog generation will fail.");
    }

    let language_model: Arc<dyn LanguageModelService> = Arc::new(GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
    ));
    let version_control = Arc::new(GitCli::new(config.workspace_root.clone()));

    let context = AppContext::new(config, version_control, language_model);

    match changelog_cmd::run(&context).await? {
        ChangelogOutcome::Updated { tag } => {
            println!(
                "Changelog for {} written to {}",
                tag.as_str(),
                context.config.readme_path.display()
            );
        }
        ChangelogOutcome::NoChanges { tag } => {
            println!(
                "No changes found for {}; README left untouched.",
                tag.as_str()
            );
        }
    }

    Ok(())
}
