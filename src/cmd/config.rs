use std::io::{self, Write};

use clap::{Args, Subcommand};

use crate::config::{StoredConfig, config_file_path};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;

    println!("Configuring relog CLI.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!("Secrets are stored in the local config file; protect your filesystem accordingly.");
    println!();

    apply_prompt("Gemini API key", &mut cfg.gemini_api_key, true)?;
    apply_prompt(
        "Gemini model (e.g., gemini-2.5-flash)",
        &mut cfg.gemini_model,
        false,
    )?;
    apply_prompt(
        "README path, relative to the repository root",
        &mut cfg.readme_path,
        false,
    )?;
    apply_prompt("History mode (subjects/patch)", &mut cfg.history_mode, false)?;
    apply_prompt(
        "Update policy (discard/accumulate)",
        &mut cfg.update_policy,
        false,
    )?;

    cfg.save()?;

    let path = config_file_path()?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;

    println!("Configuration file: {}", path.display());
    println!("Gemini API key: {}", mask_secret(&cfg.gemini_api_key));
    println!("Gemini model: {}", display_value(&cfg.gemini_model));
    println!("README path: {}", display_value(&cfg.readme_path));
    println!("History mode: {}", display_value(&cfg.history_mode));
    println!("Update policy: {}", display_value(&cfg.update_policy));

    Ok(())
}

fn apply_prompt(field: &str, target: &mut Option<String>, secret: bool) -> AppResult<()> {
    match prompt(field, target.as_deref(), secret)? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn prompt(field: &str, current: Option<&str>, secret: bool) -> AppResult<PromptAction> {
    let mut stdout = io::stdout();

    match (current, secret) {
        (Some(_), true) => write!(stdout, "{field} [****] (Enter to keep, '-' to clear): ")?,
        (Some(value), false) => {
            write!(stdout, "{field} [{value}] (Enter to keep, '-' to clear): ")?
        }
        (None, _) => write!(stdout, "{field} (Enter to skip): ")?,
    }
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let trimmed = input.trim();

    if trimmed.is_empty() {
        Ok(PromptAction::Keep)
    } else if trimmed == "-" {
        Ok(PromptAction::Clear)
    } else {
        Ok(PromptAction::Set(trimmed.to_string()))
    }
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.len() > 6 => {
            let prefix = &token[..3];
            let suffix = &token[token.len() - 3..];
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}

enum PromptAction {
    Keep,
    Clear,
    Set(String),
}
