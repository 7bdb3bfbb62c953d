use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::info;

use draftsmith_application::DraftService;
use draftsmith_core::config::ConfigRoot;
use draftsmith_interaction::{DEFAULT_GEMINI_MODEL, GeminiClient, GeminiComposer, SecretConfig};

mod repl;

/// Startup options. Everything is optional; the config directory fills in
/// the rest.
#[derive(Debug, Parser)]
#[command(name = "draftsmith")]
#[command(about = "Reference-driven article drafting in the terminal", long_about = None)]
struct CliArgs {
    /// Gemini model name (overrides secret.json)
    #[arg(long)]
    model: Option<String>,

    /// Output language (overrides config.toml)
    #[arg(long)]
    language: Option<String>,

    /// Target word count (overrides config.toml)
    #[arg(long)]
    word_count: Option<u32>,

    /// Directory holding config.toml and secret.json
    #[arg(long, env = "DRAFTSMITH_CONFIG_DIR")]
    config_dir: Option<PathBuf>,
}

/// The main entry point for the Draftsmith REPL application.
///
/// This async function:
/// 1. Initializes tracing (stderr, so log lines stay out of the prompt flow)
/// 2. Loads secret.json and config.toml, applying flag overrides
/// 3. Wires the Gemini client into the drafting service
/// 4. Hands control to the rustyline REPL
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config_dir = resolve_config_dir(&args)?;

    let secret = SecretConfig::load_from_path(&config_dir.join("secret.json"))?;
    let config = ConfigRoot::load_from_path(&config_dir.join("config.toml"))?;

    let api_key = secret.resolve_api_key()?;
    let model = args
        .model
        .clone()
        .or_else(|| secret.model_name().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

    let mut settings = config.settings();
    if let Some(words) = args.word_count {
        settings.set_word_count(words);
    }
    if let Some(language) = &args.language {
        settings.set_language(language);
    }

    info!("draftsmith starting, model={model}");

    let client = GeminiClient::new(api_key, model);
    let composer = Arc::new(GeminiComposer::new(client));
    let service = Arc::new(DraftService::new(composer, config.catalog(), settings));

    repl::run(service).await
}

fn resolve_config_dir(args: &CliArgs) -> Result<PathBuf> {
    if let Some(dir) = &args.config_dir {
        return Ok(dir.clone());
    }
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("draftsmith"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::path::Path;

    use clap::CommandFactory;

    #[test]
    fn test_config_dir_is_wired_to_its_env_var() {
        let command = CliArgs::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id().as_str() == "config_dir")
            .unwrap();
        assert_eq!(arg.get_env(), Some(OsStr::new("DRAFTSMITH_CONFIG_DIR")));
    }

    #[test]
    fn test_flag_overrides_parse() {
        let args = CliArgs::try_parse_from([
            "draftsmith",
            "--model",
            "gemini-2.5-pro",
            "--word-count",
            "800",
            "--config-dir",
            "/tmp/draftsmith",
        ])
        .unwrap();

        assert_eq!(args.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(args.word_count, Some(800));
        assert_eq!(
            args.config_dir.as_deref(),
            Some(Path::new("/tmp/draftsmith"))
        );
    }
}
