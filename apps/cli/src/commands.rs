//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use cdpdocs_core::Assistant;
use cdpdocs_shared::{AppConfig, init_config, load_config, load_config_from};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// CDP docs helper — answers how-to questions from CDP product documentation.
#[derive(Parser)]
#[command(
    name = "cdpdocs",
    version,
    about = "Answer how-to questions about Segment, mParticle, Lytics and Zeotap from their docs.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.cdpdocs/cdpdocs.toml.
    ///
    /// A missing default file falls back to built-in defaults; a missing
    /// file given here is an error.
    #[arg(long, global = true, env = "CDPDOCS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Start the web front-end.
    Serve {
        /// Address to bind (overrides `[server].bind`).
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Answer a single question and exit.
    Ask {
        /// The question, e.g. "How do I set up a new source in Segment?".
        question: String,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "cdpdocs=info",
        1 => "cdpdocs=debug,tower_http=debug",
        _ => "cdpdocs=trace,tower_http=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve { bind } => {
            let config = resolve_config(cli.config.as_ref())?;
            cmd_serve(&config, bind).await
        }
        Command::Ask { question, json } => {
            let config = resolve_config(cli.config.as_ref())?;
            cmd_ask(&config, &question, json).await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => {
                let config = resolve_config(cli.config.as_ref())?;
                cmd_config_show(&config).await
            }
        },
    }
}

/// Load the config from `--config` if given, otherwise from the default location.
fn resolve_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_serve(config: &AppConfig, bind: Option<String>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let assistant = Arc::new(Assistant::from_config(config)?);

    info!(%bind, "starting web front-end");
    println!("Serving on http://{bind} (Ctrl-C to stop)");

    cdpdocs_web::serve(&bind, assistant).await?;
    Ok(())
}

async fn cmd_ask(config: &AppConfig, question: &str, json: bool) -> Result<()> {
    let assistant = Assistant::from_config(config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .map_err(|e| eyre!("invalid spinner template: {e}"))?
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner.set_message("Searching documentation");

    let resolution = assistant.resolve(question).await;
    spinner.finish_and_clear();

    if json {
        let out = serde_json::json!({
            "question": question,
            "product": resolution.product,
            "task": resolution.task,
            "answer": resolution.answer.text(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", resolution.answer);
    }

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_ask_with_json() {
        let cli = Cli::parse_from(["cdpdocs", "ask", "How do I set up a new source in segment?", "--json"]);
        match cli.command {
            Command::Ask { question, json } => {
                assert_eq!(question, "How do I set up a new source in segment?");
                assert!(json);
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn parses_serve_with_global_flags() {
        let cli = Cli::parse_from([
            "cdpdocs",
            "-vv",
            "--config",
            "/tmp/cdpdocs.toml",
            "serve",
            "--bind",
            "0.0.0.0:8080",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/cdpdocs.toml")));
        match cli.command {
            Command::Serve { bind } => assert_eq!(bind.as_deref(), Some("0.0.0.0:8080")),
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn resolve_config_reports_missing_file() {
        let path = PathBuf::from("/nonexistent/cdpdocs.toml");
        assert!(resolve_config(Some(&path)).is_err());
    }
}
