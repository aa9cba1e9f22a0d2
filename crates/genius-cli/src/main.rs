//! Genius CLI: submit repositories to the Codebase Genius documentation
//! service, browse processed repositories, and check the backend.

// CLI-specific lint allowances (CLI binary, not library)
#![allow(missing_docs)]
#![allow(clippy::print_stdout)] // CLI must print to stdout
#![allow(clippy::print_stderr)] // CLI must print to stderr
#![allow(clippy::exit)] // CLI uses exit codes

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use genius::client::CallObserver;
use genius::model::{validate_repository_url, SubmissionReport};
use genius::{ClientConfig, GeniusClient, GeniusError};
use miette::{IntoDiagnostic, Result};
use render::Style;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod progress;
mod render;

/// Color output mode
#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and `NO_COLOR` env
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Debug, Parser)]
#[command(
    name = "genius",
    version,
    about = "Client for the Codebase Genius documentation service"
)]
struct Cli {
    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    color: ColorMode,

    /// Client configuration file (JSON or YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Service base URL (overrides config file and GENIUS_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log call stages to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Submit a GitHub repository for documentation generation
    Submit {
        #[arg(help = "GitHub repository URL (https://github.com/owner/repo)")]
        url: String,
        #[arg(long, help = "Print the result as JSON")]
        json: bool,
        #[arg(long, help = "Print the generated documentation if it exists locally")]
        preview: bool,
    },
    /// List repositories the service has processed
    History {
        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },
    /// Check whether the service is reachable
    Health {
        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },
    /// Generate shell completions for bash, zsh, or fish
    Completions {
        #[arg(value_enum, help = "Shell to generate completions for")]
        shell: Shell,
    },
}

/// Configure color output based on CLI flag and environment
fn configure_colors(mode: ColorMode) -> bool {
    let use_color = match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            if std::env::var("NO_COLOR").is_ok() {
                false
            } else {
                supports_color::on(supports_color::Stream::Stdout).is_some()
            }
        }
    };

    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .color(use_color)
                .unicode(use_color)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set

    use_color
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "genius=debug" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let style = Style {
        color: configure_colors(cli.color),
    };
    init_tracing(cli.verbose);
    let settings = Settings {
        config: cli.config,
        base_url: cli.base_url,
        style,
    };
    match cli.command {
        Commands::Submit { url, json, preview } => cmd_submit(&settings, &url, json, preview),
        Commands::History { json } => cmd_history(&settings, json),
        Commands::Health { json } => cmd_health(&settings, json),
        Commands::Completions { shell } => cmd_completions(shell),
    }
}

/// Options shared by every service command.
struct Settings {
    config: Option<PathBuf>,
    base_url: Option<String>,
    style: Style,
}

impl Settings {
    fn client(&self, spinner_message: Option<&str>) -> Result<GeniusClient, GeniusError> {
        let config = ClientConfig::load(self.config.as_deref(), self.base_url.as_deref())?;
        let client = GeniusClient::from_config(&config)?;
        Ok(match spinner_message {
            Some(message) => client.with_observer(
                Arc::new(progress::SpinnerProgress::new(message)) as Arc<dyn CallObserver>
            ),
            None => client,
        })
    }
}

// =============================================================================
// Command Handlers
// =============================================================================

/// Handle the submit command.
fn cmd_submit(settings: &Settings, url: &str, json: bool, preview: bool) -> Result<()> {
    let url = match validate_repository_url(url) {
        Ok(url) => url,
        Err(err) => return emit_error(json, &err),
    };
    let spinner = (!json).then_some("Starting documentation generation...");
    let report = match settings.client(spinner).and_then(|c| c.submit_report(&url)) {
        Ok(report) => report,
        Err(err) => return emit_error(json, &err),
    };
    if json {
        let payload = serde_json::to_string(&report).into_diagnostic()?;
        println!("{payload}");
    } else {
        print!("{}", render::submission(settings.style, &report));
    }
    if preview && report.success {
        if let Err(err) = print_preview(&report) {
            return emit_error(json, &err);
        }
    }
    Ok(())
}

/// Handle the history command.
fn cmd_history(settings: &Settings, json: bool) -> Result<()> {
    let spinner = (!json).then_some("Loading repositories...");
    let history = match settings.client(spinner).and_then(|c| c.history()) {
        Ok(history) => history,
        Err(err) => return emit_error(json, &err),
    };
    if json {
        let payload = serde_json::to_string(&history).into_diagnostic()?;
        println!("{payload}");
    } else {
        print!("{}", render::history(settings.style, &history));
    }
    Ok(())
}

/// Handle the health command.
fn cmd_health(settings: &Settings, json: bool) -> Result<()> {
    let status = match settings.client(None) {
        Ok(client) => client.check_health(),
        Err(err) => return emit_error(json, &err),
    };
    if json {
        let payload = serde_json::to_string(&status).into_diagnostic()?;
        println!("{payload}");
    } else {
        print!("{}", render::health(settings.style, &status));
    }
    if let Some(err) = render::health_error(&status) {
        std::process::exit(err.exit_code());
    }
    Ok(())
}

/// Handle the completions command.
fn cmd_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

/// Print the generated documentation when it is reachable on this machine.
fn print_preview(report: &SubmissionReport) -> Result<(), GeniusError> {
    let Some(path) = report.documentation_path.as_deref() else {
        return Ok(());
    };
    let path = Path::new(path);
    tracing::debug!(path = %path.display(), "looking for generated documentation");
    if !path.exists() {
        eprintln!(
            "warning: documentation file not found yet; check the outputs folder once processing finishes"
        );
        return Ok(());
    }
    let content = std::fs::read_to_string(path)
        .map_err(|err| GeniusError::io("failed to read documentation file", err))?;
    println!();
    println!("Documentation Preview");
    println!("---------------------");
    println!("{content}");
    Ok(())
}

fn emit_error(json: bool, err: &GeniusError) -> Result<()> {
    if json {
        let payload = serde_json::to_string(&err.to_error_info()).into_diagnostic()?;
        println!("{payload}");
    } else {
        eprintln!("error: {}", err.message);
        if let Some(hint) = render::error_hint(err) {
            eprint!("{hint}");
        }
    }
    std::process::exit(err.exit_code());
}
