//! Folio CLI: developer tooling over the page logic.
//!
//! Commands:
//! - `mailto`: print the mail link the contact form would open
//! - `i18n check`: validate a translation table file
//! - `config show`: print the effective configuration as TOML
//! - `simulate`: replay a scripted session against a services slider

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use folio_core::script::{self, StepReport};
use folio_core::{ContactMessage, FolioConfig, ServicesSlider, TranslationTable, Viewport};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio", about = "Folio CLI: portfolio page tooling")]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the mailto link for a contact form submission.
    Mailto {
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        subject: String,

        #[arg(long, default_value = "")]
        message: String,

        /// Recipient. Defaults to `contact.recipient` from the configuration.
        #[arg(long)]
        to: Option<String>,

        /// Print the submission as JSON instead of the link.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Translation table commands.
    I18n {
        #[command(subcommand)]
        action: I18nAction,
    },
    /// Configuration commands.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Replay a slider script and print the state after every step.
    Simulate {
        /// Number of service cards (and dots).
        #[arg(long)]
        cards: usize,

        /// Viewport width in pixels.
        #[arg(long, default_value_t = 1024.0)]
        width: f64,

        /// Rendered card width in pixels.
        #[arg(long, default_value_t = 360.0)]
        card_width: f64,

        /// Track gap in pixels.
        #[arg(long)]
        gap: Option<f64>,

        /// Script file. Reads stdin when omitted.
        #[arg(long)]
        script: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum I18nAction {
    /// Report unknown languages, missing keys and list/text mismatches.
    Check {
        /// JSON file shaped like `{"en": {...}, "id": {...}}`.
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration.
    Show,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("FOLIO_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Mailto {
            name,
            email,
            subject,
            message,
            to,
            json,
        } => {
            let message = ContactMessage::new(name, email, subject, message);
            if json {
                println!("{}", serde_json::to_string_pretty(&message)?);
            } else {
                let recipient = to.unwrap_or(config.contact.recipient);
                println!("{}", message.mailto(&recipient));
            }
            Ok(())
        }
        Commands::I18n { action } => match action {
            I18nAction::Check { file } => run_i18n_check(&file),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                print!("{}", config.to_toml_string()?);
                Ok(())
            }
        },
        Commands::Simulate {
            cards,
            width,
            card_width,
            gap,
            script,
        } => run_simulate(&config, cards, width, card_width, gap, script.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<FolioConfig> {
    let Some(path) = path else {
        return Ok(FolioConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = FolioConfig::from_toml_str(&content)
        .with_context(|| format!("loading config {}", path.display()))?;
    debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

fn run_i18n_check(file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let table = TranslationTable::from_json(&content)?;
    let issues = table.check();
    if issues.is_empty() {
        println!("{}: ok", file.display());
        return Ok(());
    }
    for issue in &issues {
        println!("{}: {issue}", file.display());
    }
    bail!("{} issue(s) in {}", issues.len(), file.display());
}

fn run_simulate(
    config: &FolioConfig,
    cards: usize,
    width: f64,
    card_width: f64,
    gap: Option<f64>,
    script_path: Option<&Path>,
) -> Result<()> {
    if cards == 0 {
        bail!("--cards must be at least 1");
    }
    let text = match script_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    let steps = script::parse(&text)?;

    let gap = gap.unwrap_or(config.services.fallback_gap_px);
    let mut slider = ServicesSlider::new(
        cards,
        cards,
        Viewport::new(width, card_width, gap),
        config.services.clone(),
    );
    slider.start();

    println!(
        "{:<6} {:<14} {:>5} {:>5} {:>5} {:>9}",
        "Line", "Step", "Index", "Max", "Cards", "AutoPlay"
    );
    println!("{}", "-".repeat(49));
    for report in script::replay(&mut slider, &steps) {
        println!("{}", format_report(&report));
    }
    Ok(())
}

fn format_report(report: &StepReport) -> String {
    format!(
        "{:<6} {:<14} {:>5} {:>5} {:>5} {:>9}",
        report.line,
        format!("{:?}", report.step),
        report.index,
        report.max_index,
        report.cards_per_view,
        if report.autoplay_running { "on" } else { "off" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use folio_core::script::Step;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["folio", "config", "show", "--config", "page.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some(Path::new("page.toml")));
    }

    #[test]
    fn simulate_requires_cards() {
        assert!(Cli::try_parse_from(["folio", "simulate"]).is_err());
        assert!(Cli::try_parse_from(["folio", "simulate", "--cards", "4"]).is_ok());
    }

    #[test]
    fn report_row_layout() {
        let report = StepReport {
            line: 3,
            step: Step::GoTo(2),
            index: 2,
            max_index: 3,
            cards_per_view: 2,
            autoplay_running: false,
        };
        assert_eq!(
            format_report(&report),
            "3      GoTo(2)            2     3     2       off"
        );
    }

    #[test]
    fn missing_config_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), FolioConfig::default());
        assert!(load_config(Some(Path::new("/nonexistent/folio.toml"))).is_err());
    }
}
