//! Dog Universe — loyalty grade tooling for the boarding and taxi back-office.
//!
//! Computes advisory loyalty grades from client stay and revenue aggregates.
//! Output is JSON on stdout; logs go to stderr.

use anyhow::Context;
use clap::{Parser, Subcommand};
use dog_universe_core::config::AppConfig;
use dog_universe_core::loyalty::{ClientLoyaltyFacts, Locale, LoyaltyTier};
use dog_universe_loyalty::LoyaltyEngine;
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "dog-universe")]
#[command(about = "Loyalty grade suggestions for Dog Universe clients")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, env = "DOG_UNIVERSE_CONFIG")]
    config: Option<String>,

    /// Platinum revenue threshold (overrides config)
    #[arg(long, env = "DOG_UNIVERSE__LOYALTY__PLATINUM_REVENUE_THRESHOLD")]
    revenue_threshold: Option<f64>,

    /// Label language: fr or en (defaults to the configured locale)
    #[arg(long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Suggest a grade for a single client
    Classify {
        /// Completed stays
        #[arg(long)]
        stays: u32,
        /// Lifetime revenue in the base currency unit
        #[arg(long, default_value_t = 0.0)]
        revenue: f64,
        /// Grade currently on file (BRONZE, SILVER, GOLD, PLATINUM)
        #[arg(long)]
        current: Option<LoyaltyTier>,
    },
    /// Suggest grades for a JSON array of client facts
    Batch {
        /// JSON file; `-` reads stdin
        #[arg(long)]
        input: String,
        /// Only print clients whose suggested grade is an upgrade
        #[arg(long, default_value_t = false)]
        upgrades_only: bool,
    },
    /// Print the grade label table
    Labels,
}

#[derive(Serialize)]
struct LabelRow {
    code: &'static str,
    rank: u8,
    min_stays: u32,
    label: &'static str,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dog_universe=info,dog_universe_loyalty=info".into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;

    if let Some(threshold) = cli.revenue_threshold {
        config.loyalty.platinum_revenue_threshold = threshold;
    }

    info!(
        environment = %config.environment,
        platinum_revenue = config.loyalty.platinum_revenue_threshold,
        "Configuration loaded"
    );

    let engine = LoyaltyEngine::new(&config.loyalty).context("invalid loyalty configuration")?;
    let locale = cli
        .lang
        .as_deref()
        .map(Locale::from_tag)
        .unwrap_or_else(|| config.loyalty.locale());

    let output = run(&engine, cli.command, locale)?;
    println!("{output}");
    Ok(())
}

/// A config file named on the command line must load; without one, a bad
/// environment falls back to defaults.
fn load_config(path: Option<&str>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => {
            AppConfig::load(Some(path)).with_context(|| format!("loading config from {path}"))
        }
        None => Ok(AppConfig::load(None).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            AppConfig::default()
        })),
    }
}

fn run(engine: &LoyaltyEngine, command: Command, locale: Locale) -> anyhow::Result<String> {
    let json = match command {
        Command::Classify {
            stays,
            revenue,
            current,
        } => {
            let facts = ClientLoyaltyFacts {
                current_tier: current,
                ..ClientLoyaltyFacts::new(stays, revenue)
            };
            serde_json::to_string_pretty(&engine.suggest(&facts, locale))?
        }
        Command::Batch {
            input,
            upgrades_only,
        } => {
            let clients = read_clients(&input)?;
            let mut suggestions = engine.suggest_batch(&clients, locale);
            if upgrades_only {
                suggestions.retain(|s| s.is_upgrade);
            }
            serde_json::to_string_pretty(&suggestions)?
        }
        Command::Labels => {
            let rows: Vec<LabelRow> = LoyaltyTier::ALL
                .into_iter()
                .map(|tier| LabelRow {
                    code: tier.code(),
                    rank: tier.rank(),
                    min_stays: tier.min_stays(),
                    label: tier.label(locale),
                })
                .collect();
            serde_json::to_string_pretty(&rows)?
        }
    };
    Ok(json)
}

fn read_clients(input: &str) -> anyhow::Result<Vec<ClientLoyaltyFacts>> {
    let raw = if input == "-" {
        std::io::read_to_string(std::io::stdin()).context("reading client facts from stdin")?
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading client facts from {input}"))?
    };
    let clients = serde_json::from_str(&raw).with_context(|| format!("parsing client facts in {input}"))?;
    Ok(clients)
}
