//! footprint-tools: personal carbon footprint assessment tool
//!
//! Estimates annual emissions from lifestyle answers, compares them with the
//! country baseline and ranks interventions.

#![allow(clippy::too_many_lines, clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use footprint_tools::{
    cli,
    config::{AppConfig, Validatable},
    engine::RiskLevel,
    model::{input::fields, RangePolicy, RawInput},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with supported inputs and outputs
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nInput Fields:",
        "\n  country, distance (km/day), electricity (kWh/month), meals (per day),",
        "\n  waste (kg/week), renewable (%), reduction (%)",
        "\n\nInput Files:",
        "\n  JSON object, key=value lines, JSON array (batch)",
        "\n\nOutput Formats:",
        "\n  summary, json, markdown, csv"
    )
}

#[derive(Parser)]
#[command(name = "footprint-tools")]
#[command(version, long_version = build_long_version())]
#[command(about = "Personal carbon footprint assessment tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Assessed risk above --max-risk
    3  Error occurred

EXAMPLES:
    # Assess a profile from flags
    footprint-tools assess --country sweden --distance 20 --electricity 300 --waste 10

    # Assess a profile file, overriding one answer
    footprint-tools assess --input profile.json --reduction 30 -o json

    # Fail in scripts when the footprint is high
    footprint-tools assess --input profile.json --max-risk medium

    # Assess many profiles at once
    footprint-tools batch households.json -o json > results.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs (extracted for readability)
// ============================================================================

/// Options shared by the assessing commands
#[derive(Args)]
struct SharedArgs {
    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<ReportFormat>,

    /// Output file (default: stdout)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// How to treat renewable/reduction percentages outside 0-100
    #[arg(long, value_enum)]
    range_policy: Option<RangePolicy>,
}

/// Arguments for the `assess` subcommand
#[derive(Args)]
struct AssessArgs {
    /// Read answers from a file (JSON object or key=value lines, `-` for stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Country of residence
    #[arg(long)]
    country: Option<String>,

    /// Commute distance in km per day
    #[arg(long)]
    distance: Option<String>,

    /// Electricity use in kWh per month
    #[arg(long)]
    electricity: Option<String>,

    /// Meals per day
    #[arg(long)]
    meals: Option<String>,

    /// Household waste in kg per week
    #[arg(long)]
    waste: Option<String>,

    /// Share of electricity from renewables, percent
    #[arg(long)]
    renewable: Option<String>,

    /// Reduction target, percent
    #[arg(long)]
    reduction: Option<String>,

    /// Exit with code 1 when the risk is above this level
    #[arg(long, value_enum)]
    max_risk: Option<RiskLevel>,

    #[command(flatten)]
    shared: SharedArgs,
}

impl AssessArgs {
    /// Answers given as flags, in canonical field order
    fn flag_fields(&self) -> RawInput {
        [
            (fields::COUNTRY, &self.country),
            (fields::DISTANCE, &self.distance),
            (fields::ELECTRICITY, &self.electricity),
            (fields::MEALS, &self.meals),
            (fields::WASTE, &self.waste),
            (fields::RENEWABLE, &self.renewable),
            (fields::REDUCTION, &self.reduction),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key, v.clone())))
        .collect()
    }
}

/// Arguments for the `batch` subcommand
#[derive(Args)]
struct BatchArgs {
    /// JSON array of input records (`-` for stdin)
    input: PathBuf,

    /// Report invalid records and assess the rest instead of failing
    #[arg(long)]
    skip_invalid: bool,

    /// Exit with code 1 when any record's risk is above this level
    #[arg(long, value_enum)]
    max_risk: Option<RiskLevel>,

    #[command(flatten)]
    shared: SharedArgs,
}

/// Arguments for the `trend` subcommand
#[derive(Args)]
struct TrendArgs {
    /// Country to analyze
    country: String,

    /// Historical dataset CSV (overrides `history.dataset`)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<ReportFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a single lifestyle profile
    Assess(AssessArgs),

    /// Assess a JSON array of profiles in parallel
    Batch(BatchArgs),

    /// List reference country baselines and carbon prices
    Countries {
        /// Output format
        #[arg(short, long, value_enum)]
        output: Option<ReportFormat>,
    },

    /// Show a country's historical emissions trend
    Trend(TrendArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .footprint-tools.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::ERROR
        }
    };
    if exit_code != exit_codes::SUCCESS {
        std::process::exit(exit_code);
    }
}

/// Layer command-line settings over the discovered config file and validate the result.
fn effective_config(cli: &Cli, overrides: AppConfig) -> Result<AppConfig> {
    let (config, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for error in &errors {
            tracing::error!("{error}");
        }
        anyhow::bail!("Configuration has {} invalid value(s)", errors.len());
    }
    Ok(config)
}

fn shared_overrides(cli: &Cli, args: &SharedArgs) -> AppConfig {
    AppConfig::builder()
        .range_policy(args.range_policy.unwrap_or_default())
        .output_format(args.output.unwrap_or_default())
        .output_file(args.output_file.clone())
        .no_color(cli.no_color)
        .quiet(cli.quiet)
        .build()
}

// Dispatch to command handlers
fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Assess(args) => {
            let mut overrides = shared_overrides(&cli, &args.shared);
            overrides.behavior.max_risk = args.max_risk;
            let config = effective_config(&cli, overrides)?;
            cli::run_assess(&config, args.input.clone(), &args.flag_fields())
        }

        Commands::Batch(args) => {
            let mut overrides = shared_overrides(&cli, &args.shared);
            overrides.behavior.max_risk = args.max_risk;
            let config = effective_config(&cli, overrides)?;
            cli::run_batch(&config, &args.input, args.skip_invalid)
        }

        Commands::Countries { output } => {
            let overrides = AppConfig::builder()
                .output_format(output.unwrap_or_default())
                .quiet(cli.quiet)
                .build();
            let config = effective_config(&cli, overrides)?;
            cli::run_countries(&config)
        }

        Commands::Trend(args) => {
            let overrides = AppConfig::builder()
                .output_format(args.output.unwrap_or_default())
                .quiet(cli.quiet)
                .build();
            let config = effective_config(&cli, overrides)?;
            cli::run_trend(&config, args.dataset.clone(), &args.country)
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "footprint-tools", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = footprint_tools::config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) =
                    footprint_tools::config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    dirs::config_dir().map(|p| p.join("footprint-tools").display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in &[
                    ".footprint-tools.yaml",
                    ".footprint-tools.yml",
                    "footprint-tools.yaml",
                    "footprint-tools.yml",
                ] {
                    eprintln!("  {name}");
                }
                eprintln!();
                match footprint_tools::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".footprint-tools.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = footprint_tools::config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}
