use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;

use gopace::calculator::{
    calculate_all_finish_times, calculate_required_pace, predict_race_times, required_pace_seconds,
};
use gopace::config::AppConfig;
use gopace::conversion::{format_pace, format_race_time, parse_time_to_seconds, round_seconds};
use gopace::distances::{find_distance, race_distances};
use gopace::export::{
    distance_rows, json, render_rows, split_rows, time_rows, OutputFormat, TimeRow,
};
use gopace::guidance::{pace_guidance, race_guidance, PaceGuidance, RaceGuidance};
use gopace::logging::{init_logging, LogFormat};
use gopace::models::{LabeledTime, Unit};
use gopace::splits::splits_for_distance;
use gopace::vdot::{self, VdotEquivalent};
use gopace::GoPaceError;

/// GoPace - Running Pace Calculator
///
/// Finish times from a pace, required paces from a goal, Riegel and VDOT
/// race predictions, and biased split schedules.
#[derive(Parser)]
#[command(name = "gopace")]
#[command(version)]
#[command(about = "Running pace, prediction and split calculator", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of diagnostics
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format (table, json, csv)
    #[arg(short = 'f', long, global = true)]
    format: Option<String>,

    /// Diagnostic log format (pretty, json, compact)
    #[arg(long, value_name = "FORMAT", global = true)]
    log_format: Option<String>,

    /// Also write diagnostics to this file
    #[arg(long, value_name = "FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Finish times for every race distance at a given pace
    Finish {
        /// Pace per unit (M:SS)
        #[arg(short, long)]
        pace: String,

        /// Pace unit (mile, km)
        #[arg(short, long)]
        unit: Option<String>,
    },

    /// Pace required to hit a goal time
    Pace {
        /// Goal time (H:MM:SS or M:SS)
        #[arg(short, long)]
        time: String,

        /// Race distance (5K, 10K, 15K, Half, Marathon)
        #[arg(short, long)]
        distance: Option<String>,

        /// Pace unit (mile, km)
        #[arg(short, long)]
        unit: Option<String>,
    },

    /// Predict other race times from a result
    Predict {
        /// Race result (H:MM:SS or M:SS)
        #[arg(short, long)]
        time: String,

        /// Distance of the result
        #[arg(short, long)]
        distance: Option<String>,
    },

    /// Equivalent race times for a VDOT score
    Vdot {
        /// VDOT fitness score
        #[arg(short, long)]
        score: String,
    },

    /// Split schedule for a goal time
    Splits {
        /// Goal time (H:MM:SS or M:SS)
        #[arg(short, long)]
        time: String,

        /// Race distance
        #[arg(short, long)]
        distance: Option<String>,

        /// Split unit (mile, km)
        #[arg(short, long)]
        unit: Option<String>,

        /// Pacing bias in [-1, 1]; positive runs negative splits
        #[arg(short, long, allow_hyphen_values = true)]
        bias: Option<String>,
    },

    /// List the supported race distances
    Distances,

    /// Configure application settings
    Config {
        /// List all configuration options
        #[arg(short, long)]
        list: bool,

        /// Set a configuration value (KEY=VALUE)
        #[arg(short, long)]
        set: Option<String>,

        /// Get a configuration value
        #[arg(short, long)]
        get: Option<String>,
    },
}

#[derive(Serialize)]
struct FinishReport {
    pace: String,
    unit: Unit,
    finish_times: Vec<LabeledTime>,
    guidance: Option<PaceGuidance>,
}

#[derive(Serialize)]
struct PaceReport {
    distance: String,
    goal_time: String,
    unit: Unit,
    required_pace: String,
    guidance: Option<RaceGuidance>,
}

#[derive(Serialize)]
struct PredictReport {
    distance: String,
    time: String,
    riegel: Vec<LabeledTime>,
    vdot: Option<Decimal>,
    vdot_equivalents: Vec<VdotEquivalent>,
    guidance: Option<RaceGuidance>,
}

#[derive(Serialize)]
struct VdotReport {
    score: Decimal,
    equivalents: Vec<VdotEquivalent>,
}

fn main() {
    if let Err(err) = run() {
        match err.downcast_ref::<GoPaceError>() {
            Some(gopace_err) => {
                gopace_err.log();
                eprintln!("{} {}", "Error:".red().bold(), gopace_err.user_message());
            }
            None => eprintln!("{} {:#}", "Error:".red().bold(), err),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref());

    let mut log_config = config.logging.clone().with_verbosity(cli.verbose);
    if let Some(log_format) = &cli.log_format {
        log_config.format = log_format.parse::<LogFormat>().map_err(anyhow::Error::msg)?;
    }
    if let Some(log_file) = &cli.log_file {
        log_config.file_path = Some(log_file.clone());
    }
    init_logging(&log_config)?;

    let format = match &cli.format {
        Some(f) => f.parse::<OutputFormat>()?,
        None => config.settings.output_format,
    };

    match cli.command {
        Commands::Finish { pace, unit } => {
            let unit = resolve_unit(unit.as_deref(), &config)?;
            let (minutes, seconds) = pace.split_once(':').unwrap_or((pace.as_str(), "0"));
            let finish_times = calculate_all_finish_times(minutes, seconds, race_distances(), unit);
            let guidance = pace_guidance(parse_time_to_seconds(&pace), unit);

            match format {
                OutputFormat::Json => {
                    let report = FinishReport {
                        pace: pace.clone(),
                        unit,
                        finish_times,
                        guidance,
                    };
                    println!("{}", json::to_json(&report)?);
                }
                _ => {
                    if format == OutputFormat::Table {
                        println!(
                            "{}",
                            format!("Finish times at {} per {}", pace, unit.long_name())
                                .green()
                                .bold()
                        );
                    }
                    println!("{}", render_rows(&time_rows(&finish_times), format)?);
                    if format == OutputFormat::Table {
                        print_pace_guidance(guidance.as_ref());
                    }
                }
            }
        }

        Commands::Pace {
            time,
            distance,
            unit,
        } => {
            let distance = find_distance(distance.as_deref().unwrap_or(&config.settings.default_distance))?;
            let unit = resolve_unit(unit.as_deref(), &config)?;
            let (h, m, s) = clock_fields(&time);
            let required_pace = calculate_required_pace(h, m, s, distance, unit);
            let goal = parse_time_to_seconds(&time);
            let guidance = race_guidance(goal, distance.label);

            let report = PaceReport {
                distance: distance.label.to_string(),
                goal_time: format_race_time(goal),
                unit,
                required_pace,
                guidance,
            };

            match format {
                OutputFormat::Json => println!("{}", json::to_json(&report)?),
                _ => {
                    let rows = vec![TimeRow {
                        distance: report.distance.clone(),
                        time: format!("{} per {}", report.required_pace, unit.long_name()),
                    }];
                    if format == OutputFormat::Table {
                        println!(
                            "{}",
                            format!("Required pace for {} in {}", report.distance, report.goal_time)
                                .blue()
                                .bold()
                        );
                    }
                    println!("{}", render_rows(&rows, format)?);
                    if format == OutputFormat::Table {
                        if let Some(pace) = required_pace_seconds(goal, distance, unit) {
                            print_pace_guidance(pace_guidance(pace, unit).as_ref());
                        }
                        print_race_guidance(report.guidance.as_ref());
                    }
                }
            }
        }

        Commands::Predict { time, distance } => {
            let base = find_distance(distance.as_deref().unwrap_or(&config.settings.default_distance))?;
            let base_time = parse_time_to_seconds(&time);
            if base_time <= 0 {
                bail!("Race time must be positive, got '{}'", time);
            }

            let (h, m, s) = clock_fields(&time);
            let riegel = predict_race_times(h, m, s, base, race_distances());
            let score = vdot::calculate_vdot(base_time, base.km);
            let vdot_equivalents = match score {
                Some(score) => vdot::race_equivalents(score)?,
                None => Vec::new(),
            };

            let report = PredictReport {
                distance: base.label.to_string(),
                time: format_race_time(base_time),
                riegel,
                vdot: score,
                vdot_equivalents,
                guidance: race_guidance(base_time, base.label),
            };

            match format {
                OutputFormat::Json => println!("{}", json::to_json(&report)?),
                _ => {
                    if format == OutputFormat::Table {
                        println!(
                            "{}",
                            format!("Riegel predictions from a {} {}", report.time, report.distance)
                                .green()
                                .bold()
                        );
                    }
                    println!("{}", render_rows(&time_rows(&report.riegel), format)?);

                    if format == OutputFormat::Table {
                        match report.vdot {
                            Some(score) => {
                                println!("{}", format!("VDOT {}", score).cyan().bold());
                                println!(
                                    "{}",
                                    render_rows(&equivalent_rows(&report.vdot_equivalents), format)?
                                );
                            }
                            None => println!(
                                "{}",
                                format!("No VDOT rating for {}", report.distance).yellow()
                            ),
                        }
                        print_race_guidance(report.guidance.as_ref());
                    }
                }
            }
        }

        Commands::Vdot { score } => {
            let score: Decimal = score
                .trim()
                .parse()
                .with_context(|| format!("Invalid VDOT score: {}", score))?;
            if score <= Decimal::ZERO {
                bail!("VDOT score must be positive, got {}", score);
            }
            let equivalents = vdot::race_equivalents(score)?;

            match format {
                OutputFormat::Json => {
                    let report = VdotReport { score, equivalents };
                    println!("{}", json::to_json(&report)?);
                }
                _ => {
                    if format == OutputFormat::Table {
                        println!("{}", format!("Equivalent times for VDOT {}", score).cyan().bold());
                    }
                    println!("{}", render_rows(&equivalent_rows(&equivalents), format)?);
                }
            }
        }

        Commands::Splits {
            time,
            distance,
            unit,
            bias,
        } => {
            let distance = find_distance(distance.as_deref().unwrap_or(&config.settings.default_distance))?;
            let unit = resolve_unit(unit.as_deref(), &config)?;
            let bias = match bias {
                Some(b) => parse_bias(&b)?,
                None => config.settings.split_bias,
            };
            let goal = parse_time_to_seconds(&time);

            let schedule = splits_for_distance(goal, distance, unit, bias);
            if schedule.is_empty() {
                bail!(
                    "Cannot build splits for {} over {} (goal time must be positive)",
                    time,
                    distance.label
                );
            }

            match format {
                OutputFormat::Json => println!("{}", json::to_json(&schedule)?),
                _ => {
                    if format == OutputFormat::Table {
                        println!(
                            "{}",
                            format!(
                                "{} {} splits for {} ({})",
                                schedule.len(),
                                unit,
                                format_race_time(goal),
                                distance.label
                            )
                            .green()
                            .bold()
                        );
                        println!(
                            "  {} {}   Average pace: {} per {}",
                            "Strategy:".dimmed(),
                            schedule.profile(),
                            format_pace(round_seconds(schedule.average_pace_seconds)),
                            unit.long_name()
                        );
                    }
                    println!("{}", render_rows(&split_rows(&schedule), format)?);
                }
            }
        }

        Commands::Distances => match format {
            OutputFormat::Json => println!("{}", json::to_json(race_distances())?),
            _ => println!("{}", render_rows(&distance_rows(race_distances()), format)?),
        },

        Commands::Config { list, set, get } => {
            let config_path = cli
                .config
                .clone()
                .unwrap_or_else(AppConfig::default_config_path);

            if let Some(assignment) = set {
                let (key, value) = assignment
                    .split_once('=')
                    .with_context(|| format!("Expected KEY=VALUE, got '{}'", assignment))?;
                config.set_value(key.trim(), value.trim())?;
                config.save_to_file(&config_path)?;
                println!(
                    "{} {} = {}",
                    "✓ Set".green(),
                    key.trim(),
                    config.get_value(key.trim())?
                );
            }

            if let Some(key) = get {
                println!("{}", config.get_value(&key)?);
            }

            if list {
                println!("{}", "Configuration".blue().bold());
                println!("  {} {}", "File:".dimmed(), config_path.display());
                for (key, value) in config.list_values() {
                    println!("  {} = {}", key, value);
                }
            }
        }
    }

    Ok(())
}

fn resolve_unit(unit: Option<&str>, config: &AppConfig) -> Result<Unit> {
    match unit {
        Some(u) => u.parse::<Unit>().map_err(anyhow::Error::msg),
        None => Ok(config.settings.default_unit),
    }
}

fn parse_bias(value: &str) -> Result<Decimal> {
    let bias: Decimal = value
        .trim()
        .parse()
        .with_context(|| format!("Invalid split bias: {}", value))?;
    if bias < Decimal::NEGATIVE_ONE || bias > Decimal::ONE {
        return Err(GoPaceError::InvalidInput(format!(
            "split bias must be between -1 and 1, got {}",
            value
        ))
        .into());
    }
    Ok(bias)
}

/// Split a clock string into hour, minute and second fields.
/// Shapes other than `H:MM:SS` and `M:SS` yield empty fields.
fn clock_fields(time: &str) -> (&str, &str, &str) {
    let parts: Vec<&str> = time.split(':').collect();
    match parts.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [m, s] => ("", *m, *s),
        _ => ("", "", ""),
    }
}

fn equivalent_rows(equivalents: &[VdotEquivalent]) -> Vec<TimeRow> {
    equivalents
        .iter()
        .map(|e| TimeRow {
            distance: e.distance.to_string(),
            time: e.formatted(),
        })
        .collect()
}

fn print_pace_guidance(guidance: Option<&PaceGuidance>) {
    if let Some(guidance) = guidance {
        println!("{} {}", "Level:".bold(), guidance.level.to_string().yellow());
        println!("  {}", guidance.description);
        for tip in &guidance.tips {
            println!("  • {}", tip);
        }
    }
}

fn print_race_guidance(guidance: Option<&RaceGuidance>) {
    if let Some(guidance) = guidance {
        println!("{} {}", "Race level:".bold(), guidance.level.to_string().yellow());
        println!("  {}", guidance.description);
        for tip in &guidance.tips {
            println!("  • {}", tip);
        }
    }
}
