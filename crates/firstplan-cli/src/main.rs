mod config;
mod equivalent_cmd;
mod generate_cmd;
mod races_cmd;
mod resolve;
#[cfg(test)]
mod test_util;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use config::{CliOverrides, FirstplanConfig};
use generate_cmd::GenerateArgs;

#[derive(Parser)]
#[command(name = "firstplan", version, about = "FIRST training plans from race pace tables")]
struct Cli {
    /// Pace database file, JSON or TOML (overrides FIRSTPLAN_DATABASE env var)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a firstplan config file
    Init {
        /// Pace database path to record
        #[arg(long = "db-path")]
        db_path: Option<PathBuf>,
        /// Directory generated plans are written to
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Default output format: text, tcx, json, or html
        #[arg(long, default_value = "text")]
        format: String,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Generate a training plan for a race
    Generate {
        /// Target finishing time, H:MM:SS
        #[arg(short = 't', long)]
        target_time: String,
        /// Race date, YYYY-MM-DD or MM/DD/YYYY
        #[arg(short = 'd', long)]
        race_date: String,
        /// Race type: 5K, 10K, HalfMarathon, or Marathon
        #[arg(short = 'y', long, default_value = "Marathon")]
        race_type: String,
        /// Race type the target time was run in (defaults to the race type)
        #[arg(short = 'e', long)]
        ref_race_type: Option<String>,
        /// Race name (defaults to the race type)
        #[arg(short = 'n', long)]
        race_name: Option<String>,
        /// Runner's name
        #[arg(short = 'r', long, default_value = "John Doe")]
        runner_name: String,
        /// Three key-run days, e.g. "mon wed sat"
        #[arg(short = 'k', long, default_value = "mon wed sat")]
        keyrun_days: String,
        /// Output format, repeatable: text, tcx, json, html, or both (text and tcx)
        #[arg(short = 'f', long = "format")]
        formats: Vec<String>,
        /// Text report detail level
        #[arg(long, default_value_t = 3)]
        level: usize,
        /// Length unit for exported paces and totals: m, km, ft, or mile
        #[arg(long)]
        unit: Option<String>,
        /// TCX speed-zone half-width in seconds of pace
        #[arg(long)]
        tolerance_seconds: Option<i64>,
        /// Directory to write plans to (overrides FIRSTPLAN_OUTPUT_DIR env var)
        #[arg(short = 'o', long)]
        output_dir: Option<PathBuf>,
        /// Print to stdout instead of writing files
        #[arg(long)]
        stdout: bool,
    },
    /// Equivalent finishing times across race types
    Equivalent {
        /// Finishing time, H:MM:SS
        time: String,
        /// Race type the time was run in
        #[arg(long, default_value = "5K")]
        from: String,
        /// Race type to convert to (omit for all)
        #[arg(long)]
        to: Option<String>,
    },
    /// List race types in the pace database
    Races,
    /// Show pace database location and contents
    DbInfo,
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Execute the `firstplan init` command: write config file.
fn cmd_init(
    db_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    format: &str,
    force: bool,
) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let format: firstplan_core::export::OutputFormat = format.parse()?;
    let db_path = db_path.unwrap_or_else(firstplan_db::config::DbConfig::default_path);
    let output_dir = output_dir.unwrap_or_else(config::default_output_dir);

    let cfg = config::ConfigFile {
        database: config::DatabaseSection {
            path: Some(db_path.clone()),
        },
        output: config::OutputSection {
            dir: Some(output_dir.clone()),
            format: Some(format.to_string()),
            unit: None,
            tolerance_seconds: None,
        },
    };

    let written = config::save_config(&cfg)?;

    println!("Config written to {}", written.display());
    println!("  database.path = {}", db_path.display());
    println!("  output.dir = {}", output_dir.display());
    println!("  output.format = {format}");
    if !db_path.exists() {
        println!();
        println!("Next: copy a pace database to {}.", db_path.display());
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            db_path,
            output_dir,
            format,
            force,
        } => {
            cmd_init(db_path.or(cli.database), output_dir, &format, force)?;
        }
        Commands::Generate {
            target_time,
            race_date,
            race_type,
            ref_race_type,
            race_name,
            runner_name,
            keyrun_days,
            formats,
            level,
            unit,
            tolerance_seconds,
            output_dir,
            stdout,
        } => {
            let resolved = FirstplanConfig::resolve(&CliOverrides {
                database: cli.database.as_deref(),
                output_dir: output_dir.as_deref(),
                unit: unit.as_deref(),
                tolerance_seconds,
            })?;
            let args = GenerateArgs {
                race_type,
                target_time,
                reference_race: ref_race_type,
                race_date,
                race_name,
                runner_name,
                keyrun_days,
                formats,
                level,
                stdout,
            };
            generate_cmd::run_generate(&resolved, &args)?;
        }
        Commands::Equivalent { time, from, to } => {
            let resolved = FirstplanConfig::resolve(&CliOverrides {
                database: cli.database.as_deref(),
                ..CliOverrides::default()
            })?;
            let db = resolve::load_pace_database(&resolved.db_config)?;
            equivalent_cmd::run_equivalent(&db, &time, &from, to.as_deref())?;
        }
        Commands::Races => {
            let resolved = FirstplanConfig::resolve(&CliOverrides {
                database: cli.database.as_deref(),
                ..CliOverrides::default()
            })?;
            let db = resolve::load_pace_database(&resolved.db_config)?;
            races_cmd::run_races(&db)?;
        }
        Commands::DbInfo => {
            let resolved = FirstplanConfig::resolve(&CliOverrides {
                database: cli.database.as_deref(),
                ..CliOverrides::default()
            })?;
            races_cmd::run_db_info(&resolved.db_config)?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "firstplan", &mut std::io::stdout());
        }
    }

    Ok(())
}
