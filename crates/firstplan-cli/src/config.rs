//! Configuration file management for firstplan.
//!
//! Provides a TOML-based config file at `~/.config/firstplan/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use firstplan_core::export::{DEFAULT_TOLERANCE_SECONDS, OutputFormat};
use firstplan_core::units::LengthUnit;
use firstplan_db::config::DbConfig;

/// Environment variable overriding the output directory.
pub const OUTPUT_DIR_ENV: &str = "FIRSTPLAN_OUTPUT_DIR";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DatabaseSection {
    /// Path to a JSON or TOML pace database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputSection {
    /// Directory generated plans are written to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Default output format: text, tcx, json, or html.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Length unit for exported totals and paces: m, km, ft, or mile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Speed-zone half-width for TCX steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance_seconds: Option<i64>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the firstplan config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/firstplan` or
/// `~/.config/firstplan`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("firstplan");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("firstplan")
}

/// Return the path to the firstplan config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Where plans go when nothing else says: the downloads directory, else the
/// current directory.
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file at `path`.
pub fn load_config_from(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(config)
}

/// Load the config file, or `None` when there is none.
///
/// A config file that exists but does not parse is an error.
pub fn load_config() -> Result<Option<ConfigFile>> {
    let path = config_path();
    if !path.exists() {
        return Ok(None);
    }
    load_config_from(&path).map(Some)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<PathBuf> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;
    Ok(path)
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Settings given on the command line, each overriding everything else.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub database: Option<&'a Path>,
    pub output_dir: Option<&'a Path>,
    pub unit: Option<&'a str>,
    pub tolerance_seconds: Option<i64>,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct FirstplanConfig {
    pub db_config: DbConfig,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub unit: Option<LengthUnit>,
    pub tolerance_seconds: i64,
}

impl FirstplanConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Database: `--database` > `FIRSTPLAN_DATABASE` env > `database.path` > [`DbConfig::default_path`]
    /// - Output dir: `--output-dir` > `FIRSTPLAN_OUTPUT_DIR` env > `output.dir` > [`default_output_dir`]
    /// - Format, unit, tolerance: CLI > config file > default
    pub fn resolve(cli: &CliOverrides<'_>) -> Result<Self> {
        let file_config = load_config()?.unwrap_or_default();
        Self::resolve_with(cli, file_config)
    }

    fn resolve_with(cli: &CliOverrides<'_>, file_config: ConfigFile) -> Result<Self> {
        let database_path = if let Some(path) = cli.database {
            path.to_path_buf()
        } else if let Some(path) = std::env::var_os(DbConfig::ENV_VAR) {
            PathBuf::from(path)
        } else if let Some(path) = file_config.database.path {
            path
        } else {
            DbConfig::default_path()
        };

        let output_dir = if let Some(dir) = cli.output_dir {
            dir.to_path_buf()
        } else if let Some(dir) = std::env::var_os(OUTPUT_DIR_ENV) {
            PathBuf::from(dir)
        } else if let Some(dir) = file_config.output.dir {
            dir
        } else {
            default_output_dir()
        };

        let format = match file_config.output.format.as_deref() {
            Some(name) => name
                .parse()
                .with_context(|| format!("invalid output.format {name:?} in config file"))?,
            None => OutputFormat::default(),
        };

        let unit = match cli.unit.or(file_config.output.unit.as_deref()) {
            Some(name) => Some(
                name.parse::<LengthUnit>()
                    .with_context(|| format!("invalid output unit {name:?}"))?,
            ),
            None => None,
        };

        let tolerance_seconds = cli
            .tolerance_seconds
            .or(file_config.output.tolerance_seconds)
            .unwrap_or(DEFAULT_TOLERANCE_SECONDS);
        if tolerance_seconds < 1 {
            bail!("tolerance_seconds must be at least 1, got {tolerance_seconds}");
        }

        Ok(Self {
            db_config: DbConfig::new(database_path),
            output_dir,
            format,
            unit,
            tolerance_seconds,
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
