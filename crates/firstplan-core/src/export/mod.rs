//! Plan exporters: plain text, TCX, JSON, and HTML.
//!
//! Exporters only read the step tree; none of them mutate a plan.

pub mod html;
pub mod json;
pub mod tcx;
pub mod text;
pub mod xml;

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::plan::Plan;
use crate::units::LengthUnit;

pub use tcx::DEFAULT_TOLERANCE_SECONDS;
pub use text::TextReport;

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Tcx,
    Json,
    Html,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [Self::Text, Self::Tcx, Self::Json, Self::Html];

    /// File extension for written documents.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Tcx => "tcx",
            Self::Json => "json",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Text => "text",
            Self::Tcx => "tcx",
            Self::Json => "json",
            Self::Html => "html",
        };
        f.write_str(s)
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "tcx" => Ok(Self::Tcx),
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            other => Err(Error::Argument(format!(
                "unknown output format {other:?} (expected text, tcx, json, or html)"
            ))),
        }
    }
}

/// Settings shared by the exporters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Text report detail level.
    pub level: usize,
    /// Speed-zone half-width for TCX steps.
    pub tolerance_seconds: i64,
    /// Output length unit; exporters fall back to miles or the step's own
    /// unit when absent.
    pub unit: Option<LengthUnit>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            level: 0,
            tolerance_seconds: DEFAULT_TOLERANCE_SECONDS,
            unit: None,
        }
    }
}

impl ExportOptions {
    pub fn with_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    /// Fails when `seconds` is below one.
    pub fn with_tolerance_seconds(mut self, seconds: i64) -> Result<Self> {
        tcx::check_tolerance(seconds)?;
        self.tolerance_seconds = seconds;
        Ok(self)
    }

    pub fn with_unit(mut self, unit: LengthUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    fn total_unit(&self) -> LengthUnit {
        self.unit.unwrap_or(LengthUnit::Mile)
    }
}

/// Render `plan` in `format`.
pub fn render(plan: &Plan, format: OutputFormat, options: &ExportOptions) -> Result<String> {
    match format {
        OutputFormat::Text => TextReport::new(options.level)
            .with_unit(options.total_unit())
            .plan(plan, ""),
        OutputFormat::Tcx => tcx::plan_document(plan, options.tolerance_seconds),
        OutputFormat::Json => json::plan_document(plan, options.unit),
        OutputFormat::Html => html::plan_document(plan, options.total_unit()),
    }
}
