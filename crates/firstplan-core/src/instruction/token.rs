//! Lexical pieces of the instruction language.

use crate::error::{Error, Result};

/// Pace reference for the runner's own race pace.
pub const RACE_PACE: &str = "RP";

/// Separator between steps.
pub const STEP_SEPARATOR: char = '#';

/// A `<N>x` repeat multiplier.
///
/// Returns `None` when `token` does not have multiplier shape.
pub(crate) fn parse_multiplier(token: &str) -> Option<Result<u32>> {
    let digits = token.strip_suffix('x')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(
        digits
            .parse()
            .map_err(|e| Error::format("repeat multiplier", token, format!("{e}"))),
    )
}

/// `<segment>[+<seconds>]` after the `@` of a distance token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PaceRef<'a> {
    pub name: &'a str,
    pub increment: Option<i64>,
}

impl<'a> PaceRef<'a> {
    pub fn parse(text: &'a str) -> Result<Self> {
        let (name, increment) = match text.split_once('+') {
            Some((name, seconds)) => {
                let seconds = seconds.trim().parse::<i64>().map_err(|e| {
                    Error::format(
                        "pace increment",
                        text,
                        format!("{seconds:?} is not a whole number of seconds: {e}"),
                    )
                })?;
                (name, Some(seconds))
            }
            None => (text, None),
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::syntax(text, "missing pace reference after '@'"));
        }
        Ok(Self { name, increment })
    }

    pub fn is_race_pace(&self) -> bool {
        self.name == RACE_PACE
    }
}

/// One `#`-separated step token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepToken<'a> {
    /// A bare name, expected to be a segment.
    Named(&'a str),
    /// `<distance>@<paceRef>`.
    Paced { distance: &'a str, pace: PaceRef<'a> },
}

impl<'a> StepToken<'a> {
    pub fn parse(token: &'a str) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(Error::syntax(token, "empty step"));
        }
        match token.split_once('@') {
            Some((distance, pace)) => Ok(Self::Paced {
                distance: distance.trim(),
                pace: PaceRef::parse(pace)?,
            }),
            None => Ok(Self::Named(token.trim())),
        }
    }
}

/// Split a run of steps into its step tokens and trailing multiplier.
///
/// A run that follows a closed group may begin with a separator. Empty
/// tokens are otherwise an error.
pub(crate) fn split_run(run: &str, after_group: bool) -> Result<(Vec<&str>, Option<u32>)> {
    let body = if after_group {
        run.strip_prefix(STEP_SEPARATOR).unwrap_or(run)
    } else {
        run
    };
    if body.is_empty() {
        return Ok((Vec::new(), None));
    }

    let mut tokens: Vec<&str> = body.split(STEP_SEPARATOR).collect();
    let multiplier = match tokens.last().and_then(|last| parse_multiplier(last)) {
        Some(count) => {
            tokens.pop();
            Some(count?)
        }
        None => None,
    };
    if let Some(empty) = tokens.iter().position(|t| t.trim().is_empty()) {
        return Err(Error::syntax(run, format!("empty step at position {}", empty + 1)));
    }
    Ok((tokens, multiplier))
}
