use std::fmt;

use crate::error::{Error, Result};
use crate::units::{Distance, LengthUnit, Time, TimeUnit};

/// Running pace: a duration per one unit of length.
///
/// Paces are plain values. Every adjustment ([`Pace::increment`],
/// [`Pace::convert_to`]) returns a new pace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pace {
    time: Time,
    unit: LengthUnit,
}

impl Pace {
    pub fn new(minutes: u32, seconds: u32, unit: LengthUnit) -> Self {
        Self {
            time: Time::new(0, minutes, seconds),
            unit,
        }
    }

    pub fn from_time(time: Time, unit: LengthUnit) -> Self {
        Self { time, unit }
    }

    /// Parse `"0:MM:SS min per <unit>"`: the first token is a time, the last
    /// token the length unit.
    pub fn parse(input: &str) -> Result<Self> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
            return Err(Error::format("pace", input, "expected '<time> min per <unit>'"));
        };
        if tokens.len() < 2 {
            return Err(Error::format("pace", input, "missing length unit"));
        }
        let time = Time::parse(first)?;
        let unit = last.parse()?;
        Ok(Self { time, unit })
    }

    /// The pace that covers `distance` in `time`, per one `unit` (default:
    /// the distance's own unit).
    ///
    /// Seconds are rounded half-to-even; a remainder that rounds up to 60
    /// lands on the next whole minute.
    pub fn from_time_distance(
        time: &Time,
        distance: &Distance,
        unit: Option<LengthUnit>,
    ) -> Result<Self> {
        let unit = unit.unwrap_or(distance.unit());
        let factor = distance.convert_to(unit);
        if factor <= 0.0 {
            return Err(Error::Range(format!(
                "cannot derive a pace over a zero distance ({distance})"
            )));
        }
        let seconds = time.total_seconds() as f64 / factor;
        let minutes = (seconds / 60.0).floor();
        let remainder = (seconds % 60.0).round_ties_even();
        let total = minutes as u64 * 60 + remainder as u64;
        Ok(Self {
            time: Time::from_seconds(total),
            unit,
        })
    }

    pub fn time(&self) -> Time {
        self.time
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// A new pace `delta_seconds` slower (or faster, when negative).
    pub fn increment(&self, delta_seconds: i64) -> Result<Self> {
        Ok(Self {
            time: self.time.offset(delta_seconds)?,
            unit: self.unit,
        })
    }

    /// Time to cover `distance` at this pace, rounded to whole seconds and
    /// expressed in `unit`.
    pub fn to_time(&self, distance: &Distance, unit: TimeUnit) -> f64 {
        let factor = distance.convert_to(self.unit);
        let seconds = (self.time.total_seconds() as f64 * factor).round_ties_even();
        seconds / unit.seconds()
    }

    /// Distance covered in `time` at this pace, expressed in `unit`.
    pub fn to_distance(&self, time: &Time, unit: LengthUnit) -> Result<f64> {
        let pace_seconds = self.time.total_seconds();
        if pace_seconds == 0 {
            return Err(Error::Range("cannot project a distance at a zero pace".into()));
        }
        let factor = time.total_seconds() as f64 / pace_seconds as f64;
        Ok(Distance::new(factor, self.unit)?.convert_to(unit))
    }

    /// Speed in m/s at this pace shifted by `delta_seconds`.
    ///
    /// Used for speed-zone bands: a positive delta gives the slow bound, a
    /// negative delta the fast bound.
    pub fn meters_per_second_at_delta(&self, delta_seconds: i64) -> Result<f64> {
        let seconds = i64::try_from(self.time.total_seconds())
            .ok()
            .and_then(|s| s.checked_add(delta_seconds))
            .ok_or_else(|| Error::Range(format!("tolerance of {delta_seconds}s is out of range at {self}")))?;
        if seconds <= 0 {
            return Err(Error::Range(format!(
                "tolerance of {delta_seconds}s leaves no time per {} at {self}",
                self.unit
            )));
        }
        Ok(self.unit.meters() / seconds as f64)
    }

    /// The same pace expressed per one `unit`.
    pub fn convert_to(&self, unit: LengthUnit) -> Result<Self> {
        if unit == self.unit {
            return Ok(*self);
        }
        Self::from_time_distance(&self.time, &Distance::new(1.0, self.unit)?, Some(unit))
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min per {}", self.time, self.unit)
    }
}
