use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Unit for expressing a duration as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
}

impl TimeUnit {
    /// Seconds in one of this unit.
    pub fn seconds(self) -> f64 {
        match self {
            Self::Second => 1.0,
            Self::Minute => 60.0,
            Self::Hour => 3600.0,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
        };
        f.write_str(s)
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "second" => Ok(Self::Second),
            "minute" => Ok(Self::Minute),
            "hour" => Ok(Self::Hour),
            other => Err(Error::Argument(format!(
                "unknown time unit {other:?} (expected second, minute, or hour)"
            ))),
        }
    }
}

/// A non-negative duration with whole-second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Time {
    seconds: u64,
}

impl Time {
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            seconds: u64::from(hours) * 3600 + u64::from(minutes) * 60 + u64::from(seconds),
        }
    }

    pub fn from_seconds(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Parse clock text: `H:MM:SS`, or `H:MM` (hours and minutes).
    ///
    /// Minutes and seconds must be below 60. An all-zero result is rejected
    /// as ambiguous.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let fields: Vec<&str> = trimmed.split(':').collect();
        if !(2..=3).contains(&fields.len()) {
            return Err(Error::format("time", input, "expected H:MM:SS or H:MM"));
        }

        let mut parts = [0u32; 3];
        for (slot, field) in parts.iter_mut().zip(&fields) {
            if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::format("time", input, format!("{field:?} is not a number")));
            }
            *slot = field
                .parse()
                .map_err(|e| Error::format("time", input, format!("{field:?}: {e}")))?;
        }
        let [hours, minutes, seconds] = parts;
        if minutes >= 60 || seconds >= 60 {
            return Err(Error::format("time", input, "minutes and seconds must be below 60"));
        }

        let time = Self::new(hours, minutes, seconds);
        if time.seconds == 0 {
            return Err(Error::format("time", input, "unknown string format"));
        }
        Ok(time)
    }

    pub fn total_seconds(&self) -> u64 {
        self.seconds
    }

    pub fn hours(&self) -> u64 {
        self.seconds / 3600
    }

    pub fn minutes(&self) -> u64 {
        self.seconds % 3600 / 60
    }

    pub fn seconds(&self) -> u64 {
        self.seconds % 60
    }

    /// The duration expressed in `unit`.
    pub fn convert_to(&self, unit: TimeUnit) -> f64 {
        self.seconds as f64 / unit.seconds()
    }

    /// Shift by a signed number of seconds; a result below zero is rejected.
    pub fn offset(&self, delta_seconds: i64) -> Result<Self> {
        let shifted = i128::from(self.seconds) + i128::from(delta_seconds);
        u64::try_from(shifted)
            .map(Self::from_seconds)
            .map_err(|_| Error::Range(format!("{self} shifted by {delta_seconds}s is negative")))
    }

    pub fn saturating_sub(&self, other: Time) -> Time {
        Self::from_seconds(self.seconds.saturating_sub(other.seconds))
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.hours(), self.minutes(), self.seconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Time::new(2, 15, 12).to_string(), "2:15:12");
        assert_eq!(Time::default().to_string(), "0:00:00");
        assert_eq!(Time::new(0, 75, 0).to_string(), "1:15:00");
    }

    #[test]
    fn parse_clock_text() {
        assert_eq!(Time::parse("2:03:23").unwrap(), Time::new(2, 3, 23));
        assert_eq!(Time::parse("0:20:13").unwrap(), Time::new(0, 20, 13));
        assert_eq!(Time::parse(" 3:45 ").unwrap(), Time::new(3, 45, 0));
    }

    #[test]
    fn parse_rejects_garbage() {
        for input in ["abc", "3", "4/15/2015", "1:2:3:4", "1::3", "0:61:00", "0:10:60", "-1:00:00"] {
            let err = Time::parse(input).unwrap_err();
            assert!(matches!(err, Error::Format { .. }), "{input:?}: {err}");
        }
    }

    #[test]
    fn parse_rejects_all_zero() {
        let err = Time::parse("0:00:00").unwrap_err();
        assert!(matches!(err, Error::Format { .. }), "got: {err}");
    }

    #[test]
    fn conversions() {
        let t = Time::new(1, 30, 0);
        assert_eq!(t.convert_to(TimeUnit::Second), 5400.0);
        assert_eq!(t.convert_to(TimeUnit::Minute), 90.0);
        assert_eq!(t.convert_to(TimeUnit::Hour), 1.5);
    }

    #[test]
    fn offset_and_ordering() {
        let t = Time::new(0, 10, 0);
        assert_eq!(t.offset(15).unwrap(), Time::new(0, 10, 15));
        assert_eq!(t.offset(-600).unwrap(), Time::default());
        assert!(matches!(t.offset(-601), Err(Error::Range(_))));
        assert!(Time::new(0, 20, 13) < Time::new(0, 20, 20));
        assert_eq!(t.saturating_sub(Time::new(1, 0, 0)), Time::default());
    }

    #[test]
    fn time_unit_parse() {
        assert_eq!("minute".parse::<TimeUnit>().unwrap(), TimeUnit::Minute);
        assert!(matches!("day".parse::<TimeUnit>(), Err(Error::Argument(_))));
    }
}
