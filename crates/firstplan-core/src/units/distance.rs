use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    Meter,
    Kilometer,
    Foot,
    Mile,
}

impl LengthUnit {
    /// Every supported unit.
    pub const ALL: [LengthUnit; 4] = [Self::Meter, Self::Kilometer, Self::Foot, Self::Mile];

    /// Meters in one of this unit.
    pub fn meters(self) -> f64 {
        match self {
            Self::Meter => 1.0,
            Self::Kilometer => 1000.0,
            Self::Foot => 0.3048,
            Self::Mile => 1609.344,
        }
    }

    /// Short symbol used in literals (`m`, `km`, `ft`, `mile`).
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Meter => "m",
            Self::Kilometer => "km",
            Self::Foot => "ft",
            Self::Mile => "mile",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for LengthUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "m" => Ok(Self::Meter),
            "km" => Ok(Self::Kilometer),
            "ft" => Ok(Self::Foot),
            "mile" => Ok(Self::Mile),
            other => Err(Error::Unit(other.to_owned())),
        }
    }
}

/// A non-negative distance in a given unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    value: f64,
    unit: LengthUnit,
}

impl Distance {
    /// Create a distance. Negative or non-finite magnitudes are rejected.
    pub fn new(value: f64, unit: LengthUnit) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::Range(format!(
                "distance must be a non-negative number, got {value}"
            )));
        }
        Ok(Self { value, unit })
    }

    /// Parse a literal such as `"4.5 km"` or `"400 m"`.
    pub fn parse(input: &str) -> Result<Self> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        let [number, unit] = tokens.as_slice() else {
            return Err(Error::format(
                "distance",
                input,
                format!("expected 2 tokens, number and unit, got {}", tokens.len()),
            ));
        };
        let value: f64 = number
            .parse()
            .map_err(|e| Error::format("distance", input, format!("first token is not a number: {e}")))?;
        if !value.is_finite() {
            return Err(Error::format("distance", input, "first token is not a finite number"));
        }
        if value < 0.0 {
            return Err(Error::Range(format!(
                "distance must be a non-negative number, got {value}"
            )));
        }
        let unit: LengthUnit = unit.parse()?;
        Self::new(value, unit)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// The magnitude expressed in `unit`.
    pub fn convert_to(&self, unit: LengthUnit) -> f64 {
        if self.unit == unit {
            self.value
        } else {
            self.value * self.unit.meters() / unit.meters()
        }
    }

    /// The same length re-expressed in `unit`.
    pub fn in_unit(&self, unit: LengthUnit) -> Distance {
        Distance {
            value: self.convert_to(unit),
            unit,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", format_magnitude(self.value), self.unit)
    }
}

/// Render a float with at least one decimal place (`400.0`, `42.195`).
pub(crate) fn format_magnitude(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
