use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Instrument sensor a series comes from; selects the value-axis formatter.
///
/// Unknown names deserialize to `Generic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SensorType {
    #[serde(rename = "temperature")]
    Temperature,
    #[serde(rename = "pressure")]
    Pressure,
    #[serde(rename = "gForce")]
    GForce,
    #[default]
    #[serde(other, rename = "generic")]
    Generic,
}

impl SensorType {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Pressure => "pressure",
            Self::GForce => "gForce",
            Self::Generic => "generic",
        }
    }

    /// Formats a value-axis tick for this sensor.
    #[must_use]
    pub fn format_value(self, value: f64) -> String {
        match self {
            Self::Temperature | Self::Pressure => format!("{value:.2}"),
            Self::GForce => format!("{value:.1}"),
            Self::Generic => format!("{value}"),
        }
    }
}

impl FromStr for SensorType {
    type Err = std::convert::Infallible;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(match name {
            "temperature" => Self::Temperature,
            "pressure" => Self::Pressure,
            "gForce" => Self::GForce,
            _ => Self::Generic,
        })
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
