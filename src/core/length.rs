use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One length input: absolute pixels or a percentage of a reference size.
///
/// Configuration accepts lengths as plain numbers (`42`) or percentage
/// strings (`"37.5%"`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl Length {
    #[must_use]
    pub fn is_percent(self) -> bool {
        matches!(self, Self::Percent(_))
    }

    pub fn validate(self) -> ChartResult<()> {
        let raw = match self {
            Self::Px(value) | Self::Percent(value) => value,
        };
        if !raw.is_finite() {
            return Err(ChartError::InvalidData("length must be finite".to_owned()));
        }
        Ok(())
    }
}

/// Resolves a length against a reference size.
///
/// Pixel lengths pass through untouched. Percentages require a reference:
/// asking for one without a resolved reference is a caller-ordering bug
/// (the parent's own box must be resolved first) and fails with
/// [`ChartError::MissingReference`].
pub fn measure(length: Length, reference: Option<f64>) -> ChartResult<f64> {
    length.validate()?;
    match length {
        Length::Px(value) => Ok(value),
        Length::Percent(pct) => {
            let reference = reference.ok_or(ChartError::MissingReference)?;
            Ok(pct / 100.0 * reference)
        }
    }
}

impl FromStr for Length {
    type Err = ChartError;

    fn from_str(raw: &str) -> ChartResult<Self> {
        let trimmed = raw.trim();
        let parsed = if let Some(pct) = trimmed.strip_suffix('%') {
            pct.trim()
                .parse::<f64>()
                .map(Length::Percent)
                .map_err(|_| ChartError::InvalidData(format!("invalid percentage `{raw}`")))?
        } else {
            trimmed
                .parse::<f64>()
                .map(Length::Px)
                .map_err(|_| ChartError::InvalidData(format!("invalid length `{raw}`")))?
        };
        parsed.validate()?;
        Ok(parsed)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(value) => write!(f, "{value}"),
            Self::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

impl Serialize for Length {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Px(value) => serializer.serialize_f64(*value),
            Self::Percent(_) => serializer.serialize_str(&self.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => {
                let length = Length::Px(value);
                length.validate().map_err(de::Error::custom)?;
                Ok(length)
            }
            Repr::Text(text) => text.parse().map_err(de::Error::custom),
        }
    }
}
