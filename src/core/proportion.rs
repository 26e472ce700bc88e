use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// A ratio in the closed interval [0, 1], e.g. the fraction of a layer taken
/// up by one material.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Proportion(f64);

impl Proportion {
    pub const WHOLE: Proportion = Proportion(1.);
    pub const NONE: Proportion = Proportion(0.);

    pub fn from_ratio(ratio: f64) -> Result<Self, ProportionError> {
        // also rejects NaN, which fails both comparisons
        if !(0. ..=1.).contains(&ratio) {
            return Err(ProportionError::OutOfRange(ratio));
        }

        Ok(Self(ratio))
    }

    pub fn from_percent(percent: f64) -> Result<Self, ProportionError> {
        Self::from_ratio(percent / 100.).map_err(|_| ProportionError::PercentOutOfRange(percent))
    }

    pub fn as_ratio(&self) -> f64 {
        self.0
    }

    pub fn complement(&self) -> Proportion {
        Self(1. - self.0)
    }
}

impl Display for Proportion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Proportion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let ratio = f64::deserialize(deserializer)?;
        Self::from_ratio(ratio).map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ProportionError {
    #[error("Proportion must be between 0 and 1 inclusive, got {0}")]
    OutOfRange(f64),
    #[error("Percentage must be between 0 and 100 inclusive, got {0}")]
    PercentOutOfRange(f64),
}
