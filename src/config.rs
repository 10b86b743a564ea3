use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which filtering pass the encoder runs. A threshold of `0` means "not given".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Unfiltered,
    /// Keep items with `ratio >= min`.
    Frequent,
    /// Keep items with `ratio <= max`.
    Inverse,
    /// Report items with `ratio < max`, combine items with `ratio >= min`.
    Rare,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportThresholds {
    pub min_support_ratio: f64,
    pub max_support_ratio: f64,
}

impl SupportThresholds {
    pub fn frequent(min_support_ratio: f64) -> Self {
        Self {
            min_support_ratio,
            max_support_ratio: 0.0,
        }
    }

    pub fn inverse(max_support_ratio: f64) -> Self {
        Self {
            min_support_ratio: 0.0,
            max_support_ratio,
        }
    }

    pub fn rare(max_support_ratio: f64, min_support_ratio: f64) -> Self {
        Self {
            min_support_ratio,
            max_support_ratio,
        }
    }

    pub fn mode(&self) -> FilterMode {
        match (self.max_support_ratio > 0.0, self.min_support_ratio > 0.0) {
            (true, true) => FilterMode::Rare,
            (true, false) => FilterMode::Inverse,
            (false, true) => FilterMode::Frequent,
            (false, false) => FilterMode::Unfiltered,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_ratio(self.min_support_ratio)?;
        validate_ratio(self.max_support_ratio)
    }
}

pub(crate) fn validate_ratio(ratio: f64) -> Result<()> {
    if (0.0..=1.0).contains(&ratio) {
        Ok(())
    } else {
        Err(Error::ThresholdOutOfRange(ratio))
    }
}
