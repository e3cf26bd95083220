//! Default scalar parameters for the statistics functions.
//!
//! Every function in `perfstat-stats` takes its parameters explicitly; this
//! struct is where a caller keeps the values it would otherwise repeat.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::StatError;

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("confidence {0} must lie strictly between 0 and 1")]
    Confidence(f64),
    #[error("frequency {0} must be a finite number of periods per year greater than 0")]
    Frequency(f64),
    #[error("start value {0} must be finite and non-zero")]
    StartValue(f64),
    #[error("partial moment degree {0} must be finite and greater than 0")]
    Degree(f64),
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
}

impl From<ConfigError> for StatError {
    fn from(err: ConfigError) -> Self {
        StatError::invalid_parameter(err.to_string())
    }
}

/// Configuration for the statistics functions
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatsConfig {
    /// VaR confidence level.
    pub confidence: f64,
    /// Return periods per year.
    pub frequency: f64,
    /// Annual risk-free rate.
    pub risk_free: f64,
    /// Annual minimum acceptable return.
    pub target_return: f64,
    /// First value of the total-return index.
    pub start_value: f64,
    /// Degree of the lower partial moment in the Kappa ratio.
    pub lpm_degree: f64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            confidence: 0.95,
            frequency: 12.0,
            risk_free: 0.0,
            target_return: 0.0,
            start_value: 1.0,
            lpm_degree: 2.0,
        }
    }
}

impl StatsConfig {
    pub fn monthly() -> Self {
        Self::default()
    }

    pub fn daily() -> Self {
        Self {
            frequency: 252.0,
            ..Default::default()
        }
    }

    pub fn weekly() -> Self {
        Self {
            frequency: 52.0,
            ..Default::default()
        }
    }

    pub fn quarterly() -> Self {
        Self {
            frequency: 4.0,
            ..Default::default()
        }
    }

    pub fn annual() -> Self {
        Self {
            frequency: 1.0,
            ..Default::default()
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_risk_free(mut self, risk_free: f64) -> Self {
        self.risk_free = risk_free;
        self
    }

    pub fn with_target_return(mut self, target_return: f64) -> Self {
        self.target_return = target_return;
        self
    }

    pub fn with_start_value(mut self, start_value: f64) -> Self {
        self.start_value = start_value;
        self
    }

    pub fn with_lpm_degree(mut self, degree: f64) -> Self {
        self.lpm_degree = degree;
        self
    }

    /// Checks every field against the domain the statistics functions accept.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(ConfigError::Confidence(self.confidence));
        }
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(ConfigError::Frequency(self.frequency));
        }
        if !self.start_value.is_finite() || self.start_value == 0.0 {
            return Err(ConfigError::StartValue(self.start_value));
        }
        if !self.lpm_degree.is_finite() || self.lpm_degree <= 0.0 {
            return Err(ConfigError::Degree(self.lpm_degree));
        }
        for (field, value) in [
            ("risk_free", self.risk_free),
            ("target_return", self.target_return),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }
        Ok(())
    }
}
