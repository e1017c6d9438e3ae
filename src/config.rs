//! Run configuration
//!
//! Damping factor, convergence threshold, iteration cap, auto-advance speed
//! and the matrix display cap. Loaded from JSON with every field optional.

use crate::error::{RankError, RankResult};
use rankwalk_algorithms::PageRankConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Auto-advance cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Speed {
    /// Period between two automatic advances
    pub fn period(&self) -> Duration {
        match self {
            Speed::Slow => Duration::from_millis(1000),
            Speed::Normal => Duration::from_millis(500),
            Speed::Fast => Duration::from_millis(100),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Speed::Slow => "slow",
            Speed::Normal => "normal",
            Speed::Fast => "fast",
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Speed {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow" => Ok(Speed::Slow),
            "normal" => Ok(Speed::Normal),
            "fast" => Ok(Speed::Fast),
            _ => Err(RankError::UnknownSpeed(s.to_string())),
        }
    }
}

/// Configuration for a PageRank run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Damping factor, strictly between 0 and 1
    pub alpha: f64,
    /// L1 convergence threshold
    pub epsilon: f64,
    /// Iteration cap
    pub max_iterations: usize,
    /// Auto-advance cadence
    pub speed: Speed,
    /// Largest graph for which matrices are produced
    pub matrix_display_cap: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            alpha: 0.85,
            epsilon: 1e-6,
            max_iterations: 100,
            speed: Speed::Normal,
            matrix_display_cap: 8,
        }
    }
}

impl RankConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    /// Reject values that would make a run meaningless
    pub fn validate(&self) -> RankResult<()> {
        validate_alpha(self.alpha)?;
        if self.epsilon.is_nan() || self.epsilon <= 0.0 {
            return Err(RankError::InvalidTolerance(self.epsilon));
        }
        if self.max_iterations == 0 {
            return Err(RankError::InvalidMaxIterations(self.max_iterations));
        }
        Ok(())
    }

    /// Parameters for the algorithms crate
    pub fn page_rank_config(&self) -> PageRankConfig {
        PageRankConfig {
            damping_factor: self.alpha,
            max_iterations: self.max_iterations,
            tolerance: self.epsilon,
        }
    }

    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> RankResult<Self> {
        let config: RankConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> RankResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

pub(crate) fn validate_alpha(alpha: f64) -> RankResult<()> {
    // NaN fails both comparisons
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(RankError::InvalidDampingFactor(alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RankConfig::default();
        assert_eq!(config.alpha, 0.85);
        assert_eq!(config.epsilon, 1e-6);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.speed, Speed::Normal);
        assert_eq!(config.matrix_display_cap, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        for alpha in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
            let result = RankConfig::default().with_alpha(alpha).validate();
            assert!(matches!(result, Err(RankError::InvalidDampingFactor(_))));
        }
        for epsilon in [0.0, -1e-6, f64::NAN] {
            let result = RankConfig::default().with_epsilon(epsilon).validate();
            assert!(matches!(result, Err(RankError::InvalidTolerance(_))));
        }
        let result = RankConfig::default().with_max_iterations(0).validate();
        assert!(matches!(result, Err(RankError::InvalidMaxIterations(0))));
    }

    #[test]
    fn test_speed_periods_and_parsing() {
        assert_eq!(Speed::Slow.period(), Duration::from_millis(1000));
        assert_eq!(Speed::Normal.period(), Duration::from_millis(500));
        assert_eq!(Speed::Fast.period(), Duration::from_millis(100));

        assert_eq!("FAST".parse::<Speed>().unwrap(), Speed::Fast);
        assert_eq!(" slow ".parse::<Speed>().unwrap(), Speed::Slow);
        let err = "warp".parse::<Speed>().unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_partial_json() {
        let config = RankConfig::from_json_str(r#"{"alpha": 0.5, "speed": "fast"}"#).unwrap();
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.speed, Speed::Fast);
        assert_eq!(config.max_iterations, 100);

        let err = RankConfig::from_json_str(r#"{"alpha": 1.2}"#).unwrap_err();
        assert!(matches!(err, RankError::InvalidDampingFactor(_)));

        let err = RankConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, RankError::Serialization(_)));
    }

    #[test]
    fn test_engine_config_serializes() {
        let engine = RankConfig::default().with_alpha(0.5).page_rank_config();
        let value = serde_json::to_value(engine).unwrap();
        assert_eq!(value["damping_factor"], 0.5);
        assert_eq!(value["max_iterations"], 100);

        let back: PageRankConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, engine);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"epsilon": 1e-9, "max_iterations": 250}}"#).unwrap();

        let config = RankConfig::load(file.path()).unwrap();
        assert_eq!(config.epsilon, 1e-9);
        assert_eq!(config.max_iterations, 250);
    }
}
