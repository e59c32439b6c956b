//! Parameters for one enhancement call.
//!
//! `AgcwdParams` is passed explicitly into every pipeline invocation, so
//! concurrent calls on different images can use different weights.

use serde::{Deserialize, Serialize};

use crate::error::AgcwdError;
use crate::parallel::DEFAULT_PARALLEL_THRESHOLD;

/// Default weighting exponent.
pub const DEFAULT_WEIGHT: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgcwdParams {
    /// Weighting exponent applied to the normalized PDF. Valid range `(0, 1]`.
    #[serde(default = "AgcwdParams::default_weight")]
    pub weight: f32,
    /// Pixel count at which histogram, remap and composition switch to rayon.
    #[serde(default = "AgcwdParams::default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl AgcwdParams {
    /// Parameters with the given weight and the default parallel threshold.
    pub fn with_weight(weight: f32) -> Self {
        Self {
            weight,
            ..Self::default()
        }
    }

    /// Load parameters from JSON. Missing fields take their defaults.
    ///
    /// The result is not validated; see [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, AgcwdError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject weights the weighting formula is undefined or degenerate for.
    pub fn validate(&self) -> Result<(), AgcwdError> {
        let w = self.weight;
        if !w.is_finite() || w <= 0.0 || w > 1.0 {
            return Err(AgcwdError::InvalidWeight(w));
        }
        Ok(())
    }

    fn default_weight() -> f32 {
        DEFAULT_WEIGHT
    }

    fn default_parallel_threshold() -> usize {
        DEFAULT_PARALLEL_THRESHOLD
    }
}

impl Default for AgcwdParams {
    fn default() -> Self {
        Self {
            weight: DEFAULT_WEIGHT,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weight_is_half() {
        let params = AgcwdParams::default();
        assert_eq!(params.weight, 0.5);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_unit_weight() {
        assert!(AgcwdParams::with_weight(1.0).validate().is_ok());
        assert!(AgcwdParams::with_weight(1e-3).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_domain_weights() {
        for w in [0.0, -0.5, 1.5, f32::NAN, f32::INFINITY] {
            let err = AgcwdParams::with_weight(w).validate().unwrap_err();
            assert!(matches!(err, AgcwdError::InvalidWeight(_)), "weight {w} accepted");
        }
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let params = AgcwdParams::from_json(r#"{ "weight": 0.75 }"#).unwrap();
        assert_eq!(params.weight, 0.75);
        assert_eq!(params.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);

        let params = AgcwdParams::from_json("{}").unwrap();
        assert_eq!(params, AgcwdParams::default());
    }

    #[test]
    fn test_from_json_reports_malformed_input() {
        let err = AgcwdParams::from_json("{ weight: }").unwrap_err();
        assert!(matches!(err, AgcwdError::Config(_)));
    }
}
