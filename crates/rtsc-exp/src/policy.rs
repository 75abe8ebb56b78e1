use std::fs;
use std::path::Path;

use rtsc_core::errors::{ErrorInfo, RtscError};
use serde::{Deserialize, Serialize};

/// Thresholds for the four-point transport check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportPolicy {
    /// Share of the hottest samples averaged into R_n.
    #[serde(default = "TransportPolicy::default_normal_state_fraction")]
    pub normal_state_fraction: f64,
    /// Largest accepted min R / R_n.
    #[serde(default = "TransportPolicy::default_max_residual_ratio")]
    pub max_residual_ratio: f64,
    /// Relative Tc tolerance against the prediction.
    #[serde(default = "default_tc_rel_tol")]
    pub tc_rel_tol: f64,
}

impl TransportPolicy {
    const fn default_normal_state_fraction() -> f64 {
        0.2
    }

    const fn default_max_residual_ratio() -> f64 {
        1e-3
    }
}

impl Default for TransportPolicy {
    fn default() -> Self {
        Self {
            normal_state_fraction: Self::default_normal_state_fraction(),
            max_residual_ratio: Self::default_max_residual_ratio(),
            tc_rel_tol: default_tc_rel_tol(),
        }
    }
}

/// Thresholds for the diamagnetic shielding check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SusceptibilityPolicy {
    /// Smallest accepted −min χ'.
    #[serde(default = "SusceptibilityPolicy::default_min_shielding_fraction")]
    pub min_shielding_fraction: f64,
    /// Fraction of min χ' that marks the onset.
    #[serde(default = "SusceptibilityPolicy::default_onset_fraction")]
    pub onset_fraction: f64,
    /// Relative Tc tolerance against the prediction.
    #[serde(default = "default_tc_rel_tol")]
    pub tc_rel_tol: f64,
}

impl SusceptibilityPolicy {
    const fn default_min_shielding_fraction() -> f64 {
        0.5
    }

    const fn default_onset_fraction() -> f64 {
        0.1
    }
}

impl Default for SusceptibilityPolicy {
    fn default() -> Self {
        Self {
            min_shielding_fraction: Self::default_min_shielding_fraction(),
            onset_fraction: Self::default_onset_fraction(),
            tc_rel_tol: default_tc_rel_tol(),
        }
    }
}

/// Thresholds for the Raman gap check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RamanPolicy {
    /// Shifts below this are treated as Rayleigh tail and skipped.
    #[serde(default = "RamanPolicy::default_min_shift_mev")]
    pub min_shift_mev: f64,
    /// Relative 2Δ tolerance against the prediction.
    #[serde(default = "RamanPolicy::default_gap_rel_tol")]
    pub gap_rel_tol: f64,
}

impl RamanPolicy {
    const fn default_min_shift_mev() -> f64 {
        5.0
    }

    const fn default_gap_rel_tol() -> f64 {
        0.2
    }
}

impl Default for RamanPolicy {
    fn default() -> Self {
        Self {
            min_shift_mev: Self::default_min_shift_mev(),
            gap_rel_tol: Self::default_gap_rel_tol(),
        }
    }
}

const fn default_tc_rel_tol() -> f64 {
    0.15
}

/// Policy bundle applied by the analysis driver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationPolicy {
    /// Transport thresholds.
    #[serde(default)]
    pub transport: TransportPolicy,
    /// Susceptibility thresholds.
    #[serde(default)]
    pub susceptibility: SusceptibilityPolicy,
    /// Raman thresholds.
    #[serde(default)]
    pub raman: RamanPolicy,
}

impl EvaluationPolicy {
    /// Parses a YAML policy; absent keys keep their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, RtscError> {
        serde_yaml::from_str(text)
            .map_err(|err| RtscError::Serde(ErrorInfo::new("yaml-deserialize", err.to_string())))
    }

    /// Loads a YAML policy file.
    pub fn load(path: &Path) -> Result<Self, RtscError> {
        let text = fs::read_to_string(path)
            .map_err(|err| RtscError::missing_input("policy", path, &err))?;
        Self::from_yaml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let policy = EvaluationPolicy::from_yaml_str(
            "transport:\n  tc_rel_tol: 0.05\nraman:\n  min_shift_mev: 8\n",
        )
        .unwrap();
        assert_eq!(policy.transport.tc_rel_tol, 0.05);
        assert_eq!(policy.transport.normal_state_fraction, 0.2);
        assert_eq!(policy.raman.min_shift_mev, 8.0);
        assert_eq!(policy.raman.gap_rel_tol, 0.2);
        assert_eq!(policy.susceptibility, SusceptibilityPolicy::default());
    }

    #[test]
    fn empty_mapping_is_default() {
        assert_eq!(
            EvaluationPolicy::from_yaml_str("{}").unwrap(),
            EvaluationPolicy::default()
        );
        assert!(EvaluationPolicy::from_yaml_str("transport: [1, 2]").is_err());
    }
}
