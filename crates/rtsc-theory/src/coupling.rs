use rtsc_core::errors::RtscError;
use serde::{Deserialize, Serialize};

/// Electron-boson coupling contributions from independent channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CouplingParameters {
    /// Hydrogen vibron coupling.
    pub lambda_h: f64,
    /// Plasmonic coupling.
    pub lambda_plasmon: f64,
    /// Flat-band coupling.
    pub lambda_flat: f64,
}

impl CouplingParameters {
    /// Builds a coupling set, rejecting negative or non-finite channels.
    pub fn new(lambda_h: f64, lambda_plasmon: f64, lambda_flat: f64) -> Result<Self, RtscError> {
        for (name, value) in [
            ("lambda_h", lambda_h),
            ("lambda_plasmon", lambda_plasmon),
            ("lambda_flat", lambda_flat),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RtscError::out_of_range(
                    name,
                    format!("{name}={value:?} must be a non-negative coupling contribution"),
                ));
            }
        }
        Ok(Self {
            lambda_h,
            lambda_plasmon,
            lambda_flat,
        })
    }

    /// Total effective coupling λ_eff.
    pub fn lambda_eff(&self) -> f64 {
        multi_channel_lambda(self.lambda_h, self.lambda_plasmon, self.lambda_flat)
    }
}

/// Sums the channel couplings into λ_eff.
pub fn multi_channel_lambda(lambda_h: f64, lambda_plasmon: f64, lambda_flat: f64) -> f64 {
    lambda_h + lambda_plasmon + lambda_flat
}
