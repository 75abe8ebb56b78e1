use std::path::{Path, PathBuf};

use csv::Writer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rtsc_core::errors::{ErrorInfo, RtscError};
use serde::{Deserialize, Serialize};

use crate::tables::{
    RamanRow, SusceptibilityRow, TransportRow, RAMAN_FILE, SUSCEPTIBILITY_FILE, TRANSPORT_FILE,
};

const TRANSITION_WIDTH_K: f64 = 0.8;
const SHIELDING_DEPTH: f64 = 0.95;
const RAMAN_PEAK_WIDTH_MEV: f64 = 6.0;

/// Largest transition temperature a synthetic directory may carry, in K.
pub const MAX_SYNTHETIC_TC_K: f64 = 1000.0;
/// Largest Raman peak position a synthetic directory may carry, in meV.
pub const MAX_SYNTHETIC_TWO_DELTA_MEV: f64 = 1000.0;

/// Recipe for a measurement directory consistent with a predicted Tc and 2Δ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticMeasurements {
    /// Transition temperature imprinted on transport and χ'.
    pub tc_k: f64,
    /// Raman pair-breaking peak position.
    pub two_delta_mev: f64,
    /// Relative noise amplitude.
    #[serde(default)]
    pub noise_level: f64,
    /// RNG seed.
    #[serde(default)]
    pub seed: u64,
}

fn normal_state_resistance(temperature_k: f64) -> f64 {
    100.0 + 0.1 * (temperature_k - 300.0)
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn gaussian_noise(rng: &mut StdRng, scale: f64) -> f64 {
    scale * rng.sample::<f64, _>(StandardNormal)
}

fn check_target(parameter: &str, value: f64, unit: &str, max: f64) -> Result<(), RtscError> {
    if value.is_finite() && value > 0.0 && value <= max {
        return Ok(());
    }
    Err(RtscError::out_of_range(
        parameter,
        format!("synthetic {parameter}={value:?} {unit} must be in (0, {max}]"),
    ))
}

impl SyntheticMeasurements {
    fn temperatures(&self) -> Vec<f64> {
        let start = (self.tc_k - 80.0).max(1.0).round();
        (0..=160).map(|i| start + i as f64).collect()
    }

    /// Four-point R(T) with a logistic drop at `tc_k` and multiplicative noise.
    pub fn transport_rows(&self, rng: &mut StdRng) -> Vec<TransportRow> {
        self.temperatures()
            .into_iter()
            .map(|t| {
                let clean =
                    normal_state_resistance(t) * logistic((t - self.tc_k) / TRANSITION_WIDTH_K);
                let noisy = clean * (1.0 + gaussian_noise(rng, self.noise_level));
                TransportRow {
                    temperature_k: t,
                    resistance_ohm: noisy.max(0.0),
                }
            })
            .collect()
    }

    /// χ'(T) shielding curve whose onset sits just below `tc_k`.
    pub fn susceptibility_rows(&self, rng: &mut StdRng) -> Vec<SusceptibilityRow> {
        self.temperatures()
            .into_iter()
            .map(|t| SusceptibilityRow {
                temperature_k: t,
                chi_real: -SHIELDING_DEPTH * logistic(-(t - self.tc_k + 1.5))
                    + gaussian_noise(rng, 0.01 * self.noise_level),
            })
            .collect()
    }

    /// Raman spectrum with a Gaussian peak at `two_delta_mev` on a decaying background.
    pub fn raman_rows(&self, rng: &mut StdRng) -> Vec<RamanRow> {
        let top = (2.0 * self.two_delta_mev).max(200.0).ceil() as usize;
        (0..=top)
            .map(|i| {
                let shift = i as f64;
                let peak = (-((shift - self.two_delta_mev) / RAMAN_PEAK_WIDTH_MEV).powi(2)).exp();
                let background = 0.2 * (-shift / 20.0).exp();
                RamanRow {
                    shift_mev: shift,
                    intensity: peak + background + gaussian_noise(rng, 0.02 * self.noise_level),
                }
            })
            .collect()
    }

    /// Writes the three analysis tables into `dir` and returns their paths.
    ///
    /// Tc and 2Δ must be finite, positive and no larger than
    /// [`MAX_SYNTHETIC_TC_K`] and [`MAX_SYNTHETIC_TWO_DELTA_MEV`].
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>, RtscError> {
        check_target("tc", self.tc_k, "K", MAX_SYNTHETIC_TC_K)?;
        check_target("two_delta", self.two_delta_mev, "meV", MAX_SYNTHETIC_TWO_DELTA_MEV)?;
        if !(self.noise_level.is_finite() && self.noise_level >= 0.0) {
            return Err(RtscError::out_of_range(
                "noise",
                format!("noise={:?} must be finite and ≥ 0", self.noise_level),
            ));
        }
        std::fs::create_dir_all(dir).map_err(|err| {
            RtscError::Serde(
                ErrorInfo::new("dir-create", format!("cannot create {}", dir.display()))
                    .with_hint(err.to_string()),
            )
        })?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let transport = dir.join(TRANSPORT_FILE);
        write_rows(&transport, &self.transport_rows(&mut rng))?;
        let chi = dir.join(SUSCEPTIBILITY_FILE);
        write_rows(&chi, &self.susceptibility_rows(&mut rng))?;
        let raman = dir.join(RAMAN_FILE);
        write_rows(&raman, &self.raman_rows(&mut rng))?;
        Ok(vec![transport, chi, raman])
    }
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), RtscError> {
    let wrap = |err: csv::Error| {
        RtscError::Serde(
            ErrorInfo::new("csv-write", format!("cannot write {}", path.display()))
                .with_path(path)
                .with_hint(err.to_string()),
        )
    };
    let mut writer = Writer::from_path(path).map_err(wrap)?;
    for row in rows {
        writer.serialize(row).map_err(wrap)?;
    }
    writer.flush().map_err(|err| wrap(err.into()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::read_table;

    #[test]
    fn written_tables_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let recipe = SyntheticMeasurements {
            tc_k: 300.0,
            two_delta_mev: 90.0,
            noise_level: 0.0,
            seed: 3,
        };
        let paths = recipe.write_to(dir.path()).unwrap();
        assert_eq!(paths.len(), 3);
        let rows: Vec<TransportRow> = read_table(&paths[0]).unwrap();
        assert_eq!(rows.len(), 161);
        assert_eq!(rows[0].temperature_k, 220.0);
        assert!(rows[0].resistance_ohm < 1e-20);
        let raman: Vec<RamanRow> = read_table(&paths[2]).unwrap();
        assert_eq!(raman.len(), 201);
    }

    #[test]
    fn unphysical_targets_are_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let valid = SyntheticMeasurements {
            tc_k: 300.0,
            two_delta_mev: 90.0,
            noise_level: 0.0,
            seed: 0,
        };
        let cases = [
            SyntheticMeasurements { tc_k: 0.0, ..valid.clone() },
            SyntheticMeasurements { tc_k: f64::NAN, ..valid.clone() },
            SyntheticMeasurements { two_delta_mev: f64::INFINITY, ..valid.clone() },
            SyntheticMeasurements { two_delta_mev: 1e300, ..valid.clone() },
            SyntheticMeasurements { noise_level: -0.1, ..valid.clone() },
        ];
        for recipe in cases {
            let err = recipe.write_to(dir.path()).unwrap_err();
            assert_eq!(err.kind(), "out_of_range_parameter", "{recipe:?}");
        }
        assert!(!dir.path().join(RAMAN_FILE).exists());
    }

    #[test]
    fn largest_accepted_gap_stays_bounded() {
        let recipe = SyntheticMeasurements {
            tc_k: 300.0,
            two_delta_mev: MAX_SYNTHETIC_TWO_DELTA_MEV,
            noise_level: 0.0,
            seed: 0,
        };
        let rows = recipe.raman_rows(&mut StdRng::seed_from_u64(0));
        assert_eq!(rows.len(), 2001);
    }
}
