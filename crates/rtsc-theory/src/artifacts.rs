use serde::{Deserialize, Serialize};

/// Minimum I-V samples before the heating check is attempted.
pub const HEATING_MIN_POINTS: usize = 10;
/// |corr(P, R)| above which resistance is considered power dependent.
pub const HEATING_CORRELATION: f64 = 0.5;
/// Minimum R(T) samples before the ionic check is attempted.
pub const IONIC_MIN_POINTS: usize = 5;
/// |d ln R / dT| below which the curve is flagged as temperature independent.
pub const IONIC_SLOPE: f64 = 1e-3;

/// Voltage and current sweep, sample-aligned.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IvSweep {
    /// Voltage samples in V.
    pub voltage: Vec<f64>,
    /// Current samples in A.
    pub current: Vec<f64>,
}

/// Resistance versus temperature.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResistanceCurve {
    /// Temperatures in K.
    pub temperature_k: Vec<f64>,
    /// Resistances in Ω.
    pub resistance_ohm: Vec<f64>,
}

/// Flags for common measurement artifacts. `None` means the input was absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArtifactReport {
    /// Resistance tracks dissipated power.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heating_artifact: Option<bool>,
    /// Resistance is nearly temperature independent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ionic_conduction: Option<bool>,
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let (mx, my) = (mean(x), mean(y));
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        sxy += (a - mx) * (b - my);
        sxx += (a - mx).powi(2);
        syy += (b - my).powi(2);
    }
    let norm = (sxx * syy).sqrt();
    (norm > 0.0).then(|| sxy / norm)
}

fn least_squares_slope(x: &[f64], y: &[f64]) -> Option<f64> {
    let (mx, my) = (mean(x), mean(y));
    let sxx: f64 = x.iter().map(|a| (a - mx).powi(2)).sum();
    if sxx == 0.0 {
        return None;
    }
    let sxy: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    Some(sxy / sxx)
}

fn heating_artifact(iv: &IvSweep) -> bool {
    let (power, resistance): (Vec<f64>, Vec<f64>) = iv
        .voltage
        .iter()
        .zip(&iv.current)
        .filter(|(_, i)| **i != 0.0)
        .map(|(v, i)| (v * i, v / i))
        .unzip();
    if power.len() <= HEATING_MIN_POINTS {
        return false;
    }
    // A constant P or R gives no correlation.
    pearson(&power, &resistance).is_some_and(|r| r.abs() > HEATING_CORRELATION)
}

fn ionic_conduction(curve: &ResistanceCurve) -> bool {
    let (temps, log_r): (Vec<f64>, Vec<f64>) = curve
        .temperature_k
        .iter()
        .zip(&curve.resistance_ohm)
        .filter(|(_, r)| **r > 0.0)
        .map(|(t, r)| (*t, r.ln()))
        .unzip();
    if temps.len() <= IONIC_MIN_POINTS {
        return false;
    }
    least_squares_slope(&temps, &log_r).is_some_and(|slope| slope.abs() < IONIC_SLOPE)
}

/// Screens an I-V sweep and an R(T) curve for heating and ionic artifacts.
pub fn detect_artifacts(
    iv: Option<&IvSweep>,
    curve: Option<&ResistanceCurve>,
) -> ArtifactReport {
    ArtifactReport {
        heating_artifact: iv.map(heating_artifact),
        ionic_conduction: curve.map(ionic_conduction),
    }
}
