use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use rtsc_core::errors::{ErrorInfo, RtscError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Four-point transport file name inside an input directory.
pub const TRANSPORT_FILE: &str = "iv_4probe.csv";
/// AC susceptibility file name inside an input directory.
pub const SUSCEPTIBILITY_FILE: &str = "ac_susceptibility.csv";
/// Raman spectrum file name inside an input directory.
pub const RAMAN_FILE: &str = "raman.csv";
/// Fewest rows an evaluator will accept.
pub const MIN_ROWS: usize = 3;

/// One row of `iv_4probe.csv`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransportRow {
    /// Sample temperature.
    #[serde(rename = "temperature_K")]
    pub temperature_k: f64,
    /// Four-point resistance.
    pub resistance_ohm: f64,
}

/// One row of `ac_susceptibility.csv`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SusceptibilityRow {
    /// Sample temperature.
    #[serde(rename = "temperature_K")]
    pub temperature_k: f64,
    /// Real part of the volume susceptibility; −1 is full shielding.
    pub chi_real: f64,
}

/// One row of `raman.csv`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RamanRow {
    /// Raman shift.
    #[serde(rename = "shift_meV")]
    pub shift_mev: f64,
    /// Detector counts, arbitrary units.
    pub intensity: f64,
}

/// A two-column measurement sample.
pub trait Sample {
    /// Value the table is sorted by.
    fn abscissa(&self) -> f64;
    /// Measured value.
    fn ordinate(&self) -> f64;
}

impl Sample for TransportRow {
    fn abscissa(&self) -> f64 {
        self.temperature_k
    }

    fn ordinate(&self) -> f64 {
        self.resistance_ohm
    }
}

impl Sample for SusceptibilityRow {
    fn abscissa(&self) -> f64 {
        self.temperature_k
    }

    fn ordinate(&self) -> f64 {
        self.chi_real
    }
}

impl Sample for RamanRow {
    fn abscissa(&self) -> f64 {
        self.shift_mev
    }

    fn ordinate(&self) -> f64 {
        self.intensity
    }
}

fn csv_error(path: &Path, err: csv::Error) -> RtscError {
    RtscError::Data(
        ErrorInfo::new("csv-parse", format!("failed to parse {}", path.display()))
            .with_path(path)
            .with_hint(err.to_string()),
    )
}

/// Reads a headed CSV table, sorted by its abscissa.
///
/// Extra columns are ignored. A missing file is [`RtscError::MissingInput`];
/// fewer than [`MIN_ROWS`] rows or a non-finite value is [`RtscError::Data`].
pub fn read_table<T>(path: &Path) -> Result<Vec<T>, RtscError>
where
    T: DeserializeOwned + Sample,
{
    let file =
        File::open(path).map_err(|err| RtscError::missing_input("input table", path, &err))?;
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
    let mut rows = Vec::new();
    for record in reader.deserialize::<T>() {
        rows.push(record.map_err(|err| csv_error(path, err))?);
    }
    if rows.len() < MIN_ROWS {
        return Err(RtscError::Data(
            ErrorInfo::new(
                "too-few-rows",
                format!(
                    "{} has {} rows; at least {MIN_ROWS} are required",
                    path.display(),
                    rows.len()
                ),
            )
            .with_path(path),
        ));
    }
    if let Some(idx) = rows
        .iter()
        .position(|row| !(row.abscissa().is_finite() && row.ordinate().is_finite()))
    {
        return Err(RtscError::data(
            "non-finite",
            format!("{} row {} contains a non-finite value", path.display(), idx + 1),
        ));
    }
    rows.sort_by(|a, b| a.abscissa().total_cmp(&b.abscissa()));
    Ok(rows)
}
