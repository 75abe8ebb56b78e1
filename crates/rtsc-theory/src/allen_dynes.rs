use std::fmt;
use std::str::FromStr;

use rtsc_core::errors::{ErrorInfo, RtscError};
use rtsc_core::provenance::Provenance;
use rtsc_core::units::{kelvin_to_mev, mev_to_kelvin};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::coupling::CouplingParameters;

/// Divisor applied to ω_log in the Allen-Dynes prefactor.
pub const PREFACTOR_DIVISOR: f64 = 1.2;
/// Coefficient of (1 + λ) in the exponent.
pub const EXPONENT_COEFFICIENT: f64 = 1.04;
/// Coefficient of λ in the Coulomb term (1 + 0.62λ).
pub const COULOMB_COEFFICIENT: f64 = 0.62;
/// Exponents below this value yield exp(x) < ~1e-10 and are rejected.
pub const UNDERFLOW_EXPONENT: f64 = -23.0;
/// Denominators below this value are accepted with a warning.
pub const SMALL_DENOMINATOR: f64 = 0.1;
/// Open interval accepted for μ* by the strict calculator.
pub const MU_STAR_OPEN_RANGE: (f64, f64) = (0.0, 0.3);
/// Closed interval accepted for the spectral shape factor f_ω.
pub const F_OMEGA_RANGE: (f64, f64) = (1.0, 1.5);

/// Which Allen-Dynes denominator to use.
///
/// The two forms are not algebraically equivalent. `McMillan` is the
/// textbook `λ − μ*(1 + 0.62λ)` used by the strict calculator and the CLI;
/// `Rescaled` is `1.04(1 + λ) − λμ*(1 + 0.62λ)` used by the lenient
/// analysis path. Both are kept so callers pick one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DenominatorForm {
    /// `λ − μ*(1 + 0.62λ)`.
    McMillan,
    /// `1.04(1 + λ) − λμ*(1 + 0.62λ)`.
    Rescaled,
}

impl DenominatorForm {
    /// Evaluates the denominator for the given coupling and μ*.
    pub fn denominator(self, lambda_eff: f64, mu_star: f64) -> f64 {
        let coulomb = 1.0 + COULOMB_COEFFICIENT * lambda_eff;
        match self {
            DenominatorForm::McMillan => lambda_eff - mu_star * coulomb,
            DenominatorForm::Rescaled => {
                EXPONENT_COEFFICIENT * (1.0 + lambda_eff) - lambda_eff * mu_star * coulomb
            }
        }
    }

    /// μ* at which the denominator vanishes for the given λ.
    pub fn critical_mu_star(self, lambda_eff: f64) -> f64 {
        let coulomb = 1.0 + COULOMB_COEFFICIENT * lambda_eff;
        match self {
            DenominatorForm::McMillan => lambda_eff / coulomb,
            DenominatorForm::Rescaled => {
                EXPONENT_COEFFICIENT * (1.0 + lambda_eff) / (lambda_eff * coulomb)
            }
        }
    }

    /// Human readable expression of the denominator.
    pub fn expression(self) -> &'static str {
        match self {
            DenominatorForm::McMillan => "λ − μ*(1 + 0.62λ)",
            DenominatorForm::Rescaled => "1.04(1 + λ) − λμ*(1 + 0.62λ)",
        }
    }
}

impl fmt::Display for DenominatorForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenominatorForm::McMillan => write!(f, "mcmillan"),
            DenominatorForm::Rescaled => write!(f, "rescaled"),
        }
    }
}

impl FromStr for DenominatorForm {
    type Err = RtscError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "mcmillan" => Ok(DenominatorForm::McMillan),
            "rescaled" => Ok(DenominatorForm::Rescaled),
            other => Err(RtscError::out_of_range(
                "denominator",
                format!("unknown denominator form '{other}' (expected 'mcmillan' or 'rescaled')"),
            )),
        }
    }
}

/// Unit tag attached to ω_log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OmegaUnit {
    /// Milli-electronvolt.
    #[serde(rename = "meV")]
    Mev,
    /// Kelvin.
    #[serde(rename = "K")]
    Kelvin,
}

impl fmt::Display for OmegaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OmegaUnit::Mev => write!(f, "meV"),
            OmegaUnit::Kelvin => write!(f, "K"),
        }
    }
}

impl FromStr for OmegaUnit {
    type Err = RtscError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "mev" => Ok(OmegaUnit::Mev),
            "k" | "kelvin" => Ok(OmegaUnit::Kelvin),
            _ => Err(RtscError::out_of_range(
                "omega_units",
                format!("omega-units must be 'meV' or 'K', got '{value}'"),
            )),
        }
    }
}

/// Logarithmic average phonon frequency with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OmegaLog {
    /// Numeric value in `unit`.
    pub value: f64,
    /// Unit of `value`.
    pub unit: OmegaUnit,
}

impl OmegaLog {
    /// ω_log given in meV.
    pub fn from_mev(value: f64) -> Self {
        Self {
            value,
            unit: OmegaUnit::Mev,
        }
    }

    /// ω_log given in K.
    pub fn from_kelvin(value: f64) -> Self {
        Self {
            value,
            unit: OmegaUnit::Kelvin,
        }
    }

    /// Value converted to K.
    pub fn kelvin(&self) -> f64 {
        match self.unit {
            OmegaUnit::Mev => mev_to_kelvin(self.value),
            OmegaUnit::Kelvin => self.value,
        }
    }

    /// Value converted to meV.
    pub fn mev(&self) -> f64 {
        match self.unit {
            OmegaUnit::Mev => self.value,
            OmegaUnit::Kelvin => kelvin_to_mev(self.value),
        }
    }
}

/// Phonon and Coulomb parameters entering the Allen-Dynes formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalParameters {
    /// Logarithmic average phonon frequency.
    pub omega_log: OmegaLog,
    /// Coulomb pseudopotential μ*.
    pub mu_star: f64,
    /// Spectral shape factor f_ω applied to the base Tc.
    pub f_omega: f64,
}

/// Outcome of a strict Tc computation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TcResult {
    tc_k: f64,
    denominator: f64,
    omega_log_k: f64,
    form: DenominatorForm,
    provenance: Provenance,
}

impl TcResult {
    /// Predicted transition temperature in K (f_ω applied).
    pub fn tc_k(&self) -> f64 {
        self.tc_k
    }

    /// Allen-Dynes denominator used for the estimate.
    pub fn denominator(&self) -> f64 {
        self.denominator
    }

    /// ω_log converted to K.
    pub fn omega_log_k(&self) -> f64 {
        self.omega_log_k
    }

    /// Denominator form used.
    pub fn form(&self) -> DenominatorForm {
        self.form
    }

    /// When and where the result was produced.
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }
}

fn exponent_and_denominator(form: DenominatorForm, lambda_eff: f64, mu_star: f64) -> (f64, f64) {
    let denominator = form.denominator(lambda_eff, mu_star);
    (
        -EXPONENT_COEFFICIENT * (1.0 + lambda_eff) / denominator,
        denominator,
    )
}

fn tc_or_zero(form: DenominatorForm, lambda_eff: f64, mu_star: f64, omega_log_k: f64) -> f64 {
    let (exponent, denominator) = exponent_and_denominator(form, lambda_eff, mu_star);
    if denominator.is_nan() || denominator <= 0.0 {
        return 0.0;
    }
    (omega_log_k / PREFACTOR_DIVISOR) * exponent.exp()
}

/// Lenient library estimate using the rescaled denominator.
///
/// Returns `0.0` when the denominator is non-positive instead of failing.
pub fn allen_dynes_tc(lambda_eff: f64, mu_star: f64, omega_log_mev: f64) -> f64 {
    tc_or_zero(
        DenominatorForm::Rescaled,
        lambda_eff,
        mu_star,
        mev_to_kelvin(omega_log_mev),
    )
}

/// [`allen_dynes_tc`] after aggregating the coupling channels.
pub fn allen_dynes_tc_multichannel(
    omega_log_mev: f64,
    couplings: &CouplingParameters,
    mu_star: f64,
) -> f64 {
    allen_dynes_tc(couplings.lambda_eff(), mu_star, omega_log_mev)
}

/// Calculator estimate using the McMillan denominator.
///
/// Returns `0.0` (with a warning) when λ ≤ μ* or the denominator is
/// non-positive.
pub fn calculate_tc(omega_log_mev: f64, lambda_eff: f64, mu_star: f64) -> f64 {
    if lambda_eff <= mu_star {
        warn!(lambda_eff, mu_star, "λ_eff <= μ*: no superconductivity predicted");
        return 0.0;
    }
    tc_or_zero(
        DenominatorForm::McMillan,
        lambda_eff,
        mu_star,
        mev_to_kelvin(omega_log_mev),
    )
}

pub(crate) fn denominator_error(
    form: DenominatorForm,
    lambda_eff: f64,
    mu_star: f64,
    denominator: f64,
) -> RtscError {
    let critical = form.critical_mu_star(lambda_eff);
    RtscError::NonPositiveDenominator(
        ErrorInfo::new(
            "non-positive-denominator",
            format!(
                "Allen-Dynes denominator {} = {denominator:.4} ≤ 0 for lambda={lambda_eff:?}, \
                 mu*={mu_star:?}; need μ* < {critical:.4}",
                form.expression()
            ),
        )
        .with_context("form", form.to_string())
        .with_value("critical_mu_star", critical)
        .with_hint("pick a smaller μ* or a larger λ"),
    )
}

fn underflow_error(exponent: f64, lambda_eff: f64, mu_star: f64) -> RtscError {
    RtscError::NumericUnderflow(
        ErrorInfo::new(
            "numeric-underflow",
            format!(
                "Exponential term too small: exp({exponent:.2}) < exp({UNDERFLOW_EXPONENT}) \
                 gives negligible Tc for lambda={lambda_eff:?}, mu*={mu_star:?}"
            ),
        )
        .with_value("exponent", exponent),
    )
}

/// Strict Allen-Dynes computation.
///
/// Fails instead of clamping when λ ≤ 0, μ* ∉ (0, 0.3), f_ω ∉ [1.0, 1.5],
/// the denominator is non-positive or the exponential underflows.
pub fn compute_tc(
    params: &ThermalParameters,
    lambda_eff: f64,
    form: DenominatorForm,
) -> Result<TcResult, RtscError> {
    let mu_star = params.mu_star;
    let f_omega = params.f_omega;
    if lambda_eff.is_nan() || lambda_eff <= 0.0 {
        return Err(RtscError::out_of_range(
            "lambda",
            format!("lambda={lambda_eff:?} must be > 0 (electron-phonon coupling strength)"),
        ));
    }
    let (mu_min, mu_max) = MU_STAR_OPEN_RANGE;
    if !(mu_star > mu_min && mu_star < mu_max) {
        return Err(RtscError::out_of_range(
            "mu_star",
            format!(
                "mu*={mu_star:?} must be in ({mu_min}, {mu_max}) (Coulomb pseudopotential range)"
            ),
        ));
    }
    let (f_min, f_max) = F_OMEGA_RANGE;
    if !(f_min..=f_max).contains(&f_omega) {
        return Err(RtscError::out_of_range(
            "f_omega",
            format!(
                "f_omega={f_omega:?} out of allowed range [{f_min:?}, {f_max:?}] (spectral shape factor)"
            ),
        ));
    }
    let omega_log_k = params.omega_log.kelvin();
    if omega_log_k.is_nan() || omega_log_k <= 0.0 {
        return Err(RtscError::out_of_range(
            "omega_log",
            format!(
                "omega_log={:?} {} must be > 0 (logarithmic phonon frequency)",
                params.omega_log.value, params.omega_log.unit
            ),
        ));
    }

    let (exponent, denominator) = exponent_and_denominator(form, lambda_eff, mu_star);
    if denominator.is_nan() || denominator <= 0.0 {
        return Err(denominator_error(form, lambda_eff, mu_star, denominator));
    }
    if exponent < UNDERFLOW_EXPONENT {
        return Err(underflow_error(exponent, lambda_eff, mu_star));
    }
    if denominator < SMALL_DENOMINATOR {
        warn!(
            denominator,
            lambda_eff,
            mu_star,
            "small Allen-Dynes denominator; Tc is sensitive to μ*"
        );
    }

    let tc_k = (omega_log_k / PREFACTOR_DIVISOR) * exponent.exp() * f_omega;
    debug!(tc_k, denominator, exponent, %form, "allen-dynes estimate");
    Ok(TcResult {
        tc_k,
        denominator,
        omega_log_k,
        form,
        provenance: Provenance::capture(),
    })
}
