#![deny(missing_docs)]
#![doc = "Allen-Dynes Tc estimation, gap relations and input validation for RTSC candidates."]

/// Acceptance criteria for candidate parameter sets.
pub mod acceptance;
/// Allen-Dynes Tc kernels and strict computation.
pub mod allen_dynes;
/// Experimental artifact heuristics.
pub mod artifacts;
/// Physical bounds and the strict input validator.
pub mod bounds;
/// Multi-channel coupling aggregation.
pub mod coupling;
/// Parameter inference from measured spectra, gaps and transport.
pub mod experiment;
/// Superconducting gap relations.
pub mod gap;
/// Sensitivity analysis, optimisation and parameter maps.
pub mod sensitivity;
/// Spectral-function helpers (ω_log, f_ω).
pub mod spectral;
/// Seeded synthetic datasets.
pub mod synthetic;

pub use acceptance::{
    validate_acceptance, validate_rtsc_parameters, AcceptancePolicy, AcceptanceReport,
    ParameterAcceptance,
};
pub use allen_dynes::{
    allen_dynes_tc, allen_dynes_tc_multichannel, calculate_tc, compute_tc, DenominatorForm,
    OmegaLog, OmegaUnit, TcResult, ThermalParameters,
};
pub use artifacts::{detect_artifacts, ArtifactReport, IvSweep, ResistanceCurve};
pub use bounds::{validate_calc_inputs, Interval, ParameterBounds};
pub use coupling::{multi_channel_lambda, CouplingParameters};
pub use experiment::{
    analyze_experimental_data, ExperimentalAnalysis, ExperimentalData, SpectralFunction,
    ASSUMED_MU_STAR,
};
pub use gap::{
    estimate_lambda_from_gap, gap_at_temperature, gap_to_tc_ratio, strong_coupling_gap_mev,
    two_delta0_mev, BCS_RATIO,
};
pub use sensitivity::{
    optimize_lambda, parameter_space_map, sensitivity_analysis, BaseParameters,
    OptimalParameters, ParameterMap, SensitivityReport,
};
pub use spectral::{
    f_omega_from_alpha2f, omega_log_from_alpha2f, spectral_weight_factor, weighted_log_average,
};
pub use synthetic::{generate_synthetic_data, SyntheticData, SyntheticParams};
