//! Physical constants and unit conversions.
//!
//! Energies are carried in meV and temperatures in K throughout the
//! workspace. Conversions to eV and back are explicit.

/// Kelvin per meV (1 meV / k_B).
pub const K_PER_MEV: f64 = 11.604_518_121_550_08;

/// Boltzmann constant in eV/K (CODATA 2018).
pub const KB_EV_PER_K: f64 = 8.617_333_262e-5;

/// Boltzmann constant in meV/K.
pub const KB_MEV_PER_K: f64 = KB_EV_PER_K * 1.0e3;

/// Converts an energy in meV to the equivalent temperature in K.
pub fn mev_to_kelvin(mev: f64) -> f64 {
    mev * K_PER_MEV
}

/// Converts a temperature in K to the equivalent energy in meV.
pub fn kelvin_to_mev(kelvin: f64) -> f64 {
    kelvin / K_PER_MEV
}

/// Converts meV to eV.
pub fn mev_to_ev(mev: f64) -> f64 {
    mev * 1.0e-3
}

/// Converts eV to meV.
pub fn ev_to_mev(ev: f64) -> f64 {
    ev * 1.0e3
}

/// Boltzmann constant in meV/K.
pub const fn boltzmann_mev_per_k() -> f64 {
    KB_MEV_PER_K
}

/// Boltzmann constant in eV/K.
pub const fn boltzmann_ev_per_k() -> f64 {
    KB_EV_PER_K
}
