use rtsc_core::errors::RtscError;
use rtsc_core::units::KB_MEV_PER_K;

/// Weak-coupling BCS value of 2Δ0/(kB Tc).
pub const BCS_RATIO: f64 = 3.53;

/// Weak-coupling BCS value of Δ0/(kB Tc).
pub const WEAK_COUPLING_GAP_RATIO: f64 = 1.764;

/// Strong-coupling correction slope in Δ0/(kB Tc) = 1.764 (1 + 0.4 λ).
pub const STRONG_COUPLING_SLOPE: f64 = 0.4;

/// Returns 2Δ/(kB Tc) for a gap Δ in meV and Tc in K.
pub fn gap_to_tc_ratio(delta_mev: f64, tc_k: f64) -> Result<f64, RtscError> {
    if tc_k.is_nan() || tc_k <= 0.0 {
        return Err(RtscError::out_of_range(
            "tc_k",
            format!("Tc={tc_k:?} K must be > 0 to form 2Δ/(kB Tc)"),
        ));
    }
    Ok(2.0 * delta_mev / (KB_MEV_PER_K * tc_k))
}

/// Full gap 2Δ0 in meV implied by a Tc and a 2Δ0/(kB Tc) ratio.
pub fn two_delta0_mev(tc_k: f64, ratio_2delta_over_kbtc: f64) -> f64 {
    ratio_2delta_over_kbtc * KB_MEV_PER_K * tc_k
}

/// Zero-temperature gap Δ0 in meV with a strong-coupling correction.
pub fn strong_coupling_gap_mev(tc_k: f64, lambda_eff: f64) -> f64 {
    let ratio = if lambda_eff < 1.0 {
        WEAK_COUPLING_GAP_RATIO
    } else {
        WEAK_COUPLING_GAP_RATIO * (1.0 + STRONG_COUPLING_SLOPE * lambda_eff)
    };
    ratio * KB_MEV_PER_K * tc_k
}

/// Approximate BCS gap Δ(T) in meV.
pub fn gap_at_temperature(gap0_mev: f64, temperature_k: f64, tc_k: f64) -> f64 {
    if temperature_k >= tc_k {
        return 0.0;
    }
    if temperature_k <= 0.0 {
        return gap0_mev;
    }
    gap0_mev * (1.74 * (tc_k / temperature_k - 1.0).sqrt()).tanh()
}

/// Inverts the strong-coupling gap relation; 0 in the weak-coupling regime.
pub fn estimate_lambda_from_gap(gap_mev: f64, tc_k: f64) -> f64 {
    if tc_k <= 0.0 {
        return 0.0;
    }
    let ratio = gap_mev / (KB_MEV_PER_K * tc_k);
    if ratio <= WEAK_COUPLING_GAP_RATIO {
        return 0.0;
    }
    ((ratio / WEAK_COUPLING_GAP_RATIO - 1.0) / STRONG_COUPLING_SLOPE).max(0.0)
}
