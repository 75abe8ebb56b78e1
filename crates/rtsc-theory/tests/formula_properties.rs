use proptest::prelude::*;
use rtsc_theory::{
    allen_dynes_tc, allen_dynes_tc_multichannel, calculate_tc, compute_tc, multi_channel_lambda,
    weighted_log_average, CouplingParameters, DenominatorForm, OmegaLog, ThermalParameters,
};

#[test]
fn stronger_coupling_raises_calculator_tc() {
    let weak = multi_channel_lambda(1.0, 0.5, 0.2);
    let strong = multi_channel_lambda(1.2, 0.6, 0.3);
    assert!((weak - 1.7).abs() < 1e-12);
    assert!((strong - 2.1).abs() < 1e-12);
    assert!(calculate_tc(120.0, weak, 0.12) < calculate_tc(120.0, strong, 0.12));
}

#[test]
fn library_estimate_for_hydride_parameters() {
    assert!(allen_dynes_tc(2.6, 0.12, 130.0) > 250.0);
    let couplings = CouplingParameters::new(1.9, 0.6, 0.25).unwrap();
    let multichannel = allen_dynes_tc_multichannel(135.0, &couplings, 0.10);
    assert!((multichannel - allen_dynes_tc(2.75, 0.10, 135.0)).abs() < 1e-9);
}

#[test]
fn log_average_example() {
    let avg = weighted_log_average(&[100.0, 150.0, 200.0], &[0.2, 0.5, 0.3]).unwrap();
    assert!(avg > 100.0 && avg < 200.0);
}

#[test]
fn strict_and_lenient_calculator_agree_without_f_omega() -> Result<(), Box<dyn std::error::Error>> {
    let params = ThermalParameters {
        omega_log: OmegaLog::from_mev(120.0),
        mu_star: 0.12,
        f_omega: 1.0,
    };
    let strict = compute_tc(&params, 2.5, DenominatorForm::McMillan)?;
    assert!((strict.tc_k() - calculate_tc(120.0, 2.5, 0.12)).abs() < 1e-9);
    let rescaled = compute_tc(&params, 2.6, DenominatorForm::Rescaled)?;
    assert!((rescaled.tc_k() - allen_dynes_tc(2.6, 0.12, 120.0)).abs() < 1e-9);
    Ok(())
}

proptest! {
    #[test]
    fn calculator_tc_is_monotone_in_lambda(
        omega in 10.0f64..1000.0,
        mu_star in 0.01f64..0.29,
        lambda in 0.5f64..9.0,
        step in 0.001f64..1.0,
    ) {
        prop_assume!(DenominatorForm::McMillan.denominator(lambda, mu_star) > 0.0);
        let lower = calculate_tc(omega, lambda, mu_star);
        let upper = calculate_tc(omega, lambda + step, mu_star);
        prop_assert!(upper >= lower, "Tc({}) = {} > Tc({}) = {}", lambda, lower, lambda + step, upper);
    }

    #[test]
    fn log_average_stays_within_support(
        samples in prop::collection::vec((1.0f64..500.0, 0.01f64..1.0), 1..20),
    ) {
        let (freqs, weights): (Vec<f64>, Vec<f64>) = samples.into_iter().unzip();
        let avg = weighted_log_average(&freqs, &weights).unwrap();
        let lo = freqs.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = freqs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(avg >= lo * (1.0 - 1e-12) && avg <= hi * (1.0 + 1e-12));
    }

    #[test]
    fn tc_scales_linearly_with_omega_log(
        omega in 10.0f64..500.0,
        lambda in 1.0f64..4.0,
    ) {
        let single = calculate_tc(omega, lambda, 0.1);
        let double = calculate_tc(2.0 * omega, lambda, 0.1);
        prop_assert!((double - 2.0 * single).abs() <= 1e-9 * double.max(1.0));
    }
}
