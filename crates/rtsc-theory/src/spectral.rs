use rtsc_core::errors::RtscError;

/// Default split between low and high frequency weight for f_ω, in meV.
pub const DEFAULT_OMEGA_CUTOFF_MEV: f64 = 100.0;

/// Logarithmic average exp(Σ w ln f) with weights normalised to sum to 1.
pub fn weighted_log_average(frequencies: &[f64], weights: &[f64]) -> Result<f64, RtscError> {
    if frequencies.is_empty() {
        return Err(RtscError::out_of_range(
            "frequencies",
            "at least one frequency is required",
        ));
    }
    if frequencies.len() != weights.len() {
        return Err(RtscError::out_of_range(
            "weights",
            format!(
                "{} weights supplied for {} frequencies",
                weights.len(),
                frequencies.len()
            ),
        ));
    }
    if let Some(bad) = frequencies.iter().find(|f| f.is_nan() || **f <= 0.0) {
        return Err(RtscError::out_of_range(
            "frequencies",
            format!("frequency={bad:?} must be > 0 to take its logarithm"),
        ));
    }
    if let Some(bad) = weights.iter().find(|w| w.is_nan() || **w < 0.0) {
        return Err(RtscError::out_of_range(
            "weights",
            format!("weight={bad:?} must be non-negative"),
        ));
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(RtscError::out_of_range(
            "weights",
            "weights must have a positive sum",
        ));
    }
    let log_mean: f64 = frequencies
        .iter()
        .zip(weights)
        .map(|(f, w)| (w / total) * f.ln())
        .sum();
    Ok(log_mean.exp())
}

/// Ratio of high to low frequency coupling weight.
pub fn spectral_weight_factor(lambda_high: f64, lambda_low: f64) -> Result<f64, RtscError> {
    if lambda_low.is_nan() || lambda_low <= 0.0 {
        return Err(RtscError::out_of_range(
            "lambda_low",
            format!("lambda_low={lambda_low:?} must be > 0 to form f_omega"),
        ));
    }
    Ok(lambda_high / lambda_low)
}

fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| 0.5 * (xs[1] - xs[0]) * (ys[0] + ys[1]))
        .sum()
}

fn check_lengths(frequencies: &[f64], alpha2f: &[f64]) -> Result<(), RtscError> {
    if frequencies.len() != alpha2f.len() {
        return Err(RtscError::data(
            "length-mismatch",
            format!(
                "{} α²F samples supplied for {} frequencies",
                alpha2f.len(),
                frequencies.len()
            ),
        ));
    }
    Ok(())
}

/// λ = 2 ∫ α²F(ω)/ω dω over the samples with ω > 0.
fn coupling_integral(frequencies: &[f64], alpha2f: &[f64]) -> f64 {
    let (xs, ys): (Vec<f64>, Vec<f64>) = frequencies
        .iter()
        .zip(alpha2f)
        .filter(|(f, _)| **f > 0.0)
        .map(|(f, a)| (*f, a / f))
        .unzip();
    2.0 * trapezoid(&xs, &ys)
}

/// ω_log in meV from a sampled Eliashberg function α²F(ω).
pub fn omega_log_from_alpha2f(frequencies: &[f64], alpha2f: &[f64]) -> Result<f64, RtscError> {
    check_lengths(frequencies, alpha2f)?;
    let (xs, weights): (Vec<f64>, Vec<f64>) = frequencies
        .iter()
        .zip(alpha2f)
        .filter(|(f, a)| **f > 0.0 && **a > 0.0)
        .map(|(f, a)| (*f, a / f))
        .unzip();
    if xs.len() < 2 {
        return Err(RtscError::data(
            "empty-spectrum",
            "α²F needs at least two samples with ω > 0 and α²F > 0",
        ));
    }
    let lambda = 2.0 * trapezoid(&xs, &weights);
    if lambda <= 0.0 {
        return Err(RtscError::data(
            "zero-coupling",
            format!("integrated coupling λ={lambda:?} must be > 0"),
        ));
    }
    let log_weighted: Vec<f64> = xs.iter().zip(&weights).map(|(f, w)| w * f.ln()).collect();
    Ok((2.0 * trapezoid(&xs, &log_weighted) / lambda).exp())
}

/// f_ω = λ_high / λ_low with the split at `cutoff_mev`.
///
/// Returns infinity when all weight lies above the cutoff and 1.0 when
/// there is no weight at all.
pub fn f_omega_from_alpha2f(
    frequencies: &[f64],
    alpha2f: &[f64],
    cutoff_mev: f64,
) -> Result<f64, RtscError> {
    check_lengths(frequencies, alpha2f)?;
    let (low_f, low_a): (Vec<f64>, Vec<f64>) = frequencies
        .iter()
        .zip(alpha2f)
        .filter(|(f, _)| **f < cutoff_mev)
        .map(|(f, a)| (*f, *a))
        .unzip();
    let (high_f, high_a): (Vec<f64>, Vec<f64>) = frequencies
        .iter()
        .zip(alpha2f)
        .filter(|(f, _)| **f >= cutoff_mev)
        .map(|(f, a)| (*f, *a))
        .unzip();
    let lambda_low = coupling_integral(&low_f, &low_a);
    let lambda_high = coupling_integral(&high_f, &high_a);
    if lambda_low <= 0.0 {
        return Ok(if lambda_high > 0.0 { f64::INFINITY } else { 1.0 });
    }
    spectral_weight_factor(lambda_high, lambda_low)
}
