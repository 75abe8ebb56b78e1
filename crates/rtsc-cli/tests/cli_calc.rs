use std::error::Error;
use std::path::PathBuf;
use std::process::{Command, Output};

use rtsc_exp::{check_against_schema, parse_schema, CALC_SCHEMA};
use serde_json::Value;

fn rtsc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rtsc"))
        .args(args)
        .env_remove("RTSC_LOG")
        .output()
        .expect("spawn rtsc")
}

fn rtsc_with_log(args: &[&str], filter: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rtsc"))
        .args(args)
        .env("RTSC_LOG", filter)
        .output()
        .expect("spawn rtsc")
}

fn calc(omega: &str, lambda: &str, mu: &str, f: &str) -> Output {
    rtsc(&[
        "calc",
        "--omega-log",
        omega,
        "--lambda-val",
        lambda,
        "--mu-star",
        mu,
        "--f-omega",
        f,
    ])
}

fn stderr_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stderr).expect("stderr is JSON")
}

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .canonicalize()
        .unwrap()
}

#[test]
fn reference_point_prints_ok_payload() -> Result<(), Box<dyn Error>> {
    let output = calc("120", "2.5", "0.12", "1.35");
    assert!(output.status.success());
    let payload: Value = serde_json::from_slice(&output.stdout)?;
    check_against_schema(&payload, &parse_schema(CALC_SCHEMA)?)?;
    assert_eq!(payload["status"], "ok");
    let tc = payload["results"]["Tc_K"].as_f64().unwrap();
    assert!(tc > 250.0 && tc < 350.0, "Tc = {tc}");
    let keys: Vec<&str> = payload.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["derived", "inputs", "provenance", "results", "status"]);
    Ok(())
}

#[test]
fn kelvin_units_are_accepted() -> Result<(), Box<dyn Error>> {
    let output = rtsc(&[
        "calc",
        "--omega-log",
        "1392.5",
        "--omega-units",
        "K",
        "--lambda-val",
        "2.5",
        "--mu-star",
        "0.12",
        "--f-omega",
        "1.35",
    ]);
    assert!(output.status.success());
    let payload: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(payload["derived"]["omega_log_K"], 1392.5);
    Ok(())
}

#[test]
fn omega_out_of_range_exits_two() {
    let output = calc("5", "2.5", "0.12", "1.35");
    assert_eq!(output.status.code(), Some(2));
    let err = stderr_json(&output);
    assert_eq!(err["status"], "error");
    assert_eq!(err["kind"], "out_of_range_parameter");
    assert!(err["error"]
        .as_str()
        .unwrap()
        .contains("out of physical range [10, 1000]"));
    assert!(output.stdout.is_empty());
}

#[test]
fn non_positive_denominator_exits_two() {
    let output = calc("120", "2.0", "0.9", "1.35");
    assert_eq!(output.status.code(), Some(2));
    let err = stderr_json(&output);
    assert_eq!(err["kind"], "non_positive_denominator");
    let message = err["error"].as_str().unwrap();
    assert!(message.contains("Allen-Dynes denominator"));
    assert!(message.contains("≤ 0"));
}

#[test]
fn negative_lambda_and_bad_units_exit_two() {
    let output = calc("120", "-1.0", "0.12", "1.35");
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_json(&output)["error"]
        .as_str()
        .unwrap()
        .contains("lambda=-1.0"));

    let output = rtsc(&[
        "calc", "--omega-log", "120", "--omega-units", "THz", "--lambda-val", "2.5",
        "--mu-star", "0.12", "--f-omega", "1.35",
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_json(&output)["error"]
        .as_str()
        .unwrap()
        .contains("omega-units"));
}

#[test]
fn boundary_values_are_inclusive() {
    assert!(calc("10", "2.5", "0.12", "1.35").status.success());
    assert!(calc("1000", "2.5", "0.12", "1.0").status.success());
    assert!(calc("120", "2.5", "0.12", "1.5").status.success());
    assert_eq!(calc("120", "2.5", "0.12", "1.51").status.code(), Some(2));
    assert_eq!(calc("120", "2.5", "0.3", "1.35").status.code(), Some(2));
}

#[test]
fn analyze_writes_report_for_fixture() -> Result<(), Box<dyn Error>> {
    let out = tempfile::tempdir()?;
    let in_dir = workspace_root().join("fixtures").join("sample_data");
    let output = rtsc(&[
        "analyze",
        "--in-dir",
        in_dir.to_str().unwrap(),
        "--out-dir",
        out.path().to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Wrote "));
    assert!(stdout.contains("VERDICT: PASS"));
    assert!(out.path().join("report.json").exists());
    Ok(())
}

#[test]
fn analyze_missing_inputs_exit_two() -> Result<(), Box<dyn Error>> {
    let empty = tempfile::tempdir()?;
    let output = rtsc(&[
        "analyze",
        "--in-dir",
        empty.path().to_str().unwrap(),
        "--out-dir",
        empty.path().join("out").to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr_json(&output)["kind"], "missing_input_file");
    Ok(())
}

#[test]
fn synth_then_analyze_passes() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let data = dir.path().join("data");
    let output = rtsc(&["synth", "--out-dir", data.to_str().unwrap(), "--seed", "5"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(data.join("synthetic.json").exists());

    let output = rtsc(&[
        "analyze",
        "--in-dir",
        data.to_str().unwrap(),
        "--out-dir",
        dir.path().join("report").to_str().unwrap(),
    ]);
    assert!(String::from_utf8(output.stdout)?.contains("VERDICT: PASS"));
    Ok(())
}

#[test]
fn sensitivity_emits_coefficients() -> Result<(), Box<dyn Error>> {
    let output = rtsc(&["sensitivity", "--target-tc", "300", "--map-resolution", "4"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let payload: Value = serde_json::from_slice(&output.stdout)?;
    assert!(payload["sensitivity"]["coefficients"]["d_tc_d_lambda_eff"].as_f64().unwrap() > 0.0);
    assert!(payload["optimum"]["lambda_eff"].is_number());
    assert_eq!(payload["map"]["tc_k"].as_array().unwrap().len(), 4);
    Ok(())
}

#[test]
fn version_prints_package_version() {
    let output = rtsc(&["version"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        env!("CARGO_PKG_VERSION")
    );
}

#[test]
fn underflow_stderr_is_a_single_json_payload() {
    let output = calc("120", "0.02", "0.0197", "1.2");
    assert_eq!(output.status.code(), Some(2));
    let err = stderr_json(&output);
    assert_eq!(err["kind"], "numeric_underflow");
    assert_eq!(err["code"], "numeric-underflow");
    assert!(err["error"]
        .as_str()
        .unwrap()
        .contains("Exponential term too small"));
    assert!(output.stdout.is_empty());
}

#[test]
fn underflow_stays_json_with_warnings_enabled() {
    let args = [
        "calc",
        "--omega-log",
        "120",
        "--lambda-val",
        "0.02",
        "--mu-star",
        "0.0197",
        "--f-omega",
        "1.2",
    ];
    let output = rtsc_with_log(&args, "warn");
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr_json(&output)["kind"], "numeric_underflow");
}

#[test]
fn small_denominator_warning_is_opt_in_and_plain() {
    let args = [
        "calc",
        "--omega-log",
        "120",
        "--lambda-val",
        "0.3",
        "--mu-star",
        "0.1855",
        "--f-omega",
        "1.2",
    ];
    let quiet = rtsc(&args);
    assert!(quiet.status.success(), "{}", String::from_utf8_lossy(&quiet.stderr));
    assert!(quiet.stderr.is_empty(), "{}", String::from_utf8_lossy(&quiet.stderr));

    let verbose = rtsc_with_log(&args, "warn");
    assert!(verbose.status.success());
    let stderr = String::from_utf8_lossy(&verbose.stderr);
    assert!(stderr.contains("small Allen-Dynes denominator"), "{stderr}");
    assert!(!stderr.contains('\u{1b}'), "{stderr}");
}

#[test]
fn unparseable_flag_is_reported_as_json() {
    let output = calc("abc", "2.5", "0.12", "1.35");
    assert_eq!(output.status.code(), Some(2));
    let err = stderr_json(&output);
    assert_eq!(err["kind"], "usage");
    assert_eq!(err["status"], "error");
    assert!(err["error"].as_str().unwrap().contains("--omega-log"));

    let output = rtsc(&["calc", "--lambda-val", "2.5"]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr_json(&output)["kind"], "usage");
}

#[test]
fn help_still_prints_text() {
    let output = rtsc(&["calc", "--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--omega-log"));
}

#[test]
fn synth_rejects_non_finite_gap() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    for value in ["inf", "NaN", "1e300"] {
        let output = rtsc(&[
            "synth",
            "--out-dir",
            dir.path().to_str().unwrap(),
            "--two-delta-mev",
            value,
        ]);
        assert_eq!(output.status.code(), Some(2), "{value}");
        assert_eq!(stderr_json(&output)["kind"], "out_of_range_parameter");
    }
    Ok(())
}

#[test]
fn sensitivity_rejects_zero_mu_star() {
    let output = rtsc(&["sensitivity", "--mu-star", "0"]);
    assert_eq!(output.status.code(), Some(2));
    let err = stderr_json(&output);
    assert_eq!(err["kind"], "out_of_range_parameter");
    assert!(output.stdout.is_empty());
}

#[test]
fn experiment_infers_lambda_from_gap() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("measurements.json");
    let frequencies: Vec<f64> = (10..=200).map(f64::from).collect();
    let alpha2f: Vec<f64> = frequencies
        .iter()
        .map(|w| {
            let acoustic = if *w < 100.0 { 0.005 } else { 0.0 };
            acoustic + (-((w - 150.0) / 15.0).powi(2)).exp()
        })
        .collect();
    let data = serde_json::json!({
        "spectral": {"frequencies_mev": frequencies, "alpha2f": alpha2f},
        "gap_mev": 93.0,
        "transport_tc_k": 300.0,
    });
    std::fs::write(&input, serde_json::to_vec(&data)?)?;

    let output = rtsc(&["experiment", "--input", input.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let payload: Value = serde_json::from_slice(&output.stdout)?;
    let lambda = payload["lambda_eff_estimated"].as_f64().unwrap();
    assert!((lambda - 2.6).abs() < 0.01, "λ = {lambda}");
    assert_eq!(payload["validation"]["overall_pass"], true);

    let absent = dir.path().join("absent.json");
    let missing = rtsc(&["experiment", "--input", absent.to_str().unwrap()]);
    assert_eq!(missing.status.code(), Some(2));
    assert_eq!(stderr_json(&missing)["kind"], "missing_input_file");
    Ok(())
}
