use std::error::Error;
use std::fs;
use std::path::PathBuf;

use rtsc_exp::{
    check_against_schema, parse_schema, predict, run_analysis, AnalysisInputs, AnalysisReport,
    EvaluationPolicy, SyntheticMeasurements, Verdict, REPORT_SCHEMA,
};
use rtsc_theory::DenominatorForm;
use serde_json::Value;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .canonicalize()
        .unwrap()
}

fn sample_data() -> PathBuf {
    workspace_root().join("fixtures").join("sample_data")
}

#[test]
fn demo_fixture_passes_and_matches_schema() -> Result<(), Box<dyn Error>> {
    let out = tempfile::tempdir()?;
    let (report, path) = run_analysis(
        &AnalysisInputs::default(),
        &sample_data(),
        out.path(),
        &EvaluationPolicy::default(),
    )?;
    assert_eq!(report.verdict, Verdict::Pass, "{report:#?}");
    assert_eq!(path, out.path().join("report.json"));

    let written: Value = serde_json::from_slice(&fs::read(&path)?)?;
    check_against_schema(&written, &parse_schema(REPORT_SCHEMA)?)?;
    let keys: Vec<&str> = written.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["inputs", "raman", "susceptibility", "theory", "transport", "verdict"]
    );
    assert!(written["theory"]["Tc_pred_K"].as_f64().unwrap() > 300.0);
    assert_eq!(written["verdict"], "PASS");

    let restored: AnalysisReport = serde_json::from_value(written)?;
    assert_eq!(restored, report);
    Ok(())
}

#[test]
fn mcmillan_prediction_misses_the_fixture() -> Result<(), Box<dyn Error>> {
    let out = tempfile::tempdir()?;
    let inputs = AnalysisInputs {
        denominator: DenominatorForm::McMillan,
        ..AnalysisInputs::default()
    };
    let (report, _) = run_analysis(&inputs, &sample_data(), out.path(), &EvaluationPolicy::default())?;
    assert_eq!(report.verdict, Verdict::Fail);
    assert!(!report.transport.passed);
    assert!(report.transport.notes.iter().any(|note| note.contains("deviates")));
    Ok(())
}

#[test]
fn synthetic_measurements_round_trip_to_pass() -> Result<(), Box<dyn Error>> {
    let inputs = AnalysisInputs::default();
    let theory = predict(&inputs)?;
    let data = tempfile::tempdir()?;
    SyntheticMeasurements {
        tc_k: theory.tc_pred_k,
        two_delta_mev: theory.two_delta0_mev,
        noise_level: 0.01,
        seed: 11,
    }
    .write_to(data.path())?;
    let out = tempfile::tempdir()?;
    let (report, _) = run_analysis(&inputs, data.path(), out.path(), &EvaluationPolicy::default())?;
    assert_eq!(report.verdict, Verdict::Pass, "{report:#?}");
    Ok(())
}

#[test]
fn missing_tables_are_reported() -> Result<(), Box<dyn Error>> {
    let empty = tempfile::tempdir()?;
    let out = tempfile::tempdir()?;
    let err = run_analysis(
        &AnalysisInputs::default(),
        empty.path(),
        out.path(),
        &EvaluationPolicy::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), "missing_input_file");
    assert!(err.info().context["path"].ends_with("iv_4probe.csv"));
    assert!(!out.path().join("report.json").exists());
    Ok(())
}

#[test]
fn strict_policy_from_yaml_fails_the_fixture() -> Result<(), Box<dyn Error>> {
    let policy = EvaluationPolicy::from_yaml_str("raman:\n  gap_rel_tol: 0.0001\n")?;
    let out = tempfile::tempdir()?;
    let (report, _) = run_analysis(&AnalysisInputs::default(), &sample_data(), out.path(), &policy)?;
    assert!(!report.raman.passed);
    assert!(report.transport.passed);
    assert_eq!(report.verdict, Verdict::Fail);
    Ok(())
}
