//! Measurement evaluators and the analysis report pipeline.

mod measurements;
mod outcome;
mod policy;
mod raman;
mod report;
mod schema;
mod susceptibility;
mod tables;
mod transport;

pub use measurements::{
    SyntheticMeasurements, MAX_SYNTHETIC_TC_K, MAX_SYNTHETIC_TWO_DELTA_MEV,
};
pub use outcome::{ValidationOutcome, Verdict};
pub use policy::{EvaluationPolicy, RamanPolicy, SusceptibilityPolicy, TransportPolicy};
pub use raman::evaluate_raman_gap;
pub use report::{
    predict, run_analysis, write_report, AnalysisInputs, AnalysisReport, TheoryPrediction,
    REPORT_FILE,
};
pub use schema::{check_against_schema, parse_schema, CALC_SCHEMA, REPORT_SCHEMA};
pub use susceptibility::evaluate_susceptibility;
pub use tables::{
    read_table, RamanRow, Sample, SusceptibilityRow, TransportRow, MIN_ROWS, RAMAN_FILE,
    SUSCEPTIBILITY_FILE, TRANSPORT_FILE,
};
pub use transport::evaluate_transport;
