pub mod analyze;
pub mod calc;
pub mod experiment;
pub mod sensitivity;
pub mod synth;
pub mod version;
