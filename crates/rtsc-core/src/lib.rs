#![deny(missing_docs)]
#![doc = "Core error, unit and provenance types shared across the RTSC crates."]

pub mod errors;
pub mod logging;
pub mod provenance;
pub mod serde;
pub mod units;

pub use errors::{ErrorInfo, RtscError};
pub use provenance::Provenance;
pub use crate::serde::{from_json_slice, to_canonical_json_bytes, to_canonical_json_string};
