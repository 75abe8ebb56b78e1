//! JSON-schema checks for report payloads against the schemas in `schemas/`.

use rtsc_core::errors::{ErrorInfo, RtscError};
use serde_json::Value;

/// Schema for `report.json`, as shipped in `schemas/`.
pub const REPORT_SCHEMA: &str = include_str!("../../../schemas/report.schema.json");
/// Schema for the `rtsc calc` stdout payload.
pub const CALC_SCHEMA: &str = include_str!("../../../schemas/calc.schema.json");

/// Validates `instance` against `schema`; the first violation is returned.
///
/// Violations carry the code `schema-violation` and the offending instance
/// location as `path` context, rooted at `$`.
pub fn check_against_schema(instance: &Value, schema: &Value) -> Result<(), RtscError> {
    let validator = jsonschema::validator_for(schema).map_err(|err| {
        RtscError::Serde(ErrorInfo::new("schema-invalid", err.to_string()))
    })?;
    let first = validator.iter_errors(instance).next();
    match first {
        None => Ok(()),
        Some(err) => {
            let path = format!("${}", err.instance_path);
            Err(RtscError::Serde(
                ErrorInfo::new("schema-violation", format!("{path}: {err}"))
                    .with_context("path", path),
            ))
        }
    }
}

/// Parses one of the embedded schema documents.
pub fn parse_schema(text: &str) -> Result<Value, RtscError> {
    serde_json::from_str(text)
        .map_err(|err| RtscError::Serde(ErrorInfo::new("schema-parse", err.to_string())))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema() -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "required": ["name", "score"],
            "additionalProperties": false,
            "properties": {
                "name": {"type": "string"},
                "score": {"$ref": "#/definitions/score"},
                "tags": {"type": "array", "items": {"enum": ["a", "b"]}}
            },
            "definitions": {"score": {"type": "number", "minimum": 0}}
        })
    }

    #[test]
    fn conforming_document_passes() {
        let doc = json!({"name": "x", "score": 1.5, "tags": ["a"]});
        assert!(check_against_schema(&doc, &schema()).is_ok());
    }

    #[test]
    fn violations_name_the_path() {
        let cases = [
            (json!({"name": "x"}), "$"),
            (json!({"name": "x", "score": -1}), "$/score"),
            (json!({"name": 3, "score": 1}), "$/name"),
            (json!({"name": "x", "score": 1, "extra": 0}), "$"),
            (json!({"name": "x", "score": 1, "tags": ["c"]}), "$/tags/0"),
        ];
        for (doc, path) in cases {
            let err = check_against_schema(&doc, &schema()).unwrap_err();
            assert_eq!(err.info().code, "schema-violation");
            assert_eq!(err.info().context.get("path").map(String::as_str), Some(path));
        }
    }

    #[test]
    fn malformed_schema_is_reported() {
        let err = check_against_schema(&json!({}), &json!({"type": 12})).unwrap_err();
        assert_eq!(err.info().code, "schema-invalid");
    }

    #[test]
    fn shipped_schemas_parse() {
        let report = parse_schema(REPORT_SCHEMA).unwrap();
        let calc = parse_schema(CALC_SCHEMA).unwrap();
        assert!(jsonschema::validator_for(&report).is_ok());
        assert!(jsonschema::validator_for(&calc).is_ok());
    }
}
