//! JSON Schema generation and runtime validation for the run summary

use std::sync::LazyLock;

use schemars::schema_for;
use serde_json::Value;

use super::types::RunSummary;

/// Cached JSON Schema for RunSummary.
static SCHEMA: LazyLock<schemars::Schema> = LazyLock::new(|| schema_for!(RunSummary));

/// Returns the JSON Schema as a pretty-printed JSON string.
pub fn schema_json_pretty() -> String {
    serde_json::to_string_pretty(&*SCHEMA).expect("schema serialization should not fail")
}

/// Validate a JSON value against the RunSummary schema.
///
/// Returns `Ok(())` if valid, or `Err` with a description of all validation errors.
pub fn validate(value: &Value) -> Result<(), String> {
    let schema_val = serde_json::to_value(&*SCHEMA).expect("schema serialization should not fail");
    let validator = jsonschema::validator_for(&schema_val)
        .map_err(|e| format!("Failed to compile schema: {}", e))?;

    let errors: Vec<String> = validator
        .iter_errors(value)
        .map(|e| format!("  - {}: {}", e.instance_path, e))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "Summary JSON failed schema validation ({} errors):\n{}",
            errors.len(),
            errors.join("\n")
        ))
    }
}

/// Returns true if runtime validation should be performed.
///
/// Always true in debug builds. In release builds, true only if `ALTMAT_VALIDATE_OUTPUT=1`.
pub fn should_validate() -> bool {
    if cfg!(debug_assertions) {
        true
    } else {
        std::env::var("ALTMAT_VALIDATE_OUTPUT")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputCollector;

    #[test]
    fn test_summary_matches_schema() {
        let summary = OutputCollector::new()
            .with_cohort(10, 200)
            .with_mask(1, 9)
            .with_selection(50, 40, Some(3))
            .build();
        let value = serde_json::to_value(&summary).unwrap();
        assert!(validate(&value).is_ok());
    }

    #[test]
    fn test_schema_rejects_wrong_types() {
        let value = serde_json::json!({
            "version": "0.2.0",
            "timestamp": "2025-01-01T00:00:00Z",
            "sample_total": "not-a-number"
        });
        assert!(validate(&value).is_err());
    }

    #[test]
    fn test_schema_pretty_is_json() {
        let text = schema_json_pretty();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(parsed.is_object());
    }
}
