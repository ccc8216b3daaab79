//! Config artifact validation tests for vpc-foundation-config.
// crates/vpc-foundation-config/tests/config_artifacts.rs
// ============================================================================
// Module: Config Artifact Validation Tests
// Description: Validate config schema and example generators.
// Purpose: Prevent drift between config model and generated artifacts.
// Dependencies: vpc-foundation-config, jsonschema, toml
// ============================================================================

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use serde_json::json;
use vpc_foundation_config::StackConfig;
use vpc_foundation_config::config_schema;
use vpc_foundation_config::config_toml_example;

mod common;

type TestResult = Result<(), String>;

/// Compiles the config schema as draft 2020-12.
fn compile_schema(schema: &Value) -> Result<Validator, String> {
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .map_err(|err| format!("failed to compile schema: {err}"))
}

#[test]
fn config_schema_accepts_minimal_and_example_configs() -> TestResult {
    let validator = compile_schema(&config_schema())?;

    if !validator.is_valid(&json!({})) {
        return Err("minimal config should be valid".to_string());
    }

    let toml_str = config_toml_example();
    let toml_value: toml::Value = toml::from_str(&toml_str).map_err(|err| err.to_string())?;
    let json_value = serde_json::to_value(toml_value).map_err(|err| err.to_string())?;
    if !validator.is_valid(&json_value) {
        return Err("example config should validate".to_string());
    }
    Ok(())
}

#[test]
fn config_schema_rejects_structural_mistakes() -> TestResult {
    let validator = compile_schema(&config_schema())?;
    let cases = [
        json!({"network": {}}),
        json!({"environments": {"dev": {"vpc_cidr": "10.0.0.0/16"}}}),
        json!({"environments": {"dev": {"vpc_cidr_block": "10.0.0.0"}}}),
        json!({"environments": {"dev": {"max_availability_zones": 4}}}),
        json!({"environments": {"dev": {"tags": {"Owner": 1}}}}),
    ];
    for case in cases {
        if validator.is_valid(&case) {
            return Err(format!("schema should reject {case}"));
        }
    }
    Ok(())
}

#[test]
fn example_config_loads_and_validates() -> TestResult {
    let file = common::temp_config_file(&config_toml_example())?;
    let stack = StackConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    let validated = stack.validate().map_err(|err| err.to_string())?;
    if validated.len() != 3 {
        return Err(format!("expected 3 environments, got {}", validated.len()));
    }
    Ok(())
}
