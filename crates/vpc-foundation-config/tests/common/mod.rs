// crates/vpc-foundation-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for environment validation tests.
// Purpose: Reduce duplication across integration tests for vpc-foundation-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::collections::BTreeMap;
use std::io::Write;

use tempfile::NamedTempFile;
use vpc_foundation_config::ConfigError;
use vpc_foundation_config::EnvironmentConfig;
use vpc_foundation_config::StackConfig;

/// Returns the full required tag set for `environment`.
pub fn required_tags(environment: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Application".to_string(), "X".to_string()),
        ("Environment".to_string(), environment.to_string()),
        ("ManagedBy".to_string(), "Y".to_string()),
    ])
}

/// Returns a valid dev config with the given CIDR block.
pub fn dev_config_with_cidr(cidr: &str) -> EnvironmentConfig {
    EnvironmentConfig {
        name: "dev".to_string(),
        vpc_cidr_block: cidr.to_string(),
        max_availability_zones: 2,
        nat_gateway_count: None,
        tags: required_tags("dev"),
    }
}

/// Returns a valid dev config.
pub fn dev_config() -> EnvironmentConfig {
    dev_config_with_cidr("10.0.0.0/16")
}

/// Writes `contents` to a temp file.
pub fn temp_config_file(contents: &str) -> Result<NamedTempFile, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(contents.as_bytes()).map_err(|err| err.to_string())?;
    Ok(file)
}

/// Parses a TOML string into a `StackConfig`.
pub fn stack_from_toml(toml_str: &str) -> Result<StackConfig, String> {
    toml::from_str(toml_str).map_err(|err| err.to_string())
}

/// Checks that `result` failed with a message containing `needle`.
pub fn assert_error_contains<T>(result: Result<T, ConfigError>, needle: &str) -> Result<(), String> {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error '{message}' did not contain '{needle}'"))
            }
        }
        Ok(_) => Err("expected config error".to_string()),
    }
}
