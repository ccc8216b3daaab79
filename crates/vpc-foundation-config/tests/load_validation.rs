//! Config load validation tests for vpc-foundation-config.
// crates/vpc-foundation-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding, keys).
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use vpc_foundation_config::StackConfig;
use vpc_foundation_config::resolve_config_path;

mod common;

type TestResult = Result<(), String>;

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    let path = Path::new(&long_path);
    common::assert_error_contains(StackConfig::load(Some(path)), "config path exceeds max length")
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    let path = Path::new(&long_component);
    common::assert_error_contains(StackConfig::load(Some(path)), "config path component too long")
}

#[test]
fn load_reports_missing_file_as_io_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("missing.toml");
    common::assert_error_contains(StackConfig::load(Some(&path)), "config io error")
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let payload = vec![b'#'; 1_048_577];
    file.write_all(&payload).map_err(|err| err.to_string())?;
    common::assert_error_contains(StackConfig::load(Some(file.path())), "config file exceeds size limit")
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    common::assert_error_contains(StackConfig::load(Some(file.path())), "config file must be utf-8")
}

#[test]
fn load_rejects_unknown_keys() -> TestResult {
    let file = common::temp_config_file("[environments.dev]\nvpc_cidr = \"10.0.0.0/16\"\n")?;
    common::assert_error_contains(StackConfig::load(Some(file.path())), "config parse error")?;
    let file = common::temp_config_file("[network]\n")?;
    common::assert_error_contains(StackConfig::load(Some(file.path())), "config parse error")
}

#[test]
fn load_rejects_negative_counts() -> TestResult {
    let file = common::temp_config_file("[environments.dev]\nmax_availability_zones = -2\n")?;
    common::assert_error_contains(StackConfig::load(Some(file.path())), "config parse error")
}

#[test]
fn load_rejects_too_many_environments() -> TestResult {
    let mut contents = String::new();
    for index in 0..65 {
        contents.push_str(&format!("[environments.env{index}]\n"));
    }
    let file = common::temp_config_file(&contents)?;
    common::assert_error_contains(StackConfig::load(Some(file.path())), "too many environments")
}

#[test]
fn load_accepts_overrides_without_running_rules() -> TestResult {
    let file = common::temp_config_file(
        "[environments.dev]\nvpc_cidr_block = \"10.0.0.0/33\"\nmax_availability_zones = 2\n",
    )?;
    let stack = StackConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    let dev = stack.environments.get("dev").ok_or("dev should be declared")?;
    if dev.vpc_cidr_block.as_deref() != Some("10.0.0.0/33") {
        return Err("override not parsed".to_string());
    }
    common::assert_error_contains(stack.validate(), "Invalid VPC CIDR: 10.0.0.0/33")
}

#[test]
fn resolve_config_path_prefers_explicit_path() -> TestResult {
    let path = Path::new("configs/stack.toml");
    let resolved = resolve_config_path(Some(path)).map_err(|err| err.to_string())?;
    if resolved != path {
        return Err(format!("unexpected path {}", resolved.display()));
    }
    let long_path = "a".repeat(5_000);
    common::assert_error_contains(
        resolve_config_path(Some(Path::new(&long_path))),
        "config path exceeds max length",
    )
}
