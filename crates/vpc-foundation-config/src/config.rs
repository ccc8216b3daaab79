// crates/vpc-foundation-config/src/config.rs
// ============================================================================
// Module: Stack Configuration
// Description: Loading and aggregate validation for vpc-foundation.toml.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! The stack configuration file declares per-environment overrides on top of
//! the built-in defaults. Loading enforces path, size, and encoding limits
//! before parsing; resolution merges defaults and overrides; validation runs
//! every environment through the rule set and reports all violations.
//! Config inputs are untrusted; unknown keys are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::environment::EnvironmentConfig;
use crate::environment::EnvironmentName;
use crate::environment::EnvironmentOverrides;
use crate::environment::ValidatedEnvironment;
use crate::validation::ValidationReport;
use crate::validation::Violation;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "vpc-foundation.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "VPC_FOUNDATION_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of environments declared in one file.
pub const MAX_ENVIRONMENTS: usize = 64;
/// Maximum length of an environment key.
pub(crate) const MAX_ENVIRONMENT_NAME_LENGTH: usize = 64;
/// Maximum number of tags per environment.
pub(crate) const MAX_TAGS: usize = 50;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Contents of `vpc-foundation.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackConfig {
    /// Per-environment overrides keyed by environment name.
    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentOverrides>,
}

impl StackConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Loading parses and checks structural limits only; call
    /// [`StackConfig::validate`] or [`StackConfig::resolve_all`] to run the
    /// environment rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading or parsing fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_config_path(path)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.check_limits()?;
        Ok(config)
    }

    /// Checks structural limits on declared environments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a limit is exceeded.
    pub fn check_limits(&self) -> Result<(), ConfigError> {
        if self.environments.len() > MAX_ENVIRONMENTS {
            return Err(ConfigError::Invalid(format!(
                "too many environments (max {MAX_ENVIRONMENTS})"
            )));
        }
        for (name, overrides) in &self.environments {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid("environment name must be non-empty".to_string()));
            }
            if name.len() > MAX_ENVIRONMENT_NAME_LENGTH {
                return Err(ConfigError::Invalid(format!(
                    "environment name exceeds {MAX_ENVIRONMENT_NAME_LENGTH} bytes"
                )));
            }
            if overrides.tags.len() > MAX_TAGS {
                return Err(ConfigError::Invalid(format!(
                    "environments.{name}.tags exceeds {MAX_TAGS} entries"
                )));
            }
        }
        Ok(())
    }

    /// Returns the environment names this config describes.
    ///
    /// With no declared environments, the built-in environments are used.
    #[must_use]
    pub fn environment_names(&self) -> Vec<String> {
        if self.environments.is_empty() {
            return EnvironmentName::ALL.iter().map(|name| name.as_str().to_string()).collect();
        }
        self.environments.keys().cloned().collect()
    }

    /// Resolves a single environment by name (defaults + overrides).
    ///
    /// Built-in environments not declared in the file resolve to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the environment is unknown and
    /// undeclared, or declared without the fields it needs.
    pub fn resolve(&self, name: &str) -> Result<EnvironmentConfig, ConfigError> {
        match self.environments.get(name) {
            Some(overrides) => EnvironmentConfig::resolve(name, overrides),
            None => EnvironmentName::parse(name).map(EnvironmentConfig::defaults_for).ok_or_else(
                || ConfigError::Invalid(format!("environment {name} is not declared")),
            ),
        }
    }

    /// Resolves and validates every described environment.
    ///
    /// Returns one outcome per environment in name order; violations are
    /// reported per environment rather than failing the whole call.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an environment cannot be resolved.
    pub fn resolve_all(&self) -> Result<Vec<EnvironmentOutcome>, ConfigError> {
        self.environment_names()
            .into_iter()
            .map(|name| Ok(EnvironmentOutcome::from(self.resolve(&name)?.validate())))
            .collect()
    }

    /// Validates every described environment, failing on any violation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Violations`] with every failing report, or the
    /// resolution error.
    pub fn validate(&self) -> Result<Vec<ValidatedEnvironment>, ConfigError> {
        let mut validated = Vec::new();
        let mut reports = Vec::new();
        for outcome in self.resolve_all()? {
            match outcome {
                EnvironmentOutcome::Valid(environment) => validated.push(environment),
                EnvironmentOutcome::Invalid(report) => reports.push(report),
            }
        }
        if reports.is_empty() {
            Ok(validated)
        } else {
            Err(ConfigError::Violations(reports))
        }
    }
}

/// Validation result for one resolved environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentOutcome {
    /// Every rule passed.
    Valid(ValidatedEnvironment),
    /// At least one rule failed.
    Invalid(ValidationReport),
}

impl EnvironmentOutcome {
    /// Returns the environment name as supplied.
    #[must_use]
    pub fn environment(&self) -> &str {
        match self {
            Self::Valid(environment) => environment.name().as_str(),
            Self::Invalid(report) => &report.environment,
        }
    }

    /// Returns the violations (empty when valid).
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Valid(_) => &[],
            Self::Invalid(report) => &report.violations,
        }
    }
}

impl From<Result<ValidatedEnvironment, ValidationReport>> for EnvironmentOutcome {
    fn from(result: Result<ValidatedEnvironment, ValidationReport>) -> Self {
        match result {
            Ok(environment) => Self::Valid(environment),
            Err(report) => Self::Invalid(report),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// One or more environments violated the rule set.
    #[error("{}", render_reports(.0))]
    Violations(Vec<ValidationReport>),
}

/// Renders violation reports for [`ConfigError::Violations`].
fn render_reports(reports: &[ValidationReport]) -> String {
    let rendered: Vec<String> = reports.iter().map(ToString::to_string).collect();
    format!("config violations: {}", rendered.join(" | "))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path `load` would read: `path`, then
/// [`CONFIG_ENV_VAR`], then [`DEFAULT_CONFIG_NAME`].
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when the path exceeds length limits.
pub fn resolve_config_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let resolved = resolve_path(path)?;
    validate_path(&resolved)?;
    Ok(resolved)
}

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}
