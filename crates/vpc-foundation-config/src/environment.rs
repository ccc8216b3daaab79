// crates/vpc-foundation-config/src/environment.rs
// ============================================================================
// Module: Environment Model
// Description: Environment configuration values, defaults, and overrides.
// Purpose: Define the value object handed to the orchestration layer.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An [`EnvironmentConfig`] describes one deployment target: its VPC CIDR
//! block, availability-zone fan-out, NAT gateway count, and resource tags.
//! Configs are built from static per-environment defaults, optionally
//! adjusted by [`EnvironmentOverrides`], and validated once into a read-only
//! [`ValidatedEnvironment`].
//!
//! ## Invariants
//! - The environment name set is closed: `dev`, `staging`, `prod`.
//! - Tags are stored in a `BTreeMap`, so iteration order is deterministic.
//! - [`ValidatedEnvironment`] exposes no mutators.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::cidr::PrivateCidr;
use crate::config::ConfigError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Tag keys that every environment must carry with a non-empty value.
pub const REQUIRED_TAGS: [&str; 3] = ["Application", "Environment", "ManagedBy"];
/// Default value of the `Application` tag.
pub const DEFAULT_APPLICATION_TAG: &str = "mobile-app-backend";
/// Default value of the `ManagedBy` tag.
pub const DEFAULT_MANAGED_BY_TAG: &str = "cdk";
/// Smallest accepted availability-zone count.
pub const MIN_AVAILABILITY_ZONES: u32 = 2;
/// Largest accepted availability-zone count.
pub const MAX_AVAILABILITY_ZONES: u32 = 3;

// ============================================================================
// SECTION: Environment Names
// ============================================================================

/// Recognized deployment environments.
///
/// # Invariants
/// - Labels are stable; they appear in config keys, tags, and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentName {
    /// Development environment.
    Dev,
    /// Pre-production staging environment.
    Staging,
    /// Production environment.
    Prod,
}

impl EnvironmentName {
    /// All recognized environments in deployment order.
    pub const ALL: [Self; 3] = [Self::Dev, Self::Staging, Self::Prod];

    /// Returns the canonical lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Staging => "staging",
            Self::Prod => "prod",
        }
    }

    /// Parses an exact lowercase label.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.as_str() == value)
    }

    /// Returns the labels joined for display, e.g. `dev, staging, prod`.
    #[must_use]
    pub fn expected_labels() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl fmt::Display for EnvironmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Environment Config
// ============================================================================

/// Proposed configuration for a single environment.
///
/// The name is kept as a raw string so unrecognized names surface as
/// violations instead of parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Environment name (`dev`, `staging`, or `prod`).
    pub name: String,
    /// VPC CIDR block in dotted-quad notation.
    pub vpc_cidr_block: String,
    /// Number of availability zones the VPC spans.
    pub max_availability_zones: u32,
    /// NAT gateway count; `None` defers to the orchestration layer.
    #[serde(default)]
    pub nat_gateway_count: Option<u32>,
    /// Resource tags applied to every provisioned resource.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl EnvironmentConfig {
    /// Returns the built-in defaults for `name`.
    #[must_use]
    pub fn defaults_for(name: EnvironmentName) -> Self {
        let (vpc_cidr_block, max_availability_zones, nat_gateway_count) = match name {
            EnvironmentName::Dev => ("10.0.0.0/16", 2, 1),
            EnvironmentName::Staging => ("10.1.0.0/16", 2, 1),
            EnvironmentName::Prod => ("10.2.0.0/16", 3, 3),
        };
        Self {
            name: name.as_str().to_string(),
            vpc_cidr_block: vpc_cidr_block.to_string(),
            max_availability_zones,
            nat_gateway_count: Some(nat_gateway_count),
            tags: default_tags(name.as_str()),
        }
    }

    /// Builds a config for `name` from defaults (when known) and `overrides`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `name` has no defaults and the
    /// overrides omit a field that has no fallback.
    pub fn resolve(name: &str, overrides: &EnvironmentOverrides) -> Result<Self, ConfigError> {
        if let Some(known) = EnvironmentName::parse(name) {
            return Ok(overrides.apply(Self::defaults_for(known)));
        }
        let vpc_cidr_block = overrides.vpc_cidr_block.clone().ok_or_else(|| {
            ConfigError::Invalid(format!(
                "environments.{name}.vpc_cidr_block must be set (no defaults for {name})"
            ))
        })?;
        let max_availability_zones = overrides.max_availability_zones.ok_or_else(|| {
            ConfigError::Invalid(format!(
                "environments.{name}.max_availability_zones must be set (no defaults for {name})"
            ))
        })?;
        let base = Self {
            name: name.to_string(),
            vpc_cidr_block,
            max_availability_zones,
            nat_gateway_count: None,
            tags: default_tags(name),
        };
        Ok(overrides.apply(base))
    }
}

/// Default tag set for an environment label.
fn default_tags(environment: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Application".to_string(), DEFAULT_APPLICATION_TAG.to_string()),
        ("Environment".to_string(), environment.to_string()),
        ("ManagedBy".to_string(), DEFAULT_MANAGED_BY_TAG.to_string()),
    ])
}

// ============================================================================
// SECTION: Overrides
// ============================================================================

/// Operator-supplied adjustments to an environment's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentOverrides {
    /// Replacement VPC CIDR block.
    #[serde(default)]
    pub vpc_cidr_block: Option<String>,
    /// Replacement availability-zone count.
    #[serde(default)]
    pub max_availability_zones: Option<u32>,
    /// Replacement NAT gateway count.
    #[serde(default)]
    pub nat_gateway_count: Option<u32>,
    /// Tags merged over the defaults (override wins per key).
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl EnvironmentOverrides {
    /// Applies these overrides on top of `base`.
    #[must_use]
    pub fn apply(&self, mut base: EnvironmentConfig) -> EnvironmentConfig {
        if let Some(cidr) = &self.vpc_cidr_block {
            base.vpc_cidr_block.clone_from(cidr);
        }
        if let Some(zones) = self.max_availability_zones {
            base.max_availability_zones = zones;
        }
        if let Some(count) = self.nat_gateway_count {
            base.nat_gateway_count = Some(count);
        }
        for (key, value) in &self.tags {
            base.tags.insert(key.clone(), value.clone());
        }
        base
    }
}

// ============================================================================
// SECTION: Validated Environment
// ============================================================================

/// An environment config that passed every validation rule.
///
/// # Invariants
/// - Constructed only by [`EnvironmentConfig::validate`].
/// - Read-only for the remainder of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedEnvironment {
    /// Parsed environment name.
    name: EnvironmentName,
    /// Parsed VPC CIDR block.
    cidr: PrivateCidr,
    /// The validated config.
    config: EnvironmentConfig,
}

impl ValidatedEnvironment {
    /// Wraps a config whose name and CIDR were already checked.
    pub(crate) const fn new(
        name: EnvironmentName,
        cidr: PrivateCidr,
        config: EnvironmentConfig,
    ) -> Self {
        Self {
            name,
            cidr,
            config,
        }
    }

    /// Returns the environment name.
    #[must_use]
    pub const fn name(&self) -> EnvironmentName {
        self.name
    }

    /// Returns the parsed VPC CIDR block.
    #[must_use]
    pub const fn vpc_cidr(&self) -> PrivateCidr {
        self.cidr
    }

    /// Returns the VPC CIDR block as written.
    #[must_use]
    pub fn vpc_cidr_block(&self) -> &str {
        &self.config.vpc_cidr_block
    }

    /// Returns the availability-zone count.
    #[must_use]
    pub const fn max_availability_zones(&self) -> u32 {
        self.config.max_availability_zones
    }

    /// Returns the NAT gateway count, if set.
    #[must_use]
    pub const fn nat_gateway_count(&self) -> Option<u32> {
        self.config.nat_gateway_count
    }

    /// Returns the resource tags.
    #[must_use]
    pub const fn tags(&self) -> &BTreeMap<String, String> {
        &self.config.tags
    }

    /// Returns the underlying config.
    #[must_use]
    pub const fn config(&self) -> &EnvironmentConfig {
        &self.config
    }
}
