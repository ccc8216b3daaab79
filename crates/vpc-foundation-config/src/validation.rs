// crates/vpc-foundation-config/src/validation.rs
// ============================================================================
// Module: Environment Validation
// Description: Aggregating rule checks for environment configs.
// Purpose: Report every policy violation before orchestration runs.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`validate_environment`] runs every rule against an [`EnvironmentConfig`]
//! and returns all violations in a fixed order. Invalid input is reported
//! through the returned list; it never aborts. Callers decide whether a
//! non-empty list blocks deployment.
//!
//! ## Invariants
//! - Rule order: name, CIDR, availability zones, NAT gateways, tags.
//! - Tag violations follow [`REQUIRED_TAGS`] order, one per missing key.
//! - Validation is pure; repeated calls yield identical results.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

use crate::cidr::parse_private_cidr;
use crate::environment::EnvironmentConfig;
use crate::environment::EnvironmentName;
use crate::environment::MAX_AVAILABILITY_ZONES;
use crate::environment::MIN_AVAILABILITY_ZONES;
use crate::environment::REQUIRED_TAGS;
use crate::environment::ValidatedEnvironment;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Rule that produced a violation.
///
/// # Invariants
/// - Serialized labels (`snake_case`) are stable for JSON output and audit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Name outside the recognized environment set.
    InvalidName,
    /// CIDR block malformed or outside the private ranges.
    InvalidCidr,
    /// Availability-zone count outside the accepted bounds.
    AvailabilityZonesOutOfRange,
    /// NAT gateway count larger than the availability-zone count.
    NatGatewaysExceedAvailabilityZones,
    /// Required tag missing or blank.
    MissingTag,
}

/// A single failed rule with a display-ready message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Rule that failed.
    pub kind: ViolationKind,
    /// Human-readable message, e.g. `Invalid VPC CIDR: 10.0.0.0/33`.
    pub message: String,
}

impl Violation {
    /// Builds a violation from a rule and message.
    fn new(kind: ViolationKind, message: String) -> Self {
        Self {
            kind,
            message,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// All violations found for one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Environment name as supplied.
    pub environment: String,
    /// Violations in rule order.
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns true when no rule failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the violation messages in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|violation| violation.message.clone()).collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "environment {}: ", self.environment)?;
        let mut first = true;
        for violation in &self.violations {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            f.write_str(&violation.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Checks `config` against every rule and returns all violations.
#[must_use]
pub fn validate_environment(config: &EnvironmentConfig) -> Vec<Violation> {
    let mut violations = Vec::new();

    if EnvironmentName::parse(&config.name).is_none() {
        violations.push(Violation::new(
            ViolationKind::InvalidName,
            format!(
                "Invalid environment name: {} (expected one of {})",
                config.name,
                EnvironmentName::expected_labels()
            ),
        ));
    }

    if parse_private_cidr(&config.vpc_cidr_block).is_err() {
        violations.push(Violation::new(
            ViolationKind::InvalidCidr,
            format!("Invalid VPC CIDR: {}", config.vpc_cidr_block),
        ));
    }

    let zones = config.max_availability_zones;
    if !(MIN_AVAILABILITY_ZONES..=MAX_AVAILABILITY_ZONES).contains(&zones) {
        violations.push(Violation::new(
            ViolationKind::AvailabilityZonesOutOfRange,
            format!(
                "maxAzs must be between {MIN_AVAILABILITY_ZONES} and {MAX_AVAILABILITY_ZONES}, got \
                 {zones}"
            ),
        ));
    }

    if let Some(nat) = config.nat_gateway_count
        && nat > zones
    {
        violations.push(Violation::new(
            ViolationKind::NatGatewaysExceedAvailabilityZones,
            format!("natGateways ({nat}) cannot exceed maxAzs ({zones})"),
        ));
    }

    for key in REQUIRED_TAGS {
        let present = config.tags.get(key).is_some_and(|value| !value.trim().is_empty());
        if !present {
            violations.push(Violation::new(
                ViolationKind::MissingTag,
                format!("Missing required tag: {key}"),
            ));
        }
    }

    violations
}

impl EnvironmentConfig {
    /// Validates this config, producing a read-only [`ValidatedEnvironment`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationReport`] listing every violation when any rule fails.
    pub fn validate(self) -> Result<ValidatedEnvironment, ValidationReport> {
        let violations = validate_environment(&self);
        let name = EnvironmentName::parse(&self.name);
        let cidr = parse_private_cidr(&self.vpc_cidr_block).ok();
        match (violations.is_empty(), name, cidr) {
            (true, Some(name), Some(cidr)) => Ok(ValidatedEnvironment::new(name, cidr, self)),
            _ => Err(ValidationReport {
                environment: self.name,
                violations,
            }),
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
