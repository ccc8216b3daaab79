// crates/vpc-foundation-config/src/schema.rs
// ============================================================================
// Module: Config Schema
// Description: JSON schema builder for vpc-foundation.toml.
// Purpose: Provide a canonical validation schema for config tooling.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! This module defines the JSON Schema for the stack configuration file. The
//! schema mirrors the serde model and the rule bounds so editors and CI can
//! catch structural mistakes before the validator runs. CIDR range membership
//! and cross-field rules are left to the validator.

use serde_json::Value;
use serde_json::json;

use crate::cidr::MAX_MASK_BITS;
use crate::config::MAX_ENVIRONMENT_NAME_LENGTH;
use crate::config::MAX_ENVIRONMENTS;
use crate::config::MAX_TAGS;
use crate::environment::MAX_AVAILABILITY_ZONES;
use crate::environment::MIN_AVAILABILITY_ZONES;

/// Returns the JSON schema for `vpc-foundation.toml`.
#[must_use]
pub fn config_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "vpc-foundation://schemas/config.schema.json",
        "title": "VPC Foundation Configuration",
        "description": "Per-environment VPC overrides applied on top of built-in defaults.",
        "type": "object",
        "properties": {
            "environments": {
                "type": "object",
                "description": "Environment overrides keyed by environment name.",
                "maxProperties": MAX_ENVIRONMENTS,
                "propertyNames": {
                    "type": "string",
                    "minLength": 1,
                    "maxLength": MAX_ENVIRONMENT_NAME_LENGTH
                },
                "additionalProperties": environment_overrides_schema()
            }
        },
        "additionalProperties": false
    })
}

/// Schema for a single environment override table.
fn environment_overrides_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "vpc_cidr_block": cidr_schema(),
            "max_availability_zones": {
                "type": "integer",
                "minimum": MIN_AVAILABILITY_ZONES,
                "maximum": MAX_AVAILABILITY_ZONES,
                "description": "Availability zones spanned by the VPC."
            },
            "nat_gateway_count": {
                "type": "integer",
                "minimum": 0,
                "maximum": MAX_AVAILABILITY_ZONES,
                "description": "NAT gateways; must not exceed max_availability_zones."
            },
            "tags": {
                "type": "object",
                "maxProperties": MAX_TAGS,
                "additionalProperties": { "type": "string" },
                "description": "Tags merged over the defaults (Application, Environment, ManagedBy)."
            }
        },
        "additionalProperties": false
    })
}

/// Schema for a dotted-quad CIDR string.
fn cidr_schema() -> Value {
    json!({
        "type": "string",
        "pattern": r"^(\d{1,3}\.){3}\d{1,3}/\d{1,3}$",
        "description": format!(
            "IPv4 CIDR inside 10.0.0.0/8, 172.16.0.0/12, or 192.168.0.0/16 (mask 0-{MAX_MASK_BITS})."
        )
    })
}
