// crates/vpc-foundation-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payloads.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example `vpc-foundation.toml`. The output is deterministic and
//! kept in sync with the schema and the validator by tests.

/// Returns a canonical example `vpc-foundation.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"# Overrides are applied on top of the built-in defaults:
#   dev     10.0.0.0/16  2 AZs  1 NAT gateway
#   staging 10.1.0.0/16  2 AZs  1 NAT gateway
#   prod    10.2.0.0/16  3 AZs  3 NAT gateways

[environments.dev]
nat_gateway_count = 1

[environments.dev.tags]
Owner = "mobile-platform"

[environments.staging]
vpc_cidr_block = "10.1.0.0/16"
max_availability_zones = 2

[environments.prod]
vpc_cidr_block = "10.2.0.0/16"
max_availability_zones = 3
nat_gateway_count = 3

[environments.prod.tags]
CostCenter = "mobile-backend-prod"
"#,
    )
}
