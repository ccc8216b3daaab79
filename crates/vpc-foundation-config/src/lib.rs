// crates/vpc-foundation-config/src/lib.rs
// ============================================================================
// Module: VPC Foundation Config Library
// Description: Environment config model, validation, and artifact generation.
// Purpose: Single source of truth for per-environment VPC settings.
// Dependencies: serde, serde_json, thiserror, toml
// ============================================================================

//! ## Overview
//! `vpc-foundation-config` checks proposed environment configurations (name,
//! VPC CIDR block, availability-zone count, NAT gateway count, tags) before
//! they are handed to the infrastructure orchestration layer. Validation
//! reports every violation rather than stopping at the first, and never
//! aborts on bad input.
//!
//! Provisioning is out of scope: this crate only decides whether a config is
//! acceptable.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod cidr;
pub mod config;
pub mod environment;
pub mod examples;
pub mod schema;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use cidr::CidrError;
pub use cidr::PrivateCidr;
pub use cidr::PrivateRange;
pub use cidr::is_valid_private_cidr;
pub use cidr::parse_private_cidr;
pub use config::*;
pub use environment::*;
pub use examples::config_toml_example;
pub use schema::config_schema;
pub use validation::*;
