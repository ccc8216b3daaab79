// crates/vpc-foundation-cli/src/lib.rs
// ============================================================================
// Module: VPC Foundation CLI Library
// Description: Shared helpers for the VPC Foundation command-line interface.
// Purpose: Provide reusable components (i18n, audit) for the CLI binary and tests.
// Dependencies: serde, serde_json, vpc-foundation-config
// ============================================================================

//! ## Overview
//! This library houses shared CLI utilities: the internationalized message
//! catalog and the structured audit sinks that record validation outcomes.
//! The binary entry point (`src/main.rs`) imports these helpers to keep all
//! user-facing output consistent.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Structured audit events for validation outcomes.
pub mod audit;
/// Internationalization helpers and message catalog.
pub mod i18n;
