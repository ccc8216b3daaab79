// crates/vpc-foundation-cli/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Exercises the translation catalog and placeholder substitution.
// Purpose: Ensure CLI user-facing strings route through stable i18n helpers.
// Dependencies: vpc-foundation-cli i18n module and the `t!` macro.
// ============================================================================

//! ## Overview
//! Validates the VPC Foundation CLI i18n catalog behavior:
//! - Message arguments capture key/value substitutions.
//! - Translation falls back to keys on misses.
//! - The [`t!`](vpc_foundation_cli::t) macro formats placeholders correctly.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use vpc_foundation_cli::i18n::MessageArg;
use vpc_foundation_cli::i18n::translate;
use vpc_foundation_cli::t;

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Confirms message arguments capture key/value pairs.
#[test]
fn message_arg_new_captures_key_and_value() {
    let arg = MessageArg::new("cidr", "10.0.0.0/16");
    assert_eq!(arg.key, "cidr");
    assert_eq!(arg.value, "10.0.0.0/16");
}

/// Confirms catalog entries resolve and replace placeholders.
#[test]
fn translate_substitutes_placeholders() {
    let args = vec![MessageArg::new("cidr", "10.0.0.0/16"), MessageArg::new("range", "10.0.0.0/8")];
    let result = translate("cidr.valid", args);
    assert_eq!(result, "10.0.0.0/16 is a valid private CIDR block (10.0.0.0/8).");
}

/// Confirms missing keys fall back to the key string.
#[test]
fn translate_falls_back_to_key() {
    let result = translate("missing.key", Vec::new());
    assert_eq!(result, "missing.key");
}

/// Confirms violation messages pass through untranslated.
#[test]
fn violation_lines_keep_message_text() {
    let rendered = t!("validate.violation", message = "Missing required tag: ManagedBy");
    assert_eq!(rendered, "  - Missing required tag: ManagedBy");
}

/// Confirms the t! macro formats named arguments.
#[test]
fn t_macro_formats_message() {
    let rendered = t!("main.version", version = "0.1.0");
    assert!(rendered.contains("vpc-foundation"));
    assert!(rendered.contains("0.1.0"));
}

/// Confirms values containing placeholder text are emitted verbatim.
#[test]
fn translate_does_not_rescan_substituted_values() {
    let rendered = t!("cidr.invalid", cidr = "{error}", error = "expected <address>/<mask>");
    assert_eq!(
        rendered,
        "{error} is not a valid private CIDR block: expected <address>/<mask>"
    );
    let rendered = t!("validate.env.invalid", environment = "{count}", count = 1);
    assert_eq!(rendered, "{count}: 1 violation(s)");
}
