//! CIDR property-based tests.
//!
//! ## Purpose
//! Exercise the CIDR validator with generated inputs to pin acceptance of
//! every well-formed private block and rejection of out-of-bounds masks,
//! oversize octets, and arbitrary strings without panics.
// crates/vpc-foundation-config/tests/proptest_cidr.rs
// ============================================================================
// Module: CIDR Property-Based Tests
// Description: Generated acceptance and rejection checks for CIDR strings.
// Purpose: Ensure the validator is total and matches its range contract.
// ============================================================================

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
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use vpc_foundation_config::is_valid_private_cidr;

/// Generates a private address as (first, second) leading octets.
fn private_prefix() -> impl Strategy<Value = (u8, u8)> {
    prop_oneof![
        any::<u8>().prop_map(|second| (10_u8, second)),
        (16_u8..=31).prop_map(|second| (172_u8, second)),
        Just((192_u8, 168_u8)),
    ]
}

proptest! {
    #[test]
    fn accepts_all_private_blocks(
        (first, second) in private_prefix(),
        third in any::<u8>(),
        fourth in any::<u8>(),
        mask in 0_u8..=32,
    ) {
        let cidr = format!("{first}.{second}.{third}.{fourth}/{mask}");
        prop_assert!(is_valid_private_cidr(&cidr), "{} rejected", cidr);
    }

    #[test]
    fn rejects_masks_above_32(
        (first, second) in private_prefix(),
        mask in 33_u16..=999,
    ) {
        let cidr = format!("{first}.{second}.0.0/{mask}");
        prop_assert!(!is_valid_private_cidr(&cidr));
    }

    #[test]
    fn rejects_any_octet_above_255(
        position in 0_usize..4,
        value in 256_u16..=999,
        mask in 0_u8..=32,
    ) {
        let mut octets = ["10".to_string(), "0".to_string(), "0".to_string(), "0".to_string()];
        octets[position] = value.to_string();
        let cidr = format!("{}/{mask}", octets.join("."));
        prop_assert!(!is_valid_private_cidr(&cidr));
    }

    #[test]
    fn arbitrary_strings_never_panic(raw in ".{0,64}") {
        let first = is_valid_private_cidr(&raw);
        prop_assert_eq!(first, is_valid_private_cidr(&raw));
    }
}
