// crates/vpc-foundation-config/src/cidr.rs
// ============================================================================
// Module: Private CIDR Validation
// Description: Syntax and range checks for IPv4 CIDR blocks.
// Purpose: Decide whether a VPC CIDR block lies inside an RFC 1918 range.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! VPC CIDR blocks are accepted only when they are well-formed dotted-quad
//! CIDR strings inside one of the three RFC 1918 private ranges. Range
//! membership is decided from the leading octets of the address; the mask is
//! checked for syntax and bounds only.
//!
//! ## Invariants
//! - Every octet is 1-3 ASCII digits with a value in `[0, 255]`.
//! - The mask is 1-3 ASCII digits with a value in `[0, 32]`.
//! - Leading zeros are read as decimal in octets and mask alike (`010`, `032`).
//! - Validation is pure and never panics on arbitrary input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Largest accepted prefix length.
pub const MAX_MASK_BITS: u8 = 32;
/// Maximum digits allowed in an octet or the mask.
const MAX_FIELD_DIGITS: usize = 3;

// ============================================================================
// SECTION: Types
// ============================================================================

/// RFC 1918 private address ranges accepted for VPC CIDR blocks.
///
/// # Invariants
/// - Variants are stable for serialization and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivateRange {
    /// `10.0.0.0/8`.
    TenSlash8,
    /// `172.16.0.0/12` (second octet 16-31).
    OneSevenTwoSlash12,
    /// `192.168.0.0/16`.
    OneNineTwoSlash16,
}

impl PrivateRange {
    /// Returns the canonical CIDR label for the range.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TenSlash8 => "10.0.0.0/8",
            Self::OneSevenTwoSlash12 => "172.16.0.0/12",
            Self::OneNineTwoSlash16 => "192.168.0.0/16",
        }
    }

    /// Returns the private range containing `address`, if any.
    #[must_use]
    pub const fn containing(address: Ipv4Addr) -> Option<Self> {
        let [first, second, _, _] = address.octets();
        match (first, second) {
            (10, _) => Some(Self::TenSlash8),
            (172, 16..=31) => Some(Self::OneSevenTwoSlash12),
            (192, 168) => Some(Self::OneNineTwoSlash16),
            _ => None,
        }
    }
}

impl fmt::Display for PrivateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A CIDR block that passed syntax and private-range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrivateCidr {
    /// Network address as written (host bits are not normalized).
    pub address: Ipv4Addr,
    /// Prefix length in `[0, 32]`.
    pub mask: u8,
    /// Private range the address falls into.
    pub range: PrivateRange,
}

impl fmt::Display for PrivateCidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.mask)
    }
}

/// Reasons a string is not a valid private CIDR block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CidrError {
    /// Missing `/` separator or more than one.
    #[error("expected <address>/<mask>")]
    MissingMask,
    /// Address does not have exactly four dot-separated segments.
    #[error("expected 4 octets, found {0}")]
    SegmentCount(usize),
    /// Octet is empty, non-numeric, or too long.
    #[error("octet {position} is not a decimal number")]
    MalformedOctet {
        /// One-based octet position.
        position: usize,
    },
    /// Octet value exceeds 255.
    #[error("octet {position} is out of range: {value}")]
    OctetOutOfRange {
        /// One-based octet position.
        position: usize,
        /// Parsed octet value.
        value: u16,
    },
    /// Mask is empty, non-numeric, or too long.
    #[error("mask is not a decimal number")]
    MalformedMask,
    /// Mask exceeds 32.
    #[error("mask is out of range: {0}")]
    MaskOutOfRange(u16),
    /// Address is outside every private range.
    #[error("{0} is outside 10.0.0.0/8, 172.16.0.0/12 and 192.168.0.0/16")]
    NotPrivate(Ipv4Addr),
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Returns true when `value` is a well-formed CIDR block inside a private range.
#[must_use]
pub fn is_valid_private_cidr(value: &str) -> bool {
    parse_private_cidr(value).is_ok()
}

/// Parses `value` as a private CIDR block.
///
/// # Errors
///
/// Returns [`CidrError`] describing the first syntax or range problem found.
pub fn parse_private_cidr(value: &str) -> Result<PrivateCidr, CidrError> {
    let (address_text, mask_text) = value.split_once('/').ok_or(CidrError::MissingMask)?;
    if mask_text.contains('/') {
        return Err(CidrError::MissingMask);
    }
    let address = parse_address(address_text)?;
    let mask = parse_mask(mask_text)?;
    let range = PrivateRange::containing(address).ok_or(CidrError::NotPrivate(address))?;
    Ok(PrivateCidr {
        address,
        mask,
        range,
    })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a dotted-quad address with 1-3 digit octets.
fn parse_address(text: &str) -> Result<Ipv4Addr, CidrError> {
    let segments: Vec<&str> = text.split('.').collect();
    if segments.len() != 4 {
        return Err(CidrError::SegmentCount(segments.len()));
    }
    let mut octets = [0_u8; 4];
    for (index, segment) in segments.iter().enumerate() {
        let position = index + 1;
        let value = parse_digits(segment).ok_or(CidrError::MalformedOctet {
            position,
        })?;
        octets[index] = u8::try_from(value).map_err(|_| CidrError::OctetOutOfRange {
            position,
            value,
        })?;
    }
    Ok(Ipv4Addr::from(octets))
}

/// Parses the prefix length.
fn parse_mask(text: &str) -> Result<u8, CidrError> {
    let value = parse_digits(text).ok_or(CidrError::MalformedMask)?;
    match u8::try_from(value) {
        Ok(mask) if mask <= MAX_MASK_BITS => Ok(mask),
        _ => Err(CidrError::MaskOutOfRange(value)),
    }
}

/// Parses 1-3 ASCII digits; signs and whitespace are rejected.
fn parse_digits(text: &str) -> Option<u16> {
    if text.is_empty()
        || text.len() > MAX_FIELD_DIGITS
        || !text.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    text.parse().ok()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_boundaries_for_172_block() {
        assert_eq!(PrivateRange::containing(Ipv4Addr::new(172, 15, 0, 0)), None);
        assert_eq!(
            PrivateRange::containing(Ipv4Addr::new(172, 16, 0, 0)),
            Some(PrivateRange::OneSevenTwoSlash12)
        );
        assert_eq!(
            PrivateRange::containing(Ipv4Addr::new(172, 31, 255, 255)),
            Some(PrivateRange::OneSevenTwoSlash12)
        );
        assert_eq!(PrivateRange::containing(Ipv4Addr::new(172, 32, 0, 0)), None);
    }

    #[test]
    fn octet_overflow_reports_position() {
        assert_eq!(
            parse_private_cidr("10.0.256.0/16"),
            Err(CidrError::OctetOutOfRange {
                position: 3,
                value: 256,
            })
        );
    }

    #[test]
    fn display_round_trips_parsed_block() {
        let parsed = parse_private_cidr("192.168.10.0/24");
        assert_eq!(parsed.map(|cidr| cidr.to_string()), Ok("192.168.10.0/24".to_string()));
    }
}
