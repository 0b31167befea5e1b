//! EIP-55 checksummed address helpers.
//!
//! The core never stores addresses as raw strings: `alloy_primitives::Address`
//! is already a fixed 20-byte value with case-insensitive equality, so it is
//! used directly as the data model's `Address` type. This module only adds
//! the "zero address means absent" convention the detectors rely on.

use alloy_primitives::Address;

/// Render an address in its EIP-55 checksummed form.
///
/// `Address`'s own `Display` impl already does this; the helper exists so
/// call sites that only have a `&str` address (e.g. deserialized from an RPC
/// reply) can checksum it without round-tripping through a parse error.
pub fn checksummed(address: Address) -> String {
    address.to_checksum(None)
}

/// Returns `None` for the zero address, `Some(address)` otherwise.
///
/// Every detector that reads an address out of a storage slot or a contract
/// call return value routes it through this before storing it in a record,
/// so "unset" and "explicitly zero" are never conflated downstream.
pub fn non_zero(address: Address) -> Option<Address> {
    if address.is_zero() { None } else { Some(address) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_address_is_absent() {
        assert_eq!(non_zero(Address::ZERO), None);
    }

    #[test]
    fn non_zero_address_round_trips() {
        let a = Address::repeat_byte(0x11);
        assert_eq!(non_zero(a), Some(a));
    }

    #[test]
    fn checksum_matches_eip55() {
        let a: Address = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
            .parse()
            .unwrap();
        assert_eq!(checksummed(a), a.to_checksum(None));
    }
}
