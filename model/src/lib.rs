//! Value objects shared by everything that builds, hashes, or signs 0x v3
//! orders and meta-transactions: the binary asset-data codec, salt
//! generation, signature packing, and the EIP-712 hashing of orders and
//! transactions.

pub mod asset_data;
pub mod bytes_hex;
pub mod order;
pub mod salt;
pub mod signature;
pub mod transaction;
pub mod u256_decimal;

use hex::{FromHex, FromHexError};
use lazy_static::lazy_static;
use primitive_types::H160;
use std::fmt;
use web3::{
    ethabi::{encode, Token},
    signing,
};

/// The EIP-712 domain name under which all v3 orders and transactions are
/// hashed.
pub const PROTOCOL_NAME: &str = "0x Protocol";

/// The EIP-712 domain version matching [`PROTOCOL_NAME`].
pub const PROTOCOL_VERSION: &str = "3.0.0";

#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct DomainSeparator(pub [u8; 32]);

impl std::str::FromStr for DomainSeparator {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(FromHex::from_hex(s)?))
    }
}

impl fmt::Debug for DomainSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hex = [0u8; 64];
        // Unwrap because we know the length is correct.
        hex::encode_to_slice(self.0, &mut hex).unwrap();
        // Unwrap because we know it is valid utf8.
        f.write_str(std::str::from_utf8(&hex).unwrap())
    }
}

impl DomainSeparator {
    /// Computes the protocol's EIP-712 domain separator for the given chain
    /// and the exchange contract deployed on it. Every order and transaction
    /// hash is bound to exactly one such domain.
    pub fn new(chain_id: u64, exchange_address: H160) -> Self {
        lazy_static! {
            /// The EIP-712 domain name used for computing the domain separator.
            static ref DOMAIN_NAME: [u8; 32] = signing::keccak256(PROTOCOL_NAME.as_bytes());

            /// The EIP-712 domain version used for computing the domain separator.
            static ref DOMAIN_VERSION: [u8; 32] = signing::keccak256(PROTOCOL_VERSION.as_bytes());

            /// The EIP-712 domain type used for computing the domain separator.
            static ref DOMAIN_TYPE_HASH: [u8; 32] = signing::keccak256(
                b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)",
            );
        }
        let abi_encode_string = encode(&[
            Token::Uint((*DOMAIN_TYPE_HASH).into()),
            Token::Uint((*DOMAIN_NAME).into()),
            Token::Uint((*DOMAIN_VERSION).into()),
            Token::Uint(chain_id.into()),
            Token::Address(exchange_address),
        ]);

        DomainSeparator(signing::keccak256(abi_encode_string.as_slice()))
    }
}
