//! The signable meta-transaction (ZEIP-18) and its wire encoding.

use crate::{
    bytes_hex,
    signature::{hashed_eip712_message, EcSignature, SignatureType},
    u256_decimal, DomainSeparator,
};
use hex_literal::hex;
use primitive_types::{H160, H256, U256};
use serde::{Deserialize, Serialize};
use web3::signing::{self, SecretKeyRef};

/// A meta-transaction to be executed by the exchange on behalf of its
/// signer. Hashing is a pure function of the fields and the domain it is
/// hashed under; callers that want to avoid rehashing cache the result
/// themselves.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZeroExTransaction {
    #[serde(with = "u256_decimal")]
    pub salt: U256,
    #[serde(with = "u256_decimal")]
    pub expiration_time_seconds: U256,
    #[serde(with = "u256_decimal")]
    pub gas_price: U256,
    pub signer_address: H160,
    #[serde(with = "bytes_hex")]
    pub data: Vec<u8>,
}

impl ZeroExTransaction {
    // keccak256("ZeroExTransaction(uint256 salt,uint256 expirationTimeSeconds,uint256 gasPrice,address signerAddress,bytes data)")
    pub const TYPE_HASH: [u8; 32] =
        hex!("ec69816980a3a3ca4554410e60253953e9ff375ba4536a98adfa15cc71541508");

    /// Returns the value of hashStruct() over the transaction as defined by
    /// EIP-712.
    ///
    /// https://eips.ethereum.org/EIPS/eip-712#definition-of-hashstruct
    pub fn hash_struct(&self) -> [u8; 32] {
        let mut hash_data = [0u8; 192];
        hash_data[0..32].copy_from_slice(&Self::TYPE_HASH);
        self.salt.to_big_endian(&mut hash_data[32..64]);
        self.expiration_time_seconds
            .to_big_endian(&mut hash_data[64..96]);
        self.gas_price.to_big_endian(&mut hash_data[96..128]);
        // The address slot is extended to 256 bits, the upper bytes stay 0.
        hash_data[140..160].copy_from_slice(self.signer_address.as_fixed_bytes());
        hash_data[160..192].copy_from_slice(&signing::keccak256(&self.data));
        signing::keccak256(&hash_data)
    }

    /// The signable transaction hash under the given domain.
    pub fn hash(&self, domain: &DomainSeparator) -> H256 {
        H256(hashed_eip712_message(domain, &self.hash_struct()))
    }

    /// Signs the transaction hash with a local key, producing the packed
    /// eth_sign signature the exchange expects.
    pub fn sign(self, domain: &DomainSeparator, key: SecretKeyRef) -> SignedZeroExTransaction {
        let signature = EcSignature::sign(&self.hash(domain).0, key);
        SignedZeroExTransaction {
            transaction: self,
            signature: signature.to_bytes(SignatureType::EthSign).to_vec(),
        }
    }
}

/// A transaction plus the signature authorizing it.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct SignedZeroExTransaction {
    #[serde(flatten)]
    pub transaction: ZeroExTransaction,
    #[serde(with = "bytes_hex")]
    pub signature: Vec<u8>,
}
