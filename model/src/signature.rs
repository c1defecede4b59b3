use crate::DomainSeparator;
use anyhow::{anyhow, Context as _, Result};
use primitive_types::{H160, H256};
use web3::{
    signing::{self, Key, SecretKeyRef},
    types::Recovery,
};

/// Length of a packed signature: v, r, s plus the trailing scheme tag.
pub const EC_SIGNATURE_LENGTH: usize = 66;

/// The signature schemes understood by the v3 exchange contract. The
/// discriminant is the tag byte trailing every packed signature.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum SignatureType {
    Illegal = 0,
    Invalid = 1,
    Eip712 = 2,
    EthSign = 3,
    Wallet = 4,
    Validator = 5,
    PreSigned = 6,
    Eip1271Wallet = 7,
}

impl SignatureType {
    pub fn from_byte(byte: u8) -> Result<Self> {
        Ok(match byte {
            0 => Self::Illegal,
            1 => Self::Invalid,
            2 => Self::Eip712,
            3 => Self::EthSign,
            4 => Self::Wallet,
            5 => Self::Validator,
            6 => Self::PreSigned,
            7 => Self::Eip1271Wallet,
            _ => return Err(anyhow!("unknown signature type {}", byte)),
        })
    }
}

/// An elliptic curve signature as produced by a signer. Packing into the
/// exchange's byte layout and validation of r/s ranges are separate
/// concerns; this type stores whatever the signer returned.
#[derive(Eq, PartialEq, Clone, Copy, Debug, Default)]
pub struct EcSignature {
    pub v: u8,
    pub r: H256,
    pub s: H256,
}

/// Returns the message used for signing and recovery: the order or
/// transaction hash wrapped in the eth_sign ("Ethereum Signed Message")
/// envelope.
fn eth_sign_message(hash: &[u8; 32]) -> [u8; 32] {
    let mut buffer = [0u8; 60];
    buffer[..28].copy_from_slice(b"\x19Ethereum Signed Message:\n32");
    buffer[28..].copy_from_slice(hash);
    signing::keccak256(&buffer)
}

impl EcSignature {
    /// v + r + s + scheme tag
    pub fn to_bytes(&self, signature_type: SignatureType) -> [u8; EC_SIGNATURE_LENGTH] {
        let mut bytes = [0u8; EC_SIGNATURE_LENGTH];
        bytes[0] = self.v;
        bytes[1..33].copy_from_slice(self.r.as_bytes());
        bytes[33..65].copy_from_slice(self.s.as_bytes());
        bytes[65] = signature_type as u8;
        bytes
    }

    pub fn from_bytes(bytes: &[u8; EC_SIGNATURE_LENGTH]) -> Result<(Self, SignatureType)> {
        let signature = EcSignature {
            v: bytes[0],
            r: H256::from_slice(&bytes[1..33]),
            s: H256::from_slice(&bytes[33..65]),
        };
        Ok((signature, SignatureType::from_byte(bytes[65])?))
    }

    /// Signs the hash under the eth_sign scheme with a local secret key.
    pub fn sign(hash: &[u8; 32], key: SecretKeyRef) -> Self {
        let message = eth_sign_message(hash);
        // Unwrap because the only error is for invalid messages which we don't create.
        let signature = key.sign(&message, None).unwrap();
        Self {
            v: signature.v as u8,
            r: signature.r,
            s: signature.s,
        }
    }

    /// Recovers the signing address for an eth_sign signature over `hash`.
    pub fn recover(&self, hash: &[u8; 32]) -> Result<H160> {
        let message = eth_sign_message(hash);
        let recovery = Recovery::new(message, self.v as u64, self.r, self.s);
        let (signature, recovery_id) = recovery
            .as_signature()
            .context("unexpectedly invalid signature")?;
        Ok(signing::recover(&message, &signature, recovery_id)?)
    }
}

/// The final EIP-191/712 hash: keccak256 of the fixed 0x19 0x01 prefix, the
/// domain separator, and the struct hash.
pub fn hashed_eip712_message(domain: &DomainSeparator, struct_hash: &[u8; 32]) -> [u8; 32] {
    let mut message = [0u8; 66];
    message[0..2].copy_from_slice(&[0x19, 0x01]);
    message[2..34].copy_from_slice(&domain.0);
    message[34..66].copy_from_slice(struct_hash);
    signing::keccak256(&message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secp256k1::SecretKey;
    use web3::signing::keccak256;

    #[test]
    fn packed_layout() {
        let signature = EcSignature {
            v: 27,
            r: H256([1; 32]),
            s: H256([2; 32]),
        };
        let bytes = signature.to_bytes(SignatureType::EthSign);
        assert_eq!(bytes.len(), EC_SIGNATURE_LENGTH);
        assert_eq!(bytes[0], 27);
        assert_eq!(&bytes[1..33], &[1; 32]);
        assert_eq!(&bytes[33..65], &[2; 32]);
        assert_eq!(bytes[65], 3);
    }

    #[test]
    fn pack_and_back() {
        let signature = EcSignature {
            v: 28,
            r: H256([0xaa; 32]),
            s: H256([0xbb; 32]),
        };
        let bytes = signature.to_bytes(SignatureType::EthSign);
        let (recovered, signature_type) = EcSignature::from_bytes(&bytes).unwrap();
        assert_eq!(recovered, signature);
        assert_eq!(signature_type, SignatureType::EthSign);
    }

    #[test]
    fn unknown_signature_type_is_rejected() {
        let mut bytes = [0u8; EC_SIGNATURE_LENGTH];
        bytes[65] = 0xff;
        assert!(EcSignature::from_bytes(&bytes).is_err());
        assert!(SignatureType::from_byte(8).is_err());
    }

    #[test]
    fn sign_and_recover() {
        let key = SecretKey::from_slice(&[0x42; 32]).unwrap();
        let key_ref = SecretKeyRef::new(&key);
        let expected = key_ref.address();
        let hash = keccak256(b"some signable payload");

        let signature = EcSignature::sign(&hash, key_ref);
        assert_eq!(signature.recover(&hash).unwrap(), expected);
    }

    #[test]
    fn recover_detects_tampering() {
        let key = SecretKey::from_slice(&[0x42; 32]).unwrap();
        let key_ref = SecretKeyRef::new(&key);
        let expected = key_ref.address();
        let hash = keccak256(b"some signable payload");

        let signature = EcSignature::sign(&hash, key_ref);
        let other_hash = keccak256(b"some other payload");
        // Recovery over the wrong hash yields some address, just not ours.
        assert_ne!(signature.recover(&other_hash).unwrap(), expected);
    }
}
