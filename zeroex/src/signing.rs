//! The signer collaborator interface and a local in-memory implementation.

use model::signature::EcSignature;
use primitive_types::{H160, H256};
use thiserror::Error;
use web3::signing::{Key, SecretKeyRef};

#[derive(Debug, Error)]
pub enum SigningError {
    #[error("signer does not manage the key for {0:?}")]
    UnknownSigner(H160),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Produces eth_sign signatures over 32 byte hashes for accounts it manages.
/// Key storage and access control are entirely the implementation's concern.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
pub trait EthSigner: Send + Sync {
    fn eth_sign(&self, hash: H256, account: H160) -> Result<EcSignature, SigningError>;
}

/// Signs with a single secp256k1 key held in memory.
pub struct LocalSigner {
    key: secp256k1::SecretKey,
}

impl LocalSigner {
    pub fn new(key: secp256k1::SecretKey) -> Self {
        Self { key }
    }

    /// The address of the managed key.
    pub fn address(&self) -> H160 {
        SecretKeyRef::new(&self.key).address()
    }
}

impl EthSigner for LocalSigner {
    fn eth_sign(&self, hash: H256, account: H160) -> Result<EcSignature, SigningError> {
        let key = SecretKeyRef::new(&self.key);
        if key.address() != account {
            return Err(SigningError::UnknownSigner(account));
        }
        Ok(EcSignature::sign(&hash.0, key))
    }
}
