use anyhow::{Context, Result};
use primitive_types::U256;
use rand::{rngs::OsRng, RngCore};

/// Generates a pseudo random salt in `[0, 2^256 - 1)` from the operating
/// system's entropy source.
///
/// Salts only serve as a uniqueness nonce so collisions merely make two
/// otherwise identical orders indistinguishable, but a predictable source
/// would still be a bug. A failing entropy source is fatal and propagated,
/// never papered over with a weaker generator.
pub fn generate_pseudo_random_salt() -> Result<U256> {
    let mut buf = [0u8; 32];
    loop {
        OsRng
            .try_fill_bytes(&mut buf)
            .context("secure random source failed")?;
        let salt = U256::from_big_endian(&buf);
        // The upper bound is exclusive.
        if salt != U256::MAX {
            return Ok(salt);
        }
    }
}
