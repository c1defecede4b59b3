//! The deployed contract surface this library talks to: per chain
//! deployment addresses and the ABIs of the entry points it encodes calls
//! for. The artifacts are trimmed to exactly those entry points.

pub mod addresses;

use ethabi::Contract;
use lazy_static::lazy_static;

lazy_static! {
    /// The exchange contract, trimmed to `fillOrder` and
    /// `executeTransaction`.
    pub static ref EXCHANGE: Contract = load(include_bytes!("../artifacts/Exchange.json"));

    /// The DevUtils contract, trimmed to the balance and allowance query.
    pub static ref DEV_UTILS: Contract = load(include_bytes!("../artifacts/DevUtils.json"));
}

fn load(artifact: &[u8]) -> Contract {
    // The artifacts are compile time inputs; failing to parse one is a
    // defect, not a runtime condition.
    Contract::load(artifact).expect("embedded abi artifact is valid")
}
