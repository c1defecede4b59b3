//! Per chain deployment addresses of the v3 contracts.

use hex_literal::hex;
use primitive_types::H160;
use thiserror::Error;

/// Chain id of the development network snapshot used throughout the test
/// suites.
pub const TEST_CHAIN_ID: u64 = 1337;

/// Addresses of the protocol contracts deployed on one chain.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ContractAddresses {
    pub exchange: H160,
    pub dev_utils: H160,
    pub erc20_proxy: H160,
    pub weth9: H160,
    pub zrx_token: H160,
}

#[derive(Debug, Error)]
#[error("no known contract deployments for chain id {0}")]
pub struct UnknownChain(pub u64);

/// Looks up the deployment addresses for a chain id. Fails for chains
/// without a registered deployment; extending the registry is a data only
/// change.
pub fn contract_addresses(chain_id: u64) -> Result<ContractAddresses, UnknownChain> {
    match chain_id {
        // mainnet
        1 => Ok(ContractAddresses {
            exchange: H160(hex!("61935cbdd02287b511119ddb11aeb42f1593b7ef")),
            dev_utils: H160(hex!("74134cf88b21383713e096a5ecf59e297dc7f547")),
            erc20_proxy: H160(hex!("95e6f48254609a6ee006f7d493c8e5fb97094cef")),
            weth9: H160(hex!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2")),
            zrx_token: H160(hex!("e41d2489571d322189246dafa5ebde1f4699f498")),
        }),
        // development snapshot
        TEST_CHAIN_ID => Ok(ContractAddresses {
            exchange: H160(hex!("48bacb9266a570d521063ef5dd96e61686dbe788")),
            dev_utils: H160(hex!("38ef19fdf8e8415f18c307ed71967e19aac28ba1")),
            erc20_proxy: H160(hex!("1dc4c1cefef38a777b15aa20260a54e584b16c48")),
            weth9: H160(hex!("0b1ba0af832d7c05fd64161e0db78e85978e8082")),
            zrx_token: H160(hex!("871dd7c2b4b25e1aa18728e9d5f2af4c4e431f5c")),
        }),
        _ => Err(UnknownChain(chain_id)),
    }
}
