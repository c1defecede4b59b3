//! Read-only caller for the DevUtils helper contract.

use anyhow::{anyhow, Context, Result};
use contracts::DEV_UTILS;
use ethabi::Token;
use primitive_types::{H160, U256};
use web3::{
    types::{Bytes, CallRequest},
    Transport, Web3,
};

#[derive(Clone, Debug)]
pub struct DevUtils<T: Transport> {
    web3: Web3<T>,
    address: H160,
}

impl<T: Transport> DevUtils<T> {
    pub fn new(web3: Web3<T>, address: H160) -> Self {
        Self { web3, address }
    }

    /// Queries the owner's balance of the referenced asset together with the
    /// allowance granted to the asset's transfer proxy.
    pub async fn get_balance_and_asset_proxy_allowance(
        &self,
        owner: H160,
        asset_data: &[u8],
    ) -> Result<(U256, U256)> {
        let function = DEV_UTILS
            .function("getBalanceAndAssetProxyAllowance")
            .context("dev utils abi is missing the balance query")?;
        let data = function
            .encode_input(&[Token::Address(owner), Token::Bytes(asset_data.to_vec())])
            .context("packing balance query call data")?;
        let output = self
            .web3
            .eth()
            .call(
                CallRequest {
                    to: Some(self.address),
                    data: Some(Bytes(data)),
                    ..Default::default()
                },
                None,
            )
            .await
            .context("balance and allowance query failed")?;
        let tokens = function
            .decode_output(&output.0)
            .context("decoding balance query output")?;
        match tokens.as_slice() {
            [Token::Uint(balance), Token::Uint(allowance)] => Ok((*balance, *allowance)),
            other => Err(anyhow!("unexpected balance query output: {:?}", other)),
        }
    }
}
