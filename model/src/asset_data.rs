//! The binary asset-data format identifying a tradable token and the proxy
//! that transfers it.

use hex_literal::hex;
use primitive_types::H160;

/// Total length of an encoded ERC-20 asset-data blob.
pub const ASSET_DATA_LENGTH: usize = 36;

// bytes4(keccak256("ERC20Token(address)"))
pub const ERC20_PROXY_ID: [u8; 4] = hex!("f47261b0");

/// Encodes a token address into the fixed 36 byte ERC-20 asset-data layout:
/// the 4 byte proxy selector followed by the address left padded to 32 bytes.
pub fn encode_erc20_asset_data(token: H160) -> [u8; ASSET_DATA_LENGTH] {
    let mut asset_data = [0u8; ASSET_DATA_LENGTH];
    asset_data[0..4].copy_from_slice(&ERC20_PROXY_ID);
    asset_data[16..36].copy_from_slice(token.as_fixed_bytes());
    asset_data
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn encodes_weth() {
        let weth: H160 = hex!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2").into();
        assert_eq!(
            encode_erc20_asset_data(weth),
            hex!("f47261b0000000000000000000000000c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
        );
    }

    #[test]
    fn layout() {
        let token = H160([0xff; 20]);
        let asset_data = encode_erc20_asset_data(token);
        assert_eq!(asset_data.len(), ASSET_DATA_LENGTH);
        assert_eq!(&asset_data[0..4], &ERC20_PROXY_ID);
        assert_eq!(&asset_data[4..16], &[0u8; 12]);
        assert_eq!(&asset_data[16..36], token.as_bytes());
    }

    #[test]
    fn zero_address_still_encodes() {
        let asset_data = encode_erc20_asset_data(H160::zero());
        assert_eq!(&asset_data[0..4], &ERC20_PROXY_ID);
        assert_eq!(&asset_data[4..36], &[0u8; 32]);
    }
}
