//! The order type and its signed form, hashed and serialized exactly as the
//! exchange contract and the standard relayer API expect them.

use crate::{
    bytes_hex,
    signature::{hashed_eip712_message, EcSignature, SignatureType},
    u256_decimal, DomainSeparator,
};
use hex_literal::hex;
use primitive_types::{H160, H256, U256};
use serde::{Deserialize, Serialize};
use web3::signing::{self, SecretKeyRef};

/// An unsigned order.
///
/// These are the exact fields that get hashed and verified by the exchange
/// contract; the chain id and exchange address pin the order to one
/// deployment.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub chain_id: u64,
    pub exchange_address: H160,
    pub maker_address: H160,
    #[serde(with = "bytes_hex")]
    pub maker_asset_data: Vec<u8>,
    #[serde(with = "bytes_hex")]
    pub maker_fee_asset_data: Vec<u8>,
    #[serde(with = "u256_decimal")]
    pub maker_asset_amount: U256,
    #[serde(with = "u256_decimal")]
    pub maker_fee: U256,
    pub taker_address: H160,
    #[serde(with = "bytes_hex")]
    pub taker_asset_data: Vec<u8>,
    #[serde(with = "bytes_hex")]
    pub taker_fee_asset_data: Vec<u8>,
    #[serde(with = "u256_decimal")]
    pub taker_asset_amount: U256,
    #[serde(with = "u256_decimal")]
    pub taker_fee: U256,
    pub sender_address: H160,
    pub fee_recipient_address: H160,
    #[serde(with = "u256_decimal")]
    pub expiration_time_seconds: U256,
    #[serde(with = "u256_decimal")]
    pub salt: U256,
}

impl Order {
    // keccak256("Order(address makerAddress,address takerAddress,address feeRecipientAddress,address senderAddress,uint256 makerAssetAmount,uint256 takerAssetAmount,uint256 makerFee,uint256 takerFee,uint256 expirationTimeSeconds,uint256 salt,bytes makerAssetData,bytes takerAssetData,bytes makerFeeAssetData,bytes takerFeeAssetData)")
    pub const TYPE_HASH: [u8; 32] =
        hex!("f80322eb8376aafb64eadf8f0d7623f22130fd9491a221e902b713cb984a7534");

    /// Returns the value of hashStruct() over the order as defined by
    /// EIP-712.
    ///
    /// https://eips.ethereum.org/EIPS/eip-712#definition-of-hashstruct
    pub fn hash_struct(&self) -> [u8; 32] {
        let mut hash_data = [0u8; 480];
        hash_data[0..32].copy_from_slice(&Self::TYPE_HASH);
        // Address slots are extended to 256 bits, the unassigned bytes stay 0.
        hash_data[44..64].copy_from_slice(self.maker_address.as_fixed_bytes());
        hash_data[76..96].copy_from_slice(self.taker_address.as_fixed_bytes());
        hash_data[108..128].copy_from_slice(self.fee_recipient_address.as_fixed_bytes());
        hash_data[140..160].copy_from_slice(self.sender_address.as_fixed_bytes());
        self.maker_asset_amount.to_big_endian(&mut hash_data[160..192]);
        self.taker_asset_amount.to_big_endian(&mut hash_data[192..224]);
        self.maker_fee.to_big_endian(&mut hash_data[224..256]);
        self.taker_fee.to_big_endian(&mut hash_data[256..288]);
        self.expiration_time_seconds
            .to_big_endian(&mut hash_data[288..320]);
        self.salt.to_big_endian(&mut hash_data[320..352]);
        // Dynamic fields enter as the hash of their contents. An empty fee
        // asset data therefore hashes as keccak256 of the empty string.
        hash_data[352..384].copy_from_slice(&signing::keccak256(&self.maker_asset_data));
        hash_data[384..416].copy_from_slice(&signing::keccak256(&self.taker_asset_data));
        hash_data[416..448].copy_from_slice(&signing::keccak256(&self.maker_fee_asset_data));
        hash_data[448..480].copy_from_slice(&signing::keccak256(&self.taker_fee_asset_data));
        signing::keccak256(&hash_data)
    }

    /// The signable order hash under the deployment the order itself names.
    pub fn hash(&self) -> H256 {
        let domain = DomainSeparator::new(self.chain_id, self.exchange_address);
        H256(hashed_eip712_message(&domain, &self.hash_struct()))
    }

    /// Signs the order hash with a local key, producing the packed eth_sign
    /// signature the exchange expects.
    pub fn sign(self, key: SecretKeyRef) -> SignedOrder {
        let signature = EcSignature::sign(&self.hash().0, key);
        SignedOrder {
            order: self,
            signature: signature.to_bytes(SignatureType::EthSign).to_vec(),
        }
    }
}

/// An order plus the maker's signature over its hash.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct SignedOrder {
    #[serde(flatten)]
    pub order: Order,
    #[serde(with = "bytes_hex")]
    pub signature: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_data::encode_erc20_asset_data;
    use secp256k1::SecretKey;
    use serde_json::json;
    use web3::signing::Key;

    fn ganache_order() -> Order {
        let zrx: H160 = hex!("e41d2489571d322189246dafa5ebde1f4699f498").into();
        let weth: H160 = hex!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2").into();
        Order {
            chain_id: 1337,
            exchange_address: hex!("48bacb9266a570d521063ef5dd96e61686dbe788").into(),
            maker_address: hex!("05cac48d17ecc4d8a9db09dde766a03959b5367e").into(),
            maker_asset_data: encode_erc20_asset_data(zrx).to_vec(),
            maker_fee_asset_data: Vec::new(),
            maker_asset_amount: U256::from_dec_str("100000000000000000000").unwrap(),
            maker_fee: U256::zero(),
            taker_address: H160::zero(),
            taker_asset_data: encode_erc20_asset_data(weth).to_vec(),
            taker_fee_asset_data: Vec::new(),
            taker_asset_amount: U256::from_dec_str("1000000000000000000").unwrap(),
            taker_fee: U256::zero(),
            sender_address: H160::zero(),
            fee_recipient_address: H160::zero(),
            expiration_time_seconds: 1574791861.into(),
            salt: 12345.into(),
        }
    }

    #[test]
    fn type_hash_matches_type_string() {
        assert_eq!(
            Order::TYPE_HASH,
            signing::keccak256(
                b"Order(address makerAddress,address takerAddress,address feeRecipientAddress,address senderAddress,uint256 makerAssetAmount,uint256 takerAssetAmount,uint256 makerFee,uint256 takerFee,uint256 expirationTimeSeconds,uint256 salt,bytes makerAssetData,bytes takerAssetData,bytes makerFeeAssetData,bytes takerFeeAssetData)"
            ),
        );
    }

    #[test]
    fn order_struct_hash() {
        assert_eq!(
            ganache_order().hash_struct(),
            hex!("7de799f4dd4b6f577f3650b9c5ac077296497f0a2454d187ce9f5b4a60445db5"),
        );
    }

    #[test]
    fn order_hash() {
        assert_eq!(
            ganache_order().hash(),
            H256(hex!(
                "d674313233eef7ae56cbd79f87c270a90799185243478469bb2ed21e94312d03"
            )),
        );
    }

    #[test]
    fn hash_depends_on_deployment() {
        let order = ganache_order();
        let mut other_chain = order.clone();
        other_chain.chain_id = 1;
        assert_ne!(order.hash(), other_chain.hash());

        let mut other_exchange = order.clone();
        other_exchange.exchange_address = H160([0x11; 20]);
        assert_ne!(order.hash(), other_exchange.hash());
    }

    #[test]
    fn deserialization_and_back() {
        let value = json!({
            "chainId": 1337,
            "exchangeAddress": "0x48bacb9266a570d521063ef5dd96e61686dbe788",
            "makerAddress": "0x05cac48d17ecc4d8a9db09dde766a03959b5367e",
            "makerAssetData": "0xf47261b0000000000000000000000000e41d2489571d322189246dafa5ebde1f4699f498",
            "makerFeeAssetData": "0x",
            "makerAssetAmount": "100000000000000000000",
            "makerFee": "0",
            "takerAddress": "0x0000000000000000000000000000000000000000",
            "takerAssetData": "0xf47261b0000000000000000000000000c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
            "takerFeeAssetData": "0x",
            "takerAssetAmount": "1000000000000000000",
            "takerFee": "0",
            "senderAddress": "0x0000000000000000000000000000000000000000",
            "feeRecipientAddress": "0x0000000000000000000000000000000000000000",
            "expirationTimeSeconds": "1574791861",
            "salt": "12345",
        });
        let deserialized: Order = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(deserialized, ganache_order());
        let serialized = serde_json::to_value(ganache_order()).unwrap();
        assert_eq!(serialized, value);
    }

    #[test]
    fn signed_order_round_trip() {
        let key = SecretKey::from_slice(&[0x42; 32]).unwrap();
        let signed = ganache_order().sign(SecretKeyRef::new(&key));
        let encoded = serde_json::to_string(&signed).unwrap();
        let decoded: SignedOrder = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, signed);
    }

    #[test]
    fn sign_recovers_to_maker() {
        let key = SecretKey::from_slice(&[0x42; 32]).unwrap();
        let maker = SecretKeyRef::new(&key).address();
        let order = Order {
            maker_address: maker,
            ..ganache_order()
        };
        let hash = order.hash();

        let signed = order.sign(SecretKeyRef::new(&key));
        let (signature, signature_type) =
            EcSignature::from_bytes(signed.signature.as_slice().try_into().unwrap()).unwrap();
        assert_eq!(signature_type, SignatureType::EthSign);
        assert_eq!(signature.recover(&hash.0).unwrap(), maker);
    }
}
