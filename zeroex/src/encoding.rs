//! Call data packing for the exchange entry points.

use anyhow::{Context, Result};
use contracts::EXCHANGE;
use ethabi::Token;
use model::{order::Order, transaction::ZeroExTransaction};
use primitive_types::U256;

fn order_token(order: &Order) -> Token {
    // Field order mirrors the contract's order struct, not the wire format.
    Token::Tuple(vec![
        Token::Address(order.maker_address),
        Token::Address(order.taker_address),
        Token::Address(order.fee_recipient_address),
        Token::Address(order.sender_address),
        Token::Uint(order.maker_asset_amount),
        Token::Uint(order.taker_asset_amount),
        Token::Uint(order.maker_fee),
        Token::Uint(order.taker_fee),
        Token::Uint(order.expiration_time_seconds),
        Token::Uint(order.salt),
        Token::Bytes(order.maker_asset_data.clone()),
        Token::Bytes(order.taker_asset_data.clone()),
        Token::Bytes(order.maker_fee_asset_data.clone()),
        Token::Bytes(order.taker_fee_asset_data.clone()),
    ])
}

fn transaction_token(transaction: &ZeroExTransaction) -> Token {
    Token::Tuple(vec![
        Token::Uint(transaction.salt),
        Token::Uint(transaction.expiration_time_seconds),
        Token::Uint(transaction.gas_price),
        Token::Address(transaction.signer_address),
        Token::Bytes(transaction.data.clone()),
    ])
}

/// Packs the call data for filling `taker_asset_fill_amount` of the order
/// with the maker's signature.
pub fn fill_order_call_data(
    order: &Order,
    taker_asset_fill_amount: U256,
    signature: &[u8],
) -> Result<Vec<u8>> {
    EXCHANGE
        .function("fillOrder")
        .context("exchange abi is missing fillOrder")?
        .encode_input(&[
            order_token(order),
            Token::Uint(taker_asset_fill_amount),
            Token::Bytes(signature.to_vec()),
        ])
        .context("packing fillOrder call data")
}

/// Packs the call data for executing a signed meta-transaction.
pub fn execute_transaction_call_data(
    transaction: &ZeroExTransaction,
    signature: &[u8],
) -> Result<Vec<u8>> {
    EXCHANGE
        .function("executeTransaction")
        .context("exchange abi is missing executeTransaction")?
        .encode_input(&[transaction_token(transaction), Token::Bytes(signature.to_vec())])
        .context("packing executeTransaction call data")
}
