//! Facade over the v3 exchange: builds orders, hashes and signs
//! meta-transactions for the chain it is connected to, packs call data, and
//! validates fills through an externally supplied order validator.

pub mod dev_utils;
pub mod encoding;
pub mod signing;
pub mod validation;

use anyhow::{Context, Result};
use contracts::addresses::{contract_addresses, ContractAddresses, UnknownChain};
use dev_utils::DevUtils;
use model::{
    asset_data::encode_erc20_asset_data,
    order::{Order, SignedOrder},
    salt::generate_pseudo_random_salt,
    signature::SignatureType,
    transaction::{SignedZeroExTransaction, ZeroExTransaction},
    DomainSeparator,
};
use primitive_types::{H160, H256, U256};
use signing::{EthSigner, SigningError};
use std::sync::Arc;
use thiserror::Error;
use validation::OrderValidating;
use web3::{
    types::{BlockNumber, Bytes, TransactionRequest},
    Transport, Web3,
};

/// The multiplier applied to a fill transaction's gas price to obtain the
/// protocol fee, paid in ETH alongside the fill.
pub const PROTOCOL_FEE_MULTIPLIER: u64 = 150_000;

/// Gas limit with buffer for executing a single fill. The buffer covers a
/// fill that additionally has to settle an ended staking epoch.
pub const EXECUTE_FILL_TX_GAS_LIMIT: u64 = 330_000;

/// The ETH value a fill submission must carry at the given gas price.
pub fn protocol_fee(gas_price: U256) -> U256 {
    gas_price * PROTOCOL_FEE_MULTIPLIER
}

/// Computes the signable transaction hash for a chain id, resolving the
/// exchange address through the registry.
pub fn transaction_hash_for_chain(
    transaction: &ZeroExTransaction,
    chain_id: u64,
) -> Result<H256, UnknownChain> {
    let addresses = contract_addresses(chain_id)?;
    let domain = DomainSeparator::new(chain_id, addresses.exchange);
    Ok(transaction.hash(&domain))
}

/// Why a fill did not validate. RPC and validator failures pass through as
/// `Other`.
#[derive(Debug, Error)]
pub enum FillError {
    #[error("order rejected: {0}")]
    Rejected(String),
    #[error("unable to validate order")]
    Incomplete,
    #[error("taker has insufficient allowance for trade: (has: {have}), (want: {want})")]
    InsufficientAllowance { have: U256, want: U256 },
    #[error("taker has insufficient balance for trade: (has: {have}), (want: {want})")]
    InsufficientBalance { have: U256, want: U256 },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Order fields the caller chooses; the facade adds the chain id, the
/// exchange address, and a fresh salt.
#[derive(Clone, Debug, Default)]
pub struct OrderParameters {
    pub maker_address: H160,
    pub taker_address: H160,
    pub sender_address: H160,
    pub fee_recipient_address: H160,
    pub maker_asset: H160,
    pub taker_asset: H160,
    pub maker_asset_amount: U256,
    pub taker_asset_amount: U256,
    pub maker_fee: U256,
    pub taker_fee: U256,
    pub maker_fee_asset: H160,
    pub taker_fee_asset: H160,
    pub expiration_time_seconds: U256,
}

pub struct ZeroEx<T: Transport> {
    web3: Web3<T>,
    chain_id: u64,
    contract_addresses: ContractAddresses,
    dev_utils: DevUtils<T>,
    order_validator: Arc<dyn OrderValidating>,
}

impl<T: Transport> ZeroEx<T> {
    /// Connects the facade to whatever chain the node is on: fetches the
    /// chain id and resolves the contract deployments for it.
    pub async fn new(web3: Web3<T>, order_validator: Arc<dyn OrderValidating>) -> Result<Self> {
        let chain_id = web3
            .eth()
            .chain_id()
            .await
            .context("fetching chain id")?
            .as_u64();
        let contract_addresses = contract_addresses(chain_id)?;
        tracing::debug!(chain_id, "connected to exchange deployment");
        let dev_utils = DevUtils::new(web3.clone(), contract_addresses.dev_utils);
        Ok(Self {
            web3,
            chain_id,
            contract_addresses,
            dev_utils,
            order_validator,
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn contract_addresses(&self) -> &ContractAddresses {
        &self.contract_addresses
    }

    /// The EIP-712 domain all orders and transactions for this deployment
    /// are hashed under.
    pub fn domain_separator(&self) -> DomainSeparator {
        DomainSeparator::new(self.chain_id, self.contract_addresses.exchange)
    }

    /// The signable transaction hash for the connected chain.
    pub fn transaction_hash(&self, transaction: &ZeroExTransaction) -> H256 {
        transaction.hash(&self.domain_separator())
    }

    /// Hashes the transaction for the connected chain and has the signer
    /// authorize it.
    pub fn sign_transaction(
        &self,
        signer: &dyn EthSigner,
        transaction: ZeroExTransaction,
    ) -> Result<SignedZeroExTransaction, SigningError> {
        let hash = self.transaction_hash(&transaction);
        let signature = signer.eth_sign(hash, transaction.signer_address)?;
        Ok(SignedZeroExTransaction {
            signature: signature.to_bytes(SignatureType::EthSign).to_vec(),
            transaction,
        })
    }

    /// Creates an unsigned order with a fresh salt. Fee asset data is only
    /// encoded for fee assets different from the null address; a null fee
    /// asset leaves the field empty to signal "no fee asset".
    pub fn create_order(&self, params: OrderParameters) -> Result<Order> {
        let salt = generate_pseudo_random_salt()?;

        let maker_fee_asset_data = if params.maker_fee_asset != H160::zero() {
            encode_erc20_asset_data(params.maker_fee_asset).to_vec()
        } else {
            Vec::new()
        };
        let taker_fee_asset_data = if params.taker_fee_asset != H160::zero() {
            encode_erc20_asset_data(params.taker_fee_asset).to_vec()
        } else {
            Vec::new()
        };

        Ok(Order {
            chain_id: self.chain_id,
            exchange_address: self.contract_addresses.exchange,
            maker_address: params.maker_address,
            maker_asset_data: encode_erc20_asset_data(params.maker_asset).to_vec(),
            maker_fee_asset_data,
            maker_asset_amount: params.maker_asset_amount,
            maker_fee: params.maker_fee,
            taker_address: params.taker_address,
            taker_asset_data: encode_erc20_asset_data(params.taker_asset).to_vec(),
            taker_fee_asset_data,
            taker_asset_amount: params.taker_asset_amount,
            taker_fee: params.taker_fee,
            sender_address: params.sender_address,
            fee_recipient_address: params.fee_recipient_address,
            expiration_time_seconds: params.expiration_time_seconds,
            salt,
        })
    }

    /// Packs the exchange call data for filling the order.
    pub fn fill_order_call_data(
        &self,
        order: &SignedOrder,
        taker_asset_fill_amount: U256,
    ) -> Result<Vec<u8>> {
        encoding::fill_order_call_data(&order.order, taker_asset_fill_amount, &order.signature)
    }

    /// Submits a signed meta-transaction to the exchange from the given
    /// account. `value` carries the protocol fee when the transaction wraps
    /// a fill.
    pub async fn execute_transaction(
        &self,
        from: H160,
        transaction: &SignedZeroExTransaction,
        value: Option<U256>,
    ) -> Result<H256> {
        let data =
            encoding::execute_transaction_call_data(&transaction.transaction, &transaction.signature)?;
        let request = TransactionRequest {
            from,
            to: Some(self.contract_addresses.exchange),
            gas: Some(EXECUTE_FILL_TX_GAS_LIMIT.into()),
            value,
            data: Some(Bytes(data)),
            ..Default::default()
        };
        let hash = self
            .web3
            .eth()
            .send_transaction(request)
            .await
            .context("submitting executeTransaction")?;
        Ok(hash)
    }

    /// Validates that the taker side of the order can be filled for
    /// `taker_asset_amount`: a single order batch through the validator,
    /// plus a balance and allowance check for the taker when the order
    /// names one.
    pub async fn validate_fill(
        &self,
        order: &SignedOrder,
        taker_asset_amount: U256,
    ) -> Result<(), FillError> {
        let results = self
            .order_validator
            .batch_validate(vec![order.clone()], true, BlockNumber::Latest)
            .await
            .context("order validation failed")?;

        if let Some(rejected) = results.rejected.first() {
            tracing::debug!(reason = %rejected.status.message, "order rejected by validator");
            return Err(FillError::Rejected(rejected.status.message.clone()));
        }
        if results.accepted.len() != 1 {
            return Err(FillError::Incomplete);
        }

        // A null taker means anyone may fill, so there is no taker whose
        // funds could be checked.
        if order.order.taker_address == H160::zero() {
            return Ok(());
        }

        let (balance, allowance) = self
            .dev_utils
            .get_balance_and_asset_proxy_allowance(
                order.order.taker_address,
                &order.order.taker_asset_data,
            )
            .await?;
        if taker_asset_amount > allowance {
            return Err(FillError::InsufficientAllowance {
                have: allowance,
                want: taker_asset_amount,
            });
        }
        if taker_asset_amount > balance {
            return Err(FillError::InsufficientBalance {
                have: balance,
                want: taker_asset_amount,
            });
        }
        Ok(())
    }
}
