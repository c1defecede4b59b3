//! The externally supplied order validator interface.

use anyhow::Result;
use model::order::SignedOrder;
use primitive_types::{H256, U256};
use web3::types::BlockNumber;

/// An order the validator found fillable.
#[derive(Clone, Debug)]
pub struct AcceptedOrderInfo {
    pub order_hash: H256,
    pub signed_order: SignedOrder,
    pub fillable_taker_asset_amount: U256,
}

/// An order the validator turned down, with the reason.
#[derive(Clone, Debug)]
pub struct RejectedOrderInfo {
    pub order_hash: H256,
    pub signed_order: SignedOrder,
    pub status: RejectionStatus,
}

#[derive(Clone, Debug)]
pub struct RejectionStatus {
    pub code: String,
    pub message: String,
}

/// Outcome of validating a batch of orders. Every order of the input batch
/// is expected to show up in exactly one of the two lists.
#[derive(Clone, Debug, Default)]
pub struct ValidationResults {
    pub accepted: Vec<AcceptedOrderInfo>,
    pub rejected: Vec<RejectedOrderInfo>,
}

/// The order validator collaborator. Implementations typically check
/// signatures, expiry, and fillability against chain state; this library
/// only consumes the verdict.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait OrderValidating: Send + Sync {
    /// Validates every order of the batch, optionally against on chain
    /// state as of the given block.
    async fn batch_validate(
        &self,
        orders: Vec<SignedOrder>,
        check_onchain: bool,
        block: BlockNumber,
    ) -> Result<ValidationResults>;
}
