use async_trait::async_trait;
use ckb_jsonrpc_types::{Either, ResponseFormat, Transaction, TransactionView};
use ckb_sdk::{CkbRpcClient, rpc::RpcError};
use ckb_types::{H256, packed, prelude::*};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

/// Ledger query used to resolve out points into transactions.
///
/// Timeouts, retries and cancellation are the implementor's business; callers only
/// await the result.
#[async_trait]
pub trait TransactionSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch a transaction by hash. `Ok(None)` when the node does not know it.
    async fn get_transaction(&self, tx_hash: &H256) -> Result<Option<Transaction>, Self::Error>;
}

#[derive(Debug, Error)]
pub enum RpcClientError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("rpc task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("malformed transaction bytes: {0}")]
    Decode(String),
}

/// CKB RPC client wrapper.
///
/// Holds only the configuration; each call opens an SDK client on the blocking pool.
#[derive(Debug, Clone)]
pub struct RpcClient {
    config: Config,
}

impl RpcClient {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the current tip block number.
    pub async fn get_tip_block_number(&self) -> Result<u64, RpcClientError> {
        let url = self.config.network.rpc_url.clone();
        let tip = tokio::task::spawn_blocking(move || CkbRpcClient::new(&url).get_tip_header())
            .await??;
        Ok(tip.inner.number.into())
    }

    /// Get the RPC URL.
    pub fn rpc_url(&self) -> &str {
        &self.config.network.rpc_url
    }
}

#[async_trait]
impl TransactionSource for RpcClient {
    type Error = RpcClientError;

    async fn get_transaction(&self, tx_hash: &H256) -> Result<Option<Transaction>, Self::Error> {
        debug!("get_transaction {:#x} via {}", tx_hash, self.rpc_url());

        let url = self.config.network.rpc_url.clone();
        let hash = tx_hash.clone();
        // The SDK client blocks, keep it off the async workers.
        let response =
            tokio::task::spawn_blocking(move || CkbRpcClient::new(&url).get_transaction(hash))
                .await??;

        response
            .and_then(|tx_with_status| tx_with_status.transaction)
            .map(decode_response)
            .transpose()
    }
}

/// Unwrap a `get_transaction` payload, either the JSON view or molecule bytes.
fn decode_response(format: ResponseFormat<TransactionView>) -> Result<Transaction, RpcClientError> {
    match format.inner {
        Either::Left(view) => Ok(view.inner),
        Either::Right(bytes) => {
            let tx = packed::Transaction::from_slice(bytes.as_bytes())
                .map_err(|e| RpcClientError::Decode(e.to_string()))?;
            Ok(tx.into())
        }
    }
}
