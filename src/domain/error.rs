use ckb_types::H256;
use thiserror::Error;

use crate::domain::amount::Amount;

/// Boxed error raised by a ledger-query collaborator.
pub type RpcError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by the cell model.
#[derive(Debug, Error)]
pub enum CellError {
    /// Malformed external record or a schema violation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A field required by the operation is missing.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Payload input that is not `0x`-prefixed hex, or not UTF-8 when read as text.
    #[error("invalid format: {0}")]
    Format(String),

    /// Declared capacity cannot hold the serialized cell.
    #[error("insufficient capacity: cell holds {capacity} CKB but needs {required} CKB")]
    InsufficientCapacity { capacity: Amount, required: Amount },

    /// Unparsable amount, or arithmetic overflow.
    #[error("invalid amount: {0}")]
    Amount(String),

    #[error("transaction {0:#x} not found")]
    TransactionNotFound(H256),

    #[error("output index {index} out of range, transaction has {outputs} outputs")]
    OutputIndexOutOfRange { index: usize, outputs: usize },

    /// Error from the ledger-query collaborator, passed through untouched.
    #[error(transparent)]
    Rpc(RpcError),
}

impl CellError {
    pub fn rpc<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CellError::Rpc(Box::new(err))
    }
}
