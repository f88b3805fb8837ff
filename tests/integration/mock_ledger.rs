//! In-memory ledger for lookups without a node.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use ckb_cell_model::TransactionSource;
use ckb_jsonrpc_types::{CellOutput, JsonBytes, Transaction};
use ckb_types::H256;

#[derive(Debug, thiserror::Error)]
pub enum MockLedgerError {
    #[error("connection refused")]
    ConnectionRefused,
}

/// Transactions keyed by hash, with a request counter.
#[derive(Default)]
pub struct MockLedger {
    txs: HashMap<H256, Transaction>,
    down: bool,
    requests: AtomicUsize,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger whose every request fails.
    pub fn unreachable() -> Self {
        Self {
            down: true,
            ..Self::default()
        }
    }

    pub fn insert(&mut self, tx_hash: H256, outputs: Vec<(CellOutput, Vec<u8>)>) {
        let (outputs, outputs_data) = outputs
            .into_iter()
            .map(|(output, data)| (output, JsonBytes::from_vec(data)))
            .unzip();
        let tx = Transaction {
            outputs,
            outputs_data,
            ..Default::default()
        };
        self.txs.insert(tx_hash, tx);
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransactionSource for MockLedger {
    type Error = MockLedgerError;

    async fn get_transaction(&self, tx_hash: &H256) -> Result<Option<Transaction>, Self::Error> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.down {
            return Err(MockLedgerError::ConnectionRefused);
        }
        Ok(self.txs.get(tx_hash).cloned())
    }
}
