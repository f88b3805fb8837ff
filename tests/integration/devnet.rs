//! Checks against a local devnet. Run with `--ignored` while a node listens on 8114.

use ckb_cell_model::{Cell, CellError, RpcClient, config::Config};
use ckb_types::H256;

use super::out_point;

#[tokio::test]
#[ignore = "requires a local CKB devnet"]
async fn test_devnet_tip() {
    let rpc = RpcClient::new(Config::devnet());
    assert_eq!(rpc.rpc_url(), "http://127.0.0.1:8114");
    let tip = rpc.get_tip_block_number().await.unwrap();
    println!("devnet tip: {}", tip);
}

#[tokio::test]
#[ignore = "requires a local CKB devnet"]
async fn test_devnet_unknown_transaction() {
    let rpc = RpcClient::new(Config::devnet());
    let err = Cell::load_from_blockchain(&rpc, out_point(&H256([0xee; 32]), 0))
        .await
        .unwrap_err();
    assert!(matches!(err, CellError::TransactionNotFound(_)));
}
