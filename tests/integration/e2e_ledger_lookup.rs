//! Loading cells by out point through a `TransactionSource`.

use ckb_cell_model::{Amount, Cell, CellError};
use ckb_jsonrpc_types::{CellOutput, ScriptHashType};
use ckb_types::H256;

use super::mock_ledger::{MockLedger, MockLedgerError};
use super::{out_point, sighash_lock};

fn ledger() -> (MockLedger, H256) {
    let tx_hash = H256([0xab; 32]);
    let mut ledger = MockLedger::new();
    ledger.insert(
        tx_hash.clone(),
        vec![
            (
                CellOutput {
                    capacity: 0x3e8u64.into(),
                    lock: sighash_lock([7; 20]),
                    type_: None,
                },
                vec![0x12, 0x34],
            ),
            (
                CellOutput {
                    capacity: (500 * 100_000_000u64).into(),
                    lock: sighash_lock([8; 20]),
                    type_: Some(sighash_lock([9; 20])),
                },
                b"hello".to_vec(),
            ),
        ],
    );
    (ledger, tx_hash)
}

#[tokio::test]
async fn test_load_first_output() {
    let (ledger, tx_hash) = ledger();

    let cell = Cell::load_from_blockchain(&ledger, out_point(&tx_hash, 0))
        .await
        .unwrap();
    assert_eq!(ledger.requests(), 1);
    assert!(cell.type_.is_none());
    assert_eq!(cell.get_hex_data(), "0x1234");
    assert_eq!(cell.capacity, Amount::from_shannons(1000));
    assert_eq!(cell.lock.hash_type, ScriptHashType::Type);

    // 1000 shannons is far below what the cell occupies, but validation is structural.
    assert!(cell.validate().is_ok());
    assert!(matches!(
        cell.space_check(),
        Err(CellError::InsufficientCapacity { .. })
    ));

    let input = cell.to_cell_input(0x1).unwrap();
    assert_eq!(input.previous_output, out_point(&tx_hash, 0));
    assert_eq!(input.since.value(), 1);
}

#[tokio::test]
async fn test_load_second_output() {
    let (ledger, tx_hash) = ledger();

    let cell = Cell::load_from_blockchain(&ledger, out_point(&tx_hash, 1))
        .await
        .unwrap();
    assert_eq!(cell.get_data().unwrap(), "hello");
    assert_eq!(cell.capacity.to_string(), "500");
    assert!(cell.type_.is_some());
    cell.validate().unwrap();

    let same = Cell::load_from_blockchain(&ledger, out_point(&tx_hash, 1))
        .await
        .unwrap();
    assert!(cell.same_with(&same).unwrap());

    let other = Cell::load_from_blockchain(&ledger, out_point(&tx_hash, 0))
        .await
        .unwrap();
    assert!(!cell.same_with(&other).unwrap());
    assert_eq!(ledger.requests(), 3);
}

#[tokio::test]
async fn test_minimum_capacity_cell_validates() {
    let tx_hash = H256([0x61; 32]);
    let mut ledger = MockLedger::new();
    ledger.insert(
        tx_hash.clone(),
        vec![(
            CellOutput {
                capacity: (61 * 100_000_000u64).into(),
                lock: sighash_lock([3; 20]),
                type_: None,
            },
            Vec::new(),
        )],
    );

    let cell = Cell::load_from_blockchain(&ledger, out_point(&tx_hash, 0))
        .await
        .unwrap();
    assert_eq!(cell.occupied_capacity().unwrap(), Amount::from_ckb(61).unwrap());
    assert!(cell.validate().is_ok());
}

#[tokio::test]
async fn test_resize_loaded_cell() {
    let (ledger, tx_hash) = ledger();

    let mut cell = Cell::load_from_blockchain(&ledger, out_point(&tx_hash, 0))
        .await
        .unwrap();
    let size = cell.resize().unwrap();
    assert_eq!(size, 97 + 2);
    assert_eq!(cell.capacity, Amount::from_ckb(99).unwrap());
    assert!(cell.validate().is_ok());
}

#[tokio::test]
async fn test_lookup_failures() {
    let (ledger, tx_hash) = ledger();

    let err = Cell::load_from_blockchain(&ledger, out_point(&tx_hash, 2))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CellError::OutputIndexOutOfRange {
            index: 2,
            outputs: 2
        }
    ));

    let unknown = H256([0xcd; 32]);
    let err = Cell::load_from_blockchain(&ledger, out_point(&unknown, 0))
        .await
        .unwrap_err();
    match err {
        CellError::TransactionNotFound(hash) => assert_eq!(hash, unknown),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_rpc_error_is_passed_through() {
    let ledger = MockLedger::unreachable();

    let err = Cell::load_from_blockchain(&ledger, out_point(&H256([1; 32]), 0))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "connection refused");
    match err {
        CellError::Rpc(source) => assert!(matches!(
            source.downcast_ref::<MockLedgerError>(),
            Some(MockLedgerError::ConnectionRefused)
        )),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(ledger.requests(), 1);
}
