//! CKB cell model - construction, capacity accounting and validation of Nervos CKB cells.
//!
//! This library provides:
//! - The `Cell` model and its `Amount` capacity type
//! - Decoding from JSON-RPC records and lookup by out point
//! - Capacity accounting against the molecule serialized size
//! - A CKB RPC client wrapper for ledger lookups

pub mod config;
pub mod domain;
pub mod infra;

pub use domain::{
    amount::{Amount, AmountUnit},
    cell::{Cell, RpcCell},
    codec::{MoleculeCodec, OutputCodec},
    error::CellError,
};
pub use infra::rpc::{RpcClient, TransactionSource};
