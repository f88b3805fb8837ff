//! Cell model: one CKB output, its lock and type scripts, and its payload.
//!
//! Cells come from three places:
//! - an RPC record ([`Cell::from_rpc`], [`Cell::from_rpc_json`]),
//! - a ledger lookup by out point ([`Cell::load_from_blockchain`]),
//! - a draft for a transaction under construction ([`Cell::new`]).
//!
//! The payload is kept in `0x` hex form. Capacity accounting uses the molecule
//! serialized size of the output plus the payload length, one CKB per byte.

use ckb_jsonrpc_types::{CellInput, CellOutput, JsonBytes, OutPoint, Script, Uint64};
use ckb_types::{H256, core::Capacity, packed, prelude::*};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::{
    domain::{
        amount::Amount,
        codec::{MoleculeCodec, OutputCodec},
        error::CellError,
        payload::{EMPTY_HEX, HEX_PREFIX, decode_hex, encode_hex, hex_to_text, text_to_hex},
    },
    infra::rpc::TransactionSource,
};

/// Cell record as it appears in JSON-RPC responses.
///
/// Fields other than these are ignored, so indexer rows decode as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcCell {
    /// Capacity in shannons, `0x` hex.
    pub capacity: Uint64,
    pub lock: Script,
    #[serde(rename = "type", default)]
    pub type_: Option<Script>,
    #[serde(default)]
    pub out_point: Option<OutPoint>,
    /// Missing means an empty payload.
    #[serde(default)]
    pub data: Option<JsonBytes>,
}

/// A CKB cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub capacity: Amount,
    pub lock: Script,
    pub type_: Option<Script>,
    /// `None` until the cell is committed on chain.
    pub out_point: Option<OutPoint>,
    /// Trimmed `0x` hex.
    data: String,
}

impl Cell {
    /// Create a cell with an empty payload.
    ///
    /// Drafts are not capacity checked here: set the payload with
    /// [`with_hex_data`](Self::with_hex_data), then [`resize`](Self::resize).
    pub fn new(
        capacity: Amount,
        lock: Script,
        type_: Option<Script>,
        out_point: Option<OutPoint>,
    ) -> Self {
        Self {
            capacity,
            lock,
            type_,
            out_point,
            data: EMPTY_HEX.to_string(),
        }
    }

    /// Replace the payload of a draft without a capacity check.
    pub fn with_hex_data(mut self, data: &str) -> Result<Self, CellError> {
        self.data = checked_hex(data)?;
        Ok(self)
    }

    pub fn from_rpc(record: RpcCell) -> Self {
        let data = record
            .data
            .map(|bytes| encode_hex(bytes.as_bytes()))
            .unwrap_or_else(|| EMPTY_HEX.to_string());
        Self {
            capacity: record.capacity.into(),
            lock: record.lock,
            type_: record.type_,
            out_point: record.out_point,
            data,
        }
    }

    /// Decode an untyped JSON record.
    ///
    /// Only JSON objects are accepted. `null`, an empty object, other JSON values and
    /// objects that do not match [`RpcCell`] (missing fields, malformed hex, unknown
    /// hash types) are validation errors.
    pub fn from_rpc_json(value: &Value) -> Result<Self, CellError> {
        match value {
            Value::Null => {
                return Err(CellError::Validation(
                    "cannot create cell from empty data".to_string(),
                ));
            }
            Value::Object(map) if map.is_empty() => {
                return Err(CellError::Validation(
                    "cannot create cell from empty data".to_string(),
                ));
            }
            Value::Object(_) => {}
            other => {
                return Err(CellError::Validation(format!(
                    "cell record must be a JSON object, got {other}"
                )));
            }
        }

        let record =
            RpcCell::deserialize(value).map_err(|e| CellError::Validation(e.to_string()))?;
        Ok(Self::from_rpc(record))
    }

    /// Full RPC record, including out point and payload.
    pub fn to_rpc(&self) -> Result<RpcCell, CellError> {
        Ok(RpcCell {
            capacity: self.capacity.shannons().into(),
            lock: self.lock.clone(),
            type_: self.type_.clone(),
            out_point: self.out_point.clone(),
            data: Some(JsonBytes::from_vec(self.data_bytes()?)),
        })
    }

    /// Fetch the transaction behind `out_point` and build the cell at its index.
    pub async fn load_from_blockchain<R>(rpc: &R, out_point: OutPoint) -> Result<Self, CellError>
    where
        R: TransactionSource + ?Sized,
    {
        let index = out_point.index.value() as usize;
        debug!("loading cell {:#x}:{}", out_point.tx_hash, index);

        let tx = rpc
            .get_transaction(&out_point.tx_hash)
            .await
            .map_err(CellError::rpc)?
            .ok_or_else(|| CellError::TransactionNotFound(out_point.tx_hash.clone()))?;

        let outputs = tx.outputs.len();
        let output = tx.outputs.into_iter().nth(index);
        let data = tx.outputs_data.into_iter().nth(index);
        let (output, data) = match (output, data) {
            (Some(output), Some(data)) => (output, data),
            _ => return Err(CellError::OutputIndexOutOfRange { index, outputs }),
        };

        Ok(Self {
            capacity: output.capacity.into(),
            lock: output.lock,
            type_: output.type_,
            out_point: Some(out_point),
            data: encode_hex(data.as_bytes()),
        })
    }

    /// The output part of the cell: capacity, lock and type.
    pub fn to_cell_output(&self) -> CellOutput {
        CellOutput {
            capacity: self.capacity.into(),
            lock: self.lock.clone(),
            type_: self.type_.clone(),
        }
    }

    /// Display view: `capacity` as hex, `lock` and `type`. Payload and out point are left out.
    pub fn serialize_json(&self) -> Value {
        json!({
            "capacity": self.capacity.to_hex_string(),
            "lock": self.lock,
            "type": self.type_,
        })
    }

    /// Serialized output size plus payload length, in bytes.
    pub fn size_with<C: OutputCodec + ?Sized>(&self, codec: &C) -> Result<usize, CellError> {
        let base = codec.output_size(&self.to_cell_output());
        let extra = self.data_bytes()?.len();
        Ok(base + extra)
    }

    pub fn size(&self) -> Result<usize, CellError> {
        self.size_with(&MoleculeCodec)
    }

    /// Set capacity to exactly the serialized size and return that size.
    pub fn resize(&mut self) -> Result<usize, CellError> {
        self.resize_with(&MoleculeCodec)
    }

    pub fn resize_with<C: OutputCodec + ?Sized>(&mut self, codec: &C) -> Result<usize, CellError> {
        let size = self.size_with(codec)?;
        self.capacity = Amount::from_bytes(size)?;
        debug!("resized cell to {} bytes ({} CKB)", size, self.capacity);
        Ok(size)
    }

    /// Check the capacity covers the serialized size. Returns the size.
    pub fn space_check(&self) -> Result<usize, CellError> {
        self.space_check_with(&MoleculeCodec)
    }

    pub fn space_check_with<C: OutputCodec + ?Sized>(&self, codec: &C) -> Result<usize, CellError> {
        let size = self.size_with(codec)?;
        let required = Amount::from_bytes(size)?;
        if self.capacity < required {
            return Err(CellError::InsufficientCapacity {
                capacity: self.capacity,
                required,
            });
        }
        Ok(size)
    }

    /// Consensus minimum capacity: 8 bytes of capacity, the scripts and the payload.
    pub fn occupied_capacity(&self) -> Result<Amount, CellError> {
        let data_capacity = Capacity::bytes(self.data_bytes()?.len())
            .map_err(|e| CellError::Amount(e.to_string()))?;
        packed::CellOutput::from(self.to_cell_output())
            .occupied_capacity(data_capacity)
            .map(Amount::from)
            .map_err(|e| CellError::Amount(e.to_string()))
    }

    /// Whether both cells point at the same output.
    pub fn same_with(&self, other: &Cell) -> Result<bool, CellError> {
        match (&self.out_point, &other.out_point) {
            (Some(ours), Some(theirs)) => Ok(ours == theirs),
            _ => Err(CellError::Precondition(
                "to be compared, cells must have an out point".to_string(),
            )),
        }
    }

    /// Input spending this cell. `since` 0 means no constraint.
    ///
    /// `None` for cells that are not on chain yet.
    pub fn to_cell_input(&self, since: u64) -> Option<CellInput> {
        self.out_point.as_ref().map(|out_point| CellInput {
            since: since.into(),
            previous_output: out_point.clone(),
        })
    }

    /// Structural check of the output and, for cells on chain, the input spending it.
    ///
    /// Capacity is not checked here: a cell holding its occupied capacity is valid on
    /// chain even though it is smaller than [`size`](Self::size).
    pub fn validate(&self) -> Result<&Self, CellError> {
        self.validate_with(&MoleculeCodec)
    }

    pub fn validate_with<C: OutputCodec + ?Sized>(&self, codec: &C) -> Result<&Self, CellError> {
        codec.validate_output(&self.to_cell_output())?;
        if let Some(input) = self.to_cell_input(0) {
            codec.validate_input(&input)?;
        }
        Ok(self)
    }

    /// Store `text` (trimmed) as UTF-8 hex.
    pub fn set_data(&mut self, text: &str) -> Result<(), CellError> {
        self.replace_data(text_to_hex(text.trim()))
    }

    /// Store `0x` hex verbatim (trimmed).
    pub fn set_hex_data(&mut self, data: &str) -> Result<(), CellError> {
        let data = checked_hex(data)?;
        self.replace_data(data)
    }

    pub fn get_data(&self) -> Result<String, CellError> {
        hex_to_text(&self.data)
    }

    pub fn get_hex_data(&self) -> &str {
        &self.data
    }

    pub fn data_bytes(&self) -> Result<Vec<u8>, CellError> {
        decode_hex(&self.data)
    }

    /// Hash of the payload as referenced by `data` hash type scripts. Zero when empty.
    pub fn data_hash(&self) -> Result<H256, CellError> {
        let bytes = self.data_bytes()?;
        Ok(packed::CellOutput::calc_data_hash(&bytes).unpack())
    }

    pub fn lock_hash(&self) -> H256 {
        packed::Script::from(self.lock.clone())
            .calc_script_hash()
            .unpack()
    }

    pub fn is_empty(&self) -> bool {
        self.data == EMPTY_HEX
    }

    // Keeps the old payload when the new one does not fit.
    fn replace_data(&mut self, data: String) -> Result<(), CellError> {
        let previous = std::mem::replace(&mut self.data, data);
        if let Err(err) = self.space_check() {
            warn!("rejected payload of {} hex chars: {}", self.data.len(), err);
            self.data = previous;
            return Err(err);
        }
        Ok(())
    }
}

impl From<RpcCell> for Cell {
    fn from(record: RpcCell) -> Self {
        Self::from_rpc(record)
    }
}

fn checked_hex(data: &str) -> Result<String, CellError> {
    let data = data.trim();
    if !data.starts_with(HEX_PREFIX) {
        return Err(CellError::Format(
            "hex data should start with 0x".to_string(),
        ));
    }
    decode_hex(data)?;
    Ok(data.to_string())
}
