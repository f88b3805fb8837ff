//! Canonical binary encoding of cell outputs and inputs.
//!
//! The encoding itself lives in `ckb-types` (molecule). The cell model only needs
//! serialized lengths and structural checks, so it talks to the encoder through
//! [`OutputCodec`].

use ckb_jsonrpc_types::{CellInput, CellOutput};
use ckb_types::{packed, prelude::*};

use crate::domain::error::CellError;

/// Encoding and structural validation service for cell records.
pub trait OutputCodec {
    /// Serialized length of the output structure, payload excluded.
    fn output_size(&self, output: &CellOutput) -> usize;

    fn validate_output(&self, output: &CellOutput) -> Result<(), CellError>;

    fn validate_input(&self, input: &CellInput) -> Result<(), CellError>;
}

/// [`OutputCodec`] backed by the molecule entities in `ckb_types::packed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoleculeCodec;

impl OutputCodec for MoleculeCodec {
    fn output_size(&self, output: &CellOutput) -> usize {
        packed::CellOutput::from(output.clone()).as_slice().len()
    }

    fn validate_output(&self, output: &CellOutput) -> Result<(), CellError> {
        let packed_output = packed::CellOutput::from(output.clone());
        packed::CellOutputReader::verify(packed_output.as_slice(), false)
            .map_err(|e| CellError::Validation(format!("cell output: {e}")))
    }

    fn validate_input(&self, input: &CellInput) -> Result<(), CellError> {
        let packed_input = packed::CellInput::from(input.clone());
        packed::CellInputReader::verify(packed_input.as_slice(), false)
            .map_err(|e| CellError::Validation(format!("cell input: {e}")))
    }
}
