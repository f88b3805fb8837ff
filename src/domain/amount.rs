//! CKB amounts in shannons with CKB as the display unit.

use std::fmt;

use ckb_types::core::Capacity;
use serde::{Deserialize, Serialize};

use crate::domain::error::CellError;

/// Shannons per CKB.
pub const SHANNONS_PER_CKB: u64 = 100_000_000;

/// Number of fractional digits a CKB amount can carry.
const CKB_DECIMALS: usize = 8;

/// Denomination of an amount string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountUnit {
    /// Base unit.
    Shannon,
    /// Display unit, 10^8 shannons.
    Ckb,
}

/// A non-negative CKB value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount {
    shannons: u64,
}

impl Amount {
    /// Parse an amount string in the given unit.
    ///
    /// Accepts decimal (`"1000"`, `"61.5"`) and `0x` hex (`"0x3e8"`) forms. Fractions are
    /// only meaningful in CKB and are limited to 8 digits.
    pub fn new(value: &str, unit: AmountUnit) -> Result<Self, CellError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(CellError::Amount("empty amount".to_string()));
        }

        if let Some(digits) = value.strip_prefix("0x") {
            let raw = u64::from_str_radix(digits, 16)
                .map_err(|e| CellError::Amount(format!("{value}: {e}")))?;
            return match unit {
                AmountUnit::Shannon => Ok(Self::from_shannons(raw)),
                AmountUnit::Ckb => Self::from_ckb(raw),
            };
        }

        let (whole, frac) = match value.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (value, ""),
        };
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
            || (whole.is_empty() && frac.is_empty())
        {
            return Err(CellError::Amount(format!("{value}: not a number")));
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|e| CellError::Amount(format!("{value}: {e}")))?
        };

        match unit {
            AmountUnit::Shannon => {
                if frac.trim_end_matches('0').is_empty() {
                    Ok(Self::from_shannons(whole))
                } else {
                    Err(CellError::Amount(format!(
                        "{value}: shannon amounts cannot be fractional"
                    )))
                }
            }
            AmountUnit::Ckb => {
                if frac.len() > CKB_DECIMALS {
                    return Err(CellError::Amount(format!(
                        "{value}: more than {CKB_DECIMALS} decimal places"
                    )));
                }
                let frac_shannons: u64 = if frac.is_empty() {
                    0
                } else {
                    format!("{frac:0<width$}", width = CKB_DECIMALS)
                        .parse()
                        .map_err(|e| CellError::Amount(format!("{value}: {e}")))?
                };
                let shannons = whole
                    .checked_mul(SHANNONS_PER_CKB)
                    .and_then(|s| s.checked_add(frac_shannons))
                    .ok_or_else(|| CellError::Amount(format!("{value}: overflow")))?;
                Ok(Self::from_shannons(shannons))
            }
        }
    }

    pub const fn zero() -> Self {
        Self { shannons: 0 }
    }

    pub const fn from_shannons(shannons: u64) -> Self {
        Self { shannons }
    }

    pub fn from_ckb(ckb: u64) -> Result<Self, CellError> {
        ckb.checked_mul(SHANNONS_PER_CKB)
            .map(Self::from_shannons)
            .ok_or_else(|| CellError::Amount(format!("{ckb} CKB overflows")))
    }

    /// Amount needed to occupy `bytes` of cell storage.
    pub fn from_bytes(bytes: usize) -> Result<Self, CellError> {
        Capacity::bytes(bytes)
            .map(Self::from)
            .map_err(|e| CellError::Amount(format!("{bytes} bytes: {e}")))
    }

    pub fn shannons(&self) -> u64 {
        self.shannons
    }

    pub fn capacity(&self) -> Capacity {
        Capacity::shannons(self.shannons)
    }

    pub fn is_zero(&self) -> bool {
        self.shannons == 0
    }

    pub fn checked_add(self, other: Amount) -> Result<Self, CellError> {
        self.shannons
            .checked_add(other.shannons)
            .map(Self::from_shannons)
            .ok_or_else(|| CellError::Amount("addition overflow".to_string()))
    }

    pub fn checked_sub(self, other: Amount) -> Result<Self, CellError> {
        self.shannons
            .checked_sub(other.shannons)
            .map(Self::from_shannons)
            .ok_or_else(|| CellError::Amount("subtraction underflow".to_string()))
    }

    /// Format in `unit`. CKB values drop trailing fractional zeros.
    pub fn to_unit_string(&self, unit: AmountUnit) -> String {
        match unit {
            AmountUnit::Shannon => self.shannons.to_string(),
            AmountUnit::Ckb => {
                let whole = self.shannons / SHANNONS_PER_CKB;
                let frac = self.shannons % SHANNONS_PER_CKB;
                if frac == 0 {
                    whole.to_string()
                } else {
                    let frac = format!("{frac:0width$}", width = CKB_DECIMALS);
                    format!("{whole}.{}", frac.trim_end_matches('0'))
                }
            }
        }
    }

    /// Shannons as a `0x` hex string, the JSON-RPC encoding.
    pub fn to_hex_string(&self) -> String {
        format!("{:#x}", self.shannons)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_unit_string(AmountUnit::Ckb))
    }
}

impl From<Capacity> for Amount {
    fn from(capacity: Capacity) -> Self {
        Self::from_shannons(capacity.as_u64())
    }
}

impl From<ckb_jsonrpc_types::Capacity> for Amount {
    fn from(capacity: ckb_jsonrpc_types::Capacity) -> Self {
        Self::from_shannons(capacity.value())
    }
}

impl From<Amount> for ckb_jsonrpc_types::Capacity {
    fn from(amount: Amount) -> Self {
        amount.shannons.into()
    }
}
