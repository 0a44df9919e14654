//! Synthetic advertisement identities.
//!
//! An identity is derived from nothing but its index:
//!
//! | Field        | Value                               |
//! |--------------|-------------------------------------|
//! | Local name   | `BLE_Device_<index + 1>`            |
//! | Vendor bytes | `[0x01, index & 0xFF, 0xAA, 0x55]`  |
//!
//! ## Advertising data layout
//!
//! The raw legacy advertising payload carries two AD structures, in this
//! order, and nothing else:
//!
//! ```text
//! [len] [0x09] B L E _ D e v i c e _ n      Complete Local Name
//! [0x05] [0xFF] 0x01 idx 0xAA 0x55          Manufacturer Specific Data
//! ```
//!
//! Scanners key off these bytes, so the encoding must stay byte-exact.

use core::fmt::Write;

use crate::error::HardwareError;

/// Prefix of every synthesized local name.
pub const NAME_PREFIX: &str = "BLE_Device_";

/// Legacy advertising PDU payload limit.
pub const MAX_ADV_DATA_LEN: usize = 31;

/// AD type: Complete Local Name.
pub const AD_TYPE_COMPLETE_LOCAL_NAME: u8 = 0x09;
/// AD type: Manufacturer Specific Data.
pub const AD_TYPE_MANUFACTURER_DATA: u8 = 0xFF;

/// Fixed-capacity local name (prefix + up to 20 digits fits comfortably).
pub type IdentityName = heapless::String<32>;

/// Encoded advertising data.
pub type AdvData = heapless::Vec<u8, MAX_ADV_DATA_LEN>;

/// One synthetic peripheral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub index: usize,
    pub name: IdentityName,
    pub vendor: [u8; 4],
}

impl Identity {
    /// Build the identity for `index`.
    pub fn for_index(index: usize) -> Self {
        let mut name = IdentityName::new();
        // Cannot overflow: 11-byte prefix + at most 20 decimal digits.
        let _ = write!(name, "{}{}", NAME_PREFIX, index.wrapping_add(1));
        Self {
            index,
            name,
            vendor: vendor_bytes(index),
        }
    }

    /// Encode as raw advertising data (name first, then vendor bytes).
    pub fn encode_adv_data(&self) -> Result<AdvData, HardwareError> {
        let mut out = AdvData::new();
        push_ad_structure(&mut out, AD_TYPE_COMPLETE_LOCAL_NAME, self.name.as_bytes())?;
        push_ad_structure(&mut out, AD_TYPE_MANUFACTURER_DATA, &self.vendor)?;
        Ok(out)
    }
}

/// The 4-byte manufacturer payload for `index`.
pub const fn vendor_bytes(index: usize) -> [u8; 4] {
    [0x01, (index & 0xFF) as u8, 0xAA, 0x55]
}

fn push_ad_structure(out: &mut AdvData, ad_type: u8, data: &[u8]) -> Result<(), HardwareError> {
    // Length byte covers the type byte plus the data.
    let len = u8::try_from(data.len() + 1).map_err(|_| HardwareError::PayloadTooLong)?;
    out.push(len).map_err(|_| HardwareError::PayloadTooLong)?;
    out.push(ad_type).map_err(|_| HardwareError::PayloadTooLong)?;
    out.extend_from_slice(data)
        .map_err(|_| HardwareError::PayloadTooLong)
}

// ───────────────────────────────────────────────────────────────
// Decoding (verification / scanner side)
// ───────────────────────────────────────────────────────────────

/// Fields recovered from raw advertising data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedAdv {
    pub name: Option<IdentityName>,
    pub vendor: Option<heapless::Vec<u8, 29>>,
}

/// Why a raw advertising payload could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload longer than a legacy PDU.
    TooLong,
    /// An AD structure claims more bytes than remain.
    Truncated,
    /// The local name is not valid UTF-8.
    InvalidName,
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooLong => write!(f, "advertising data exceeds 31 bytes"),
            Self::Truncated => write!(f, "AD structure truncated"),
            Self::InvalidName => write!(f, "local name is not UTF-8"),
        }
    }
}

/// Walk the AD structures in `raw`, keeping the name and manufacturer data.
///
/// Unknown AD types are skipped; a zero length byte ends the payload early
/// (remaining bytes are padding).
pub fn decode_adv_data(raw: &[u8]) -> Result<DecodedAdv, DecodeError> {
    if raw.len() > MAX_ADV_DATA_LEN {
        return Err(DecodeError::TooLong);
    }

    let mut out = DecodedAdv::default();
    let mut rest = raw;
    while let Some((&len, tail)) = rest.split_first() {
        if len == 0 {
            break;
        }
        let len = len as usize;
        if tail.len() < len {
            return Err(DecodeError::Truncated);
        }
        let (structure, next) = tail.split_at(len);
        let (ad_type, data) = (structure[0], &structure[1..]);

        match ad_type {
            AD_TYPE_COMPLETE_LOCAL_NAME => {
                let s = core::str::from_utf8(data).map_err(|_| DecodeError::InvalidName)?;
                let mut name = IdentityName::new();
                name.push_str(s).map_err(|_| DecodeError::TooLong)?;
                out.name = Some(name);
            }
            AD_TYPE_MANUFACTURER_DATA => {
                let vendor =
                    heapless::Vec::from_slice(data).map_err(|()| DecodeError::TooLong)?;
                out.vendor = Some(vendor);
            }
            _ => {}
        }
        rest = next;
    }
    Ok(out)
}
