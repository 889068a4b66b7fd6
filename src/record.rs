//! Loading and validation of the on-flash boot record.
//!
//! The record is a fixed 512-byte structure at a fixed offset in bank 0,
//! analogous to a classic disk master boot record: a jump field, an OEM
//! name, a partition table and a trailing two-byte signature. Only the
//! signature is interpreted here; validity is the sole criterion for
//! trusting the rest of the boot configuration.

use embedded_storage::ReadStorage;

use crate::Error;

/// Size of the boot record in bytes.
pub const RECORD_SIZE: usize = 512;

/// Expected value of the trailing signature, read little-endian.
pub const SIGNATURE: u16 = 0xAA55;

const JUMP_OFFSET: usize = 0;
const OEM_NAME_OFFSET: usize = 3;
const PARTITION_TABLE_OFFSET: usize = 11;
const SIGNATURE_OFFSET: usize = 510;

/// Owned, parsed copy of the boot record.
///
/// Constructed only from a full record's bytes; the fields other than the
/// signature are carried opaquely for callers that provisioned them.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BootRecord {
    jump: [u8; 3],
    oem_name: [u8; 8],
    partition_table: [u8; 64],
    signature: u16,
}

impl BootRecord {
    /// Extract the record field by field from a raw 512-byte region.
    ///
    /// Positional byte-for-byte mapping; the bytes are never reinterpreted
    /// in place as the structure.
    pub fn parse(raw: &[u8; RECORD_SIZE]) -> Self {
        let mut jump = [0u8; 3];
        let mut oem_name = [0u8; 8];
        let mut partition_table = [0u8; 64];

        jump.copy_from_slice(&raw[JUMP_OFFSET..JUMP_OFFSET + 3]);
        oem_name.copy_from_slice(&raw[OEM_NAME_OFFSET..OEM_NAME_OFFSET + 8]);
        partition_table
            .copy_from_slice(&raw[PARTITION_TABLE_OFFSET..PARTITION_TABLE_OFFSET + 64]);
        let signature = u16::from_le_bytes([raw[SIGNATURE_OFFSET], raw[SIGNATURE_OFFSET + 1]]);

        Self {
            jump,
            oem_name,
            partition_table,
            signature,
        }
    }

    /// Whether the trailing signature matches [`SIGNATURE`].
    ///
    /// Erased flash reads as all `0xFF` or all `0x00` depending on erase
    /// polarity; both fail this check.
    pub fn is_valid(&self) -> bool {
        self.signature == SIGNATURE
    }

    pub fn jump(&self) -> &[u8; 3] {
        &self.jump
    }

    pub fn oem_name(&self) -> &[u8; 8] {
        &self.oem_name
    }

    pub fn partition_table(&self) -> &[u8; 64] {
        &self.partition_table
    }

    pub fn signature(&self) -> u16 {
        self.signature
    }
}

/// Read the boot record at `offset` and validate its signature.
///
/// Copies exactly [`RECORD_SIZE`] bytes into a stack-local buffer before
/// interpreting anything. A storage error is indistinguishable from a bad
/// record for the caller: either way the boot configuration cannot be
/// trusted.
pub fn load<S: ReadStorage>(flash: &mut S, offset: u32) -> Result<BootRecord, Error> {
    let mut raw = [0u8; RECORD_SIZE];
    flash
        .read(offset, &mut raw)
        .map_err(|_| Error::InvalidRecord)?;

    let record = BootRecord::parse(&raw);
    if record.is_valid() {
        Ok(record)
    } else {
        Err(Error::InvalidRecord)
    }
}
