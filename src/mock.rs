use std::vec::Vec;

use embedded_storage::ReadStorage;

use crate::{Error, FlashMode, flash::OutOfBounds, record};

/// Bank-0 size of the mocked part, matching the dual-bank layout.
pub const BANK_SIZE: usize = 0x4_0000;

const APP_OFFSET: usize = 0x8000;

/// In-memory stand-in for bank 0, logging every read it serves.
pub struct MockFlash {
    pub bytes: Vec<u8>,
    /// `(offset, length)` of each read, in order.
    pub reads: Vec<(u32, usize)>,
}

impl MockFlash {
    pub const APP_INITIAL_SP: u32 = 0x2002_0000;
    pub const APP_RESET_VECTOR: u32 = 0x0800_8101;

    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            reads: Vec::new(),
        }
    }

    /// A fully erased-to-zero bank: no record, no image.
    pub fn blank() -> Self {
        Self::with_bytes(std::vec![0u8; BANK_SIZE])
    }

    /// A bank holding a signed boot record and a vector-table head at the
    /// application offset.
    pub fn with_valid_record() -> Self {
        let mut flash = Self::blank();
        flash.bytes[510] = 0x55;
        flash.bytes[511] = 0xAA;
        flash.bytes[APP_OFFSET..APP_OFFSET + 4]
            .copy_from_slice(&Self::APP_INITIAL_SP.to_le_bytes());
        flash.bytes[APP_OFFSET + 4..APP_OFFSET + 8]
            .copy_from_slice(&Self::APP_RESET_VECTOR.to_le_bytes());
        flash
    }

    /// Like [`Self::with_valid_record`], but with the signature clobbered.
    pub fn with_broken_signature() -> Self {
        let mut flash = Self::with_valid_record();
        flash.bytes[511] = 0x00;
        flash
    }
}

impl ReadStorage for MockFlash {
    type Error = OutOfBounds;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        self.reads.push((offset, bytes.len()));

        let start = offset as usize;
        let end = start.checked_add(bytes.len()).ok_or(OutOfBounds)?;
        let src = self.bytes.get(start..end).ok_or(OutOfBounds)?;
        bytes.copy_from_slice(src);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.bytes.len()
    }
}

/// Fake flash-mode capability with a scripted verdict and a call counter.
pub struct MockMode {
    pub succeed: bool,
    pub calls: usize,
}

impl MockMode {
    pub fn ok() -> Self {
        Self {
            succeed: true,
            calls: 0,
        }
    }

    pub fn failing() -> Self {
        Self {
            succeed: false,
            calls: 0,
        }
    }
}

impl FlashMode for MockMode {
    fn enable_dual_bank(&mut self) -> Result<(), Error> {
        self.calls += 1;
        if self.succeed {
            Ok(())
        } else {
            Err(Error::FlashInit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_record_mock_actually_validates() {
        let mut flash = MockFlash::with_valid_record();
        assert!(record::load(&mut flash, 0).is_ok());

        let mut flash = MockFlash::with_broken_signature();
        assert!(record::load(&mut flash, 0).is_err());
    }
}
