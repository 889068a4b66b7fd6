//! Memory-mapped flash bank access.
//!
//! Exposes a bank of internal flash through [`ReadStorage`] so the rest of
//! the core never touches absolute addresses directly and can be tested
//! against in-memory storage instead.

use embedded_storage::ReadStorage;

use crate::layout::{FlashBank, FlashLayout};

/// Read rejected before any dereference: null base address or a range that
/// falls outside the bank.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfBounds;

/// A memory-mapped flash bank. Offset 0 is the bank base address.
///
/// Reads are volatile and byte-wise; flash reads on this class of device
/// are side-effect-free.
pub struct MemoryMappedBank {
    base: *const u8,
    size: u32,
}

impl MemoryMappedBank {
    /// # Safety
    ///
    /// `base..base + size` must be readable, memory-mapped flash for the
    /// whole lifetime of the value, with no concurrent writer.
    pub const unsafe fn new(base: *const u8, size: u32) -> Self {
        Self { base, size }
    }

    /// Bank `index` of `layout`.
    ///
    /// # Safety
    ///
    /// Same contract as [`Self::new`]: the layout's addresses must match the
    /// part this code runs on.
    pub const unsafe fn from_layout(layout: &FlashLayout, index: usize) -> Self {
        let FlashBank { base, size } = layout.banks[index];
        unsafe { Self::new(base as *const u8, size) }
    }
}

impl ReadStorage for MemoryMappedBank {
    type Error = OutOfBounds;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        if self.base.is_null() {
            return Err(OutOfBounds);
        }
        let len = bytes.len() as u32;
        if offset.checked_add(len).is_none_or(|end| end > self.size) {
            return Err(OutOfBounds);
        }

        let start = unsafe { self.base.add(offset as usize) };
        for (i, byte) in bytes.iter_mut().enumerate() {
            // Volatile so the reads are not elided or reordered against the
            // mode configuration that preceded them.
            *byte = unsafe { start.add(i).read_volatile() };
        }
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.size as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::ptr;

    #[test]
    fn null_base_is_rejected_without_a_read() {
        let mut bank = unsafe { MemoryMappedBank::new(ptr::null(), 0x4_0000) };
        let mut buf = [0u8; 4];
        assert_eq!(bank.read(0, &mut buf), Err(OutOfBounds));
    }

    #[test]
    fn out_of_range_is_rejected_without_a_read() {
        // Base is never dereferenced when the range check fails.
        let backing = [0u8; 1];
        let mut bank = unsafe { MemoryMappedBank::new(backing.as_ptr(), 0x100) };
        let mut buf = [0u8; 4];
        assert_eq!(bank.read(0xFE, &mut buf), Err(OutOfBounds));
        assert_eq!(bank.read(u32::MAX, &mut buf), Err(OutOfBounds));
        assert_eq!(bank.capacity(), 0x100);
    }

    #[test]
    fn reads_through_the_mapping() {
        let backing: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];
        let mut bank = unsafe { MemoryMappedBank::new(backing.as_ptr(), 8) };
        let mut buf = [0u8; 4];
        bank.read(2, &mut buf).unwrap();
        assert_eq!(buf, [3, 4, 5, 6]);
    }
}
