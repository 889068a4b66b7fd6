//! Static description of the flash bank geometry and partition offsets.
//!
//! Everything here is compile-time constant data; the addresses are a
//! hardware contract, not runtime configuration.

/// A single flash bank: base address and size in bytes, word-aligned.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashBank {
    pub base: u32,
    pub size: u32,
}

impl FlashBank {
    pub const fn end(&self) -> u32 {
        self.base + self.size
    }

    pub const fn contains(&self, addr: u32) -> bool {
        addr >= self.base && addr < self.end()
    }
}

/// Geometry of a dual-bank part plus the fixed offsets this core cares
/// about: where the boot record sits in bank 0, and where the application
/// vector table begins within its bank.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashLayout {
    pub banks: [FlashBank; 2],
    /// Byte offset of the boot record within bank 0.
    pub record_offset: u32,
    /// Byte offset of the application vector table within its bank.
    pub app_offset: u32,
}

/// Minimum bytes the application region must have room for: the initial
/// stack pointer word and the reset vector word.
const VECTOR_TABLE_HEAD: u32 = 8;

impl FlashLayout {
    /// Enforce the geometry invariants during const evaluation.
    ///
    /// Panics at compile time if the banks differ in size or overlap, or if
    /// an offset does not leave room for what is expected to live there.
    pub const fn checked(self) -> Self {
        let [bank0, bank1] = self.banks;
        assert!(bank0.base != 0 && bank1.base != 0);
        assert!(bank0.size == bank1.size);
        assert!(
            bank0.end() <= bank1.base || bank1.end() <= bank0.base,
            "bank ranges overlap"
        );
        assert!(self.record_offset + crate::record::RECORD_SIZE as u32 <= bank0.size);
        assert!(self.app_offset + VECTOR_TABLE_HEAD <= bank0.size);
        self
    }

    pub const fn bank0_base(&self) -> u32 {
        self.banks[0].base
    }

    /// Absolute address of the application vector table in bank 0.
    pub const fn app_base(&self) -> u32 {
        self.banks[0].base + self.app_offset
    }
}

/// Layout for the STM32F4 dual-bank parts this core targets: two 256 KiB
/// banks, boot record at the start of bank 0, application at +0x8000.
pub const STM32F4_DUAL_BANK: FlashLayout = FlashLayout {
    banks: [
        FlashBank {
            base: 0x0800_0000,
            size: 0x0004_0000,
        },
        FlashBank {
            base: 0x0804_0000,
            size: 0x0004_0000,
        },
    ],
    record_offset: 0,
    app_offset: 0x8000,
}
.checked();
