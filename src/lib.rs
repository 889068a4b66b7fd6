//! Boot core for dual-bank flash microcontrollers: validate the on-flash
//! boot record, then hand control to the application image.
#![no_std]

pub mod boot;
pub mod flash;
pub mod layout;
pub mod record;
pub mod sequencer;

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod mock;

/// Reasons a boot attempt is abandoned.
///
/// Every variant escalates to the terminal lock state; there is no retry.
/// Unreadable memory is a hardware precondition and has no variant here.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The flash-mode capability reported failure.
    FlashInit,
    /// The boot record failed its signature check, or could not be read.
    InvalidRecord,
}

/// Flash controller mode configuration, injected into the sequencer.
///
/// Modelled as a capability rather than ambient register state so the
/// sequencer can be exercised against a fake.
pub trait FlashMode {
    /// Enable dual-bank addressing. Idempotent; failure is fatal to the boot.
    fn enable_dual_bank(&mut self) -> Result<(), Error>;
}

/// Mode capability for parts running in the single-bank default.
///
/// Nothing to configure, so enabling always succeeds.
pub struct SingleBank;

impl FlashMode for SingleBank {
    fn enable_dual_bank(&mut self) -> Result<(), Error> {
        Ok(())
    }
}
