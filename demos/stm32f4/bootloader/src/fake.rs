//! Stand-ins for the board pieces this demo does not drive for real.

use bankboot::{Error, FlashMode};

/// Pretends the dual-bank bit in FLASH_OPTCR was set.
pub struct DualBank;

impl FlashMode for DualBank {
    fn enable_dual_bank(&mut self) -> Result<(), Error> {
        // Real firmware programs the option bytes here and reports whether
        // the controller accepted them.
        Ok(())
    }
}

/// Boot-mode selection, normally a strap pin or a backup-register flag.
pub fn bootloader_requested() -> bool {
    false
}
