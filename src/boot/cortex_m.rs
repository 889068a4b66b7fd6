use crate::boot::Boot;

/// Simple handoff for Cortex-M without support for TrustZone.
///
/// `bootload` sets MSP from the first word of the vector table and jumps to
/// the reset vector in the second.
pub struct SimpleCortexM;

impl Boot for SimpleCortexM {
    unsafe fn boot(addr: *const u32) -> ! {
        unsafe { cortex_m::asm::bootload(addr) }
    }
}
