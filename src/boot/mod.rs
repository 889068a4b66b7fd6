//! The handoff: transferring execution to the application image.

use crate::layout::FlashLayout;

#[cfg(feature = "cortex_m")]
pub mod cortex_m;

/// Handoff mechanism that at the least jumps to the vector table at `addr`.
///
/// Implementations could additionally drop privileges or mask memory access
/// before the jump.
pub trait Boot {
    /// Hand the processor to the application: load the stack pointer from
    /// the first word at `addr`, jump to the second.
    ///
    /// # Safety
    ///
    /// `addr` must point at a vector-table head of code that is intended to
    /// run. The call never returns; nothing after it executes.
    unsafe fn boot(addr: *const u32) -> !;
}

/// Jump straight to the application, skipping mode initialization and boot
/// record validation.
///
/// Reduced-guarantee fast path for when no bootloader intervention is
/// requested. Correct only if flash mode was already configured by an
/// earlier stage; whatever bytes occupy the application region will run.
/// Prefer [`crate::sequencer::Sequencer::run`].
///
/// # Safety
///
/// The application region of `layout` must hold a valid image for this
/// part.
pub unsafe fn direct<B: Boot>(layout: &FlashLayout) -> ! {
    unsafe { B::boot(layout.app_base() as *const u32) }
}
