//! The boot sequence: flash-mode initialization, record validation, and the
//! decision to hand off or lock.
//!
//! Runs to completion on the single execution context available at boot,
//! before any scheduler exists. Each attempt ends in one of two terminal
//! outcomes: the non-returning jump into the application, or the lock loop.

use embedded_storage::ReadStorage;

use crate::{Error, FlashMode, boot::Boot, layout::FlashLayout, record};

/// Observable phase of a boot attempt.
///
/// `Handoff` and `Locked` are terminal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    Init,
    Validating,
    Handoff,
    Locked,
}

/// The first two words of the application image: initial stack pointer at
/// the region start, reset vector at +4.
///
/// Trusted only because the owning boot record validated; computed fresh on
/// every attempt and consumed immediately by the handoff.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VectorTableHead {
    /// Absolute address of the application region start.
    pub base: u32,
    pub initial_sp: u32,
    pub reset_vector: u32,
}

impl VectorTableHead {
    fn load<S: ReadStorage>(flash: &mut S, layout: &FlashLayout) -> Result<Self, Error> {
        let mut words = [0u8; 8];
        flash
            .read(layout.app_offset, &mut words)
            .map_err(|_| Error::InvalidRecord)?;

        Ok(Self {
            base: layout.app_base(),
            initial_sp: u32::from_le_bytes([words[0], words[1], words[2], words[3]]),
            reset_vector: u32::from_le_bytes([words[4], words[5], words[6], words[7]]),
        })
    }

    /// Address the initial stack pointer was read from.
    pub const fn stack_pointer_addr(&self) -> u32 {
        self.base
    }

    /// Address the reset vector was read from.
    pub const fn reset_vector_addr(&self) -> u32 {
        self.base + 4
    }
}

/// Drives one boot attempt over an injected mode capability and bank-0
/// storage.
pub struct Sequencer<M, S> {
    mode: M,
    bank0: S,
    layout: &'static FlashLayout,
    state: State,
}

impl<M: FlashMode, S: ReadStorage> Sequencer<M, S> {
    pub const fn new(mode: M, bank0: S, layout: &'static FlashLayout) -> Self {
        Self {
            mode,
            bank0,
            layout,
            state: State::Init,
        }
    }

    pub const fn state(&self) -> State {
        self.state
    }

    /// Initialize flash mode and validate the boot record, producing the
    /// application entry descriptor.
    ///
    /// Any failure moves the machine to [`State::Locked`] and nothing of the
    /// application region is read or computed. The in-memory record copy is
    /// dropped here; only its validity verdict outlives the call.
    pub fn prepare(&mut self) -> Result<VectorTableHead, Error> {
        if self.mode.enable_dual_bank().is_err() {
            self.state = State::Locked;
            return Err(Error::FlashInit);
        }

        self.state = State::Validating;
        let head = self.validate_and_locate();
        match head {
            Ok(_) => self.state = State::Handoff,
            Err(_) => self.state = State::Locked,
        }
        head
    }

    fn validate_and_locate(&mut self) -> Result<VectorTableHead, Error> {
        let _record = record::load(&mut self.bank0, self.layout.record_offset)?;
        VectorTableHead::load(&mut self.bank0, self.layout)
    }

    /// Run the whole sequence to its terminal outcome.
    ///
    /// On success this never returns: the processor's stack pointer and
    /// program counter now belong to the application.
    pub fn run<B: Boot>(mut self) -> ! {
        match self.prepare() {
            Ok(head) => unsafe { B::boot(head.base as *const u32) },
            Err(_) => lock(),
        }
    }
}

/// Terminal failure state: idle forever rather than run unverified code.
///
/// Deliberately non-recoverable; the only way out is an external reset.
pub fn lock() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
