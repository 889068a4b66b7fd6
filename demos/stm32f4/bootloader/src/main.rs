#![no_std]
#![no_main]

mod fake;

use bankboot::{
    boot::{self, cortex_m::SimpleCortexM},
    flash::MemoryMappedBank,
    layout::STM32F4_DUAL_BANK,
    sequencer::Sequencer,
};
use cortex_m_rt::entry;

use {defmt_rtt as _, panic_halt as _};

#[entry]
fn main() -> ! {
    if fake::bootloader_requested() {
        defmt::info!("validated boot via bank 0 record");

        let bank0 = unsafe { MemoryMappedBank::from_layout(&STM32F4_DUAL_BANK, 0) };
        Sequencer::new(fake::DualBank, bank0, &STM32F4_DUAL_BANK).run::<SimpleCortexM>()
    }

    defmt::info!("direct boot");

    // Fast path: assumes flash mode was already configured by an earlier
    // stage and runs whatever sits at the application offset.
    unsafe { boot::direct::<SimpleCortexM>(&STM32F4_DUAL_BANK) }
}
