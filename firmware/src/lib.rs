#![no_std]

pub mod config;
pub mod panel;

use core::sync::atomic::{AtomicUsize, Ordering};

use defmt_rtt as _; // global logger
use panic_probe as _;
use stm32f4xx_hal as _; // memory layout

static COUNT: AtomicUsize = AtomicUsize::new(0);

// NOTE(no-CAS) the timestamp runs with interrupts disabled
defmt::timestamp!("{=usize}", {
    let n = COUNT.load(Ordering::Relaxed);
    COUNT.store(n + 1, Ordering::Relaxed);
    n
});
