// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Busy-wait delay calibrated to the core clock.
//!
//! `Copy`, so the ranger, the display and the control loop can each own one without sharing a
//! timer peripheral.

use embedded_hal::delay::DelayNs;

#[derive(Copy, Clone, Debug)]
pub struct CycleDelay {
    sysclk_hz: u32,
}

impl CycleDelay {
    pub const fn new(sysclk_hz: u32) -> Self {
        Self { sysclk_hz }
    }
}

impl DelayNs for CycleDelay {
    fn delay_ns(&mut self, ns: u32) {
        let cycles = (ns as u64 * self.sysclk_hz as u64).div_ceil(1_000_000_000);
        cortex_m::asm::delay(cycles.min(u32::MAX as u64) as u32);
    }
}
