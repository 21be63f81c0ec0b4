// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! HC-SR04 ultrasonic ranger, mounted under the desktop and pointing at the floor.
//!
//! A measurement is a 10 µs trigger pulse followed by an echo pulse whose width is the round-trip
//! time of flight. Anything that does not produce a complete echo within the configured maximum
//! distance reads as 0 cm.
//!
//! Timing comes from a free-running counter supplied as a closure (e.g. the DWT cycle counter),
//! so the driver works with any monotonic tick source that wraps at `u32::MAX`.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::drivers::HeightSensor;

/// Round-trip echo time per centimeter of distance (µs), at ~20 °C.
pub const US_ROUNDTRIP_CM: u32 = 57;

/// Extra time allowed for the sensor to raise the echo line after the trigger (µs).
const ECHO_START_TIMEOUT_US: u32 = 5_000;

/// Convert a round-trip echo time into whole centimeters, rounding to nearest.
#[inline]
pub fn echo_us_to_cm(echo_us: u32) -> u32 {
    (echo_us + US_ROUNDTRIP_CM / 2) / US_ROUNDTRIP_CM
}

/// HC-SR04 driver.
///
/// `Now` returns the current tick count; `ticks_per_us` converts tick deltas to microseconds.
pub struct HcSr04<Trig, Echo, D, Now> {
    trigger: Trig,
    echo: Echo,
    delay: D,
    now: Now,
    ticks_per_us: u32,
    max_distance_cm: u16,
}

impl<Trig, Echo, D, Now> HcSr04<Trig, Echo, D, Now>
where
    Trig: OutputPin,
    Echo: InputPin,
    D: DelayNs,
    Now: FnMut() -> u32,
{
    pub fn new(
        mut trigger: Trig,
        echo: Echo,
        delay: D,
        now: Now,
        ticks_per_us: u32,
        max_distance_cm: u16,
    ) -> Self {
        trigger.set_low().ok();
        Self {
            trigger,
            echo,
            delay,
            now,
            ticks_per_us: ticks_per_us.max(1),
            max_distance_cm,
        }
    }

    /// Longest echo that still counts as in range (µs).
    #[inline]
    fn max_echo_us(&self) -> u32 {
        self.max_distance_cm as u32 * US_ROUNDTRIP_CM + US_ROUNDTRIP_CM / 2
    }

    #[inline]
    fn elapsed_us(&mut self, since: u32) -> u32 {
        (self.now)().wrapping_sub(since) / self.ticks_per_us
    }

    /// Fire one ping and return the raw echo width in µs, or `None` on timeout.
    pub fn ping_us(&mut self) -> Option<u32> {
        // Trigger: clean low, then 10 µs high
        self.trigger.set_low().ok();
        self.delay.delay_us(2);
        self.trigger.set_high().ok();
        self.delay.delay_us(10);
        self.trigger.set_low().ok();

        // Wait for the echo to start
        let armed = (self.now)();
        while !self.echo.is_high().unwrap_or(false) {
            if self.elapsed_us(armed) > ECHO_START_TIMEOUT_US {
                return None;
            }
        }

        // Measure the echo, bailing out once it is longer than max distance
        let start = (self.now)();
        let max_echo_us = self.max_echo_us();
        while self.echo.is_high().unwrap_or(false) {
            if self.elapsed_us(start) > max_echo_us {
                return None;
            }
        }

        Some(self.elapsed_us(start))
    }

    pub fn free(self) -> (Trig, Echo, D) {
        (self.trigger, self.echo, self.delay)
    }
}

impl<Trig, Echo, D, Now> HeightSensor for HcSr04<Trig, Echo, D, Now>
where
    Trig: OutputPin,
    Echo: InputPin,
    D: DelayNs,
    Now: FnMut() -> u32,
{
    fn read_height_cm(&mut self) -> u16 {
        match self.ping_us() {
            Some(echo_us) => {
                let cm = echo_us_to_cm(echo_us);
                if cm > self.max_distance_cm as u32 {
                    0
                } else {
                    cm as u16
                }
            }
            None => 0,
        }
    }
}
