// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Dual-PWM H-bridge (BTS7960-style RPWM/LPWM inputs) driving the desk lift motor.
//!
//! Wiring:
//! - RPWM: drives the motor in the "down" direction
//! - LPWM: drives the motor in the "up" direction
//!
//! Only one channel is ever non-zero. Every direction change zeroes the channel being released
//! before raising the other one, so the two outputs never overlap, even for one write.

use embedded_hal::pwm::SetDutyCycle;

use crate::drivers::{DeskMotor, Direction};

/// Lift motor behind a two-input H-bridge, run at a fixed duty cycle.
pub struct HBridge<R, L> {
    rpwm: R,
    lpwm: L,
    duty_percent: u8,
    direction: Direction,
}

impl<R, L> HBridge<R, L>
where
    R: SetDutyCycle,
    L: SetDutyCycle,
{
    /// Construct the driver and force both outputs off.
    ///
    /// `duty_percent` is clamped to 100.
    pub fn new(rpwm: R, lpwm: L, duty_percent: u8) -> Self {
        let mut bridge = Self {
            rpwm,
            lpwm,
            duty_percent: duty_percent.min(100),
            direction: Direction::Stopped,
        };
        bridge.stop();
        bridge
    }

    #[inline]
    pub fn duty_percent(&self) -> u8 {
        self.duty_percent
    }

    /// Release the PWM channels.
    pub fn free(self) -> (R, L) {
        (self.rpwm, self.lpwm)
    }
}

impl<R, L> DeskMotor for HBridge<R, L>
where
    R: SetDutyCycle,
    L: SetDutyCycle,
{
    fn drive_up(&mut self) {
        self.rpwm.set_duty_cycle_fully_off().ok();
        self.lpwm.set_duty_cycle_percent(self.duty_percent).ok();
        self.direction = Direction::Up;
    }

    fn drive_down(&mut self) {
        self.lpwm.set_duty_cycle_fully_off().ok();
        self.rpwm.set_duty_cycle_percent(self.duty_percent).ok();
        self.direction = Direction::Down;
    }

    fn stop(&mut self) {
        self.lpwm.set_duty_cycle_fully_off().ok();
        self.rpwm.set_duty_cycle_fully_off().ok();
        self.direction = Direction::Stopped;
    }

    #[inline]
    fn direction(&self) -> Direction {
        self.direction
    }
}
