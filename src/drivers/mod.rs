// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device Drivers
//!
//! This module contains the device drivers for the desk's peripherals, plus the small capability
//! traits the control loop is written against. Drivers are generic over `embedded-hal` 1.0 pin,
//! PWM and delay traits; the firmware crate adapts the STM32 HAL types to them.
//!
//! ## Existing drivers
//!
//! - [`hcsr04`] – HC-SR04 ultrasonic ranger used as the height sensor
//! - [`h_bridge`] – dual-PWM (RPWM/LPWM) H-bridge driving the lift motor
//! - [`tm1637`] – TM1637 4-digit seven-segment display with centre colon
//! - [`keypad`] – four active-low momentary buttons

pub mod h_bridge;
pub mod hcsr04;
pub mod keypad;
pub mod tm1637;

pub use h_bridge::HBridge;
pub use hcsr04::HcSr04;
pub use keypad::{ActiveLowKeypad, ButtonState};
pub use tm1637::Tm1637;

/// Direction the lift motor is currently being driven.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Stopped,
}

/// Something that reports the current desk height.
pub trait HeightSensor {
    /// Current height in centimeters, or 0 when no valid echo came back in range.
    fn read_height_cm(&mut self) -> u16;
}

/// The lift motor. Each call sets both bridge outputs before returning.
pub trait DeskMotor {
    fn drive_up(&mut self);
    fn drive_down(&mut self);
    fn stop(&mut self);

    /// Direction of the last command.
    fn direction(&self) -> Direction;

    fn drive(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.drive_up(),
            Direction::Down => self.drive_down(),
            Direction::Stopped => self.stop(),
        }
    }
}

/// A small numeric display.
pub trait Display {
    fn render_number(&mut self, value: i16);
    fn render_text(&mut self, text: &str);
    fn clear(&mut self);
    fn set_colon(&mut self, on: bool);
    fn set_brightness(&mut self, level: u8);
}

/// The four desk buttons.
pub trait Keypad {
    /// Sample all buttons at once.
    fn read(&mut self) -> ButtonState;
}
