// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Desk Controller Firmware Core
//!
//! This crate contains the hardware-independent half of the standing-desk controller: an
//! ultrasonic height sensor, an H-bridge lift motor, a 4-digit TM1637 display, four buttons and
//! two stored height presets, tied together by a fixed-period polling loop.
//!
//! Everything here is `no_std` and generic over `embedded-hal` 1.0 traits, so the control loop
//! can be exercised on the host against a simulated desk. The board-specific binary lives in the
//! `firmware/` crate.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`drivers`] | Device-level drivers (HC-SR04, TM1637, H-bridge, keypad) and their capability traits |
//! | [`control`] | Mode state machine, bounded height seek, and the main control loop |
//! | [`storage`] | Preset store backed by a single non-volatile page |
//! | [`config`]  | Loop timing, seek bounds, travel limits, display defaults |
//! | [`diag`]    | Per-cycle diagnostic snapshot line |
//! | [`error`]   | Error types for seeking and persistence |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cd firmware && cargo run --release
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![no_std]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod control;
pub mod diag;
pub mod drivers;
pub mod error;
pub mod storage;

#[cfg(test)]
mod sim;

pub use config::Config;
pub use control::{DeskController, Mode};
pub use error::{SeekError, StoreError};
