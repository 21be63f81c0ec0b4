// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control
//!
//! The desk's behavior: which mode it is in, how a preset height is reached, and what one
//! ~250 ms poll of the buttons does.
//!
//! ## Modules
//!
//! - [`mode`] - Normal / SettingPreset state machine.
//! - [`jog`] - Manual up/down while a button is held, with optional travel limits.
//! - [`height_seek`] - Bounded closed-loop move to a target height.
//! - [`desk_controller`] - The polling loop tying sensor, motor, display, keypad and presets
//!   together.

pub mod desk_controller;
pub mod height_seek;
pub mod jog;
pub mod mode;

pub use desk_controller::{DeskController, DeskParts};
pub use height_seek::{HeightSeek, SeekReport, SeekStep};
pub use jog::JogCommand;
pub use mode::Mode;
