// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board support for the STM32F777 desk controller.

pub mod compat;
pub mod delay;
pub mod flash;
pub mod pins;
pub mod pwm;
pub mod usart;

pub use compat::{In, Out};
pub use delay::CycleDelay;
pub use flash::FlashPage;
pub use pins::BoardPins;
pub use usart::Usart;
