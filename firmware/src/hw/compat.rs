// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! `embedded-hal` 1.0 digital pin traits for the HAL's GPIO types.
//!
//! The desk drivers are written against `embedded-hal` 1.0; `stm32f7xx-hal` 0.8 still speaks
//! 0.2. GPIO on this part cannot fail, so the error type is `Infallible`.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use stm32f7xx_hal::gpio::{gpioc, gpioe, Floating, Input, OpenDrain, Output, PullUp, PushPull};

/// Digital output usable by `embedded-hal` 1.0 drivers.
pub struct Out<P>(pub P);

/// Digital input usable by `embedded-hal` 1.0 drivers.
pub struct In<P>(pub P);

macro_rules! output_pins {
    ($($pin:ty),+ $(,)?) => {$(
        impl ErrorType for Out<$pin> {
            type Error = Infallible;
        }

        impl OutputPin for Out<$pin> {
            #[inline]
            fn set_high(&mut self) -> Result<(), Infallible> {
                self.0.set_high();
                Ok(())
            }

            #[inline]
            fn set_low(&mut self) -> Result<(), Infallible> {
                self.0.set_low();
                Ok(())
            }
        }
    )+};
}

macro_rules! input_pins {
    ($($pin:ty),+ $(,)?) => {$(
        impl ErrorType for In<$pin> {
            type Error = Infallible;
        }

        impl InputPin for In<$pin> {
            #[inline]
            fn is_high(&mut self) -> Result<bool, Infallible> {
                Ok(self.0.is_high())
            }

            #[inline]
            fn is_low(&mut self) -> Result<bool, Infallible> {
                Ok(self.0.is_low())
            }
        }
    )+};
}

output_pins!(
    gpioe::PE7<Output<PushPull>>,
    gpioe::PE8<Output<OpenDrain>>,
    gpioe::PE9<Output<PushPull>>,
);

input_pins!(
    gpioe::PE10<Input<Floating>>,
    gpioc::PC6<Input<PullUp>>,
    gpioc::PC7<Input<PullUp>>,
    gpioc::PC8<Input<PullUp>>,
    gpioc::PC9<Input<PullUp>>,
);
