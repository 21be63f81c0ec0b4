// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F777 desk controller board.

use stm32f7xx_hal::{
    gpio::{
        gpioa, gpioc, gpiod, gpioe, Alternate, Floating, Input, OpenDrain, Output, PullUp, PushPull,
    },
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD, dp.GPIOE);
/// ```
pub struct BoardPins {
    pub usart1: Usart1Pins,
    pub bridge: BridgePins,
    pub ranger: RangerPins,
    pub display: DisplayPins,
    pub buttons: ButtonPins,
}

pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// H-bridge PWM inputs
pub struct BridgePins {
    pub rpwm: gpiod::PD12<Alternate<2>>, // TIM4_CH1
    pub lpwm: gpiod::PD13<Alternate<2>>, // TIM4_CH2
}

/// HC-SR04 ultrasonic ranger
pub struct RangerPins {
    pub trigger: gpioe::PE9<Output<PushPull>>,
    pub echo: gpioe::PE10<Input<Floating>>,
}

/// TM1637 two-wire display. DIO is released high for the chip's ack, so it is never driven high.
pub struct DisplayPins {
    pub clk: gpioe::PE7<Output<PushPull>>,
    pub dio: gpioe::PE8<Output<OpenDrain>>, // module pull-up
}

/// Momentary buttons to ground
pub struct ButtonPins {
    pub preset1: gpioc::PC6<Input<PullUp>>,
    pub preset2: gpioc::PC7<Input<PullUp>>,
    pub up: gpioc::PC8<Input<PullUp>>,
    pub down: gpioc::PC9<Input<PullUp>>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpioc: pac::GPIOC, gpiod: pac::GPIOD, gpioe: pac::GPIOE) -> Self {
        let gpioa = gpioa.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        Self {
            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            bridge: BridgePins {
                rpwm: gpiod.pd12.into_alternate::<2>(),
                lpwm: gpiod.pd13.into_alternate::<2>(),
            },

            ranger: RangerPins {
                trigger: gpioe.pe9.into_push_pull_output(),
                echo: gpioe.pe10.into_floating_input(),
            },

            display: DisplayPins {
                clk: gpioe.pe7.into_push_pull_output(),
                dio: gpioe.pe8.into_open_drain_output(),
            },

            buttons: ButtonPins {
                preset1: gpioc.pc6.into_pull_up_input(),
                preset2: gpioc.pc7.into_pull_up_input(),
                up: gpioc.pc8.into_pull_up_input(),
                down: gpioc.pc9.into_pull_up_input(),
            },
        }
    }
}
