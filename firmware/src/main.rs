// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use core::fmt::Write;

use cortex_m::peripheral::DWT;
use cortex_m_rt::entry;
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{self, Serial},
};
use stm32f7xx_hal as hal;

use deskctl::{
    config::{MAX_DISTANCE_CM, MOTOR_DUTY_PERCENT},
    control::{DeskController, DeskParts},
    drivers::{ActiveLowKeypad, HBridge, HcSr04, Tm1637},
    storage::PresetBank,
    Config,
};

mod hw;
use hw::{pwm, BoardPins, CycleDelay, FlashPage, In, Out, Usart};

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let mut cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let sysclk_hz = clocks.sysclk().raw();

    // DWT cycle counter times the ranger echo
    cp.DCB.enable_trace();
    DWT::unlock();
    cp.DWT.enable_cycle_counter();

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD, dp.GPIOE);
    let delay = CycleDelay::new(sysclk_hz);

    // USART1 (DBG)
    let usart_cfg = serial::Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART1,
        (pins.usart1.tx, pins.usart1.rx),
        &clocks,
        usart_cfg,
    );
    let mut usart = Usart::new(serial);

    // Lift motor on TIM4 CH1/CH2
    let (rpwm, lpwm) = pwm::tim4_bridge(dp.TIM4, pins.bridge, clocks.timclk1().raw());
    let motor = HBridge::new(rpwm, lpwm, MOTOR_DUTY_PERCENT);

    let sensor = HcSr04::new(
        Out(pins.ranger.trigger),
        In(pins.ranger.echo),
        delay,
        DWT::cycle_count,
        sysclk_hz / 1_000_000,
        MAX_DISTANCE_CM,
    );

    let display = Tm1637::new(Out(pins.display.clk), Out(pins.display.dio), delay);

    let b = pins.buttons;
    let keypad = ActiveLowKeypad::new(In(b.preset1), In(b.preset2), In(b.up), In(b.down));

    let config = Config::DEFAULT;
    let presets = PresetBank::load(FlashPage::new(dp.FLASH), config.default_presets);
    let _ = writeln!(usart, "Presets: {:?}\r", presets.source());
    usart.flush();

    let parts = DeskParts {
        sensor,
        motor,
        display,
        keypad,
    };
    let mut desk = DeskController::new(parts, presets, delay, usart, config);
    desk.run()
}
