// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Two-channel PWM on TIM4 for the H-bridge.
//!
//! CH1 (PD12) drives RPWM and CH2 (PD13) drives LPWM. Both channels share one counter, so they
//! always run at the same frequency; each channel owns only its compare register.

use core::convert::Infallible;
use core::marker::PhantomData;
use core::ops::Deref;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use stm32f7xx_hal::pac;

use super::pins::BridgePins;

/// Bridge switching frequency.
pub const PWM_HZ: u32 = 20_000;

pub struct Ch1;
pub struct Ch2;

/// One TIM4 output channel.
pub struct PwmChannel<CH> {
    max_duty: u16,
    _ch: PhantomData<CH>,
}

#[inline(always)]
fn tim4() -> &'static <pac::TIM4 as Deref>::Target {
    unsafe { &*pac::TIM4::ptr() }
}

/// Configure TIM4 CH1/CH2 in PWM mode 1 at [`PWM_HZ`], both outputs low.
///
/// `timer_clk_hz` is the APB1 timer clock. The pins only need to be in their TIM4 alternate
/// function; they are consumed so nothing else can reconfigure them.
pub fn tim4_bridge(
    _tim4: pac::TIM4,
    _pins: BridgePins,
    timer_clk_hz: u32,
) -> (PwmChannel<Ch1>, PwmChannel<Ch2>) {
    let rcc = unsafe { &*pac::RCC::ptr() };
    rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());

    let tim = tim4();

    // Disable counter while configuring
    tim.cr1.modify(|_, w| w.cen().clear_bit());

    let period = (timer_clk_hz / PWM_HZ).clamp(2, 0xFFFF);
    tim.psc.write(|w| unsafe { w.bits(0) });
    tim.arr.write(|w| unsafe { w.bits(period - 1) });

    // Start with both sides off
    tim.ccr1.write(|w| unsafe { w.bits(0) });
    tim.ccr2.write(|w| unsafe { w.bits(0) });

    // PWM mode 1 with preload on CH1/CH2
    tim.ccmr1_output().modify(|_, w| {
        w.oc1m()
            .pwm_mode1()
            .oc1pe()
            .set_bit()
            .oc2m()
            .pwm_mode1()
            .oc2pe()
            .set_bit()
    });

    // Active-high outputs
    tim.ccer.modify(|_, w| {
        w.cc1p()
            .clear_bit()
            .cc2p()
            .clear_bit()
            .cc1e()
            .set_bit()
            .cc2e()
            .set_bit()
    });

    // Latch preloads, then start
    tim.egr.write(|w| w.ug().set_bit());
    tim.cr1.modify(|_, w| w.arpe().set_bit().cen().set_bit());

    let max_duty = period as u16;
    (
        PwmChannel {
            max_duty,
            _ch: PhantomData,
        },
        PwmChannel {
            max_duty,
            _ch: PhantomData,
        },
    )
}

impl<CH> ErrorType for PwmChannel<CH> {
    type Error = Infallible;
}

impl SetDutyCycle for PwmChannel<Ch1> {
    #[inline]
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        let duty = duty.min(self.max_duty) as u32;
        tim4().ccr1.write(|w| unsafe { w.bits(duty) });
        Ok(())
    }
}

impl SetDutyCycle for PwmChannel<Ch2> {
    #[inline]
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        let duty = duty.min(self.max_duty) as u32;
        tim4().ccr2.write(|w| unsafe { w.bits(duty) });
        Ok(())
    }
}
