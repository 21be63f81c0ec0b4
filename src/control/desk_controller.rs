// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! The desk's polling loop.
//!
//! [`DeskController`] owns every peripheral and runs one [`cycle`](DeskController::cycle) per
//! poll period. A cycle always starts by stopping the motor, so the desk only moves while
//! something in the current cycle asks it to.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! let mut desk = DeskController::new(parts, presets, delay, usart, Config::default());
//! desk.run();
//! ```
//!
//! Or, to drive it one cycle at a time:
//!
//! ```ignore
//! let mut mode = desk.start();
//!
//! loop {
//!     mode = desk.cycle(mode);
//!     delay.delay_ms(250_u32);
//! }
//! ```

use core::fmt::Write;

use embedded_hal::delay::DelayNs;

use crate::config::Config;
use crate::control::height_seek::{HeightSeek, SeekReport, SeekStep};
use crate::control::jog::{self, JogCommand};
use crate::control::mode::{pressed_slots, Mode};
use crate::diag::Snapshot;
use crate::drivers::{ButtonState, DeskMotor, Direction, Display, HeightSensor, Keypad};
use crate::error::{SeekError, StoreError};
use crate::storage::{PresetSlot, PresetStore};

/// Value shown during the boot splash.
const SPLASH_VALUE: u16 = 8888;

/// The four device-level peripherals, bundled for construction.
pub struct DeskParts<S, M, D, K> {
    pub sensor: S,
    pub motor: M,
    pub display: D,
    pub keypad: K,
}

/// Controller state and peripherals.
pub struct DeskController<S, M, D, K, P, Dl, L> {
    sensor: S,
    motor: M,
    display: D,
    keypad: K,
    presets: P,
    delay: Dl,
    log: L,
    config: Config,

    /// Last number drawn, to skip clearing when it has not changed
    last_displayed: Option<u16>,
}

impl<S, M, D, K, P, Dl, L> DeskController<S, M, D, K, P, Dl, L>
where
    S: HeightSensor,
    M: DeskMotor,
    D: Display,
    K: Keypad,
    P: PresetStore,
    Dl: DelayNs,
    L: Write,
{
    pub fn new(parts: DeskParts<S, M, D, K>, presets: P, delay: Dl, log: L, config: Config) -> Self {
        Self {
            sensor: parts.sensor,
            motor: parts.motor,
            display: parts.display,
            keypad: parts.keypad,
            presets,
            delay,
            log,
            config,
            last_displayed: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn presets(&self) -> &P {
        &self.presets
    }

    #[inline]
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Boot sequence: motor off, splash `8888` with the colon, then hand back the initial mode.
    pub fn start(&mut self) -> Mode {
        self.motor.stop();

        self.display.set_brightness(self.config.brightness);
        self.show_height(SPLASH_VALUE);
        self.display.set_colon(true);
        self.delay.delay_ms(self.config.splash_ms);
        self.display.set_colon(false);

        let [p0, p1] = self.presets.presets();
        let _ = writeln!(self.log, "deskctl ready, presets {},{}\r", p0, p1);

        Mode::Normal
    }

    /// Run forever.
    pub fn run(&mut self) -> ! {
        let mut mode = self.start();
        loop {
            mode = self.cycle(mode);
            self.delay.delay_ms(self.config.poll_period_ms);
        }
    }

    /// One poll of the desk. Returns the mode for the next cycle.
    ///
    /// Does not include the trailing poll-period sleep; see [`run`](Self::run).
    pub fn cycle(&mut self, mode: Mode) -> Mode {
        let mut mode = mode;

        // Fail-safe: nothing moves unless this cycle commands it
        self.command(Direction::Stopped);

        let height = self.sensor.read_height_cm();
        self.show_height(height);

        let mut buttons = self.keypad.read();

        if mode == Mode::Normal {
            self.display.set_colon(false);
            if buttons.preset1 {
                let _ = self.recall(PresetSlot::First);
                buttons = self.keypad.read();
            }
            if buttons.preset2 {
                let _ = self.recall(PresetSlot::Second);
                buttons = self.keypad.read();
            }
        }

        mode = mode.after_chord(&buttons);

        if mode.is_setting_preset() {
            self.display.set_colon(true);
            let _ = writeln!(self.log, "Setting Value\r");

            let mut saved = false;
            for slot in pressed_slots(&buttons) {
                let height = self.sensor.read_height_cm();
                if let Err(e) = self.save_preset(slot, height) {
                    let _ = writeln!(self.log, "Preset save failed: {}\r", e);
                }
                saved = true;
            }
            if saved {
                mode = Mode::Normal;
                self.display.set_colon(false);
            }
        }

        self.jog(&buttons);

        if self.config.log_snapshots {
            let snapshot = Snapshot {
                height_cm: self.sensor.read_height_cm(),
                buttons,
                presets: self.presets.presets(),
            };
            let _ = writeln!(self.log, "{}\r", snapshot);
        }

        mode
    }

    /// Seek to the height stored in `slot`.
    pub fn recall(&mut self, slot: PresetSlot) -> Result<SeekReport, SeekError> {
        let target = self.presets.read_preset(slot);
        self.go_to_height(target as u16)
    }

    /// Store `height_cm` in `slot` and commit it. Heights above 255 cm saturate.
    pub fn save_preset(&mut self, slot: PresetSlot, height_cm: u16) -> Result<(), StoreError> {
        let value = u8::try_from(height_cm).unwrap_or(u8::MAX);
        let _ = writeln!(self.log, "Writing {} to index {}\r", value, slot.index());
        self.presets.write_preset(slot, value);
        self.presets.commit()
    }

    /// Drive to `target_cm`, blocking until it is reached or the seek gives up.
    ///
    /// The motor is stopped on return either way. On failure the display shows `Err` until the
    /// next height redraw.
    pub fn go_to_height(&mut self, target_cm: u16) -> Result<SeekReport, SeekError> {
        let _ = writeln!(self.log, "Seeking {} cm\r", target_cm);

        let mut seek = HeightSeek::new(target_cm, &self.config.seek);
        let result = loop {
            let height = self.sensor.read_height_cm();
            match seek.step(height) {
                SeekStep::Drive(direction) => {
                    self.command(direction);
                    self.show_height(height);
                    self.delay.delay_ms(self.config.seek.tick_ms);
                }
                SeekStep::Arrived => {
                    break Ok(SeekReport {
                        target_cm,
                        height_cm: height,
                        ticks: seek.ticks(),
                    })
                }
                SeekStep::Failed(err) => break Err(err),
            }
        };

        self.command(Direction::Stopped);

        match &result {
            Ok(report) => {
                self.show_height(report.height_cm);
                let _ = writeln!(
                    self.log,
                    "Reached {} cm after {} ticks\r",
                    report.height_cm, report.ticks
                );
            }
            Err(err) => {
                let _ = writeln!(self.log, "Seek failed: {}\r", err);
                self.show_text("Err");
            }
        }

        result
    }

    fn jog(&mut self, buttons: &ButtonState) {
        let requested = jog::requested(buttons);
        if requested == Direction::Stopped {
            return;
        }

        let height = match self.config.travel_limits {
            Some(_) => self.sensor.read_height_cm(),
            None => 0,
        };

        match jog::limit(requested, height, self.config.travel_limits) {
            JogCommand::Drive(direction) => self.command(direction),
            JogCommand::Limited(direction) => {
                let _ = writeln!(
                    self.log,
                    "Travel limit: {:?} blocked at {} cm\r",
                    direction, height
                );
            }
            JogCommand::Idle => {}
        }
    }

    /// Set the motor, logging direction changes.
    fn command(&mut self, direction: Direction) {
        if self.motor.direction() != direction {
            let msg = match direction {
                Direction::Up => "Going Up",
                Direction::Down => "Going Down",
                Direction::Stopped => "Stopping",
            };
            let _ = writeln!(self.log, "{}\r", msg);
        }
        self.motor.drive(direction);
    }

    fn show_height(&mut self, height_cm: u16) {
        if self.last_displayed != Some(height_cm) {
            self.display.clear();
        }
        self.display.render_number(height_cm.min(i16::MAX as u16) as i16);
        self.last_displayed = Some(height_cm);
    }

    fn show_text(&mut self, text: &str) {
        self.display.render_text(text);
        self.last_displayed = None;
    }
}
