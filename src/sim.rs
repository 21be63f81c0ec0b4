// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Simulated desk for host tests.
//!
//! One [`DeskModel`] is shared by cheap handles implementing each capability trait. The lift only
//! moves when simulated time passes through [`SimDelay`], one physics step per 250 ms.

use core::cell::{Cell, Ref, RefCell};

use std::collections::VecDeque;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::config::Config;
use crate::control::{DeskController, DeskParts};
use crate::drivers::{ButtonState, DeskMotor, Direction, Display, HeightSensor, Keypad};
use crate::storage::{NvPage, PresetBank, PresetStore};

const PHYSICS_TICK_NS: u64 = 250_000_000;

pub const PAGE_LEN: usize = 64;

/// Everything the display was asked to do.
#[derive(Debug, Default)]
pub struct DisplayRecord {
    pub clears: u32,
    pub numbers: Vec<i16>,
    pub text: Option<String>,
    pub colon: bool,
    pub colon_history: Vec<bool>,
    pub brightness: u8,
}

#[derive(Debug)]
pub struct DeskModel {
    pub height_cm: u16,
    pub travel_min_cm: u16,
    pub travel_max_cm: u16,
    pub cm_per_tick: u16,
    pub jammed: bool,

    /// Forces every sensor reading to this value
    pub sensor_override: Option<u16>,

    pub motor: Direction,
    pub motor_log: Vec<Direction>,

    /// Returned once the script runs dry
    pub held: ButtonState,
    pub script: VecDeque<ButtonState>,

    pub display: DisplayRecord,

    pub elapsed_ms: u32,
    elapsed_ns: u64,
    physics_ns: u64,
}

impl DeskModel {
    fn new(height_cm: u16) -> Self {
        Self {
            height_cm,
            travel_min_cm: 60,
            travel_max_cm: 125,
            cm_per_tick: 1,
            jammed: false,
            sensor_override: None,
            motor: Direction::Stopped,
            motor_log: Vec::new(),
            held: ButtonState::RELEASED,
            script: VecDeque::new(),
            display: DisplayRecord::default(),
            elapsed_ms: 0,
            elapsed_ns: 0,
            physics_ns: 0,
        }
    }

    fn advance_ns(&mut self, ns: u64) {
        self.elapsed_ns += ns;
        self.elapsed_ms = (self.elapsed_ns / 1_000_000) as u32;

        self.physics_ns += ns;
        while self.physics_ns >= PHYSICS_TICK_NS {
            self.physics_ns -= PHYSICS_TICK_NS;
            self.physics_step();
        }
    }

    fn physics_step(&mut self) {
        if self.jammed {
            return;
        }
        self.height_cm = match self.motor {
            Direction::Up => (self.height_cm + self.cm_per_tick).min(self.travel_max_cm),
            Direction::Down => self
                .height_cm
                .saturating_sub(self.cm_per_tick)
                .max(self.travel_min_cm),
            Direction::Stopped => self.height_cm,
        };
    }

    fn set_motor(&mut self, direction: Direction) {
        self.motor = direction;
        self.motor_log.push(direction);
    }
}

type Shared = Rc<RefCell<DeskModel>>;

pub struct SimSensor(Shared);
pub struct SimMotor(Shared);
pub struct SimDisplay(Shared);
pub struct SimKeypad(Shared);
pub struct SimDelay(Shared);

impl HeightSensor for SimSensor {
    fn read_height_cm(&mut self) -> u16 {
        let m = self.0.borrow();
        m.sensor_override.unwrap_or(m.height_cm)
    }
}

impl DeskMotor for SimMotor {
    fn drive_up(&mut self) {
        self.0.borrow_mut().set_motor(Direction::Up);
    }

    fn drive_down(&mut self) {
        self.0.borrow_mut().set_motor(Direction::Down);
    }

    fn stop(&mut self) {
        self.0.borrow_mut().set_motor(Direction::Stopped);
    }

    fn direction(&self) -> Direction {
        self.0.borrow().motor
    }
}

impl Display for SimDisplay {
    fn render_number(&mut self, value: i16) {
        let mut m = self.0.borrow_mut();
        m.display.numbers.push(value);
        m.display.text = None;
    }

    fn render_text(&mut self, text: &str) {
        self.0.borrow_mut().display.text = Some(String::from(text));
    }

    fn clear(&mut self) {
        self.0.borrow_mut().display.clears += 1;
    }

    fn set_colon(&mut self, on: bool) {
        let mut m = self.0.borrow_mut();
        m.display.colon = on;
        m.display.colon_history.push(on);
    }

    fn set_brightness(&mut self, level: u8) {
        self.0.borrow_mut().display.brightness = level;
    }
}

impl Keypad for SimKeypad {
    fn read(&mut self) -> ButtonState {
        let mut m = self.0.borrow_mut();
        match m.script.pop_front() {
            Some(b) => b,
            None => m.held,
        }
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().advance_ns(ns as u64);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().advance_ns(ms as u64 * 1_000_000);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MemPageError {
    OutOfRange,
    Injected,
}

/// RAM-backed [`NvPage`] with flash semantics: programming can only clear bits.
///
/// Clones share contents, so a copy kept aside outlives the bank that owns the page.
#[derive(Clone)]
pub struct MemPage {
    cells: Rc<RefCell<[u8; PAGE_LEN]>>,
    erases: Rc<Cell<u32>>,
    pub fail_program: bool,
    pub fail_read: bool,
    /// Bits at `(offset, mask)` that always read back set
    pub stuck_bits: Option<(usize, u8)>,
}

impl MemPage {
    pub fn blank() -> Self {
        Self {
            cells: Rc::new(RefCell::new([0xFF; PAGE_LEN])),
            erases: Rc::new(Cell::new(0)),
            fail_program: false,
            fail_read: false,
            stuck_bits: None,
        }
    }

    pub fn erase_count(&self) -> u32 {
        self.erases.get()
    }

    fn range(offset: u32, len: usize) -> Result<core::ops::Range<usize>, MemPageError> {
        let start = offset as usize;
        let end = start.checked_add(len).ok_or(MemPageError::OutOfRange)?;
        if end > PAGE_LEN {
            return Err(MemPageError::OutOfRange);
        }
        Ok(start..end)
    }
}

impl NvPage for MemPage {
    type Error = MemPageError;

    fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), Self::Error> {
        if self.fail_read {
            return Err(MemPageError::Injected);
        }
        let range = Self::range(offset, buf.len())?;
        buf.copy_from_slice(&self.cells.borrow()[range]);
        Ok(())
    }

    fn erase(&mut self) -> Result<(), Self::Error> {
        self.cells.borrow_mut().fill(0xFF);
        self.erases.set(self.erases.get() + 1);
        Ok(())
    }

    fn program(&mut self, offset: u32, data: &[u8]) -> Result<(), Self::Error> {
        if self.fail_program {
            return Err(MemPageError::Injected);
        }
        let range = Self::range(offset, data.len())?;
        let mut cells = self.cells.borrow_mut();
        for (i, byte) in range.zip(data) {
            cells[i] &= *byte;
            if let Some((at, mask)) = self.stuck_bits {
                if at == i {
                    cells[i] |= mask;
                }
            }
        }
        Ok(())
    }
}

pub type SimController = DeskController<
    SimSensor,
    SimMotor,
    SimDisplay,
    SimKeypad,
    PresetBank<MemPage>,
    SimDelay,
    String,
>;

/// A desk on the bench: the shared model plus the preset page.
pub struct SimDesk {
    model: Shared,
    page: RefCell<MemPage>,
}

impl SimDesk {
    pub fn new(height_cm: u16) -> Self {
        Self {
            model: Rc::new(RefCell::new(DeskModel::new(height_cm))),
            page: RefCell::new(MemPage::blank()),
        }
    }

    pub fn model(&self) -> Ref<'_, DeskModel> {
        self.model.borrow()
    }

    /// Controller wired to this desk, with presets loaded from the page (or `defaults`).
    pub fn controller(&self, config: Config, defaults: [u8; 2]) -> SimController {
        let parts = DeskParts {
            sensor: SimSensor(self.model.clone()),
            motor: SimMotor(self.model.clone()),
            display: SimDisplay(self.model.clone()),
            keypad: SimKeypad(self.model.clone()),
        };
        let presets = PresetBank::load(self.page.borrow().clone(), defaults);
        DeskController::new(
            parts,
            presets,
            SimDelay(self.model.clone()),
            String::new(),
            config,
        )
    }

    /// What a freshly booted controller would load from the page.
    pub fn reload_presets(&self, defaults: [u8; 2]) -> [u8; 2] {
        PresetBank::load(self.page.borrow().clone(), defaults).presets()
    }

    /// Applies to controllers created afterwards.
    pub fn fail_page_writes(&self) {
        self.page.borrow_mut().fail_program = true;
    }

    pub fn hold(&self, buttons: ButtonState) {
        let mut m = self.model.borrow_mut();
        m.script.clear();
        m.held = buttons;
    }

    /// Queue one reading per entry, then fall back to released.
    pub fn script(&self, readings: impl IntoIterator<Item = ButtonState>) {
        let mut m = self.model.borrow_mut();
        m.held = ButtonState::RELEASED;
        m.script.extend(readings);
    }

    pub fn jam(&self) {
        self.model.borrow_mut().jammed = true;
    }

    pub fn set_sensor_override(&self, height_cm: Option<u16>) {
        self.model.borrow_mut().sensor_override = height_cm;
    }

    pub fn advance_ms(&self, ms: u32) {
        self.model.borrow_mut().advance_ns(ms as u64 * 1_000_000);
    }
}
