// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! TM1637 4-digit seven-segment display driver (bit-banged two-wire interface).
//!
//! The bus looks like I2C but is not: bytes go out LSB first, there is no device address, and
//! every byte is followed by an ack clock that this driver does not sample.
//!
//! Frame sequence for a full refresh:
//! 1. `0x40` – data command, auto-increment address
//! 2. `0xC0` + 4 segment bytes – start at digit 0
//! 3. `0x88 | brightness` – display on
//!
//! The centre colon is wired to bit 7 of digit 1.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::drivers::Display;

pub const DIGITS: usize = 4;

// Commands
pub mod cmd {
    pub const DATA_AUTO_INCREMENT: u8 = 0x40;
    pub const ADDRESS_BASE: u8 = 0xC0;
    pub const DISPLAY_ON: u8 = 0x88;
    pub const DISPLAY_OFF: u8 = 0x80;
}

/// Colon segment, carried on digit 1.
pub const SEG_COLON: u8 = 0x80;

/// Segment patterns for 0-9 (bit 0 = segment a ... bit 6 = segment g).
const DIGIT_SEGMENTS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

const SEG_MINUS: u8 = 0x40;
const SEG_BLANK: u8 = 0x00;

/// Half-period of the bit clock (µs).
const BIT_DELAY_US: u32 = 5;

/// Segment pattern for a single character. Unknown glyphs render blank.
pub fn glyph(c: char) -> u8 {
    match c.to_ascii_uppercase() {
        '0'..='9' => DIGIT_SEGMENTS[(c as u8 - b'0') as usize],
        '-' => SEG_MINUS,
        '_' => 0x08,
        'A' => 0x77,
        'B' => 0x7C,
        'C' => 0x39,
        'D' => 0x5E,
        'E' => 0x79,
        'F' => 0x71,
        'G' => 0x3D,
        'H' => 0x76,
        'I' => 0x30,
        'J' => 0x1E,
        'L' => 0x38,
        'N' => 0x54,
        'O' => 0x5C,
        'P' => 0x73,
        'R' => 0x50,
        'S' => 0x6D,
        'T' => 0x78,
        'U' => 0x3E,
        'Y' => 0x6E,
        _ => SEG_BLANK,
    }
}

/// Right-aligned decimal without leading zeros. Out of range shows `----`.
pub fn encode_number(value: i16) -> [u8; DIGITS] {
    if !(-999..=9999).contains(&value) {
        return [SEG_MINUS; DIGITS];
    }

    let mut out = [SEG_BLANK; DIGITS];
    let negative = value < 0;
    let mut n = value.unsigned_abs();
    let mut i = DIGITS;
    loop {
        i -= 1;
        out[i] = DIGIT_SEGMENTS[(n % 10) as usize];
        n /= 10;
        if n == 0 {
            break;
        }
    }
    if negative {
        out[i - 1] = SEG_MINUS;
    }
    out
}

/// Left-aligned text, truncated to four glyphs.
pub fn encode_text(text: &str) -> [u8; DIGITS] {
    let mut out = [SEG_BLANK; DIGITS];
    for (slot, c) in out.iter_mut().zip(text.chars()) {
        *slot = glyph(c);
    }
    out
}

/// TM1637 driver. Keeps a shadow copy of the segments so colon and brightness changes can be
/// applied without the caller re-rendering.
pub struct Tm1637<Clk, Dio, D> {
    clk: Clk,
    dio: Dio,
    delay: D,
    segments: [u8; DIGITS],
    colon: bool,
    brightness: u8,
}

impl<Clk, Dio, D> Tm1637<Clk, Dio, D>
where
    Clk: OutputPin,
    Dio: OutputPin,
    D: DelayNs,
{
    /// `dio` must be open-drain with a pull-up (or driven through the module's own pull-up).
    pub fn new(mut clk: Clk, mut dio: Dio, delay: D) -> Self {
        clk.set_high().ok();
        dio.set_high().ok();
        Self {
            clk,
            dio,
            delay,
            segments: [SEG_BLANK; DIGITS],
            colon: false,
            brightness: 7,
        }
    }

    #[inline]
    pub fn segments(&self) -> [u8; DIGITS] {
        self.segments
    }

    #[inline]
    pub fn colon(&self) -> bool {
        self.colon
    }

    #[inline]
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Show raw segment bytes.
    pub fn write_segments(&mut self, segments: [u8; DIGITS]) {
        self.segments = segments;
        self.flush();
    }

    /// Turn the whole display off without losing its contents.
    pub fn display_off(&mut self) {
        self.command(cmd::DISPLAY_OFF);
    }

    /// Push the shadow segments and display control to the chip.
    pub fn flush(&mut self) {
        let mut frame = [0u8; DIGITS + 1];
        frame[0] = cmd::ADDRESS_BASE;
        frame[1..].copy_from_slice(&self.segments);
        if self.colon {
            frame[2] |= SEG_COLON;
        }

        self.command(cmd::DATA_AUTO_INCREMENT);
        self.frame(&frame);
        self.command(cmd::DISPLAY_ON | self.brightness);
    }

    pub fn free(self) -> (Clk, Dio, D) {
        (self.clk, self.dio, self.delay)
    }

    #[inline]
    fn bit_delay(&mut self) {
        self.delay.delay_us(BIT_DELAY_US);
    }

    fn command(&mut self, byte: u8) {
        self.frame(&[byte]);
    }

    fn frame(&mut self, bytes: &[u8]) {
        self.start();
        for &b in bytes {
            self.write_byte(b);
        }
        self.stop();
    }

    /// DIO falls while CLK is high.
    fn start(&mut self) {
        self.clk.set_high().ok();
        self.dio.set_high().ok();
        self.bit_delay();
        self.dio.set_low().ok();
        self.bit_delay();
        self.clk.set_low().ok();
    }

    /// DIO rises while CLK is high.
    fn stop(&mut self) {
        self.clk.set_low().ok();
        self.dio.set_low().ok();
        self.bit_delay();
        self.clk.set_high().ok();
        self.bit_delay();
        self.dio.set_high().ok();
        self.bit_delay();
    }

    fn write_byte(&mut self, byte: u8) {
        for bit in 0..8 {
            self.clk.set_low().ok();
            if byte & (1 << bit) != 0 {
                self.dio.set_high().ok();
            } else {
                self.dio.set_low().ok();
            }
            self.bit_delay();
            self.clk.set_high().ok();
            self.bit_delay();
        }

        // Ack clock: release DIO and let the chip pull it low
        self.clk.set_low().ok();
        self.dio.set_high().ok();
        self.bit_delay();
        self.clk.set_high().ok();
        self.bit_delay();
        self.clk.set_low().ok();
    }
}

impl<Clk, Dio, D> Display for Tm1637<Clk, Dio, D>
where
    Clk: OutputPin,
    Dio: OutputPin,
    D: DelayNs,
{
    fn render_number(&mut self, value: i16) {
        self.write_segments(encode_number(value));
    }

    fn render_text(&mut self, text: &str) {
        self.write_segments(encode_text(text));
    }

    fn clear(&mut self) {
        self.write_segments([SEG_BLANK; DIGITS]);
    }

    fn set_colon(&mut self, on: bool) {
        if self.colon != on {
            self.colon = on;
            self.flush();
        }
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level.min(7);
        self.flush();
    }
}
