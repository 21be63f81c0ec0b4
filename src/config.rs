// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Runtime configuration for the desk controller.
//!
//! Board wiring is compile-time (see `firmware/src/hw/pins.rs`); everything that shapes the
//! control loop's behavior lives here so tests can tighten bounds without touching drivers.

/// Maximum distance the ultrasonic sensor is pinged for (cm). Echoes beyond this read as 0.
pub const MAX_DISTANCE_CM: u16 = 130;

/// Fixed H-bridge duty cycle used for every move, in percent.
pub const MOTOR_DUTY_PERCENT: u8 = 50;

/// Software travel limits applied to manual jog (cm).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TravelLimits {
    pub min_cm: u16,
    pub max_cm: u16,
}

impl TravelLimits {
    /// Whether jogging upward is allowed from `height_cm`.
    #[inline]
    pub fn allows_up(&self, height_cm: u16) -> bool {
        height_cm < self.max_cm
    }

    /// Whether jogging downward is allowed from `height_cm`.
    #[inline]
    pub fn allows_down(&self, height_cm: u16) -> bool {
        height_cm > self.min_cm
    }
}

/// Bounds for a single height seek.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SeekConfig {
    /// Time between sensor re-reads while moving (ms).
    pub tick_ms: u32,

    /// Deadband in cm, "close enough" to target. 0 requires an exact match.
    pub tolerance_cm: u16,

    /// Hard cap on drive ticks before giving up.
    pub max_ticks: u32,

    /// Consecutive ticks without getting closer to the target before declaring a stall.
    pub stall_ticks: u32,
}

/// Controller configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Sleep at the end of every loop cycle (ms).
    pub poll_period_ms: u32,

    /// How long the boot splash (`8888` + colon) stays up (ms).
    pub splash_ms: u32,

    /// TM1637 brightness, 0..=7.
    pub brightness: u8,

    /// Presets used when the non-volatile record is blank or corrupt.
    pub default_presets: [u8; 2],

    /// Jog limits. `None` lets the motor run wherever the buttons say.
    pub travel_limits: Option<TravelLimits>,

    /// Emit the per-cycle diagnostic snapshot.
    pub log_snapshots: bool,

    pub seek: SeekConfig,
}

impl Config {
    pub const DEFAULT: Self = Self {
        poll_period_ms: 250,
        splash_ms: 1500,
        brightness: 7,
        default_presets: [0, 0],
        travel_limits: Some(TravelLimits {
            min_cm: 71,
            max_cm: 117,
        }),
        log_snapshots: true,
        seek: SeekConfig {
            tick_ms: 250,
            tolerance_cm: 0,
            // 60 s of travel at the default tick
            max_ticks: 240,
            stall_ticks: 12,
        },
    };

    /// Same configuration with jog limits removed.
    pub const fn without_travel_limits(mut self) -> Self {
        self.travel_limits = None;
        self
    }

    /// Same configuration with different seek bounds.
    pub const fn with_seek(mut self, seek: SeekConfig) -> Self {
        self.seek = seek;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
