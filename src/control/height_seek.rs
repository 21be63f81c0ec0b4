// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Bounded closed-loop move to a target height.
//!
//! [`HeightSeek`] holds the seek state and is stepped once per tick with a fresh sensor reading.
//! It decides the drive direction and when to give up; it never touches hardware, so the caller
//! owns the timing.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! let mut seek = HeightSeek::new(target_cm, &config.seek);
//!
//! loop {
//!     match seek.step(sensor.read_height_cm()) {
//!         SeekStep::Drive(dir) => motor.drive(dir),
//!         SeekStep::Arrived => break,
//!         SeekStep::Failed(err) => return Err(err),
//!     }
//!     delay.delay_ms(config.seek.tick_ms);
//! }
//! ```

use crate::config::SeekConfig;
use crate::drivers::Direction;
use crate::error::SeekError;

/// What to do after one reading.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SeekStep {
    /// Keep moving for another tick.
    Drive(Direction),
    /// Within tolerance of the target.
    Arrived,
    Failed(SeekError),
}

/// Summary of a successful seek.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SeekReport {
    pub target_cm: u16,
    pub height_cm: u16,
    /// Drive ticks spent getting there.
    pub ticks: u32,
}

#[derive(Clone, Debug)]
pub struct HeightSeek {
    target_cm: u16,
    tolerance_cm: u16,
    max_ticks: u32,
    stall_ticks: u32,

    /// Drive ticks issued so far
    ticks: u32,

    /// Closest approach to the target so far (cm)
    best_distance_cm: Option<u16>,

    /// Readings since `best_distance_cm` last improved
    since_progress: u32,
}

impl HeightSeek {
    pub fn new(target_cm: u16, cfg: &SeekConfig) -> Self {
        Self {
            target_cm,
            tolerance_cm: cfg.tolerance_cm,
            max_ticks: cfg.max_ticks,
            stall_ticks: cfg.stall_ticks.max(1),
            ticks: 0,
            best_distance_cm: None,
            since_progress: 0,
        }
    }

    #[inline]
    pub fn target_cm(&self) -> u16 {
        self.target_cm
    }

    #[inline]
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Returns true if `height_cm` is within tolerance of the target.
    #[inline]
    pub fn on_target(&self, height_cm: u16) -> bool {
        height_cm.abs_diff(self.target_cm) <= self.tolerance_cm
    }

    /// Feed one sensor reading. After `Arrived` or `Failed` the seek is finished.
    pub fn step(&mut self, height_cm: u16) -> SeekStep {
        if self.on_target(height_cm) {
            return SeekStep::Arrived;
        }

        let distance = height_cm.abs_diff(self.target_cm);
        match self.best_distance_cm {
            Some(best) if distance >= best => self.since_progress += 1,
            _ => {
                self.best_distance_cm = Some(distance);
                self.since_progress = 0;
            }
        }

        if self.since_progress >= self.stall_ticks {
            return SeekStep::Failed(SeekError::Stalled {
                target_cm: self.target_cm,
                height_cm,
                ticks: self.ticks,
            });
        }

        if self.ticks >= self.max_ticks {
            return SeekStep::Failed(SeekError::Timeout {
                target_cm: self.target_cm,
                height_cm,
                ticks: self.ticks,
            });
        }

        self.ticks += 1;
        if height_cm < self.target_cm {
            SeekStep::Drive(Direction::Up)
        } else {
            SeekStep::Drive(Direction::Down)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    const CFG: SeekConfig = Config::DEFAULT.seek;

    /// Ideal desk: moves `rate` cm per drive tick, clamped to `travel`.
    fn simulate(
        start: u16,
        target: u16,
        rate: u16,
        travel: (u16, u16),
        cfg: &SeekConfig,
    ) -> (SeekStep, u16) {
        let mut seek = HeightSeek::new(target, cfg);
        let mut height = start;
        loop {
            match seek.step(height) {
                SeekStep::Drive(Direction::Up) => height = (height + rate).min(travel.1),
                SeekStep::Drive(Direction::Down) => {
                    height = height.saturating_sub(rate).max(travel.0)
                }
                SeekStep::Drive(Direction::Stopped) => unreachable!(),
                done => return (done, height),
            }
        }
    }

    #[test]
    fn already_there_arrives_without_moving() {
        let mut seek = HeightSeek::new(90, &CFG);
        assert_eq!(seek.step(90), SeekStep::Arrived);
        assert_eq!(seek.ticks(), 0);
    }

    #[test]
    fn direction_follows_sign_of_error() {
        let mut seek = HeightSeek::new(80, &CFG);
        assert_eq!(seek.step(90), SeekStep::Drive(Direction::Down));
        let mut seek = HeightSeek::new(100, &CFG);
        assert_eq!(seek.step(90), SeekStep::Drive(Direction::Up));
    }

    #[test]
    fn every_reachable_target_is_reached_exactly() {
        for start in (65..=125).step_by(5) {
            for target in 65..=125 {
                let (step, height) = simulate(start, target, 1, (60, 125), &CFG);
                assert_eq!(step, SeekStep::Arrived, "start {} target {}", start, target);
                assert_eq!(height, target);
            }
        }
    }

    #[test]
    fn target_above_travel_stalls() {
        let (step, height) = simulate(90, 130, 1, (60, 125), &CFG);
        assert_eq!(height, 125);
        assert!(matches!(
            step,
            SeekStep::Failed(SeekError::Stalled {
                target_cm: 130,
                height_cm: 125,
                ..
            })
        ));
    }

    #[test]
    fn sensor_stuck_at_zero_stalls_after_window() {
        let mut seek = HeightSeek::new(80, &CFG);
        let mut last = SeekStep::Arrived;
        for _ in 0..=CFG.stall_ticks {
            last = seek.step(0);
        }
        assert_eq!(
            last,
            SeekStep::Failed(SeekError::Stalled {
                target_cm: 80,
                height_cm: 0,
                ticks: CFG.stall_ticks,
            })
        );
    }

    #[test]
    fn hunting_around_unresolvable_target_stalls() {
        // 2 cm per tick can never land on an odd distance
        let (step, _) = simulate(90, 81, 2, (60, 125), &CFG);
        assert!(matches!(step, SeekStep::Failed(SeekError::Stalled { .. })));
    }

    #[test]
    fn tolerance_accepts_near_miss() {
        let cfg = SeekConfig {
            tolerance_cm: 1,
            ..CFG
        };
        let (step, height) = simulate(90, 81, 2, (60, 125), &cfg);
        assert_eq!(step, SeekStep::Arrived);
        assert_eq!(height.abs_diff(81), 1);
    }

    #[test]
    fn slow_progress_hits_the_tick_bound() {
        let cfg = SeekConfig {
            max_ticks: 5,
            ..CFG
        };
        let (step, height) = simulate(90, 60, 1, (0, 200), &cfg);
        assert_eq!(height, 85);
        assert_eq!(
            step,
            SeekStep::Failed(SeekError::Timeout {
                target_cm: 60,
                height_cm: 85,
                ticks: 5,
            })
        );
    }

    #[test]
    fn zero_stall_window_still_allows_progress() {
        let cfg = SeekConfig {
            stall_ticks: 0,
            ..CFG
        };
        let (step, height) = simulate(85, 80, 1, (60, 125), &cfg);
        assert_eq!(step, SeekStep::Arrived);
        assert_eq!(height, 80);
    }
}
