// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Manual jog: the motor runs for one poll period per cycle while a jog button is held.

use crate::config::TravelLimits;
use crate::drivers::{ButtonState, Direction};

/// Outcome of a jog request for this cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum JogCommand {
    /// No jog button held.
    Idle,
    Drive(Direction),
    /// Requested, but the desk is already at the travel limit in that direction.
    Limited(Direction),
}

/// Direction requested by the jog buttons alone.
///
/// Up and down are applied in that order, so with both held (the mode chord) down wins.
#[inline]
pub fn requested(buttons: &ButtonState) -> Direction {
    match (buttons.up, buttons.down) {
        (_, true) => Direction::Down,
        (true, false) => Direction::Up,
        (false, false) => Direction::Stopped,
    }
}

/// Apply travel limits to a requested direction at `height_cm`.
pub fn limit(direction: Direction, height_cm: u16, limits: Option<TravelLimits>) -> JogCommand {
    let allowed = match (direction, limits) {
        (Direction::Stopped, _) => return JogCommand::Idle,
        (_, None) => true,
        (Direction::Up, Some(l)) => l.allows_up(height_cm),
        (Direction::Down, Some(l)) => l.allows_down(height_cm),
    };

    if allowed {
        JogCommand::Drive(direction)
    } else {
        JogCommand::Limited(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: TravelLimits = TravelLimits {
        min_cm: 71,
        max_cm: 117,
    };

    #[test]
    fn single_buttons_request_a_direction() {
        let up = ButtonState {
            up: true,
            ..ButtonState::RELEASED
        };
        let down = ButtonState {
            down: true,
            ..ButtonState::RELEASED
        };
        assert_eq!(requested(&up), Direction::Up);
        assert_eq!(requested(&down), Direction::Down);
        assert_eq!(requested(&ButtonState::RELEASED), Direction::Stopped);
    }

    #[test]
    fn chord_resolves_to_down() {
        let chord = ButtonState {
            up: true,
            down: true,
            ..ButtonState::RELEASED
        };
        assert_eq!(requested(&chord), Direction::Down);
        assert_eq!(
            limit(requested(&chord), 90, None),
            JogCommand::Drive(Direction::Down)
        );
        assert_eq!(
            limit(requested(&chord), 71, Some(LIMITS)),
            JogCommand::Limited(Direction::Down)
        );
    }

    #[test]
    fn limits_stop_travel_at_the_ends() {
        assert_eq!(
            limit(Direction::Up, 117, Some(LIMITS)),
            JogCommand::Limited(Direction::Up)
        );
        assert_eq!(
            limit(Direction::Down, 117, Some(LIMITS)),
            JogCommand::Drive(Direction::Down)
        );
        assert_eq!(
            limit(Direction::Down, 71, Some(LIMITS)),
            JogCommand::Limited(Direction::Down)
        );
    }

    #[test]
    fn no_limits_means_no_checks() {
        assert_eq!(
            limit(Direction::Up, 300, None),
            JogCommand::Drive(Direction::Up)
        );
        assert_eq!(
            limit(Direction::Down, 0, None),
            JogCommand::Drive(Direction::Down)
        );
    }
}
