// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Error types for the desk controller.

/// Reasons a height seek gave up before reaching its target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SeekError {
    /// The measured height stopped getting closer to the target.
    ///
    /// Covers a jammed desk, a sensor stuck at its no-echo value, a target outside the physical
    /// travel, and hunting around a target the sensor cannot resolve.
    #[error("no progress toward {target_cm} cm for {ticks} ticks (at {height_cm} cm)")]
    Stalled {
        target_cm: u16,
        height_cm: u16,
        ticks: u32,
    },

    /// The iteration bound ran out while still making progress.
    #[error("{target_cm} cm not reached within {ticks} ticks (at {height_cm} cm)")]
    Timeout {
        target_cm: u16,
        height_cm: u16,
        ticks: u32,
    },
}

/// Errors from the non-volatile preset store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("preset page read failed")]
    Read,

    #[error("preset page erase/program failed")]
    Write,

    /// The page was written but does not read back as the committed record.
    #[error("preset page read-back mismatch")]
    Verify,
}
