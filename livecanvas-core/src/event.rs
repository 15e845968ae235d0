//! Pointer input, normalized from whatever gesture source the host has.
//!
//! A gesture is an ordered stream on one thread: one `Start`, any number of
//! `Move`s, then exactly one `End` or `Cancel`. Controllers treat `Cancel`
//! like `End` for state cleanup so an interrupted gesture never leaks
//! captured state into the next one.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Phase of a pointer sample within a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// First sample of a gesture.
    Start,
    /// Intermediate sample.
    Move,
    /// Normal completion.
    End,
    /// Abnormal termination (system interruption, gesture claimed by the
    /// host). No further samples follow.
    Cancel,
}

impl PointerPhase {
    /// Whether this phase ends the gesture.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::End | Self::Cancel)
    }
}

/// One pointer sample in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Gesture phase.
    pub phase: PointerPhase,
    /// Pointer location. May lie outside the canvas; consumers clamp.
    pub location: Point,
}

impl PointerEvent {
    /// Sample with an explicit phase.
    #[must_use]
    pub const fn new(phase: PointerPhase, location: Point) -> Self {
        Self { phase, location }
    }

    /// First sample of a gesture.
    #[must_use]
    pub const fn start(location: Point) -> Self {
        Self::new(PointerPhase::Start, location)
    }

    /// Intermediate sample.
    #[must_use]
    pub const fn moved(location: Point) -> Self {
        Self::new(PointerPhase::Move, location)
    }

    /// Final sample of a completed gesture.
    #[must_use]
    pub const fn end(location: Point) -> Self {
        Self::new(PointerPhase::End, location)
    }

    /// Final sample of an interrupted gesture.
    #[must_use]
    pub const fn cancel(location: Point) -> Self {
        Self::new(PointerPhase::Cancel, location)
    }
}
