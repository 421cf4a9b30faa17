//! Visual state machine
//!
//! Tracks the committed state, the requested state and crossfade progress.
//! Rules:
//! - A request equal to the committed state while steady is a no-op.
//! - A request from a steady state starts a crossfade at progress 0.
//! - A request while a crossfade is in flight replaces its target and restarts
//!   progress at 0. The crossfade always runs from the committed state; the
//!   abandoned target is reported so the scene can hide it.
//! - A request back to the committed state mid-flight cancels the crossfade.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::animation::ease_in_out_cubic;
use crate::error::ParseError;

/// One of the three looks of the Bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VisualState {
    #[default]
    Idle,
    Yes,
    No,
}

impl VisualState {
    pub const ALL: [VisualState; 3] = [VisualState::Idle, VisualState::Yes, VisualState::No];

    /// Slot of this state in per-state arrays
    pub fn index(self) -> usize {
        match self {
            VisualState::Idle => 0,
            VisualState::Yes => 1,
            VisualState::No => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VisualState::Idle => "idle",
            VisualState::Yes => "yes",
            VisualState::No => "no",
        }
    }
}

impl fmt::Display for VisualState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VisualState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "idle" => Ok(VisualState::Idle),
            "yes" => Ok(VisualState::Yes),
            "no" => Ok(VisualState::No),
            _ => Err(ParseError::UnknownState(s.to_string())),
        }
    }
}

/// Effect of a target request on the transition bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retarget {
    /// Nothing changed
    Unchanged,
    /// A crossfade from the committed state began
    Started { from: VisualState, to: VisualState },
    /// An in-flight crossfade now heads somewhere else
    Redirected {
        from: VisualState,
        abandoned: VisualState,
        to: VisualState,
    },
    /// The in-flight crossfade was abandoned; the committed state stays
    Cancelled {
        current: VisualState,
        abandoned: VisualState,
    },
}

/// Result of advancing a crossfade by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advance {
    /// Steady state, nothing to blend
    Steady,
    /// Mid-crossfade with the eased progress for this frame
    Blending {
        from: VisualState,
        to: VisualState,
        eased: f32,
    },
    /// The crossfade finished this frame
    Committed {
        from: VisualState,
        to: VisualState,
    },
}

/// Committed state, requested state and crossfade progress
///
/// Invariant: `progress == 1.0` exactly when `current == target`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitionState {
    current: VisualState,
    target: VisualState,
    progress: f32,
}

impl Default for TransitionState {
    fn default() -> Self {
        Self::new(VisualState::Idle)
    }
}

impl TransitionState {
    /// Steady in `state`
    pub fn new(state: VisualState) -> Self {
        Self {
            current: state,
            target: state,
            progress: 1.0,
        }
    }

    pub fn current(&self) -> VisualState {
        self.current
    }

    pub fn target(&self) -> VisualState {
        self.target
    }

    /// Linear progress in [0, 1]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_transitioning(&self) -> bool {
        self.current != self.target
    }

    /// Request a new target state
    pub fn request(&mut self, target: VisualState) -> Retarget {
        if target == self.target {
            return Retarget::Unchanged;
        }

        let previous = self.target;
        let was_transitioning = self.is_transitioning();
        self.target = target;

        if target == self.current {
            self.progress = 1.0;
            return Retarget::Cancelled {
                current: self.current,
                abandoned: previous,
            };
        }

        self.progress = 0.0;
        if was_transitioning {
            Retarget::Redirected {
                from: self.current,
                abandoned: previous,
                to: target,
            }
        } else {
            Retarget::Started {
                from: self.current,
                to: target,
            }
        }
    }

    /// Advance progress by `dt_seconds` for a crossfade lasting `duration_ms`
    ///
    /// A non-positive duration completes the crossfade immediately.
    pub fn advance(&mut self, dt_seconds: f32, duration_ms: f32) -> Advance {
        if !self.is_transitioning() {
            return Advance::Steady;
        }

        let step = if duration_ms > 0.0 {
            (dt_seconds.max(0.0) * 1000.0) / duration_ms
        } else {
            1.0
        };
        self.progress = (self.progress + step).min(1.0);

        let (from, to) = (self.current, self.target);
        if self.progress >= 1.0 {
            self.current = self.target;
            Advance::Committed { from, to }
        } else {
            Advance::Blending {
                from,
                to,
                eased: ease_in_out_cubic(self.progress),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_same_state_is_noop() {
        let mut t = TransitionState::default();
        assert_eq!(t.request(VisualState::Idle), Retarget::Unchanged);
        assert!(!t.is_transitioning());
        assert_eq!(t.progress(), 1.0);
    }

    #[test]
    fn test_request_starts_transition() {
        let mut t = TransitionState::default();
        assert_eq!(
            t.request(VisualState::Yes),
            Retarget::Started {
                from: VisualState::Idle,
                to: VisualState::Yes
            }
        );
        assert_eq!(t.progress(), 0.0);
        assert!(t.is_transitioning());
    }

    #[test]
    fn test_advance_commits_after_duration() {
        let mut t = TransitionState::default();
        t.request(VisualState::No);

        assert!(matches!(t.advance(0.1, 300.0), Advance::Blending { .. }));
        assert!(matches!(t.advance(0.1, 300.0), Advance::Blending { .. }));
        assert_eq!(
            t.advance(0.15, 300.0),
            Advance::Committed {
                from: VisualState::Idle,
                to: VisualState::No
            }
        );
        assert_eq!(t.current(), VisualState::No);
        assert_eq!(t.advance(0.1, 300.0), Advance::Steady);
    }

    #[test]
    fn test_zero_duration_commits_immediately() {
        let mut t = TransitionState::default();
        t.request(VisualState::Yes);
        assert!(matches!(t.advance(0.0, 0.0), Advance::Committed { .. }));
        assert!(t.progress().is_finite());
    }

    #[test]
    fn test_redirect_restarts_progress() {
        let mut t = TransitionState::default();
        t.request(VisualState::Yes);
        t.advance(0.15, 300.0);

        assert_eq!(
            t.request(VisualState::No),
            Retarget::Redirected {
                from: VisualState::Idle,
                abandoned: VisualState::Yes,
                to: VisualState::No
            }
        );
        assert_eq!(t.progress(), 0.0);
        assert_eq!(t.current(), VisualState::Idle);
        assert_eq!(t.target(), VisualState::No);
    }

    #[test]
    fn test_request_back_to_current_cancels() {
        let mut t = TransitionState::default();
        t.request(VisualState::Yes);
        t.advance(0.1, 300.0);

        assert_eq!(
            t.request(VisualState::Idle),
            Retarget::Cancelled {
                current: VisualState::Idle,
                abandoned: VisualState::Yes
            }
        );
        assert!(!t.is_transitioning());
        assert_eq!(t.progress(), 1.0);
    }

    #[test]
    fn test_parse_state() {
        assert_eq!("YES".parse::<VisualState>(), Ok(VisualState::Yes));
        assert_eq!(" no ".parse::<VisualState>(), Ok(VisualState::No));
        assert!("maybe".parse::<VisualState>().is_err());
    }
}
