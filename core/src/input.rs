//! Input driver
//!
//! Maps pointer/keyboard style events onto state requests, and runs the
//! "ask" flow: after a short random delay the Bit answers yes or no, holds the
//! answer, then returns to idle. Everything runs on the caller's frame loop.

use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use tracing::{debug, info, warn};

use crate::config::AskConfig;
use crate::error::ParseError;
use crate::scene::BitScene;
use crate::state::VisualState;

/// A user interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A yes/no control went down
    Press(VisualState),
    /// The pressed control went up
    Release,
    /// The window or widget lost focus
    FocusLost,
    /// A question that the Bit answers on its own
    Ask { question: String },
}

/// Action name used in scripted event lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Yes,
    No,
    Release,
    Blur,
    Ask,
}

impl Action {
    /// The event this action produces; `Ask` uses `question`
    pub fn to_event(self, question: &str) -> InputEvent {
        match self {
            Action::Yes => InputEvent::Press(VisualState::Yes),
            Action::No => InputEvent::Press(VisualState::No),
            Action::Release => InputEvent::Release,
            Action::Blur => InputEvent::FocusLost,
            Action::Ask => InputEvent::Ask {
                question: question.to_string(),
            },
        }
    }
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Action::Yes),
            "no" => Ok(Action::No),
            "release" => Ok(Action::Release),
            "blur" => Ok(Action::Blur),
            "ask" => Ok(Action::Ask),
            _ => Err(ParseError::UnknownAction(s.to_string())),
        }
    }
}

/// An action at a point in time, written `SECONDS:ACTION` (e.g. `0.5:yes`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptEvent {
    pub at: f32,
    pub action: Action,
}

impl FromStr for ScriptEvent {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (at, action) = s
            .split_once(':')
            .ok_or_else(|| ParseError::InvalidEvent(s.to_string()))?;
        let at: f32 = at
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidEvent(s.to_string()))?;
        if !at.is_finite() || at < 0.0 {
            return Err(ParseError::InvalidEvent(s.to_string()));
        }
        Ok(Self {
            at,
            action: action.parse()?,
        })
    }
}

/// The Bit's reply to a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub question: String,
    pub state: VisualState,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.question, self.state)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum AskPhase {
    Quiet,
    Thinking { question: String, remaining_ms: f32 },
    Answering { remaining_ms: f32 },
}

/// Turns input events and elapsed time into state requests
pub struct Presenter {
    config: AskConfig,
    rng: Pcg32,
    phase: AskPhase,
}

impl Presenter {
    /// Seeded from `config.seed`, or from the OS when unset
    pub fn new(config: AskConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        debug!(seed, "Presenter RNG seeded");
        Self {
            config,
            rng: Pcg32::seed_from_u64(seed),
            phase: AskPhase::Quiet,
        }
    }

    /// A question is waiting for its answer
    pub fn is_thinking(&self) -> bool {
        matches!(self.phase, AskPhase::Thinking { .. })
    }

    /// An answer is currently on display
    pub fn is_answering(&self) -> bool {
        matches!(self.phase, AskPhase::Answering { .. })
    }

    /// Apply one event to `scene`
    pub fn handle(&mut self, event: InputEvent, scene: &mut BitScene) {
        match event {
            InputEvent::Press(state) => {
                self.cancel_ask();
                scene.set_target_state(state);
            }
            InputEvent::Release | InputEvent::FocusLost => {
                self.cancel_ask();
                scene.set_target_state(VisualState::Idle);
            }
            InputEvent::Ask { question } => {
                let question = question.trim();
                if question.is_empty() {
                    warn!("Ignoring empty question");
                    return;
                }
                let delay = self.thinking_delay_ms();
                debug!(question, delay_ms = delay, "Thinking");
                self.phase = AskPhase::Thinking {
                    question: question.to_string(),
                    remaining_ms: delay,
                };
                scene.set_target_state(VisualState::Idle);
            }
        }
    }

    /// Advance timers by `dt_seconds`; returns the answer on the frame it is given
    pub fn tick(&mut self, dt_seconds: f32, scene: &mut BitScene) -> Option<Answer> {
        let elapsed_ms = if dt_seconds.is_finite() {
            dt_seconds.max(0.0) * 1000.0
        } else {
            0.0
        };

        match &mut self.phase {
            AskPhase::Quiet => None,
            AskPhase::Thinking {
                question,
                remaining_ms,
            } => {
                *remaining_ms -= elapsed_ms;
                if *remaining_ms > 0.0 {
                    return None;
                }
                let question = std::mem::take(question);
                let state = if self.rng.random_bool(0.5) {
                    VisualState::Yes
                } else {
                    VisualState::No
                };
                info!(%question, answer = %state, "Answered");
                scene.set_target_state(state);
                self.phase = AskPhase::Answering {
                    remaining_ms: self.config.answer_hold_ms.max(0.0),
                };
                Some(Answer { question, state })
            }
            AskPhase::Answering { remaining_ms } => {
                *remaining_ms -= elapsed_ms;
                if *remaining_ms <= 0.0 {
                    self.phase = AskPhase::Quiet;
                    scene.set_target_state(VisualState::Idle);
                }
                None
            }
        }
    }

    fn cancel_ask(&mut self) {
        if self.phase != AskPhase::Quiet {
            debug!("Pending answer cancelled");
            self.phase = AskPhase::Quiet;
        }
    }

    fn thinking_delay_ms(&mut self) -> f32 {
        let (min, max) = self.config.delay_range_ms();
        if min == max {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}
