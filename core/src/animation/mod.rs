//! Animation of the Bit
//!
//! Easing and crossfade blend values, seed-derived rotation dynamics and the
//! per-frame update that ties them together.

mod controller;
mod dynamics;
mod easing;

pub use controller::{FrameClock, FrameTime};
pub(crate) use controller::animate_frame;
pub use dynamics::{DEFAULT_INNER_SPEED_RATIO, Dynamics};
pub use easing::{CrossfadeFrame, FADED_OPACITY, FADED_SCALE, ease_in_out_cubic};
