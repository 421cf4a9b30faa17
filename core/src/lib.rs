//! Bit Core - animated yes/no widget engine
//!
//! Renderer-agnostic core of the Bit: a small wireframe character that idles
//! as a polyhedron and morphs into a cube for "yes" or a spiky ball for "no".
//!
//! # Architecture
//!
//! - [`rng`] - Mulberry32, the seeded PRNG behind geometry and motion
//! - [`procedural`] - Mesh primitives, modifiers and the three Bit shapes
//! - [`state`] - [`VisualState`] and the crossfade state machine
//! - [`animation`] - Easing, per-group dynamics and the per-frame update
//! - [`scene`] - [`BitScene`], its shape groups and the [`MeshSink`] seam
//! - [`input`] - [`Presenter`], mapping presses and questions onto requests
//! - [`config`] - TOML configuration with defaults

pub mod animation;
pub mod config;
pub mod error;
pub mod input;
pub mod procedural;
pub mod rng;
pub mod scene;
pub mod state;

pub use animation::{FrameClock, FrameTime};
pub use config::BitConfig;
pub use error::{ConfigError, ParseError};
pub use input::{Action, Answer, InputEvent, Presenter, ScriptEvent};
pub use procedural::UnpackedMesh;
pub use rng::Mulberry32;
pub use scene::{BitScene, MeshHandle, MeshSink, SceneSnapshot};
pub use state::{TransitionState, VisualState};
