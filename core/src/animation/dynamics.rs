//! Seed-derived motion constants
//!
//! Each shape group spins and precesses with its own axes and speeds. They are
//! a pure function of the group's seed, fixed at construction.

use glam::Vec3;
use serde::Serialize;

use crate::rng::Mulberry32;

/// Baseline inner/outer speed ratio; `RotationConfig::outer_inner_speed_ratio`
/// scales inner speed relative to this
pub const DEFAULT_INNER_SPEED_RATIO: f32 = 1.4;

/// Rotation axes and angular speeds (rad/s) of one shape group
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dynamics {
    /// Outer mesh self-rotation axis
    pub axis_outer: Vec3,
    /// Inner mesh self-rotation axis
    pub axis_inner: Vec3,
    /// Whole-group precession axis
    pub precess_axis: Vec3,
    /// Outer self-rotation speed, in [0.7, 1.1]
    pub speed_outer: f32,
    /// Inner self-rotation speed at the baseline ratio, in [1.0, 1.6]
    pub speed_inner: f32,
    /// Precession speed, in [0.15, 0.25]
    pub precess_speed: f32,
}

impl Dynamics {
    /// Derive all constants from `seed`
    ///
    /// Draw order: outer axis (3), inner axis (3), precession axis (3), outer
    /// speed, inner speed, precession speed.
    pub fn from_seed(seed: u32) -> Self {
        let mut rng = Mulberry32::new(seed);
        let mut signed = || rng.next_f32() * 2.0 - 1.0;

        let axis_outer = Vec3::new(signed(), signed(), signed()).normalize_or(Vec3::Y);
        let axis_inner = Vec3::new(signed(), signed(), signed()).normalize_or(Vec3::Y);

        let precess_axis =
            Vec3::new(rng.next_f32(), rng.next_f32(), rng.next_f32()).normalize_or(Vec3::Y);
        let speed_outer = 0.7 + rng.next_f32() * 0.4;
        let speed_inner = 1.0 + rng.next_f32() * 0.6;
        let precess_speed = 0.15 + rng.next_f32() * 0.1;

        Self {
            axis_outer,
            axis_inner,
            precess_axis,
            speed_outer,
            speed_inner,
            precess_speed,
        }
    }

    /// Inner self-rotation speed for a configured inner/outer ratio
    pub fn inner_speed(&self, ratio: f32) -> f32 {
        self.speed_inner * ratio / DEFAULT_INNER_SPEED_RATIO
    }
}
