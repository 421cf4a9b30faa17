//! Per-frame animation
//!
//! Order within a frame: crossfade progress, commit, hover, rotation, then
//! pulse and shimmer. Crossfade and commit write the group's blend bases;
//! pulse and shimmer read those bases and write the mesh transforms and
//! materials, so the last two never feed back into the blend.

use serde::Serialize;

use super::{CrossfadeFrame, FADED_OPACITY, FADED_SCALE};
use crate::config::BitConfig;
use crate::scene::ShapeGroup;
use crate::state::{Advance, TransitionState};

/// Frequency of the outer opacity shimmer
const OUTER_SHIMMER_FREQ: f32 = 2.0;
/// Frequency of the inner opacity shimmer
const INNER_SHIMMER_FREQ: f32 = 2.7;
/// Extra shimmer phase of the inner mesh
const INNER_SHIMMER_PHASE: f32 = 0.4;
/// Shimmer never fades a mesh out completely
const MIN_SHIMMER_OPACITY: f32 = 0.05;

/// Time of one rendered frame, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FrameTime {
    /// Time since the scene started
    pub elapsed: f32,
    /// Time since the previous frame
    pub delta: f32,
}

impl FrameTime {
    pub fn new(elapsed: f32, delta: f32) -> Self {
        Self { elapsed, delta }
    }

    /// Non-finite times become zero; negative deltas become zero
    fn sanitized(self) -> Self {
        let finite_or_zero = |x: f32| if x.is_finite() { x } else { 0.0 };
        Self {
            elapsed: finite_or_zero(self.elapsed),
            delta: finite_or_zero(self.delta).max(0.0),
        }
    }
}

/// Accumulates frame deltas into `FrameTime`s for hosts without a clock
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    elapsed: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `delta` seconds; negative or non-finite deltas count as zero
    pub fn tick(&mut self, delta: f32) -> FrameTime {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.elapsed += delta;
        FrameTime::new(self.elapsed, delta)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Run one frame over all three groups
pub(crate) fn animate_frame(
    groups: &mut [ShapeGroup; 3],
    transition: &mut TransitionState,
    frame: FrameTime,
    config: &BitConfig,
) {
    let frame = frame.sanitized();
    let baseline = config.material.outer_opacity;

    match transition.advance(frame.delta, config.animation.transition_time_ms) {
        Advance::Steady => {}
        Advance::Blending { from, to, eased } => {
            let blend = CrossfadeFrame::at(eased);
            let from = &mut groups[from.index()];
            from.set_visible(true);
            from.set_scale(blend.from_scale);
            from.set_opacity(blend.from_opacity);
            let to = &mut groups[to.index()];
            to.set_visible(true);
            to.set_scale(blend.to_scale);
            to.set_opacity(blend.to_opacity);
        }
        Advance::Committed { from, to } => {
            let from = &mut groups[from.index()];
            from.set_scale(FADED_SCALE);
            from.set_opacity(FADED_OPACITY);
            from.set_visible(false);
            groups[to.index()].reset_visual(baseline);
        }
    }

    for group in groups.iter_mut().filter(|g| g.is_visible()) {
        hover(group, frame, config);
        rotate(group, frame, config);
        pulse(group, frame, config);
        shimmer(group, frame, config);
    }
}

fn hover(group: &mut ShapeGroup, frame: FrameTime, config: &BitConfig) {
    let anim = &config.animation;
    group.transform.translation.y = (frame.elapsed * anim.hover_frequency).sin() * anim.hover_amplitude;
}

fn rotate(group: &mut ShapeGroup, frame: FrameTime, config: &BitConfig) {
    let rotation = &config.rotation;
    let step = rotation.speed_multiplier(group.state()) * frame.delta;
    let dynamics = *group.dynamics();

    group
        .transform
        .rotate_local(dynamics.precess_axis, dynamics.precess_speed * step);
    group
        .outer
        .transform
        .rotate_local(dynamics.axis_outer, dynamics.speed_outer * step);
    group.inner.transform.rotate_local(
        dynamics.axis_inner,
        dynamics.inner_speed(rotation.outer_inner_speed_ratio) * step,
    );
}

fn pulse(group: &mut ShapeGroup, frame: FrameTime, config: &BitConfig) {
    let anim = &config.animation;
    let t = frame.elapsed;
    let phase = group.phase();
    let amp = anim.pulse_amp(group.state());
    let base = group.scale_base();

    group.outer.transform.scale = base * (1.0 + (t * anim.outer_pulse_freq + phase).sin() * amp);
    group.inner.transform.scale = base
        * group.inner_ratio()
        * (1.0
            + (t * anim.inner_pulse_freq + phase + anim.inner_phase_offset).sin()
                * amp
                * anim.inner_amp_multiplier);
}

fn shimmer(group: &mut ShapeGroup, frame: FrameTime, config: &BitConfig) {
    if !config.material.transparent {
        group.outer.material.opacity = 1.0;
        group.inner.material.opacity = 1.0;
        return;
    }

    let anim = &config.animation;
    let t = frame.elapsed;
    let phase = group.phase();
    let wave = anim.shimmer_amplitude * anim.shimmer_multiplier;

    let outer = group.opacity_base() + wave * (t * OUTER_SHIMMER_FREQ + phase).sin();
    let inner = group.inner_opacity_base()
        + wave * (t * INNER_SHIMMER_FREQ + phase + INNER_SHIMMER_PHASE).sin();

    group.outer.material.opacity = outer.clamp(MIN_SHIMMER_OPACITY, 1.0);
    group.inner.material.opacity = inner.clamp(MIN_SHIMMER_OPACITY, 1.0);
}
