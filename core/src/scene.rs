//! Scene graph of the Bit
//!
//! Three shape groups (one per `VisualState`), each with an outer and an inner
//! mesh. Geometry is built once in `BitScene::new`; the host uploads it through
//! a `MeshSink` and then calls `update` once per rendered frame. Until every
//! mesh has a renderer handle the scene is not ready, and both `update` and
//! state requests are deferred.

use glam::{Mat4, Quat, Vec3};
use serde::Serialize;
use tracing::debug;

use crate::animation::{self, Dynamics, FADED_OPACITY, FADED_SCALE, FrameTime};
use crate::config::{BitConfig, MaterialConfig};
use crate::procedural::{UnpackedMesh, build_idle_geometry, build_no_geometry, build_yes_geometry};
use crate::state::{Retarget, TransitionState, VisualState};

/// Resting scale of the current group
pub const BASELINE_SCALE: f32 = 1.0;

/// Renderer-side identifier of an uploaded mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MeshHandle(pub u32);

/// Where geometry goes to be drawn
///
/// Implemented by the host renderer. `upload` may return `None` while the
/// renderer is not ready yet; `BitScene::mount` retries on its next call.
pub trait MeshSink {
    /// Upload geometry, returning a handle once it is usable
    fn upload(&mut self, mesh: &UnpackedMesh) -> Option<MeshHandle>;

    /// Free a handle previously returned by `upload`
    fn release(&mut self, handle: MeshHandle);
}

/// Translation, rotation and uniform scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.translation)
    }

    /// Rotate about `axis` in local space (post-multiply)
    pub fn rotate_local(&mut self, axis: Vec3, angle: f32) {
        self.rotation = (self.rotation * Quat::from_axis_angle(axis, angle)).normalize();
    }
}

/// Surface parameters read by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Material {
    /// 0xRRGGBB
    pub color: u32,
    pub opacity: f32,
    pub wireframe: bool,
    pub transparent: bool,
    pub metalness: f32,
    pub roughness: f32,
}

impl Material {
    fn from_config(color: u32, opacity: f32, config: &MaterialConfig) -> Self {
        Self {
            color,
            opacity,
            wireframe: config.wireframe,
            transparent: config.transparent,
            metalness: config.metalness,
            roughness: config.roughness,
        }
    }
}

/// One drawable mesh of a group
#[derive(Debug, Clone, Serialize)]
pub struct MeshInstance {
    pub transform: Transform,
    pub material: Material,
    #[serde(skip)]
    handle: Option<MeshHandle>,
}

impl MeshInstance {
    pub fn handle(&self) -> Option<MeshHandle> {
        self.handle
    }
}

/// Outer and inner mesh of one visual state
///
/// Geometry, color, dynamics and pulse phase never change after construction;
/// transforms, materials, the blend bases and visibility are rewritten by the
/// animation every frame.
#[derive(Debug, Clone)]
pub struct ShapeGroup {
    state: VisualState,
    geometry: UnpackedMesh,
    color: u32,
    dynamics: Dynamics,
    phase: f32,
    inner_ratio: f32,
    inner_opacity_offset: f32,

    pub transform: Transform,
    pub outer: MeshInstance,
    pub inner: MeshInstance,
    scale_base: f32,
    opacity_base: f32,
    visible: bool,
}

impl ShapeGroup {
    fn new(state: VisualState, geometry: UnpackedMesh, config: &BitConfig) -> Self {
        let color = state_color(state);
        let outer_opacity = config.material.outer_opacity;
        let inner_opacity_offset = config.material.inner_opacity_offset;
        let inner_ratio = config.animation.inner_scale_ratio;

        let outer = MeshInstance {
            transform: Transform::default(),
            material: Material::from_config(color, outer_opacity, &config.material),
            handle: None,
        };
        let inner = MeshInstance {
            transform: Transform {
                scale: inner_ratio,
                ..Transform::default()
            },
            material: Material::from_config(
                color,
                (outer_opacity - inner_opacity_offset).max(0.0),
                &config.material,
            ),
            handle: None,
        };

        Self {
            state,
            geometry,
            color,
            dynamics: Dynamics::from_seed(state_seed(state)),
            phase: state_phase(state),
            inner_ratio,
            inner_opacity_offset,
            transform: Transform::default(),
            outer,
            inner,
            scale_base: BASELINE_SCALE,
            opacity_base: outer_opacity,
            visible: false,
        }
    }

    pub fn state(&self) -> VisualState {
        self.state
    }

    pub fn geometry(&self) -> &UnpackedMesh {
        &self.geometry
    }

    pub fn color(&self) -> u32 {
        self.color
    }

    pub fn dynamics(&self) -> &Dynamics {
        &self.dynamics
    }

    /// Pulse phase offset of this group
    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn inner_ratio(&self) -> f32 {
        self.inner_ratio
    }

    pub fn scale_base(&self) -> f32 {
        self.scale_base
    }

    pub fn opacity_base(&self) -> f32 {
        self.opacity_base
    }

    /// Resting opacity of the inner mesh for the current base
    pub fn inner_opacity_base(&self) -> f32 {
        (self.opacity_base - self.inner_opacity_offset).max(0.0)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Both meshes have renderer handles
    pub fn is_ready(&self) -> bool {
        self.outer.handle.is_some() && self.inner.handle.is_some()
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Set the blend scale and apply it to both meshes
    pub(crate) fn set_scale(&mut self, scale: f32) {
        self.scale_base = scale;
        self.outer.transform.scale = scale;
        self.inner.transform.scale = scale * self.inner_ratio;
    }

    /// Set the blend opacity and apply it to both meshes
    pub(crate) fn set_opacity(&mut self, opacity: f32) {
        self.opacity_base = opacity;
        self.outer.material.opacity = opacity;
        self.inner.material.opacity = self.inner_opacity_base();
    }

    /// Baseline look of the current group
    pub(crate) fn reset_visual(&mut self, baseline_opacity: f32) {
        self.set_scale(BASELINE_SCALE);
        self.set_opacity(baseline_opacity);
        self.visible = true;
    }

    /// Hidden, fully faded look
    pub(crate) fn fade_out(&mut self) {
        self.set_scale(FADED_SCALE);
        self.set_opacity(FADED_OPACITY);
        self.visible = false;
    }

    /// Model matrix of the outer mesh
    pub fn outer_matrix(&self) -> Mat4 {
        self.transform.matrix() * self.outer.transform.matrix()
    }

    /// Model matrix of the inner mesh
    pub fn inner_matrix(&self) -> Mat4 {
        self.transform.matrix() * self.inner.transform.matrix()
    }

    fn mount(&mut self, sink: &mut dyn MeshSink) {
        if self.outer.handle.is_none() {
            self.outer.handle = sink.upload(&self.geometry);
        }
        if self.inner.handle.is_none() {
            self.inner.handle = sink.upload(&self.geometry);
        }
    }

    fn dispose(&mut self, sink: &mut dyn MeshSink) {
        for handle in [self.outer.handle.take(), self.inner.handle.take()]
            .into_iter()
            .flatten()
        {
            sink.release(handle);
        }
    }
}

/// Wireframe color of each state
pub fn state_color(state: VisualState) -> u32 {
    match state {
        VisualState::Idle => 0x1E_C8_FF,
        VisualState::Yes => 0xFF_D4_00,
        VisualState::No => 0xFF_6A_00,
    }
}

/// Dynamics seed of each state
pub fn state_seed(state: VisualState) -> u32 {
    match state {
        VisualState::Idle => 101,
        VisualState::Yes => 202,
        VisualState::No => 303,
    }
}

/// Pulse phase of each state, so the groups never pulse in sync
pub fn state_phase(state: VisualState) -> f32 {
    match state {
        VisualState::Idle => 0.0,
        VisualState::Yes => 0.6,
        VisualState::No => 1.2,
    }
}

/// The whole widget: three groups plus the transition state
pub struct BitScene {
    config: BitConfig,
    groups: [ShapeGroup; 3],
    transition: TransitionState,
    /// Request received before the scene was ready
    pending: Option<VisualState>,
}

impl BitScene {
    /// Build all geometry; the scene starts steady in `Idle`
    pub fn new(config: BitConfig) -> Self {
        let geo = &config.geometry;
        let idle = build_idle_geometry(geo.idle_size, geo.idle_shape);
        let yes = build_yes_geometry(geo.yes_size);
        let no = build_no_geometry(
            geo.no_size,
            geo.no_detail,
            geo.no_min_amp,
            geo.no_max_amp,
            geo.no_seed,
        );

        let mut groups = [
            ShapeGroup::new(VisualState::Idle, idle, &config),
            ShapeGroup::new(VisualState::Yes, yes, &config),
            ShapeGroup::new(VisualState::No, no, &config),
        ];

        groups[VisualState::Idle.index()].reset_visual(config.material.outer_opacity);
        groups[VisualState::Yes.index()].fade_out();
        groups[VisualState::No.index()].fade_out();

        debug!(
            idle_vertices = groups[0].geometry.vertex_count(),
            yes_vertices = groups[1].geometry.vertex_count(),
            no_vertices = groups[2].geometry.vertex_count(),
            "Built Bit geometry"
        );

        Self {
            config,
            groups,
            transition: TransitionState::default(),
            pending: None,
        }
    }

    pub fn config(&self) -> &BitConfig {
        &self.config
    }

    pub fn transition(&self) -> &TransitionState {
        &self.transition
    }

    pub fn current_state(&self) -> VisualState {
        self.transition.current()
    }

    pub fn target_state(&self) -> VisualState {
        self.pending.unwrap_or(self.transition.target())
    }

    pub fn groups(&self) -> &[ShapeGroup; 3] {
        &self.groups
    }

    pub fn group(&self, state: VisualState) -> &ShapeGroup {
        &self.groups[state.index()]
    }

    /// States whose group is currently drawn
    pub fn visible_states(&self) -> Vec<VisualState> {
        self.groups
            .iter()
            .filter(|g| g.visible)
            .map(|g| g.state)
            .collect()
    }

    /// Every mesh has a renderer handle
    pub fn is_ready(&self) -> bool {
        self.groups.iter().all(ShapeGroup::is_ready)
    }

    /// Upload any geometry that has no handle yet; returns `is_ready()`
    pub fn mount(&mut self, sink: &mut dyn MeshSink) -> bool {
        for group in &mut self.groups {
            group.mount(sink);
        }
        let ready = self.is_ready();
        debug!(ready, "Mounted Bit scene");
        ready
    }

    /// Release every renderer handle; safe to call more than once
    pub fn dispose(&mut self, sink: &mut dyn MeshSink) {
        for group in &mut self.groups {
            group.dispose(sink);
        }
        debug!("Disposed Bit scene");
    }

    /// Request a new visual state
    ///
    /// Returns `false` when the scene is not ready; the request is kept and
    /// applied on the first ready `update`.
    pub fn set_target_state(&mut self, state: VisualState) -> bool {
        if !self.is_ready() {
            debug!(%state, "Scene not ready, deferring state request");
            self.pending = Some(state);
            return false;
        }
        self.pending = None;
        self.apply_request(state);
        true
    }

    fn apply_request(&mut self, state: VisualState) {
        let baseline = self.config.material.outer_opacity;
        match self.transition.request(state) {
            Retarget::Unchanged => {}
            Retarget::Started { from, to } => {
                debug!(%from, %to, "Transition started");
                self.groups[from.index()].set_visible(true);
                let to = &mut self.groups[to.index()];
                to.set_scale(FADED_SCALE);
                to.set_opacity(FADED_OPACITY);
                to.set_visible(true);
            }
            Retarget::Redirected {
                from,
                abandoned,
                to,
            } => {
                debug!(%from, %abandoned, %to, "Transition redirected");
                self.groups[abandoned.index()].fade_out();
                let to = &mut self.groups[to.index()];
                to.set_scale(FADED_SCALE);
                to.set_opacity(FADED_OPACITY);
                to.set_visible(true);
            }
            Retarget::Cancelled { current, abandoned } => {
                debug!(%current, %abandoned, "Transition cancelled");
                self.groups[abandoned.index()].fade_out();
                self.groups[current.index()].reset_visual(baseline);
            }
        }
    }

    /// Advance one frame; a no-op returning `false` until the scene is ready
    pub fn update(&mut self, frame: FrameTime) -> bool {
        if !self.is_ready() {
            return false;
        }
        if let Some(state) = self.pending.take() {
            self.apply_request(state);
        }
        animation::animate_frame(&mut self.groups, &mut self.transition, frame, &self.config);
        true
    }

    /// Serializable view of the scene for renderers, logs and tests
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            current: self.transition.current(),
            target: self.target_state(),
            progress: self.transition.progress(),
            groups: self
                .groups
                .iter()
                .map(|g| GroupSnapshot {
                    state: g.state,
                    visible: g.visible,
                    scale_base: g.scale_base,
                    opacity_base: g.opacity_base,
                    transform: g.transform,
                    outer: g.outer.clone(),
                    inner: g.inner.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot {
    pub current: VisualState,
    pub target: VisualState,
    pub progress: f32,
    pub groups: Vec<GroupSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupSnapshot {
    pub state: VisualState,
    pub visible: bool,
    pub scale_base: f32,
    pub opacity_base: f32,
    pub transform: Transform,
    pub outer: MeshInstance,
    pub inner: MeshInstance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingSink {
        next: u32,
        live: Vec<MeshHandle>,
        released: Vec<MeshHandle>,
        refuse: bool,
    }

    impl MeshSink for CountingSink {
        fn upload(&mut self, _mesh: &UnpackedMesh) -> Option<MeshHandle> {
            if self.refuse {
                return None;
            }
            self.next += 1;
            let handle = MeshHandle(self.next);
            self.live.push(handle);
            Some(handle)
        }

        fn release(&mut self, handle: MeshHandle) {
            self.live.retain(|h| *h != handle);
            self.released.push(handle);
        }
    }

    #[test]
    fn test_new_scene_shows_only_idle() {
        let scene = BitScene::new(BitConfig::default());
        assert_eq!(scene.visible_states(), vec![VisualState::Idle]);

        let idle = scene.group(VisualState::Idle);
        assert_eq!(idle.scale_base(), 1.0);
        assert!((idle.opacity_base() - 0.9).abs() < 1e-6);
        assert!((idle.inner.transform.scale - 0.75).abs() < 1e-6);
        assert!((idle.inner.material.opacity - 0.65).abs() < 1e-6);

        let yes = scene.group(VisualState::Yes);
        assert!((yes.scale_base() - 0.6).abs() < 1e-6);
        assert!((yes.opacity_base() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_group_constants() {
        let scene = BitScene::new(BitConfig::default());
        assert_eq!(scene.group(VisualState::Idle).color(), 0x1EC8FF);
        assert_eq!(scene.group(VisualState::Yes).color(), 0xFFD400);
        assert_eq!(scene.group(VisualState::No).color(), 0xFF6A00);
        assert_eq!(
            *scene.group(VisualState::No).dynamics(),
            Dynamics::from_seed(303)
        );
        assert_eq!(scene.group(VisualState::No).geometry().vertex_count(), 540);
    }

    #[test]
    fn test_mount_and_dispose_release_each_handle_once() {
        let mut sink = CountingSink::default();
        let mut scene = BitScene::new(BitConfig::default());

        assert!(scene.mount(&mut sink));
        assert_eq!(sink.live.len(), 6);

        scene.dispose(&mut sink);
        scene.dispose(&mut sink);
        assert!(sink.live.is_empty());
        assert_eq!(sink.released.len(), 6);
        assert!(!scene.is_ready());
    }

    #[test]
    fn test_mount_retries_missing_uploads() {
        let mut sink = CountingSink {
            refuse: true,
            ..Default::default()
        };
        let mut scene = BitScene::new(BitConfig::default());
        assert!(!scene.mount(&mut sink));

        sink.refuse = false;
        assert!(scene.mount(&mut sink));
        assert!(scene.mount(&mut sink));
        assert_eq!(sink.live.len(), 6);
    }

    #[test]
    fn test_unready_scene_defers_request() {
        let mut sink = CountingSink::default();
        let mut scene = BitScene::new(BitConfig::default());

        assert!(!scene.set_target_state(VisualState::Yes));
        assert!(!scene.update(FrameTime::new(0.0, 0.016)));
        assert_eq!(scene.visible_states(), vec![VisualState::Idle]);
        assert_eq!(scene.target_state(), VisualState::Yes);

        scene.mount(&mut sink);
        assert!(scene.update(FrameTime::new(0.016, 0.016)));
        assert!(scene.transition().is_transitioning());
        assert_eq!(scene.visible_states().len(), 2);
    }

    #[test]
    fn test_inner_matrix_includes_group_transform() {
        let mut scene = BitScene::new(BitConfig::default());
        let idle = &mut scene.groups[0];
        idle.transform.translation = Vec3::new(0.0, 0.5, 0.0);
        let origin = idle.inner_matrix().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, 0.5, 0.0)).length() < 1e-6);
        let unit = idle.inner_matrix().transform_vector3(Vec3::X);
        assert!((unit.length() - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_snapshot_serializes() {
        let scene = BitScene::new(BitConfig::default());
        let json = serde_json::to_value(scene.snapshot()).unwrap();
        assert_eq!(json["current"], "idle");
        assert_eq!(json["groups"].as_array().unwrap().len(), 3);
        assert_eq!(json["groups"][1]["visible"], false);
    }
}
