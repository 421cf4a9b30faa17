//! Easing and blend helpers

/// Ease-in-out cubic on [0, 1]; input outside the range is clamped
pub fn ease_in_out_cubic(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        1.0 - (-2.0 * x + 2.0).powi(3) / 2.0
    }
}

/// Scale and opacity of both groups at eased progress `e`
///
/// The outgoing group shrinks 1.0 -> 0.6 and fades 1.0 -> 0.1; the incoming
/// group does the reverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossfadeFrame {
    pub from_scale: f32,
    pub to_scale: f32,
    pub from_opacity: f32,
    pub to_opacity: f32,
}

/// Scale of a group that is fully faded out
pub const FADED_SCALE: f32 = 0.6;

/// Opacity of a group that is fully faded out
pub const FADED_OPACITY: f32 = 0.1;

impl CrossfadeFrame {
    pub fn at(e: f32) -> Self {
        Self {
            from_scale: 1.0 - (1.0 - FADED_SCALE) * e,
            to_scale: FADED_SCALE + (1.0 - FADED_SCALE) * e,
            from_opacity: 1.0 - (1.0 - FADED_OPACITY) * e,
            to_opacity: FADED_OPACITY + (1.0 - FADED_OPACITY) * e,
        }
    }
}
