use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::Influence;
use crate::math::Rgba;

/// Sinusoidal modulation of a scalar around its base value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    pub amplitude: f32,
    pub frequency: f32,
}

impl Pulse {
    pub fn new(amplitude: f32, frequency: f32) -> Self {
        Self {
            amplitude,
            frequency,
        }
    }

    /// Offset contributed at the given clock phase.
    pub fn eval(&self, phase: f32) -> f32 {
        self.amplitude * (phase * self.frequency).sin()
    }
}

/// Geometry a rigid element refers to. Tessellation happens in whichever
/// backend draws the element; the loop only tracks the parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    TorusKnot {
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
    },
    Icosahedron {
        radius: f32,
        subdivisions: u32,
    },
    Sphere {
        radius: f32,
        sectors: u32,
        stacks: u32,
    },
}

/// How the backend draws an element's surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawMode {
    /// Every unique triangle edge as a line.
    Wireframe,
    /// Shaded triangles.
    Solid,
    /// Flat unlit triangles, used for the translucent haze shells.
    Emissive,
}

/// How influence steers an element. Targets are the influence axes times
/// these weights; the element approaches each target exponentially at
/// `smoothing` per step rather than snapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfluenceFollow {
    /// Position offset target per unit influence: x weight applies to
    /// pointer x, y weight to pointer y.
    pub position: [f32; 2],
    /// Rotation offset target in radians per unit influence: x-axis tilt
    /// follows pointer y, y-axis turn follows pointer x.
    pub rotation: [f32; 2],
    /// Fraction of the remaining gap closed each step, in (0, 1].
    pub smoothing: f32,
}

impl Default for InfluenceFollow {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0],
            rotation: [0.0, 0.0],
            smoothing: 0.02,
        }
    }
}

/// A rigid shape advanced every step by constant spin, smoothed influence
/// follow, and optional scale/opacity pulses.
#[derive(Debug, Clone)]
pub struct RigidElement {
    shape: Shape,
    mode: DrawMode,
    color: Rgba,
    anchor: Vec3,
    spin: Vec3,
    follow: InfluenceFollow,
    scale_pulse: Option<Pulse>,
    opacity_pulse: Option<Pulse>,
    rotation: Vec3,
    position_offset: Vec3,
    rotation_offset: Vec3,
    scale: f32,
    opacity: f32,
}

impl RigidElement {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        shape: Shape,
        mode: DrawMode,
        color: Rgba,
        anchor: Vec3,
        spin: Vec3,
        follow: InfluenceFollow,
        scale_pulse: Option<Pulse>,
        opacity_pulse: Option<Pulse>,
    ) -> Self {
        Self {
            shape,
            mode,
            color,
            anchor,
            spin,
            follow,
            scale_pulse,
            opacity_pulse,
            rotation: Vec3::ZERO,
            position_offset: Vec3::ZERO,
            rotation_offset: Vec3::ZERO,
            scale: 1.0,
            opacity: color.a,
        }
    }

    /// Advance one step at the given phase and influence sample.
    ///
    /// Spin accumulates unconditionally; the influence offsets close a
    /// fixed fraction of their remaining gap, so the response trails the
    /// pointer instead of snapping to it.
    pub fn advance(&mut self, phase: f32, influence: Influence) {
        self.rotation += self.spin;

        let k = self.follow.smoothing;
        let position_target = Vec3::new(
            influence.x * self.follow.position[0],
            influence.y * self.follow.position[1],
            0.0,
        );
        self.position_offset += (position_target - self.position_offset) * k;

        let rotation_target = Vec3::new(
            influence.y * self.follow.rotation[0],
            influence.x * self.follow.rotation[1],
            0.0,
        );
        self.rotation_offset += (rotation_target - self.rotation_offset) * k;

        self.scale = 1.0 + self.scale_pulse.map_or(0.0, |p| p.eval(phase));
        self.opacity = (self.color.a + self.opacity_pulse.map_or(0.0, |p| p.eval(phase)))
            .clamp(0.0, 1.0);
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    /// Anchor plus the smoothed influence offset.
    pub fn position(&self) -> Vec3 {
        self.anchor + self.position_offset
    }

    /// Accumulated spin plus the smoothed influence tilt, as XYZ Euler angles.
    pub fn rotation(&self) -> Vec3 {
        self.rotation + self.rotation_offset
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Base color with the current pulsed alpha applied.
    pub fn color(&self) -> Rgba {
        self.color.with_alpha(self.opacity)
    }

    pub fn model_matrix(&self) -> Mat4 {
        let r = self.rotation();
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.position(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_knot() -> Shape {
        Shape::TorusKnot {
            radius: 4.2,
            tube: 1.1,
            tubular_segments: 140,
            radial_segments: 18,
        }
    }

    fn element(follow: InfluenceFollow, spin: Vec3) -> RigidElement {
        RigidElement::new(
            wire_knot(),
            DrawMode::Wireframe,
            Rgba::from_hex(0x6366f1, 1.0),
            Vec3::ZERO,
            spin,
            follow,
            None,
            None,
        )
    }

    #[test]
    fn test_pulse_eval() {
        let pulse = Pulse::new(0.04, 1.0);
        assert_eq!(pulse.eval(0.0), 0.0);
        assert!((pulse.eval(std::f32::consts::FRAC_PI_2) - 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_spin_accumulates_per_step() {
        let spin = Vec3::new(0.003, 0.006, 0.002);
        let mut e = element(InfluenceFollow::default(), spin);

        for _ in 0..10 {
            e.advance(0.0, Influence::default());
        }

        let r = e.rotation();
        assert!((r.x - 0.03).abs() < 1e-6);
        assert!((r.y - 0.06).abs() < 1e-6);
        assert!((r.z - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_position_follow_approaches_target() {
        let follow = InfluenceFollow {
            position: [1.5, -1.2],
            rotation: [0.0, 0.0],
            smoothing: 0.02,
        };
        let mut e = element(follow, Vec3::ZERO);
        let influence = Influence::new(1.0, 1.0, 0.0);

        e.advance(0.0, influence);
        let first = e.position();
        // One step closes 2% of the gap.
        assert!((first.x - 0.03).abs() < 1e-6);
        assert!((first.y + 0.024).abs() < 1e-6);

        for _ in 0..2000 {
            e.advance(0.0, influence);
        }
        let settled = e.position();
        assert!((settled.x - 1.5).abs() < 1e-3);
        assert!((settled.y + 1.2).abs() < 1e-3);
    }

    #[test]
    fn test_follow_decays_when_influence_returns_to_zero() {
        let follow = InfluenceFollow {
            position: [1.5, -1.2],
            rotation: [0.3, 0.4],
            smoothing: 0.02,
        };
        let mut e = element(follow, Vec3::ZERO);

        for _ in 0..500 {
            e.advance(0.0, Influence::new(1.0, -1.0, 0.0));
        }
        assert!(e.position().length() > 0.5);

        for _ in 0..2000 {
            e.advance(0.0, Influence::default());
        }
        assert!(e.position().length() < 1e-3);
        assert!(e.rotation().length() < 1e-3);
    }

    #[test]
    fn test_rotation_follow_axes_cross_pointer_axes() {
        let follow = InfluenceFollow {
            position: [0.0, 0.0],
            rotation: [0.3, 0.4],
            smoothing: 1.0,
        };
        let mut e = element(follow, Vec3::ZERO);

        // Full smoothing snaps in one step, exposing the axis mapping:
        // pointer y drives the x tilt, pointer x drives the y turn.
        e.advance(0.0, Influence::new(1.0, 0.5, 0.0));
        let r = e.rotation();
        assert!((r.x - 0.15).abs() < 1e-6);
        assert!((r.y - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_scale_pulse_oscillates_around_one() {
        let mut e = RigidElement::new(
            wire_knot(),
            DrawMode::Wireframe,
            Rgba::WHITE,
            Vec3::ZERO,
            Vec3::ZERO,
            InfluenceFollow::default(),
            Some(Pulse::new(0.04, 1.0)),
            None,
        );

        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for step in 0..4000 {
            e.advance(step as f32 * 0.005, Influence::default());
            min = min.min(e.scale());
            max = max.max(e.scale());
        }

        assert!(min >= 0.96 - 1e-4);
        assert!(max <= 1.04 + 1e-4);
        assert!(max - min > 0.07, "pulse never swung: {min}..{max}");
    }

    #[test]
    fn test_opacity_pulse_rides_base_alpha() {
        let mut e = RigidElement::new(
            wire_knot(),
            DrawMode::Wireframe,
            Rgba::from_hex(0x8b5cf6, 0.45),
            Vec3::ZERO,
            Vec3::ZERO,
            InfluenceFollow::default(),
            None,
            Some(Pulse::new(0.1, 1.5)),
        );

        for step in 0..1000 {
            e.advance(step as f32 * 0.008, Influence::default());
            let a = e.color().a;
            assert!((0.35 - 1e-4..=0.55 + 1e-4).contains(&a), "alpha {a} out of band");
        }
    }

    #[test]
    fn test_model_matrix_composes_translation() {
        let mut e = RigidElement::new(
            wire_knot(),
            DrawMode::Solid,
            Rgba::WHITE,
            Vec3::new(6.0, 2.0, -8.0),
            Vec3::ZERO,
            InfluenceFollow::default(),
            None,
            None,
        );
        e.advance(0.0, Influence::default());

        let m = e.model_matrix();
        let origin = m.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(6.0, 2.0, -8.0)).length() < 1e-5);
    }
}
