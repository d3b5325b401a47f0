//! The seam between the scene loop and whatever draws it.
//!
//! The loop produces a [`SceneFrame`] per step; a [`FrameSink`] consumes it.
//! Sinks never reach back into the scene, so the loop stays testable with a
//! recording sink and the GPU backend stays swappable.

use glam::{Mat4, Vec3};

use crate::core::{DrawMode, Shape};
use crate::error::Error;
use crate::math::Rgba;

/// Per-frame view of one point field, borrowed from the scene.
#[derive(Debug)]
pub struct PointFieldFrame<'a> {
    pub positions: &'a [Vec3],
    /// Effective color for this frame, twinkle already applied.
    pub color: Rgba,
    /// World-space point size.
    pub size: f32,
    /// Whether positions changed since the previous frame. Sinks skip the
    /// upload when this is false.
    pub dirty: bool,
}

/// Per-frame view of one rigid element. The shape is constant for the
/// element's lifetime; sinks key their mesh caches on it.
#[derive(Debug, Clone, Copy)]
pub struct ElementFrame {
    pub shape: Shape,
    pub model: Mat4,
    /// Effective color for this frame, opacity pulse already applied.
    pub color: Rgba,
    pub mode: DrawMode,
}

/// Everything a sink needs to draw one frame of a scene.
#[derive(Debug)]
pub struct SceneFrame<'a> {
    pub view_proj: Mat4,
    pub clear: Rgba,
    pub points: Vec<PointFieldFrame<'a>>,
    pub elements: Vec<ElementFrame>,
}

/// Submission target for the scene loop.
///
/// `resize` must reject zero dimensions and tolerate repeated calls with
/// the same size; `submit` is fire-and-forget, once per display refresh.
pub trait FrameSink {
    fn resize(&mut self, width: u32, height: u32) -> Result<(), Error>;
    fn submit(&mut self, frame: &SceneFrame<'_>) -> Result<(), Error>;
}
