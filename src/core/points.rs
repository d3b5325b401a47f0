use glam::Vec3;

use crate::error::Error;
use crate::math::Bounds3;

/// Drifting point field: index-aligned position and velocity buffers plus
/// the wrap volume positions re-enter through.
#[derive(Debug, Clone)]
pub struct PointCloud {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    bounds: Bounds3,
    dirty: bool,
}

impl PointCloud {
    /// Rejects buffers of different lengths. Velocities are fixed for the
    /// life of the cloud; only positions move.
    pub fn new(positions: Vec<Vec3>, velocities: Vec<Vec3>, bounds: Bounds3) -> Result<Self, Error> {
        if positions.len() != velocities.len() {
            return Err(Error::MismatchedBuffers {
                positions: positions.len(),
                velocities: velocities.len(),
            });
        }
        Ok(Self {
            positions,
            velocities,
            bounds,
            dirty: true,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn bounds(&self) -> Bounds3 {
        self.bounds
    }

    /// One advection step: every position gains its velocity, then wraps
    /// through the bounds. An empty cloud is a no-op.
    pub fn advect(&mut self) {
        if self.positions.is_empty() {
            return;
        }
        let bounds = self.bounds;
        for (p, v) in self.positions.iter_mut().zip(&self.velocities) {
            *p = bounds.wrap(*p + *v);
        }
        self.dirty = true;
    }

    /// Whether positions changed since this was last called. Clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

/// Point field that shimmers around fixed base vertices instead of drifting.
///
/// Each vertex is displaced from its base by per-axis sinusoids whose phase
/// is offset by the vertex index, scaled by the tracker's scroll progress.
/// At progress 0 the positions coincide with the base exactly.
#[derive(Debug, Clone)]
pub struct MorphCloud {
    base: Vec<Vec3>,
    positions: Vec<Vec3>,
    amplitude: Vec3,
    frequency: Vec3,
    dirty: bool,
}

impl MorphCloud {
    pub fn new(base: Vec<Vec3>, amplitude: Vec3, frequency: Vec3) -> Self {
        let positions = base.clone();
        Self {
            base,
            positions,
            amplitude,
            frequency,
            dirty: true,
        }
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn base(&self) -> &[Vec3] {
        &self.base
    }

    /// Recompute every position from its base vertex. The base itself is
    /// never modified, so the displacement does not accumulate over steps.
    pub fn update(&mut self, phase: f32, progress: f32) {
        for (i, (p, b)) in self.positions.iter_mut().zip(&self.base).enumerate() {
            let k = i as f32;
            p.x = b.x + (phase * self.frequency.x + k).sin() * self.amplitude.x * progress;
            p.y = b.y + (phase * self.frequency.y + k).cos() * self.amplitude.y * progress;
            p.z = b.z + (phase * self.frequency.z + k).sin() * self.amplitude.z * progress;
        }
        self.dirty = true;
    }

    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

/// One renderable field of points within a scene.
#[derive(Debug, Clone)]
pub enum PointField {
    Drift(PointCloud),
    Morph(MorphCloud),
}

impl PointField {
    pub fn len(&self) -> usize {
        match self {
            Self::Drift(cloud) => cloud.len(),
            Self::Morph(cloud) => cloud.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn positions(&self) -> &[Vec3] {
        match self {
            Self::Drift(cloud) => cloud.positions(),
            Self::Morph(cloud) => cloud.positions(),
        }
    }

    pub fn take_dirty(&mut self) -> bool {
        match self {
            Self::Drift(cloud) => cloud.take_dirty(),
            Self::Morph(cloud) => cloud.take_dirty(),
        }
    }
}
