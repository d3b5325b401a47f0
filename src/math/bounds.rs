use glam::Vec3;

use crate::error::Error;

/// Axis-aligned wrap volume for drifting points.
///
/// A coordinate that reaches or passes a face re-enters at the opposite
/// face, so the box behaves as a torus in all three axes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds3 {
    /// Rejects any axis where min does not lie strictly below max.
    pub fn new(min: Vec3, max: Vec3) -> Result<Self, Error> {
        for (axis, lo, hi) in [
            ('x', min.x, max.x),
            ('y', min.y, max.y),
            ('z', min.z, max.z),
        ] {
            if !(lo < hi) {
                return Err(Error::InvalidBounds { axis, min: lo, max: hi });
            }
        }
        Ok(Self { min, max })
    }

    /// Box spanning +/- half_extent around the origin.
    pub fn symmetric(half_extent: Vec3) -> Result<Self, Error> {
        Self::new(-half_extent, half_extent)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Toroidal re-entry: a coordinate at or beyond max snaps to min, at or
    /// beyond min snaps to max. Interior coordinates pass through unchanged.
    pub fn wrap(&self, p: Vec3) -> Vec3 {
        let mut p = p;
        if p.x >= self.max.x {
            p.x = self.min.x;
        } else if p.x <= self.min.x {
            p.x = self.max.x;
        }
        if p.y >= self.max.y {
            p.y = self.min.y;
        } else if p.y <= self.min.y {
            p.y = self.max.y;
        }
        if p.z >= self.max.z {
            p.z = self.min.z;
        } else if p.z <= self.min.z {
            p.z = self.max.z;
        }
        p
    }
}
