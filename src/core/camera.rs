use glam::{Mat4, Vec3};

use crate::error::Error;

/// Fixed perspective camera on the +z axis looking at the origin.
/// Scenes only ever vary the field of view and the eye distance; the
/// aspect ratio tracks the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    fov_y_deg: f32,
    distance: f32,
    near: f32,
    far: f32,
    aspect: f32,
}

impl Camera {
    pub fn new(fov_y_deg: f32, distance: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_deg,
            distance,
            near,
            far,
            aspect: 1.0,
        }
    }

    /// Recompute the aspect ratio for a new viewport. Zero dimensions are
    /// rejected; repeating the same size is a harmless no-op.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidViewport { width, height });
        }
        self.aspect = width as f32 / height as f32;
        Ok(())
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn view_proj(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(
            self.fov_y_deg.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
        let view = Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y);
        proj * view
    }
}
