mod bounds;
mod color;

pub use bounds::Bounds3;
pub use color::Rgba;
