pub mod chart;
pub mod cli;
pub mod core;
pub mod error;
pub mod geometry;
pub mod math;
pub mod render;
pub mod scenes;

pub use error::Error;
pub use scenes::{
    create_dashboard_scene, create_hero_scene, create_signature_scene, create_starfield_scene,
    dashboard_chart,
};
