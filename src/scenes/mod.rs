mod dashboard;
mod hero;
mod signature;
mod starfield;

pub use dashboard::{create_dashboard_scene, dashboard_chart};
pub use hero::create_hero_scene;
pub use signature::create_signature_scene;
pub use starfield::create_starfield_scene;
