pub mod camera;
pub mod clock;
pub mod element;
pub mod influence;
pub mod points;
pub mod renderer;
pub mod scene;

pub use camera::Camera;
pub use clock::{FpsCounter, SceneClock};
pub use element::{DrawMode, InfluenceFollow, Pulse, RigidElement, Shape};
pub use influence::{Influence, InfluenceTracker, Region};
pub use points::{MorphCloud, PointCloud, PointField};
pub use renderer::{ElementFrame, FrameSink, PointFieldFrame, SceneFrame};
pub use scene::{
    CameraConfig, ElementConfig, FieldConfig, LoopState, PointLayerConfig, Scene, SceneConfig,
};
