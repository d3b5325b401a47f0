use crate::core::{
    CameraConfig, DrawMode, ElementConfig, FieldConfig, InfluenceFollow, PointLayerConfig, Pulse,
    SceneConfig, Shape,
};
use crate::math::Rgba;

/// Hero banner: a slow drift of dust around a spinning wireframe torus
/// knot that leans toward the pointer.
pub fn create_hero_scene() -> SceneConfig {
    SceneConfig {
        name: "hero".into(),
        clock_step: 0.005,
        clear_color: Rgba::from_hex(0x0a0c14, 1.0),
        camera: CameraConfig {
            fov_y_deg: 60.0,
            distance: 28.0,
            near: 0.1,
            far: 1000.0,
        },
        point_layers: vec![PointLayerConfig {
            field: FieldConfig::Drift {
                count: 220,
                min: [-25.0, -20.0, -15.0],
                max: [25.0, 20.0, 5.0],
                speed: [0.002, 0.002, 0.001],
                seed: None,
            },
            color: Rgba::from_hex(0x4a5068, 0.6),
            size: 0.12,
            twinkle: None,
        }],
        elements: vec![ElementConfig {
            shape: Shape::TorusKnot {
                radius: 4.2,
                tube: 1.1,
                tubular_segments: 140,
                radial_segments: 18,
            },
            mode: DrawMode::Wireframe,
            color: Rgba::from_hex(0x6366f1, 0.18),
            position: [0.0, 0.0, 0.0],
            spin: [0.003, 0.006, 0.002],
            follow: InfluenceFollow {
                position: [1.5, -1.2],
                rotation: [0.0, 0.0],
                smoothing: 0.02,
            },
            scale_pulse: Some(Pulse::new(0.04, 1.0)),
            opacity_pulse: None,
        }],
    }
}
