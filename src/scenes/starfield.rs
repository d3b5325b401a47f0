use crate::core::{
    CameraConfig, DrawMode, ElementConfig, FieldConfig, InfluenceFollow, PointLayerConfig, Pulse,
    SceneConfig, Shape,
};
use crate::math::Rgba;

/// Closing banner: a static starfield that twinkles in unison behind two
/// barely-there nebula shells rotating in opposite directions.
pub fn create_starfield_scene() -> SceneConfig {
    SceneConfig {
        name: "starfield".into(),
        clock_step: 0.003,
        clear_color: Rgba::from_hex(0x0a0c14, 1.0),
        camera: CameraConfig {
            fov_y_deg: 60.0,
            distance: 30.0,
            near: 0.1,
            far: 400.0,
        },
        point_layers: vec![PointLayerConfig {
            // Zero speed: the stars never drift, only the opacity moves.
            field: FieldConfig::Drift {
                count: 300,
                min: [-30.0, -20.0, -25.0],
                max: [30.0, 20.0, 5.0],
                speed: [0.0, 0.0, 0.0],
                seed: None,
            },
            color: Rgba::new(1.0, 1.0, 1.0, 0.3),
            size: 0.08,
            twinkle: Some(Pulse::new(0.1, 2.0)),
        }],
        elements: vec![
            ElementConfig {
                shape: Shape::Sphere {
                    radius: 12.0,
                    sectors: 16,
                    stacks: 16,
                },
                mode: DrawMode::Emissive,
                color: Rgba::from_hex(0x6366f1, 0.015),
                position: [-5.0, -3.0, -5.0],
                spin: [0.0, 0.002, 0.0],
                follow: InfluenceFollow::default(),
                scale_pulse: None,
                opacity_pulse: None,
            },
            ElementConfig {
                shape: Shape::Sphere {
                    radius: 10.0,
                    sectors: 16,
                    stacks: 16,
                },
                mode: DrawMode::Emissive,
                color: Rgba::from_hex(0x8b5cf6, 0.01),
                position: [6.0, 2.0, -8.0],
                spin: [0.0, -0.0015, 0.0],
                follow: InfluenceFollow::default(),
                scale_pulse: None,
                opacity_pulse: None,
            },
        ],
    }
}
