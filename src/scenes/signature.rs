use crate::core::{
    CameraConfig, DrawMode, ElementConfig, FieldConfig, InfluenceFollow, PointLayerConfig, Pulse,
    SceneConfig, Shape,
};
use crate::math::Rgba;

/// Signature piece: an icosahedron drawn three ways - glowing vertices
/// that shimmer as the section scrolls in, a pulsing wireframe shell, and
/// a dark solid core. Shell and core share one motion, so they are two
/// elements with identical spin and follow parameters.
pub fn create_signature_scene() -> SceneConfig {
    let ico = Shape::Icosahedron {
        radius: 3.0,
        subdivisions: 1,
    };
    // The shell turns at 0.4/0.6 rad per phase unit; with the 0.008 clock
    // that is 0.0032/0.0048 rad per step. Pointer tilt lands unsmoothed.
    let spin = [0.0032, 0.0048, 0.0];
    let follow = InfluenceFollow {
        position: [0.0, 0.0],
        rotation: [0.3, 0.4],
        smoothing: 1.0,
    };
    let breathe = Some(Pulse::new(0.03, 2.0));

    SceneConfig {
        name: "signature".into(),
        clock_step: 0.008,
        clear_color: Rgba::from_hex(0x0a0c14, 1.0),
        camera: CameraConfig {
            fov_y_deg: 50.0,
            distance: 9.0,
            near: 0.1,
            far: 100.0,
        },
        point_layers: vec![PointLayerConfig {
            field: FieldConfig::Morph {
                shape: ico,
                amplitude: [0.08, 0.08, 0.06],
                frequency: [3.0, 2.0, 1.5],
            },
            color: Rgba::from_hex(0x818cf8, 0.7),
            size: 0.2,
            twinkle: None,
        }],
        elements: vec![
            ElementConfig {
                shape: ico,
                mode: DrawMode::Wireframe,
                color: Rgba::from_hex(0x6366f1, 0.45),
                position: [0.0, 0.0, 0.0],
                spin,
                follow,
                scale_pulse: breathe,
                opacity_pulse: Some(Pulse::new(0.1, 1.5)),
            },
            ElementConfig {
                shape: ico,
                mode: DrawMode::Solid,
                color: Rgba::from_hex(0x1a1d2e, 0.6),
                position: [0.0, 0.0, 0.0],
                spin,
                follow,
                scale_pulse: breathe,
                opacity_pulse: None,
            },
        ],
    }
}
