use crate::chart::{ChartSpec, ChartStyle, Padding, Series};
use crate::core::{CameraConfig, SceneConfig};
use crate::math::Rgba;

/// Backdrop for the dashboard: nothing animates, the scene only clears to
/// the page background behind the chart overlay.
pub fn create_dashboard_scene() -> SceneConfig {
    SceneConfig {
        name: "dashboard".to_string(),
        clock_step: 0.005,
        clear_color: Rgba::from_hex(0x0a0c14, 1.0),
        camera: CameraConfig {
            fov_y_deg: 60.0,
            distance: 10.0,
            near: 0.1,
            far: 100.0,
        },
        point_layers: Vec::new(),
        elements: Vec::new(),
    }
}

/// Dashboard mock: monthly volume for three tiers on a shared axis, the
/// top series carrying a slightly stronger fill.
pub fn dashboard_chart() -> ChartSpec {
    ChartSpec {
        labels: ["1", "5", "10", "15", "20", "25", "30"]
            .map(String::from)
            .to_vec(),
        series: vec![
            Series {
                values: vec![12.0, 18.0, 15.0, 22.0, 28.0, 25.0, 32.0],
                color: Rgba::from_hex(0x6366f1, 1.0),
                fill: Some(Rgba::from_hex(0x6366f1, 0.12)),
            },
            Series {
                values: vec![8.0, 10.0, 14.0, 16.0, 20.0, 22.0, 24.0],
                color: Rgba::from_hex(0x14b8a6, 1.0),
                fill: Some(Rgba::from_hex(0x14b8a6, 0.08)),
            },
            Series {
                values: vec![5.0, 7.0, 9.0, 11.0, 14.0, 16.0, 19.0],
                color: Rgba::from_hex(0xec4899, 1.0),
                fill: Some(Rgba::from_hex(0xec4899, 0.08)),
            },
        ],
        y_min: 0.0,
        y_max: 36.0,
        padding: Padding {
            top: 10.0,
            right: 10.0,
            bottom: 24.0,
            left: 36.0,
        },
        grid_rows: 4,
        style: ChartStyle::default(),
    }
}
