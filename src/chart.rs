//! Static line chart rendered as a display list.
//!
//! Layout runs once against a known surface size and produces draw
//! operations in paint order; any 2D surface can replay them. Nothing here
//! animates, so the output for a given spec and size never changes.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::math::Rgba;

/// Inner padding between the surface edges and the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

/// One plotted series: values over the shared x labels, a stroke color,
/// and an optional gradient fill down to the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub values: Vec<f32>,
    pub color: Rgba,
    /// Gradient color at the plot top; the fill fades to transparent at
    /// the baseline.
    #[serde(default)]
    pub fill: Option<Rgba>,
}

/// Cosmetic knobs with the stock look as defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub grid_color: Rgba,
    pub grid_width: f32,
    pub label_color: Rgba,
    pub label_size: f32,
    /// Distance from the plot baseline down to the label anchors.
    pub label_offset: f32,
    pub stroke_width: f32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            grid_color: Rgba::new(1.0, 1.0, 1.0, 0.04),
            grid_width: 0.8,
            label_color: Rgba::from_hex(0x3a3f52, 1.0),
            label_size: 9.0,
            label_offset: 14.0,
            stroke_width: 1.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    pub y_min: f32,
    pub y_max: f32,
    pub padding: Padding,
    /// Number of bands between horizontal gridlines; lines drawn is one more.
    pub grid_rows: u32,
    #[serde(default)]
    pub style: ChartStyle,
}

/// Draw operations for a 2D surface, already in paint order: grid, labels,
/// then each series as fill-under-stroke.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartOp {
    GridLine {
        x0: f32,
        x1: f32,
        y: f32,
        color: Rgba,
        width: f32,
    },
    /// Horizontally centered text anchor.
    Label {
        text: String,
        x: f32,
        y: f32,
        color: Rgba,
        size: f32,
    },
    /// Region between the polyline and the baseline, shaded top-down from
    /// `color` at `y_top` to transparent at `y_base`.
    FillPath {
        points: Vec<[f32; 2]>,
        y_top: f32,
        y_base: f32,
        color: Rgba,
    },
    StrokePath {
        points: Vec<[f32; 2]>,
        color: Rgba,
        width: f32,
    },
}

/// Lay out a spec against a surface and emit its display list.
pub fn render(spec: &ChartSpec, width: f32, height: f32) -> Result<Vec<ChartOp>, Error> {
    if spec.labels.len() < 2 {
        return Err(Error::InvalidChart(format!(
            "need at least 2 labels for an x axis, got {}",
            spec.labels.len()
        )));
    }
    if spec.series.is_empty() {
        return Err(Error::InvalidChart("no series to plot".into()));
    }
    for (i, series) in spec.series.iter().enumerate() {
        if series.values.len() != spec.labels.len() {
            return Err(Error::InvalidChart(format!(
                "series {i} has {} values for {} labels",
                series.values.len(),
                spec.labels.len()
            )));
        }
    }
    if !(spec.y_max > spec.y_min) {
        return Err(Error::InvalidChart(format!(
            "y domain is empty: {}..{}",
            spec.y_min, spec.y_max
        )));
    }
    if spec.grid_rows == 0 {
        return Err(Error::InvalidChart("grid_rows must be at least 1".into()));
    }

    let pad = spec.padding;
    let plot_w = width - pad.left - pad.right;
    let plot_h = height - pad.top - pad.bottom;
    if !(plot_w > 0.0 && plot_h > 0.0) {
        return Err(Error::InvalidChart(format!(
            "surface {width}x{height} leaves no plot area inside the padding"
        )));
    }

    let n = spec.labels.len();
    let x = |i: usize| pad.left + (i as f32 / (n - 1) as f32) * plot_w;
    let y = |v: f32| pad.top + plot_h - ((v - spec.y_min) / (spec.y_max - spec.y_min)) * plot_h;
    let baseline = height - pad.bottom;
    let style = spec.style;

    let mut ops = Vec::new();

    for i in 0..=spec.grid_rows {
        ops.push(ChartOp::GridLine {
            x0: pad.left,
            x1: width - pad.right,
            y: pad.top + (plot_h / spec.grid_rows as f32) * i as f32,
            color: style.grid_color,
            width: style.grid_width,
        });
    }

    for (i, label) in spec.labels.iter().enumerate() {
        ops.push(ChartOp::Label {
            text: label.clone(),
            x: x(i),
            y: baseline + style.label_offset,
            color: style.label_color,
            size: style.label_size,
        });
    }

    for series in &spec.series {
        let points: Vec<[f32; 2]> = series
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| [x(i), y(*v)])
            .collect();

        if let Some(fill) = series.fill {
            ops.push(ChartOp::FillPath {
                points: points.clone(),
                y_top: pad.top,
                y_base: baseline,
                color: fill,
            });
        }
        ops.push(ChartOp::StrokePath {
            points,
            color: series.color,
            width: style.stroke_width,
        });
    }

    Ok(ops)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ChartSpec {
        ChartSpec {
            labels: vec!["1".into(), "5".into(), "10".into()],
            series: vec![
                Series {
                    values: vec![12.0, 18.0, 15.0],
                    color: Rgba::from_hex(0x6366f1, 1.0),
                    fill: Some(Rgba::from_hex(0x6366f1, 0.12)),
                },
                Series {
                    values: vec![8.0, 10.0, 14.0],
                    color: Rgba::from_hex(0x14b8a6, 1.0),
                    fill: None,
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

    #[test]
    fn test_op_counts_and_order() {
        let ops = render(&spec(), 400.0, 130.0).unwrap();

        // 5 gridlines, 3 labels, fill+stroke for the first series, stroke
        // only for the second.
        assert_eq!(ops.len(), 5 + 3 + 2 + 1);
        assert!(matches!(ops[0], ChartOp::GridLine { .. }));
        assert!(matches!(ops[5], ChartOp::Label { .. }));
        assert!(matches!(ops[8], ChartOp::FillPath { .. }));
        assert!(matches!(ops[9], ChartOp::StrokePath { .. }));
        assert!(matches!(ops[10], ChartOp::StrokePath { .. }));
    }

    #[test]
    fn test_gridlines_span_plot_rows() {
        let ops = render(&spec(), 400.0, 130.0).unwrap();
        let ys: Vec<f32> = ops
            .iter()
            .filter_map(|op| match op {
                ChartOp::GridLine { y, .. } => Some(*y),
                _ => None,
            })
            .collect();

        assert_eq!(ys.len(), 5);
        assert_eq!(ys[0], 10.0);
        assert_eq!(ys[4], 130.0 - 24.0);
        // Evenly spaced.
        let gap = ys[1] - ys[0];
        for pair in ys.windows(2) {
            assert!((pair[1] - pair[0] - gap).abs() < 1e-4);
        }
    }

    #[test]
    fn test_value_mapping_anchors() {
        let mut spec = spec();
        spec.series[0].values = vec![0.0, 36.0, 18.0];
        let ops = render(&spec, 400.0, 130.0).unwrap();

        let points = ops
            .iter()
            .find_map(|op| match op {
                ChartOp::StrokePath { points, .. } => Some(points.clone()),
                _ => None,
            })
            .unwrap();

        // y_min sits on the baseline, y_max on the plot top.
        assert!((points[0][1] - (130.0 - 24.0)).abs() < 1e-4);
        assert!((points[1][1] - 10.0).abs() < 1e-4);
        // Midpoint value lands mid-plot.
        let mid = 10.0 + (130.0 - 24.0 - 10.0) / 2.0;
        assert!((points[2][1] - mid).abs() < 1e-4);
    }

    #[test]
    fn test_x_positions_ascend_across_full_width() {
        let ops = render(&spec(), 400.0, 130.0).unwrap();
        let points = ops
            .iter()
            .find_map(|op| match op {
                ChartOp::StrokePath { points, .. } => Some(points.clone()),
                _ => None,
            })
            .unwrap();

        assert_eq!(points[0][0], 36.0);
        assert_eq!(points.last().unwrap()[0], 400.0 - 10.0);
        for pair in points.windows(2) {
            assert!(pair[1][0] > pair[0][0]);
        }
    }

    #[test]
    fn test_labels_centered_below_baseline() {
        let ops = render(&spec(), 400.0, 130.0).unwrap();
        let labels: Vec<(String, f32, f32)> = ops
            .iter()
            .filter_map(|op| match op {
                ChartOp::Label { text, x, y, .. } => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect();

        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0].0, "1");
        for (_, _, y) in &labels {
            assert_eq!(*y, 130.0 - 24.0 + 14.0);
        }
    }

    #[test]
    fn test_fill_shares_stroke_points() {
        let ops = render(&spec(), 400.0, 130.0).unwrap();
        let fill = ops.iter().find_map(|op| match op {
            ChartOp::FillPath {
                points,
                y_top,
                y_base,
                ..
            } => Some((points.clone(), *y_top, *y_base)),
            _ => None,
        });
        let (points, y_top, y_base) = fill.unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(y_top, 10.0);
        assert_eq!(y_base, 130.0 - 24.0);
    }

    #[test]
    fn test_rejects_mismatched_series_length() {
        let mut spec = spec();
        spec.series[1].values.pop();
        assert!(matches!(
            render(&spec, 400.0, 130.0),
            Err(Error::InvalidChart(_))
        ));
    }

    #[test]
    fn test_rejects_too_few_labels() {
        let mut spec = spec();
        spec.labels.truncate(1);
        spec.series.clear();
        assert!(render(&spec, 400.0, 130.0).is_err());
    }

    #[test]
    fn test_rejects_empty_series_list() {
        let mut spec = spec();
        spec.series.clear();
        assert!(matches!(
            render(&spec, 400.0, 130.0),
            Err(Error::InvalidChart(_))
        ));
    }

    #[test]
    fn test_rejects_surface_smaller_than_padding() {
        let spec = spec();
        assert!(render(&spec, 40.0, 30.0).is_err());
        assert!(render(&spec, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_rejects_empty_y_domain() {
        let mut spec = spec();
        spec.y_max = spec.y_min;
        assert!(render(&spec, 400.0, 130.0).is_err());
    }

    #[test]
    fn test_same_input_same_ops() {
        let a = render(&spec(), 400.0, 130.0).unwrap();
        let b = render(&spec(), 400.0, 130.0).unwrap();
        assert_eq!(a, b);
    }
}
