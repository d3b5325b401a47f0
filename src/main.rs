use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use driftfield::chart::{self, ChartOp, ChartSpec};
use driftfield::cli::{Cli, Preset};
use driftfield::core::{
    FpsCounter, FrameSink, InfluenceTracker, LoopState, Region, Scene, SceneConfig,
};
use driftfield::math::Rgba;
use driftfield::render::WgpuSink;
use driftfield::{
    create_dashboard_scene, create_hero_scene, create_signature_scene, create_starfield_scene,
    dashboard_chart,
};

// === Constants ===

const INITIAL_WINDOW_WIDTH: u32 = 1280;
const INITIAL_WINDOW_HEIGHT: u32 = 720;
/// Pixels of virtual page scroll per wheel line.
const SCROLL_LINE_PX: f32 = 40.0;
/// Margin around the chart card, in egui points.
const CHART_MARGIN: f32 = 40.0;

// === Application ===

struct App {
    window: Option<Arc<Window>>,
    sink: Option<WgpuSink>,
    scene: Scene,
    chart: Option<ChartSpec>,
    chart_ops: Option<Vec<ChartOp>>,
    tracker: InfluenceTracker,
    /// Virtual page scroll in physical pixels; the window itself never
    /// scrolls, so the wheel drives a stand-in for document position.
    scroll: f32,
    fps: FpsCounter,
    presented: u64,
    frames: Option<u64>,
    no_ui: bool,
}

impl App {
    fn new(scene: Scene, chart: Option<ChartSpec>, no_ui: bool, frames: Option<u64>) -> Self {
        Self {
            window: None,
            sink: None,
            scene,
            chart,
            chart_ops: None,
            tracker: InfluenceTracker::new(),
            scroll: 0.0,
            fps: FpsCounter::new(),
            presented: 0,
            frames,
            no_ui,
        }
    }

    /// Recompute the chart display list for a new surface size. Layout is
    /// static, so this runs only here, never per frame.
    fn relayout_chart(&mut self, width: u32, height: u32, scale_factor: f64) {
        let Some(spec) = &self.chart else {
            return;
        };
        let scale = scale_factor as f32;
        let w = (width as f32 / scale - 2.0 * CHART_MARGIN).max(1.0);
        let h = (height as f32 / scale - 2.0 * CHART_MARGIN).max(1.0);
        match chart::render(spec, w, h) {
            Ok(ops) => self.chart_ops = Some(ops),
            Err(e) => {
                log::warn!("chart layout failed at {width}x{height}: {e}");
                self.chart_ops = None;
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(sink)) = (&self.window, &mut self.sink) else {
            return;
        };

        self.scene.set_influence(self.tracker.influence());
        self.scene.step();

        let fps = self.fps.fps();
        let state = self.scene.state();
        let name = self.scene.name().to_string();
        let chart_ops = self.chart_ops.as_deref();
        let frame = self.scene.frame();

        let result = if self.no_ui {
            sink.submit(&frame)
        } else {
            sink.present(&frame, window, &|ctx| {
                draw_overlay(ctx, &name, fps, state);
                if let Some(ops) = chart_ops {
                    paint_chart(ctx, ops);
                }
            })
        };
        if let Err(e) = result {
            eprintln!("Render error: {}", e);
        }

        self.fps.end_frame();
        self.presented += 1;
        if let Some(limit) = self.frames {
            if self.presented >= limit {
                log::info!("presented {} frames, exiting", self.presented);
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("driftfield")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    eprintln!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let sink = match pollster::block_on(WgpuSink::new(window.clone())) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Failed to initialize renderer: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let size = window.inner_size();
            if let Err(e) = self.scene.resize(size.width, size.height) {
                log::warn!("initial viewport rejected: {e}");
            }
            self.relayout_chart(size.width, size.height, window.scale_factor());

            self.window = Some(window);
            self.sink = Some(sink);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(sink), Some(window)) = (&mut self.sink, &self.window) {
            if sink.handle_event(window, &event) {
                return; // egui consumed the event
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Space),
                        ..
                    },
                ..
            } => {
                if self.scene.is_running() {
                    self.scene.pause();
                } else {
                    self.scene.start();
                }
                log::debug!("scene '{}' -> {:?}", self.scene.name(), self.scene.state());
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(sink) = &self.sink {
                    let (w, h) = sink.size();
                    self.tracker.on_pointer_move(
                        position.x as f32,
                        position.y as f32,
                        Region::new(0.0, 0.0, w as f32, h as f32),
                    );
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y * SCROLL_LINE_PX,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                if let Some(sink) = &self.sink {
                    let (w, h) = sink.size();
                    let h = h as f32;
                    // Wheel-down is negative; it moves the tracked section
                    // up from the fold toward the top of the viewport.
                    self.scroll = (self.scroll - dy).clamp(0.0, h);
                    let region = Region::new(0.0, h - self.scroll, w as f32, h);
                    if region.visible_in(h) {
                        self.tracker.on_scroll(region, h);
                    }
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(sink) = &mut self.sink {
                    if let Err(e) = sink.resize(size.width, size.height) {
                        log::warn!("surface resize rejected: {e}");
                    }
                }
                if let Err(e) = self.scene.resize(size.width, size.height) {
                    log::warn!("viewport resize rejected: {e}");
                }
                if let Some(window) = &self.window {
                    let scale = window.scale_factor();
                    self.relayout_chart(size.width, size.height, scale);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

// === Overlay painting ===

fn draw_overlay(ctx: &egui::Context, name: &str, fps: f32, state: LoopState) {
    egui::Window::new("stats")
        .title_bar(false)
        .resizable(false)
        .fixed_pos(egui::pos2(10.0, 10.0))
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("{:.0}", fps))
                    .size(48.0)
                    .color(egui::Color32::from_rgb(99, 102, 241)),
            );
            ui.label(
                egui::RichText::new("FPS")
                    .size(12.0)
                    .color(egui::Color32::GRAY),
            );
            ui.label(
                egui::RichText::new(name.to_string())
                    .size(12.0)
                    .color(egui::Color32::GRAY),
            );
            if state == LoopState::Paused {
                ui.label(
                    egui::RichText::new("paused")
                        .size(12.0)
                        .color(egui::Color32::LIGHT_GRAY),
                );
            }
        });
}

/// Replay a chart display list through an egui painter.
fn paint_chart(ctx: &egui::Context, ops: &[ChartOp]) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("dashboard_chart"),
    ));
    let origin = egui::pos2(CHART_MARGIN, CHART_MARGIN);

    for op in ops {
        match op {
            ChartOp::GridLine {
                x0,
                x1,
                y,
                color,
                width,
            } => {
                painter.line_segment(
                    [
                        egui::pos2(origin.x + x0, origin.y + y),
                        egui::pos2(origin.x + x1, origin.y + y),
                    ],
                    egui::Stroke::new(*width, to_color32(*color)),
                );
            }
            ChartOp::Label {
                text,
                x,
                y,
                color,
                size,
            } => {
                painter.text(
                    egui::pos2(origin.x + x, origin.y + y),
                    egui::Align2::CENTER_TOP,
                    text,
                    egui::FontId::proportional(*size),
                    to_color32(*color),
                );
            }
            ChartOp::FillPath {
                points,
                y_top,
                y_base,
                color,
            } => {
                // Quad strip down to the baseline, fading the fill color
                // out the way a canvas linear gradient would.
                let mut mesh = egui::Mesh::default();
                let span = (y_base - y_top).max(1e-6);
                for p in points {
                    let t = ((y_base - p[1]) / span).clamp(0.0, 1.0);
                    mesh.colored_vertex(
                        egui::pos2(origin.x + p[0], origin.y + p[1]),
                        to_color32(color.with_alpha(color.a * t)),
                    );
                    mesh.colored_vertex(
                        egui::pos2(origin.x + p[0], origin.y + y_base),
                        to_color32(color.with_alpha(0.0)),
                    );
                }
                for i in 0..points.len().saturating_sub(1) {
                    let a = (2 * i) as u32;
                    mesh.indices
                        .extend_from_slice(&[a, a + 1, a + 2, a + 2, a + 1, a + 3]);
                }
                painter.add(egui::Shape::mesh(mesh));
            }
            ChartOp::StrokePath {
                points,
                color,
                width,
            } => {
                let line: Vec<egui::Pos2> = points
                    .iter()
                    .map(|p| egui::pos2(origin.x + p[0], origin.y + p[1]))
                    .collect();
                painter.add(egui::Shape::line(
                    line,
                    egui::Stroke::new(*width, to_color32(*color)),
                ));
            }
        }
    }
}

fn to_color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(
        (c.r * 255.0).round() as u8,
        (c.g * 255.0).round() as u8,
        (c.b * 255.0).round() as u8,
        (c.a * 255.0).round() as u8,
    )
}

// === Entry point ===

fn select_config(cli: &Cli) -> Result<(SceneConfig, Option<ChartSpec>)> {
    if let Some(path) = &cli.config {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = SceneConfig::from_json(&json)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        return Ok((config, None));
    }

    Ok(match cli.scene {
        Preset::Hero => (create_hero_scene(), None),
        Preset::Signature => (create_signature_scene(), None),
        Preset::Starfield => (create_starfield_scene(), None),
        Preset::Dashboard => (create_dashboard_scene(), Some(dashboard_chart())),
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let (config, chart) = select_config(&cli)?;

    if cli.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let mut scene = Scene::from_config(&config)?;
    scene.start();
    log::info!(
        "scene '{}': {} points, {} elements",
        scene.name(),
        scene.point_count(),
        scene.element_count()
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(scene, chart, cli.no_ui, cli.frames);

    println!("driftfield - Controls: Space to pause, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
