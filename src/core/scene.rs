//! The animated scene loop: one parameterized stepper that every preset
//! configures rather than subclasses.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::core::renderer::{ElementFrame, PointFieldFrame, SceneFrame};
use crate::core::{
    Camera, DrawMode, Influence, InfluenceFollow, MorphCloud, PointCloud, PointField, Pulse,
    RigidElement, SceneClock, Shape,
};
use crate::error::Error;
use crate::geometry;
use crate::math::{Bounds3, Rgba};

/// Lifecycle of the per-refresh loop.
///
/// Stepping is a no-op outside `Running`. The clock is never reset by a
/// transition, so stop/start resumes the phase instead of rewinding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
    Paused,
}

/// Camera parameters a preset pins down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub fov_y_deg: f32,
    pub distance: f32,
    pub near: f32,
    pub far: f32,
}

/// How a point layer's field gets built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldConfig {
    /// `count` points spawned uniformly inside the box, each with a
    /// per-axis velocity drawn uniformly from [-speed, speed).
    Drift {
        count: usize,
        min: [f32; 3],
        max: [f32; 3],
        speed: [f32; 3],
        #[serde(default)]
        seed: Option<u64>,
    },
    /// The shape's vertices as a fixed base that shimmer displaces.
    Morph {
        shape: Shape,
        amplitude: [f32; 3],
        frequency: [f32; 3],
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLayerConfig {
    pub field: FieldConfig,
    pub color: Rgba,
    pub size: f32,
    /// Optional per-layer opacity pulse around the color's base alpha.
    #[serde(default)]
    pub twinkle: Option<Pulse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementConfig {
    pub shape: Shape,
    pub mode: DrawMode,
    pub color: Rgba,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub spin: [f32; 3],
    #[serde(default)]
    pub follow: InfluenceFollow,
    #[serde(default)]
    pub scale_pulse: Option<Pulse>,
    #[serde(default)]
    pub opacity_pulse: Option<Pulse>,
}

/// Complete description of a scene. Presets are plain values of this type,
/// and the same shape round-trips through JSON for external configs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub name: String,
    pub clock_step: f32,
    pub clear_color: Rgba,
    pub camera: CameraConfig,
    #[serde(default)]
    pub point_layers: Vec<PointLayerConfig>,
    #[serde(default)]
    pub elements: Vec<ElementConfig>,
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One field of points plus its draw style and current twinkle state.
#[derive(Debug, Clone)]
struct PointLayer {
    field: PointField,
    color: Rgba,
    size: f32,
    twinkle: Option<Pulse>,
    opacity: f32,
}

/// A running scene: clock, influence sample, point layers and rigid
/// elements, advanced one fixed step at a time.
#[derive(Debug)]
pub struct Scene {
    name: String,
    clock: SceneClock,
    state: LoopState,
    influence: Influence,
    camera: Camera,
    clear: Rgba,
    layers: Vec<PointLayer>,
    elements: Vec<RigidElement>,
    steps: u64,
}

impl Scene {
    pub fn from_config(config: &SceneConfig) -> Result<Self, Error> {
        if !(config.clock_step > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "clock_step must be positive, got {}",
                config.clock_step
            )));
        }

        let mut layers = Vec::with_capacity(config.point_layers.len());
        for layer in &config.point_layers {
            let field = expand_field(&layer.field)?;
            layers.push(PointLayer {
                field,
                color: layer.color,
                size: layer.size,
                twinkle: layer.twinkle,
                opacity: layer.color.a,
            });
        }

        let mut elements = Vec::with_capacity(config.elements.len());
        for element in &config.elements {
            let k = element.follow.smoothing;
            if !(k > 0.0 && k <= 1.0) {
                return Err(Error::InvalidConfig(format!(
                    "follow smoothing must be in (0, 1], got {k}"
                )));
            }
            elements.push(RigidElement::new(
                element.shape,
                element.mode,
                element.color,
                Vec3::from_array(element.position),
                Vec3::from_array(element.spin),
                element.follow,
                element.scale_pulse,
                element.opacity_pulse,
            ));
        }

        let camera = Camera::new(
            config.camera.fov_y_deg,
            config.camera.distance,
            config.camera.near,
            config.camera.far,
        );

        Ok(Self {
            name: config.name.clone(),
            clock: SceneClock::new(config.clock_step),
            state: LoopState::Stopped,
            influence: Influence::default(),
            camera,
            clear: config.clear_color,
            layers,
            elements,
            steps: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn phase(&self) -> f32 {
        self.clock.phase()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn influence(&self) -> Influence {
        self.influence
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Total points across all layers.
    pub fn point_count(&self) -> usize {
        self.layers.iter().map(|l| l.field.len()).sum()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Begin stepping, or resume after a pause or stop. The clock picks up
    /// where it left off.
    pub fn start(&mut self) {
        self.state = LoopState::Running;
    }

    /// Freeze stepping while keeping all state. Only a running scene can
    /// pause; pausing a stopped scene stays stopped.
    pub fn pause(&mut self) {
        if self.state == LoopState::Running {
            self.state = LoopState::Paused;
        }
    }

    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }

    /// Replace the influence sample the next step will read.
    pub fn set_influence(&mut self, influence: Influence) {
        self.influence = influence;
    }

    /// Forward a viewport change to the camera.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        self.camera.resize(width, height)
    }

    /// Advance the scene by exactly one step. Outside `Running` this is a
    /// complete no-op: no clock tick, no motion, no dirty flags.
    pub fn step(&mut self) {
        if self.state != LoopState::Running {
            return;
        }

        let phase = self.clock.tick();
        let influence = self.influence;

        for element in &mut self.elements {
            element.advance(phase, influence);
        }

        for layer in &mut self.layers {
            match &mut layer.field {
                PointField::Drift(cloud) => cloud.advect(),
                PointField::Morph(cloud) => cloud.update(phase, influence.progress),
            }
            layer.opacity = (layer.color.a + layer.twinkle.map_or(0.0, |p| p.eval(phase)))
                .clamp(0.0, 1.0);
        }

        self.steps += 1;
    }

    /// Snapshot the current state for a sink. Dirty flags are consumed
    /// here, so each frame reports an upload at most once.
    pub fn frame(&mut self) -> SceneFrame<'_> {
        let mut dirty = Vec::with_capacity(self.layers.len());
        for layer in &mut self.layers {
            dirty.push(layer.field.take_dirty());
        }

        let points = self
            .layers
            .iter()
            .zip(dirty)
            .map(|(layer, dirty)| PointFieldFrame {
                positions: layer.field.positions(),
                color: layer.color.with_alpha(layer.opacity),
                size: layer.size,
                dirty,
            })
            .collect();

        let elements = self
            .elements
            .iter()
            .map(|element| ElementFrame {
                shape: element.shape(),
                model: element.model_matrix(),
                color: element.color(),
                mode: element.mode(),
            })
            .collect();

        SceneFrame {
            view_proj: self.camera.view_proj(),
            clear: self.clear,
            points,
            elements,
        }
    }
}

fn expand_field(config: &FieldConfig) -> Result<PointField, Error> {
    match config {
        FieldConfig::Drift {
            count,
            min,
            max,
            speed,
            seed,
        } => {
            let bounds = Bounds3::new(Vec3::from_array(*min), Vec3::from_array(*max))?;
            if speed.iter().any(|s| *s < 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "drift speed must be non-negative, got {speed:?}"
                )));
            }

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(*seed),
                None => StdRng::from_os_rng(),
            };

            let mut positions = Vec::with_capacity(*count);
            let mut velocities = Vec::with_capacity(*count);
            for _ in 0..*count {
                positions.push(Vec3::new(
                    rng.random_range(min[0]..max[0]),
                    rng.random_range(min[1]..max[1]),
                    rng.random_range(min[2]..max[2]),
                ));
                velocities.push(Vec3::new(
                    random_speed(&mut rng, speed[0]),
                    random_speed(&mut rng, speed[1]),
                    random_speed(&mut rng, speed[2]),
                ));
            }

            Ok(PointField::Drift(PointCloud::new(
                positions, velocities, bounds,
            )?))
        }
        FieldConfig::Morph {
            shape,
            amplitude,
            frequency,
        } => {
            let base = geometry::tessellate(*shape).vertices;
            Ok(PointField::Morph(MorphCloud::new(
                base,
                Vec3::from_array(*amplitude),
                Vec3::from_array(*frequency),
            )))
        }
    }
}

fn random_speed(rng: &mut StdRng, half_range: f32) -> f32 {
    if half_range > 0.0 {
        rng.random_range(-half_range..half_range)
    } else {
        0.0
    }
}
