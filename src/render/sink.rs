//! wgpu implementation of the frame sink, plus the egui overlay plumbing.

use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::core::{DrawMode, FrameSink, SceneFrame, Shape};
use crate::error::Error;
use crate::geometry;

/// Camera globals shared by every draw in a frame.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
}

/// Per-layer point sprite parameters.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct PointParams {
    color: [f32; 4],
    size: f32,
    _pad: [f32; 3],
}

/// Per-element mesh parameters.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct ElementParams {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    lit: u32,
    _pad: [u32; 3],
}

/// GPU residence for one point layer. The instance buffer is only
/// rewritten on dirty frames; the params buffer every frame.
struct PointBatch {
    capacity: usize,
    count: u32,
    instances: wgpu::Buffer,
    params: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// GPU residence for one rigid element, keyed on its shape so a config
/// change rebuilds the mesh.
struct ElementBatch {
    shape: Shape,
    vertices: wgpu::Buffer,
    edge_indices: wgpu::Buffer,
    edge_index_count: u32,
    tri_indices: wgpu::Buffer,
    tri_index_count: u32,
    params: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Frame sink backed by a wgpu surface, with an egui overlay.
pub struct WgpuSink {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    draw_layout: wgpu::BindGroupLayout,
    point_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    solid_pipeline: wgpu::RenderPipeline,
    point_batches: Vec<PointBatch>,
    element_batches: Vec<ElementBatch>,
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
}

impl WgpuSink {
    pub async fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| Error::Render(format!("failed to create surface: {e}")))?;
        let adapter = Self::request_adapter(&instance, &surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        let surface_config = Self::create_surface_config(&surface, &adapter, size);
        surface.configure(&device, &surface_config);

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Globals Buffer"),
            contents: bytemuck::cast_slice(&[Globals {
                view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let globals_layout = Self::create_uniform_layout(&device, "globals_layout");
        let draw_layout = Self::create_uniform_layout(&device, "draw_layout");

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
            label: Some("globals_bind_group"),
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&globals_layout, &draw_layout],
            push_constant_ranges: &[],
        });

        let point_pipeline = Self::create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            surface_config.format,
            "vs_points",
            "fs_points",
            wgpu::PrimitiveTopology::TriangleList,
            wgpu::VertexStepMode::Instance,
        );
        let line_pipeline = Self::create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            surface_config.format,
            "vs_mesh",
            "fs_line",
            wgpu::PrimitiveTopology::LineList,
            wgpu::VertexStepMode::Vertex,
        );
        let solid_pipeline = Self::create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            surface_config.format,
            "vs_mesh",
            "fs_solid",
            wgpu::PrimitiveTopology::TriangleList,
            wgpu::VertexStepMode::Vertex,
        );

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            surface_config.format,
            egui_wgpu::RendererOptions::default(),
        );

        log::info!(
            "wgpu sink ready: {}x{} {:?}",
            size.width,
            size.height,
            surface_config.format
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            globals_buffer,
            globals_bind_group,
            draw_layout,
            point_pipeline,
            line_pipeline,
            solid_pipeline,
            point_batches: Vec::new(),
            element_batches: Vec::new(),
            egui_renderer,
            egui_state,
            egui_ctx,
        })
    }

    async fn request_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'_>,
    ) -> Result<wgpu::Adapter, Error> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| Error::Render("no compatible adapter found".into()))
    }

    async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue), Error> {
        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .map_err(|e| Error::Render(format!("failed to acquire device: {e}")))
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> wgpu::SurfaceConfiguration {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    fn create_uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some(label),
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        vs_entry: &str,
        fs_entry: &str,
        topology: wgpu::PrimitiveTopology,
        step_mode: wgpu::VertexStepMode,
    ) -> wgpu::RenderPipeline {
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: 12,
            step_mode,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        };

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(vs_entry),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(vs_entry),
                buffers: &[vertex_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(fs_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    fn create_point_batch(&self, capacity: usize) -> PointBatch {
        let instances = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Point Instances"),
            size: (capacity * 12) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let params = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Point Params"),
            size: std::mem::size_of::<PointParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.draw_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: params.as_entire_binding(),
            }],
            label: Some("point_bind_group"),
        });

        PointBatch {
            capacity,
            count: 0,
            instances,
            params,
            bind_group,
        }
    }

    fn create_element_batch(&self, shape: Shape) -> ElementBatch {
        let mesh = geometry::tessellate(shape);

        let positions: Vec<[f32; 3]> = mesh.vertices.iter().map(|v| v.to_array()).collect();
        let vertices = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Element Vertices"),
                contents: bytemuck::cast_slice(&positions),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let edge_indices: Vec<u32> = mesh.edges.iter().flatten().copied().collect();
        let edge_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Element Edges"),
                contents: bytemuck::cast_slice(&edge_indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let tri_indices: Vec<u32> = mesh.triangles.iter().flatten().copied().collect();
        let tri_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Element Triangles"),
                contents: bytemuck::cast_slice(&tri_indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let params = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Element Params"),
            size: std::mem::size_of::<ElementParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.draw_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: params.as_entire_binding(),
            }],
            label: Some("element_bind_group"),
        });

        ElementBatch {
            shape,
            vertices,
            edge_indices: edge_buffer,
            edge_index_count: edge_indices.len() as u32,
            tri_indices: tri_buffer,
            tri_index_count: tri_indices.len() as u32,
            params,
            bind_group,
        }
    }

    /// Sync GPU buffers with this frame's scene state.
    fn upload(&mut self, frame: &SceneFrame<'_>) {
        self.queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::cast_slice(&[Globals {
                view_proj: frame.view_proj.to_cols_array_2d(),
            }]),
        );

        self.point_batches.truncate(frame.points.len());
        for (i, layer) in frame.points.iter().enumerate() {
            let needs_rebuild = self
                .point_batches
                .get(i)
                .is_none_or(|b| b.capacity < layer.positions.len());
            if needs_rebuild {
                let batch = self.create_point_batch(layer.positions.len().max(1));
                if i < self.point_batches.len() {
                    self.point_batches[i] = batch;
                } else {
                    self.point_batches.push(batch);
                }
            }

            let batch = &mut self.point_batches[i];
            batch.count = layer.positions.len() as u32;
            if layer.dirty || needs_rebuild {
                let data: Vec<[f32; 3]> = layer.positions.iter().map(|p| p.to_array()).collect();
                self.queue
                    .write_buffer(&batch.instances, 0, bytemuck::cast_slice(&data));
            }
            self.queue.write_buffer(
                &batch.params,
                0,
                bytemuck::cast_slice(&[PointParams {
                    color: layer.color.to_linear_array(),
                    size: layer.size,
                    _pad: [0.0; 3],
                }]),
            );
        }

        self.element_batches.truncate(frame.elements.len());
        for (i, element) in frame.elements.iter().enumerate() {
            let needs_rebuild = self
                .element_batches
                .get(i)
                .is_none_or(|b| b.shape != element.shape);
            if needs_rebuild {
                let batch = self.create_element_batch(element.shape);
                if i < self.element_batches.len() {
                    self.element_batches[i] = batch;
                } else {
                    self.element_batches.push(batch);
                }
            }

            self.queue.write_buffer(
                &self.element_batches[i].params,
                0,
                bytemuck::cast_slice(&[ElementParams {
                    model: element.model.to_cols_array_2d(),
                    color: element.color.to_linear_array(),
                    lit: u32::from(element.mode == DrawMode::Solid),
                    _pad: [0; 3],
                }]),
            );
        }
    }

    /// Draw one frame, with an optional egui overlay painted on top.
    fn draw(
        &mut self,
        frame: &SceneFrame<'_>,
        overlay: Option<(&Window, &dyn Fn(&egui::Context))>,
    ) -> Result<(), Error> {
        self.upload(frame);

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            // The next configure (resize) restores these; skip the frame.
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.surface_config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(()),
            Err(e) => return Err(Error::Render(format!("surface error: {e}"))),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let clear = frame.clear.to_linear_array();
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear[0] as f64,
                            g: clear[1] as f64,
                            b: clear[2] as f64,
                            a: clear[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            pass.set_bind_group(0, &self.globals_bind_group, &[]);

            for (batch, element) in self.element_batches.iter().zip(&frame.elements) {
                pass.set_bind_group(1, &batch.bind_group, &[]);
                pass.set_vertex_buffer(0, batch.vertices.slice(..));
                match element.mode {
                    DrawMode::Wireframe => {
                        pass.set_pipeline(&self.line_pipeline);
                        pass.set_index_buffer(
                            batch.edge_indices.slice(..),
                            wgpu::IndexFormat::Uint32,
                        );
                        pass.draw_indexed(0..batch.edge_index_count, 0, 0..1);
                    }
                    DrawMode::Solid | DrawMode::Emissive => {
                        pass.set_pipeline(&self.solid_pipeline);
                        pass.set_index_buffer(
                            batch.tri_indices.slice(..),
                            wgpu::IndexFormat::Uint32,
                        );
                        pass.draw_indexed(0..batch.tri_index_count, 0, 0..1);
                    }
                }
            }

            pass.set_pipeline(&self.point_pipeline);
            for batch in &self.point_batches {
                if batch.count == 0 {
                    continue;
                }
                pass.set_bind_group(1, &batch.bind_group, &[]);
                pass.set_vertex_buffer(0, batch.instances.slice(..));
                pass.draw(0..6, 0..batch.count);
            }
        }

        if let Some((window, build_ui)) = overlay {
            self.paint_overlay(&mut encoder, &view, window, build_ui);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn paint_overlay(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        window: &Window,
        build_ui: &dyn Fn(&egui::Context),
    ) {
        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| build_ui(ctx));

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            // SAFETY: The render pass lifetime is actually tied to the encoder,
            // but egui-wgpu requires 'static. This is safe because we drop the
            // render pass before using the encoder again.
            let render_pass_static = unsafe {
                std::mem::transmute::<&mut wgpu::RenderPass<'_>, &mut wgpu::RenderPass<'static>>(
                    &mut render_pass,
                )
            };

            self.egui_renderer
                .render(render_pass_static, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }

    /// Draw a frame with the overlay on top.
    pub fn present(
        &mut self,
        frame: &SceneFrame<'_>,
        window: &Window,
        build_ui: &dyn Fn(&egui::Context),
    ) -> Result<(), Error> {
        self.draw(frame, Some((window, build_ui)))
    }

    /// Feed a window event to egui; a consumed event should not reach the
    /// scene input handling.
    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.egui_state.on_window_event(window, event).consumed
    }

    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }
}

impl FrameSink for WgpuSink {
    fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidViewport { width, height });
        }
        if width == self.surface_config.width && height == self.surface_config.height {
            return Ok(());
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        Ok(())
    }

    fn submit(&mut self, frame: &SceneFrame<'_>) -> Result<(), Error> {
        self.draw(frame, None)
    }
}
