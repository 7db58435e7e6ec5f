//! Rendering system with wgpu pipeline and shader management.

pub mod headless;
pub mod markers;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use log::{debug, warn};
use wgpu::util::DeviceExt;

use crate::camera::Camera;
use crate::error::GpuError;
use crate::ocean::{OceanGrid, Vertex};
use crate::params::RenderConfig;
use crate::rain::RainDrop;
use crate::scheduler::{FrameView, Renderer};

pub use headless::LogRenderer;
pub use markers::{build_markers, MarkerVertex};

/// Initial marker buffer size (vertices); grows on demand
const INITIAL_MARKER_CAPACITY: usize = 4096;

/// Uniform buffer shared by every pipeline
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    /// xyz = position, w = range (meters)
    pub light_position: [f32; 4],
    /// rgb = colour, a = ambient intensity
    pub light_color: [f32; 4],
    /// rgb = ocean colour, a unused
    pub ocean_color: [f32; 4],
}

impl Uniforms {
    pub fn new(camera: &Camera, frame: &FrameView<'_>, config: &RenderConfig) -> Self {
        let p = frame.light_position;
        let [r, g, b] = frame.light_color;
        let [or, og, ob] = config.ocean_color;
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            light_position: [p.x, p.y, p.z, frame.light_range_m],
            light_color: [r, g, b, config.ambient_intensity],
            ocean_color: [or, og, ob, 1.0],
        }
    }
}

/// Rendering system managing wgpu device, pipelines, and buffers
pub struct RenderSystem {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    render_config: RenderConfig,
    camera: Camera,
    ocean_pipeline: wgpu::RenderPipeline,
    rain_pipeline: wgpu::RenderPipeline,
    marker_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    rain_buffer: wgpu::Buffer,
    rain_capacity: usize,
    marker_buffer: wgpu::Buffer,
    marker_capacity: usize,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
}

impl RenderSystem {
    /// Create new rendering system
    pub async fn new(
        window: Arc<winit::window::Window>,
        ocean_grid: &OceanGrid,
        rain_capacity: usize,
        camera: Camera,
        render_config: RenderConfig,
    ) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Surface needs a 'static window, hence the Arc
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        debug!("Surface configured: {:?} {}x{}", surface_format, config.width, config.height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Tableau Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Ocean Vertex Buffer"),
            contents: bytemuck::cast_slice(&ocean_grid.vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Ocean Index Buffer"),
            contents: bytemuck::cast_slice(&ocean_grid.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let rain_capacity = rain_capacity.max(1);
        let rain_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Rain Buffer"),
            size: (rain_capacity * std::mem::size_of::<RainDrop>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let marker_buffer = create_marker_buffer(&device, INITIAL_MARKER_CAPACITY);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[Uniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                light_position: [0.0, 10.0, 10.0, 100.0],
                light_color: [1.0, 1.0, 1.0, render_config.ambient_intensity],
                ocean_color: [0.0, 0.0, 0.0, 1.0],
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
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
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let ocean_attributes = [
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            },
        ];
        let ocean_pipeline = create_pipeline(
            &device,
            &layout,
            &shader,
            config.format,
            PipelineSpec {
                label: "Ocean Pipeline",
                vs_entry: "vs_ocean",
                fs_entry: "fs_ocean",
                topology: wgpu::PrimitiveTopology::TriangleList,
                vertex_layout: wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &ocean_attributes,
                },
            },
        );

        let rain_attributes = [wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        }];
        let rain_pipeline = create_pipeline(
            &device,
            &layout,
            &shader,
            config.format,
            PipelineSpec {
                label: "Rain Pipeline",
                vs_entry: "vs_rain",
                fs_entry: "fs_color",
                topology: wgpu::PrimitiveTopology::PointList,
                vertex_layout: wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<RainDrop>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &rain_attributes,
                },
            },
        );

        let marker_attributes = [
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x4,
            },
        ];
        let marker_pipeline = create_pipeline(
            &device,
            &layout,
            &shader,
            config.format,
            PipelineSpec {
                label: "Marker Pipeline",
                vs_entry: "vs_marker",
                fs_entry: "fs_color",
                topology: wgpu::PrimitiveTopology::TriangleList,
                vertex_layout: wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<MarkerVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &marker_attributes,
                },
            },
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            render_config,
            camera,
            ocean_pipeline,
            rain_pipeline,
            marker_pipeline,
            vertex_buffer,
            index_buffer,
            index_count: ocean_grid.indices.len() as u32,
            rain_buffer,
            rain_capacity,
            marker_buffer,
            marker_capacity: INITIAL_MARKER_CAPACITY,
            uniform_buffer,
            uniform_bind_group,
        })
    }

    /// Camera used for the next frame
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
        self.camera.set_aspect(self.config.width, self.config.height);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Reconfigure the surface after a window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.camera.set_aspect(width, height);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn upload(&mut self, frame: &FrameView<'_>) -> u32 {
        if frame.ocean_dirty {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&frame.ocean.vertices));
        }

        let rain = &frame.rain[..frame.rain.len().min(self.rain_capacity)];
        self.queue
            .write_buffer(&self.rain_buffer, 0, bytemuck::cast_slice(rain));

        let markers = build_markers(
            frame.scene,
            frame.light_position,
            frame.light_color,
            &frame.boat,
        );
        if markers.len() > self.marker_capacity {
            self.marker_capacity = markers.len().next_power_of_two();
            self.marker_buffer = create_marker_buffer(&self.device, self.marker_capacity);
            debug!("Marker buffer grown to {} vertices", self.marker_capacity);
        }
        self.queue
            .write_buffer(&self.marker_buffer, 0, bytemuck::cast_slice(&markers));

        let uniforms = Uniforms::new(&self.camera, frame, &self.render_config);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        markers.len() as u32
    }

    /// Draw one frame
    pub fn draw(&mut self, frame: &FrameView<'_>) -> Result<(), wgpu::SurfaceError> {
        let marker_count = self.upload(frame);
        let rain_count = frame.rain.len().min(self.rain_capacity) as u32;

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let [r, g, b] = self.render_config.sky_color;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            // Ocean first, then everything drawn on top of it
            render_pass.set_pipeline(&self.ocean_pipeline);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.index_count, 0, 0..1);

            render_pass.set_pipeline(&self.rain_pipeline);
            render_pass.set_vertex_buffer(0, self.rain_buffer.slice(..));
            render_pass.draw(0..rain_count, 0..1);

            render_pass.set_pipeline(&self.marker_pipeline);
            render_pass.set_vertex_buffer(0, self.marker_buffer.slice(..));
            render_pass.draw(0..marker_count, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl Renderer for RenderSystem {
    fn render(&mut self, frame: &FrameView<'_>) {
        match self.draw(frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = self.size();
                self.resize(width, height);
            }
            Err(e) => warn!("Render error: {:?}", e),
        }
    }
}

struct PipelineSpec<'a> {
    label: &'static str,
    vs_entry: &'static str,
    fs_entry: &'static str,
    topology: wgpu::PrimitiveTopology,
    vertex_layout: wgpu::VertexBufferLayout<'a>,
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    spec: PipelineSpec<'_>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(spec.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(spec.vs_entry),
            buffers: &[spec.vertex_layout],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(spec.fs_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: spec.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Ocean and discs are seen from both sides
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_marker_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Marker Buffer"),
        size: (capacity * std::mem::size_of::<MarkerVertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<Uniforms>(), 112);
        assert_eq!(std::mem::size_of::<Uniforms>() % 16, 0);
    }

    #[test]
    fn test_vertex_strides() {
        assert_eq!(std::mem::size_of::<Vertex>(), 20);
        assert_eq!(std::mem::size_of::<RainDrop>(), 12);
        assert_eq!(std::mem::size_of::<MarkerVertex>(), 28);
    }
}
