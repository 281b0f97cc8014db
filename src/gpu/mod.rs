//! GPU device/surface plumbing and the per-frame render path.
//!
//! [`GpuState`] owns the wgpu device, the swapchain, and the two scene
//! passes: the sky background and the burst particles. Burst buffers are
//! keyed by [`BurstId`]; the app uploads on spawn and releases on retire.

mod bursts;
#[cfg(feature = "egui")]
pub mod egui_panel;
mod sky;

use std::sync::Arc;

use glam::Vec2;
use winit::window::Window;

pub use bursts::BurstRenderer;
pub use sky::SkyRenderer;

use crate::camera::Camera;
use crate::error::GpuError;
use crate::scene::{BurstEntity, BurstId, Scene};
use crate::sky::SkyParams;
use crate::textures::SpriteRegistry;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    depth_texture: wgpu::TextureView,
    sky: SkyRenderer,
    bursts: BurstRenderer,
}

impl GpuState {
    pub async fn new(window: Arc<Window>, sprites: &SpriteRegistry) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

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
                    label: Some("Device"),
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
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = create_depth_texture(&device, &config);

        let sky = SkyRenderer::new(&device, surface_format, DEPTH_FORMAT);
        let bursts = BurstRenderer::new(&device, &queue, surface_format, DEPTH_FORMAT, sprites);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_texture,
            sky,
            bursts,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = create_depth_texture(&self.device, &self.config);
        }
    }

    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    pub fn resolution(&self) -> Vec2 {
        Vec2::new(self.config.width as f32, self.config.height as f32)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Create GPU buffers for a newly spawned burst.
    pub fn upload_burst(&mut self, entity: &BurstEntity) {
        self.bursts.upload(&self.device, entity);
    }

    /// Drop the buffers of a retired burst. Idempotent.
    pub fn release_burst(&mut self, id: BurstId) {
        self.bursts.release(id);
    }

    /// Number of bursts with live GPU buffers.
    pub fn live_burst_count(&self) -> usize {
        self.bursts.live_count()
    }

    fn prepare_frame(&self, camera: &Camera, sky_params: &SkyParams, scene: &Scene) {
        let view_proj = camera.view_proj(self.aspect());
        self.sky.prepare(&self.queue, sky_params, view_proj.inverse());
        self.bursts
            .prepare(&self.queue, view_proj, self.resolution(), scene);
    }

    fn scene_pass(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        self.sky.draw(&mut pass);
        self.bursts.draw(&mut pass);
    }

    pub fn render(
        &mut self,
        camera: &Camera,
        sky_params: &SkyParams,
        scene: &Scene,
    ) -> Result<(), wgpu::SurfaceError> {
        self.prepare_frame(camera, sky_params, scene);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.scene_pass(&mut encoder, &view);

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Like [`render`](Self::render), with an egui overlay composited on top.
    #[cfg(feature = "egui")]
    pub fn render_with_overlay(
        &mut self,
        camera: &Camera,
        sky_params: &SkyParams,
        scene: &Scene,
        overlay: &mut egui_panel::EguiOverlay,
        frame: &egui_panel::EguiFrameOutput,
    ) -> Result<(), wgpu::SurfaceError> {
        self.prepare_frame(camera, sky_params, scene);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.scene_pass(&mut encoder, &view);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: frame.pixels_per_point,
        };
        overlay.prepare(&self.device, &self.queue, &mut encoder, frame, &screen_descriptor);

        {
            let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            let mut pass = pass.forget_lifetime();
            overlay
                .renderer()
                .render(&mut pass, &frame.paint_jobs, &screen_descriptor);
        }

        overlay.cleanup(frame);

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_depth_texture(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
