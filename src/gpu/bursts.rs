//! Instanced billboard rendering for burst particles.
//!
//! Each live burst owns a static instance buffer (one [`ParticleVertex`] per
//! particle) and a small uniform buffer rewritten every frame with the
//! camera matrices and the burst's tween progress. Particles blend
//! additively and do not write depth.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Vec2, Vec3};
use wgpu::util::DeviceExt;

use crate::burst::ParticleVertex;
use crate::scene::{BurstEntity, BurstId, Scene};
use crate::textures::{FilterMode, SpriteRegistry, SpriteTexture};

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct BurstUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    color: [f32; 3],
    base_size: f32,
    resolution: [f32; 2],
    progress: f32,
    _padding: f32,
}

/// GPU-side resources for one live burst.
struct BurstGpu {
    vertex_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    particle_count: u32,
    sprite: String,
    model: Mat4,
    color: Vec3,
    base_size: f32,
}

pub struct BurstRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_layout: wgpu::BindGroupLayout,
    sprites: HashMap<String, wgpu::BindGroup>,
    default_sprite: String,
    live: HashMap<BurstId, BurstGpu>,
}

impl BurstRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        registry: &SpriteRegistry,
    ) -> Self {
        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Burst Uniform Bind Group Layout"),
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

        let sprite_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sprite Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let mut sprites = HashMap::new();
        let mut default_sprite = String::new();
        for (name, sprite) in registry.iter() {
            if default_sprite.is_empty() {
                default_sprite = name.to_string();
            }
            let bind_group = upload_sprite(device, queue, &sprite_layout, name, sprite);
            sprites.insert(name.to_string(), bind_group);
        }

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Burst Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/burst.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Burst Pipeline Layout"),
            bind_group_layouts: &[&uniform_layout, &sprite_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Burst Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<ParticleVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x3, // offset
                        },
                        wgpu::VertexAttribute {
                            offset: 12,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32, // size_factor
                        },
                        wgpu::VertexAttribute {
                            offset: 16,
                            shader_location: 2,
                            format: wgpu::VertexFormat::Float32, // time_multiplier
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    // Additive: overlapping sparks brighten each other and
                    // draw order does not matter.
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth_format,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            uniform_layout,
            sprites,
            default_sprite,
            live: HashMap::new(),
        }
    }

    /// Create the instance and uniform buffers for a newly spawned burst.
    pub fn upload(&mut self, device: &wgpu::Device, entity: &BurstEntity) {
        let id = entity.id();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Burst Instance Buffer"),
            contents: entity.geometry.as_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Burst Uniform Buffer"),
            size: std::mem::size_of::<BurstUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Burst Uniform Bind Group"),
            layout: &self.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let rotation = entity.rotation;
        let model = Mat4::from_translation(entity.origin)
            * Mat4::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z);

        self.live.insert(
            id,
            BurstGpu {
                vertex_buffer,
                uniform_buffer,
                uniform_bind_group,
                particle_count: entity.geometry.particle_count(),
                sprite: entity.style.texture.clone(),
                model,
                color: entity.style.color,
                base_size: entity.style.base_size,
            },
        );
    }

    /// Drop the buffers for a retired burst. Safe to call with an id that was
    /// already released; the second call is a no-op.
    pub fn release(&mut self, id: BurstId) {
        self.live.remove(&id);
    }

    /// Rewrite every live burst's uniforms for this frame.
    pub fn prepare(&self, queue: &wgpu::Queue, view_proj: Mat4, resolution: Vec2, scene: &Scene) {
        for entity in scene.iter() {
            let Some(gpu) = self.live.get(&entity.id()) else {
                continue;
            };
            let uniforms = BurstUniforms {
                view_proj: view_proj.to_cols_array_2d(),
                model: gpu.model.to_cols_array_2d(),
                color: gpu.color.to_array(),
                base_size: gpu.base_size,
                resolution: resolution.to_array(),
                progress: entity.progress(),
                _padding: 0.0,
            };
            queue.write_buffer(&gpu.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }
    }

    /// Draw every live burst. Order is irrelevant under additive blending.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        for gpu in self.live.values() {
            let sprite = self
                .sprites
                .get(&gpu.sprite)
                .or_else(|| self.sprites.get(&self.default_sprite));
            let Some(sprite) = sprite else {
                continue;
            };
            pass.set_bind_group(0, &gpu.uniform_bind_group, &[]);
            pass.set_bind_group(1, sprite, &[]);
            pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
            pass.draw(0..6, 0..gpu.particle_count);
        }
    }

    /// Number of bursts with live GPU buffers.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

fn upload_sprite(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    name: &str,
    sprite: &SpriteTexture,
) -> wgpu::BindGroup {
    let size = wgpu::Extent3d {
        width: sprite.width,
        height: sprite.height,
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(name),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        // Linear: the red channel is an alpha mask, not a color.
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &sprite.data,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * sprite.width),
            rows_per_image: Some(sprite.height),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    let filter = match sprite.filter {
        FilterMode::Linear => wgpu::FilterMode::Linear,
        FilterMode::Nearest => wgpu::FilterMode::Nearest,
    };
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(name),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: filter,
        min_filter: filter,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });

    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(name),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    })
}
