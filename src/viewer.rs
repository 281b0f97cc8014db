//! Fireworks app builder and windowed runner.
//!
//! [`Fireworks`] is the configuration entry point: chain `with_*` calls,
//! then `run()` to open the window. Left click launches a burst at the
//! cursor, right drag orbits the camera, the scroll wheel zooms, Escape
//! quits.

use std::f32::consts::TAU;
use std::sync::Arc;

use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::KeyCode,
    window::{Window, WindowId},
};

use crate::burst::{generate, random_burst_color, BurstShape, BurstSpec};
use crate::camera::Camera;
use crate::error::AppError;
use crate::gpu::GpuState;
use crate::input::{Input, MouseButton};
use crate::mesh::ReferenceMesh;
use crate::scene::Scene;
use crate::sky::SkyParams;
use crate::textures::{SpriteRegistry, SpriteTexture};
use crate::time::Time;

/// Fireworks display builder.
///
/// Use method chaining to configure, then call `.run()` to start.
pub struct Fireworks {
    sprites: SpriteRegistry,
    mesh: Option<ReferenceMesh>,
    sky: SkyParams,
    base_size: f32,
    radius_range: (f32, f32),
    seed: Option<u64>,
    #[cfg(feature = "egui")]
    control_panel: bool,
}

impl Fireworks {
    /// A display with default settings and the built-in procedural sprites.
    pub fn new() -> Self {
        Self {
            sprites: SpriteRegistry::new(),
            mesh: None,
            sky: SkyParams::default(),
            base_size: 0.15,
            radius_range: (0.5, 1.5),
            seed: None,
            #[cfg(feature = "egui")]
            control_panel: false,
        }
    }

    /// Register a sprite texture under `name`. Each burst picks one of the
    /// registered sprites at random. If none are registered, `run` falls
    /// back to the built-in procedural disc and star.
    pub fn with_sprite(mut self, name: impl Into<String>, sprite: SpriteTexture) -> Self {
        self.sprites.add(name, sprite);
        self
    }

    /// Provide a reference mesh. Half of all spawns then borrow its vertex
    /// positions instead of sampling a spherical shell.
    pub fn with_reference_mesh(mut self, mesh: ReferenceMesh) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Override the sky model parameters.
    pub fn with_sky(mut self, sky: SkyParams) -> Self {
        self.sky = sky;
        self
    }

    /// Base particle size before per-particle scaling.
    pub fn with_base_size(mut self, base_size: f32) -> Self {
        self.base_size = base_size.max(0.0);
        self
    }

    /// Range of burst radii to roll from, inclusive.
    pub fn with_radius_range(mut self, min: f32, max: f32) -> Self {
        let min = min.max(1e-3);
        self.radius_range = (min, max.max(min));
        self
    }

    /// Seed the internal RNG for a reproducible show.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Show the egui sky/burst tuning panel.
    #[cfg(feature = "egui")]
    pub fn with_control_panel(mut self) -> Self {
        self.control_panel = true;
        self
    }

    /// Run the display. Blocks until the window is closed.
    pub fn run(mut self) -> Result<(), AppError> {
        if self.sprites.is_empty() {
            self.sprites.add("disc", SpriteTexture::soft_disc(64));
            self.sprites.add("star", SpriteTexture::star4(64));
        }

        let rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self, rng);
        event_loop.run_app(&mut app)?;
        Ok(())
    }
}

impl Default for Fireworks {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    camera: Camera,
    input: Input,
    time: Time,
    scene: Scene,
    rng: SmallRng,
    sprites: SpriteRegistry,
    mesh: Option<ReferenceMesh>,
    sky: SkyParams,
    base_size: f32,
    radius_range: (f32, f32),
    #[cfg(feature = "egui")]
    control_panel: bool,
    #[cfg(feature = "egui")]
    overlay: Option<crate::gpu::egui_panel::EguiOverlay>,
}

impl App {
    fn new(config: Fireworks, rng: SmallRng) -> Self {
        Self {
            window: None,
            gpu: None,
            camera: Camera::new(),
            input: Input::new(),
            time: Time::new(),
            scene: Scene::new(),
            rng,
            sprites: config.sprites,
            mesh: config.mesh,
            sky: config.sky,
            base_size: config.base_size,
            radius_range: config.radius_range,
            #[cfg(feature = "egui")]
            control_panel: config.control_panel,
            #[cfg(feature = "egui")]
            overlay: None,
        }
    }

    fn spawn_burst(&mut self, ndc: Vec2) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let origin = self.camera.spawn_point(ndc, gpu.aspect());
        let radius = self
            .rng
            .gen_range(self.radius_range.0..=self.radius_range.1);
        // Half of spawns use the reference mesh when one is loaded.
        let shape = if self.mesh.is_some() && self.rng.gen_bool(0.5) {
            BurstShape::ReferenceMesh
        } else {
            BurstShape::Spherical
        };
        let sprite_names: Vec<&str> = self.sprites.names().collect();
        let texture = sprite_names[self.rng.gen_range(0..sprite_names.len())].to_string();

        let spec = BurstSpec {
            origin,
            radius,
            base_size: self.base_size,
            color: random_burst_color(&mut self.rng),
            texture,
            shape,
            count: None,
        };
        let (geometry, style) = generate(&spec, self.mesh.as_ref(), &mut self.rng);

        let rotation = Vec3::new(
            self.rng.gen_range(0.0..TAU),
            self.rng.gen_range(0.0..TAU),
            self.rng.gen_range(0.0..TAU),
        );

        let id = self.scene.spawn(origin, rotation, geometry, style);
        if let Some(entity) = self.scene.get(id) {
            gpu.upload_burst(entity);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (_, dt) = self.time.update();

        if self.input.key_pressed(KeyCode::Escape) {
            event_loop.exit();
            return;
        }

        if self.input.clicked(MouseButton::Left) {
            if let Some(ndc) = self.input.cursor_ndc() {
                self.spawn_burst(ndc);
            }
        }
        if self.input.held(MouseButton::Right) {
            self.camera.orbit(self.input.cursor_delta());
        }
        self.camera.zoom(self.input.scroll());

        // Retired bursts give their buffers back the same frame.
        for id in self.scene.update(dt) {
            if let Some(gpu) = &mut self.gpu {
                gpu.release_burst(id);
            }
        }

        self.render_frame(event_loop);

        self.input.end_frame();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        #[cfg(feature = "egui")]
        let result = if let (Some(overlay), Some(window)) = (&mut self.overlay, &self.window) {
            overlay.begin_frame(window);
            crate::gpu::egui_panel::sky_panel(
                &overlay.ctx,
                &mut self.sky,
                &mut self.base_size,
                &mut self.radius_range.1,
            );
            self.radius_range.0 = self.radius_range.0.min(self.radius_range.1);
            let frame = overlay.end_frame(window);
            gpu.render_with_overlay(&self.camera, &self.sky, &self.scene, overlay, &frame)
        } else {
            gpu.render(&self.camera, &self.sky, &self.scene)
        };

        #[cfg(not(feature = "egui"))]
        let result = gpu.render(&self.camera, &self.sky, &self.scene);

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => {
                let size = winit::dpi::PhysicalSize {
                    width: gpu.config.width,
                    height: gpu.config.height,
                };
                gpu.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attrs = Window::default_attributes()
                .with_title("skyburst - click to launch")
                .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

            let window = match event_loop.create_window(window_attrs) {
                Ok(window) => Arc::new(window),
                Err(e) => {
                    log::error!("failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };
            self.window = Some(window.clone());

            match pollster::block_on(GpuState::new(window.clone(), &self.sprites)) {
                Ok(gpu) => {
                    #[cfg(feature = "egui")]
                    if self.control_panel {
                        self.overlay = Some(crate::gpu::egui_panel::EguiOverlay::new(
                            gpu.device(),
                            gpu.config.format,
                            &window,
                        ));
                    }
                    self.gpu = Some(gpu);
                }
                Err(e) => {
                    log::error!("GPU initialization failed: {}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        #[cfg(feature = "egui")]
        let consumed = match (&mut self.overlay, &self.window) {
            (Some(overlay), Some(window)) => overlay.on_window_event(window, &event),
            _ => false,
        };
        #[cfg(not(feature = "egui"))]
        let consumed = false;

        if !consumed {
            if let Some(window) = &self.window {
                self.input.handle_window_event(&event, window.inner_size());
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }
}
