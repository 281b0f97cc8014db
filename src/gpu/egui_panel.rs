//! Optional egui overlay with the sky and burst tuning panel.
//!
//! Enabled with the `egui` feature. [`EguiOverlay`] wraps the egui context,
//! winit state, and wgpu renderer; [`sky_panel`] draws the slider window.

use std::sync::Arc;
use winit::window::Window;

use crate::sky::SkyParams;

/// Egui context, winit state, and wgpu renderer for the overlay.
pub struct EguiOverlay {
    pub ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

/// Output from one egui frame, ready for rendering.
pub struct EguiFrameOutput {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

impl EguiOverlay {
    pub fn new(
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        window: &Arc<Window>,
    ) -> Self {
        let ctx = egui::Context::default();

        let mut style = egui::Style::default();
        style.visuals = egui::Visuals::dark();
        style.visuals.window_shadow = egui::Shadow::NONE;
        style.visuals.popup_shadow = egui::Shadow::NONE;
        ctx.set_style(style);

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window.as_ref(),
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let renderer = egui_wgpu::Renderer::new(
            device,
            output_format,
            None,  // depth format
            1,     // msaa samples
            false, // dithering
        );

        Self { ctx, state, renderer }
    }

    /// Process a winit event. Returns true if egui consumed it (don't pass
    /// to camera controls or burst spawning).
    pub fn on_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    /// Begin a new frame. Call before the UI code.
    pub fn begin_frame(&mut self, window: &Window) {
        let raw_input = self.state.take_egui_input(window);
        self.ctx.begin_frame(raw_input);
    }

    /// End the frame and get the output for rendering.
    pub fn end_frame(&mut self, window: &Window) -> EguiFrameOutput {
        let full_output = self.ctx.end_frame();

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        EguiFrameOutput {
            paint_jobs,
            textures_delta: full_output.textures_delta,
            pixels_per_point: full_output.pixels_per_point,
        }
    }

    /// Prepare textures and buffers. Call before creating the overlay pass.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output: &EguiFrameOutput,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }

        self.renderer
            .update_buffers(device, queue, encoder, &output.paint_jobs, screen_descriptor);
    }

    pub fn renderer(&self) -> &egui_wgpu::Renderer {
        &self.renderer
    }

    /// Free textures after the frame is done.
    pub fn cleanup(&mut self, output: &EguiFrameOutput) {
        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

/// Slider window for the sky model and burst tunables.
pub fn sky_panel(
    ctx: &egui::Context,
    sky: &mut SkyParams,
    base_size: &mut f32,
    radius: &mut f32,
) {
    egui::Window::new("Sky")
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.label("Atmosphere");
            ui.add(egui::Slider::new(&mut sky.turbidity, 1.0..=20.0).text("turbidity"));
            ui.add(egui::Slider::new(&mut sky.rayleigh, 0.0..=4.0).text("rayleigh"));
            ui.add(
                egui::Slider::new(&mut sky.mie_coefficient, 0.0..=0.1)
                    .text("mie coefficient"),
            );
            ui.add(
                egui::Slider::new(&mut sky.mie_directional_g, 0.0..=0.999)
                    .text("mie directional g"),
            );

            ui.separator();
            ui.label("Sun");
            ui.add(egui::Slider::new(&mut sky.elevation, -5.0..=10.0).text("elevation"));
            ui.add(egui::Slider::new(&mut sky.azimuth, -180.0..=180.0).text("azimuth"));
            ui.add(egui::Slider::new(&mut sky.exposure, 0.0..=1.0).text("exposure"));

            ui.separator();
            ui.label("Bursts");
            ui.add(egui::Slider::new(base_size, 0.01..=0.5).text("base size"));
            ui.add(egui::Slider::new(radius, 0.1..=3.0).text("radius"));

            if ui.button("Reset sky").clicked() {
                *sky = SkyParams::default();
            }
        });
}
