//! Newton's Cannonball
//!
//! A cannonball is fired horizontally from a mountain on a spherical planet.
//! Gravity bends its path towards the planet center; depending on the launch
//! speed it either falls back to the ground or keeps circling.
//!
//! The simulation advances one fixed time step per displayed frame and has
//! no interactive controls. Set `RUST_LOG=info` to see when the ball lands,
//! and `CANNONBALL_PLANET_IMAGE` to draw a different planet.

use anyhow::Context;
use cannonball::{
    asset::{load_planet_image, PlanetImage},
    config::{planet_image_path, PhysicalConstants, SceneStyle, MAX_CIRCLES, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH},
    coords::SurfaceSize,
    equations_ui::{draw_equations_sidebar, draw_flight_status, CANNONBALL_EQUATIONS, CANNONBALL_VARIABLES},
    renderer::{SceneRenderer, TextureId},
    simulation::Simulation,
};
use common::{GraphicsContext, ScreenCamera};
use winit::{
    event::{Event, WindowEvent},
    event_loop::ControlFlow,
};

/// Only the planet is blitted each frame
const MAX_SPRITES: usize = 4;

struct EguiState {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

struct App {
    ctx: GraphicsContext,
    renderer: SceneRenderer,
    planet: TextureId,
    simulation: Simulation,
    egui: EguiState,
}

impl App {
    fn new(ctx: GraphicsContext, planet_image: &PlanetImage) -> Self {
        let mut renderer = SceneRenderer::new(&ctx, MAX_CIRCLES, MAX_SPRITES);
        let planet = renderer.upload_texture(&ctx, planet_image);

        let simulation = Simulation::new(PhysicalConstants::default(), SceneStyle::default());

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &ctx.window,
            Some(ctx.window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&ctx.device, ctx.config.format, None, 1);

        Self {
            ctx,
            renderer,
            planet,
            simulation,
            egui: EguiState {
                ctx: egui_ctx,
                state: egui_state,
                renderer: egui_renderer,
            },
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
    }

    /// Keep egui's view of the window geometry current
    fn handle_window_event(&mut self, event: &WindowEvent) {
        let _ = self.egui.state.on_window_event(&self.ctx.window, event);
    }

    /// One display tick: integrate, then draw the scene and the panels
    fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.ctx.sync_size();
        let surface = SurfaceSize::from_physical(
            self.ctx.size.width,
            self.ctx.size.height,
            self.ctx.scale_factor(),
        );

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.begin_frame();
        self.simulation.tick(surface, &mut self.renderer, &self.planet);

        let camera = ScreenCamera::new(surface.width as f32, surface.height as f32);
        self.renderer.update_camera(&self.ctx.queue, &camera);
        self.renderer.prepare(&self.ctx.queue);

        // Build egui UI
        let telemetry = self.simulation.state.telemetry();
        let raw_input = self.egui.state.take_egui_input(&self.ctx.window);
        let full_output = self.egui.ctx.run(raw_input, |ctx| {
            draw_equations_sidebar(ctx, "Newton's Cannonball", CANNONBALL_EQUATIONS, CANNONBALL_VARIABLES);
            draw_flight_status(ctx, &telemetry);
        });

        self.egui.state.handle_platform_output(&self.ctx.window, full_output.platform_output);
        let tris = self.egui.ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui.renderer.update_texture(&self.ctx.device, &self.ctx.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.ctx.size.width, self.ctx.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer
            .render(&mut encoder, &view, self.simulation.style.background);

        self.egui.renderer.update_buffers(
            &self.ctx.device,
            &self.ctx.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
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
            self.egui.renderer.render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui.renderer.free_texture(id);
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let (ctx, event_loop) = pollster::block_on(GraphicsContext::new(
        WINDOW_TITLE,
        WINDOW_WIDTH,
        WINDOW_HEIGHT,
    ))?;

    // The animation only starts once the planet image is available
    let image_path = planet_image_path();
    let planet_image = match load_planet_image(&image_path) {
        Ok(image) => image,
        Err(err) => {
            log::error!("{:#}; not starting the animation", err);
            return Ok(());
        }
    };

    let mut app = App::new(ctx, &planet_image);

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { ref event, .. } => match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(size) => {
                        app.handle_window_event(event);
                        app.resize(*size);
                    }
                    WindowEvent::ScaleFactorChanged { .. } => app.handle_window_event(event),
                    WindowEvent::RedrawRequested => match app.frame() {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => app.resize(app.ctx.size),
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("GPU out of memory, exiting");
                            elwt.exit();
                        }
                        Err(e) => log::error!("Render error: {:?}", e),
                    },
                    _ => {}
                },
                Event::AboutToWait => {
                    app.ctx.window.request_redraw();
                }
                _ => {}
            }
        })
        .context("event loop error")?;

    Ok(())
}
