use egui::Context as EguiContext;
use winit::event::WindowEvent;
use winit::window::Window;

/// Values shown in the overlay panel, captured once per frame.
pub struct OverlayStats {
    pub camera_position: [f32; 3],
    pub fov_degrees: f32,
    pub size: [u32; 2],
    pub dragging: bool,
}

/// egui side panel drawn on top of the pyramid.
pub struct Overlay {
    ctx: EguiContext,
    winit: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    visible: bool,
}

impl Overlay {
    pub fn new(window: &Window, device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let ctx = EguiContext::default();
        let winit = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(device, format, None, 1, false);
        Self {
            ctx,
            winit,
            renderer,
            visible: true,
        }
    }

    /// Feed a window event to egui. Returns true when egui consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        if !self.visible {
            return false;
        }
        self.winit.on_window_event(window, event).consumed
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        tracing::debug!("overlay visible: {}", self.visible);
    }

    /// Draw the panel into `view`, loading the existing frame contents.
    pub fn render(
        &mut self,
        window: &Window,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        stats: &OverlayStats,
    ) {
        if !self.visible {
            return;
        }

        let raw_input = self.winit.take_egui_input(window);
        let full_output = self.ctx.run(raw_input, |ctx| draw_panel(ctx, stats));
        self.winit
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: stats.size,
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        self.renderer.update_buffers(
            device,
            queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

fn draw_panel(ctx: &EguiContext, stats: &OverlayStats) {
    egui::SidePanel::left("overlay")
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Pyramid");
            ui.separator();
            let [x, y, z] = stats.camera_position;
            ui.label(format!("Camera: ({x:.2}, {y:.2}, {z:.2})"));
            ui.label(format!("FOV: {:.1}°", stats.fov_degrees));
            ui.label(format!("Framebuffer: {} x {}", stats.size[0], stats.size[1]));
            if stats.dragging {
                ui.label("Orbiting");
            }
            ui.separator();
            ui.small("LMB drag: orbit | Wheel: zoom | F1: toggle panel | Esc: quit");
        });
}
