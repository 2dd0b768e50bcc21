use crate::overlay::{Overlay, OverlayStats};
use anyhow::{Context, Result};
use pyramid_common::ViewerConfig;
use pyramid_input::{ButtonAction, MouseButton, MouseController, PointerEvent, PointerState};
use pyramid_render_wgpu::{Camera, CameraController, PyramidRenderer};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Pixel wheel deltas (touchpads) are converted to lines at this rate.
const PIXELS_PER_LINE: f64 = 20.0;

/// Window and GPU objects, all created together in `resumed`.
struct GpuState {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: PyramidRenderer,
    overlay: Overlay,
}

impl GpuState {
    fn new(event_loop: &ActiveEventLoop, cfg: &ViewerConfig) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(cfg.window.title.clone())
            .with_inner_size(PhysicalSize::new(cfg.window.width, cfg.window.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("pyramid_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("failed to create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no supported formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if cfg.window.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mut renderer = PyramidRenderer::new(&device, surface_format, config.width, config.height);
        renderer.set_clear_color(cfg.render.clear_color);

        let overlay = Overlay::new(&window, &device, surface_format);

        tracing::info!(
            "GPU initialized with {} backend ({:?})",
            adapter.get_info().backend.to_str(),
            surface_format
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            overlay,
        })
    }

    fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }
}

/// The viewer: sets up the scene once, then renders and forwards input.
pub struct ViewerApp {
    config: ViewerConfig,
    gpu: Option<GpuState>,
    controller: Option<CameraController>,
    pointer: PointerState,
    init_error: Option<anyhow::Error>,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            gpu: None,
            controller: None,
            pointer: PointerState::new(),
            init_error: None,
        }
    }

    /// Error that stopped initialization, if any. Checked after the event loop returns.
    pub fn finish(self) -> Result<()> {
        match self.init_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn forward_pointer(&mut self, event: PointerEvent) {
        let controller = self
            .controller
            .as_mut()
            .map(|c| c as &mut dyn MouseController);
        self.pointer.dispatch(event, controller);
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };
        gpu.config.width = new_size.width.max(1);
        gpu.config.height = new_size.height.max(1);
        gpu.surface.configure(&gpu.device, &gpu.config);
        gpu.renderer
            .resize(&gpu.device, gpu.config.width, gpu.config.height);

        let aspect = gpu.aspect();
        if let Some(controller) = &mut self.controller {
            controller.camera_mut().set_aspect(aspect);
        }
        tracing::debug!("framebuffer resized to {}x{}", gpu.config.width, gpu.config.height);
    }

    fn redraw(&mut self) {
        let (Some(gpu), Some(controller)) = (&mut self.gpu, &self.controller) else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let camera = controller.camera();
        gpu.renderer
            .render(&gpu.device, &gpu.queue, &view, camera);

        let stats = OverlayStats {
            camera_position: camera.position().to_array(),
            fov_degrees: camera.fov().to_degrees(),
            size: [gpu.config.width, gpu.config.height],
            dragging: controller.is_dragging(),
        };
        gpu.overlay
            .render(&gpu.window, &gpu.device, &gpu.queue, &view, &stats);

        output.present();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        match key {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::F1 => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.overlay.toggle();
                }
            }
            _ => {}
        }
    }
}

fn map_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Back => MouseButton::Other(3),
        winit::event::MouseButton::Forward => MouseButton::Other(4),
        winit::event::MouseButton::Other(n) => MouseButton::Other(n),
    }
}

fn map_action(state: ElementState) -> ButtonAction {
    match state {
        ElementState::Pressed => ButtonAction::Press,
        ElementState::Released => ButtonAction::Release,
    }
}

/// Reduce a window event to a pointer event, if it is one.
fn pointer_event(event: &WindowEvent) -> Option<PointerEvent> {
    match *event {
        WindowEvent::MouseInput { button, state, .. } => Some(PointerEvent::Button {
            button: map_button(button),
            action: map_action(state),
        }),
        WindowEvent::CursorMoved { position, .. } => Some(PointerEvent::Moved {
            x: position.x,
            y: position.y,
        }),
        WindowEvent::MouseWheel { delta, .. } => {
            let dy = match delta {
                MouseScrollDelta::LineDelta(_, y) => y as f64,
                MouseScrollDelta::PixelDelta(p) => p.y / PIXELS_PER_LINE,
            };
            Some(PointerEvent::Scrolled { dy })
        }
        _ => None,
    }
}

/// Whether the overlay keeps a pointer event from the controller. Only presses
/// and wheel motion are withheld; releases and moves always pass so a drag
/// that ends over the panel still finishes.
fn overlay_blocks(event: &PointerEvent, consumed: bool) -> bool {
    consumed
        && matches!(
            event,
            PointerEvent::Button {
                action: ButtonAction::Press,
                ..
            } | PointerEvent::Scrolled { .. }
        )
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match GpuState::new(event_loop, &self.config) {
            Ok(gpu) => {
                let camera = Camera::from_config(&self.config.camera, gpu.aspect());
                self.controller = Some(CameraController::with_scale(
                    camera,
                    self.config.controller.rotation_scale,
                ));
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("initialization failed: {e:#}");
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let consumed = match &mut self.gpu {
            Some(gpu) => gpu.overlay.on_window_event(&gpu.window, &event),
            None => false,
        };

        if let Some(pointer) = pointer_event(&event) {
            if !overlay_blocks(&pointer, consumed) {
                self.forward_pointer(pointer);
            }
            return;
        }
        if consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => self.resize(new_size),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, key),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}
