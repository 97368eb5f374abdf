use std::sync::Arc;
use std::time::Instant;

use mdv_core::emulator::{program, Emulator};
use mdv_core::renderer::{HEIGHT, WIDTH};
use tracing::{error, info};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes, WindowId};

use crate::app_delegation::InstantClock;
use crate::app_initialized::AppInitialized;
use crate::egui_renderer::EguiRenderer;
use crate::graphics::GraphicsContext;

/// Height of the status bar under the screen, in logical pixels.
pub const STATUS_BAR: u32 = 24;

pub struct App {
    pub emulator: Option<Emulator<InstantClock>>,
    pub gc: Option<GraphicsContext>,
    pub window: Option<Arc<Window>>,
    pub egui_renderer: Option<EguiRenderer>,
    pub scale: u8,

    pub app_initialized: Option<AppInitialized>,
}

impl App {
    pub fn new(scale: u8) -> anyhow::Result<Self> {
        let clock = InstantClock {
            instant: Instant::now(),
        };
        let emulator = Emulator::init(clock, program(|vdp, joy| plane_cursor::run(vdp, joy)))?;

        Ok(Self {
            emulator: Some(emulator),
            gc: None,
            window: None,
            egui_renderer: None,
            scale: scale.max(1),
            app_initialized: None,
        })
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        info!("initializing...");
        let scale = self.scale as u32;
        let window_attributes = WindowAttributes::default()
            .with_title("mdv: plane cursor")
            .with_inner_size(LogicalSize::new(WIDTH as u32 * scale, HEIGHT as u32 * scale + STATUS_BAR))
            .with_min_inner_size(LogicalSize::new(WIDTH as u32, HEIGHT as u32 + STATUS_BAR));

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        self.window = Some(window.clone());

        let gc = pollster::block_on(GraphicsContext::new(window.clone()))?;
        self.egui_renderer = Some(EguiRenderer::new(&gc.device, gc.surface_config.format, None, 1, &window));
        self.gc = Some(gc);

        info!("initialized");
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_window(event_loop) {
            error!("couldn't open a window: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        if let WindowEvent::CloseRequested = event {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        if self.app_initialized.is_some() {
            return;
        }

        if self.emulator.is_none() || self.gc.is_none() || self.window.is_none() || self.egui_renderer.is_none() {
            return;
        }
        let (Some(emulator), Some(gc), Some(window), Some(egui_renderer)) =
            (self.emulator.take(), self.gc.take(), self.window.take(), self.egui_renderer.take())
        else {
            return;
        };

        let app_init = AppInitialized::new(emulator, gc, window, egui_renderer, self.scale);
        app_init.window.request_redraw();
        self.app_initialized = Some(app_init);
    }
}
