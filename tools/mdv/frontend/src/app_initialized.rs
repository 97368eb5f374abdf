use std::collections::HashMap;
use std::sync::Arc;

use egui_wgpu::ScreenDescriptor;
use mdv_core::emulator::Emulator;
use mdv_core::inputs::InputCommand::{Controller1, PlayPause, Reset};
use mdv_core::inputs::{ControllerButton, InputCommand, KeyState};
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::ElementState::Pressed;
use winit::event::{KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::NamedKey::{ArrowDown, ArrowLeft, ArrowRight, ArrowUp, Backspace, Enter, Space};
use winit::keyboard::{Key, SmolStr};
use winit::window::{Window, WindowId};

use crate::app_delegation::InstantClock;
use crate::app_ui::screen::ScreenUI;
use crate::egui_renderer::EguiRenderer;
use crate::graphics::GraphicsContext;

pub fn default_bindings() -> HashMap<Key, InputCommand> {
    let mut input_bindings = HashMap::new();

    input_bindings.insert(Key::Named(ArrowUp), Controller1(ControllerButton::Up));
    input_bindings.insert(Key::Named(ArrowDown), Controller1(ControllerButton::Down));
    input_bindings.insert(Key::Named(ArrowLeft), Controller1(ControllerButton::Left));
    input_bindings.insert(Key::Named(ArrowRight), Controller1(ControllerButton::Right));
    input_bindings.insert(Key::Character(SmolStr::new("z")), Controller1(ControllerButton::A));
    input_bindings.insert(Key::Character(SmolStr::new("x")), Controller1(ControllerButton::B));
    input_bindings.insert(Key::Character(SmolStr::new("c")), Controller1(ControllerButton::C));
    input_bindings.insert(Key::Named(Enter), Controller1(ControllerButton::Start));
    input_bindings.insert(Key::Named(Space), PlayPause);
    input_bindings.insert(Key::Named(Backspace), Reset);

    input_bindings
}

pub struct AppInitialized {
    pub emulator: Emulator<InstantClock>,
    pub gc: GraphicsContext,
    pub window: Arc<Window>,
    pub egui_renderer: EguiRenderer,

    pub screen: ScreenUI,

    pub input_bindings: HashMap<Key, InputCommand>,
}

impl AppInitialized {
    pub fn new(emulator: Emulator<InstantClock>, mut gc: GraphicsContext, window: Arc<Window>, egui_renderer: EguiRenderer, scale: u8) -> Self {
        let screen = ScreenUI::init(egui_renderer.context(), Some(scale));

        let size = window.inner_size();
        gc.resize(size.width, size.height);

        Self {
            emulator,
            gc,
            window,
            egui_renderer,
            screen,
            input_bindings: default_bindings(),
        }
    }

    fn handle_redraw(&mut self) {
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [self.gc.surface_config.width, self.gc.surface_config.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let surface_texture = match self.gc.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.window.inner_size();
                self.gc.resize(size.width, size.height);
                return;
            }
            Err(e) => {
                warn!("skipping frame: {e}");
                return;
            }
        };

        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.gc
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        self.egui_renderer.begin_frame(&self.window);

        egui::TopBottomPanel::bottom("status").resizable(false).show(self.egui_renderer.context(), |ui| {
            self.screen.status(ui, &self.emulator);
        });

        egui::CentralPanel::default().frame(egui::Frame::NONE).show(self.egui_renderer.context(), |ui| {
            self.screen.draw(ui, &self.emulator);
        });

        self.egui_renderer.end_frame_and_draw(
            &self.gc.device,
            &self.gc.queue,
            &mut encoder,
            &self.window,
            &surface_view,
            screen_descriptor,
        );

        self.gc.queue.submit(Some(encoder.finish()));
        surface_texture.present();
    }

    fn process_frames(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(e) = self.emulator.process_frames() {
            error!("console stopped: {e}");
            event_loop.exit();
        }
    }

    fn handle_key(&mut self, event: KeyEvent) {
        let KeyEvent { logical_key, state, repeat, .. } = event;
        if repeat {
            return;
        }

        if let Some(cmd) = self.input_bindings.get(&logical_key).copied() {
            let ks = match self.emulator.input_state.get(&cmd) {
                Some(ks) => ks.update_state(state == Pressed),
                None => KeyState::new(state == Pressed),
            };
            self.emulator.set_input_state(cmd, ks);
        }
    }
}

impl ApplicationHandler for AppInitialized {
    fn resumed(&mut self, _: &ActiveEventLoop) {}

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        self.egui_renderer.handle_input(&self.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                info!("close requested");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.process_frames(event_loop);
                self.handle_redraw();
                self.window.request_redraw();
            }
            WindowEvent::Resized(new_size) => {
                self.gc.resize(new_size.width, new_size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event),
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.process_frames(event_loop);
    }

    fn exiting(&mut self, _: &ActiveEventLoop) {
        info!("exiting after {} frames", self.emulator.console.frame_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_drive_pad_one() {
        let bindings = default_bindings();
        assert_eq!(bindings[&Key::Named(ArrowLeft)], Controller1(ControllerButton::Left));
        assert_eq!(bindings[&Key::Named(Space)], PlayPause);
        assert_eq!(bindings.values().filter(|c| matches!(c, Controller1(_))).count(), 8);
    }
}
