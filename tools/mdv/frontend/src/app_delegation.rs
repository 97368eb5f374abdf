use std::time::Instant;

use mdv_core::emulator::TimeDaemon;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use crate::app_initialized::AppInitialized;
use crate::app_uninit::App;

pub struct InstantClock {
    pub instant: Instant,
}

impl TimeDaemon for InstantClock {
    fn get_now_ms(&self) -> f64 {
        self.instant.elapsed().as_secs_f64() * 1000.0
    }
}

/// The app before and after it has a window, a GPU and an egui context.
pub enum DelegatedApp {
    Uninitialized(App),
    Initialized(AppInitialized),
}

impl ApplicationHandler for DelegatedApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        match self {
            DelegatedApp::Uninitialized(app) => app.resumed(event_loop),
            DelegatedApp::Initialized(app) => app.resumed(event_loop),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        match self {
            DelegatedApp::Uninitialized(app) => app.window_event(event_loop, window_id, event),
            DelegatedApp::Initialized(app) => app.window_event(event_loop, window_id, event),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        match self {
            DelegatedApp::Uninitialized(app) => {
                app.about_to_wait(event_loop);

                if let Some(app_initialized) = app.app_initialized.take() {
                    *self = DelegatedApp::Initialized(app_initialized);
                }
            }
            DelegatedApp::Initialized(app) => app.about_to_wait(event_loop),
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        match self {
            DelegatedApp::Uninitialized(app) => app.exiting(event_loop),
            DelegatedApp::Initialized(app) => app.exiting(event_loop),
        }
    }
}
