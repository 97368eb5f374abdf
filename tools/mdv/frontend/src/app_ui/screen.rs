use egui::load::SizedTexture;
use egui::{vec2, Color32, ColorImage, Context, Frame, RichText, TextureHandle, TextureOptions, Ui};
use mdv_core::emulator::Emulator;
use mdv_core::emulator::PlayState::Paused;
use mdv_core::renderer::{FrameBuffer, HEIGHT, WIDTH};

use crate::app_delegation::InstantClock;

/// Largest whole-number zoom of the console screen that fits in `width` × `height`.
fn calculate_scale(width: f32, height: f32) -> f32 {
    let fit = (width / WIDTH as f32).min(height / HEIGHT as f32).floor();
    fit.max(1.0)
}

/// The console screen, drawn pixel-exact at an integer zoom.
pub struct ScreenUI {
    desired_scale: Option<u8>,
    screen: TextureHandle,
    fb: FrameBuffer,
}

impl ScreenUI {
    pub fn init(context: &Context, desired_scale: Option<u8>) -> Self {
        let fb = FrameBuffer::default();
        let screen = context.load_texture("screen", Self::color_image(&fb), TextureOptions::NEAREST);

        Self { desired_scale, screen, fb }
    }

    fn color_image(fb: &FrameBuffer) -> ColorImage {
        ColorImage::from_rgba_unmultiplied([WIDTH, HEIGHT], fb.as_bytes())
    }

    pub fn draw(&mut self, ui: &mut Ui, emulator: &Emulator<InstantClock>) {
        emulator.render(&mut self.fb);
        self.screen.set(Self::color_image(&self.fb), TextureOptions::NEAREST);

        let mut scale = calculate_scale(ui.available_width(), ui.available_height());
        // only shrink to the requested zoom, never grow past what fits
        if let Some(desired) = self.desired_scale {
            scale = scale.min(desired as f32);
        }

        let size = vec2(WIDTH as f32 * scale, HEIGHT as f32 * scale);
        Frame::default().fill(Color32::BLACK).show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.image(SizedTexture::new(self.screen.id(), size));
            });
        });
    }

    pub fn status(&self, ui: &mut Ui, emulator: &Emulator<InstantClock>) {
        ui.horizontal(|ui| {
            ui.label(format!("frame {}", emulator.console.frame_count()));
            if emulator.play_state == Paused {
                ui.label(RichText::new("paused").color(Color32::YELLOW));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label("arrows move · space pause · backspace reset");
            });
        });
    }
}
