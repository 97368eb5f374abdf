use genesis::tile::TILE_SIZE;
use genesis::{Plane, PLANE_HEIGHT, PLANE_WIDTH};

use crate::color_map::{to_rgba, Rgba};
use crate::vram::Vram;

pub const WIDTH: usize = PLANE_WIDTH as usize * TILE_SIZE;
pub const HEIGHT: usize = PLANE_HEIGHT as usize * TILE_SIZE;

/// Draw order, front to back. Priority beats plane; plane A beats plane B.
const LAYERS: [(Plane, bool); 4] = [(Plane::A, true), (Plane::B, true), (Plane::A, false), (Plane::B, false)];

/// A 320×224 RGBA screen.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Vec<Rgba>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self { pixels: vec![[0, 0, 0, 0xFF]; WIDTH * HEIGHT] }
    }
}

impl FrameBuffer {
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.pixels[y * WIDTH + x]
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Tightly packed RGBA8, row-major, ready for a texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// CRAM color of the front-most opaque pixel at screen position (`x`, `y`).
pub fn resolve_pixel(vram: &Vram, x: usize, y: usize) -> u16 {
    let (cx, cy) = ((x / TILE_SIZE) as u16, (y / TILE_SIZE) as u16);
    let (px, py) = (x % TILE_SIZE, y % TILE_SIZE);

    for (plane, priority) in LAYERS {
        let Some(attr) = vram.cell(plane, cx, cy) else {
            continue;
        };
        if attr.priority() != priority {
            continue;
        }

        let tx = if attr.hflip() { TILE_SIZE - 1 - px } else { px };
        let ty = if attr.vflip() { TILE_SIZE - 1 - py } else { py };
        let index = vram.tile(attr.index()).pixel(tx, ty);

        if index != 0 {
            return vram.palette(attr.palette()).color(index);
        }
    }

    vram.backdrop()
}

/// Composite both planes over the backdrop into `fb`.
pub fn render(vram: &Vram, fb: &mut FrameBuffer) {
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            fb.pixels[y * WIDTH + x] = to_rgba(resolve_pixel(vram, x, y));
        }
    }
}
