use std::fmt::{Display, Formatter};
use std::path::Path;

use anyhow::Context;
use genesis::{Buttons, JoyPort};
use mdv_core::console::Console;
use mdv_core::renderer::{FrameBuffer, HEIGHT, WIDTH};
use mdv_core::vram::TransferStats;
use plane_cursor::assets::{CURSOR_PLANE, VRAM_POS_TILE_CURSOR};
use tracing::{debug, info, warn};

use crate::script::Script;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessReport {
    pub frames: u64,
    /// Every cell holding the cursor tile. One, unless something went wrong.
    pub cursor_cells: Vec<(u16, u16)>,
    pub stats: TransferStats,
}

impl Display for HeadlessReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.cursor_cells.as_slice() {
            [(x, y)] => write!(f, "frame {}: cursor at ({}, {})", self.frames, x, y)?,
            cells => write!(f, "frame {}: {} cursor cells {:?}", self.frames, cells.len(), cells)?,
        }
        write!(
            f,
            ", {} cell writes, {} palette loads, {} dropped",
            self.stats.cell_writes, self.stats.palette_loads, self.stats.dropped_writes
        )
    }
}

/// Boot the demo, play `script` on pad 1, keep going to at least `min_frames`.
pub fn run(script: &Script, min_frames: u32, screenshot: Option<&Path>) -> anyhow::Result<HeadlessReport> {
    let mut console = Console::power_on(|vdp, joy| plane_cursor::run(vdp, joy))?;
    info!("playing {} taps over {} frames", script.taps().len(), script.frames());

    for state in script.frame_states() {
        console.set_buttons(JoyPort::Joy1, state);
        let frame = console.step_frame()?;
        debug!("frame {}: pad {:?}", frame, state);
    }

    console.set_buttons(JoyPort::Joy1, Buttons::empty());
    while console.frame_count() < u64::from(min_frames) {
        console.step_frame()?;
    }

    let report = console.with_vram(|vram| HeadlessReport {
        frames: console.frame_count(),
        cursor_cells: vram.find_tile(CURSOR_PLANE, VRAM_POS_TILE_CURSOR),
        stats: vram.stats(),
    });

    if report.cursor_cells.len() != 1 {
        warn!("expected one cursor on {:?}, found {}", CURSOR_PLANE, report.cursor_cells.len());
    }

    if let Some(path) = screenshot {
        let mut fb = FrameBuffer::default();
        console.render(&mut fb);
        image::save_buffer(path, fb.as_bytes(), WIDTH as u32, HEIGHT as u32, image::ExtendedColorType::Rgba8)
            .with_context(|| format!("couldn't write screenshot to {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    Ok(report)
}
