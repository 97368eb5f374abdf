//! # VDP
//!
//! The Video Display Processor composes the screen from two scroll planes of
//! 8×8 tiles. Each plane cell holds a 16-bit name-table entry:
//!
//! | Bits   | Field                                   |
//! |--------|-----------------------------------------|
//! | 15     | Priority (high-priority cells draw over low ones) |
//! | 14–13  | Palette slot (`PAL0`–`PAL3`)            |
//! | 12     | Vertical flip                           |
//! | 11     | Horizontal flip                         |
//! | 10–0   | Tile index in VRAM                      |
//!
//! Plane A draws over plane B when both cells share a priority, and color 0
//! of any tile is transparent. Layering a mostly-clear tile on plane A over
//! a solid plane B is how this crate's users build "window" effects.
//!
//! Only the visible 40×28 cell region (320×224 in H40 mode) is addressable.

use bit_field::BitField;

use crate::palette::{PalSlot, Palette};
use crate::tile::Tile;

/// Visible plane width in cells (H40 mode).
pub const PLANE_WIDTH: u16 = 40;
/// Visible plane height in cells (NTSC, V28 mode).
pub const PLANE_HEIGHT: u16 = 28;

/// Number of tile slots in 64KB of VRAM.
pub const TILE_SLOTS: u16 = 2048;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Plane {
    /// Foreground scroll plane.
    A,
    /// Background scroll plane.
    B,
}

impl Plane {
    pub const ALL: [Plane; 2] = [Plane::A, Plane::B];

    pub const fn index(self) -> usize {
        match self {
            Plane::A => 0,
            Plane::B => 1,
        }
    }
}

/// A name-table entry. See the [module docs](self) for the bit layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct TileAttr(pub u16);

impl TileAttr {
    /// Tile 0, palette 0, no flags. Tile 0 is left blank by [`Vdp::init`],
    /// so writing this clears a cell.
    pub const EMPTY: TileAttr = TileAttr(0);

    pub fn new(priority: bool, pal: PalSlot, vflip: bool, hflip: bool, index: u16) -> Self {
        TileAttr(0)
            .with_priority(priority)
            .with_palette(pal)
            .with_vflip(vflip)
            .with_hflip(hflip)
            .with_index(index)
    }

    /// Low priority, palette 0, unflipped reference to `index`.
    pub const fn tile(index: u16) -> Self {
        TileAttr(index & 0x7FF)
    }

    #[inline]
    pub fn index(&self) -> u16 {
        self.0.get_bits(0..11)
    }

    #[inline]
    pub fn hflip(&self) -> bool {
        self.0.get_bit(11)
    }

    #[inline]
    pub fn vflip(&self) -> bool {
        self.0.get_bit(12)
    }

    #[inline]
    pub fn palette(&self) -> PalSlot {
        PalSlot::from_bits(self.0.get_bits(13..15))
    }

    #[inline]
    pub fn priority(&self) -> bool {
        self.0.get_bit(15)
    }

    pub fn with_index(mut self, index: u16) -> Self {
        self.0.set_bits(0..11, index & 0x7FF);
        self
    }

    pub fn with_hflip(mut self, flip: bool) -> Self {
        self.0.set_bit(11, flip);
        self
    }

    pub fn with_vflip(mut self, flip: bool) -> Self {
        self.0.set_bit(12, flip);
        self
    }

    pub fn with_palette(mut self, pal: PalSlot) -> Self {
        self.0.set_bits(13..15, pal.index() as u16);
        self
    }

    pub fn with_priority(mut self, priority: bool) -> Self {
        self.0.set_bit(15, priority);
        self
    }
}

/// How tile data gets from ROM/RAM into VRAM.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransferMethod {
    /// Word-by-word writes through the data port. Finished when the call returns.
    Cpu,
    /// Hand the copy to the VDP's DMA engine.
    Dma,
}

/// The video side of the console.
///
/// None of these calls can fail on real hardware; an implementation that
/// receives an out-of-range slot or cell is expected to drop the write.
pub trait Vdp {
    /// Reset registers, clear VRAM (leaving tile 0 blank), CRAM and both planes.
    fn init(&mut self);

    /// Copy `tiles` into consecutive VRAM slots starting at `index`.
    fn load_tile_data(&mut self, tiles: &[Tile], index: u16, method: TransferMethod);

    fn set_palette(&mut self, slot: PalSlot, palette: &Palette);

    /// Write one name-table entry at cell (`x`, `y`) of `plane`.
    fn set_tile_map_xy(&mut self, plane: Plane, attr: TileAttr, x: u16, y: u16);

    /// Block until the start of the next vertical blank.
    fn wait_vsync(&mut self);
}
