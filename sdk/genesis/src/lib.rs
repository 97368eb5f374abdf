//! # genesis
//!
//! Hardware abstraction for the parts of the Mega Drive / Genesis that a
//! tile-plane program touches: the VDP (tile VRAM, color RAM, the two scroll
//! planes and the vertical-blank wait) and the gamepad ports.
//!
//! Programs are written against the [`Vdp`](vdp::Vdp) and
//! [`Joypad`](input::Joypad) traits. On hardware those wrap the memory-mapped
//! registers; on the desktop the `mdv-core` emulator provides them.
//!
//! ```ignore
//! vdp.init();
//! vdp.load_tile_data(core::slice::from_ref(&MY_TILE), 1, TransferMethod::Cpu);
//! vdp.set_palette(PalSlot::Pal0, &MY_PALETTE);
//! vdp.set_tile_map_xy(Plane::B, TileAttr::tile(1), 0, 0);
//!
//! loop {
//!     vdp.wait_vsync();
//!     // update the planes for the next frame...
//! }
//! ```

#![no_std]

extern crate alloc;

pub mod input;
pub mod palette;
pub mod tile;
pub mod vdp;

pub use input::{Buttons, JoyEvent, JoyHandler, JoyPort, Joypad};
pub use palette::{PalSlot, Palette};
pub use tile::Tile;
pub use vdp::{PLANE_HEIGHT, PLANE_WIDTH, Plane, TileAttr, TransferMethod, Vdp};
