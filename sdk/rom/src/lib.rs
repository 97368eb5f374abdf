//! A movable, windowed cursor on the Mega Drive / Genesis.
//!
//! Plane B is filled with a solid white tile. Plane A holds a single hollow
//! magenta square whose interior is color 0, so the white of plane B shows
//! through it. The D-pad on gamepad 1 moves the square one cell per press,
//! and it stops at the edges of the 40×28 visible area.
//!
//! The whole program is [`demo::run`]; everything else is split out so the
//! pieces can be driven one frame at a time.

#![no_std]

extern crate alloc;

pub mod assets;
pub mod cursor;
pub mod demo;
pub mod direction;
pub mod mailbox;

pub use cursor::{Bounds, Cursor, Step};
pub use demo::{CursorDemo, FrameOutcome, run};
pub use direction::Direction;
pub use mailbox::MoveMailbox;
