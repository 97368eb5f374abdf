use genesis::{PLANE_HEIGHT, PLANE_WIDTH};

use crate::direction::Direction;

/// Inclusive cell rectangle the cursor may occupy.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Bounds {
    pub x_min: u16,
    pub x_max: u16,
    pub y_min: u16,
    pub y_max: u16,
}

impl Bounds {
    /// The visible plane area, 0..=39 × 0..=27.
    pub const SCREEN: Bounds = Bounds {
        x_min: 0,
        x_max: PLANE_WIDTH - 1,
        y_min: 0,
        y_max: PLANE_HEIGHT - 1,
    };

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.x_min as i32..=self.x_max as i32).contains(&x)
            && (self.y_min as i32..=self.y_max as i32).contains(&y)
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        (self.y_min..=self.y_max).flat_map(move |y| (self.x_min..=self.x_max).map(move |x| (x, y)))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub x: u16,
    pub y: u16,
}

/// Result of asking the cursor to move one cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    Moved(Cursor),
    /// The move would have left the bounds; the cursor stays put.
    Blocked,
}

impl Cursor {
    /// Center of the 40×28 grid.
    pub const START: Cursor = Cursor { x: 20, y: 14 };

    pub fn step(self, dir: Direction, bounds: &Bounds) -> Step {
        let (dx, dy) = dir.offset();
        let x = self.x as i32 + dx as i32;
        let y = self.y as i32 + dy as i32;

        if bounds.contains(x, y) {
            Step::Moved(Cursor { x: x as u16, y: y as u16 })
        } else {
            Step::Blocked
        }
    }

    /// Where the cursor ends up after `dir`, blocked moves included.
    pub fn moved(self, dir: Direction, bounds: &Bounds) -> Cursor {
        match self.step(dir, bounds) {
            Step::Moved(next) => next,
            Step::Blocked => self,
        }
    }
}
