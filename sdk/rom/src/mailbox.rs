use spin::Mutex;

use crate::direction::Direction;

/// Single-slot hand-off from the gamepad handler to the frame loop.
///
/// Holds at most one pending move. Posting while a move is already pending
/// replaces it; nothing is queued. The frame loop takes the value out, which
/// empties the slot in the same critical section.
#[derive(Debug, Default)]
pub struct MoveMailbox {
    slot: Mutex<Option<Direction>>,
}

impl MoveMailbox {
    pub const fn new() -> Self {
        Self { slot: Mutex::new(None) }
    }

    /// Store `dir`, returning whatever it overwrote.
    pub fn post(&self, dir: Direction) -> Option<Direction> {
        self.slot.lock().replace(dir)
    }

    /// Remove and return the pending move.
    pub fn take(&self) -> Option<Direction> {
        self.slot.lock().take()
    }

    pub fn peek(&self) -> Option<Direction> {
        *self.slot.lock()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.lock().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let mailbox = MoveMailbox::new();
        assert!(mailbox.is_empty());
        assert_eq!(mailbox.take(), None);
    }

    #[test]
    fn last_post_wins() {
        let mailbox = MoveMailbox::new();
        assert_eq!(mailbox.post(Direction::Up), None);
        assert_eq!(mailbox.post(Direction::Right), Some(Direction::Up));
        assert_eq!(mailbox.peek(), Some(Direction::Right));

        assert_eq!(mailbox.take(), Some(Direction::Right));
        assert_eq!(mailbox.take(), None);
        assert!(mailbox.is_empty());
    }
}
