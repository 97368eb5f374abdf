use genesis::Buttons;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// First held button wins. Left and right beat up and down, and up beats
/// down when both are somehow held.
const PRIORITY: [(Buttons, Direction); 4] = [
    (Buttons::LEFT, Direction::Left),
    (Buttons::RIGHT, Direction::Right),
    (Buttons::UP, Direction::Up),
    (Buttons::DOWN, Direction::Down),
];

impl Direction {
    /// The single direction requested by a pad state, if any.
    pub fn from_buttons(state: Buttons) -> Option<Direction> {
        PRIORITY
            .iter()
            .find(|(button, _)| state.contains(*button))
            .map(|&(_, dir)| dir)
    }

    /// Unit step in cells, +x right and +y down.
    pub const fn offset(self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}
