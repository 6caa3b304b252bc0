use crate::GridInt;

use crossterm::event::KeyCode;

use Direction::*;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (GridInt, GridInt) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn from_code(code: KeyCode) -> Option<Direction> {
        match code {
            KeyCode::Char('w') | KeyCode::Up => Some(Up),
            KeyCode::Char('a') | KeyCode::Left => Some(Left),
            KeyCode::Char('s') | KeyCode::Down => Some(Down),
            KeyCode::Char('d') | KeyCode::Right => Some(Right),
            _ => None,
        }
    }

    fn same_axis(self, other: Direction) -> bool {
        self.is_vertical() == other.is_vertical()
    }

    fn is_vertical(self) -> bool {
        matches!(self, Up | Down)
    }
}

// Filters the raw key stream into accepted movement directions. A key is
// dropped when it shares an axis pair with the last accepted key, which
// covers both a repeat of the same key and a reversal onto the opposite one.
// The first valid key has nothing to compare against and always passes.
pub struct DirectionArbiter {
    last: Option<Direction>,
}

impl DirectionArbiter {
    pub fn new() -> Self {
        DirectionArbiter { last: None }
    }

    pub fn accept(&mut self, code: KeyCode) -> Option<Direction> {
        let dir = Direction::from_code(code)?;

        if let Some(last) = self.last {
            if dir.same_axis(last) {
                return None;
            }
        }

        self.last = Some(dir);
        Some(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_valid_key_is_always_accepted() {
        assert_eq!(DirectionArbiter::new().accept(KeyCode::Up), Some(Up));
        assert_eq!(DirectionArbiter::new().accept(KeyCode::Down), Some(Down));
        assert_eq!(DirectionArbiter::new().accept(KeyCode::Left), Some(Left));
        assert_eq!(DirectionArbiter::new().accept(KeyCode::Right), Some(Right));
    }

    #[test]
    fn repeated_key_is_dropped() {
        let mut arbiter = DirectionArbiter::new();

        assert_eq!(arbiter.accept(KeyCode::Down), Some(Down));
        assert_eq!(arbiter.accept(KeyCode::Down), None);
    }

    #[test]
    fn same_axis_reversal_is_dropped() {
        let mut arbiter = DirectionArbiter::new();

        assert_eq!(arbiter.accept(KeyCode::Down), Some(Down));
        assert_eq!(arbiter.accept(KeyCode::Up), None);
        assert_eq!(arbiter.accept(KeyCode::Left), Some(Left));
        assert_eq!(arbiter.accept(KeyCode::Right), None);
    }

    #[test]
    fn cross_axis_key_is_accepted() {
        let mut arbiter = DirectionArbiter::new();

        assert_eq!(arbiter.accept(KeyCode::Down), Some(Down));
        assert_eq!(arbiter.accept(KeyCode::Right), Some(Right));
        assert_eq!(arbiter.accept(KeyCode::Up), Some(Up));
    }

    #[test]
    fn unmapped_keys_are_ignored_without_touching_memory() {
        let mut arbiter = DirectionArbiter::new();

        assert_eq!(arbiter.accept(KeyCode::Right), Some(Right));
        assert_eq!(arbiter.accept(KeyCode::Char('x')), None);
        assert_eq!(arbiter.accept(KeyCode::Esc), None);
        // Still on the horizontal axis, so Left must stay blocked.
        assert_eq!(arbiter.accept(KeyCode::Left), None);
    }

    #[test]
    fn wasd_maps_like_the_arrows() {
        let mut arbiter = DirectionArbiter::new();

        assert_eq!(arbiter.accept(KeyCode::Char('s')), Some(Down));
        assert_eq!(arbiter.accept(KeyCode::Char('a')), Some(Left));
        assert_eq!(arbiter.accept(KeyCode::Char('w')), Some(Up));
        assert_eq!(arbiter.accept(KeyCode::Char('d')), Some(Right));
    }
}
