/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Returns true if `other` moves along the other axis.
    ///
    /// Only perpendicular turns are allowed, which rules out both a 180-degree
    /// reversal and a no-op request for the current direction.
    pub fn is_perpendicular(&self, other: Direction) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }

    /// Returns the delta (dx, dy) for one step, scaled by the cell size
    pub fn delta(&self, cell_size: i32) -> (i32, i32) {
        match self {
            Direction::Up => (0, -cell_size),
            Direction::Down => (0, cell_size),
            Direction::Left => (-cell_size, 0),
            Direction::Right => (cell_size, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perpendicular_directions() {
        assert!(Direction::Up.is_perpendicular(Direction::Left));
        assert!(Direction::Up.is_perpendicular(Direction::Right));
        assert!(Direction::Left.is_perpendicular(Direction::Down));

        assert!(!Direction::Up.is_perpendicular(Direction::Down));
        assert!(!Direction::Left.is_perpendicular(Direction::Right));
        assert!(!Direction::Right.is_perpendicular(Direction::Right));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(20), (0, -20));
        assert_eq!(Direction::Down.delta(20), (0, 20));
        assert_eq!(Direction::Left.delta(20), (-20, 0));
        assert_eq!(Direction::Right.delta(20), (20, 0));
        assert_eq!(Direction::Right.delta(1), (1, 0));
    }
}
