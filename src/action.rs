#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    PlaceBomb,
}

impl Action {
    pub const COUNT: usize = 5;

    /// Table column order. Greedy ties resolve to the earliest entry.
    pub const ALL: [Action; Action::COUNT] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::PlaceBomb,
    ];

    pub fn index(self) -> usize {
        match self {
            Action::Up => 0,
            Action::Down => 1,
            Action::Left => 2,
            Action::Right => 3,
            Action::PlaceBomb => 4,
        }
    }

    /// (row, col) step for movement actions.
    pub fn delta(self) -> Option<(isize, isize)> {
        match self {
            Action::Up => Some((-1, 0)),
            Action::Down => Some((1, 0)),
            Action::Left => Some((0, -1)),
            Action::Right => Some((0, 1)),
            Action::PlaceBomb => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_table_order() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
        }
        assert_eq!(Action::ALL.len(), Action::COUNT);
    }

    #[test]
    fn test_delta() {
        assert_eq!(Action::Up.delta(), Some((-1, 0)));
        assert_eq!(Action::Right.delta(), Some((0, 1)));
        assert_eq!(Action::PlaceBomb.delta(), None);
    }
}
