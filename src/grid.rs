use std::fmt;

/// Default exclusive upper bound for both axes.
pub const GRID_MAX: i32 = 50;

/// A grid point. Range checks are the caller's job, see [`Position::in_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Hashable, orderable form used for reached sets and frontier indices.
    pub fn to_key(self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn in_bounds(self, bound: i32) -> bool {
        (0..bound).contains(&self.x) && (0..bound).contains(&self.y)
    }

    /// Moves one unit in the direction of `action`. No bounds check.
    pub fn shifted(self, action: Action) -> Self {
        let (dx, dy) = action.delta();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Straight-line distance.
    pub fn distance(self, other: Position) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    /// True when `other` is exactly one unit away along a single axis.
    pub fn is_adjacent(self, other: Position) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four cardinal moves. `y` grows upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Right,
    Down,
    Left,
}

impl Action {
    /// Expansion order.
    pub const ALL: [Action; 4] = [Action::Up, Action::Right, Action::Down, Action::Left];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Action::Up => (0, 1),
            Action::Right => (1, 0),
            Action::Down => (0, -1),
            Action::Left => (-1, 0),
        }
    }

    /// The action leading from `from` to the adjacent point `to`, if any.
    pub fn between(from: Position, to: Position) -> Option<Action> {
        let delta = (to.x - from.x, to.y - from.y);
        Action::ALL.into_iter().find(|action| action.delta() == delta)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Up => "UP",
            Action::Right => "RIGHT",
            Action::Down => "DOWN",
            Action::Left => "LEFT",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_half_open() {
        assert!(Position::new(0, 0).in_bounds(10));
        assert!(Position::new(9, 9).in_bounds(10));
        assert!(!Position::new(10, 3).in_bounds(10));
        assert!(!Position::new(3, -1).in_bounds(10));
    }

    #[test]
    fn actions_shift_by_one_unit() {
        let origin = Position::new(5, 5);
        assert_eq!(origin.shifted(Action::Up), Position::new(5, 6));
        assert_eq!(origin.shifted(Action::Right), Position::new(6, 5));
        assert_eq!(origin.shifted(Action::Down), Position::new(5, 4));
        assert_eq!(origin.shifted(Action::Left), Position::new(4, 5));
    }

    #[test]
    fn between_recovers_action() {
        let a = Position::new(2, 2);
        assert_eq!(Action::between(a, Position::new(2, 3)), Some(Action::Up));
        assert_eq!(Action::between(a, Position::new(1, 2)), Some(Action::Left));
        assert_eq!(Action::between(a, Position::new(3, 3)), None);
        assert_eq!(Action::between(a, a), None);
    }

    #[test]
    fn distance_is_euclidean() {
        let d = Position::new(0, 0).distance(Position::new(3, 4));
        assert!((d - 5.0).abs() < 1e-12);
        assert_eq!(Position::new(1, 2).to_key(), (1, 2));
    }
}
