use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Grid coordinate, `Pos(row, column)`.
///
/// Row 0 is the northern edge and column 0 the western one. Nothing here is
/// checked against a grid, so stepping off the edge gives negative or
/// out-of-range values; use [`Grid::in_bounds`](crate::grid::Grid::in_bounds)
/// before indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos(pub i32, pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn opposite(self) -> Direction {
        use Direction::*;

        match self {
            North => South,
            South => North,
            East => West,
            West => East,
        }
    }

    pub fn offset(self) -> Pos {
        match self {
            Direction::North => Pos(-1, 0),
            Direction::South => Pos(1, 0),
            Direction::East => Pos(0, 1),
            Direction::West => Pos(0, -1),
        }
    }
}

impl Pos {
    pub const ZERO: Pos = Pos(0, 0);

    pub fn row(self) -> i32 {
        self.0
    }

    pub fn col(self) -> i32 {
        self.1
    }

    pub fn north(self) -> Pos {
        Pos(self.0.wrapping_sub(1), self.1)
    }

    pub fn south(self) -> Pos {
        Pos(self.0.wrapping_add(1), self.1)
    }

    pub fn east(self) -> Pos {
        Pos(self.0, self.1.wrapping_add(1))
    }

    pub fn west(self) -> Pos {
        Pos(self.0, self.1.wrapping_sub(1))
    }

    /// One step in `dir`, without any bounds checking.
    pub fn step(self, dir: Direction) -> Pos {
        match dir {
            Direction::North => self.north(),
            Direction::South => self.south(),
            Direction::East => self.east(),
            Direction::West => self.west(),
        }
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.0
            .abs_diff(other.0)
            .saturating_add(self.1.abs_diff(other.1))
    }

    /// True when the positions share a side. Diagonals and equal positions
    /// are not adjacent.
    pub fn adjacent(self, other: Pos) -> bool {
        self.manhattan(other) == 1
    }

    /// Direction to walk from `self` to reach `other`, if they are adjacent.
    pub fn direction_to(self, other: Pos) -> Option<Direction> {
        if !self.adjacent(other) {
            return None;
        }

        match (other.0.wrapping_sub(self.0), other.1.wrapping_sub(self.1)) {
            (-1, 0) => Some(Direction::North),
            (1, 0) => Some(Direction::South),
            (0, 1) => Some(Direction::East),
            (0, -1) => Some(Direction::West),
            _ => None,
        }
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, other: Pos) -> Pos {
        Pos(self.0.wrapping_add(other.0), self.1.wrapping_add(other.1))
    }
}

impl Sub for Pos {
    type Output = Pos;

    fn sub(self, other: Pos) -> Pos {
        Pos(self.0.wrapping_sub(other.0), self.1.wrapping_sub(other.1))
    }
}

impl AddAssign for Pos {
    fn add_assign(&mut self, other: Pos) {
        *self = *self + other;
    }
}

impl SubAssign for Pos {
    fn sub_assign(&mut self, other: Pos) {
        *self = *self - other;
    }
}

impl Add<Direction> for Pos {
    type Output = Pos;

    fn add(self, dir: Direction) -> Pos {
        self.step(dir)
    }
}

impl From<(i32, i32)> for Pos {
    fn from(tuple: (i32, i32)) -> Self {
        Pos(tuple.0, tuple.1)
    }
}

impl From<Pos> for (i32, i32) {
    fn from(val: Pos) -> Self {
        (val.0, val.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn steps() {
        let p = Pos(2, 3);
        assert_eq!(p.north(), Pos(1, 3));
        assert_eq!(p.south(), Pos(3, 3));
        assert_eq!(p.east(), Pos(2, 4));
        assert_eq!(p.west(), Pos(2, 2));

        // unchecked, may leave the grid
        assert_eq!(Pos::ZERO.north(), Pos(-1, 0));
        assert_eq!(Pos::ZERO.west(), Pos(0, -1));
    }

    #[test]
    fn step_matches_offset() {
        for dir in Direction::ALL {
            assert_eq!(Pos(5, 5).step(dir), Pos(5, 5) + dir.offset());
            assert_eq!(Pos(5, 5) + dir, Pos(5, 5).step(dir));
        }
    }

    #[test]
    fn extreme_coordinates_dont_overflow() {
        let edge = Pos(i32::MAX, i32::MIN);
        assert_eq!(edge.south(), Pos(i32::MIN, i32::MIN));
        assert_eq!(edge.west(), Pos(i32::MAX, i32::MAX));
        assert_eq!(Pos(0, i32::MAX).east(), Pos(0, i32::MIN));

        assert!(!Pos(i32::MIN, 0).adjacent(Pos(i32::MAX, 0)));
        assert_eq!(Pos(i32::MIN, 0).manhattan(Pos(i32::MAX, i32::MAX)), u32::MAX);
        assert!(Pos(i32::MIN, 0).adjacent(Pos(i32::MIN + 1, 0)));

        // wrapped step is not a neighbor
        assert_eq!(Pos(i32::MAX, 0).direction_to(Pos(i32::MIN, 0)), None);
        assert_eq!(Pos(i32::MAX, 0) + Pos(1, 0), Pos(i32::MIN, 0));
    }

    #[test]
    fn adjacency() {
        assert!(Pos(0, 0).adjacent(Pos(0, 1)));
        assert!(Pos(0, 0).adjacent(Pos(1, 0)));
        assert!(!Pos(0, 0).adjacent(Pos(0, 0)));
        assert!(!Pos(0, 0).adjacent(Pos(1, 1)));
        assert!(!Pos(0, 0).adjacent(Pos(0, 2)));
    }

    #[test]
    fn direction_between() {
        assert_eq!(Pos(1, 1).direction_to(Pos(0, 1)), Some(Direction::North));
        assert_eq!(Pos(1, 1).direction_to(Pos(2, 1)), Some(Direction::South));
        assert_eq!(Pos(1, 1).direction_to(Pos(1, 2)), Some(Direction::East));
        assert_eq!(Pos(1, 1).direction_to(Pos(1, 0)), Some(Direction::West));

        assert_eq!(Pos(1, 1).direction_to(Pos(1, 1)), None);
        assert_eq!(Pos(1, 1).direction_to(Pos(2, 2)), None);
        assert_eq!(Pos(1, 1).direction_to(Pos(1, 3)), None);
    }

    proptest! {
        #[test]
        fn direction_is_antisymmetric(
            r in -50i32..50, c in -50i32..50,
            dir in prop::sample::select(Direction::ALL.to_vec()),
        ) {
            let a = Pos(r, c);
            let b = a.step(dir);
            prop_assert!(a.adjacent(b));
            prop_assert_eq!(a.direction_to(b), Some(dir));
            prop_assert_eq!(b.direction_to(a), Some(dir.opposite()));
        }

        #[test]
        fn direction_only_for_adjacent(
            ar in -20i32..20, ac in -20i32..20,
            br in -20i32..20, bc in -20i32..20,
        ) {
            let (a, b) = (Pos(ar, ac), Pos(br, bc));
            prop_assert_eq!(a.direction_to(b).is_some(), a.adjacent(b));
        }
    }
}
