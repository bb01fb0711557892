use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{dims::Direction, grid::Vacancy};

/// Entry of a cell's link set.
///
/// The four directions are links to the neighbor on that side; `Mask` marks a
/// cell that was cut out of the maze and must not be walked or regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    North,
    South,
    East,
    West,
    Mask,
}

impl Tag {
    pub const ALL: [Tag; 5] = [Tag::North, Tag::South, Tag::East, Tag::West, Tag::Mask];

    pub fn direction(self) -> Option<Direction> {
        match self {
            Tag::North => Some(Direction::North),
            Tag::South => Some(Direction::South),
            Tag::East => Some(Direction::East),
            Tag::West => Some(Direction::West),
            Tag::Mask => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Tag::North => 0b00001,
            Tag::South => 0b00010,
            Tag::East => 0b00100,
            Tag::West => 0b01000,
            Tag::Mask => 0b10000,
        }
    }
}

impl From<Direction> for Tag {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::North => Tag::North,
            Direction::South => Tag::South,
            Direction::East => Tag::East,
            Direction::West => Tag::West,
        }
    }
}

/// Set of tags held by one maze slot.
///
/// Empty means not visited yet, `{Mask}` means excluded. A cell never holds
/// `Mask` together with a direction.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "SmallVec<[Tag; 5]>", into = "SmallVec<[Tag; 5]>")]
pub struct Cell {
    tags: u8,
}

impl Cell {
    pub fn new() -> Cell {
        Cell { tags: 0 }
    }

    pub fn masked() -> Cell {
        Cell {
            tags: Tag::Mask.bit(),
        }
    }

    pub fn with(dirs: impl IntoIterator<Item = Direction>) -> Cell {
        let mut cell = Cell::new();
        for dir in dirs {
            cell.insert(dir);
        }
        cell
    }

    pub fn contains(&self, tag: impl Into<Tag>) -> bool {
        self.tags & tag.into().bit() != 0
    }

    pub fn is_linked(&self, dir: Direction) -> bool {
        self.contains(dir)
    }

    /// Adds a link. A masked cell loses its mask.
    pub fn insert(&mut self, dir: Direction) {
        self.tags = (self.tags & !Tag::Mask.bit()) | Tag::from(dir).bit();
    }

    /// Removes a link, returns whether it was there.
    pub fn remove(&mut self, dir: Direction) -> bool {
        let bit = Tag::from(dir).bit();
        let present = self.tags & bit != 0;
        self.tags &= !bit;
        present
    }

    pub fn mask(&mut self) {
        self.tags = Tag::Mask.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.tags == 0
    }

    pub fn is_masked(&self) -> bool {
        self.contains(Tag::Mask)
    }

    /// Number of tags, `Mask` included.
    pub fn len(&self) -> usize {
        self.tags.count_ones() as usize
    }

    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        Tag::ALL.into_iter().filter(|&t| self.contains(t))
    }

    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|&d| self.contains(d))
    }

    /// The only link of a dead end.
    pub fn single_exit(&self) -> Option<Direction> {
        let mut dirs = self.directions();
        match (dirs.next(), dirs.next()) {
            (Some(dir), None) if !self.is_masked() => Some(dir),
            _ => None,
        }
    }
}

impl Vacancy for Cell {
    fn is_vacant(&self) -> bool {
        self.is_empty()
    }
}

impl FromIterator<Tag> for Cell {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut cell = Cell::new();
        let mut masked = false;
        for tag in iter {
            match tag.direction() {
                Some(dir) => cell.insert(dir),
                None => masked = true,
            }
        }
        if masked && cell.is_empty() {
            cell.mask();
        }
        cell
    }
}

impl From<SmallVec<[Tag; 5]>> for Cell {
    fn from(tags: SmallVec<[Tag; 5]>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<Cell> for SmallVec<[Tag; 5]> {
    fn from(cell: Cell) -> Self {
        cell.tags().collect()
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.tags()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    #[test]
    fn insert_is_idempotent() {
        let mut once = Cell::new();
        once.insert(East);

        let mut twice = once;
        twice.insert(East);

        assert_eq!(once, twice);
        assert_eq!(twice.len(), 1);
    }

    #[test]
    fn remove_reports_presence() {
        let mut cell = Cell::with([North, West]);
        assert!(cell.remove(North));
        assert!(!cell.remove(North));
        assert_eq!(cell.directions().collect::<Vec<_>>(), vec![West]);
    }

    #[test]
    fn mask_never_mixes_with_links() {
        let mut cell = Cell::masked();
        assert!(cell.is_masked());
        assert_eq!(cell.len(), 1);
        assert!(!cell.is_vacant());

        cell.insert(South);
        assert!(!cell.is_masked());
        assert_eq!(cell.tags().collect::<Vec<_>>(), vec![Tag::South]);

        let mixed: Cell = [Tag::Mask, Tag::East].into_iter().collect();
        assert_eq!(mixed, Cell::with([East]));
    }

    #[test]
    fn single_exit() {
        assert_eq!(Cell::with([West]).single_exit(), Some(West));
        assert_eq!(Cell::with([West, East]).single_exit(), None);
        assert_eq!(Cell::new().single_exit(), None);
        assert_eq!(Cell::masked().single_exit(), None);
    }

    #[test]
    fn debug_lists_tags() {
        assert_eq!(format!("{:?}", Cell::masked()), "{Mask}");
        assert_eq!(format!("{:?}", Cell::with([North, East])), "{North, East}");
    }
}
