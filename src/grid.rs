use std::ops;

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::dims::{Direction, Pos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid grid dimensions {rows}x{cols}, both must be in 1..=i32::MAX")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("grid buffer holds {len} slots, {rows}x{cols} needs {rows}*{cols}")]
    BufferMismatch { len: usize, rows: usize, cols: usize },
}

fn check_dims(rows: usize, cols: usize) -> Result<usize, GridError> {
    let max = i32::MAX as usize;
    if rows == 0 || cols == 0 || rows > max || cols > max {
        return Err(GridError::InvalidDimensions { rows, cols });
    }

    rows.checked_mul(cols)
        .ok_or(GridError::InvalidDimensions { rows, cols })
}

/// Slot that can be unvisited, so it can be picked by
/// [`Grid::random_position`].
pub trait Vacancy {
    fn is_vacant(&self) -> bool;
}

impl<T> Vacancy for Option<T> {
    fn is_vacant(&self) -> bool {
        self.is_none()
    }
}

/// Rectangular, row-major container of slots.
///
/// Deserialization goes through the same dimension checks as [`Grid::new`]
/// and also rejects a buffer whose length is not `rows * cols`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid<T>")]
pub struct Grid<T> {
    buf: Vec<T>,
    rows: usize,
    cols: usize,
}

#[derive(Deserialize)]
struct RawGrid<T> {
    buf: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = GridError;

    fn try_from(raw: RawGrid<T>) -> Result<Self, Self::Error> {
        let RawGrid { buf, rows, cols } = raw;
        if check_dims(rows, cols)? != buf.len() {
            return Err(GridError::BufferMismatch {
                len: buf.len(),
                rows,
                cols,
            });
        }

        Ok(Self { buf, rows, cols })
    }
}

impl<T: Clone> Grid<T> {
    pub fn new(fill: T, rows: usize, cols: usize) -> Result<Self, GridError> {
        let len = check_dims(rows, cols)?;

        Ok(Self {
            buf: vec![fill; len],
            rows,
            cols,
        })
    }

    pub fn fill(&mut self, value: T) {
        self.buf.fill(value);
    }
}

impl<T: Clone + Default> Grid<T> {
    pub fn new_default(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::new(T::default(), rows, cols)
    }
}

impl<T> Grid<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn size(&self) -> Pos {
        Pos(self.rows as i32, self.cols as i32)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        self.pos_to_idx(pos).is_some()
    }

    pub fn pos_to_idx(&self, pos: Pos) -> Option<usize> {
        let Pos(row, col) = pos;
        if row < 0 || col < 0 {
            return None;
        }

        let (row, col) = (row as usize, col as usize);
        if row >= self.rows || col >= self.cols {
            return None;
        }

        Some(row * self.cols + col)
    }

    pub fn idx_to_pos(&self, idx: usize) -> Option<Pos> {
        if idx >= self.buf.len() {
            return None;
        }

        Some(Pos((idx / self.cols) as i32, (idx % self.cols) as i32))
    }

    pub fn get(&self, pos: Pos) -> Option<&T> {
        self.pos_to_idx(pos).and_then(|i| self.buf.get(i))
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut T> {
        self.pos_to_idx(pos).and_then(|i| self.buf.get_mut(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    /// Every position, row by row.
    pub fn iter_pos(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.buf.len()).filter_map(move |i| self.idx_to_pos(i))
    }

    pub fn all_positions(&self) -> Vec<Pos> {
        self.iter_pos().collect()
    }

    /// In-bounds positions sharing a side with `pos`, at most four.
    ///
    /// Callers must not rely on the order.
    pub fn neighbors(&self, pos: Pos) -> SmallVec<[Pos; 4]> {
        Direction::ALL
            .into_iter()
            .map(|dir| pos.step(dir))
            .filter(|&n| self.in_bounds(n))
            .collect()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            buf: self.buf.into_iter().map(f).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl<T: Vacancy> Grid<T> {
    /// Uniformly random vacant position.
    ///
    /// Rows and columns are drawn independently and non-vacant hits are
    /// rejected, so this gets slower as the grid fills up and never returns
    /// once nothing is vacant. Only call it while a vacant slot exists, or use
    /// [`Grid::random_position_checked`].
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Pos {
        loop {
            let pos = Pos(
                rng.gen_range(0..self.rows as i32),
                rng.gen_range(0..self.cols as i32),
            );

            if self[pos].is_vacant() {
                return pos;
            }
        }
    }

    /// Same as [`Grid::random_position`], but returns `None` on a full grid.
    pub fn random_position_checked<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Pos> {
        self.iter()
            .any(Vacancy::is_vacant)
            .then(|| self.random_position(rng))
    }

    pub fn vacant_count(&self) -> usize {
        self.iter().filter(|slot| slot.is_vacant()).count()
    }
}

impl<T> ops::Index<Pos> for Grid<T> {
    type Output = T;

    fn index(&self, index: Pos) -> &Self::Output {
        self.get(index)
            .unwrap_or_else(|| panic!("Index out of bounds: {:?}", index))
    }
}

impl<T> ops::IndexMut<Pos> for Grid<T> {
    fn index_mut(&mut self, index: Pos) -> &mut Self::Output {
        self.get_mut(index)
            .unwrap_or_else(|| panic!("Index out of bounds: {:?}", index))
    }
}
