use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    dims::{Direction, Pos},
    gameboard::Cell,
    grid::{Grid, GridError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("position {0:?} is outside of the maze")]
    OutOfBounds(Pos),
    #[error("positions {0:?} and {1:?} are not adjacent")]
    NotAdjacent(Pos, Pos),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Grid of cells, where each cell lists the neighbors it is linked to.
///
/// Links are always mutual: for adjacent `a` and `b`, `a` holds the direction
/// towards `b` exactly when `b` holds the direction towards `a`. Only
/// [`Maze::link`] and [`Maze::unlink`] change links, and both keep this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Maze {
    cells: Grid<Cell>,
}

impl Maze {
    /// Maze with every cell unvisited.
    pub fn new(rows: usize, cols: usize) -> Result<Self, MazeError> {
        Ok(Self {
            cells: Grid::new(Cell::new(), rows, cols)?,
        })
    }

    /// Wraps existing cells. The caller is responsible for the links being
    /// mutual.
    pub fn from_grid(cells: Grid<Cell>) -> Self {
        Self { cells }
    }

    pub fn grid(&self) -> &Grid<Cell> {
        &self.cells
    }

    pub fn into_grid(self) -> Grid<Cell> {
        self.cells
    }

    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    pub fn cols(&self) -> usize {
        self.cells.cols()
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        self.cells.in_bounds(pos)
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        self.cells.get(pos)
    }

    pub fn all_positions(&self) -> Vec<Pos> {
        self.cells.all_positions()
    }

    pub fn neighbors(&self, pos: Pos) -> SmallVec<[Pos; 4]> {
        self.cells.neighbors(pos)
    }

    /// Random unvisited position; see [`Grid::random_position`] for the
    /// precondition.
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Pos {
        self.cells.random_position(rng)
    }

    /// Unvisited neighbors of `pos`.
    pub fn empty_neighbors(&self, pos: Pos) -> SmallVec<[Pos; 4]> {
        self.empty_neighbors_with(pos, Grid::<Cell>::neighbors)
    }

    /// Unvisited positions out of those `neighbor_fn` yields for `pos`.
    ///
    /// Lets other topologies reuse the emptiness filter. Out of bounds
    /// positions from `neighbor_fn` are dropped.
    pub fn empty_neighbors_with<F, I>(&self, pos: Pos, neighbor_fn: F) -> SmallVec<[Pos; 4]>
    where
        F: Fn(&Grid<Cell>, Pos) -> I,
        I: IntoIterator<Item = Pos>,
    {
        neighbor_fn(&self.cells, pos)
            .into_iter()
            .filter(|&n| self.cells.get(n).is_some_and(Cell::is_empty))
            .collect()
    }

    pub fn is_linked(&self, a: Pos, b: Pos) -> bool {
        match (self.cell(a), a.direction_to(b)) {
            (Some(cell), Some(dir)) => cell.is_linked(dir),
            _ => false,
        }
    }

    /// Positions `pos` has a link to.
    pub fn linked_neighbors(&self, pos: Pos) -> SmallVec<[Pos; 4]> {
        self.cell(pos)
            .map(|cell| cell.directions().map(|dir| pos.step(dir)).collect())
            .unwrap_or_default()
    }

    fn check_pair(&self, a: Pos, b: Pos) -> Result<Direction, MazeError> {
        for pos in [a, b] {
            if !self.in_bounds(pos) {
                return Err(MazeError::OutOfBounds(pos));
            }
        }

        a.direction_to(b).ok_or(MazeError::NotAdjacent(a, b))
    }

    /// Links two adjacent cells in both directions. Linking an already linked
    /// pair changes nothing.
    pub fn link(&mut self, a: Pos, b: Pos) -> Result<(), MazeError> {
        let dir = self.check_pair(a, b)?;
        self.cells[a].insert(dir);
        self.cells[b].insert(dir.opposite());
        Ok(())
    }

    /// Removes the link between two adjacent cells.
    ///
    /// A cell that loses its last link becomes masked instead of empty, so it
    /// can't be mistaken for an unvisited one.
    pub fn unlink(&mut self, a: Pos, b: Pos) -> Result<(), MazeError> {
        let dir = self.check_pair(a, b)?;
        for (pos, dir) in [(a, dir), (b, dir.opposite())] {
            let cell = &mut self.cells[pos];
            if cell.remove(dir) && cell.is_empty() {
                cell.mask();
            }
        }
        Ok(())
    }

    /// Walks from `pos` towards `dir` while the current cell is linked that
    /// way. The start is included; empty when `pos` is outside.
    pub fn path(&self, pos: Pos, dir: Direction) -> Vec<Pos> {
        let mut path = Vec::new();
        let mut current = pos;

        while let Some(cell) = self.cell(current) {
            path.push(current);
            if !cell.is_linked(dir) {
                break;
            }
            current = current.step(dir);
        }

        path
    }

    pub fn path_west(&self, pos: Pos) -> Vec<Pos> {
        self.path(pos, Direction::West)
    }

    /// One of the longest straight corridors running towards `dir`.
    pub fn longest_path(&self, dir: Direction) -> Vec<Pos> {
        self.cells
            .iter_pos()
            // only corridor starts, inner cells give shorter suffixes
            .filter(|&pos| !self.cells[pos].is_linked(dir.opposite()))
            .map(|pos| self.path(pos, dir))
            .max_by_key(Vec::len)
            .unwrap_or_default()
    }

    pub fn masked_positions(&self) -> Vec<Pos> {
        self.cells
            .iter_pos()
            .filter(|&pos| self.cells[pos].is_masked())
            .collect()
    }
}
