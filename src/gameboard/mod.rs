pub mod cell;
pub mod maze;

pub use cell::{Cell, Tag};
pub use maze::{Maze, MazeError};

#[cfg(test)]
pub(crate) mod testing {
    use rand::seq::SliceRandom as _;

    use super::Maze;
    use crate::{algorithms::Random, dims::Pos};

    /// Spanning tree maze made with a plain recursive backtracker.
    pub fn backtracker(rows: usize, cols: usize, rng: &mut Random) -> Maze {
        let mut maze = Maze::new(rows, cols).unwrap();
        if rows * cols == 1 {
            return maze;
        }

        let mut stack = vec![maze.random_position(rng)];
        while let Some(&current) = stack.last() {
            match maze.empty_neighbors(current).choose(rng) {
                Some(&next) => {
                    maze.link(current, next).unwrap();
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }

        maze
    }

    pub fn from_links(rows: usize, cols: usize, links: &[(Pos, Pos)]) -> Maze {
        let mut maze = Maze::new(rows, cols).unwrap();
        for &(a, b) in links {
            maze.link(a, b).unwrap();
        }
        maze
    }
}
