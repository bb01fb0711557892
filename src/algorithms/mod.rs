pub mod types;

use std::{fmt, sync::Arc};

use hashbrown::HashSet;
use rand::{seq::SliceRandom as _, thread_rng, Rng, SeedableRng as _};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    dims::Pos,
    gameboard::{Cell, Maze},
    registry::Registry,
};
pub use types::*;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Registry of the maze surgeries.
pub type SurgeryRegistry = Registry<dyn MazeSurgery>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurgeryError {
    #[error("unknown surgery '{0}'")]
    Unknown(String),
}

/// Rewrite of the links of a finished maze.
pub trait MazeSurgery: fmt::Debug + Sync + Send {
    fn apply(&self, maze: Maze, rng: &mut Random, params: &Params) -> Maze;
}

/// Adds links to dead ends, see [`braid`].
#[derive(Debug)]
pub struct Braid;

impl MazeSurgery for Braid {
    fn apply(&self, maze: Maze, rng: &mut Random, params: &Params) -> Maze {
        braid(maze, params.parsed_or_warn("rate", 1.0), rng)
    }
}

/// Cuts dead ends off, see [`cull`].
#[derive(Debug)]
pub struct Cull;

impl MazeSurgery for Cull {
    fn apply(&self, maze: Maze, rng: &mut Random, params: &Params) -> Maze {
        cull(maze, params.parsed_or_warn("rate", 1.0), rng)
    }
}

/// Registry with `braid` (also the default) and `cull`.
pub fn default_registry() -> SurgeryRegistry {
    let braid: Arc<dyn MazeSurgery> = Arc::new(Braid);
    let mut registry = SurgeryRegistry::with_default(braid.clone());
    registry.register("braid".to_string(), braid);
    registry.register("cull".to_string(), Arc::new(Cull));
    registry
}

/// Runs the named surgeries in order, all drawing from one rng seeded with
/// `seed` (or a random seed).
///
/// Every name is resolved before the maze is touched. An empty name stands
/// for the registry's default surgery.
pub fn apply_surgeries(
    maze: Maze,
    surgeries: &[Algorithm],
    registry: &SurgeryRegistry,
    seed: Option<u64>,
) -> Result<Maze, SurgeryError> {
    let resolved = surgeries
        .iter()
        .map(|(name, params)| {
            let surgery = if name.is_empty() {
                registry.get_default()
            } else {
                registry.get(name.as_str())
            };
            surgery
                .map(|surgery| (surgery, params))
                .ok_or_else(|| SurgeryError::Unknown(name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let seed = seed.unwrap_or_else(|| thread_rng().gen());
    log::debug!("Running {} surgeries with seed {}", resolved.len(), seed);
    let mut rng = Random::seed_from_u64(seed);

    Ok(resolved
        .into_iter()
        .fold(maze, |maze, (surgery, params)| {
            surgery.apply(maze, &mut rng, params)
        }))
}

/// Positions holding exactly one link, row by row. Masked cells are never
/// dead ends.
pub fn dead_ends(maze: &Maze) -> Vec<Pos> {
    maze.grid()
        .iter_pos()
        .filter(|&pos| maze.grid()[pos].single_exit().is_some())
        .collect()
}

fn checked_rate(rate: f64) -> f64 {
    if rate.is_nan() {
        log::warn!("Surgery rate is NaN, using 0");
        return 0.0;
    }

    if !(0.0..=1.0).contains(&rate) {
        log::warn!("Surgery rate {} is out of 0..=1, clamping", rate);
    }
    rate.clamp(0.0, 1.0)
}

fn accept<R: Rng + ?Sized>(rng: &mut R, rate: f64) -> bool {
    rate >= 1.0 || (rate > 0.0 && rng.gen_bool(rate))
}

/// Opens every dead end with probability `rate`, adding cycles.
///
/// Dead ends are taken from one scan done up front; cells that become dead
/// ends during the pass are left alone. A chosen dead end prefers linking to
/// a neighboring dead end that hasn't had its turn yet (which then loses its
/// turn), otherwise it links to any unmasked neighbor, possibly the one it's
/// already linked to.
pub fn braid<R: Rng + ?Sized>(mut maze: Maze, rate: f64, rng: &mut R) -> Maze {
    let rate = checked_rate(rate);
    let snapshot = dead_ends(&maze);
    let mut remaining: HashSet<Pos> = snapshot.iter().copied().collect();
    let mut braided = 0;

    for pos in snapshot.iter().copied() {
        // already consumed as someone's partner
        if !remaining.remove(&pos) {
            continue;
        }

        if !accept(rng, rate) {
            continue;
        }

        let neighbors = maze.neighbors(pos);
        let partners = neighbors
            .iter()
            .copied()
            .filter(|n| remaining.contains(n))
            .collect::<SmallVec<[_; 4]>>();

        let target = match partners.choose(rng) {
            Some(&partner) => {
                remaining.remove(&partner);
                partner
            }
            None => {
                let open = neighbors
                    .iter()
                    .copied()
                    .filter(|&n| maze.cell(n).is_some_and(|cell| !cell.is_masked()))
                    .collect::<SmallVec<[_; 4]>>();
                match open.choose(rng) {
                    Some(&n) => n,
                    None => continue,
                }
            }
        };

        if let Err(err) = maze.link(pos, target) {
            log::warn!("Skipping dead end {:?}: {}", pos, err);
            continue;
        }
        log::trace!("Braided {:?} to {:?}", pos, target);
        braided += 1;
    }

    log::debug!(
        "Braid: {} dead ends, {} links added (rate {})",
        snapshot.len(),
        braided,
        rate
    );
    maze
}

/// Cuts every dead end off its only neighbor with probability `rate`. The cut
/// cell ends up masked.
///
/// Works on one scan done up front, like [`braid`]. A dead end that lost its
/// link earlier in the pass (its partner was culled) is skipped.
pub fn cull<R: Rng + ?Sized>(mut maze: Maze, rate: f64, rng: &mut R) -> Maze {
    let rate = checked_rate(rate);
    let snapshot = dead_ends(&maze);
    let mut culled = 0;

    for pos in snapshot.iter().copied() {
        let Some(dir) = maze.cell(pos).and_then(Cell::single_exit) else {
            continue;
        };

        if !accept(rng, rate) {
            continue;
        }

        if let Err(err) = maze.unlink(pos, pos.step(dir)) {
            log::warn!("Skipping dead end {:?}: {}", pos, err);
            continue;
        }
        log::trace!("Culled {:?}", pos);
        culled += 1;
    }

    log::debug!(
        "Cull: {} dead ends, {} cut off (rate {})",
        snapshot.len(),
        culled,
        rate
    );
    maze
}
