use braidmaze::{
    algorithms::{braid, cull, Random},
    Maze,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{seq::SliceRandom as _, SeedableRng as _};

const ROWS: usize = 100;
const COLS: usize = 100;

fn backtracker(rng: &mut Random) -> Maze {
    let mut maze = Maze::new(ROWS, COLS).unwrap();
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

pub fn surgery(c: &mut Criterion) {
    let maze = backtracker(&mut Random::seed_from_u64(0));

    c.bench_function("braid_full", |b| {
        b.iter(|| {
            let mut rng = Random::seed_from_u64(1);
            braid(black_box(maze.clone()), black_box(1.0), &mut rng)
        })
    });

    c.bench_function("cull_half", |b| {
        b.iter(|| {
            let mut rng = Random::seed_from_u64(1);
            cull(black_box(maze.clone()), black_box(0.5), &mut rng)
        })
    });
}

criterion_group! {name = benches; config = Criterion::default().sample_size(10); targets = surgery}
criterion_main!(benches);
