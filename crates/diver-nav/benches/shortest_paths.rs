use criterion::{black_box, criterion_group, criterion_main, Criterion};
use diver_nav::{Cost, ShortestPaths, WeightedDigraph};

/// 4-connected grid with deterministic pseudo-random weights.
struct Grid {
    width: u32,
    height: u32,
}

impl Grid {
    fn weight_of(from: u32, to: u32) -> Cost {
        let x = (from as u64).wrapping_mul(0x9E37_79B9) ^ (to as u64).wrapping_mul(0x85EB_CA6B);
        1 + (x % 15)
    }
}

impl WeightedDigraph for Grid {
    type Vertex = u32;
    type Edge = (u32, u32);

    fn outgoing_edges(&self, vertex: &u32) -> Vec<(u32, u32)> {
        let (x, y) = (vertex % self.width, vertex / self.width);
        let mut out = Vec::with_capacity(4);
        if y > 0 {
            out.push((*vertex, vertex - self.width));
        }
        if x + 1 < self.width {
            out.push((*vertex, vertex + 1));
        }
        if y + 1 < self.height {
            out.push((*vertex, vertex + self.width));
        }
        if x > 0 {
            out.push((*vertex, vertex - 1));
        }
        out
    }

    fn source(&self, edge: &(u32, u32)) -> u32 {
        edge.0
    }

    fn dest(&self, edge: &(u32, u32)) -> u32 {
        edge.1
    }

    fn weight(&self, edge: &(u32, u32)) -> Cost {
        Self::weight_of(edge.0, edge.1)
    }
}

fn bench_shortest_paths(c: &mut Criterion) {
    let grid = Grid {
        width: 64,
        height: 64,
    };
    let corner = 64 * 64 - 1;

    let mut group = c.benchmark_group("diver-nav/shortest_paths");

    group.bench_function("single_source_64x64", |b| {
        b.iter(|| {
            let paths = ShortestPaths::from_source(&grid, 0);
            black_box(paths.settled_count());
        })
    });

    let paths = ShortestPaths::from_source(&grid, 0);
    group.bench_function("best_path_corner", |b| {
        b.iter(|| {
            let path = paths.best_path(&corner).expect("path");
            black_box(path.len());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_shortest_paths);
criterion_main!(benches);
