use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use sparselife::{Board, Pattern, Pos2, Topology};

fn make_seed(width: i32, height: i32) -> Pattern {
    (0..height)
        .flat_map(|y| (0..width).map(move |x| Pos2 { x, y }))
        .filter(|pos| (pos.x + pos.y) % 3 == 0)
        .collect()
}

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");
    for size in [64, 128, 256] {
        let seed = make_seed(size, size);
        let topology = Topology::Torus {
            rows: size * 2,
            cols: size * 2,
        };
        let board = Board::from_pattern(&seed, topology);

        group.bench_with_input(BenchmarkId::new("serial", size), &board, |b, board| {
            b.iter_batched(
                || board.clone(),
                |mut board| board.advance(),
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), &board, |b, board| {
            b.iter_batched(
                || board.clone(),
                |mut board| board.advance_parallel(),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_rle(c: &mut Criterion) {
    let seed = make_seed(256, 256);
    let rle = seed.to_rle();

    c.bench_function("to_rle", |b| b.iter(|| seed.to_rle()));
    c.bench_function("from_rle", |b| b.iter(|| Pattern::from_rle(&rle)));
}

criterion_group!(benches, bench_advance, bench_rle);
criterion_main!(benches);
