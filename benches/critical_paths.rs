//! Criterion benchmarks for mazecast critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Pathfinding: BFS across open and corridor mazes
//! - Composition: full round-trip frame rendering
//! - Quantization: median cut palette reduction of one frame

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{Rgba, RgbaImage};
use mazecast::assets::SpriteAtlas;
use mazecast::compose::{compose_frames, ComposeOptions};
use mazecast::maze::{Grid, Position};
use mazecast::pathfind::shortest_path;
use mazecast::quantize::quantize;

// =============================================================================
// Test Data Generators
// =============================================================================

/// Walled square of floor with a spawn in the top-left corner
fn make_open_maze(size: usize) -> String {
    let mut rows = Vec::with_capacity(size);
    for row in 0..size {
        let line: String = (0..size)
            .map(|col| {
                if row == 0 || row == size - 1 {
                    '1'
                } else if col == 0 || col == size - 1 {
                    '2'
                } else if row == 1 && col == 1 {
                    'p'
                } else {
                    '7'
                }
            })
            .collect();
        rows.push(line);
    }
    rows.join("\n")
}

/// Serpentine maze: every other row is a wall with a gap at alternating ends
fn make_serpentine_maze(size: usize) -> String {
    let mut rows = Vec::with_capacity(size);
    for row in 0..size {
        let line: String = (0..size)
            .map(|col| {
                let border = row == 0 || row == size - 1 || col == 0 || col == size - 1;
                let gap_col = if (row / 2) % 2 == 0 { size - 2 } else { 1 };
                if border || (row % 2 == 0 && col != gap_col) {
                    '1'
                } else if row == 1 && col == 1 {
                    'p'
                } else {
                    '.'
                }
            })
            .collect();
        rows.push(line);
    }
    rows.join("\n")
}

/// Frame with many distinct colours
fn make_gradient_frame(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 255 / width) as u8, (y * 255 / height) as u8, ((x + y) % 256) as u8, 255])
    })
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_pathfind(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathfind");

    for size in [16usize, 64, 128] {
        let grid = Grid::parse(&make_open_maze(size)).unwrap();
        let goal = Position::new(size as i32 - 2, size as i32 - 2);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::new("open", size), &grid, |b, grid| {
            b.iter(|| shortest_path(black_box(grid), Position::new(1, 1), goal))
        });
    }

    for size in [17usize, 65] {
        let grid = Grid::parse(&make_serpentine_maze(size)).unwrap();
        let goal = Position::new(size as i32 - 2, size as i32 - 2);
        group.bench_with_input(BenchmarkId::new("serpentine", size), &grid, |b, grid| {
            b.iter(|| shortest_path(black_box(grid), Position::new(1, 1), goal))
        });
    }

    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    group.sample_size(20);

    let atlas = SpriteAtlas::procedural();
    let options = ComposeOptions::default();
    let sample = Grid::parse(include_str!("../maze/map.txt")).unwrap();
    group.bench_function("sample_map", |b| {
        b.iter(|| compose_frames(black_box(&sample), &atlas, &options).unwrap())
    });

    let open = Grid::parse(&make_open_maze(32)).unwrap();
    group.bench_function("open_32", |b| {
        b.iter(|| compose_frames(black_box(&open), &atlas, &options).unwrap())
    });

    group.bench_function("procedural_atlas", |b| b.iter(SpriteAtlas::procedural));

    group.finish();
}

fn bench_quantize(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantize");
    group.sample_size(20);

    for (w, h) in [(128u32, 64u32), (352, 128)] {
        let frame = make_gradient_frame(w, h);
        group.throughput(Throughput::Elements((w * h) as u64));
        group.bench_with_input(BenchmarkId::new("gradient_256", format!("{w}x{h}")), &frame, |b, f| {
            b.iter(|| quantize(black_box(f), 256))
        });
    }

    let grid = Grid::parse(include_str!("../maze/map.txt")).unwrap();
    let seq = compose_frames(&grid, &SpriteAtlas::procedural(), &ComposeOptions::default()).unwrap();
    group.bench_function("demo_frame", |b| b.iter(|| quantize(black_box(&seq.frames[0].image), 256)));

    group.finish();
}

criterion_group!(benches, bench_pathfind, bench_compose, bench_quantize);
criterion_main!(benches);
