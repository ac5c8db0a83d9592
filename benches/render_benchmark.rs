//! Frame pipeline benchmark: engine tick, cell decode and canvas blit.
//!
//! Target: a 64x64 frame (tick + draw + blit) well under 1ms.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lifeframe::render::blit;
use lifeframe::{
    Buffer, GridDimensions, GridRenderer, Palette, Rect, Rgb, Simulation, SimulationFactory,
    UniverseFactory,
};

fn universe_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("universe_tick");

    for size in [64u32, 128, 256] {
        let dims = GridDimensions::new(size, size);
        let mut universe = UniverseFactory::new(dims, 0.5, Some(1)).random();
        group.bench_function(BenchmarkId::from_parameter(format!("{size}x{size}")), |b| {
            b.iter(|| universe.tick());
        });
    }

    group.finish();
}

fn draw_cells(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_cells");

    for cell_size in [1u32, 5] {
        let dims = GridDimensions::new(64, 64);
        let universe = UniverseFactory::new(dims, 0.5, Some(2)).random();
        let renderer = GridRenderer::new(cell_size, Palette::default());
        let mut canvas = renderer.canvas_for(dims);

        group.bench_function(BenchmarkId::new("64x64", format!("cell_size_{cell_size}")), |b| {
            b.iter(|| {
                renderer.draw_grid(&mut canvas, dims);
                renderer.draw_cells(&mut canvas, black_box(&universe.view()));
            });
        });
    }

    group.finish();
}

fn live_count(c: &mut Criterion) {
    let dims = GridDimensions::new(256, 256);
    let universe = UniverseFactory::new(dims, 0.5, Some(3)).random();

    c.bench_function("bit_grid_view_live_count_256x256", |b| {
        b.iter(|| black_box(universe.view()).live_count());
    });
}

fn blit_canvas(c: &mut Criterion) {
    let dims = GridDimensions::new(64, 64);
    let universe = UniverseFactory::new(dims, 0.5, Some(4)).random();
    let renderer = GridRenderer::new(1, Palette::default());
    let mut canvas = renderer.canvas_for(dims);
    renderer.draw_grid(&mut canvas, dims);
    renderer.draw_cells(&mut canvas, &universe.view());
    let mut buffer = Buffer::new(200, 80);
    let area = Rect::new(35, 0, 129, 65);

    c.bench_function("blit_64x64_half_blocks", |b| {
        b.iter(|| blit(black_box(&canvas), &mut buffer, area, Rgb::DEFAULT_BG));
    });
}

criterion_group!(benches, universe_tick, draw_cells, live_count, blit_canvas);
criterion_main!(benches);
