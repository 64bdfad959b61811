//! Layout benchmark: resolving grids and switching variants.
//!
//! Target: a 10×10 grid resolves in well under 10µs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trellis::layout::{compute_positions, track_edges};
use trellis::{
    CheckBox, GridCell, GridLayout, GridPosition, Padding, Page, Proportion, RecordingSurface,
    Rect, WidgetId,
};

/// A fully populated `n × n` grid with light padding.
fn square_grid(n: usize) -> (Vec<Proportion>, Vec<GridCell>) {
    let tracks = Proportion::even(n);
    let mut cells = Vec::with_capacity(n * n);
    for row in 0..n {
        for column in 0..n {
            let id = row * n + column;
            cells.push(GridCell::new(
                GridPosition::new(row, column),
                Padding::uniform(0.01),
                WidgetId::new(id),
            ));
        }
    }
    (tracks, cells)
}

fn edges(c: &mut Criterion) {
    let tracks = Proportion::even(12);
    c.bench_function("track_edges_12", |b| {
        b.iter(|| track_edges(black_box(&tracks), 0.0, black_box(1920.0)))
    });
}

fn positions_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_positions");

    for n in [3, 10, 30] {
        let (tracks, cells) = square_grid(n);
        group.bench_with_input(
            BenchmarkId::new("square", format!("{n}x{n}")),
            &(tracks, cells),
            |b, (tracks, cells)| {
                b.iter(|| {
                    compute_positions(
                        black_box(tracks),
                        black_box(tracks),
                        black_box(cells),
                        Rect::from_size(1920.0, 1080.0),
                    )
                })
            },
        );
    }

    group.finish();
}

fn page_resize_across_breakpoint(c: &mut Criterion) {
    let mut builder = Page::builder("bench");
    let ids: Vec<_> = (0..9).map(|_| builder.add_widget(CheckBox::new(true))).collect();

    let mut narrow = GridLayout::builder(Proportion::even(9), Proportion::even(1));
    let mut wide = GridLayout::builder(Proportion::even(3), Proportion::even(3));
    for (i, id) in ids.iter().enumerate() {
        narrow = narrow.place(GridPosition::new(i, 0), Padding::ZERO, *id);
        wide = wide.place(GridPosition::new(i / 3, i % 3), Padding::ZERO, *id);
    }
    builder
        .variant(narrow.build().unwrap())
        .variant(wide.build().unwrap())
        .breakpoints(vec![0, 600]);
    let mut page = builder.build().unwrap();

    c.bench_function("page_relayout_alternating", |b| {
        let mut wide = false;
        b.iter(|| {
            wide = !wide;
            let width = if wide { 800.0 } else { 400.0 };
            page.relayout(black_box(Rect::from_size(width, 300.0)))
        })
    });

    let mut surface = RecordingSurface::default();
    c.bench_function("page_resize_recorded", |b| {
        b.iter(|| {
            surface.take();
            page.resize(
                &mut trellis::Frame::new(&mut surface, true),
                black_box(Rect::from_size(800.0, 300.0)),
            );
        })
    });
}

criterion_group!(benches, edges, positions_by_size, page_resize_across_breakpoint);
criterion_main!(benches);
