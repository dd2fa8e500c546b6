use chrono::Utc;
use criterion::{Criterion, criterion_group, criterion_main};
use pulse_chart::api::{ChartConfig, ChartRasterizer, ChartSession};
use pulse_chart::core::{Measurement, RangeDefaults, Viewport, fit_value_range, project_window};
use std::hint::black_box;

fn heart_rate_window(len: usize) -> Vec<Measurement> {
    let now = Utc::now();
    (0..len)
        .map(|i| {
            let value = 60 + ((i * 7) % 90) as u16;
            Measurement::new(value, now)
        })
        .collect()
}

fn bench_fit_value_range_600(c: &mut Criterion) {
    let window = heart_rate_window(600);

    c.bench_function("fit_value_range_600", |b| {
        b.iter(|| fit_value_range(black_box(&window), black_box(RangeDefaults::default())))
    });
}

fn bench_project_window_600(c: &mut Criterion) {
    let window = heart_rate_window(600);
    let range = fit_value_range(&window, RangeDefaults::default()).expect("non-empty window");

    c.bench_function("project_window_600", |b| {
        b.iter(|| {
            project_window(
                black_box(&window),
                black_box(range),
                black_box(1280.0),
                black_box(400.0),
            )
        })
    });
}

fn bench_rasterize_series_60(c: &mut Criterion) {
    let window = heart_rate_window(60);
    let viewport = Viewport::new(800, 300);
    let range = fit_value_range(&window, RangeDefaults::default()).expect("non-empty window");
    let points = project_window(&window, range, 800.0, 300.0);
    let style = ChartConfig::default().style;

    c.bench_function("rasterize_series_60", |b| {
        b.iter(|| {
            ChartRasterizer::rasterize(
                black_box(&points),
                viewport,
                style.series_stroke_width,
                style.series_color,
            )
            .expect("rasterize")
        })
    });
}

fn bench_cached_compose_zoomed(c: &mut Criterion) {
    let mut session =
        ChartSession::cached(ChartConfig::default(), Viewport::new(800, 300)).expect("session");
    for sample in heart_rate_window(120) {
        session.add_measurement(sample).expect("append");
    }
    session.pointer_down(400.0, 150.0);
    session.pointer_move(400.0, 170.0);
    session.pointer_move(400.0, 230.0);
    let mut canvas = session.compose().expect("cached layers");

    c.bench_function("cached_compose_zoomed_800x300", |b| {
        b.iter(|| session.compose_into(black_box(&mut canvas)))
    });
}

criterion_group!(
    benches,
    bench_fit_value_range_600,
    bench_project_window_600,
    bench_rasterize_series_60,
    bench_cached_compose_zoomed
);
criterion_main!(benches);
