use criterion::{black_box, criterion_group, criterion_main, Criterion};
use refresh_layout::{pull_progress, MotionAction, MotionEvent, RefreshConfig, RefreshController};

fn header_drag_cycle(c: &mut Criterion) {
    let mut controller = RefreshController::new(RefreshConfig::default());
    controller.on_layout(320, 480, Some(480));

    c.bench_function("header_drag_cycle", |b| {
        b.iter(|| {
            controller.on_intercept_touch_event(&MotionEvent::single(
                MotionAction::Down,
                0,
                0.0,
                100.0,
            ));
            controller.on_intercept_touch_event(&MotionEvent::single(
                MotionAction::Move,
                0,
                0.0,
                130.0,
            ));
            for step in 1..=20 {
                let y = 130.0 + step as f32 * 2.0;
                controller.on_touch_event(&MotionEvent::single(MotionAction::Move, 0, 0.0, y));
            }
            controller.on_touch_event(&MotionEvent::single(MotionAction::Cancel, 0, 0.0, 170.0));
            black_box(controller.header_current_offset());
        });
    });
}

fn pull_progress_mapping(c: &mut Criterion) {
    c.bench_function("pull_progress_mapping", |b| {
        b.iter(|| {
            let mut offset = 0;
            for overscroll in 0..256 {
                offset += pull_progress(black_box(overscroll as f32), 64.0, 64.0).offset_delta;
            }
            offset
        });
    });
}

fn draw_refreshing(c: &mut Criterion) {
    let mut controller = RefreshController::new(RefreshConfig::default());
    controller.on_layout(320, 480, Some(480));
    controller.set_footer_refreshing(true);
    controller.on_frame(0);
    controller.on_frame(250_000_000);

    c.bench_function("draw_refreshing_footer", |b| {
        b.iter(|| black_box(controller.draw()));
    });
}

criterion_group!(benches, header_drag_cycle, pull_progress_mapping, draw_refreshing);
criterion_main!(benches);
