use super::*;
use refresh_graphics::{DrawPrimitive, DrawScopeDefault};

const MS: u64 = NANOS_PER_MILLI;

fn bar() -> ProgressBarModel {
    let mut bar = ProgressBarModel::new();
    bar.set_bounds(Rect::new(0.0, 396.0, 200.0, 4.0));
    bar
}

fn draw(bar: &ProgressBarModel) -> Vec<DrawPrimitive> {
    let mut scope = DrawScopeDefault::new(Rect::new(0.0, 0.0, 200.0, 400.0));
    bar.draw(&mut scope);
    scope.into_primitives()
}

#[test]
fn defaults_to_four_grays() {
    let bar = ProgressBarModel::new();
    assert_eq!(bar.colors().len(), 4);
    assert_eq!(bar.animation_duration_millis(), 2000);
    assert!(!bar.is_running());
}

#[test]
fn empty_color_scheme_keeps_previous_scheme() {
    let mut bar = ProgressBarModel::new();
    let err = bar.set_color_scheme(&[]).unwrap_err();
    assert_eq!(
        err,
        RefreshError::EmptyColorScheme {
            side: RefreshSide::Footer
        }
    );
    assert_eq!(bar.colors(), &DEFAULT_PROGRESS_BAR_COLORS[..]);

    bar.set_color_scheme(&[Color::RED]).expect("one color is enough");
    assert_eq!(bar.animation_duration_millis(), 500);
}

#[test]
fn idle_bar_draws_trigger_disc_only() {
    let mut bar = bar();
    assert!(draw(&bar).is_empty());

    bar.set_trigger_percentage(0.5);
    let primitives = draw(&bar);
    assert_eq!(primitives.len(), 1);
    match &primitives[0] {
        DrawPrimitive::Circle { center, radius, .. } => {
            assert_eq!(*center, Point::new(100.0, 398.0));
            assert_eq!(*radius, 50.0);
        }
        other => panic!("expected trigger disc, got {other:?}"),
    }
}

#[test]
fn first_cycle_fills_first_color_and_draws_rings() {
    let mut bar = bar();
    bar.set_trigger_percentage(0.8);
    bar.start();
    assert_eq!(bar.trigger_percentage(), 0.0);

    bar.on_frame(0);
    bar.on_frame(250 * MS);
    let primitives = draw(&bar);
    assert_eq!(primitives.len(), 1);
    match &primitives[0] {
        DrawPrimitive::Clipped {
            exclusion, content, ..
        } => {
            assert!(exclusion.is_none());
            assert_eq!(
                content[0],
                DrawPrimitive::Rect {
                    rect: bar.bounds(),
                    color: DEFAULT_PROGRESS_BAR_COLORS[0],
                }
            );
            // Rings for the first and second colors.
            assert_eq!(content.len(), 3);
        }
        other => panic!("expected marquee, got {other:?}"),
    }
}

#[test]
fn later_cycles_fill_with_previous_color() {
    let mut bar = bar();
    bar.start();
    bar.on_frame(0);
    bar.on_frame(1_100 * MS);
    let primitives = draw(&bar);
    match &primitives[0] {
        DrawPrimitive::Clipped { content, .. } => match &content[0] {
            DrawPrimitive::Rect { color, .. } => {
                assert_eq!(*color, DEFAULT_PROGRESS_BAR_COLORS[1]);
            }
            other => panic!("expected fill, got {other:?}"),
        },
        other => panic!("expected marquee, got {other:?}"),
    }
}

#[test]
fn stop_runs_finish_animation_then_goes_idle() {
    let mut bar = bar();
    bar.start();
    bar.on_frame(0);
    bar.stop();
    assert!(bar.is_running());
    assert!(bar.is_finishing());

    assert!(!bar.on_frame(100 * MS));
    assert!(!bar.on_frame(600 * MS));
    match &draw(&bar)[0] {
        DrawPrimitive::Clipped { exclusion, .. } => {
            let cleared = exclusion.expect("finish clears the center");
            assert!(cleared.width > 0.0);
            assert!((cleared.center().x - 100.0).abs() < 1e-3);
        }
        other => panic!("expected marquee, got {other:?}"),
    }

    assert!(bar.on_frame(1_100 * MS));
    assert!(!bar.is_running());
    assert!(draw(&bar).is_empty());
}

#[test]
fn trigger_is_layered_over_finishing_marquee() {
    let mut bar = bar();
    bar.start();
    bar.on_frame(0);
    bar.stop();
    bar.on_frame(100 * MS);
    bar.set_trigger_percentage(0.4);

    let primitives = draw(&bar);
    assert_eq!(primitives.len(), 2);
    match &primitives[1] {
        DrawPrimitive::Clipped {
            exclusion, content, ..
        } => {
            assert!(exclusion.is_none());
            assert!(matches!(content[0], DrawPrimitive::Circle { radius, .. } if radius == 40.0));
        }
        other => panic!("expected trigger layer, got {other:?}"),
    }
}
