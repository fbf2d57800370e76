//! Header spinner: pull-progress mapping, lifecycle animations and drawing.
//!
//! The model owns every visual parameter of the spinner disc (scale, alpha,
//! arc trim, arrow, rotation) and a single animation slot. Starting an
//! animation replaces whatever was running, including its completion
//! notification. Position lives in [`HeaderState`], which the controller
//! owns and lends to the model while it animates.

use crate::config::{
    VisualMode, ALPHA_ANIMATION_DURATION_MILLIS, ANIMATE_TO_START_DURATION_MILLIS,
    ANIMATE_TO_TRIGGER_DURATION_MILLIS, CIRCLE_BG_LIGHT, DECELERATE_INTERPOLATION_FACTOR,
    MAX_ALPHA, MAX_PROGRESS_ANGLE, SCALE_DOWN_DURATION_MILLIS, STARTING_PROGRESS_ALPHA,
};
use crate::error::RefreshError;
use crate::state::{HeaderState, RefreshSide};
use refresh_animation::{AnimationSpec, Easing, Lerp, Tween, NANOS_PER_MILLI};
use refresh_graphics::{Color, DrawScope, Point};

/// One revolution of the arc while refreshing.
const SPIN_CYCLE_MILLIS: u64 = 1332;
// Ring geometry relative to the disc diameter (8.75dp radius, 2.5dp stroke,
// 10x5dp arrow on a 40dp disc).
const ARC_RADIUS_FRACTION: f32 = 0.21875;
const STROKE_FRACTION: f32 = 0.0625;
const ARROW_WIDTH_FRACTION: f32 = 0.25;
const ARROW_HEIGHT_FRACTION: f32 = 0.125;

/// Visual parameters derived from a header overscroll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PullProgress {
    /// `|overscroll| / D`, clamped to `[0, 1]`.
    pub drag_percent: f32,
    /// Zero below 40% of the drag, reaching 1 at the trigger distance.
    pub adjusted_percent: f32,
    /// Slingshot tension past the trigger distance, peaking at 0.5.
    pub tension_percent: f32,
    /// Spinner offset from its start position.
    pub offset_delta: i32,
    /// Visible arc as a fraction of a full circle.
    pub arc_end: f32,
    pub arrow_scale: f32,
    /// Arc rotation in turns.
    pub rotation: f32,
}

/// Maps a damped overscroll to spinner visuals.
///
/// `total_drag_distance` is the trigger distance D and `slingshot_distance`
/// the distance S the spinner travels between its start and rest offsets.
pub fn pull_progress(
    overscroll: f32,
    total_drag_distance: f32,
    slingshot_distance: f32,
) -> PullProgress {
    let drag_percent = if total_drag_distance > 0.0 {
        (overscroll / total_drag_distance).abs().min(1.0)
    } else {
        1.0
    };
    let adjusted_percent = (drag_percent - 0.4).max(0.0) * 5.0 / 3.0;
    let extra_overshoot = overscroll.abs() - total_drag_distance;
    let tension_slingshot_percent = if slingshot_distance > 0.0 {
        extra_overshoot.min(slingshot_distance * 2.0).max(0.0) / slingshot_distance
    } else {
        0.0
    };
    let quarter = tension_slingshot_percent / 4.0;
    let tension_percent = (quarter - quarter * quarter) * 2.0;
    let extra_move = slingshot_distance * tension_percent * 2.0;

    PullProgress {
        drag_percent,
        adjusted_percent,
        tension_percent,
        offset_delta: (slingshot_distance * drag_percent + extra_move).round() as i32,
        arc_end: (adjusted_percent * MAX_PROGRESS_ANGLE).min(MAX_PROGRESS_ANGLE),
        arrow_scale: adjusted_percent.min(1.0),
        rotation: (-0.25 + 0.4 * adjusted_percent + tension_percent * 2.0) * 0.5,
    }
}

/// What the controller must do when a spinner animation completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinnerAnimationEnd {
    /// A trigger or reset animation ended; the refreshing flag says which.
    Refresh,
    /// The spinner slid back to its start without scaling; shrink it next.
    ScaleDownAfterReturn,
    /// A cancelled drag has fully returned to rest.
    Settle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum AnimationKind {
    ScaleUp,
    ScaleDown,
    Alpha { from: u8, to: u8 },
    ToCorrectPosition { from: i32 },
    ToStartPosition { from: i32 },
    ScaleDownToStart { from: i32, starting_scale: f32 },
}

#[derive(Clone, Debug)]
struct SpinnerAnimation {
    kind: AnimationKind,
    tween: Tween,
    on_end: Option<SpinnerAnimationEnd>,
}

#[derive(Clone, Copy, Debug, Default)]
struct Spin {
    started_at_nanos: Option<u64>,
    elapsed_nanos: u64,
}

#[derive(Clone, Debug)]
pub struct SpinnerVisualModel {
    visual_mode: VisualMode,
    medium_animation_millis: u64,
    diameter: i32,
    colors: Vec<Color>,
    background_color: Color,
    visible: bool,
    scale: f32,
    background_alpha: u8,
    progress_alpha: u8,
    arc_start: f32,
    arc_end: f32,
    arrow_scale: f32,
    show_arrow: bool,
    rotation: f32,
    animation: Option<SpinnerAnimation>,
    spin: Option<Spin>,
}

impl SpinnerVisualModel {
    pub fn new(visual_mode: VisualMode, diameter: i32, medium_animation_millis: u64) -> Self {
        Self {
            visual_mode,
            medium_animation_millis,
            diameter,
            colors: vec![Color::BLACK],
            background_color: CIRCLE_BG_LIGHT,
            visible: false,
            scale: 1.0,
            background_alpha: MAX_ALPHA,
            progress_alpha: MAX_ALPHA,
            arc_start: 0.0,
            arc_end: 0.0,
            arrow_scale: 0.0,
            show_arrow: false,
            rotation: 0.0,
            animation: None,
            spin: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn progress_alpha(&self) -> u8 {
        self.progress_alpha
    }

    pub fn background_alpha(&self) -> u8 {
        self.background_alpha
    }

    pub fn arc_end(&self) -> f32 {
        self.arc_end
    }

    pub fn arrow_scale(&self) -> f32 {
        self.arrow_scale
    }

    pub fn shows_arrow(&self) -> bool {
        self.show_arrow
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn diameter(&self) -> i32 {
        self.diameter
    }

    pub fn set_diameter(&mut self, diameter: i32) {
        self.diameter = diameter;
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn set_color_scheme(&mut self, colors: &[Color]) -> Result<(), RefreshError> {
        if colors.is_empty() {
            return Err(RefreshError::EmptyColorScheme {
                side: RefreshSide::Header,
            });
        }
        self.colors = colors.to_vec();
        Ok(())
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    /// Opacity of the arc and arrow only.
    pub fn set_progress_alpha(&mut self, alpha: u8) {
        self.progress_alpha = alpha;
    }

    /// Opacity of the disc and the arc together.
    pub fn set_color_view_alpha(&mut self, alpha: u8) {
        self.background_alpha = alpha;
        self.progress_alpha = alpha;
    }

    /// Grow-in progress: a scale in [`VisualMode::Scale`], opacity otherwise.
    pub fn set_animation_progress(&mut self, progress: f32) {
        match self.visual_mode {
            VisualMode::Scale => self.scale = progress,
            VisualMode::Alpha => {
                self.set_color_view_alpha((progress * MAX_ALPHA as f32) as u8);
            }
        }
    }

    pub fn set_start_end_trim(&mut self, start: f32, end: f32) {
        self.arc_start = start;
        self.arc_end = end;
    }

    pub fn set_show_arrow(&mut self, show: bool) {
        self.show_arrow = show;
    }

    /// Positions and styles the spinner for a drag of `overscroll` pixels.
    pub fn move_spinner(&mut self, header: &mut HeaderState, overscroll: f32) -> PullProgress {
        self.show_arrow = true;
        let progress = pull_progress(
            overscroll,
            header.total_drag_distance,
            header.slingshot_distance(),
        );

        self.visible = true;
        if header.scale_mode {
            self.set_animation_progress((overscroll / header.total_drag_distance).min(1.0));
        } else {
            self.scale = 1.0;
        }

        if overscroll < header.total_drag_distance {
            if self.progress_alpha > STARTING_PROGRESS_ALPHA
                && !self.is_alpha_animation_running(STARTING_PROGRESS_ALPHA)
            {
                self.start_alpha_animation(header.scale_mode, STARTING_PROGRESS_ALPHA);
            }
        } else if self.progress_alpha < MAX_ALPHA && !self.is_alpha_animation_running(MAX_ALPHA) {
            self.start_alpha_animation(header.scale_mode, MAX_ALPHA);
        }

        self.set_start_end_trim(0.0, progress.arc_end);
        self.arrow_scale = progress.arrow_scale;
        self.rotation = progress.rotation;
        header.move_to(header.original_offset + progress.offset_delta);
        progress
    }

    fn is_alpha_animation_running(&self, target: u8) -> bool {
        matches!(
            self.animation,
            Some(SpinnerAnimation {
                kind: AnimationKind::Alpha { to, .. },
                ..
            }) if to == target
        )
    }

    fn start_alpha_animation(&mut self, scale_mode: bool, to: u8) {
        // The grow-in already drives opacity in alpha mode.
        if scale_mode && self.visual_mode == VisualMode::Alpha {
            return;
        }
        let from = self.progress_alpha;
        self.start(
            AnimationKind::Alpha { from, to },
            AnimationSpec::tween(ALPHA_ANIMATION_DURATION_MILLIS, Easing::AccelerateDecelerate),
            None,
        );
    }

    /// Shows the spinner and grows it to full size.
    pub fn start_scale_up(&mut self) {
        self.visible = true;
        if self.visual_mode == VisualMode::Scale {
            self.progress_alpha = MAX_ALPHA;
        }
        self.start(
            AnimationKind::ScaleUp,
            AnimationSpec::tween(self.medium_animation_millis, Easing::AccelerateDecelerate),
            Some(SpinnerAnimationEnd::Refresh),
        );
    }

    pub fn start_scale_down(&mut self, on_end: SpinnerAnimationEnd) {
        self.start(
            AnimationKind::ScaleDown,
            AnimationSpec::tween(SCALE_DOWN_DURATION_MILLIS, Easing::AccelerateDecelerate),
            Some(on_end),
        );
    }

    /// Slides the spinner from `from` to its refreshing rest offset.
    pub fn animate_to_correct_position(&mut self, from: i32) {
        self.start(
            AnimationKind::ToCorrectPosition { from },
            AnimationSpec::tween(
                ANIMATE_TO_TRIGGER_DURATION_MILLIS,
                Easing::Decelerate(DECELERATE_INTERPOLATION_FACTOR),
            ),
            Some(SpinnerAnimationEnd::Refresh),
        );
    }

    /// Returns the spinner from `from` to its start offset, scaling it down
    /// on the way when `scale_mode` is set.
    pub fn animate_to_start_position(
        &mut self,
        scale_mode: bool,
        from: i32,
        on_end: SpinnerAnimationEnd,
    ) {
        if scale_mode {
            let starting_scale = match self.visual_mode {
                VisualMode::Scale => self.scale,
                VisualMode::Alpha => self.progress_alpha as f32 / MAX_ALPHA as f32,
            };
            self.start(
                AnimationKind::ScaleDownToStart {
                    from,
                    starting_scale,
                },
                AnimationSpec::tween(SCALE_DOWN_DURATION_MILLIS, Easing::AccelerateDecelerate),
                Some(on_end),
            );
        } else {
            self.start(
                AnimationKind::ToStartPosition { from },
                AnimationSpec::tween(
                    ANIMATE_TO_START_DURATION_MILLIS,
                    Easing::Decelerate(DECELERATE_INTERPOLATION_FACTOR),
                ),
                Some(on_end),
            );
        }
    }

    fn start(
        &mut self,
        kind: AnimationKind,
        spec: AnimationSpec,
        on_end: Option<SpinnerAnimationEnd>,
    ) {
        if let Some(previous) = self.animation.take() {
            log::trace!("spinner animation {:?} replaced by {:?}", previous.kind, kind);
        }
        self.animation = Some(SpinnerAnimation {
            kind,
            tween: Tween::new(spec),
            on_end,
        });
    }

    /// Drops the running animation without applying its end state.
    pub fn clear_animation(&mut self) {
        self.animation = None;
    }

    pub fn start_spinning(&mut self) {
        if self.spin.is_none() {
            self.show_arrow = false;
            self.spin = Some(Spin::default());
        }
    }

    pub fn stop_spinning(&mut self) {
        self.spin = None;
        self.rotation = 0.0;
        self.set_start_end_trim(0.0, 0.0);
    }

    /// Hides the spinner and puts it back at its start offset.
    pub fn reset(&mut self, header: &mut HeaderState) {
        self.clear_animation();
        self.stop_spinning();
        self.visible = false;
        self.set_color_view_alpha(MAX_ALPHA);
        if header.scale_mode {
            self.set_animation_progress(0.0);
        }
        header.move_to(header.original_offset);
    }

    /// Advances the running animation and the spin.
    ///
    /// Returns the completion action of an animation that finished on this
    /// frame.
    pub fn on_frame(
        &mut self,
        header: &mut HeaderState,
        frame_time_nanos: u64,
    ) -> Option<SpinnerAnimationEnd> {
        if let Some(spin) = self.spin.as_mut() {
            let started_at = *spin.started_at_nanos.get_or_insert(frame_time_nanos);
            spin.elapsed_nanos = frame_time_nanos.saturating_sub(started_at);
        }

        let (kind, frame) = {
            let animation = self.animation.as_mut()?;
            (animation.kind, animation.tween.on_frame(frame_time_nanos))
        };
        self.apply(kind, frame.fraction, header);

        if frame.finished {
            self.animation.take().and_then(|animation| animation.on_end)
        } else {
            None
        }
    }

    fn apply(&mut self, kind: AnimationKind, t: f32, header: &mut HeaderState) {
        match kind {
            AnimationKind::ScaleUp => self.set_animation_progress(t),
            AnimationKind::ScaleDown => self.set_animation_progress(1.0 - t),
            AnimationKind::Alpha { from, to } => {
                self.progress_alpha = (from as i32).lerp(&(to as i32), t).clamp(0, 255) as u8;
            }
            AnimationKind::ToCorrectPosition { from } => {
                header.move_to(from.lerp(&header.refreshing_offset(), t));
                self.arrow_scale = 1.0 - t;
            }
            AnimationKind::ToStartPosition { from } => {
                header.move_to(from.lerp(&header.original_offset, t));
            }
            AnimationKind::ScaleDownToStart {
                from,
                starting_scale,
            } => {
                self.set_animation_progress(starting_scale - starting_scale * t);
                header.move_to(from.lerp(&header.original_offset, t));
            }
        }
    }

    /// Arc start and sweep in degrees.
    fn arc_degrees(&self) -> (f32, f32) {
        match self.spin {
            Some(spin) => {
                let cycle_nanos = SPIN_CYCLE_MILLIS * NANOS_PER_MILLI;
                let turns = spin.elapsed_nanos as f32 / cycle_nanos as f32;
                let phase = turns.fract();
                let sweep = 0.05
                    + (MAX_PROGRESS_ANGLE - 0.05)
                        * 0.5
                        * (1.0 - (phase * std::f32::consts::TAU).cos());
                (turns * 360.0, sweep * 360.0)
            }
            None => (
                (self.arc_start + self.rotation) * 360.0,
                (self.arc_end - self.arc_start) * 360.0,
            ),
        }
    }

    fn arc_color(&self) -> Color {
        let index = match self.spin {
            Some(spin) => {
                let cycles = spin.elapsed_nanos / (SPIN_CYCLE_MILLIS * NANOS_PER_MILLI);
                (cycles % self.colors.len() as u64) as usize
            }
            None => 0,
        };
        self.colors
            .get(index)
            .copied()
            .unwrap_or(Color::BLACK)
            .modulate_alpha(self.progress_alpha)
    }

    /// Records the disc, the arc and the arrow head, centered horizontally
    /// in a layout of `width` pixels.
    pub fn draw(&self, scope: &mut dyn DrawScope, header: &HeaderState, width: f32) {
        if !self.visible || self.scale <= 0.0 {
            return;
        }
        let diameter = self.diameter as f32;
        let center = Point::new(
            width / 2.0,
            header.current_offset() as f32 + diameter / 2.0,
        );
        scope.draw_circle(
            center,
            diameter / 2.0 * self.scale,
            self.background_color.modulate_alpha(self.background_alpha),
        );

        let radius = diameter * ARC_RADIUS_FRACTION * self.scale;
        let (start, sweep) = self.arc_degrees();
        let color = self.arc_color();
        if sweep.abs() > f32::EPSILON {
            scope.draw_arc(
                center,
                radius,
                start,
                sweep,
                diameter * STROKE_FRACTION * self.scale,
                color,
            );
        }

        if self.show_arrow && self.arrow_scale > 0.0 {
            let angle = (start + sweep).to_radians();
            let (sin, cos) = angle.sin_cos();
            let tip_base = Point::new(center.x + radius * cos, center.y + radius * sin);
            let half_width = diameter * ARROW_WIDTH_FRACTION * 0.5 * self.arrow_scale * self.scale;
            let height = diameter * ARROW_HEIGHT_FRACTION * self.arrow_scale * self.scale;
            scope.draw_triangle(
                [
                    Point::new(tip_base.x - cos * half_width, tip_base.y - sin * half_width),
                    Point::new(tip_base.x + cos * half_width, tip_base.y + sin * half_width),
                    Point::new(tip_base.x - sin * height, tip_base.y + cos * height),
                ],
                color,
            );
        }
    }
}

#[cfg(test)]
#[path = "tests/spinner_tests.rs"]
mod tests;
