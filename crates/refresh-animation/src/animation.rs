//! Tween animations with easing curves.
//!
//! A [`Tween`] is a timeline: it maps frame timestamps to an eased fraction
//! in `[0, 1]`. Owners apply that fraction to whatever they animate, which
//! keeps integer offset math (truncation included) in the owner's hands.

pub const NANOS_PER_MILLI: u64 = 1_000_000;

/// Values an animation can blend between.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for i32 {
    /// Integer interpolation truncates toward zero.
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + ((target - self) as f32 * fraction) as i32
    }
}

/// Easing curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Identity.
    Linear,
    /// Cosine ease in and out; the platform default for view animations.
    AccelerateDecelerate,
    /// Material standard curve, `cubic-bezier(0.4, 0, 0.2, 1)`.
    FastOutSlowIn,
    /// Starts slow and speeds up; the factor sharpens the curve.
    Accelerate(f32),
    /// Starts fast and slows down; the factor sharpens the curve.
    Decelerate(f32),
}

impl Easing {
    /// Maps linear progress in `[0, 1]` onto the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        match *self {
            Easing::Linear => fraction,
            Easing::AccelerateDecelerate => {
                ((fraction + 1.0) * std::f32::consts::PI).cos() / 2.0 + 0.5
            }
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::Accelerate(factor) => {
                if factor == 1.0 {
                    fraction * fraction
                } else {
                    fraction.powf(2.0 * factor)
                }
            }
            Easing::Decelerate(factor) => {
                if factor == 1.0 {
                    1.0 - (1.0 - fraction) * (1.0 - fraction)
                } else {
                    1.0 - (1.0 - fraction).powf(2.0 * factor)
                }
            }
        }
    }
}

/// Cubic bezier curve through (0,0), (x1,y1), (x2,y2), (1,1) sampled at `x = fraction`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let slope = |a: f32, b: f32, c: f32, t: f32| (3.0 * a * t + 2.0 * b) * t + c;

    // Newton-Raphson first; bisection when the slope flattens out.
    let mut t = fraction;
    for _ in 0..8 {
        let error = sample(ax, bx, cx, t) - fraction;
        if error.abs() < 1e-6 {
            return sample(ay, by, cy, t);
        }
        let derivative = slope(ax, bx, cx, t);
        if derivative.abs() < 1e-6 {
            break;
        }
        t = (t - error / derivative).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    t = fraction;
    for _ in 0..16 {
        let error = sample(ax, bx, cx, t) - fraction;
        if error.abs() < 1e-6 {
            break;
        }
        if error > 0.0 {
            hi = t;
        } else {
            lo = t;
        }
        t = 0.5 * (lo + hi);
    }

    sample(ay, by, cy, t)
}

/// How long a tween runs and how it eases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::AccelerateDecelerate)
    }
}

/// One sample of a running tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenFrame {
    /// Eased fraction in `[0, 1]`.
    pub fraction: f32,
    /// True on the frame that reached the end of the timeline.
    pub finished: bool,
}

/// Time-based timeline that starts on the first frame it sees.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    spec: AnimationSpec,
    start_time_nanos: Option<u64>,
    fraction: f32,
    finished: bool,
}

impl Tween {
    pub fn new(spec: AnimationSpec) -> Self {
        Self {
            spec,
            start_time_nanos: None,
            fraction: 0.0,
            finished: false,
        }
    }

    pub fn spec(&self) -> AnimationSpec {
        self.spec
    }

    /// True once the first frame has been delivered.
    pub fn has_started(&self) -> bool {
        self.start_time_nanos.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Started or waiting for its first frame, and not yet finished.
    pub fn is_running(&self) -> bool {
        !self.finished
    }

    /// Last eased fraction produced.
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// Interpolates between two values at the current fraction.
    pub fn value_between<T: Lerp>(&self, start: &T, target: &T) -> T {
        start.lerp(target, self.fraction)
    }

    /// Advances the timeline to `frame_time_nanos`.
    pub fn on_frame(&mut self, frame_time_nanos: u64) -> TweenFrame {
        if self.finished {
            return TweenFrame {
                fraction: self.fraction,
                finished: true,
            };
        }

        let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
        let duration_nanos = (self.spec.duration_millis * NANOS_PER_MILLI).max(1);
        let linear_progress = (elapsed_nanos as f32 / duration_nanos as f32).clamp(0.0, 1.0);
        self.finished = linear_progress >= 1.0;
        self.fraction = if self.finished {
            self.spec.easing.transform(1.0)
        } else {
            self.spec.easing.transform(linear_progress)
        };

        TweenFrame {
            fraction: self.fraction,
            finished: self.finished,
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
