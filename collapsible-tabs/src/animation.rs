/// A timed animation between two values, eased in and out with a cubic curve.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start_ms: u64,
    pub duration_ms: u64,
}

impl Tween {
    pub fn new(from: f32, to: f32, start_ms: u64, duration_ms: u64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    pub fn sample(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * ease_in_out_cubic(t)
    }
}

fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - (u * u * u) / 2.0
    }
}

/// A momentum animation: starts at `from` moving at `velocity` (units per millisecond) and
/// decelerates exponentially.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decay {
    pub from: f32,
    pub velocity: f32,
    pub deceleration: f32,
    pub start_ms: u64,
}

impl Decay {
    pub const DEFAULT_DECELERATION: f32 = 0.998;

    /// Frame length used to decide when the motion has become imperceptible.
    const FRAME_MS: u64 = 16;
    const REST_DELTA: f32 = 0.1;

    pub fn new(from: f32, velocity: f32, start_ms: u64) -> Self {
        Self {
            from,
            velocity,
            deceleration: Self::DEFAULT_DECELERATION,
            start_ms,
        }
    }

    pub fn sample(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.start_ms) as f32;
        let k = 1.0 - self.deceleration;
        self.from + self.velocity / k * (1.0 - (-k * elapsed).exp())
    }

    /// The value the animation converges to.
    pub fn rest_value(&self) -> f32 {
        self.from + self.velocity / (1.0 - self.deceleration)
    }

    /// `true` once a frame's worth of motion drops below a tenth of a unit.
    pub fn is_done(&self, now_ms: u64) -> bool {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        if elapsed == 0 {
            return self.velocity == 0.0;
        }
        let prev = self.sample(now_ms.saturating_sub(Self::FRAME_MS).max(self.start_ms));
        (self.sample(now_ms) - prev).abs() < Self::REST_DELTA
    }
}
