/// Easing curves available to tweens.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out, the usual default for UI fades.
    #[default]
    Power1Out,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Time-based interpolation of one scalar, with a start delay.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    delay: f32,
    duration: f32,
    elapsed: f32,
    ease: Ease,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            delay: 0.0,
            duration: duration.max(0.0),
            elapsed: 0.0,
            ease: Ease::default(),
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Moves the tween forward and returns the new value.
    pub fn advance(&mut self, delta: f32) -> f32 {
        self.elapsed += delta.max(0.0);
        self.value()
    }

    pub fn value(&self) -> f32 {
        let active = self.elapsed - self.delay;
        if active <= 0.0 {
            return self.from;
        }
        if self.duration == 0.0 || active >= self.duration {
            return self.to;
        }
        let t = self.ease.apply(active / self.duration);
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_start_value_during_delay() {
        let mut tween = Tween::new(1.0, 0.0, 2.0).with_delay(0.3);
        assert_eq!(tween.advance(0.2), 1.0);
        assert!(!tween.is_finished());
    }

    #[test]
    fn reaches_target_after_delay_plus_duration() {
        let mut tween = Tween::new(1.0, 0.0, 2.0).with_delay(0.3);
        tween.advance(1.0);
        let midway = tween.value();
        assert!(midway > 0.0 && midway < 1.0);

        assert_eq!(tween.advance(1.5), 0.0);
        assert!(tween.is_finished());
    }

    #[test]
    fn linear_midpoint() {
        let mut tween = Tween::new(0.0, 10.0, 4.0).with_ease(Ease::Linear);
        assert!((tween.advance(2.0) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn power1_out_is_front_loaded() {
        assert!(Ease::Power1Out.apply(0.5) > 0.5);
        assert_eq!(Ease::Power1Out.apply(0.0), 0.0);
        assert_eq!(Ease::Power1Out.apply(1.0), 1.0);
    }

    #[test]
    fn value_is_monotonic_for_a_fade_out() {
        let mut tween = Tween::new(1.0, 0.0, 2.0);
        let mut last = tween.value();
        for _ in 0..40 {
            let value = tween.advance(1.0 / 16.0);
            assert!(value <= last);
            last = value;
        }
    }
}
