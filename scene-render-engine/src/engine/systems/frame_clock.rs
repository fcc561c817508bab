use bevy::prelude::*;

/// Per-tick ordering of the frame loop. Rendering follows in Bevy's own
/// schedules once `Update` has run.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Resize and pointer events.
    Input,
    Clock,
    Animate,
    Controls,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoopState {
    #[default]
    Idle,
    Running,
}

/// Elapsed/delta bookkeeping for the frame loop.
///
/// Delta is elapsed minus the previous elapsed, floored at zero so a clock
/// that stalls or resets never rewinds animation.
#[derive(Resource, Debug, Clone, Default)]
pub struct FrameClock {
    state: LoopState,
    previous_elapsed: f32,
    delta: f32,
}

impl FrameClock {
    pub fn tick(&mut self, elapsed: f32) -> f32 {
        self.delta = (elapsed - self.previous_elapsed).max(0.0);
        self.previous_elapsed = self.previous_elapsed.max(elapsed);
        self.state = LoopState::Running;
        self.delta
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn elapsed(&self) -> f32 {
        self.previous_elapsed
    }

    pub fn state(&self) -> LoopState {
        self.state
    }
}

/// First step of every tick.
pub fn tick_frame_clock(time: Res<Time>, mut clock: ResMut<FrameClock>) {
    if clock.state() == LoopState::Idle {
        info!("Frame loop running");
    }
    clock.tick(time.elapsed_secs());
}
