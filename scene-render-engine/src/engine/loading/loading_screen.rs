use bevy::prelude::*;

use super::loading_bar::LoadingBar;
use super::manager::LoadComplete;
use crate::engine::animation::tween::Tween;
use crate::engine::core::config::OverlaySettings;
use crate::engine::scene::overlay::Overlay;
use crate::engine::shaders::overlay::OverlayMaterial;
use crate::engine::systems::frame_clock::FrameClock;

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenPhase {
    /// Assets still arriving; the overlay stays opaque.
    Loading,
    /// Everything loaded, holding before the fade starts.
    Waiting { remaining: f32 },
    Fading(Tween),
    Done,
}

/// Drives the overlay fade once loading completes.
#[derive(Resource, Debug, Clone)]
pub struct LoadingScreen {
    phase: ScreenPhase,
    alpha: f32,
    settings: OverlaySettings,
}

/// What the loading screen wants applied after a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenStep {
    pub alpha: f32,
    /// True on the step the fade begins; the loading bar ends then.
    pub fade_started: bool,
}

impl LoadingScreen {
    pub fn new(settings: OverlaySettings) -> Self {
        Self {
            phase: ScreenPhase::Loading,
            alpha: settings.start_alpha,
            settings,
        }
    }

    pub fn phase(&self) -> &ScreenPhase {
        &self.phase
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn on_complete(&mut self) {
        if self.phase == ScreenPhase::Loading {
            self.phase = ScreenPhase::Waiting {
                remaining: self.settings.wait_secs,
            };
        }
    }

    pub fn step(&mut self, delta: f32) -> ScreenStep {
        let mut fade_started = false;
        let mut delta = delta.max(0.0);

        if let ScreenPhase::Waiting { remaining } = &mut self.phase {
            *remaining -= delta;
            if *remaining > 0.0 {
                return ScreenStep {
                    alpha: self.alpha,
                    fade_started,
                };
            }
            // Carry the overshoot into the fade.
            delta = -*remaining;
            self.phase = ScreenPhase::Fading(
                Tween::new(self.alpha, 0.0, self.settings.duration_secs)
                    .with_delay(self.settings.delay_secs),
            );
            fade_started = true;
        }

        if let ScreenPhase::Fading(tween) = &mut self.phase {
            self.alpha = tween.advance(delta);
            if tween.is_finished() {
                self.phase = ScreenPhase::Done;
            }
        }

        ScreenStep {
            alpha: self.alpha,
            fade_started,
        }
    }
}

pub fn start_fade_on_complete(
    mut complete_events: EventReader<LoadComplete>,
    mut screen: ResMut<LoadingScreen>,
) {
    if complete_events.read().next().is_some() {
        screen.on_complete();
    }
}

/// Advance the fade by the frame delta and push alpha into the overlay.
pub fn update_loading_screen(
    clock: Res<FrameClock>,
    mut screen: ResMut<LoadingScreen>,
    mut bar: ResMut<LoadingBar>,
    overlays: Query<&MeshMaterial3d<OverlayMaterial>, With<Overlay>>,
    mut materials: ResMut<Assets<OverlayMaterial>>,
) {
    if matches!(screen.phase(), ScreenPhase::Loading | ScreenPhase::Done) {
        return;
    }

    let step = screen.step(clock.delta());
    if step.fade_started {
        info!("Fading in scene");
        bar.end();
    }

    for handle in &overlays {
        if let Some(material) = materials.get_mut(&handle.0) {
            material.set_alpha(step.alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::core::config::SceneConfig;
    use crate::engine::loading::loading_bar::BarPhase;
    use crate::engine::loading::manager::LoadingManager;

    fn screen() -> LoadingScreen {
        LoadingScreen::new(SceneConfig::default().overlay)
    }

    #[test]
    fn stays_opaque_until_complete() {
        let mut screen = screen();
        for _ in 0..100 {
            assert_eq!(screen.step(0.1).alpha, 1.0);
        }
        assert_eq!(screen.phase(), &ScreenPhase::Loading);
    }

    #[test]
    fn waits_before_fading() {
        let mut screen = screen();
        screen.on_complete();

        let step = screen.step(1.0);
        assert!(!step.fade_started);
        assert_eq!(step.alpha, 1.0);

        let step = screen.step(0.25);
        assert!(step.fade_started);
        // Still inside the 0.3 s delay.
        assert_eq!(step.alpha, 1.0);
        assert!(matches!(screen.phase(), ScreenPhase::Fading(_)));
    }

    #[test]
    fn fade_reaches_zero_and_finishes() {
        let mut screen = screen();
        screen.on_complete();

        let mut last = screen.alpha();
        let mut elapsed = 0.0;
        while elapsed < 4.0 {
            let alpha = screen.step(1.0 / 60.0).alpha;
            assert!(alpha <= last);
            last = alpha;
            elapsed += 1.0 / 60.0;
        }
        assert_eq!(screen.alpha(), 0.0);
        assert_eq!(screen.phase(), &ScreenPhase::Done);
    }

    #[test]
    fn second_completion_does_not_restart() {
        let mut screen = screen();
        screen.on_complete();
        screen.step(1.3);
        screen.on_complete();
        assert!(matches!(screen.phase(), ScreenPhase::Fading(_)));
    }

    #[test]
    fn three_item_manifest_end_to_end() {
        let mut manager = LoadingManager::new(["atlas.png", "font.fnt.json", "model.glb"], 30.0);
        let mut bar = LoadingBar::default();
        let mut screen = screen();

        for url in ["atlas.png", "model.glb"] {
            let progress = manager.item_loaded(url).unwrap();
            bar.set_progress(&progress);
        }
        assert_eq!(bar.transform(), "scaleX(0.6666666666666666)");
        assert!(manager.take_completion().is_none());

        let progress = manager.item_loaded("font.fnt.json").unwrap();
        bar.set_progress(&progress);
        assert_eq!(bar.transform(), "scaleX(1)");

        assert!(manager.take_completion().is_some());
        screen.on_complete();
        assert!(manager.take_completion().is_none());

        let mut ended = false;
        for _ in 0..300 {
            if screen.step(1.0 / 60.0).fade_started {
                bar.end();
                ended = true;
            }
        }
        assert!(ended);
        assert_eq!(bar.phase(), BarPhase::Ended);
        assert_eq!(bar.state_class(), Some("ended"));
        assert_eq!(screen.alpha(), 0.0);
    }
}
