use bevy::prelude::*;

use super::manager::{LoadFailed, LoadProgress};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarPhase {
    #[default]
    Progress,
    /// Loading finished and the fade has started; the bar animates away.
    Ended,
    Failed,
}

/// Presentation state of the loading bar.
///
/// The browser build mirrors it onto the `.loading-bar` element, the native
/// build onto a UI node. `revision` bumps on every change so sinks only
/// touch their target when something moved.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct LoadingBar {
    ratio: f64,
    phase: BarPhase,
    revision: u64,
}

impl LoadingBar {
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn phase(&self) -> BarPhase {
        self.phase
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_progress(&mut self, progress: &LoadProgress) {
        if self.phase != BarPhase::Progress {
            return;
        }
        let ratio = progress.ratio().max(self.ratio);
        if ratio != self.ratio {
            self.ratio = ratio;
            self.revision += 1;
        }
    }

    pub fn end(&mut self) {
        if self.phase == BarPhase::Progress {
            self.phase = BarPhase::Ended;
            self.revision += 1;
        }
    }

    pub fn fail(&mut self) {
        if self.phase == BarPhase::Progress {
            self.phase = BarPhase::Failed;
            self.revision += 1;
        }
    }

    /// Inline CSS transform. Cleared once the bar has ended so the
    /// stylesheet's `ended` transition takes over.
    pub fn transform(&self) -> String {
        match self.phase {
            BarPhase::Ended => String::new(),
            BarPhase::Progress | BarPhase::Failed => format!("scaleX({})", self.ratio),
        }
    }

    /// Class added to the element once the bar leaves the progress phase.
    pub fn state_class(&self) -> Option<&'static str> {
        match self.phase {
            BarPhase::Progress => None,
            BarPhase::Ended => Some("ended"),
            BarPhase::Failed => Some("failed"),
        }
    }
}

pub fn update_loading_bar(
    mut progress_events: EventReader<LoadProgress>,
    mut failed_events: EventReader<LoadFailed>,
    mut bar: ResMut<LoadingBar>,
) {
    for progress in progress_events.read() {
        bar.set_progress(progress);
    }
    if failed_events.read().next().is_some() {
        bar.fail();
    }
}

#[derive(Component)]
pub struct NativeLoadingBar;

/// Thin bar across the middle of the window, the native stand-in for the
/// page's `.loading-bar`.
pub fn spawn_native_loading_bar(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                ..default()
            },
            // Above the render surface.
            GlobalZIndex(1),
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Percent(0.0),
                    height: Val::Px(2.0),
                    ..default()
                },
                BackgroundColor(Color::WHITE),
                NativeLoadingBar,
            ));
        });
}

pub fn sync_native_loading_bar(
    bar: Res<LoadingBar>,
    mut nodes: Query<(&mut Node, &mut BackgroundColor, &mut Visibility), With<NativeLoadingBar>>,
) {
    if !bar.is_changed() {
        return;
    }
    for (mut node, mut colour, mut visibility) in &mut nodes {
        node.width = Val::Percent((bar.ratio() * 100.0) as f32);
        match bar.phase() {
            BarPhase::Progress => {}
            BarPhase::Ended => *visibility = Visibility::Hidden,
            BarPhase::Failed => colour.0 = Color::srgb(0.8, 0.1, 0.1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(items_loaded: usize, items_total: usize) -> LoadProgress {
        LoadProgress {
            url: "item".into(),
            items_loaded,
            items_total,
        }
    }

    #[test]
    fn transform_uses_the_exact_ratio() {
        let mut bar = LoadingBar::default();
        bar.set_progress(&progress(2, 3));
        assert_eq!(bar.transform(), "scaleX(0.6666666666666666)");
        bar.set_progress(&progress(3, 3));
        assert_eq!(bar.transform(), "scaleX(1)");
    }

    #[test]
    fn ratio_never_goes_back() {
        let mut bar = LoadingBar::default();
        bar.set_progress(&progress(2, 3));
        bar.set_progress(&progress(1, 3));
        assert!((bar.ratio() - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ending_clears_the_transform_and_adds_the_class() {
        let mut bar = LoadingBar::default();
        bar.set_progress(&progress(3, 3));
        let revision = bar.revision();

        bar.end();
        assert_eq!(bar.transform(), "");
        assert_eq!(bar.state_class(), Some("ended"));
        assert_eq!(bar.revision(), revision + 1);

        bar.end();
        bar.fail();
        assert_eq!(bar.phase(), BarPhase::Ended);
        assert_eq!(bar.revision(), revision + 1);
    }

    #[test]
    fn failure_freezes_progress() {
        let mut bar = LoadingBar::default();
        bar.set_progress(&progress(1, 3));
        bar.fail();
        bar.set_progress(&progress(3, 3));
        assert_eq!(bar.state_class(), Some("failed"));
        assert_eq!(bar.transform(), "scaleX(0.3333333333333333)");
    }
}
