use bevy::prelude::*;

use crate::engine::loading::manager::{LoadComplete, LoadFailed};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Ready,
    Failed,
}

// Loading -> Ready once every manifest item has arrived
pub fn transition_to_ready(
    mut complete_events: EventReader<LoadComplete>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if complete_events.read().next().is_some() {
        info!("→ Transitioning to Ready state");
        next_state.set(AppState::Ready);
    }
}

// Loading -> Failed on the first failure or timeout
pub fn transition_to_failed(
    mut failed_events: EventReader<LoadFailed>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if let Some(LoadFailed(error)) = failed_events.read().next() {
        error!("→ Transitioning to Failed state: {}", error);
        next_state.set(AppState::Failed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::loading::error::LoadError;
    use bevy::state::app::StatesPlugin;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<AppState>()
            .add_event::<LoadComplete>()
            .add_event::<LoadFailed>()
            .add_systems(
                Update,
                (transition_to_ready, transition_to_failed)
                    .run_if(in_state(AppState::Loading)),
            );
        app
    }

    fn state(app: &App) -> AppState {
        *app.world().resource::<State<AppState>>().get()
    }

    #[test]
    fn completion_moves_to_ready() {
        let mut app = app();
        app.update();
        assert_eq!(state(&app), AppState::Loading);

        app.world_mut().send_event(LoadComplete);
        app.update();
        app.update();
        assert_eq!(state(&app), AppState::Ready);
    }

    #[test]
    fn failure_moves_to_failed() {
        let mut app = app();
        app.world_mut().send_event(LoadFailed(LoadError::TimedOut {
            url: "model.glb".into(),
            after_secs: 30.0,
        }));
        app.update();
        app.update();
        assert_eq!(state(&app), AppState::Failed);
    }
}
