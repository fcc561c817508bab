use bevy::asset::{RecursiveDependencyLoadState, UntypedAssetId};
use bevy::prelude::*;

use super::error::LoadError;

/// Load state of a single fetch, dependencies included.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemState {
    Pending,
    Loaded,
    Failed(String),
}

impl ItemState {
    pub fn query(asset_server: &AssetServer, id: impl Into<UntypedAssetId>) -> Self {
        match asset_server.get_recursive_dependency_load_state(id) {
            Some(RecursiveDependencyLoadState::Loaded) => ItemState::Loaded,
            Some(RecursiveDependencyLoadState::Failed(err)) => ItemState::Failed(err.to_string()),
            Some(RecursiveDependencyLoadState::NotLoaded)
            | Some(RecursiveDependencyLoadState::Loading)
            | None => ItemState::Pending,
        }
    }
}

/// Combined outcome of several fetches awaited together.
#[derive(Debug, Clone, PartialEq)]
pub enum JointState {
    Pending,
    Ready,
    Failed(LoadError),
}

/// Resolves once every item is loaded; fails as soon as any one fails.
pub fn join<'a>(items: impl IntoIterator<Item = (&'a str, ItemState)>) -> JointState {
    let mut all_loaded = true;
    for (url, state) in items {
        match state {
            ItemState::Loaded => {}
            ItemState::Pending => all_loaded = false,
            ItemState::Failed(reason) => {
                return JointState::Failed(LoadError::Failed {
                    url: url.to_string(),
                    reason,
                });
            }
        }
    }

    if all_loaded {
        JointState::Ready
    } else {
        JointState::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_for_every_item() {
        let state = join([
            ("atlas.png", ItemState::Loaded),
            ("font.json", ItemState::Pending),
        ]);
        assert_eq!(state, JointState::Pending);

        let state = join([
            ("atlas.png", ItemState::Loaded),
            ("font.json", ItemState::Loaded),
        ]);
        assert_eq!(state, JointState::Ready);
    }

    #[test]
    fn fails_fast_while_others_pending() {
        let state = join([
            ("atlas.png", ItemState::Pending),
            ("font.json", ItemState::Failed("bad json".into())),
        ]);
        assert_eq!(
            state,
            JointState::Failed(LoadError::Failed {
                url: "font.json".into(),
                reason: "bad json".into(),
            })
        );
    }
}
