use bevy::prelude::*;

use crate::engine::loading::loading_bar::LoadingBar;

#[cfg(target_arch = "wasm32")]
use constants::paths::LOADING_BAR_SELECTOR;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{HtmlElement, window};

/// Plugin keeping the page's loading bar element in step with [`LoadingBar`].
/// Writes are skipped on native targets, where there is no page.
pub struct DomLoadingBarPlugin;

impl Plugin for DomLoadingBarPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DomSyncState>()
            .add_systems(Update, sync_dom_loading_bar);
    }
}

/// Last bar revision written to the page.
#[derive(Resource, Debug, Default)]
pub struct DomSyncState {
    applied_revision: u64,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    missing_reported: bool,
}

impl DomSyncState {
    /// Records the revision and reports whether the page needs a write.
    pub fn needs_write(&mut self, revision: u64) -> bool {
        if revision == self.applied_revision {
            return false;
        }
        self.applied_revision = revision;
        true
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Debug, thiserror::Error)]
enum DomError {
    #[error("no document available")]
    NoDocument,
    #[error("no element matches {0}")]
    MissingElement(&'static str),
    #[error("DOM call failed: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
fn js_error(value: wasm_bindgen::JsValue) -> DomError {
    DomError::Js(format!("{:?}", value))
}

#[cfg(target_arch = "wasm32")]
fn write_loading_bar(bar: &LoadingBar) -> Result<(), DomError> {
    let document = window()
        .and_then(|window| window.document())
        .ok_or(DomError::NoDocument)?;
    let element = document
        .query_selector(LOADING_BAR_SELECTOR)
        .map_err(js_error)?
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .ok_or(DomError::MissingElement(LOADING_BAR_SELECTOR))?;

    element
        .style()
        .set_property("transform", &bar.transform())
        .map_err(js_error)?;
    if let Some(class) = bar.state_class() {
        element.class_list().add_1(class).map_err(js_error)?;
    }
    Ok(())
}

fn sync_dom_loading_bar(bar: Res<LoadingBar>, mut state: ResMut<DomSyncState>) {
    if !state.needs_write(bar.revision()) {
        return;
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = write_loading_bar(&bar) {
            // A page without the bar is valid; say so once.
            if !state.missing_reported {
                warn!("Loading bar not updated: {}", e);
                state.missing_reported = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_only_on_new_revisions() {
        let mut state = DomSyncState::default();
        assert!(!state.needs_write(0));
        assert!(state.needs_write(1));
        assert!(!state.needs_write(1));
        assert!(state.needs_write(3));
    }
}
