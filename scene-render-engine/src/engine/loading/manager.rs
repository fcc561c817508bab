use bevy::prelude::*;

use super::error::LoadError;

/// Reported once per completed manifest item.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct LoadProgress {
    pub url: String,
    pub items_loaded: usize,
    pub items_total: usize,
}

impl LoadProgress {
    pub fn ratio(&self) -> f64 {
        if self.items_total == 0 {
            1.0
        } else {
            self.items_loaded as f64 / self.items_total as f64
        }
    }
}

/// Fired exactly once, when every manifest item has loaded.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LoadComplete;

/// Fired at most once, for the first item that fails or times out.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct LoadFailed(pub LoadError);

#[derive(Debug, Clone, PartialEq)]
enum ItemStatus {
    Pending,
    Loaded,
}

#[derive(Debug, Clone)]
struct ManifestItem {
    url: String,
    status: ItemStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ManagerPhase {
    Loading,
    Complete,
    Failed(LoadError),
}

/// Progress bookkeeping for a fixed set of asset requests.
///
/// The manifest is known up front. Items report in any order; the first
/// report per url counts, later ones are ignored. Completion is handed out
/// once through [`LoadingManager::take_completion`]. Any failure moves the
/// manager to [`ManagerPhase::Failed`] and completion never fires.
#[derive(Resource, Debug, Clone)]
pub struct LoadingManager {
    items: Vec<ManifestItem>,
    loaded: usize,
    phase: ManagerPhase,
    completion_pending: bool,
    started_at: Option<f32>,
    timeout_secs: f32,
}

impl LoadingManager {
    pub fn new<I, S>(urls: I, timeout_secs: f32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<ManifestItem> = urls
            .into_iter()
            .map(|url| ManifestItem {
                url: url.into(),
                status: ItemStatus::Pending,
            })
            .collect();

        let empty = items.is_empty();
        Self {
            items,
            loaded: 0,
            phase: if empty {
                ManagerPhase::Complete
            } else {
                ManagerPhase::Loading
            },
            completion_pending: empty,
            started_at: None,
            timeout_secs,
        }
    }

    pub fn items_total(&self) -> usize {
        self.items.len()
    }

    pub fn items_loaded(&self) -> usize {
        self.loaded
    }

    pub fn phase(&self) -> &ManagerPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ManagerPhase::Loading
    }

    pub fn progress_ratio(&self) -> f64 {
        if self.items.is_empty() {
            1.0
        } else {
            self.loaded as f64 / self.items.len() as f64
        }
    }

    pub fn pending_urls(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .filter(|item| item.status == ItemStatus::Pending)
            .map(|item| item.url.as_str())
    }

    /// Marks the start of the fetches; timeouts count from here.
    pub fn start(&mut self, now_secs: f32) {
        if self.started_at.is_none() {
            self.started_at = Some(now_secs);
        }
    }

    pub fn item_loaded(&mut self, url: &str) -> Option<LoadProgress> {
        if !self.is_loading() {
            return None;
        }

        let item = self
            .items
            .iter_mut()
            .find(|item| item.url == url && item.status == ItemStatus::Pending)?;
        item.status = ItemStatus::Loaded;
        self.loaded += 1;

        if self.loaded == self.items.len() {
            self.phase = ManagerPhase::Complete;
            self.completion_pending = true;
        }

        Some(LoadProgress {
            url: url.to_string(),
            items_loaded: self.loaded,
            items_total: self.items.len(),
        })
    }

    /// Fails the whole manifest. Returns the error only on the first failure.
    pub fn item_failed(&mut self, error: LoadError) -> Option<LoadError> {
        if !self.is_loading() {
            return None;
        }
        self.phase = ManagerPhase::Failed(error.clone());
        Some(error)
    }

    pub fn poll_timeouts(&mut self, now_secs: f32) -> Option<LoadError> {
        let started_at = self.started_at?;
        let waited = now_secs - started_at;
        if !self.is_loading() || waited < self.timeout_secs {
            return None;
        }

        let url = self.pending_urls().next()?.to_string();
        self.item_failed(LoadError::TimedOut {
            url,
            after_secs: waited,
        })
    }

    pub fn take_completion(&mut self) -> Option<LoadComplete> {
        if self.completion_pending {
            self.completion_pending = false;
            Some(LoadComplete)
        } else {
            None
        }
    }
}

impl Default for LoadingManager {
    fn default() -> Self {
        Self::new(Vec::<String>::new(), f32::INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> LoadingManager {
        LoadingManager::new(["atlas.png", "font.json", "model.glb"], 30.0)
    }

    #[test]
    fn progress_counts_each_item_once() {
        let mut manager = manifest();

        let first = manager.item_loaded("font.json").unwrap();
        assert_eq!((first.items_loaded, first.items_total), (1, 3));
        assert!(manager.item_loaded("font.json").is_none());
        assert!(manager.item_loaded("unknown.bin").is_none());
        assert_eq!(manager.items_loaded(), 1);
    }

    #[test]
    fn ratio_never_decreases_and_ends_at_one() {
        let mut manager = manifest();
        let mut last = manager.progress_ratio();

        for url in ["model.glb", "model.glb", "atlas.png", "font.json"] {
            manager.item_loaded(url);
            let ratio = manager.progress_ratio();
            assert!(ratio >= last);
            last = ratio;
        }

        assert_eq!(manager.progress_ratio(), 1.0);
        assert_eq!(manager.phase(), &ManagerPhase::Complete);
    }

    #[test]
    fn completion_is_handed_out_once() {
        let mut manager = manifest();
        manager.item_loaded("atlas.png");
        manager.item_loaded("font.json");
        assert!(manager.take_completion().is_none());

        manager.item_loaded("model.glb");
        assert_eq!(manager.take_completion(), Some(LoadComplete));
        assert!(manager.take_completion().is_none());
        assert!(manager.item_loaded("model.glb").is_none());
    }

    #[test]
    fn two_of_three_reports_two_thirds() {
        let mut manager = manifest();
        manager.item_loaded("atlas.png");
        let progress = manager.item_loaded("model.glb").unwrap();

        assert_eq!(progress.items_loaded, 2);
        assert_eq!(progress.items_total, 3);
        assert!((progress.ratio() - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_manifest_is_complete_immediately() {
        let mut manager = LoadingManager::new(Vec::<String>::new(), 30.0);
        assert_eq!(manager.progress_ratio(), 1.0);
        assert_eq!(manager.take_completion(), Some(LoadComplete));
    }

    #[test]
    fn failure_blocks_completion() {
        let mut manager = manifest();
        manager.item_loaded("atlas.png");

        let error = LoadError::Failed {
            url: "model.glb".into(),
            reason: "404".into(),
        };
        assert_eq!(manager.item_failed(error.clone()), Some(error));
        assert!(manager.item_failed(LoadError::MissingAsset { url: "x".into() }).is_none());

        assert!(manager.item_loaded("font.json").is_none());
        assert!(manager.item_loaded("model.glb").is_none());
        assert!(manager.take_completion().is_none());
    }

    #[test]
    fn pending_item_times_out() {
        let mut manager = manifest();
        manager.start(1.0);
        manager.item_loaded("atlas.png");

        assert!(manager.poll_timeouts(30.0).is_none());

        let error = manager.poll_timeouts(31.5).unwrap();
        assert_eq!(error.url(), "font.json");
        assert!(matches!(error, LoadError::TimedOut { .. }));
        assert!(matches!(manager.phase(), ManagerPhase::Failed(_)));
    }

    #[test]
    fn no_timeout_before_start() {
        let mut manager = manifest();
        assert!(manager.poll_timeouts(1000.0).is_none());
    }
}
