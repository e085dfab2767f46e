// Local preview store - Hands out object-style URLs for selected media

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use bytes::Bytes;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::model::*;
use crate::ports::PreviewPort;

const URL_SCHEME: &str = "blob:deepfake-client/";

/// In-memory preview store
///
/// Clones share the same set of live URLs, so a host can keep one clone to
/// resolve URLs while the playback synchronizer owns another.
#[derive(Clone, Default)]
pub struct LocalPreviewStore {
    live: Rc<RefCell<HashMap<PreviewUrl, Bytes>>>,
}

impl LocalPreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of URLs acquired and not yet released
    pub fn live_count(&self) -> usize {
        self.live.borrow().len()
    }

    pub fn is_live(&self, url: &PreviewUrl) -> bool {
        self.live.borrow().contains_key(url)
    }

    /// Content behind a live URL
    pub fn resolve(&self, url: &PreviewUrl) -> Option<Bytes> {
        self.live.borrow().get(url).cloned()
    }
}

impl PreviewPort for LocalPreviewStore {
    fn acquire(&mut self, media: &SelectedMedia) -> PreviewUrl {
        let url = PreviewUrl::new(format!("{}{}", URL_SCHEME, Uuid::new_v4()));
        self.live.borrow_mut().insert(url.clone(), media.binary().clone());
        debug!("Acquired preview {} for {}", url, media.display_name());
        url
    }

    fn release(&mut self, url: &PreviewUrl) {
        if self.live.borrow_mut().remove(url).is_some() {
            debug!("Released preview {}", url);
        } else {
            warn!("Release of unknown preview {}", url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::ValidationGate;

    fn media() -> SelectedMedia {
        ValidationGate::validate(Some(FileHandle::new("clip.mp4", "video/mp4", vec![7u8; 8]))).unwrap()
    }

    #[test]
    fn test_acquire_and_release() {
        let mut store = LocalPreviewStore::new();
        let url = store.acquire(&media());
        assert!(url.as_str().starts_with("blob:deepfake-client/"));
        assert_eq!(store.live_count(), 1);
        assert_eq!(store.resolve(&url).map(|b| b.len()), Some(8));

        store.release(&url);
        assert_eq!(store.live_count(), 0);
        assert!(store.resolve(&url).is_none());
    }

    #[test]
    fn test_urls_are_unique() {
        let mut store = LocalPreviewStore::new();
        let first = store.acquire(&media());
        let second = store.acquire(&media());
        assert_ne!(first, second);
        assert_eq!(store.live_count(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let observer = LocalPreviewStore::new();
        let mut owner = observer.clone();
        let url = owner.acquire(&media());
        assert!(observer.is_live(&url));
        owner.release(&url);
        assert!(!observer.is_live(&url));
    }
}
