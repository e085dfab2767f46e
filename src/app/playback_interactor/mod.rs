// Playback interactor - Keeps the play/pause toggle in step with the media engine

use tracing::{debug, info, warn};

use crate::domain::model::*;
use crate::ports::{MediaEnginePort, PreviewPort};

/// Flag value a new handle starts with; the preview autoplays
const AUTOPLAY: bool = true;

/// Preview bound to the engine, owned by the synchronizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackHandle {
    url: PreviewUrl,
    is_playing: bool,
}

impl PlaybackHandle {
    pub fn url(&self) -> &PreviewUrl {
        &self.url
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }
}

/// Owns the engine reference and at most one preview handle.
///
/// The preview URL is released on `detach`, on re-`attach` and when the
/// synchronizer is dropped.
pub struct PlaybackInteractor {
    engine: Box<dyn MediaEnginePort>,
    previews: Box<dyn PreviewPort>,
    handle: Option<PlaybackHandle>,
}

impl PlaybackInteractor {
    /// Create new playback interactor with injected ports
    pub fn new(engine: Box<dyn MediaEnginePort>, previews: Box<dyn PreviewPort>) -> Self {
        Self {
            engine,
            previews,
            handle: None,
        }
    }

    pub fn handle(&self) -> Option<&PlaybackHandle> {
        self.handle.as_ref()
    }

    /// `false` when no handle is bound
    pub fn is_playing(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| h.is_playing)
    }

    /// Bind a fresh preview of `media` and start autoplay.
    ///
    /// Any previous handle is released first. If the engine refuses to load
    /// or play, the handle is still created with the flag matching what the
    /// engine actually does.
    pub fn attach(&mut self, media: &SelectedMedia) -> &PlaybackHandle {
        self.detach();

        let url = self.previews.acquire(media);
        let is_playing = match self.engine.load(&url).and_then(|_| self.engine.play()) {
            Ok(()) => AUTOPLAY,
            Err(e) => {
                warn!("Autoplay of {} failed: {}", url, e);
                false
            }
        };
        info!("Preview {} attached for {}", url, media.display_name());

        self.handle.insert(PlaybackHandle { url, is_playing })
    }

    /// Release the current handle, if any
    pub fn detach(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.engine.unload();
            self.previews.release(&handle.url);
            debug!("Preview {} detached", handle.url);
        }
    }

    /// Flip between playing and paused.
    ///
    /// The engine command and the flag change together; if the command fails
    /// nothing changes. Returns the flag after the call.
    pub fn toggle(&mut self) -> bool {
        let Some(handle) = self.handle.as_mut() else {
            debug!("Toggle ignored: no preview attached");
            return false;
        };

        let result = if handle.is_playing {
            self.engine.pause()
        } else {
            self.engine.play()
        };

        match result {
            Ok(()) => handle.is_playing = !handle.is_playing,
            Err(e) => debug!("Toggle ignored: {}", e),
        }
        handle.is_playing
    }
}

impl Drop for PlaybackInteractor {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{HeadlessMediaEngine, LocalPreviewStore};
    use crate::domain::rules::ValidationGate;

    fn media(name: &str) -> SelectedMedia {
        ValidationGate::validate(Some(FileHandle::new(name, "video/mp4", vec![3u8; 4]))).unwrap()
    }

    fn setup() -> (PlaybackInteractor, HeadlessMediaEngine, LocalPreviewStore) {
        let engine = HeadlessMediaEngine::new();
        let store = LocalPreviewStore::new();
        let playback = PlaybackInteractor::new(Box::new(engine.clone()), Box::new(store.clone()));
        (playback, engine, store)
    }

    #[test]
    fn test_no_handle_means_stopped() {
        let (mut playback, engine, _) = setup();
        assert!(!playback.is_playing());
        assert!(!playback.toggle());
        assert!(engine.commands().is_empty());
    }

    #[test]
    fn test_attach_autoplays() {
        let (mut playback, engine, store) = setup();
        let url = playback.attach(&media("clip.mp4")).url().clone();
        assert!(playback.is_playing());
        assert!(engine.is_running());
        assert_eq!(engine.source(), Some(url.clone()));
        assert!(store.is_live(&url));
    }

    #[test]
    fn test_toggle_pauses_then_resumes() {
        let (mut playback, engine, _) = setup();
        playback.attach(&media("clip.mp4"));

        assert!(!playback.toggle());
        assert!(!engine.is_running());
        assert!(playback.toggle());
        assert!(engine.is_running());
    }

    #[test]
    fn test_toggle_on_unmounted_engine_keeps_flag() {
        let (mut playback, engine, _) = setup();
        playback.attach(&media("clip.mp4"));
        playback.toggle();
        assert!(!playback.is_playing());

        engine.unmount();
        assert!(!playback.toggle());
        assert_eq!(playback.is_playing(), engine.is_running());
    }

    #[test]
    fn test_unmount_while_playing_keeps_flag_in_step() {
        let (mut playback, engine, _) = setup();
        playback.attach(&media("clip.mp4"));

        engine.unmount();
        assert_eq!(playback.is_playing(), engine.is_running());
        assert!(playback.toggle());
        assert_eq!(playback.is_playing(), engine.is_running());

        engine.mount();
        assert!(!playback.toggle());
        assert!(!engine.is_running());
        assert!(playback.toggle());
        assert!(engine.is_running());
    }

    #[test]
    fn test_reattach_releases_previous_preview() {
        let (mut playback, _, store) = setup();
        let first = playback.attach(&media("a.mp4")).url().clone();
        playback.toggle();
        let second = playback.attach(&media("b.mp4")).url().clone();

        assert!(!store.is_live(&first));
        assert!(store.is_live(&second));
        assert_eq!(store.live_count(), 1);
        assert!(playback.is_playing());
    }

    #[test]
    fn test_detach_and_drop_release_preview() {
        let (mut playback, engine, store) = setup();
        playback.attach(&media("clip.mp4"));
        playback.detach();
        assert_eq!(store.live_count(), 0);
        assert!(engine.source().is_none());
        assert!(!playback.is_playing());

        playback.attach(&media("clip.mp4"));
        assert_eq!(store.live_count(), 1);
        drop(playback);
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn test_failed_autoplay_leaves_flag_false() {
        let (mut playback, engine, _) = setup();
        engine.unmount();
        playback.attach(&media("clip.mp4"));
        assert!(playback.handle().is_some());
        assert!(!playback.is_playing());
    }
}
