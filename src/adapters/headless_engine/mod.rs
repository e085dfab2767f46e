// Headless media engine - Tracks player state without rendering

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::domain::errors::EngineError;
use crate::domain::model::PreviewUrl;
use crate::ports::MediaEnginePort;

#[derive(Debug, Default)]
struct EngineState {
    mounted: bool,
    source: Option<PreviewUrl>,
    running: bool,
    commands: Vec<String>,
}

/// Media engine stand-in for hosts without a native player
///
/// Clones observe the same player. A freshly created engine is mounted;
/// `unmount` simulates the element disappearing from the page. An unmounted
/// engine refuses commands but keeps its last running state, so it never
/// changes behind the controller's back.
#[derive(Clone)]
pub struct HeadlessMediaEngine {
    state: Rc<RefCell<EngineState>>,
}

impl Default for HeadlessMediaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessMediaEngine {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(EngineState {
                mounted: true,
                ..EngineState::default()
            })),
        }
    }

    pub fn unmount(&self) {
        self.state.borrow_mut().mounted = false;
    }

    pub fn mount(&self) {
        self.state.borrow_mut().mounted = true;
    }

    /// Whether media is actually running
    pub fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    pub fn source(&self) -> Option<PreviewUrl> {
        self.state.borrow().source.clone()
    }

    /// Commands accepted so far, e.g. `["load blob:..", "play", "pause"]`
    pub fn commands(&self) -> Vec<String> {
        self.state.borrow().commands.clone()
    }

    fn ready(state: &EngineState) -> Result<(), EngineError> {
        if state.mounted && state.source.is_some() {
            Ok(())
        } else {
            Err(EngineError::NotMounted)
        }
    }
}

impl MediaEnginePort for HeadlessMediaEngine {
    fn load(&mut self, source: &PreviewUrl) -> Result<(), EngineError> {
        let mut state = self.state.borrow_mut();
        if !state.mounted {
            return Err(EngineError::NotMounted);
        }
        state.source = Some(source.clone());
        state.running = false;
        state.commands.push(format!("load {}", source));
        Ok(())
    }

    fn play(&mut self) -> Result<(), EngineError> {
        let mut state = self.state.borrow_mut();
        Self::ready(&state)?;
        state.running = true;
        state.commands.push("play".to_string());
        trace!("headless engine playing");
        Ok(())
    }

    fn pause(&mut self) -> Result<(), EngineError> {
        let mut state = self.state.borrow_mut();
        Self::ready(&state)?;
        state.running = false;
        state.commands.push("pause".to_string());
        trace!("headless engine paused");
        Ok(())
    }

    fn unload(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.source.take().is_some() {
            state.commands.push("unload".to_string());
        }
        state.running = false;
    }
}
