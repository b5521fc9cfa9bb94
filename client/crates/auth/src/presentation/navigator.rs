//! Navigator
//!
//! History stack driven by route guard decisions. Redirects are followed
//! immediately, so the settled decision is always `Loading` or `Render`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::application::session_store::{SessionStore, Subscription};
use crate::domain::entity::session::Session;
use crate::presentation::route_guard::{Route, RouteDecision, decide};

/// Redirect chains longer than this are cut off
const MAX_REDIRECTS: usize = 4;

struct NavState {
    history: Vec<String>,
    decision: RouteDecision,
}

/// Client-side navigator
#[derive(Clone)]
pub struct Navigator {
    state: Arc<Mutex<NavState>>,
    store: SessionStore,
}

impl Navigator {
    /// Start at `initial` and evaluate it against the current session
    pub fn new(store: SessionStore, initial: impl Into<String>) -> Self {
        let navigator = Self {
            state: Arc::new(Mutex::new(NavState {
                history: vec![initial.into()],
                decision: RouteDecision::Loading,
            })),
            store,
        };
        navigator.reevaluate();
        navigator
    }

    /// Re-evaluate on every session change
    ///
    /// The listener holds a weak reference; it goes quiet once every
    /// navigator handle is dropped.
    pub fn bind(&self) -> Subscription {
        let state = Arc::downgrade(&self.state);
        self.store.subscribe(move |session| {
            if let Some(state) = state.upgrade() {
                let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
                Self::settle(&mut guard, session);
            }
        })
    }

    /// Push `path` and evaluate it
    pub fn navigate(&self, path: impl Into<String>) -> RouteDecision {
        let path = path.into();
        tracing::debug!(path = %path, "Navigate");

        let session = self.store.snapshot();
        let mut state = self.lock();
        state.history.push(path);
        Self::settle(&mut state, &session)
    }

    /// Pop the current entry; `None` at the first entry
    pub fn back(&self) -> Option<RouteDecision> {
        let session = self.store.snapshot();
        let mut state = self.lock();
        if state.history.len() <= 1 {
            return None;
        }
        state.history.pop();
        Some(Self::settle(&mut state, &session))
    }

    /// Evaluate the current entry against the current session
    pub fn reevaluate(&self) -> RouteDecision {
        let session = self.store.snapshot();
        let mut state = self.lock();
        Self::settle(&mut state, &session)
    }

    /// Path at the top of the history stack
    pub fn current_path(&self) -> String {
        self.lock().history.last().cloned().unwrap_or_default()
    }

    /// Last settled decision
    pub fn decision(&self) -> RouteDecision {
        self.lock().decision
    }

    /// Full history, oldest first
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    fn lock(&self) -> MutexGuard<'_, NavState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn settle(state: &mut NavState, session: &Session) -> RouteDecision {
        for _ in 0..MAX_REDIRECTS {
            let from = state.history.last().cloned().unwrap_or_default();
            match decide(Route::resolve(&from), session) {
                RouteDecision::Redirect { to, replace } => {
                    tracing::debug!(from = %from, to, replace, "Route redirected");
                    if replace {
                        state.history.pop();
                    }
                    state.history.push(to.to_string());
                }
                decision => {
                    state.decision = decision;
                    return decision;
                }
            }
        }

        tracing::warn!(history = ?state.history, "Redirect limit reached");
        state.decision
    }
}
