//! Session Store
//!
//! Single source of truth for the session. Readers take snapshots or
//! subscribe; only the auth controller (this crate) can transition.
//!
//! Listeners run synchronously, in subscription order, right after each
//! transition. The current value is also mirrored into a `watch` channel
//! for async readers.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tokio::sync::watch;

use crate::domain::entity::session::{Session, SessionStatus};
use crate::error::{AuthError, AuthResult};

type Listener = Arc<dyn Fn(&Session) + Send + Sync + 'static>;

struct StoreInner {
    state: watch::Sender<Session>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
}

/// Shared handle to the session store
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create a store in `Initializing`
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: watch::Sender::new(Session::initializing()),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
            }),
        }
    }

    /// Current session; never blocks on I/O
    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// Current status only
    pub fn status(&self) -> SessionStatus {
        self.inner.state.borrow().status
    }

    /// Register a listener invoked after every transition
    ///
    /// Dropping the returned handle leaves the listener registered; call
    /// [`Subscription::unsubscribe`] to remove it.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));

        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
            active: AtomicBool::new(true),
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Receiver that observes every replacement of the session
    pub fn watch(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Wait until the store has left `Initializing`
    pub async fn wait_resolved(&self) -> Session {
        let mut rx = self.watch();
        match rx.wait_for(|s| s.status.is_resolved()).await {
            Ok(session) => session.clone(),
            // Sender lives as long as `self`
            Err(_) => self.snapshot(),
        }
    }

    /// Replace the session
    ///
    /// Rejects values that break the status/user invariant and any attempt
    /// to re-enter `Initializing` once it has been left.
    pub(crate) fn transition(&self, next: Session) -> AuthResult<()> {
        self.update(move |_| next)
    }

    /// Read-modify-write against the session current at call time
    pub(crate) fn update<F>(&self, f: F) -> AuthResult<()>
    where
        F: FnOnce(&Session) -> Session,
    {
        self.update_if(|current| Some(f(current))).map(|_| ())
    }

    /// Like [`Self::update`], but `f` may decline by returning `None`
    ///
    /// `f` runs under the store's write lock, so no other transition can
    /// land between the read and the replace. `f` must not touch the store.
    /// Returns whether the session was replaced.
    pub(crate) fn update_if<F>(&self, f: F) -> AuthResult<bool>
    where
        F: FnOnce(&Session) -> Option<Session>,
    {
        let mut outcome = Ok(None);
        self.inner.state.send_if_modified(|current| {
            let from = current.status;
            let Some(next) = f(&*current) else {
                return false;
            };
            match Self::validate(from, &next) {
                Ok(()) => {
                    *current = next;
                    outcome = Ok(Some((from, current.clone())));
                    true
                }
                Err(err) => {
                    outcome = Err(err);
                    false
                }
            }
        });

        let (from, session) = match outcome {
            Ok(Some(applied)) => applied,
            Ok(None) => return Ok(false),
            Err(err) => {
                err.log();
                return Err(err);
            }
        };

        self.notify(&session);
        tracing::debug!(
            from = %from,
            to = %session.status,
            listeners = self.listener_count(),
            "Session transition applied"
        );
        Ok(true)
    }

    fn validate(current: SessionStatus, next: &Session) -> AuthResult<()> {
        if current.is_resolved() && next.status == SessionStatus::Initializing {
            return Err(AuthError::InvalidStateTransition(format!(
                "cannot return to initializing from {current}"
            )));
        }
        next.check_invariant()
    }

    fn notify(&self, session: &Session) {
        // Snapshot the list so listeners may subscribe/unsubscribe freely
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();

        for listener in listeners {
            listener(session);
        }
    }
}

/// Handle returned by [`SessionStore::subscribe`]
pub struct Subscription {
    id: u64,
    store: Weak<StoreInner>,
    active: AtomicBool,
}

impl Subscription {
    /// Remove the listener; calling again is a no-op
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(store) = self.store.upgrade() {
            store
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|(id, _)| *id != self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::profile::Profile;

    fn ada() -> Profile {
        Profile::new("Ada", "ada@example.com")
    }

    fn recorder(store: &SessionStore) -> (Arc<Mutex<Vec<SessionStatus>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = store.subscribe(move |s| sink.lock().unwrap().push(s.status));
        (seen, sub)
    }

    #[test]
    fn test_starts_initializing() {
        let store = SessionStore::new();
        assert_eq!(store.status(), SessionStatus::Initializing);
        assert_eq!(store.snapshot(), Session::initializing());
    }

    #[test]
    fn test_transition_replaces_snapshot() {
        let store = SessionStore::new();
        store.transition(Session::authenticated(ada())).unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.status, SessionStatus::Authenticated);
        assert_eq!(snapshot.user, Some(ada()));
    }

    #[test]
    fn test_transition_rejects_invariant_violation() {
        let store = SessionStore::new();
        store.transition(Session::unauthenticated()).unwrap();

        let broken = Session {
            status: SessionStatus::Unauthenticated,
            user: Some(ada()),
            error: None,
        };
        assert!(matches!(
            store.transition(broken),
            Err(AuthError::InvalidStateTransition(_))
        ));
        // Unchanged
        assert_eq!(store.snapshot(), Session::unauthenticated());

        let broken = Session {
            status: SessionStatus::Authenticated,
            user: None,
            error: None,
        };
        assert!(store.transition(broken).is_err());
    }

    #[test]
    fn test_initializing_is_never_reentered() {
        let store = SessionStore::new();
        store.transition(Session::unauthenticated()).unwrap();

        assert!(matches!(
            store.transition(Session::initializing()),
            Err(AuthError::InvalidStateTransition(_))
        ));
        assert_eq!(store.status(), SessionStatus::Unauthenticated);
    }

    #[test]
    fn test_listeners_run_in_subscription_order() {
        let store = SessionStore::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&order);
        let _a = store.subscribe(move |_| first.lock().unwrap().push("first"));
        let second = Arc::clone(&order);
        let _b = store.subscribe(move |_| second.lock().unwrap().push("second"));

        store.transition(Session::unauthenticated()).unwrap();
        store.transition(Session::authenticated(ada())).unwrap();

        assert_eq!(
            *order.lock().unwrap(),
            vec!["first", "second", "first", "second"]
        );
    }

    #[test]
    fn test_listener_sees_new_value_synchronously() {
        let store = SessionStore::new();
        let reader = store.clone();
        let (seen, _sub) = recorder(&store);
        let matched = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&matched);
        let _check = store.subscribe(move |s| {
            if reader.snapshot() != *s {
                flag.store(false, Ordering::SeqCst);
            }
        });

        store.transition(Session::authenticated(ada())).unwrap();
        store.transition(Session::unauthenticated()).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![SessionStatus::Authenticated, SessionStatus::Unauthenticated]
        );
        assert!(matched.load(Ordering::SeqCst));
    }

    #[test]
    fn test_rejected_transition_does_not_notify() {
        let store = SessionStore::new();
        let (seen, _sub) = recorder(&store);

        let broken = Session {
            status: SessionStatus::Authenticated,
            user: None,
            error: None,
        };
        let _ = store.transition(broken);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let store = SessionStore::new();
        let (seen, sub) = recorder(&store);
        let (_other_seen, _other) = recorder(&store);
        assert_eq!(store.listener_count(), 2);

        sub.unsubscribe();
        sub.unsubscribe();
        assert!(!sub.is_active());
        assert_eq!(store.listener_count(), 1);

        store.transition(Session::unauthenticated()).unwrap();
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unsubscribe_after_store_dropped() {
        let store = SessionStore::new();
        let (_seen, sub) = recorder(&store);
        drop(store);
        sub.unsubscribe();
        assert!(!sub.is_active());
    }

    #[test]
    fn test_update_reads_current_value() {
        let store = SessionStore::new();
        store.transition(Session::authenticated(ada())).unwrap();

        let err = AuthError::NetworkUnavailable("offline".into());
        store.update(|s| s.clone().with_error(err.clone())).unwrap();

        let snapshot = store.snapshot();
        assert!(snapshot.is_authenticated());
        assert_eq!(snapshot.error, Some(err));
    }

    #[test]
    fn test_update_if_declined_leaves_session_alone() {
        let store = SessionStore::new();
        let (seen, _sub) = recorder(&store);
        store.transition(Session::unauthenticated()).unwrap();

        let applied = store
            .update_if(|s| (!s.status.is_resolved()).then(|| Session::authenticated(ada())))
            .unwrap();

        assert!(!applied);
        assert_eq!(store.snapshot(), Session::unauthenticated());
        assert_eq!(*seen.lock().unwrap(), vec![SessionStatus::Unauthenticated]);
    }

    #[test]
    fn test_update_is_atomic_against_concurrent_transition() {
        use std::sync::mpsc;
        use std::thread;
        use std::time::Duration;

        let store = SessionStore::new();
        store.transition(Session::unauthenticated()).unwrap();

        let (started_tx, started_rx) = mpsc::channel();
        let writer = store.clone();
        let sign_in = thread::spawn(move || {
            started_rx.recv().unwrap();
            writer.transition(Session::authenticated(ada())).unwrap();
        });

        let err = AuthError::AuthenticationFailed("invalid email or password".into());
        store
            .update(|s| {
                started_tx.send(()).unwrap();
                // Give the writer time to reach the store
                thread::sleep(Duration::from_millis(50));
                s.clone().with_error(err.clone())
            })
            .unwrap();
        sign_in.join().unwrap();

        // The sign-in lands after the error write and is not undone by it
        let snapshot = store.snapshot();
        assert_eq!(snapshot.status, SessionStatus::Authenticated);
        assert_eq!(snapshot.user, Some(ada()));
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn test_wait_resolved() {
        let store = SessionStore::new();
        let writer = store.clone();

        let waiter = tokio::spawn(async move { store.wait_resolved().await });
        tokio::task::yield_now().await;
        writer.transition(Session::unauthenticated()).unwrap();

        let resolved = waiter.await.unwrap();
        assert_eq!(resolved.status, SessionStatus::Unauthenticated);
    }
}
