//! Session invalidation notifier.
//!
//! The request engine fires this whenever the server answers 401. Holders of
//! authentication state subscribe at startup instead of the engine reaching
//! into them.
//!
//! The notifier is armed while a session exists. The first invalidation
//! disarms it and runs every observer; later 401s from requests that were
//! already in flight are absorbed until [`SessionNotifier::session_established`]
//! re-arms it.
//!
//! Each established session gets a new [`SessionEpoch`]. The engine records
//! the epoch before reading the token, so a 401 that answers a request sent
//! under an earlier session cannot sign out the current one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use tracing::{debug, info};

/// Receiver of "session invalidated" signals.
pub trait SessionObserver: Send + Sync {
    /// Called synchronously, at most once per invalidation burst.
    fn on_session_invalidated(&self);
}

/// Adapts a closure into a [`SessionObserver`].
pub struct FnObserver<F>(pub F);

impl<F> SessionObserver for FnObserver<F>
where
    F: Fn() + Send + Sync,
{
    fn on_session_invalidated(&self) {
        (self.0)();
    }
}

impl<T: SessionObserver> SessionObserver for Weak<T> {
    fn on_session_invalidated(&self) {
        if let Some(observer) = self.upgrade() {
            observer.on_session_invalidated();
        }
    }
}

/// Generation of the signed-in session, bumped on every sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionEpoch(u64);

/// Low bit of the packed notifier state; the epoch lives in the other bits.
const ARMED: u64 = 1;

const fn pack(epoch: SessionEpoch, armed: bool) -> u64 {
    (epoch.0 << 1) | if armed { ARMED } else { 0 }
}

const fn unpack_epoch(state: u64) -> SessionEpoch {
    SessionEpoch(state >> 1)
}

/// Handle returned by [`SessionNotifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Process-wide "session invalidated" signal.
pub struct SessionNotifier {
    observers: RwLock<Vec<(SubscriptionId, Arc<dyn SessionObserver>)>>,
    next_id: AtomicU64,
    // Epoch and armed flag packed together so both change in one CAS.
    state: AtomicU64,
}

impl SessionNotifier {
    /// Creates an armed notifier with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            state: AtomicU64::new(pack(SessionEpoch(0), true)),
        }
    }

    /// Registers an observer.
    pub fn subscribe(&self, observer: Arc<dyn SessionObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, observer));
        id
    }

    /// Registers a closure as an observer.
    pub fn subscribe_fn<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(FnObserver(callback)))
    }

    /// Removes an observer. Returns false if the id was unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.write().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    /// Returns the epoch of the current session.
    #[must_use]
    pub fn current_epoch(&self) -> SessionEpoch {
        unpack_epoch(self.state.load(Ordering::Acquire))
    }

    /// Signals that the server rejected the current session.
    ///
    /// Returns true if this call delivered the signal, false if it was
    /// absorbed because the session had already been invalidated.
    pub fn notify_session_invalidated(&self) -> bool {
        self.notify_session_invalidated_for(self.current_epoch())
    }

    /// Signals that the server rejected the token of session `epoch`.
    ///
    /// The signal is delivered only if `epoch` is still the current session
    /// and it has not been invalidated yet.
    pub fn notify_session_invalidated_for(&self, epoch: SessionEpoch) -> bool {
        if let Err(current) = self.state.compare_exchange(
            pack(epoch, true),
            pack(epoch, false),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            if unpack_epoch(current) == epoch {
                debug!("session already invalidated, ignoring repeated 401");
            } else {
                debug!(
                    stale = epoch.0,
                    current = unpack_epoch(current).0,
                    "401 answers an earlier session, ignoring"
                );
            }
            return false;
        }

        // Observers run outside the lock so they may subscribe or unsubscribe.
        let observers: Vec<Arc<dyn SessionObserver>> = self
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        info!(observers = observers.len(), "session invalidated by server");
        for observer in observers {
            observer.on_session_invalidated();
        }
        true
    }

    /// Starts a new session epoch and re-arms the notifier after a
    /// successful sign-in.
    pub fn session_established(&self) {
        let mut state = self.state.load(Ordering::Acquire);
        loop {
            let next = pack(SessionEpoch(unpack_epoch(state).0.wrapping_add(1)), true);
            match self
                .state
                .compare_exchange_weak(state, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return,
                Err(actual) => state = actual,
            }
        }
    }

    /// Returns true if the next invalidation will be delivered.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.state.load(Ordering::Acquire) & ARMED == ARMED
    }

    /// Returns the number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for SessionNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionNotifier")
            .field("observers", &self.observer_count())
            .field("epoch", &self.current_epoch())
            .field("armed", &self.is_armed())
            .finish()
    }
}
