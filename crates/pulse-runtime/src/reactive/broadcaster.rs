#![forbid(unsafe_code)]

//! Ordered, reentrancy-safe listener list.
//!
//! # Design
//!
//! [`Broadcaster<A>`] keeps its listeners in shared, reference-counted storage
//! (`Rc<RefCell<..>>`). [`fire_with`](Broadcaster::fire_with) snapshots the
//! list, releases the borrow, and invokes every listener once in registration
//! order. Listeners are therefore free to call back into the same broadcaster.
//!
//! ```text
//!            fire()                 all invoked
//!   Idle ────────────▶ Firing ─────────────────▶ Draining ──▶ Idle
//!    │                   │                          │
//!    │ register/         │ register/unregister      │ pending adds applied,
//!    │ unregister apply  │ are queued (FIFO)        │ then pending removes
//!    │ immediately       │ fire() is ignored        │
//! ```
//!
//! # Invariants
//!
//! 1. The live list is never structurally mutated while firing.
//! 2. A listener is invoked at most once per fire, and only if it was
//!    registered when the fire began.
//! 3. Requests queued during a fire are applied exactly once, in request
//!    order, adds before removes, as soon as the pass ends.
//! 4. Duplicate registration is a silent no-op.
//!
//! # Failure Modes
//!
//! - **Reentrant fire**: ignored, logged at debug level, reported as
//!   [`FireOutcome::Suppressed`]. Never an error.
//! - **Panicking listener**: the panic propagates to the caller of `fire`.
//!   The firing flag is still cleared and queued requests are drained during
//!   unwinding, so the broadcaster stays usable.

use std::cell::RefCell;
use std::fmt;
use std::panic::Location;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use super::listener::{Listener, ListenerLabel};

/// Environment variable read by [`BroadcasterConfig::from_env`].
pub const UNREGISTER_POLICY_ENV: &str = "PULSE_UNREGISTER_POLICY";

/// A zero-payload broadcaster.
pub type Signal = Broadcaster<()>;

/// How `unregister` behaves while the broadcaster is idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnregisterPolicy {
    /// Remove the listener if it is registered.
    #[default]
    RemoveIfPresent,
    /// Remove the listener only if it is *not* registered, which never
    /// removes anything. Kept for hosts that were built against that
    /// behaviour.
    LegacyInverted,
}

impl UnregisterPolicy {
    /// Parse a policy name. Accepts `remove`/`fixed`/`default` and
    /// `legacy`/`inverted`, case-insensitively.
    #[must_use]
    pub fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "remove" | "fixed" | "default" | "remove-if-present" => Some(Self::RemoveIfPresent),
            "legacy" | "inverted" | "legacy-inverted" => Some(Self::LegacyInverted),
            _ => None,
        }
    }
}

/// Configuration for a broadcaster.
#[derive(Debug, Clone, Default)]
pub struct BroadcasterConfig {
    /// Name used in trace events and listener reports.
    pub label: Option<String>,
    /// Idle `unregister` behaviour.
    pub unregister_policy: UnregisterPolicy,
}

impl BroadcasterConfig {
    /// Create a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the unregister policy from [`UNREGISTER_POLICY_ENV`].
    ///
    /// Unknown values fall back to the default policy with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_impl(|key| std::env::var(key).ok())
    }

    fn from_env_impl<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = get_env(UNREGISTER_POLICY_ENV) {
            match UnregisterPolicy::from_env_value(&raw) {
                Some(policy) => config.unregister_policy = policy,
                None => warn!(
                    target: "pulse::broadcast",
                    value = %raw,
                    "unrecognised {UNREGISTER_POLICY_ENV}; using default policy"
                ),
            }
        }
        config
    }

    /// Set the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the unregister policy.
    #[must_use]
    pub fn with_unregister_policy(mut self, policy: UnregisterPolicy) -> Self {
        self.unregister_policy = policy;
        self
    }
}

/// Result of a fire request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// A pass ran and invoked this many listeners.
    Delivered {
        /// Number of listeners invoked.
        listeners: usize,
    },
    /// The broadcaster was already firing; nothing was invoked.
    Suppressed,
}

impl FireOutcome {
    /// Whether this request was ignored as reentrant.
    #[must_use]
    pub fn is_suppressed(self) -> bool {
        matches!(self, Self::Suppressed)
    }
}

/// Registered listeners in invocation order, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerReport {
    /// Broadcaster label, if configured.
    pub label: Option<String>,
    /// Listener labels in invocation order.
    pub listeners: Vec<ListenerLabel>,
}

impl fmt::Display for ListenerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{label}: ")?;
        }
        let count = self.listeners.len();
        let noun = if count == 1 { "listener" } else { "listeners" };
        write!(f, "{count} registered {noun}, in invocation order")?;
        for listener in &self.listeners {
            write!(f, "\n  - {listener}")?;
        }
        Ok(())
    }
}

/// Shared interior for [`Broadcaster<A>`].
struct BroadcasterInner<A> {
    listeners: Vec<Listener<A>>,
    firing: bool,
    /// Registrations requested mid-fire, in request order.
    pending_adds: Vec<Listener<A>>,
    /// Unregistrations requested mid-fire, in request order.
    pending_removes: Vec<Listener<A>>,
    config: BroadcasterConfig,
}

impl<A> BroadcasterInner<A> {
    fn label(&self) -> &str {
        self.config.label.as_deref().unwrap_or("")
    }

    fn insert(&mut self, listener: Listener<A>) {
        if !self.listeners.contains(&listener) {
            self.listeners.push(listener);
        }
    }

    fn remove(&mut self, listener: &Listener<A>) {
        match self.config.unregister_policy {
            UnregisterPolicy::RemoveIfPresent => {
                if let Some(index) = self.listeners.iter().position(|l| l == listener) {
                    self.listeners.remove(index);
                }
            }
            UnregisterPolicy::LegacyInverted => {
                if !self.listeners.contains(listener) {
                    self.listeners.retain(|l| l != listener);
                }
            }
        }
    }

    fn finish_fire(&mut self) {
        self.firing = false;
        let adds = std::mem::take(&mut self.pending_adds);
        let removes = std::mem::take(&mut self.pending_removes);
        if !adds.is_empty() || !removes.is_empty() {
            debug!(
                target: "pulse::broadcast",
                label = self.label(),
                adds = adds.len(),
                removes = removes.len(),
                "applying requests queued during fire"
            );
        }
        for listener in adds {
            self.insert(listener);
        }
        for listener in &removes {
            self.remove(listener);
        }
    }
}

/// Ends a firing pass even if a listener panics.
struct FiringGuard<'a, A> {
    inner: &'a RefCell<BroadcasterInner<A>>,
}

impl<A> Drop for FiringGuard<'_, A> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.finish_fire();
        }
    }
}

/// An ordered listener list with a reentrancy-safe fire.
///
/// Cloning a `Broadcaster` creates a new handle to the **same** listener list.
pub struct Broadcaster<A = ()> {
    inner: Rc<RefCell<BroadcasterInner<A>>>,
}

// Manual Clone: shares the same Rc.
impl<A> Clone for Broadcaster<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Broadcaster<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Broadcaster")
            .field("label", &inner.config.label)
            .field("listener_count", &inner.listeners.len())
            .field("firing", &inner.firing)
            .field("pending_adds", &inner.pending_adds.len())
            .field("pending_removes", &inner.pending_removes.len())
            .finish()
    }
}

impl<A: 'static> Default for Broadcaster<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: 'static> Broadcaster<A> {
    /// Create an empty broadcaster with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BroadcasterConfig::default())
    }

    /// Create an empty broadcaster with the given configuration.
    #[must_use]
    pub fn with_config(config: BroadcasterConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BroadcasterInner {
                listeners: Vec::new(),
                firing: false,
                pending_adds: Vec::new(),
                pending_removes: Vec::new(),
                config,
            })),
        }
    }

    /// Register a listener.
    ///
    /// Already-registered listeners are ignored. While firing, the request is
    /// queued and takes effect from the next fire.
    pub fn register(&self, listener: Listener<A>) {
        let mut inner = self.inner.borrow_mut();
        if inner.firing {
            inner.pending_adds.push(listener);
        } else {
            inner.insert(listener);
        }
    }

    /// Unregister a listener.
    ///
    /// While firing, the request is queued; the listener still runs in the
    /// current pass if it was part of it.
    pub fn unregister(&self, listener: &Listener<A>) {
        let mut inner = self.inner.borrow_mut();
        if inner.firing {
            inner.pending_removes.push(listener.clone());
        } else {
            inner.remove(listener);
        }
    }

    /// Invoke every registered listener once, in registration order.
    ///
    /// Calling this from inside one of this broadcaster's own listeners is a
    /// no-op that returns [`FireOutcome::Suppressed`].
    #[track_caller]
    pub fn fire_with(&self, payload: &A) -> FireOutcome {
        let caller = Location::caller();
        let snapshot = {
            let mut inner = self.inner.borrow_mut();
            if inner.firing {
                debug!(
                    target: "pulse::broadcast",
                    label = inner.label(),
                    %caller,
                    "already firing; reentrant fire ignored"
                );
                return FireOutcome::Suppressed;
            }
            inner.firing = true;
            trace!(
                target: "pulse::broadcast",
                label = inner.label(),
                %caller,
                listeners = inner.listeners.len(),
                "fire"
            );
            inner.listeners.clone()
        };

        let guard = FiringGuard { inner: &self.inner };
        for listener in &snapshot {
            listener.invoke(payload);
        }
        drop(guard);

        FireOutcome::Delivered {
            listeners: snapshot.len(),
        }
    }

    /// Copy of the live listener list, in invocation order.
    #[must_use]
    pub fn snapshot_listeners(&self) -> Vec<Listener<A>> {
        self.inner.borrow().listeners.clone()
    }

    /// Labels of the live listeners, in invocation order.
    #[must_use]
    pub fn listener_labels(&self) -> Vec<ListenerLabel> {
        self.inner
            .borrow()
            .listeners
            .iter()
            .map(|l| l.label().clone())
            .collect()
    }

    /// Introspection report for a debugging panel.
    #[must_use]
    pub fn report(&self) -> ListenerReport {
        ListenerReport {
            label: self.inner.borrow().config.label.clone(),
            listeners: self.listener_labels(),
        }
    }

    /// Whether `listener` is in the live list.
    #[must_use]
    pub fn contains(&self, listener: &Listener<A>) -> bool {
        self.inner.borrow().listeners.contains(listener)
    }

    /// Number of live listeners (queued requests excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Whether no listeners are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().listeners.is_empty()
    }

    /// Whether a fire pass is in progress.
    #[must_use]
    pub fn is_firing(&self) -> bool {
        self.inner.borrow().firing
    }

    /// Number of queued register + unregister requests.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        let inner = self.inner.borrow();
        inner.pending_adds.len() + inner.pending_removes.len()
    }

    /// The configured label.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        self.inner.borrow().config.label.clone()
    }

    /// The configured unregister policy.
    #[must_use]
    pub fn unregister_policy(&self) -> UnregisterPolicy {
        self.inner.borrow().config.unregister_policy
    }

    /// Whether two handles share the same listener list.
    #[must_use]
    pub fn same_broadcaster(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Broadcaster<()> {
    /// Fire with no payload.
    #[track_caller]
    pub fn fire(&self) -> FireOutcome {
        self.fire_with(&())
    }
}
