#![forbid(unsafe_code)]

//! Value cell with initial/current/previous tracking and change notification.
//!
//! # Design
//!
//! [`ValueCell<T>`] keeps three slots in shared, reference-counted storage
//! (`Rc<RefCell<..>>`) and owns three broadcasters:
//!
//! | Broadcaster | Payload | Order |
//! |-------------|---------|-------|
//! | [`on_changed`](ValueCell::on_changed) | none | first |
//! | [`on_changed_to`](ValueCell::on_changed_to) | new value | second |
//! | [`on_changed_from`](ValueCell::on_changed_from) | [`Change`] (new, previous) | last |
//!
//! Slot-to-slot copies follow the classification of `T`
//! ([`ValueKind`]): value-like types are replaced, reference-like types are
//! overwritten in place so handles previously returned by [`get`](ValueCell::get)
//! observe the new data. A slot never shares a mutable instance with another
//! slot or with the value passed to `set`.
//!
//! # Invariants
//!
//! 1. `previous` is the value immediately before the last accepted set.
//! 2. A set of an equal value without `force` changes nothing.
//! 3. After `reset`, `current == initial`.
//! 4. The storage borrow is released before any broadcaster fires, so
//!    listeners may read or set the cell that is notifying them.
//!
//! # Failure Modes
//!
//! - **Nested set from a listener**: runs to completion before the outer set
//!   continues. Its own fire of a broadcaster that is currently mid-fire is
//!   suppressed by that broadcaster's reentrancy guard.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use pulse_core::value_kind::{CellValue, ValueKind};
use tracing::trace;

use super::broadcaster::{Broadcaster, BroadcasterConfig, Signal};

/// Flags for [`ValueCell::set_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetOptions {
    /// Apply the set even if the value is unchanged.
    pub force: bool,
    /// Fire the change broadcasters.
    pub notify: bool,
}

impl Default for SetOptions {
    fn default() -> Self {
        Self {
            force: false,
            notify: true,
        }
    }
}

impl SetOptions {
    /// Force and notify: how editors push values back.
    #[must_use]
    pub fn forced() -> Self {
        Self {
            force: true,
            notify: true,
        }
    }

    /// Update state without notifying observers.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            force: false,
            notify: false,
        }
    }

    /// Set the force flag.
    #[must_use]
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Set the notify flag.
    #[must_use]
    pub fn with_notify(mut self, notify: bool) -> Self {
        self.notify = notify;
        self
    }
}

/// What a set did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The value was equal and not forced; nothing happened.
    Unchanged,
    /// State changed silently.
    Updated,
    /// State changed and the broadcasters fired.
    Notified,
}

/// Payload of [`ValueCell::on_changed_from`].
#[derive(Debug, Clone, PartialEq)]
pub struct Change<T> {
    /// The value after the set.
    pub current: T,
    /// The value before the set.
    pub previous: T,
}

/// Configuration for a value cell.
#[derive(Debug, Clone, Default)]
pub struct CellConfig {
    /// Name used in trace events; also labels the cell's broadcasters.
    pub label: Option<String>,
    /// After [`ValueCell::activate`], announce the initial value with a
    /// forced, notifying set.
    pub announce_on_activate: bool,
    /// Configuration shared by the three change broadcasters.
    pub broadcaster: BroadcasterConfig,
}

impl CellConfig {
    /// Create a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set whether activation announces the initial value.
    #[must_use]
    pub fn with_announce_on_activate(mut self, announce: bool) -> Self {
        self.announce_on_activate = announce;
        self
    }

    /// Set the broadcaster configuration.
    #[must_use]
    pub fn with_broadcaster(mut self, config: BroadcasterConfig) -> Self {
        self.broadcaster = config;
        self
    }

    fn broadcaster_for(&self, suffix: &str) -> BroadcasterConfig {
        let mut config = self.broadcaster.clone();
        if config.label.is_none() {
            config.label = self.label.as_ref().map(|l| format!("{l}.{suffix}"));
        }
        config
    }
}

struct CellState<T> {
    initial: T,
    current: T,
    previous: T,
}

/// Copy `from` into `to` following the copy strategy for `kind`.
fn copy_slot<T: CellValue>(kind: ValueKind, from: &T, to: &mut T) {
    match kind {
        ValueKind::Value => *to = from.duplicate(),
        ValueKind::Reference => to.assign_from(from),
    }
}

/// Store an owned value into a slot.
fn store_slot<T: CellValue>(kind: ValueKind, value: T, to: &mut T) {
    match kind {
        ValueKind::Value => *to = value,
        ValueKind::Reference => to.assign_from(&value),
    }
}

/// A reactive value with initial, current and previous slots.
///
/// Cloning a `ValueCell` creates a new handle to the **same** state and
/// broadcasters.
pub struct ValueCell<T: CellValue> {
    state: Rc<RefCell<CellState<T>>>,
    kind: ValueKind,
    config: Rc<CellConfig>,
    changed: Signal,
    changed_to: Broadcaster<T>,
    changed_from: Broadcaster<Change<T>>,
}

// Manual Clone: shares the same Rc.
impl<T: CellValue> Clone for ValueCell<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            kind: self.kind,
            config: Rc::clone(&self.config),
            changed: self.changed.clone(),
            changed_to: self.changed_to.clone(),
            changed_from: self.changed_from.clone(),
        }
    }
}

impl<T: CellValue + fmt::Debug> fmt::Debug for ValueCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ValueCell")
            .field("label", &self.config.label)
            .field("kind", &self.kind)
            .field("initial", &state.initial)
            .field("current", &state.current)
            .field("previous", &state.previous)
            .finish()
    }
}

/// Equality of current values.
impl<T: CellValue> PartialEq for ValueCell<T> {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.state, &other.state) {
            return true;
        }
        self.state.borrow().current == other.state.borrow().current
    }
}

impl<T: CellValue + Default> Default for ValueCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: CellValue> ValueCell<T> {
    /// Create a cell whose current and previous values start at `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_config(initial, CellConfig::default())
    }

    /// Create a cell with the given configuration.
    ///
    /// Every slot receives its own copy of `initial`; later mutation through
    /// the caller's value is not observed.
    #[must_use]
    pub fn with_config(initial: T, config: CellConfig) -> Self {
        let state = CellState {
            initial: initial.duplicate(),
            current: initial.duplicate(),
            previous: initial.duplicate(),
        };
        Self {
            state: Rc::new(RefCell::new(state)),
            kind: T::KIND,
            changed: Broadcaster::with_config(config.broadcaster_for("changed")),
            changed_to: Broadcaster::with_config(config.broadcaster_for("changed_to")),
            changed_from: Broadcaster::with_config(config.broadcaster_for("changed_from")),
            config: Rc::new(config),
        }
    }

    /// Re-arm the cell: copy `initial` into `current` and `previous`.
    ///
    /// Call once per activation of the owning context. If the cell was
    /// configured with `announce_on_activate`, observers are then notified
    /// with a forced set of the initial value.
    pub fn activate(&self) {
        {
            let mut state = self.state.borrow_mut();
            let CellState {
                initial,
                current,
                previous,
            } = &mut *state;
            copy_slot(self.kind, initial, current);
            copy_slot(self.kind, initial, previous);
        }
        if self.config.announce_on_activate {
            self.set_with(self.initial(), SetOptions::forced());
        }
    }

    /// Clone of the current value.
    ///
    /// For reference-like handle types this is a handle to the live slot, and
    /// later sets are visible through it.
    #[must_use]
    pub fn get(&self) -> T {
        self.state.borrow().current.clone()
    }

    /// Borrow the current value.
    ///
    /// # Panics
    ///
    /// Panics if `f` calls `set`, `set_with`, `reset`, `activate` or
    /// `set_initial` on this cell (or a clone of it).
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.borrow().current)
    }

    /// Clone of the initial value.
    #[must_use]
    pub fn initial(&self) -> T {
        self.state.borrow().initial.clone()
    }

    /// Clone of the previous value.
    #[must_use]
    pub fn previous(&self) -> T {
        self.state.borrow().previous.clone()
    }

    /// Copy strategy used for this cell.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The configured label.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.config.label.as_deref()
    }

    /// Set with default options: skip equal values, notify on change.
    pub fn set(&self, value: T) -> SetOutcome {
        self.set_with(value, SetOptions::default())
    }

    /// Set the current value.
    ///
    /// An equal value without `force` changes nothing and fires nothing.
    /// Otherwise `current` moves to `previous`, `value` becomes `current`, and,
    /// if `notify` is set, the changed, changed-to and changed-from
    /// broadcasters fire in that order.
    pub fn set_with(&self, value: T, options: SetOptions) -> SetOutcome {
        let change = {
            let mut state = self.state.borrow_mut();
            let is_same = state.current == value;
            if is_same && !options.force {
                return SetOutcome::Unchanged;
            }

            // `value` may be a handle to one of our own slots (e.g. from
            // `previous()`); detach it before any slot is overwritten.
            let incoming = match self.kind {
                ValueKind::Value => value,
                ValueKind::Reference => value.duplicate(),
            };
            let CellState {
                current, previous, ..
            } = &mut *state;
            copy_slot(self.kind, current, previous);
            store_slot(self.kind, incoming, current);

            trace!(
                target: "pulse::cell",
                label = self.label().unwrap_or(""),
                forced = is_same,
                notify = options.notify,
                "set"
            );
            if !options.notify {
                return SetOutcome::Updated;
            }
            Change {
                current: current.clone(),
                previous: previous.clone(),
            }
        };

        self.notify(&change);
        SetOutcome::Notified
    }

    /// Restore the initial value.
    ///
    /// With `notify`, this is a forced, notifying set of `initial`. Without
    /// it, `current` moves to `previous` and `initial` is copied into
    /// `current` with no broadcast.
    pub fn reset(&self, notify: bool) -> SetOutcome {
        if notify {
            return self.set_with(self.initial(), SetOptions::forced());
        }
        let mut state = self.state.borrow_mut();
        let CellState {
            initial,
            current,
            previous,
        } = &mut *state;
        copy_slot(self.kind, current, previous);
        copy_slot(self.kind, initial, current);
        SetOutcome::Updated
    }

    /// Replace the initial value. Current and previous are left alone until
    /// the next `activate` or `reset`.
    pub fn set_initial(&self, value: T) {
        let mut state = self.state.borrow_mut();
        store_slot(self.kind, value, &mut state.initial);
    }

    /// Fires on every notified change, with no payload.
    #[must_use]
    pub fn on_changed(&self) -> &Signal {
        &self.changed
    }

    /// Fires on every notified change with the new value.
    #[must_use]
    pub fn on_changed_to(&self) -> &Broadcaster<T> {
        &self.changed_to
    }

    /// Fires on every notified change with the new and previous values.
    #[must_use]
    pub fn on_changed_from(&self) -> &Broadcaster<Change<T>> {
        &self.changed_from
    }

    fn notify(&self, change: &Change<T>) {
        self.changed.fire();
        self.changed_to.fire_with(&change.current);
        self.changed_from.fire_with(change);
    }
}

/// Type-erased view of a cell, for hosts driving heterogeneous collections.
pub trait AnyCell {
    /// See [`ValueCell::reset`].
    fn reset_value(&self, notify: bool);
    /// See [`ValueCell::activate`].
    fn rearm(&self);
    /// Copy strategy of the stored type.
    fn value_kind(&self) -> ValueKind;
    /// Rust type name of the stored type.
    fn value_type_name(&self) -> &'static str;
    /// Configured label, if any.
    fn cell_label(&self) -> Option<&str>;
    /// The current value, boxed.
    fn boxed_value(&self) -> Box<dyn Any>;
}

impl<T: CellValue> AnyCell for ValueCell<T> {
    fn reset_value(&self, notify: bool) {
        self.reset(notify);
    }

    fn rearm(&self) {
        self.activate();
    }

    fn value_kind(&self) -> ValueKind {
        self.kind
    }

    fn value_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn cell_label(&self) -> Option<&str> {
        self.label()
    }

    fn boxed_value(&self) -> Box<dyn Any> {
        Box::new(self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::listener::Listener;
    use std::cell::Cell;

    #[derive(Debug, Clone, PartialEq)]
    struct Loadout {
        weapon: String,
        ammo: u32,
    }

    fn counter<A: 'static>(broadcaster: &Broadcaster<A>) -> Rc<Cell<u32>> {
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);
        broadcaster.register(Listener::new(move |_: &A| count_clone.set(count_clone.get() + 1)));
        count
    }

    #[test]
    fn new_cell_starts_at_initial() {
        let cell = ValueCell::new(5);
        assert_eq!(cell.get(), 5);
        assert_eq!(cell.previous(), 5);
        assert_eq!(cell.initial(), 5);
        assert_eq!(cell.kind(), ValueKind::Value);
    }

    #[test]
    fn activate_resyncs_to_initial() {
        let cell = ValueCell::new(1);
        cell.set(2);
        cell.set(3);
        cell.activate();
        assert_eq!(cell.get(), 1);
        assert_eq!(cell.previous(), 1);
    }

    #[test]
    fn activate_is_silent_by_default() {
        let cell = ValueCell::new(1);
        let changed = counter(cell.on_changed());
        cell.activate();
        assert_eq!(changed.get(), 0);
    }

    #[test]
    fn activate_can_announce() {
        let cell = ValueCell::with_config(
            7,
            CellConfig::new().with_announce_on_activate(true),
        );
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        cell.on_changed_from()
            .register(Listener::new(move |c: &Change<i32>| {
                seen_clone.borrow_mut().push((c.current, c.previous));
            }));
        cell.set(9);
        cell.activate();
        assert_eq!(*seen.borrow(), vec![(9, 7), (7, 7)]);
    }

    #[test]
    fn set_tracks_single_step_history() {
        let cell = ValueCell::new(0);
        cell.set(1);
        cell.set(2);
        assert_eq!(cell.previous(), 1);
        assert_eq!(cell.get(), 2);
        cell.set(3);
        assert_eq!(cell.previous(), 2);
    }

    #[test]
    fn equal_value_is_noop() {
        let cell = ValueCell::new(4);
        cell.set(6);
        let changed = counter(cell.on_changed());
        assert_eq!(cell.set_with(6, SetOptions::silent()), SetOutcome::Unchanged);
        assert_eq!(cell.set(6), SetOutcome::Unchanged);
        assert_eq!(cell.previous(), 4);
        assert_eq!(changed.get(), 0);
    }

    #[test]
    fn forced_set_of_equal_value_notifies() {
        let cell = ValueCell::new(1);
        cell.set(2);
        let changed = counter(cell.on_changed());
        let changed_to = counter(cell.on_changed_to());
        let changed_from = counter(cell.on_changed_from());

        assert_eq!(cell.set_with(2, SetOptions::forced()), SetOutcome::Notified);
        assert_eq!(cell.previous(), 2);
        assert_eq!(cell.get(), 2);
        assert_eq!(
            (changed.get(), changed_to.get(), changed_from.get()),
            (1, 1, 1)
        );
    }

    #[test]
    fn forced_silent_set_updates_previous_only() {
        let cell = ValueCell::new(1);
        cell.set(2);
        let changed = counter(cell.on_changed());
        let outcome = cell.set_with(2, SetOptions::silent().with_force(true));
        assert_eq!(outcome, SetOutcome::Updated);
        assert_eq!(cell.previous(), 2);
        assert_eq!(changed.get(), 0);
    }

    #[test]
    fn silent_set_hides_from_observers() {
        let cell = ValueCell::new("idle".to_string());
        let changed = counter(cell.on_changed());
        let changed_to = counter(cell.on_changed_to());
        let changed_from = counter(cell.on_changed_from());

        assert_eq!(
            cell.set_with("running".to_string(), SetOptions::silent()),
            SetOutcome::Updated
        );
        assert_eq!(cell.get(), "running");
        assert_eq!(cell.previous(), "idle");
        assert_eq!(changed.get() + changed_to.get() + changed_from.get(), 0);
    }

    #[test]
    fn broadcasters_fire_in_fixed_order() {
        let cell = ValueCell::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));

        let log_from = Rc::clone(&log);
        cell.on_changed_from()
            .register(Listener::new(move |c: &Change<i32>| {
                log_from
                    .borrow_mut()
                    .push(format!("from {} -> {}", c.previous, c.current));
            }));
        let log_to = Rc::clone(&log);
        cell.on_changed_to()
            .register(Listener::new(move |v: &i32| log_to.borrow_mut().push(format!("to {v}"))));
        let log_changed = Rc::clone(&log);
        cell.on_changed()
            .register(Listener::new(move |_| log_changed.borrow_mut().push("changed".to_string())));

        cell.set(8);
        assert_eq!(*log.borrow(), vec!["changed", "to 8", "from 0 -> 8"]);
    }

    #[test]
    fn reset_without_notify_is_silent() {
        let cell = ValueCell::new(10);
        cell.set(20);
        let changed = counter(cell.on_changed());
        assert_eq!(cell.reset(false), SetOutcome::Updated);
        assert_eq!(cell.get(), 10);
        assert_eq!(cell.previous(), 20);
        assert_eq!(changed.get(), 0);
    }

    #[test]
    fn reset_with_notify_forces() {
        let cell = ValueCell::new(10);
        let changed = counter(cell.on_changed());
        assert_eq!(cell.reset(true), SetOutcome::Notified);
        assert_eq!(changed.get(), 1);
        assert_eq!(cell.previous(), 10);
    }

    #[test]
    fn set_initial_leaves_live_slots() {
        let cell = ValueCell::new(1);
        cell.set(2);
        cell.set_initial(5);
        assert_eq!(cell.get(), 2);
        cell.reset(false);
        assert_eq!(cell.get(), 5);
    }

    #[test]
    fn shared_handle_is_deep_copied() {
        let initial = Rc::new(RefCell::new(Loadout {
            weapon: "pistol".into(),
            ammo: 12,
        }));
        let cell = ValueCell::new(Rc::clone(&initial));
        assert_eq!(cell.kind(), ValueKind::Reference);

        let incoming = Rc::new(RefCell::new(Loadout {
            weapon: "rifle".into(),
            ammo: 30,
        }));
        cell.set(Rc::clone(&incoming));
        incoming.borrow_mut().ammo = 0;

        assert_eq!(cell.get().borrow().ammo, 30);
        assert_eq!(cell.previous().borrow().weapon, "pistol");
        initial.borrow_mut().ammo = 1;
        assert_eq!(cell.previous().borrow().ammo, 12);
    }

    #[test]
    fn handle_from_get_observes_later_sets() {
        let cell = ValueCell::new(Rc::new(RefCell::new(Loadout {
            weapon: "knife".into(),
            ammo: 0,
        })));
        let live = cell.get();
        cell.set(Rc::new(RefCell::new(Loadout {
            weapon: "bow".into(),
            ammo: 6,
        })));
        assert_eq!(live.borrow().weapon, "bow");
        assert!(!Rc::ptr_eq(&cell.get(), &cell.previous()));
    }

    #[test]
    fn set_to_previous_handle_swaps_back() {
        let cell = ValueCell::new(Rc::new(RefCell::new(1)));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        cell.on_changed_from()
            .register(Listener::new(move |c: &Change<Rc<RefCell<i32>>>| {
                seen_clone
                    .borrow_mut()
                    .push((*c.current.borrow(), *c.previous.borrow()));
            }));

        cell.set(Rc::new(RefCell::new(2)));
        assert_eq!(cell.set(cell.previous()), SetOutcome::Notified);

        assert_eq!(*cell.get().borrow(), 1);
        assert_eq!(*cell.previous().borrow(), 2);
        assert_eq!(*seen.borrow(), vec![(2, 1), (1, 2)]);
    }

    #[test]
    fn set_to_previous_handle_list_swaps_back() {
        let cell = ValueCell::new(vec![Rc::new(RefCell::new(1))]);
        cell.set(vec![Rc::new(RefCell::new(2))]);
        cell.set(cell.previous());

        assert_eq!(*cell.get()[0].borrow(), 1);
        assert_eq!(*cell.previous()[0].borrow(), 2);
        assert!(!Rc::ptr_eq(&cell.get()[0], &cell.previous()[0]));
    }

    #[test]
    fn set_to_initial_handle_keeps_initial() {
        let cell = ValueCell::new(Rc::new(RefCell::new(10)));
        cell.set(Rc::new(RefCell::new(20)));
        cell.set(cell.initial());
        cell.set(Rc::new(RefCell::new(30)));

        assert_eq!(*cell.initial().borrow(), 10);
        assert_eq!(*cell.previous().borrow(), 10);
        assert_eq!(*cell.get().borrow(), 30);
    }

    #[test]
    fn asset_cell_copies_the_reference() {
        use pulse_core::AssetRef;

        #[derive(Debug)]
        struct Texture {
            width: u32,
        }

        let grass = AssetRef::new(Texture { width: 16 });
        let stone = AssetRef::new(Texture { width: 32 });
        let cell = ValueCell::new(grass.clone());
        assert_eq!(cell.kind(), ValueKind::Value);

        assert_eq!(cell.set(stone.clone()), SetOutcome::Notified);
        assert!(AssetRef::ptr_eq(&cell.get(), &stone));
        assert!(AssetRef::ptr_eq(&cell.previous(), &grass));
        assert_eq!(cell.set(stone.clone()), SetOutcome::Unchanged);
        assert_eq!(cell.get().width, 32);
    }

    #[test]
    #[should_panic(expected = "already")]
    fn set_inside_with_panics() {
        let cell = ValueCell::new(1);
        cell.with(|_| {
            cell.set(2);
        });
    }

    #[test]
    fn vec_cell_reuses_storage() {
        let cell = ValueCell::new(vec![1, 2, 3]);
        cell.set(vec![4, 5]);
        assert_eq!(cell.get(), vec![4, 5]);
        assert_eq!(cell.previous(), vec![1, 2, 3]);
        assert_eq!(cell.kind(), ValueKind::Reference);
    }

    #[test]
    fn nested_set_from_listener_completes_first() {
        let cell = ValueCell::new(0);
        let handle = cell.clone();
        cell.on_changed_to().register(Listener::new(move |v: &i32| {
            if *v < 3 {
                handle.set(*v + 1);
            }
        }));

        cell.set(1);
        // The nested set's own changed_to fire is suppressed, so the chain
        // stops after one hop.
        assert_eq!(cell.get(), 2);
        assert_eq!(cell.previous(), 1);
    }

    #[test]
    fn nested_set_from_changed_listener_reaches_changed_to() {
        let cell = ValueCell::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let handle = cell.clone();
        cell.on_changed().register(Listener::new(move |_| {
            if handle.get() == 1 {
                handle.set(100);
            }
        }));
        let seen_clone = Rc::clone(&seen);
        cell.on_changed_to()
            .register(Listener::new(move |v: &i32| seen_clone.borrow_mut().push(*v)));

        cell.set(1);
        // Nested set notifies changed_to with 100 first; the outer set then
        // delivers its captured value.
        assert_eq!(*seen.borrow(), vec![100, 1]);
        assert_eq!(cell.get(), 100);
    }

    #[test]
    fn cell_equality_compares_current_values() {
        let a = ValueCell::new(3);
        let b = ValueCell::new(9);
        assert_ne!(a, b);
        b.set(3);
        assert_eq!(a, b);
        assert_eq!(a, a.clone());

        let absent: Option<ValueCell<i32>> = None;
        assert_ne!(Some(a), absent);
    }

    #[test]
    fn labels_propagate_to_broadcasters() {
        let cell = ValueCell::with_config(0, CellConfig::new().with_label("health"));
        assert_eq!(cell.label(), Some("health"));
        assert_eq!(cell.on_changed().label().as_deref(), Some("health.changed"));
        assert_eq!(
            cell.on_changed_from().label().as_deref(),
            Some("health.changed_from")
        );
    }

    #[test]
    fn any_cell_resets_through_erasure() {
        let cell = ValueCell::new(1u8);
        cell.set(2);
        let erased: &dyn AnyCell = &cell;
        erased.reset_value(false);
        assert_eq!(cell.get(), 1);
        assert_eq!(erased.value_type_name(), "u8");
        assert_eq!(erased.boxed_value().downcast_ref::<u8>(), Some(&1));
    }

    #[test]
    fn debug_format() {
        let cell = ValueCell::new(42);
        let dbg = format!("{cell:?}");
        assert!(dbg.contains("ValueCell"));
        assert!(dbg.contains("42"));
    }
}
