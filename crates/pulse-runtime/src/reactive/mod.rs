#![forbid(unsafe_code)]

//! Reactive state core.
//!
//! This module provides change-tracking primitives driven synchronously from
//! one execution context:
//!
//! - [`ValueCell`]: initial/current/previous value tracking with three change
//!   broadcasters.
//! - [`Broadcaster`]: an ordered listener list whose `fire` tolerates listeners
//!   registering, unregistering or firing again mid-broadcast.
//! - [`Listener`]: a shared callback with an introspection label.
//! - [`bulk`]: register/unregister/fire/reset over sequences of optional
//!   handles.
//!
//! # Architecture
//!
//! Both cells and broadcasters use `Rc<RefCell<..>>` for single-threaded
//! shared ownership, so a listener can hold a handle to the very object that
//! is notifying it. No `RefCell` borrow is held while user callbacks run.
//!
//! # Invariants
//!
//! 1. Listeners are invoked in registration order, at most once per fire.
//! 2. A listener list is never structurally mutated while it is being fired;
//!    requests made mid-fire are applied after the pass, adds before removes.
//! 3. A fire requested during a fire of the same broadcaster is ignored.
//! 4. `previous` holds the value immediately before the last accepted set.
//! 5. No two cell slots share a mutable instance.

pub mod broadcaster;
pub mod bulk;
pub mod cell;
pub mod listener;

pub use broadcaster::{
    Broadcaster, BroadcasterConfig, FireOutcome, ListenerReport, Signal, UnregisterPolicy,
};
pub use cell::{AnyCell, CellConfig, Change, SetOptions, SetOutcome, ValueCell};
pub use listener::{Listener, ListenerLabel};
