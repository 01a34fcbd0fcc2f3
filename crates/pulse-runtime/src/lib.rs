#![forbid(unsafe_code)]

//! Reactive runtime for pulse: value cells, broadcasters, and function
//! collaborators driven from a single host update loop.
//!
//! This crate provides:
//! - [`ValueCell`] for initial/current/previous tracking with change
//!   notification
//! - [`Broadcaster`] (and the zero-payload [`Signal`]) for ordered,
//!   reentrancy-safe listener lists
//! - Bulk helpers over sequences of optional handles
//! - [`Function`] with a literal override hook for editor tooling

/// Override-capable function collaborators.
pub mod function;
/// Cells, broadcasters, listeners and bulk helpers.
pub mod reactive;

pub use function::Function;
pub use pulse_core::{AssetRef, CellValue, PulseError, Result, ValueKind};
pub use reactive::{
    AnyCell, Broadcaster, BroadcasterConfig, CellConfig, Change, FireOutcome, Listener,
    ListenerLabel, ListenerReport, SetOptions, SetOutcome, Signal, UnregisterPolicy, ValueCell,
};
