#![forbid(unsafe_code)]

//! Bulk register/unregister/fire/reset over sequences of optional handles.
//!
//! Hosts (inspector bindings, scene loaders) often hand over lists whose
//! entries may be unset. Every helper validates its whole input first and only
//! then dispatches, so a bad entry never leaves the list half-processed.
//!
//! | Input | Error |
//! |-------|-------|
//! | list absent | [`PulseError::InvalidArgument`] (`targets` / `cells`) |
//! | listener absent | [`PulseError::InvalidArgument`] (`listener`) |
//! | entry absent | [`PulseError::PreconditionViolation`] with its index |

use pulse_core::error::{PulseError, Result};

use super::broadcaster::{Broadcaster, FireOutcome};
use super::cell::AnyCell;
use super::listener::Listener;

/// Resolve every entry, failing on the first absent one.
fn require_all<'a, T: ?Sized>(
    items: Option<&[Option<&'a T>]>,
    argument: &'static str,
    operation: &'static str,
) -> Result<Vec<&'a T>> {
    let items = items.ok_or_else(|| PulseError::invalid_argument(argument))?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| (*item).ok_or_else(|| PulseError::absent_element(operation, index)))
        .collect()
}

/// Register `listener` on every broadcaster in `targets`.
pub fn register_all<A: 'static>(
    targets: Option<&[Option<&Broadcaster<A>>]>,
    listener: Option<&Listener<A>>,
) -> Result<()> {
    let listener = listener.ok_or_else(|| PulseError::invalid_argument("listener"))?;
    for target in require_all(targets, "targets", "register")? {
        target.register(listener.clone());
    }
    Ok(())
}

/// Unregister `listener` from every broadcaster in `targets`.
pub fn unregister_all<A: 'static>(
    targets: Option<&[Option<&Broadcaster<A>>]>,
    listener: Option<&Listener<A>>,
) -> Result<()> {
    let listener = listener.ok_or_else(|| PulseError::invalid_argument("listener"))?;
    for target in require_all(targets, "targets", "unregister")? {
        target.unregister(listener);
    }
    Ok(())
}

/// Fire every broadcaster in `targets` with `payload`, in list order.
#[track_caller]
pub fn fire_all_with<A: 'static>(
    targets: Option<&[Option<&Broadcaster<A>>]>,
    payload: &A,
) -> Result<Vec<FireOutcome>> {
    let targets = require_all(targets, "targets", "fire")?;
    let mut outcomes = Vec::with_capacity(targets.len());
    for target in targets {
        outcomes.push(target.fire_with(payload));
    }
    Ok(outcomes)
}

/// Fire every signal in `targets`, in list order.
#[track_caller]
pub fn fire_all(targets: Option<&[Option<&Broadcaster<()>>]>) -> Result<Vec<FireOutcome>> {
    fire_all_with(targets, &())
}

/// Reset every cell in `cells`.
pub fn reset_all(cells: Option<&[Option<&dyn AnyCell>]>, notify: bool) -> Result<()> {
    for cell in require_all(cells, "cells", "reset")? {
        cell.reset_value(notify);
    }
    Ok(())
}
