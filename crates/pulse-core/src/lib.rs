#![forbid(unsafe_code)]

//! Core: error taxonomy and value classification for pulse.
//!
//! # Role in pulse
//! `pulse-core` holds the leaf types the reactive runtime builds on. It has no
//! runtime behaviour of its own: no listeners, no notification, no logging.
//!
//! # Primary responsibilities
//! - **PulseError**: the small, programmer-error taxonomy surfaced by bulk
//!   helpers and function collaborators.
//! - **Value classification**: [`ValueKind`] and the [`CellValue`] capability
//!   trait, which decide whether a cell copies by replacement or by in-place
//!   overwrite.
//! - **AssetRef**: identity-compared handle to an immutable shared asset,
//!   stored by value in cells.
//!
//! # How it fits in the system
//! `pulse-runtime` consumes these types in `ValueCell<T>` (copy strategy) and
//! in the bulk register/fire helpers (error reporting).

pub mod asset;
pub mod error;
pub mod value_kind;

pub use asset::AssetRef;
pub use error::{PulseError, Result};
pub use value_kind::{CellValue, ValueKind, is_value_like, kind_of};
