#![forbid(unsafe_code)]

//! Shared handles to immutable assets.
//!
//! Sprites, textures, prefabs and similar engine objects are owned by an asset
//! store and only *referred to* by gameplay state. Copying such a reference
//! between cell slots must copy the reference, never the asset, so
//! [`AssetRef<U>`] is value-like: duplicating it shares the same allocation,
//! and two refs are equal when they point at the same asset.
//!
//! `value_like!(Rc<Sprite>)` is not possible from a downstream crate (neither
//! the trait nor `Rc` is local there), which is why the handle lives here.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::value_kind::{CellValue, ValueKind};

/// Identity-compared shared reference to an immutable asset.
pub struct AssetRef<U: ?Sized>(Rc<U>);

impl<U> AssetRef<U> {
    /// Move `asset` into a new shared allocation.
    #[must_use]
    pub fn new(asset: U) -> Self {
        Self(Rc::new(asset))
    }
}

impl<U: ?Sized> AssetRef<U> {
    /// Whether both refs point at the same asset.
    #[must_use]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.0, &other.0)
    }

    /// The underlying shared pointer.
    #[must_use]
    pub fn as_rc(&self) -> &Rc<U> {
        &self.0
    }
}

// Manual Clone: `U` need not be `Clone`.
impl<U: ?Sized> Clone for AssetRef<U> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<U: ?Sized> PartialEq for AssetRef<U> {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl<U: ?Sized> Eq for AssetRef<U> {}

impl<U: ?Sized> Deref for AssetRef<U> {
    type Target = U;

    fn deref(&self) -> &U {
        &self.0
    }
}

impl<U: ?Sized> From<Rc<U>> for AssetRef<U> {
    fn from(rc: Rc<U>) -> Self {
        Self(rc)
    }
}

impl<U: ?Sized + fmt::Debug> fmt::Debug for AssetRef<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AssetRef").field(&&*self.0).finish()
    }
}

impl<U: ?Sized + 'static> CellValue for AssetRef<U> {
    const KIND: ValueKind = ValueKind::Value;
}
