#![forbid(unsafe_code)]

//! Value classification and copy capability for cell contents.
//!
//! A cell keeps three slots (initial, current, previous) and copies values
//! between them on every accepted mutation. How that copy happens depends on
//! the type:
//!
//! - **Value-like** types ([`ValueKind::Value`]) have assignment semantics that
//!   never alias from the consumer's point of view: numbers, text, immutable
//!   shared strings. The destination slot is simply replaced by a duplicate.
//! - **Reference-like** types ([`ValueKind::Reference`]) are composite or
//!   shared-mutable: collections and `Rc<RefCell<_>>` handles. The source data
//!   is written into the destination's *existing* storage, so handles that were
//!   already obtained from the destination see the new data in place, and no
//!   two slots ever end up backed by the same mutable instance.
//!
//! # Invariants
//!
//! 1. `KIND` is a constant per type; classification is never recomputed.
//! 2. `duplicate()` never returns a value sharing mutable state with `self`.
//! 3. After `dest.assign_from(&src)`, `dest == src` and `dest` shares no
//!    mutable state with `src`.
//!
//! Host types opt in with [`value_like!`](crate::value_like) or
//! [`reference_like!`](crate::reference_like), or by implementing
//! [`CellValue`] by hand when they contain shared handles.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

/// Copy strategy classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Assignment is a copy; replace the destination.
    Value,
    /// Composite or shared-mutable; overwrite the destination in place.
    Reference,
}

impl ValueKind {
    /// Whether this is [`ValueKind::Value`].
    #[must_use]
    pub const fn is_value(self) -> bool {
        matches!(self, Self::Value)
    }

    /// Kind of a composite built from two parts: value-like only if both are.
    #[must_use]
    pub const fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Self::Value, Self::Value) => Self::Value,
            _ => Self::Reference,
        }
    }
}

/// Capability required of anything stored in a cell.
///
/// The defaults suit types whose `Clone` is already a deep copy.
pub trait CellValue: Clone + PartialEq + 'static {
    /// Classification of this type.
    const KIND: ValueKind;

    /// An independent copy of `self`.
    fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Overwrite `self` with the contents of `source`, reusing `self`'s
    /// storage where possible.
    fn assign_from(&mut self, source: &Self) {
        self.clone_from(source);
    }
}

/// Classification of `T`.
#[must_use]
pub const fn kind_of<T: CellValue>() -> ValueKind {
    T::KIND
}

/// Whether `T` is treated as a value type.
#[must_use]
pub const fn is_value_like<T: CellValue>() -> bool {
    T::KIND.is_value()
}

/// Implement [`CellValue`] as [`ValueKind::Value`] for the listed types.
#[macro_export]
macro_rules! value_like {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::value_kind::CellValue for $ty {
                const KIND: $crate::value_kind::ValueKind = $crate::value_kind::ValueKind::Value;
            }
        )+
    };
}

/// Implement [`CellValue`] as [`ValueKind::Reference`] for the listed types.
///
/// Only use this for types whose `Clone` is a deep copy; types holding shared
/// handles need a hand-written `duplicate`/`assign_from`.
#[macro_export]
macro_rules! reference_like {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::value_kind::CellValue for $ty {
                const KIND: $crate::value_kind::ValueKind = $crate::value_kind::ValueKind::Reference;
            }
        )+
    };
}

value_like!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
    &'static str,
    Box<str>,
    Rc<str>,
    Arc<str>,
    Duration,
);

impl<T: CellValue> CellValue for Option<T> {
    const KIND: ValueKind = T::KIND;

    fn duplicate(&self) -> Self {
        self.as_ref().map(CellValue::duplicate)
    }

    fn assign_from(&mut self, source: &Self) {
        if let (Some(dest), Some(src)) = (self.as_mut(), source.as_ref()) {
            dest.assign_from(src);
            return;
        }
        *self = source.as_ref().map(CellValue::duplicate);
    }
}

impl<A: CellValue, B: CellValue> CellValue for (A, B) {
    const KIND: ValueKind = A::KIND.combine(B::KIND);

    fn duplicate(&self) -> Self {
        (self.0.duplicate(), self.1.duplicate())
    }

    fn assign_from(&mut self, source: &Self) {
        self.0.assign_from(&source.0);
        self.1.assign_from(&source.1);
    }
}

impl<A: CellValue, B: CellValue, C: CellValue> CellValue for (A, B, C) {
    const KIND: ValueKind = A::KIND.combine(B::KIND).combine(C::KIND);

    fn duplicate(&self) -> Self {
        (self.0.duplicate(), self.1.duplicate(), self.2.duplicate())
    }

    fn assign_from(&mut self, source: &Self) {
        self.0.assign_from(&source.0);
        self.1.assign_from(&source.1);
        self.2.assign_from(&source.2);
    }
}

impl<T: CellValue, const N: usize> CellValue for [T; N] {
    const KIND: ValueKind = T::KIND;

    fn duplicate(&self) -> Self {
        std::array::from_fn(|i| self[i].duplicate())
    }

    fn assign_from(&mut self, source: &Self) {
        for (dest, src) in self.iter_mut().zip(source) {
            dest.assign_from(src);
        }
    }
}

impl<T: CellValue> CellValue for Vec<T> {
    const KIND: ValueKind = ValueKind::Reference;

    fn duplicate(&self) -> Self {
        self.iter().map(CellValue::duplicate).collect()
    }

    fn assign_from(&mut self, source: &Self) {
        // Reuse existing slots, then grow.
        self.truncate(source.len());
        for (dest, src) in self.iter_mut().zip(source) {
            dest.assign_from(src);
        }
        let kept = self.len();
        self.extend(source[kept..].iter().map(CellValue::duplicate));
    }
}

impl<T: CellValue> CellValue for VecDeque<T> {
    const KIND: ValueKind = ValueKind::Reference;

    fn duplicate(&self) -> Self {
        self.iter().map(CellValue::duplicate).collect()
    }

    fn assign_from(&mut self, source: &Self) {
        self.truncate(source.len());
        for (dest, src) in self.iter_mut().zip(source) {
            dest.assign_from(src);
        }
        let kept = self.len();
        self.extend(source.iter().skip(kept).map(CellValue::duplicate));
    }
}

impl<K, V> CellValue for HashMap<K, V>
where
    K: Clone + Eq + Hash + 'static,
    V: CellValue,
{
    const KIND: ValueKind = ValueKind::Reference;

    fn duplicate(&self) -> Self {
        self.iter().map(|(k, v)| (k.clone(), v.duplicate())).collect()
    }

    fn assign_from(&mut self, source: &Self) {
        self.retain(|k, _| source.contains_key(k));
        for (k, v) in source {
            match self.get_mut(k) {
                Some(dest) => dest.assign_from(v),
                None => {
                    self.insert(k.clone(), v.duplicate());
                }
            }
        }
    }
}

impl<K, V> CellValue for BTreeMap<K, V>
where
    K: Clone + Ord + 'static,
    V: CellValue,
{
    const KIND: ValueKind = ValueKind::Reference;

    fn duplicate(&self) -> Self {
        self.iter().map(|(k, v)| (k.clone(), v.duplicate())).collect()
    }

    fn assign_from(&mut self, source: &Self) {
        self.retain(|k, _| source.contains_key(k));
        for (k, v) in source {
            match self.get_mut(k) {
                Some(dest) => dest.assign_from(v),
                None => {
                    self.insert(k.clone(), v.duplicate());
                }
            }
        }
    }
}

// Set elements are immutable once inserted, so `Clone` is already deep.
impl<T: Clone + Eq + Hash + 'static> CellValue for HashSet<T> {
    const KIND: ValueKind = ValueKind::Reference;
}

impl<T: Clone + Ord + 'static> CellValue for BTreeSet<T> {
    const KIND: ValueKind = ValueKind::Reference;
}

/// Shared mutable handle. Duplicating allocates a fresh handle; assigning
/// writes through the existing one, so every clone of the destination handle
/// observes the new data.
///
/// Both operations go through `U::clone`, so they are only as deep as that
/// clone: a `U` that itself holds `Rc<RefCell<_>>` fields ends up sharing
/// those fields between slots. Wrap such types in a hand-written
/// [`CellValue`] impl instead.
impl<U: Clone + PartialEq + 'static> CellValue for Rc<RefCell<U>> {
    const KIND: ValueKind = ValueKind::Reference;

    fn duplicate(&self) -> Self {
        Rc::new(RefCell::new(self.borrow().clone()))
    }

    fn assign_from(&mut self, source: &Self) {
        if Rc::ptr_eq(self, source) {
            return;
        }
        self.borrow_mut().clone_from(&source.borrow());
    }
}
