#![forbid(unsafe_code)]

//! Listener callbacks with identity and introspection labels.
//!
//! A [`Listener`] is a reference-counted callback. Identity is the callback
//! allocation: clones of one listener compare equal, while two listeners built
//! from separate closures never do, even if the closures are identical. This is
//! what a broadcaster uses to reject duplicates and to find the entry to
//! unregister.
//!
//! Every listener carries a [`ListenerLabel`] (`owner.name`) so a debugging
//! panel can show who is registered. Labels are either given explicitly or
//! derived from the callback's Rust type path when the listener is built.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// Owner and callback name of a listener.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListenerLabel {
    owner: Cow<'static, str>,
    name: Cow<'static, str>,
}

impl ListenerLabel {
    /// Owner used when a type path has no module component.
    pub const UNKNOWN_OWNER: &'static str = "<unknown>";

    /// Create a label from explicit parts.
    #[must_use]
    pub fn new(owner: impl Into<Cow<'static, str>>, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Derive a label from a type path such as `app::hud::refresh::{{closure}}`.
    ///
    /// Closure markers are stripped, the last path segment becomes the name and
    /// everything before it the owner. Generic arguments are ignored when
    /// splitting.
    #[must_use]
    pub fn from_type_path(path: &'static str) -> Self {
        let mut trimmed = path;
        while let Some(rest) = trimmed.strip_suffix("::{{closure}}") {
            trimmed = rest;
        }
        let head_end = trimmed.find('<').unwrap_or(trimmed.len());
        match trimmed[..head_end].rfind("::") {
            Some(split) => Self::new(&trimmed[..split], &trimmed[split + 2..]),
            None => Self::new(Self::UNKNOWN_OWNER, trimmed),
        }
    }

    /// The owning type or module.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The callback name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ListenerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.name)
    }
}

/// A shared callback receiving `&A` on each broadcast.
pub struct Listener<A = ()> {
    callback: Rc<dyn Fn(&A)>,
    label: ListenerLabel,
}

// Manual Clone: shares the same callback allocation.
impl<A> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
            label: self.label.clone(),
        }
    }
}

impl<A> PartialEq for Listener<A> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<A> Eq for Listener<A> {}

impl<A> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("label", &self.label)
            .field("strong_count", &Rc::strong_count(&self.callback))
            .finish()
    }
}

impl<A: 'static> Listener<A> {
    /// Wrap a callback, deriving its label from the callback's type path.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&A) + 'static,
    {
        Self {
            callback: Rc::new(callback),
            label: ListenerLabel::from_type_path(std::any::type_name::<F>()),
        }
    }

    /// Wrap a callback with an explicit label.
    pub fn named<F>(
        owner: impl Into<Cow<'static, str>>,
        name: impl Into<Cow<'static, str>>,
        callback: F,
    ) -> Self
    where
        F: Fn(&A) + 'static,
    {
        Self {
            callback: Rc::new(callback),
            label: ListenerLabel::new(owner, name),
        }
    }

    /// Replace the label, keeping the callback identity.
    #[must_use]
    pub fn with_label(mut self, label: ListenerLabel) -> Self {
        self.label = label;
        self
    }

    /// The introspection label.
    #[must_use]
    pub fn label(&self) -> &ListenerLabel {
        &self.label
    }

    /// Run the callback.
    pub fn invoke(&self, payload: &A) {
        (self.callback)(payload);
    }
}
