#![forbid(unsafe_code)]

//! Named function collaborators with an optional literal override.
//!
//! A [`Function<Args, R>`] is injectable logic that always produces a value.
//! Logic is assigned at runtime with [`assign`](Function::assign); multiple
//! parameters are passed as a tuple (`Function<(f32, f32), f32>`).
//!
//! Editor tooling can install a literal override: while one is set,
//! [`invoke`](Function::invoke) returns it and the assigned logic is not run.
//! This lets a designer pin a result without touching the logic.

use std::borrow::Cow;
use std::fmt;

use pulse_core::error::{PulseError, Result};
use tracing::trace;

/// Injectable logic returning `R`, with an optional literal override.
pub struct Function<Args, R> {
    name: Cow<'static, str>,
    logic: Option<Box<dyn Fn(Args) -> R>>,
    literal: Option<R>,
}

impl<Args, R: fmt::Debug> fmt::Debug for Function<Args, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("assigned", &self.logic.is_some())
            .field("literal", &self.literal)
            .finish()
    }
}

impl<Args, R: Clone> Function<Args, R> {
    /// Create a function with no logic.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            logic: None,
            literal: None,
        }
    }

    /// Create a function with logic already assigned.
    #[must_use]
    pub fn with_logic(
        name: impl Into<Cow<'static, str>>,
        logic: impl Fn(Args) -> R + 'static,
    ) -> Self {
        let mut function = Self::new(name);
        function.assign(logic);
        function
    }

    /// Replace the logic.
    pub fn assign(&mut self, logic: impl Fn(Args) -> R + 'static) -> &mut Self {
        self.logic = Some(Box::new(logic));
        self
    }

    /// Remove the logic.
    pub fn clear(&mut self) -> &mut Self {
        self.logic = None;
        self
    }

    /// Whether logic is assigned.
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        self.logic.is_some()
    }

    /// The function's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Install or remove the literal override.
    pub fn set_literal_override(&mut self, literal: Option<R>) {
        self.literal = literal;
    }

    /// The installed literal override.
    #[must_use]
    pub fn literal_override(&self) -> Option<&R> {
        self.literal.as_ref()
    }

    /// Evaluate.
    ///
    /// # Errors
    ///
    /// [`PulseError::MissingLogic`] if neither an override nor logic is
    /// available.
    pub fn invoke(&self, args: Args) -> Result<R> {
        if let Some(literal) = &self.literal {
            trace!(target: "pulse::function", name = %self.name, "literal override");
            return Ok(literal.clone());
        }
        match &self.logic {
            Some(logic) => Ok(logic(args)),
            None => Err(PulseError::MissingLogic {
                function: self.name.to_string(),
            }),
        }
    }
}
