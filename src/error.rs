//! The unwrap/construction error taxonomy and the error-capability
//! contract.
//!
//! Three things can go wrong around a sum value, and only three: asking for
//! a payload the active tag does not carry, building a [`Fallible`] branch
//! from an absent payload, and observing a tag outside its closed set. The
//! first two are values of [`VariantError`] (or [`UnwrapOnErr`] when the
//! original error travels along); the last is a corrupted invariant and
//! only ever surfaces as a panic.
//!
//! [`Fallible`]: crate::Fallible

use std::fmt;

use thiserror::Error;

/// The capability contract for error types carried in the `Err` slot of a
/// [`Fallible`](crate::Fallible): a stable machine-readable code and a
/// human-readable message.
pub trait ErrorInfo {
    /// A stable, machine-readable error code.
    fn code(&self) -> &str;

    /// The human-readable description.
    fn message(&self) -> String;

    /// The default diagnostic rendering, `[code] message`.
    fn display_string(&self) -> String {
        format!("[{}] {}", self.code(), self.message())
    }
}

impl ErrorInfo for String {
    fn code(&self) -> &str {
        "error"
    }

    fn message(&self) -> String {
        self.clone()
    }
}

/// Errors raised by the sum types themselves.
///
/// `unwrap`-style operations surface these to the immediate caller;
/// construction-contract violations fail at the call site. The
/// invalid-variant-state case is fatal and only ever appears inside a panic
/// message, never as a recoverable value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariantError {
    /// An `unwrap`-style operation asked for a payload the active tag does
    /// not provide.
    #[error("`{operation}` on `{type_args}` failed: the `{requested}` payload is absent")]
    UnwrapOnAbsent {
        /// The operation that was attempted.
        operation: &'static str,
        /// The generic instantiation the operation ran on.
        type_args: &'static str,
        /// The branch whose payload was requested.
        requested: &'static str,
    },

    /// A [`Fallible`](crate::Fallible) branch was built from an absent
    /// payload.
    #[error("cannot construct the `{branch}` branch of `{type_args}` from an absent payload")]
    AbsentPayload {
        /// The generic instantiation under construction.
        type_args: &'static str,
        /// The branch that was being constructed.
        branch: &'static str,
    },

    /// A tag outside its closed set was observed, or an empty sum was
    /// matched without an empty branch.
    #[error("invalid variant state for `{type_args}`: {detail}")]
    InvalidVariantState {
        /// The generic instantiation the violation was observed on.
        type_args: &'static str,
        /// What was observed.
        detail: String,
    },
}

impl VariantError {
    pub(crate) fn unwrap_on_absent(
        operation: &'static str,
        type_args: &'static str,
        requested: &'static str,
    ) -> Self {
        VariantError::UnwrapOnAbsent {
            operation,
            type_args,
            requested,
        }
    }

    pub(crate) fn absent_payload(type_args: &'static str, branch: &'static str) -> Self {
        VariantError::AbsentPayload { type_args, branch }
    }

    pub(crate) fn empty_match(type_args: &'static str) -> Self {
        VariantError::InvalidVariantState {
            type_args,
            detail: "matched on the empty variant without an empty branch".to_string(),
        }
    }

    pub(crate) fn corrupt_tag(type_args: &'static str, tag: u8) -> Self {
        VariantError::InvalidVariantState {
            type_args,
            detail: format!("tag {tag} is outside the closed set"),
        }
    }
}

impl ErrorInfo for VariantError {
    fn code(&self) -> &str {
        match self {
            VariantError::UnwrapOnAbsent { .. } => "unwrap_on_absent",
            VariantError::AbsentPayload { .. } => "absent_payload",
            VariantError::InvalidVariantState { .. } => "invalid_variant_state",
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }
}

/// The failure of [`Fallible::unwrap`](crate::Fallible::unwrap) and
/// [`Fallible::try_unwrap`](crate::Fallible::try_unwrap): the value was
/// requested while the `Err` branch was active. Carries the original error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnwrapOnErr<E> {
    pub(crate) type_args: &'static str,
    pub(crate) error: E,
}

impl<E> UnwrapOnErr<E> {
    /// The generic instantiation the unwrap ran on.
    pub fn type_args(&self) -> &'static str {
        self.type_args
    }

    /// Borrows the original error.
    pub fn error(&self) -> &E {
        &self.error
    }

    /// Recovers the original error.
    pub fn into_error(self) -> E {
        self.error
    }
}

impl<E: ErrorInfo> fmt::Display for UnwrapOnErr<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`unwrap` on `{}` failed: the active branch is `Err`: {}",
            self.type_args,
            self.error.display_string()
        )
    }
}

impl<E: ErrorInfo + fmt::Debug> std::error::Error for UnwrapOnErr<E> {}
