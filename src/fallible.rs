//! The success/failure type: a two-slot sum biased toward its `Ok` slot.

use std::{any::type_name, fmt, future::Future};

use crate::{
    error::{ErrorInfo, UnwrapOnErr, VariantError},
    maybe::Maybe,
    sum::{
        index::{U0, U1},
        Sum2,
    },
};

/// A value that is either a success (`Ok`) or a failure (`Err`), backed by
/// the two-slot engine sum with the invariant that one of the two is always
/// active; there is no "neither" state.
///
/// Constructing a branch from an absent payload is a contract violation
/// that fails at the call site: [`Fallible::ok`] and [`Fallible::err`]
/// panic, [`Fallible::try_ok`] and [`Fallible::try_err`] hand the violation
/// back as a value for boundary code. An absent input is never silently
/// turned into a default.
///
/// The error slot's type must satisfy the [`ErrorInfo`] capability
/// contract.
///
/// # Examples
///
/// ```rust
/// use tagsum::Fallible;
///
/// let n: Fallible<i32, String> = Fallible::ok(41);
/// assert_eq!(n.bind(|v| v + 1).unwrap(), 42);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Fallible<T, E> {
    inner: Sum2<T, E>,
}

impl<T, E: ErrorInfo> Fallible<T, E> {
    /// Constructs the `Ok` branch.
    ///
    /// # Panics
    ///
    /// Panics with the absent-payload rendering when `value` is absent.
    pub fn ok(value: impl Into<Option<T>>) -> Self {
        match Self::try_ok(value) {
            Ok(this) => this,
            Err(err) => panic!("{err}"),
        }
    }

    /// Constructs the `Err` branch.
    ///
    /// # Panics
    ///
    /// Panics with the absent-payload rendering when `error` is absent.
    pub fn err(error: impl Into<Option<E>>) -> Self {
        match Self::try_err(error) {
            Ok(this) => this,
            Err(err) => panic!("{err}"),
        }
    }

    /// Checked construction of the `Ok` branch: an absent payload is
    /// reported as a construction-contract violation instead of panicking.
    pub fn try_ok(value: impl Into<Option<T>>) -> Result<Self, VariantError> {
        match value.into() {
            Some(value) => Ok(Fallible {
                inner: Sum2::of_slot1(value),
            }),
            None => Err(VariantError::absent_payload(type_name::<Self>(), "Ok")),
        }
    }

    /// Checked construction of the `Err` branch.
    pub fn try_err(error: impl Into<Option<E>>) -> Result<Self, VariantError> {
        match error.into() {
            Some(error) => Ok(Fallible {
                inner: Sum2::of_slot2(error),
            }),
            None => Err(VariantError::absent_payload(type_name::<Self>(), "Err")),
        }
    }

    /// Whether the `Ok` branch is active.
    pub fn is_ok(&self) -> bool {
        self.inner.slot() == Some(1)
    }

    /// Whether the `Err` branch is active.
    pub fn is_err(&self) -> bool {
        self.inner.slot() == Some(2)
    }

    /// Borrows the success payload when `Ok` is active.
    pub fn ok_ref(&self) -> Option<&T> {
        self.inner.get::<T, U0>()
    }

    /// Borrows the error when `Err` is active.
    pub fn err_ref(&self) -> Option<&E> {
        self.inner.get::<E, U1>()
    }

    /// Dispatches to `on_ok` or `on_err` with the active payload. Exactly
    /// one branch runs.
    pub fn match_with<R>(self, on_ok: impl FnOnce(T) -> R, on_err: impl FnOnce(E) -> R) -> R {
        self.inner.match_with(on_ok, on_err)
    }

    /// The suspending form of [`match_with`](Self::match_with); only the
    /// selected branch's continuation is created and awaited.
    pub async fn match_async<R, FO, FE>(
        self,
        on_ok: impl FnOnce(T) -> FO,
        on_err: impl FnOnce(E) -> FE,
    ) -> R
    where
        FO: Future<Output = R>,
        FE: Future<Output = R>,
    {
        self.inner.match_async(on_ok, on_err).await
    }

    /// Maps the success payload, passing an active `Err` through unchanged.
    pub fn bind<Out>(self, f: impl FnOnce(T) -> Out) -> Fallible<Out, E> {
        Fallible {
            inner: self.inner.bind1(f),
        }
    }

    /// The suspending form of [`bind`](Self::bind).
    pub async fn bind_async<Out, Fut, F>(self, f: F) -> Fallible<Out, E>
    where
        Fut: Future<Output = Out>,
        F: FnOnce(T) -> Fut,
    {
        Fallible {
            inner: self.inner.bind_async::<T, Out, U0, Fut, F>(f).await,
        }
    }

    /// Returns the success payload.
    ///
    /// # Panics
    ///
    /// Panics with the unwrap-on-err rendering, which carries the original
    /// error, when `Err` is active.
    pub fn unwrap(self) -> T {
        match self.try_unwrap() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns the success payload, or the unwrap failure carrying the
    /// original error value.
    pub fn try_unwrap(self) -> Result<T, UnwrapOnErr<E>> {
        self.match_with(Ok, |error| {
            Err(UnwrapOnErr {
                type_args: type_name::<Self>(),
                error,
            })
        })
    }

    /// Returns the success payload, or the fallback computed from the
    /// error. The fallback runs only when `Err` is active.
    pub fn unwrap_or(self, fallback: impl FnOnce(E) -> T) -> T {
        self.match_with(|value| value, fallback)
    }

    /// The suspending form of [`unwrap_or`](Self::unwrap_or); the fallback
    /// future exists only when `Err` is active.
    pub async fn unwrap_or_async<Fut>(self, fallback: impl FnOnce(E) -> Fut) -> T
    where
        Fut: Future<Output = T>,
    {
        match self.try_unwrap() {
            Ok(value) => value,
            Err(err) => fallback(err.into_error()).await,
        }
    }

    /// Returns the success payload or a typed fallback as a two-slot sum,
    /// without forcing both branches into one type.
    pub fn unwrap_or_other<Other>(self, fallback: impl FnOnce(E) -> Other) -> Sum2<T, Other> {
        self.match_with(
            |value| Sum2::of_slot1(value),
            |error| Sum2::of_slot2(fallback(error)),
        )
    }

    /// Converts to a [`Maybe`], discarding the error.
    pub fn to_option(self) -> Maybe<T> {
        self.match_with(|value| Maybe::some(value), |_| Maybe::none())
    }
}

impl<T, E: ErrorInfo> From<Result<T, E>> for Fallible<T, E> {
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(value) => Fallible::ok(value),
            Err(error) => Fallible::err(error),
        }
    }
}

impl<T, E: ErrorInfo> From<Fallible<T, E>> for Result<T, E> {
    fn from(value: Fallible<T, E>) -> Self {
        value.match_with(Ok, Err)
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Fallible<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(value) = self.inner.get::<T, U0>() {
            return f.debug_tuple("Ok").field(value).finish();
        }
        if let Some(error) = self.inner.get::<E, U1>() {
            return f.debug_tuple("Err").field(error).finish();
        }
        unreachable!("a success/failure value always has an active branch")
    }
}

impl<T: fmt::Display, E: ErrorInfo> fmt::Display for Fallible<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(value) = self.inner.get::<T, U0>() {
            return write!(f, "Ok({value})");
        }
        if let Some(error) = self.inner.get::<E, U1>() {
            return write!(f, "Err({})", error.display_string());
        }
        unreachable!("a success/failure value always has an active branch")
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct ParseFault {
        line: u32,
    }

    impl ErrorInfo for ParseFault {
        fn code(&self) -> &str {
            "parse"
        }

        fn message(&self) -> String {
            format!("bad token at line {}", self.line)
        }
    }

    type Parsed = Fallible<i32, ParseFault>;

    #[test]
    fn construction_tags_the_branch() {
        assert!(Parsed::ok(1).is_ok());
        assert!(Parsed::err(ParseFault { line: 3 }).is_err());
    }

    #[test]
    #[should_panic(expected = "from an absent payload")]
    fn ok_with_absent_payload_fails_at_construction() {
        Parsed::ok(None);
    }

    #[test]
    fn try_constructors_report_the_branch() {
        let err = Parsed::try_ok(None).unwrap_err();
        assert!(matches!(
            err,
            VariantError::AbsentPayload { branch: "Ok", .. }
        ));

        let err = Parsed::try_err(None).unwrap_err();
        assert!(matches!(
            err,
            VariantError::AbsentPayload { branch: "Err", .. }
        ));
    }

    #[test]
    fn bind_maps_ok_and_passes_err_through() {
        assert_eq!(Parsed::ok(2).bind(|v| v * 10).unwrap(), 20);

        let failed = Parsed::err(ParseFault { line: 9 }).bind(|v| v * 10);
        assert_eq!(failed.err_ref(), Some(&ParseFault { line: 9 }));
    }

    #[test]
    fn unwrap_carries_the_original_error() {
        let err = Parsed::err(ParseFault { line: 12 }).try_unwrap().unwrap_err();
        assert!(err.type_args().contains("Fallible"));
        assert_eq!(err.into_error(), ParseFault { line: 12 });
    }

    #[test]
    #[should_panic(expected = "[parse] bad token at line 12")]
    fn unwrap_on_err_panics_with_the_error_rendering() {
        Parsed::err(ParseFault { line: 12 }).unwrap();
    }

    #[test]
    fn fallbacks_see_the_error_and_run_lazily() {
        let called = Cell::new(false);
        let out = Parsed::ok(5).unwrap_or(|_| {
            called.set(true);
            0
        });
        assert_eq!(out, 5);
        assert!(!called.get());

        let out = Parsed::err(ParseFault { line: 2 }).unwrap_or(|e| e.line as i32);
        assert_eq!(out, 2);
    }

    #[test]
    fn unwrap_or_other_keeps_both_types() {
        let fell_back =
            Parsed::err(ParseFault { line: 4 }).unwrap_or_other(|e| e.message());
        assert_eq!(fell_back.slot(), Some(2));
        assert_eq!(
            fell_back.get::<String, _>(),
            Some(&"bad token at line 4".to_string())
        );
    }

    #[test]
    fn equality_is_tag_sensitive_then_structural() {
        assert_eq!(Parsed::ok(1), Parsed::ok(1));
        assert_ne!(Parsed::ok(1), Parsed::ok(2));
        assert_ne!(Parsed::ok(1), Parsed::err(ParseFault { line: 1 }));
        assert_eq!(
            Parsed::err(ParseFault { line: 1 }),
            Parsed::err(ParseFault { line: 1 })
        );
        assert_ne!(
            Parsed::err(ParseFault { line: 1 }),
            Parsed::err(ParseFault { line: 2 })
        );
    }

    #[test]
    fn std_result_round_trips() {
        for result in [Ok(3), Err(ParseFault { line: 1 })] {
            let fallible = Fallible::from(result.clone());
            assert_eq!(Result::from(fallible), result);
        }
    }

    #[test]
    fn rendering_uses_the_error_contract() {
        assert_eq!(format!("{}", Parsed::ok(1)), "Ok(1)");
        assert_eq!(
            format!("{}", Parsed::err(ParseFault { line: 7 })),
            "Err([parse] bad token at line 7)"
        );
        assert_eq!(
            format!("{:?}", Parsed::err(ParseFault { line: 7 })),
            "Err(ParseFault { line: 7 })"
        );
    }

    #[tokio::test]
    async fn async_paths_suspend_only_in_the_active_branch() {
        let out = Parsed::ok(20)
            .match_async(|v| async move { v * 2 }, |_| async move { unreachable!() })
            .await;
        assert_eq!(out, 40);

        let doubled = Parsed::ok(21).bind_async(|v| async move { v * 2 }).await;
        assert_eq!(doubled.unwrap(), 42);

        let recovered = Parsed::err(ParseFault { line: 6 })
            .unwrap_or_async(|e| async move { e.line as i32 })
            .await;
        assert_eq!(recovered, 6);
    }
}
