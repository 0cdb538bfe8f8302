//! The presence type: a single-slot sum that is either occupied or empty.

use std::{any::type_name, fmt, future::Future};

use crate::{
    error::{ErrorInfo, VariantError},
    fallible::Fallible,
    sum::{index::U0, Sum, Sum1, Sum2},
};

/// A value that is either present (`Some`) or absent (`None`), backed by
/// the single-slot engine sum.
///
/// Construction never fails: [`Maybe::some`] collapses an absent input to
/// [`Maybe::none`], so a populated `Maybe` always carries a payload.
///
/// # Examples
///
/// ```rust
/// use tagsum::Maybe;
///
/// let present = Maybe::some(2).bind(|v| v * 3);
/// assert_eq!(present.unwrap(), 6);
///
/// let absent = Maybe::<i32>::some(None);
/// assert!(absent.is_none());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Maybe<T> {
    inner: Sum1<T>,
}

impl<T> Maybe<T> {
    /// Collapsing construction: an absent payload yields `none`.
    pub fn some(value: impl Into<Option<T>>) -> Self {
        Maybe {
            inner: Sum1::of_slot1(value),
        }
    }

    /// The absent value.
    pub fn none() -> Self {
        Maybe { inner: Sum::empty() }
    }

    /// Whether a payload is present.
    pub fn is_some(&self) -> bool {
        !self.inner.is_empty()
    }

    /// Whether the value is absent.
    pub fn is_none(&self) -> bool {
        self.inner.is_empty()
    }

    /// Borrows the payload when present.
    pub fn as_ref(&self) -> Option<&T> {
        self.inner.get()
    }

    /// Dispatches to `on_some` with the payload, or to `on_none`. Exactly
    /// one branch runs.
    pub fn match_with<R>(self, on_some: impl FnOnce(T) -> R, on_none: impl FnOnce() -> R) -> R {
        self.inner.match_or_else(on_none, on_some)
    }

    /// The suspending form of [`match_with`](Self::match_with); only the
    /// selected branch's continuation is created and awaited.
    pub async fn match_async<R, FS, FN>(
        self,
        on_some: impl FnOnce(T) -> FS,
        on_none: impl FnOnce() -> FN,
    ) -> R
    where
        FS: Future<Output = R>,
        FN: Future<Output = R>,
    {
        self.inner.match_async_or_else(on_none, on_some).await
    }

    /// Maps the contained value, short-circuiting on `none`.
    pub fn bind<Out>(self, f: impl FnOnce(T) -> Out) -> Maybe<Out> {
        Maybe {
            inner: self.inner.bind1(f),
        }
    }

    /// The suspending form of [`bind`](Self::bind).
    pub async fn bind_async<Out, Fut, F>(self, f: F) -> Maybe<Out>
    where
        Fut: Future<Output = Out>,
        F: FnOnce(T) -> Fut,
    {
        Maybe {
            inner: self.inner.bind_async::<T, Out, U0, Fut, F>(f).await,
        }
    }

    /// Returns the payload.
    ///
    /// # Panics
    ///
    /// Panics with the unwrap-on-absent rendering, naming the contained
    /// type, when the value is absent.
    pub fn unwrap(self) -> T {
        match self.try_unwrap() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns the payload, or the unwrap-on-absent error as a value.
    pub fn try_unwrap(self) -> Result<T, VariantError> {
        self.inner.extract::<T, U0>().map_err(|_| {
            VariantError::unwrap_on_absent("unwrap", type_name::<Self>(), "Some")
        })
    }

    /// Returns the payload, or the fallback. The fallback runs only when
    /// the value is absent.
    pub fn unwrap_or(self, fallback: impl FnOnce() -> T) -> T {
        self.match_with(|value| value, fallback)
    }

    /// Returns the payload or a typed fallback as a two-slot sum, without
    /// forcing both branches into one type. The fallback runs only when the
    /// value is absent.
    pub fn unwrap_or_other<Other>(self, fallback: impl FnOnce() -> Other) -> Sum2<T, Other> {
        self.match_with(
            |value| Sum2::of_slot1(value),
            || Sum2::of_slot2(fallback()),
        )
    }

    /// Converts to a [`Fallible`], invoking `error_fn` only on `none`.
    pub fn to_result<E: ErrorInfo>(self, error_fn: impl FnOnce() -> E) -> Fallible<T, E> {
        self.match_with(
            |value| Fallible::ok(value),
            || Fallible::err(error_fn()),
        )
    }

    /// Converts to the standard library's `Option`.
    pub fn into_option(self) -> Option<T> {
        self.inner.extract::<T, U0>().ok()
    }
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(value: Option<T>) -> Self {
        Maybe::some(value)
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(value: Maybe<T>) -> Self {
        value.into_option()
    }
}

impl<T: fmt::Debug> fmt::Debug for Maybe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_ref() {
            Some(value) => f.debug_tuple("Some").field(value).finish(),
            None => f.write_str("None"),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Maybe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_ref() {
            Some(value) => write!(f, "Some({value})"),
            None => f.write_str("None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn some_collapses_on_absent_input() {
        assert!(Maybe::some(1).is_some());
        assert!(Maybe::<i32>::some(None).is_none());
        assert_eq!(Maybe::<i32>::some(None), Maybe::none());
    }

    #[test]
    fn unwrap_returns_the_payload() {
        assert_eq!(Maybe::some(1).unwrap(), 1);
    }

    #[test]
    #[should_panic(expected = "the `Some` payload is absent")]
    fn unwrap_on_none_panics_with_the_taxonomy_rendering() {
        Maybe::<i32>::none().unwrap();
    }

    #[test]
    fn try_unwrap_names_the_instantiation() {
        let err = Maybe::<i32>::none().try_unwrap().unwrap_err();
        match err {
            VariantError::UnwrapOnAbsent {
                operation,
                type_args,
                requested,
            } => {
                assert_eq!(operation, "unwrap");
                assert!(type_args.contains("Maybe<i32>"));
                assert_eq!(requested, "Some");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn fallbacks_run_only_on_none() {
        let called = Cell::new(false);
        let out = Maybe::some(3).unwrap_or(|| {
            called.set(true);
            0
        });
        assert_eq!(out, 3);
        assert!(!called.get());

        assert_eq!(Maybe::<i32>::none().unwrap_or(|| 7), 7);
    }

    #[test]
    fn unwrap_or_other_keeps_both_types() {
        let kept = Maybe::some(5).unwrap_or_other(|| "fallback");
        assert_eq!(kept.get::<i32, _>(), Some(&5));

        let fell_back = Maybe::<i32>::none().unwrap_or_other(|| "fallback");
        assert_eq!(fell_back.slot(), Some(2));
        assert_eq!(fell_back.get::<&str, _>(), Some(&"fallback"));
    }

    #[test]
    fn bind_maps_and_short_circuits() {
        assert_eq!(Maybe::some(2).bind(|v| v * 10), Maybe::some(20));
        assert!(Maybe::<i32>::none().bind(|v| v * 10).is_none());
    }

    #[test]
    fn to_result_round_trips() {
        let some = Maybe::some(1);
        assert_eq!(
            some.clone().to_result(|| "gone".to_string()).to_option(),
            some
        );

        let none = Maybe::<i32>::none();
        assert_eq!(
            none.clone().to_result(|| "gone".to_string()).to_option(),
            none
        );
    }

    #[test]
    fn std_option_round_trips() {
        for opt in [Some(4), None] {
            let maybe = Maybe::from(opt);
            assert_eq!(Option::from(maybe), opt);
        }
    }

    #[test]
    fn rendering() {
        assert_eq!(format!("{}", Maybe::some(1)), "Some(1)");
        assert_eq!(format!("{:?}", Maybe::<i32>::none()), "None");
    }

    #[tokio::test]
    async fn async_match_selects_one_branch() {
        let out = Maybe::some(2)
            .match_async(|v| async move { v * 2 }, || async { 0 })
            .await;
        assert_eq!(out, 4);

        let out = Maybe::<i32>::none()
            .match_async(|_| async move { unreachable!() }, || async { -1 })
            .await;
        assert_eq!(out, -1);
    }

    #[tokio::test]
    async fn async_bind_short_circuits() {
        let doubled = Maybe::some(21).bind_async(|v| async move { v * 2 }).await;
        assert_eq!(doubled, Maybe::some(42));

        let none = Maybe::<i32>::none()
            .bind_async(|v: i32| async move { v * 2 })
            .await;
        assert!(none.is_none());
    }
}
