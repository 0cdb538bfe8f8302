//! Thin per-arity surfaces over the engine.
//!
//! Everything here is generated by one macro: the engine implements slot
//! bookkeeping once over the type list, and each arity only contributes its
//! factory, match and bind signatures. Adding an arity is one more
//! invocation line, not another implementation.

use std::{any::type_name, future::Future};

use super::index::{Index, U0, U1, U2, U3, U4, U5, U6, U7};
use super::{no_active_slot, Substitute, Sum};
use crate::T;

macro_rules! define_arity {
    (
        $(#[$attr:meta])*
        $alias:ident over $List:ty => $(($T:ident, $U:ty, $of_slot:ident, $bind:ident, $on_slot:ident, $Fut:ident)),+
    ) => {
        $(#[$attr])*
        pub type $alias<$($T),+> = Sum<T![$($T),+]>;

        impl<$($T),+> Sum<T![$($T),+]> {
            $(
                #[doc = concat!(
                    "Collapsing factory for `", stringify!($T),
                    "`: an absent payload yields the empty sum."
                )]
                pub fn $of_slot(value: impl Into<Option<$T>>) -> Self {
                    Sum::of::<$T, $U>(value.into())
                }
            )+

            /// Dispatches to the branch of the active slot, handing it the
            /// payload by value. Exactly one branch runs.
            ///
            /// # Panics
            ///
            /// Matching the empty sum without an empty branch is a
            /// programming-contract violation and panics with the
            /// invalid-variant-state rendering.
            pub fn match_with<R>(self, $($on_slot: impl FnOnce($T) -> R),+) -> R {
                match self.tag() {
                    $(t if t == <$U>::TAG => {
                        $on_slot(unsafe { self.into_slot_unchecked::<$T, $U>() })
                    })+
                    t => no_active_slot(type_name::<Self>(), t),
                }
            }

            /// Total form of [`match_with`](Self::match_with): the empty sum
            /// takes `on_empty`.
            pub fn match_or_else<R>(
                self,
                on_empty: impl FnOnce() -> R,
                $($on_slot: impl FnOnce($T) -> R),+
            ) -> R {
                if self.is_empty() {
                    return on_empty();
                }
                self.match_with($($on_slot),+)
            }

            /// The suspending form of [`match_with`](Self::match_with). Only
            /// the active slot's continuation is created and awaited; the
            /// other branches are never evaluated.
            ///
            /// # Panics
            ///
            /// As [`match_with`](Self::match_with) on the empty sum.
            pub async fn match_async<R, $($Fut),+>(
                self,
                $($on_slot: impl FnOnce($T) -> $Fut),+
            ) -> R
            where
                $($Fut: Future<Output = R>),+
            {
                match self.tag() {
                    $(t if t == <$U>::TAG => {
                        $on_slot(unsafe { self.into_slot_unchecked::<$T, $U>() }).await
                    })+
                    t => no_active_slot(type_name::<Self>(), t),
                }
            }

            /// Total suspending match: the empty sum takes `on_empty`.
            pub async fn match_async_or_else<R, FutE, $($Fut),+>(
                self,
                on_empty: impl FnOnce() -> FutE,
                $($on_slot: impl FnOnce($T) -> $Fut),+
            ) -> R
            where
                FutE: Future<Output = R>,
                $($Fut: Future<Output = R>),+
            {
                if self.is_empty() {
                    return on_empty().await;
                }
                self.match_async($($on_slot),+).await
            }

            $(
                #[doc = concat!(
                    "Rewrites the `", stringify!($T), "` slot through `f` when it is the ",
                    "active one; any other slot passes through unchanged under the new ",
                    "signature, and the empty sum propagates."
                )]
                pub fn $bind<Out>(
                    self,
                    f: impl FnOnce($T) -> Out,
                ) -> Sum<Substitute<$List, $T, Out, $U>> {
                    self.bind::<$T, Out, $U, _>(f)
                }
            )+
        }
    };
}

define_arity! {
    /// The single-slot sum; the substrate of [`Maybe`](crate::Maybe).
    Sum1 over T![T1] => (T1, U0, of_slot1, bind1, on_slot1, Fut1)
}

define_arity! {
    /// A sum of two slots.
    Sum2 over T![T1, T2] =>
        (T1, U0, of_slot1, bind1, on_slot1, Fut1),
        (T2, U1, of_slot2, bind2, on_slot2, Fut2)
}

define_arity! {
    /// A sum of three slots.
    Sum3 over T![T1, T2, T3] =>
        (T1, U0, of_slot1, bind1, on_slot1, Fut1),
        (T2, U1, of_slot2, bind2, on_slot2, Fut2),
        (T3, U2, of_slot3, bind3, on_slot3, Fut3)
}

define_arity! {
    /// A sum of four slots.
    Sum4 over T![T1, T2, T3, T4] =>
        (T1, U0, of_slot1, bind1, on_slot1, Fut1),
        (T2, U1, of_slot2, bind2, on_slot2, Fut2),
        (T3, U2, of_slot3, bind3, on_slot3, Fut3),
        (T4, U3, of_slot4, bind4, on_slot4, Fut4)
}

define_arity! {
    /// A sum of five slots.
    Sum5 over T![T1, T2, T3, T4, T5] =>
        (T1, U0, of_slot1, bind1, on_slot1, Fut1),
        (T2, U1, of_slot2, bind2, on_slot2, Fut2),
        (T3, U2, of_slot3, bind3, on_slot3, Fut3),
        (T4, U3, of_slot4, bind4, on_slot4, Fut4),
        (T5, U4, of_slot5, bind5, on_slot5, Fut5)
}

define_arity! {
    /// A sum of six slots.
    Sum6 over T![T1, T2, T3, T4, T5, T6] =>
        (T1, U0, of_slot1, bind1, on_slot1, Fut1),
        (T2, U1, of_slot2, bind2, on_slot2, Fut2),
        (T3, U2, of_slot3, bind3, on_slot3, Fut3),
        (T4, U3, of_slot4, bind4, on_slot4, Fut4),
        (T5, U4, of_slot5, bind5, on_slot5, Fut5),
        (T6, U5, of_slot6, bind6, on_slot6, Fut6)
}

define_arity! {
    /// A sum of seven slots.
    Sum7 over T![T1, T2, T3, T4, T5, T6, T7] =>
        (T1, U0, of_slot1, bind1, on_slot1, Fut1),
        (T2, U1, of_slot2, bind2, on_slot2, Fut2),
        (T3, U2, of_slot3, bind3, on_slot3, Fut3),
        (T4, U3, of_slot4, bind4, on_slot4, Fut4),
        (T5, U4, of_slot5, bind5, on_slot5, Fut5),
        (T6, U5, of_slot6, bind6, on_slot6, Fut6),
        (T7, U6, of_slot7, bind7, on_slot7, Fut7)
}

define_arity! {
    /// A sum of eight slots, the widest arity.
    Sum8 over T![T1, T2, T3, T4, T5, T6, T7, T8] =>
        (T1, U0, of_slot1, bind1, on_slot1, Fut1),
        (T2, U1, of_slot2, bind2, on_slot2, Fut2),
        (T3, U2, of_slot3, bind3, on_slot3, Fut3),
        (T4, U3, of_slot4, bind4, on_slot4, Fut4),
        (T5, U4, of_slot5, bind5, on_slot5, Fut5),
        (T6, U5, of_slot6, bind6, on_slot6, Fut6),
        (T7, U6, of_slot7, bind7, on_slot7, Fut7),
        (T8, U7, of_slot8, bind8, on_slot8, Fut8)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    type Wide = Sum8<u8, u16, u32, u64, i8, i16, i32, i64>;

    #[test]
    fn factories_tag_their_slot_at_every_arity() {
        assert_eq!(Sum2::<u32, String>::of_slot2("x".to_string()).slot(), Some(2));
        assert_eq!(Sum5::<u8, u8, u8, u8, u8>::of_slot4(9u8).slot(), Some(4));
        assert_eq!(Wide::of_slot8(-1i64).slot(), Some(8));
        assert!(Wide::of_slot5(None).is_empty());
    }

    #[test]
    fn match_dispatches_to_exactly_one_branch() {
        let hits = Cell::new(0u32);
        let count = |hits: &Cell<u32>| {
            hits.set(hits.get() + 1);
        };

        let out = Wide::of_slot3(40u32).match_with(
            |_| unreachable!(),
            |_| unreachable!(),
            |v| {
                count(&hits);
                v + 2
            },
            |_| unreachable!(),
            |_| unreachable!(),
            |_| unreachable!(),
            |_| unreachable!(),
            |_| unreachable!(),
        );
        assert_eq!(out, 42);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn match_or_else_takes_the_empty_branch() {
        let out = Sum3::<u32, String, bool>::of_slot1(None).match_or_else(
            || "empty",
            |_| "slot1",
            |_| "slot2",
            |_| "slot3",
        );
        assert_eq!(out, "empty");
    }

    #[test]
    #[should_panic(expected = "invalid variant state")]
    fn branchless_match_on_empty_is_a_contract_violation() {
        Sum2::<u32, String>::of_slot1(None).match_with(|_| (), |_| ());
    }

    #[test]
    fn bind_changes_one_slot_type_at_wide_arity() {
        let s = Wide::of_slot2(7u16);
        let s = s.bind2(|v| format!("#{v}"));
        assert_eq!(s.slot(), Some(2));
        assert_eq!(s.get::<String, U1>(), Some(&"#7".to_string()));

        let s = Wide::of_slot8(-3i64).bind2(|v: u16| format!("#{v}"));
        assert_eq!(s.get::<i64, U7>(), Some(&-3));
    }

    #[tokio::test]
    async fn async_match_runs_only_the_active_branch() {
        let s = Sum3::<u32, String, bool>::of_slot2("async".to_string());
        let out = s
            .match_async(
                |_| async move { unreachable!() },
                |v: String| async move { v.len() },
                |_| async move { unreachable!() },
            )
            .await;
        assert_eq!(out, 5);
    }

    #[tokio::test]
    async fn async_match_or_else_handles_empty() {
        let s = Sum2::<u32, String>::of_slot2(None);
        let out = s
            .match_async_or_else(
                || async { 0usize },
                |v| async move { v as usize },
                |v: String| async move { v.len() },
            )
            .await;
        assert_eq!(out, 0);
    }

    #[tokio::test]
    async fn async_bind_suspends_only_in_the_active_slot() {
        let s = Sum2::<u32, String>::of_slot1(20u32);
        let s = s
            .bind_async::<u32, u64, U0, _, _>(|v| async move { u64::from(v) * 2 })
            .await;
        assert_eq!(s.get::<u64, U0>(), Some(&40));

        let s = Sum2::<u32, String>::of_slot2("pass".to_string());
        let s = s
            .bind_async::<u32, u64, U0, _, _>(|_| async move { unreachable!() })
            .await;
        assert_eq!(s.get::<String, U1>(), Some(&"pass".to_string()));
    }
}
