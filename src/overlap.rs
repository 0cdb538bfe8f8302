//! The left/right type with overlap: four states, up to two active slots.

use std::{fmt, future::Future};

use crate::{maybe::Maybe, sum::Sum3};

/// A value holding a left payload, a right payload, both, or neither.
///
/// Unlike an ordinary sum, two slots may be simultaneously active, so the
/// closed tag set is `{Neither, Left, Right, Both}` and a match takes four
/// mandatory branches; `Neither` is a first-class observable state here,
/// not a contract violation.
///
/// Construction degrades gracefully along the lattice instead of failing:
/// an absent payload simply removes its side.
///
/// # Examples
///
/// ```rust
/// use tagsum::Overlap;
///
/// let both: Overlap<i32, i32> = Overlap::both(1, 2);
/// assert!(both.is_both());
///
/// let left: Overlap<i32, i32> = Overlap::both(1, None);
/// assert!(left.has_left() && !left.has_right());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Overlap<L, R> {
    /// No payload on either side.
    Neither,
    /// Only the left payload.
    Left(L),
    /// Only the right payload.
    Right(R),
    /// Both payloads.
    Both(L, R),
}

impl<L, R> Overlap<L, R> {
    /// The state with no payloads.
    pub fn neither() -> Self {
        Overlap::Neither
    }

    /// Collapsing construction of the left side: an absent payload yields
    /// `Neither`.
    pub fn left(value: impl Into<Option<L>>) -> Self {
        match value.into() {
            Some(value) => Overlap::Left(value),
            None => Overlap::Neither,
        }
    }

    /// Collapsing construction of the right side: an absent payload yields
    /// `Neither`.
    pub fn right(value: impl Into<Option<R>>) -> Self {
        match value.into() {
            Some(value) => Overlap::Right(value),
            None => Overlap::Neither,
        }
    }

    /// Constructs from two possibly-absent payloads, degrading along the
    /// lattice: `Both` needs both present, one present keeps its side, none
    /// yields `Neither`.
    pub fn both(left: impl Into<Option<L>>, right: impl Into<Option<R>>) -> Self {
        match (left.into(), right.into()) {
            (Some(left), Some(right)) => Overlap::Both(left, right),
            (Some(left), None) => Overlap::Left(left),
            (None, Some(right)) => Overlap::Right(right),
            (None, None) => Overlap::Neither,
        }
    }

    /// Whether a left payload exists (`Left` or `Both`).
    pub fn has_left(&self) -> bool {
        matches!(self, Overlap::Left(_) | Overlap::Both(..))
    }

    /// Whether a right payload exists (`Right` or `Both`).
    pub fn has_right(&self) -> bool {
        matches!(self, Overlap::Right(_) | Overlap::Both(..))
    }

    /// Whether no payload exists.
    pub fn is_neither(&self) -> bool {
        matches!(self, Overlap::Neither)
    }

    /// Whether both payloads exist.
    pub fn is_both(&self) -> bool {
        matches!(self, Overlap::Both(..))
    }

    /// The left payload, whichever state carries one.
    pub fn left_value(self) -> Maybe<L> {
        match self {
            Overlap::Left(left) | Overlap::Both(left, _) => Maybe::some(left),
            _ => Maybe::none(),
        }
    }

    /// The right payload, whichever state carries one.
    pub fn right_value(self) -> Maybe<R> {
        match self {
            Overlap::Right(right) | Overlap::Both(_, right) => Maybe::some(right),
            _ => Maybe::none(),
        }
    }

    /// Dispatches on the four states. All branches are mandatory and
    /// exactly one runs.
    pub fn match_with<Out>(
        self,
        on_left: impl FnOnce(L) -> Out,
        on_right: impl FnOnce(R) -> Out,
        on_neither: impl FnOnce() -> Out,
        on_both: impl FnOnce(L, R) -> Out,
    ) -> Out {
        match self {
            Overlap::Neither => on_neither(),
            Overlap::Left(left) => on_left(left),
            Overlap::Right(right) => on_right(right),
            Overlap::Both(left, right) => on_both(left, right),
        }
    }

    /// The suspending form of [`match_with`](Self::match_with); only the
    /// selected branch's continuation is created and awaited.
    pub async fn match_async<Out, FL, FR, FN, FB>(
        self,
        on_left: impl FnOnce(L) -> FL,
        on_right: impl FnOnce(R) -> FR,
        on_neither: impl FnOnce() -> FN,
        on_both: impl FnOnce(L, R) -> FB,
    ) -> Out
    where
        FL: Future<Output = Out>,
        FR: Future<Output = Out>,
        FN: Future<Output = Out>,
        FB: Future<Output = Out>,
    {
        match self {
            Overlap::Neither => on_neither().await,
            Overlap::Left(left) => on_left(left).await,
            Overlap::Right(right) => on_right(right).await,
            Overlap::Both(left, right) => on_both(left, right).await,
        }
    }

    /// Applies `f` wherever a left payload exists (`Left` and `Both`);
    /// otherwise the right payload passes through under the new left type.
    pub fn bind_left<L2>(self, f: impl FnOnce(L) -> L2) -> Overlap<L2, R> {
        match self {
            Overlap::Neither => Overlap::Neither,
            Overlap::Left(left) => Overlap::Left(f(left)),
            Overlap::Right(right) => Overlap::Right(right),
            Overlap::Both(left, right) => Overlap::Both(f(left), right),
        }
    }

    /// Applies `f` wherever a right payload exists (`Right` and `Both`);
    /// otherwise the left payload passes through under the new right type.
    pub fn bind_right<R2>(self, f: impl FnOnce(R) -> R2) -> Overlap<L, R2> {
        match self {
            Overlap::Neither => Overlap::Neither,
            Overlap::Left(left) => Overlap::Left(left),
            Overlap::Right(right) => Overlap::Right(f(right)),
            Overlap::Both(left, right) => Overlap::Both(left, f(right)),
        }
    }

    /// Combines the two payloads into a three-slot sum: `Both` feeds `f`
    /// into the first slot, a lone left or right payload lands in the
    /// second or third, and `Neither` yields the empty sum.
    pub fn bind_both<C>(self, f: impl FnOnce(L, R) -> C) -> Sum3<C, L, R> {
        match self {
            Overlap::Both(left, right) => Sum3::of_slot1(f(left, right)),
            Overlap::Left(left) => Sum3::of_slot2(left),
            Overlap::Right(right) => Sum3::of_slot3(right),
            Overlap::Neither => Sum3::empty(),
        }
    }
}

impl<L, R> Default for Overlap<L, R> {
    fn default() -> Self {
        Overlap::Neither
    }
}

impl<L: fmt::Debug, R: fmt::Debug> fmt::Debug for Overlap<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Overlap::Neither => f.write_str("Neither"),
            Overlap::Left(left) => f.debug_tuple("Left").field(left).finish(),
            Overlap::Right(right) => f.debug_tuple("Right").field(right).finish(),
            Overlap::Both(left, right) => {
                f.debug_tuple("Both").field(left).field(right).finish()
            }
        }
    }
}

impl<L: fmt::Display, R: fmt::Display> fmt::Display for Overlap<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Overlap::Neither => f.write_str("Neither"),
            Overlap::Left(left) => write!(f, "Left({left})"),
            Overlap::Right(right) => write!(f, "Right({right})"),
            Overlap::Both(left, right) => write!(f, "Both({left}, {right})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sum::Sum3;

    type Pair = Overlap<i32, i32>;

    #[test]
    fn construction_degrades_along_the_lattice() {
        assert_eq!(Pair::both(None, None), Pair::Neither);
        assert_eq!(Pair::both(1, None), Pair::Left(1));
        assert_eq!(Pair::both(None, 2), Pair::Right(2));
        assert_eq!(Pair::both(1, 2), Pair::Both(1, 2));

        assert_eq!(Pair::left(None), Pair::Neither);
        assert_eq!(Pair::right(7), Pair::Right(7));
    }

    #[test]
    fn observers_track_payload_presence() {
        assert!(Pair::Both(1, 2).has_left());
        assert!(Pair::Both(1, 2).has_right());
        assert!(Pair::Left(1).has_left());
        assert!(!Pair::Left(1).has_right());
        assert!(Pair::neither().is_neither());

        assert_eq!(Pair::Both(1, 2).left_value(), crate::Maybe::some(1));
        assert_eq!(Pair::Left(1).right_value(), crate::Maybe::none());
    }

    #[test]
    fn match_covers_all_four_states() {
        let describe = |o: Pair| {
            o.match_with(
                |l| format!("left {l}"),
                |r| format!("right {r}"),
                || "neither".to_string(),
                |l, r| format!("both {l} {r}"),
            )
        };
        assert_eq!(describe(Pair::Neither), "neither");
        assert_eq!(describe(Pair::Left(1)), "left 1");
        assert_eq!(describe(Pair::Right(2)), "right 2");
        assert_eq!(describe(Pair::Both(1, 2)), "both 1 2");
    }

    #[test]
    fn bind_left_applies_wherever_a_left_payload_exists() {
        assert_eq!(Pair::Left(2).bind_left(|l| l * 10), Overlap::Left(20));
        assert_eq!(
            Pair::Both(2, 9).bind_left(|l| l * 10),
            Overlap::Both(20, 9)
        );
        assert_eq!(
            Pair::Right(9).bind_left(|l| l * 10),
            Overlap::Right(9)
        );
        assert_eq!(
            Pair::Neither.bind_left(|l| l * 10),
            Overlap::<i32, i32>::Neither
        );
    }

    #[test]
    fn bind_right_mirrors_bind_left() {
        assert_eq!(Pair::Right(3).bind_right(|r| r + 1), Overlap::Right(4));
        assert_eq!(
            Pair::Both(1, 3).bind_right(|r| r + 1),
            Overlap::Both(1, 4)
        );
        assert_eq!(Pair::Left(1).bind_right(|r| r + 1), Overlap::Left(1));
    }

    #[test]
    fn bind_both_lands_in_the_three_slot_sum() {
        let product = |l: i32, r: i32| l * r;

        assert_eq!(
            Pair::Both(2, 1000).bind_both(product),
            Sum3::of_slot1(2000)
        );
        assert_eq!(Pair::Left(1).bind_both(product), Sum3::of_slot2(1));
        assert_eq!(Pair::Right(10).bind_both(product), Sum3::of_slot3(10));
        assert!(Pair::Neither.bind_both(product).is_empty());
    }

    #[test]
    fn rendering_names_the_state() {
        assert_eq!(format!("{}", Pair::Both(1, 2)), "Both(1, 2)");
        assert_eq!(format!("{:?}", Pair::Left(1)), "Left(1)");
        assert_eq!(format!("{}", Pair::neither()), "Neither");
    }

    #[tokio::test]
    async fn async_match_selects_one_branch() {
        let out = Pair::Both(3, 4)
            .match_async(
                |_| async move { unreachable!() },
                |_| async move { unreachable!() },
                || async move { unreachable!() },
                |l, r| async move { l + r },
            )
            .await;
        assert_eq!(out, 7);
    }
}
