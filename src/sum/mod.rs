//! The generic sum-type engine.
//!
//! [`Sum<S>`] holds up to eight independently-typed payload slots described
//! by a recursive type list `S`, of which at most one is active at a time.
//! The runtime tag is the single source of truth: inactive slot storage is
//! uninitialized and never read. A reserved sentinel marks the empty sum,
//! the state every collapsing constructor degrades to when handed an absent
//! payload.
//!
//! The per-arity surfaces ([`Sum1`] through [`Sum8`]) are thin generated
//! wrappers over this module; all slot bookkeeping lives in the engine,
//! once, regardless of arity.

use std::{
    fmt,
    hash::{Hash, Hasher},
    mem::{ManuallyDrop, MaybeUninit},
};

mod arity;
mod derive;
pub mod index;
pub mod repr;

pub use self::arity::{Sum1, Sum2, Sum3, Sum4, Sum5, Sum6, Sum7, Sum8};
use self::{
    derive::{SumClone, SumDebug, SumDisplay, SumHash, SumPartialEq},
    index::Index,
};
use crate::error::VariantError;

/// The storage type of a sum over the type list `S`.
pub type Repr<S> = <S as repr::SumList>::Repr;

/// The type list remaining after extracting the slot indexed by `U` from
/// `S`.
pub type Rem<S, T, U> = <S as repr::Split<T, U>>::Remainder;

/// The type list obtained by substituting `T2` for the slot of type `T`
/// indexed by `U` in `S`.
pub type Substitute<S, T, T2, U> = <S as repr::Split<T, U>>::Substitute<T2>;

/// The reserved tag of the empty sum. Slots occupy `0..ARITY`.
const TAG_EMPTY: u8 = u8::MAX;

/// A sum value over the type list `S`: either one active slot or empty.
///
/// Construct one through the per-arity collapsing factories
/// (`of_slot1`..`of_slotN`), through [`Sum::new`] when the payload is known
/// present, or through [`Sum::empty`]. Consume it through the per-arity
/// `match_with` family, [`Sum::bind`], or [`Sum::extract`]; no payload is
/// reachable without going through the tag.
///
/// # Examples
///
/// ```rust
/// use tagsum::Sum2;
///
/// let s = Sum2::<u32, String>::of_slot1(7);
/// assert_eq!(s.get::<u32, _>(), Some(&7));
///
/// let none = Sum2::<u32, String>::of_slot1(None);
/// assert!(none.is_empty());
/// ```
pub struct Sum<S: repr::SumList> {
    tag: u8,
    data: MaybeUninit<Repr<S>>,
}

impl<S: repr::SumList> Sum<S> {
    /// The empty sum. Every collapsing constructor degrades to this value
    /// when the payload is absent.
    pub fn empty() -> Self {
        Sum {
            tag: TAG_EMPTY,
            data: MaybeUninit::uninit(),
        }
    }

    /// Constructs the sum with the slot indexed by `U` active.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tagsum::{Sum, T};
    ///
    /// let s: Sum<T![u32, String]> = Sum::new("hi".to_string());
    /// assert_eq!(s.slot(), Some(2));
    /// ```
    pub fn new<T, U>(value: T) -> Self
    where
        S: repr::Split<T, U>,
        U: Index,
    {
        debug_assert!(U::TAG < <S as repr::SumList>::ARITY);
        Sum {
            tag: U::TAG,
            data: MaybeUninit::new(S::from_data(value)),
        }
    }

    /// Collapsing construction: a present payload activates the slot indexed
    /// by `U`, an absent one yields the empty sum.
    pub fn of<T, U>(value: Option<T>) -> Self
    where
        S: repr::Split<T, U>,
        U: Index,
    {
        match value {
            Some(value) => Self::new(value),
            None => Self::empty(),
        }
    }

    /// Whether no slot is active.
    pub fn is_empty(&self) -> bool {
        self.tag == TAG_EMPTY
    }

    /// The 1-based index of the active slot, or `None` for the empty sum.
    pub fn slot(&self) -> Option<u8> {
        (!self.is_empty()).then(|| self.tag + 1)
    }

    /// Borrows the payload of the slot indexed by `U`, when it is the
    /// active one.
    pub fn get<T, U>(&self) -> Option<&T>
    where
        S: repr::Split<T, U>,
        U: Index,
    {
        (self.tag == U::TAG).then(|| unsafe { &*S::as_ptr(self.data.assume_init_ref()) })
    }

    /// Mutably borrows the payload of the slot indexed by `U`, when it is
    /// the active one. The tag itself is never mutable.
    pub fn get_mut<T, U>(&mut self) -> Option<&mut T>
    where
        S: repr::Split<T, U>,
        U: Index,
    {
        (self.tag == U::TAG).then(|| unsafe { &mut *S::as_mut_ptr(self.data.assume_init_mut()) })
    }

    /// Runs `f` on the payload of the slot indexed by `U` when it is
    /// active; any other state passes through untouched.
    pub fn inspect<T, U, F>(self, f: F) -> Self
    where
        S: repr::Split<T, U>,
        U: Index,
        F: FnOnce(&T),
    {
        if let Some(value) = self.get() {
            f(value);
        }
        self
    }

    pub(crate) fn tag(&self) -> u8 {
        self.tag
    }

    pub(crate) unsafe fn into_slot_unchecked<T, U>(self) -> T
    where
        S: repr::Split<T, U>,
        U: Index,
    {
        debug_assert_eq!(self.tag, U::TAG);
        let this = ManuallyDrop::new(self);
        unsafe { S::into_data_unchecked(this.data.assume_init_read()) }
    }

    /// Removes the slot indexed by `U` from the sum: its payload when
    /// active, otherwise the sum narrowed to the remaining slots. The empty
    /// sum stays empty under the narrowed list.
    pub fn extract<T, U>(self) -> Result<T, Sum<Rem<S, T, U>>>
    where
        S: repr::Split<T, U>,
        U: Index,
    {
        let this = ManuallyDrop::new(self);
        if this.tag == TAG_EMPTY {
            return Err(Sum::empty());
        }
        match S::try_unwrap(this.tag) {
            Ok(()) => Ok(unsafe { S::into_data_unchecked(this.data.assume_init_read()) }),
            Err(tag) => Err(Sum {
                tag,
                data: MaybeUninit::new(unsafe {
                    S::remainder_repr(this.data.assume_init_read(), this.tag)
                }),
            }),
        }
    }

    /// Rewrites the slot indexed by `U`: an active payload goes through `f`
    /// and is re-wrapped under the substituted type list; any other active
    /// slot passes through unchanged under the new signature; the empty sum
    /// propagates.
    ///
    /// Binding the identity function is a no-op for every tag.
    ///
    /// The closure is a named type parameter rather than `impl Trait` so
    /// that callers can select the slot index with a turbofish.
    pub fn bind<T, Out, U, F>(self, f: F) -> Sum<Substitute<S, T, Out, U>>
    where
        S: repr::Split<T, U>,
        U: Index,
        F: FnOnce(T) -> Out,
    {
        let this = ManuallyDrop::new(self);
        let tag = this.tag;
        if tag == TAG_EMPTY {
            return Sum::empty();
        }
        match S::try_unwrap(tag) {
            Ok(()) => {
                let value = f(unsafe { S::into_data_unchecked(this.data.assume_init_read()) });
                Sum::new::<Out, U>(value)
            }
            Err(_) => Sum {
                tag,
                data: MaybeUninit::new(unsafe {
                    S::substitute_repr::<Out>(this.data.assume_init_read(), tag)
                }),
            },
        }
    }

    /// The suspending form of [`Sum::bind`]. The continuation is created
    /// and awaited only when the slot indexed by `U` is the active one.
    pub async fn bind_async<T, Out, U, Fut, F>(self, f: F) -> Sum<Substitute<S, T, Out, U>>
    where
        S: repr::Split<T, U>,
        U: Index,
        Fut: std::future::Future<Output = Out>,
        F: FnOnce(T) -> Fut,
    {
        let this = ManuallyDrop::new(self);
        let tag = this.tag;
        if tag == TAG_EMPTY {
            return Sum::empty();
        }
        match S::try_unwrap(tag) {
            Ok(()) => {
                let value = f(unsafe { S::into_data_unchecked(this.data.assume_init_read()) });
                Sum::new::<Out, U>(value.await)
            }
            Err(_) => Sum {
                tag,
                data: MaybeUninit::new(unsafe {
                    S::substitute_repr::<Out>(this.data.assume_init_read(), tag)
                }),
            },
        }
    }
}

/// The failure path of a branchless match: an empty sum without an empty
/// branch is a programming-contract violation, and a tag outside the closed
/// set is a corrupted invariant. Neither is recoverable.
pub(crate) fn no_active_slot(type_args: &'static str, tag: u8) -> ! {
    if tag == TAG_EMPTY {
        panic!("{}", VariantError::empty_match(type_args));
    }
    unreachable!("{}", VariantError::corrupt_tag(type_args, tag));
}

impl<T> From<T> for Sum<(T, ())> {
    /// Constructs a single-slot sum from a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tagsum::Sum1;
    ///
    /// let s: Sum1<i32> = 42.into();
    /// assert_eq!(s.get::<i32, _>(), Some(&42));
    /// ```
    fn from(value: T) -> Self {
        Sum::new(value)
    }
}

impl<S: repr::SumList> Default for Sum<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: repr::SumList> Drop for Sum<S> {
    fn drop(&mut self) {
        if self.tag != TAG_EMPTY {
            unsafe { S::drop_in_place(self.data.assume_init_mut(), self.tag) }
        }
    }
}

impl<S: SumClone> Clone for Sum<S> {
    fn clone(&self) -> Self {
        if self.is_empty() {
            return Self::empty();
        }
        Sum {
            tag: self.tag,
            data: MaybeUninit::new(unsafe { S::clone(self.data.assume_init_ref(), self.tag) }),
        }
    }
}

impl<S: SumPartialEq> PartialEq for Sum<S> {
    /// Tags first, then the active payloads by their own equality. All
    /// empty sums of one shape are equal regardless of unread storage.
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && (self.is_empty()
                || unsafe {
                    S::eq(
                        self.data.assume_init_ref(),
                        other.data.assume_init_ref(),
                        self.tag,
                    )
                })
    }
}

impl<S: SumPartialEq + Eq> Eq for Sum<S> {}

impl<S: SumHash> Hash for Sum<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
        if !self.is_empty() {
            unsafe { S::hash(self.data.assume_init_ref(), self.tag, state) }
        }
    }
}

impl<S: SumDebug> fmt::Debug for Sum<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Empty");
        }
        write!(f, "Slot{}(", self.tag + 1)?;
        unsafe { S::debug(self.data.assume_init_ref(), self.tag, f)? };
        f.write_str(")")
    }
}

impl<S: SumDisplay> fmt::Display for Sum<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Empty");
        }
        write!(f, "Slot{}(", self.tag + 1)?;
        unsafe { S::display(self.data.assume_init_ref(), self.tag, f)? };
        f.write_str(")")
    }
}
