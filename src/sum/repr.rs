//! The underlying representation of the [`Sum`] type.
//!
//! # Implementation details
//!
//! A sum is a hand-written tagged union over a recursive type list. The
//! memory layout of a populated sum resembles:
//!
//! ```rust,no_run
//! # use core::convert::Infallible;
//! # use core::mem::ManuallyDrop;
//!
//! struct Nil(Infallible);
//! union Cons<T, Next> {
//!     data: ManuallyDrop<T>,
//!     next: ManuallyDrop<Next>,
//! }
//!
//! // For example only. Not actually defined.
//! struct RawSum2<T1, T2> {
//!     tag: u8,
//!     data: Cons<T1, Cons<T2, Nil>>,
//! }
//! ```
//!
//! Unlike a plain tagged union, the storage of a `Sum` may also be entirely
//! uninitialized: the tag carries a reserved empty sentinel, and every
//! operation here is only ever invoked with a tag inside `0..ARITY`. The
//! [`Sum`] type screens out the empty state before calling in.
//!
//! [`Sum`]: crate::sum::Sum

use std::{convert::Infallible, mem::ManuallyDrop, ptr};

use super::index::{Index, UInt, UTerm};

/// The terminator type of the underlying union of the [`Sum`] type.
///
/// [`Sum`]: crate::sum::Sum
pub struct Nil(pub(super) Infallible);

/// The accumulator type of the underlying union of the [`Sum`] type.
///
/// [`Sum`]: crate::sum::Sum
pub union Cons<T, U> {
    pub(super) data: ManuallyDrop<T>,
    pub(super) next: ManuallyDrop<U>,
}

/// The trait that type lists implement to support the tagged-union
/// representation of the [`Sum`] type.
///
/// [`Sum`]: crate::sum::Sum
pub trait SumList {
    /// The underlying storage of the `Sum` type.
    type Repr;

    /// The number of slots in the type list.
    const ARITY: u8;

    /// Drops the payload selected by `tag` in place.
    ///
    /// # Safety
    ///
    /// `tag` must select the variant `this` was initialized with, and the
    /// payload must not be used afterwards.
    #[doc(hidden)]
    unsafe fn drop_in_place(this: &mut Self::Repr, tag: u8);
}

impl SumList for () {
    type Repr = Nil;

    const ARITY: u8 = 0;

    unsafe fn drop_in_place(_: &mut Nil, _: u8) {}
}

impl<Head, Tail> SumList for (Head, Tail)
where
    Tail: SumList,
{
    type Repr = Cons<Head, Tail::Repr>;

    const ARITY: u8 = 1 + Tail::ARITY;

    unsafe fn drop_in_place(this: &mut Self::Repr, tag: u8) {
        if tag == 0 {
            unsafe { ManuallyDrop::drop(&mut this.data) }
        } else {
            unsafe { Tail::drop_in_place(&mut this.next, tag - 1) }
        }
    }
}

/// The trait that type lists implement to support manipulating the variant
/// value selected by the index `U` in the [`Sum`] type.
///
/// [`Sum`]: crate::sum::Sum
pub trait Split<T, U: Index>: SumList {
    /// The remainder type list from splitting `Self` at the slot indexed by
    /// `U`.
    type Remainder: SumList;

    /// The type list obtained by substituting `T2` for the slot indexed by
    /// `U` in `Self`.
    type Substitute<T2>: Split<T2, U>;

    #[doc(hidden)]
    fn from_data(data: T) -> Self::Repr;

    #[doc(hidden)]
    unsafe fn into_data_unchecked(this: Self::Repr) -> T;

    #[doc(hidden)]
    fn as_ptr(this: &Self::Repr) -> *const T;

    #[doc(hidden)]
    fn as_mut_ptr(this: &mut Self::Repr) -> *mut T;

    /// `Ok` when `tag` selects the slot indexed by `U`; otherwise the tag
    /// renumbered into the remainder list's tag space.
    #[doc(hidden)]
    fn try_unwrap(tag: u8) -> Result<(), u8>;

    /// Moves the storage of a non-`U` variant into the remainder repr.
    ///
    /// # Safety
    ///
    /// `tag` must select the variant `this` was initialized with, and must
    /// not select the slot indexed by `U`.
    #[doc(hidden)]
    unsafe fn remainder_repr(this: Self::Repr, tag: u8) -> <Self::Remainder as SumList>::Repr;

    /// Moves the storage of a non-`U` variant into the substituted repr.
    ///
    /// # Safety
    ///
    /// `tag` must select the variant `this` was initialized with, and must
    /// not select the slot indexed by `U`.
    #[doc(hidden)]
    unsafe fn substitute_repr<T2>(
        this: Self::Repr,
        tag: u8,
    ) -> <Self::Substitute<T2> as SumList>::Repr;
}

impl<Head, Tail> Split<Head, UTerm> for (Head, Tail)
where
    Tail: SumList,
{
    type Remainder = Tail;
    type Substitute<T2> = (T2, Tail);

    fn from_data(data: Head) -> Self::Repr {
        Cons { data: ManuallyDrop::new(data) }
    }

    unsafe fn into_data_unchecked(this: Self::Repr) -> Head {
        unsafe { ManuallyDrop::into_inner(this.data) }
    }

    fn as_ptr(this: &Self::Repr) -> *const Head {
        let ptr = ptr::addr_of!(this.data).cast::<Head>();
        debug_assert_eq!(ptr.cast(), this as _);
        ptr
    }

    fn as_mut_ptr(this: &mut Self::Repr) -> *mut Head {
        let ptr = ptr::addr_of_mut!(this.data).cast::<Head>();
        debug_assert_eq!(ptr.cast(), this as _);
        ptr
    }

    fn try_unwrap(tag: u8) -> Result<(), u8> {
        match tag.checked_sub(1) {
            None => Ok(()),
            Some(tag) => Err(tag),
        }
    }

    unsafe fn remainder_repr(this: Self::Repr, tag: u8) -> Tail::Repr {
        debug_assert_ne!(tag, 0);
        unsafe { ManuallyDrop::into_inner(this.next) }
    }

    unsafe fn substitute_repr<T2>(this: Self::Repr, tag: u8) -> Cons<T2, Tail::Repr> {
        debug_assert_ne!(tag, 0);
        Cons { next: unsafe { this.next } }
    }
}

impl<Head, Tail, T, U: Index> Split<T, UInt<U>> for (Head, Tail)
where
    Tail: Split<T, U>,
{
    type Remainder = (Head, <Tail as Split<T, U>>::Remainder);
    type Substitute<T2> = (Head, Tail::Substitute<T2>);

    fn from_data(data: T) -> Self::Repr {
        Cons {
            next: ManuallyDrop::new(Tail::from_data(data)),
        }
    }

    unsafe fn into_data_unchecked(this: Self::Repr) -> T {
        unsafe { Tail::into_data_unchecked(ManuallyDrop::into_inner(this.next)) }
    }

    fn as_ptr(this: &Self::Repr) -> *const T {
        let ptr = unsafe { Tail::as_ptr(&this.next) };
        debug_assert_eq!(ptr.cast(), this as _);
        ptr
    }

    fn as_mut_ptr(this: &mut Self::Repr) -> *mut T {
        let ptr = unsafe { Tail::as_mut_ptr(&mut this.next) };
        debug_assert_eq!(ptr.cast(), this as _);
        ptr
    }

    fn try_unwrap(tag: u8) -> Result<(), u8> {
        let cur = UInt::<U>::TAG;
        match tag.cmp(&cur) {
            std::cmp::Ordering::Equal => Ok(()),
            std::cmp::Ordering::Less => Err(tag),
            std::cmp::Ordering::Greater => Err(tag - 1),
        }
    }

    unsafe fn remainder_repr(
        this: Self::Repr,
        tag: u8,
    ) -> <Self::Remainder as SumList>::Repr {
        if tag == 0 {
            Cons { data: unsafe { this.data } }
        } else {
            let next = unsafe { ManuallyDrop::into_inner(this.next) };
            Cons {
                next: ManuallyDrop::new(unsafe { Tail::remainder_repr(next, tag - 1) }),
            }
        }
    }

    unsafe fn substitute_repr<T2>(
        this: Self::Repr,
        tag: u8,
    ) -> <Self::Substitute<T2> as SumList>::Repr {
        if tag == 0 {
            Cons { data: unsafe { this.data } }
        } else {
            let next = unsafe { ManuallyDrop::into_inner(this.next) };
            Cons {
                next: ManuallyDrop::new(unsafe { Tail::substitute_repr::<T2>(next, tag - 1) }),
            }
        }
    }
}
