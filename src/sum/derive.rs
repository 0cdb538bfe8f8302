//! Tag-dispatched structural operations over the union storage.
//!
//! Each trait here recurses over the type list and dispatches on the runtime
//! tag to reach the one initialized payload. All entry points are `unsafe`:
//! the caller must pass a tag that selects the variant the storage was
//! initialized with. The empty state never reaches these traits.

use std::{
    fmt,
    hash::{Hash, Hasher},
    mem::ManuallyDrop,
};

use super::repr::{Cons, Nil, SumList};

/// Structural equality of two storages carrying the same tag.
pub trait SumPartialEq: SumList {
    unsafe fn eq(lhs: &Self::Repr, rhs: &Self::Repr, tag: u8) -> bool;
}

impl SumPartialEq for () {
    unsafe fn eq(_: &Nil, _: &Nil, _: u8) -> bool {
        unreachable!("a zero-arity sum has no active slot")
    }
}

impl<Head, Tail> SumPartialEq for (Head, Tail)
where
    Head: PartialEq,
    Tail: SumPartialEq,
{
    unsafe fn eq(lhs: &Cons<Head, Tail::Repr>, rhs: &Cons<Head, Tail::Repr>, tag: u8) -> bool {
        if tag == 0 {
            unsafe { *lhs.data == *rhs.data }
        } else {
            unsafe { Tail::eq(&lhs.next, &rhs.next, tag - 1) }
        }
    }
}

/// Structural clone of the payload selected by the tag.
pub trait SumClone: SumList {
    unsafe fn clone(this: &Self::Repr, tag: u8) -> Self::Repr;
}

impl SumClone for () {
    unsafe fn clone(_: &Nil, _: u8) -> Nil {
        unreachable!("a zero-arity sum has no active slot")
    }
}

impl<Head, Tail> SumClone for (Head, Tail)
where
    Head: Clone,
    Tail: SumClone,
{
    unsafe fn clone(this: &Cons<Head, Tail::Repr>, tag: u8) -> Cons<Head, Tail::Repr> {
        if tag == 0 {
            Cons {
                data: ManuallyDrop::new(unsafe { (*this.data).clone() }),
            }
        } else {
            Cons {
                next: ManuallyDrop::new(unsafe { Tail::clone(&this.next, tag - 1) }),
            }
        }
    }
}

/// Structural hash of the payload selected by the tag.
pub trait SumHash: SumList {
    unsafe fn hash<H: Hasher>(this: &Self::Repr, tag: u8, state: &mut H);
}

impl SumHash for () {
    unsafe fn hash<H: Hasher>(_: &Nil, _: u8, _: &mut H) {
        unreachable!("a zero-arity sum has no active slot")
    }
}

impl<Head, Tail> SumHash for (Head, Tail)
where
    Head: Hash,
    Tail: SumHash,
{
    unsafe fn hash<H: Hasher>(this: &Cons<Head, Tail::Repr>, tag: u8, state: &mut H) {
        if tag == 0 {
            unsafe { (*this.data).hash(state) }
        } else {
            unsafe { Tail::hash(&this.next, tag - 1, state) }
        }
    }
}

/// Debug rendering of the payload selected by the tag.
pub trait SumDebug: SumList {
    unsafe fn debug(this: &Self::Repr, tag: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl SumDebug for () {
    unsafe fn debug(_: &Nil, _: u8, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        unreachable!("a zero-arity sum has no active slot")
    }
}

impl<Head, Tail> SumDebug for (Head, Tail)
where
    Head: fmt::Debug,
    Tail: SumDebug,
{
    unsafe fn debug(
        this: &Cons<Head, Tail::Repr>,
        tag: u8,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if tag == 0 {
            write!(f, "{:?}", unsafe { &*this.data })
        } else {
            unsafe { Tail::debug(&this.next, tag - 1, f) }
        }
    }
}

/// Display rendering of the payload selected by the tag.
pub trait SumDisplay: SumList {
    unsafe fn display(this: &Self::Repr, tag: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl SumDisplay for () {
    unsafe fn display(_: &Nil, _: u8, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        unreachable!("a zero-arity sum has no active slot")
    }
}

impl<Head, Tail> SumDisplay for (Head, Tail)
where
    Head: fmt::Display,
    Tail: SumDisplay,
{
    unsafe fn display(
        this: &Cons<Head, Tail::Repr>,
        tag: u8,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if tag == 0 {
            write!(f, "{}", unsafe { &*this.data })
        } else {
            unsafe { Tail::display(&this.next, tag - 1, f) }
        }
    }
}
