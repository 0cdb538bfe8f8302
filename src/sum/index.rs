//! Type-level slot indices.
//!
//! A [`Sum`](crate::Sum) addresses its slots by a compile-time index so that
//! two slots of the same payload type stay distinguishable. The index ladder
//! is the usual Peano encoding; [`Index::TAG`] is its runtime image and is
//! what ends up in the tag byte of a constructed sum.

#![allow(missing_docs)]

use std::marker::PhantomData;

/// The zero index.
pub struct UTerm;

/// The successor of the index `U`.
pub struct UInt<U>(PhantomData<U>);

/// A type-level slot index with its runtime tag value.
pub trait Index {
    /// The runtime tag of this index.
    const TAG: u8;
}

impl Index for UTerm {
    const TAG: u8 = 0;
}

impl<U: Index> Index for UInt<U> {
    const TAG: u8 = 1 + U::TAG;
}

pub type U0 = UTerm;
pub type U1 = UInt<U0>;
pub type U2 = UInt<U1>;
pub type U3 = UInt<U2>;
pub type U4 = UInt<U3>;
pub type U5 = UInt<U4>;
pub type U6 = UInt<U5>;
pub type U7 = UInt<U6>;
