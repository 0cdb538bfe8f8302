#![doc = include_str!("../README.md")]
#![deny(future_incompatible)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

mod error;
mod fallible;
mod macros;
mod maybe;
mod overlap;
pub mod sum;

pub use self::{
    error::{ErrorInfo, UnwrapOnErr, VariantError},
    fallible::Fallible,
    maybe::Maybe,
    overlap::Overlap,
    sum::{Rem, Repr, Substitute, Sum, Sum1, Sum2, Sum3, Sum4, Sum5, Sum6, Sum7, Sum8},
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_macro_builds_the_type_list_form() {
        let s: Sum![u32, String, bool] = Sum::new(true);
        assert_eq!(s.slot(), Some(3));

        let one: Sum1<u32> = 7.into();
        assert_eq!(one.get::<u32, _>(), Some(&7));
    }

    #[test]
    fn inspect_sees_only_the_active_slot() {
        let mut seen = None;
        let s = Sum2::<u32, String>::of_slot1(5u32).inspect(|v: &u32| seen = Some(*v));
        assert_eq!(seen, Some(5));

        let mut touched = false;
        let s2 = s.inspect(|_: &String| touched = true);
        assert!(!touched);
        assert_eq!(s2.slot(), Some(1));
    }

    #[test]
    fn specializations_share_the_collapsing_rule() {
        assert!(Maybe::<u32>::some(None).is_none());
        assert!(Sum4::<u8, u8, u8, u8>::of_slot3(None).is_empty());
        assert!(Overlap::<u8, u8>::left(None).is_neither());
    }
}
