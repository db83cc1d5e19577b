//! Canonical byte payloads for filter elements
//!
//! Every element is hashed through its payload, so the same logical value
//! must always produce the same bytes. Text and byte types use their raw
//! bytes; numbers (including a lone `u8`), `bool` and `char` use their
//! `Display` text.

use std::borrow::Cow;

/// A value that can be inserted into or queried against a filter
pub trait Element {
    /// Canonical byte representation of this element
    fn payload(&self) -> Cow<'_, [u8]>;
}

impl<T: Element + ?Sized> Element for &T {
    fn payload(&self) -> Cow<'_, [u8]> {
        (**self).payload()
    }
}

impl<T: Element + ?Sized> Element for Box<T> {
    fn payload(&self) -> Cow<'_, [u8]> {
        (**self).payload()
    }
}

impl Element for [u8] {
    fn payload(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl<const N: usize> Element for [u8; N] {
    fn payload(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl Element for Vec<u8> {
    fn payload(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl Element for str {
    fn payload(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl Element for String {
    fn payload(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

macro_rules! display_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Element for $ty {
                fn payload(&self) -> Cow<'_, [u8]> {
                    Cow::Owned(self.to_string().into_bytes())
                }
            }
        )*
    };
}

display_element!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char);
