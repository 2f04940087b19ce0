//! Canonical byte views of filter keys.
//!
//! Every key is hashed through the bytes returned by
//! [`CanonicalKey::canonical_bytes`]. Two keys that should be the same
//! member must produce the same bytes, and two keys that should differ must
//! not. Types that cannot guarantee that for some values report
//! [`Error::Serialization`] for those values instead of hashing them.

use std::borrow::Cow;

use crate::error::Error;
use crate::Result;

/// A type with a stable, unambiguous byte representation.
///
/// Implement this for your own key types by returning the bytes that
/// identify a value. Integers are encoded big-endian, text as UTF-8.
///
/// ```
/// use std::borrow::Cow;
/// use b_f::{BloomFilter, CanonicalKey};
///
/// struct UserId(u64);
///
/// impl CanonicalKey for UserId {
///     fn canonical_bytes(&self) -> b_f::Result<Cow<'_, [u8]>> {
///         self.0.canonical_bytes()
///     }
/// }
///
/// let mut bf = BloomFilter::new(100, 0.01).unwrap();
/// bf.insert(&UserId(7)).unwrap();
/// assert!(bf.contains(&UserId(7)));
/// ```
pub trait CanonicalKey {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>>;
}

impl CanonicalKey for [u8] {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl<const N: usize> CanonicalKey for [u8; N] {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl CanonicalKey for Vec<u8> {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl CanonicalKey for str {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

impl CanonicalKey for String {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

macro_rules! impl_canonical_key_for_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl CanonicalKey for $t {
                fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>> {
                    Ok(Cow::Owned(self.to_be_bytes().to_vec()))
                }
            }
        )*
    };
}

impl_canonical_key_for_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl CanonicalKey for bool {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Owned(vec![u8::from(*self)]))
    }
}

impl CanonicalKey for char {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Owned(u32::from(*self).to_be_bytes().to_vec()))
    }
}

// NaN has many bit patterns and is not equal to itself, so it is rejected.
// Negative zero compares equal to zero and shares its encoding.
macro_rules! impl_canonical_key_for_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl CanonicalKey for $t {
                fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>> {
                    if self.is_nan() {
                        return Err(Error::Serialization(format!(
                            "{} NaN has no canonical form",
                            stringify!($t)
                        )));
                    }
                    let value = if *self == 0.0 { 0.0 } else { *self };
                    Ok(Cow::Owned(value.to_bits().to_be_bytes().to_vec()))
                }
            }
        )*
    };
}

impl_canonical_key_for_float!(f32, f64);

impl<T: CanonicalKey + ?Sized> CanonicalKey for &T {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>> {
        (**self).canonical_bytes()
    }
}

impl<T: CanonicalKey + ?Sized> CanonicalKey for Box<T> {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>> {
        (**self).canonical_bytes()
    }
}
