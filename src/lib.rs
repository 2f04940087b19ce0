//! Classic Bloom filter: approximate set membership in a fixed bit array.
//!
//! A filter is sized from the number of elements the caller expects and the
//! false positive probability they accept. Lookups may report a key that was
//! never inserted, but never miss one that was.
//!
//! ```
//! use b_f::BloomFilter;
//!
//! let mut bf = BloomFilter::new(100, 0.01)?;
//! bf.insert("alice")?;
//!
//! assert!(bf.contains("alice"));
//! assert!(!bf.contains("mallory"));
//! println!("{}", bf.stats());
//! # Ok::<(), b_f::Error>(())
//! ```

mod bloom_filters;
mod error;
mod key;

pub use crate::bloom_filters::{BloomFilter, FilterConfig, FilterParams, FilterStats};
pub use crate::error::Error;
pub use crate::key::CanonicalKey;

pub type Result<T> = std::result::Result<T, Error>;
