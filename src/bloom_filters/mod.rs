mod classical_bloom_filter;
mod params;
mod stats;

pub use self::classical_bloom_filter::BloomFilter;
pub use self::params::{FilterConfig, FilterParams};
pub use self::stats::FilterStats;
