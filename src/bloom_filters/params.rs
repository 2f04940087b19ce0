use std::f64::consts::LN_2;

use serde::{Deserialize, Serialize};

use crate::bloom_filters::BloomFilter;
use crate::error::Error;
use crate::Result;

/// Validated sizing of a Bloom filter.
///
/// Both derived values are rounded up: the bit count is
/// `ceil(-n * ln(p) / ln(2)^2)` and the hash count is `ceil(m / n * ln(2))`,
/// each clamped to at least 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterParams {
    capacity: usize,
    false_positive_probability: f64,
    bit_count: usize,
    hash_count: usize,
}

impl FilterParams {
    /// n -- number of elements the caller expects to insert
    /// p -- the false positive rate to size for, in (0, 1)
    pub fn new(capacity: usize, false_positive_probability: f64) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::invalid_parameter("capacity", "must be at least 1, got 0"));
        }
        // written so that NaN fails as well
        if !(false_positive_probability > 0.0 && false_positive_probability < 1.0) {
            return Err(Error::invalid_parameter(
                "false_positive_probability",
                format!("must be in the open interval (0, 1), got {false_positive_probability}"),
            ));
        }

        let bit_count = optimal_bit_count(capacity, false_positive_probability)?;
        let hash_count = optimal_hash_count(bit_count, capacity);

        Ok(Self {
            capacity,
            false_positive_probability,
            bit_count,
            hash_count,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn false_positive_probability(&self) -> f64 {
        self.false_positive_probability
    }

    /// m, the size of the bit array.
    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    /// k, the number of probes per key.
    pub fn hash_count(&self) -> usize {
        self.hash_count
    }
}

// m = -(n ln ε / (ln2)^2) where ε is the desired false positive probability
fn optimal_bit_count(n: usize, p: f64) -> Result<usize> {
    let m = (-(n as f64) * p.ln() / LN_2.powi(2)).ceil();
    if !m.is_finite() || m >= usize::MAX as f64 {
        return Err(Error::invalid_parameter(
            "capacity",
            format!("a filter for {n} elements at p={p} needs more bits than can be addressed"),
        ));
    }
    Ok((m as usize).max(1))
}

// k = m/n * ln2
fn optimal_hash_count(m: usize, n: usize) -> usize {
    ((m as f64 / n as f64) * LN_2).ceil().max(1.0) as usize
}

/// Serde-friendly description of a filter, for embedding in application config.
///
/// ```
/// let config: b_f::FilterConfig =
///     serde_json::from_str(r#"{"capacity": 1000, "false_positive_probability": 0.01}"#).unwrap();
/// let bf = config.build().unwrap();
/// assert_eq!(bf.bit_count(), 9586);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    pub capacity: usize,
    pub false_positive_probability: f64,
}

impl FilterConfig {
    pub fn params(&self) -> Result<FilterParams> {
        FilterParams::new(self.capacity, self.false_positive_probability)
    }

    pub fn build(&self) -> Result<BloomFilter> {
        self.params().map(BloomFilter::from_params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn reference_sizing() {
        let params = FilterParams::new(1000, 0.01).unwrap();
        assert_eq!(params.bit_count(), 9586);
        assert_eq!(params.hash_count(), 7);
    }

    #[rstest]
    #[case(100, 0.01, 959, 7)]
    #[case(10, 0.01, 96, 7)]
    #[case(1, 0.5, 2, 2)]
    #[case(1, 0.9, 1, 1)]
    fn derived_sizes(
        #[case] n: usize,
        #[case] p: f64,
        #[case] m: usize,
        #[case] k: usize,
    ) {
        let params = FilterParams::new(n, p).unwrap();
        assert_eq!(params.bit_count(), m);
        assert_eq!(params.hash_count(), k);
    }

    #[rstest]
    #[case::zero_capacity(0, 0.01, "capacity")]
    #[case::p_above_one(10, 1.5, "false_positive_probability")]
    #[case::p_one(10, 1.0, "false_positive_probability")]
    #[case::p_zero(10, 0.0, "false_positive_probability")]
    #[case::p_negative(10, -0.1, "false_positive_probability")]
    #[case::p_nan(10, f64::NAN, "false_positive_probability")]
    fn rejects_out_of_range(#[case] n: usize, #[case] p: f64, #[case] expected: &str) {
        match FilterParams::new(n, p) {
            Err(Error::InvalidParameter { name, .. }) => assert_eq!(name, expected),
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unaddressable_bit_count() {
        let err = FilterParams::new(usize::MAX, 1e-300).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "capacity", .. }));
    }

    #[test]
    fn config_from_json() {
        let config: FilterConfig =
            serde_json::from_str(r#"{"capacity": 100, "false_positive_probability": 0.01}"#).unwrap();
        assert_eq!(config.params().unwrap(), FilterParams::new(100, 0.01).unwrap());

        let bad: FilterConfig =
            serde_json::from_str(r#"{"capacity": 0, "false_positive_probability": 0.01}"#).unwrap();
        assert!(bad.build().is_err());

        let unknown = serde_json::from_str::<FilterConfig>(
            r#"{"capacity": 1, "false_positive_probability": 0.1, "shards": 4}"#,
        );
        assert!(unknown.is_err());
    }
}
