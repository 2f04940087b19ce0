use bit_vec::BitVec;
use tracing::{debug, trace, warn};
use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::bloom_filters::{FilterParams, FilterStats};
use crate::key::CanonicalKey;
use crate::Result;

/// Classic Bloom filter over a single bit array.
///
/// Sized once from the expected number of elements and the target false
/// positive probability. Keys go through [`CanonicalKey`], each key sets
/// or probes `k` bits and nothing is ever unset.
///
/// ```
/// use b_f::BloomFilter;
///
/// let mut bf = BloomFilter::new(1000, 0.01).unwrap();
/// bf.insert("apple").unwrap();
/// bf.insert(&42u64).unwrap();
///
/// assert!(bf.contains("apple"));
/// assert!(bf.contains(&42u64));
/// assert_eq!(bf.elements_added(), 2);
/// ```
///
/// The filter has no internal locking; wrap it in a `Mutex` to share it
/// between threads.
#[derive(Clone, Debug)]
pub struct BloomFilter {
    params: FilterParams,

    storage: BitVec,
    // number of set bits in storage
    bits_set: usize,
    // insert calls, duplicates included
    elements_added: u64,
}

impl BloomFilter {
    /// n -- number of elements to insert
    /// f -- the false positive rate
    pub fn new(n: usize, f: f64) -> Result<Self> {
        FilterParams::new(n, f).map(Self::from_params)
    }

    pub fn from_params(params: FilterParams) -> Self {
        debug!(
            capacity = params.capacity(),
            false_positive_probability = params.false_positive_probability(),
            bit_count = params.bit_count(),
            hash_count = params.hash_count(),
            "Created bloom filter"
        );
        Self {
            storage: BitVec::from_elem(params.bit_count(), false),
            params,
            bits_set: 0,
            elements_added: 0,
        }
    }

    /// Adds `key` to the set.
    ///
    /// Fails only when the key has no canonical form, in which case the
    /// filter is left untouched.
    pub fn insert<K: CanonicalKey + ?Sized>(&mut self, key: &K) -> Result<()> {
        let bytes = key
            .canonical_bytes()
            .inspect_err(|err| trace!(%err, "Rejected key on insert"))?;
        self.insert_bytes(&bytes);
        Ok(())
    }

    /// Adds an already canonical byte string to the set.
    pub fn insert_bytes(&mut self, value: &[u8]) {
        let m = self.params.bit_count();
        for seed in 0..self.params.hash_count() as u64 {
            let idx = bit_index(value, seed, m);
            if self.storage.get(idx) == Some(false) {
                self.storage.set(idx, true);
                self.bits_set += 1;
            }
        }

        self.elements_added += 1;
        if self.elements_added - 1 == self.params.capacity() as u64 {
            warn!(
                capacity = self.params.capacity(),
                false_positive_probability = self.params.false_positive_probability(),
                "Insert count exceeded configured capacity, false positive rate will exceed its target"
            );
        }
    }

    /// `false` means `key` was never inserted. `true` means it probably was.
    ///
    /// A key without a canonical form cannot have been inserted and is
    /// reported absent; use [`try_contains`](Self::try_contains) to see the
    /// error instead.
    pub fn contains<K: CanonicalKey + ?Sized>(&self, key: &K) -> bool {
        self.try_contains(key).unwrap_or(false)
    }

    pub fn try_contains<K: CanonicalKey + ?Sized>(&self, key: &K) -> Result<bool> {
        let bytes = key
            .canonical_bytes()
            .inspect_err(|err| trace!(%err, "Rejected key on lookup"))?;
        Ok(self.contains_bytes(&bytes))
    }

    pub fn contains_bytes(&self, value: &[u8]) -> bool {
        let m = self.params.bit_count();
        for seed in 0..self.params.hash_count() as u64 {
            if self.storage.get(bit_index(value, seed, m)) == Some(false) {
                return false;
            }
        }
        true
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    pub fn capacity(&self) -> usize {
        self.params.capacity()
    }

    pub fn false_positive_probability(&self) -> f64 {
        self.params.false_positive_probability()
    }

    pub fn bit_count(&self) -> usize {
        self.params.bit_count()
    }

    pub fn hash_count(&self) -> usize {
        self.params.hash_count()
    }

    pub fn elements_added(&self) -> u64 {
        self.elements_added
    }

    pub fn bits_set(&self) -> usize {
        self.bits_set
    }

    /// Fraction of the bit array that is set.
    pub fn fill_ratio(&self) -> f64 {
        self.bits_set as f64 / self.params.bit_count() as f64
    }

    /// `fill_ratio ^ k`: the chance that a key never inserted finds all of
    /// its bits set right now.
    pub fn current_false_positive_probability(&self) -> f64 {
        self.fill_ratio().powi(self.params.hash_count() as i32)
    }

    /// `(1 - e^(-k * inserted / m)) ^ k`, the textbook estimate from the
    /// insert count alone.
    pub fn expected_false_positive_probability(&self) -> f64 {
        if self.elements_added == 0 {
            return 0.0;
        }
        let k = self.params.hash_count() as f64;
        let m = self.params.bit_count() as f64;
        (1.0 - (-k * self.elements_added as f64 / m).exp()).powi(self.params.hash_count() as i32)
    }

    /// Inserts performed relative to the configured capacity.
    pub fn load_factor(&self) -> f64 {
        self.elements_added as f64 / self.params.capacity() as f64
    }

    pub fn memory_bytes(&self) -> usize {
        self.params.bit_count().div_ceil(8)
    }

    pub fn stats(&self) -> FilterStats {
        FilterStats {
            capacity: self.params.capacity(),
            false_positive_probability: self.params.false_positive_probability(),
            bit_count: self.params.bit_count(),
            hash_count: self.params.hash_count(),
            elements_added: self.elements_added,
            bits_set: self.bits_set,
            fill_ratio: self.fill_ratio(),
            current_false_positive_probability: self.current_false_positive_probability(),
            expected_false_positive_probability: self.expected_false_positive_probability(),
            load_factor: self.load_factor(),
            memory_bytes: self.memory_bytes(),
        }
    }
}

// seed is the probe number in 0..k
fn bit_index(value: &[u8], seed: u64, m: usize) -> usize {
    (xxh3_64_with_seed(value, seed) % m as u64) as usize
}
