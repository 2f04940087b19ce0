use std::fmt;

use serde::Serialize;

/// Point-in-time statistics of a [`BloomFilter`](crate::BloomFilter).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FilterStats {
    /// configured n
    pub capacity: usize,
    /// configured p
    pub false_positive_probability: f64,
    /// m
    pub bit_count: usize,
    /// k
    pub hash_count: usize,
    /// insert operations performed, duplicates included
    pub elements_added: u64,
    pub bits_set: usize,
    /// bits_set / m
    pub fill_ratio: f64,
    /// fill_ratio ^ k
    pub current_false_positive_probability: f64,
    /// (1 - e^(-k * elements_added / m)) ^ k
    pub expected_false_positive_probability: f64,
    /// elements_added / n
    pub load_factor: f64,
    /// m bits rounded up to whole bytes
    pub memory_bytes: usize,
}

impl fmt::Display for FilterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Bloom Filter Statistics ===")?;
        writeln!(
            f,
            "Configuration: n={}, p={:.3}",
            self.capacity, self.false_positive_probability
        )?;
        writeln!(f, "Parameters: m={}, k={}", self.bit_count, self.hash_count)?;
        writeln!(
            f,
            "Memory usage: {} bytes ({:.2} KiB)",
            self.memory_bytes,
            self.memory_bytes as f64 / 1024.0
        )?;
        writeln!(f, "Elements added: {}", self.elements_added)?;
        writeln!(
            f,
            "Fill ratio: {:.3} ({}/{} bits set)",
            self.fill_ratio, self.bits_set, self.bit_count
        )?;
        writeln!(f, "Expected FP rate: {:.3}", self.false_positive_probability)?;
        write!(f, "Current FP rate: {:.3}", self.current_false_positive_probability)?;
        if self.elements_added > 0 {
            write!(f, "\nLoad factor: {:.2}", self.load_factor)?;
        }
        Ok(())
    }
}
