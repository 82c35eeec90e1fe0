// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.


use std::fmt;

use super::BloomFilterBuilder;
use super::MIN_NUM_HASHES;
use crate::hash::HashFamily;

/// A Bloom filter for probabilistic set membership testing.
///
/// Provides fast membership queries with:
/// - No false negatives (inserted items always return `true` for the same `k`)
/// - Tunable false positive rate
/// - Constant space usage
///
/// The filter borrows its hash functions from a [`HashFamily`]; insert and query calls
/// consult functions `0..k` of that family.
pub struct BloomFilter<'a, H: ?Sized> {
    /// Hash functions, shared with other filters
    pub(super) family: &'a H,
    /// Total number of bits in the filter (m)
    pub(super) capacity_bits: u64,
    /// Count of bits set to 1 (for statistics)
    pub(super) num_bits_set: u64,
    /// Bit array packed into u64 words
    /// Length = ceil(capacity_bits / 64)
    pub(super) bit_array: Box<[u64]>,
}

impl<'a, H: HashFamily + ?Sized> BloomFilter<'a, H> {
    /// Creates an empty filter of `num_bits` bits hashing with `family`.
    ///
    /// # Panics
    ///
    /// Panics if `num_bits` is zero.
    pub fn new(family: &'a H, num_bits: u64) -> Self {
        BloomFilterBuilder::with_size(num_bits).build(family)
    }

    /// Inserts an item using the first `num_hashes` functions of the family.
    ///
    /// After insertion, `contains(item, num_hashes)` will always return `true`. Inserting the
    /// same item twice leaves the filter unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `num_hashes` is zero or exceeds the size of the hash family.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsweep::bloom::BloomFilter;
    /// # use bloomsweep::hash::MurmurHashFamily;
    /// let family = MurmurHashFamily::new(4);
    /// let mut filter = BloomFilter::new(&family, 1024);
    ///
    /// filter.insert("apple", 4);
    /// filter.insert(b"raw bytes", 4);
    ///
    /// assert!(filter.contains("apple", 4));
    /// ```
    pub fn insert(&mut self, item: impl AsRef<[u8]>, num_hashes: usize) {
        self.check_num_hashes(num_hashes);

        let key = item.as_ref();
        for i in 0..num_hashes {
            let bit_index = self.family.hash(i, key, self.capacity_bits);
            self.set_bit(bit_index);
        }
    }

    /// Tests whether an item is possibly in the set, consulting `num_hashes` functions.
    ///
    /// Returns:
    /// - `true`: Item was **possibly** inserted (or false positive)
    /// - `false`: Item was **definitely not** inserted
    ///
    /// # Panics
    ///
    /// Panics if `num_hashes` is zero or exceeds the size of the hash family.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsweep::bloom::BloomFilter;
    /// # use bloomsweep::hash::MurmurHashFamily;
    /// let family = MurmurHashFamily::new(3);
    /// let mut filter = BloomFilter::new(&family, 10_000);
    /// filter.insert("apple", 3);
    ///
    /// assert!(filter.contains("apple", 3));
    /// ```
    pub fn contains(&self, item: impl AsRef<[u8]>, num_hashes: usize) -> bool {
        self.check_num_hashes(num_hashes);

        if self.is_empty() {
            return false;
        }

        let key = item.as_ref();
        (0..num_hashes).all(|i| self.get_bit(self.family.hash(i, key, self.capacity_bits)))
    }

    /// Returns whether the filter is empty (no items inserted).
    pub fn is_empty(&self) -> bool {
        self.num_bits_set == 0
    }

    /// Returns the number of bits set to 1.
    ///
    /// Useful for monitoring filter saturation.
    pub fn bits_used(&self) -> u64 {
        self.num_bits_set
    }

    /// Returns the total number of bits in the filter (capacity).
    pub fn capacity(&self) -> u64 {
        self.capacity_bits
    }

    /// Returns the current load factor (fraction of bits set).
    pub fn load_factor(&self) -> f64 {
        self.num_bits_set as f64 / self.capacity_bits as f64
    }

    /// Estimates the current false positive probability for queries with `num_hashes`
    /// functions.
    ///
    /// Uses the approximation `load_factor^k`, which assumes a uniform bit distribution.
    pub fn estimated_fpp(&self, num_hashes: usize) -> f64 {
        self.load_factor().powf(num_hashes as f64)
    }

    fn check_num_hashes(&self, num_hashes: usize) {
        assert!(
            num_hashes >= MIN_NUM_HASHES,
            "num_hashes must be at least {}",
            MIN_NUM_HASHES
        );
        assert!(
            num_hashes <= self.family.num_functions(),
            "num_hashes {} exceeds the {} functions of the hash family",
            num_hashes,
            self.family.num_functions()
        );
    }

    /// Gets the value of a single bit.
    fn get_bit(&self, bit_index: u64) -> bool {
        let word_index = (bit_index >> 6) as usize; // Equivalent to bit_index / 64
        let bit_offset = bit_index & 63; // Equivalent to bit_index % 64
        let mask = 1u64 << bit_offset;
        (self.bit_array[word_index] & mask) != 0
    }

    /// Sets a single bit and updates the count if it wasn't already set.
    fn set_bit(&mut self, bit_index: u64) {
        let word_index = (bit_index >> 6) as usize;
        let bit_offset = bit_index & 63;
        let mask = 1u64 << bit_offset;

        if (self.bit_array[word_index] & mask) == 0 {
            self.bit_array[word_index] |= mask;
            self.num_bits_set += 1;
        }
    }
}

impl<H: ?Sized> fmt::Debug for BloomFilter<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomFilter")
            .field("capacity_bits", &self.capacity_bits)
            .field("num_bits_set", &self.num_bits_set)
            .finish_non_exhaustive()
    }
}
