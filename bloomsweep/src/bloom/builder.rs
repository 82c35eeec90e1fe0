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


use super::BloomFilter;
use crate::hash::HashFamily;

/// Smallest filter size, in bits.
const MIN_NUM_BITS: u64 = 1;
/// Smallest number of hash functions a filter may consult.
pub const MIN_NUM_HASHES: usize = 1;

/// Builder for creating [`BloomFilter`] instances.
///
/// The number of hash functions is not part of the filter; it is passed to every
/// [`insert()`](BloomFilter::insert) and [`contains()`](BloomFilter::contains) call.
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder {
    num_bits: u64,
}

impl BloomFilterBuilder {
    /// Creates a builder with an exact bit count.
    ///
    /// # Panics
    ///
    /// Panics if `num_bits` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsweep::bloom::BloomFilterBuilder;
    /// # use bloomsweep::hash::MurmurHashFamily;
    /// let family = MurmurHashFamily::new(4);
    /// let filter = BloomFilterBuilder::with_size(10_000).build(&family);
    /// assert_eq!(filter.capacity(), 10_000);
    /// ```
    pub fn with_size(num_bits: u64) -> Self {
        assert!(
            num_bits >= MIN_NUM_BITS,
            "num_bits must be at least {}",
            MIN_NUM_BITS
        );

        BloomFilterBuilder { num_bits }
    }

    /// Builds an empty Bloom filter that hashes with functions of `family`.
    pub fn build<H: HashFamily + ?Sized>(self, family: &H) -> BloomFilter<'_, H> {
        let num_words = self.num_bits.div_ceil(64) as usize;
        let bit_array = vec![0u64; num_words].into_boxed_slice();

        BloomFilter {
            family,
            capacity_bits: self.num_bits,
            num_bits_set: 0,
            bit_array,
        }
    }

    /// Suggests optimal number of hash functions given item count and bit count.
    ///
    /// Formula: `k = (m/n) * ln(2)`
    /// where m = num_bits, n = max_items
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsweep::bloom::BloomFilterBuilder;
    /// let hashes = BloomFilterBuilder::suggest_num_hashes_from_accuracy(1000, 10000);
    /// assert_eq!(hashes, 7); // Optimal k ≈ 6.93
    /// ```
    pub fn suggest_num_hashes_from_accuracy(max_items: u64, num_bits: u64) -> usize {
        let m = num_bits as f64;
        let n = max_items.max(1) as f64;

        // Ceil to avoid selecting too few hashes.
        let k = (m / n * std::f64::consts::LN_2).ceil();
        k.max(MIN_NUM_HASHES as f64) as usize
    }

    /// Theoretical false positive probability after inserting `num_items` distinct items
    /// into `num_bits` bits with `num_hashes` independent hash functions.
    ///
    /// Formula: `p = (1 - e^(-k*n/m))^k`
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsweep::bloom::BloomFilterBuilder;
    /// let p = BloomFilterBuilder::expected_fpp(1000, 10000, 7);
    /// assert!(p > 0.008 && p < 0.009);
    /// ```
    pub fn expected_fpp(num_items: u64, num_bits: u64, num_hashes: usize) -> f64 {
        if num_items == 0 {
            return 0.0;
        }
        let k = num_hashes as f64;
        let fill = 1.0 - (-k * num_items as f64 / num_bits as f64).exp();
        fill.powf(k)
    }
}
