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


//! Families of independently seeded hash functions.
//!
//! A Bloom filter consulting `k` hash functions asks its family for function `0`, `1`, ...,
//! `k - 1`. Each function maps an arbitrary byte string to a position in `[0, modulus)`.

mod murmurhash;

use rand::RngCore;

pub use self::murmurhash::murmurhash3_x86_32;

/// An indexed collection of hash functions over byte strings.
///
/// Implementations must be deterministic: for a given family instance, `hash(index, key,
/// modulus)` returns the same value every time it is called with the same arguments.
pub trait HashFamily {
    /// Returns the number of hash functions in this family.
    fn num_functions(&self) -> usize;

    /// Applies hash function `index` to `key` and reduces the result into `[0, modulus)`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num_functions()` or if `modulus` is zero.
    fn hash(&self, index: usize, key: &[u8], modulus: u64) -> u64;
}

/// A family of MurmurHash3 (x86, 32-bit) functions, each with its own random seed.
///
/// Seeds are drawn once at construction and never change afterwards, so a family can be
/// shared read-only between any number of filters.
///
/// # Examples
///
/// ```
/// # use bloomsweep::hash::HashFamily;
/// # use bloomsweep::hash::MurmurHashFamily;
/// let family = MurmurHashFamily::with_seeds(vec![17, 42]);
/// let pos = family.hash(1, b"apple", 10_000);
/// assert!(pos < 10_000);
/// assert_eq!(pos, family.hash(1, b"apple", 10_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MurmurHashFamily {
    seeds: Vec<u32>,
}

impl MurmurHashFamily {
    /// Creates `count` hash functions seeded from the thread-local random generator.
    pub fn new(count: usize) -> Self {
        Self::from_rng(count, &mut rand::thread_rng())
    }

    /// Creates `count` hash functions seeded from the given random generator.
    ///
    /// Passing a seeded generator makes the whole family reproducible across runs.
    pub fn from_rng<R: RngCore + ?Sized>(count: usize, rng: &mut R) -> Self {
        let seeds = (0..count).map(|_| rng.next_u32()).collect();
        MurmurHashFamily { seeds }
    }

    /// Creates a family from explicit seeds, one function per seed.
    pub fn with_seeds(seeds: Vec<u32>) -> Self {
        MurmurHashFamily { seeds }
    }
}

impl HashFamily for MurmurHashFamily {
    fn num_functions(&self) -> usize {
        self.seeds.len()
    }

    fn hash(&self, index: usize, key: &[u8], modulus: u64) -> u64 {
        assert!(
            index < self.seeds.len(),
            "hash function index {index} out of range for a family of {}",
            self.seeds.len()
        );
        assert!(modulus > 0, "modulus must be greater than 0");

        u64::from(murmurhash3_x86_32(key, self.seeds[index])) % modulus
    }
}
