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


//! Bloom Filter implementation for probabilistic set membership testing.
//!
//! A Bloom filter is a space-efficient probabilistic data structure used to test whether
//! an element is a member of a set. False positive matches are possible, but false negatives
//! are not. In other words, a query returns either "possibly in set" or "definitely not in set".
//!
//! # Properties
//!
//! - **No false negatives**: If an item was inserted with `k` hash functions, `contains()` with
//!   the same `k` always returns `true`
//! - **Possible false positives**: `contains()` may return `true` for items never inserted
//! - **Insert-only**: bits only ever go from 0 to 1; there is no removal
//! - **Fixed size**: the bit array never grows
//!
//! # Usage
//!
//! The filter does not own its hash functions. It borrows a [`HashFamily`] and is told on
//! every call how many functions of that family to consult, which lets many filters with
//! different `k` share one family.
//!
//! ```rust
//! use bloomsweep::bloom::BloomFilter;
//! use bloomsweep::hash::MurmurHashFamily;
//!
//! let family = MurmurHashFamily::new(8);
//! let mut filter = BloomFilter::new(&family, 10_000);
//!
//! filter.insert("apple", 3);
//! filter.insert("banana", 3);
//!
//! assert!(filter.contains("apple", 3)); // true - definitely inserted
//! println!("Bits used: {}", filter.bits_used());
//! println!("Est. FPP: {:.4}%", filter.estimated_fpp(3) * 100.0);
//! ```
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/time trade-offs in hash coding with allowable errors"
//!
//! [`HashFamily`]: crate::hash::HashFamily

mod builder;
mod filter;

pub use self::builder::BloomFilterBuilder;
pub use self::builder::MIN_NUM_HASHES;
pub use self::filter::BloomFilter;
