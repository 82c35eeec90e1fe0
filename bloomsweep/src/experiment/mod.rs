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


//! False-positive rate experiments over a growing number of hash functions.
//!
//! An experiment fixes a filter size and a hash family of `K` functions, then for every
//! `k` in `1..K` builds a fresh filter, inserts the member set with `k` functions and
//! queries a workload with the same `k`. A hit on a key from the probe set is a false
//! positive.
//!
//! Every filter of a sweep draws its functions from the same family: the filter for `k`
//! uses functions `0..k`, so consecutive points of a sweep are correlated rather than
//! independent trials.
//!
//! # Usage
//!
//! ```rust
//! use bloomsweep::corpus::Corpus;
//! use bloomsweep::corpus::Workload;
//! use bloomsweep::experiment::Experiment;
//! use bloomsweep::hash::MurmurHashFamily;
//!
//! let corpus = Corpus::from_tokens(["apple", "banana", "cherry"]);
//! let members = corpus.members();
//! let probes = corpus.generate_probes();
//! let workload = corpus.workload(Workload::Combined, &probes);
//!
//! let family = MurmurHashFamily::new(8);
//! let points = Experiment::new(&family).sweep(&members, &probes, &workload);
//!
//! assert_eq!(points.len(), 7);
//! assert_eq!(points[0].num_hashes, 1);
//! ```

mod harness;

pub use self::harness::Experiment;
pub use self::harness::SweepPoint;

use crate::corpus::Workload;
use crate::error::Error;

/// Filter size, in bits, used for every point of a sweep unless overridden.
pub const DEFAULT_NUM_BITS: u64 = 10_000;

/// Number of functions in the hash family unless overridden; the sweep covers `1..100`.
pub const DEFAULT_NUM_FUNCTIONS: usize = 100;

/// Knobs of a full sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    /// Size of every filter, in bits.
    pub num_bits: u64,
    /// Size of the hash family; the sweep runs `k = 1..num_functions`.
    pub num_functions: usize,
    /// Keys queried at every point.
    pub workload: Workload,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            num_bits: DEFAULT_NUM_BITS,
            num_functions: DEFAULT_NUM_FUNCTIONS,
            workload: Workload::Corpus,
        }
    }
}

impl SweepConfig {
    /// Checks that the configuration describes at least one experiment point.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgument`](crate::error::ErrorKind::InvalidArgument) error if
    /// `num_bits` is zero or `num_functions` is less than 2.
    pub fn validate(&self) -> Result<(), Error> {
        if self.num_bits == 0 {
            return Err(Error::invalid_argument("num_bits must be greater than 0"));
        }
        if self.num_functions < 2 {
            return Err(
                Error::invalid_argument("num_functions must be at least 2")
                    .with_context("num_functions", self.num_functions),
            );
        }
        Ok(())
    }
}
