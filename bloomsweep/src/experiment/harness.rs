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


use std::collections::HashSet;

use super::DEFAULT_NUM_BITS;
use crate::bloom::BloomFilter;
use crate::bloom::BloomFilterBuilder;
use crate::hash::HashFamily;

/// The outcome of one experiment point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    /// Number of hash functions consulted (k).
    pub num_hashes: usize,
    /// `false_positives / queries`, or 0.0 when nothing was queried.
    pub false_positive_rate: f64,
    /// Number of queried probe keys the filter reported as present.
    pub false_positives: u64,
    /// Number of queries issued.
    pub queries: u64,
    /// Number of bits set after inserting the members.
    pub bits_used: u64,
    /// Fraction of bits set after inserting the members.
    pub load_factor: f64,
    /// Theoretical false positive probability for this many members, bits and hashes.
    pub expected_fpp: f64,
}

/// Runs Bloom filter false-positive experiments against a shared hash family.
#[derive(Debug)]
pub struct Experiment<'a, H: ?Sized> {
    family: &'a H,
    num_bits: u64,
}

impl<'a, H: HashFamily + ?Sized> Experiment<'a, H> {
    /// Creates an experiment whose filters use [`DEFAULT_NUM_BITS`] bits.
    pub fn new(family: &'a H) -> Self {
        Experiment {
            family,
            num_bits: DEFAULT_NUM_BITS,
        }
    }

    /// Sets the size of every filter built by this experiment.
    ///
    /// # Panics
    ///
    /// Panics if `num_bits` is zero.
    pub fn num_bits(mut self, num_bits: u64) -> Self {
        assert!(num_bits > 0, "num_bits must be greater than 0");
        self.num_bits = num_bits;
        self
    }

    /// Runs one experiment point with `num_hashes` hash functions.
    ///
    /// Inserts every member into a fresh filter, then queries every key of `workload`. Only
    /// hits on keys from `probes` count as false positives; the rate is taken over all
    /// queries issued.
    ///
    /// # Panics
    ///
    /// Panics if `num_hashes` is zero or exceeds the size of the hash family.
    pub fn run_point(
        &self,
        num_hashes: usize,
        members: &HashSet<Vec<u8>>,
        probes: &HashSet<Vec<u8>>,
        workload: &[Vec<u8>],
    ) -> SweepPoint {
        let mut filter = BloomFilter::new(self.family, self.num_bits);
        for member in members {
            filter.insert(member, num_hashes);
        }

        let false_positives = workload
            .iter()
            .filter(|key| filter.contains(key, num_hashes) && probes.contains(key.as_slice()))
            .count() as u64;
        let queries = workload.len() as u64;
        let false_positive_rate = if queries == 0 {
            0.0
        } else {
            false_positives as f64 / queries as f64
        };

        let point = SweepPoint {
            num_hashes,
            false_positive_rate,
            false_positives,
            queries,
            bits_used: filter.bits_used(),
            load_factor: filter.load_factor(),
            expected_fpp: BloomFilterBuilder::expected_fpp(
                members.len() as u64,
                self.num_bits,
                num_hashes,
            ),
        };
        tracing::debug!(
            num_hashes,
            false_positives,
            queries,
            rate = point.false_positive_rate,
            expected = point.expected_fpp,
            load_factor = point.load_factor,
            "measured experiment point"
        );
        point
    }

    /// Runs one experiment point for every `k` in `1..K`, where `K` is the size of the
    /// hash family, and returns the points in ascending `k`.
    pub fn sweep(
        &self,
        members: &HashSet<Vec<u8>>,
        probes: &HashSet<Vec<u8>>,
        workload: &[Vec<u8>],
    ) -> Vec<SweepPoint> {
        let max_hashes = self.family.num_functions();
        tracing::info!(
            num_bits = self.num_bits,
            members = members.len(),
            probes = probes.len(),
            queries = workload.len(),
            max_hashes = max_hashes.saturating_sub(1),
            optimal_hashes = BloomFilterBuilder::suggest_num_hashes_from_accuracy(
                members.len() as u64,
                self.num_bits
            ),
            "starting false-positive sweep"
        );

        let points: Vec<SweepPoint> = (1..max_hashes)
            .map(|k| self.run_point(k, members, probes, workload))
            .collect();

        if let Some(best) = points
            .iter()
            .min_by(|a, b| a.false_positive_rate.total_cmp(&b.false_positive_rate))
        {
            tracing::info!(
                num_hashes = best.num_hashes,
                rate = best.false_positive_rate,
                "sweep finished"
            );
        }
        points
    }
}
