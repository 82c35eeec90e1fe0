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


use byteorder::ByteOrder;
use byteorder::LE;

const C1: u32 = 0xcc9e2d51;
const C2: u32 = 0x1b873593;

/// Computes the 32-bit x86 variant of MurmurHash3 over `key` with the given `seed`.
///
/// The MurmurHash3 is a fast, non-cryptographic hash function with good avalanche
/// behavior. Every call derives the result from `key` and `seed` alone, so the same
/// arguments always produce the same value.
pub fn murmurhash3_x86_32(key: &[u8], seed: u32) -> u32 {
    let mut h1 = seed;

    // body: 32-bit blocks
    let mut blocks = key.chunks_exact(4);
    for block in &mut blocks {
        h1 ^= mix_k1(LE::read_u32(block));
        h1 = h1.rotate_left(13);
        h1 = h1.wrapping_mul(5).wrapping_add(0xe6546b64);
    }

    // tail
    let tail = blocks.remainder();
    if !tail.is_empty() {
        let mut k1 = 0u32;
        for (i, &byte) in tail.iter().enumerate() {
            k1 ^= u32::from(byte) << (8 * i);
        }
        h1 ^= mix_k1(k1);
    }

    // The length is mixed in modulo 2^32, matching the reference implementation.
    h1 ^= key.len() as u32;
    fmix32(h1)
}

#[inline]
fn mix_k1(mut k1: u32) -> u32 {
    k1 = k1.wrapping_mul(C1);
    k1 = k1.rotate_left(15);
    k1.wrapping_mul(C2)
}

/// Finalization mix: force all bits of a hash block to avalanche.
#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^ (h >> 16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key() {
        assert_eq!(murmurhash3_x86_32(b"", 0), 0);
        assert_eq!(murmurhash3_x86_32(b"", 1), 0x514e28b7);
        assert_eq!(murmurhash3_x86_32(b"", 0xffffffff), 0x81f16f39);
    }

    #[test]
    fn test_zero_bytes_are_not_ignored() {
        assert_eq!(murmurhash3_x86_32(&[0, 0, 0, 0], 0), 0x2362f9de);
    }

    #[test]
    fn test_remainder() {
        let seed = 0x9747b28c;
        // remainder = 1
        assert_eq!(murmurhash3_x86_32(b"a", seed), 0x7fa09ea6);
        // remainder = 3
        assert_eq!(murmurhash3_x86_32(b"abc", seed), 0xc84a62dd);
        // remainder = 0
        assert_eq!(murmurhash3_x86_32(b"aaaa", seed), 0x5a97808a);
        assert_eq!(murmurhash3_x86_32(b"test", 0), 0xba6bd213);
        // multiple blocks plus remainder
        assert_eq!(murmurhash3_x86_32(b"Hello, world!", seed), 0x24884cba);
        assert_eq!(
            murmurhash3_x86_32(b"The quick brown fox jumps over the lazy dog", seed),
            0x2fa826cd
        );
    }

    #[test]
    fn test_seed_changes_output() {
        let key = b"apple";
        assert_ne!(murmurhash3_x86_32(key, 1), murmurhash3_x86_32(key, 2));
    }
}
