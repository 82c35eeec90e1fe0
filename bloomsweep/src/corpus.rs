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


//! Corpus loading and probe-key generation.
//!
//! A corpus is a sequence of whitespace-delimited tokens. Its distinct tokens form the member
//! set of an experiment, and random UUIDs drawn against it form the probe set of keys that
//! were never inserted.
//!
//! Tokens are raw bytes: a corpus need not be valid UTF-8.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use rand::RngCore;
use uuid::Builder;

use crate::error::Error;

/// Which keys are queried when measuring false positives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Workload {
    /// Every corpus token, in corpus order, duplicates included.
    #[default]
    Corpus,
    /// Every corpus token followed by every probe key.
    Combined,
}

/// The tokens of a text corpus.
///
/// # Examples
///
/// ```
/// # use bloomsweep::corpus::Corpus;
/// let corpus = Corpus::from_reader("apple banana\ncherry apple\n".as_bytes()).unwrap();
/// assert_eq!(corpus.len(), 4);
/// assert_eq!(corpus.members().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    tokens: Vec<Vec<u8>>,
}

impl Corpus {
    /// Reads a corpus from the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [`CorpusUnavailable`](crate::error::ErrorKind::CorpusUnavailable)
    /// if the file cannot be opened or read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| Error::corpus_unavailable(path, err))?;
        let corpus = Self::from_reader(BufReader::new(file))
            .map_err(|err| err.with_context("path", path.display()))?;

        tracing::info!(
            path = %path.display(),
            tokens = corpus.len(),
            "loaded corpus"
        );
        Ok(corpus)
    }

    /// Reads a corpus line by line, splitting every line on ASCII whitespace.
    ///
    /// Bytes are kept as they are; no encoding is assumed.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [`CorpusUnavailable`](crate::error::ErrorKind::CorpusUnavailable)
    /// if reading fails.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut tokens = vec![];
        for line in reader.split(b'\n') {
            let line = line.map_err(Error::corpus_unreadable)?;
            tokens.extend(
                line.split(u8::is_ascii_whitespace)
                    .filter(|token| !token.is_empty())
                    .map(<[u8]>::to_vec),
            );
        }
        Ok(Corpus { tokens })
    }

    /// Builds a corpus from already split tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Vec<u8>>,
    {
        Corpus {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns all tokens in corpus order.
    pub fn tokens(&self) -> &[Vec<u8>] {
        &self.tokens
    }

    /// Returns the number of tokens, counting duplicates.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns whether the corpus has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the distinct tokens of the corpus.
    pub fn members(&self) -> HashSet<Vec<u8>> {
        self.tokens.iter().cloned().collect()
    }

    /// Generates one random probe key per token using the thread-local random generator.
    ///
    /// See [`generate_probes_with_rng()`](Self::generate_probes_with_rng).
    pub fn generate_probes(&self) -> HashSet<Vec<u8>> {
        self.generate_probes_with_rng(&mut rand::thread_rng())
    }

    /// Generates one random probe key per token.
    ///
    /// Every key is the hyphenated text form of a random (version 4) UUID. Keys that collide
    /// with a member or with an earlier probe are redrawn, so the result always holds exactly
    /// `self.len()` keys and never intersects [`members()`](Self::members).
    pub fn generate_probes_with_rng<R: RngCore + ?Sized>(&self, rng: &mut R) -> HashSet<Vec<u8>> {
        let members = self.members();
        let mut probes = HashSet::with_capacity(self.tokens.len());

        while probes.len() < self.tokens.len() {
            let key = random_uuid(rng);
            if members.contains(&key) {
                tracing::warn!(
                    key = %String::from_utf8_lossy(&key),
                    "probe key collides with a member; redrawing"
                );
                continue;
            }
            probes.insert(key);
        }
        probes
    }

    /// Builds the list of keys to query for the given workload.
    pub fn workload(&self, kind: Workload, probes: &HashSet<Vec<u8>>) -> Vec<Vec<u8>> {
        match kind {
            Workload::Corpus => self.tokens.clone(),
            Workload::Combined => self.tokens.iter().chain(probes).cloned().collect(),
        }
    }
}

fn random_uuid<R: RngCore + ?Sized>(rng: &mut R) -> Vec<u8> {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    Builder::from_random_bytes(bytes)
        .into_uuid()
        .to_string()
        .into_bytes()
}

#[cfg(test)]
mod tests {
    use std::io;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::bloom::BloomFilter;
    use crate::error::ErrorKind;
    use crate::hash::MurmurHashFamily;

    fn bytes(tokens: &[&str]) -> Vec<Vec<u8>> {
        tokens.iter().map(|t| t.as_bytes().to_vec()).collect()
    }

    #[test]
    fn test_from_reader_splits_on_whitespace() {
        let text = "  apple\tbanana\n\ncherry   apple\r\n";
        let corpus = Corpus::from_reader(text.as_bytes()).unwrap();
        assert_eq!(corpus.tokens(), bytes(&["apple", "banana", "cherry", "apple"]));
        assert_eq!(corpus.len(), 4);

        let members = corpus.members();
        assert_eq!(members.len(), 3);
        assert!(members.contains(&b"banana"[..]));
    }

    #[test]
    fn test_last_line_without_newline() {
        let corpus = Corpus::from_reader("apple\nbanana".as_bytes()).unwrap();
        assert_eq!(corpus.tokens(), bytes(&["apple", "banana"]));
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = Corpus::from_reader(io::empty()).unwrap();
        assert!(corpus.is_empty());
        assert!(corpus.members().is_empty());
        assert!(corpus.generate_probes().is_empty());
    }

    #[test]
    fn test_latin1_token_is_loaded_and_inserted() {
        // "café" in Latin-1 is not valid UTF-8.
        let bytes: &[u8] = &[b'c', b'a', b'f', 0xe9, b' ', b'd', b'o', b'g', b'\n'];
        let corpus = Corpus::from_reader(bytes).unwrap();
        assert_eq!(corpus.tokens(), vec![b"caf\xe9".to_vec(), b"dog".to_vec()]);
        assert_eq!(corpus.members().len(), 2);

        let family = MurmurHashFamily::new(3);
        let mut filter = BloomFilter::new(&family, 10_000);
        for member in corpus.members() {
            filter.insert(member, 3);
        }
        assert!(filter.contains(b"caf\xe9", 3));
        assert!(filter.contains(b"dog", 3));
    }

    #[test]
    fn test_read_failure_is_unavailable() {
        struct FailingReader;

        impl io::Read for FailingReader {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
            }
        }

        let err = Corpus::from_reader(io::BufReader::new(FailingReader)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorpusUnavailable);
        assert_eq!(err.message(), "failed to read corpus: disk on fire");
    }

    #[test]
    fn test_open_missing_file() {
        let err = Corpus::open("this/path/does/not/exist.txt").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorpusUnavailable);
        assert!(err.to_string().contains("path: this/path/does/not/exist.txt"));
    }

    #[test]
    fn test_probes_are_disjoint_uuids() {
        let corpus = Corpus::from_tokens(["apple", "banana", "cherry", "apple", "durian"]);
        let probes = corpus.generate_probes_with_rng(&mut StdRng::seed_from_u64(1));

        assert_eq!(probes.len(), corpus.len());
        assert!(probes.is_disjoint(&corpus.members()));
        for probe in &probes {
            let parsed = uuid::Uuid::parse_str(std::str::from_utf8(probe).unwrap()).unwrap();
            assert_eq!(parsed.get_version_num(), 4);
            assert_eq!(probe, parsed.hyphenated().to_string().as_bytes());
        }
    }

    #[test]
    fn test_probes_never_collide_with_uuid_members() {
        // Members that look exactly like the keys the generator will draw.
        let expected = Corpus::from_tokens(["x"; 4])
            .generate_probes_with_rng(&mut StdRng::seed_from_u64(9));
        let corpus = Corpus::from_tokens(expected.iter().cloned());

        let probes = corpus.generate_probes_with_rng(&mut StdRng::seed_from_u64(9));
        assert_eq!(probes.len(), 4);
        assert!(probes.is_disjoint(&corpus.members()));
    }

    #[test]
    fn test_workload() {
        let corpus = Corpus::from_tokens(["b", "a", "b"]);
        let probes = HashSet::from([b"p".to_vec()]);

        assert_eq!(
            corpus.workload(Workload::Corpus, &probes),
            bytes(&["b", "a", "b"])
        );
        assert_eq!(
            corpus.workload(Workload::Combined, &probes),
            bytes(&["b", "a", "b", "p"])
        );
        assert_eq!(Workload::default(), Workload::Corpus);
    }
}
