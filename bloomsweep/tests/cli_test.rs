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


mod common;

use std::process::Command;
use std::process::Output;

use common::test_data;

fn bloomsweep(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bloomsweep"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn test_prints_one_rate_per_hash_count() {
    let corpus = test_data("words.txt");
    let output = bloomsweep(&[
        corpus.to_str().unwrap(),
        "--num-functions",
        "5",
        "--seed",
        "3",
    ]);

    assert!(output.status.success());
    // k = 1..5, and nothing in the word list is a generated non-member key
    assert_eq!(stdout_lines(&output), ["0", "0", "0", "0"]);
}

#[test]
fn test_combined_workload_on_tiny_filter() {
    let corpus = test_data("words.txt");
    let output = bloomsweep(&[
        corpus.to_str().unwrap(),
        "--num-bits",
        "2",
        "--num-functions",
        "3",
        "--workload",
        "combined",
        "--seed",
        "3",
    ]);

    assert!(output.status.success());
    // every one of the 35 generated UUID keys hits, out of 70 queries
    assert_eq!(stdout_lines(&output), ["0.5", "0.5"]);
}

#[test]
fn test_missing_corpus_fails_before_any_rate() {
    let output = bloomsweep(&["no-such-dict.txt"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.matches("CorpusUnavailable").count(), 1, "{stderr}");
    assert!(stderr.contains("error: CorpusUnavailable"), "{stderr}");
    assert!(stderr.contains("path: no-such-dict.txt"), "{stderr}");
    assert!(stderr.contains("step: corpus load"), "{stderr}");
}

#[test]
fn test_rejects_single_hash_function() {
    let corpus = test_data("words.txt");
    let output = bloomsweep(&[corpus.to_str().unwrap(), "--num-functions", "1"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(
        stderr.contains("error: InvalidArgument, context: { num_functions: 1 }"),
        "{stderr}"
    );
}
