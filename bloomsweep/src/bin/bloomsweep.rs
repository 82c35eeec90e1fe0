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


use std::path::PathBuf;
use std::process::ExitCode;

use bloomsweep::corpus::Corpus;
use bloomsweep::corpus::Workload;
use bloomsweep::error::Error;
use bloomsweep::experiment::Experiment;
use bloomsweep::experiment::SweepConfig;
use bloomsweep::experiment::DEFAULT_NUM_BITS;
use bloomsweep::experiment::DEFAULT_NUM_FUNCTIONS;
use bloomsweep::hash::MurmurHashFamily;
use clap::Parser;
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::RngCore;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

/// Prints the false-positive rate of a Bloom filter for every number of hash functions
/// from 1 upwards, one rate per line.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Whitespace-delimited word list whose tokens are inserted into the filter.
    #[arg(default_value = "dict.txt")]
    corpus: PathBuf,

    /// Size of every filter, in bits.
    #[arg(long, default_value_t = DEFAULT_NUM_BITS)]
    num_bits: u64,

    /// Size of the hash family; rates are printed for 1..NUM_FUNCTIONS hash functions.
    #[arg(long, default_value_t = DEFAULT_NUM_FUNCTIONS)]
    num_functions: usize,

    /// Seed for the hash seeds and probe keys, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Keys queried at every point.
    #[arg(long, value_enum, default_value_t = WorkloadArg::Corpus)]
    workload: WorkloadArg,

    /// Log more detail to stderr; repeat for more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WorkloadArg {
    /// Every corpus token.
    Corpus,
    /// Every corpus token followed by every probe key.
    Combined,
}

impl From<WorkloadArg> for Workload {
    fn from(arg: WorkloadArg) -> Self {
        match arg {
            WorkloadArg::Corpus => Workload::Corpus,
            WorkloadArg::Combined => Workload::Combined,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), Error> {
    let config = SweepConfig {
        num_bits: args.num_bits,
        num_functions: args.num_functions,
        workload: args.workload.into(),
    };
    config.validate()?;

    let mut rng: Box<dyn RngCore> = match args.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };
    let family = MurmurHashFamily::from_rng(config.num_functions, &mut *rng);

    let corpus = Corpus::open(&args.corpus)
        .map_err(|err| err.with_context("step", "corpus load"))?;
    let members = corpus.members();
    let probes = corpus.generate_probes_with_rng(&mut *rng);
    let workload = corpus.workload(config.workload, &probes);

    let points = Experiment::new(&family)
        .num_bits(config.num_bits)
        .sweep(&members, &probes, &workload);
    for point in points {
        println!("{}", point.false_positive_rate);
    }
    Ok(())
}
