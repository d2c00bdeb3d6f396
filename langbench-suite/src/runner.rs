use std::collections::BTreeSet;
use std::time::Instant;

use anyhow::Result;
use rand::seq::SliceRandom;

use crate::benchmarks::{self, Size};
use crate::console;
use crate::entry::BenchmarkEntry;
use crate::harness;
use crate::layout::Layout;

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Runs per (entry, size) pair.
    pub num_repetitions: u32,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { num_repetitions: 5 }
    }
}

/// Prepare, build, and run every entry: benchmark data hooks first, then
/// each entry's `build.sh`, then the full (entry, size, run id) matrix in
/// shuffled order. Interleaving the runs spreads thermal and cache drift
/// across entries instead of biasing whichever happens to run last.
pub fn run_all(layout: &Layout, entries: &[BenchmarkEntry], options: &RunOptions) -> Result<()> {
    let benchmark_names: BTreeSet<&str> = entries
        .iter()
        .map(|entry| entry.benchmark_name.as_str())
        .collect();

    for benchmark_name in &benchmark_names {
        console::bold(&format!("\nPreparing benchmark: {benchmark_name}"));
        let Some(benchmark) = benchmarks::find(benchmark_name) else {
            console::warn(&format!("Unknown benchmark '{benchmark_name}', skipping."));
            continue;
        };
        let timer = Instant::now();
        benchmark.prepare_data(layout)?;
        print_elapsed(timer);
    }

    for entry in entries {
        console::bold(&format!("\nBuilding: {entry}"));
        let timer = Instant::now();
        harness::build_entry(layout, entry)?;
        print_elapsed(timer);
    }

    let mut runs: Vec<(&BenchmarkEntry, Size, u32)> = entries
        .iter()
        .filter(|entry| benchmarks::find(&entry.benchmark_name).is_some())
        .flat_map(|entry| {
            Size::ALL.iter().flat_map(move |&size| {
                (1..=options.num_repetitions).map(move |run_id| (entry, size, run_id))
            })
        })
        .collect();
    runs.shuffle(&mut rand::thread_rng());

    for (i, (entry, size, run_id)) in runs.iter().enumerate() {
        console::bold(&format!(
            "\nRunning benchmark [{} / {}]: {entry} / {size} / {run_id}",
            i + 1,
            runs.len(),
        ));

        // Registry membership was checked when assembling the matrix.
        let benchmark = benchmarks::find(&entry.benchmark_name)
            .ok_or_else(|| anyhow::anyhow!("benchmark '{}' vanished", entry.benchmark_name))?;
        let args = benchmark.args(*size);
        let stdout_path = entry.stdout_path(layout, *size, *run_id);

        let timer = Instant::now();
        harness::run_entry(layout, entry, &args, &stdout_path)?;
        print_elapsed(timer);
    }

    Ok(())
}

fn print_elapsed(timer: Instant) {
    println!("[{:6.1} sec]", timer.elapsed().as_secs_f64());
}
