use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::benchmarks::{Benchmark, Size};
use crate::entry::BenchmarkEntry;
use crate::layout::Layout;

/// A stored stdout file that could not be turned into stage runtimes.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to list result files for {entry}: {source}")]
    ListResults {
        entry: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to read '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("'{}' has {found} lines, expected at least {expected} stage times", path.display())]
    TruncatedOutput {
        path: PathBuf,
        expected: usize,
        found: usize,
    },
    #[error("'{}' line {line}: '{text}' is not a stage time in seconds", path.display())]
    BadStageTime {
        path: PathBuf,
        line: usize,
        text: String,
    },
}

/// Per-stage runtimes of one entry, grouped by size, one value per stored
/// run in run-id order. The computed "Total" stage (sum of the measured
/// stages per run) is included.
#[derive(Debug, Default, Clone)]
pub struct EntryRuntimes {
    stages: BTreeMap<String, BTreeMap<Size, Vec<f64>>>,
}

impl EntryRuntimes {
    fn push(&mut self, stage: &str, size: Size, value: f64) {
        self.stages
            .entry(stage.to_string())
            .or_default()
            .entry(size)
            .or_default()
            .push(value);
    }

    pub fn times(&self, stage: &str, size: Size) -> &[f64] {
        self.stages
            .get(stage)
            .and_then(|sizes| sizes.get(&size))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every stored (size, run id, time) of one stage, sizes in ascending
    /// order, runs in run-id order within a size.
    pub fn runs(&self, stage: &str) -> Vec<(Size, u32, f64)> {
        let mut runs = Vec::new();
        if let Some(sizes) = self.stages.get(stage) {
            for (&size, times) in sizes {
                for (i, &time) in times.iter().enumerate() {
                    runs.push((size, i as u32 + 1, time));
                }
            }
        }
        runs
    }
}

/// Read every stored stdout file of the entry and map the first k lines
/// (k = number of measured stages) positionally onto the stages as f64
/// seconds. Lines after the stage times are the workload's control output
/// and are ignored here.
pub fn extract_entry_runtimes(
    layout: &Layout,
    entry: &BenchmarkEntry,
    benchmark: &dyn Benchmark,
) -> Result<EntryRuntimes, ExtractError> {
    let measured = benchmark.measured_stages();
    let mut runtimes = EntryRuntimes::default();

    for size in Size::ALL {
        let files = entry
            .result_files(layout, size)
            .map_err(|source| ExtractError::ListResults {
                entry: entry.to_string(),
                source,
            })?;

        for path in files {
            let text = fs::read_to_string(&path).map_err(|source| ExtractError::Read {
                path: path.clone(),
                source,
            })?;
            let lines: Vec<&str> = text.lines().collect();
            if lines.len() < measured.len() {
                return Err(ExtractError::TruncatedOutput {
                    path,
                    expected: measured.len(),
                    found: lines.len(),
                });
            }

            let mut total = 0.0;
            for (i, stage) in measured.iter().enumerate() {
                let time: f64 =
                    lines[i]
                        .trim()
                        .parse()
                        .map_err(|_| ExtractError::BadStageTime {
                            path: path.clone(),
                            line: i + 1,
                            text: lines[i].to_string(),
                        })?;
                runtimes.push(stage, size, time);
                total += time;
            }
            runtimes.push(benchmark.stages()[0], size, total);
        }
    }

    Ok(runtimes)
}
