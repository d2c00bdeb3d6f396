//! Cross-language benchmark suite.
//!
//! A suite tree holds one directory per implementation entry under
//! `implementations/<Language>/<id>_<Benchmark>/<id>_<Impl>/`. The suite
//! discovers these entries, builds and runs them via their `build.sh` and
//! `run.sh` scripts, stores every run's stdout under `results/`, and turns
//! the stored output into CSV data files and a Markdown summary under
//! `reports/`.

pub mod benchmarks;
mod console;
mod entry;
mod extract;
mod harness;
mod layout;
mod report;
mod runner;
mod specs;
mod stats;

pub use benchmarks::{Benchmark, Size};
pub use entry::{discover_entries, filter_entries, BenchmarkEntry, EntryMeta};
pub use extract::{extract_entry_runtimes, EntryRuntimes, ExtractError};
pub use layout::Layout;
pub use report::generate_reports;
pub use runner::{run_all, RunOptions};
