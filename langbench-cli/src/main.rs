use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use langbench_suite::{
    discover_entries, filter_entries, generate_reports, run_all, Layout, RunOptions,
};

#[derive(Parser)]
#[command(
    name = "langbench",
    version,
    about = "Run cross-language benchmark entries and generate reports."
)]
struct Cli {
    /// Suite root holding implementations/, results/, and reports/.
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Number of repetitions for each benchmark and size.
    #[arg(long, value_name = "N", default_value_t = 5)]
    num_repetitions: u32,

    /// Filter benchmarks to run by benchmark name(s).
    #[arg(long = "benchmark", value_name = "NAME")]
    benchmarks: Vec<String>,

    /// Filter benchmarks to run by programming language(s).
    #[arg(long = "lang", value_name = "LANG")]
    languages: Vec<String>,

    /// Run benchmarks only, skip report generation.
    #[arg(short = 'r', long)]
    run_only: bool,

    /// Skip runs, regenerate reports from stored results only.
    #[arg(short = 'p', long, conflicts_with = "run_only")]
    report_only: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let layout = Layout::new(&cli.root);

    if !cli.report_only {
        let entries = discover_entries(&layout, &layout.implementations_dir())?;
        let entries = filter_entries(entries, &cli.languages, &cli.benchmarks);
        let options = RunOptions {
            num_repetitions: cli.num_repetitions,
        };
        run_all(&layout, &entries, &options)?;
    }

    if !cli.run_only {
        // Reports always cover the full results tree, not just the
        // entries this invocation ran.
        let entries = discover_entries(&layout, &layout.results_dir())?;
        generate_reports(&layout, &entries)?;
    }

    Ok(())
}
