use std::path::{Path, PathBuf};

use crate::benchmarks::Size;

/// On-disk layout of a suite tree. Every other path in the suite derives
/// from the root: `implementations/` holds the entries to run, `results/`
/// the captured stdout of past runs, and `reports/` the generated CSV and
/// Markdown output.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn implementations_dir(&self) -> PathBuf {
        self.root.join("implementations")
    }

    pub fn results_dir(&self) -> PathBuf {
        self.root.join("results")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.root.join("reports")
    }

    pub fn benchmark_report_dir(&self, benchmark_id: u32, benchmark_name: &str) -> PathBuf {
        self.reports_dir()
            .join(format!("{benchmark_id:02}_{benchmark_name}"))
    }

    pub fn raw_runtime_csv(
        &self,
        benchmark_id: u32,
        benchmark_name: &str,
        stage_id: usize,
        stage: &str,
    ) -> PathBuf {
        self.benchmark_report_dir(benchmark_id, benchmark_name)
            .join(format!("{stage_id:02}_{stage}_plot.csv"))
    }

    pub fn stage_summary_csv(&self, benchmark_id: u32, benchmark_name: &str) -> PathBuf {
        self.benchmark_report_dir(benchmark_id, benchmark_name)
            .join("stage_summary.csv")
    }

    pub fn summary_csv(&self) -> PathBuf {
        self.reports_dir().join("summary.csv")
    }

    pub fn summary_markdown(&self) -> PathBuf {
        self.reports_dir().join("summary.md")
    }
}

/// File name under an entry's result directory holding the captured stdout
/// of one run.
pub fn stdout_file_name(size: Size, run_id: u32) -> String {
    format!("stdout_run_{size}_{run_id:04}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_derive_from_root() {
        let layout = Layout::new("/suite");
        assert_eq!(
            layout.implementations_dir(),
            PathBuf::from("/suite/implementations")
        );
        assert_eq!(
            layout.raw_runtime_csv(3, "Fibonacci", 2, "Naive Recursion"),
            PathBuf::from("/suite/reports/03_Fibonacci/02_Naive Recursion_plot.csv")
        );
        assert_eq!(
            layout.stage_summary_csv(3, "Fibonacci"),
            PathBuf::from("/suite/reports/03_Fibonacci/stage_summary.csv")
        );
    }

    #[test]
    fn stdout_file_names_zero_pad_the_run_id() {
        assert_eq!(stdout_file_name(Size::S, 1), "stdout_run_S_0001");
        assert_eq!(stdout_file_name(Size::L, 42), "stdout_run_L_0042");
    }
}
