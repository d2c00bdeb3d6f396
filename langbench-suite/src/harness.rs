use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};

use crate::console;
use crate::entry::BenchmarkEntry;
use crate::layout::Layout;

/// Run the entry's `build.sh`, if it has one. Stderr output is surfaced as
/// a warning (build tools routinely write progress there); a non-zero exit
/// is fatal.
pub fn build_entry(layout: &Layout, entry: &BenchmarkEntry) -> Result<()> {
    let impl_dir = entry.impl_dir(layout);
    if !impl_dir.join("build.sh").exists() {
        return Ok(());
    }

    let output = bash_script(&impl_dir, "build.sh", &[])
        .with_context(|| format!("failed to invoke build.sh for {entry}"))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !stderr.is_empty() {
        console::warn("Build has written to STDERR (which may or may not be an issue):");
        eprintln!("{}", stderr.trim_end());
    }

    if !output.status.success() {
        bail!(
            "build of {entry} failed with status {}:\nSTDOUT:\n{}\nSTDERR:\n{}",
            output.status,
            stdout.trim_end(),
            stderr.trim_end()
        );
    }

    Ok(())
}

/// Run the entry's `run.sh` with the benchmark's size arguments and store
/// the captured stdout at `stdout_path`. Failures and stray stderr output
/// are reported but not fatal: the stdout is recorded regardless, and a
/// broken entry shows up in extraction rather than aborting the whole
/// run matrix.
pub fn run_entry(
    layout: &Layout,
    entry: &BenchmarkEntry,
    args: &[String],
    stdout_path: &Path,
) -> Result<()> {
    let impl_dir = entry.impl_dir(layout);
    let output = bash_script(&impl_dir, "run.sh", args)
        .with_context(|| format!("failed to invoke run.sh for {entry}"))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        console::error(&format!("Run has failed with status {}.", output.status));
        println!("STDOUT:\n{}", stdout.trim_end());
        println!("STDERR:\n{}", stderr.trim_end());
    } else if !stderr.is_empty() {
        console::error("Run has exit code 0, but wrote to STDERR.");
        println!("STDOUT:\n{}", stdout.trim_end());
        println!("STDERR:\n{}", stderr.trim_end());
    } else {
        println!("Read stdout of length: {}", output.stdout.len());
        print!("{stdout}");
    }

    if let Some(parent) = stdout_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create '{}'", parent.display()))?;
    }
    fs::write(stdout_path, &output.stdout)
        .with_context(|| format!("failed to write '{}'", stdout_path.display()))?;

    Ok(())
}

fn bash_script(dir: &Path, script: &str, args: &[String]) -> io::Result<std::process::Output> {
    Command::new("bash")
        .arg(script)
        .args(args)
        .current_dir(dir)
        .output()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use crate::benchmarks::Size;

    fn entry_in(layout: &Layout) -> BenchmarkEntry {
        let entry = BenchmarkEntry {
            language: "Shell".into(),
            benchmark_id: 3,
            benchmark_name: "Fibonacci".into(),
            impl_id: 1,
            impl_name: "default".into(),
            meta: None,
        };
        fs::create_dir_all(entry.impl_dir(layout)).unwrap();
        entry
    }

    #[test]
    fn build_is_a_no_op_without_a_build_script() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::new(tmp.path());
        let entry = entry_in(&layout);
        build_entry(&layout, &entry).unwrap();
    }

    #[test]
    fn failing_build_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::new(tmp.path());
        let entry = entry_in(&layout);
        fs::write(entry.impl_dir(&layout).join("build.sh"), "exit 7\n").unwrap();

        let error = build_entry(&layout, &entry).unwrap_err();
        assert!(error.to_string().contains("failed with status"));
    }

    #[test]
    fn run_stores_stdout_bytes_exactly() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::new(tmp.path());
        let entry = entry_in(&layout);
        fs::write(
            entry.impl_dir(&layout).join("run.sh"),
            "echo \"$1\"\necho \"$2\"\n",
        )
        .unwrap();

        let stdout_path = entry.stdout_path(&layout, Size::S, 1);
        run_entry(
            &layout,
            &entry,
            &["0.25".to_string(), "55".to_string()],
            &stdout_path,
        )
        .unwrap();

        assert_eq!(fs::read_to_string(stdout_path).unwrap(), "0.25\n55\n");
    }

    #[test]
    fn failed_run_still_records_stdout() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::new(tmp.path());
        let entry = entry_in(&layout);
        fs::write(
            entry.impl_dir(&layout).join("run.sh"),
            "echo partial\nexit 3\n",
        )
        .unwrap();

        let stdout_path = entry.stdout_path(&layout, Size::M, 2);
        run_entry(&layout, &entry, &[], &stdout_path).unwrap();

        assert_eq!(fs::read_to_string(stdout_path).unwrap(), "partial\n");
    }
}
