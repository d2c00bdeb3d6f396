use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::benchmarks::{self, Benchmark};
use crate::console;
use crate::entry::BenchmarkEntry;
use crate::extract::{extract_entry_runtimes, EntryRuntimes};
use crate::layout::Layout;
use crate::specs;
use crate::stats;

/// Turn the stored results of the given entries into the report tree:
/// per-stage raw runtime CSVs and a stage summary CSV per benchmark, a
/// global ranking CSV, and `summary.md`. Entries whose benchmark is not
/// registered are reported and skipped.
pub fn generate_reports(layout: &Layout, entries: &[BenchmarkEntry]) -> Result<()> {
    let mut by_benchmark: BTreeMap<&str, Vec<&BenchmarkEntry>> = BTreeMap::new();
    for entry in entries {
        by_benchmark
            .entry(entry.benchmark_name.as_str())
            .or_default()
            .push(entry);
    }

    let mut summary_rows = Vec::new();
    let mut ranking_tables = Vec::new();

    for (benchmark_name, group) in &by_benchmark {
        let Some(benchmark) = benchmarks::find(benchmark_name) else {
            console::warn(&format!(
                "No benchmark named '{benchmark_name}' is registered; skipping its results."
            ));
            continue;
        };

        console::bold(&format!(
            "\nGenerating reports for '{benchmark_name}' with {} entries",
            group.len()
        ));

        let mut runtimes = Vec::new();
        for entry in group {
            let extracted = extract_entry_runtimes(layout, entry, benchmark)
                .with_context(|| format!("failed to extract runtimes of {entry}"))?;
            runtimes.push((*entry, extracted));
        }

        write_raw_runtime_csvs(layout, benchmark, &runtimes)?;
        write_stage_summary_csv(layout, benchmark, &runtimes)?;

        let ranking = rank_entries(layout, benchmark, &runtimes);
        summary_rows.extend(ranking.summary_rows.clone());
        ranking_tables.push((benchmark, ranking));
    }

    write_summary_csv(layout, &summary_rows)?;
    write_summary_markdown(layout, &ranking_tables)?;

    Ok(())
}

/// One line of `summary.csv`, also reused for the Markdown ranking tables.
#[derive(Debug, Clone)]
struct SummaryRow {
    benchmark: String,
    lang: String,
    descr: String,
    url: String,
    label: String,
    time: f64,
    relative: f64,
    rank: usize,
}

struct Ranking {
    /// Rows in entry order, ranks already assigned.
    summary_rows: Vec<SummaryRow>,
}

fn rank_entries(
    layout: &Layout,
    benchmark: &dyn Benchmark,
    runtimes: &[(&BenchmarkEntry, EntryRuntimes)],
) -> Ranking {
    let total = benchmark.stages()[0];
    let times: Vec<f64> = runtimes
        .iter()
        .map(|(_, extracted)| stats::median_of_largest_size(extracted, total))
        .collect();
    let fastest = times.iter().cloned().fold(f64::INFINITY, f64::min);

    let summary_rows = runtimes
        .iter()
        .zip(&times)
        .map(|((entry, _), &time)| SummaryRow {
            benchmark: entry.benchmark_name.clone(),
            lang: entry.language.clone(),
            descr: entry.impl_suffix(),
            url: entry.source_url(layout),
            label: entry.label(),
            time,
            relative: stats::relative(fastest, time),
            rank: stats::rank(&times, time),
        })
        .collect();

    Ranking { summary_rows }
}

fn write_raw_runtime_csvs(
    layout: &Layout,
    benchmark: &dyn Benchmark,
    runtimes: &[(&BenchmarkEntry, EntryRuntimes)],
) -> Result<()> {
    for (stage_id, stage) in benchmark.stages().iter().enumerate() {
        let mut rows = Vec::new();
        for (entry, extracted) in runtimes {
            for (size, run_id, time) in extracted.runs(stage) {
                rows.push(vec![
                    entry.language.clone(),
                    entry.impl_suffix(),
                    entry.label(),
                    size.to_string(),
                    run_id.to_string(),
                    time.to_string(),
                ]);
            }
        }
        let path = layout.raw_runtime_csv(benchmark.id(), benchmark.name(), stage_id + 1, stage);
        write_csv(
            &path,
            &["lang", "descr", "label", "size", "run_id", "time"],
            &rows,
        )?;
    }
    Ok(())
}

fn write_stage_summary_csv(
    layout: &Layout,
    benchmark: &dyn Benchmark,
    runtimes: &[(&BenchmarkEntry, EntryRuntimes)],
) -> Result<()> {
    let mut rows = Vec::new();
    for (entry, extracted) in runtimes {
        // The total dwarfs the per-stage bars, so it stays out of this file.
        for stage in benchmark.measured_stages() {
            rows.push(vec![
                entry.language.clone(),
                entry.impl_suffix(),
                entry.label(),
                stage.to_string(),
                stats::median_of_largest_size(extracted, stage).to_string(),
            ]);
        }
    }
    let path = layout.stage_summary_csv(benchmark.id(), benchmark.name());
    write_csv(&path, &["lang", "descr", "label", "stage", "time"], &rows)
}

fn write_summary_csv(layout: &Layout, rows: &[SummaryRow]) -> Result<()> {
    let csv_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.benchmark.clone(),
                row.lang.clone(),
                row.descr.clone(),
                row.url.clone(),
                row.label.clone(),
                row.time.to_string(),
                row.relative.to_string(),
                row.rank.to_string(),
            ]
        })
        .collect();
    write_csv(
        &layout.summary_csv(),
        &[
            "benchmark",
            "lang",
            "descr",
            "url",
            "label",
            "time",
            "relative",
            "rank",
        ],
        &csv_rows,
    )
}

fn write_summary_markdown(layout: &Layout, rankings: &[(&dyn Benchmark, Ranking)]) -> Result<()> {
    let generated = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let mut text = String::new();
    text.push_str("# Benchmark summary\n\n");
    text.push_str(&format!("Generated: {generated}\n\n"));

    text.push_str("## System\n\n");
    push_spec_table(&mut text, &specs::system_specs());

    text.push_str("## Software\n\n");
    push_spec_table(&mut text, &specs::software_specs());

    for (benchmark, ranking) in rankings {
        text.push_str(&format!("## {}\n\n", benchmark.title()));
        text.push_str("| Rank | Implementation | Time [s] | Relative |\n");
        text.push_str("| ---: | --- | ---: | ---: |\n");
        let mut rows = ranking.summary_rows.clone();
        rows.sort_by_key(|row| row.rank);
        for row in rows {
            text.push_str(&format!(
                "| {} | {} | {:.3} | {:.2} |\n",
                row.rank, row.label, row.time, row.relative
            ));
        }
        text.push('\n');
    }

    let path = layout.summary_markdown();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create '{}'", parent.display()))?;
    }
    fs::write(&path, text).with_context(|| format!("failed to write '{}'", path.display()))
}

fn push_spec_table(text: &mut String, specs: &[(String, String)]) {
    text.push_str("| | |\n| --- | --- |\n");
    for (label, value) in specs {
        text.push_str(&format!("| {label} | {value} |\n"));
    }
    text.push('\n');
}

fn write_csv(path: &Path, schema: &[&str], rows: &[Vec<String>]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create '{}'", parent.display()))?;
    }
    let mut text = schema.join(";");
    text.push('\n');
    for row in rows {
        debug_assert_eq!(row.len(), schema.len());
        text.push_str(&row.join(";"));
        text.push('\n');
    }
    fs::write(path, text).with_context(|| format!("failed to write '{}'", path.display()))
}
