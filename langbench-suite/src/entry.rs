use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

use crate::benchmarks::Size;
use crate::console;
use crate::layout::{stdout_file_name, Layout};

/// Optional per-entry metadata, read from `benchmark.yml` in the entry
/// directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct EntryMeta {
    #[serde(default)]
    pub description: Option<String>,
    /// Path of the entry's main source file, relative to the entry
    /// directory. Rendered as the `url` column of the summary CSV.
    #[serde(default, rename = "source-file")]
    pub source_file: Option<String>,
}

/// One implementation of one benchmark in one language, identified by its
/// position in the `implementations/` tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BenchmarkEntry {
    pub language: String,
    pub benchmark_id: u32,
    pub benchmark_name: String,
    pub impl_id: u32,
    pub impl_name: String,
    pub meta: Option<EntryMeta>,
}

impl BenchmarkEntry {
    fn dir_components(&self) -> (String, String) {
        (
            format!("{:02}_{}", self.benchmark_id, self.benchmark_name),
            format!("{:02}_{}", self.impl_id, self.impl_name),
        )
    }

    /// Directory holding the entry's scripts and sources.
    pub fn impl_dir(&self, layout: &Layout) -> PathBuf {
        let (benchmark, implementation) = self.dir_components();
        layout
            .implementations_dir()
            .join(&self.language)
            .join(benchmark)
            .join(implementation)
    }

    /// Directory the entry's captured stdout files are stored under.
    pub fn result_dir(&self, layout: &Layout) -> PathBuf {
        let (benchmark, implementation) = self.dir_components();
        layout
            .results_dir()
            .join(&self.language)
            .join(benchmark)
            .join(implementation)
    }

    pub fn stdout_path(&self, layout: &Layout, size: Size, run_id: u32) -> PathBuf {
        self.result_dir(layout).join(stdout_file_name(size, run_id))
    }

    /// All stored stdout files for one size, sorted by run id.
    pub fn result_files(&self, layout: &Layout, size: Size) -> Result<Vec<PathBuf>> {
        let pattern = self
            .result_dir(layout)
            .join(format!("stdout_run_{size}_*"));
        let pattern = pattern
            .to_str()
            .with_context(|| format!("non-UTF-8 result path for {self}"))?
            .to_string();
        let mut files: Vec<PathBuf> = glob::glob(&pattern)
            .with_context(|| format!("bad glob pattern '{pattern}'"))?
            .filter_map(|candidate| candidate.ok())
            .collect();
        files.sort();
        Ok(files)
    }

    /// Implementation name with underscores rendered as a comma list,
    /// used as the `descr` report column.
    pub fn impl_suffix(&self) -> String {
        self.impl_name.split('_').collect::<Vec<_>>().join(", ")
    }

    /// `<language> (<descr>)`, the display label in all reports.
    pub fn label(&self) -> String {
        format!("{} ({})", self.language, self.impl_suffix())
    }

    /// The entry's source file, resolved relative to its directory. Empty
    /// when the metadata names none.
    pub fn source_url(&self, layout: &Layout) -> String {
        match self.meta.as_ref().and_then(|meta| meta.source_file.as_ref()) {
            Some(source_file) => self.impl_dir(layout).join(source_file).display().to_string(),
            None => String::new(),
        }
    }

    pub fn description(&self) -> String {
        self.meta
            .as_ref()
            .and_then(|meta| meta.description.clone())
            .unwrap_or_default()
    }

    fn load_meta(&mut self, layout: &Layout) {
        let path = self.impl_dir(layout).join("benchmark.yml");
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(_) => return,
        };
        match serde_yaml::from_str(&text) {
            Ok(meta) => self.meta = Some(meta),
            Err(error) => {
                console::warn(&format!(
                    "Failed to parse meta data from '{}': {error}",
                    path.display()
                ));
            }
        }
    }
}

impl std::fmt::Display for BenchmarkEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} / {} / {}",
            self.language, self.benchmark_name, self.impl_name
        )
    }
}

/// Scan a three-level tree (`<Language>/<id>_<Benchmark>/<id>_<Impl>`) for
/// entries. `base` is either the implementations or the results directory;
/// directories whose lower two components don't match the `<id>_<name>`
/// scheme are ignored. Entries are returned sorted by (language, benchmark
/// id, impl id, path).
pub fn discover_entries(layout: &Layout, base: &Path) -> Result<Vec<BenchmarkEntry>> {
    let id_name = Regex::new(r"^(\d+)_(.*)$").expect("static regex");

    let mut entries = Vec::new();
    for language_dir in sorted_subdirs(base)? {
        let language = dir_name(&language_dir);
        for benchmark_dir in sorted_subdirs(&language_dir)? {
            let Some((benchmark_id, benchmark_name)) = split_id_name(&id_name, &benchmark_dir)
            else {
                continue;
            };
            for impl_dir in sorted_subdirs(&benchmark_dir)? {
                let Some((impl_id, impl_name)) = split_id_name(&id_name, &impl_dir) else {
                    continue;
                };
                let mut entry = BenchmarkEntry {
                    language: language.clone(),
                    benchmark_id,
                    benchmark_name: benchmark_name.clone(),
                    impl_id,
                    impl_name,
                    meta: None,
                };
                entry.load_meta(layout);
                entries.push(entry);
            }
        }
    }

    entries.sort_by(|a, b| {
        (a.language.as_str(), a.benchmark_id, a.impl_id, a.impl_dir(layout)).cmp(&(
            b.language.as_str(),
            b.benchmark_id,
            b.impl_id,
            b.impl_dir(layout),
        ))
    });

    Ok(entries)
}

/// Keep the entries matching the requested languages and benchmark names.
/// An empty filter list keeps everything.
pub fn filter_entries(
    entries: Vec<BenchmarkEntry>,
    languages: &[String],
    benchmarks: &[String],
) -> Vec<BenchmarkEntry> {
    entries
        .into_iter()
        .filter(|entry| {
            let language_ok = languages.is_empty() || languages.contains(&entry.language);
            let benchmark_ok =
                benchmarks.is_empty() || benchmarks.contains(&entry.benchmark_name);
            language_ok && benchmark_ok
        })
        .collect()
}

fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut subdirs: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory '{}'", dir.display()))?
        .filter_map(|dir_entry| dir_entry.ok())
        .map(|dir_entry| dir_entry.path())
        .filter(|path| path.is_dir())
        .collect();
    subdirs.sort();
    Ok(subdirs)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn split_id_name(id_name: &Regex, path: &Path) -> Option<(u32, String)> {
    let name = dir_name(path);
    let captures = id_name.captures(&name)?;
    let id = captures[1].parse().ok()?;
    Some((id, captures[2].to_string()))
}
