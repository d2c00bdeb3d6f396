use std::fs;
use std::process::Command;

use regex::Regex;

const UNKNOWN: &str = "failed to determine";

/// Best-effort machine description for the report header. Probes that
/// fail on the current platform yield "failed to determine" instead of
/// an error; a report with gaps beats no report.
pub fn system_specs() -> Vec<(String, String)> {
    let probes: [(&str, fn() -> Option<String>); 10] = [
        ("OS", os_name),
        ("Distribution", distribution),
        ("Kernel", kernel),
        ("CPU", cpu_model),
        ("Number of cores", cpu_cores),
        ("L1 data cache size", || lscpu_field(r"L1d cache:\s+(.*)")),
        ("L1 instruction cache size", || {
            lscpu_field(r"L1i cache:\s+(.*)")
        }),
        ("L2 cache size", || lscpu_field(r"L2 cache:\s+(.*)")),
        ("L3 cache size", || lscpu_field(r"L3 cache:\s+(.*)")),
        ("Memory", total_memory),
    ];

    probes
        .iter()
        .map(|(label, probe)| {
            (
                label.to_string(),
                probe().unwrap_or_else(|| UNKNOWN.to_string()),
            )
        })
        .collect()
}

/// First version line of the compilers and interpreters the suite's
/// entries commonly build with.
pub fn software_specs() -> Vec<(String, String)> {
    let probes = [
        ("Rust", ["rustc", "--version"]),
        ("GCC", ["gcc", "--version"]),
        ("Go", ["go", "version"]),
        ("Python", ["python3", "--version"]),
    ];

    probes
        .iter()
        .map(|(label, command)| {
            (
                label.to_string(),
                first_line_of(command).unwrap_or_else(|| UNKNOWN.to_string()),
            )
        })
        .collect()
}

fn os_name() -> Option<String> {
    match std::env::consts::OS {
        "" => None,
        os => {
            let mut chars = os.chars();
            let first = chars.next()?;
            Some(first.to_uppercase().chain(chars).collect())
        }
    }
}

fn kernel() -> Option<String> {
    first_line_of(&["uname", "-r"])
}

fn distribution() -> Option<String> {
    match_line_in_file("/etc/lsb-release", r#"DISTRIB_DESCRIPTION="(.*)""#)
}

fn cpu_model() -> Option<String> {
    match_line_in_file("/proc/cpuinfo", r"model name\s+:\s+(.*)")
}

fn cpu_cores() -> Option<String> {
    match_line_in_file("/proc/cpuinfo", r"cpu cores\s+:\s+(.*)")
}

fn total_memory() -> Option<String> {
    let kb: f64 = match_line_in_file("/proc/meminfo", r"MemTotal:\s+(\d+)")?
        .parse()
        .ok()?;
    Some(format!("{:.1} MB", kb / 1024.0))
}

fn lscpu_field(pattern: &str) -> Option<String> {
    let output = Command::new("lscpu").output().ok()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    match_line_in_text(&stdout, pattern)
}

fn match_line_in_file(path: &str, pattern: &str) -> Option<String> {
    let text = fs::read_to_string(path).ok()?;
    match_line_in_text(&text, pattern)
}

fn match_line_in_text(text: &str, pattern: &str) -> Option<String> {
    let regex = Regex::new(pattern).ok()?;
    text.lines()
        .find_map(|line| regex.captures(line))
        .map(|captures| captures[1].trim().to_string())
}

/// First stdout line of a command; some tools print their version to
/// stderr, which is consulted when stdout is empty.
fn first_line_of(command: &[&str]) -> Option<String> {
    let output = Command::new(command[0]).args(&command[1..]).output().ok()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let text = if stdout.trim().is_empty() {
        String::from_utf8_lossy(&output.stderr).into_owned()
    } else {
        stdout.into_owned()
    };
    let line = text.lines().next()?.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}
