mod fibonacci;

use std::fmt;

use anyhow::Result;

pub use fibonacci::Fibonacci;

use crate::layout::Layout;

/// Input size class of a benchmark run. Sizes order from smallest to
/// largest; summary statistics are taken over the largest size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Size {
    S,
    M,
    L,
}

impl Size {
    pub const ALL: [Size; 3] = [Size::S, Size::M, Size::L];
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
        };
        f.write_str(label)
    }
}

/// Static description of one benchmark: what to pass to the entries and
/// how to read the stage times back out of their stdout.
///
/// Every workload prints one line per measured stage (elapsed seconds as a
/// float) before its control output. `stages()` lists the computed "Total"
/// stage first, followed by the measured stages in print order.
pub trait Benchmark {
    /// Stable numeric id, embedded in directory names on disk.
    fn id(&self) -> u32;

    /// Name as it appears in directory names and filters.
    fn name(&self) -> &'static str;

    fn title(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn stages(&self) -> &'static [&'static str];

    /// The stages actually timed by the workload, i.e. everything but the
    /// computed total.
    fn measured_stages(&self) -> &'static [&'static str] {
        &self.stages()[1..]
    }

    /// Command-line arguments passed to an entry's `run.sh` for a size.
    fn args(&self, size: Size) -> Vec<String>;

    fn size_description(&self, size: Size) -> String;

    /// Hook for generating input data before any entry runs. Most
    /// workloads need none.
    fn prepare_data(&self, _layout: &Layout) -> Result<()> {
        Ok(())
    }
}

/// Look up a registered benchmark by its directory name.
pub fn find(name: &str) -> Option<&'static dyn Benchmark> {
    match name {
        "Fibonacci" => Some(&Fibonacci),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_knows_fibonacci() {
        let benchmark = find("Fibonacci").expect("Fibonacci is registered");
        assert_eq!(benchmark.id(), 3);
        assert_eq!(benchmark.stages()[0], "Total");
        assert_eq!(benchmark.measured_stages().len(), benchmark.stages().len() - 1);
    }

    #[test]
    fn registry_rejects_unknown_names() {
        assert!(find("Wordcount").is_none());
        assert!(find("fibonacci").is_none());
    }

    #[test]
    fn sizes_order_smallest_to_largest() {
        assert!(Size::S < Size::M && Size::M < Size::L);
        assert_eq!(Size::L.to_string(), "L");
    }
}
