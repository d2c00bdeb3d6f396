use super::{Benchmark, Size};

/// The Fibonacci workload: compute the N-th Fibonacci number with three
/// popular implementations (naive recursion, tail recursion, iterative).
///
/// The naive stage runs once; the other two repeat the computation M times,
/// folding each result into a checksum modulo 2147483647 so the work cannot
/// be optimized away. Sizes scale M with the 1.45 growth factor of the
/// naive recursion, keeping all three stages in a measurable range.
pub struct Fibonacci;

impl Fibonacci {
    fn inputs(size: Size) -> (u64, u64) {
        match size {
            Size::S => (34, pow_trunc(1.45, 32.0)),
            Size::M => (36, pow_trunc(1.45, 34.0)),
            Size::L => (38, pow_trunc(1.45, 36.0)),
        }
    }
}

fn pow_trunc(base: f64, exp: f64) -> u64 {
    base.powf(exp) as u64
}

impl Benchmark for Fibonacci {
    fn id(&self) -> u32 {
        3
    }

    fn name(&self) -> &'static str {
        "Fibonacci"
    }

    fn title(&self) -> &'static str {
        "Fibonacci"
    }

    fn description(&self) -> &'static str {
        "Compute the N-th Fibonacci number using naive recursion (1 \
         iteration), tail recursion (M iterations), and an iterative loop \
         (M iterations), each in its own benchmark stage. The repeated \
         stages accumulate `checksum = (checksum + fib(N)) % 2147483647` \
         as control output."
    }

    fn stages(&self) -> &'static [&'static str] {
        &["Total", "Naive Recursion", "Tail Recursion", "Iterative"]
    }

    fn args(&self, size: Size) -> Vec<String> {
        let (n, m) = Self::inputs(size);
        vec![n.to_string(), m.to_string()]
    }

    fn size_description(&self, size: Size) -> String {
        let (n, m) = Self::inputs(size);
        format!("N = {n}, M = {m}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_scale_the_repetition_count() {
        assert_eq!(Fibonacci.args(Size::S), ["34", "145806"]);
        assert_eq!(Fibonacci.args(Size::M), ["36", "306557"]);
        assert_eq!(Fibonacci.args(Size::L), ["38", "644537"]);
    }

    #[test]
    fn size_descriptions_name_both_inputs() {
        assert_eq!(Fibonacci.size_description(Size::S), "N = 34, M = 145806");
    }

    #[test]
    fn total_is_computed_not_measured() {
        assert_eq!(
            Fibonacci.measured_stages(),
            ["Naive Recursion", "Tail Recursion", "Iterative"]
        );
    }
}
