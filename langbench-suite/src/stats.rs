use crate::benchmarks::Size;
use crate::extract::EntryRuntimes;

/// Midpoint of the sorted values; mean of the two central values for even
/// counts. NaN for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// The headline number for one entry and stage: the median over runs of
/// the largest size. Small and medium runs exist to show scaling, not to
/// rank entries.
pub fn median_of_largest_size(runtimes: &EntryRuntimes, stage: &str) -> f64 {
    median(runtimes.times(stage, Size::L))
}

/// Competition rank: 1 plus the number of strictly faster times.
pub fn rank(all_times: &[f64], time: f64) -> usize {
    1 + all_times.iter().filter(|&&other| other < time).count()
}

/// Runtime relative to the fastest entry; 1.0 for the fastest itself.
pub fn relative(fastest: f64, time: f64) -> f64 {
    time / fastest
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn median_of_odd_count_is_the_middle_value() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
    }

    #[test]
    fn median_of_even_count_averages_the_central_pair() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn median_of_empty_slice_is_nan() {
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn ranks_count_strictly_faster_entries() {
        let times = [1.0, 2.0, 2.0, 3.0];
        assert_eq!(rank(&times, 1.0), 1);
        // Ties share a rank.
        assert_eq!(rank(&times, 2.0), 2);
        assert_eq!(rank(&times, 3.0), 4);
    }

    proptest! {
        #[test]
        fn median_lies_within_the_value_range(values in prop::collection::vec(0.0f64..1e6, 1..50)) {
            let m = median(&values);
            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(m >= min && m <= max);
        }

        #[test]
        fn median_is_permutation_invariant(mut values in prop::collection::vec(0.0f64..1e6, 1..20)) {
            let before = median(&values);
            values.reverse();
            prop_assert_eq!(before, median(&values));
        }
    }
}
