//! Population-relative quartile scoring.
//!
//! Cut points are the interpolated 25th/50th/75th percentiles of the full
//! customer population, so scores are only meaningful for the population
//! they were computed against.

use rfm_core::{RfmError, RfmResult};
use tracing::debug;

/// Direction in which bucket labels are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelOrder {
    /// Lowest bucket gets 1. Used for frequency and monetary value.
    Ascending,
    /// Lowest bucket gets 4. Used for recency, where smaller is better.
    Descending,
}

/// Interpolated quantile of pre-sorted values at fraction `q` in [0, 1].
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let w = pos - lo as f64;
        sorted[lo] * (1.0 - w) + sorted[hi] * w
    }
}

/// The five quartile cut points (min, q1, median, q3, max). Adjacent cut
/// points must be strictly increasing; values too uniform to separate into
/// four buckets are a binning failure, reported rather than masked.
fn cut_points(values: &[f64], metric: &'static str) -> RfmResult<[f64; 5]> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let edges = [
        quantile(&sorted, 0.0),
        quantile(&sorted, 0.25),
        quantile(&sorted, 0.5),
        quantile(&sorted, 0.75),
        quantile(&sorted, 1.0),
    ];
    for pair in edges.windows(2) {
        if pair[1] <= pair[0] {
            return Err(RfmError::Binning {
                metric,
                detail: format!("cut points collapse at {}", pair[0]),
            });
        }
    }
    debug!(metric, ?edges, "computed quartile cut points");
    Ok(edges)
}

/// Bucket index 0..=3 with right-inclusive intervals; the minimum value
/// falls into the first bucket.
fn bucket(edges: &[f64; 5], value: f64) -> usize {
    if value <= edges[1] {
        0
    } else if value <= edges[2] {
        1
    } else if value <= edges[3] {
        2
    } else {
        3
    }
}

/// Assign each value its quartile label 1..=4 relative to the whole slice.
///
/// Fails with `Binning` when the population holds fewer than 4 customers or
/// when the values cannot be separated into four buckets.
pub fn score_quartiles(
    values: &[f64],
    order: LabelOrder,
    metric: &'static str,
) -> RfmResult<Vec<u8>> {
    if values.len() < 4 {
        return Err(RfmError::Binning {
            metric,
            detail: format!(
                "population of {} is too small to form 4 buckets",
                values.len()
            ),
        });
    }
    let edges = cut_points(values, metric)?;

    Ok(values
        .iter()
        .map(|&v| {
            let b = bucket(&edges, v) as u8;
            match order {
                LabelOrder::Ascending => b + 1,
                LabelOrder::Descending => 4 - b,
            }
        })
        .collect())
}

/// Ascending rank 1..=n with ties broken by position: among equal values the
/// earlier one gets the lower rank. Ranks are always distinct, which keeps
/// quartile cut points well defined even when many customers share a value.
pub fn first_seen_ranks(values: &[f64]) -> Vec<f64> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    // sort_by is stable, so equal values keep their input order.
    indices.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    for (pos, &i) in indices.iter().enumerate() {
        ranks[i] = (pos + 1) as f64;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascending_labels_follow_value_order() {
        let scores =
            score_quartiles(&[10.0, 20.0, 30.0, 40.0], LabelOrder::Ascending, "monetary").unwrap();
        assert_eq!(scores, vec![1, 2, 3, 4]);
    }

    #[test]
    fn descending_labels_reverse_value_order() {
        let scores =
            score_quartiles(&[1.0, 2.0, 3.0, 4.0], LabelOrder::Descending, "recency").unwrap();
        assert_eq!(scores, vec![4, 3, 2, 1]);
    }

    #[test]
    fn input_order_does_not_matter_for_labels() {
        let scores =
            score_quartiles(&[40.0, 10.0, 30.0, 20.0], LabelOrder::Ascending, "monetary").unwrap();
        assert_eq!(scores, vec![4, 1, 3, 2]);
    }

    #[test]
    fn eight_values_fill_each_bucket_twice() {
        let values: Vec<f64> = (1..=8).map(|v| v as f64 * 10.0).collect();
        let scores = score_quartiles(&values, LabelOrder::Ascending, "monetary").unwrap();
        assert_eq!(scores, vec![1, 1, 2, 2, 3, 3, 4, 4]);
    }

    #[test]
    fn all_scores_stay_in_range() {
        let values: Vec<f64> = (0..100).map(|v| (v * 7 % 31) as f64 + 0.5).collect();
        let scores = score_quartiles(&values, LabelOrder::Ascending, "monetary").unwrap();
        assert!(scores.iter().all(|&s| (1..=4).contains(&s)));
    }

    #[test]
    fn uniform_values_fail_binning() {
        let err =
            score_quartiles(&[5.0; 8], LabelOrder::Ascending, "recency").unwrap_err();
        assert!(matches!(err, RfmError::Binning { metric: "recency", .. }));
    }

    #[test]
    fn tiny_population_fails_binning() {
        let err = score_quartiles(&[1.0, 2.0, 3.0], LabelOrder::Ascending, "frequency").unwrap_err();
        assert!(matches!(err, RfmError::Binning { metric: "frequency", .. }));
    }

    #[test]
    fn ranks_are_distinct_and_first_seen_wins_ties() {
        let ranks = first_seen_ranks(&[2.0, 1.0, 2.0, 2.0]);
        assert_eq!(ranks, vec![2.0, 1.0, 3.0, 4.0]);
    }

    #[test]
    fn ranking_makes_tied_values_binnable() {
        // Eight customers all sharing one frequency: direct binning would
        // collapse, rank pre-processing separates them.
        let frequencies = [3.0; 8];
        assert!(score_quartiles(&frequencies, LabelOrder::Ascending, "frequency").is_err());

        let ranks = first_seen_ranks(&frequencies);
        let scores = score_quartiles(&ranks, LabelOrder::Ascending, "frequency").unwrap();
        assert_eq!(scores, vec![1, 1, 2, 2, 3, 3, 4, 4]);
    }
}
