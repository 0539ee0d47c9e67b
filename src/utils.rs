//! Pure numeric helpers for the range widget: value↔percent mapping,
//! clamping, and fixed-set snapping. No DOM types here, so everything in
//! this module runs under plain `cargo test`.

/// Bound `v` to `[lo, hi]`.
///
/// Callers must uphold `lo <= hi`; the result is literally
/// `min(hi, max(lo, v))` and inverts when that contract is broken.
#[inline]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    hi.min(lo.max(v))
}

/// Map a value in `[lo, hi]` to its track position in `[0, 100]`.
///
/// A degenerate domain (`hi == lo`) maps everything to 0 instead of
/// dividing by zero.
#[inline]
pub fn value_to_percent(v: f64, lo: f64, hi: f64) -> f64 {
    if hi == lo {
        0.0
    } else {
        (v - lo) / (hi - lo) * 100.0
    }
}

/// Inverse of [`value_to_percent`]. No clamping is applied; callers clamp
/// separately.
#[inline]
pub fn percent_to_value(pct: f64, lo: f64, hi: f64) -> f64 {
    lo + pct / 100.0 * (hi - lo)
}

/// Return the unique values of `values` in ascending order.
///
/// Only identical values are collapsed; there is no tolerance merging.
pub fn dedupe_sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out.dedup();
    out
}

/// Return the element of `sorted` closest to `v`.
///
/// Ties resolve to the first candidate encountered left to right, so with
/// an ascending set the lower value wins. An empty set returns `v`
/// unchanged.
pub fn snap_to_nearest(v: f64, sorted: &[f64]) -> f64 {
    let Some((&first, rest)) = sorted.split_first() else {
        return v;
    };
    let mut best = first;
    for &candidate in rest {
        if (candidate - v).abs() < (best - v).abs() {
            best = candidate;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(5.0, 1.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 1.0, 10.0), 1.0);
        assert_eq!(clamp(99.0, 1.0, 10.0), 10.0);
    }

    #[test]
    fn percent_mapping() {
        assert_eq!(value_to_percent(50.0, 0.0, 100.0), 50.0);
        assert_eq!(percent_to_value(25.0, 0.0, 200.0), 50.0);
    }

    #[test]
    fn percent_mapping_round_trips() {
        for v in [0.0, 13.7, 55.5, 199.0, 200.0] {
            let pct = value_to_percent(v, 0.0, 200.0);
            assert!((percent_to_value(pct, 0.0, 200.0) - v).abs() < 1e-9);
        }
    }

    #[test]
    fn degenerate_domain_maps_to_zero() {
        assert_eq!(value_to_percent(42.0, 7.0, 7.0), 0.0);
    }

    #[test]
    fn dedupe_sorted_collapses_and_orders() {
        assert_eq!(dedupe_sorted(&[5.0, 1.0, 5.0, 3.0]), vec![1.0, 3.0, 5.0]);
        assert!(dedupe_sorted(&[]).is_empty());
    }

    #[test]
    fn snap_picks_nearest() {
        assert_eq!(snap_to_nearest(6.0, &[1.0, 5.0, 10.0]), 5.0);
        assert_eq!(snap_to_nearest(8.0, &[1.0, 5.0, 10.0]), 10.0);
    }

    #[test]
    fn snap_tie_prefers_lower_value() {
        assert_eq!(snap_to_nearest(7.5, &[5.0, 10.0]), 5.0);
    }

    #[test]
    fn snap_on_empty_set_is_identity() {
        assert_eq!(snap_to_nearest(3.2, &[]), 3.2);
    }
}
