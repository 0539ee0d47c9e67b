use log::debug;
use serde::{Deserialize, Serialize};

use crate::utils::{clamp, dedupe_sorted, percent_to_value, snap_to_nearest, value_to_percent};

/// Value added per keyboard arrow step in normal mode.
pub const UNIT_STEP: f64 = 1.0;

/// The current selection. `min <= max` holds after every operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeValue {
    pub min: f64,
    pub max: f64,
}

/// Which of the two handles an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Min,
    Max,
}

/// Track boundary used by the Home/End jump operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

/// The value domain the selection lives in.
///
/// `Normal` selects continuously within `[lo, hi]`; `Fixed` snaps to a
/// discrete set of values. Keeping the mode as a tagged variant gives every
/// operation a single dispatch point instead of scattered mode checks.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeDomain {
    Normal { lo: f64, hi: f64 },
    Fixed { values: Vec<f64> },
}

impl RangeDomain {
    pub fn normal(lo: f64, hi: f64) -> Self {
        Self::Normal { lo, hi }
    }

    /// Build a fixed domain from arbitrary input; duplicates are collapsed
    /// and the set is kept ascending.
    pub fn fixed(values: &[f64]) -> Self {
        Self::Fixed {
            values: dedupe_sorted(values),
        }
    }

    /// Lower effective bound. An empty fixed set defaults to 0.
    pub fn lo(&self) -> f64 {
        match self {
            Self::Normal { lo, .. } => *lo,
            Self::Fixed { values } => values.first().copied().unwrap_or(0.0),
        }
    }

    /// Upper effective bound. An empty fixed set defaults to 0.
    pub fn hi(&self) -> f64 {
        match self {
            Self::Normal { hi, .. } => *hi,
            Self::Fixed { values } => values.last().copied().unwrap_or(0.0),
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed { .. })
    }

    /// Members of the fixed set, empty for normal domains. Used for tick
    /// rendering and index stepping.
    pub fn fixed_values(&self) -> &[f64] {
        match self {
            Self::Normal { .. } => &[],
            Self::Fixed { values } => values,
        }
    }

    /// Snap `v` onto the domain: identity for normal, nearest member for
    /// fixed.
    pub fn constrain(&self, v: f64) -> f64 {
        match self {
            Self::Normal { .. } => v,
            Self::Fixed { values } => snap_to_nearest(v, values),
        }
    }

    /// Domain value at a track position in `[0, 100]`, snapped for fixed
    /// domains but not yet clamped against the opposite handle.
    pub fn value_at_percent(&self, pct: f64) -> f64 {
        self.constrain(percent_to_value(pct, self.lo(), self.hi()))
    }

    /// Track position of `v` in `[0, 100]`.
    pub fn percent_of(&self, v: f64) -> f64 {
        value_to_percent(v, self.lo(), self.hi())
    }
}

/// Operations accepted by the range state machine. The interaction layer
/// translates raw pointer/keyboard/edit events into these.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeOp {
    SetMin(f64),
    SetMax(f64),
    /// Move a handle by `delta` unit steps (normal) or set members (fixed).
    Step(Handle, i32),
    /// Send a handle to a track boundary without crossing its sibling.
    Jump(Handle, Boundary),
    /// Commit label-edit text for a handle. Ignored in fixed mode.
    SubmitLabel(Handle, String),
    /// Place a handle at a track position in `[0, 100]`.
    DragTo(Handle, f64),
}

/// The range state machine: the selected `(min, max)` pair plus the domain
/// it is constrained to.
///
/// Invariants, re-established by every operation:
/// `lo <= value.min <= value.max <= hi`, and in fixed mode both values are
/// members of the set.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeState {
    domain: RangeDomain,
    value: RangeValue,
}

impl RangeState {
    /// Initialize the selection from optional starting values.
    ///
    /// Missing candidates default to the effective bounds; fixed-mode
    /// candidates snap to the set before clamping. Min is clamped into
    /// `[lo, hi]` first and max into `[min, hi]` second, so inverted or
    /// out-of-range inputs still produce an ordered, in-bounds pair.
    pub fn new(domain: RangeDomain, initial_min: Option<f64>, initial_max: Option<f64>) -> Self {
        let (lo, hi) = (domain.lo(), domain.hi());
        let cmin = domain.constrain(initial_min.unwrap_or(lo));
        let cmax = domain.constrain(initial_max.unwrap_or(hi));
        let min = clamp(cmin, lo, hi);
        let max = clamp(cmax, min, hi);
        Self {
            domain,
            value: RangeValue { min, max },
        }
    }

    pub fn value(&self) -> RangeValue {
        self.value
    }

    pub fn domain(&self) -> &RangeDomain {
        &self.domain
    }

    pub fn lo(&self) -> f64 {
        self.domain.lo()
    }

    pub fn hi(&self) -> f64 {
        self.domain.hi()
    }

    pub fn handle_value(&self, handle: Handle) -> f64 {
        match handle {
            Handle::Min => self.value.min,
            Handle::Max => self.value.max,
        }
    }

    /// Apply an operation, returning whether the selection changed.
    ///
    /// A `false` return means the state is bit-identical to before and no
    /// change notification should fire.
    pub fn apply(&mut self, op: RangeOp) -> bool {
        match op {
            RangeOp::SetMin(n) => self.set_min(n),
            RangeOp::SetMax(n) => self.set_max(n),
            RangeOp::Step(handle, delta) => self.step(handle, delta),
            RangeOp::Jump(handle, boundary) => self.jump(handle, boundary),
            RangeOp::SubmitLabel(handle, text) => self.submit_label(handle, &text),
            RangeOp::DragTo(handle, pct) => self.drag_to(handle, pct),
        }
    }

    fn set_min(&mut self, n: f64) -> bool {
        let next = clamp(n, self.lo(), self.value.max);
        if next == self.value.min {
            return false;
        }
        debug!("range min {} -> {}", self.value.min, next);
        self.value.min = next;
        true
    }

    fn set_max(&mut self, n: f64) -> bool {
        let next = clamp(n, self.value.min, self.hi());
        if next == self.value.max {
            return false;
        }
        debug!("range max {} -> {}", self.value.max, next);
        self.value.max = next;
        true
    }

    fn set(&mut self, handle: Handle, n: f64) -> bool {
        match handle {
            Handle::Min => self.set_min(n),
            Handle::Max => self.set_max(n),
        }
    }

    fn step(&mut self, handle: Handle, delta: i32) -> bool {
        let current = self.handle_value(handle);
        let target = match &self.domain {
            RangeDomain::Normal { .. } => current + f64::from(delta) * UNIT_STEP,
            RangeDomain::Fixed { values } => {
                if values.is_empty() {
                    return false;
                }
                // Walk by index so off-set values land on a member first.
                let snapped = snap_to_nearest(current, values);
                let idx = values.iter().position(|&v| v == snapped).unwrap_or(0);
                let next = (idx as i64 + i64::from(delta)).clamp(0, values.len() as i64 - 1);
                values[next as usize]
            }
        };
        self.set(handle, target)
    }

    fn jump(&mut self, handle: Handle, boundary: Boundary) -> bool {
        match (handle, boundary) {
            (Handle::Min, Boundary::Start) => self.set_min(self.lo()),
            (Handle::Min, Boundary::End) => self.set_min(self.value.max),
            (Handle::Max, Boundary::Start) => self.set_max(self.value.min),
            (Handle::Max, Boundary::End) => self.set_max(self.hi()),
        }
    }

    fn submit_label(&mut self, handle: Handle, text: &str) -> bool {
        // Labels are read-only in fixed mode.
        if self.domain.is_fixed() {
            return false;
        }
        match parse_label_value(text) {
            Some(n) => self.set(handle, n),
            None => false,
        }
    }

    fn drag_to(&mut self, handle: Handle, pct: f64) -> bool {
        let target = self.domain.value_at_percent(pct);
        self.set(handle, target)
    }
}

/// Parse label-edit text as a decimal number, accepting ',' as a decimal
/// separator alias. Returns `None` for anything that does not parse to a
/// real number.
pub fn parse_label_value(text: &str) -> Option<f64> {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| !n.is_nan())
}

/// Human-readable value text: two decimals plus the currency suffix when
/// one is configured, plain decimal display otherwise.
pub fn format_value(n: f64, currency: Option<&str>) -> String {
    match currency {
        Some(suffix) => format!("{n:.2}{suffix}"),
        None => format!("{n}"),
    }
}

pub mod components;
pub mod hooks;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    fn normal_state(lo: f64, hi: f64, imin: f64, imax: f64) -> RangeState {
        RangeState::new(RangeDomain::normal(lo, hi), Some(imin), Some(imax))
    }

    #[test]
    fn init_defaults_to_full_range() {
        let state = RangeState::new(RangeDomain::normal(1.0, 100.0), None, None);
        assert_eq!(state.value(), RangeValue { min: 1.0, max: 100.0 });
    }

    #[test]
    fn init_clamps_inverted_out_of_range_pair() {
        let state = normal_state(0.0, 100.0, 150.0, -10.0);
        assert_eq!(state.value(), RangeValue { min: 100.0, max: 100.0 });
    }

    #[test]
    fn init_snaps_fixed_candidates() {
        let domain = RangeDomain::fixed(&[1.99, 5.99, 10.99, 30.99]);
        let state = RangeState::new(domain, Some(4.0), Some(20.0));
        assert_eq!(state.value(), RangeValue { min: 5.99, max: 10.99 });
    }

    #[test]
    fn set_min_never_crosses_max() {
        let mut state = normal_state(0.0, 100.0, 10.0, 70.0);
        assert!(state.apply(RangeOp::SetMin(90.0)));
        assert_eq!(state.value().min, 70.0);
        assert!(state.value().min <= state.value().max);
    }

    #[test]
    fn set_max_never_crosses_min() {
        let mut state = normal_state(0.0, 100.0, 10.0, 70.0);
        assert!(state.apply(RangeOp::SetMax(-5.0)));
        assert_eq!(state.value().max, 10.0);
        assert!(state.value().min <= state.value().max);
    }

    #[test]
    fn reapplying_current_value_is_a_silent_no_op() {
        let mut state = normal_state(0.0, 100.0, 10.0, 70.0);
        let before = state.clone();
        assert!(!state.apply(RangeOp::SetMin(10.0)));
        assert_eq!(state, before);
    }

    #[test]
    fn end_key_moves_min_up_to_max_only() {
        let mut state = normal_state(0.0, 10.0, 4.0, 6.0);
        state.apply(RangeOp::Jump(Handle::Min, Boundary::End));
        assert_eq!(state.value(), RangeValue { min: 6.0, max: 6.0 });
    }

    #[test]
    fn home_and_end_reach_the_track_boundaries() {
        let mut state = normal_state(0.0, 10.0, 4.0, 6.0);
        state.apply(RangeOp::Jump(Handle::Min, Boundary::Start));
        state.apply(RangeOp::Jump(Handle::Max, Boundary::End));
        assert_eq!(state.value(), RangeValue { min: 0.0, max: 10.0 });
    }

    #[test]
    fn normal_step_moves_by_unit_and_page_deltas() {
        let mut state = normal_state(0.0, 100.0, 10.0, 70.0);
        assert!(state.apply(RangeOp::Step(Handle::Min, 1)));
        assert_eq!(state.value().min, 11.0);
        assert!(state.apply(RangeOp::Step(Handle::Max, -10)));
        assert_eq!(state.value().max, 60.0);
    }

    #[test]
    fn fixed_step_walks_the_set_by_index() {
        let domain = RangeDomain::fixed(&[1.99, 5.99, 10.99, 30.99]);
        let mut state = RangeState::new(domain, None, None);
        assert!(state.apply(RangeOp::Step(Handle::Min, 1)));
        assert_eq!(state.value().min, 5.99);
        // Index clamps at the ends of the set.
        assert!(!state.apply(RangeOp::Step(Handle::Max, 5)));
        assert_eq!(state.value().max, 30.99);
        assert!(state.apply(RangeOp::Step(Handle::Max, -2)));
        assert_eq!(state.value().max, 5.99);
    }

    #[test]
    fn fixed_values_stay_members_under_drag() {
        let set = [1.99, 5.99, 10.99, 30.99, 50.99, 70.99];
        let mut state = RangeState::new(RangeDomain::fixed(&set), None, None);
        for pct in [3.0, 17.0, 42.0, 68.0, 99.0] {
            state.apply(RangeOp::DragTo(Handle::Min, pct));
            state.apply(RangeOp::DragTo(Handle::Max, 100.0 - pct));
            let v = state.value();
            assert!(set.contains(&v.min) && set.contains(&v.max));
            assert!(v.min <= v.max);
        }
    }

    #[test]
    fn drag_to_clamps_against_the_sibling_handle() {
        let mut state = normal_state(0.0, 100.0, 10.0, 70.0);
        state.apply(RangeOp::DragTo(Handle::Min, 95.0));
        assert_eq!(state.value().min, 70.0);
        state.apply(RangeOp::DragTo(Handle::Max, 0.0));
        assert_eq!(state.value().max, 70.0);
    }

    #[test]
    fn label_submit_parses_comma_decimals() {
        let mut state = normal_state(0.0, 100.0, 10.0, 70.0);
        assert!(state.apply(RangeOp::SubmitLabel(Handle::Min, "25,5".into())));
        assert_eq!(state.value().min, 25.5);
    }

    #[test]
    fn label_submit_ignores_garbage_and_keeps_prior_value() {
        let mut state = normal_state(0.0, 100.0, 10.0, 70.0);
        for text in ["abc", "", "12.3.4", "NaN"] {
            assert!(!state.apply(RangeOp::SubmitLabel(Handle::Min, text.into())));
        }
        assert_eq!(state.value().min, 10.0);
    }

    #[test]
    fn fixed_mode_labels_are_not_editable() {
        let domain = RangeDomain::fixed(&[1.99, 5.99, 10.99]);
        let mut state = RangeState::new(domain, None, None);
        let before = state.value();
        assert!(!state.apply(RangeOp::SubmitLabel(Handle::Min, "5.99".into())));
        assert!(!state.apply(RangeOp::SubmitLabel(Handle::Max, "1.99".into())));
        assert_eq!(state.value(), before);
    }

    #[test]
    fn empty_fixed_set_degenerates_to_zero_bounds() {
        let mut state = RangeState::new(RangeDomain::fixed(&[]), None, None);
        assert_eq!(state.value(), RangeValue { min: 0.0, max: 0.0 });
        assert!(!state.apply(RangeOp::Step(Handle::Min, 1)));
        assert!(!state.apply(RangeOp::DragTo(Handle::Max, 50.0)));
    }

    #[test]
    fn invariants_hold_across_a_mixed_operation_sequence() {
        let mut state = normal_state(0.0, 100.0, 10.0, 70.0);
        let ops = [
            RangeOp::DragTo(Handle::Max, 12.0),
            RangeOp::Step(Handle::Min, 25),
            RangeOp::Jump(Handle::Min, Boundary::Start),
            RangeOp::SubmitLabel(Handle::Max, "3,5".into()),
            RangeOp::SetMin(1000.0),
            RangeOp::SetMax(-1000.0),
            RangeOp::Step(Handle::Max, -40),
        ];
        for op in ops {
            state.apply(op);
            let v = state.value();
            assert!(0.0 <= v.min && v.min <= v.max && v.max <= 100.0);
        }
    }

    #[test]
    fn format_value_applies_currency_and_decimals() {
        assert_eq!(format_value(5.0, Some("€")), "5.00€");
        assert_eq!(format_value(10.0, None), "10");
        assert_eq!(format_value(10.5, None), "10.5");
    }
}
