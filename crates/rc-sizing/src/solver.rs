//! Capacity solver.
//!
//! Turns an estimated load into a count of refrigeration units:
//!
//! ```text
//! required    = load * (1 + safety% / 100)
//! operational = ceil(required / unit)
//! total       = operational + backup extra (0, 1 or 2)
//! capacity    = operational * unit
//! margin%     = (capacity / load - 1) * 100
//! ```
//!
//! A blank or zero load is the idle state, not an error. So is a load that
//! would need more than [`MAX_UNIT_COUNT`] units.

use crate::backup::BackupPolicy;
use serde::{Deserialize, Serialize};

/// Safety factor used when the entered value is unusable.
pub const SAFETY_FACTOR_FALLBACK: f64 = 0.0;
/// Unit capacity used when the entered value is unusable.
pub const UNIT_CAPACITY_FALLBACK: f64 = 1.0;
/// Largest operational count kept exact through `f64` (2^53). A load that
/// needs more units is left idle.
pub const MAX_UNIT_COUNT: u64 = 1 << 53;

/// Everything the solver reads. Callers build it fresh from room state on
/// every solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolveInput {
    /// Estimated load in TR; `None` when left blank.
    pub estimated_load: Option<f64>,
    pub safety_factor_percent: f64,
    /// Selected unit size in TR.
    pub unit_capacity: f64,
    pub backup_policy: BackupPolicy,
}

impl SolveInput {
    /// Safety factor with non-finite or negative entries replaced by 0.
    pub fn effective_safety_factor(&self) -> f64 {
        if self.safety_factor_percent.is_finite() && self.safety_factor_percent >= 0.0 {
            self.safety_factor_percent
        } else {
            SAFETY_FACTOR_FALLBACK
        }
    }

    /// Unit capacity with non-finite or non-positive entries replaced by 1.
    pub fn effective_unit_capacity(&self) -> f64 {
        rc_core::positive_finite(self.unit_capacity).unwrap_or(UNIT_CAPACITY_FALLBACK)
    }

    /// Load to size against, or `None` for the idle state.
    pub fn effective_load(&self) -> Option<f64> {
        self.estimated_load.and_then(rc_core::positive_finite)
    }
}

/// Sizing result for one room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacitySolution {
    pub estimated_load: f64,
    pub required_capacity: f64,
    pub unit_capacity: f64,
    pub backup_policy: BackupPolicy,
    pub operational_units: u64,
    pub total_units: u64,
    pub total_capacity: f64,
    pub margin_percent: f64,
}

impl CapacitySolution {
    pub fn backup_units(&self) -> u64 {
        self.total_units - self.operational_units
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SolveOutcome {
    /// No load estimated yet; every output shows the placeholder.
    Idle,
    Sized(CapacitySolution),
}

impl SolveOutcome {
    pub fn solution(&self) -> Option<&CapacitySolution> {
        match self {
            Self::Idle => None,
            Self::Sized(solution) => Some(solution),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Size the installation. Pure: same input, same outcome.
pub fn solve(input: &SolveInput) -> SolveOutcome {
    let Some(load) = input.effective_load() else {
        tracing::trace!(estimated_load = ?input.estimated_load, "no load estimate, idle");
        return SolveOutcome::Idle;
    };

    let safety = input.effective_safety_factor();
    let unit = input.effective_unit_capacity();

    let required_capacity = load * (1.0 + safety / 100.0);
    let units = (required_capacity / unit).ceil();
    if units > MAX_UNIT_COUNT as f64 {
        tracing::warn!(load, required_capacity, unit, "unit count out of range, idle");
        return SolveOutcome::Idle;
    }
    let operational_units = units as u64;
    let total_units = operational_units + u64::from(input.backup_policy.extra_units());
    let total_capacity = operational_units as f64 * unit;
    let margin_percent = (total_capacity / load - 1.0) * 100.0;

    tracing::trace!(
        load,
        safety,
        unit,
        operational_units,
        total_units,
        margin_percent,
        "sized"
    );

    SolveOutcome::Sized(CapacitySolution {
        estimated_load: load,
        required_capacity,
        unit_capacity: unit,
        backup_policy: input.backup_policy,
        operational_units,
        total_units,
        total_capacity,
        margin_percent,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::catalog::UnitCapacity;
    use proptest::prelude::*;

    fn any_policy() -> impl Strategy<Value = BackupPolicy> {
        prop::sample::select(BackupPolicy::ALL.to_vec())
    }

    fn any_unit() -> impl Strategy<Value = f64> {
        prop::sample::select(UnitCapacity::ALL.to_vec()).prop_map(UnitCapacity::tons)
    }

    proptest! {
        #[test]
        fn operational_units_follow_formula(
            load in prop_oneof![0.01_f64..500.0, 1.0e6_f64..1.0e12],
            safety in 0.0_f64..100.0,
            unit in any_unit(),
            policy in any_policy(),
        ) {
            let outcome = solve(&SolveInput {
                estimated_load: Some(load),
                safety_factor_percent: safety,
                unit_capacity: unit,
                backup_policy: policy,
            });
            let s = outcome.solution().copied().unwrap();
            let expected = (load * (1.0 + safety / 100.0) / unit).ceil() as u64;
            prop_assert_eq!(s.operational_units, expected);
            prop_assert_eq!(s.backup_units(), u64::from(policy.extra_units()));
            prop_assert!(s.total_capacity >= s.required_capacity * (1.0 - 1e-12));
            prop_assert!(s.margin_percent >= safety - 1e-6);
        }

        #[test]
        fn backup_delta_depends_on_policy_only(
            load in 0.01_f64..500.0,
            safety in 0.0_f64..100.0,
            unit in any_unit(),
            policy in any_policy(),
        ) {
            let s = solve(&SolveInput {
                estimated_load: Some(load),
                safety_factor_percent: safety,
                unit_capacity: unit,
                backup_policy: policy,
            })
            .solution()
            .copied()
            .unwrap();
            prop_assert_eq!(s.backup_units(), u64::from(policy.extra_units()));
        }

        #[test]
        fn output_is_never_nan(
            load in prop::option::of(prop::num::f64::ANY),
            safety in prop::num::f64::ANY,
            unit in prop::num::f64::ANY,
            policy in any_policy(),
        ) {
            let outcome = solve(&SolveInput {
                estimated_load: load,
                safety_factor_percent: safety,
                unit_capacity: unit,
                backup_policy: policy,
            });
            if let Some(s) = outcome.solution() {
                prop_assert!(!s.required_capacity.is_nan());
                prop_assert!(!s.total_capacity.is_nan());
                prop_assert!(!s.margin_percent.is_nan());
            }
        }
    }
}
