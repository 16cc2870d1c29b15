//! Output slot formatting.
//!
//! Every solve writes every slot: unit counts as plain integers, capacities
//! with one decimal, margin with one decimal and a percent sign. The idle
//! outcome writes [`PLACEHOLDER`] everywhere.

use crate::solver::SolveOutcome;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text shown in every slot while no load is estimated.
pub const PLACEHOLDER: &str = "N/A";

/// Named output slot of the capacity panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSlot {
    OperationalUnits,
    TotalUnits,
    RequiredCapacity,
    TotalCapacity,
    Margin,
}

impl OutputSlot {
    pub const ALL: [OutputSlot; 5] = [
        Self::OperationalUnits,
        Self::TotalUnits,
        Self::RequiredCapacity,
        Self::TotalCapacity,
        Self::Margin,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::OperationalUnits => "operational_units",
            Self::TotalUnits => "total_units",
            Self::RequiredCapacity => "required_capacity",
            Self::TotalCapacity => "total_capacity",
            Self::Margin => "margin",
        }
    }
}

impl fmt::Display for OutputSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Formatted text for every output slot of one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySlots {
    pub operational_units: String,
    pub total_units: String,
    pub required_capacity: String,
    pub total_capacity: String,
    pub margin: String,
}

impl DisplaySlots {
    pub fn idle() -> Self {
        Self {
            operational_units: PLACEHOLDER.to_string(),
            total_units: PLACEHOLDER.to_string(),
            required_capacity: PLACEHOLDER.to_string(),
            total_capacity: PLACEHOLDER.to_string(),
            margin: PLACEHOLDER.to_string(),
        }
    }

    pub fn render(outcome: &SolveOutcome) -> Self {
        match outcome {
            SolveOutcome::Idle => Self::idle(),
            SolveOutcome::Sized(s) => Self {
                operational_units: s.operational_units.to_string(),
                total_units: s.total_units.to_string(),
                required_capacity: format!("{:.1}", s.required_capacity),
                total_capacity: format!("{:.1}", s.total_capacity),
                margin: format!("{:.1}%", s.margin_percent),
            },
        }
    }

    pub fn get(&self, slot: OutputSlot) -> &str {
        match slot {
            OutputSlot::OperationalUnits => &self.operational_units,
            OutputSlot::TotalUnits => &self.total_units,
            OutputSlot::RequiredCapacity => &self.required_capacity,
            OutputSlot::TotalCapacity => &self.total_capacity,
            OutputSlot::Margin => &self.margin,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (OutputSlot, &str)> {
        OutputSlot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }

    pub fn is_idle(&self) -> bool {
        self.iter().all(|(_, text)| text == PLACEHOLDER)
    }
}

impl Default for DisplaySlots {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::BackupPolicy;
    use crate::solver::{SolveInput, solve};

    #[test]
    fn idle_writes_placeholder_everywhere() {
        let slots = DisplaySlots::render(&SolveOutcome::Idle);
        assert!(slots.is_idle());
        assert_eq!(slots.iter().count(), OutputSlot::ALL.len());
    }

    #[test]
    fn reference_case_formatting() {
        let outcome = solve(&SolveInput {
            estimated_load: Some(9.3),
            safety_factor_percent: 10.0,
            unit_capacity: 5.0,
            backup_policy: BackupPolicy::NPlus1,
        });
        let slots = DisplaySlots::render(&outcome);
        assert_eq!(slots.get(OutputSlot::OperationalUnits), "3");
        assert_eq!(slots.get(OutputSlot::TotalUnits), "4");
        assert_eq!(slots.get(OutputSlot::RequiredCapacity), "10.2");
        assert_eq!(slots.get(OutputSlot::TotalCapacity), "15.0");
        assert_eq!(slots.get(OutputSlot::Margin), "61.3%");
        assert!(!slots.is_idle());
    }

    #[test]
    fn slot_keys_are_stable() {
        let keys: Vec<&str> = OutputSlot::ALL.iter().map(|s| s.key()).collect();
        assert_eq!(
            keys,
            [
                "operational_units",
                "total_units",
                "required_capacity",
                "total_capacity",
                "margin"
            ]
        );
    }
}
