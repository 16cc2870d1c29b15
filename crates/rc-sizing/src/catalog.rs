//! Selectable refrigeration unit sizes.

use crate::error::SizingError;
use rc_core::{Power, Tolerances, from_tons, nearly_equal};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Nominal capacity of one selectable refrigeration unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitCapacity {
    Tr1,
    Tr2,
    Tr3,
    Tr4,
    Tr5,
    Tr7_5,
    Tr10,
    Tr12_5,
    Tr15,
    Tr20,
    Tr25,
    Tr30,
}

impl UnitCapacity {
    pub const ALL: [UnitCapacity; 12] = [
        Self::Tr1,
        Self::Tr2,
        Self::Tr3,
        Self::Tr4,
        Self::Tr5,
        Self::Tr7_5,
        Self::Tr10,
        Self::Tr12_5,
        Self::Tr15,
        Self::Tr20,
        Self::Tr25,
        Self::Tr30,
    ];

    /// Capacity in tons of refrigeration.
    pub fn tons(self) -> f64 {
        match self {
            Self::Tr1 => 1.0,
            Self::Tr2 => 2.0,
            Self::Tr3 => 3.0,
            Self::Tr4 => 4.0,
            Self::Tr5 => 5.0,
            Self::Tr7_5 => 7.5,
            Self::Tr10 => 10.0,
            Self::Tr12_5 => 12.5,
            Self::Tr15 => 15.0,
            Self::Tr20 => 20.0,
            Self::Tr25 => 25.0,
            Self::Tr30 => 30.0,
        }
    }

    pub fn power(self) -> Power {
        from_tons(self.tons())
    }

    /// Look up the catalog entry for a size given in TR.
    pub fn from_tons(tons: f64) -> Result<Self, SizingError> {
        let tol = Tolerances {
            abs: 1e-9,
            rel: 1e-9,
        };
        Self::ALL
            .into_iter()
            .find(|unit| nearly_equal(unit.tons(), tons, tol))
            .ok_or(SizingError::UnknownUnit { tons })
    }

    /// Label as shown in the unit selector, e.g. `"7.5 TR"`.
    pub fn label(self) -> String {
        format!("{} TR", self.tons())
    }
}

impl fmt::Display for UnitCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} TR", self.tons())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_sorted_and_complete() {
        let tons: Vec<f64> = UnitCapacity::ALL.iter().map(|u| u.tons()).collect();
        assert_eq!(
            tons,
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 7.5, 10.0, 12.5, 15.0, 20.0, 25.0, 30.0]
        );
    }

    #[test]
    fn from_tons_finds_exact_entries() {
        assert_eq!(UnitCapacity::from_tons(7.5).unwrap(), UnitCapacity::Tr7_5);
        assert_eq!(UnitCapacity::from_tons(30.0).unwrap(), UnitCapacity::Tr30);
    }

    #[test]
    fn from_tons_rejects_off_catalog() {
        assert!(matches!(
            UnitCapacity::from_tons(6.0),
            Err(SizingError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn labels() {
        assert_eq!(UnitCapacity::Tr12_5.label(), "12.5 TR");
        assert_eq!(UnitCapacity::Tr5.to_string(), "5 TR");
    }

    #[test]
    fn power_uses_3517_watts_per_ton() {
        use uom::si::power::watt;
        assert_eq!(UnitCapacity::Tr2.power().get::<watt>(), 7034.0);
    }
}
