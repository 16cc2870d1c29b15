//! Redundancy policy (N, N+1, N+2).

use crate::error::SizingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How many spare units are installed on top of the operational minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BackupPolicy {
    /// No redundancy.
    #[default]
    #[serde(rename = "N", alias = "n")]
    N,
    /// One spare unit.
    #[serde(rename = "N+1", alias = "N_PLUS_1", alias = "n+1")]
    NPlus1,
    /// Two spare units.
    #[serde(rename = "N+2", alias = "N_PLUS_2", alias = "n+2")]
    NPlus2,
}

impl BackupPolicy {
    pub const ALL: [BackupPolicy; 3] = [Self::N, Self::NPlus1, Self::NPlus2];

    /// Units added on top of the operational count.
    pub fn extra_units(self) -> u32 {
        match self {
            Self::N => 0,
            Self::NPlus1 => 1,
            Self::NPlus2 => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NPlus1 => "N+1",
            Self::NPlus2 => "N+2",
        }
    }
}

impl fmt::Display for BackupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BackupPolicy {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();
        match key.as_str() {
            "N" => Ok(Self::N),
            "N+1" | "N_PLUS_1" | "NPLUS1" => Ok(Self::NPlus1),
            "N+2" | "N_PLUS_2" | "NPLUS2" => Ok(Self::NPlus2),
            _ => Err(SizingError::UnknownPolicy {
                text: s.to_string(),
            }),
        }
    }
}
