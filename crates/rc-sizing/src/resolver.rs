//! Thermal load resolution with priority fallback.
//!
//! A room's heat gain can be published in up to three forms. Pre-aggregated
//! tons are preferred; raw watts are only used when neither tons reading is
//! usable.

use rc_core::{parse_lenient, positive_finite, to_tons, w};
use serde::{Deserialize, Serialize};

/// One published reading, either already numeric or as displayed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoadReading {
    Value(f64),
    Text(String),
}

impl LoadReading {
    /// The reading as a finite, strictly positive number.
    pub fn positive(&self) -> Option<f64> {
        match self {
            Self::Value(v) => positive_finite(*v),
            Self::Text(text) => parse_lenient(text).and_then(positive_finite),
        }
    }
}

impl From<f64> for LoadReading {
    fn from(v: f64) -> Self {
        Self::Value(v)
    }
}

impl From<&str> for LoadReading {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Readings available for a room at one instant. Absent forms are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadReadings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approx_tons: Option<LoadReading>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact_tons: Option<LoadReading>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_watts: Option<LoadReading>,
}

impl LoadReadings {
    pub fn is_empty(&self) -> bool {
        self.approx_tons.is_none() && self.exact_tons.is_none() && self.total_watts.is_none()
    }
}

/// Which reading a resolved load came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadSource {
    Approximate,
    Exact,
    Watts,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLoad {
    pub tons: f64,
    pub source: LoadSource,
}

/// Pick the best available reading: approximate tons, then exact tons,
/// then total watts converted at 3517 W/TR.
pub fn resolve(readings: &LoadReadings) -> Option<ResolvedLoad> {
    if let Some(tons) = readings.approx_tons.as_ref().and_then(LoadReading::positive) {
        return Some(ResolvedLoad {
            tons,
            source: LoadSource::Approximate,
        });
    }
    if let Some(tons) = readings.exact_tons.as_ref().and_then(LoadReading::positive) {
        return Some(ResolvedLoad {
            tons,
            source: LoadSource::Exact,
        });
    }
    let watts = readings.total_watts.as_ref().and_then(LoadReading::positive)?;
    Some(ResolvedLoad {
        tons: to_tons(w(watts)),
        source: LoadSource::Watts,
    })
}

/// Resolved load in tons, `0.0` when nothing usable is published.
pub fn resolve_tons(readings: &LoadReadings) -> f64 {
    resolve(readings).map_or(0.0, |r| r.tons)
}
