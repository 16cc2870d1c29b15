//! Project schema definitions.

use rc_panel::{PanelConfig, Surface};
use rc_sizing::{BackupPolicy, LoadReading, LoadReadings};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    /// Constants published before the first room is scheduled.
    #[serde(default)]
    pub constants: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel: Option<PanelConfig>,
    #[serde(default)]
    pub rooms: Vec<RoomDef>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            name: name.into(),
            constants: BTreeMap::new(),
            panel: None,
            rooms: Vec::new(),
            timeline: Vec::new(),
        }
    }

    pub fn room(&self, id: &str) -> Option<&RoomDef> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Panel configuration with defaults filled in.
    pub fn panel_config(&self) -> PanelConfig {
        self.panel.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomDef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Thermal load readings published at start-up.
    #[serde(default, skip_serializing_if = "LoadReadings::is_empty")]
    pub readings: LoadReadings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_capacity_tr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_load: Option<FieldEntry>,
    /// Policy already shown on the capacity panel before bootstrap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup: Option<BackupPolicy>,

    // Version 1 layout: readings as flat keys. Moved into `readings` on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approx_tons: Option<LoadReading>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact_tons: Option<LoadReading>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_watts: Option<LoadReading>,
}

impl RoomDef {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            readings: LoadReadings::default(),
            unit_capacity_tr: None,
            estimated_load: None,
            backup: None,
            approx_tons: None,
            exact_tons: None,
            total_watts: None,
        }
    }
}

/// A form entry: a number, or text exactly as typed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldEntry {
    Number(f64),
    Text(String),
}

impl FieldEntry {
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(v) => v.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineEntry {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: TimelineEvent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineEvent {
    PublishConstant {
        name: String,
        value: f64,
    },
    PublishLoad {
        room: String,
        readings: LoadReadings,
    },
    SetSafetyFactor {
        room: String,
        value: FieldEntry,
    },
    SetUnitCapacity {
        room: String,
        value: FieldEntry,
    },
    SetEstimatedLoad {
        room: String,
        value: FieldEntry,
    },
    SetBackup {
        room: String,
        surface: Surface,
        policy: BackupPolicy,
    },
    RemoveRoom {
        room: String,
    },
}

impl TimelineEvent {
    /// Room the event targets, if any.
    pub fn room(&self) -> Option<&str> {
        match self {
            Self::PublishConstant { .. } => None,
            Self::PublishLoad { room, .. }
            | Self::SetSafetyFactor { room, .. }
            | Self::SetUnitCapacity { room, .. }
            | Self::SetEstimatedLoad { room, .. }
            | Self::SetBackup { room, .. }
            | Self::RemoveRoom { room } => Some(room),
        }
    }
}
