use serde::{Deserialize, Serialize};

/// One line of a position log as written by the recorder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "IGT")]
    pub igt: f64,
    #[serde(rename = "STATE")]
    pub state: PositionState,
}

/// Nested position block of a [`RawRecord`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionState {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Z")]
    pub z: f64,
}

/// A deduplicated, time-keyed position sample
///
/// `id` is the record identifier. It doubles as the timestamp and becomes
/// elapsed time once the path has been normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub id: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Sample {
    pub fn new(id: f64, x: f64, y: f64, z: f64) -> Self {
        Self { id, x, y, z }
    }

    /// Euclidean distance between the positions of two samples
    pub fn distance_to(&self, other: &Sample) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl From<RawRecord> for Sample {
    fn from(record: RawRecord) -> Self {
        Self {
            id: record.igt,
            x: record.state.x,
            y: record.state.y,
            z: record.state.z,
        }
    }
}
