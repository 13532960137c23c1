// Machine state samples and the aggregates derived from them

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format used in state files and on the wire.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Status light of a machine; serializes to lowercase (e.g. "green").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLight {
    Green,
    Yellow,
    Red,
    #[serde(other)]
    Unknown,
}

impl StatusLight {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLight::Green => "green",
            StatusLight::Yellow => "yellow",
            StatusLight::Red => "red",
            StatusLight::Unknown => "unknown",
        }
    }
}

/// One row of a daily state file. Field names match the file header;
/// JSON output is camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Sample {
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub in_count: u64,
    pub out_count: u64,
    pub status_light: StatusLight,
    pub entrance_status: String,
    pub processing_status: String,
    pub exit_status: String,
    pub error_code: String,
}

impl Sample {
    /// `"0"` means no error.
    pub fn has_error(&self) -> bool {
        self.error_code.trim() != "0"
    }
}

/// Last sample of the newest daily file plus the in/out totals of that file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityLatestState {
    #[serde(flatten)]
    pub sample: Sample,
    pub hourly_in: u64,
    pub hourly_out: u64,
}

/// Sums of one hour-wide window; `hour` is the window start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyBucket {
    #[serde(with = "timestamp_format")]
    pub hour: NaiveDateTime,
    pub sum_in: u64,
    pub sum_out: u64,
}

/// Result of a history lookup. `Empty` means no daily file was found in the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum EntityHistory {
    Empty,
    Hourly { buckets: Vec<HourlyBucket> },
}

impl EntityHistory {
    pub fn buckets(&self) -> &[HourlyBucket] {
        match self {
            EntityHistory::Empty => &[],
            EntityHistory::Hourly { buckets } => buckets,
        }
    }
}

mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp {:?}: {}", raw, e)))
    }
}
