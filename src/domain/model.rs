use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferDirection {
    Upload,
    Download,
}

impl fmt::Display for TransferDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upload => f.write_str("upload"),
            Self::Download => f.write_str("download"),
        }
    }
}

/// A bucket plus key pair addressing one object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// What the store reports after moving bytes in either direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferReceipt {
    pub bytes: u64,
    pub e_tag: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferOutcome {
    pub direction: TransferDirection,
    pub location: ObjectLocation,
    pub local_path: PathBuf,
    pub bytes: u64,
    pub e_tag: Option<String>,
    #[serde(with = "millis")]
    pub elapsed: Duration,
    pub completed_at: DateTime<Utc>,
}

mod millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_display_matches_json() {
        for direction in [TransferDirection::Upload, TransferDirection::Download] {
            let json = serde_json::to_value(direction).unwrap();
            assert_eq!(json, direction.to_string());
        }
    }

    #[test]
    fn test_outcome_serializes_elapsed_as_millis() {
        let outcome = TransferOutcome {
            direction: TransferDirection::Download,
            location: ObjectLocation::new("ea-sftp-01", "test.txt"),
            local_path: PathBuf::from("/tmp/test.txt"),
            bytes: 12,
            e_tag: None,
            elapsed: Duration::from_millis(1500),
            completed_at: Utc::now(),
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["direction"], "download");
        assert_eq!(json["elapsed"], 1500);
        assert_eq!(json["location"]["key"], "test.txt");
    }
}
