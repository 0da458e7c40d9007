//! JSON snapshot import/export for backing up a learner's data.
//! Records are written as a list of `[item_id, record]` pairs next to the profile.

use crate::error::{Result, SchedulerError};
use crate::models::{LearnerProfile, LearningRecord, RecordStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub const SNAPSHOT_VERSION: &str = "1.0";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub profile: LearnerProfile,
    pub records: Vec<(String, LearningRecord)>,
}

impl Snapshot {
    pub fn new(profile: &LearnerProfile, records: &RecordStore, exported_at: DateTime<Utc>) -> Self {
        Self {
            version: SNAPSHOT_VERSION.to_string(),
            exported_at,
            profile: profile.clone(),
            records: records
                .iter()
                .map(|(id, record)| (id.clone(), record.clone()))
                .collect(),
        }
    }

    /// Checks every record and rebuilds the store
    pub fn into_parts(self) -> Result<(LearnerProfile, RecordStore)> {
        let mut store = RecordStore::new();
        for (item_id, record) in self.records {
            if item_id != record.item_id {
                return Err(SchedulerError::InvalidInput(format!(
                    "record keyed '{}' carries item id '{}'",
                    item_id, record.item_id
                )));
            }
            record.validate()?;
            store.insert(item_id, record);
        }
        Ok((self.profile, store))
    }
}

/// Writes a snapshot of the profile and records to `path`.
pub fn export_json_to_path<P: AsRef<Path>>(
    profile: &LearnerProfile,
    records: &RecordStore,
    exported_at: DateTime<Utc>,
    path: P,
) -> Result<()> {
    let snapshot = Snapshot::new(profile, records, exported_at);
    let json_string = serde_json::to_string_pretty(&snapshot)?;
    let mut file = File::create(path.as_ref())?;
    file.write_all(json_string.as_bytes())?;

    tracing::info!(
        path = %path.as_ref().display(),
        records = records.len(),
        "exported learning snapshot"
    );
    Ok(())
}

/// Parses a snapshot string; structurally invalid data is `InvalidInput`.
pub fn import_json_str(json: &str) -> Result<(LearnerProfile, RecordStore)> {
    let snapshot: Snapshot = serde_json::from_str(json)
        .map_err(|err| SchedulerError::InvalidInput(format!("invalid snapshot: {err}")))?;
    snapshot.into_parts()
}

/// Reads a snapshot file back into a profile and record store.
pub fn import_json<P: AsRef<Path>>(path: P) -> Result<(LearnerProfile, RecordStore)> {
    let mut file = File::open(path.as_ref())?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let (profile, records) = import_json_str(&contents)?;

    tracing::info!(
        path = %path.as_ref().display(),
        records = records.len(),
        "imported learning snapshot"
    );
    Ok((profile, records))
}
