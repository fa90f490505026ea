//! Save records and save-mode configuration.

use serde::{Deserialize, Serialize};

use crate::core::{QuestError, StepId, StepState};

/// One saved step: id-addressed, never index-addressed, so saves
/// survive content reordering and tolerate ids that no longer exist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// The step's stable id.
    #[serde(rename = "Step")]
    pub step: StepId,

    /// The saved state, as its integer wire code.
    #[serde(rename = "State")]
    pub state: StepState,
}

impl StepRecord {
    /// Create a record.
    pub fn new(step: impl Into<StepId>, state: StepState) -> Self {
        Self {
            step: step.into(),
            state,
        }
    }
}

/// The logical content of a save blob: step records in hierarchy order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    /// The saved step records.
    #[serde(rename = "Steps")]
    pub steps: Vec<StepRecord>,
}

impl SaveData {
    /// Create empty save data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode to the JSON blob wire format.
    pub fn to_json(&self) -> Result<String, QuestError> {
        serde_json::to_string(self).map_err(QuestError::from)
    }

    /// Decode from the JSON blob wire format.
    pub fn from_json(blob: &str) -> Result<Self, QuestError> {
        serde_json::from_str(blob).map_err(QuestError::from)
    }
}

/// How the engine persists save data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveMode {
    /// The engine manages the blob itself through the configured
    /// [`SaveProvider`](super::SaveProvider).
    #[default]
    Internal,

    /// The engine hands the data back to the caller, who owns storage.
    Custom,
}

/// The shape of the data handed back by a save.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnFormat {
    /// The serialized JSON blob.
    #[default]
    Json,

    /// The structured record list, for callers that post-process before
    /// storing.
    StepList,
}

/// Save data in the caller's requested format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutput {
    /// The serialized JSON blob.
    Json(String),

    /// The structured record list.
    Steps(Vec<StepRecord>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_wire_format() {
        let data = SaveData {
            steps: vec![
                StepRecord::new("QL0_Q0_S0", StepState::Completed),
                StepRecord::new("QL0_Q0_S1", StepState::Started),
            ],
        };

        let json = data.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"Steps":[{"Step":"QL0_Q0_S0","State":2},{"Step":"QL0_Q0_S1","State":1}]}"#
        );

        let back = SaveData::from_json(&json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_malformed_blob_is_an_error() {
        assert!(matches!(
            SaveData::from_json("{\"Steps\": 4}"),
            Err(QuestError::MalformedSave(_))
        ));
        assert!(matches!(
            SaveData::from_json(r#"{"Steps":[{"Step":"S0","State":9}]}"#),
            Err(QuestError::MalformedSave(_))
        ));
    }
}
