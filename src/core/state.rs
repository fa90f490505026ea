//! Step completion state.

use serde::{Deserialize, Serialize};

use super::QuestError;

/// The completion state of a step.
///
/// Forward-only under normal operation (`NotStarted` → `Started` →
/// `Completed`); only the restore path ([`Step::init_as`]) writes the
/// state directly.
///
/// Serialized as the integer wire codes used by the save blob:
/// 0 = NotStarted, 1 = Started, 2 = Completed.
///
/// [`Step::init_as`]: crate::progress::Step::init_as
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum StepState {
    /// The step has not been started yet.
    #[default]
    NotStarted,
    /// The step has been started but not completed.
    Started,
    /// The step has been completed.
    Completed,
}

impl StepState {
    /// The integer wire code for this state.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::NotStarted => 0,
            Self::Started => 1,
            Self::Completed => 2,
        }
    }
}

impl From<StepState> for u8 {
    fn from(state: StepState) -> u8 {
        state.code()
    }
}

impl TryFrom<u8> for StepState {
    type Error = QuestError;

    fn try_from(code: u8) -> Result<Self, QuestError> {
        match code {
            0 => Ok(Self::NotStarted),
            1 => Ok(Self::Started),
            2 => Ok(Self::Completed),
            other => Err(QuestError::MalformedSave(format!(
                "unknown step state code {other}"
            ))),
        }
    }
}

impl std::fmt::Display for StepState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => f.write_str("NotStarted"),
            Self::Started => f.write_str("Started"),
            Self::Completed => f.write_str("Completed"),
        }
    }
}
