//! The tool record and its persisted snapshot shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Outcome of a tool's most recent invocation.
///
/// Serialized as the `okay` JSON field (`null` / `true` / `false`) so
/// exported snapshots stay stable across versions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunOutcome {
    /// The tool has never been invoked.
    #[default]
    NeverRun,
    /// The last invocation exited with status 0.
    Succeeded,
    /// The last invocation exited non-zero, timed out, or failed to launch.
    Failed,
}

impl RunOutcome {
    /// Returns true only for a recorded success.
    pub fn is_success(self) -> bool {
        matches!(self, RunOutcome::Succeeded)
    }
}

impl Serialize for RunOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RunOutcome::NeverRun => serializer.serialize_none(),
            RunOutcome::Succeeded => serializer.serialize_some(&true),
            RunOutcome::Failed => serializer.serialize_some(&false),
        }
    }
}

impl<'de> Deserialize<'de> for RunOutcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<bool>::deserialize(deserializer)? {
            None => RunOutcome::NeverRun,
            Some(true) => RunOutcome::Succeeded,
            Some(false) => RunOutcome::Failed,
        })
    }
}

/// One externally invocable command registered with Relay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    /// Unique identifier: lowercase alphanumeric, 3-100 characters.
    /// Validated at creation and rename, not by the store.
    pub name: String,

    /// Opaque shell command template. The prompt is appended as a trailing
    /// quoted argument when present.
    pub command: String,

    /// Free-text description.
    pub description: String,

    /// Last measured latency in seconds, rounded to 2 decimal places.
    pub time_taken: Option<f64>,

    /// Timestamp of the last invocation.
    pub last_ran: Option<DateTime<Utc>>,

    /// Outcome of the last invocation.
    #[serde(rename = "okay", default)]
    pub outcome: RunOutcome,

    /// Message from the last failed invocation (captured stderr or the
    /// runner's own error), cleared on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,

    /// Disabled tools are excluded from benchmarking and fallback.
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl Tool {
    /// Creates a never-run tool record.
    pub fn new(
        name: impl Into<String>,
        command: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            description: description.into(),
            time_taken: None,
            last_ran: None,
            outcome: RunOutcome::NeverRun,
            last_error: None,
            disabled: false,
        }
    }

    /// Marks the tool as disabled.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// The full persisted (and exported) state: the tool collection plus the
/// pointer to the tool currently considered fastest.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub tools: Vec<Tool>,

    #[serde(default)]
    pub best: Option<String>,
}
