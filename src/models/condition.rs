//! Status conditions and the Ready summary derived from them

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Condition type every Flux controller sets once it has reconciled an object
pub const READY_CONDITION: &str = "Ready";

/// Message shown for objects no controller has reported on yet
pub const WAITING_MESSAGE: &str = "waiting to be reconciled";

/// Tri-state condition value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    #[serde(other)]
    Unknown,
}

impl ConditionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionStatus::True => "True",
            ConditionStatus::False => "False",
            ConditionStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed status fact attached to a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub type_: String,
    pub status: ConditionStatus,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

impl Condition {
    pub fn new(type_: &str, status: ConditionStatus, message: &str) -> Self {
        Self {
            type_: type_.to_string(),
            status,
            reason: String::new(),
            message: message.to_string(),
            last_transition_time: None,
            observed_generation: None,
        }
    }
}

/// Find a condition by exact type name.
///
/// Duplicate entries for one type are malformed; the first one wins.
pub fn find_condition<'a>(conditions: &'a [Condition], type_: &str) -> Option<&'a Condition> {
    conditions.iter().find(|c| c.type_ == type_)
}

/// Normalized Ready status of one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadySummary {
    pub status: ConditionStatus,
    pub message: String,
}

impl ReadySummary {
    /// Summarize a condition set. Resources without a Ready condition have not
    /// been observed yet and report False.
    pub fn from_conditions(conditions: &[Condition]) -> Self {
        match find_condition(conditions, READY_CONDITION) {
            Some(ready) => Self {
                status: ready.status,
                message: ready.message.clone(),
            },
            None => Self {
                status: ConditionStatus::False,
                message: WAITING_MESSAGE.to_string(),
            },
        }
    }
}
