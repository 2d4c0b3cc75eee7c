use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// The busy-resource identity used for conflict checks. Theory hours occupy
/// the whole division; lab hours occupy a single batch. Modeled as a tagged
/// union rather than a string prefix so that division names which happen to
/// be prefixes of one another cannot collide.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SchedulableUnit {
    Division { division: String },
    Batch { division: String, batch: u8 },
}

impl SchedulableUnit {
    pub fn division(&self) -> &str {
        match self {
            SchedulableUnit::Division { division } => division,
            SchedulableUnit::Batch { division, .. } => division,
        }
    }

    /// Whether two units contend for the same students. The whole division
    /// conflicts with itself and with every one of its batches; two distinct
    /// batches of the same division run concurrently.
    pub fn conflicts_with(&self, other: &SchedulableUnit) -> bool {
        if self.division() != other.division() {
            return false;
        }
        match (self, other) {
            (
                SchedulableUnit::Batch { batch: a, .. },
                SchedulableUnit::Batch { batch: b, .. },
            ) => a == b,
            _ => true,
        }
    }
}

impl fmt::Display for SchedulableUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulableUnit::Division { division } => write!(f, "{division}"),
            SchedulableUnit::Batch { division, batch } => write!(f, "{division}_B{batch}"),
        }
    }
}
