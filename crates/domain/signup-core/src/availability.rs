use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Result of one remote check for one accepted username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "camelCase")]
pub enum AvailabilityOutcome {
    Available(bool),
    Failed(ApiError),
}

impl AvailabilityOutcome {
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            AvailabilityOutcome::Failed(e) => Some(e),
            AvailabilityOutcome::Available(_) => None,
        }
    }
}

impl From<Result<bool, ApiError>> for AvailabilityOutcome {
    fn from(value: Result<bool, ApiError>) -> Self {
        match value {
            Ok(available) => AvailabilityOutcome::Available(available),
            Err(e) => AvailabilityOutcome::Failed(e),
        }
    }
}

/// Availability as seen by the form: nothing published yet, or the latest outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "outcome", rename_all = "camelCase")]
pub enum Availability {
    #[default]
    Pending,
    Settled(AvailabilityOutcome),
}

impl Availability {
    pub fn outcome(&self) -> Option<&AvailabilityOutcome> {
        match self {
            Availability::Pending => None,
            Availability::Settled(o) => Some(o),
        }
    }

    /// Whether the username may count as available for overall validity.
    ///
    /// Pending and transport failures pass; every other failure blocks.
    pub fn permits_submission(&self) -> bool {
        match self {
            Availability::Pending => true,
            Availability::Settled(AvailabilityOutcome::Available(available)) => *available,
            Availability::Settled(AvailabilityOutcome::Failed(e)) => e.is_transport(),
        }
    }
}
