//! Phases of one mutation instance and the transitions allowed between them.

use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Validating,
    Invalid,
    Valid,
    Confirming,
    Aborted,
    Proceeding,
    Submitting,
    Success,
    Failure,
    Refreshing,
}

impl Phase {
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Validating | Self::Confirming)
                | (Self::Validating, Self::Invalid | Self::Valid)
                | (Self::Invalid | Self::Aborted | Self::Failure | Self::Refreshing, Self::Idle)
                | (Self::Valid, Self::Confirming)
                | (Self::Confirming, Self::Aborted | Self::Proceeding)
                | (Self::Proceeding, Self::Submitting)
                | (Self::Submitting, Self::Success | Self::Failure)
                | (Self::Success, Self::Refreshing)
        )
    }
}

/// Current phase plus every phase visited, starting at `Idle`.
#[derive(Clone, Debug)]
pub(crate) struct Tracker {
    current: Phase,
    trace: Vec<Phase>,
}

impl Tracker {
    pub(crate) fn new() -> Self {
        Self {
            current: Phase::Idle,
            trace: vec![Phase::Idle],
        }
    }

    pub(crate) fn advance(&mut self, next: Phase) {
        if !self.current.can_advance_to(next) {
            warn!("unexpected mutation transition {:?} -> {:?}", self.current, next);
        }
        self.current = next;
        self.trace.push(next);
    }

    #[cfg(test)]
    pub(crate) const fn current(&self) -> Phase {
        self.current
    }

    pub(crate) fn into_trace(self) -> Vec<Phase> {
        self.trace
    }
}
