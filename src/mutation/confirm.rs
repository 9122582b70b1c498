//! The confirmation step. Kept behind a trait so the HTTP layer can answer it
//! from the request and tests can script it.

use super::MutationKind;
use serde::Serialize;
use utoipa::ToSchema;

/// Query value that counts as an explicit "yes".
pub const CONFIRM_YES: &str = "yes";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Abort,
}

/// What the user is asked to agree to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct Intent {
    pub kind: MutationKind,
    pub resource: String,
    pub description: String,
}

pub trait Confirm {
    fn confirm(&self, intent: &Intent) -> Decision;
}

impl<F> Confirm for F
where
    F: Fn(&Intent) -> Decision,
{
    fn confirm(&self, intent: &Intent) -> Decision {
        self(intent)
    }
}

/// Confirmation carried by the request itself (`?confirm=yes`). Anything else,
/// including a missing value, is a refusal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormConfirmation {
    accepted: bool,
}

impl FormConfirmation {
    #[must_use]
    pub fn from_field(value: Option<&str>) -> Self {
        let accepted = value.map(str::trim).is_some_and(|value| {
            value.eq_ignore_ascii_case(CONFIRM_YES) || value.eq_ignore_ascii_case("true")
        });
        Self { accepted }
    }

    #[must_use]
    pub const fn accepted(&self) -> bool {
        self.accepted
    }
}

impl Confirm for FormConfirmation {
    fn confirm(&self, _intent: &Intent) -> Decision {
        if self.accepted {
            Decision::Proceed
        } else {
            Decision::Abort
        }
    }
}

/// Whether a mutation asks before executing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmPolicy {
    Always,
    Never,
}
