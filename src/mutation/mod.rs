//! Mutation workflow shared by every dashboard write.
//!
//! A mutation runs `validate` (forms only), `confirm`, exactly one remote
//! call, and a report. On success the originating view is re-fetched; on
//! failure it is left alone. The in-flight claim for `(user, resource)` is held
//! from before validation until the report is built, so a second attempt on the
//! same resource is answered with [`Outcome::Busy`] instead of a second call.

pub mod confirm;
pub mod in_flight;
pub mod state;
pub mod validate;

pub use confirm::{Confirm, ConfirmPolicy, Decision, FormConfirmation, Intent};
pub use in_flight::InFlight;
pub use state::Phase;
pub use validate::{BlogForm, FieldErrors, LoginForm, ProjectForm, Validate};

use crate::remote::{ApiError, ErrorKind, Receipt};
use serde::Serialize;
use state::Tracker;
use std::future::Future;
use tracing::{info, warn};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    CreateBlog,
    UpdateBlog,
    DeleteBlog,
    PublishBlog,
    UnpublishBlog,
    CreateProject,
    DeleteProject,
}

impl MutationKind {
    /// Publish toggle that flips the current flag.
    #[must_use]
    pub const fn toggle_publish(currently_published: bool) -> Self {
        if currently_published {
            Self::UnpublishBlog
        } else {
            Self::PublishBlog
        }
    }

    #[must_use]
    pub const fn is_destructive(self) -> bool {
        matches!(self, Self::DeleteBlog | Self::DeleteProject)
    }

    #[must_use]
    pub const fn default_policy(self) -> ConfirmPolicy {
        match self {
            Self::DeleteBlog | Self::DeleteProject | Self::PublishBlog | Self::UnpublishBlog => {
                ConfirmPolicy::Always
            }
            Self::CreateBlog | Self::UpdateBlog | Self::CreateProject => ConfirmPolicy::Never,
        }
    }

    /// Shown when the API confirms without a message of its own.
    #[must_use]
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::CreateBlog => "Blog created successfully!",
            Self::UpdateBlog => "Blog updated successfully!",
            Self::DeleteBlog => "Your blog has been deleted.",
            Self::PublishBlog => "Blog published successfully",
            Self::UnpublishBlog => "Blog unpublished successfully",
            Self::CreateProject => "Project created successfully!",
            Self::DeleteProject => "Your project has been deleted.",
        }
    }

    /// Shown when the API fails without a message of its own.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::CreateBlog => "Failed to create blog",
            Self::UpdateBlog => "Failed to update blog",
            Self::DeleteBlog => "Failed to delete blog",
            Self::PublishBlog | Self::UnpublishBlog => "Failed to update blog status",
            Self::CreateProject => "Failed to create project",
            Self::DeleteProject => "Failed to delete project",
        }
    }
}

/// One state-changing request against one resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mutation {
    kind: MutationKind,
    resource: String,
    description: String,
    policy: ConfirmPolicy,
}

impl Mutation {
    #[must_use]
    pub fn new(kind: MutationKind, resource: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            resource: resource.into(),
            description: description.into(),
            policy: kind.default_policy(),
        }
    }

    /// Overrides the confirmation policy. Destructive mutations always confirm.
    #[must_use]
    pub fn with_confirmation(mut self, policy: ConfirmPolicy) -> Self {
        self.policy = if self.kind.is_destructive() {
            ConfirmPolicy::Always
        } else {
            policy
        };
        self
    }

    #[must_use]
    pub const fn kind(&self) -> MutationKind {
        self.kind
    }

    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    #[must_use]
    pub const fn policy(&self) -> ConfirmPolicy {
        self.policy
    }

    #[must_use]
    pub fn intent(&self) -> Intent {
        Intent {
            kind: self.kind,
            resource: self.resource.clone(),
            description: self.description.clone(),
        }
    }
}

#[derive(Debug)]
pub enum Outcome<V> {
    /// The remote call succeeded. `view` is the re-fetched data, or `None`
    /// with `refresh_error` set when the re-fetch itself failed.
    Succeeded {
        message: String,
        view: Option<V>,
        refresh_error: Option<ApiError>,
    },
    Failed {
        error: ApiError,
        message: String,
    },
    Invalid(FieldErrors),
    Aborted(Intent),
    Busy,
}

#[derive(Debug)]
pub struct Report<V> {
    pub outcome: Outcome<V>,
    pub trace: Vec<Phase>,
}

impl<V> Report<V> {
    fn new(outcome: Outcome<V>, tracker: Tracker) -> Self {
        Self {
            outcome,
            trace: tracker.into_trace(),
        }
    }
}

/// Runs mutations on behalf of one user, asking `confirm` when the mutation's
/// policy requires it.
#[derive(Clone, Debug)]
pub struct Workflow<C> {
    in_flight: InFlight,
    owner: String,
    confirm: C,
}

impl<C: Confirm> Workflow<C> {
    #[must_use]
    pub fn new(in_flight: InFlight, owner: impl Into<String>, confirm: C) -> Self {
        Self {
            in_flight,
            owner: owner.into(),
            confirm,
        }
    }

    /// Non-form mutation: confirm, execute, report, refresh.
    pub async fn run<V, E, EF, R, RF>(&self, mutation: &Mutation, execute: E, refresh: R) -> Report<V>
    where
        E: FnOnce() -> EF,
        EF: Future<Output = Result<Receipt, ApiError>>,
        R: FnOnce() -> RF,
        RF: Future<Output = Result<V, ApiError>>,
    {
        let mut tracker = Tracker::new();
        let Some(_claim) = self.in_flight.try_acquire(&self.owner, mutation.resource()) else {
            info!("{:?} on {} rejected: already in flight", mutation.kind(), mutation.resource());
            return Report::new(Outcome::Busy, tracker);
        };

        tracker.advance(Phase::Confirming);
        self.proceed(mutation, tracker, execute, refresh).await
    }

    /// Form mutation: validate first; invalid input never reaches `execute`.
    pub async fn submit<F, V, E, EF, R, RF>(
        &self,
        mutation: &Mutation,
        form: &F,
        execute: E,
        refresh: R,
    ) -> Report<V>
    where
        F: Validate,
        E: FnOnce(F::Output) -> EF,
        EF: Future<Output = Result<Receipt, ApiError>>,
        R: FnOnce() -> RF,
        RF: Future<Output = Result<V, ApiError>>,
    {
        let mut tracker = Tracker::new();
        let Some(_claim) = self.in_flight.try_acquire(&self.owner, mutation.resource()) else {
            info!("{:?} on {} rejected: already in flight", mutation.kind(), mutation.resource());
            return Report::new(Outcome::Busy, tracker);
        };

        tracker.advance(Phase::Validating);
        let payload = match form.validate() {
            Ok(payload) => {
                tracker.advance(Phase::Valid);
                payload
            }
            Err(errors) => {
                tracker.advance(Phase::Invalid);
                tracker.advance(Phase::Idle);
                return Report::new(Outcome::Invalid(errors), tracker);
            }
        };

        tracker.advance(Phase::Confirming);
        self.proceed(mutation, tracker, move || execute(payload), refresh)
            .await
    }

    async fn proceed<V, E, EF, R, RF>(
        &self,
        mutation: &Mutation,
        mut tracker: Tracker,
        execute: E,
        refresh: R,
    ) -> Report<V>
    where
        E: FnOnce() -> EF,
        EF: Future<Output = Result<Receipt, ApiError>>,
        R: FnOnce() -> RF,
        RF: Future<Output = Result<V, ApiError>>,
    {
        let decision = match mutation.policy() {
            ConfirmPolicy::Always => self.confirm.confirm(&mutation.intent()),
            ConfirmPolicy::Never => Decision::Proceed,
        };
        if decision == Decision::Abort {
            tracker.advance(Phase::Aborted);
            tracker.advance(Phase::Idle);
            return Report::new(Outcome::Aborted(mutation.intent()), tracker);
        }

        tracker.advance(Phase::Proceeding);
        tracker.advance(Phase::Submitting);
        let kind = mutation.kind();

        match execute().await {
            Ok(receipt) => {
                tracker.advance(Phase::Success);
                info!("{kind:?} on {} succeeded", mutation.resource());
                let message = receipt
                    .message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| kind.success_message().to_string());

                tracker.advance(Phase::Refreshing);
                let outcome = match refresh().await {
                    Ok(view) => Outcome::Succeeded {
                        message,
                        view: Some(view),
                        refresh_error: None,
                    },
                    Err(err) => {
                        warn!("refresh after {kind:?} failed: {err}");
                        Outcome::Succeeded {
                            message,
                            view: None,
                            refresh_error: Some(err),
                        }
                    }
                };
                tracker.advance(Phase::Idle);
                Report::new(outcome, tracker)
            }
            Err(error) => {
                tracker.advance(Phase::Failure);
                tracker.advance(Phase::Idle);
                warn!("{kind:?} on {} failed: {error}", mutation.resource());
                let message = failure_text(kind, &error);
                Report::new(Outcome::Failed { error, message }, tracker)
            }
        }
    }
}

/// Server message when the API sent one, otherwise the generic text for `kind`.
#[must_use]
pub fn failure_text(kind: MutationKind, error: &ApiError) -> String {
    if let Some(message) = error.server_message() {
        return message.to_string();
    }
    match error.kind() {
        ErrorKind::Network => format!("{}. Please try again.", kind.failure_message()),
        ErrorKind::Auth | ErrorKind::Request | ErrorKind::Local => {
            kind.failure_message().to_string()
        }
    }
}
