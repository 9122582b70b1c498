use crate::{
    mutation::{Confirm, InFlight, Workflow},
    remote::{ApiClient, Identity},
    session::CookieConfig,
};

/// Shared state handed to every handler. Cheap to clone; the only mutable
/// piece is the in-flight registry.
#[derive(Clone, Debug)]
pub struct AppState {
    client: ApiClient,
    cookies: CookieConfig,
    confirm_publish: bool,
    in_flight: InFlight,
}

impl AppState {
    #[must_use]
    pub fn new(client: ApiClient, cookies: CookieConfig, confirm_publish: bool) -> Self {
        Self {
            client,
            cookies,
            confirm_publish,
            in_flight: InFlight::new(),
        }
    }

    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub const fn cookies(&self) -> CookieConfig {
        self.cookies
    }

    /// Whether publish toggles ask for confirmation.
    #[must_use]
    pub const fn confirm_publish(&self) -> bool {
        self.confirm_publish
    }

    #[must_use]
    pub fn workflow<C: Confirm>(&self, user: &Identity, confirm: C) -> Workflow<C> {
        Workflow::new(self.in_flight.clone(), user.id.clone(), confirm)
    }
}
