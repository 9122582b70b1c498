//! # Folio (portfolio site server)
//!
//! `folio` serves a personal portfolio (published blogs and projects) and a
//! password-protected dashboard for managing that content. It owns no data:
//! every read and write goes to a remote portfolio REST API, and every view is
//! re-read from that API after a change.
//!
//! ## Session Guard
//!
//! The remote API issues an `HttpOnly` `token` cookie on login. `folio` never
//! parses the token; it forwards it to `GET /api/auth/me` and trusts the answer.
//! Every request under `/dashboard` goes through [`api::guard::require_session`],
//! which redirects to `/login` unless the identity check succeeds.
//!
//! ## Mutation Workflow
//!
//! Dashboard writes (create, update, delete, publish toggle) run through
//! [`mutation::Workflow`]: validate (forms only), confirm, execute exactly one
//! remote call, report, and re-fetch the originating list on success.

pub mod api;
pub mod cli;
pub mod content;
pub mod mutation;
pub mod remote;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
