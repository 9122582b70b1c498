pub mod auth;
pub mod dashboard;
pub mod health;
pub mod public;
pub mod response;

pub use self::health::health;
