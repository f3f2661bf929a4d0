/// Server services
pub mod accounts;
pub mod auth;

pub use accounts::{create_account, NewAccount};
pub use auth::{AuthService, TokenPair};
