//! Authentication module
//!
//! Zoho Books uses the OAuth2 refresh-token grant. The `Authenticator`
//! caches the access token, refreshes it shortly before expiry and hands
//! each new token to a `TokenStore` so the next run can reuse it.

mod authenticator;
mod store;
mod types;

pub use authenticator::Authenticator;
pub use store::{ConfigFileTokenStore, NoopTokenStore, TokenStore};
pub use types::{CachedToken, OAuthCredentials, EXPIRY_BUFFER_SECS};
