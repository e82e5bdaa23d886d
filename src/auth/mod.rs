//! Service principal authentication (OAuth2 client-credentials grant)

pub mod client;
pub mod credentials;
pub mod token;

pub use client::{AuthClient, AuthError};
pub use credentials::Credentials;
pub use token::AccessToken;
