//! `sf-session` exchanges per-environment Salesforce credentials for a
//! session id using the OAuth2 password grant.
//!
//! ```no_run
//! use sf_session::{config::EnvConfig, fetch_session_token, Environment};
//!
//! match fetch_session_token(Environment::DevRc, &EnvConfig) {
//!     Ok(token) => println!("Session ID: {}", token.access_token),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```
//!
//! # Configuration
//!
//! Each environment reads six values keyed by its prefix (`DEVRC`,
//! `DEVTECHRC`, `PRODLIKE` or `PROD`):
//!
//! * `<PREFIX>_SF_DOMAIN_URL`
//! * `<PREFIX>_SF_OAUTH_CLIENT_ID`
//! * `<PREFIX>_SF_OAUTH_CLIENT_SECRET`
//! * `<PREFIX>_SF_USERNAME`
//! * `<PREFIX>_SF_PASSWORD`
//! * `<PREFIX>_SF_SEC_TOKEN`

use std::fmt;

#[cfg(test)]
#[macro_use]
extern crate lazy_static;

pub mod config;
pub mod environment;
pub mod token;

pub use environment::{resolve_environment, Environment, EnvironmentPrompt};
pub use token::{fetch_session_token, report_session, TokenResponse};

pub type Result<T> = std::result::Result<T, SfError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SfError {
    /// The environment name is not one of the known environments
    InvalidEnvironment(String),
    /// The interactive environment selection was cancelled or failed
    SelectionAborted(String),
    /// A configuration value or configuration file is missing or unreadable
    ConfigurationError(String),
    /// The token request could not be sent or no response was received
    RequestFailed(Environment, String),
    /// The response body could not be read
    BodyReadFailed(String),
    /// The response body is not a token response
    DeserializationFailed(String),
}

impl fmt::Display for SfError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SfError::InvalidEnvironment(env) => write!(
                f,
                "env value invalid: '{}' (allowed values: {})",
                env,
                Environment::labels().join(", ")
            ),
            SfError::SelectionAborted(s) => write!(f, "environment selection aborted: {}", s),
            SfError::ConfigurationError(s) => write!(f, "configuration error: {}", s),
            SfError::RequestFailed(env, s) => {
                write!(f, "Failed to get an access token for env: {} ({})", env, s)
            }
            SfError::BodyReadFailed(s) => write!(f, "Error reading response body: {}", s),
            SfError::DeserializationFailed(s) => {
                write!(f, "Error parsing Salesforce token response: {}", s)
            }
        }
    }
}

impl std::error::Error for SfError {}
