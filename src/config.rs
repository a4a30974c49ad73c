use std::{collections::HashMap, env, fmt, path::Path};

use crate::{Environment, Result, SfError};

/// Source of named configuration values.
pub trait ConfigProvider {
    fn get(&self, key: &str) -> Option<String>;
}

/// Configuration from process environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfig;

impl ConfigProvider for EnvConfig {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl ConfigProvider for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Loads a dotenv file into the process environment.
///
/// With an explicit `path` the file must exist and parse. Without one, a
/// `.env` file in the working directory is loaded if there is one.
/// Variables that are already set are never overridden.
pub fn load_env_file(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            log::debug!("Loading configuration from {}", path.display());
            dotenvy::from_path(path).map_err(|e| {
                SfError::ConfigurationError(format!(
                    "failed to load {}: {}",
                    path.display(),
                    e
                ))
            })
        }
        None => {
            match dotenvy::dotenv() {
                Ok(found) => log::debug!("Loaded configuration from {}", found.display()),
                Err(e) if e.not_found() => log::debug!("No .env file found"),
                Err(e) => log::warn!("Ignoring .env file: {}", e),
            }
            Ok(())
        }
    }
}

/// Credentials for the password grant of one environment.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub domain_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    /// Account password with the security token appended
    pub password: String,
}

impl Credentials {
    pub fn from_config<C>(env: Environment, config: &C) -> Result<Credentials>
    where
        C: ConfigProvider + ?Sized,
    {
        let lookup = |name: &str| {
            let key = format!("{}_SF_{}", env.prefix(), name);
            config
                .get(&key)
                .ok_or_else(|| SfError::ConfigurationError(format!("{} is not set", key)))
        };

        let domain_url = lookup("DOMAIN_URL")?;
        Ok(Credentials {
            domain_url: domain_url.trim_end_matches('/').into(),
            client_id: lookup("OAUTH_CLIENT_ID")?,
            client_secret: lookup("OAUTH_CLIENT_SECRET")?,
            username: lookup("USERNAME")?,
            password: lookup("PASSWORD")? + &lookup("SEC_TOKEN")?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("domain_url", &self.domain_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
