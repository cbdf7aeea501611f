//! Credential selection for pushing tags.

use crate::error::{Result, SemtagError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

const SSH_PREFIXES: [&str; 2] = ["git@", "ssh://"];
const HTTPS_PREFIX: &str = "https://";

/// How to authenticate against the remote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMethod {
    PublicKey,
    Token,
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::PublicKey => f.write_str("public-key"),
            AuthMethod::Token => f.write_str("token"),
        }
    }
}

impl FromStr for AuthMethod {
    type Err = SemtagError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "public-key" => Ok(AuthMethod::PublicKey),
            "token" => Ok(AuthMethod::Token),
            other => Err(SemtagError::config(format!(
                "'{}' is not a valid auth method, try [public-key, token]",
                other
            ))),
        }
    }
}

/// Transport family of a remote URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteType {
    Ssh,
    Https,
}

impl RemoteType {
    /// Detect the remote type from its URL
    pub fn from_url(url: &str) -> Option<Self> {
        if SSH_PREFIXES.iter().any(|p| url.starts_with(p)) {
            Some(RemoteType::Ssh)
        } else if url.starts_with(HTTPS_PREFIX) {
            Some(RemoteType::Https)
        } else {
            None
        }
    }

    /// The auth method that goes with this transport
    pub fn auth_method(&self) -> AuthMethod {
        match self {
            RemoteType::Ssh => AuthMethod::PublicKey,
            RemoteType::Https => AuthMethod::Token,
        }
    }
}

/// Everything needed to answer a credentials request while pushing
#[derive(Debug, Clone, Default)]
pub struct PushAuth {
    /// Explicit method; detected from the remote URL when unset
    pub method: Option<AuthMethod>,
    pub key_path: Option<PathBuf>,
    pub token: Option<String>,
    pub token_username: Option<String>,
}

impl PushAuth {
    /// Decide which method applies to a remote URL
    pub fn resolve_method(&self, url: &str) -> Result<AuthMethod> {
        if let Some(method) = self.method {
            return Ok(method);
        }
        RemoteType::from_url(url)
            .map(|t| t.auth_method())
            .ok_or_else(|| {
                SemtagError::remote(format!(
                    "cannot determine auth method for '{}': expected a prefix of git@, ssh:// or https://",
                    url
                ))
            })
    }

    /// Build git2 credentials for a remote URL
    pub fn credentials(
        &self,
        url: &str,
        username_from_url: Option<&str>,
    ) -> std::result::Result<git2::Cred, git2::Error> {
        let method = self
            .resolve_method(url)
            .map_err(|e| git2::Error::from_str(&e.to_string()))?;

        match method {
            AuthMethod::PublicKey => {
                let key_path = self
                    .key_path
                    .as_deref()
                    .ok_or_else(|| git2::Error::from_str("no SSH key path configured"))?;
                git2::Cred::ssh_key(username_from_url.unwrap_or("git"), None, key_path, None)
            }
            AuthMethod::Token => {
                let token = self
                    .token
                    .as_deref()
                    .ok_or_else(|| git2::Error::from_str("no auth token configured"))?;
                let username = self
                    .token_username
                    .as_deref()
                    .or(username_from_url)
                    .unwrap_or("git");
                git2::Cred::userpass_plaintext(username, token)
            }
        }
    }
}
