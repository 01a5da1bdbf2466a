//! Configuration Management
//!
//! This module resolves the application credentials the client needs.
//!
//! # Resolution Precedence
//! 1. Environment variables (`BASECTL_APP_ID`, `BASECTL_APP_SECRET`,
//!    `BASECTL_BASE_ID`) — highest priority, all three required together
//! 2. Local config file (`.basectl/config.json`, team-shareable)
//! 3. Global config file (`~/.config/basectl/config.json`, per-user)
//!
//! # Secrets
//! A stored config may name an environment variable for the app secret
//! (`app_secret_env`) instead of storing the secret itself.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::auth::Credentials;
use crate::error::{BasectlError, Result};

/// Environment variable names checked before any config file
pub const ENV_APP_ID: &str = "BASECTL_APP_ID";
pub const ENV_APP_SECRET: &str = "BASECTL_APP_SECRET";
pub const ENV_BASE_ID: &str = "BASECTL_BASE_ID";

/// Stored credential configuration
///
/// Like [`Credentials`] but the secret may be referenced by environment
/// variable name rather than stored directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredentials {
    /// Application identifier
    pub app_id: String,

    /// Application secret stored directly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_secret: Option<String>,

    /// Environment variable name holding the secret (preferred for
    /// team-shareable local configs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_secret_env: Option<String>,

    /// Identifier of the base to administer
    pub base_id: String,
}

impl StoredCredentials {
    /// Store the secret directly
    #[must_use]
    pub fn direct(app_id: String, app_secret: String, base_id: String) -> Self {
        Self { app_id, app_secret: Some(app_secret), app_secret_env: None, base_id }
    }

    /// Reference the secret by environment variable name
    #[must_use]
    pub fn with_secret_env(app_id: String, env_var: String, base_id: String) -> Self {
        Self { app_id, app_secret: None, app_secret_env: Some(env_var), base_id }
    }

    /// Resolve environment references and return usable [`Credentials`]
    pub fn resolve(&self) -> Result<Credentials> {
        let app_secret = match (&self.app_secret, &self.app_secret_env) {
            (Some(secret), _) => secret.clone(),
            (None, Some(env_var)) => std::env::var(env_var).map_err(|_| {
                BasectlError::config(format!(
                    "Environment variable {env_var} not found for app secret"
                ))
            })?,
            (None, None) => {
                return Err(BasectlError::config(
                    "Stored credentials have neither app_secret nor app_secret_env",
                ));
            }
        };

        Ok(Credentials::new(self.app_id.clone(), app_secret, self.base_id.clone()))
    }
}

/// Configuration file location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLocation {
    /// Local config: `.basectl/config.json` (team-shareable)
    Local,
    /// Global config: `~/.config/basectl/config.json` (per-user)
    Global,
}

/// Get path to local config file (`.basectl/config.json`)
pub fn local_config_path() -> Result<PathBuf> {
    let current_dir = std::env::current_dir().map_err(|e| {
        BasectlError::config(format!("Could not determine current directory: {e}"))
    })?;

    Ok(current_dir.join(".basectl").join("config.json"))
}

/// Get path to global config file (`~/.config/basectl/config.json`)
pub fn global_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| BasectlError::config("Could not determine user config directory"))?;

    Ok(config_dir.join("basectl").join("config.json"))
}

/// Load stored credentials from a config file, if it exists
pub fn load_stored(path: &Path) -> Result<Option<StoredCredentials>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| BasectlError::config(format!("Could not read config file: {e}")))?;

    let stored = serde_json::from_str::<StoredCredentials>(&contents)
        .map_err(|e| BasectlError::config(format!("Invalid config file format: {e}")))?;

    Ok(Some(stored))
}

/// Save stored credentials to the chosen config file
pub fn save_credentials(stored: &StoredCredentials, location: ConfigLocation) -> Result<PathBuf> {
    let path = match location {
        ConfigLocation::Local => local_config_path()?,
        ConfigLocation::Global => global_config_path()?,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            BasectlError::config(format!("Could not create config directory: {e}"))
        })?;
    }

    let contents = serde_json::to_string_pretty(stored)
        .map_err(|e| BasectlError::config(format!("Could not serialize config: {e}")))?;

    fs::write(&path, contents)
        .map_err(|e| BasectlError::config(format!("Could not write config file: {e}")))?;

    Ok(path)
}

/// Resolve credentials with precedence: environment > local > global
pub fn load_credentials() -> Result<Credentials> {
    if let Some(credentials) = credentials_from_env() {
        return Ok(credentials);
    }

    for path in [local_config_path()?, global_config_path()?] {
        if let Some(stored) = load_stored(&path)? {
            return stored.resolve();
        }
    }

    Err(BasectlError::config(format!(
        "No credentials found. Set {ENV_APP_ID}/{ENV_APP_SECRET}/{ENV_BASE_ID} or run 'basectl init'."
    )))
}

/// Credentials from the environment, when all three variables are set
fn credentials_from_env() -> Option<Credentials> {
    let app_id = std::env::var(ENV_APP_ID).ok()?;
    let app_secret = std::env::var(ENV_APP_SECRET).ok()?;
    let base_id = std::env::var(ENV_BASE_ID).ok()?;
    Some(Credentials::new(app_id, app_secret, base_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_direct_secret() {
        let stored = StoredCredentials::direct(
            "cli_a1b2".to_string(),
            "sk-secret".to_string(),
            "bascXYZ".to_string(),
        );

        let credentials = stored.resolve().unwrap();
        assert_eq!(credentials.app_id, "cli_a1b2");
        assert_eq!(credentials.app_secret, "sk-secret");
        assert_eq!(credentials.base_id, "bascXYZ");
    }

    #[test]
    fn test_resolve_env_secret() {
        std::env::set_var("BASECTL_TEST_SECRET", "from-env");

        let stored = StoredCredentials::with_secret_env(
            "cli_a1b2".to_string(),
            "BASECTL_TEST_SECRET".to_string(),
            "bascXYZ".to_string(),
        );

        let credentials = stored.resolve().unwrap();
        assert_eq!(credentials.app_secret, "from-env");

        std::env::remove_var("BASECTL_TEST_SECRET");
    }

    #[test]
    fn test_resolve_missing_env_secret() {
        let stored = StoredCredentials::with_secret_env(
            "cli_a1b2".to_string(),
            "BASECTL_NONEXISTENT_VAR".to_string(),
            "bascXYZ".to_string(),
        );

        let err = stored.resolve().unwrap_err();
        assert!(err.message().contains("BASECTL_NONEXISTENT_VAR"));
    }

    #[test]
    fn test_resolve_without_any_secret() {
        let stored = StoredCredentials {
            app_id: "cli_a1b2".to_string(),
            app_secret: None,
            app_secret_env: None,
            base_id: "bascXYZ".to_string(),
        };

        assert!(stored.resolve().is_err());
    }

    #[test]
    fn test_stored_credentials_serialization_omits_absent_secret() {
        let stored = StoredCredentials::with_secret_env(
            "cli_a1b2".to_string(),
            "MY_SECRET".to_string(),
            "bascXYZ".to_string(),
        );

        let json = serde_json::to_string_pretty(&stored).unwrap();
        assert!(json.contains("app_secret_env"));
        assert!(!json.contains("\"app_secret\""));
    }

    #[test]
    fn test_load_stored_missing_file() {
        let path = std::env::temp_dir().join("basectl_test_missing_config.json");
        let _ = fs::remove_file(&path);
        assert!(load_stored(&path).unwrap().is_none());
    }

    #[test]
    fn test_load_stored_round_trip() {
        let path = std::env::temp_dir().join("basectl_test_config.json");
        let stored = StoredCredentials::direct(
            "cli_a1b2".to_string(),
            "sk-secret".to_string(),
            "bascXYZ".to_string(),
        );
        fs::write(&path, serde_json::to_string_pretty(&stored).unwrap()).unwrap();

        let loaded = load_stored(&path).unwrap().unwrap();
        assert_eq!(loaded.app_id, stored.app_id);
        assert_eq!(loaded.base_id, stored.base_id);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_stored_invalid_json() {
        let path = std::env::temp_dir().join("basectl_test_bad_config.json");
        fs::write(&path, "not json").unwrap();

        let err = load_stored(&path).unwrap_err();
        assert!(matches!(err, BasectlError::Config(_)));

        let _ = fs::remove_file(&path);
    }
}
