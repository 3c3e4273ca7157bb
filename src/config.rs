//! Configuration Management
//!
//! Resolves client settings with the precedence explicit value > environment
//! variable > config file (`{config_dir}/stratus/config.json`). The file is
//! also where `save` persists the last used endpoint/project.

use crate::auth::Credentials;
use crate::client::ServiceClient;
use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Service endpoint, including the API version path
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Project to scope requests to
    #[serde(default)]
    pub project_id: Option<String>,
    /// Pre-issued bearer token
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
    /// Region hint used when deriving regional endpoints
    #[serde(default)]
    pub region: Option<String>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stratus").join("config.json"))
    }

    /// Load configuration: file values overlaid by environment variables.
    pub fn load() -> Self {
        let file = Self::config_path()
            .filter(|p| p.exists())
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();

        overlay(file, Self::from_env())
    }

    /// Configuration from `STRATUS_*` environment variables only.
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("STRATUS_ENDPOINT").ok(),
            project_id: std::env::var("STRATUS_PROJECT_ID")
                .ok()
                .filter(|p| validate_project_id(p)),
            token: std::env::var("STRATUS_TOKEN").ok(),
            region: std::env::var("STRATUS_REGION").ok(),
        }
    }

    /// Save configuration to disk. The token is never written.
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SdkError::Config {
                message: format!("cannot create config directory: {e}"),
            })?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content).map_err(|e| SdkError::Config {
            message: format!("cannot write config file: {e}"),
        })?;

        Ok(())
    }

    /// Endpoint, or a configuration error naming what is missing.
    pub fn require_endpoint(&self) -> Result<&str> {
        self.endpoint.as_deref().ok_or_else(|| SdkError::Config {
            message: "no endpoint configured (set STRATUS_ENDPOINT)".to_string(),
        })
    }

    /// Project id, validated, or a configuration error.
    pub fn require_project_id(&self) -> Result<&str> {
        let project = self.project_id.as_deref().ok_or_else(|| SdkError::Config {
            message: "no project configured (set STRATUS_PROJECT_ID)".to_string(),
        })?;

        if !validate_project_id(project) {
            return Err(SdkError::Config {
                message: format!("invalid project id format: {project}"),
            });
        }

        Ok(project)
    }

    /// Build a [`ServiceClient`] from this configuration.
    pub fn client(&self) -> Result<ServiceClient> {
        let endpoint = self.require_endpoint()?;
        let project_id = self.require_project_id()?;
        let token = self.token.as_deref().ok_or_else(|| SdkError::Config {
            message: "no token configured (set STRATUS_TOKEN)".to_string(),
        })?;

        ServiceClient::new(endpoint, project_id, Credentials::from_static(token))
    }
}

/// Overlay `over` onto `base`: fields set in `over` win.
fn overlay(base: Config, over: Config) -> Config {
    Config {
        endpoint: over.endpoint.or(base.endpoint),
        project_id: over.project_id.or(base.project_id),
        token: over.token.or(base.token),
        region: over.region.or(base.region),
    }
}

/// Validate a Stratus project id: 32 lowercase hex characters.
fn validate_project_id(project: &str) -> bool {
    project.len() == 32
        && project
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT: &str = "0a1b2c3d4e5f0a1b2c3d4e5f0a1b2c3d";

    #[test]
    fn valid_project_id_accepted() {
        assert!(validate_project_id(PROJECT));
    }

    #[test]
    fn invalid_project_ids_rejected() {
        assert!(!validate_project_id(""));
        assert!(!validate_project_id("short"));
        assert!(!validate_project_id(&PROJECT.to_uppercase()));
        assert!(!validate_project_id("0a1b2c3d4e5f0a1b2c3d4e5f0a1b2c3g")); // non-hex
        assert!(!validate_project_id(&format!("{PROJECT}ff"))); // too long
    }

    #[test]
    fn overlay_prefers_the_override() {
        let file = Config {
            endpoint: Some("https://file.example/V1.0".to_string()),
            project_id: Some(PROJECT.to_string()),
            token: None,
            region: Some("eu-west-0".to_string()),
        };
        let env = Config {
            endpoint: Some("https://env.example/V1.0".to_string()),
            project_id: None,
            token: Some("env-token".to_string()),
            region: None,
        };

        let merged = overlay(file, env);
        assert_eq!(merged.endpoint.as_deref(), Some("https://env.example/V1.0"));
        assert_eq!(merged.project_id.as_deref(), Some(PROJECT));
        assert_eq!(merged.token.as_deref(), Some("env-token"));
        assert_eq!(merged.region.as_deref(), Some("eu-west-0"));
    }

    #[test]
    fn missing_fields_surface_as_config_errors() {
        let config = Config::default();
        assert!(matches!(
            config.require_endpoint(),
            Err(SdkError::Config { .. })
        ));
        assert!(matches!(
            config.require_project_id(),
            Err(SdkError::Config { .. })
        ));
        assert!(config.client().is_err());
    }

    #[test]
    fn token_is_not_serialized() {
        let config = Config {
            token: Some("secret".to_string()),
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
