use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for the changelog tool.
///
/// Holds the default package name and maintainer identity stamped into
/// generated Debian changelogs. Command-line flags override these values.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_package")]
    pub package: String,

    #[serde(default)]
    pub maintainer: MaintainerConfig,
}

/// Maintainer identity used for generated changelog trailers.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MaintainerConfig {
    #[serde(default = "default_maintainer_name")]
    pub name: String,

    #[serde(default = "default_maintainer_email")]
    pub email: String,
}

fn default_package() -> String {
    "package".to_string()
}

fn default_maintainer_name() -> String {
    "Maintainer".to_string()
}

fn default_maintainer_email() -> String {
    "maintainer@example.com".to_string()
}

impl Default for MaintainerConfig {
    fn default() -> Self {
        MaintainerConfig {
            name: default_maintainer_name(),
            email: default_maintainer_email(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            package: default_package(),
            maintainer: MaintainerConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `changelog.toml` in current directory
/// 3. `.changelog.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./changelog.toml").exists() {
        fs::read_to_string("./changelog.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".changelog.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
