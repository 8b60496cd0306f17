use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Parses and validates configuration from TOML text
///
/// # Arguments
///
/// * `content` - The full text of a configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Parsed, defaulted, and validated configuration
/// * `Err(ConfigError::Parse)` - The text is not valid TOML for [`Config`]
/// * `Err(ConfigError)` - A value failed validation
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Reads a TOML configuration file and validates it
///
/// ```no_run
/// use campaign_sync::config::load_config;
/// use std::path::Path;
///
/// let config = load_config(Path::new("campaign-sync.toml")).unwrap();
/// println!("Scraping: {}", config.scraper.url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    parse_config(&std::fs::read_to_string(path)?)
}

/// Hex-encoded SHA-256 of a configuration file's bytes
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    Ok(hash_content(&std::fs::read(path)?))
}

/// Reads the file once and returns the validated config with its hash
///
/// The hash is logged at startup so a spreadsheet update can be traced back
/// to the configuration that produced it.
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_content(content.as_bytes())))
}

fn hash_content(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
