use crate::config::types::{Config, MailchimpConfig, ScraperConfig, SheetsConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
///
/// Sections are checked in file order and the first problem is returned.
///
/// # Arguments
///
/// * `config` - The freshly parsed configuration
///
/// # Returns
///
/// * `Ok(())` - Every section is usable
/// * `Err(ConfigError::InvalidUrl)` - A URL does not parse
/// * `Err(ConfigError::Validation)` - A value is empty or out of range
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_mailchimp_config(&config.mailchimp)?;
    validate_sheets_config(&config.sheets)?;
    validate_scraper_config(&config.scraper)?;
    Ok(())
}

/// Validates marketing API configuration
fn validate_mailchimp_config(config: &MailchimpConfig) -> Result<(), ConfigError> {
    if config.api_key.trim().is_empty() {
        return Err(ConfigError::Validation(
            "mailchimp api-key cannot be empty".to_string(),
        ));
    }

    if let Some(base) = &config.base_url {
        validate_http_url("mailchimp base-url", base)?;
        return Ok(());
    }

    let datacenter = config.resolved_datacenter().ok_or_else(|| {
        ConfigError::Validation(
            "mailchimp datacenter is not set and cannot be derived from the api-key (expected '<key>-<dc>')"
                .to_string(),
        )
    })?;

    if !datacenter.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::Validation(format!(
            "mailchimp datacenter must be alphanumeric, got '{}'",
            datacenter
        )));
    }

    Ok(())
}

/// Validates spreadsheet configuration
fn validate_sheets_config(config: &SheetsConfig) -> Result<(), ConfigError> {
    if config.credentials_file.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "sheets credentials-file cannot be empty".to_string(),
        ));
    }

    if config.spreadsheet_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "sheets spreadsheet-name cannot be empty".to_string(),
        ));
    }

    validate_http_url("sheets-base-url", &config.sheets_base_url)?;
    validate_http_url("drive-base-url", &config.drive_base_url)?;

    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    validate_http_url("scraper url", &config.url)?;

    if config.max_scroll_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max-scroll-attempts must be >= 1, got {}",
            config.max_scroll_attempts
        )));
    }

    if config.wait_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "wait-timeout-secs must be >= 1, got {}",
            config.wait_timeout_secs
        )));
    }

    Ok(())
}

/// Validates that a value parses as an http(s) URL
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    Ok(())
}
