use crate::config::types::{
    Config, CrawlerConfig, InputConfig, OutputConfig, SearchConfig, UserAgentConfig,
};
use crate::url::url_is_valid;
use crate::ConfigError;
use url::Url;

/// Smallest page limit that makes a search engine worth building
pub const MIN_PAGE_LIMIT: usize = 2;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_input_config(&config.input)?;
    validate_output_config(&config.output)?;
    validate_search_config(&config.search)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if !url_is_valid(&config.seed_url) {
        return Err(ConfigError::InvalidUrl(format!(
            "Invalid seed-url '{}'",
            config.seed_url
        )));
    }

    if config.page_limit < MIN_PAGE_LIMIT {
        return Err(ConfigError::Validation(format!(
            "page_limit must be >= {}, got {}",
            MIN_PAGE_LIMIT, config.page_limit
        )));
    }

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(
            "request_timeout must be >= 1s".to_string(),
        ));
    }

    if config.crawl_deadline == Some(0) {
        return Err(ConfigError::Validation(
            "crawl_deadline must be >= 1s when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

fn validate_input_config(config: &InputConfig) -> Result<(), ConfigError> {
    if config.stop_words_path.is_empty() {
        return Err(ConfigError::Validation(
            "stop_words_path cannot be empty".to_string(),
        ));
    }

    if config.thesaurus_path.is_empty() {
        return Err(ConfigError::Validation(
            "thesaurus_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.state_path.is_empty() {
        return Err(ConfigError::Validation(
            "state_path cannot be empty".to_string(),
        ));
    }

    if config.matrix_path.is_empty() {
        return Err(ConfigError::Validation(
            "matrix_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.results < 1 {
        return Err(ConfigError::Validation(
            "results must be >= 1".to_string(),
        ));
    }

    if config.leaders < 1 {
        return Err(ConfigError::Validation(
            "leaders must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
