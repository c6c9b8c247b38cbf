use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - At least one community is configured
/// - Relay templates reference the upstream URL
/// - Game probabilities and threshold are in range
/// - Leaderboard keeps at least one entry
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.content.communities.iter().all(|c| c.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "content.communities must contain at least one community".to_string(),
        ));
    }

    if config.content.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "content.timeout_secs cannot be 0".to_string(),
        ));
    }

    for relay in &config.content.relays {
        if !relay.url_template.contains("{url}") && !relay.url_template.contains("{url_encoded}")
        {
            return Err(ConfigError::ValidationError(format!(
                "relay '{}' url_template must contain {{url}} or {{url_encoded}}",
                relay.name
            )));
        }
    }

    let game = &config.game;
    for (name, p) in [
        ("game.keyword_probability", game.keyword_probability),
        ("game.important_probability", game.important_probability),
    ] {
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::ValidationError(format!(
                "{} must be between 0 and 1, got {}",
                name, p
            )));
        }
    }

    if !(game.victory_threshold > 0.0 && game.victory_threshold <= 1.0) {
        return Err(ConfigError::ValidationError(format!(
            "game.victory_threshold must be in (0, 1], got {}",
            game.victory_threshold
        )));
    }

    if game.min_word_length == 0 || game.min_guess_length == 0 {
        return Err(ConfigError::ValidationError(
            "game.min_word_length and game.min_guess_length must be positive".to_string(),
        ));
    }

    if config.leaderboard.max_entries == 0 {
        return Err(ConfigError::ValidationError(
            "leaderboard.max_entries cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RelayConfig;

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = Config::default();
        config.server.port = 0;
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_empty_communities_fails() {
        let mut config = Config::default();
        config.content.communities = vec!["  ".to_string()];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_relay_without_placeholder_fails() {
        let mut config = Config::default();
        config.content.relays = vec![RelayConfig::new("broken", "https://relay.example/")];
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_validate_probability_out_of_range_fails() {
        let mut config = Config::default();
        config.game.keyword_probability = 1.5;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_threshold_zero_fails() {
        let mut config = Config::default();
        config.game.victory_threshold = 0.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_leaderboard_fails() {
        let mut config = Config::default();
        config.leaderboard.max_entries = 0;
        assert!(validate_config(&config).is_err());
    }
}
