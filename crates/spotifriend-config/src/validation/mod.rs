//! Full configuration validation.
//!
//! Validates numeric ranges and endpoint URLs. Each check pushes onto a
//! shared error list so every problem is reported in a single
//! `ConfigError`.

mod helpers;


use crate::schema::SpotifriendConfig;
use spotifriend_common::ConfigError;

use helpers::{validate_https_url, validate_non_empty, validate_range};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &SpotifriendConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_api(&mut errors, config);
    validate_polling(&mut errors, config);
    validate_reachability(&mut errors, config);
    validate_store(&mut errors, config);
    validate_widget(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_api(errors: &mut Vec<String>, config: &SpotifriendConfig) {
    validate_https_url(errors, "api.token_url", &config.api.token_url);
    validate_https_url(errors, "api.buddylist_url", &config.api.buddylist_url);
    validate_https_url(errors, "api.web_base_url", &config.api.web_base_url);
}

fn validate_polling(errors: &mut Vec<String>, config: &SpotifriendConfig) {
    validate_range(errors, "polling.interval_secs", config.polling.interval_secs, 5, 3600);
    validate_range(errors, "polling.login_settle_ms", config.polling.login_settle_ms, 0, 10_000);
    validate_range(errors, "notifications.ttl_ms", config.notifications.ttl_ms, 500, 60_000);
}

fn validate_reachability(errors: &mut Vec<String>, config: &SpotifriendConfig) {
    let r = &config.reachability;
    if !r.enabled {
        return;
    }
    validate_non_empty(errors, "reachability.probe_host", &r.probe_host);
    validate_range(errors, "reachability.interval_secs", r.interval_secs, 1, 300);
    validate_range(errors, "reachability.timeout_secs", r.timeout_secs, 1, 60);
    if r.probe_port == 0 {
        errors.push("reachability.probe_port must not be 0".into());
    }
}

fn validate_store(errors: &mut Vec<String>, config: &SpotifriendConfig) {
    validate_non_empty(errors, "store.cookie_key", &config.store.cookie_key);
    if config.store.cookie_key == config.store.legacy_cookie_key {
        errors.push("store.legacy_cookie_key must differ from store.cookie_key".into());
    }
}

fn validate_widget(errors: &mut Vec<String>, config: &SpotifriendConfig) {
    validate_range(errors, "widget.refresh_minutes", config.widget.refresh_minutes, 1, 1440);
    validate_range(errors, "widget.retry_minutes", config.widget.retry_minutes, 1, 1440);
}
