use std::time::Duration;

use logistik_center::config::Config;
use logistik_center::services::{OverlapPolicy, ReturnPolicy};
use serial_test::serial;

const KEYS: [&str; 7] = [
    "API_BASE_URL",
    "REQUEST_TIMEOUT_SECS",
    "PORT",
    "CORS_ALLOWED_ORIGINS",
    "OVERLAP_POLICY",
    "RETURN_POLICY",
    "SEED_DEMO",
];

fn clear_env() {
    for key in KEYS {
        unsafe { std::env::remove_var(key) };
    }
}

#[test]
#[serial]
fn test_defaults() {
    clear_env();
    let config = Config::from_env();

    assert_eq!(config.api_base_url, "http://127.0.0.1:8000");
    assert_eq!(config.request_timeout, Duration::from_secs(10));
    assert_eq!(config.port, 8000);
    assert!(config.cors_allowed_origins.is_empty());
    assert_eq!(config.overlap_policy, OverlapPolicy::RejectedOnly);
    assert_eq!(config.return_policy, ReturnPolicy::AlwaysComplete);
    assert!(!config.seed_demo);
}

#[test]
#[serial]
fn test_reads_environment() {
    clear_env();
    unsafe {
        std::env::set_var("API_BASE_URL", "https://logistik.example.ac.id/api/");
        std::env::set_var("REQUEST_TIMEOUT_SECS", "3");
        std::env::set_var("PORT", "9100");
        std::env::set_var("CORS_ALLOWED_ORIGINS", "http://localhost:5173, ,http://127.0.0.1:5173");
        std::env::set_var("OVERLAP_POLICY", "rejected-and-completed");
        std::env::set_var("RETURN_POLICY", "Complete-On-Full-Return");
        std::env::set_var("SEED_DEMO", "1");
    }

    let config = Config::from_env();
    clear_env();

    assert_eq!(config.api_base_url, "https://logistik.example.ac.id/api");
    assert_eq!(config.request_timeout, Duration::from_secs(3));
    assert_eq!(config.port, 9100);
    assert_eq!(
        config.cors_allowed_origins,
        vec!["http://localhost:5173", "http://127.0.0.1:5173"]
    );
    assert_eq!(config.overlap_policy, OverlapPolicy::RejectedAndCompleted);
    assert_eq!(config.return_policy, ReturnPolicy::CompleteOnFullReturn);
    assert!(config.seed_demo);
    assert_eq!(config.policies().returns, ReturnPolicy::CompleteOnFullReturn);
}

#[test]
#[serial]
fn test_invalid_values_fall_back() {
    clear_env();
    unsafe {
        std::env::set_var("PORT", "not-a-port");
        std::env::set_var("OVERLAP_POLICY", "strict");
        std::env::set_var("REQUEST_TIMEOUT_SECS", "-1");
    }

    let config = Config::from_env();
    clear_env();

    assert_eq!(config.port, 8000);
    assert_eq!(config.overlap_policy, OverlapPolicy::RejectedOnly);
    assert_eq!(config.request_timeout, Duration::from_secs(10));
}
