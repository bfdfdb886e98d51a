use std::sync::{Mutex, MutexGuard, PoisonError};

use super::*;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serialize env access and start from a clean slate.
fn lock_env() -> MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    // SAFETY: every test touching these vars holds ENV_LOCK.
    unsafe {
        std::env::remove_var("PHOTO_ENDPOINT");
        std::env::remove_var("PHOTO_FETCH_RETRIES");
        std::env::remove_var("PHOTO_FALLBACK_URL");
        std::env::remove_var("PHOTO_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("PHOTO_CONNECT_TIMEOUT_SECS");
    }
    guard
}

#[test]
fn from_env_defaults() {
    let _guard = lock_env();
    let cfg = PhotoConfig::from_env().unwrap();
    assert_eq!(cfg, PhotoConfig::default());
    assert_eq!(cfg.endpoint, DEFAULT_PHOTO_ENDPOINT);
    assert_eq!(cfg.retries, DEFAULT_FETCH_RETRIES);
    assert_eq!(cfg.fallback_url, None);
    assert_eq!(
        cfg.timeouts,
        FetchTimeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn from_env_parses_overrides() {
    let _guard = lock_env();
    unsafe {
        std::env::set_var("PHOTO_ENDPOINT", "https://example.test/photos/");
        std::env::set_var("PHOTO_FETCH_RETRIES", "5");
        std::env::set_var("PHOTO_FALLBACK_URL", "https://example.test/fallback.png");
        std::env::set_var("PHOTO_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("PHOTO_CONNECT_TIMEOUT_SECS", "7");
    }

    let cfg = PhotoConfig::from_env().unwrap();
    assert_eq!(cfg.endpoint, "https://example.test/photos");
    assert_eq!(cfg.retries, 5);
    assert_eq!(cfg.fallback_url.as_deref(), Some("https://example.test/fallback.png"));
    assert_eq!(cfg.timeouts, FetchTimeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn from_env_blank_values_use_defaults() {
    let _guard = lock_env();
    unsafe {
        std::env::set_var("PHOTO_FETCH_RETRIES", "  ");
        std::env::set_var("PHOTO_FALLBACK_URL", "");
    }

    let cfg = PhotoConfig::from_env().unwrap();
    assert_eq!(cfg.retries, DEFAULT_FETCH_RETRIES);
    assert_eq!(cfg.fallback_url, None);
}

#[test]
fn from_env_bad_number_errors() {
    let _guard = lock_env();
    unsafe { std::env::set_var("PHOTO_FETCH_RETRIES", "many") };

    let err = PhotoConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("PHOTO_FETCH_RETRIES"));
}

#[test]
fn from_env_rejects_non_http_endpoint() {
    let _guard = lock_env();
    unsafe { std::env::set_var("PHOTO_ENDPOINT", "file:///etc/passwd") };

    let err = PhotoConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("PHOTO_ENDPOINT"));
}

#[test]
fn from_env_rejects_non_http_fallback() {
    let _guard = lock_env();
    unsafe { std::env::set_var("PHOTO_FALLBACK_URL", "fallback.png") };

    let err = PhotoConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("PHOTO_FALLBACK_URL"));
}
