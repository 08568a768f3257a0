//! Unit tests for configuration resolution
//!
//! Note: Uses serial_test to prevent ENV variable race conditions. Tests
//! that manipulate LEXOS_* variables are marked #[serial] so they run
//! sequentially, not in parallel.

use std::io::Write;
use std::time::Duration;

use serial_test::serial;
use tempfile::NamedTempFile;

use lexos::config::Config;

#[test]
fn defaults_carry_the_known_site_locators() {
    let config = Config::default();

    assert_eq!(config.bind_addr, "127.0.0.1:5780");
    assert!(config
        .lexile
        .detail_url
        .starts_with("https://hub.lexile.com/find-a-book/book-details/"));
    assert_eq!(
        config.lexile.no_results_url,
        "https://hub.lexile.com/find-a-book/book-results"
    );
    assert_eq!(config.bookfind.role_radio, "#radLibrarian");
    assert_eq!(config.bookfind.title_link, "#book-title");
    assert_eq!(
        config.bookfind.failed_banner,
        "#ctl00_ContentPlaceHolder1_lblSearchResultFailedLabel"
    );
}

#[test]
fn timeout_accessors_convert_to_durations() {
    let config = Config::default();
    assert_eq!(config.nav_timeout(), Duration::from_millis(30_000));
    assert_eq!(config.selector_timeout(), Duration::from_millis(10_000));
}

#[test]
fn partial_toml_only_overrides_named_fields() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "bind_addr = \"0.0.0.0:8080\"").unwrap();
    writeln!(file, "selector_timeout_ms = 5000").unwrap();

    let config = Config::from_path(file.path()).unwrap();

    assert_eq!(config.bind_addr, "0.0.0.0:8080");
    assert_eq!(config.selector_timeout(), Duration::from_millis(5000));
    // Untouched sections keep compiled defaults
    assert_eq!(config.nav_timeout(), Duration::from_millis(30_000));
    assert_eq!(config.bookfind.role_radio, "#radLibrarian");
}

#[test]
fn locator_tables_load_from_toml() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[lexile]").unwrap();
    writeln!(file, "score = \"#new-score-span\"").unwrap();
    writeln!(file, "[bookfind]").unwrap();
    writeln!(file, "failed_banner = \"#newFailLabel\"").unwrap();

    let config = Config::from_path(file.path()).unwrap();

    assert_eq!(config.lexile.score, "#new-score-span");
    assert_eq!(config.bookfind.failed_banner, "#newFailLabel");
    // Siblings within a partially specified table keep their defaults
    assert!(config.lexile.detail_url.contains("hub.lexile.com"));
    assert_eq!(config.bookfind.role_submit, "#btnSubmitUserType");
}

#[test]
fn malformed_toml_is_a_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "bind_addr = [not toml").unwrap();

    let err = Config::from_path(file.path()).unwrap_err();
    assert!(err.to_string().contains("configuration error"));
}

#[test]
#[serial]
fn lexos_config_env_selects_the_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "bind_addr = \"127.0.0.1:9999\"").unwrap();

    std::env::set_var("LEXOS_CONFIG", file.path());
    std::env::remove_var("LEXOS_BIND_ADDR");

    let config = Config::load().unwrap();
    assert_eq!(config.bind_addr, "127.0.0.1:9999");

    std::env::remove_var("LEXOS_CONFIG");
}

#[test]
#[serial]
fn bind_addr_env_overrides_the_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "bind_addr = \"127.0.0.1:9999\"").unwrap();

    std::env::set_var("LEXOS_CONFIG", file.path());
    std::env::set_var("LEXOS_BIND_ADDR", "0.0.0.0:5780");

    let config = Config::load().unwrap();
    assert_eq!(config.bind_addr, "0.0.0.0:5780");

    std::env::remove_var("LEXOS_CONFIG");
    std::env::remove_var("LEXOS_BIND_ADDR");
}
