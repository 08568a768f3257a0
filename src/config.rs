//! Configuration loading for lexos
//!
//! Resolution priority: `LEXOS_CONFIG` path → `./lexos.toml` → compiled
//! defaults, with `LEXOS_BIND_ADDR` overriding the bind address last.
//!
//! Upstream selector strings live here as data, not in extractor logic:
//! when either catalog site changes its markup, the fix is a config edit
//! (or a new compiled default), never an extractor change. Every field has
//! a compiled default, so a partial TOML file only overrides what it names.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::error::{Error, Result};

/// Default HTTP bind address
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5780";

/// Default timeout for page navigations and load waits
const DEFAULT_NAV_TIMEOUT_MS: u64 = 30_000;

/// Default timeout for waiting on a selector to appear
const DEFAULT_SELECTOR_TIMEOUT_MS: u64 = 10_000;

/// Service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Timeout for page navigations and load-state waits, in milliseconds
    pub nav_timeout_ms: u64,
    /// Timeout for waiting on an element to appear, in milliseconds
    pub selector_timeout_ms: u64,
    /// Catalog A (Lexile hub) URLs and locators
    pub lexile: LexileLocators,
    /// Catalog B (AR BookFind) URLs and locators
    pub bookfind: BookfindLocators,
}

/// Locators for the Lexile hub (Catalog A): one detail page, one score field.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LexileLocators {
    /// Per-ISBN detail URL prefix; the canonical ISBN is appended
    pub detail_url: String,
    /// Exact URL the site redirects to when the ISBN has no detail page
    pub no_results_url: String,
    /// Element carrying the Lexile measure text (e.g. "1030L")
    pub score: String,
}

/// Locators for AR BookFind (Catalog B): the multi-step search flow.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BookfindLocators {
    /// Search entry URL (user-type gate page)
    pub entry_url: String,
    /// Radio button selecting the fixed user role
    pub role_radio: String,
    /// Submit button on the user-type gate
    pub role_submit: String,
    /// ISBN search input, rendered asynchronously after the gate
    pub isbn_input: String,
    /// Search submit button
    pub search_button: String,
    /// Banner shown when the search matched nothing
    pub failed_banner: String,
    /// First result's title link, opens the detail view
    pub title_link: String,
    /// Book level (ATOS) display field on the detail view
    pub level_field: String,
    /// AR points display field on the detail view
    pub points_field: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            nav_timeout_ms: DEFAULT_NAV_TIMEOUT_MS,
            selector_timeout_ms: DEFAULT_SELECTOR_TIMEOUT_MS,
            lexile: LexileLocators::default(),
            bookfind: BookfindLocators::default(),
        }
    }
}

impl Default for LexileLocators {
    fn default() -> Self {
        Self {
            detail_url: "https://hub.lexile.com/find-a-book/book-details/".to_string(),
            no_results_url: "https://hub.lexile.com/find-a-book/book-results".to_string(),
            score: "#content > div > div > div > div.details > div.metadata > \
                    div.sc-kexyCK.cawTwh > div.header-info > div > span"
                .to_string(),
        }
    }
}

impl Default for BookfindLocators {
    fn default() -> Self {
        Self {
            entry_url: "https://www.arbookfind.com/UserType.aspx?RedirectURL=%2fadvanced.aspx"
                .to_string(),
            role_radio: "#radLibrarian".to_string(),
            role_submit: "#btnSubmitUserType".to_string(),
            isbn_input: "#ctl00_ContentPlaceHolder1_txtISBN".to_string(),
            search_button: "#ctl00_ContentPlaceHolder1_btnDoIt".to_string(),
            failed_banner: "#ctl00_ContentPlaceHolder1_lblSearchResultFailedLabel".to_string(),
            title_link: "#book-title".to_string(),
            level_field: "#ctl00_ContentPlaceHolder1_ucBookDetail_lblBookLevel".to_string(),
            points_field: "#ctl00_ContentPlaceHolder1_ucBookDetail_lblPoints".to_string(),
        }
    }
}

impl Config {
    /// Load configuration following the resolution priority order:
    /// 1. File named by the `LEXOS_CONFIG` environment variable
    /// 2. `./lexos.toml` if present
    /// 3. Compiled defaults
    ///
    /// `LEXOS_BIND_ADDR` overrides the bind address from any source.
    pub fn load() -> Result<Config> {
        let path = std::env::var("LEXOS_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(|| {
                let local = PathBuf::from("lexos.toml");
                local.exists().then_some(local)
            });

        let mut config = match path {
            Some(path) => Self::from_path(&path)?,
            None => {
                info!("No config file found, using compiled defaults");
                Config::default()
            }
        };

        if let Ok(addr) = std::env::var("LEXOS_BIND_ADDR") {
            info!(bind_addr = %addr, "Bind address overridden from environment");
            config.bind_addr = addr;
        }

        Ok(config)
    }

    /// Load configuration from a specific TOML file.
    pub fn from_path(path: &Path) -> Result<Config> {
        info!(path = %path.display(), "Loading config file");
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Timeout applied to every navigation and load-state wait.
    pub fn nav_timeout(&self) -> Duration {
        Duration::from_millis(self.nav_timeout_ms)
    }

    /// Timeout applied to every wait-for-selector.
    pub fn selector_timeout(&self) -> Duration {
        Duration::from_millis(self.selector_timeout_ms)
    }
}
