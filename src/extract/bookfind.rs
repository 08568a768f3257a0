//! Catalog B: AR BookFind extractor
//!
//! The transactional side of the pipeline: a guided multi-step flow with
//! a user-role gate, an asynchronously rendered search form, and a
//! failure banner distinguishing "not in this catalog" from a real miss.
//!
//! Flow states: NotStarted → RoleSelected → SearchSubmitted →
//! {no-match | DetailOpened} → Done. Both the no-match banner and a fully
//! read detail view are terminal successes; a definitive negative is not
//! an error. Any step whose expected element never appears times out,
//! logs the state it stalled in, and degrades the affected fields to the
//! sentinel so the other catalog's result still goes out.

use chromiumoxide::page::Page;
use tracing::{debug, warn};

use crate::browser::{goto_with_timeout, wait_for_load, wait_for_selector};
use crate::config::Config;
use crate::error::Result;
use crate::isbn::Isbn;

use super::{scan_f64, UNKNOWN_SCORE};

/// Progress marker for the search flow, reported when a step stalls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    NotStarted,
    RoleSelected,
    SearchSubmitted,
    DetailOpened,
}

/// Terminal outcomes of the flow.
enum Outcome {
    /// The failure banner appeared: the ISBN is not in this catalog.
    NoMatch,
    /// Detail view read; each field already degraded independently.
    Scores { level: f64, points: f64 },
}

/// Fetch the ATOS level and AR points for an ISBN.
///
/// Runs after the Lexile extraction on the same borrowed page. Returns
/// `(level, points)`, either of which may be the sentinel.
pub async fn fetch_bookfind(page: &Page, isbn: &Isbn, config: &Config) -> (f64, f64) {
    let mut step = Step::NotStarted;
    match run_flow(page, isbn, config, &mut step).await {
        Ok(Outcome::NoMatch) => {
            debug!(%isbn, "BookFind reported no match");
            (UNKNOWN_SCORE, UNKNOWN_SCORE)
        }
        Ok(Outcome::Scores { level, points }) => (level, points),
        Err(e) => {
            warn!(%isbn, stalled_at = ?step, error = %e, "BookFind extraction degraded to sentinel");
            (UNKNOWN_SCORE, UNKNOWN_SCORE)
        }
    }
}

async fn run_flow(
    page: &Page,
    isbn: &Isbn,
    config: &Config,
    step: &mut Step,
) -> Result<Outcome> {
    let locators = &config.bookfind;
    let nav = config.nav_timeout();
    let sel = config.selector_timeout();

    // Step 1-2: entry page, then the user-role gate required before any search
    goto_with_timeout(page, &locators.entry_url, nav).await?;
    wait_for_selector(page, &locators.role_radio, sel)
        .await?
        .click()
        .await?;
    wait_for_selector(page, &locators.role_submit, sel)
        .await?
        .click()
        .await?;
    *step = Step::RoleSelected;

    // Step 3-4: the search form renders asynchronously after the gate
    let isbn_field = wait_for_selector(page, &locators.isbn_input, sel).await?;
    isbn_field.click().await?;
    isbn_field.type_str(isbn.as_str()).await?;
    wait_for_selector(page, &locators.search_button, sel)
        .await?
        .click()
        .await?;
    *step = Step::SearchSubmitted;

    // Step 5: a present failure banner means the ISBN is not in the catalog
    wait_for_load(page, nav).await?;
    if page.find_element(&locators.failed_banner).await.is_ok() {
        return Ok(Outcome::NoMatch);
    }

    // Step 6: open the first result's detail view
    wait_for_selector(page, &locators.title_link, sel)
        .await?
        .click()
        .await?;
    wait_for_load(page, nav).await?;
    *step = Step::DetailOpened;

    // Step 7: each field parses independently; a missing or unparseable
    // field degrades alone without touching the other
    let level = read_score(page, &locators.level_field, config, isbn, "level").await;
    let points = read_score(page, &locators.points_field, config, isbn, "points").await;

    Ok(Outcome::Scores { level, points })
}

async fn read_score(
    page: &Page,
    selector: &str,
    config: &Config,
    isbn: &Isbn,
    field: &str,
) -> f64 {
    let text = match wait_for_selector(page, selector, config.selector_timeout()).await {
        Ok(element) => match element.inner_text().await {
            Ok(text) => text.unwrap_or_default(),
            Err(e) => {
                warn!(%isbn, field, error = %e, "BookFind field read failed");
                return UNKNOWN_SCORE;
            }
        },
        Err(e) => {
            warn!(%isbn, field, error = %e, "BookFind field missing");
            return UNKNOWN_SCORE;
        }
    };

    match scan_f64(&text) {
        Some(value) => value,
        None => {
            warn!(%isbn, field, text = %text, "BookFind field not numeric");
            UNKNOWN_SCORE
        }
    }
}
