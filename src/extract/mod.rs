//! Extraction pipeline: run both catalog scrapes, assemble one result
//!
//! The assembler owns the page's lifetime for one request: acquire, run
//! Catalog A then Catalog B sequentially on the same tab (a single page
//! only supports one in-flight operation, so there is no parallelism to
//! be had here), release unconditionally, merge the three numbers.
//!
//! Field-level failure never aborts a request. Each extractor resolves
//! its own problems to the sentinel value and the result record always
//! carries exactly three numeric fields.

pub mod bookfind;
pub mod lexile;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::browser::BrowserPool;
use crate::config::Config;
use crate::error::Result;
use crate::isbn::Isbn;

/// Sentinel for an integer score that could not be extracted
pub const UNKNOWN_INT: i64 = -1;

/// Sentinel for a floating-point score that could not be extracted
pub const UNKNOWN_SCORE: f64 = -1.0;

/// Combined reading-difficulty metrics for one ISBN.
///
/// Always exactly three fields; any of them may carry the sentinel -1
/// meaning "not found / extraction failed" for that field alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Lexile text-complexity measure (Catalog A)
    pub lexile: i64,
    /// ATOS book level (Catalog B)
    pub atos: f64,
    /// AR points (Catalog B)
    pub ar: f64,
}

/// Run both catalog extractions for one validated ISBN.
///
/// Only page acquisition can fail here; everything downstream degrades
/// to sentinel fields instead of erroring.
pub async fn extract_metrics(
    pool: &BrowserPool,
    isbn: &Isbn,
    config: &Config,
) -> Result<ExtractionResult> {
    let page = pool.acquire().await?;

    let lexile = lexile::fetch_lexile(&page, isbn, config).await;
    let (atos, ar) = bookfind::fetch_bookfind(&page, isbn, config).await;

    page.release().await;

    let result = ExtractionResult { lexile, atos, ar };
    info!(
        %isbn,
        lexile = result.lexile,
        atos = result.atos,
        ar = result.ar,
        "Extraction complete"
    );
    Ok(result)
}

/// Parse a leading signed integer, ignoring trailing text.
///
/// The Lexile measure renders as e.g. `"1030L"`; the numeric prefix is
/// the score. Empty or non-numeric input yields None.
pub(crate) fn scan_i64(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, trimmed),
    };
    let len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    rest[..len].parse::<i64>().ok().map(|v| sign * v)
}

/// Parse a leading signed decimal number, ignoring trailing text.
pub(crate) fn scan_f64(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0f64, rest),
        None => (1.0f64, trimmed),
    };
    let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if int_len == 0 {
        return None;
    }
    let mut end = int_len;
    if let Some(frac) = rest[int_len..].strip_prefix('.') {
        let frac_len = frac.bytes().take_while(u8::is_ascii_digit).count();
        if frac_len > 0 {
            end = int_len + 1 + frac_len;
        }
    }
    rest[..end].parse::<f64>().ok().map(|v| sign * v)
}
