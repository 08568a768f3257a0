//! Browser session pool
//!
//! One long-lived headless Chromium instance shared process-wide; each
//! in-flight request borrows one isolated tab from it. The pool is
//! constructed explicitly at startup and passed into the router state,
//! with explicit launch/shutdown lifecycle. Launch failure is fatal to
//! the process; acquisition failure is fatal only to one request.
//!
//! Pages come back as a [`PageGuard`]: release is explicit and idempotent,
//! and `Drop` closes the page as a fallback so acquire/release stay
//! balanced on every path, including a cancelled request.

use std::ops::Deref;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// How often wait_for_selector re-checks for the element
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Process-wide browser engine. Pages are handed out as [`PageGuard`]s.
///
/// `acquire` only needs a shared reference to the engine, so it takes a
/// read lock: concurrent acquisitions proceed in parallel and one slow
/// tab creation never queues the others. Shutdown takes the write lock.
pub struct BrowserPool {
    /// None before launch and after shutdown
    browser: RwLock<Option<Browser>>,
    /// CDP event loop task, runs until the browser closes
    handler_task: Mutex<Option<JoinHandle<()>>>,
}

impl BrowserPool {
    /// Launch the headless browser engine and start its CDP event loop.
    ///
    /// Called once at process start; any failure here should abort startup.
    pub async fn launch() -> Result<Self> {
        let browser_config = BrowserConfig::builder()
            .build()
            .map_err(Error::Config)?;

        let (browser, mut handler) = Browser::launch(browser_config).await?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "Browser event handler error");
                }
            }
            debug!("Browser event handler finished");
        });

        info!("Browser engine launched");
        Ok(Self {
            browser: RwLock::new(Some(browser)),
            handler_task: Mutex::new(Some(handler_task)),
        })
    }

    /// A pool with no engine attached: acquisition fails with
    /// `EngineUnavailable`. This is the post-shutdown state; router tests
    /// use it to exercise handlers without a Chromium install.
    pub fn offline() -> Self {
        Self {
            browser: RwLock::new(None),
            handler_task: Mutex::new(None),
        }
    }

    /// Open a fresh isolated tab for one request.
    ///
    /// Safe under concurrent calls; every caller gets a distinct page.
    /// Tab creation is a bounded local operation, so no extra timeout here.
    pub async fn acquire(&self) -> Result<PageGuard> {
        let guard = self.browser.read().await;
        let browser = guard.as_ref().ok_or(Error::EngineUnavailable)?;
        let page = browser.new_page("about:blank").await?;
        debug!("Page acquired");
        Ok(PageGuard { page: Some(page) })
    }

    /// Number of open targets in the engine, the initial blank tab
    /// included. Lifecycle tests use it to check acquire/release balance.
    pub async fn page_count(&self) -> Result<usize> {
        let guard = self.browser.read().await;
        let browser = guard.as_ref().ok_or(Error::EngineUnavailable)?;
        Ok(browser.pages().await?.len())
    }

    /// Close the browser engine. Idempotent; called once at process stop.
    pub async fn shutdown(&self) {
        if let Some(mut browser) = self.browser.write().await.take() {
            if let Err(e) = browser.close().await {
                warn!(error = %e, "Browser did not close cleanly");
            }
        }
        if let Some(task) = self.handler_task.lock().await.take() {
            let _ = task.await;
        }
        info!("Browser engine shut down");
    }
}

/// Exclusive ownership of one browser tab for the duration of one request.
///
/// `release()` closes the tab explicitly; dropping the guard (e.g. when the
/// extraction future is cancelled mid-flight) closes it in the background.
/// Either way the page is closed exactly once.
pub struct PageGuard {
    page: Option<Page>,
}

impl PageGuard {
    /// Close the underlying tab. Safe to call on a page already in a
    /// broken state; close errors are logged, not propagated.
    pub async fn release(mut self) {
        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                warn!(error = %e, "Page did not close cleanly");
            } else {
                debug!("Page released");
            }
        }
    }
}

impl Deref for PageGuard {
    type Target = Page;

    fn deref(&self) -> &Page {
        self.page.as_ref().expect("page accessed after release")
    }
}

impl Drop for PageGuard {
    fn drop(&mut self) {
        if let Some(page) = self.page.take() {
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                handle.spawn(async move {
                    if let Err(e) = page.close().await {
                        debug!(error = %e, "Background page close failed");
                    } else {
                        debug!("Page released on drop");
                    }
                });
            }
        }
    }
}

/// Wait for a selector to match, polling until `timeout` expires.
///
/// The catalog sites render asynchronously, so a plain `find_element`
/// immediately after navigation races the page's own scripts.
pub async fn wait_for_selector(
    page: &Page,
    selector: &str,
    timeout: Duration,
) -> Result<Element> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        match page.find_element(selector).await {
            Ok(element) => return Ok(element),
            Err(_) if tokio::time::Instant::now() < deadline => {
                tokio::time::sleep(POLL_INTERVAL).await;
            }
            Err(_) => return Err(Error::StepTimeout(format!("selector {selector}"))),
        }
    }
}

/// Navigate with a bounded wait, mapping expiry to `StepTimeout`.
pub async fn goto_with_timeout(page: &Page, url: &str, timeout: Duration) -> Result<()> {
    let _ = tokio::time::timeout(timeout, page.goto(url))
        .await
        .map_err(|_| Error::StepTimeout(format!("navigation to {url}")))??;
    Ok(())
}

/// Wait for the current navigation to settle, with a bounded timeout.
pub async fn wait_for_load(page: &Page, timeout: Duration) -> Result<()> {
    let _ = tokio::time::timeout(timeout, page.wait_for_navigation())
        .await
        .map_err(|_| Error::StepTimeout("page load".to_string()))??;
    Ok(())
}
