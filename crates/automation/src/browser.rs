use std::ffi::OsString;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptionsBuilder, Tab};
use tracing::{debug, info};

use crate::AutomationError;

/// CSS selector for the confirm control on the destination page.
pub const CONFIRM_BUTTON_SELECTOR: &str = r#"button[data-uia="set-primary-location-action"]"#;

fn browser_error(e: impl std::fmt::Display) -> AutomationError {
    AutomationError::Browser(e.to_string())
}

/// One isolated browser instance plus the single tab the confirmation
/// click runs in. Dropping the session tears the Chrome process down.
pub struct BrowserSession {
    _browser: Browser,
    tab: Arc<Tab>,
}

impl BrowserSession {
    pub fn launch() -> Result<Self, AutomationError> {
        let extra_args: Vec<OsString> = vec![
            // Required for running in Docker containers
            OsString::from("--no-sandbox"),
            OsString::from("--disable-dev-shm-usage"),
            OsString::from("--disable-gpu"),
        ];

        let mut builder = LaunchOptionsBuilder::default();
        builder
            .headless(true)
            .window_size(Some((1280, 800)))
            .args(extra_args.iter().map(|a| a.as_ref()).collect());

        // Use CHROME_PATH env var if set (for Docker/custom installs)
        if let Ok(chrome_path) = std::env::var("CHROME_PATH") {
            builder.path(Some(std::path::PathBuf::from(chrome_path)));
        }

        let launch_options = builder.build().map_err(browser_error)?;
        let browser = Browser::new(launch_options).map_err(browser_error)?;
        let tab = browser.new_tab().map_err(browser_error)?;

        Ok(Self {
            _browser: browser,
            tab,
        })
    }

    pub fn navigate(&self, url: &str) -> Result<(), AutomationError> {
        info!("navigating to confirmation page");
        self.tab.navigate_to(url).map_err(browser_error)?;
        self.tab.wait_until_navigated().map_err(browser_error)?;
        Ok(())
    }

    pub fn click_confirm(&self, selector_timeout: Duration) -> Result<(), AutomationError> {
        let button = self
            .tab
            .wait_for_element_with_custom_timeout(CONFIRM_BUTTON_SELECTOR, selector_timeout)
            .map_err(|e| AutomationError::SelectorTimeout(e.to_string()))?;
        button.click().map_err(browser_error)?;
        debug!(selector = CONFIRM_BUTTON_SELECTOR, "confirm control clicked");
        Ok(())
    }

    /// Post-click settle. The click may or may not trigger a navigation;
    /// a wait failure here is an explicit no-op continuation, not an error.
    pub async fn settle(&self, delay: Duration) {
        if let Err(e) = self.tab.wait_until_navigated() {
            debug!(error = %e, "no post-click navigation, continuing");
        }
        tokio::time::sleep(delay).await;
    }

    pub fn page_content(&self) -> Result<String, AutomationError> {
        self.tab.get_content().map_err(browser_error)
    }

    /// Close the tab best-effort, then drop the browser handle.
    pub fn close(self) {
        if let Err(e) = self.tab.close(true) {
            debug!(error = %e, "tab close failed");
        }
    }
}
