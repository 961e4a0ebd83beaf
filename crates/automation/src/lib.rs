mod browser;
mod classify;

pub use browser::{BrowserSession, CONFIRM_BUTTON_SELECTOR};
pub use classify::{classify, OUTCOME_MARKERS};

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use foyerbot_core::{ConfirmOutcome, Confirmer};

#[derive(Error, Debug)]
pub enum AutomationError {
    #[error("browser error: {0}")]
    Browser(String),

    #[error("confirm control did not appear: {0}")]
    SelectorTimeout(String),

    #[error("deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
}

/// Wall-clock knobs for one confirmation attempt.
#[derive(Debug, Clone)]
pub struct AutomationConfig {
    /// How long the confirm control may take to appear.
    pub selector_timeout: Duration,
    /// Grace delay after the click so client-side rendering can finish.
    pub settle_delay: Duration,
    /// Hard budget for the whole attempt, navigation through readback.
    pub deadline: Duration,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            selector_timeout: Duration::from_secs(10),
            settle_delay: Duration::from_secs(2),
            deadline: Duration::from_secs(60),
        }
    }
}

/// Headless-Chrome implementation of the confirmation click.
pub struct HeadlessConfirmer {
    config: AutomationConfig,
}

impl HeadlessConfirmer {
    pub fn new(config: AutomationConfig) -> Self {
        Self { config }
    }
}

async fn drive(
    session: &BrowserSession,
    url: &str,
    config: &AutomationConfig,
) -> Result<ConfirmOutcome, AutomationError> {
    session.navigate(url)?;
    session.click_confirm(config.selector_timeout)?;
    session.settle(config.settle_delay).await;
    let page = session.page_content()?;
    Ok(classify(&page))
}

/// Race `work` against the attempt deadline. The timer winning abandons
/// whatever step was in flight; the caller still owns browser cleanup.
async fn bounded<F>(deadline: Duration, work: F) -> Result<ConfirmOutcome, AutomationError>
where
    F: std::future::Future<Output = Result<ConfirmOutcome, AutomationError>>,
{
    match tokio::time::timeout(deadline, work).await {
        Ok(result) => result,
        Err(_) => Err(AutomationError::DeadlineExceeded(deadline)),
    }
}

#[async_trait]
impl Confirmer for HeadlessConfirmer {
    async fn confirm(&self, url: &str) -> ConfirmOutcome {
        let session = match BrowserSession::launch() {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "could not launch browser");
                return ConfirmOutcome::Failed;
            }
        };

        let outcome = match bounded(self.config.deadline, drive(&session, url, &self.config)).await
        {
            Ok(outcome) => {
                info!(%outcome, "confirmation attempt finished");
                outcome
            }
            Err(e) => {
                warn!(error = %e, "confirmation attempt failed");
                ConfirmOutcome::Failed
            }
        };

        session.close();
        outcome
    }
}
