use async_trait::async_trait;

use crate::error::MailboxError;

/// Final classification of one confirmation attempt. Best-effort: the
/// page saying confirmed-looking text is all we can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed,
    Ambiguous,
    Failed,
}

impl std::fmt::Display for ConfirmOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConfirmOutcome::Confirmed => "confirmed",
            ConfirmOutcome::Ambiguous => "ambiguous",
            ConfirmOutcome::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Capability surface the pipeline needs from the mail store.
#[async_trait]
pub trait Mailbox: Send {
    async fn connect(&mut self) -> Result<(), MailboxError>;

    /// Sequence numbers of unseen messages from `sender`, ascending.
    async fn search_unseen_from(&mut self, sender: &str) -> Result<Vec<u32>, MailboxError>;

    /// Raw RFC822 source of one message.
    async fn download_raw(&mut self, seq: u32) -> Result<Vec<u8>, MailboxError>;

    async fn mark_seen(&mut self, seq: u32) -> Result<(), MailboxError>;

    async fn disconnect(&mut self) -> Result<(), MailboxError>;
}

/// One-shot confirmation click against the provider page. Infallible by
/// contract: anything that goes wrong reads as `Failed`.
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, url: &str) -> ConfirmOutcome;
}
