use std::fmt;

use tracing::{error, info, warn};

use foyerbot_core::{AppConfig, ConfirmOutcome, Confirmer, LockError, Mailbox, RunLock};
use foyerbot_extractor::{confirmation_link, Extraction};

/// Address the provider sends household notices from.
pub const PROVIDER_ADDRESS: &str = "info@account.netflix.com";

/// How a run ended. Observability only; every variant exits 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    AlreadyRunning,
    NoCandidate,
    NotActionable,
    Automated(ConfirmOutcome),
    Aborted,
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disposition::AlreadyRunning => write!(f, "already-running"),
            Disposition::NoCandidate => write!(f, "no-candidate"),
            Disposition::NotActionable => write!(f, "not-actionable"),
            Disposition::Automated(outcome) => write!(f, "automated ({outcome})"),
            Disposition::Aborted => write!(f, "aborted"),
        }
    }
}

/// Latest unseen candidate. Older unseen matches stay untouched for a
/// later run.
fn select_candidate(seqs: &[u32]) -> Option<u32> {
    seqs.iter().copied().max()
}

/// One complete run: lock, mailbox session, candidate, link, click,
/// disposition. The session is always disconnected before the lock
/// guard drops, whatever path reached the end.
pub async fn run_once<M, C>(config: &AppConfig, mailbox: &mut M, confirmer: &C) -> Disposition
where
    M: Mailbox,
    C: Confirmer,
{
    let _lock = match RunLock::acquire(&config.lock_path) {
        Ok(guard) => guard,
        Err(LockError::AlreadyHeld) => {
            info!("another run is active, exiting");
            return Disposition::AlreadyRunning;
        }
        Err(e) => {
            error!(error = %e, "could not acquire the run lock");
            return Disposition::Aborted;
        }
    };

    let disposition = match mailbox.connect().await {
        Ok(()) => process(mailbox, confirmer).await,
        Err(e) => {
            error!(error = %e, "mailbox connection failed");
            Disposition::Aborted
        }
    };

    if let Err(e) = mailbox.disconnect().await {
        warn!(error = %e, "mailbox disconnect failed");
    }

    disposition
}

async fn process<M, C>(mailbox: &mut M, confirmer: &C) -> Disposition
where
    M: Mailbox,
    C: Confirmer,
{
    let seqs = match mailbox.search_unseen_from(PROVIDER_ADDRESS).await {
        Ok(seqs) => seqs,
        Err(e) => {
            error!(error = %e, "unseen search failed");
            return Disposition::Aborted;
        }
    };

    let Some(seq) = select_candidate(&seqs) else {
        info!(sender = PROVIDER_ADDRESS, "no unseen messages");
        return Disposition::NoCandidate;
    };

    info!(seq, "processing latest unseen message");

    let raw = match mailbox.download_raw(seq).await {
        Ok(raw) => raw,
        Err(e) => {
            error!(seq, error = %e, "message download failed");
            return Disposition::Aborted;
        }
    };

    let url = match confirmation_link(&raw) {
        Extraction::Link(url) => url,
        Extraction::NotActionable(reason) => {
            info!(seq, %reason, "not a household confirmation");
            return dispose(mailbox, seq, Disposition::NotActionable).await;
        }
    };

    info!(seq, "household confirmation found, driving the browser");
    let outcome = confirmer.confirm(&url).await;
    info!(seq, %outcome, "automation resolved");

    dispose(mailbox, seq, Disposition::Automated(outcome)).await
}

/// Final disposition. The seen flag is the single durable record that a
/// message was handled, so it is set here only, after the decision.
/// Never ahead of an automation result that has not resolved yet.
async fn dispose<M: Mailbox>(mailbox: &mut M, seq: u32, disposition: Disposition) -> Disposition {
    if let Err(e) = mailbox.mark_seen(seq).await {
        error!(seq, error = %e, "could not mark message seen");
        return Disposition::Aborted;
    }
    disposition
}
