use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use tokio::net::TcpStream;
use tracing::{debug, info};

use foyerbot_core::{ImapConfig, Mailbox, MailboxError};

/// Async read+write stream marker so TLS and plain connections share a type.
trait ImapStream: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin + Send + Sync + fmt::Debug {}
impl<T: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin + Send + Sync + fmt::Debug> ImapStream for T {}

type Session = async_imap::Session<Box<dyn ImapStream>>;

/// IMAP-backed mail store session. One instance owns at most one live
/// connection; `connect` must succeed before the other calls are usable.
pub struct ImapMailbox {
    config: ImapConfig,
    session: Option<Session>,
}

impl ImapMailbox {
    pub fn new(config: ImapConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    fn session_mut(&mut self) -> Result<&mut Session, MailboxError> {
        self.session
            .as_mut()
            .ok_or_else(|| MailboxError::Protocol("no open session".into()))
    }

    async fn open_stream(&self) -> Result<Box<dyn ImapStream>, MailboxError> {
        let tcp = TcpStream::connect((self.config.host.as_str(), self.config.port))
            .await
            .map_err(|e| MailboxError::Connect(e.to_string()))?;

        if !self.config.tls {
            return Ok(Box::new(tcp));
        }

        let mut root_store = rustls::RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let connector = tokio_rustls::TlsConnector::from(Arc::new(tls_config));
        let server_name = rustls::pki_types::ServerName::try_from(self.config.host.clone())
            .map_err(|e| {
                MailboxError::Connect(format!("invalid server name {:?}: {}", self.config.host, e))
            })?;
        let tls = connector
            .connect(server_name, tcp)
            .await
            .map_err(|e| MailboxError::Connect(e.to_string()))?;

        Ok(Box::new(tls))
    }
}

fn search_query(sender: &str) -> String {
    format!(r#"UNSEEN FROM "{}""#, sender)
}

fn protocol(e: impl fmt::Display) -> MailboxError {
    MailboxError::Protocol(e.to_string())
}

#[async_trait]
impl Mailbox for ImapMailbox {
    async fn connect(&mut self) -> Result<(), MailboxError> {
        let stream = self.open_stream().await?;
        let client = async_imap::Client::new(stream);

        let mut session = client
            .login(&self.config.user, &self.config.pass)
            .await
            .map_err(|(e, _)| MailboxError::Auth(e.to_string()))?;
        session.select("INBOX").await.map_err(protocol)?;

        info!(host = %self.config.host, "imap session open on INBOX");
        self.session = Some(session);
        Ok(())
    }

    async fn search_unseen_from(&mut self, sender: &str) -> Result<Vec<u32>, MailboxError> {
        let session = self.session_mut()?;

        let mut seqs: Vec<u32> = session
            .search(search_query(sender))
            .await
            .map_err(protocol)?
            .into_iter()
            .collect();
        seqs.sort_unstable();

        debug!(sender, matches = seqs.len(), "unseen search done");
        Ok(seqs)
    }

    async fn download_raw(&mut self, seq: u32) -> Result<Vec<u8>, MailboxError> {
        let session = self.session_mut()?;

        let fetches: Vec<async_imap::types::Fetch> = session
            .fetch(seq.to_string(), "RFC822")
            .await
            .map_err(protocol)?
            .try_collect()
            .await
            .map_err(protocol)?;

        let fetch = fetches
            .first()
            .ok_or_else(|| MailboxError::Protocol(format!("message {seq} not returned by fetch")))?;
        let body = fetch
            .body()
            .ok_or_else(|| MailboxError::Protocol(format!("message {seq} has no body")))?;

        debug!(seq, bytes = body.len(), "message downloaded");
        Ok(body.to_vec())
    }

    async fn mark_seen(&mut self, seq: u32) -> Result<(), MailboxError> {
        let session = self.session_mut()?;

        // STORE responds with the updated flags; the stream has to be
        // drained before the session accepts another command.
        let _updates: Vec<async_imap::types::Fetch> = session
            .store(seq.to_string(), "+FLAGS (\\Seen)")
            .await
            .map_err(protocol)?
            .try_collect()
            .await
            .map_err(protocol)?;

        debug!(seq, "marked seen");
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), MailboxError> {
        if let Some(mut session) = self.session.take() {
            session.logout().await.map_err(protocol)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_query_filters_unseen_and_sender() {
        assert_eq!(
            search_query("info@account.netflix.com"),
            r#"UNSEEN FROM "info@account.netflix.com""#
        );
    }
}
