mod html;
mod mime;

pub use html::{confirmation_href, CONFIRM_ANCHOR_PHRASE};

use tracing::debug;

/// Why a message was judged not actionable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    MalformedMessage,
    NoHtmlBody,
    NoConfirmationAnchor,
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Reason::MalformedMessage => "message could not be parsed",
            Reason::NoHtmlBody => "message has no html body",
            Reason::NoConfirmationAnchor => "no confirmation link in html body",
        };
        f.write_str(s)
    }
}

/// Result of inspecting one raw message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Link(String),
    NotActionable(Reason),
}

/// Decide whether `raw` is a household-confirmation email and pull the
/// confirmation URL out of it. Any message whose html body carries the
/// confirmation phrase in an anchor counts, whatever else it contains;
/// the href comes back verbatim, unvalidated.
pub fn confirmation_link(raw: &[u8]) -> Extraction {
    let mail = match mailparse::parse_mail(raw) {
        Ok(mail) => mail,
        Err(e) => {
            debug!(error = %e, "mime parse failed");
            return Extraction::NotActionable(Reason::MalformedMessage);
        }
    };

    let Some(html) = mime::html_body(&mail) else {
        return Extraction::NotActionable(Reason::NoHtmlBody);
    };

    match html::confirmation_href(&html) {
        Some(href) => Extraction::Link(href),
        None => Extraction::NotActionable(Reason::NoConfirmationAnchor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html_message(body: &str) -> Vec<u8> {
        format!(
            "From: info@account.netflix.com\r\n\
             To: someone@example.com\r\n\
             Subject: Nouvel appareil sur votre compte\r\n\
             MIME-Version: 1.0\r\n\
             Content-Type: text/html; charset=utf-8\r\n\
             \r\n\
             {body}"
        )
        .into_bytes()
    }

    #[test]
    fn extracts_the_confirmation_href() {
        let raw = html_message(
            r#"<html><body>
               <a href="https://help.example.com">Centre d'aide</a>
               <a href="https://nflx.example/confirm?t=123">Oui, c'était moi</a>
               </body></html>"#,
        );
        assert_eq!(
            confirmation_link(&raw),
            Extraction::Link("https://nflx.example/confirm?t=123".into())
        );
    }

    #[test]
    fn two_matching_anchors_keep_the_later_href() {
        let raw = html_message(
            r#"<a href="https://nflx.example/a">Oui, c'était moi</a>
               <a href="https://nflx.example/b">Oui, c'était moi</a>"#,
        );
        assert_eq!(
            confirmation_link(&raw),
            Extraction::Link("https://nflx.example/b".into())
        );
    }

    #[test]
    fn html_without_the_phrase_is_not_actionable() {
        let raw = html_message(r#"<a href="https://nflx.example/offers">Voir les offres</a>"#);
        assert_eq!(
            confirmation_link(&raw),
            Extraction::NotActionable(Reason::NoConfirmationAnchor)
        );
    }

    #[test]
    fn plain_text_message_is_not_actionable() {
        // The phrase in a text/plain body must not count.
        let raw = concat!(
            "From: info@account.netflix.com\r\n",
            "MIME-Version: 1.0\r\n",
            "Content-Type: text/plain; charset=utf-8\r\n",
            "\r\n",
            "Oui, c'était moi : https://nflx.example/confirm",
        );
        assert_eq!(
            confirmation_link(raw.as_bytes()),
            Extraction::NotActionable(Reason::NoHtmlBody)
        );
    }

    #[test]
    fn multipart_alternative_uses_the_html_part() {
        let raw = concat!(
            "From: info@account.netflix.com\r\n",
            "Subject: Mise a jour du foyer\r\n",
            "MIME-Version: 1.0\r\n",
            "Content-Type: multipart/alternative; boundary=\"sep\"\r\n",
            "\r\n",
            "--sep\r\n",
            "Content-Type: text/plain; charset=utf-8\r\n",
            "\r\n",
            "Confirmez depuis votre navigateur.\r\n",
            "--sep\r\n",
            "Content-Type: text/html; charset=utf-8\r\n",
            "\r\n",
            "<a href=\"https://nflx.example/confirm?t=9\">Oui, c'était moi</a>\r\n",
            "--sep--\r\n",
        );
        assert_eq!(
            confirmation_link(raw.as_bytes()),
            Extraction::Link("https://nflx.example/confirm?t=9".into())
        );
    }
}
