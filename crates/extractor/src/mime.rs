use mailparse::ParsedMail;

/// First text/html part in document order, decoded to a string.
/// Multipart containers are walked depth-first through their subparts.
pub(crate) fn html_body(mail: &ParsedMail) -> Option<String> {
    if mail.ctype.mimetype.eq_ignore_ascii_case("text/html") {
        return mail.get_body().ok();
    }
    for part in &mail.subparts {
        if let Some(html) = html_body(part) {
            return Some(html);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_no_html_body() {
        let raw = concat!(
            "From: someone@example.com\r\n",
            "Content-Type: text/plain; charset=utf-8\r\n",
            "\r\n",
            "Bonjour",
        );
        let mail = mailparse::parse_mail(raw.as_bytes()).unwrap();
        assert!(html_body(&mail).is_none());
    }

    #[test]
    fn single_part_html_is_returned() {
        let raw = concat!(
            "From: someone@example.com\r\n",
            "Content-Type: text/html; charset=utf-8\r\n",
            "\r\n",
            "<p>Bonjour</p>",
        );
        let mail = mailparse::parse_mail(raw.as_bytes()).unwrap();
        assert_eq!(html_body(&mail).unwrap().trim(), "<p>Bonjour</p>");
    }
}
