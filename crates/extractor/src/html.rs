use scraper::{Html, Selector};

/// Anchor text the provider puts on the confirmation link.
pub const CONFIRM_ANCHOR_PHRASE: &str = "oui, c'était moi";

/// Href of the last anchor whose visible text contains the confirmation
/// phrase, scanning in document order. A later matching anchor overrides
/// an earlier one, even when it carries no href of its own.
pub fn confirmation_href(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let Ok(anchors) = Selector::parse("a") else {
        return None;
    };

    let mut href = None;
    for el in document.select(&anchors) {
        let text = el.text().collect::<String>();
        if text.trim().to_lowercase().contains(CONFIRM_ANCHOR_PHRASE) {
            href = el.value().attr("href").map(str::to_string);
        }
    }
    href
}
