use foyerbot_core::ConfirmOutcome;

/// Rendered-page markers and the outcome each one implies. Substring
/// presence, checked in order; a page carrying none of them said nothing
/// we recognize.
pub const OUTCOME_MARKERS: &[(&str, ConfirmOutcome)] = &[
    ("mis à jour", ConfirmOutcome::Confirmed),
    ("confirmé", ConfirmOutcome::Confirmed),
    ("foyer Netflix", ConfirmOutcome::Confirmed),
];

pub fn classify(page: &str) -> ConfirmOutcome {
    for (marker, outcome) in OUTCOME_MARKERS {
        if page.contains(marker) {
            return *outcome;
        }
    }
    ConfirmOutcome::Ambiguous
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn household_marker_reads_as_confirmed() {
        let page = "<p>Votre foyer Netflix a bien été défini sur cet appareil.</p>";
        assert_eq!(classify(page), ConfirmOutcome::Confirmed);
    }

    #[test]
    fn update_marker_reads_as_confirmed() {
        let page = "<h1>Votre compte a été mis à jour</h1>";
        assert_eq!(classify(page), ConfirmOutcome::Confirmed);
    }

    #[test]
    fn unrecognized_page_is_ambiguous() {
        let page = "<h1>Une erreur est survenue. Réessayez plus tard.</h1>";
        assert_eq!(classify(page), ConfirmOutcome::Ambiguous);
    }
}
