use serde::Serialize;
use url::Url;

use crate::config::LookupConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Conjugation,
    Declension,
    Unsupported,
}

/// Decide which extractor understands the page behind `url`.
pub fn classify(url: &Url, cfg: &LookupConfig) -> PageKind {
    let path = url.path();
    if path.contains(cfg.conjugation_marker.as_str()) {
        PageKind::Conjugation
    } else if path.contains(cfg.declension_marker.as_str()) {
        PageKind::Declension
    } else {
        PageKind::Unsupported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(url: &str) -> PageKind {
        classify(&Url::parse(url).unwrap(), &LookupConfig::default())
    }

    #[test]
    fn verb_pages_are_conjugation() {
        assert_eq!(kind("https://www.verbformen.de/konjugation/gehen.htm"), PageKind::Conjugation);
    }

    #[test]
    fn noun_and_adjective_pages_are_declension() {
        assert_eq!(kind("https://www.verbformen.de/deklination/substantive/Haus.htm"), PageKind::Declension);
        assert_eq!(kind("https://www.verbformen.de/deklination/adjektive/schoen.htm"), PageKind::Declension);
    }

    #[test]
    fn other_pages_are_unsupported() {
        assert_eq!(kind("https://www.verbformen.de/?w=xyz"), PageKind::Unsupported);
        assert_eq!(kind("https://www.verbformen.de/suche/?w=konjugation"), PageKind::Unsupported);
    }
}
