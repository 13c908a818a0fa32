use std::collections::BTreeSet;

use scraper::{ElementRef, Html, Node, Selector};
use serde::Serialize;
use thiserror::Error;

pub mod declension;
pub mod verb;

pub use declension::{extract_declension, DeclensionResult};
pub use verb::{extract_conjugation, ConjugationResult};

/// Why a single extraction phase produced nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "error", content = "target", rename_all = "snake_case")]
pub enum ExtractError {
    #[error("invalid selector `{0}`")]
    Selector(String),
    #[error("no element matches `{0}`")]
    Missing(String),
    #[error("`{0}` has no usable text")]
    Empty(String),
}

/// Translation words found for one language code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LangWords {
    pub lang: String,
    pub words: BTreeSet<String>,
}

pub type Translations = Vec<LangWords>;

pub(crate) fn selector(sel: &str) -> Result<Selector, ExtractError> {
    Selector::parse(sel).map_err(|_| ExtractError::Selector(sel.to_string()))
}

pub(crate) fn first<'a>(doc: &'a Html, sel: &str) -> Result<ElementRef<'a>, ExtractError> {
    let s = selector(sel)?;
    doc.select(&s).next().ok_or_else(|| ExtractError::Missing(sel.to_string()))
}

/// Flattened text of an element; `<br>` becomes a line break.
pub(crate) fn block_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in el.descendants() {
        match node.value() {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) if e.name() == "br" => out.push('\n'),
            // cells and rows sit next to each other with no text between them
            Node::Element(e) if matches!(e.name(), "td" | "th" | "tr") => out.push(' '),
            _ => {}
        }
    }
    out
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    let mut buf = String::with_capacity(s.len());
    let mut in_ws = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_ws {
                if !buf.is_empty() { buf.push(' '); }
                in_ws = true;
            }
        } else {
            buf.push(ch);
            in_ws = false;
        }
    }
    buf.trim().to_string()
}

/// Collect the words under each `div[lang=..]` container.
///
/// Languages without a container are skipped; the phase fails only when none
/// of the requested languages is present on the page.
pub fn extract_translations(doc: &Html, languages: &[String]) -> Result<Translations, ExtractError> {
    let mut out: Translations = Vec::new();
    for lang in languages {
        let sel = format!("div[lang=\"{lang}\"]");
        let container = match first(doc, &sel) {
            Ok(el) => el,
            Err(ExtractError::Missing(_)) => {
                tracing::debug!(lang = %lang, "no translation container");
                continue;
            }
            Err(e) => return Err(e),
        };
        let words: BTreeSet<String> = container
            .children()
            .filter_map(ElementRef::wrap)
            .map(|child| collapse_whitespace(&block_text(child)))
            .filter(|text| text.chars().count() > 2)
            .collect();
        out.push(LangWords { lang: lang.clone(), words });
    }
    if out.is_empty() && !languages.is_empty() {
        return Err(ExtractError::Missing("div[lang]".to_string()));
    }
    Ok(out)
}
