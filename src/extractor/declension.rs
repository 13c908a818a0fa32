use scraper::Html;
use serde::Serialize;

use crate::config::ExtractConfig;

use super::{block_text, extract_translations, first, ExtractError, Translations};

// Decoration the site puts between word-form variants.
const FORM_SEPARATORS: &[&str] = &[".", "·"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclensionResult {
    pub headword: Result<String, ExtractError>,
    pub word_forms: Result<Vec<String>, ExtractError>,
    pub table: Result<String, ExtractError>,
    pub translations: Result<Translations, ExtractError>,
}

impl DeclensionResult {
    pub fn is_empty(&self) -> bool {
        let no_headword = self.headword.as_ref().map_or(true, |h| h.trim().is_empty());
        let no_forms = self.word_forms.as_ref().map_or(true, |f| f.is_empty());
        no_headword && no_forms
    }
}

pub fn extract_declension(doc: &Html, cfg: &ExtractConfig) -> DeclensionResult {
    DeclensionResult {
        headword: extract_headword(doc, cfg),
        word_forms: extract_word_forms(doc, cfg),
        table: extract_table(doc, cfg),
        translations: extract_translations(doc, &cfg.languages),
    }
}

fn extract_headword(doc: &Html, cfg: &ExtractConfig) -> Result<String, ExtractError> {
    let sel = &cfg.selectors.headword;
    let el = first(doc, sel)?;
    let text = el.text().collect::<String>();
    let text = text.trim();
    if text.is_empty() { return Err(ExtractError::Empty(sel.clone())); }
    Ok(text.to_string())
}

fn extract_word_forms(doc: &Html, cfg: &ExtractConfig) -> Result<Vec<String>, ExtractError> {
    let sel = &cfg.selectors.word_forms;
    let el = first(doc, sel)?;
    let forms = clean_word_forms(&block_text(el));
    if forms.is_empty() { return Err(ExtractError::Empty(sel.clone())); }
    Ok(forms)
}

fn extract_table(doc: &Html, cfg: &ExtractConfig) -> Result<String, ExtractError> {
    let sel = &cfg.selectors.declension_table;
    let el = first(doc, sel)?;
    let table = clean_table(&block_text(el), &cfg.table_headers);
    if table.trim().is_empty() { return Err(ExtractError::Empty(sel.clone())); }
    Ok(table)
}

pub fn clean_word_forms(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && !FORM_SEPARATORS.contains(line))
        .map(|line| line.to_string())
        .collect()
}

/// Drop boilerplate heading lines, then squeeze runs of 3+ blank lines into one.
pub fn clean_table(text: &str, headers: &[String]) -> String {
    let kept: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !headers.iter().any(|h| line.starts_with(h.as_str())))
        .collect();
    collapse_blank_runs(&kept).join("\n")
}

fn collapse_blank_runs<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    let mut blanks = 0usize;
    for &line in lines {
        if line.is_empty() {
            blanks += 1;
            continue;
        }
        push_blanks(&mut out, blanks);
        blanks = 0;
        out.push(line);
    }
    push_blanks(&mut out, blanks);
    out
}

fn push_blanks(out: &mut Vec<&str>, run: usize) {
    let n = if run >= 3 { 1 } else { run };
    out.extend(std::iter::repeat("").take(n));
}
