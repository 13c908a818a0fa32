use scraper::Html;
use serde::Serialize;

use crate::config::ExtractConfig;

use super::{block_text, collapse_whitespace, extract_translations, selector, ExtractError, Translations};

/// Conjugated forms for one tense, one line per person (or per form).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenseForms {
    pub tense: String,
    pub forms: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConjugationResult {
    /// Tenses in the order their first matching block appeared.
    pub forms: Result<Vec<TenseForms>, ExtractError>,
    pub translations: Result<Translations, ExtractError>,
}

impl ConjugationResult {
    pub fn is_empty(&self) -> bool {
        self.forms.as_ref().map_or(true, |f| f.is_empty())
    }
}

#[cfg(test)]
impl ConjugationResult {
    pub fn tense(&self, name: &str) -> Option<&str> {
        let forms = self.forms.as_ref().ok()?;
        forms.iter().find(|f| f.tense == name).map(|f| f.forms.as_str())
    }
}

pub fn extract_conjugation(doc: &Html, cfg: &ExtractConfig) -> ConjugationResult {
    ConjugationResult {
        forms: extract_forms(doc, cfg),
        translations: extract_translations(doc, &cfg.languages),
    }
}

pub fn extract_forms(doc: &Html, cfg: &ExtractConfig) -> Result<Vec<TenseForms>, ExtractError> {
    let sel = selector(&cfg.selectors.verb_table)?;
    let mut blocks = doc.select(&sel).peekable();
    if blocks.peek().is_none() {
        return Err(ExtractError::Missing(cfg.selectors.verb_table.clone()));
    }

    let mut out: Vec<TenseForms> = Vec::new();
    for block in blocks {
        let text = collapse_whitespace(&block_text(block));
        let lower = text.to_lowercase();
        for tense in &cfg.tenses {
            if out.iter().any(|f| &f.tense == tense) { continue; }
            let tense_lower = tense.to_lowercase();
            if !lower.contains(&tense_lower) { continue; }
            let stripped = text
                .split(' ')
                .filter(|tok| !tok.is_empty() && tok.to_lowercase() != tense_lower)
                .collect::<Vec<_>>()
                .join(" ");
            out.push(TenseForms { tense: tense.clone(), forms: format!("\n{}", split_forms(&stripped, &cfg.pronouns)) });
        }
    }
    Ok(out)
}

/// One line per person when the block is personal, one line per word otherwise.
///
/// `text` must already be collapsed to single spaces.
pub fn split_forms(text: &str, pronouns: &[String]) -> String {
    let tokens: Vec<&str> = text.split(' ').filter(|t| !t.is_empty()).collect();
    let is_pronoun = |tok: &str| pronouns.iter().any(|p| p == tok);
    let personal = tokens
        .iter()
        .enumerate()
        .any(|(i, &tok)| i > 0 && i + 1 < tokens.len() && is_pronoun(tok));

    if !personal {
        return tokens.join("\n");
    }

    let breaks_before = pronouns.get(1..).unwrap_or(&[]);
    let mut out = String::with_capacity(text.len());
    for (i, &tok) in tokens.iter().enumerate() {
        if i > 0 {
            if breaks_before.iter().any(|p| p == tok) { out.push('\n'); } else { out.push(' '); }
        }
        out.push_str(tok);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ExtractConfig {
        ExtractConfig::default()
    }

    const PAGE: &str = r#"
    <html><body>
      <div class="vTbl">
        <h2>Präsens</h2>
        <table>
          <tr><td>ich</td><td>geh<b>e</b></td></tr>
          <tr><td>du</td><td>geh<b>st</b></td></tr>
          <tr><td>er</td><td>geh<b>t</b></td></tr>
          <tr><td>wir</td><td>geh<b>en</b></td></tr>
          <tr><td>ihr</td><td>geh<b>t</b></td></tr>
          <tr><td>sie</td><td>geh<b>en</b></td></tr>
        </table>
      </div>
      <div class="vTbl">
        <h2>Präteritum</h2>
        <p>ich ging du gingst er ging wir gingen ihr gingt sie gingen</p>
      </div>
      <div class="vTbl">
        <h2>Präsens</h2>
        <p>ich laufe du läufst</p>
      </div>
      <div class="vTbl">
        <h2>Partizip</h2>
        <p>gehend gegangen</p>
      </div>
      <div lang="en"><span>go</span><span>walk</span></div>
      <div lang="ru"><span>идти</span></div>
    </body></html>
    "#;

    #[test]
    fn extracts_tenses_in_page_order() {
        let doc = Html::parse_document(PAGE);
        let got = extract_conjugation(&doc, &cfg());
        assert!(!got.is_empty());
        let tenses: Vec<&str> = got.forms.as_ref().unwrap().iter().map(|f| f.tense.as_str()).collect();
        assert_eq!(tenses, vec!["Präsens", "Präteritum", "Partizip"]);
        assert_eq!(got.tense("Präteritum"), Some("\nich ging\ndu gingst\ner ging\nwir gingen\nihr gingt\nsie gingen"));
    }

    #[test]
    fn first_matching_block_wins() {
        let doc = Html::parse_document(PAGE);
        let got = extract_conjugation(&doc, &cfg());
        let present = got.tense("Präsens").unwrap();
        assert_eq!(present, "\nich gehe\ndu gehst\ner geht\nwir gehen\nihr geht\nsie gehen");
        assert!(!present.contains("laufe"));
        assert_eq!(got.forms.as_ref().unwrap().iter().filter(|f| f.tense == "Präsens").count(), 1);
    }

    #[test]
    fn participle_gets_one_form_per_line() {
        let doc = Html::parse_document(PAGE);
        let got = extract_conjugation(&doc, &cfg());
        assert_eq!(got.tense("Partizip"), Some("\ngehend\ngegangen"));
    }

    #[test]
    fn translations_survive_alongside_forms() {
        let doc = Html::parse_document(PAGE);
        let got = extract_conjugation(&doc, &cfg());
        let tr = got.translations.unwrap();
        assert_eq!(tr[0].lang, "en");
        assert!(tr[0].words.contains("walk"));
        assert!(!tr[0].words.contains("go"));
    }

    #[test]
    fn pronouns_break_before_every_person_but_the_first() {
        let pronouns = cfg().pronouns;
        assert_eq!(split_forms("ich du er wir ihr sie", &pronouns), "ich\ndu\ner\nwir\nihr\nsie");
        assert_eq!(
            split_forms("ich gehe du gehst er geht", &pronouns),
            "ich gehe\ndu gehst\ner geht"
        );
    }

    #[test]
    fn non_personal_text_splits_on_every_space() {
        let pronouns = cfg().pronouns;
        assert_eq!(split_forms("gehend gegangen", &pronouns), "gehend\ngegangen");
        assert_eq!(split_forms("geh gehe", &pronouns), "geh\ngehe");
    }

    #[test]
    fn page_without_tables_fails_forms_phase_only() {
        let html = r#"<html><body><div lang="en"><span>house</span></div></body></html>"#;
        let doc = Html::parse_document(html);
        let got = extract_conjugation(&doc, &cfg());
        assert_eq!(got.forms, Err(ExtractError::Missing("div.vTbl".to_string())));
        assert!(got.is_empty());
        assert!(got.translations.is_ok());
    }

    #[test]
    fn tense_heading_is_stripped_regardless_of_case() {
        let html = r#"<div class="vTbl"><h2>PRÄSENS</h2><p>ich gehe du gehst</p></div>"#;
        let doc = Html::parse_document(html);
        let got = extract_conjugation(&doc, &cfg());
        assert_eq!(got.tense("Präsens"), Some("\nich gehe\ndu gehst"));
    }

    #[test]
    fn tables_without_known_tense_are_empty() {
        let html = r#"<div class="vTbl"><h2>Imperativ</h2><p>geh geht</p></div>"#;
        let doc = Html::parse_document(html);
        let got = extract_conjugation(&doc, &cfg());
        assert_eq!(got.forms, Ok(Vec::new()));
        assert!(got.is_empty());
        assert!(got.translations.is_err());
    }
}
