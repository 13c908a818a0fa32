// Telegram-style legacy markdown: *bold*, _italic_.

use crate::extractor::{ConjugationResult, DeclensionResult, ExtractError, Translations};

const RULE_WIDTH: usize = 30;
const CONJUGATION_HEADER: &str = "Einfache Verbformen:";
const TRANSLATIONS_HEADER: &str = "Übersetzungen:";
const CASE_MARKERS: &[&str] = &["Nom.", "Gen.", "Dat.", "Akk.", "Positiv", "Komparativ", "Superlativ"];

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

pub fn render_conjugation(res: &ConjugationResult) -> String {
    let mut out = format!("{CONJUGATION_HEADER}\n");
    if let Ok(forms) = &res.forms {
        for f in forms {
            out.push_str(&format!("*{}*:{}\n", f.tense, f.forms));
            out.push_str(&rule());
            out.push('\n');
        }
    }
    push_translations(&mut out, &res.translations);
    out
}

pub fn render_declension(res: &DeclensionResult) -> String {
    let mut out = String::new();
    if let Ok(headword) = &res.headword {
        out.push_str(&format!("*{headword}*\n"));
    }
    if let Ok(forms) = &res.word_forms {
        out.push_str(&format!("_{}_\n", forms.join("; ")));
    }
    if let Ok(table) = &res.table {
        for line in table.lines() {
            out.push_str(&style_table_line(line));
        }
    }
    push_translations(&mut out, &res.translations);
    out
}

fn style_table_line(line: &str) -> String {
    if line.contains(',') {
        format!("*{line}*\n{}\n", rule())
    } else if CASE_MARKERS.iter().any(|m| line.contains(m)) {
        format!("{}\n_{line}_\n", rule())
    } else {
        format!("{line}\n")
    }
}

fn push_translations(out: &mut String, translations: &Result<Translations, ExtractError>) {
    out.push_str(TRANSLATIONS_HEADER);
    out.push('\n');
    let Ok(langs) = translations else { return };
    for lw in langs {
        let words: Vec<&str> = lw.words.iter().map(String::as_str).collect();
        out.push_str(&format!("*{}*: {}\n", lw.lang, words.join(", ")));
    }
}
