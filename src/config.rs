use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://www.verbformen.de/";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; deutsch-lookup/0.1; +https://www.verbformen.de/)";
const DEFAULT_LANGS: &[&str] = &["en", "ru"];
// Imperativ, Konjunktiv I/II and Infinitiv can be enabled through DEUTSCH_TENSES / --tense.
const DEFAULT_TENSES: &[&str] = &["Präsens", "Präteritum", "Partizip"];
const PRONOUNS: &[&str] = &["ich", "du", "er", "wir", "ihr", "sie"];
const TABLE_HEADERS: &[&str] = &["Weitere Informationen", "Zusammenfassung", "Deklinationsformen", "Deklination"];

/// CSS selectors for the page regions the extractors read.
#[derive(Clone, Debug)]
pub struct Selectors {
    pub verb_table: String,
    pub headword: String,
    pub word_forms: String,
    pub declension_table: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            verb_table: "div.vTbl".to_string(),
            headword: "p.vGrnd".to_string(),
            word_forms: "p.vStm".to_string(),
            declension_table: "section.rBox".to_string(),
        }
    }
}

/// Read-only parsing configuration, passed by reference into every extraction call.
#[derive(Clone, Debug)]
pub struct ExtractConfig {
    pub tenses: Vec<String>,
    /// First entry is the person that never gets a leading line break.
    pub pronouns: Vec<String>,
    pub languages: Vec<String>,
    pub table_headers: Vec<String>,
    pub selectors: Selectors,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            tenses: owned(DEFAULT_TENSES),
            pronouns: owned(PRONOUNS),
            languages: owned(DEFAULT_LANGS),
            table_headers: owned(TABLE_HEADERS),
            selectors: Selectors::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LookupConfig {
    pub base_url: Url,
    pub user_agent: String,
    /// `None` leaves reqwest's defaults in place.
    pub timeout: Option<Duration>,
    pub conjugation_marker: String,
    pub declension_marker: String,
    pub extract: ExtractConfig,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            conjugation_marker: "/konjugation".to_string(),
            declension_marker: "/deklination".to_string(),
            extract: ExtractConfig::default(),
        }
    }
}

/// Flags that override the DEUTSCH_* environment.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Reference site base URL (overrides DEUTSCH_BASE_URL)
    #[arg(global = true, long)]
    pub base_url: Option<String>,
    /// User-Agent header sent with every lookup (overrides DEUTSCH_USER_AGENT)
    #[arg(global = true, long)]
    pub user_agent: Option<String>,
    /// Request timeout in seconds (overrides DEUTSCH_TIMEOUT_SECS)
    #[arg(global = true, long)]
    pub timeout_secs: Option<u64>,
    /// Translation languages, comma separated (overrides DEUTSCH_LANGS)
    #[arg(global = true, long = "lang", value_delimiter = ',')]
    pub langs: Vec<String>,
    /// Tenses to extract, comma separated (overrides DEUTSCH_TENSES)
    #[arg(global = true, long = "tense", value_delimiter = ',')]
    pub tenses: Vec<String>,
}

impl LookupConfig {
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();
        if let Ok(base) = std::env::var("DEUTSCH_BASE_URL") {
            cfg.base_url = Url::parse(&base).with_context(|| format!("invalid DEUTSCH_BASE_URL: {base}"))?;
        }
        if let Ok(ua) = std::env::var("DEUTSCH_USER_AGENT") {
            cfg.user_agent = ua;
        }
        if let Ok(timeout) = std::env::var("DEUTSCH_TIMEOUT_SECS") {
            match parse_timeout(&timeout) {
                Some(parsed) => cfg.timeout = Some(parsed),
                None => tracing::warn!(value = %timeout, "ignoring invalid DEUTSCH_TIMEOUT_SECS"),
            }
        }
        if let Ok(csv) = std::env::var("DEUTSCH_LANGS") {
            let langs = parse_csv(&csv);
            if !langs.is_empty() { cfg.extract.languages = langs; }
        }
        if let Ok(csv) = std::env::var("DEUTSCH_TENSES") {
            let tenses = parse_csv(&csv);
            if !tenses.is_empty() { cfg.extract.tenses = tenses; }
        }
        Ok(cfg)
    }

    pub fn from_env_and_args(args: &ConfigArgs) -> Result<Self> {
        let mut cfg = Self::from_env()?;
        if let Some(base) = &args.base_url {
            cfg.base_url = Url::parse(base).with_context(|| format!("invalid --base-url: {base}"))?;
        }
        if let Some(ua) = &args.user_agent { cfg.user_agent = ua.clone(); }
        if let Some(secs) = args.timeout_secs { cfg.timeout = Some(Duration::from_secs(secs)); }
        let langs = clean(&args.langs);
        if !langs.is_empty() { cfg.extract.languages = langs; }
        let tenses = clean(&args.tenses);
        if !tenses.is_empty() { cfg.extract.tenses = tenses; }
        Ok(cfg)
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn clean(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Whole seconds, surrounding whitespace allowed.
fn parse_timeout(input: &str) -> Option<Duration> {
    input.trim().parse::<u64>().ok().map(Duration::from_secs)
}

fn parse_csv(input: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in input.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()) {
        if !out.iter().any(|seen| seen == item) { out.push(item.to_string()); }
    }
    out
}
