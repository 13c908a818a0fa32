use serde::Serialize;

use crate::extractor::{ConjugationResult, DeclensionResult};
use crate::render;

use super::fetch::FetchError;

/// A single user-supplied word, trimmed. Case is kept: nouns are capitalised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery(String);

impl LookupQuery {
    pub fn new(raw: &str) -> Option<Self> {
        let word = raw.trim();
        if word.is_empty() { None } else { Some(Self(word.to_string())) }
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum NotFound {
    HttpStatus { status: u16 },
    Transport { message: String },
    Unsupported { url: String },
}

impl From<FetchError> for NotFound {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Status(status) => NotFound::HttpStatus { status },
            FetchError::Transport(err) => NotFound::Transport { message: err.to_string() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupResult {
    Conjugation(ConjugationResult),
    Declension(DeclensionResult),
    NotFound(NotFound),
}

impl LookupResult {
    pub fn is_empty(&self) -> bool {
        match self {
            LookupResult::Conjugation(c) => c.is_empty(),
            LookupResult::Declension(d) => d.is_empty(),
            LookupResult::NotFound(_) => true,
        }
    }

    pub fn render(&self) -> Option<String> {
        match self {
            LookupResult::Conjugation(c) => Some(render::render_conjugation(c)),
            LookupResult::Declension(d) => Some(render::render_declension(d)),
            LookupResult::NotFound(_) => None,
        }
    }
}

/// What the CLI hands to the output layer: the chat reply plus the structured result.
#[derive(Debug, Serialize)]
pub struct LookupReport {
    pub word: String,
    pub found: bool,
    pub reply: String,
    pub result: LookupResult,
}

impl LookupReport {
    pub fn new(word: &str, result: LookupResult) -> Self {
        let rendered = if result.is_empty() { None } else { result.render() };
        let found = rendered.is_some();
        let reply = rendered.unwrap_or_else(|| not_found_reply(word));
        LookupReport { word: word.to_string(), found, reply, result }
    }
}

pub fn not_found_reply(word: &str) -> String {
    format!("Didn't find anything about '{word}'.\nTry something else.\n")
}
