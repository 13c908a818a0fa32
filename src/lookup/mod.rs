use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Args;
use scraper::Html;
use url::Url;

use crate::config::LookupConfig;
use crate::extractor::{extract_conjugation, extract_declension, ExtractError};
use crate::output::types::Meta;
use crate::telemetry::{self};
use crate::telemetry::ctx::LogCtx;
use crate::telemetry::ops::lookup::Lookup as LookupOp;
use crate::telemetry::ops::lookup::Phase as LookupPhase;

mod classify;
mod fetch;
pub mod types;

pub use classify::{classify, PageKind};
pub use fetch::Fetcher;
pub use types::{LookupQuery, LookupReport, LookupResult, NotFound};

/// deutsch lookup <word>
#[derive(Args, Debug)]
pub struct LookupCmd {
    /// German verb, noun or adjective
    pub word: String,
}

pub async fn run(cfg: &LookupConfig, args: LookupCmd) -> Result<()> {
    let t0 = Instant::now();
    let Some(query) = LookupQuery::new(&args.word) else {
        bail!("You didn't provide a word to look up.");
    };
    let fetcher = Fetcher::new(cfg).context("build http client")?;
    let result = lookup(&fetcher, cfg, &query).await;

    let log = telemetry::lookup();
    let report = {
        let _s = log.span(&LookupPhase::Render).entered();
        LookupReport::new(query.as_str(), result)
    };
    log.result(&report, Some(Meta { duration_ms: Some(t0.elapsed().as_millis()) }))
}

/// Fetch, classify and parse one word. Never fails: every miss is a `NotFound`.
pub async fn lookup(fetcher: &Fetcher, cfg: &LookupConfig, query: &LookupQuery) -> LookupResult {
    let log = telemetry::lookup();
    let _g = log.root_span_kv([("word", query.as_str().to_string())]).entered();

    let fetched = {
        let _s = log.span_kv(&LookupPhase::Fetch, [("url", fetcher.lookup_url(query.as_str()).to_string())]).entered();
        fetcher.fetch(query.as_str()).await
    };
    match fetched {
        Ok(page) => resolve_page(&page.url, &page.html, cfg),
        Err(e) => {
            log.warn_kv("fetch failed", [("word", query.as_str().to_string()), ("error", e.to_string())]);
            LookupResult::NotFound(e.into())
        }
    }
}

/// Dispatch an already-fetched page to the extractor its URL calls for.
pub fn resolve_page(url: &Url, html: &str, cfg: &LookupConfig) -> LookupResult {
    let log = telemetry::lookup();
    let kind = {
        let _s = log.span(&LookupPhase::Classify).entered();
        classify(url, cfg)
    };
    let _s = log.span_kv(&LookupPhase::Extract, [("kind", format!("{:?}", kind))]).entered();
    match kind {
        PageKind::Unsupported => {
            log.warn_kv("unsupported page", [("url", url.to_string())]);
            LookupResult::NotFound(NotFound::Unsupported { url: url.to_string() })
        }
        PageKind::Conjugation => {
            let doc = Html::parse_document(html);
            let res = extract_conjugation(&doc, &cfg.extract);
            report_phase(&log, "forms", &res.forms);
            report_phase(&log, "translations", &res.translations);
            LookupResult::Conjugation(res)
        }
        PageKind::Declension => {
            let doc = Html::parse_document(html);
            let res = extract_declension(&doc, &cfg.extract);
            report_phase(&log, "headword", &res.headword);
            report_phase(&log, "word_forms", &res.word_forms);
            report_phase(&log, "table", &res.table);
            report_phase(&log, "translations", &res.translations);
            LookupResult::Declension(res)
        }
    }
}

fn report_phase<T>(log: &LogCtx<LookupOp>, phase: &str, res: &Result<T, ExtractError>) {
    if let Err(e) = res {
        log.warn_kv("extract phase failed", [("phase", phase.to_string()), ("error", e.to_string())]);
    }
}
