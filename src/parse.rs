use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use url::Url;

use crate::config::LookupConfig;
use crate::lookup::{resolve_page, LookupReport};
use crate::output::types::Meta;
use crate::telemetry::{self};
use crate::telemetry::ops::parse::Phase as ParsePhase;

/// deutsch parse <file> --url <final-url>: run the extractors on a saved page, no network.
#[derive(Args, Debug)]
pub struct ParseCmd {
    /// HTML file saved from the reference site
    pub file: PathBuf,
    /// URL the page was served from; decides conjugation vs declension
    #[arg(long)]
    pub url: String,
}

pub fn run(cfg: &LookupConfig, args: ParseCmd) -> Result<()> {
    let t0 = Instant::now();
    let log = telemetry::parse();
    let _g = log.root_span_kv([
        ("file", args.file.display().to_string()),
        ("url", args.url.clone()),
    ]).entered();

    let url = Url::parse(&args.url).with_context(|| format!("invalid --url: {}", args.url))?;
    let html = {
        let _s = log.span(&ParsePhase::Load).entered();
        std::fs::read_to_string(&args.file).with_context(|| format!("read {}", args.file.display()))?
    };
    log.info_kv("loaded", [("bytes", html.len().to_string())]);

    let result = resolve_page(&url, &html, cfg);
    let report = {
        let _s = log.span(&ParsePhase::Render).entered();
        LookupReport::new(&word_from_url(&url), result)
    };
    log.result(&report, Some(Meta { duration_ms: Some(t0.elapsed().as_millis()) }))
}

/// `.../konjugation/gehen.htm` -> `gehen`
fn word_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segs| segs.next_back())
        .map(|last| last.trim_end_matches(".htm").trim_end_matches(".html").to_string())
        .filter(|w| !w.is_empty())
        .unwrap_or_else(|| url.to_string())
}
