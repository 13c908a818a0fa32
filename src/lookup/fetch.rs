use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::config::LookupConfig;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Body of the page the site finally answered with.
pub struct Page {
    pub url: Url,
    pub html: String,
}

pub struct Fetcher {
    http: Client,
    base_url: Url,
}

impl Fetcher {
    pub fn new(cfg: &LookupConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(cfg.user_agent.as_str());
        if let Some(timeout) = cfg.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self { http: builder.build()?, base_url: cfg.base_url.clone() })
    }

    pub fn lookup_url(&self, word: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("w", word);
        url
    }

    /// GET `<base>?w=<word>`, following redirects to the canonical page.
    pub async fn fetch(&self, word: &str) -> Result<Page, FetchError> {
        let resp = self.http.get(self.lookup_url(word)).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let url = resp.url().clone();
        let html = resp.text().await?;
        Ok(Page { url, html })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_url_appends_word_as_w_param() {
        let fetcher = Fetcher::new(&LookupConfig::default()).unwrap();
        assert_eq!(fetcher.lookup_url("gehen").as_str(), "https://www.verbformen.de/?w=gehen");
    }

    #[test]
    fn lookup_url_percent_encodes_umlauts() {
        let fetcher = Fetcher::new(&LookupConfig::default()).unwrap();
        let url = fetcher.lookup_url("schön");
        assert_eq!(url.query(), Some("w=sch%C3%B6n"));
        let (k, v) = url.query_pairs().next().unwrap();
        assert_eq!((k.as_ref(), v.as_ref()), ("w", "schön"));
    }

    #[test]
    fn lookup_url_keeps_existing_query() {
        let mut cfg = LookupConfig::default();
        cfg.base_url = Url::parse("http://localhost:9000/konjugation/?lang=de").unwrap();
        let fetcher = Fetcher::new(&cfg).unwrap();
        assert_eq!(fetcher.lookup_url("gehen").as_str(), "http://localhost:9000/konjugation/?lang=de&w=gehen");
    }
}
