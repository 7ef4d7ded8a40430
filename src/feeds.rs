use std::time::Duration;

use feed_rs::parser;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use tracing::{info, warn};

use crate::digest::truncate_chars;
use crate::error::{AppError, Result};

/// At most this many entries are taken from each feed.
pub const MAX_ENTRIES_PER_FEED: usize = 3;

/// Character budget for article and post summaries.
pub const SUMMARY_CHAR_BUDGET: usize = 300;

/// Domain labels assigned by substring match against the feed URL.
const TAG_SUBSTRINGS: [&str; 3] = ["aws", "atlassian", "salesforce"];

// Create a static client to reuse connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});

/// A marketplace update extracted from one RSS/Atom entry.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub title: String,
    pub summary: String,
    pub link: String,
    pub source: String,
    pub tags: Vec<String>,
}

/// Fetches every configured feed in order and flattens the results.
/// A feed that fails to fetch or parse contributes no articles; the
/// remaining feeds are still collected.
pub async fn fetch_marketplace_updates(feed_urls: &[String]) -> Vec<Article> {
    let mut articles = Vec::new();

    for url in feed_urls {
        info!("Fetching feed: {}", url);
        match fetch_feed(url).await {
            Ok(content) => match articles_from_feed(&content, url) {
                Ok(parsed) => {
                    info!("Collected {} articles from {}", parsed.len(), url);
                    articles.extend(parsed);
                }
                Err(e) => warn!("Skipping unparseable feed {}: {}", url, e),
            },
            Err(e) => warn!("Skipping unreachable feed {}: {}", url, e),
        }
    }

    articles
}

async fn fetch_feed(url: &str) -> Result<String> {
    let response = CLIENT.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::FetchError(format!("{} returned HTTP {}", url, status)));
    }
    let body = response.text().await?;
    Ok(body)
}

/// Parses feed content and converts the leading entries into Articles.
pub fn articles_from_feed(content: &str, source_url: &str) -> Result<Vec<Article>> {
    let feed = parser::parse(content.as_bytes())
        .map_err(|e| AppError::ParseError(format!("Failed to parse feed: {}", e)))?;

    let mut articles = Vec::new();
    for entry in feed.entries.into_iter().take(MAX_ENTRIES_PER_FEED) {
        // Entries without a link are not worth surfacing in the digest
        let link = match entry.links.first() {
            Some(link) => link.href.clone(),
            None => continue,
        };

        let title = entry.title.map(|t| t.content).unwrap_or_default();
        let summary = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body))
            .unwrap_or_default();

        articles.push(Article {
            title,
            summary: truncate_chars(&summary, SUMMARY_CHAR_BUDGET),
            link,
            source: source_url.to_string(),
            tags: tags_for_url(source_url),
        });
    }

    Ok(articles)
}

/// Tag assignment is a pure function of URL substring containment.
pub fn tags_for_url(url: &str) -> Vec<String> {
    TAG_SUBSTRINGS
        .iter()
        .filter(|tag| url.contains(*tag))
        .map(|tag| tag.to_string())
        .collect()
}
