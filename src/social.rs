use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::config::{Config, SocialSourceKind};
use crate::digest::truncate_chars;
use crate::error::{AppError, Result};
use crate::feeds::SUMMARY_CHAR_BUDGET;

const SEARCH_ENDPOINT: &str = "https://api.twitter.com/2/tweets/search/recent";

// Diagnostic logging never exposes more than a prefix of secrets or bodies
const TOKEN_LOG_CHARS: usize = 10;
const BODY_LOG_CHARS: usize = 500;

/// A social-chatter item included in the digest.
#[derive(Debug, Clone, Serialize)]
pub struct SocialPost {
    pub summary: String,
    pub author: String,
    pub link: String,
    pub tags: Vec<String>,
}

/// Source of social chatter for the digest. Implementations never fail
/// the digest: degraded paths return an empty or fallback collection.
#[async_trait]
pub trait SocialSource: Send + Sync {
    async fn fetch_posts(&self, query: &str, count: u32) -> Vec<SocialPost>;
}

/// Picks the collector variant the configuration asks for.
pub fn from_config(config: &Config) -> Arc<dyn SocialSource> {
    match config.social_source {
        SocialSourceKind::Live => Arc::new(TwitterSource::new(config.twitter_bearer_token.clone())),
        SocialSourceKind::Static => Arc::new(StaticSource),
    }
}

/// Live variant backed by the Twitter recent-search API.
pub struct TwitterSource {
    client: Client,
    bearer_token: Option<String>,
    search_url: String,
}

impl TwitterSource {
    pub fn new(bearer_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            bearer_token,
            search_url: SEARCH_ENDPOINT.to_string(),
        }
    }

    /// Points the source at a different search endpoint, e.g. a local
    /// stand-in server.
    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    async fn search(&self, token: &str, query: &str, count: u32) -> Result<Vec<SocialPost>> {
        let url = format!(
            "{}?query={}&max_results={}&tweet.fields=author_id,text",
            self.search_url,
            urlencoding::encode(query),
            count
        );
        debug!("Twitter search URL: {}", url);

        let response = self.client.get(&url).bearer_auth(token).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("Twitter status: {}", status);
        debug!("Twitter response: {}", truncate_chars(&body, BODY_LOG_CHARS));

        if !status.is_success() {
            return Err(AppError::FetchError(format!("Twitter API returned HTTP {}", status)));
        }

        posts_from_body(&body)
    }
}

#[async_trait]
impl SocialSource for TwitterSource {
    async fn fetch_posts(&self, query: &str, count: u32) -> Vec<SocialPost> {
        match self.bearer_token.as_deref() {
            Some(token) => debug!("Bearer loaded: {}", truncate_chars(token, TOKEN_LOG_CHARS)),
            None => debug!("Bearer loaded: None"),
        }

        let Some(token) = self.bearer_token.as_deref().filter(|t| !t.is_empty()) else {
            warn!("Twitter bearer token not found in environment, returning empty posts");
            return Vec::new();
        };

        let posts = match self.search(token, query, count).await {
            Ok(posts) => posts,
            Err(e) => {
                error!("Twitter API request failed: {}", e);
                return Vec::new();
            }
        };

        if posts.is_empty() {
            warn!("No tweets found, using fallback");
            return vec![fallback_post()];
        }

        posts
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Tweet>,
}

#[derive(Deserialize)]
struct Tweet {
    id: String,
    text: String,
    #[serde(default)]
    author_id: String,
}

fn posts_from_body(body: &str) -> Result<Vec<SocialPost>> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| AppError::ParseError(format!("Unexpected Twitter response: {}", e)))?;

    let posts = response
        .data
        .into_iter()
        .map(|tweet| SocialPost {
            summary: truncate_chars(&tweet.text, SUMMARY_CHAR_BUDGET),
            author: tweet.author_id,
            link: format!("https://twitter.com/i/web/status/{}", tweet.id),
            tags: vec!["twitter".to_string(), "social".to_string(), "saas".to_string()],
        })
        .collect();

    Ok(posts)
}

/// Substituted when a successful search matches nothing.
pub fn fallback_post() -> SocialPost {
    SocialPost {
        summary: "No real tweets available".to_string(),
        author: "fallback".to_string(),
        link: "https://twitter.com/".to_string(),
        tags: vec!["debug".to_string()],
    }
}

/// Mock variant for environments where outbound social-API calls are
/// not permitted. Returns canned posts and never touches the network.
pub struct StaticSource;

#[async_trait]
impl SocialSource for StaticSource {
    async fn fetch_posts(&self, _query: &str, _count: u32) -> Vec<SocialPost> {
        vec![
            SocialPost {
                summary: "Excited to see the new AWS Marketplace seller dashboard rolling out this week"
                    .to_string(),
                author: "saasbuilder".to_string(),
                link: "https://twitter.com/i/web/status/1000000000000000001".to_string(),
                tags: Vec::new(),
            },
            SocialPost {
                summary: "Atlassian Marketplace apps are finally getting first-class usage analytics"
                    .to_string(),
                author: "devtoolswatch".to_string(),
                link: "https://twitter.com/i/web/status/1000000000000000002".to_string(),
                tags: Vec::new(),
            },
        ]
    }
}
