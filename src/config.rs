use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use tracing::warn;
use crate::error::{AppError, Result};

/// Feeds polled when no RSS_FEEDS override is present.
pub const DEFAULT_RSS_FEEDS: [&str; 3] = [
    "https://aws.amazon.com/blogs/aws/feed/",
    "https://developer.atlassian.com/blog/rss.xml",
    "https://blogs.salesforce.com/feed",
];

/// Search term sent to the social search endpoint.
pub const SOCIAL_QUERY: &str = "SaaS Marketplace";

/// Maximum number of social posts requested per digest.
pub const SOCIAL_RESULT_COUNT: u32 = 15;

/// Which social collector variant serves the digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SocialSourceKind {
    Live,
    Static,
}

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub rss_feeds: Vec<String>,
    pub twitter_bearer_token: Option<String>,
    pub social_source: SocialSourceKind,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        // The bearer token is optional; without it the live social
        // collector degrades to empty results instead of failing.
        let twitter_bearer_token = env::var("TWITTER_BEARER_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());

        let rss_feeds = match env::var("RSS_FEEDS") {
            Ok(raw) => feeds_from_override(&raw),
            Err(_) => default_feeds(),
        };

        let social_source = match env::var("SOCIAL_SOURCE").as_deref() {
            Ok("static") => SocialSourceKind::Static,
            Ok("live") | Err(_) => SocialSourceKind::Live,
            Ok(other) => {
                return Err(AppError::ConfigError(format!(
                    "Invalid SOCIAL_SOURCE '{}', expected 'live' or 'static'",
                    other
                )))
            }
        };

        // Load server configuration with defaults
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let server_addr = SocketAddr::new(ip, port);

        Ok(Config {
            server_addr,
            rss_feeds,
            twitter_bearer_token,
            social_source,
        })
    }
}

fn default_feeds() -> Vec<String> {
    DEFAULT_RSS_FEEDS.iter().map(|url| url.to_string()).collect()
}

/// Splits a comma-separated RSS_FEEDS override. An override with no
/// usable URLs would leave every digest article-free, so it falls back
/// to the default list.
fn feeds_from_override(raw: &str) -> Vec<String> {
    let feeds: Vec<String> = raw
        .split(',')
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .collect();

    if feeds.is_empty() {
        warn!("RSS_FEEDS override contains no URLs, using the default feeds");
        return default_feeds();
    }

    feeds
}
