use chrono::Local;
use serde::Serialize;

use crate::feeds::Article;
use crate::social::SocialPost;

/// Character budget for bullets in the text rendering.
pub const BULLET_CHAR_BUDGET: usize = 200;

/// One day's combined digest. Built fresh per request, never stored.
#[derive(Debug, Serialize)]
pub struct Digest {
    pub date: String,
    pub feed: DigestSections,
}

#[derive(Debug, Serialize)]
pub struct DigestSections {
    pub marketplace_updates: Vec<Article>,
    pub social_chatter: Vec<SocialPost>,
}

/// Today's date in "Month DD, YYYY" form, e.g. "August 30, 2026".
pub fn today_string() -> String {
    Local::now().format("%B %d, %Y").to_string()
}

pub fn build_digest(date: String, articles: Vec<Article>, posts: Vec<SocialPost>) -> Digest {
    Digest {
        date,
        feed: DigestSections {
            marketplace_updates: articles,
            social_chatter: posts,
        },
    }
}

/// Renders the digest as a single newline-joined text block, one bullet
/// per item, with markdown-style links. Items keep their collection
/// order; nothing is filtered or deduplicated.
pub fn render_text(digest: &Digest) -> String {
    let mut lines = Vec::new();

    lines.push(format!("# SaaS Marketplace Digest - {}", digest.date));
    lines.push(String::new());
    lines.push("## Marketplace Feature Launches".to_string());
    for article in &digest.feed.marketplace_updates {
        lines.push(format!(
            "- **{}**: {} [Read more]({})",
            article.title,
            truncate_chars(&article.summary, BULLET_CHAR_BUDGET),
            article.link
        ));
    }

    lines.push(String::new());
    lines.push("## Social Chatter".to_string());
    for post in &digest.feed.social_chatter {
        lines.push(format!(
            "- @{}: {} [View post]({})",
            post.author,
            truncate_chars(&post.summary, BULLET_CHAR_BUDGET),
            post.link
        ));
    }

    lines.join("\n")
}

/// Cuts a string to at most `max_chars` characters. The cut lands on a
/// character boundary but not a word boundary, so mid-word cuts happen.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_digest() -> Digest {
        let articles = vec![Article {
            title: "Usage-based pricing".to_string(),
            summary: "Sellers can now meter consumption per listing.".to_string(),
            link: "https://example.com/pricing".to_string(),
            source: "https://aws.amazon.com/blogs/aws/feed/".to_string(),
            tags: vec!["aws".to_string()],
        }];
        let posts = vec![SocialPost {
            summary: "The new billing dashboard is great".to_string(),
            author: "42".to_string(),
            link: "https://twitter.com/i/web/status/123".to_string(),
            tags: vec!["twitter".to_string()],
        }];
        build_digest("August 30, 2026".to_string(), articles, posts)
    }

    #[test]
    fn header_line_embeds_the_date() {
        let text = render_text(&sample_digest());
        let header = text.lines().next().unwrap();
        assert!(header.contains("August 30, 2026"));
    }

    #[test]
    fn sections_appear_once_and_in_order() {
        let text = render_text(&sample_digest());
        assert_eq!(text.matches("## Marketplace Feature Launches").count(), 1);
        assert_eq!(text.matches("## Social Chatter").count(), 1);

        let launches = text.find("Marketplace Feature Launches").unwrap();
        let chatter = text.find("Social Chatter").unwrap();
        assert!(launches < chatter);
    }

    #[test]
    fn bullets_carry_markdown_links() {
        let text = render_text(&sample_digest());
        assert!(text.contains("[Read more](https://example.com/pricing)"));
        assert!(text.contains("[View post](https://twitter.com/i/web/status/123)"));
        assert!(text.contains("- @42:"));
    }

    #[test]
    fn text_bullets_use_the_tighter_budget() {
        let mut digest = sample_digest();
        digest.feed.marketplace_updates[0].summary = "z".repeat(300);
        let text = render_text(&digest);

        let bullet = text
            .lines()
            .find(|line| line.starts_with("- **"))
            .unwrap();
        let run = bullet.chars().filter(|c| *c == 'z').count();
        assert_eq!(run, BULLET_CHAR_BUDGET);
    }

    #[test]
    fn serializes_to_the_nested_feed_mapping() {
        let value = serde_json::to_value(sample_digest()).unwrap();
        assert_eq!(value["date"], "August 30, 2026");

        let article = &value["feed"]["marketplace_updates"][0];
        assert_eq!(article["title"], "Usage-based pricing");
        assert_eq!(article["source"], "https://aws.amazon.com/blogs/aws/feed/");
        assert_eq!(article["tags"][0], "aws");

        let post = &value["feed"]["social_chatter"][0];
        assert_eq!(post["author"], "42");
        assert_eq!(post["link"], "https://twitter.com/i/web/status/123");
    }

    #[test]
    fn truncation_is_a_character_slice() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
        assert_eq!(truncate_chars("short", 300), "short");
        assert_eq!(truncate_chars("exact", 5), "exact");
        // multi-byte text cuts on character boundaries, not bytes
        assert_eq!(truncate_chars("héllö wörld", 4), "héll");
        assert_eq!(truncate_chars("", 10), "");
    }
}
