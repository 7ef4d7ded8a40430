use serde::Serialize;

use crate::digest::Digest;

/// Envelope for the single feed route: `{"feed": <digest>}`.
#[derive(Serialize)]
pub struct FeedResponse {
    pub feed: Digest,
}
