//! Serde types for the timeline interchange JSON.
//!
//! The payload is forgiving by design: every field except the post
//! identifier is optional, and author-level signals may appear either on the
//! post itself or nested under `author`. Accessors on [`PostRecord`] resolve
//! that duplication so the ranking layer sees one value per signal.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Boost applied when a super-tweeter flag is set without an explicit value.
const DEFAULT_SUPER_BOOST: f64 = 50.0;

/// The decoded input payload: a batch of posts plus viewer context.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimelinePayload {
    /// The candidate posts, in arrival order.
    pub timeline: Vec<PostRecord>,
    /// Per-post view history: identifier to Unix seconds of the last view,
    /// or `null` when the view time is unknown.
    #[serde(default)]
    pub seen: HashMap<String, Option<i64>>,
    /// Identifiers that recently occupied top slots.
    #[serde(default)]
    pub recent_top: Vec<String>,
    /// Requested display size; clamped during ranking. Zero or absent
    /// selects the default window.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Override for the current time in Unix seconds.
    #[serde(default)]
    pub now: Option<i64>,
}

/// One post as supplied by the caller.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PostRecord {
    /// Unique identifier within the batch.
    pub id: String,
    /// Post text; drives the derived content signals.
    #[serde(default)]
    pub content: String,
    /// Creation time in Unix seconds; missing means "just now".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub retweet_count: u32,
    #[serde(default)]
    pub reply_count: u32,
    #[serde(default)]
    pub quote_count: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_post: Option<QuotedPost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorRecord>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub gold: bool,
    #[serde(default)]
    pub follower_count: u32,
    #[serde(default)]
    pub has_community_note: bool,
    #[serde(default)]
    pub super_tweeter: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_tweeter_boost: Option<f64>,
    #[serde(default)]
    pub blocked_by_count: u32,
    #[serde(default)]
    pub muted_by_count: u32,
    #[serde(default)]
    pub spam_score: f64,
    #[serde(default)]
    pub author_timing_score: f64,
    #[serde(default)]
    pub cluster_size: u32,
}

/// Author metadata nested under a post.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthorRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub gold: bool,
    #[serde(default)]
    pub follower_count: u32,
    #[serde(default)]
    pub blocked_by_count: u32,
    #[serde(default)]
    pub muted_by_count: u32,
    #[serde(default)]
    pub spam_score: f64,
    /// Account creation time in Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub timing_score: f64,
}

/// A media attachment on a post.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Attachment {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// The quoted post embedded in a quote, reduced to its attachments.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QuotedPost {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl PostRecord {
    /// The key grouping posts by author, in order of source preference.
    pub fn author_key(&self) -> Option<&str> {
        self.user_id
            .as_deref()
            .or_else(|| self.author.as_ref().and_then(|a| a.id.as_deref()))
            .or(self.username.as_deref())
            .or_else(|| self.author.as_ref().and_then(|a| a.username.as_deref()))
    }

    /// Whether the post or quoted post carries any attachment.
    pub fn has_media(&self) -> bool {
        !self.attachments.is_empty()
            || self
                .quoted_post
                .as_ref()
                .is_some_and(|quoted| !quoted.attachments.is_empty())
    }

    pub fn is_verified(&self) -> bool {
        self.verified || self.author.as_ref().is_some_and(|a| a.verified)
    }

    pub fn is_gold(&self) -> bool {
        self.gold || self.author.as_ref().is_some_and(|a| a.gold)
    }

    /// Post-level count wins when present, else the author's.
    pub fn followers(&self) -> u32 {
        if self.follower_count > 0 {
            self.follower_count
        } else {
            self.author.as_ref().map_or(0, |a| a.follower_count)
        }
    }

    pub fn blocked_by(&self) -> u32 {
        if self.blocked_by_count > 0 {
            self.blocked_by_count
        } else {
            self.author.as_ref().map_or(0, |a| a.blocked_by_count)
        }
    }

    pub fn muted_by(&self) -> u32 {
        if self.muted_by_count > 0 {
            self.muted_by_count
        } else {
            self.author.as_ref().map_or(0, |a| a.muted_by_count)
        }
    }

    pub fn spam(&self) -> f64 {
        if self.spam_score > 0.0 {
            self.spam_score
        } else {
            self.author.as_ref().map_or(0.0, |a| a.spam_score)
        }
    }

    pub fn timing_score(&self) -> f64 {
        if self.author_timing_score > 0.0 {
            self.author_timing_score
        } else {
            self.author.as_ref().map_or(0.0, |a| a.timing_score)
        }
    }

    /// The super-tweeter boost, defaulted when the flag is set bare.
    pub fn super_boost(&self) -> f64 {
        if self.super_tweeter {
            self.super_tweeter_boost.unwrap_or(DEFAULT_SUPER_BOOST)
        } else {
            0.0
        }
    }

    /// Account age in days at `now`, zero when unknown.
    pub fn account_age_days(&self, now: i64) -> f64 {
        self.author
            .as_ref()
            .and_then(|a| a.created_at)
            .map_or(0.0, |created| {
                ((now - created) as f64 / 86_400.0).max(0.0)
            })
    }
}

/// The ranked output payload.
#[derive(Debug, Serialize)]
pub struct RankedPayload {
    /// The full batch in rank order, display window first.
    pub timeline: Vec<RankedRecord>,
    /// Identifiers of the display window, for feeding a recent-top cache.
    pub top_ids: Vec<String>,
}

/// A ranked post: the original record plus its score.
#[derive(Debug, Serialize)]
pub struct RankedRecord {
    #[serde(flatten)]
    pub post: PostRecord,
    /// The relevance score assigned during ranking.
    pub score: f64,
}
