//! The full set of per-post inputs consumed by scoring.
//!
//! `Signals` is pure data. Scoring engines trust these values as supplied;
//! callers are responsible for clamping bounded fields before invocation.
//! Out-of-range values never cause a failure, only a score that reflects
//! them.

/// Scoring inputs for one post.
///
/// All counts are non-negative by construction. Bounded real fields document
/// their expected range; the scoring engine does not validate them.
///
/// # Examples
///
/// ```
/// use tideline_core::Signals;
///
/// let signals = Signals {
///     like_count: 42,
///     has_media: true,
///     ..Signals::default()
/// };
/// assert_eq!(signals.retweet_count, 0);
/// assert!(signals.hours_since_seen < 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Signals {
    /// Number of likes.
    pub like_count: u32,
    /// Number of retweets.
    pub retweet_count: u32,
    /// Number of replies.
    pub reply_count: u32,
    /// Number of quote posts.
    pub quote_count: u32,
    /// The post carries at least one media attachment.
    pub has_media: bool,
    /// The post carries a video attachment.
    pub is_video: bool,
    /// Hours elapsed since this viewer last saw the post. Negative values
    /// mean the post has never been shown; the engine clamps at zero for
    /// decay purposes.
    pub hours_since_seen: f64,
    /// Number of prior times this viewer has seen the post.
    pub seen_count: u32,
    /// Other posts by the same author already present in this batch.
    pub author_repeats: u32,
    /// Near-duplicate content already present in this batch.
    pub content_repeats: u32,
    /// Posts from the same originating cluster already placed.
    pub cluster_size: u32,
    /// Every occurrence of this content has already been shown to the
    /// viewer.
    pub all_seen: bool,
    /// Novelty perturbation, expected in `1.0..=1.2`.
    pub novelty_factor: f64,
    /// Pre-sampled random perturbation in `0.0..1.0`. Supplying this as a
    /// value keeps the scoring engine itself deterministic.
    pub random_factor: f64,
    /// The author holds a verified badge.
    pub verified: bool,
    /// The author holds a gold (paid-tier) badge.
    pub gold: bool,
    /// The author's follower count.
    pub follower_count: u32,
    /// The post carries a community correction note.
    pub has_community_note: bool,
    /// Super-tweeter boost, non-negative, typically `0.0`.
    pub super_tweeter_boost: f64,
    /// Number of viewers who blocked the author.
    pub blocked_by_count: u32,
    /// Number of viewers who muted the author.
    pub muted_by_count: u32,
    /// Spam classifier output in `0.0..=1.0`.
    pub spam_score: f64,
    /// Author account age in days.
    pub account_age_days: f64,
    /// Number of URLs in the content.
    pub url_count: u32,
    /// Number of URLs pointing at known shortener or spam domains.
    pub suspicious_url_count: u32,
    /// Number of hashtags in the content.
    pub hashtag_count: u32,
    /// Number of mentions in the content.
    pub mention_count: u32,
    /// Emoji density in `0.0..=1.0`.
    pub emoji_density: f64,
    /// Spam-keyword score in `0.0..=1.0`.
    pub spam_keyword_score: f64,
    /// Ratio of retweets to likes, `0.0` when both are zero.
    pub retweet_like_ratio: f64,
    /// Engagement accumulated per hour of post age, capped by the caller.
    pub engagement_velocity: f64,
    /// Author posting-cadence score, small and bounded.
    pub author_timing_score: f64,
}

impl Default for Signals {
    fn default() -> Self {
        Self {
            like_count: 0,
            retweet_count: 0,
            reply_count: 0,
            quote_count: 0,
            has_media: false,
            is_video: false,
            hours_since_seen: -1.0,
            seen_count: 0,
            author_repeats: 0,
            content_repeats: 0,
            cluster_size: 0,
            all_seen: false,
            novelty_factor: 1.0,
            random_factor: 0.0,
            verified: false,
            gold: false,
            follower_count: 0,
            has_community_note: false,
            super_tweeter_boost: 0.0,
            blocked_by_count: 0,
            muted_by_count: 0,
            spam_score: 0.0,
            account_age_days: 0.0,
            url_count: 0,
            suspicious_url_count: 0,
            hashtag_count: 0,
            mention_count: 0,
            emoji_density: 0.0,
            spam_keyword_score: 0.0,
            retweet_like_ratio: 0.0,
            engagement_velocity: 0.0,
            author_timing_score: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_mark_post_as_never_seen() {
        let signals = Signals::default();
        assert!(signals.hours_since_seen < 0.0);
        assert_eq!(signals.seen_count, 0);
        assert!(!signals.all_seen);
    }

    #[rstest]
    fn defaults_carry_neutral_perturbation() {
        let signals = Signals::default();
        assert_eq!(signals.novelty_factor, 1.0);
        assert_eq!(signals.random_factor, 0.0);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[expect(
        clippy::expect_used,
        reason = "test fixtures should fail fast on malformed JSON"
    )]
    fn missing_payload_fields_fall_back_to_defaults() {
        let signals: Signals =
            serde_json::from_str(r#"{"like_count": 7}"#).expect("decode signals");
        assert_eq!(signals.like_count, 7);
        assert_eq!(signals.novelty_factor, 1.0);
        assert!(!signals.verified);
    }
}
