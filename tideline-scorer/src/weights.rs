//! Tunable coefficients for the weighted scoring composite.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when validating a weight configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeightsError {
    /// A coefficient was negative or not finite.
    #[error("weights must be finite and non-negative")]
    InvalidWeights,
    /// A dampening factor fell outside `0.0..=1.0`.
    #[error("dampening factors must lie in 0.0..=1.0")]
    InvalidDamp,
}

/// Coefficients applied to each term of the scoring composite.
///
/// The defaults are the calibrated production values; treat them as a
/// configuration surface rather than constants. Magnitudes encode the
/// contract's shape constraints: dampening factors stay in `0.0..=1.0` so a
/// dampened score can never overtake its undampened counterpart, and the
/// trust cap keeps any single trust signal from overwhelming engagement.
///
/// # Examples
///
/// ```
/// use tideline_scorer::RelevanceWeights;
///
/// let weights = RelevanceWeights {
///     media_bonus: 3.0,
///     ..RelevanceWeights::default()
/// };
/// assert!(weights.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceWeights {
    /// Multiplier on the log-dampened like count.
    pub like_weight: f64,
    /// Multiplier on the log-dampened retweet count.
    pub retweet_weight: f64,
    /// Multiplier on the log-dampened reply count.
    pub reply_weight: f64,
    /// Multiplier on the log-dampened quote count.
    pub quote_weight: f64,
    /// Flat bonus when the post carries media.
    pub media_bonus: f64,
    /// Flat bonus when the post carries a video attachment.
    pub video_bonus: f64,
    /// Exponential decay rate per hour since the viewer last saw the post.
    pub recency_decay_rate: f64,
    /// Penalty per additional post from the same author in the batch.
    pub author_repeat_penalty: f64,
    /// Penalty per near-duplicate content occurrence in the batch.
    pub content_repeat_penalty: f64,
    /// Penalty per already-placed post from the same cluster.
    pub cluster_penalty: f64,
    /// Penalty per prior time the viewer has seen the post.
    pub reseen_penalty: f64,
    /// Dampening multiplier applied when every occurrence of the content
    /// has already been shown. Must lie in `0.0..=1.0`.
    pub all_seen_damp: f64,
    /// Flat bonus for a verified author.
    pub verified_bonus: f64,
    /// Flat bonus for a gold-tier author.
    pub gold_bonus: f64,
    /// Multiplier on the caller-supplied super-tweeter boost.
    pub super_tweeter_scale: f64,
    /// Multiplier on the log-dampened follower count.
    pub follower_scale: f64,
    /// Upper bound on the summed trust boost.
    pub trust_cap: f64,
    /// Fixed penalty when the post carries a community correction note.
    pub community_note_penalty: f64,
    /// Multiplier on the log-dampened blocked-by count.
    pub blocked_penalty: f64,
    /// Multiplier on the log-dampened muted-by count.
    pub muted_penalty: f64,
    /// Multiplier on the spam classifier score.
    pub spam_scale: f64,
    /// Multiplier on the spam-keyword score.
    pub spam_keyword_scale: f64,
    /// Multiplier on the suspicious-URL ratio.
    pub suspicious_url_scale: f64,
    /// Hashtags tolerated before the overload penalty starts.
    pub hashtag_free_count: u32,
    /// Penalty per hashtag beyond the free allowance.
    pub hashtag_penalty: f64,
    /// Mentions tolerated before the overload penalty starts.
    pub mention_free_count: u32,
    /// Penalty per mention beyond the free allowance.
    pub mention_penalty: f64,
    /// Emoji density tolerated before the extremity penalty starts.
    pub emoji_threshold: f64,
    /// Multiplier on emoji density beyond the threshold.
    pub emoji_scale: f64,
    /// Account age, in days, at which the young-account damping vanishes.
    pub account_maturity_days: f64,
    /// Maximum penalty for a brand-new account.
    pub young_account_penalty: f64,
    /// Retweet-to-like ratio tolerated before the anomaly penalty starts.
    pub ratio_threshold: f64,
    /// Multiplier on the ratio excess beyond the threshold.
    pub ratio_penalty_scale: f64,
    /// Multiplier on the (capped) engagement velocity.
    pub velocity_scale: f64,
    /// Upper bound applied to the engagement velocity input.
    pub velocity_cap: f64,
    /// Multiplier on the novelty factor.
    pub novelty_scale: f64,
    /// Multiplier on the pre-sampled random factor.
    pub random_scale: f64,
    /// Multiplier on the author timing score.
    pub timing_scale: f64,
    /// Subtractive discount per feed position, modelling attention decay.
    pub position_discount: f64,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            like_weight: 1.0,
            retweet_weight: 1.4,
            reply_weight: 0.9,
            quote_weight: 1.2,
            media_bonus: 2.0,
            video_bonus: 1.0,
            recency_decay_rate: 0.05,
            author_repeat_penalty: 1.5,
            content_repeat_penalty: 2.5,
            cluster_penalty: 0.8,
            reseen_penalty: 0.6,
            all_seen_damp: 0.2,
            verified_bonus: 1.0,
            gold_bonus: 1.5,
            super_tweeter_scale: 0.1,
            follower_scale: 0.4,
            trust_cap: 8.0,
            community_note_penalty: 6.0,
            blocked_penalty: 1.2,
            muted_penalty: 0.6,
            spam_scale: 8.0,
            spam_keyword_scale: 5.0,
            suspicious_url_scale: 4.0,
            hashtag_free_count: 3,
            hashtag_penalty: 0.4,
            mention_free_count: 3,
            mention_penalty: 0.3,
            emoji_threshold: 0.3,
            emoji_scale: 4.0,
            account_maturity_days: 30.0,
            young_account_penalty: 2.0,
            ratio_threshold: 0.6,
            ratio_penalty_scale: 3.0,
            velocity_scale: 0.3,
            velocity_cap: 10.0,
            novelty_scale: 0.5,
            random_scale: 0.3,
            timing_scale: 0.5,
            position_discount: 0.05,
        }
    }
}

impl RelevanceWeights {
    /// Validate the configuration and return a copy.
    ///
    /// # Errors
    /// Returns [`WeightsError::InvalidWeights`] when any coefficient is
    /// negative or not finite, and [`WeightsError::InvalidDamp`] when a
    /// dampening factor leaves `0.0..=1.0`.
    pub fn validate(self) -> Result<Self, WeightsError> {
        if self
            .coefficients()
            .iter()
            .any(|value| !value.is_finite() || *value < 0.0)
        {
            return Err(WeightsError::InvalidWeights);
        }
        if !(0.0..=1.0).contains(&self.all_seen_damp) {
            return Err(WeightsError::InvalidDamp);
        }
        Ok(self)
    }

    fn coefficients(&self) -> [f64; 37] {
        [
            self.like_weight,
            self.retweet_weight,
            self.reply_weight,
            self.quote_weight,
            self.media_bonus,
            self.video_bonus,
            self.recency_decay_rate,
            self.author_repeat_penalty,
            self.content_repeat_penalty,
            self.cluster_penalty,
            self.reseen_penalty,
            self.all_seen_damp,
            self.verified_bonus,
            self.gold_bonus,
            self.super_tweeter_scale,
            self.follower_scale,
            self.trust_cap,
            self.community_note_penalty,
            self.blocked_penalty,
            self.muted_penalty,
            self.spam_scale,
            self.spam_keyword_scale,
            self.suspicious_url_scale,
            self.hashtag_penalty,
            self.mention_penalty,
            self.emoji_threshold,
            self.emoji_scale,
            self.account_maturity_days,
            self.young_account_penalty,
            self.ratio_threshold,
            self.ratio_penalty_scale,
            self.velocity_scale,
            self.velocity_cap,
            self.novelty_scale,
            self.random_scale,
            self.timing_scale,
            self.position_discount,
        ]
    }
}
