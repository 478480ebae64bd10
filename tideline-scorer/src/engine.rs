//! The weighted multi-factor scoring composite.

use tideline_core::{Scorer, Signals};

use crate::{RelevanceWeights, WeightsError};

/// Deterministic weighted scorer over the full signal set.
///
/// Stateless apart from its validated [`RelevanceWeights`]; any number of
/// concurrent invocations are safe. Scores are comparable only relative to
/// one another — no absolute range is guaranteed and none is needed, since
/// downstream consumers sort by score.
///
/// # Examples
///
/// ```
/// use tideline_core::{Scorer, Signals};
/// use tideline_scorer::{RelevanceScorer, RelevanceWeights};
///
/// let scorer = RelevanceScorer::new(RelevanceWeights::default())?;
/// let score = scorer.score(&Signals::default(), 0);
/// assert!(score.is_finite());
/// # Ok::<(), tideline_scorer::WeightsError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RelevanceScorer {
    weights: RelevanceWeights,
}

impl RelevanceScorer {
    /// Construct a scorer from a weight configuration.
    ///
    /// # Errors
    /// Returns [`WeightsError`] when the configuration fails validation.
    pub fn new(weights: RelevanceWeights) -> Result<Self, WeightsError> {
        Ok(Self {
            weights: weights.validate()?,
        })
    }

    /// Construct a scorer with the calibrated default weights.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// The active weight configuration.
    #[must_use]
    pub const fn weights(&self) -> &RelevanceWeights {
        &self.weights
    }

    /// Weighted, log-dampened engagement with flat media bonuses.
    ///
    /// The dampening keeps viral outliers from dominating linearly: the
    /// thousandth like is worth far less than the tenth. Always
    /// non-negative, which the recency decay relies on.
    #[expect(
        clippy::float_arithmetic,
        reason = "engagement scoring is a weighted sum of dampened counts"
    )]
    fn engagement_base(&self, signals: &Signals) -> f64 {
        let w = &self.weights;
        let mut base = w.like_weight * log_damp(signals.like_count)
            + w.retweet_weight * log_damp(signals.retweet_count)
            + w.reply_weight * log_damp(signals.reply_count)
            + w.quote_weight * log_damp(signals.quote_count);
        if signals.has_media {
            base += w.media_bonus;
        }
        if signals.is_video {
            base += w.video_bonus;
        }
        base
    }

    /// Exponential decay over hours since the viewer last saw the post.
    ///
    /// Negative hours mean "never shown" and decay as zero hours would.
    #[expect(
        clippy::float_arithmetic,
        reason = "recency decay evaluates an exponential of the elapsed hours"
    )]
    fn recency_decay(&self, signals: &Signals) -> f64 {
        let hours = signals.hours_since_seen.max(0.0);
        (-self.weights.recency_decay_rate * hours).exp()
    }

    /// Linear penalties for author, content, cluster, and re-show repeats.
    #[expect(
        clippy::float_arithmetic,
        reason = "repetition penalties scale linearly with repeat counts"
    )]
    fn repetition_penalty(&self, signals: &Signals) -> f64 {
        let w = &self.weights;
        w.author_repeat_penalty * f64::from(signals.author_repeats)
            + w.content_repeat_penalty * f64::from(signals.content_repeats)
            + w.cluster_penalty * f64::from(signals.cluster_size)
            + w.reseen_penalty * f64::from(signals.seen_count)
    }

    /// Capped positive boost from trust signals.
    ///
    /// Follower count contributes sub-linearly so reach alone cannot
    /// snowball, and the cap keeps the summed boost from overwhelming
    /// engagement.
    #[expect(
        clippy::float_arithmetic,
        reason = "trust boosting sums bounded bonuses with a dampened follower term"
    )]
    fn trust_boost(&self, signals: &Signals) -> f64 {
        let w = &self.weights;
        let mut boost = w.follower_scale * log_damp(signals.follower_count);
        if signals.verified {
            boost += w.verified_bonus;
        }
        if signals.gold {
            boost += w.gold_bonus;
        }
        boost += w.super_tweeter_scale * signals.super_tweeter_boost.max(0.0);
        boost.min(w.trust_cap)
    }

    /// Subtractive penalties for abuse and spam signals.
    #[expect(
        clippy::float_arithmetic,
        reason = "abuse penalties combine dampened counts and bounded ratios"
    )]
    fn abuse_penalty(&self, signals: &Signals) -> f64 {
        let w = &self.weights;
        let mut penalty = w.blocked_penalty * log_damp(signals.blocked_by_count)
            + w.muted_penalty * log_damp(signals.muted_by_count)
            + w.spam_scale * signals.spam_score.clamp(0.0, 1.0)
            + w.spam_keyword_scale * signals.spam_keyword_score.clamp(0.0, 1.0);
        // Guard the zero denominator rather than propagate a non-finite
        // ratio.
        if signals.url_count > 0 {
            let ratio = f64::from(signals.suspicious_url_count) / f64::from(signals.url_count);
            penalty += w.suspicious_url_scale * ratio.min(1.0);
        }
        let extra_hashtags = signals.hashtag_count.saturating_sub(w.hashtag_free_count);
        penalty += w.hashtag_penalty * f64::from(extra_hashtags);
        let extra_mentions = signals.mention_count.saturating_sub(w.mention_free_count);
        penalty += w.mention_penalty * f64::from(extra_mentions);
        let emoji_excess = (signals.emoji_density.clamp(0.0, 1.0) - w.emoji_threshold).max(0.0);
        penalty += w.emoji_scale * emoji_excess;
        if w.account_maturity_days > 0.0 {
            let immaturity =
                (1.0 - signals.account_age_days / w.account_maturity_days).clamp(0.0, 1.0);
            penalty += w.young_account_penalty * immaturity;
        }
        if signals.has_community_note {
            penalty += w.community_note_penalty;
        }
        penalty
    }

    /// Signed adjustment from the derived engagement ratios.
    ///
    /// Organically accelerating content earns a small capped reward;
    /// ratio-anomalous content (retweets far outpacing likes) pays a small
    /// penalty.
    #[expect(
        clippy::float_arithmetic,
        reason = "ratio adjustments blend a capped reward with a thresholded penalty"
    )]
    fn ratio_adjustments(&self, signals: &Signals) -> f64 {
        let w = &self.weights;
        let velocity = signals.engagement_velocity.clamp(0.0, w.velocity_cap);
        let ratio_excess =
            (signals.retweet_like_ratio.clamp(0.0, 1.0) - w.ratio_threshold).max(0.0);
        w.velocity_scale * velocity - w.ratio_penalty_scale * ratio_excess
    }

    /// Small additive novelty, random, and timing perturbations.
    ///
    /// The random term is pre-sampled by the caller; adding it here keeps
    /// near-tied posts from producing an identical order on every view
    /// while the engine itself stays deterministic.
    #[expect(
        clippy::float_arithmetic,
        reason = "perturbation sums three small bounded terms"
    )]
    fn perturbation(&self, signals: &Signals) -> f64 {
        let w = &self.weights;
        w.novelty_scale * signals.novelty_factor
            + w.random_scale * signals.random_factor
            + w.timing_scale * signals.author_timing_score
    }

    /// Mild linear discount for deep candidate positions.
    #[expect(
        clippy::float_arithmetic,
        reason = "the positional discount is linear in the slot index"
    )]
    fn positional_discount(&self, position: usize) -> f64 {
        let slot = u32::try_from(position).unwrap_or(u32::MAX);
        self.weights.position_discount * f64::from(slot)
    }
}

impl Scorer for RelevanceScorer {
    #[expect(
        clippy::float_arithmetic,
        reason = "the composite combines every term into one scalar"
    )]
    fn score(&self, signals: &Signals, position: usize) -> f64 {
        let mut score = self.engagement_base(signals) * self.recency_decay(signals);
        score += self.trust_boost(signals);
        score += self.perturbation(signals);
        score += self.ratio_adjustments(signals);
        score -= self.repetition_penalty(signals);
        score -= self.abuse_penalty(signals);
        score -= self.positional_discount(position);
        if signals.all_seen {
            // `min` keeps the dampening monotone even for negative scores:
            // a positive score shrinks, a negative one is left alone.
            score = score.min(score * self.weights.all_seen_damp);
        }
        <Self as Scorer>::sanitise(score)
    }
}

/// Natural-log dampening of a count, `ln(1 + n)`.
#[must_use]
fn log_damp(count: u32) -> f64 {
    f64::from(count).ln_1p()
}
