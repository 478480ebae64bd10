//! Order a batch of posts by relevance score.

use std::cmp::Ordering;

use log::debug;

use crate::{Post, RecentTopIds, Scorer};

/// Default penalty subtracted from posts whose identifier sits in the
/// recent-top cache.
///
/// The magnitude is a tuning parameter; the contract only requires the
/// penalty to be finite and monotone (a larger penalty never yields a higher
/// effective score). The default is large enough to push a recently-shown
/// post out of the top slots of a typical batch without burying it.
pub const RECENT_TOP_PENALTY: f64 = 25.0;

/// Score and sort a batch of posts in place, descending by score.
///
/// Each post is scored once with its pre-sort index as the position
/// argument; there is no progressive re-scoring as slots fill. Posts whose
/// identifier appears in `recent` have `recent_penalty` subtracted before
/// sorting so a post does not immediately re-occupy a top slot. Ties keep
/// their relative input order (the sort is stable), which makes the output
/// deterministic for identical inputs.
///
/// An empty batch is a valid, trivial input. Duplicate identifiers within a
/// batch are accepted; ordering among the duplicates is undefined once the
/// recent-top penalty applies.
///
/// # Examples
///
/// ```
/// use tideline_core::{Post, RecentTopIds, Scorer, Signals, rank_posts};
///
/// struct LikesScorer;
/// impl Scorer for LikesScorer {
///     fn score(&self, signals: &Signals, _position: usize) -> f64 {
///         f64::from(signals.like_count)
///     }
/// }
///
/// let mut batch = vec![
///     Post::new("low", "", 0, Signals { like_count: 1, ..Signals::default() }),
///     Post::new("high", "", 0, Signals { like_count: 9, ..Signals::default() }),
/// ];
/// rank_posts(&mut batch, &LikesScorer, &RecentTopIds::new(), 5.0);
/// assert_eq!(batch.first().map(|p| p.id.as_str()), Some("high"));
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "the recent-top penalty is a subtractive score adjustment"
)]
pub fn rank_posts<S>(posts: &mut [Post], scorer: &S, recent: &RecentTopIds, recent_penalty: f64)
where
    S: Scorer + ?Sized,
{
    for (position, post) in posts.iter_mut().enumerate() {
        let mut score = scorer.score(&post.signals, position);
        if recent.contains(&post.id) {
            score -= recent_penalty;
        }
        // A conforming scorer already returns finite values; the guard keeps
        // the sort total even for misbehaving implementations.
        post.score = S::sanitise(score);
    }
    posts.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    debug!("ranked batch of {} posts", posts.len());
}

/// Return the identifiers of the first `n` posts in a ranked batch.
///
/// Convenience for callers that record top slots into a
/// [`RecentTopIds`] cache after ranking; how many slots count as "top" is
/// the caller's window to choose.
#[must_use]
pub fn top_ids(posts: &[Post], n: usize) -> Vec<String> {
    posts.iter().take(n).map(|post| post.id.clone()).collect()
}
