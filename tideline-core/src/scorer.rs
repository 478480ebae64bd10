//! Score posts from their signal sets.
//!
//! The `Scorer` trait assigns a relevance score to one post's [`Signals`]
//! given the post's candidate position within the feed being assembled.

use crate::Signals;

/// Calculate a relevance score for one post.
///
/// Higher scores indicate a better candidate for a top feed slot. The method
/// is total over its numeric domain: it never fails and must return a finite
/// value for any input, including pathological ones. Implementations must be
/// thread-safe (`Send` + `Sync`) and referentially transparent so that
/// identical inputs always produce identical output.
///
/// `position` is the post's candidate index in the batch as supplied (0 is
/// the top slot); position-dependent discounts key off it.
///
/// Use [`Scorer::sanitise`] to guard against non-finite intermediate
/// results.
///
/// # Examples
///
/// ```rust
/// use tideline_core::{Scorer, Signals};
///
/// struct LikesScorer;
///
/// impl Scorer for LikesScorer {
///     fn score(&self, signals: &Signals, _position: usize) -> f64 {
///         f64::from(signals.like_count)
///     }
/// }
///
/// let signals = Signals { like_count: 3, ..Signals::default() };
/// assert_eq!(LikesScorer.score(&signals, 0), 3.0);
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for the given signal set at the given feed position.
    fn score(&self, signals: &Signals, position: usize) -> f64;

    /// Replace a non-finite raw score with the neutral value `0.0`.
    ///
    /// Relative order is all downstream consumers use, so no clamping is
    /// applied to finite values.
    #[must_use]
    fn sanitise(score: f64) -> f64 {
        if score.is_finite() { score } else { 0.0 }
    }
}
