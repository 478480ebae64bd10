//! The weighted scoring engine for Tideline feeds.
//!
//! [`RelevanceScorer`] maps one post's
//! [`Signals`](tideline_core::Signals) plus its candidate feed position to a
//! single real-valued score. The computation is a deterministic, hand-tuned
//! weighted composite (not a learned model) whose shape is fixed:
//!
//! - log-dampened engagement with flat media and video bonuses,
//! - multiplicative recency decay,
//! - subtractive repetition, abuse, and positional penalties,
//! - a capped trust boost,
//! - small additive novelty/random/timing perturbations.
//!
//! Every coefficient lives in [`RelevanceWeights`], the tuning surface.
//! The engine is total over its numeric domain: any input, however
//! pathological, produces a finite score, and identical inputs always
//! produce the identical score.
//!
//! # Examples
//!
//! ```
//! use tideline_core::{Scorer, Signals};
//! use tideline_scorer::RelevanceScorer;
//!
//! let scorer = RelevanceScorer::with_defaults();
//! let quiet = Signals::default();
//! let popular = Signals { like_count: 250, ..Signals::default() };
//! assert!(scorer.score(&popular, 0) > scorer.score(&quiet, 0));
//! ```

#![forbid(unsafe_code)]

mod engine;
mod weights;

pub use engine::RelevanceScorer;
pub use weights::{RelevanceWeights, WeightsError};
